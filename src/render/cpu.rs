use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use usvg::fontdb::{Database, Family, Query, Stretch, Style, Weight};

use crate::render::backend::{PixelBuffer, Rasterizer, target_height};
use crate::render::svg::scene_to_svg;
use crate::scene::model::Scene;

/// Largest raster edge accepted, to avoid pathological allocations.
const MAX_DIM: u32 = 16_384;

/// CPU rasterizer: scene to SVG, parsed by `usvg`, painted by `resvg`.
///
/// The font database is loaded once and shared; the rasterizer itself is immutable and can be
/// used from many threads.
#[derive(Clone)]
pub struct SvgRasterizer {
    fontdb: Arc<Database>,
}

impl std::fmt::Debug for SvgRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgRasterizer")
            .field("faces", &self.fontdb.len())
            .finish()
    }
}

impl SvgRasterizer {
    /// Rasterizer using the system fonts.
    pub fn new() -> Self {
        Self::with_font_dirs(std::iter::empty::<&Path>())
    }

    /// Rasterizer using the system fonts plus every `ttf`/`otf`/`ttc` file in `dirs`.
    pub fn with_font_dirs<'a>(dirs: impl IntoIterator<Item = &'a Path>) -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        for dir in dirs {
            let added = load_fonts_from_dir(&mut db, dir);
            tracing::debug!(dir = %dir.display(), added, "loaded font directory");
        }
        tracing::debug!(faces = db.len(), "font database loaded");
        Self::from_fontdb(Arc::new(db))
    }

    /// Rasterizer over an existing font database.
    pub fn from_fontdb(fontdb: Arc<Database>) -> Self {
        Self { fontdb }
    }

    /// Number of font faces available.
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    fn parse(&self, svg: &str) -> anyhow::Result<usvg::Tree> {
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            font_resolver: make_font_resolver(),
            ..Default::default()
        };
        usvg::Tree::from_str(svg, &opts).context("parse scene svg")
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for SvgRasterizer {
    fn render(&self, scene: &Scene, target_width: u32) -> anyhow::Result<PixelBuffer> {
        if scene.width == 0 || scene.height == 0 || target_width == 0 {
            anyhow::bail!("scene and target sizes must be non-zero");
        }
        let width = target_width;
        let height = target_height(scene.width, scene.height, target_width);
        if width > MAX_DIM || height > MAX_DIM {
            anyhow::bail!("raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})");
        }

        let tree = self.parse(&scene_to_svg(scene))?;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .context("failed to allocate pixmap")?;

        let sx = (width as f32) / tree.size().width();
        let sy = (height as f32) / tree.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for px in pixmap.pixels() {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        Ok(PixelBuffer {
            width,
            height,
            data,
        })
    }
}

const FONT_EXTENSIONS: [&str; 3] = ["ttf", "otf", "ttc"];

fn is_font_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| FONT_EXTENSIONS.iter().any(|f| ext.eq_ignore_ascii_case(f)))
}

/// Load the font files directly inside `dir`, in file-name order so face ids are stable.
///
/// Returns the number of faces added; unreadable directories and files add none.
fn load_fonts_from_dir(db: &mut Database, dir: &Path) -> usize {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "font directory not readable");
            return 0;
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| is_font_file(path))
        .collect();
    paths.sort();

    let before = db.len();
    for path in &paths {
        if let Err(e) = db.load_font_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping font file");
        }
    }
    db.len() - before
}

/// Font selection for scene text: the requested families, then sans-serif and monospace, then
/// the first face in the database, so digits render even on hosts missing every named family.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let families = query_families(font.families());
            let query = Query {
                families: &families,
                weight: Weight(font.weight()),
                stretch: to_fontdb_stretch(font.stretch()),
                style: to_fontdb_style(font.style()),
            };
            fontdb.query(&query).or_else(|| {
                tracing::debug!(families = ?font.families(), "no face matched, using first face");
                fontdb.faces().next().map(|face| face.id)
            })
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

fn query_families(requested: &[usvg::FontFamily]) -> Vec<Family<'_>> {
    requested
        .iter()
        .map(|family| match family {
            usvg::FontFamily::Named(name) => Family::Name(name.as_str()),
            usvg::FontFamily::Serif => Family::Serif,
            usvg::FontFamily::SansSerif => Family::SansSerif,
            usvg::FontFamily::Cursive => Family::Cursive,
            usvg::FontFamily::Fantasy => Family::Fantasy,
            usvg::FontFamily::Monospace => Family::Monospace,
        })
        .chain([Family::SansSerif, Family::Monospace])
        .collect()
}

fn to_fontdb_style(style: usvg::FontStyle) -> Style {
    match style {
        usvg::FontStyle::Normal => Style::Normal,
        usvg::FontStyle::Italic => Style::Italic,
        usvg::FontStyle::Oblique => Style::Oblique,
    }
}

fn to_fontdb_stretch(stretch: usvg::FontStretch) -> Stretch {
    match stretch {
        usvg::FontStretch::UltraCondensed => Stretch::UltraCondensed,
        usvg::FontStretch::ExtraCondensed => Stretch::ExtraCondensed,
        usvg::FontStretch::Condensed => Stretch::Condensed,
        usvg::FontStretch::SemiCondensed => Stretch::SemiCondensed,
        usvg::FontStretch::Normal => Stretch::Normal,
        usvg::FontStretch::SemiExpanded => Stretch::SemiExpanded,
        usvg::FontStretch::Expanded => Stretch::Expanded,
        usvg::FontStretch::ExtraExpanded => Stretch::ExtraExpanded,
        usvg::FontStretch::UltraExpanded => Stretch::UltraExpanded,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
