use std::fmt::Write as _;

use crate::scene::model::{FittedText, Primitive, Scene, TextAnchor, TextRun};

const GENERIC_FAMILIES: [&str; 5] = ["serif", "sans-serif", "monospace", "cursive", "fantasy"];

/// Serialize a scene as a standalone SVG document.
///
/// Fitted text maps to `textLength` with `lengthAdjust="spacingAndGlyphs"`, which scales the glyph
/// run to the exact target width. All text and attribute values are escaped.
pub fn scene_to_svg(scene: &Scene) -> String {
    let mut out = String::with_capacity(256 + scene.primitives.len() * 200);
    let families = font_family_attr(&scene.font_families);

    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = scene.width,
        h = scene.height,
    );

    for p in &scene.primitives {
        match p {
            Primitive::Rect(r) => {
                let _ = write!(
                    out,
                    r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                    r.bounds.x0,
                    r.bounds.y0,
                    r.bounds.width(),
                    r.bounds.height(),
                    escape(r.fill.as_str()),
                );
            }
            Primitive::FittedText(t) => write_fitted(&mut out, t, &families),
            Primitive::Text(t) => write_text(&mut out, t, &families),
        }
    }

    out.push_str("</svg>");
    out
}

fn write_fitted(out: &mut String, t: &FittedText, families: &str) {
    let _ = write!(
        out,
        r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" font-weight="{}" text-anchor="{}" fill="{}" opacity="{:.3}" textLength="{:.2}" lengthAdjust="spacingAndGlyphs">{}</text>"#,
        t.origin.x,
        t.origin.y,
        families,
        t.font_size,
        t.font_weight,
        anchor_attr(t.anchor),
        escape(t.fill.as_str()),
        t.opacity,
        t.target_width,
        escape(&t.text),
    );
}

fn write_text(out: &mut String, t: &TextRun, families: &str) {
    let _ = write!(
        out,
        r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" font-weight="{}" text-anchor="{}" fill="{}" opacity="{:.3}">{}</text>"#,
        t.origin.x,
        t.origin.y,
        families,
        t.font_size,
        t.font_weight,
        anchor_attr(t.anchor),
        escape(t.fill.as_str()),
        t.opacity,
        escape(&t.text),
    );
}

fn anchor_attr(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
    }
}

/// CSS font-family list; named families are single-quoted, generic ones left bare.
fn font_family_attr(families: &[String]) -> String {
    let parts: Vec<String> = families
        .iter()
        .map(|f| {
            if GENERIC_FAMILIES.contains(&f.as_str()) {
                f.clone()
            } else {
                format!("'{}'", f.replace(['\'', '\\'], ""))
            }
        })
        .collect();
    escape(&parts.join(", "))
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
