use crate::scene::model::Scene;

/// A rendered frame as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a fully transparent buffer.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// `true` when `data` holds exactly `width * height` pixels.
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.width as usize * self.height as usize * 4
    }

    /// RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Turns one [`Scene`] into pixels.
///
/// Implementations must be side-effect free and callable from several threads at once; frames of
/// one sequence may be rasterized in parallel. The returned buffer must be exactly
/// `target_width` wide and keep the scene's aspect ratio.
pub trait Rasterizer: Send + Sync {
    /// Rasterize `scene` at `target_width` pixels wide.
    fn render(&self, scene: &Scene, target_width: u32) -> anyhow::Result<PixelBuffer>;
}

/// Height matching `target_width` for a scene of `width x height`.
pub fn target_height(width: u32, height: u32, target_width: u32) -> u32 {
    if width == 0 {
        return 0;
    }
    let h = u64::from(height) * u64::from(target_width);
    let w = u64::from(width);
    u32::try_from((h + w / 2) / w).unwrap_or(u32::MAX).max(1)
}
