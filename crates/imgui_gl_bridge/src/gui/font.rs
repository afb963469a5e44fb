//! Rasterized font atlas handed over by the GUI library

/// Pixel storage of a font atlas
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontPixels {
    /// One coverage byte per pixel
    Alpha8(Vec<u8>),
    /// Four bytes per pixel, RGBA order
    Rgba32(Vec<u8>),
}

/// Font atlas bitmap with its dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel data, row-major from the top row
    pub pixels: FontPixels,
}

impl FontImage {
    /// Pixel data as RGBA8
    ///
    /// Alpha-only atlases become white texels carrying the coverage in the
    /// alpha channel, so the same fragment shader handles both formats.
    pub fn to_rgba32(&self) -> Vec<u8> {
        match &self.pixels {
            FontPixels::Rgba32(rgba) => rgba.clone(),
            FontPixels::Alpha8(alpha) => alpha
                .iter()
                .flat_map(|&a| [0xFF, 0xFF, 0xFF, a])
                .collect(),
        }
    }

    /// Whether the pixel buffer matches the declared dimensions
    pub fn is_consistent(&self) -> bool {
        let texels = self.width as usize * self.height as usize;
        match &self.pixels {
            FontPixels::Alpha8(alpha) => alpha.len() == texels,
            FontPixels::Rgba32(rgba) => rgba.len() == texels * 4,
        }
    }
}
