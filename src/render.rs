use crate::export::SurfaceData;
use image::{ImageBuffer, Luma, Rgba, RgbaImage, GrayImage};

/// Heights are clamped to ±this before mapping to color.
pub const HEIGHT_EXTENT: f32 = 5.0;

pub fn pix_from_normalized(value: f32) -> u8 {
    (value * 255.0 + 0.5) as u8
}

/// Red shows obstruction, blue shows height. Flat open water is half blue.
pub fn surface_pixel(height: f32, obstruction: f32) -> [u8; 4] {
    let h = height.clamp(-HEIGHT_EXTENT, HEIGHT_EXTENT);
    [
        pix_from_normalized((1.0 - obstruction).clamp(0.0, 1.0)),
        0,
        pix_from_normalized((h + HEIGHT_EXTENT) / (HEIGHT_EXTENT * 2.0)),
        255,
    ]
}

pub fn height_gray(height: f32) -> u8 {
    let h = height.clamp(-HEIGHT_EXTENT, HEIGHT_EXTENT);
    pix_from_normalized((h + HEIGHT_EXTENT) / (HEIGHT_EXTENT * 2.0))
}

pub struct Renderer {
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Nearest-neighbor sample of the surface at output pixel (x, y).
    fn sample(&self, surface: &impl SurfaceData, x: u32, y: u32) -> Option<usize> {
        let sim_x = (x as f32 / self.width as f32 * surface.width() as f32) as usize;
        let sim_y = (y as f32 / self.height as f32 * surface.height() as f32) as usize;

        if sim_x < surface.width() && sim_y < surface.height() {
            Some(sim_y * surface.width() + sim_x)
        } else {
            None
        }
    }

    pub fn render_to_image(&self, surface: &impl SurfaceData) -> RgbaImage {
        let mut img = ImageBuffer::new(self.width, self.height);

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = match self.sample(surface, x, y) {
                Some(idx) => Rgba(surface_pixel(
                    surface.heights()[idx],
                    surface.obstructions()[idx],
                )),
                None => Rgba([0, 0, 0, 255]),
            };
        }

        img
    }

    pub fn render_heightmap(&self, surface: &impl SurfaceData) -> GrayImage {
        let mut img = ImageBuffer::new(self.width, self.height);

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = match self.sample(surface, x, y) {
                Some(idx) => Luma([height_gray(surface.heights()[idx])]),
                None => Luma([0]),
            };
        }

        img
    }
}
