// boxfit/src/processors/trimmer.rs
use image::{DynamicImage, GenericImageView, Rgba};

/// Crop-box in pixel coordinates: `(x, y, width, height)`.
pub type CropBox = (u32, u32, u32, u32);

/// Removes near-uniform borders.
///
/// The top-left pixel is the reference background. A pixel belongs to the
/// background when its RGBA distance to the reference, normalized to `0..=1`,
/// is at most `tolerance`.
#[derive(Debug, Clone, Copy)]
pub struct Trimmer {
    tolerance: f32,
}

impl Trimmer {
    pub fn new(tolerance: f32) -> Self {
        Self {
            tolerance: tolerance.clamp(0.0, 1.0),
        }
    }

    pub fn trim(&self, image: &DynamicImage) -> DynamicImage {
        match self.content_bounds(image) {
            Some((x, y, w, h)) if (w, h) != image.dimensions() => {
                log::debug!(
                    "Trimming {}x{} to {}x{} at ({}, {})",
                    image.width(),
                    image.height(),
                    w,
                    h,
                    x,
                    y
                );
                image.crop_imm(x, y, w, h)
            }
            _ => image.clone(),
        }
    }

    /// Bounds of everything that is not background, or `None` when the whole
    /// image matches the background.
    pub fn content_bounds(&self, image: &DynamicImage) -> Option<CropBox> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return None;
        }

        let background = *rgba.get_pixel(0, 0);
        let is_content = |x: u32, y: u32| !self.is_background(rgba.get_pixel(x, y), &background);

        let row_has_content = |y: u32| (0..width).any(|x| is_content(x, y));
        let min_y = (0..height).find(|&y| row_has_content(y))?;
        let max_y = (min_y..height).rev().find(|&y| row_has_content(y))?;

        let col_has_content = |x: u32| (min_y..=max_y).any(|y| is_content(x, y));
        let min_x = (0..width).find(|&x| col_has_content(x))?;
        let max_x = (min_x..width).rev().find(|&x| col_has_content(x))?;

        Some((min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    fn is_background(&self, pixel: &Rgba<u8>, background: &Rgba<u8>) -> bool {
        color_distance(pixel, background) <= self.tolerance
    }
}

fn color_distance(a: &Rgba<u8>, b: &Rgba<u8>) -> f32 {
    let sum: f32 = a
        .0
        .iter()
        .zip(b.0.iter())
        .map(|(&x, &y)| {
            let d = f32::from(x) - f32::from(y);
            d * d
        })
        .sum();
    sum.sqrt() / (2.0 * 255.0)
}
