// boxfit/src/processors/resizer.rs
use crate::core::ResizeAlgorithm;
use image::{imageops::FilterType, DynamicImage, GenericImageView};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeMode {
    /// Scale down uniformly to fit inside the box; images already inside it
    /// are left untouched.
    ShrinkToFit(u32, u32),
    /// Scale uniformly to fit inside the box in either direction.
    Fit(u32, u32),
}

pub struct Resizer {
    algorithm: ResizeAlgorithm,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn resize(&self, image: &DynamicImage, mode: ResizeMode) -> DynamicImage {
        let (width, height) = Self::calculate_dimensions(image.dimensions(), mode);

        if width == image.width() && height == image.height() {
            log::debug!("Image dimensions unchanged, skipping resize");
            return image.clone();
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{}",
            image.width(),
            image.height(),
            width,
            height
        );

        image.resize_exact(width, height, self.filter_type())
    }

    pub fn calculate_dimensions(original: (u32, u32), mode: ResizeMode) -> (u32, u32) {
        let (orig_w, orig_h) = original;
        match mode {
            ResizeMode::ShrinkToFit(max_w, max_h) => {
                if orig_w <= max_w && orig_h <= max_h {
                    (orig_w, orig_h)
                } else {
                    Self::preserve_aspect(orig_w, orig_h, max_w, max_h)
                }
            }
            ResizeMode::Fit(max_w, max_h) => Self::preserve_aspect(orig_w, orig_h, max_w, max_h),
        }
    }

    fn preserve_aspect(orig_w: u32, orig_h: u32, target_w: u32, target_h: u32) -> (u32, u32) {
        if orig_w == 0 || orig_h == 0 || target_w == 0 || target_h == 0 {
            return (orig_w, orig_h);
        }

        let ratio_w = target_w as f64 / orig_w as f64;
        let ratio_h = target_h as f64 / orig_h as f64;
        let ratio = ratio_w.min(ratio_h);

        let new_w = (orig_w as f64 * ratio).round() as u32;
        let new_h = (orig_h as f64 * ratio).round() as u32;

        (new_w.clamp(1, target_w), new_h.clamp(1, target_h))
    }

    fn filter_type(&self) -> FilterType {
        match self.algorithm {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn shrink_to_fit_never_enlarges() {
        assert_eq!(
            Resizer::calculate_dimensions((500, 400), ResizeMode::ShrinkToFit(600, 450)),
            (500, 400)
        );
    }

    #[test]
    fn shrink_to_fit_limits_the_tighter_axis() {
        // 600/700 < 450/500 so width is the constraint.
        assert_eq!(
            Resizer::calculate_dimensions((700, 500), ResizeMode::ShrinkToFit(600, 450)),
            (600, 429)
        );
        // A single oversized axis is enough to trigger the shrink.
        assert_eq!(
            Resizer::calculate_dimensions((300, 900), ResizeMode::ShrinkToFit(600, 450)),
            (150, 450)
        );
    }

    #[test]
    fn fit_enlarges_small_images() {
        assert_eq!(
            Resizer::calculate_dimensions((100, 50), ResizeMode::Fit(400, 400)),
            (400, 200)
        );
    }

    #[test]
    fn resize_produces_computed_size() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(700, 500));
        let resizer = Resizer::new(ResizeAlgorithm::Bilinear);
        let out = resizer.resize(&image, ResizeMode::ShrinkToFit(600, 450));
        assert_eq!(out.dimensions(), (600, 429));
    }
}
