// boxfit/src/processors/canvas.rs
use image::{
    imageops, DynamicImage, GenericImageView, ImageBuffer, Luma, LumaA, Pixel, Rgb, Rgba,
};

/// Centres images on a fixed-size canvas filled with a background colour.
pub struct CanvasPadder {
    background: Rgba<u8>,
}

impl CanvasPadder {
    pub fn new(background: Rgba<u8>) -> Self {
        Self { background }
    }

    /// Single-channel luma, alpha kept when present.
    pub fn grayscale(image: &DynamicImage) -> DynamicImage {
        if image.color().has_alpha() {
            DynamicImage::ImageLumaA8(image.to_luma_alpha8())
        } else {
            DynamicImage::ImageLuma8(image.to_luma8())
        }
    }

    /// The canvas keeps the colour model of `image`. Content larger than the
    /// canvas is clipped around the centre.
    pub fn pad(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        if image.dimensions() == (width, height) {
            return image.clone();
        }

        let [r, g, b, a] = self.background.0;
        let luma = self.background.to_luma().0[0];

        match image {
            DynamicImage::ImageLuma8(buf) => {
                DynamicImage::ImageLuma8(centered(buf, width, height, Luma([luma])))
            }
            DynamicImage::ImageLumaA8(buf) => {
                DynamicImage::ImageLumaA8(centered(buf, width, height, LumaA([luma, a])))
            }
            DynamicImage::ImageRgb8(buf) => {
                DynamicImage::ImageRgb8(centered(buf, width, height, Rgb([r, g, b])))
            }
            DynamicImage::ImageRgba8(buf) => {
                DynamicImage::ImageRgba8(centered(buf, width, height, self.background))
            }
            other if other.color().has_alpha() => {
                let rgba = other.to_rgba8();
                DynamicImage::ImageRgba8(centered(&rgba, width, height, self.background))
            }
            other => {
                let rgb = other.to_rgb8();
                DynamicImage::ImageRgb8(centered(&rgb, width, height, Rgb([r, g, b])))
            }
        }
    }
}

fn centered<P>(
    content: &ImageBuffer<P, Vec<u8>>,
    width: u32,
    height: u32,
    fill: P,
) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let mut canvas = ImageBuffer::from_pixel(width, height, fill);
    let x = (i64::from(width) - i64::from(content.width())) / 2;
    let y = (i64::from(height) - i64::from(content.height())) / 2;
    imageops::overlay(&mut canvas, content, x, y);
    canvas
}
