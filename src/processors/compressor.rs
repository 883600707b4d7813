// boxfit/src/processors/compressor.rs
use crate::core::{BoxfitError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use oxipng::{optimize_from_memory, Options};
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

pub struct Compressor {
    quality: u8,
    optimize_png: bool,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            optimize_png: false,
        }
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    pub fn save(&self, image: &DynamicImage, path: &Path) -> Result<()> {
        let format = detect_format(path)?;
        self.save_with_format(image, path, format)
    }

    pub fn save_with_format(
        &self,
        image: &DynamicImage,
        path: &Path,
        format: ImageFormat,
    ) -> Result<()> {
        log::debug!(
            "Saving image to {} with format {:?}, quality: {}",
            path.display(),
            format,
            self.quality
        );

        let image = prepare_for_format(image, format);

        match format {
            ImageFormat::Jpeg => self.save_jpeg(&image, path),
            ImageFormat::Png if self.optimize_png => self.save_optimized_png(&image, path),
            _ => {
                let mut writer = BufWriter::new(File::create(path)?);
                image.write_to(&mut writer, format)?;
                Ok(())
            }
        }
    }

    fn save_jpeg(&self, image: &DynamicImage, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        let encoder = JpegEncoder::new_with_quality(&mut writer, self.quality);
        image.write_with_encoder(encoder)?;
        Ok(())
    }

    fn save_optimized_png(&self, image: &DynamicImage, path: &Path) -> Result<()> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png)?;

        let optimized = optimize_from_memory(&buffer.into_inner(), &Options::default())
            .map_err(|e| BoxfitError::ProcessingError(format!("PNG optimization failed: {}", e)))?;

        std::fs::write(path, optimized)?;
        Ok(())
    }
}

/// Encoders accept different colour models; convert to one the target takes.
fn prepare_for_format(image: &DynamicImage, format: ImageFormat) -> DynamicImage {
    let gray = matches!(
        image,
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageLumaA8(_)
    );

    match format {
        ImageFormat::Jpeg if gray => DynamicImage::ImageLuma8(image.to_luma8()),
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        ImageFormat::Gif => DynamicImage::ImageRgba8(image.to_rgba8()),
        ImageFormat::Tiff | ImageFormat::Bmp if matches!(image, DynamicImage::ImageLumaA8(_)) => {
            DynamicImage::ImageRgba8(image.to_rgba8())
        }
        _ => image.clone(),
    }
}

pub fn detect_format(path: &Path) -> Result<ImageFormat> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => Ok(ImageFormat::Jpeg),
        Some("png") => Ok(ImageFormat::Png),
        Some("gif") => Ok(ImageFormat::Gif),
        Some("bmp") => Ok(ImageFormat::Bmp),
        Some("webp") => Ok(ImageFormat::WebP),
        Some("tiff") | Some("tif") => Ok(ImageFormat::Tiff),
        _ => Err(BoxfitError::UnsupportedFormat(format!(
            "No encoder for {}",
            path.display()
        ))),
    }
}
