// boxfit/src/processors/loader.rs
use crate::core::{BoxfitError, Result};
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::path::Path;

/// A decoded image together with the colour profile its file carried.
pub struct LoadedImage {
    pub image: DynamicImage,
    pub icc_profile: Option<Vec<u8>>,
}

/// Largest image side accepted for decoding.
pub const MAX_DIMENSION: u32 = 100_000;

#[derive(Clone)]
pub struct Loader {
    max_dimensions: (u32, u32),
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: (MAX_DIMENSION, MAX_DIMENSION),
        }
    }

    pub fn load(&self, path: &Path) -> Result<LoadedImage> {
        log::debug!("Loading image from: {}", path.display());

        self.validate_path(path)?;

        let mut decoder = ImageReader::open(path)?
            .with_guessed_format()?
            .into_decoder()?;

        let (width, height) = decoder.dimensions();
        let (max_w, max_h) = self.max_dimensions;
        if width > max_w || height > max_h {
            return Err(BoxfitError::InvalidParameter(format!(
                "Image dimensions {}x{} exceed maximum {}x{}",
                width, height, max_w, max_h
            )));
        }

        let icc_profile = decoder.icc_profile().unwrap_or_else(|e| {
            log::debug!("Ignoring unreadable colour profile in {}: {}", path.display(), e);
            None
        });

        let image = DynamicImage::from_decoder(decoder)?;

        log::debug!(
            "Loaded image: {}x{} pixels, format: {:?}",
            width,
            height,
            image.color()
        );

        Ok(LoadedImage { image, icc_profile })
    }

    /// Reads only the header.
    pub fn dimensions(&self, path: &Path) -> Result<(u32, u32)> {
        let dimensions = ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()?;
        Ok(dimensions)
    }

    pub fn dimensions_and_format(&self, path: &Path) -> Result<(u32, u32, Option<ImageFormat>)> {
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let format = reader.format();
        let (width, height) = reader.into_dimensions()?;
        Ok((width, height, format))
    }

    fn validate_path(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(BoxfitError::InvalidParameter(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let metadata = path.metadata()?;
        if metadata.len() == 0 {
            return Err(BoxfitError::InvalidParameter(format!(
                "File is empty: {}",
                path.display()
            )));
        }

        Ok(())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
