// boxfit/src/core/processor.rs
use super::{
    BatchConfig, BoxfitError, ImageCandidate, NormalizedImage, Result, TargetCanvas,
    TrimmedMeasurement,
};
use crate::processors::{
    CanvasPadder, Compressor, Loader, MetadataProcessor, ResizeMode, Resizer, Trimmer,
};
use crate::utils::output_path;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::path::Path;

/// Per-file work for both passes. Holds no mutable state, so one instance is
/// shared by every worker.
pub struct ImageProcessor<'a> {
    config: &'a BatchConfig,
    loader: Loader,
    trimmer: Trimmer,
    resizer: Resizer,
    padder: CanvasPadder,
    compressor: Compressor,
    metadata_processor: MetadataProcessor,
}

impl<'a> ImageProcessor<'a> {
    pub fn new(config: &'a BatchConfig) -> Self {
        Self {
            config,
            loader: Loader::new(),
            trimmer: Trimmer::new(config.trim_tolerance()),
            resizer: Resizer::new(config.algorithm),
            padder: CanvasPadder::new(config.background),
            compressor: Compressor::new(config.quality).with_png_optimization(config.optimize_png),
            metadata_processor: MetadataProcessor::new(),
        }
    }

    /// Trim stage: trims, writes the result to a temporary PNG in `scratch`,
    /// reads its size back and removes it.
    pub fn measure(
        &self,
        candidate: &ImageCandidate,
        scratch: &Path,
    ) -> Result<TrimmedMeasurement> {
        let fail = |reason: String| BoxfitError::TrimFailure {
            path: candidate.original_path.clone(),
            reason,
        };

        let loaded = self
            .loader
            .load(&candidate.source_path)
            .map_err(|e| fail(e.to_string()))?;
        let trimmed = self.trimmer.trim(&loaded.image);

        // Removed when dropped, on every return path.
        let temp = tempfile::Builder::new()
            .prefix("cropped_")
            .suffix(".png")
            .tempfile_in(scratch)
            .map_err(|e| fail(format!("cannot create temporary file: {}", e)))?;

        trimmed
            .save_with_format(temp.path(), ImageFormat::Png)
            .map_err(|e| fail(e.to_string()))?;

        let (trimmed_width, trimmed_height) = self
            .loader
            .dimensions(temp.path())
            .map_err(|e| fail(e.to_string()))?;

        temp.close()
            .map_err(|e| fail(format!("cannot remove temporary file: {}", e)))?;

        log::debug!(
            "Measured {}: {}x{} trimmed",
            candidate.file_name,
            trimmed_width,
            trimmed_height
        );

        Ok(TrimmedMeasurement {
            original_path: candidate.original_path.clone(),
            trimmed_width,
            trimmed_height,
        })
    }

    /// Normalize stage: trim, shrink into the inner canvas, optional grayscale,
    /// centre on the outer canvas, write without embedded metadata.
    pub fn normalize(
        &self,
        candidate: &ImageCandidate,
        canvas: &TargetCanvas,
        output_dir: &Path,
    ) -> Result<NormalizedImage> {
        let output = output_path(output_dir, &self.config.prefix, &candidate.file_name);
        let fail = |reason: String| BoxfitError::WriteFailure {
            path: output.clone(),
            reason,
        };

        let loaded = self
            .loader
            .load(&candidate.source_path)
            .map_err(|e| fail(e.to_string()))?;

        let image = self.render(&loaded.image, canvas);

        let stripped = self
            .metadata_processor
            .strip(loaded.icc_profile.as_deref(), &candidate.source_path);

        self.compressor
            .save(&image, &output)
            .map_err(|e| fail(e.to_string()))?;

        let (width, height) = image.dimensions();
        log::info!("Wrote {} ({}x{})", output.display(), width, height);

        Ok(NormalizedImage {
            output_path: output,
            profile_stripped: !stripped.is_empty(),
        })
    }

    /// The pixel pipeline of the normalize stage, without any I/O.
    pub fn render(&self, image: &DynamicImage, canvas: &TargetCanvas) -> DynamicImage {
        let trimmed = self.trimmer.trim(image);
        let resized = self.resizer.resize(
            &trimmed,
            ResizeMode::ShrinkToFit(canvas.inner_width, canvas.inner_height),
        );

        let toned = if self.config.grayscale {
            CanvasPadder::grayscale(&resized)
        } else {
            resized
        };

        self.padder
            .pad(&toned, canvas.outer_width, canvas.outer_height)
    }
}
