// boxfit/src/core/mod.rs
pub mod processor;
pub mod sizing;

use crate::processors::MAX_DIMENSION;
use image::Rgba;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use processor::ImageProcessor;
pub use sizing::{SizeDistribution, TargetCanvas};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

/// Run-wide settings. Built once at startup and only ever shared by reference.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Default inner canvas. Used to rasterize vector inputs; the batch
    /// measurement replaces it for the normalize stage.
    pub inner_width: u32,
    pub inner_height: u32,
    pub border_x: u32,
    pub border_y: u32,
    pub square: bool,
    pub grayscale: bool,
    pub trim_fuzz: f32,
    pub trim_fuzz_percentage: f32,
    pub scale_up: bool,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub prefix: String,
    pub concurrency: usize,
    pub extensions: Vec<String>,
    pub background: Rgba<u8>,
    pub algorithm: ResizeAlgorithm,
    pub quality: u8,
    pub optimize_png: bool,
    pub scratch_dir: Option<PathBuf>,
    pub show_progress: bool,
}

pub const DEFAULT_EXTENSIONS: [&str; 9] = [
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp", "svg",
];

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            inner_width: 600,
            inner_height: 600,
            border_x: 20,
            border_y: 20,
            square: true,
            grayscale: true,
            trim_fuzz: 20.0,
            trim_fuzz_percentage: 100.0,
            scale_up: true,
            input_dir: PathBuf::from("./data"),
            output_dir: PathBuf::from("./data/output"),
            prefix: String::new(),
            concurrency: 10,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            background: Rgba([255, 255, 255, 255]),
            algorithm: ResizeAlgorithm::Lanczos3,
            quality: 90,
            optimize_png: false,
            scratch_dir: None,
            show_progress: true,
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.inner_width == 0 || self.inner_height == 0 {
            return Err(BoxfitError::InvalidParameter(
                "Inner canvas dimensions must be greater than zero".to_string(),
            ));
        }

        if self.inner_width > MAX_DIMENSION || self.inner_height > MAX_DIMENSION {
            return Err(BoxfitError::InvalidParameter(format!(
                "Dimensions too large (max {} pixels)",
                MAX_DIMENSION
            )));
        }

        if self.square && self.border_x != self.border_y {
            return Err(BoxfitError::InvalidParameter(format!(
                "A square canvas needs equal borders, got {} horizontal and {} vertical",
                self.border_x, self.border_y
            )));
        }

        if self.concurrency == 0 {
            return Err(BoxfitError::InvalidParameter(
                "Concurrency limit must be at least 1".to_string(),
            ));
        }

        if !(0.0..=100.0).contains(&self.trim_fuzz) {
            return Err(BoxfitError::InvalidParameter(format!(
                "Trim fuzz must be between 0 and 100, got {}",
                self.trim_fuzz
            )));
        }

        if !(0.0..=100.0).contains(&self.trim_fuzz_percentage) {
            return Err(BoxfitError::InvalidParameter(format!(
                "Trim fuzz percentage must be between 0 and 100, got {}",
                self.trim_fuzz_percentage
            )));
        }

        if self.quality == 0 || self.quality > 100 {
            return Err(BoxfitError::InvalidParameter(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        if self.extensions.is_empty() {
            return Err(BoxfitError::InvalidParameter(
                "At least one file extension must be allowed".to_string(),
            ));
        }

        if self.prefix.is_empty() && same_dir(&self.input_dir, &self.output_dir) {
            return Err(BoxfitError::InvalidParameter(
                "Output folder equals input folder; set a prefix to avoid overwriting sources"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Fraction of the maximum colour distance treated as background by the trim.
    pub fn trim_tolerance(&self) -> f32 {
        (self.trim_fuzz / 100.0) * (self.trim_fuzz_percentage / 100.0)
    }

    pub fn allows_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// A discovered input ready for both passes.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCandidate {
    /// File decoded by both stages; a scratch PNG for rasterized vectors.
    pub source_path: PathBuf,
    /// File the candidate was discovered as.
    pub original_path: PathBuf,
    /// Logical name used for the output file.
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimmedMeasurement {
    pub original_path: PathBuf,
    pub trimmed_width: u32,
    pub trimmed_height: u32,
}

/// Outcome of normalizing one candidate.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub output_path: PathBuf,
    pub profile_stripped: bool,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub discovered: usize,
    pub measured: usize,
    pub canvas: Option<TargetCanvas>,
    pub written: Vec<PathBuf>,
    pub profiles_stripped: usize,
    pub discovery_failures: Vec<(PathBuf, String)>,
    /// Entries left out because their output name was already taken.
    pub skipped: Vec<(PathBuf, String)>,
    pub trim_failures: Vec<(PathBuf, String)>,
    pub write_failures: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn failure_count(&self) -> usize {
        self.discovery_failures.len() + self.write_failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0 && self.trim_failures.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum BoxfitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Input folder does not exist or is not a directory: {}", .0.display())]
    InputFolderMissing(PathBuf),

    #[error("No image could be measured; cannot derive a target canvas")]
    EmptyBatch,

    #[error("Trim failed for {}: {reason}", path.display())]
    TrimFailure { path: PathBuf, reason: String },

    #[error("Write failed for {}: {reason}", path.display())]
    WriteFailure { path: PathBuf, reason: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Rasterizing {} failed: {reason}", path.display())]
    Rasterize { path: PathBuf, reason: String },

    #[error("Processing error: {0}")]
    ProcessingError(String),
}

pub type Result<T> = std::result::Result<T, BoxfitError>;
