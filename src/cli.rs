// boxfit/src/cli.rs
use crate::core::{BatchConfig, ResizeAlgorithm, DEFAULT_EXTENSIONS};
use crate::utils::parse_hex_color;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use image::Rgba;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "boxfit")]
#[command(version, about = "Trim a folder of images and normalize them onto one common canvas")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Measure the batch, plan the canvas and write normalized images
    Run(BatchArgs),

    /// Measure the batch and print the planned canvas without writing anything
    Measure(BatchArgs),

    /// Show dimensions, format and embedded metadata of one image
    Info {
        /// Image file to inspect
        input: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Input folder
    #[arg(default_value = "./data")]
    pub input: PathBuf,

    /// Output folder, created when missing
    #[arg(short, long, default_value = "./data/output")]
    pub output: PathBuf,

    /// Default inner width; also the raster width for SVG inputs
    #[arg(long, default_value_t = 600)]
    pub width: u32,

    /// Default inner height; also the raster height for SVG inputs
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Horizontal border thickness in pixels
    #[arg(long, default_value_t = 20)]
    pub border_x: u32,

    /// Vertical border thickness in pixels; must equal --border-x with --square
    /// [default: same as --border-x]
    #[arg(long)]
    pub border_y: Option<u32>,

    /// Use a square inner canvas sized by the larger side
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub square: bool,

    /// Convert output to single-channel gray
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub grayscale: bool,

    /// Trim tolerance, 0-100
    #[arg(long, default_value_t = 20.0)]
    pub fuzz: f32,

    /// Share of the fuzz band treated as background, 0-100
    #[arg(long, default_value_t = 100.0)]
    pub fuzz_percentage: f32,

    /// Size the canvas by the lower median instead of the smallest image
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub scale_up: bool,

    /// Prefix prepended to every output file name
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Maximum number of images processed at once
    #[arg(short = 'j', long, default_value_t = 10)]
    pub concurrency: usize,

    /// Comma separated list of accepted extensions
    #[arg(long, value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Border colour as RRGGBB or RRGGBBAA
    #[arg(long, default_value = "ffffff", value_parser = parse_background)]
    pub background: Rgba<u8>,

    /// Resize filter
    #[arg(long, value_enum, default_value_t = Algorithm::Lanczos3)]
    pub filter: Algorithm,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = 90)]
    pub quality: u8,

    /// Run lossless oxipng optimization on PNG output
    #[arg(long)]
    pub optimize_png: bool,

    /// Root for temporary files [default: system temp dir]
    #[arg(long)]
    pub scratch_dir: Option<PathBuf>,

    /// Hide progress bars
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(alg: Algorithm) -> Self {
        match alg {
            Algorithm::Nearest => ResizeAlgorithm::Nearest,
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}

fn parse_background(value: &str) -> Result<Rgba<u8>, String> {
    parse_hex_color(value)
        .map(Rgba)
        .ok_or_else(|| format!("expected RRGGBB or RRGGBBAA, got '{}'", value))
}

impl BatchArgs {
    pub fn into_config(self) -> BatchConfig {
        let extensions = self
            .extensions
            .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect())
            .into_iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        BatchConfig {
            inner_width: self.width,
            inner_height: self.height,
            border_x: self.border_x,
            border_y: self.border_y.unwrap_or(self.border_x),
            square: self.square,
            grayscale: self.grayscale,
            trim_fuzz: self.fuzz,
            trim_fuzz_percentage: self.fuzz_percentage,
            scale_up: self.scale_up,
            input_dir: self.input,
            output_dir: self.output,
            prefix: self.prefix,
            concurrency: self.concurrency,
            extensions,
            background: self.background,
            algorithm: self.filter.into(),
            quality: self.quality,
            optimize_png: self.optimize_png,
            scratch_dir: self.scratch_dir,
            show_progress: !self.no_progress,
        }
    }
}
