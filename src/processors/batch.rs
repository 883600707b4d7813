// boxfit/src/processors/batch.rs
use crate::core::{
    BatchConfig, BatchReport, BoxfitError, ImageCandidate, ImageProcessor, Result,
    SizeDistribution, TargetCanvas, TrimmedMeasurement,
};
use crate::processors::discovery::{discover, Discovery};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Canvas plan produced by the measurement pass.
#[derive(Debug)]
pub struct MeasuredBatch {
    pub distribution: SizeDistribution,
    pub canvas: TargetCanvas,
    pub report: BatchReport,
}

/// Drives discovery, both passes and the reduction between them.
///
/// Every parallel stage runs on one pool of `concurrency` threads, which caps
/// how many images are decoded at once. Each stage is a collect, so the next
/// step only starts once all files of the previous one are done.
pub struct BatchProcessor {
    config: BatchConfig,
    thread_pool: rayon::ThreadPool,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig) -> Result<Self> {
        config.validate()?;

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.concurrency)
            .thread_name(|i| format!("boxfit-worker-{}", i))
            .build()
            .map_err(|e| {
                BoxfitError::ProcessingError(format!("Failed to create thread pool: {}", e))
            })?;

        Ok(Self {
            config,
            thread_pool,
        })
    }

    /// Full run: measure, plan, normalize into the output folder.
    pub fn run(&self) -> Result<BatchReport> {
        let scratch = self.scratch_dir()?;
        let (candidates, measured) = self.measure_in(scratch.path())?;
        let report = self.normalize_all(&candidates, measured)?;

        if let Err(e) = scratch.close() {
            log::warn!("Failed to remove scratch directory: {}", e);
        }

        Ok(report)
    }

    /// Measurement pass only; nothing is written to the output folder and the
    /// scratch area is removed before this returns.
    pub fn measure(&self) -> Result<MeasuredBatch> {
        let scratch = self.scratch_dir()?;
        let (_, measured) = self.measure_in(scratch.path())?;

        if let Err(e) = scratch.close() {
            log::warn!("Failed to remove scratch directory: {}", e);
        }

        Ok(measured)
    }

    /// The returned candidates may point into `scratch`, so they are only
    /// valid while it exists.
    fn measure_in(&self, scratch: &Path) -> Result<(Vec<ImageCandidate>, MeasuredBatch)> {
        let Discovery {
            candidates,
            failures,
            skipped,
        } = discover(&self.config, scratch)?;

        let mut report = BatchReport {
            discovered: candidates.len(),
            discovery_failures: failures,
            skipped,
            ..Default::default()
        };

        log::info!(
            "Calculating bounding box over {} images from {}",
            candidates.len(),
            self.config.input_dir.display()
        );

        let processor = ImageProcessor::new(&self.config);
        let pb = self.progress_bar(candidates.len(), "measuring");

        let results: Vec<Result<TrimmedMeasurement>> = self.thread_pool.install(|| {
            candidates
                .par_iter()
                .progress_with(pb.clone())
                .map(|candidate| processor.measure(candidate, scratch))
                .collect()
        });
        pb.finish_and_clear();

        let mut measurements = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(measurement) => measurements.push(measurement),
                Err(e) => {
                    log::warn!("{}", e);
                    report.trim_failures.push(failure_entry(e));
                }
            }
        }

        report.measured = measurements.len();
        let distribution = SizeDistribution::from_measurements(&measurements);
        let selected = distribution.select(self.config.scale_up)?;
        let canvas = TargetCanvas::plan(selected, &self.config);

        log::info!(
            "Selected {}x{} from {} measurements; canvas {}x{} (inner {}x{})",
            selected.0,
            selected.1,
            distribution.len(),
            canvas.outer_width,
            canvas.outer_height,
            canvas.inner_width,
            canvas.inner_height
        );

        report.canvas = Some(canvas);

        Ok((
            candidates,
            MeasuredBatch {
                distribution,
                canvas,
                report,
            },
        ))
    }

    /// Every candidate is normalized, including those whose measurement
    /// failed; they use the same trim and fall back to the untrimmed image.
    fn normalize_all(
        &self,
        candidates: &[ImageCandidate],
        measured: MeasuredBatch,
    ) -> Result<BatchReport> {
        let MeasuredBatch {
            canvas,
            mut report,
            ..
        } = measured;

        let output_dir = &self.config.output_dir;
        if output_dir.exists() && !output_dir.is_dir() {
            return Err(BoxfitError::InvalidParameter(format!(
                "Output path exists but is not a directory: {}",
                output_dir.display()
            )));
        }
        std::fs::create_dir_all(output_dir)?;

        let processor = ImageProcessor::new(&self.config);
        let pb = self.progress_bar(candidates.len(), "normalizing");

        let results: Vec<_> = self.thread_pool.install(|| {
            candidates
                .par_iter()
                .progress_with(pb.clone())
                .map(|candidate| processor.normalize(candidate, &canvas, output_dir))
                .collect()
        });

        for result in results {
            match result {
                Ok(written) => {
                    if written.profile_stripped {
                        report.profiles_stripped += 1;
                    }
                    report.written.push(written.output_path);
                }
                Err(e) => {
                    log::warn!("{}", e);
                    report.write_failures.push(failure_entry(e));
                }
            }
        }

        pb.finish_with_message(format!(
            "Wrote {} of {} images at {}x{}",
            report.written.len(),
            candidates.len(),
            canvas.outer_width,
            canvas.outer_height
        ));

        Ok(report)
    }

    fn scratch_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("boxfit-");

        let dir = match &self.config.scratch_dir {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };

        log::debug!("Scratch directory: {}", dir.path().display());
        Ok(dir)
    }

    fn progress_bar(&self, total: usize, stage: &'static str) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_prefix(stage);
        pb
    }
}

fn failure_entry(error: BoxfitError) -> (PathBuf, String) {
    match error {
        BoxfitError::TrimFailure { path, reason }
        | BoxfitError::WriteFailure { path, reason }
        | BoxfitError::Rasterize { path, reason } => (path, reason),
        other => (PathBuf::new(), other.to_string()),
    }
}
