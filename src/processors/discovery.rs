// boxfit/src/processors/discovery.rs
use crate::core::{BatchConfig, BoxfitError, ImageCandidate, Result};
use crate::processors::Rasterizer;
use crate::utils::file_extension;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const VECTOR_EXTENSIONS: [&str; 1] = ["svg"];

#[derive(Debug, Default)]
pub struct Discovery {
    pub candidates: Vec<ImageCandidate>,
    pub failures: Vec<(PathBuf, String)>,
    pub skipped: Vec<(PathBuf, String)>,
}

/// Lists the direct image entries of the input folder.
///
/// Vector files are rasterized into `scratch` and replaced by the raster copy.
/// Candidates are ordered by file name; when two entries map to the same
/// logical name only the first is kept.
pub fn discover(config: &BatchConfig, scratch: &Path) -> Result<Discovery> {
    let input_dir = &config.input_dir;
    if !input_dir.is_dir() {
        return Err(BoxfitError::InputFolderMissing(input_dir.clone()));
    }

    let entries: Vec<PathBuf> = WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();

    let rasterizer = Rasterizer::new(config.inner_width, config.inner_height);
    let raster_dir = scratch.join("rasterized");
    let mut seen = HashSet::new();
    let mut discovery = Discovery::default();

    for path in entries {
        let Some(ext) = file_extension(&path) else {
            log::debug!("Skipping file without extension: {}", path.display());
            continue;
        };

        if !config.allows_extension(&ext) {
            log::debug!(
                "{}",
                BoxfitError::UnsupportedFormat(format!("skipping {}", path.display()))
            );
            continue;
        }

        let candidate = if VECTOR_EXTENSIONS.contains(&ext.as_str()) {
            match rasterize_candidate(&rasterizer, &path, &raster_dir) {
                Ok(candidate) => candidate,
                Err(e) => {
                    log::warn!("{}", e);
                    discovery.failures.push((path, e.to_string()));
                    continue;
                }
            }
        } else {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                log::warn!("Skipping non UTF-8 file name: {}", path.display());
                continue;
            };
            ImageCandidate {
                source_path: path.clone(),
                original_path: path.clone(),
                file_name: file_name.to_string(),
            }
        };

        if !seen.insert(candidate.file_name.clone()) {
            let reason = format!("output name {} is already taken", candidate.file_name);
            log::warn!("Skipping {}: {}", path.display(), reason);
            discovery.skipped.push((path, reason));
            continue;
        }

        log::info!("Found {}", candidate.file_name);
        discovery.candidates.push(candidate);
    }

    Ok(discovery)
}

fn rasterize_candidate(
    rasterizer: &Rasterizer,
    svg_path: &Path,
    raster_dir: &Path,
) -> Result<ImageCandidate> {
    let stem = svg_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| BoxfitError::Rasterize {
            path: svg_path.to_path_buf(),
            reason: "file name is not valid UTF-8".to_string(),
        })?;

    std::fs::create_dir_all(raster_dir)?;
    let file_name = format!("{}.png", stem);
    let png_path = raster_dir.join(&file_name);
    rasterizer.rasterize(svg_path, &png_path)?;

    Ok(ImageCandidate {
        source_path: png_path,
        original_path: svg_path.to_path_buf(),
        file_name,
    })
}
