// boxfit/src/core/sizing.rs
//! Batch-level size statistics.
//!
//! Widths and heights are sorted as two independent marginal distributions.
//! The selected width and the selected height usually come from different
//! images; this is intentional and the chosen pair is not a joint size.

use super::{BatchConfig, BoxfitError, Result, TrimmedMeasurement};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeDistribution {
    widths: Vec<u32>,
    heights: Vec<u32>,
}

impl SizeDistribution {
    pub fn from_measurements(measurements: &[TrimmedMeasurement]) -> Self {
        let mut widths: Vec<u32> = measurements.iter().map(|m| m.trimmed_width).collect();
        let mut heights: Vec<u32> = measurements.iter().map(|m| m.trimmed_height).collect();
        widths.sort_unstable();
        heights.sort_unstable();
        Self { widths, heights }
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn widths(&self) -> &[u32] {
        &self.widths
    }

    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    /// Picks the representative `(width, height)`.
    ///
    /// With `scale_up` the lower median, index `ceil(n/2 - 1)`, is taken from
    /// each axis so smaller images may end up scaled relative to the canvas.
    /// Without it the minimum is taken and nothing needs enlarging.
    pub fn select(&self, scale_up: bool) -> Result<(u32, u32)> {
        if self.is_empty() {
            return Err(BoxfitError::EmptyBatch);
        }

        let index = if scale_up {
            lower_median_index(self.len())
        } else {
            0
        };

        Ok((self.widths[index], self.heights[index]))
    }
}

/// `ceil(n/2 - 1)` for `n >= 1`.
pub fn lower_median_index(n: usize) -> usize {
    n.saturating_sub(1) / 2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetCanvas {
    pub inner_width: u32,
    pub inner_height: u32,
    pub outer_width: u32,
    pub outer_height: u32,
}

impl TargetCanvas {
    pub fn plan(selected: (u32, u32), config: &BatchConfig) -> Self {
        let (mut inner_width, mut inner_height) = selected;

        if config.square {
            let side = inner_width.max(inner_height);
            inner_width = side;
            inner_height = side;
        }

        Self {
            inner_width,
            inner_height,
            outer_width: inner_width.saturating_add(config.border_x.saturating_mul(2)),
            outer_height: inner_height.saturating_add(config.border_y.saturating_mul(2)),
        }
    }
}
