// boxfit/src/processors/rasterizer.rs
use crate::core::{BoxfitError, Result};
use crate::processors::{ResizeMode, Resizer};
use resvg::{tiny_skia, usvg};
use std::path::Path;

/// Renders SVG documents to PNG so the raster pipeline can take them.
pub struct Rasterizer {
    max_width: u32,
    max_height: u32,
}

impl Rasterizer {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// Scales the document uniformly to fit the configured box and writes a PNG.
    /// Returns the pixel size written.
    pub fn rasterize(&self, svg_path: &Path, png_path: &Path) -> Result<(u32, u32)> {
        let fail = |reason: String| BoxfitError::Rasterize {
            path: svg_path.to_path_buf(),
            reason,
        };

        let data = std::fs::read(svg_path)?;
        let tree = usvg::Tree::from_data(&data, &usvg::Options::default())
            .map_err(|e| fail(e.to_string()))?;

        let size = tree.size();
        let intrinsic = (
            (size.width().ceil() as u32).max(1),
            (size.height().ceil() as u32).max(1),
        );
        let (width, height) = Resizer::calculate_dimensions(
            intrinsic,
            ResizeMode::Fit(self.max_width, self.max_height),
        );

        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| fail(format!("cannot allocate {}x{} pixmap", width, height)))?;

        let transform = tiny_skia::Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        pixmap
            .save_png(png_path)
            .map_err(|e| fail(e.to_string()))?;

        log::debug!(
            "Rasterized {} to {} ({}x{})",
            svg_path.display(),
            png_path.display(),
            width,
            height
        );

        Ok((width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;
    use tempfile::TempDir;

    const SQUARE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 100 50">
<rect x="10" y="10" width="80" height="30" fill="#ff0000"/>
</svg>"##;

    #[test]
    fn rasterizes_to_fit_box() {
        let dir = TempDir::new().unwrap();
        let svg = dir.path().join("shape.svg");
        let png = dir.path().join("shape.png");
        std::fs::write(&svg, SQUARE_SVG).unwrap();

        let size = Rasterizer::new(200, 200).rasterize(&svg, &png).unwrap();
        assert_eq!(size, (200, 100));

        let image = image::open(&png).unwrap();
        assert_eq!(image.dimensions(), (200, 100));
        assert_eq!(image.to_rgba8().get_pixel(100, 50).0, [255, 0, 0, 255]);
    }

    #[test]
    fn invalid_document_is_a_rasterize_error() {
        let dir = TempDir::new().unwrap();
        let svg = dir.path().join("broken.svg");
        std::fs::write(&svg, "<svg").unwrap();

        let result = Rasterizer::new(10, 10).rasterize(&svg, &dir.path().join("x.png"));
        assert!(matches!(result, Err(BoxfitError::Rasterize { .. })));
    }
}
