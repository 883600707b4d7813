#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use boxfit::{BatchConfig, BatchProcessor, BoxfitError, TargetCanvas};
    use image::{GenericImageView, Rgb, RgbImage};
    use std::fs;
    use std::path::Path;

    const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="200" viewBox="0 0 300 200">
<circle cx="150" cy="100" r="80" fill="#3366cc"/>
</svg>"##;

    fn solid(dir: &TempDir, name: &str, width: u32, height: u32) {
        let img = RgbImage::from_pixel(width, height, Rgb([90, 140, 200]));
        img.save(dir.child(name).path()).unwrap();
    }

    fn config(input: &Path, output: &Path) -> BatchConfig {
        BatchConfig {
            input_dir: input.to_path_buf(),
            output_dir: output.to_path_buf(),
            square: false,
            grayscale: false,
            scale_up: true,
            border_x: 20,
            border_y: 20,
            concurrency: 4,
            show_progress: false,
            ..Default::default()
        }
    }

    fn output_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_batch_normalizes_to_median_canvas() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        solid(&input, "a.png", 500, 400);
        solid(&input, "b.png", 600, 450);
        solid(&input, "c.png", 700, 500);

        let report = BatchProcessor::new(config(input.path(), output.path()))
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(
            report.canvas,
            Some(TargetCanvas {
                inner_width: 600,
                inner_height: 450,
                outer_width: 640,
                outer_height: 490,
            })
        );
        assert_eq!(report.measured, 3);
        assert_eq!(report.written.len(), 3);
        assert!(report.is_clean());

        assert_eq!(output_files(output.path()), vec!["a.png", "b.png", "c.png"]);
        for name in ["a.png", "b.png", "c.png"] {
            let img = image::open(output.child(name).path()).unwrap();
            assert_eq!(img.dimensions(), (640, 490), "{}", name);
        }
    }

    #[test]
    fn test_small_images_are_padded_not_enlarged() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        solid(&input, "a.png", 500, 400);
        solid(&input, "b.png", 600, 450);
        solid(&input, "c.png", 700, 500);

        BatchProcessor::new(config(input.path(), output.path()))
            .unwrap()
            .run()
            .unwrap();

        // a.png keeps its 500x400 content centred at (70, 45).
        let img = image::open(output.child("a.png").path()).unwrap().to_rgb8();
        assert_eq!(img.get_pixel(69, 245), &Rgb([255, 255, 255]));
        assert_eq!(img.get_pixel(70, 245), &Rgb([90, 140, 200]));
        assert_eq!(img.get_pixel(569, 245), &Rgb([90, 140, 200]));
        assert_eq!(img.get_pixel(570, 245), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_square_canvas_with_prefix_and_grayscale() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        solid(&input, "wide.png", 300, 100);
        solid(&input, "tall.jpg", 120, 260);

        let mut cfg = config(input.path(), output.path());
        cfg.square = true;
        cfg.grayscale = true;
        cfg.prefix = "opt_".to_string();

        let report = BatchProcessor::new(cfg).unwrap().run().unwrap();
        let canvas = report.canvas.unwrap();
        // Lower median of two is the minimum: 120 wide, 100 high, squared to 120.
        assert_eq!((canvas.inner_width, canvas.inner_height), (120, 120));
        assert_eq!(canvas.outer_width, canvas.outer_height);

        assert_eq!(output_files(output.path()), vec!["opt_tall.jpg", "opt_wide.png"]);
        for name in ["opt_tall.jpg", "opt_wide.png"] {
            let img = image::open(output.child(name).path()).unwrap();
            assert_eq!(img.dimensions(), (160, 160));
            assert_eq!(img.color().channel_count(), 1, "{}", name);
        }
    }

    #[test]
    fn test_without_scale_up_uses_smallest_sizes() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        solid(&input, "a.png", 500, 300);
        solid(&input, "b.png", 200, 450);
        solid(&input, "c.png", 700, 500);

        let mut cfg = config(input.path(), output.path());
        cfg.scale_up = false;
        cfg.border_x = 0;
        cfg.border_y = 5;

        let report = BatchProcessor::new(cfg).unwrap().run().unwrap();
        let canvas = report.canvas.unwrap();
        assert_eq!((canvas.outer_width, canvas.outer_height), (200, 310));
    }

    #[test]
    fn test_trim_determines_measured_size() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let framed = RgbImage::from_fn(400, 300, |x, y| {
            if (100..300).contains(&x) && (50..150).contains(&y) {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        framed.save(input.child("framed.png").path()).unwrap();

        let report = BatchProcessor::new(config(input.path(), output.path()))
            .unwrap()
            .run()
            .unwrap();
        let canvas = report.canvas.unwrap();
        assert_eq!((canvas.inner_width, canvas.inner_height), (200, 100));

        let out = image::open(output.child("framed.png").path()).unwrap().to_rgb8();
        assert_eq!(out.dimensions(), (240, 140));
        assert_eq!(out.get_pixel(20, 20), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(19, 20), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_empty_folder_is_fatal() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let out_dir = output.child("never");

        let result = BatchProcessor::new(config(input.path(), out_dir.path()))
            .unwrap()
            .run();

        assert!(matches!(result, Err(BoxfitError::EmptyBatch)));
        assert!(!out_dir.path().exists());
    }

    #[test]
    fn test_missing_input_folder() {
        let output = TempDir::new().unwrap();
        let result = BatchProcessor::new(config(Path::new("/no/such/folder"), output.path()))
            .unwrap()
            .run();
        assert!(matches!(result, Err(BoxfitError::InputFolderMissing(_))));
    }

    #[test]
    fn test_svg_is_rasterized_onto_same_canvas() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        solid(&input, "a.png", 500, 400);
        solid(&input, "b.png", 600, 450);
        input.child("logo.svg").write_str(LOGO_SVG).unwrap();

        let report = BatchProcessor::new(config(input.path(), output.path()))
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(report.written.len(), 3);
        assert_eq!(output_files(output.path()), vec!["a.png", "b.png", "logo.png"]);
        let canvas = report.canvas.unwrap();
        for name in ["a.png", "b.png", "logo.png"] {
            let img = image::open(output.child(name).path()).unwrap();
            assert_eq!(img.dimensions(), (canvas.outer_width, canvas.outer_height));
        }
        // The raster copy lives in the scratch area, not in the input folder.
        assert!(!input.child("logo.png").path().exists());
    }

    #[test]
    fn test_broken_file_is_reported_and_batch_continues() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        solid(&input, "good.png", 320, 240);
        input.child("broken.png").write_binary(b"definitely not a png").unwrap();

        let mut cfg = config(input.path(), output.path());
        cfg.scratch_dir = Some(scratch.path().to_path_buf());

        let report = BatchProcessor::new(cfg).unwrap().run().unwrap();

        assert_eq!(report.discovered, 2);
        assert_eq!(report.measured, 1);
        assert_eq!(report.trim_failures.len(), 1);
        assert_eq!(report.trim_failures[0].0, input.child("broken.png").path());
        assert_eq!(report.write_failures.len(), 1);
        assert_eq!(report.written.len(), 1);
        assert_eq!(output_files(output.path()), vec!["good.png"]);

        // No temporary trimmed files or scratch directories survive.
        assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let input = TempDir::new().unwrap();
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let gradient = RgbImage::from_fn(257, 131, |x, y| Rgb([x as u8, y as u8, 77]));
        gradient.save(input.child("g.png").path()).unwrap();
        solid(&input, "s.png", 180, 90);

        for out in [&first, &second] {
            let mut cfg = config(input.path(), out.path());
            cfg.grayscale = true;
            BatchProcessor::new(cfg).unwrap().run().unwrap();
        }

        for name in ["g.png", "s.png"] {
            let a = fs::read(first.child(name).path()).unwrap();
            let b = fs::read(second.child(name).path()).unwrap();
            assert_eq!(a, b, "{}", name);
        }
    }

    #[test]
    fn test_measure_writes_nothing() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let out_dir = output.child("out");
        solid(&input, "a.png", 100, 80);

        let measured = BatchProcessor::new(config(input.path(), out_dir.path()))
            .unwrap()
            .measure()
            .unwrap();

        assert_eq!(measured.distribution.widths(), &[100]);
        assert_eq!(measured.canvas.outer_width, 140);
        assert!(!out_dir.path().exists());
    }

    #[test]
    fn test_duplicate_names_are_reported_as_skipped() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        solid(&input, "logo.png", 200, 100);
        input.child("logo.svg").write_str(LOGO_SVG).unwrap();

        let report = BatchProcessor::new(config(input.path(), output.path()))
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(report.discovered, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, input.child("logo.svg").path());
        assert_eq!(report.failure_count(), 0);
        assert_eq!(output_files(output.path()), vec!["logo.png"]);
    }

    #[test]
    fn test_measure_removes_scratch_area() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        solid(&input, "a.png", 100, 80);
        input.child("logo.svg").write_str(LOGO_SVG).unwrap();

        let mut cfg = config(input.path(), output.child("out").path());
        cfg.scratch_dir = Some(scratch.path().to_path_buf());
        let measured = BatchProcessor::new(cfg).unwrap().measure().unwrap();

        assert_eq!(measured.report.measured, 2);
        assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_square_with_unequal_borders_is_rejected() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let mut cfg = config(input.path(), output.path());
        cfg.square = true;
        cfg.border_y = 5;

        assert!(matches!(
            BatchProcessor::new(cfg),
            Err(BoxfitError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let cfg = BatchConfig {
            concurrency: 0,
            ..Default::default()
        };
        assert!(BatchProcessor::new(cfg).is_err());
    }
}
