use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use facescan_core::annotation::infrastructure::outline_annotator::OutlineAnnotator;
use facescan_core::detection::domain::detection_params::{
    DetectionParams, MIN_NEIGHBORS_BOUNDS, MIN_SIZE_BOUNDS, SCALE_FACTOR_BOUNDS,
};
use facescan_core::detection::infrastructure::detector_factory::create_detector;
use facescan_core::detection::infrastructure::model_resolver::{self, ResolveOptions};
use facescan_core::imaging::domain::image_reader::ImageReader;
use facescan_core::imaging::domain::image_writer::ImageWriter;
use facescan_core::imaging::infrastructure::example_gallery::{is_supported_image, ExampleGallery};
use facescan_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use facescan_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use facescan_core::pipeline::detect_faces_use_case::DetectFacesUseCase;
use facescan_core::pipeline::detection_report::DetectionReport;
use facescan_core::pipeline::interaction::InteractionError;
use facescan_core::shared::constants::{
    CASCADE_MODEL_NAME, CASCADE_MODEL_URL, DEFAULT_EXAMPLES_DIR,
};

/// Haar cascade face detection on still images.
#[derive(Parser, Debug)]
#[command(name = "facescan", version)]
struct Cli {
    /// Input image (PNG or JPEG). Not needed with --list-examples.
    #[arg(required_unless_present = "list_examples")]
    input: Option<PathBuf>,

    /// Annotated output image (default: <input stem>_faces.<ext>).
    output: Option<PathBuf>,

    /// Window growth between scan passes (1.01-2.0).
    #[arg(long, default_value_t = SCALE_FACTOR_BOUNDS.default, value_parser = parse_scale_factor)]
    scale_factor: f64,

    /// Overlapping hits required to keep a detection (1-20).
    #[arg(long, default_value_t = MIN_NEIGHBORS_BOUNDS.default,
          value_parser = clap::value_parser!(u32).range(1..=20))]
    min_neighbors: u32,

    /// Smallest face edge considered, in pixels (10-500).
    #[arg(long, default_value_t = MIN_SIZE_BOUNDS.default,
          value_parser = clap::value_parser!(u32).range(10..=500))]
    min_size: u32,

    /// Haar cascade XML file (default: cached or downloaded frontal-face cascade).
    #[arg(long)]
    cascade: Option<PathBuf>,

    /// List the example images instead of running detection.
    #[arg(long)]
    list_examples: bool,

    /// Example image directory.
    #[arg(long, default_value = DEFAULT_EXAMPLES_DIR)]
    examples_dir: PathBuf,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.list_examples {
        return list_examples(&cli.examples_dir);
    }

    let input = cli.input.as_deref().ok_or(InteractionError::NoImageSelected)?;
    validate(input)?;
    let output = cli.output.clone().unwrap_or_else(|| default_output_path(input));
    let params = DetectionParams::new(cli.scale_factor, cli.min_neighbors, cli.min_size)?;

    let cascade_path = resolve_cascade(cli.cascade.clone())?;
    let detector = create_detector(&cascade_path)?;
    let mut use_case = DetectFacesUseCase::new(detector, Box::new(OutlineAnnotator::default()));

    let frame = ImageFileReader::new().read(input)?;
    let outcome = use_case.execute(&frame, &params)?;
    ImageFileWriter::new().write(&output, &outcome.annotated)?;

    println!("{}", DetectionReport::from_count(outcome.face_count()));
    log::info!("Output written to {}", output.display());
    Ok(())
}

fn list_examples(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let gallery = ExampleGallery::scan(dir).map_err(|e| InteractionError::from(&e))?;
    if gallery.is_empty() {
        let warning = InteractionError::NoExampleImages(dir.display().to_string());
        eprintln!("Warning: {warning}");
        return Ok(());
    }
    for name in gallery.names() {
        println!("{}", gallery.dir().join(name).display());
    }
    Ok(())
}

fn resolve_cascade(explicit: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    log::info!("Resolving cascade: {CASCADE_MODEL_NAME}");
    let options = ResolveOptions {
        explicit_path: explicit,
        bundled_dir: bundled_models_dir(),
    };
    let path = model_resolver::resolve(
        CASCADE_MODEL_NAME,
        CASCADE_MODEL_URL,
        &options,
        Some(Box::new(download_progress)),
    )?;
    Ok(path)
}

fn bundled_models_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("models")))
}

fn validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }
    if !is_supported_image(input) {
        return Err(format!(
            "Input must be a .png, .jpg or .jpeg image, got {}",
            input.display()
        )
        .into());
    }
    Ok(())
}

fn parse_scale_factor(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if SCALE_FACTOR_BOUNDS.contains(value) {
        Ok(value)
    } else {
        Err(format!(
            "scale factor must be between {} and {}",
            SCALE_FACTOR_BOUNDS.min, SCALE_FACTOR_BOUNDS.max
        ))
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let ext = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_faces{ext}"))
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face cascade... {pct}%");
    } else {
        eprint!("\rDownloading face cascade... {downloaded} bytes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_control_panel() {
        let cli = Cli::try_parse_from(["facescan", "photo.jpg"]).unwrap();
        assert_eq!(cli.scale_factor, 1.1);
        assert_eq!(cli.min_neighbors, 5);
        assert_eq!(cli.min_size, 30);
        assert_eq!(cli.examples_dir, PathBuf::from("imagens"));
    }

    #[rstest]
    #[case::scale_too_low(&["--scale-factor", "1.0"])]
    #[case::scale_too_high(&["--scale-factor", "2.5"])]
    #[case::scale_not_number(&["--scale-factor", "fast"])]
    #[case::neighbors_zero(&["--min-neighbors", "0"])]
    #[case::neighbors_too_high(&["--min-neighbors", "21"])]
    #[case::size_too_small(&["--min-size", "9"])]
    #[case::size_too_large(&["--min-size", "501"])]
    fn test_out_of_bounds_parameters_rejected(#[case] args: &[&str]) {
        let mut argv = vec!["facescan", "photo.jpg"];
        argv.extend_from_slice(args);
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_bounds_edges_accepted() {
        let cli = Cli::try_parse_from([
            "facescan",
            "photo.jpg",
            "--scale-factor",
            "1.01",
            "--min-neighbors",
            "20",
            "--min-size",
            "10",
        ])
        .unwrap();
        assert_eq!(cli.scale_factor, 1.01);
        assert_eq!(cli.min_neighbors, 20);
        assert_eq!(cli.min_size, 10);
    }

    #[test]
    fn test_input_required_unless_listing() {
        assert!(Cli::try_parse_from(["facescan"]).is_err());
        assert!(Cli::try_parse_from(["facescan", "--list-examples"]).is_ok());
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/tmp/portrait.JPG")),
            PathBuf::from("/tmp/portrait_faces.JPG")
        );
    }

    #[test]
    fn test_validate_rejects_unsupported_extension() {
        let dir = std::env::temp_dir();
        let path = dir.join("facescan_cli_test_input.gif");
        std::fs::write(&path, b"x").unwrap();
        assert!(validate(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_validate_rejects_missing_file() {
        assert!(validate(Path::new("/nonexistent/photo.png")).is_err());
    }
}
