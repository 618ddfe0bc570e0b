use lsd_detector::config::segments;
use lsd_detector::image::io::{load_grayscale_image, write_json_file};
use lsd_detector::LineSegmentDetector;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = segments::load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let detector = LineSegmentDetector::new(config.lsd).map_err(|e| e.to_string())?;
    let report = detector
        .detect_u8(&gray.as_view())
        .map_err(|e| format!("Detection failed on {}: {e}", config.input.display()))?;

    write_json_file(&config.output.segments_json, &report)?;

    println!("{}", report.summary());
    println!(
        "Saved {} line segments to {}",
        report.segments.len(),
        config.output.segments_json.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: lsd_segments <config.json>".to_string()
}
