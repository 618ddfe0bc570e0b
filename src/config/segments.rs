use crate::detector::LsdParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `lsd_segments` tool.
#[derive(Debug, Deserialize)]
pub struct LsdToolConfig {
    /// Grayscale (or color, converted to luma) input image.
    pub input: PathBuf,
    /// Detector parameters; missing fields take their defaults.
    #[serde(default)]
    pub lsd: LsdParams,
    pub output: SegmentOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct SegmentOutputConfig {
    /// Destination of the JSON detection report.
    #[serde(rename = "segments_json")]
    pub segments_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<LsdToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

/// Parse and validate a configuration document.
pub fn parse_config(data: &str) -> Result<LsdToolConfig, String> {
    let config: LsdToolConfig = serde_json::from_str(data).map_err(|e| e.to_string())?;
    config.lsd.validate().map_err(|e| e.to_string())?;
    Ok(config)
}
