use std::path::Path;

use cellmarch_core::SimSettings;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse settings RON: {0}")]
    RonParseError(String),
    #[error("Failed to parse settings JSON: {0}")]
    JsonParseError(String),
    #[error("Failed to serialize settings: {0}")]
    SerializeError(String),
    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },
    #[error("Unsupported settings file extension '{0}' (expected .ron or .json)")]
    UnsupportedExtension(String),
    #[error("Unknown settings preset '{0}'")]
    UnknownPreset(String),
}

/// Parse settings from a RON string. Missing fields take their defaults.
pub fn load_settings_from_str(ron_str: &str) -> Result<SimSettings, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::RonParseError(e.to_string()))
}

/// Parse settings from a JSON string. Missing fields take their defaults.
pub fn load_settings_from_json(json_str: &str) -> Result<SimSettings, LoadError> {
    serde_json::from_str(json_str).map_err(|e| LoadError::JsonParseError(e.to_string()))
}

/// Read a settings file, choosing the format by extension.
pub fn load_settings_file(path: &Path) -> Result<SimSettings, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if ext != "ron" && ext != "json" {
        return Err(LoadError::UnsupportedExtension(ext));
    }
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    log::info!("Loading settings from {}", path.display());
    if ext == "json" {
        load_settings_from_json(&text)
    } else {
        load_settings_from_str(&text)
    }
}

/// Render settings as pretty RON, suitable for writing back to a data file.
pub fn settings_to_ron(settings: &SimSettings) -> Result<String, LoadError> {
    ron::ser::to_string_pretty(settings, ron::ser::PrettyConfig::default())
        .map_err(|e| LoadError::SerializeError(e.to_string()))
}
