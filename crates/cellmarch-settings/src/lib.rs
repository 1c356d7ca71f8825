pub mod defaults;
pub mod loader;
pub mod validator;

pub use loader::{load_settings_file, load_settings_from_json, load_settings_from_str, LoadError};
pub use validator::{validate_settings, ValidationError};

use cellmarch_core::SimSettings;

/// Parse RON settings and validate them in one step.
///
/// Parse failures and validation failures are both reported as strings so
/// callers at the application boundary can print and refuse to start.
pub fn load_validated(ron_str: &str) -> Result<SimSettings, Vec<String>> {
    let settings = load_settings_from_str(ron_str).map_err(|e| vec![e.to_string()])?;
    validate_settings(&settings)
        .map_err(|errors| errors.iter().map(ToString::to_string).collect::<Vec<_>>())?;
    Ok(settings)
}
