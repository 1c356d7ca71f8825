//! Built-in settings presets embedded from `data/settings/`.

use cellmarch_core::SimSettings;

use crate::loader::{load_settings_from_str, LoadError};

pub const DEFAULT_PRESET: &str = include_str!("../../../data/settings/default.ron");
pub const MOORE_PRESET: &str = include_str!("../../../data/settings/moore.ron");
pub const COARSE_PRESET: &str = include_str!("../../../data/settings/coarse.ron");

/// Names accepted by `preset` and `load_preset`.
pub const PRESET_NAMES: [&str; 3] = ["default", "moore", "coarse"];

/// Raw RON source of a named preset.
pub fn preset(name: &str) -> Option<&'static str> {
    match name {
        "default" => Some(DEFAULT_PRESET),
        "moore" => Some(MOORE_PRESET),
        "coarse" => Some(COARSE_PRESET),
        _ => None,
    }
}

pub fn load_preset(name: &str) -> Result<SimSettings, LoadError> {
    let source = preset(name).ok_or_else(|| LoadError::UnknownPreset(name.to_string()))?;
    load_settings_from_str(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate_settings;
    use cellmarch_core::Neighbourhood;

    #[test]
    fn test_default_preset_matches_code_defaults() {
        let s = load_preset("default").expect("should parse");
        assert_eq!(s, SimSettings::default());
    }

    #[test]
    fn test_all_presets_load_and_validate() {
        for name in PRESET_NAMES {
            let s = load_preset(name).unwrap_or_else(|e| panic!("{name}: {e}"));
            if let Err(errors) = validate_settings(&s) {
                panic!("preset {name} failed validation: {errors:?}");
            }
        }
    }

    #[test]
    fn test_moore_preset() {
        let s = load_preset("moore").expect("should parse");
        assert_eq!(s.neighbourhood, Neighbourhood::Moore);
        assert!(s.is_interpolated);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(preset("hexagonal").is_none());
        assert!(matches!(
            load_preset("hexagonal"),
            Err(LoadError::UnknownPreset(_))
        ));
    }
}
