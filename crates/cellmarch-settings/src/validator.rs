use cellmarch_core::constants::MAX_AXIS_NODES;
use cellmarch_core::SimSettings;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Axis {axis} has {value} nodes; must be between 1 and {max}")]
    AxisOutOfRange { axis: char, value: u32, max: u32 },
    #[error("Step {step} must be between 1 and the smallest axis ({min_axis})")]
    StepOutOfRange { step: u32, min_axis: u32 },
    #[error("Underpopulation count {under} exceeds overpopulation count {over}; nothing can survive")]
    EmptySurvivalRange { under: u8, over: u8 },
    #[error("{field} is {value} but the {neighbourhood} stencil has only {max} neighbours")]
    ThresholdExceedsStencil {
        field: &'static str,
        value: u8,
        max: u8,
        neighbourhood: String,
    },
    #[error("Generation delay {0}s must be a finite, non-negative number")]
    InvalidDelay(f32),
    #[error("Initial density {0} must be within [0, 1]")]
    DensityOutOfRange(f32),
    #[error("Iso level {0} must lie strictly between 0 and 1")]
    IsoLevelOutOfRange(f32),
}

/// Check settings against grid limits and stencil sizes.
///
/// All violations are collected rather than stopping at the first.
pub fn validate_settings(settings: &SimSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let (x, y, z) = settings.dimensions;
    for (axis, value) in [('x', x), ('y', y), ('z', z)] {
        if value == 0 || value > MAX_AXIS_NODES {
            errors.push(ValidationError::AxisOutOfRange {
                axis,
                value,
                max: MAX_AXIS_NODES,
            });
        }
    }

    let min_axis = x.min(y).min(z);
    if settings.step == 0 || (min_axis > 0 && settings.step > min_axis) {
        errors.push(ValidationError::StepOutOfRange {
            step: settings.step,
            min_axis,
        });
    }

    if settings.underpopulation_count > settings.overpopulation_count {
        errors.push(ValidationError::EmptySurvivalRange {
            under: settings.underpopulation_count,
            over: settings.overpopulation_count,
        });
    }

    let max = settings.neighbourhood.max_neighbours();
    for (field, value) in [
        ("underpopulation_count", settings.underpopulation_count),
        ("overpopulation_count", settings.overpopulation_count),
        ("reproduction_count", settings.reproduction_count),
    ] {
        if value > max {
            errors.push(ValidationError::ThresholdExceedsStencil {
                field,
                value,
                max,
                neighbourhood: format!("{:?}", settings.neighbourhood),
            });
        }
    }

    let delay = settings.next_generation_delay;
    if !delay.is_finite() || delay < 0.0 {
        errors.push(ValidationError::InvalidDelay(delay));
    }

    if !(0.0..=1.0).contains(&settings.initial_density) {
        errors.push(ValidationError::DensityOutOfRange(settings.initial_density));
    }

    if !(settings.iso_level > 0.0 && settings.iso_level < 1.0) {
        errors.push(ValidationError::IsoLevelOutOfRange(settings.iso_level));
    }

    if settings.reproduction_count == 0 {
        log::warn!("reproduction_count is 0: dead cells are never born");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellmarch_core::Neighbourhood;

    #[test]
    fn test_defaults_valid() {
        assert!(validate_settings(&SimSettings::default()).is_ok());
    }

    #[test]
    fn test_axis_limits() {
        let s = SimSettings {
            dimensions: (0, 257, 256),
            ..SimSettings::default()
        };
        let errors = validate_settings(&s).unwrap_err();
        assert!(errors.contains(&ValidationError::AxisOutOfRange {
            axis: 'x',
            value: 0,
            max: 256
        }));
        assert!(errors.contains(&ValidationError::AxisOutOfRange {
            axis: 'y',
            value: 257,
            max: 256
        }));
        assert!(!errors
            .iter()
            .any(|e| matches!(e, ValidationError::AxisOutOfRange { axis: 'z', .. })));
    }

    #[test]
    fn test_step_limits() {
        let s = SimSettings {
            dimensions: (8, 3, 8),
            step: 4,
            ..SimSettings::default()
        };
        assert_eq!(
            validate_settings(&s).unwrap_err(),
            vec![ValidationError::StepOutOfRange {
                step: 4,
                min_axis: 3
            }]
        );
        let zero = SimSettings {
            step: 0,
            ..SimSettings::default()
        };
        assert!(validate_settings(&zero).is_err());
    }

    #[test]
    fn test_thresholds_checked_against_stencil() {
        let s = SimSettings {
            underpopulation_count: 5,
            overpopulation_count: 7,
            reproduction_count: 6,
            neighbourhood: Neighbourhood::VonNeumann,
            ..SimSettings::default()
        };
        let errors = validate_settings(&s).unwrap_err();
        assert_eq!(errors.len(), 2, "{errors:?}");

        let moore = SimSettings {
            neighbourhood: Neighbourhood::Moore,
            ..s
        };
        assert!(validate_settings(&moore).is_ok());
    }

    #[test]
    fn test_empty_survival_range() {
        let s = SimSettings {
            underpopulation_count: 4,
            overpopulation_count: 2,
            ..SimSettings::default()
        };
        assert_eq!(
            validate_settings(&s).unwrap_err(),
            vec![ValidationError::EmptySurvivalRange { under: 4, over: 2 }]
        );
    }

    #[test]
    fn test_scalar_ranges_collected() {
        let s = SimSettings {
            next_generation_delay: -0.1,
            initial_density: 1.5,
            iso_level: 1.0,
            ..SimSettings::default()
        };
        let errors = validate_settings(&s).unwrap_err();
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(errors.contains(&ValidationError::InvalidDelay(-0.1)));
        assert!(errors.contains(&ValidationError::DensityOutOfRange(1.5)));
        assert!(errors.contains(&ValidationError::IsoLevelOutOfRange(1.0)));
    }

    #[test]
    fn test_nan_delay_rejected() {
        let s = SimSettings {
            next_generation_delay: f32::NAN,
            ..SimSettings::default()
        };
        assert!(validate_settings(&s).is_err());
    }
}
