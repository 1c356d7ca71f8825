use cellmarch_core::constants::MAX_AXIS_NODES;

use crate::error::PersistError;
use crate::format::{SaveHeader, FORMAT_VERSION, MAGIC};

/// Validate a snapshot header and return any compatibility warnings.
///
/// A rule fingerprint mismatch produces a warning, not an error: the grid
/// still loads but will evolve differently from when it was saved.
pub fn validate_header(
    header: &SaveHeader,
    current_rule_fingerprint: u32,
) -> Result<Vec<String>, PersistError> {
    if header.magic != MAGIC {
        return Err(PersistError::InvalidMagic);
    }

    if header.version != FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion(header.version));
    }

    let dims = header.dims;
    if let Some(reason) = dimension_problem(dims, header.step) {
        return Err(PersistError::InvalidDimensions { dims, reason });
    }

    let mut warnings = Vec::new();

    if header.rule_fingerprint != current_rule_fingerprint {
        warnings.push(format!(
            "Rules have changed since this snapshot was saved \
             (saved: {:08x}, current: {:08x}). \
             The grid will evolve differently.",
            header.rule_fingerprint, current_rule_fingerprint
        ));
    }

    Ok(warnings)
}

fn dimension_problem(dims: [u16; 3], step: u16) -> Option<String> {
    if dims.iter().any(|&d| d == 0) {
        return Some("axis with zero nodes".to_string());
    }
    if dims.iter().any(|&d| d as u32 > MAX_AXIS_NODES) {
        return Some(format!("axis exceeds {MAX_AXIS_NODES} nodes"));
    }
    let min_axis = dims.iter().copied().min().unwrap_or(0);
    if step == 0 || step > min_axis {
        return Some(format!("step {step} outside 1..={min_axis}"));
    }
    None
}
