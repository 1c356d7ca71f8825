use cellmarch_core::math::node_count;
use cellmarch_sim::GridSnapshot;
use glam::UVec3;

use crate::compat;
use crate::compress;
use crate::error::PersistError;
use crate::format::*;

/// Parsed snapshot ready to hand to `Grid::restore`.
#[derive(Debug)]
pub struct SaveData {
    pub header: SaveHeader,
    pub snapshot: GridSnapshot,
    /// Compatibility warnings (e.g., rule fingerprint mismatch).
    pub warnings: Vec<String>,
}

/// Load and parse a snapshot from raw bytes.
pub fn load(bytes: &[u8], current_rule_fingerprint: u32) -> Result<SaveData, PersistError> {
    if bytes.len() < HEADER_SIZE {
        return Err(PersistError::FileTooSmall(bytes.len(), HEADER_SIZE));
    }

    let header: SaveHeader = bytemuck::pod_read_unaligned(&bytes[..HEADER_SIZE]);
    let warnings = compat::validate_header(&header, current_rule_fingerprint)?;
    for warning in &warnings {
        log::warn!("load: {warning}");
    }

    let dims = UVec3::new(
        header.dims[0] as u32,
        header.dims[1] as u32,
        header.dims[2] as u32,
    );
    let nodes = node_count(dims);
    let body = &bytes[HEADER_SIZE..];

    let alive = if header.flags & FLAG_FILL != 0 {
        compress::expand_fill(body, nodes)?
    } else {
        let packed = compress::decompress_body(body, packed_len(nodes))?;
        compress::unpack_bits(&packed, nodes)?
    };

    Ok(SaveData {
        header,
        snapshot: GridSnapshot {
            dims,
            step: header.step as u32,
            generation: header.generation,
            alive,
        },
        warnings,
    })
}
