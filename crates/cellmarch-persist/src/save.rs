use cellmarch_sim::GridSnapshot;

use crate::compress;
use crate::format::*;

/// Serialize a grid snapshot into the snapshot binary format.
///
/// Layout: header (40B) + body (fill byte or LZ4-compressed packed bits).
/// Neighbour counts are not stored; the next generation recomputes them.
pub fn save(snapshot: &GridSnapshot, seed: u64, rule_fingerprint: u32) -> Vec<u8> {
    let (flags, body) = match compress::detect_fill(&snapshot.alive) {
        Some(alive) => (FLAG_FILL, compress::encode_fill(alive).to_vec()),
        None => (0, compress::compress_body(&compress::pack_bits(&snapshot.alive))),
    };

    let header = SaveHeader {
        magic: MAGIC,
        version: FORMAT_VERSION,
        flags,
        dims: [
            snapshot.dims.x as u16,
            snapshot.dims.y as u16,
            snapshot.dims.z as u16,
        ],
        step: snapshot.step as u16,
        rule_fingerprint,
        _pad0: 0,
        generation: snapshot.generation,
        seed,
    };

    let mut output = Vec::with_capacity(HEADER_SIZE + body.len());
    output.extend_from_slice(bytemuck::bytes_of(&header));
    output.extend_from_slice(&body);

    log::debug!(
        "save: {}x{}x{} grid, generation {}, {} body bytes{}",
        snapshot.dims.x,
        snapshot.dims.y,
        snapshot.dims.z,
        snapshot.generation,
        body.len(),
        if flags & FLAG_FILL != 0 { " (fill)" } else { "" }
    );

    output
}
