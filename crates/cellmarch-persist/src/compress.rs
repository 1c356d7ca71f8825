use crate::error::PersistError;
use crate::format::packed_len;

/// Pack liveness into bits, LSB first, eight nodes per byte.
pub fn pack_bits(alive: &[bool]) -> Vec<u8> {
    let mut out = vec![0u8; packed_len(alive.len())];
    for (i, _) in alive.iter().enumerate().filter(|(_, &a)| a) {
        out[i / 8] |= 1 << (i % 8);
    }
    out
}

/// Unpack `nodes` liveness bits. Trailing bits in the last byte are ignored.
pub fn unpack_bits(packed: &[u8], nodes: usize) -> Result<Vec<bool>, PersistError> {
    let expected = packed_len(nodes);
    if packed.len() != expected {
        return Err(PersistError::InvalidBodySize {
            expected,
            actual: packed.len(),
        });
    }
    Ok((0..nodes).map(|i| packed[i / 8] & (1 << (i % 8)) != 0).collect())
}

/// Compress packed liveness using LZ4.
pub fn compress_body(packed: &[u8]) -> Vec<u8> {
    lz4_flex::compress_prepend_size(packed)
}

/// Decompress an LZ4 body, validating the output size.
pub fn decompress_body(compressed: &[u8], expected: usize) -> Result<Vec<u8>, PersistError> {
    let decompressed = lz4_flex::decompress_size_prepended(compressed)
        .map_err(|e| PersistError::DecompressError(e.to_string()))?;

    if decompressed.len() != expected {
        return Err(PersistError::InvalidBodySize {
            expected,
            actual: decompressed.len(),
        });
    }

    Ok(decompressed)
}

/// If every node shares one state, return it.
pub fn detect_fill(alive: &[bool]) -> Option<bool> {
    let first = *alive.first()?;
    alive.iter().all(|&a| a == first).then_some(first)
}

pub fn encode_fill(alive: bool) -> [u8; 1] {
    [alive as u8]
}

/// Expand a one-byte fill body back to `nodes` entries.
pub fn expand_fill(body: &[u8], nodes: usize) -> Result<Vec<bool>, PersistError> {
    match body {
        [0] => Ok(vec![false; nodes]),
        [1] => Ok(vec![true; nodes]),
        _ => Err(PersistError::InvalidFill),
    }
}
