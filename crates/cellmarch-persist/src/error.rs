/// Errors that can occur during snapshot save/load.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("invalid magic bytes (expected CMGS)")]
    InvalidMagic,

    #[error("unsupported snapshot format version {0}")]
    UnsupportedVersion(u16),

    #[error("file too small ({0} bytes, minimum {1})")]
    FileTooSmall(usize, usize),

    #[error("invalid grid dimensions {dims:?}: {reason}")]
    InvalidDimensions { dims: [u16; 3], reason: String },

    #[error("LZ4 decompression failed: {0}")]
    DecompressError(String),

    #[error("invalid body size: expected {expected}, got {actual}")]
    InvalidBodySize { expected: usize, actual: usize },

    #[error("invalid fill body (expected a single 0 or 1 byte)")]
    InvalidFill,
}
