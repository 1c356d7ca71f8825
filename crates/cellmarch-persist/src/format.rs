use cellmarch_core::{GenerationRules, Neighbourhood};

/// Magic bytes identifying a cellmarch grid snapshot.
pub const MAGIC: [u8; 4] = *b"CMGS";

/// Current snapshot format version.
pub const FORMAT_VERSION: u16 = 1;

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 40;

/// Header flag: the body is a single fill byte instead of LZ4 data.
pub const FLAG_FILL: u16 = 0x0001;

/// Snapshot header. Fixed 40 bytes, repr(C) for byte-level serialization.
///
/// Followed by the body: bit-packed liveness (one bit per node, LSB first,
/// linear-index order) compressed with LZ4, or a single 0/1 byte when
/// `FLAG_FILL` is set.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SaveHeader {
    pub magic: [u8; 4],
    pub version: u16,
    pub flags: u16,
    pub dims: [u16; 3],
    pub step: u16,
    pub rule_fingerprint: u32,
    pub _pad0: u32,
    pub generation: u64,
    pub seed: u64,
}

/// Pack rules and stencil into one word so a load can warn when they differ.
///
/// Layout: underpopulation | overpopulation << 8 | reproduction << 16 | stencil << 24.
pub fn rule_fingerprint(rules: &GenerationRules, neighbourhood: Neighbourhood) -> u32 {
    let stencil = match neighbourhood {
        Neighbourhood::VonNeumann => 0u32,
        Neighbourhood::Moore => 1u32,
    };
    rules.underpopulation as u32
        | (rules.overpopulation as u32) << 8
        | (rules.reproduction as u32) << 16
        | stencil << 24
}

/// Bytes needed to hold `nodes` liveness bits.
pub fn packed_len(nodes: usize) -> usize {
    nodes.div_ceil(8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_size() {
        assert_eq!(std::mem::size_of::<SaveHeader>(), HEADER_SIZE);
    }

    #[test]
    fn test_fingerprint_distinguishes_rules() {
        let rules = GenerationRules::default();
        let a = rule_fingerprint(&rules, Neighbourhood::VonNeumann);
        let b = rule_fingerprint(&rules, Neighbourhood::Moore);
        let c = rule_fingerprint(
            &GenerationRules {
                reproduction: 4,
                ..rules
            },
            Neighbourhood::VonNeumann,
        );
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, 0x0003_0302);
    }

    #[test]
    fn test_packed_len() {
        assert_eq!(packed_len(0), 0);
        assert_eq!(packed_len(1), 1);
        assert_eq!(packed_len(8), 1);
        assert_eq!(packed_len(9), 2);
    }
}
