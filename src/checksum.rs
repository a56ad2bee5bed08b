//! Checksum helpers shared by workloads.
//!
//! All ports fold text and floating point results into the result register
//! through the same djb2-style hash. Floats are hashed through their fixed
//! 7-decimal rendering so tiny last-bit differences between platforms don't
//! break the comparison.

const SEED: u32 = 5381;

/// djb2 hash over raw bytes: `hash = hash * 33 + byte`, wrapping.
#[inline]
pub fn checksum_bytes(bytes: &[u8]) -> u32 {
    bytes.iter().fold(SEED, |hash, &byte| {
        (hash << 5).wrapping_add(hash).wrapping_add(byte as u32)
    })
}

#[inline]
pub fn checksum_str(s: &str) -> u32 {
    checksum_bytes(s.as_bytes())
}

/// Hash of `format!("{:.7}", v)`.
pub fn checksum_f64(v: f64) -> u32 {
    checksum_str(&format!("{:.7}", v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_str_known_values() {
        assert_eq!(checksum_str(""), 5381);
        assert_eq!(checksum_str("a"), 177670);
        assert_eq!(checksum_str("hello"), 261238937);
    }

    #[test]
    fn test_checksum_bytes_matches_str() {
        assert_eq!(checksum_bytes(&[1, 2, 3]), 193378155);
        assert_eq!(checksum_bytes(b"hello"), checksum_str("hello"));
    }

    #[test]
    fn test_checksum_f64_uses_seven_decimals() {
        assert_eq!(checksum_f64(3.14159265358979), checksum_str("3.1415927"));
        assert_eq!(checksum_f64(3.14159265358979), 3548506579);
        assert_eq!(checksum_f64(-0.169075164), 1957805438);
    }
}
