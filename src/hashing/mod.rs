use blake3::Hasher;

use crate::constants::FINGERPRINT_HEX_LEN;

/// Full 32-byte BLAKE3 digest of a submission, keyed by task category.
///
/// The category and the raw (unnormalized) text are joined with a `:` separator, so
/// whitespace differences in the text produce different digests.
#[inline]
pub fn hash_submission(category: &str, text: &str) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(category.as_bytes());
    hasher.update(b":");
    hasher.update(text.as_bytes());
    *hasher.finalize().as_bytes()
}

/// Computes the 64-bit content fingerprint used as a score-cache key.
///
/// # Truncation Rationale
///
/// The first 8 bytes (64 bits) of [`hash_submission`] are kept, which renders as the
/// 16 hex characters stored in cache keys. A collision makes two different
/// submissions share a cached score. With 64 bits the birthday bound is around
/// 4.3 billion distinct submissions, far beyond the lifetime of any cache window:
///
/// | Submissions cached | Collision probability |
/// |--------------------|-----------------------|
/// | 1 million          | ~0.00003%             |
/// | 100 million        | ~0.3%                 |
///
/// The formula is approximately `P(collision) ≈ n² / (2 × 2^64)` for `n` items.
#[inline]
pub fn fingerprint(category: &str, text: &str) -> u64 {
    let digest = hash_submission(category, text);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Renders a fingerprint as the fixed-width hex prefix of the full digest.
#[inline]
pub fn fingerprint_hex(fingerprint: u64) -> String {
    format!("{:0width$x}", fingerprint, width = FINGERPRINT_HEX_LEN)
}

/// Namespaced cache key, e.g. `essay_cache:0123456789abcdef`.
#[inline]
pub fn cache_key(category: &str, text: &str) -> String {
    format!("essay_cache:{}", fingerprint_hex(fingerprint(category, text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fingerprint_determinism() {
        let a = fingerprint("task2", "Some people believe that...");
        let b = fingerprint("task2", "Some people believe that...");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_category_sensitivity() {
        let t1 = fingerprint("task1", "same text");
        let t2 = fingerprint("task2", "same text");
        assert_ne!(t1, t2);
    }

    #[test]
    fn test_fingerprint_uses_unnormalized_text() {
        let a = fingerprint("task2", "one two");
        let b = fingerprint("task2", "one  two");
        let c = fingerprint("task2", "One two");
        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_separator_prevents_ambiguity() {
        assert_ne!(fingerprint("task", "2:x"), fingerprint("task2", "x"));
    }

    #[test]
    fn test_fingerprint_is_digest_prefix() {
        let digest = hash_submission("task1", "chart");
        let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        let fp = fingerprint_hex(fingerprint("task1", "chart"));
        assert_eq!(fp.len(), FINGERPRINT_HEX_LEN);
        assert_eq!(fp, hex[..FINGERPRINT_HEX_LEN]);
    }

    #[test]
    fn test_fingerprint_hex_pads_leading_zeros() {
        assert_eq!(fingerprint_hex(0xff), "00000000000000ff");
    }

    #[test]
    fn test_cache_key_namespace() {
        let key = cache_key("task2", "text");
        assert!(key.starts_with("essay_cache:"));
        assert_eq!(key.len(), "essay_cache:".len() + FINGERPRINT_HEX_LEN);
    }
}
