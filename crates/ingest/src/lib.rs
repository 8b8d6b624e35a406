pub mod reader;
pub mod segmenter;

pub use reader::FileReader;
pub use segmenter::{SegmentError, Segmentation, Segmenter, SegmenterConfig};

use sha2::{Digest, Sha256};
use unicode_segmentation::UnicodeSegmentation;

/// SHA-256 fingerprint of the raw document bytes, hex-encoded. Used for
/// dedup and audit; the raw text itself is never persisted.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Estimate token count (rough: 1.3 tokens per word). CJK text carries
/// little whitespace, so non-ASCII graphemes provide a floor of roughly
/// one token per two characters.
pub fn estimate_tokens(text: &str) -> usize {
    let word_count = text.split_whitespace().count();
    let word_estimate = (word_count as f64 * 1.3) as usize;

    let wide_grapheme_count = text
        .graphemes(true)
        .filter(|g| !g.is_ascii() && !g.trim().is_empty())
        .count();

    word_estimate.max(wide_grapheme_count / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable_and_full_width() {
        let a = fingerprint("猫が座った。".as_bytes());
        let b = fingerprint("猫が座った。".as_bytes());
        let c = fingerprint(b"different");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_token_estimate_for_whitespace_text() {
        assert_eq!(estimate_tokens("one two three four"), 5);
    }

    #[test]
    fn test_token_estimate_for_cjk_text() {
        // One whitespace "word" would estimate 1; the grapheme floor wins.
        let estimate = estimate_tokens("猫が座った犬が走った");
        assert!(estimate >= 5);
    }
}
