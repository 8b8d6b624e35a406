use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SegmentError {
    /// Raised instead of emitting a silently empty artifact.
    #[error("input text is empty or contains no sentences")]
    EmptyInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Sentences per segment window; the last window may be shorter.
    pub window_size: usize,
    /// Sentence-final boundary class, Latin and CJK variants included.
    pub boundary_chars: Vec<char>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            window_size: 5,
            boundary_chars: vec!['.', '!', '?', '。', '！', '？', '．'],
        }
    }
}

/// Ordered sentences plus the windows that group them. The windows
/// partition `0..sentences.len()` with no gaps or overlaps.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub sentences: Vec<String>,
    pub windows: Vec<Vec<usize>>,
}

/// Splits raw text into sentences and fixed-size sentence windows.
/// Deterministic, pure text processing; nothing here is retried.
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    pub fn segment(&self, text: &str) -> Result<Segmentation, SegmentError> {
        if text.trim().is_empty() {
            return Err(SegmentError::EmptyInput);
        }

        // Normalize line breaks to spaces before splitting
        let normalized: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();

        let mut sentences = Vec::new();
        let mut current = String::new();

        for c in normalized.chars() {
            current.push(c);
            if self.config.boundary_chars.contains(&c) {
                self.flush_fragment(&mut current, &mut sentences);
            }
        }
        self.flush_fragment(&mut current, &mut sentences);

        // Punctuation-only input produces nothing but empty fragments;
        // that is still empty input, not an empty artifact.
        if sentences.is_empty() {
            return Err(SegmentError::EmptyInput);
        }

        let window_size = self.config.window_size.max(1);
        let windows = (0..sentences.len())
            .collect::<Vec<usize>>()
            .chunks(window_size)
            .map(|w| w.to_vec())
            .collect();

        Ok(Segmentation { sentences, windows })
    }

    /// Push the pending fragment as a sentence unless it is empty or pure
    /// boundary punctuation.
    fn flush_fragment(&self, current: &mut String, sentences: &mut Vec<String>) {
        let trimmed = current.trim();
        let has_content = trimmed
            .chars()
            .any(|c| !self.config.boundary_chars.contains(&c));
        if has_content {
            sentences.push(trimmed.to_string());
        }
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> Segmenter {
        Segmenter::new(SegmenterConfig::default())
    }

    #[test]
    fn test_basic_splitting() {
        let result = segmenter()
            .segment("First sentence. Second one! Third?")
            .unwrap();
        assert_eq!(
            result.sentences,
            vec!["First sentence.", "Second one!", "Third?"]
        );
        assert_eq!(result.windows, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_japanese_boundaries() {
        let result = segmenter()
            .segment("猫が座った。犬が走った。猫が笑った。")
            .unwrap();
        assert_eq!(result.sentences.len(), 3);
        // Three sentences fit in one default-size window
        assert_eq!(result.windows, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_no_boundary_punctuation_yields_one_sentence() {
        let result = segmenter().segment("no punctuation at all here").unwrap();
        assert_eq!(result.sentences.len(), 1);
        assert_eq!(result.sentences[0], "no punctuation at all here");
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(
            segmenter().segment(""),
            Err(SegmentError::EmptyInput)
        ));
        assert!(matches!(
            segmenter().segment("   \n\t  "),
            Err(SegmentError::EmptyInput)
        ));
    }

    #[test]
    fn test_punctuation_only_input_is_an_error() {
        assert!(matches!(
            segmenter().segment("...!?。"),
            Err(SegmentError::EmptyInput)
        ));
    }

    #[test]
    fn test_line_breaks_normalized() {
        let result = segmenter().segment("One\nsentence. Two\r\nhere.").unwrap();
        assert_eq!(result.sentences, vec!["One sentence.", "Two here."]);
    }

    #[test]
    fn test_windows_partition_sentences() {
        let config = SegmenterConfig {
            window_size: 2,
            ..SegmenterConfig::default()
        };
        let text = "A. B. C. D. E.";
        let result = Segmenter::new(config).segment(text).unwrap();

        assert_eq!(result.windows, vec![vec![0, 1], vec![2, 3], vec![4]]);

        // No gaps, no overlaps, full coverage
        let flattened: Vec<usize> = result.windows.concat();
        assert_eq!(flattened, (0..result.sentences.len()).collect::<Vec<_>>());
    }
}
