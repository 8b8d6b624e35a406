use regex::Regex;
use std::sync::LazyLock;

// Contiguous alphanumeric runs, or single-script CJK runs. Mixed-script
// words split at the script boundary, so 座った becomes 座 + った.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9]+|\p{Han}+|\p{Hiragana}+|[\p{Katakana}ー]+").unwrap()
});

pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Case-folded form: the dedup key for terms and entities.
pub fn case_fold(term: &str) -> String {
    term.to_lowercase()
}
