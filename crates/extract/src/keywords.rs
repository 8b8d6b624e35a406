use crate::stopwords;
use crate::tokenizer::{case_fold, tokenize};
use std::collections::HashMap;

/// Minimum length for Latin and kana tokens. Han tokens are salient from a
/// single character (猫 is a full term on its own).
const MIN_TERM_CHARS: usize = 3;

fn is_han(c: char) -> bool {
    matches!(c,
        '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}' | '\u{F900}'..='\u{FAFF}')
}

fn keepable(token: &str) -> bool {
    if token.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if stopwords::is_stopword(&case_fold(token)) {
        return false;
    }
    if token.chars().all(is_han) {
        return true;
    }
    token.chars().count() >= MIN_TERM_CHARS
}

/// Up to `max_terms` salient terms from one sentence, ranked by frequency
/// over the stopword-filtered token stream. Ties keep first-occurrence
/// order, never term value, so extraction is deterministic given the same
/// tokenizer. Returned surfaces are the first-seen forms.
pub fn extract_terms(sentence: &str, max_terms: usize) -> Vec<String> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in tokenize(sentence) {
        if !keepable(&token) {
            continue;
        }
        let folded = case_fold(&token);
        match index.get(&folded) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(folded, order.len());
                order.push((token, 1));
            }
        }
    }

    // Stable sort: equal counts keep first-occurrence order
    order.sort_by(|a, b| b.1.cmp(&a.1));

    order
        .into_iter()
        .take(max_terms)
        .map(|(surface, _)| surface)
        .collect()
}
