use std::collections::HashSet;
use std::sync::LazyLock;

static ENGLISH: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "was",
    "one", "our", "out", "has", "had", "have", "this", "that", "with",
    "from", "they", "will", "would", "there", "their", "what", "about",
    "which", "when", "were", "been", "being", "more", "some", "into",
    "than", "then", "them", "its", "also", "each", "other", "these",
    "those", "such", "only", "over", "very", "just", "like", "how",
    "who", "why", "his", "her", "she", "him", "did", "does", "doing",
];

// Function words and light verbs; short particles never reach the filter
// because kana tokens under the length floor are already dropped.
static JAPANESE: &[&str] = &[
    "これ", "それ", "あれ", "ここ", "そこ", "あそこ", "この", "その",
    "あの", "です", "ます", "した", "して", "いる", "ある", "する",
    "なる", "こと", "もの", "ため", "よう", "という", "られる",
    "される", "ました", "ません", "において", "について", "そして",
    "しかし", "また",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ENGLISH.iter().chain(JAPANESE.iter()).copied().collect()
});

/// Expects a case-folded token.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}
