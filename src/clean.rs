use crate::models::{Sentiment, StarRating};

/// Placeholder strings that mark a comment as carrying no usable content.
/// Matched against the trimmed comment, exact and case-sensitive.
const DEGENERATE_COMMENTS: [&str; 4] = [".", "-", "", " "];

/// Maximum characters kept per comment, a rough stand-in for the sentiment
/// model's token limit. Counted in characters, not bytes or tokens.
pub const MAX_CLEAN_CHARS: usize = 510;

pub fn is_valid_comment(raw: &str) -> bool {
    !DEGENERATE_COMMENTS.contains(&raw.trim())
}

/// Trim, strip every literal '.' and '-', lowercase, then cut to the first
/// [`MAX_CLEAN_CHARS`] characters. Idempotent on already-normalized text.
pub fn normalize_comment(raw: &str) -> String {
    let stripped: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '.' && *c != '-')
        .collect();
    stripped.to_lowercase().chars().take(MAX_CLEAN_CHARS).collect()
}

pub fn bucket_sentiment(rating: StarRating) -> Sentiment {
    match rating.value() {
        1 | 2 => Sentiment::Negative,
        3 => Sentiment::Neutral,
        _ => Sentiment::Positive,
    }
}
