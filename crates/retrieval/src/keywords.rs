//! Query keyword extraction

/// Words that never count as keywords
pub const STOP_WORDS: [&str; 13] = [
    "the", "a", "an", "and", "in", "on", "at", "to", "for", "of", "with", "is", "are",
];

/// Tokens of this length or shorter are dropped
const MIN_KEYWORD_LEN: usize = 2;

/// Lower-case, strip everything except ASCII word characters and whitespace,
/// split on whitespace, then drop short tokens and stop words.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.len() > MIN_KEYWORD_LEN && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}
