//! Text preprocessing for the similarity index.
//!
//! Tokens are lowercase runs of word characters (alphanumeric or `_`) at
//! least two characters long. Stop words are removed.

pub mod stopwords;

pub use stopwords::{is_stop_word, ENGLISH_STOP_WORDS};

/// Minimum token length in characters.
pub const MIN_TOKEN_CHARS: usize = 2;

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits `text` into lowercase tokens, keeping stop words.
#[must_use]
pub fn raw_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|w| w.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Splits `text` into lowercase tokens with English stop words removed.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = raw_tokens(text);
    tokens.retain(|t| !is_stop_word(t));
    tokens
}
