//! Fuzz target for the title tokenizer.
//!
//! Checks on arbitrary UTF-8 input that tokenizing never panics and that
//! every token is a run of word characters at least two characters long
//! that is not a stop word.
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_tokenizer
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use recolite_core::text::{is_stop_word, tokenize, MIN_TOKEN_CHARS};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        for token in tokenize(input) {
            assert!(token.chars().count() >= MIN_TOKEN_CHARS);
            assert!(!is_stop_word(&token));
            assert!(token.chars().all(|c| c.is_alphanumeric() || c == '_'));
        }
    }
});
