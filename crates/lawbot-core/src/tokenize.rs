//! Text analysis: lowercasing, word splitting and stop-word removal.
//!
//! A token is a maximal run of word characters at least two characters long.
//! A word character is `_` or any letter or number by Unicode general category
//! (`L*`, `N*`). Everything else separates tokens: punctuation, whitespace,
//! symbols, and also combining marks (`Mn`, `Mc`), so a Devanagari vowel sign
//! or virama ends the current token. The same analyzer is used for corpus texts and for
//! queries, so both land in the same term space.
//!
//! # Example
//!
//! ```rust
//! use lawbot_core::stop_words::StopWords;
//! use lawbot_core::tokenize::analyze;
//!
//! let terms = analyze("What is bail? Bail is release.", &StopWords::english());
//! assert_eq!(terms, vec!["bail", "bail", "release"]);
//! ```

use unicode_general_category::{get_general_category, GeneralCategory};

use crate::stop_words::StopWords;

/// Minimum token length, in characters.
const MIN_TOKEN_CHARS: usize = 2;

fn is_word_char(c: char) -> bool {
    if c == '_' {
        return true;
    }
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

/// Lowercases `text` and splits it into tokens, keeping stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !is_word_char(c))
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Tokenizes `text` and drops every token found in `stop_words`.
pub fn analyze(text: &str, stop_words: &StopWords) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| !stop_words.contains(t))
        .collect()
}
