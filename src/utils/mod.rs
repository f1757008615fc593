pub mod fountain_constants;

pub use fountain_constants::FOUNTAIN_REGEX;

/// True for the empty string or a string of nothing but whitespace.
pub fn is_empty_or_whitespace(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Strips a `(CONT'D)` continuation marker (straight or typographic
/// apostrophe) and trims the result.
pub fn strip_cont_marker(text: &str) -> String {
    text.replace("(CONT'D)", "")
        .replace("(CONT’D)", "")
        .trim()
        .to_string()
}
