//! Credential redaction for display and logging.

/// Literal inserted between the visible head and tail of a masked key.
const MASK: &str = "***";

/// Keys at or below this length keep two characters on each side; longer keys keep four.
const SHORT_KEY_LEN: usize = 8;

/// Redact the middle of an API key.
///
/// - empty input yields an empty string
/// - up to 8 characters: first 2 + `***` + last 2
/// - longer: first 4 + `***` + last 4
///
/// Slicing works on characters and clamps to what is available, so inputs
/// shorter than the visible window never fail.
#[must_use]
pub fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = key.chars().collect();
    let visible = if chars.len() <= SHORT_KEY_LEN { 2 } else { 4 };

    let head: String = chars.iter().take(visible).collect();
    let tail: String = chars[chars.len().saturating_sub(visible)..].iter().collect();

    format!("{head}{MASK}{tail}")
}
