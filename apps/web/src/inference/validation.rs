use thiserror::Error;

/// Minimum number of whitespace-separated words a description must contain.
pub const MIN_WORDS: usize = 5;

/// Minimum share of alphabetic characters over the full (trimmed) text length.
pub const MIN_ALPHA_RATIO: f64 = 0.40;

/// User-facing rejection of a job description. Rendered inline on the form,
/// never treated as a server error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter ≥5 words.")]
    TooShort,

    #[error("Too many symbols/numbers.")]
    TooSymbolic,
}

/// Trims `raw` and checks it is long enough and mostly made of letters.
/// Returns the trimmed text on success.
pub fn validate_description(raw: &str) -> Result<&str, InputError> {
    let text = raw.trim();

    if text.is_empty() || text.split_whitespace().count() < MIN_WORDS {
        return Err(InputError::TooShort);
    }

    let letters = text.chars().filter(|c| c.is_alphabetic()).count();
    let total = text.chars().count().max(1);
    if (letters as f64) / (total as f64) < MIN_ALPHA_RATIO {
        return Err(InputError::TooSymbolic);
    }

    Ok(text)
}
