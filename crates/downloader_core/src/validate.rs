use thiserror::Error;

/// Inline URL validation failures. Never changes session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a YouTube URL")]
    Empty,
    #[error("Please enter a valid YouTube URL")]
    NotYoutube,
}

const YOUTUBE_MARKERS: [&str; 2] = ["youtube.com/", "youtu.be/"];

/// Lenient check: trims, then requires one of the YouTube host markers to
/// appear anywhere in the text. Returns the trimmed URL.
pub fn validate_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !YOUTUBE_MARKERS
        .iter()
        .any(|marker| trimmed.contains(marker))
    {
        return Err(ValidationError::NotYoutube);
    }
    Ok(trimmed.to_string())
}
