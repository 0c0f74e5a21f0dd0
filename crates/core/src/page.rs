//! Page field validation.

use crate::error::CoreError;

/// Maximum page title length in bytes.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum page content length in bytes.
pub const MAX_CONTENT_LEN: usize = 500_000;

/// Validate a page title (non-empty after trimming, <= 200 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate page content (<= 500 000 chars).
///
/// Empty content is valid: clearing a page is a legitimate edit and still
/// produces a version.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.len() > MAX_CONTENT_LEN {
        return Err(CoreError::Validation(format!(
            "Content must be at most {MAX_CONTENT_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_valid() {
        assert!(validate_title("Getting Started").is_ok());
    }

    #[test]
    fn title_empty_rejected() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn title_too_long_rejected() {
        let long = "a".repeat(MAX_TITLE_LEN + 1);
        assert!(validate_title(&long).is_err());
    }

    #[test]
    fn content_empty_is_valid() {
        assert!(validate_content("").is_ok());
    }

    #[test]
    fn content_too_long_rejected() {
        let long = "x".repeat(MAX_CONTENT_LEN + 1);
        assert!(validate_content(&long).is_err());
    }
}
