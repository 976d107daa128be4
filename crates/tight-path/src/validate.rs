use thiserror::Error;

/// Errors raised while parsing a dotted path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("empty segment in path '{0}'")]
    EmptySegment(String),
}

/// Validate a dotted path string without allocating its segments.
///
/// A single trailing dot is allowed (`model.` addresses the `model`
/// container). Leading dots and consecutive dots are rejected.
///
/// # Example
///
/// ```
/// use tight_path::{validate_path, PathError};
///
/// assert!(validate_path("model.name").is_ok());
/// assert!(validate_path("model.").is_ok());
/// assert_eq!(validate_path(""), Err(PathError::Empty));
/// assert!(validate_path("a..b").is_err());
/// ```
pub fn validate_path(path: &str) -> Result<(), PathError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }
    let body = trimmed.strip_suffix('.').unwrap_or(trimmed);
    if body.is_empty() || body.split('.').any(str::is_empty) {
        return Err(PathError::EmptySegment(trimmed.to_string()));
    }
    Ok(())
}
