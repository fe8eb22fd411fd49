//! Project-specific utilities live here.

use bookstore_http::error::AppError;

/// Parse a book identifier taken from a path segment or query string.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|err| AppError::bad_request(format!("invalid book id {:?}: {}", raw, err)))
}

/// Parse the `id` query parameter, failing when it is absent.
pub fn required_id(raw: Option<&str>) -> Result<i64, AppError> {
    match raw {
        Some(raw) => parse_id(raw),
        None => Err(AppError::bad_request("id is required")),
    }
}
