use thiserror::Error;

/// Message used when a failure carries no detail of its own.
pub const GENERIC_MESSAGE: &str = "Something went wrong";

/// Normalized form of every backend failure.
///
/// Transport errors, HTTP error statuses, malformed bodies and
/// application-level envelope errors all collapse into this shape before
/// they reach the dashboard. A failure without a status maps to `500`, one
/// without a message to [`GENERIC_MESSAGE`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (status {status})")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    /// Build an error, falling back to [`GENERIC_MESSAGE`] when the given
    /// message is empty or whitespace.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_MESSAGE.to_string()
        } else {
            message
        };

        Self { status, message }
    }

    /// The catch-all error for failures with no status of their own.
    pub fn generic() -> Self {
        Self { status: 500, message: GENERIC_MESSAGE.to_string() }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(_: reqwest::Error) -> Self {
        // Transport and decode failures carry no server-provided status or
        // message, so they surface as the generic error.
        Self::generic()
    }
}

/// Search input that is neither a city name nor a coordinate pair.
///
/// The display text is the guidance shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Enter a valid city or latitude,longitude")]
pub struct QueryError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_falls_back_to_generic() {
        let err = ApiError::new(404, "");
        assert_eq!(err.message, GENERIC_MESSAGE);
        assert_eq!(err.status, 404);

        let err = ApiError::new(404, "   ");
        assert_eq!(err.message, GENERIC_MESSAGE);
    }

    #[test]
    fn explicit_message_is_kept() {
        let err = ApiError::new(400, "Invalid location");
        assert_eq!(err.to_string(), "Invalid location (status 400)");
    }

    #[test]
    fn generic_error_is_500() {
        let err = ApiError::generic();
        assert_eq!(err.status, 500);
        assert_eq!(err.message, GENERIC_MESSAGE);
    }

    #[test]
    fn query_error_carries_guidance() {
        assert_eq!(QueryError.to_string(), "Enter a valid city or latitude,longitude");
    }
}
