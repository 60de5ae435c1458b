use thiserror::Error;

/// Failures surfaced by [`super::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP exchange never completed; no status code is available.
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-2xx status.
    #[error("Request failed ({status}): {message}")]
    Request { status: u16, message: String },
    /// The body was not JSON, or not the expected shape.
    #[error("Failed to parse response from {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid request header {name:?}")]
    InvalidHeader { name: String },
}

impl ApiError {
    /// Short name of the failure kind, used in log records.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "transport",
            ApiError::Request { .. } => "request",
            ApiError::Parse { .. } => "parse",
            ApiError::InvalidHeader { .. } => "invalid_header",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_message_includes_status_and_body() {
        let err = ApiError::Request {
            status: 500,
            message: "server error".into(),
        };
        assert_eq!(err.to_string(), "Request failed (500): server error");
        assert_eq!(err.kind(), "request");
    }

    #[test]
    fn parse_error_names_the_path() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = ApiError::Parse {
            path: "/api/tickets".into(),
            source,
        };
        assert!(err.to_string().starts_with("Failed to parse response from /api/tickets"));
        assert_eq!(err.kind(), "parse");
    }
}
