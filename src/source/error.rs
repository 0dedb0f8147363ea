//! Fetch error taxonomy

use std::fmt::Display;

/// Why a status fetch failed
///
/// All transport, protocol and decoding failures collapse into this one type
/// so the dashboard has a single failed state to render.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("failed to parse status response: {message}")]
    Parse { message: String },

    #[error("no Waybill found in namespace '{namespace}'")]
    NotFound { namespace: String },
}

impl FetchError {
    pub fn network(err: impl Display) -> Self {
        FetchError::Network {
            message: err.to_string(),
        }
    }

    pub fn parse(err: impl Display) -> Self {
        FetchError::Parse {
            message: err.to_string(),
        }
    }

    pub fn not_found(namespace: impl Into<String>) -> Self {
        FetchError::NotFound {
            namespace: namespace.into(),
        }
    }

    /// HTTP status code associated with the failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            FetchError::NotFound { .. } => Some(404),
            FetchError::Network { .. } | FetchError::Parse { .. } => None,
        }
    }

    /// Short label for the error affordance
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "network",
            FetchError::Http { .. } => "http",
            FetchError::Parse { .. } => "parse",
            FetchError::NotFound { .. } => "not found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let err = FetchError::Http {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");

        assert_eq!(FetchError::not_found("foo").status(), Some(404));
        assert_eq!(FetchError::network("refused").status(), None);
        assert_eq!(FetchError::parse("eof").kind(), "parse");
    }
}
