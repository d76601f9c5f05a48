use thiserror::Error;

/// Ways a request to the athlete service can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Service unreachable, connection dropped or timed out.
    #[error("Network error: could not reach the athlete service ({0})")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("HTTP error! status: {status}, message: {body}")]
    Service { status: u16, body: String },

    /// The body was not a JSON array of athletes.
    #[error("Malformed athlete payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::FetchError;

    #[test]
    fn service_error_carries_status_and_body() {
        let err = FetchError::Service {
            status: 404,
            body: "city not found".to_string(),
        };
        let message = err.to_string();

        assert!(message.contains("404"));
        assert!(message.contains("city not found"));
    }

    #[test]
    fn network_error_is_flagged_as_network() {
        let err = FetchError::Network("connection refused".to_string());
        assert!(err.to_string().starts_with("Network error"));
    }
}
