use thiserror::Error;
use tracing::error;

/// Failures talking to the Callibri API. None of these are recovered from.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid JSON in response body from {endpoint}: {body}")]
    Protocol {
        endpoint: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response from {endpoint} returned with code: {}", display_code(.code))]
    Api { endpoint: String, code: Option<i64> },
}

fn display_code(code: &Option<i64>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

/// Failures while storing a batch. The transaction has already been rolled back when one of
/// these is returned.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid call date {value:?}: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: time::error::Parse,
    },
}

#[derive(Debug, Error)]
#[error("invalid date range: {from} is after {to}")]
pub struct RangeError {
    pub from: time::Date,
    pub to: time::Date,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("{var} has invalid date {value:?}, expected DD.MM.YYYY")]
    InvalidDate {
        var: &'static str,
        value: String,
        #[source]
        source: time::error::Parse,
    },

    #[error("{var} has invalid number {value:?}")]
    InvalidNumber {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Log an error along with its chain of sources.
pub fn handle_error(e: &(dyn std::error::Error + 'static)) {
    let mut causes = Vec::new();
    let mut source = e.source();
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    error!(causes = ?causes, "ERROR: {e}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_names_the_code() {
        let e = FetchError::Api {
            endpoint: "get_sites".to_string(),
            code: Some(403),
        };
        assert_eq!(
            e.to_string(),
            "response from get_sites returned with code: 403"
        );

        let e = FetchError::Api {
            endpoint: "get_sites".to_string(),
            code: None,
        };
        assert!(e.to_string().ends_with("code: none"));
    }

    #[test]
    fn protocol_error_carries_body() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let e = FetchError::Protocol {
            endpoint: "get_sites".to_string(),
            body: "<html>".to_string(),
            source,
        };
        assert!(e.to_string().contains("<html>"));
    }
}
