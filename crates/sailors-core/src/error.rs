//! ============================================================================
//! Error Types - Failures surfaced by the fetch layer
//! ============================================================================
//! The pure transforms (synthesize, join, grouping) never fail. Everything
//! here originates in retrieval, decoding, or configuration.
//! ============================================================================

use serde::{Deserialize, Serialize};

/// Error types for the Star Sailors core
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, thiserror::Error)]
pub enum SailorsError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid coordinate: lat {latitude}, lon {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SailorsError {
    /// True for transport failures and non-success HTTP responses
    pub fn is_network(&self) -> bool {
        matches!(self, SailorsError::Network(_) | SailorsError::Http { .. })
    }

    /// True when a response arrived but could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(self, SailorsError::Decode(_))
    }
}

impl From<reqwest::Error> for SailorsError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SailorsError::Decode(e.to_string())
        } else {
            SailorsError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SailorsError {
    fn from(e: serde_json::Error) -> Self {
        SailorsError::Decode(e.to_string())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, SailorsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(SailorsError::Network("timeout".into()).is_network());
        assert!(SailorsError::Http { status: 503, body: String::new() }.is_network());
        assert!(!SailorsError::Decode("bad".into()).is_network());
        assert!(SailorsError::Decode("bad".into()).is_decode());
        assert!(!SailorsError::Config("missing".into()).is_decode());
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err = serde_json::from_str::<Vec<i64>>("{").unwrap_err();
        let err: SailorsError = err.into();
        assert!(err.is_decode());
    }

    #[test]
    fn test_display() {
        let err = SailorsError::Http { status: 401, body: "no key".into() };
        assert_eq!(err.to_string(), "HTTP 401: no key");
    }
}
