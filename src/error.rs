//! Error types for skiplist operations.
//!
//! Absent keys and out-of-range offsets are not errors: lookups return
//! `Option` and deletes return `bool`. Only operations that refuse to do
//! what was asked return an [`Error`].

use thiserror::Error;

/// Result type alias for skiplist operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`IndexedSkiplist`](crate::IndexedSkiplist) and its configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The key being inserted is already stored. The skiplist is unchanged.
    #[error("key is already present in the skiplist")]
    DuplicateKey,

    /// Every node index is in use.
    #[error("skiplist is full: at most {limit} keys can be stored")]
    CapacityExceeded { limit: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl Error {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfig {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::DuplicateKey.to_string(),
            "key is already present in the skiplist"
        );
        assert_eq!(
            Error::CapacityExceeded { limit: 7 }.to_string(),
            "skiplist is full: at most 7 keys can be stored"
        );
        assert_eq!(
            Error::invalid_config("max_level must be at least 1").to_string(),
            "invalid configuration: max_level must be at least 1"
        );
    }
}
