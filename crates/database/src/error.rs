use std::path::PathBuf;
use thiserror::Error;

/// Failures of the record and image stores.
///
/// Nothing here is retried; every variant is handed up to the caller as is.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create data directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record file exists but does not hold a valid record.
    #[error("malformed record file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize record: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StoreError {
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_names_path() {
        let err = StoreError::Write {
            path: PathBuf::from("/data/progress.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/progress.json"));
        assert!(msg.contains("denied"));
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_malformed_error() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = StoreError::Malformed {
            path: PathBuf::from("progress.json"),
            source,
        };
        assert!(err.is_malformed());
        assert!(err.to_string().starts_with("malformed record file progress.json"));
    }
}
