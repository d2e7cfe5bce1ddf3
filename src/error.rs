//! Error types for fetching, patching, and syncing.
//!
//! Fetch errors are always recovered by the source clients. Patch and sync
//! errors abort the run and map to a non-zero exit status.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Failure while retrieving a citation count.
#[derive(Debug)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    Transport(reqwest::Error),
    /// The server answered with a non-success status.
    Status(reqwest::StatusCode),
    /// The response did not contain the expected element or field.
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "request failed: {}", err),
            Self::Status(status) => write!(f, "HTTP {}", status),
            Self::Parse(msg) => write!(f, "unexpected response: {}", msg),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Status(_) | Self::Parse(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// The document could not be brought into canonical shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// No container was present and there is no `</body>` to insert before.
    MissingInsertionPoint,
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInsertionPoint => f.write_str(
                "document has no citation container and no closing </body> tag to insert one before",
            ),
        }
    }
}

impl Error for PatchError {}

/// Fatal failure of a sync run.
#[derive(Debug)]
pub enum SyncError {
    FileNotFound(PathBuf),
    Read { path: PathBuf, source: std::io::Error },
    Patch(PatchError),
    Persist { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound(path) => write!(f, "file not found: {}", path.display()),
            Self::Read { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Self::Patch(err) => write!(f, "failed to patch document: {}", err),
            Self::Persist { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::FileNotFound(_) => None,
            Self::Read { source, .. } | Self::Persist { source, .. } => Some(source),
            Self::Patch(err) => Some(err),
        }
    }
}

impl From<PatchError> for SyncError {
    fn from(err: PatchError) -> Self {
        Self::Patch(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_error_messages_name_the_path() {
        let err = SyncError::FileNotFound(PathBuf::from("/site/index.html"));
        assert_eq!(err.to_string(), "file not found: /site/index.html");

        let err = SyncError::Persist {
            path: PathBuf::from("index.html"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("failed to write index.html"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_fetch_error_status_message() {
        let err = FetchError::Status(reqwest::StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.to_string(), "HTTP 429 Too Many Requests");
    }
}
