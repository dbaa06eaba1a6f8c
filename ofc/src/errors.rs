/// This module defines the error types for ofc.
///
/// # Error Taxonomy
///
/// Only the edges of a run can fail:
///
/// 1. **Configuration** - an unknown wildcard mode, an unreadable or malformed
///    configuration file.
/// 2. **I/O** - the input file or a rules file cannot be read, or the output
///    file cannot be written.
/// 3. **Runtime setup** - the worker pool cannot be built.
///
/// Rule matching itself is total and has no error channel: the worst a bad
/// rule can do is match nothing.
///
/// ```rust,ignore
/// match ofc::lines::read_lines(path) {
///     Ok(domains) => // filter them,
///     Err(FilterError::ReadFile { path, source }) => // report and abort,
///     Err(e) => // anything else aborts too
/// }
/// ```
use std::path::PathBuf;
use thiserror::Error;

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while loading, filtering, or writing domain lists
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl FilterError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFile {
            path: path.into(),
            source,
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_creation() {
        let err = FilterError::read_file("domains.txt", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, FilterError::ReadFile { .. }));

        let err = FilterError::write_file(
            "out.txt",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, FilterError::WriteFile { .. }));

        let err = FilterError::config_error("bad mode");
        assert!(matches!(err, FilterError::ConfigError(_)));
    }

    #[test]
    fn test_error_messages() {
        let err = FilterError::read_file(
            "domains.txt",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.to_string(), "Failed to read domains.txt: no such file");

        let err = FilterError::write_file(
            "out/result.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to write out/result.txt: denied");

        let err = FilterError::config_error("Unknown wildcard mode: fuzzy");
        assert_eq!(
            err.to_string(),
            "Configuration error: Unknown wildcard mode: fuzzy"
        );
    }
}
