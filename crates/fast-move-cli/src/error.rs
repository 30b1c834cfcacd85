//! CLI error types for file I/O, CSV parsing and moving-window failures.
//!
//! [`CliError`] wraps everything that can go wrong between reading the input
//! file and writing the result. Messages say what went wrong and, where it
//! helps, how to fix it.

use std::fmt;
use std::io;

/// CLI error type encompassing all possible error conditions.
#[derive(Debug)]
pub enum CliError {
    /// Reading or writing a file failed.
    IoError {
        /// The underlying I/O error.
        source: io::Error,
        /// Path that caused the error, if known.
        path: Option<String>,
    },
    /// The input is not a numeric CSV matrix.
    CsvParseError {
        /// Description of the parse error.
        message: String,
        /// Line number where the error occurred, if known.
        line: Option<u64>,
    },
    /// The moving-window computation rejected its input.
    ComputeError {
        /// The underlying fast-move error.
        source: fast_move::Error,
    },
    /// An argument is valid on its own but not for this input.
    InvalidArgument {
        /// Name of the invalid argument.
        argument: String,
        /// Description of why it's invalid.
        reason: String,
        /// Suggestion for valid values.
        suggestion: Option<String>,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError { source, path } => match path {
                Some(p) => write!(f, "cannot access '{p}': {source}"),
                None => write!(f, "I/O error: {source}"),
            },
            Self::CsvParseError { message, line } => {
                match line {
                    Some(l) => write!(f, "CSV parse error on line {l}: {message}")?,
                    None => write!(f, "CSV parse error: {message}")?,
                }
                write!(f, ". Expected a numeric matrix with an optional header row")
            }
            Self::ComputeError { source } => write!(f, "{source}"),
            Self::InvalidArgument {
                argument,
                reason,
                suggestion,
            } => {
                write!(f, "invalid argument '{argument}': {reason}")?;
                if let Some(s) = suggestion {
                    write!(f, ". {s}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            Self::ComputeError { source } => Some(source),
            Self::CsvParseError { .. } | Self::InvalidArgument { .. } => None,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::IoError {
            source: err,
            path: None,
        }
    }
}

impl From<fast_move::Error> for CliError {
    fn from(err: fast_move::Error) -> Self {
        Self::ComputeError { source: err }
    }
}

impl From<ndarray::ShapeError> for CliError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::ComputeError {
            source: err.into(),
        }
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(csv::Position::line);
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Self::IoError { source, path: None },
            _ => Self::CsvParseError { message, line },
        }
    }
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_io_error_with_path() {
        let err = CliError::IoError {
            source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
            path: Some("/data/in.csv".to_string()),
        };
        assert_eq!(err.to_string(), "cannot access '/data/in.csv': file not found");
    }

    #[test]
    fn test_display_csv_parse_error() {
        let err = CliError::CsvParseError {
            message: "cannot parse 'abc' as number".to_string(),
            line: Some(3),
        };
        let display = err.to_string();
        assert!(display.starts_with("CSV parse error on line 3: cannot parse 'abc'"));
        assert!(display.contains("numeric matrix"));

        let err = CliError::CsvParseError {
            message: "no data rows".to_string(),
            line: None,
        };
        assert!(err.to_string().starts_with("CSV parse error: no data rows"));
    }

    #[test]
    fn test_display_compute_error_is_transparent() {
        let err: CliError = fast_move::Error::InvalidWindow {
            window: 9,
            extent: 4,
        }
        .into();
        assert_eq!(err.to_string(), "invalid window 9: must be in [1, 4]");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display_invalid_argument() {
        let err = CliError::InvalidArgument {
            argument: "--dtype".to_string(),
            reason: "int32 cannot hold 1.5".to_string(),
            suggestion: Some("Use --dtype float64".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "invalid argument '--dtype': int32 cannot hold 1.5. Use --dtype float64"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn test_from_io_error() {
        let cli_err: CliError = io::Error::new(io::ErrorKind::NotFound, "not found").into();
        assert!(matches!(cli_err, CliError::IoError { path: None, .. }));
        assert!(cli_err.source().is_some());
    }

    #[test]
    fn test_from_csv_error() {
        let result = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("1,2\n3".as_bytes())
            .records()
            .last()
            .unwrap();

        let csv_err = result.unwrap_err();
        let cli_err: CliError = csv_err.into();
        assert!(matches!(cli_err, CliError::CsvParseError { line: Some(2), .. }));
    }
}
