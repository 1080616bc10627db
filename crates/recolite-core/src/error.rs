//! Error types for recolite-core.

use std::path::PathBuf;

use thiserror::Error;

/// Catalog and index error types.
#[derive(Error, Debug)]
pub enum Error {
    /// A required input file does not exist.
    #[error("Catalog source not found: {}", .0.display())]
    SourceMissing(PathBuf),

    /// CSV decoding error while reading a catalog source.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// File being read when the error occurred.
        path: String,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from a CSV header.
    #[error("Missing column '{column}' in {path}")]
    MissingColumn {
        /// File whose header was checked.
        path: String,
        /// Name of the absent column.
        column: String,
    },

    /// The same product identifier appears on more than one row.
    #[error("Duplicate product identifier '{asin}' at rows {first} and {second}")]
    DuplicateIdentifier {
        /// Offending identifier.
        asin: String,
        /// Position of the first occurrence.
        first: usize,
        /// Position of the repeated occurrence.
        second: usize,
    },

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_source_missing() {
        let err = Error::SourceMissing(PathBuf::from("data/products.csv"));
        assert_eq!(
            err.to_string(),
            "Catalog source not found: data/products.csv"
        );
    }

    #[test]
    fn test_error_display_duplicate() {
        let err = Error::DuplicateIdentifier {
            asin: "B001".to_string(),
            first: 0,
            second: 7,
        };
        assert_eq!(
            err.to_string(),
            "Duplicate product identifier 'B001' at rows 0 and 7"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
