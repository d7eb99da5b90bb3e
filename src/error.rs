//! Error types for ferro-liftover
//!
//! This module provides the crate-wide error taxonomy:
//! - Error codes for programmatic categorization
//! - Fatal parse errors carrying the offending line number
//! - Typed not-found outcomes for lookups that legitimately miss
//! - Store failures with the context of which chain was being written

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Parse errors (E1xxx)
    /// Malformed chain-file text
    InvalidChainLine = 1001,
    /// Unknown reference assembly name
    UnknownBuild = 1002,
    /// Unrecognized SNP-array file format
    UnknownFormat = 1003,
    /// Required column absent from a vendor file header
    MissingColumn = 1004,
    /// Invalid strand token
    InvalidStrand = 1005,

    // Lookup misses (E2xxx)
    /// Chromosome absent from the chain set
    ChromosomeNotFound = 2001,
    /// No chain's reference interval covers the position
    PositionNotFound = 2002,
    /// No chain with the requested identifier
    ChainNotFound = 2003,
    /// Offset falls in an unaligned gap of the chain
    AlignmentNotFound = 2004,

    // Coordinate errors (E3xxx)
    /// Position or range outside a sequence's bounds
    InvalidCoordinates = 3001,

    // Store errors (E5xxx)
    /// A chain store operation failed
    StoreFailed = 5001,
    /// Bulk export aborted on a failing chain
    ExportFailed = 5002,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidChainLine => "malformed chain-file line",
            ErrorCode::UnknownBuild => "unknown reference assembly",
            ErrorCode::UnknownFormat => "unrecognized SNP-array format",
            ErrorCode::MissingColumn => "required column missing",
            ErrorCode::InvalidStrand => "invalid strand token",
            ErrorCode::ChromosomeNotFound => "chromosome not found",
            ErrorCode::PositionNotFound => "position not covered by any chain",
            ErrorCode::ChainNotFound => "chain not found",
            ErrorCode::AlignmentNotFound => "no alignment block at offset",
            ErrorCode::InvalidCoordinates => "invalid coordinates",
            ErrorCode::StoreFailed => "chain store operation failed",
            ErrorCode::ExportFailed => "chain export failed",
            ErrorCode::IoError => "file I/O error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-liftover operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiftError {
    /// Malformed chain-file input; fatal for the whole parse
    #[error("parse error on line {line}: {msg}")]
    Parse { line: usize, msg: String },

    /// Reference assembly name outside the supported set
    #[error("unknown reference assembly: {name}")]
    UnknownBuild { name: String },

    /// Strand token other than `+` or `-`
    #[error("invalid strand: {value}")]
    InvalidStrand { value: String },

    /// No chains indexed for this chromosome
    #[error("no chains for chromosome {chromosome}")]
    ChromosomeNotFound { chromosome: String },

    /// Chromosome known, but no chain's reference interval covers the position
    #[error("no chain covers {chromosome}:{position}")]
    PositionNotFound { chromosome: String, position: i64 },

    /// No chain with this identifier
    #[error("no chain with id {id}")]
    ChainNotFound { id: i64 },

    /// The offset lands in an unaligned gap between a chain's blocks
    #[error("no alignment block in chain {chain_id} at offset {offset}")]
    AlignmentNotFound { chain_id: i64, offset: i64 },

    /// Unrecognized SNP-array file format
    #[error("unrecognized SNP-array format: {msg}")]
    UnknownFormat { msg: String },

    /// A vendor file header is missing a required column
    #[error("missing column '{column}' in {format} header")]
    MissingColumn { column: String, format: String },

    /// Position or range outside a sequence's bounds
    #[error("invalid coordinates: {msg}")]
    InvalidCoordinates { msg: String },

    /// Raised by chain store implementations on write or read failure
    #[error("chain store error: {msg}")]
    Store { msg: String },

    /// Bulk export aborted; `chain_id` is the source chain being written
    #[error("failed to export chain {chain_id}: {msg}")]
    Export { chain_id: i64, msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },
}

impl LiftError {
    /// Create a parse error for a chain-file line
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        LiftError::Parse {
            line,
            msg: msg.into(),
        }
    }

    /// True for the expected "no mapping exists" outcomes of a lookup
    ///
    /// Genome-wide sweeps hit these constantly; callers typically count or
    /// skip them rather than treating them as failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LiftError::ChromosomeNotFound { .. }
                | LiftError::PositionNotFound { .. }
                | LiftError::ChainNotFound { .. }
                | LiftError::AlignmentNotFound { .. }
        )
    }

    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            LiftError::Parse { .. } => ErrorCode::InvalidChainLine,
            LiftError::UnknownBuild { .. } => ErrorCode::UnknownBuild,
            LiftError::InvalidStrand { .. } => ErrorCode::InvalidStrand,
            LiftError::ChromosomeNotFound { .. } => ErrorCode::ChromosomeNotFound,
            LiftError::PositionNotFound { .. } => ErrorCode::PositionNotFound,
            LiftError::ChainNotFound { .. } => ErrorCode::ChainNotFound,
            LiftError::AlignmentNotFound { .. } => ErrorCode::AlignmentNotFound,
            LiftError::UnknownFormat { .. } => ErrorCode::UnknownFormat,
            LiftError::MissingColumn { .. } => ErrorCode::MissingColumn,
            LiftError::InvalidCoordinates { .. } => ErrorCode::InvalidCoordinates,
            LiftError::Store { .. } => ErrorCode::StoreFailed,
            LiftError::Export { .. } => ErrorCode::ExportFailed,
            LiftError::Io { .. } => ErrorCode::IoError,
        }
    }
}

impl From<std::io::Error> for LiftError {
    fn from(err: std::io::Error) -> Self {
        LiftError::Io {
            msg: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::InvalidChainLine.as_str(), "E1001");
        assert_eq!(ErrorCode::ChromosomeNotFound.as_str(), "E2001");
        assert_eq!(ErrorCode::AlignmentNotFound.as_str(), "E2004");
        assert_eq!(ErrorCode::StoreFailed.as_str(), "E5001");
        assert_eq!(ErrorCode::IoError.as_str(), "E9001");
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::InvalidChainLine), "E1001");
        assert_eq!(format!("{}", ErrorCode::ExportFailed), "E5002");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(
            ErrorCode::PositionNotFound.description(),
            "position not covered by any chain"
        );
        assert_eq!(
            ErrorCode::AlignmentNotFound.description(),
            "no alignment block at offset"
        );
    }

    #[test]
    fn test_parse_helper() {
        let err = LiftError::parse(17, "expected 1 or 3 fields");
        assert!(matches!(err, LiftError::Parse { line: 17, .. }));
        let display = format!("{}", err);
        assert!(display.contains("line 17"));
        assert!(display.contains("expected 1 or 3 fields"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(LiftError::ChromosomeNotFound {
            chromosome: "19".to_string()
        }
        .is_not_found());
        assert!(LiftError::PositionNotFound {
            chromosome: "7".to_string(),
            position: 117559590
        }
        .is_not_found());
        assert!(LiftError::ChainNotFound { id: 5 }.is_not_found());
        assert!(LiftError::AlignmentNotFound {
            chain_id: 5,
            offset: 55
        }
        .is_not_found());

        assert!(!LiftError::parse(1, "bad header").is_not_found());
        assert!(!LiftError::Io {
            msg: "disk".to_string()
        }
        .is_not_found());
    }

    #[test]
    fn test_error_codes_match_variants() {
        let err = LiftError::AlignmentNotFound {
            chain_id: 1,
            offset: 10,
        };
        assert_eq!(err.code(), ErrorCode::AlignmentNotFound);

        let err = LiftError::Export {
            chain_id: 9,
            msg: "connection reset".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::ExportFailed);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LiftError = io_err.into();
        assert!(matches!(err, LiftError::Io { .. }));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_error_equality() {
        let err1 = LiftError::parse(10, "test");
        let err2 = LiftError::parse(10, "test");
        assert_eq!(err1, err2);

        let err3 = LiftError::parse(11, "test");
        assert_ne!(err1, err3);
    }
}
