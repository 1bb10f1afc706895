//! Error types for MotifConserve
//!
//! Defines all error types used throughout the library.
//!
//! The taxonomy separates recoverable data-quality conditions (an interval
//! referencing a chromosome the track does not know about) from structural
//! errors that indicate an upstream coordinate bug (out-of-bounds intervals,
//! ragged score matrices). Only the former is ever skipped; everything else
//! aborts the enclosing batch.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for MotifConserve operations
#[derive(Debug, Error)]
pub enum MotifConserveError {
    /// Signal track errors
    #[error("Track error: {0}")]
    Track(#[from] TrackError),

    /// Interval validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Scoring errors
    #[error("Scoring error: {0}")]
    Score(#[from] ScoreError),

    /// Motif-site resolution errors
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// FIMO record parsing errors
    #[error("FIMO parse error: {0}")]
    FimoParse(#[from] FimoParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when opening or querying a signal track
#[derive(Debug, Error)]
pub enum TrackError {
    /// The file could not be opened or parsed as an indexed signal track
    #[error("Cannot open signal track {path}: {message}")]
    Open { path: PathBuf, message: String },

    /// Chromosome not present in the track's catalog
    #[error("Chromosome not found in track: {0}")]
    UnknownChromosome(String),

    /// Underlying range query failed
    #[error("Range query failed for {chrom}:{start}-{end}: {message}")]
    Query {
        chrom: String,
        start: u64,
        end: u64,
        message: String,
    },
}

/// Errors produced by validating an interval against a chromosome catalog
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Chromosome absent from the catalog.
    ///
    /// Recoverable: callers log a warning and drop the interval.
    #[error("Chromosome {0} does not appear in the signal track")]
    UnknownChromosome(String),

    /// Interval start lies beyond the chromosome end.
    ///
    /// Hard error: this is an upstream coordinate bug, never clamped.
    #[error("Chromosome start point exceeds chromosome length: {start} > {length} ({chrom})")]
    StartExceedsLength {
        chrom: String,
        start: u64,
        length: u64,
    },

    /// Interval end lies beyond the chromosome end
    #[error("Chromosome end point exceeds chromosome length: {end} > {length} ({chrom})")]
    EndExceedsLength {
        chrom: String,
        end: u64,
        length: u64,
    },

    /// Half-open interval with end <= start
    #[error("Empty or inverted interval {chrom}:{start}-{end}")]
    EmptyInterval {
        chrom: String,
        start: u64,
        end: u64,
    },
}

impl ValidationError {
    /// True for conditions that are skipped with a warning rather than
    /// aborting the batch.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ValidationError::UnknownChromosome(_))
    }
}

/// Errors that can occur while assembling a score matrix
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Batch validation failed with a non-recoverable condition
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Track query failed
    #[error("Track error: {0}")]
    Track(#[from] TrackError),

    /// Rows of unequal length were produced.
    ///
    /// Caller contract violation: all intervals in a batch must span the
    /// same window length.
    #[error("Ragged score matrix: row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Errors that can occur while resolving motif occurrences to genomic intervals
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Sequence name contains locus separators but does not parse as
    /// `chrom:start-end`; refusing to guess
    #[error("Ambiguous sequence name '{0}': contains locus separators but is not chrom:start-end; \
             pass an explicit naming convention")]
    AmbiguousLocus(String),

    /// Locus convention was forced but the name does not encode a locus
    #[error("Sequence name '{name}' does not encode a genomic locus: {message}")]
    InvalidLocus { name: String, message: String },

    /// Local coordinates violate the 1-based inclusive convention
    #[error("Invalid local coordinates [{start}, {stop}] for '{name}': {message}")]
    InvalidCoordinates {
        name: String,
        start: u64,
        stop: u64,
        message: String,
    },

    /// Negative flank length
    #[error("Flank length must be >= 0, got {0}")]
    InvalidFlankLength(i64),

    /// Flank expansion would push the interval start below position 0
    #[error("Flank of {flank} bases pushes {chrom}:{start} below position 0")]
    FlankUnderflow {
        chrom: String,
        start: u64,
        flank: u64,
    },
}

/// Errors that can occur during FIMO record parsing
#[derive(Debug, Error)]
pub enum FimoParseError {
    /// A data line has fewer fields than the FIMO format requires
    #[error("Invalid FIMO record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    /// Failed to parse a numeric field
    #[error("Failed to parse {field} '{value}' at line {line}")]
    ParseNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// File not found
    #[error("FIMO file not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for MotifConserve operations
pub type Result<T> = std::result::Result<T, MotifConserveError>;

/// Result type alias for track operations
pub type TrackResult<T> = std::result::Result<T, TrackError>;

/// Result type alias for scoring operations
pub type ScoreResult<T> = std::result::Result<T, ScoreError>;

/// Result type alias for site resolution
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

/// Result type alias for FIMO parsing
pub type FimoResult<T> = std::result::Result<T, FimoParseError>;
