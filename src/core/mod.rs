//! Core conservation-scoring engine
//!
//! This module contains the interval model, the signal track readers,
//! and the batch scoring algorithm.

mod error;
mod interval;
pub mod io;
mod scorer;
mod track;

pub use error::{
    FimoParseError, FimoResult, MotifConserveError, ResolveError, ResolveResult, Result,
    ScoreError, ScoreResult, TrackError, TrackResult, ValidationError,
};
pub use interval::{ChromCatalog, GenomicInterval, IntervalSet, SkippedInterval, Strand};
pub use io::{
    detect_compression, open_text, CompressionFormat, LineIterator, MappedReader,
    DEFAULT_BUFFER_SIZE, LARGE_BUFFER_SIZE, MMAP_THRESHOLD,
};
pub use scorer::{score, ScoreMatrix, ScoreOutcome, ScoreWarning};
pub use track::{BigWigReader, DenseTrack, SignalTrack};
