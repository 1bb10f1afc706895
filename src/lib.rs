//! MotifConserve - conservation scoring of motif sites
//!
//! Scores evolutionary conservation (PhyloP/GERP/PhastCons) at
//! transcription-factor motif positions against a genome-wide BigWig
//! signal track, producing aligned score matrices for statistical
//! comparison against flanking/control positions.
//!
//! # Features
//!
//! - Strand-aware per-base scoring with NaN propagation for sparse tracks
//! - FIMO occurrence resolution, including locus-embedded sequence names
//! - Symmetric flank expansion with hard bounds checking (never clamped)
//! - Transparent gzip/bzip2 input, parallel batch resolution with rayon
//!
//! # Example
//!
//! ```ignore
//! use motif_conserve::core::{score, BigWigReader};
//! use motif_conserve::formats::{parse_fimo_file, resolve_all, NameConvention};
//!
//! let occurrences = parse_fimo_file("fimo.txt")?;
//! let intervals = resolve_all(&occurrences, NameConvention::Auto, 50)?;
//!
//! let mut track = BigWigReader::open("phylop.bw")?;
//! let outcome = score(&mut track, &intervals)?;
//! let means = outcome.matrix.column_means();
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    score, BigWigReader, ChromCatalog, DenseTrack, GenomicInterval, IntervalSet,
    MotifConserveError, ResolveError, Result, ScoreError, ScoreMatrix, ScoreOutcome,
    ScoreWarning, SignalTrack, Strand, TrackError, ValidationError,
};
pub use crate::formats::{fimo, matrix};
