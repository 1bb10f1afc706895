//! Genomic intervals and batch validation
//!
//! All coordinates are 0-based half-open `[start, end)` internally.
//! Conversion from the 1-based inclusive convention used by motif scanners
//! happens once, at resolution time (see `formats::fimo`); everything past
//! that point speaks a single coordinate system.

use crate::core::error::ValidationError;
use std::collections::HashMap;

/// Strand orientation
///
/// `Unknown` covers the `.` strand emitted by motif scanners for records
/// where orientation is not applicable; it scores like `Plus` (no reversal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Strand {
    #[default]
    Plus,
    Minus,
    Unknown,
}

impl Strand {
    /// Parse strand from char; `.` maps to `Unknown`
    ///
    /// # Examples
    /// ```
    /// use motif_conserve::core::Strand;
    /// assert_eq!(Strand::from_char('+'), Some(Strand::Plus));
    /// assert_eq!(Strand::from_char('-'), Some(Strand::Minus));
    /// assert_eq!(Strand::from_char('.'), Some(Strand::Unknown));
    /// assert_eq!(Strand::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Strand::Plus),
            '-' => Some(Strand::Minus),
            '.' => Some(Strand::Unknown),
            _ => None,
        }
    }

    /// Convert to char
    pub fn to_char(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unknown => '.',
        }
    }

    /// True if per-position values must be reversed at read time
    pub fn is_reverse(&self) -> bool {
        matches!(self, Strand::Minus)
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Read-only mapping from chromosome name to total length, obtained once
/// per track open and cached for the reader's lifetime.
pub type ChromCatalog = HashMap<String, u64>;

/// An immutable genomic interval, 0-based half-open
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenomicInterval {
    /// Chromosome/contig name, opaque key into the signal track
    pub chrom: String,
    /// 0-based inclusive start
    pub start: u64,
    /// 0-based exclusive end
    pub end: u64,
    /// Orientation; `Minus` triggers reversal of per-position scores
    pub strand: Strand,
}

impl GenomicInterval {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64, strand: Strand) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            strand,
        }
    }

    /// Window length in bases
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Validate against a chromosome catalog.
    ///
    /// `UnknownChromosome` is the only recoverable condition; out-of-bounds
    /// coordinates indicate an upstream bug (e.g. flank expansion past the
    /// chromosome end) and are never clamped.
    pub fn validate(&self, catalog: &ChromCatalog) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyInterval {
                chrom: self.chrom.clone(),
                start: self.start,
                end: self.end,
            });
        }
        let length = match catalog.get(&self.chrom) {
            Some(l) => *l,
            None => return Err(ValidationError::UnknownChromosome(self.chrom.clone())),
        };
        if self.start > length {
            return Err(ValidationError::StartExceedsLength {
                chrom: self.chrom.clone(),
                start: self.start,
                length,
            });
        }
        if self.end > length {
            return Err(ValidationError::EndExceedsLength {
                chrom: self.chrom.clone(),
                end: self.end,
                length,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}({})",
            self.chrom, self.start, self.end, self.strand
        )
    }
}

/// An interval dropped during batch validation, with its original position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedInterval {
    /// Index of the interval in the input batch
    pub index: usize,
    /// The offending interval
    pub interval: GenomicInterval,
    /// Chromosome that was missing from the catalog
    pub chrom: String,
}

/// A validated, ordered collection of genomic intervals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntervalSet {
    intervals: Vec<GenomicInterval>,
}

impl IntervalSet {
    pub fn new(intervals: Vec<GenomicInterval>) -> Self {
        Self { intervals }
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GenomicInterval> {
        self.intervals.iter()
    }

    pub fn as_slice(&self) -> &[GenomicInterval] {
        &self.intervals
    }

    pub fn into_inner(self) -> Vec<GenomicInterval> {
        self.intervals
    }

    /// Validate every interval against the catalog.
    ///
    /// Unknown-chromosome intervals are removed and reported in the skip
    /// list, preserving the relative order of the survivors. Out-of-bounds
    /// or empty intervals abort the whole batch with a hard error.
    pub fn partition_valid(
        self,
        catalog: &ChromCatalog,
    ) -> Result<(IntervalSet, Vec<SkippedInterval>), ValidationError> {
        let mut kept = Vec::with_capacity(self.intervals.len());
        let mut skipped = Vec::new();

        for (index, interval) in self.intervals.into_iter().enumerate() {
            match interval.validate(catalog) {
                Ok(()) => kept.push(interval),
                Err(ValidationError::UnknownChromosome(chrom)) => {
                    skipped.push(SkippedInterval {
                        index,
                        chrom,
                        interval,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok((IntervalSet::new(kept), skipped))
    }
}

impl From<Vec<GenomicInterval>> for IntervalSet {
    fn from(intervals: Vec<GenomicInterval>) -> Self {
        Self::new(intervals)
    }
}

impl IntoIterator for IntervalSet {
    type Item = GenomicInterval;
    type IntoIter = std::vec::IntoIter<GenomicInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}
