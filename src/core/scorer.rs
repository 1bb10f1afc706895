//! Conservation scoring
//!
//! Orchestrates a batch of genomic intervals against a signal track and
//! produces a score matrix: one row per interval, one column per position
//! within the uniform window, rows reversed for minus-strand intervals so
//! every row reads 5′→3′.
//!
//! Row order always equals input order (after dropping unknown-chromosome
//! intervals); scoring is deterministic.

use crate::core::error::{ScoreError, ScoreResult};
use crate::core::interval::{GenomicInterval, IntervalSet};
use crate::core::track::SignalTrack;
use log::warn;

/// A non-fatal condition recorded while scoring a batch.
///
/// Returned alongside the matrix rather than emitted through a side
/// channel, so callers (and tests) can assert on warnings directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreWarning {
    /// Interval dropped because its chromosome is absent from the track
    UnknownChromosome {
        /// Index of the interval in the input batch
        index: usize,
        chrom: String,
    },
}

impl std::fmt::Display for ScoreWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreWarning::UnknownChromosome { index, chrom } => write!(
                f,
                "interval {} skipped: chromosome {} does not appear in the signal track",
                index, chrom
            ),
        }
    }
}

/// A dense 2D score matrix, row-major.
///
/// All rows have identical column count; construction enforces this.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    values: Vec<f64>,
    n_rows: usize,
    n_cols: usize,
}

impl ScoreMatrix {
    /// Create an empty matrix (no rows, no columns)
    pub fn empty() -> Self {
        Self {
            values: Vec::new(),
            n_rows: 0,
            n_cols: 0,
        }
    }

    /// Build from rows, enforcing equal row length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> ScoreResult<Self> {
        let mut matrix = Self::empty();
        for row in rows {
            matrix.push_row(row)?;
        }
        Ok(matrix)
    }

    /// Append a row; fails with [`ScoreError::RaggedMatrix`] on length mismatch
    pub fn push_row(&mut self, row: Vec<f64>) -> ScoreResult<()> {
        if self.n_rows == 0 {
            self.n_cols = row.len();
        } else if row.len() != self.n_cols {
            return Err(ScoreError::RaggedMatrix {
                row: self.n_rows,
                expected: self.n_cols,
                found: row.len(),
            });
        }
        self.values.extend_from_slice(&row);
        self.n_rows += 1;
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// One row of per-position scores
    pub fn row(&self, i: usize) -> &[f64] {
        let offset = i * self.n_cols;
        &self.values[offset..offset + self.n_cols]
    }

    /// Iterate over rows in input order
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.n_rows).map(move |i| self.row(i))
    }

    /// Per-column NaN-ignoring mean.
    ///
    /// A column where every contributing cell is NaN yields NaN, not zero:
    /// the sentinel means "no information available", which downstream
    /// statistics must distinguish from a real zero score.
    pub fn column_means(&self) -> Vec<f64> {
        let mut sums = vec![0.0f64; self.n_cols];
        let mut counts = vec![0usize; self.n_cols];

        for row in self.rows() {
            for (col, v) in row.iter().enumerate() {
                if !v.is_nan() {
                    sums[col] += v;
                    counts[col] += 1;
                }
            }
        }

        sums.iter()
            .zip(&counts)
            .map(|(&sum, &count)| if count > 0 { sum / count as f64 } else { f64::NAN })
            .collect()
    }
}

/// Result of scoring a batch of intervals
#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    /// One row per surviving interval, in input order
    pub matrix: ScoreMatrix,
    /// Diagnostics for dropped intervals
    pub warnings: Vec<ScoreWarning>,
}

/// Score a batch of intervals against a signal track.
///
/// 1. The batch is validated against the track's chromosome catalog:
///    unknown-chromosome intervals are dropped with a [`ScoreWarning`]
///    (the matrix shrinks accordingly), out-of-bounds intervals abort the
///    whole call.
/// 2. Each surviving interval is queried for per-base values.
/// 3. Minus-strand rows are reversed before insertion.
/// 4. Unequal window lengths fail with [`ScoreError::RaggedMatrix`]; no
///    partial matrix is returned.
pub fn score<T: SignalTrack>(
    track: &mut T,
    intervals: &[GenomicInterval],
) -> ScoreResult<ScoreOutcome> {
    // Validation is a separate pass over the whole batch so a hard error
    // surfaces before any track query is issued.
    let catalog = track.chrom_lengths().clone();
    let (valid, skipped) = IntervalSet::new(intervals.to_vec()).partition_valid(&catalog)?;

    let warnings: Vec<ScoreWarning> = skipped
        .into_iter()
        .map(|s| ScoreWarning::UnknownChromosome {
            index: s.index,
            chrom: s.chrom,
        })
        .collect();
    for w in &warnings {
        warn!("{}", w);
    }

    let mut matrix = ScoreMatrix::empty();
    for interval in valid.iter() {
        let mut row = track.values(&interval.chrom, interval.start, interval.end)?;
        if interval.strand.is_reverse() {
            row.reverse();
        }
        matrix.push_row(row)?;
    }

    Ok(ScoreOutcome { matrix, warnings })
}
