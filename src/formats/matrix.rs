//! Plain-text score matrix output
//!
//! The downstream plotting/statistics layer consumes two numeric text
//! files per scoring run: the full raw matrix (one space-delimited row per
//! interval) and the column-mean vector (one value per line). Values are
//! 4-decimal fixed-point with NaN rendered as `nan`.

use crate::core::ScoreMatrix;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Format a single score as 4-decimal fixed-point
pub fn format_score(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.4}", value)
    }
}

/// Write the full raw matrix, one row per interval
pub fn write_raw_matrix<W: Write>(writer: &mut W, matrix: &ScoreMatrix) -> std::io::Result<()> {
    for row in matrix.rows() {
        let mut first = true;
        for &value in row {
            if !first {
                write!(writer, " ")?;
            }
            write!(writer, "{}", format_score(value))?;
            first = false;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Write the column-mean vector, one value per line
pub fn write_column_means<W: Write>(writer: &mut W, means: &[f64]) -> std::io::Result<()> {
    for &value in means {
        writeln!(writer, "{}", format_score(value))?;
    }
    Ok(())
}

/// Paths produced by [`save_scores`]
#[derive(Debug, Clone)]
pub struct SavedScores {
    pub raw: PathBuf,
    pub means: PathBuf,
}

/// Persist a score matrix as `{prefix}.raw.txt` and `{prefix}.mean.txt`.
///
/// An empty matrix still creates both files, empty, so downstream stages
/// can rely on their existence.
pub fn save_scores<P: AsRef<Path>>(
    matrix: &ScoreMatrix,
    out_dir: P,
    prefix: &str,
) -> std::io::Result<SavedScores> {
    let out_dir = out_dir.as_ref();
    let raw_path = out_dir.join(format!("{}.raw.txt", prefix));
    let mean_path = out_dir.join(format!("{}.mean.txt", prefix));

    let mut raw = BufWriter::new(File::create(&raw_path)?);
    let mut means = BufWriter::new(File::create(&mean_path)?);

    if !matrix.is_empty() {
        write_raw_matrix(&mut raw, matrix)?;
        write_column_means(&mut means, &matrix.column_means())?;
    }
    raw.flush()?;
    means.flush()?;

    Ok(SavedScores {
        raw: raw_path,
        means: mean_path,
    })
}
