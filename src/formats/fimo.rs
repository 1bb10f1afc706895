//! FIMO motif-occurrence format adapter
//!
//! Parses the tab-delimited occurrence table written by MEME's FIMO scanner
//! and resolves each record to absolute genomic coordinates.
//!
//! FIMO reports motif positions as 1-based inclusive coordinates local to
//! the scanned sequence. The sequence name is either a plain per-record ID
//! (`seq_42`) or an embedded genomic locus (`chr1:1000-2000`,
//! `chr1-1000-2000`); shuffled control sequences carry a `_shuf` marker
//! that is stripped before parsing. Resolution converts everything to the
//! 0-based half-open coordinates used by the scoring engine.

use crate::core::io::{open_text, LineIterator};
use crate::core::{
    FimoParseError, FimoResult, GenomicInterval, ResolveError, ResolveResult, Strand,
};
use rayon::prelude::*;
use std::io::{BufRead, Write};
use std::path::Path;

/// A single motif occurrence as reported by the scanner
#[derive(Debug, Clone, PartialEq)]
pub struct MotifOccurrence {
    /// Motif identifier
    pub pattern_name: String,
    /// Scanned sequence identifier; may embed a genomic locus
    pub sequence_name: String,
    /// 1-based inclusive start within the sequence
    pub start: u64,
    /// 1-based inclusive end within the sequence
    pub stop: u64,
    /// Match orientation; `.` for not-applicable
    pub strand: Strand,
    /// Position-weight-matrix match score
    pub score: f64,
    /// Match p-value
    pub p_value: f64,
    /// Estimated false discovery rate, when reported
    pub q_value: Option<f64>,
    /// The matched sequence text, when reported
    pub matched_sequence: Option<String>,
}

/// How sequence names should be interpreted during resolution.
///
/// The `Auto` heuristic cannot distinguish a chromosome name that itself
/// contains `-` or `:` from a locus encoding; for such genomes callers must
/// force one of the explicit conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameConvention {
    /// Parse names with separators as loci, refuse ambiguous ones
    #[default]
    Auto,
    /// Every name encodes `chrom:start-end`
    GenomicLocus,
    /// Every name is an opaque sequence/chromosome identifier
    PlainId,
}

/// Interpretation of a sequence name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceNameKind {
    /// Opaque identifier; local coordinates are already absolute
    PlainId(String),
    /// Embedded genomic locus; local coordinates are offsets into it
    GenomicLocus { chrom: String, start: u64, end: u64 },
}

/// Noise suffix marking shuffled/control sequences
const SHUFFLE_MARKER: &str = "_shuf";

fn try_parse_locus(name: &str) -> Option<SequenceNameKind> {
    // `-` and `:` are interchangeable separators in locus-encoded names
    let normalized = name.replace('-', ":");
    let fields: Vec<&str> = normalized.split(':').collect();
    if fields.len() != 3 || fields[0].is_empty() {
        return None;
    }
    let start: u64 = fields[1].parse().ok()?;
    let end: u64 = fields[2].parse().ok()?;
    Some(SequenceNameKind::GenomicLocus {
        chrom: fields[0].to_string(),
        start,
        end,
    })
}

/// Classify a sequence name under the given convention.
///
/// Rules, in order: strip the `_shuf` noise suffix, then attempt the
/// structured locus parse, then fall back to a plain identifier. Under
/// `Auto`, a name that contains separators but does not parse as exactly
/// `chrom:start-end` is an error rather than a silent guess.
pub fn parse_sequence_name(
    name: &str,
    convention: NameConvention,
) -> ResolveResult<SequenceNameKind> {
    let cleaned = name.replace(SHUFFLE_MARKER, "");

    match convention {
        NameConvention::PlainId => Ok(SequenceNameKind::PlainId(cleaned)),
        NameConvention::GenomicLocus => {
            try_parse_locus(&cleaned).ok_or_else(|| ResolveError::InvalidLocus {
                name: name.to_string(),
                message: "expected chrom:start-end with numeric bounds".to_string(),
            })
        }
        NameConvention::Auto => {
            if cleaned.contains(':') || cleaned.contains('-') {
                try_parse_locus(&cleaned).ok_or_else(|| ResolveError::AmbiguousLocus(name.to_string()))
            } else {
                Ok(SequenceNameKind::PlainId(cleaned))
            }
        }
    }
}

/// Resolve an occurrence to an absolute 0-based half-open interval.
///
/// Genomic branch: `start0 = locus.start + local_start - 1`,
/// `end = locus.start + local_stop`. Plain branch: the sequence name is the
/// chromosome and the local coordinates are absolute 1-based positions.
pub fn resolve(
    occurrence: &MotifOccurrence,
    convention: NameConvention,
) -> ResolveResult<GenomicInterval> {
    if occurrence.start == 0 || occurrence.stop < occurrence.start {
        return Err(ResolveError::InvalidCoordinates {
            name: occurrence.sequence_name.clone(),
            start: occurrence.start,
            stop: occurrence.stop,
            message: "motif coordinates are 1-based inclusive with stop >= start".to_string(),
        });
    }

    let interval = match parse_sequence_name(&occurrence.sequence_name, convention)? {
        SequenceNameKind::GenomicLocus { chrom, start, .. } => GenomicInterval::new(
            chrom,
            start + occurrence.start - 1,
            start + occurrence.stop,
            occurrence.strand,
        ),
        SequenceNameKind::PlainId(chrom) => GenomicInterval::new(
            chrom,
            occurrence.start - 1,
            occurrence.stop,
            occurrence.strand,
        ),
    };
    Ok(interval)
}

/// Resolve with a symmetric flank expansion around the motif.
///
/// `flank` must be non-negative; expansion past position 0 is an error,
/// never clamped (a truncated window would corrupt the score matrix).
/// A flank of 0 is exactly [`resolve`].
pub fn resolve_with_flank(
    occurrence: &MotifOccurrence,
    convention: NameConvention,
    flank: i64,
) -> ResolveResult<GenomicInterval> {
    if flank < 0 {
        return Err(ResolveError::InvalidFlankLength(flank));
    }
    let flank = flank as u64;

    let base = resolve(occurrence, convention)?;
    if base.start < flank {
        return Err(ResolveError::FlankUnderflow {
            chrom: base.chrom,
            start: base.start,
            flank,
        });
    }
    Ok(GenomicInterval::new(
        base.chrom,
        base.start - flank,
        base.end + flank,
        base.strand,
    ))
}

/// Resolve a batch of occurrences in parallel, preserving input order
pub fn resolve_all(
    occurrences: &[MotifOccurrence],
    convention: NameConvention,
    flank: i64,
) -> ResolveResult<Vec<GenomicInterval>> {
    occurrences
        .par_iter()
        .map(|occ| resolve_with_flank(occ, convention, flank))
        .collect()
}

fn parse_record(line: &str, line_number: usize) -> FimoResult<MotifOccurrence> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 7 {
        return Err(FimoParseError::InvalidRecord {
            line: line_number,
            message: format!("expected at least 7 tab-delimited fields, found {}", fields.len()),
        });
    }

    let parse_u64 = |field: &'static str, value: &str| -> FimoResult<u64> {
        value.trim().parse().map_err(|_| FimoParseError::ParseNumber {
            line: line_number,
            field,
            value: value.to_string(),
        })
    };
    let parse_f64 = |field: &'static str, value: &str| -> FimoResult<f64> {
        value.trim().parse().map_err(|_| FimoParseError::ParseNumber {
            line: line_number,
            field,
            value: value.to_string(),
        })
    };

    let strand = fields[4]
        .trim()
        .chars()
        .next()
        .and_then(Strand::from_char)
        .ok_or_else(|| FimoParseError::InvalidRecord {
            line: line_number,
            message: format!("invalid strand '{}'", fields[4]),
        })?;

    Ok(MotifOccurrence {
        pattern_name: fields[0].to_string(),
        sequence_name: fields[1].to_string(),
        start: parse_u64("start", fields[2])?,
        stop: parse_u64("stop", fields[3])?,
        strand,
        score: parse_f64("score", fields[5])?,
        p_value: parse_f64("p-value", fields[6])?,
        // absent or empty column means "not reported"; present garbage is an error
        q_value: match fields.get(7).map(|v| v.trim()) {
            None | Some("") => None,
            Some(v) => Some(parse_f64("q-value", v)?),
        },
        matched_sequence: fields
            .get(8)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()),
    })
}

/// Parse FIMO records from a reader.
///
/// Comment lines (`#`) are skipped; a leading column-header line without a
/// comment marker (as some FIMO versions write) is detected by a full field
/// count with non-numeric coordinate columns and skipped as well.
pub fn parse_fimo_reader<R: BufRead>(reader: R) -> FimoResult<Vec<MotifOccurrence>> {
    let mut records = Vec::new();
    let mut lines = LineIterator::new(reader);
    let mut line_number = 0usize;
    let mut seen_data = false;

    while let Some(line) = lines.next_line() {
        let line = line?;
        line_number += 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if !seen_data {
            // Header line: full field count but non-numeric coordinate
            // columns. A short or otherwise malformed first record must
            // still error instead of being dropped as a header.
            let fields: Vec<&str> = trimmed.split('\t').collect();
            let is_header = fields.len() >= 7
                && fields[2].trim().parse::<u64>().is_err()
                && fields[3].trim().parse::<u64>().is_err();
            if is_header {
                continue;
            }
        }

        records.push(parse_record(trimmed, line_number)?);
        seen_data = true;
    }

    Ok(records)
}

/// Parse a FIMO occurrence file, decompressing transparently
pub fn parse_fimo_file<P: AsRef<Path>>(path: P) -> FimoResult<Vec<MotifOccurrence>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(FimoParseError::FileNotFound(path.to_path_buf()));
    }
    let reader = open_text(path)?;
    parse_fimo_reader(reader)
}

/// Write resolved motif sites as BED6.
///
/// Occurrences and intervals are parallel slices, as produced by
/// [`resolve_all`] over the same record batch.
pub fn write_sites_bed<W: Write>(
    writer: &mut W,
    occurrences: &[MotifOccurrence],
    intervals: &[GenomicInterval],
) -> std::io::Result<()> {
    for (occ, interval) in occurrences.iter().zip(intervals) {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}",
            interval.chrom,
            interval.start,
            interval.end,
            occ.pattern_name,
            occ.score,
            interval.strand
        )?;
    }
    Ok(())
}
