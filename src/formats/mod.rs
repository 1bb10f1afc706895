//! Record-format adapters
//!
//! FIMO occurrence parsing/resolution and plain-text matrix output.

pub mod fimo;
pub mod matrix;

pub use fimo::{
    parse_fimo_file, parse_fimo_reader, parse_sequence_name, resolve, resolve_all,
    resolve_with_flank, write_sites_bed, MotifOccurrence, NameConvention, SequenceNameKind,
};
pub use matrix::{
    format_score, save_scores, write_column_means, write_raw_matrix, SavedScores,
};
