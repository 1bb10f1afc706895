//! Property-based tests for FIMO occurrence resolution

use motif_conserve::core::{ResolveError, Strand};
use motif_conserve::formats::{
    parse_fimo_reader, parse_sequence_name, resolve, resolve_all, resolve_with_flank,
    MotifOccurrence, NameConvention, SequenceNameKind,
};
use proptest::prelude::*;
use std::io::Cursor;

/// Generate a valid chromosome name
fn arb_chrom_name() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u8..=22).prop_map(|n| format!("chr{}", n)),
        Just("chrX".to_string()),
        Just("chrY".to_string()),
    ]
}

/// Generate a locus window (absolute 0-based start, length)
fn arb_locus() -> impl Strategy<Value = (u64, u64)> {
    (1u64..10_000_000, 50u64..5000)
}

/// Generate 1-based inclusive motif coordinates within a window of the given length
fn arb_motif_coords(window: u64) -> impl Strategy<Value = (u64, u64)> {
    (1u64..=window).prop_flat_map(move |start| (Just(start), start..=window))
}

fn occurrence(sequence_name: &str, start: u64, stop: u64, strand: Strand) -> MotifOccurrence {
    MotifOccurrence {
        pattern_name: "MA0139.1".to_string(),
        sequence_name: sequence_name.to_string(),
        start,
        stop,
        strand,
        score: 12.5,
        p_value: 1e-6,
        q_value: None,
        matched_sequence: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: locus-embedded names resolve to locus_start + local - 1 .. locus_start + stop
    #[test]
    fn prop_locus_resolution_offsets(
        chrom in arb_chrom_name(),
        (locus_start, window) in arb_locus(),
        coords in (50u64..5000).prop_flat_map(arb_motif_coords),
    ) {
        let (start, stop) = coords;
        let name = format!("{}:{}-{}", chrom, locus_start, locus_start + window);
        let occ = occurrence(&name, start, stop, Strand::Plus);

        let interval = resolve(&occ, NameConvention::Auto).unwrap();
        prop_assert_eq!(&interval.chrom, &chrom);
        prop_assert_eq!(interval.start, locus_start + start - 1);
        prop_assert_eq!(interval.end, locus_start + stop);
        // 1-based inclusive spans map to the same length in half-open form
        prop_assert_eq!(interval.len(), stop - start + 1);
    }

    /// Property: `-` and `:` separators are interchangeable in locus names
    #[test]
    fn prop_separator_equivalence(
        chrom in arb_chrom_name(),
        (locus_start, window) in arb_locus(),
    ) {
        let dashed = format!("{}-{}-{}", chrom, locus_start, locus_start + window);
        let mixed = format!("{}:{}-{}", chrom, locus_start, locus_start + window);
        let occ_a = occurrence(&dashed, 3, 10, Strand::Plus);
        let occ_b = occurrence(&mixed, 3, 10, Strand::Plus);

        let a = resolve(&occ_a, NameConvention::Auto).unwrap();
        let b = resolve(&occ_b, NameConvention::Auto).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Property: plain names pass local 1-based coordinates through as absolute
    #[test]
    fn prop_plain_name_passthrough(
        id in "[A-Za-z][A-Za-z0-9_]{0,12}",
        coords in arb_motif_coords(100_000),
    ) {
        prop_assume!(!id.contains(':') && !id.contains('-'));
        let (start, stop) = coords;
        let occ = occurrence(&id, start, stop, Strand::Minus);

        let interval = resolve(&occ, NameConvention::Auto).unwrap();
        prop_assert_eq!(&interval.chrom, &id.replace("_shuf", ""));
        prop_assert_eq!(interval.start, start - 1);
        prop_assert_eq!(interval.end, stop);
        prop_assert_eq!(interval.strand, Strand::Minus);
    }

    /// Property: a flank of f widens the interval by exactly 2*f
    #[test]
    fn prop_flank_widens_symmetrically(
        chrom in arb_chrom_name(),
        (locus_start, window) in arb_locus(),
        flank in 0i64..200,
    ) {
        // keep the flank inside the chromosome so expansion cannot underflow
        prop_assume!(locus_start >= 200);
        let name = format!("{}:{}-{}", chrom, locus_start, locus_start + window);
        let occ = occurrence(&name, 5, 20, Strand::Plus);

        let base = resolve(&occ, NameConvention::Auto).unwrap();
        let flanked = resolve_with_flank(&occ, NameConvention::Auto, flank).unwrap();
        prop_assert_eq!(flanked.len(), base.len() + 2 * flank as u64);
        prop_assert_eq!(flanked.start + flank as u64, base.start);
        prop_assert_eq!(flanked.end, base.end + flank as u64);
    }

    /// Property: batch resolution preserves input order
    #[test]
    fn prop_batch_preserves_order(
        starts in prop::collection::vec(1u64..1000, 1..50),
    ) {
        let occurrences: Vec<_> = starts
            .iter()
            .map(|&s| occurrence("chr1:10000-20000", s, s + 5, Strand::Plus))
            .collect();

        let intervals = resolve_all(&occurrences, NameConvention::Auto, 0).unwrap();
        prop_assert_eq!(intervals.len(), occurrences.len());
        for (occ, interval) in occurrences.iter().zip(&intervals) {
            prop_assert_eq!(interval.start, 10000 + occ.start - 1);
        }
    }

    /// Property: the `_shuf` marker never survives into resolved chromosomes
    #[test]
    fn prop_shuffle_marker_stripped(
        chrom in arb_chrom_name(),
        (locus_start, window) in arb_locus(),
    ) {
        let name = format!("{}_shuf:{}-{}", chrom, locus_start, locus_start + window);
        let occ = occurrence(&name, 1, 8, Strand::Plus);

        let interval = resolve(&occ, NameConvention::Auto).unwrap();
        prop_assert!(!interval.chrom.contains("_shuf"));
        prop_assert_eq!(&interval.chrom, &chrom);
    }

    /// Property: PlainId convention never attempts a locus parse
    #[test]
    fn prop_plain_convention_is_literal(
        chrom in arb_chrom_name(),
        (locus_start, window) in arb_locus(),
    ) {
        let name = format!("{}:{}-{}", chrom, locus_start, locus_start + window);
        let kind = parse_sequence_name(&name, NameConvention::PlainId).unwrap();
        prop_assert_eq!(kind, SequenceNameKind::PlainId(name));
    }
}

/// Ambiguous names with separators fail under Auto instead of guessing
#[test]
fn test_ambiguous_name_rejected() {
    let occ = occurrence("scaffold-7:100-200", 1, 10, Strand::Plus);
    let err = resolve(&occ, NameConvention::Auto).unwrap_err();
    assert!(matches!(err, ResolveError::AmbiguousLocus(_)));
}

/// Negative flank is an argument error, not a silent zero
#[test]
fn test_negative_flank_rejected() {
    let occ = occurrence("chr1:1000-2000", 5, 10, Strand::Plus);
    let err = resolve_with_flank(&occ, NameConvention::Auto, -5).unwrap_err();
    assert!(matches!(err, ResolveError::InvalidFlankLength(-5)));
}

/// Flank expansion past position 0 aborts rather than clamping
#[test]
fn test_flank_underflow_rejected() {
    let occ = occurrence("chr1", 3, 10, Strand::Plus);
    let err = resolve_with_flank(&occ, NameConvention::Auto, 50).unwrap_err();
    assert!(matches!(err, ResolveError::FlankUnderflow { .. }));
}

/// Zero-start motif coordinates are invalid in 1-based records
#[test]
fn test_zero_start_rejected() {
    let occ = occurrence("chr1:1000-2000", 0, 10, Strand::Plus);
    let err = resolve(&occ, NameConvention::Auto).unwrap_err();
    assert!(matches!(err, ResolveError::InvalidCoordinates { .. }));
}

/// Resolution gives identical results on a single-thread worker pool
#[test]
fn test_single_thread_pool_resolution() {
    let occurrences: Vec<_> = (1..=100u64)
        .map(|i| occurrence("chr1:10000-20000", i, i + 7, Strand::Plus))
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap();
    let single = pool
        .install(|| resolve_all(&occurrences, NameConvention::Auto, 5))
        .unwrap();
    let default = resolve_all(&occurrences, NameConvention::Auto, 5).unwrap();
    assert_eq!(single, default);
}

/// End-to-end: FIMO text with header and comments through to intervals
#[test]
fn test_fimo_text_to_intervals() {
    let fimo_text = "\
# FIMO (Find Individual Motif Occurrences)
#pattern name\tsequence name\tstart\tstop\tstrand\tscore\tp-value\tq-value\tmatched sequence
MA0139.1\tchr1:1000-2000\t5\t10\t+\t15.2\t1.5e-06\t0.012\tTGGCCA
MA0139.1\tchr1:1000-2000\t20\t25\t-\t14.8\t2.1e-06\t0.015\tTGGCCA
MA0139.1\tchr2_shuf:5000-6000\t3\t8\t+\t13.1\t4.0e-06\t0.02\tTGGCCA
";
    let occurrences = parse_fimo_reader(Cursor::new(fimo_text)).unwrap();
    assert_eq!(occurrences.len(), 3);
    assert_eq!(occurrences[0].pattern_name, "MA0139.1");
    assert_eq!(occurrences[1].strand, Strand::Minus);
    assert_eq!(occurrences[0].q_value, Some(0.012));

    let intervals = resolve_all(&occurrences, NameConvention::Auto, 0).unwrap();
    assert_eq!(intervals[0].start, 1004);
    assert_eq!(intervals[0].end, 1010);
    assert_eq!(intervals[1].strand, Strand::Minus);
    assert_eq!(intervals[2].chrom, "chr2");
    assert_eq!(intervals[2].start, 5002);
    assert_eq!(intervals[2].end, 5008);
}
