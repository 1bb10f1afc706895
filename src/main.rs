//! MotifConserve CLI entry point
//!
//! Scores conservation signal at motif occurrences reported by FIMO
//! against a genome-wide BigWig track.

use clap::{Parser, Subcommand, ValueEnum};
use motif_conserve::core::{score, BigWigReader, SignalTrack};
use motif_conserve::formats::{self, NameConvention};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Sequence-name convention (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum NameConventionArg {
    /// Parse names with separators as loci, refuse ambiguous ones
    #[default]
    #[value(name = "auto")]
    Auto,
    /// Every name encodes chrom:start-end
    #[value(name = "locus")]
    Locus,
    /// Every name is an opaque sequence/chromosome identifier
    #[value(name = "plain")]
    Plain,
}

impl From<NameConventionArg> for NameConvention {
    fn from(arg: NameConventionArg) -> Self {
        match arg {
            NameConventionArg::Auto => NameConvention::Auto,
            NameConventionArg::Locus => NameConvention::GenomicLocus,
            NameConventionArg::Plain => NameConvention::PlainId,
        }
    }
}

#[derive(Parser)]
#[command(name = "motif-conserve")]
#[command(about = "Conservation scoring of transcription-factor motif sites")]
#[command(version)]
#[command(author = "MotifConserve Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score motif occurrences against a BigWig conservation track
    Score {
        /// BigWig signal track (PhyloP/GERP/PhastCons)
        track: PathBuf,
        /// FIMO occurrence file (plain, .gz or .bz2)
        fimo: PathBuf,
        /// Symmetric flank expansion in bases
        #[arg(short = 'f', long, default_value_t = 0)]
        flank: i64,
        /// Output file prefix (writes <prefix>.raw.txt and <prefix>.mean.txt)
        #[arg(short = 'p', long, default_value = "phylop")]
        prefix: String,
        /// Output directory (default: current directory)
        #[arg(short = 'o', long = "out-dir")]
        out_dir: Option<PathBuf>,
        /// Sequence-name convention: auto, locus or plain
        #[arg(long = "names", default_value = "auto")]
        names: NameConventionArg,
        /// Number of threads (default: 1)
        #[arg(short = 't', long, default_value_t = 1)]
        threads: usize,
    },
    /// Resolve motif occurrences to a BED6 file of genomic sites
    Sites {
        /// FIMO occurrence file (plain, .gz or .bz2)
        fimo: PathBuf,
        /// Output BED file (stdout if not specified)
        output: Option<PathBuf>,
        /// Symmetric flank expansion in bases
        #[arg(short = 'f', long, default_value_t = 0)]
        flank: i64,
        /// Sequence-name convention: auto, locus or plain
        #[arg(long = "names", default_value = "auto")]
        names: NameConventionArg,
    },
    /// Print the chromosome catalog of a BigWig track
    Chroms {
        /// BigWig signal track
        track: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Score {
            track,
            fimo,
            flank,
            prefix,
            out_dir,
            names,
            threads,
        } => {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .map_err(|e| {
                    anyhow::anyhow!("cannot configure {} worker threads: {}", threads, e)
                })?;

            eprintln!("Reading occurrences: {:?}", fimo);
            let occurrences = formats::parse_fimo_file(&fimo)?;
            let intervals = formats::resolve_all(&occurrences, names.into(), flank)?;

            eprintln!("Opening signal track: {:?}", track);
            let mut reader = BigWigReader::open(&track)?;
            eprintln!("Track has {} chromosomes", reader.chrom_lengths().len());

            let outcome = score(&mut reader, &intervals)?;

            let out_dir = out_dir.unwrap_or_else(|| PathBuf::from("."));
            let saved = formats::save_scores(&outcome.matrix, &out_dir, &prefix)?;

            eprintln!("\n=== Scoring Statistics ===");
            eprintln!("Occurrences:     {}", occurrences.len());
            eprintln!("Scored rows:     {}", outcome.matrix.n_rows());
            eprintln!("Skipped:         {}", outcome.warnings.len());
            eprintln!("Window length:   {}", outcome.matrix.n_cols());
            eprintln!("Raw matrix:      {:?}", saved.raw);
            eprintln!("Column means:    {:?}", saved.means);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Sites {
            fimo,
            output,
            flank,
            names,
        } => {
            let occurrences = formats::parse_fimo_file(&fimo)?;
            let intervals = formats::resolve_all(&occurrences, names.into(), flank)?;

            match output {
                Some(path) => {
                    let mut writer =
                        std::io::BufWriter::new(std::fs::File::create(&path)?);
                    formats::write_sites_bed(&mut writer, &occurrences, &intervals)?;
                    writer.flush()?;
                    eprintln!("Wrote {} sites to {:?}", intervals.len(), path);
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut writer = stdout.lock();
                    formats::write_sites_bed(&mut writer, &occurrences, &intervals)?;
                }
            }
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Chroms { track } => {
            let reader = BigWigReader::open(&track)?;
            let mut chroms: Vec<_> = reader.chrom_lengths().iter().collect();
            chroms.sort();
            for (name, length) in chroms {
                println!("{}\t{}", name, length);
            }
        }
    }

    Ok(())
}
