//! Signal track access
//!
//! Random-access retrieval of per-base numeric values from a genome-wide
//! conservation track (PhyloP/GERP/PhastCons in BigWig form), plus the
//! chromosome-length catalog read once at open time.
//!
//! Sparse tracks are legal: positions without data come back as NaN so that
//! downstream statistics can distinguish "no signal" from "zero signal".

use crate::core::error::{TrackError, TrackResult};
use crate::core::interval::ChromCatalog;
use bigtools::utils::reopen::ReopenableFile;
use bigtools::BigWigRead;
use std::path::{Path, PathBuf};

/// Random-access source of per-base signal values.
///
/// Implemented by [`BigWigReader`] for on-disk tracks and [`DenseTrack`]
/// for in-memory/synthetic data. Queries take `&mut self` because indexed
/// readers seek on a single underlying handle; there is no mutation of
/// track contents after open.
pub trait SignalTrack {
    /// Full chromosome catalog; pure, cached at open
    fn chrom_lengths(&self) -> &ChromCatalog;

    /// Per-base values over half-open `[start, end)`, 0-based.
    ///
    /// Returns exactly `end - start` values, NaN where the track holds no
    /// data. Fails with [`TrackError::UnknownChromosome`] if `chrom` is not
    /// in the catalog; the caller decides whether that is fatal.
    fn values(&mut self, chrom: &str, start: u64, end: u64) -> TrackResult<Vec<f64>>;
}

/// BigWig-backed signal track reader
///
/// Opens one file handle per instance; the underlying indexed format
/// provides efficient range access, so no query caching is done here.
pub struct BigWigReader {
    path: PathBuf,
    reader: BigWigRead<ReopenableFile>,
    catalog: ChromCatalog,
}

impl BigWigReader {
    /// Open a BigWig file and cache its chromosome catalog
    pub fn open<P: AsRef<Path>>(path: P) -> TrackResult<Self> {
        let path = path.as_ref().to_path_buf();
        let path_str = path.to_str().ok_or_else(|| TrackError::Open {
            path: path.clone(),
            message: "path is not valid UTF-8".to_string(),
        })?;

        let reader = BigWigRead::open_file(path_str).map_err(|e| TrackError::Open {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let catalog: ChromCatalog = reader
            .chroms()
            .iter()
            .map(|c| (c.name.clone(), c.length as u64))
            .collect();

        Ok(Self {
            path,
            reader,
            catalog,
        })
    }

    /// Path the reader was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SignalTrack for BigWigReader {
    fn chrom_lengths(&self) -> &ChromCatalog {
        &self.catalog
    }

    fn values(&mut self, chrom: &str, start: u64, end: u64) -> TrackResult<Vec<f64>> {
        if !self.catalog.contains_key(chrom) {
            return Err(TrackError::UnknownChromosome(chrom.to_string()));
        }
        if end < start {
            return Err(TrackError::Query {
                chrom: chrom.to_string(),
                start,
                end,
                message: "start > end".to_string(),
            });
        }
        // BigWig stores 32-bit coordinates; larger values would truncate
        if end > u32::MAX as u64 {
            return Err(TrackError::Query {
                chrom: chrom.to_string(),
                start,
                end,
                message: "coordinate exceeds the 32-bit BigWig limit".to_string(),
            });
        }

        let n = (end - start) as usize;
        let mut out = vec![f64::NAN; n];
        if n == 0 {
            return Ok(out);
        }

        let query_err = |message: String| TrackError::Query {
            chrom: chrom.to_string(),
            start,
            end,
            message,
        };

        let intervals = self
            .reader
            .get_interval(chrom, start as u32, end as u32)
            .map_err(|e| query_err(e.to_string()))?;

        for interval in intervals {
            let interval = interval.map_err(|e| query_err(e.to_string()))?;
            // clip the stored run to the requested window
            let s = (interval.start as u64).max(start);
            let e = (interval.end as u64).min(end);
            for pos in s..e {
                out[(pos - start) as usize] = interval.value as f64;
            }
        }

        Ok(out)
    }
}

/// In-memory dense signal track
///
/// Each chromosome holds one value per base starting at position 0;
/// positions past the stored data (up to the declared length) read as NaN.
#[derive(Debug, Clone, Default)]
pub struct DenseTrack {
    catalog: ChromCatalog,
    data: std::collections::HashMap<String, Vec<f64>>,
}

impl DenseTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chromosome whose length equals the number of values
    pub fn add_chrom(&mut self, name: impl Into<String>, values: Vec<f64>) {
        let name = name.into();
        self.catalog.insert(name.clone(), values.len() as u64);
        self.data.insert(name, values);
    }

    /// Add a chromosome with an explicit length; bases past the stored
    /// values read as NaN
    pub fn add_chrom_with_length(
        &mut self,
        name: impl Into<String>,
        length: u64,
        values: Vec<f64>,
    ) {
        let name = name.into();
        self.catalog
            .insert(name.clone(), length.max(values.len() as u64));
        self.data.insert(name, values);
    }
}

impl SignalTrack for DenseTrack {
    fn chrom_lengths(&self) -> &ChromCatalog {
        &self.catalog
    }

    fn values(&mut self, chrom: &str, start: u64, end: u64) -> TrackResult<Vec<f64>> {
        let length = match self.catalog.get(chrom) {
            Some(l) => *l,
            None => return Err(TrackError::UnknownChromosome(chrom.to_string())),
        };
        if end < start || end > length {
            return Err(TrackError::Query {
                chrom: chrom.to_string(),
                start,
                end,
                message: format!("range outside chromosome of length {}", length),
            });
        }

        let data = &self.data[chrom];
        let out = (start..end)
            .map(|pos| data.get(pos as usize).copied().unwrap_or(f64::NAN))
            .collect();
        Ok(out)
    }
}
