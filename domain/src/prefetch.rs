use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{DomainError, DomainResult};

/// Inclusive span of rows or columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpan {
    start: u32,
    end: u32,
}

impl TileSpan {
    pub fn new(start: u32, end: u32) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::InvalidRegion(format!(
                "start {start} is greater than end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        u64::from(self.end - self.start) + 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn iter(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

impl fmt::Display for TileSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Rectangle of tiles at one zoom level scheduled for prefetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefetchRegion {
    pub zoom: u8,
    pub rows: TileSpan,
    pub cols: TileSpan,
}

impl PrefetchRegion {
    pub fn new(zoom: u8, rows: (u32, u32), cols: (u32, u32)) -> DomainResult<Self> {
        let rows = TileSpan::new(rows.0, rows.1)
            .map_err(|e| DomainError::InvalidRegion(format!("rows: {e}")))?;
        let cols = TileSpan::new(cols.0, cols.1)
            .map_err(|e| DomainError::InvalidRegion(format!("cols: {e}")))?;
        if rows.len().checked_mul(cols.len()).is_none() {
            return Err(DomainError::InvalidRegion(format!(
                "{rows} x {cols} holds more tiles than can be counted"
            )));
        }
        Ok(Self { zoom, rows, cols })
    }

    #[must_use]
    pub fn tile_count(&self) -> u64 {
        self.rows.len().saturating_mul(self.cols.len())
    }

    /// Row-major iteration over `(row, col)` pairs.
    pub fn coordinates(&self) -> impl Iterator<Item = (u32, u32)> + Send + 'static {
        let cols = self.cols;
        self.rows
            .iter()
            .flat_map(move |row| cols.iter().map(move |col| (row, col)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefetchTileOutcome {
    Downloaded,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrefetchProgress {
    pub downloaded: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl PrefetchProgress {
    pub fn record(&mut self, outcome: PrefetchTileOutcome) {
        match outcome {
            PrefetchTileOutcome::Downloaded => self.downloaded += 1,
            PrefetchTileOutcome::Skipped => self.skipped += 1,
            PrefetchTileOutcome::Failed => self.failed += 1,
        }
    }

    #[must_use]
    pub fn processed(&self) -> u64 {
        self.downloaded + self.skipped + self.failed
    }
}
