use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::SnapshotError;

/// Header of the first CSV column.
pub const SYMBOL_COLUMN: &str = "Symbol";

static PERCENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*%\s*$").expect("percent pattern is a valid regex")
});

/// One full feed file: the metric columns and one row per symbol.
///
/// Cells stay as the raw strings found on the wire; they are parsed into
/// [`Percent`] when a snapshot is pivoted into metric tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub metrics: Vec<String>,
    pub rows: Vec<SnapshotRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub symbol: String,
    /// One cell per entry of [`Snapshot::metrics`], same order.
    pub cells: Vec<String>,
}

impl Snapshot {
    pub fn new(metrics: Vec<String>) -> Self {
        Self {
            metrics,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, symbol: impl Into<String>, cells: Vec<String>) {
        self.rows.push(SnapshotRow {
            symbol: symbol.into(),
            cells,
        });
    }

    pub fn metric_index(&self, metric: &str) -> Option<usize> {
        self.metrics.iter().position(|m| m == metric)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.symbol.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A percentage as written in the feed, e.g. `12%` holds `12.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Percent(f64);

impl Percent {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn from_whole(value: i64) -> Self {
        Self(value as f64)
    }

    /// The percentage points, `12%` → `12.0`.
    pub fn value(self) -> f64 {
        self.0
    }

    /// The fractional form used for display, `12%` → `0.12`.
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl FromStr for Percent {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SnapshotError::MalformedPercent {
            value: s.to_string(),
        };

        let captures = PERCENT_PATTERN.captures(s).ok_or_else(malformed)?;
        let number = captures.get(1).ok_or_else(malformed)?.as_str();
        let value: f64 = number.parse().map_err(|_| malformed())?;
        Ok(Self(value))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}%", self.0)
        } else {
            write!(f, "{}%", self.0)
        }
    }
}
