//! Season and scoring period types.

use crate::error::{Result, ScrapeError};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for Season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Season {
    /// The current calendar year; baseball seasons never straddle a new year.
    fn default() -> Self {
        let year = chrono::Utc::now().year();
        Self(u16::try_from(year).unwrap_or(u16::MAX))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A single scoring period (one day of the baseball calendar on ESPN).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScoringPeriod(pub u16);

impl ScoringPeriod {
    pub fn new(period: u16) -> Self {
        Self(period)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Inclusive range of periods, or an error when `start > end`.
    pub fn range(start: ScoringPeriod, end: ScoringPeriod) -> Result<Vec<ScoringPeriod>> {
        if start > end {
            return Err(ScrapeError::InvalidPeriodRange {
                start: start.0,
                end: end.0,
            });
        }
        Ok((start.0..=end.0).map(ScoringPeriod).collect())
    }
}

impl Default for ScoringPeriod {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for ScoringPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ScoringPeriod {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}
