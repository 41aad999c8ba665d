//! Error types for the ESPN fantasy baseball stats scraper

use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Token signing failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("League ID not provided and {env_var} environment variable not set")]
    MissingLeagueId { env_var: String },

    #[error("Failed to parse numeric id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Invalid scoring period range: {start} to {end}")]
    InvalidPeriodRange { start: u16, end: u16 },

    #[error("No team IDs given")]
    NoTeams,

    #[error("No scoring periods given")]
    NoPeriods,

    #[error("Credentials error: {message}")]
    Credentials { message: String },

    #[error("{sink} rejected the write with status {status}: {body}")]
    SinkRejected {
        sink: String,
        status: u16,
        body: String,
    },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl From<anyhow::Error> for ScrapeError {
    fn from(err: anyhow::Error) -> Self {
        ScrapeError::Storage {
            message: format!("{err:#}"),
        }
    }
}
