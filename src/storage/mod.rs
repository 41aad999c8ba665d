//! Local SQLite mirror of the hosted stats table
//!
//! - `schema`: Database connection and schema management
//! - `queries`: Upserts and lookups

pub mod queries;
pub mod schema;

#[cfg(test)]
mod tests;

pub use schema::StatsDatabase;
