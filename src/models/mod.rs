//! Records produced by the fetcher and consumed by every sink.

pub mod stat_record;

pub use stat_record::StatRecord;
