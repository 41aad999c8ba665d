//! Core utilities shared across the scraper
//!
//! - `files`: cache-directory paths and small file helpers
//! - `http`: ESPN request headers and HTTP client construction

pub mod files;
pub mod http;

pub use files::{data_dir, try_read_to_string, write_bytes};
pub use http::{build_http_client, common_headers};
