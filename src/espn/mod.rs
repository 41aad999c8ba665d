//! ESPN fantasy baseball API access: payload types, the roster client,
//! stat id mapping and the period × team fetch loop.

pub mod fetch;
pub mod http;
pub mod stat_map;
pub mod types;
