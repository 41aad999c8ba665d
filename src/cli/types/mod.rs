//! Type-safe wrappers for ESPN fantasy baseball identifiers.

pub mod ids;
pub mod time;

pub use ids::{LeagueId, PlayerId, TeamId};
pub use time::{ScoringPeriod, Season};
