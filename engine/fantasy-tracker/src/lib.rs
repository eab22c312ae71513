//! Fantasy Tracker
//!
//! Fetches season-to-date player totals from the stats API, scores fantasy
//! points, and writes a dated snapshot plus a day-over-day delta report.
//! Optionally ranks the fantasy league's teams against the snapshot.

pub mod cli;
pub mod config;
pub mod dates;
pub mod delta;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod scoring;
pub mod snapshot;
pub mod standings;

pub use config::{StatsQuery, TrackerConfig};
pub use dates::BusinessDates;
pub use delta::{Baseline, DeltaReport};
pub use error::{Result, TrackerError};
pub use fetcher::StatsFetcher;
pub use models::*;
pub use pipeline::{Pipeline, RunSummary};
pub use snapshot::Snapshot;
pub use standings::{LeagueEntry, Standings};
