pub mod client;
pub mod roster;

use std::time::Duration;
use thiserror::Error;

pub use client::{FighterApi, SportsDataClient};
pub use roster::{Roster, RosterSnapshot};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("upstream answered {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },
    #[error("upstream request failed: {0}")]
    Network(String),
    #[error("upstream request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("upstream response could not be parsed: {0}")]
    Parse(String),
}
