use chrono::{DateTime, Local};
use derive_getters::Getters;
use derive_new::new;
use strum_macros::Display;

use super::PriceQuote;
use crate::error::QuoteError;

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum RefreshPhase {
    #[default]
    Idle,
    InFlight,
}

/// How one ticker of a refresh cycle resolved.
#[derive(Clone, Debug, PartialEq)]
pub enum TickerOutcome {
    Updated(PriceQuote),
    Failed(QuoteError),
    /// Resolved after the cycle was cancelled, result discarded.
    Cancelled,
}

#[derive(Clone, Debug)]
pub enum RefreshEvent {
    Started {
        cycle: u64,
        tickers: Vec<String>,
    },
    Resolved {
        cycle: u64,
        ticker: String,
        outcome: TickerOutcome,
        remaining: usize,
    },
    Completed(RefreshReport),
}

/// Summary of a finished refresh cycle.
#[derive(Clone, Debug, Getters, new)]
pub struct RefreshReport {
    cycle: u64,
    updated: Vec<String>,
    failed: Vec<(String, QuoteError)>,
    cancelled: Vec<String>,
    started_at: DateTime<Local>,
    finished_at: DateTime<Local>,
}

impl RefreshReport {
    pub fn resolved_count(&self) -> usize {
        self.updated.len() + self.failed.len() + self.cancelled.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty() && self.cancelled.is_empty()
    }
}

/// Point-in-time view of the coordinator for callers that poll.
#[derive(Clone, Debug, Getters, new)]
pub struct RefreshStatus {
    phase: RefreshPhase,
    cycle: u64,
    pending: Vec<String>,
    updated: Vec<String>,
}
