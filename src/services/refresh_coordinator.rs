use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use chrono::Local;
use tokio::sync::{broadcast, mpsc, watch};
use tokio_stream::wrappers::BroadcastStream;

use crate::{
    api::PriceLookup,
    error::{QuoteError, RefreshError},
    models::{
        Holding, PriceQuote, RefreshEvent, RefreshPhase, RefreshReport, RefreshStatus,
        TickerOutcome,
    },
};

const EVENT_CAPACITY: usize = 1024;

type LookupResult = (usize, Result<PriceQuote, QuoteError>);

#[derive(Debug, Default)]
struct CycleState {
    phase: RefreshPhase,
    cycle: u64,
    /// Slot in the borrowed holdings slice -> ticker, for every unresolved lookup.
    pending: BTreeMap<usize, String>,
    updated: Vec<String>,
}

/// Refreshes live prices for a batch of holdings.
///
/// Lookups run as independent tokio tasks. Their results are funnelled through
/// a channel back to the task that called [`RefreshCoordinator::refresh`],
/// which is the only writer of the borrowed holdings. Each result is merged
/// and removed from the pending set under one lock, so the transition back to
/// [`RefreshPhase::Idle`] happens exactly once per cycle.
pub struct RefreshCoordinator {
    lookup: Arc<dyn PriceLookup>,
    timeout: Duration,
    state: Mutex<CycleState>,
    events: broadcast::Sender<RefreshEvent>,
}

impl RefreshCoordinator {
    pub fn new(lookup: Arc<dyn PriceLookup>, timeout: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            lookup,
            timeout,
            state: Mutex::new(CycleState::default()),
            events,
        }
    }

    pub fn lookup(&self) -> &Arc<dyn PriceLookup> {
        &self.lookup
    }

    /// Per-ticker and cycle events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<RefreshEvent> {
        self.events.subscribe()
    }

    pub fn event_stream(&self) -> BroadcastStream<RefreshEvent> {
        BroadcastStream::new(self.subscribe())
    }

    pub fn status(&self) -> RefreshStatus {
        let state = self.state();
        RefreshStatus::new(
            state.phase,
            state.cycle,
            state.pending.values().cloned().collect(),
            state.updated.clone(),
        )
    }

    pub fn phase(&self) -> RefreshPhase {
        self.state().phase
    }

    pub async fn refresh(&self, holdings: &mut [Holding]) -> Result<RefreshReport, RefreshError> {
        let (_cancel_tx, cancel_rx) = watch::channel(false);
        self.refresh_with_cancel(holdings, cancel_rx).await
    }

    /// Runs one refresh cycle over `holdings`.
    ///
    /// Sending `true` on `cancel` stops merging results: every ticker still
    /// pending is reported as cancelled and the cycle ends immediately. The
    /// spawned lookups are left to finish on their own, bounded by the timeout.
    pub async fn refresh_with_cancel(
        &self,
        holdings: &mut [Holding],
        mut cancel: watch::Receiver<bool>,
    ) -> Result<RefreshReport, RefreshError> {
        let started_at = Local::now();
        let cycle = self.begin(holdings)?;
        let mut guard = CycleGuard {
            state: &self.state,
            cycle,
            finished: false,
        };

        let tickers: Vec<String> = holdings.iter().map(|h| h.ticker().clone()).collect();
        tracing::info!(cycle, count = tickers.len(), "starting price refresh");
        let _ = self.events.send(RefreshEvent::Started {
            cycle,
            tickers: tickers.clone(),
        });

        let mut updated = Vec::new();
        let mut failed = Vec::new();
        let mut cancelled = Vec::new();

        let mut results = self.dispatch(&tickers);
        let mut cancel_open = true;
        let mut remaining = tickers.len();

        while remaining > 0 {
            if *cancel.borrow() {
                break;
            }

            let received = tokio::select! {
                received = results.recv() => received,
                changed = cancel.changed(), if cancel_open => {
                    if changed.is_err() {
                        cancel_open = false;
                    }
                    continue;
                }
            };

            let Some((slot, result)) = received else {
                // Every sender is gone but some lookups never reported back.
                break;
            };

            let outcome = match result {
                Ok(quote) => TickerOutcome::Updated(quote),
                Err(err) => {
                    tracing::warn!(cycle, ticker = %tickers[slot], error = %err, "price refresh failed");
                    TickerOutcome::Failed(err)
                }
            };

            let Some(left) = self.resolve(cycle, holdings, slot, &outcome) else {
                continue;
            };
            remaining = left;

            match &outcome {
                TickerOutcome::Updated(_) => updated.push(tickers[slot].clone()),
                TickerOutcome::Failed(err) => failed.push((tickers[slot].clone(), err.clone())),
                TickerOutcome::Cancelled => cancelled.push(tickers[slot].clone()),
            }

            let _ = self.events.send(RefreshEvent::Resolved {
                cycle,
                ticker: tickers[slot].clone(),
                outcome,
                remaining,
            });
        }

        if remaining > 0 {
            let was_cancelled = *cancel.borrow();
            for ticker in self.drain_pending(cycle) {
                let outcome = if was_cancelled {
                    cancelled.push(ticker.clone());
                    TickerOutcome::Cancelled
                } else {
                    let err = QuoteError::Network(String::from("lookup ended without a result"));
                    tracing::warn!(cycle, ticker = %ticker, error = %err, "price refresh failed");
                    failed.push((ticker.clone(), err.clone()));
                    TickerOutcome::Failed(err)
                };
                let _ = self.events.send(RefreshEvent::Resolved {
                    cycle,
                    ticker,
                    outcome,
                    remaining: 0,
                });
            }
        }
        guard.finished = true;

        let report = RefreshReport::new(cycle, updated, failed, cancelled, started_at, Local::now());
        tracing::info!(
            cycle,
            updated = report.updated().len(),
            failed = report.failed().len(),
            cancelled = report.cancelled().len(),
            "price refresh complete"
        );
        let _ = self.events.send(RefreshEvent::Completed(report.clone()));

        Ok(report)
    }

    fn state(&self) -> MutexGuard<'_, CycleState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Idle -> InFlight, snapshotting every holding as pending.
    fn begin(&self, holdings: &[Holding]) -> Result<u64, RefreshError> {
        let mut state = self.state();
        if state.phase == RefreshPhase::InFlight {
            tracing::warn!(cycle = state.cycle, phase = %state.phase, "refresh rejected");
            return Err(RefreshError::AlreadyInFlight);
        }

        state.cycle += 1;
        state.updated.clear();
        state.pending = holdings
            .iter()
            .enumerate()
            .map(|(slot, holding)| (slot, holding.ticker().clone()))
            .collect();
        state.phase = if state.pending.is_empty() {
            RefreshPhase::Idle
        } else {
            RefreshPhase::InFlight
        };

        Ok(state.cycle)
    }

    fn dispatch(&self, tickers: &[String]) -> mpsc::UnboundedReceiver<LookupResult> {
        let (sender, receiver) = mpsc::unbounded_channel();

        for (slot, ticker) in tickers.iter().enumerate() {
            let sender = sender.clone();
            let lookup = Arc::clone(&self.lookup);
            let ticker = ticker.clone();
            let timeout = self.timeout;

            tokio::spawn(async move {
                let result = match tokio::time::timeout(timeout, lookup.fetch_quote(&ticker)).await
                {
                    Ok(result) => result,
                    Err(_) => Err(QuoteError::Timeout(timeout)),
                };
                // The receiver is gone once the cycle is cancelled.
                let _ = sender.send((slot, result));
            });
        }

        receiver
    }

    /// Merges one result and removes its slot from pending as a single step.
    /// Returns the number of lookups still pending, or `None` when the slot
    /// was already resolved.
    fn resolve(
        &self,
        cycle: u64,
        holdings: &mut [Holding],
        slot: usize,
        outcome: &TickerOutcome,
    ) -> Option<usize> {
        let mut state = self.state();
        if state.cycle != cycle || state.pending.remove(&slot).is_none() {
            return None;
        }

        if let TickerOutcome::Updated(quote) = outcome {
            holdings[slot].apply_quote(quote);
            state.updated.push(holdings[slot].ticker().clone());
        }

        if state.pending.is_empty() {
            state.phase = RefreshPhase::Idle;
        }

        Some(state.pending.len())
    }

    fn drain_pending(&self, cycle: u64) -> Vec<String> {
        let mut state = self.state();
        if state.cycle != cycle {
            return Vec::new();
        }
        state.phase = RefreshPhase::Idle;
        std::mem::take(&mut state.pending).into_values().collect()
    }
}

/// Returns the coordinator to Idle if the refresh future is dropped mid-cycle.
struct CycleGuard<'a> {
    state: &'a Mutex<CycleState>,
    cycle: u64,
    finished: bool,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if state.cycle == self.cycle {
            state.pending.clear();
            state.phase = RefreshPhase::Idle;
        }
    }
}
