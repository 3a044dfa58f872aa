//! Fetch/refresh state machine of a report page.
//!
//! `Idle -> Loading -> (Success | Error)`. A refresh fires every provider of
//! the page at once; the [`FetchBatch`] joins the responses and fails fast on
//! the first error. Each refresh gets a [`RefreshTicket`]; outcomes carrying
//! an outdated ticket are dropped.

use chrono::{DateTime, Utc};

use super::value::Row;

/// Banner text shown for any provider failure
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load data";

/// Parsed body of one provider response
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    List(Vec<Row>),
    Single(Row),
}

impl Payload {
    pub fn rows(&self) -> &[Row] {
        match self {
            Payload::List(rows) => rows,
            Payload::Single(row) => std::slice::from_ref(row),
        }
    }

    pub fn single(&self) -> Option<&Row> {
        match self {
            Payload::Single(row) => Some(row),
            Payload::List(rows) => rows.first(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// Every request succeeded; payloads in request order
    Complete(Vec<Payload>),
    /// First failure, with its detail for logging
    Failed(String),
}

/// Join point for the concurrent requests of one refresh
#[derive(Debug)]
pub struct FetchBatch {
    slots: Vec<Option<Payload>>,
    finished: bool,
}

impl FetchBatch {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Records the response of request `index`.
    ///
    /// Returns the outcome exactly once: on the first error, or when the last
    /// outstanding request succeeds. Later calls return `None`.
    pub fn settle(&mut self, index: usize, result: Result<Payload, String>) -> Option<BatchOutcome> {
        if self.finished {
            return None;
        }
        match result {
            Err(e) => {
                self.finished = true;
                Some(BatchOutcome::Failed(e))
            }
            Ok(payload) => {
                let slot = self.slots.get_mut(index)?;
                *slot = Some(payload);
                if self.slots.iter().all(Option::is_some) {
                    self.finished = true;
                    let payloads = self.slots.iter_mut().filter_map(Option::take).collect();
                    Some(BatchOutcome::Complete(payloads))
                } else {
                    None
                }
            }
        }
    }
}

/// Ephemeral per-visit state of a report page
#[derive(Debug, Clone, Default)]
pub struct PageState {
    phase: LoadPhase,
    datasets: Vec<Payload>,
    last_updated: Option<DateTime<Utc>>,
    generation: u64,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters `Loading`. Current datasets stay visible until the outcome lands.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.generation += 1;
        self.phase = LoadPhase::Loading;
        RefreshTicket(self.generation)
    }

    /// Applies a batch outcome. Returns `false` when the ticket belongs to a
    /// superseded refresh and the outcome was discarded.
    pub fn finish(&mut self, ticket: RefreshTicket, outcome: BatchOutcome, now: DateTime<Utc>) -> bool {
        if ticket.0 != self.generation || self.phase != LoadPhase::Loading {
            return false;
        }
        match outcome {
            BatchOutcome::Complete(payloads) => {
                self.datasets = payloads;
                self.last_updated = Some(now);
                self.phase = LoadPhase::Success;
            }
            BatchOutcome::Failed(_) => {
                self.datasets.clear();
                self.phase = LoadPhase::Error(LOAD_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Error(message) => Some(message),
            _ => None,
        }
    }

    /// `true` once a refresh has succeeded and until an error clears it
    pub fn has_data(&self) -> bool {
        !self.datasets.is_empty()
    }

    pub fn dataset(&self, index: usize) -> Option<&Payload> {
        self.datasets.get(index)
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn list(skus: &[&str]) -> Payload {
        Payload::List(skus.iter().map(|s| Row::from_pairs([("SKU", *s)])).collect())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_batch_joins_in_request_order() {
        let mut batch = FetchBatch::new(3);
        assert_eq!(batch.settle(2, Ok(list(&["c"]))), None);
        assert_eq!(batch.settle(0, Ok(list(&["a"]))), None);
        let outcome = batch.settle(1, Ok(list(&["b"])));
        assert_eq!(
            outcome,
            Some(BatchOutcome::Complete(vec![list(&["a"]), list(&["b"]), list(&["c"])]))
        );
        assert!(batch.is_finished());
    }

    #[test]
    fn test_batch_fails_fast_and_ignores_late_results() {
        let mut batch = FetchBatch::new(3);
        assert_eq!(batch.settle(0, Ok(list(&["a"]))), None);
        assert_eq!(
            batch.settle(1, Err("HTTP 500".into())),
            Some(BatchOutcome::Failed("HTTP 500".into()))
        );
        assert_eq!(batch.settle(2, Ok(list(&["c"]))), None);
        assert_eq!(batch.settle(2, Err("late".into())), None);
    }

    #[test]
    fn test_success_replaces_datasets_and_stamps_time() {
        let mut state = PageState::new();
        assert_eq!(state.phase(), &LoadPhase::Idle);

        let ticket = state.begin_refresh();
        assert!(state.is_loading());
        assert!(state.finish(ticket, BatchOutcome::Complete(vec![list(&["a"])]), now()));

        assert_eq!(state.phase(), &LoadPhase::Success);
        assert_eq!(state.dataset(0), Some(&list(&["a"])));
        assert_eq!(state.last_updated(), Some(now()));
    }

    #[test]
    fn test_error_discards_prior_data() {
        let mut state = PageState::new();
        let first = state.begin_refresh();
        state.finish(first, BatchOutcome::Complete(vec![list(&["a"])]), now());

        let second = state.begin_refresh();
        // previous rows remain visible while loading
        assert_eq!(state.dataset(0), Some(&list(&["a"])));
        state.finish(second, BatchOutcome::Failed("timeout".into()), now());

        assert_eq!(state.error(), Some(LOAD_ERROR_MESSAGE));
        assert_eq!(state.dataset(0), None);
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut state = PageState::new();
        let stale = state.begin_refresh();
        let current = state.begin_refresh();

        assert!(!state.finish(stale, BatchOutcome::Complete(vec![list(&["old"])]), now()));
        assert!(state.is_loading());

        assert!(state.finish(current, BatchOutcome::Complete(vec![list(&["new"])]), now()));
        assert_eq!(state.dataset(0), Some(&list(&["new"])));
    }

    #[test]
    fn test_single_payload_accessors() {
        let summary = Payload::Single(Row::from_pairs([("TotalSKUs", 4)]));
        assert_eq!(summary.rows().len(), 1);
        assert!(summary.single().is_some());
        assert!(list(&[]).single().is_none());
    }
}
