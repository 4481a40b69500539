//! Last-fetch-wins request sequencing
//!
//! Every new (kind, span) selection takes a fresh token. Fetches run on
//! background threads and report back over a channel; results carrying an
//! older token are dropped. Nothing is ever cancelled.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::calendar::GridSpan;
use crate::services::calendar_client::{fetch_span, DayRecordStore};
use crate::types::{CalendarKind, DayRecord};

/// Monotonic request id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Hands out tokens and remembers the newest one
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier one
    pub fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

/// What the calendar is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarQuery {
    pub kind: CalendarKind,
    pub span: GridSpan,
}

/// A finished fetch
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub token: RequestToken,
    pub query: CalendarQuery,
    pub records: Vec<DayRecord>,
}

/// Background loader applying the last-fetch-wins rule
pub struct CalendarLoader {
    store: Arc<dyn DayRecordStore>,
    sequencer: RequestSequencer,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl CalendarLoader {
    pub fn new(store: Arc<dyn DayRecordStore>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            store,
            sequencer: RequestSequencer::new(),
            tx,
            rx,
        }
    }

    /// Start fetching `query` on a background thread
    pub fn request(&mut self, query: CalendarQuery) -> RequestToken {
        let token = self.sequencer.begin();
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let records = fetch_span(store.as_ref(), query.kind, query.span);
            // Receiver gone means the app has exited
            let _ = tx.send(FetchOutcome {
                token,
                query,
                records,
            });
        });
        token
    }

    /// Non-blocking: the newest current outcome, if one has arrived
    pub fn poll(&mut self) -> Option<FetchOutcome> {
        let mut current = None;
        while let Ok(outcome) = self.rx.try_recv() {
            if self.sequencer.is_current(outcome.token) {
                current = Some(outcome);
            } else {
                tracing::debug!(
                    kind = outcome.query.kind.as_str(),
                    span = %outcome.query.span.label(),
                    "discarding stale calendar response"
                );
            }
        }
        current
    }
}
