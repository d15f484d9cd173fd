//! Single-flight search coalescing.
//!
//! A [`SearchCoalescer`] sits between a text input and the search backend:
//! every keystroke may submit a query, but at most one request is ever
//! outstanding. A query submitted while a request is in flight is queued,
//! and later submissions overwrite the queued one: only the most recent
//! query during a flight is issued next.
//!
//! # Flight states
//!
//! ```text
//!              submit                submit (overwrite pending)
//!   ┌──────┐ ───────▶ ┌──────────┐ ◀──────────────┐
//!   │ Idle │          │ InFlight │ ───────────────┘
//!   └──────┘ ◀─────── └──────────┘
//!         complete,        │ complete, pending queued:
//!         no pending       ▼ re-issue immediately
//!                     (stays InFlight)
//! ```
//!
//! Completed responses render only when no follow-up query is queued; a
//! superseded response is discarded. A failed request is reported through
//! the observer and the cycle continues; failure never blocks the queued
//! query.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::backend::SearchBackend;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::events::SearchObserver;
use crate::group::{flatten_response, group_results};
use crate::models::{
    RawSearchResponse, RenderFrame, ResourceSelection, ResourceType, ResultGroup, SearchQuery,
};

/// Flight state of one coalescer: at most one request runs at a time, and
/// at most one query waits behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FlightState {
    Idle,
    InFlight { pending: Option<SearchQuery> },
}

impl FlightState {
    /// Record a submission. Returns the query to issue now, if any: an idle
    /// submission starts a request; an in-flight submission queues, with the
    /// last write winning.
    fn on_submit(&mut self, query: SearchQuery) -> Option<SearchQuery> {
        match self {
            FlightState::Idle => {
                *self = FlightState::InFlight { pending: None };
                Some(query)
            }
            FlightState::InFlight { pending } => {
                *pending = Some(query);
                None
            }
        }
    }

    /// Record a completed request. Returns the queued query to issue next,
    /// if any; with nothing queued the state returns to idle. A completion
    /// while idle is a no-op.
    fn on_complete(&mut self) -> Option<SearchQuery> {
        match self {
            FlightState::Idle => None,
            FlightState::InFlight { pending } => match pending.take() {
                Some(next) => Some(next),
                None => {
                    *self = FlightState::Idle;
                    None
                }
            },
        }
    }

    fn in_flight(&self) -> bool {
        matches!(self, FlightState::InFlight { .. })
    }
}

struct Inner {
    state: Mutex<FlightState>,
    last_results: Mutex<Vec<ResultGroup>>,
    config: SearchConfig,
    observer: Arc<dyn SearchObserver>,
}

/// Coalesces user search submissions into single-flight backend requests.
///
/// The backend, observer, and configuration are injected at construction;
/// each search surface owns its own instance and nothing is shared between
/// them. Dropping the coalescer stops its driver task.
pub struct SearchCoalescer {
    inner: Arc<Inner>,
    issue_tx: mpsc::UnboundedSender<SearchQuery>,
    driver: JoinHandle<()>,
}

impl SearchCoalescer {
    /// Spawn a coalescer over the given backend and observer.
    ///
    /// Must be called from within a tokio runtime; the driver task that
    /// executes requests is spawned here.
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        observer: Arc<dyn SearchObserver>,
        config: SearchConfig,
    ) -> Self {
        let inner = Arc::new(Inner {
            state: Mutex::new(FlightState::Idle),
            last_results: Mutex::new(Vec::new()),
            config,
            observer,
        });
        let (issue_tx, issue_rx) = mpsc::unbounded_channel();
        let driver = tokio::spawn(drive(inner.clone(), backend, issue_rx));
        Self {
            inner,
            issue_tx,
            driver,
        }
    }

    /// Submit a query. Returns immediately; never blocks, never errors.
    ///
    /// Blank queries skip the network entirely and re-render the current
    /// result set so the display stays live on a cleared input. Non-blank
    /// queries start a request when idle, or replace the queued follow-up
    /// when a request is already running.
    pub fn submit(&self, query: SearchQuery) {
        if query.is_blank() {
            let frame = self.current_frame(query.text);
            self.inner.observer.on_render(&frame);
            return;
        }

        let issue = {
            let mut state = self.inner.state.lock().unwrap();
            state.on_submit(query)
        };

        match issue {
            Some(query) => {
                // Only the Idle -> InFlight transition sends here, so the
                // driver never sees more than one queued issue.
                let _ = self.issue_tx.send(query);
            }
            None => debug!("request in flight; query queued as follow-up"),
        }
    }

    /// Forward a click on one rendered result to the observer. Pure
    /// pass-through: no state changes.
    pub fn notify_selection(
        &self,
        resource_type: ResourceType,
        id: impl Into<String>,
        text: impl Into<String>,
    ) {
        let selection = ResourceSelection {
            resource_type,
            id: id.into(),
            text: text.into(),
            icon: resource_type.icon(),
        };
        self.inner.observer.on_selection(&selection);
    }

    /// The most recently rendered result groups.
    pub fn last_results(&self) -> Vec<ResultGroup> {
        self.inner.last_results.lock().unwrap().clone()
    }

    /// Whether a request is currently outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.inner.state.lock().unwrap().in_flight()
    }

    fn current_frame(&self, query_text: String) -> RenderFrame {
        RenderFrame {
            results: self.last_results(),
            query: query_text,
            limit: self.inner.config.limit,
        }
    }
}

impl Drop for SearchCoalescer {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

/// Driver loop: executes requests serially, one flight at a time.
async fn drive(
    inner: Arc<Inner>,
    backend: Arc<dyn SearchBackend>,
    mut issue_rx: mpsc::UnboundedReceiver<SearchQuery>,
) {
    while let Some(first) = issue_rx.recv().await {
        let mut query = first;
        loop {
            let outcome = run_request(&inner, backend.as_ref(), &query).await;
            let next = {
                let mut state = inner.state.lock().unwrap();
                state.on_complete()
            };

            match outcome {
                Err(error) => {
                    warn!(query = %query.text, %error, "search request failed");
                    inner.observer.on_failure(&query, &error);
                }
                Ok(response) if next.is_none() => {
                    apply_response(&inner, &query, &response);
                }
                Ok(_) => {
                    // Superseded by a queued query; the stale response never
                    // renders.
                    debug!(query = %query.text, "discarding superseded response");
                }
            }

            match next {
                Some(follow_up) => query = follow_up,
                None => break,
            }
        }
    }
}

/// Execute one backend request, bounded by the configured timeout.
async fn run_request(
    inner: &Inner,
    backend: &dyn SearchBackend,
    query: &SearchQuery,
) -> Result<RawSearchResponse, SearchError> {
    debug!(query = %query.text, mode = %query.mode, "issuing search");
    let request = backend.search(&query.text, query.mode, &query.types, inner.config.limit);
    match inner.config.timeout_secs {
        0 => request.await,
        secs => tokio::time::timeout(Duration::from_secs(secs), request)
            .await
            .unwrap_or_else(|_| {
                Err(SearchError::Network(format!(
                    "request timed out after {} s",
                    secs
                )))
            }),
    }
}

/// Transform a completed response into render state.
///
/// An empty response keeps the previous results on screen and emits no
/// render notification, since nothing changed.
fn apply_response(inner: &Inner, query: &SearchQuery, response: &RawSearchResponse) {
    let raw = flatten_response(response);
    if raw.is_empty() {
        debug!(query = %query.text, "search returned no results; keeping previous groups");
        return;
    }

    let groups = group_results(&raw, &inner.config.types);
    {
        let mut last = inner.last_results.lock().unwrap();
        *last = groups.clone();
    }
    inner.observer.on_render(&RenderFrame {
        results: groups,
        query: query.text.clone(),
        limit: inner.config.limit,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchMode;

    fn query(text: &str) -> SearchQuery {
        SearchQuery::new(text, SearchMode::Prefix, ResourceType::CANONICAL_ORDER.to_vec())
    }

    #[test]
    fn test_idle_submit_starts_request() {
        let mut state = FlightState::Idle;
        let issued = state.on_submit(query("cat"));
        assert_eq!(issued, Some(query("cat")));
        assert!(state.in_flight());
    }

    #[test]
    fn test_in_flight_submit_queues_last_write_wins() {
        let mut state = FlightState::Idle;
        state.on_submit(query("cat"));

        assert_eq!(state.on_submit(query("catalog")), None);
        assert_eq!(state.on_submit(query("category")), None);

        // Only the most recent queued query is issued on completion.
        assert_eq!(state.on_complete(), Some(query("category")));
        assert!(state.in_flight());

        // The follow-up flight completes with nothing queued.
        assert_eq!(state.on_complete(), None);
        assert_eq!(state, FlightState::Idle);
    }

    #[test]
    fn test_complete_without_pending_returns_to_idle() {
        let mut state = FlightState::Idle;
        state.on_submit(query("cat"));
        assert_eq!(state.on_complete(), None);
        assert!(!state.in_flight());
    }

    #[test]
    fn test_complete_while_idle_is_noop() {
        let mut state = FlightState::Idle;
        assert_eq!(state.on_complete(), None);
        assert_eq!(state, FlightState::Idle);
    }

    #[test]
    fn test_pending_only_exists_while_in_flight() {
        // Every reachable state with a queued query is an in-flight state.
        let mut state = FlightState::Idle;
        state.on_submit(query("a"));
        state.on_submit(query("b"));
        assert!(state.in_flight());
        state.on_complete();
        state.on_complete();
        assert_eq!(state, FlightState::Idle);
    }
}
