//! Observer interface for coalescer notifications.
//!
//! The coalescer takes exactly one [`SearchObserver`] at construction
//! (explicit registration instead of an ambient event bus) and fires one
//! notification per event: a render request, a failed cycle, or a resource
//! selection.
//!
//! Consumers that prefer a message stream over callbacks can use
//! [`EventChannel`], which forwards each notification as a [`SearchEvent`]
//! into an unbounded channel.

use tokio::sync::mpsc;

use crate::error::SearchError;
use crate::models::{RenderFrame, ResourceSelection, SearchQuery};

/// Receives coalescer notifications. All methods default to no-ops so
/// observers implement only what they consume.
pub trait SearchObserver: Send + Sync {
    /// A result set is ready for display (or a blank submission asked for a
    /// re-render of the current one).
    fn on_render(&self, frame: &RenderFrame) {
        let _ = frame;
    }

    /// A search cycle failed. The coalescer keeps running and any queued
    /// query is still issued.
    fn on_failure(&self, query: &SearchQuery, error: &SearchError) {
        let _ = (query, error);
    }

    /// The user selected one rendered resource.
    fn on_selection(&self, selection: &ResourceSelection) {
        let _ = selection;
    }
}

/// Observer that ignores every notification.
impl SearchObserver for () {}

/// A coalescer notification in message form, as forwarded by
/// [`EventChannel`].
#[derive(Debug, Clone)]
pub enum SearchEvent {
    Render(RenderFrame),
    Failure {
        query: SearchQuery,
        error: SearchError,
    },
    Selection(ResourceSelection),
}

/// Forwards every notification into an unbounded channel.
///
/// Dropped receivers are tolerated: a failed send is ignored, matching the
/// observer contract that notification delivery never errors.
pub struct EventChannel {
    tx: mpsc::UnboundedSender<SearchEvent>,
}

impl EventChannel {
    /// Create a channel-backed observer and its receiving half.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SearchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl SearchObserver for EventChannel {
    fn on_render(&self, frame: &RenderFrame) {
        let _ = self.tx.send(SearchEvent::Render(frame.clone()));
    }

    fn on_failure(&self, query: &SearchQuery, error: &SearchError) {
        let _ = self.tx.send(SearchEvent::Failure {
            query: query.clone(),
            error: error.clone(),
        });
    }

    fn on_selection(&self, selection: &ResourceSelection) {
        let _ = self.tx.send(SearchEvent::Selection(selection.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResourceType, SearchMode};

    #[test]
    fn test_channel_forwards_events_in_order() {
        let (observer, mut rx) = EventChannel::new();

        observer.on_render(&RenderFrame {
            results: Vec::new(),
            query: "cat".to_string(),
            limit: 10,
        });
        observer.on_failure(
            &SearchQuery::new("dog", SearchMode::Prefix, vec![ResourceType::Item]),
            &SearchError::Network("boom".to_string()),
        );
        observer.on_selection(&ResourceSelection {
            resource_type: ResourceType::Folder,
            id: "f1".to_string(),
            text: "Reports".to_string(),
            icon: ResourceType::Folder.icon(),
        });

        assert!(matches!(rx.try_recv().unwrap(), SearchEvent::Render(_)));
        assert!(matches!(rx.try_recv().unwrap(), SearchEvent::Failure { .. }));
        assert!(matches!(rx.try_recv().unwrap(), SearchEvent::Selection(_)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_tolerated() {
        let (observer, rx) = EventChannel::new();
        drop(rx);
        observer.on_render(&RenderFrame {
            results: Vec::new(),
            query: String::new(),
            limit: 10,
        });
    }
}
