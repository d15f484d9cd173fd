//! # Quicksearch
//!
//! Client-side search glue for a web data-management platform.
//!
//! Quicksearch accepts a stream of user-issued search queries (typically one
//! per keystroke), guarantees at most one outstanding request against the
//! platform's REST search endpoint, coalesces queries submitted while a
//! request is in flight (last write wins), and produces grouped, typed
//! result sets for display.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐  submit   ┌───────────────┐  search   ┌────────────┐
//! │ text input │──────────▶│SearchCoalescer│──────────▶│SearchBackend│
//! └────────────┘           │  single-flight │◀──────────│ (HTTP/mem) │
//!                          └───────┬───────┘  response  └────────────┘
//!                                  │ on_render / on_failure / on_selection
//!                                  ▼
//!                          ┌───────────────┐
//!                          │SearchObserver │ (render + navigation surfaces)
//!                          └───────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use quicksearch::backend::http::HttpSearchBackend;
//! use quicksearch::coalescer::SearchCoalescer;
//! use quicksearch::config::{HttpConfig, SearchConfig};
//! use quicksearch::events::EventChannel;
//!
//! # fn main() -> Result<(), quicksearch::error::SearchError> {
//! # let rt = tokio::runtime::Runtime::new().unwrap();
//! # rt.block_on(async {
//! let backend = Arc::new(HttpSearchBackend::new(&HttpConfig {
//!     base_url: "https://data.example.org/api/v1".to_string(),
//!     timeout_secs: 30,
//!     token: None,
//! })?);
//! let (observer, mut events) = EventChannel::new();
//! let config = SearchConfig::default();
//!
//! let coalescer = SearchCoalescer::new(backend, Arc::new(observer), config.clone());
//! coalescer.submit(config.query("cat"));
//! coalescer.submit(config.query("catalog")); // coalesced behind the flight
//! # Ok::<(), quicksearch::error::SearchError>(())
//! # })
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Core data types |
//! | [`config`] | TOML configuration parsing |
//! | [`backend`] | Search endpoint abstraction (HTTP, in-memory) |
//! | [`coalescer`] | Single-flight coalescing state machine and driver |
//! | [`group`] | Result flattening and grouping |
//! | [`events`] | Observer interface and event channel |
//! | [`error`] | Error taxonomy |

pub mod backend;
pub mod coalescer;
pub mod config;
pub mod error;
pub mod events;
pub mod group;
pub mod models;
