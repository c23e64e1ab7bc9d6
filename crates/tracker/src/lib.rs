//! Google Analytics 4 tracker for keiko.
//!
//! The tracker validates its configuration, queues the `js`/`config`
//! bootstrap commands on a fresh queue, injects the `gtag.js` loader, and
//! shapes page view, login and custom events into queue commands.
//!
//! # Example
//!
//! ```
//! use keiko_tracker::{InMemoryQueue, PageViewParams, StaticHost, Tracker, TrackerConfig};
//! use std::sync::Arc;
//!
//! let queue = Arc::new(InMemoryQueue::new());
//! let host = Arc::new(StaticHost::new("https://x.test/", "Home"));
//! let tracker = Tracker::new(TrackerConfig::new("G-XXXXXXXXXX"), host, queue.clone())?;
//!
//! tracker
//!     .track_page_view(PageViewParams::new())
//!     .track_login("google");
//!
//! assert_eq!(queue.events_named("login").len(), 1);
//! # Ok::<(), keiko_tracker::TrackerError>(())
//! ```

mod config;
mod error;
mod page_view;
mod tracker;

pub use config::{is_ga4_measurement_id, TrackerConfig, UrlTransformer};
pub use error::{Result, TrackerError};
pub use page_view::PageViewParams;
pub use tracker::Tracker;

// Re-export the command and host types the tracker API is expressed in
pub use keiko_context::{HostContext, HostContextRef, NullHost, ScriptTag, StaticHost};
pub use keiko_events::{Command, CommandQueue, CommandQueueRef, EventParams, InMemoryQueue};
