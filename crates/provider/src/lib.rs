//! Tracker provider for application code.
//!
//! `AnalyticsProvider` builds one tracker per configuration value and reuses
//! it for as long as the same configuration is passed back, so repeated
//! renders never re-run the launch sequence. `provide` makes that tracker the
//! ambient one for a closure, and `use_analytics` reads it back from anywhere
//! on the same thread.
//!
//! # Example
//!
//! ```
//! use keiko_provider::{use_analytics, AnalyticsProvider};
//! use keiko_tracker::{InMemoryQueue, StaticHost, TrackerConfig};
//! use std::sync::Arc;
//!
//! let queue = Arc::new(InMemoryQueue::new());
//! let mut provider = AnalyticsProvider::new(
//!     Arc::new(StaticHost::new("https://x.test/", "Home")),
//!     queue.clone(),
//! );
//! let config = Arc::new(TrackerConfig::new("G-XXXXXXXXXX"));
//!
//! provider.provide(&config, || {
//!     if let Some(tracker) = use_analytics() {
//!         tracker.track_login("google");
//!     }
//! })?;
//!
//! assert_eq!(queue.events_named("login").len(), 1);
//! # Ok::<(), keiko_tracker::TrackerError>(())
//! ```

mod scope;

pub use scope::{use_analytics, AnalyticsScope};

use keiko_context::platform::{PlatformHost, PlatformQueue};
use keiko_tracker::{CommandQueueRef, HostContextRef, Result, Tracker, TrackerConfig};
use std::sync::Arc;

/// Memoizes a tracker on configuration identity.
pub struct AnalyticsProvider {
    host: HostContextRef,
    queue: CommandQueueRef,
    current: Option<(Arc<TrackerConfig>, Arc<Tracker>)>,
}

impl AnalyticsProvider {
    pub fn new(host: HostContextRef, queue: CommandQueueRef) -> Self {
        Self {
            host,
            queue,
            current: None,
        }
    }

    /// Provider bound to the current platform's host and queue.
    pub fn for_platform() -> Self {
        Self::new(Arc::new(PlatformHost {}), Arc::new(PlatformQueue {}))
    }

    /// The tracker for `config`.
    ///
    /// Returns the cached tracker when `config` is the same allocation as the
    /// previous call; any other value constructs (and launches) a new one.
    pub fn tracker(&mut self, config: &Arc<TrackerConfig>) -> Result<Arc<Tracker>> {
        if let Some((cached, tracker)) = &self.current {
            if Arc::ptr_eq(cached, config) {
                return Ok(Arc::clone(tracker));
            }
        }

        tracing::debug!(
            measurement_id = %config.measurement_id,
            "constructing tracker for new configuration"
        );
        let tracker = Arc::new(Tracker::new(
            Arc::clone(config),
            Arc::clone(&self.host),
            Arc::clone(&self.queue),
        )?);
        self.current = Some((Arc::clone(config), Arc::clone(&tracker)));
        Ok(tracker)
    }

    /// Run `f` with the tracker for `config` as the ambient tracker.
    pub fn provide<R>(&mut self, config: &Arc<TrackerConfig>, f: impl FnOnce() -> R) -> Result<R> {
        let tracker = self.tracker(config)?;
        let _scope = AnalyticsScope::enter(tracker);
        Ok(f())
    }
}
