//! Ambient tracker scope.

use keiko_tracker::Tracker;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(0);

thread_local! {
    /// Trackers provided on this thread with the scope that provided them,
    /// innermost last.
    static ACTIVE_TRACKERS: RefCell<Vec<(u64, Arc<Tracker>)>> =
        const { RefCell::new(Vec::new()) };
}

/// The innermost provided tracker, or `None` outside any scope.
pub fn use_analytics() -> Option<Arc<Tracker>> {
    ACTIVE_TRACKERS.with(|stack| stack.borrow().last().map(|(_, tracker)| tracker.clone()))
}

/// Guard keeping a tracker ambient until dropped.
///
/// Scopes nest; dropping one removes only the tracker it provided, so
/// guards may be dropped in any order. Not `Send`: the scope belongs to the
/// thread that entered it.
pub struct AnalyticsScope {
    id: u64,
    _thread_bound: PhantomData<*const ()>,
}

impl AnalyticsScope {
    pub fn enter(tracker: Arc<Tracker>) -> Self {
        let id = NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed);
        ACTIVE_TRACKERS.with(|stack| stack.borrow_mut().push((id, tracker)));
        Self {
            id,
            _thread_bound: PhantomData,
        }
    }
}

impl Drop for AnalyticsScope {
    fn drop(&mut self) {
        ACTIVE_TRACKERS.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(index) = stack.iter().rposition(|(id, _)| *id == self.id) {
                stack.remove(index);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keiko_tracker::{InMemoryQueue, StaticHost, TrackerConfig};

    fn tracker(id: &str) -> Arc<Tracker> {
        Arc::new(
            Tracker::new(
                TrackerConfig::new(id),
                Arc::new(StaticHost::new("https://x.test/", "Home")),
                Arc::new(InMemoryQueue::new()),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_nothing_outside_scope() {
        assert!(use_analytics().is_none());
    }

    #[test]
    fn test_nested_scopes() {
        let outer = AnalyticsScope::enter(tracker("G-OUTER1"));
        assert_eq!(use_analytics().unwrap().measurement_id(), "G-OUTER1");

        {
            let _inner = AnalyticsScope::enter(tracker("G-INNER1"));
            assert_eq!(use_analytics().unwrap().measurement_id(), "G-INNER1");
        }

        assert_eq!(use_analytics().unwrap().measurement_id(), "G-OUTER1");
        drop(outer);
        assert!(use_analytics().is_none());
    }

    #[test]
    fn test_out_of_order_drop_keeps_inner_tracker() {
        let outer = AnalyticsScope::enter(tracker("G-OUTER1"));
        let inner = AnalyticsScope::enter(tracker("G-INNER1"));

        drop(outer);
        assert_eq!(use_analytics().unwrap().measurement_id(), "G-INNER1");

        drop(inner);
        assert!(use_analytics().is_none());
    }

    #[test]
    fn test_scope_is_thread_local() {
        let _scope = AnalyticsScope::enter(tracker("G-MAIN1"));
        let seen = std::thread::spawn(|| use_analytics().is_some())
            .join()
            .unwrap();
        assert!(!seen);
    }
}
