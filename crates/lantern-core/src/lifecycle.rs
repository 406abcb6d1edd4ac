//! Top-level view tracking and the "last view closed ⇒ quit" policy.
//!
//! Views are tracked by identity rather than by count so that closes for
//! unknown or already-removed handles cannot drive the registry negative
//! or stop the loop early.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::engine::{BrowserViewHandle, LifeSpanObserver, LoopControl};

// ── Registry ─────────────────────────────────────────────────────

/// Set of views that have been created and not yet fully closed.
#[derive(Debug, Default)]
pub struct BrowserRegistry {
    views: HashSet<BrowserViewHandle>,
}

impl BrowserRegistry {
    /// Returns `false` if the handle was already registered.
    pub fn insert(&mut self, view: BrowserViewHandle) -> bool {
        self.views.insert(view)
    }

    /// Returns `false` if the handle was not registered.
    pub fn remove(&mut self, view: BrowserViewHandle) -> bool {
        self.views.remove(&view)
    }

    pub fn contains(&self, view: BrowserViewHandle) -> bool {
        self.views.contains(&view)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

// ── Tracker ──────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct TrackerState {
    registry: BrowserRegistry,
    quit_requested: bool,
}

/// Maintains the [`BrowserRegistry`] and stops the event loop when it
/// empties.  Callbacks arrive serialised on the engine's UI thread; the
/// lock only makes the tracker shareable with the engine's handlers.
pub struct BrowserLifecycleTracker {
    state: Mutex<TrackerState>,
    loop_control: Arc<dyn LoopControl>,
}

impl BrowserLifecycleTracker {
    pub fn new(loop_control: Arc<dyn LoopControl>) -> Self {
        Self { state: Mutex::new(TrackerState::default()), loop_control }
    }

    /// Number of live views.
    pub fn open_views(&self) -> usize {
        self.state.lock().registry.len()
    }

    pub fn is_open(&self, view: BrowserViewHandle) -> bool {
        self.state.lock().registry.contains(view)
    }

    /// Whether termination has been requested for this run.
    pub fn quit_requested(&self) -> bool {
        self.state.lock().quit_requested
    }
}

impl LifeSpanObserver for BrowserLifecycleTracker {
    fn on_view_created(&self, view: BrowserViewHandle) {
        let mut state = self.state.lock();
        if state.quit_requested {
            tracing::warn!(view = %view, "view created after quit was requested; ignoring");
            return;
        }
        let inserted = state.registry.insert(view);
        debug_assert!(inserted, "view {view} registered twice");
        if !inserted {
            tracing::error!(view = %view, "duplicate view-created event");
            return;
        }
        tracing::info!(view = %view, open = state.registry.len(), "browser window created");
    }

    fn on_view_close_requested(&self, view: BrowserViewHandle) -> bool {
        tracing::debug!(view = %view, "close requested");
        true
    }

    fn on_view_closed(&self, view: BrowserViewHandle) {
        let should_quit = {
            let mut state = self.state.lock();
            if !state.registry.remove(view) {
                tracing::debug!(view = %view, "close for untracked view");
                return;
            }
            tracing::info!(view = %view, open = state.registry.len(), "browser window closing");

            if state.registry.is_empty() && !state.quit_requested {
                state.quit_requested = true;
                true
            } else {
                false
            }
        };

        if should_quit {
            tracing::info!("last browser window closed, stopping message loop");
            self.loop_control.quit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingLoop {
        quits: AtomicUsize,
    }

    impl LoopControl for CountingLoop {
        fn quit(&self) {
            self.quits.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn tracker() -> (BrowserLifecycleTracker, Arc<CountingLoop>) {
        let control = Arc::new(CountingLoop::default());
        (BrowserLifecycleTracker::new(control.clone()), control)
    }

    fn h(id: i32) -> BrowserViewHandle {
        BrowserViewHandle::new(id)
    }

    #[test]
    fn single_view_open_close_quits_once() {
        let (t, control) = tracker();
        t.on_view_created(h(1));
        assert_eq!(t.open_views(), 1);
        assert!(t.is_open(h(1)));

        t.on_view_closed(h(1));
        assert_eq!(t.open_views(), 0);
        assert!(t.quit_requested());
        assert_eq!(control.quits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn closing_one_of_two_keeps_running() {
        let (t, control) = tracker();
        t.on_view_created(h(1));
        t.on_view_created(h(2));
        t.on_view_closed(h(1));

        assert_eq!(t.open_views(), 1);
        assert!(!t.quit_requested());
        assert_eq!(control.quits.load(Ordering::SeqCst), 0);

        t.on_view_closed(h(2));
        assert_eq!(control.quits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_close_is_a_no_op() {
        let (t, control) = tracker();
        t.on_view_created(h(1));
        t.on_view_closed(h(9));
        assert_eq!(t.open_views(), 1);
        assert_eq!(control.quits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn repeated_close_does_not_quit_twice() {
        let (t, control) = tracker();
        t.on_view_created(h(1));
        t.on_view_closed(h(1));
        t.on_view_closed(h(1));
        assert_eq!(t.open_views(), 0);
        assert_eq!(control.quits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn close_on_empty_registry_does_not_quit() {
        let (t, control) = tracker();
        t.on_view_closed(h(1));
        assert!(!t.quit_requested());
        assert_eq!(control.quits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn no_mutation_after_quit() {
        let (t, control) = tracker();
        t.on_view_created(h(1));
        t.on_view_closed(h(1));
        t.on_view_created(h(2));
        assert_eq!(t.open_views(), 0);
        t.on_view_closed(h(2));
        assert_eq!(control.quits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn close_is_never_vetoed() {
        let (t, _) = tracker();
        t.on_view_created(h(1));
        assert!(t.on_view_close_requested(h(1)));
        assert!(t.on_view_close_requested(h(2)));
    }

    #[test]
    fn interleaved_sequence_matches_created_minus_closed() {
        let (t, control) = tracker();
        let events: [(bool, i32); 8] = [
            (true, 1),
            (true, 2),
            (false, 3),
            (true, 3),
            (false, 2),
            (false, 2),
            (false, 1),
            (false, 3),
        ];
        let mut open = HashSet::new();
        for (created, id) in events {
            if created {
                t.on_view_created(h(id));
                open.insert(id);
            } else {
                t.on_view_closed(h(id));
                open.remove(&id);
            }
            assert_eq!(t.open_views(), open.len());
        }
        assert_eq!(control.quits.load(Ordering::SeqCst), 1);
    }
}
