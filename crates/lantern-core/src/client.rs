//! The client object registered with the engine for every view.

use std::sync::Arc;

use crate::engine::{BrowserClient, LifeSpanObserver, LoadObserver, LoopControl};
use crate::lifecycle::BrowserLifecycleTracker;
use crate::load::LoadEventReporter;

/// Exposes the lifecycle tracker and the load reporter to the engine.
pub struct SupervisorClient {
    lifecycle: BrowserLifecycleTracker,
    load: LoadEventReporter,
}

impl SupervisorClient {
    pub fn new(loop_control: Arc<dyn LoopControl>) -> Self {
        Self { lifecycle: BrowserLifecycleTracker::new(loop_control), load: LoadEventReporter }
    }

    pub fn lifecycle(&self) -> &BrowserLifecycleTracker {
        &self.lifecycle
    }
}

impl BrowserClient for SupervisorClient {
    fn life_span_observer(&self) -> Option<&dyn LifeSpanObserver> {
        Some(&self.lifecycle)
    }

    fn load_observer(&self) -> Option<&dyn LoadObserver> {
        Some(&self.load)
    }
}
