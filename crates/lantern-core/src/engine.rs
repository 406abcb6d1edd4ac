//! Engine capability seam.
//!
//! The embedded browser engine is a black box that classifies processes,
//! initialises itself, creates views and pumps its own event loop.  The
//! supervisor talks to it only through [`Engine`]; the engine talks back
//! through a single [`BrowserClient`] registered at view creation.

use std::fmt;
use std::sync::Arc;

use crate::args::ProcessArgs;
use crate::config::{EngineConfiguration, WindowSpec};
use crate::error::EngineError;

// ── Identities ───────────────────────────────────────────────────

/// Identity of one top-level browser view, as assigned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BrowserViewHandle(i32);

impl BrowserViewHandle {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn id(self) -> i32 {
        self.0
    }
}

impl fmt::Display for BrowserViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Frame a load callback refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInfo {
    pub is_main: bool,
    pub url: String,
}

/// Engine network error code (negative for net errors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadErrorCode(pub i32);

impl fmt::Display for LoadErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Observers ────────────────────────────────────────────────────

/// Top-level view lifecycle callbacks.
pub trait LifeSpanObserver: Send + Sync {
    /// A view finished creation and is now live.
    fn on_view_created(&self, view: BrowserViewHandle);

    /// A close was requested.  Returning `true` lets it proceed.
    fn on_view_close_requested(&self, _view: BrowserViewHandle) -> bool {
        true
    }

    /// The view completed its close sequence.
    fn on_view_closed(&self, view: BrowserViewHandle);
}

/// Navigation completion callbacks.  Observers must not influence the
/// lifecycle or the event loop.
pub trait LoadObserver: Send + Sync {
    fn on_load_finished(&self, view: BrowserViewHandle, frame: &FrameInfo, http_status: i32);

    fn on_load_failed(
        &self,
        view: BrowserViewHandle,
        frame: &FrameInfo,
        error_code: LoadErrorCode,
        error_text: &str,
        failed_url: &str,
    );
}

/// The object registered with the engine for a view.  Capabilities are
/// looked up individually; `None` means the engine uses its defaults.
pub trait BrowserClient: Send + Sync {
    fn life_span_observer(&self) -> Option<&dyn LifeSpanObserver> {
        None
    }

    fn load_observer(&self) -> Option<&dyn LoadObserver> {
        None
    }
}

/// Requests termination of a running event loop.  Called from the engine's
/// callback context.
pub trait LoopControl: Send + Sync {
    fn quit(&self);
}

// ── Engine ───────────────────────────────────────────────────────

/// A top-level view to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRequest {
    /// Document to load, already rendered as a URL.
    pub url: String,
    pub window: WindowSpec,
}

/// Capabilities the supervisor needs from the embedded engine.
pub trait Engine {
    /// Run the engine's subprocess entry point.  Returns the exit code when
    /// this instance is a helper process, `None` for the primary process.
    fn execute_process(&mut self, args: &ProcessArgs) -> Option<i32>;

    fn initialize(
        &mut self,
        args: &ProcessArgs,
        config: &EngineConfiguration,
    ) -> Result<(), EngineError>;

    /// Request creation of a top-level view.  The view's handle arrives
    /// later through the client's life-span observer.
    fn create_view(
        &mut self,
        request: &ViewRequest,
        client: Arc<dyn BrowserClient>,
    ) -> Result<(), EngineError>;

    /// Block, delivering callbacks, until [`LoopControl::quit`] is called.
    fn run_message_loop(&mut self);

    fn shutdown(&mut self);

    /// Handle used to stop [`run_message_loop`](Engine::run_message_loop).
    fn loop_control(&self) -> Arc<dyn LoopControl>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;
    impl BrowserClient for Bare {}

    #[test]
    fn handles_compare_by_identity() {
        assert_eq!(BrowserViewHandle::new(3), BrowserViewHandle::new(3));
        assert_ne!(BrowserViewHandle::new(3), BrowserViewHandle::new(4));
        assert_eq!(BrowserViewHandle::new(7).to_string(), "#7");
    }

    #[test]
    fn client_capabilities_default_to_none() {
        let client = Bare;
        assert!(client.life_span_observer().is_none());
        assert!(client.load_observer().is_none());
    }
}
