//! Lantern Core — supervision layer for an embedded browser engine.
//!
//! Decides whether the running process is the primary browser process or
//! an engine helper, builds the engine's startup configuration, tracks the
//! open top-level views and stops the event loop once the last one closes.
//! The engine itself sits behind the [`Engine`] trait, so nothing here
//! depends on CEF.

pub mod args;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod load;
pub mod role;
pub mod supervisor;

#[cfg(test)]
mod test_log;

// Re-exports for convenience.
pub use args::ProcessArgs;
pub use client::SupervisorClient;
pub use config::{
    EngineConfiguration, Environment, InitialDocument, LogVerbosity, RuntimeConfigurator,
    SystemEnvironment, WindowSpec,
};
pub use engine::{
    BrowserClient, BrowserViewHandle, Engine, FrameInfo, LifeSpanObserver, LoadErrorCode,
    LoadObserver, LoopControl, ViewRequest,
};
pub use error::{EngineError, SupervisorError};
pub use lifecycle::{BrowserLifecycleTracker, BrowserRegistry};
pub use load::{LoadEvent, LoadEventReporter};
pub use role::{ProcessRole, ProcessRoleDispatcher};
pub use supervisor::ApplicationSupervisor;
