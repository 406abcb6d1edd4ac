//! CEF (Chromium Embedded Framework) engine backend.
//!
//! Implements [`lantern_core::Engine`] on top of the `cef` crate: process
//! classification through `execute_process`, a native top-level window per
//! view, and CEF's own blocking message loop.
//!
//! # Setup
//!
//! CEF binaries must be available at runtime (`CEF_DIR`, `LD_LIBRARY_PATH`,
//! or next to the executable).  A `lantern-cef-helper` binary next to the
//! main executable is used for subprocesses when present.
//!
//! # Process model
//!
//! CEF starts helper processes (render, GPU, utility) by relaunching an
//! executable with a `--type=...` switch.  Every executable that can be
//! relaunched must call `execute_process` first and exit with its result
//! when it is non-negative.

mod app;
mod client;
pub mod discovery;
mod settings;

use std::ffi::c_int;
use std::sync::Arc;

use app::{AppBuilder, LanternApp};
use cef::args::Args;
use cef::{api_hash, sys, App, BrowserSettings, CefString, WindowInfo};
use client::ClientBuilder;
use lantern_core::{
    BrowserClient, Engine, EngineConfiguration, EngineError, LoopControl, ProcessArgs, ViewRequest,
    WindowSpec,
};

/// Stops `cef::run_message_loop`.
pub struct CefLoopControl;

impl LoopControl for CefLoopControl {
    fn quit(&self) {
        cef::quit_message_loop();
    }
}

/// CEF-backed [`Engine`].
///
/// CEF reads the real process arguments, so the [`ProcessArgs`] passed in
/// are only used for diagnostics.
pub struct CefEngine {
    args: Args,
    app: App,
    initialized: bool,
}

impl CefEngine {
    pub fn new() -> Self {
        let _ = api_hash(sys::CEF_API_VERSION_LAST, 0);
        Self { args: Args::new(), app: AppBuilder::build(LanternApp::default()), initialized: false }
    }
}

impl Default for CefEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for CefEngine {
    fn execute_process(&mut self, args: &ProcessArgs) -> Option<i32> {
        // >= 0 for subprocesses (CEF ran them), < 0 for the browser process.
        let exit_code = cef::execute_process(
            Some(self.args.as_main_args()),
            Some(&mut self.app),
            std::ptr::null_mut(),
        );
        if exit_code >= 0 {
            tracing::debug!(exit_code, kind = ?args.switch_value("type"), "CEF subprocess finished");
            Some(exit_code)
        } else {
            None
        }
    }

    fn initialize(
        &mut self,
        _args: &ProcessArgs,
        config: &EngineConfiguration,
    ) -> Result<(), EngineError> {
        let settings = settings::build_settings(config);
        self.app = AppBuilder::build(LanternApp { switches: config.extra_flags.clone() });

        let ok = cef::initialize(
            Some(self.args.as_main_args()),
            Some(&settings),
            Some(&mut self.app),
            std::ptr::null_mut(),
        );
        if ok == 0 {
            return Err(EngineError::Initialization("cef::initialize returned 0".into()));
        }

        self.initialized = true;
        tracing::info!("CEF initialised");
        Ok(())
    }

    fn create_view(
        &mut self,
        request: &ViewRequest,
        client: Arc<dyn BrowserClient>,
    ) -> Result<(), EngineError> {
        let mut client = ClientBuilder::build(client);

        let mut window_info = WindowInfo::default();
        window_info.window_name = request.window.title.as_str().into();
        let defaults = WindowSpec::default();
        window_info.bounds.width = pixels(request.window.width, defaults.width);
        window_info.bounds.height = pixels(request.window.height, defaults.height);

        let mut browser_settings = BrowserSettings::default();
        let mut url: CefString = request.url.as_str().into();

        tracing::debug!(
            "creating CEF browser ({}x{}) at {}",
            request.window.width,
            request.window.height,
            request.url
        );

        let ok = cef::browser_host_create_browser(
            Some(&mut window_info),
            Some(&mut client),
            Some(&mut url),
            Some(&mut browser_settings),
            None,
            None,
        );
        if ok == 0 {
            return Err(EngineError::ViewCreation("failed to create CEF browser".into()));
        }
        Ok(())
    }

    fn run_message_loop(&mut self) {
        cef::run_message_loop();
    }

    fn shutdown(&mut self) {
        if self.initialized {
            cef::shutdown();
            self.initialized = false;
        }
    }

    fn loop_control(&self) -> Arc<dyn LoopControl> {
        Arc::new(CefLoopControl)
    }
}

/// Window dimension as a CEF coordinate, `fallback` if it does not fit.
fn pixels(value: u32, fallback: u32) -> c_int {
    c_int::try_from(value)
        .or_else(|_| c_int::try_from(fallback))
        .unwrap_or(c_int::MAX)
}

/// Entry point for the standalone subprocess helper.  Returns the exit
/// code CEF produced, or 1 if the helper was started as a browser process.
pub fn run_helper() -> i32 {
    let _ = api_hash(sys::CEF_API_VERSION_LAST, 0);
    let args = Args::new();
    let exit_code = cef::execute_process(Some(args.as_main_args()), None, std::ptr::null_mut());
    if exit_code >= 0 { exit_code } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_dimension_uses_fallback() {
        assert_eq!(pixels(1600, 1200), 1600);
        assert_eq!(pixels(3_000_000_000, 1200), 1200);
        assert_eq!(pixels(i32::MAX as u32, 1200), c_int::MAX);
    }
}
