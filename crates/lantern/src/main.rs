//! Lantern — a single-window Chromium shell.
//!
//! The same executable serves as the browser process and, when no helper
//! binary is installed, as every CEF subprocess.  Flags: `--enable-gpu`
//! opts into hardware acceleration (needs signed helpers), `--debug`
//! enables verbose engine and console logging.  Anything else is passed to
//! Chromium untouched.

mod logging;

use lantern_cef::CefEngine;
use lantern_core::args::DEBUG_SWITCH;
use lantern_core::{ApplicationSupervisor, ProcessArgs};

fn main() {
    let args = ProcessArgs::from_env();
    logging::init(args.has_switch(DEBUG_SWITCH));

    let mut supervisor = ApplicationSupervisor::new(CefEngine::new());
    let exit_code = supervisor.run(&args);
    tracing::debug!(exit_code, "exiting");
    std::process::exit(exit_code);
}
