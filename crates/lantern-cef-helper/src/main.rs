//! CEF subprocess helper binary.
//!
//! CEF spawns render, GPU and utility processes by relaunching an
//! executable with a `--type=...` switch.  Without this helper it relaunches
//! `lantern` itself; with it, subprocesses skip the supervisor's logging
//! and configuration entirely.

fn main() {
    std::process::exit(lantern_cef::run_helper());
}
