//! Navigation diagnostics.  Every frame is reported the same way; main
//! and sub-frames are not distinguished.

use std::fmt;

use crate::engine::{BrowserViewHandle, FrameInfo, LoadErrorCode, LoadObserver};

/// One diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    Finished {
        view: BrowserViewHandle,
        http_status: i32,
        url: String,
    },
    Failed {
        view: BrowserViewHandle,
        error_code: LoadErrorCode,
        error_text: String,
        url: String,
    },
}

impl fmt::Display for LoadEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadEvent::Finished { view, http_status, url } => {
                write!(f, "view {view}: page loaded (status {http_status}) {url}")
            }
            LoadEvent::Failed { view, error_code, error_text, url } => {
                write!(f, "view {view}: load error {error_code} {error_text} (url: {url})")
            }
        }
    }
}

/// Stateless observer that logs load completions and failures.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoadEventReporter;

impl LoadEventReporter {
    pub fn report(&self, event: &LoadEvent) {
        match event {
            LoadEvent::Finished { view, http_status, url } => {
                tracing::info!(view = %view, status = *http_status, url = %url, "{event}");
            }
            LoadEvent::Failed { view, error_code, url, .. } => {
                tracing::warn!(view = %view, code = error_code.0, url = %url, "{event}");
            }
        }
    }
}

impl LoadObserver for LoadEventReporter {
    fn on_load_finished(&self, view: BrowserViewHandle, frame: &FrameInfo, http_status: i32) {
        self.report(&LoadEvent::Finished { view, http_status, url: frame.url.clone() });
    }

    fn on_load_failed(
        &self,
        view: BrowserViewHandle,
        _frame: &FrameInfo,
        error_code: LoadErrorCode,
        error_text: &str,
        failed_url: &str,
    ) {
        self.report(&LoadEvent::Failed {
            view,
            error_code,
            error_text: error_text.into(),
            url: failed_url.into(),
        });
    }
}
