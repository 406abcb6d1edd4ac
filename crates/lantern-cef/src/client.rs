//! CEF client and handlers forwarding to a [`BrowserClient`].
//!
//! The client hands out a life-span handler and a load handler only when
//! the wrapped [`BrowserClient`] exposes the matching capability.

use std::ffi::c_int;
use std::sync::Arc;

use cef::rc::Rc;
use cef::{
    sys, wrap_client, wrap_life_span_handler, wrap_load_handler, Browser, CefString, Client,
    Errorcode, Frame, ImplBrowser, ImplClient, ImplFrame, ImplLifeSpanHandler, ImplLoadHandler,
    LifeSpanHandler, LoadHandler, WrapClient, WrapLifeSpanHandler, WrapLoadHandler,
};
use lantern_core::{BrowserClient, BrowserViewHandle, FrameInfo, LoadErrorCode};

/// Shared reference to the supervisor's client, cloned into each handler.
#[derive(Clone)]
pub(crate) struct ClientBridge {
    pub client: Arc<dyn BrowserClient>,
}

fn view_handle(browser: Option<&mut Browser>) -> Option<BrowserViewHandle> {
    browser.map(|b| BrowserViewHandle::new(b.identifier()))
}

fn frame_info(frame: Option<&mut Frame>) -> FrameInfo {
    match frame {
        Some(frame) => FrameInfo {
            is_main: frame.is_main() != 0,
            url: CefString::from(&frame.url()).to_string(),
        },
        None => FrameInfo::default(),
    }
}

fn cef_string(value: Option<&CefString>) -> String {
    value.map(|s| s.to_string()).unwrap_or_default()
}

// ── Life span handler ────────────────────────────────────────────

wrap_life_span_handler! {
    pub(crate) struct LifeSpanHandlerBuilder {
        bridge: ClientBridge,
    }

    impl LifeSpanHandler {
        fn on_after_created(&self, browser: Option<&mut Browser>) {
            let Some(view) = view_handle(browser) else { return };
            if let Some(observer) = self.bridge.client.life_span_observer() {
                observer.on_view_created(view);
            }
        }

        fn do_close(&self, browser: Option<&mut Browser>) -> c_int {
            let Some(view) = view_handle(browser) else { return 0 };
            let allow = self
                .bridge
                .client
                .life_span_observer()
                .map(|o| o.on_view_close_requested(view))
                .unwrap_or(true);
            // 0 lets CEF continue the standard close sequence.
            if allow { 0 } else { 1 }
        }

        fn on_before_close(&self, browser: Option<&mut Browser>) {
            let Some(view) = view_handle(browser) else { return };
            if let Some(observer) = self.bridge.client.life_span_observer() {
                observer.on_view_closed(view);
            }
        }
    }
}

impl LifeSpanHandlerBuilder {
    pub fn build(bridge: ClientBridge) -> LifeSpanHandler {
        Self::new(bridge)
    }
}

// ── Load handler ─────────────────────────────────────────────────

wrap_load_handler! {
    pub(crate) struct LoadHandlerBuilder {
        bridge: ClientBridge,
    }

    impl LoadHandler {
        fn on_load_end(
            &self,
            browser: Option<&mut Browser>,
            frame: Option<&mut Frame>,
            http_status_code: c_int,
        ) {
            let Some(view) = view_handle(browser) else { return };
            let Some(observer) = self.bridge.client.load_observer() else { return };
            observer.on_load_finished(view, &frame_info(frame), http_status_code);
        }

        fn on_load_error(
            &self,
            browser: Option<&mut Browser>,
            frame: Option<&mut Frame>,
            error_code: Errorcode,
            error_text: Option<&CefString>,
            failed_url: Option<&CefString>,
        ) {
            let Some(view) = view_handle(browser) else { return };
            let Some(observer) = self.bridge.client.load_observer() else { return };
            let code = LoadErrorCode(sys::cef_errorcode_t::from(error_code) as i32);
            observer.on_load_failed(
                view,
                &frame_info(frame),
                code,
                &cef_string(error_text),
                &cef_string(failed_url),
            );
        }
    }
}

impl LoadHandlerBuilder {
    pub fn build(bridge: ClientBridge) -> LoadHandler {
        Self::new(bridge)
    }
}

// ── Client ───────────────────────────────────────────────────────

wrap_client! {
    pub(crate) struct ClientBuilder {
        life_span_handler: Option<LifeSpanHandler>,
        load_handler: Option<LoadHandler>,
    }

    impl Client {
        fn life_span_handler(&self) -> Option<cef::LifeSpanHandler> {
            self.life_span_handler.clone()
        }

        fn load_handler(&self) -> Option<cef::LoadHandler> {
            self.load_handler.clone()
        }
    }
}

impl ClientBuilder {
    pub fn build(client: Arc<dyn BrowserClient>) -> Client {
        let bridge = ClientBridge { client };
        let life_span = bridge
            .client
            .life_span_observer()
            .is_some()
            .then(|| LifeSpanHandlerBuilder::build(bridge.clone()));
        let load = bridge
            .client
            .load_observer()
            .is_some()
            .then(|| LoadHandlerBuilder::build(bridge.clone()));
        Self::new(life_span, load)
    }
}
