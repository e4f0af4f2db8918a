//! Local-development introspection surface.
//!
//! Not part of the production contract: the exported function returns
//! `null` unless the page is served from a local development host.

use wasm_bindgen::prelude::*;

use crate::bootstrap;

fn is_dev_host() -> bool {
    web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .map(|host| host == "localhost" || host == "127.0.0.1")
        .unwrap_or(false)
}

pub(crate) fn announce_if_dev_host() {
    if is_dev_host() {
        log::debug!("site-header: snapshot available via headerDebugState()");
    }
}

/// Read-only `{ is_open, last_scroll_y, threshold }` snapshot for the
/// browser console.
#[wasm_bindgen(js_name = headerDebugState)]
pub fn header_debug_state() -> JsValue {
    if !is_dev_host() {
        return JsValue::NULL;
    }
    bootstrap::with_instance(|controller| controller.snapshot())
        .and_then(|snapshot| serde_wasm_bindgen::to_value(&snapshot).ok())
        .unwrap_or(JsValue::NULL)
}

/// Drives the burger toggle from the console.
#[wasm_bindgen(js_name = headerDebugToggle)]
pub fn header_debug_toggle() {
    if !is_dev_host() {
        return;
    }
    bootstrap::with_instance(|controller| controller.toggle());
}
