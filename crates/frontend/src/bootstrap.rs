//! Safe installation of the header widget.
//!
//! One controller per page, owned by a thread-local handle at this
//! outermost boundary only; the widget's internal logic never reaches for
//! ambient globals. A previous instance is disposed before a new one is
//! installed, and a window `error` listener re-attempts initialization
//! once after a delay when a widget failure is reported while no instance
//! is alive.

use std::cell::{Cell, RefCell};

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::ErrorEvent;

use crate::widget::{HeaderController, InitError};
use crate::{assets, debug, zoom};

thread_local! {
    static INSTANCE: RefCell<Option<HeaderController>> = const { RefCell::new(None) };
    static RECOVERY_INSTALLED: Cell<bool> = const { Cell::new(false) };
    static SIBLINGS_INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Images the page wants before first paint.
const CRITICAL_IMAGES: &[&str] = &["/static/img/logo.svg"];

const RECOVERY_DELAY_MS: u32 = 1000;

/// Initializes the widget and its sibling utilities. Skipped entirely
/// when the host has no window/document.
pub fn init() {
    if web_sys::window().and_then(|w| w.document()).is_none() {
        log::error!("{}", InitError::EnvironmentUnsupported);
        return;
    }
    install();
    install_error_recovery();
}

fn install() {
    // a previous instance must release its listeners first
    dispose();
    match HeaderController::new() {
        Ok(controller) => {
            INSTANCE.with(|slot| *slot.borrow_mut() = Some(controller));
            // the sibling utilities hold page-lifetime listeners and head
            // links; a reinstalled controller must not duplicate them
            if !SIBLINGS_INSTALLED.with(|flag| flag.replace(true)) {
                zoom::install_zoom_guard();
                assets::preload_critical_images(CRITICAL_IMAGES);
                assets::observe_lazy_images();
                debug::announce_if_dev_host();
            }
            log::info!("site-header: initialized");
        }
        Err(err) => log::error!("{err}"),
    }
}

/// Disposes the current instance, if any. Idempotent.
pub fn dispose() {
    INSTANCE.with(|slot| {
        if let Some(controller) = slot.borrow_mut().take() {
            controller.dispose();
        }
    });
}

pub fn is_installed() -> bool {
    INSTANCE.with(|slot| slot.borrow().is_some())
}

pub fn with_instance<R>(f: impl FnOnce(&HeaderController) -> R) -> Option<R> {
    INSTANCE.with(|slot| slot.borrow().as_ref().map(f))
}

/// Watches for runtime failures that mention the widget and re-attempts
/// initialization once per failure, only while no instance is installed.
fn install_error_recovery() {
    if RECOVERY_INSTALLED.with(|flag| flag.replace(true)) {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: ErrorEvent| {
        if !ev.message().contains("site-header") || is_installed() {
            return;
        }
        log::warn!("site-header: failure captured, retrying initialization");
        spawn_local(async {
            TimeoutFuture::new(RECOVERY_DELAY_MS).await;
            if !is_installed() {
                install();
            }
        });
    }) as Box<dyn FnMut(ErrorEvent)>);
    let _ = window.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
    // page-lifetime listener; keep the closure alive
    closure.forget();
}
