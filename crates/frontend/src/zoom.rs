//! Pinch-zoom guard for compact viewports.
//!
//! Focusing a small input on a phone triggers an automatic zoom that
//! breaks the fixed header layout. While an input-like element has focus
//! in compact mode the viewport meta is rewritten to disable pinch zoom;
//! blur restores the original content. Independent of the menu state.

use header_core::ViewportMode;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, HtmlMetaElement};

use crate::widget::dom::viewport_width;

const LOCKED_VIEWPORT: &str =
    "width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no";

pub fn install_zoom_guard() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(meta) = document
        .query_selector("meta[name=\"viewport\"]")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlMetaElement>().ok())
    else {
        return;
    };
    let original = meta.content();

    let Ok(inputs) = document.query_selector_all("input, select, textarea") else {
        return;
    };
    for i in 0..inputs.length() {
        let Some(el) = inputs.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };

        let focus_meta = meta.clone();
        let focus_el = el.clone();
        let on_focus = Closure::wrap(Box::new(move |_ev: Event| {
            let compact = ViewportMode::from_width(viewport_width()).is_compact();
            let is_range = focus_el.get_attribute("type").as_deref() == Some("range");
            if compact && !is_range {
                focus_meta.set_content(LOCKED_VIEWPORT);
            }
        }) as Box<dyn FnMut(Event)>);
        let _ = el.add_event_listener_with_callback("focus", on_focus.as_ref().unchecked_ref());
        on_focus.forget();

        let blur_meta = meta.clone();
        let restore = original.clone();
        let on_blur = Closure::wrap(Box::new(move |_ev: Event| {
            blur_meta.set_content(&restore);
        }) as Box<dyn FnMut(Event)>);
        let _ = el.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref());
        on_blur.forget();
    }
}
