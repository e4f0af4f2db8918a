//! DOM side of focus management: candidate collection and the Tab trap.
//!
//! The focusability decision itself lives in `header_core::focus`; this
//! module only builds the descriptors from real elements.

use header_core::focus::{self, FocusCandidate};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent};

const CANDIDATE_SELECTOR: &str = "button, [href], input, select, textarea, [tabindex]";

/// Every selector match inside the menu, paired with its descriptor, in
/// document order.
fn candidates(menu: &HtmlElement) -> Vec<(HtmlElement, FocusCandidate)> {
    let Ok(nodes) = menu.query_selector_all(CANDIDATE_SELECTOR) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let descriptor = describe(&el);
        out.push((el, descriptor));
    }
    out
}

/// Keyboard-reachable elements inside the menu, in document order.
pub fn focusable_elements(menu: &HtmlElement) -> Vec<HtmlElement> {
    candidates(menu)
        .into_iter()
        .filter(|(_, descriptor)| descriptor.is_focusable())
        .map(|(el, _)| el)
        .collect()
}

fn describe(el: &HtmlElement) -> FocusCandidate {
    FocusCandidate {
        tag: el.tag_name().to_lowercase(),
        has_href: el.has_attribute("href"),
        disabled: el.has_attribute("disabled"),
        tabindex: el.get_attribute("tabindex").and_then(|v| v.parse().ok()),
        visible: el.offset_parent().is_some(),
    }
}

pub fn focus_first(menu: &HtmlElement) {
    let pairs = candidates(menu);
    let described: Vec<FocusCandidate> = pairs.iter().map(|(_, d)| d.clone()).collect();
    if let Some(i) = focus::first_focusable(&described) {
        let _ = pairs[i].0.focus();
    }
}

/// Keeps Tab/Shift+Tab inside the open menu, wrapping at the edges.
pub fn handle_tab_trap(menu: &HtmlElement, ev: &KeyboardEvent) {
    if ev.key() != "Tab" {
        return;
    }
    let els = focusable_elements(menu);
    let active = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.active_element());
    let idx = active.as_ref().and_then(|active| {
        els.iter().position(|el| {
            let el: &Element = el.as_ref();
            el == active
        })
    });
    if let Some(target) = focus::trap_target(idx, els.len(), ev.shift_key()) {
        ev.prevent_default();
        let _ = els[target].focus();
    }
}
