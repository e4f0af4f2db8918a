//! DOM handles and effect application for the header widget.
//!
//! All element lookup happens once at construction; a missing required
//! element aborts initialization so the controller never operates on a
//! partially wired tree.

use header_core::{Effect, Interactivity};
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

/// Stacking level of the open menu, above sibling page content. Fixed
/// constants instead of scanning the page for the maximum z-index; the
/// stylesheet keeps the header itself below these.
const MENU_RAISED_Z: &str = "1002";
/// Stacking level of the closed menu, below everything it could occlude.
const MENU_SUNK_Z: &str = "-1";

#[derive(Error, Debug)]
pub enum InitError {
    #[error("site-header: required element `{0}` is missing from the document")]
    MissingElement(&'static str),
    #[error("site-header: no window/document in this environment")]
    EnvironmentUnsupported,
}

/// One trigger/panel pair, wired through the trigger's `data-submenu`
/// attribute naming the panel's id.
pub struct SubmenuPair {
    pub id: String,
    pub trigger: HtmlElement,
    pub panel: HtmlElement,
}

/// The fixed DOM tree the controller operates on.
pub struct DomHandles {
    pub header: HtmlElement,
    pub toggle: HtmlElement,
    pub menu: HtmlElement,
    pub body: HtmlElement,
    pub submenus: Vec<SubmenuPair>,
}

impl DomHandles {
    pub fn lookup() -> Result<Self, InitError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(InitError::EnvironmentUnsupported)?;

        let header = required(&document, "siteHeader")?;
        let toggle = required(&document, "burgerMenu")?;
        let menu = required(&document, "megaMenu")?;
        let body = document.body().ok_or(InitError::MissingElement("body"))?;
        let submenus = collect_submenus(&document, &menu);

        Ok(Self {
            header,
            toggle,
            menu,
            body,
            submenus,
        })
    }

    /// ARIA wiring that never changes after construction.
    pub fn setup_aria(&self) {
        let _ = self.toggle.set_attribute("aria-haspopup", "true");
        let _ = self.toggle.set_attribute("aria-controls", "megaMenu");
        for pair in &self.submenus {
            let _ = pair.trigger.set_attribute("aria-controls", &pair.id);
        }
    }

    /// Applies one transition effect to the DOM. The focus effects are
    /// handled by the controller (they are deferred and re-check state);
    /// everything else lands here.
    pub fn apply(&self, effect: &Effect) {
        match effect {
            Effect::ToggleExpanded(expanded) => {
                let _ = self
                    .toggle
                    .set_attribute("aria-expanded", bool_str(*expanded));
            }
            Effect::ToggleActive(active) => {
                set_class(&self.toggle, "active", *active);
            }
            Effect::MenuShown(shown) => {
                set_class(&self.menu, "show", *shown);
                if !shown {
                    // let the stylesheet's collapsed height win
                    let _ = self.menu.style().remove_property("max-height");
                }
            }
            Effect::MenuInteractive(interactivity) => {
                self.set_menu_interactivity(*interactivity);
            }
            Effect::BodyScrollLocked(locked) => {
                if *locked {
                    let _ = self.body.style().set_property("overflow", "hidden");
                } else {
                    let _ = self.body.style().remove_property("overflow");
                }
            }
            Effect::AnimateMenuOpen => {
                expand_to_content_height(&self.menu);
            }
            Effect::SubmenuExpanded { id, expanded } => {
                if let Some(pair) = self.submenu(id) {
                    let _ = pair
                        .trigger
                        .set_attribute("aria-expanded", bool_str(*expanded));
                }
            }
            Effect::SubmenuShown { id, shown } => {
                if let Some(pair) = self.submenu(id) {
                    set_class(&pair.panel, "show", *shown);
                    if *shown {
                        expand_to_content_height(&pair.panel);
                    } else {
                        let _ = pair.panel.style().remove_property("max-height");
                    }
                }
            }
            Effect::CloseAllSubmenus => {
                for pair in &self.submenus {
                    set_class(&pair.panel, "show", false);
                    let _ = pair.panel.style().remove_property("max-height");
                    let _ = pair.trigger.set_attribute("aria-expanded", "false");
                }
            }
            Effect::HeaderCompacted(compacted) => {
                set_class(&self.header, "scrolled", *compacted);
            }
            // deferred focus moves; the controller owns these
            Effect::FocusFirstMenuItem | Effect::ReturnFocusToToggle => {}
        }
    }

    fn submenu(&self, id: &str) -> Option<&SubmenuPair> {
        self.submenus.iter().find(|p| p.id == id)
    }

    /// Pointer-events and stacking always change as a pair: a menu that
    /// can intercept clicks while visually closed swallows clicks meant
    /// for the content behind it.
    fn set_menu_interactivity(&self, interactivity: Interactivity) {
        let style = self.menu.style();
        match interactivity {
            Interactivity::Enabled => {
                let _ = style.set_property("pointer-events", "auto");
                let _ = style.set_property("z-index", MENU_RAISED_Z);
            }
            Interactivity::Disabled => {
                let _ = style.set_property("pointer-events", "none");
                let _ = style.set_property("z-index", MENU_SUNK_Z);
            }
            Interactivity::Stylesheet => {
                let _ = style.remove_property("pointer-events");
                let _ = style.remove_property("z-index");
            }
        }
    }
}

/// Current viewport width in logical pixels; 0 (compact) when the
/// environment has no window.
pub(crate) fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub(crate) fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

fn required(document: &Document, id: &'static str) -> Result<HtmlElement, InitError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or(InitError::MissingElement(id))
}

fn collect_submenus(document: &Document, menu: &HtmlElement) -> Vec<SubmenuPair> {
    let mut pairs = Vec::new();
    let Ok(triggers) = menu.query_selector_all("button[data-submenu]") else {
        return pairs;
    };
    for i in 0..triggers.length() {
        let Some(trigger) = triggers
            .item(i)
            .and_then(|n| n.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        let Some(id) = trigger.get_attribute("data-submenu") else {
            continue;
        };
        let panel = document
            .get_element_by_id(&id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        match panel {
            Some(panel) => pairs.push(SubmenuPair { id, trigger, panel }),
            None => log::warn!("site-header: trigger names unknown submenu `{id}`"),
        }
    }
    pairs
}

fn set_class(el: &HtmlElement, class: &str, on: bool) {
    let _ = if on {
        el.class_list().add_1(class)
    } else {
        el.class_list().remove_1(class)
    };
}

fn expand_to_content_height(el: &HtmlElement) {
    let height = el.scroll_height();
    let _ = el.style().set_property("max-height", &format!("{height}px"));
}

fn bool_str(v: bool) -> &'static str {
    if v {
        "true"
    } else {
        "false"
    }
}
