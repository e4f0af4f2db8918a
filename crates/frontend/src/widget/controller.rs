//! The header controller: binds the core state machine to the live DOM.
//!
//! Five event sources feed the machine: toggle click, submenu trigger
//! clicks, document click/keydown, window scroll (throttled) and window
//! resize (debounced). Each handler runs a machine transition and applies
//! the returned effect set in one pass, so the DOM never observes a
//! half-applied state.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use header_core::{DebugSnapshot, Effect, EffectSet, HeaderMachine};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, EventTarget, KeyboardEvent, Node};

use super::dom::{scroll_y, viewport_width, DomHandles, InitError};
use super::focus;
use super::timers::{Debounce, Throttle};

const SCROLL_THROTTLE_MS: i32 = 16;
const RESIZE_DEBOUNCE_MS: i32 = 250;
/// The just-shown menu needs a beat before its items can receive focus.
const OPEN_FOCUS_DELAY_MS: u32 = 100;
/// Returning focus too early races with the click that closed the menu.
const CLOSE_REFOCUS_DELAY_MS: u32 = 50;

/// An attached DOM listener that can be detached again on dispose.
struct ListenerGuard {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl ListenerGuard {
    fn attach(target: &EventTarget, event: &'static str, closure: Closure<dyn FnMut(Event)>) -> Self {
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

struct Inner {
    machine: RefCell<HeaderMachine>,
    dom: DomHandles,
    // Handler closures capture an Rc<Inner>, so the controller keeps
    // itself alive until dispose() drains these.
    listeners: RefCell<Vec<ListenerGuard>>,
    scroll_throttle: RefCell<Option<Throttle>>,
    resize_debounce: RefCell<Option<Debounce>>,
    disposed: Cell<bool>,
}

/// Owned handle to the installed header widget.
pub struct HeaderController {
    inner: Rc<Inner>,
}

impl HeaderController {
    /// Looks up the required DOM tree, wires all five event sources and
    /// puts the widget into a consistent initial state. A missing element
    /// aborts the whole initialization.
    pub fn new() -> Result<Self, InitError> {
        let dom = DomHandles::lookup()?;
        let machine = HeaderMachine::new(viewport_width());

        let inner = Rc::new(Inner {
            machine: RefCell::new(machine),
            dom,
            listeners: RefCell::new(Vec::new()),
            scroll_throttle: RefCell::new(None),
            resize_debounce: RefCell::new(None),
            disposed: Cell::new(false),
        });

        inner.dom.setup_aria();
        let fx = inner.machine.borrow().initial_effects();
        apply_effects(&inner, &fx);
        // reflect the scroll position the page loaded at
        let fx = inner.machine.borrow_mut().on_scroll(scroll_y());
        apply_effects(&inner, &fx);

        wire_events(&inner);

        Ok(Self { inner })
    }

    pub fn open(&self) {
        let fx = self.inner.machine.borrow_mut().open();
        apply_effects(&self.inner, &fx);
    }

    pub fn close(&self) {
        let fx = self.inner.machine.borrow_mut().close();
        apply_effects(&self.inner, &fx);
    }

    pub fn toggle(&self) {
        let fx = self.inner.machine.borrow_mut().toggle();
        apply_effects(&self.inner, &fx);
    }

    pub fn open_submenu(&self, id: &str) {
        let fx = self.inner.machine.borrow_mut().open_submenu(id);
        apply_effects(&self.inner, &fx);
    }

    pub fn close_all_submenus(&self) {
        let fx = self.inner.machine.borrow_mut().close_all_submenus();
        apply_effects(&self.inner, &fx);
    }

    pub fn snapshot(&self) -> DebugSnapshot {
        self.inner.machine.borrow().snapshot()
    }

    /// Detaches every listener, cancels outstanding timers and removes
    /// all inline overrides so the stylesheet is authoritative again.
    /// Required before a new controller may be installed.
    pub fn dispose(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        for guard in self.inner.listeners.borrow_mut().drain(..) {
            guard.detach();
        }
        if let Some(t) = self.inner.scroll_throttle.borrow_mut().take() {
            t.cancel();
        }
        if let Some(d) = self.inner.resize_debounce.borrow_mut().take() {
            d.cancel();
        }
        let fx = self.inner.machine.borrow().dispose_effects();
        for effect in &fx {
            self.inner.dom.apply(effect);
        }
        log::info!("site-header: disposed");
    }
}

/// Applies one effect set. Deferred focus effects are handled here
/// because they re-check live state when they fire; everything else goes
/// straight to the DOM.
fn apply_effects(inner: &Rc<Inner>, fx: &EffectSet) {
    for effect in fx {
        match effect {
            Effect::FocusFirstMenuItem => {
                let menu = inner.dom.menu.clone();
                spawn_local(async move {
                    TimeoutFuture::new(OPEN_FOCUS_DELAY_MS).await;
                    focus::focus_first(&menu);
                });
            }
            Effect::ReturnFocusToToggle => {
                let inner = inner.clone();
                spawn_local(async move {
                    TimeoutFuture::new(CLOSE_REFOCUS_DELAY_MS).await;
                    // skip if the menu reopened in the interim
                    if !inner.machine.borrow().is_open() {
                        let _ = inner.dom.toggle.focus();
                    }
                });
            }
            other => inner.dom.apply(other),
        }
    }
}

fn wire_events(inner: &Rc<Inner>) {
    let mut guards = Vec::new();

    // burger toggle
    {
        let weak = inner.clone();
        let closure = Closure::wrap(Box::new(move |ev: Event| {
            ev.prevent_default();
            ev.stop_propagation();
            let fx = weak.machine.borrow_mut().toggle();
            apply_effects(&weak, &fx);
        }) as Box<dyn FnMut(Event)>);
        guards.push(ListenerGuard::attach(
            inner.dom.toggle.as_ref(),
            "click",
            closure,
        ));
    }

    // submenu triggers
    for pair in &inner.dom.submenus {
        let id = pair.id.clone();
        let weak = inner.clone();
        let closure = Closure::wrap(Box::new(move |ev: Event| {
            ev.prevent_default();
            ev.stop_propagation();
            let fx = weak.machine.borrow_mut().open_submenu(&id);
            apply_effects(&weak, &fx);
        }) as Box<dyn FnMut(Event)>);
        guards.push(ListenerGuard::attach(pair.trigger.as_ref(), "click", closure));
    }

    // Tab trap while the menu is open
    {
        let weak = inner.clone();
        let closure = Closure::wrap(Box::new(move |ev: Event| {
            if !weak.machine.borrow().is_open() {
                return;
            }
            if let Some(key_ev) = ev.dyn_ref::<KeyboardEvent>() {
                focus::handle_tab_trap(&weak.dom.menu, key_ev);
            }
        }) as Box<dyn FnMut(Event)>);
        guards.push(ListenerGuard::attach(inner.dom.menu.as_ref(), "keydown", closure));
    }

    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            // click outside the menu closes it
            {
                let weak = inner.clone();
                let closure = Closure::wrap(Box::new(move |ev: Event| {
                    {
                        let machine = weak.machine.borrow();
                        if !machine.mode().is_compact() || !machine.is_open() {
                            return;
                        }
                    }
                    let Some(target) = ev.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                        return;
                    };
                    let inside_menu = weak.dom.menu.contains(Some(&target));
                    let on_toggle = weak.dom.toggle.contains(Some(&target));
                    if !inside_menu && !on_toggle {
                        let fx = weak.machine.borrow_mut().close();
                        apply_effects(&weak, &fx);
                    }
                }) as Box<dyn FnMut(Event)>);
                guards.push(ListenerGuard::attach(document.as_ref(), "click", closure));
            }

            // Escape closes
            {
                let weak = inner.clone();
                let closure = Closure::wrap(Box::new(move |ev: Event| {
                    let Some(key_ev) = ev.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    if key_ev.key() == "Escape" && weak.machine.borrow().is_open() {
                        ev.prevent_default();
                        let fx = weak.machine.borrow_mut().close();
                        apply_effects(&weak, &fx);
                    }
                }) as Box<dyn FnMut(Event)>);
                guards.push(ListenerGuard::attach(document.as_ref(), "keydown", closure));
            }
        }

        // scroll, at most one machine transition per 16 ms
        {
            let throttle = Throttle::new(SCROLL_THROTTLE_MS, {
                let weak = inner.clone();
                move || {
                    let fx = weak.machine.borrow_mut().on_scroll(scroll_y());
                    apply_effects(&weak, &fx);
                }
            });
            *inner.scroll_throttle.borrow_mut() = Some(throttle);

            let weak = inner.clone();
            let closure = Closure::wrap(Box::new(move |_ev: Event| {
                if let Some(throttle) = weak.scroll_throttle.borrow().as_ref() {
                    throttle.call();
                }
            }) as Box<dyn FnMut(Event)>);
            guards.push(ListenerGuard::attach(window.as_ref(), "scroll", closure));
        }

        // resize, acting only on the final size of a burst
        {
            let debounce = Debounce::new(RESIZE_DEBOUNCE_MS, {
                let weak = inner.clone();
                move || {
                    let fx = weak.machine.borrow_mut().on_resize(viewport_width());
                    apply_effects(&weak, &fx);
                }
            });
            *inner.resize_debounce.borrow_mut() = Some(debounce);

            let weak = inner.clone();
            let closure = Closure::wrap(Box::new(move |_ev: Event| {
                if let Some(debounce) = weak.resize_debounce.borrow().as_ref() {
                    debounce.call();
                }
            }) as Box<dyn FnMut(Event)>);
            guards.push(ListenerGuard::attach(window.as_ref(), "resize", closure));
        }
    }

    *inner.listeners.borrow_mut() = guards;
}
