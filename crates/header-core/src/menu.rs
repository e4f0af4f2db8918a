//! The menu state machine.
//!
//! [`HeaderMachine`] owns the widget's logical state (open flag, open
//! submenu, viewport mode, scroll tracker) and expresses every transition
//! as an [`EffectSet`] the frontend applies to the DOM in one go. Keeping
//! the "show" class and the interactivity override in the same effect set
//! is the load-bearing part: the menu container occupies layout space even
//! while closed (for the height animation), so a closed-but-interactive
//! menu silently swallows clicks on whatever sits behind it. Interactivity
//! must equal the open flag at every observation point, including
//! immediately after a breakpoint crossing and immediately after a close
//! begins.

use crate::scroll::{ScrollOutcome, ScrollTracker};
use crate::viewport::ViewportMode;
use serde::Serialize;

/// Pointer-interactivity of the menu container.
///
/// `Enabled`/`Disabled` are inline overrides (pointer-events plus the
/// raised/sunk stacking level, always set as a pair). `Stylesheet` clears
/// the overrides so the CSS hover behavior in wide mode is never blocked
/// by a leftover compact-mode state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Interactivity {
    Enabled,
    Disabled,
    Stylesheet,
}

/// One DOM side effect of a transition.
#[derive(Clone, PartialEq, Debug)]
pub enum Effect {
    /// `aria-expanded` on the burger toggle.
    ToggleExpanded(bool),
    /// `active` class on the burger toggle.
    ToggleActive(bool),
    /// `show` class on the menu container.
    MenuShown(bool),
    /// Pointer-events and stacking override on the menu container.
    MenuInteractive(Interactivity),
    /// `overflow: hidden` on the page body.
    BodyScrollLocked(bool),
    /// Animate the menu container to its natural content height.
    AnimateMenuOpen,
    /// Move focus to the first focusable menu item (deferred by the binding).
    FocusFirstMenuItem,
    /// Return focus to the burger toggle (deferred; skipped if reopened).
    ReturnFocusToToggle,
    /// `aria-expanded` on the submenu trigger named by `id`.
    SubmenuExpanded { id: String, expanded: bool },
    /// `show` class (and height animation) on the submenu named by `id`.
    SubmenuShown { id: String, shown: bool },
    /// Clear `show`/`aria-expanded`/height on every submenu pair.
    CloseAllSubmenus,
    /// `scrolled` class on the header container.
    HeaderCompacted(bool),
}

pub type EffectSet = Vec<Effect>;

/// Read-only state snapshot for the local-development debug surface.
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
pub struct DebugSnapshot {
    pub is_open: bool,
    pub last_scroll_y: f64,
    pub threshold: f64,
}

/// The header widget's state machine.
///
/// States are `{Closed, Open}` with idempotent `open`/`close`; submenus
/// are an independent sub-state with at most one open at a time. All
/// mutation goes through the transition methods below; the frontend never
/// writes state directly.
#[derive(Clone, Debug)]
pub struct HeaderMachine {
    mode: ViewportMode,
    is_open: bool,
    open_submenu: Option<String>,
    interactivity: Interactivity,
    scroll: ScrollTracker,
}

impl HeaderMachine {
    pub fn new(width: f64) -> Self {
        let mode = ViewportMode::from_width(width);
        let interactivity = if mode.is_compact() {
            Interactivity::Disabled
        } else {
            Interactivity::Stylesheet
        };
        Self {
            mode,
            is_open: false,
            open_submenu: None,
            interactivity,
            scroll: ScrollTracker::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    pub fn interactivity(&self) -> Interactivity {
        self.interactivity
    }

    pub fn open_submenu_id(&self) -> Option<&str> {
        self.open_submenu.as_deref()
    }

    pub fn threshold(&self) -> f64 {
        self.mode.scroll_threshold()
    }

    pub fn snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            is_open: self.is_open,
            last_scroll_y: self.scroll.last_y(),
            threshold: self.threshold(),
        }
    }

    /// Effects that put the freshly constructed widget into a consistent
    /// initial state (interactivity per the current viewport mode).
    pub fn initial_effects(&self) -> EffectSet {
        vec![Effect::MenuInteractive(self.interactivity)]
    }

    /// Opens the menu. No-op when already open or in wide mode.
    pub fn open(&mut self) -> EffectSet {
        if self.is_open || !self.mode.is_compact() {
            return Vec::new();
        }
        self.is_open = true;
        self.interactivity = Interactivity::Enabled;
        vec![
            Effect::ToggleExpanded(true),
            Effect::ToggleActive(true),
            Effect::MenuShown(true),
            Effect::MenuInteractive(Interactivity::Enabled),
            Effect::BodyScrollLocked(true),
            Effect::FocusFirstMenuItem,
            Effect::AnimateMenuOpen,
        ]
    }

    /// Closes the menu. No-op when already closed.
    ///
    /// Interactivity is disabled in the same effect set that removes the
    /// `show` class; the close animation has not finished at that point
    /// and must not be able to intercept clicks.
    pub fn close(&mut self) -> EffectSet {
        if !self.is_open {
            return Vec::new();
        }
        self.is_open = false;
        self.open_submenu = None;
        self.interactivity = if self.mode.is_compact() {
            Interactivity::Disabled
        } else {
            Interactivity::Stylesheet
        };
        vec![
            Effect::ToggleExpanded(false),
            Effect::ToggleActive(false),
            Effect::MenuShown(false),
            Effect::MenuInteractive(self.interactivity),
            Effect::BodyScrollLocked(false),
            Effect::CloseAllSubmenus,
            Effect::ReturnFocusToToggle,
        ]
    }

    /// Burger click. No-op in wide mode, where the menu is CSS hover only.
    pub fn toggle(&mut self) -> EffectSet {
        if !self.mode.is_compact() {
            return Vec::new();
        }
        if self.is_open {
            self.close()
        } else {
            self.open()
        }
    }

    /// Opens the submenu named `id`, closing any other open submenu first.
    ///
    /// No-op in wide mode. Invoked on the already-open submenu it closes
    /// it instead (the triggers act as toggles).
    pub fn open_submenu(&mut self, id: &str) -> EffectSet {
        if !self.mode.is_compact() {
            return Vec::new();
        }
        if self.open_submenu.as_deref() == Some(id) {
            return self.close_all_submenus();
        }
        self.open_submenu = Some(id.to_string());
        vec![
            Effect::CloseAllSubmenus,
            Effect::SubmenuExpanded {
                id: id.to_string(),
                expanded: true,
            },
            Effect::SubmenuShown {
                id: id.to_string(),
                shown: true,
            },
        ]
    }

    /// Clears every submenu pair. Idempotent; the effect sweeps all pairs
    /// regardless of which (if any) the machine recorded as open.
    pub fn close_all_submenus(&mut self) -> EffectSet {
        self.open_submenu = None;
        vec![Effect::CloseAllSubmenus]
    }

    /// Scroll handler (the binding throttles it to one run per 16 ms).
    pub fn on_scroll(&mut self, y: f64) -> EffectSet {
        let outcome = self.scroll.observe(y, self.threshold());
        let changed = match outcome {
            ScrollOutcome::Noise => return Vec::new(),
            ScrollOutcome::Moved { compacted_changed } => compacted_changed,
        };

        let mut fx = Vec::new();
        if let Some(flag) = changed {
            fx.push(Effect::HeaderCompacted(flag));
        }
        // Scrolling with the dropdown open closes it.
        if self.mode.is_compact() && self.is_open {
            fx.extend(self.close());
        }
        fx
    }

    /// Resize handler (the binding debounces it to 250 ms after the last
    /// event). Recomputes the viewport mode and reconciles interactivity
    /// so no compact-mode override survives into wide mode and vice versa.
    pub fn on_resize(&mut self, width: f64) -> EffectSet {
        self.mode = ViewportMode::from_width(width);

        if self.mode.is_compact() {
            self.interactivity = if self.is_open {
                Interactivity::Enabled
            } else {
                Interactivity::Disabled
            };
            return vec![Effect::MenuInteractive(self.interactivity)];
        }

        // Wide mode: the stylesheet owns the menu from here on.
        if self.is_open {
            // close() already restores scroll, sweeps submenus and resets
            // interactivity to the stylesheet default.
            self.close()
        } else {
            self.open_submenu = None;
            self.interactivity = Interactivity::Stylesheet;
            vec![
                Effect::BodyScrollLocked(false),
                Effect::CloseAllSubmenus,
                Effect::MenuInteractive(Interactivity::Stylesheet),
            ]
        }
    }

    /// Effects that undo every inline override on teardown, leaving the
    /// stylesheet authoritative.
    pub fn dispose_effects(&self) -> EffectSet {
        vec![
            Effect::BodyScrollLocked(false),
            Effect::MenuInteractive(Interactivity::Stylesheet),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPACT: f64 = 400.0;
    const WIDE: f64 = 1024.0;

    /// The interactivity override must match the logical state in every
    /// reachable (state, mode) combination.
    fn assert_invariant(m: &HeaderMachine) {
        match (m.mode().is_compact(), m.is_open()) {
            (true, true) => assert_eq!(m.interactivity(), Interactivity::Enabled),
            (true, false) => assert_eq!(m.interactivity(), Interactivity::Disabled),
            (false, _) => assert_eq!(m.interactivity(), Interactivity::Stylesheet),
        }
    }

    /// Whenever an effect set toggles the menu's `show` class, the same
    /// set must carry an interactivity effect agreeing with it.
    fn assert_atomic_pairing(fx: &EffectSet) {
        let shown = fx.iter().find_map(|e| match e {
            Effect::MenuShown(v) => Some(*v),
            _ => None,
        });
        if let Some(shown) = shown {
            let interactive = fx.iter().find_map(|e| match e {
                Effect::MenuInteractive(i) => Some(*i),
                _ => None,
            });
            match interactive {
                Some(Interactivity::Enabled) => assert!(shown),
                Some(Interactivity::Disabled) => assert!(!shown),
                Some(Interactivity::Stylesheet) => assert!(!shown),
                None => panic!("MenuShown({shown}) emitted without an interactivity effect"),
            }
        }
    }

    #[test]
    fn open_is_idempotent() {
        let mut m = HeaderMachine::new(COMPACT);
        let first = m.open();
        assert!(m.is_open());
        assert!(!first.is_empty());
        assert!(m.open().is_empty());
        assert_invariant(&m);
    }

    #[test]
    fn close_is_idempotent() {
        let mut m = HeaderMachine::new(COMPACT);
        assert!(m.close().is_empty());
        m.open();
        let first = m.close();
        assert!(!first.is_empty());
        assert!(m.close().is_empty());
        assert_invariant(&m);
    }

    #[test]
    fn toggle_routes_by_state() {
        let mut m = HeaderMachine::new(COMPACT);
        m.toggle();
        assert!(m.is_open());
        m.toggle();
        assert!(!m.is_open());
    }

    #[test]
    fn wide_mode_toggle_and_submenu_are_noops() {
        let mut m = HeaderMachine::new(WIDE);
        assert!(m.toggle().is_empty());
        assert!(!m.is_open());
        assert!(m.open_submenu("products").is_empty());
        assert_eq!(m.open_submenu_id(), None);
    }

    #[test]
    fn submenu_mutual_exclusion() {
        let mut m = HeaderMachine::new(COMPACT);
        m.open();
        m.open_submenu("products");
        let fx = m.open_submenu("services");
        assert_eq!(m.open_submenu_id(), Some("services"));
        // the sweep precedes the new marks, so only B ends up marked
        assert_eq!(fx[0], Effect::CloseAllSubmenus);
        assert!(fx.contains(&Effect::SubmenuExpanded {
            id: "services".into(),
            expanded: true
        }));
        assert!(fx.contains(&Effect::SubmenuShown {
            id: "services".into(),
            shown: true
        }));
    }

    #[test]
    fn submenu_trigger_toggles() {
        let mut m = HeaderMachine::new(COMPACT);
        m.open();
        m.open_submenu("products");
        let fx = m.open_submenu("products");
        assert_eq!(m.open_submenu_id(), None);
        assert_eq!(fx, vec![Effect::CloseAllSubmenus]);
    }

    #[test]
    fn close_clears_open_submenu() {
        let mut m = HeaderMachine::new(COMPACT);
        m.open();
        m.open_submenu("products");
        let fx = m.close();
        assert_eq!(m.open_submenu_id(), None);
        assert!(fx.contains(&Effect::CloseAllSubmenus));
    }

    #[test]
    fn close_all_submenus_is_idempotent() {
        let mut m = HeaderMachine::new(COMPACT);
        m.open();
        assert_eq!(m.close_all_submenus(), vec![Effect::CloseAllSubmenus]);
        assert_eq!(m.close_all_submenus(), vec![Effect::CloseAllSubmenus]);
    }

    #[test]
    fn breakpoint_force_close() {
        let mut m = HeaderMachine::new(COMPACT);
        m.open();
        let fx = m.on_resize(WIDE);
        assert!(!m.is_open());
        assert!(fx.contains(&Effect::MenuShown(false)));
        assert!(fx.contains(&Effect::MenuInteractive(Interactivity::Stylesheet)));
        assert_invariant(&m);
        assert_atomic_pairing(&fx);
    }

    #[test]
    fn wide_to_compact_while_closed_disables_interactivity() {
        let mut m = HeaderMachine::new(WIDE);
        let fx = m.on_resize(COMPACT);
        assert_eq!(fx, vec![Effect::MenuInteractive(Interactivity::Disabled)]);
        assert_invariant(&m);
    }

    #[test]
    fn resize_within_compact_keeps_open_menu_interactive() {
        let mut m = HeaderMachine::new(COMPACT);
        m.open();
        let fx = m.on_resize(500.0);
        assert!(m.is_open());
        assert_eq!(fx, vec![Effect::MenuInteractive(Interactivity::Enabled)]);
        assert_invariant(&m);
    }

    #[test]
    fn transition_edges_pair_shown_with_interactivity() {
        // close -> open
        let mut m = HeaderMachine::new(COMPACT);
        let fx = m.open();
        assert_atomic_pairing(&fx);
        assert!(fx.contains(&Effect::MenuShown(true)));
        assert!(fx.contains(&Effect::MenuInteractive(Interactivity::Enabled)));

        // open -> close
        let fx = m.close();
        assert_atomic_pairing(&fx);
        assert!(fx.contains(&Effect::MenuShown(false)));
        assert!(fx.contains(&Effect::MenuInteractive(Interactivity::Disabled)));

        // compact -> wide while open
        m.open();
        let fx = m.on_resize(WIDE);
        assert_atomic_pairing(&fx);

        // wide -> compact while closed
        let fx = m.on_resize(COMPACT);
        assert_atomic_pairing(&fx);
    }

    #[test]
    fn scroll_updates_compacted_flag_only_on_change() {
        // width 400 -> threshold 60
        let mut m = HeaderMachine::new(COMPACT);
        assert!(m.on_scroll(30.0).is_empty());
        assert_eq!(m.on_scroll(90.0), vec![Effect::HeaderCompacted(true)]);
        assert!(m.on_scroll(150.0).is_empty());
        assert_eq!(m.on_scroll(10.0), vec![Effect::HeaderCompacted(false)]);
    }

    #[test]
    fn scroll_noise_does_not_close_open_menu() {
        let mut m = HeaderMachine::new(COMPACT);
        m.on_scroll(90.0);
        m.open();
        assert!(m.on_scroll(91.0).is_empty());
        assert!(m.is_open());
    }

    #[test]
    fn scroll_closes_open_menu_in_compact_mode() {
        let mut m = HeaderMachine::new(COMPACT);
        m.open();
        let fx = m.on_scroll(90.0);
        assert!(!m.is_open());
        assert!(fx.contains(&Effect::HeaderCompacted(true)));
        assert!(fx.contains(&Effect::MenuShown(false)));
        assert!(fx.contains(&Effect::MenuInteractive(Interactivity::Disabled)));
        assert_invariant(&m);
        assert_atomic_pairing(&fx);
    }

    #[test]
    fn scroll_does_not_close_in_wide_mode() {
        let mut m = HeaderMachine::new(WIDE);
        let fx = m.on_scroll(200.0);
        assert_eq!(fx, vec![Effect::HeaderCompacted(true)]);
    }

    #[test]
    fn compact_session_walkthrough() {
        let mut m = HeaderMachine::new(COMPACT);
        assert_eq!(m.threshold(), 60.0);

        assert!(m.on_scroll(30.0).is_empty());
        assert_eq!(m.on_scroll(90.0), vec![Effect::HeaderCompacted(true)]);

        let fx = m.toggle();
        assert!(m.is_open());
        assert_eq!(m.interactivity(), Interactivity::Enabled);
        assert!(fx.contains(&Effect::FocusFirstMenuItem));

        let fx = m.on_scroll(10.0);
        assert!(!m.is_open());
        assert_eq!(m.interactivity(), Interactivity::Disabled);
        assert!(fx.contains(&Effect::ReturnFocusToToggle));
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut m = HeaderMachine::new(COMPACT);
        m.on_scroll(90.0);
        m.open();
        let snap = m.snapshot();
        assert_eq!(
            snap,
            DebugSnapshot {
                is_open: true,
                last_scroll_y: 90.0,
                threshold: 60.0
            }
        );
    }

    #[test]
    fn initial_effects_match_mode() {
        let m = HeaderMachine::new(COMPACT);
        assert_eq!(
            m.initial_effects(),
            vec![Effect::MenuInteractive(Interactivity::Disabled)]
        );
        let m = HeaderMachine::new(WIDE);
        assert_eq!(
            m.initial_effects(),
            vec![Effect::MenuInteractive(Interactivity::Stylesheet)]
        );
    }

    /// Random open/close/resize/scroll sequences must never leave the
    /// interactivity override out of step with the open flag, and every
    /// emitted effect set must pair `show` with interactivity.
    #[test]
    fn interactivity_invariant_under_random_sequences() {
        let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
        let mut next = move || {
            // xorshift64
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };

        let mut m = HeaderMachine::new(COMPACT);
        for _ in 0..2000 {
            let fx = match next() % 5 {
                0 => m.open(),
                1 => m.close(),
                2 => m.toggle(),
                3 => {
                    let w = if next() % 2 == 0 { COMPACT } else { WIDE };
                    m.on_resize(w)
                }
                _ => m.on_scroll((next() % 300) as f64),
            };
            assert_atomic_pairing(&fx);
            assert_invariant(&m);
        }
    }
}
