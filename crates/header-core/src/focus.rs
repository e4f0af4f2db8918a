//! Focusable-element discovery and focus-trap arithmetic.
//!
//! The predicate works on plain descriptors instead of DOM nodes so it can
//! be tested without a browser; the frontend builds a [`FocusCandidate`]
//! per element inside the menu and filters with [`FocusCandidate::is_focusable`].

/// What the predicate needs to know about one element inside the menu.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FocusCandidate {
    /// Lowercase tag name.
    pub tag: String,
    /// Element carries an `href` attribute.
    pub has_href: bool,
    /// Element carries the `disabled` attribute.
    pub disabled: bool,
    /// Explicit `tabindex`, if any.
    pub tabindex: Option<i32>,
    /// Element takes part in layout (`offsetParent` is non-null).
    pub visible: bool,
}

impl FocusCandidate {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_lowercase(),
            has_href: false,
            disabled: false,
            tabindex: None,
            visible: true,
        }
    }

    /// Keyboard-reachable: natively focusable tags, anything with an
    /// `href`, or an explicit non-negative `tabindex` — unless disabled
    /// or out of layout.
    pub fn is_focusable(&self) -> bool {
        if self.disabled || !self.visible {
            return false;
        }
        if let Some(tabindex) = self.tabindex {
            return tabindex >= 0;
        }
        if self.has_href {
            return true;
        }
        matches!(self.tag.as_str(), "button" | "input" | "select" | "textarea")
    }
}

/// Index of the first focusable candidate, if any.
pub fn first_focusable(candidates: &[FocusCandidate]) -> Option<usize> {
    candidates.iter().position(FocusCandidate::is_focusable)
}

/// Focus-trap decision for a Tab keypress inside the open menu.
///
/// `active` is the focused element's index within the focusable list
/// (`None` when focus sits elsewhere). Returns the index to move focus to
/// when the press would escape the menu; `None` lets the browser handle it.
pub fn trap_target(active: Option<usize>, count: usize, shift_key: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    match (active, shift_key) {
        (Some(0), true) => Some(last),
        (Some(i), false) if i == last => Some(0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_tags_are_focusable() {
        assert!(FocusCandidate::new("button").is_focusable());
        assert!(FocusCandidate::new("input").is_focusable());
        assert!(FocusCandidate::new("select").is_focusable());
        assert!(FocusCandidate::new("textarea").is_focusable());
        assert!(!FocusCandidate::new("div").is_focusable());
        assert!(!FocusCandidate::new("a").is_focusable());
    }

    #[test]
    fn href_makes_anchors_focusable() {
        let mut a = FocusCandidate::new("a");
        a.has_href = true;
        assert!(a.is_focusable());
    }

    #[test]
    fn tabindex_overrides() {
        let mut div = FocusCandidate::new("div");
        div.tabindex = Some(0);
        assert!(div.is_focusable());

        let mut button = FocusCandidate::new("button");
        button.tabindex = Some(-1);
        assert!(!button.is_focusable());
    }

    #[test]
    fn disabled_and_hidden_are_excluded() {
        let mut button = FocusCandidate::new("button");
        button.disabled = true;
        assert!(!button.is_focusable());

        let mut link = FocusCandidate::new("a");
        link.has_href = true;
        link.visible = false;
        assert!(!link.is_focusable());
    }

    #[test]
    fn first_focusable_skips_unreachable() {
        let mut hidden = FocusCandidate::new("button");
        hidden.visible = false;
        let list = vec![
            FocusCandidate::new("div"),
            hidden,
            FocusCandidate::new("button"),
        ];
        assert_eq!(first_focusable(&list), Some(2));
        assert_eq!(first_focusable(&[]), None);
    }

    #[test]
    fn tab_wraps_at_the_edges() {
        // Tab on the last element wraps to the first
        assert_eq!(trap_target(Some(4), 5, false), Some(0));
        // Shift+Tab on the first wraps to the last
        assert_eq!(trap_target(Some(0), 5, true), Some(4));
        // mid-list presses are left to the browser
        assert_eq!(trap_target(Some(2), 5, false), None);
        assert_eq!(trap_target(Some(2), 5, true), None);
        // focus outside the focusable list
        assert_eq!(trap_target(None, 5, false), None);
    }

    #[test]
    fn single_element_trap() {
        assert_eq!(trap_target(Some(0), 1, false), Some(0));
        assert_eq!(trap_target(Some(0), 1, true), Some(0));
        assert_eq!(trap_target(None, 0, false), None);
    }
}
