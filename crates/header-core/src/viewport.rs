//! Viewport mode derived from the window width.
//!
//! The widget is mobile-first: below the breakpoint the menu is a
//! burger-driven dropdown, at or above it the menu is pure CSS hover and
//! the controller stays out of the way.

/// Breakpoint between compact (burger) and wide (hover) behavior, in
/// logical pixels.
pub const BREAKPOINT_PX: f64 = 768.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ViewportMode {
    /// Width < 768 px: burger toggle, dropdown menu, scroll lock.
    Compact,
    /// Width >= 768 px: hover menu handled entirely by the stylesheet.
    Wide,
}

impl ViewportMode {
    pub fn from_width(width: f64) -> Self {
        if width < BREAKPOINT_PX {
            ViewportMode::Compact
        } else {
            ViewportMode::Wide
        }
    }

    /// Scroll distance after which the header collapses into its
    /// "scrolled" styling.
    pub fn scroll_threshold(&self) -> f64 {
        match self {
            ViewportMode::Compact => 60.0,
            ViewportMode::Wide => 100.0,
        }
    }

    pub fn is_compact(&self) -> bool {
        matches!(self, ViewportMode::Compact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_from_width() {
        assert_eq!(ViewportMode::from_width(400.0), ViewportMode::Compact);
        assert_eq!(ViewportMode::from_width(767.9), ViewportMode::Compact);
        assert_eq!(ViewportMode::from_width(768.0), ViewportMode::Wide);
        assert_eq!(ViewportMode::from_width(1024.0), ViewportMode::Wide);
    }

    #[test]
    fn thresholds_per_mode() {
        assert_eq!(ViewportMode::Compact.scroll_threshold(), 60.0);
        assert_eq!(ViewportMode::Wide.scroll_threshold(), 100.0);
    }
}
