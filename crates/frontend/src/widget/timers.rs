//! Rate limiting for burst-prone event sources.
//!
//! Each utility wraps one operation and holds its own timer handle, so the
//! controller can cancel outstanding timers on dispose. The windowing
//! decisions themselves are plain state below the wrappers, kept free of
//! browser timers so they are testable on the host.

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ThrottleDecision {
    Run,
    Drop,
}

/// One run per window; calls while the gate is closed are dropped, not
/// queued.
#[derive(Clone, Copy, Default, Debug)]
struct ThrottleState {
    gated: bool,
}

impl ThrottleState {
    fn on_call(&mut self) -> ThrottleDecision {
        if self.gated {
            ThrottleDecision::Drop
        } else {
            self.gated = true;
            ThrottleDecision::Run
        }
    }

    fn window_elapsed(&mut self) {
        self.gated = false;
    }

    fn reset(&mut self) {
        self.gated = false;
    }
}

/// At most one pending timer; a newer call supersedes (cancels) the
/// previous one, so only the final call of a burst runs.
#[derive(Clone, Copy, Default, Debug)]
struct DebounceState {
    pending: Option<i32>,
}

impl DebounceState {
    /// Timer to cancel because a newer call superseded it.
    fn supersede(&mut self) -> Option<i32> {
        self.pending.take()
    }

    fn scheduled(&mut self, id: i32) {
        self.pending = Some(id);
    }

    fn fired(&mut self) {
        self.pending = None;
    }

    fn cancel(&mut self) -> Option<i32> {
        self.pending.take()
    }

    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// At most one run per window; calls arriving inside the window are
/// dropped, not queued.
pub struct Throttle {
    op: Rc<dyn Fn()>,
    window_ms: i32,
    state: Rc<Cell<ThrottleState>>,
    timer: Rc<Cell<Option<i32>>>,
}

impl Throttle {
    pub fn new(window_ms: i32, op: impl Fn() + 'static) -> Self {
        Self {
            op: Rc::new(op),
            window_ms,
            state: Rc::new(Cell::new(ThrottleState::default())),
            timer: Rc::new(Cell::new(None)),
        }
    }

    pub fn call(&self) {
        let mut state = self.state.get();
        if state.on_call() == ThrottleDecision::Drop {
            return;
        }
        self.state.set(state);
        (self.op)();

        let gate = self.state.clone();
        let timer = self.timer.clone();
        let closure = Closure::once(move || {
            let mut state = gate.get();
            state.window_elapsed();
            gate.set(state);
            timer.set(None);
        });
        let Some(window) = web_sys::window() else {
            self.reopen_gate();
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            self.window_ms,
        ) {
            Ok(id) => {
                self.timer.set(Some(id));
                closure.forget();
            }
            Err(_) => self.reopen_gate(),
        }
    }

    pub fn cancel(&self) {
        if let Some(id) = self.timer.take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(id);
            }
        }
        self.reopen_gate();
    }

    fn reopen_gate(&self) {
        let mut state = self.state.get();
        state.reset();
        self.state.set(state);
    }
}

/// Runs the operation only after the delay has elapsed since the last
/// call; superseded calls are cancelled, not queued.
pub struct Debounce {
    op: Rc<dyn Fn()>,
    delay_ms: i32,
    state: Rc<Cell<DebounceState>>,
}

impl Debounce {
    pub fn new(delay_ms: i32, op: impl Fn() + 'static) -> Self {
        Self {
            op: Rc::new(op),
            delay_ms,
            state: Rc::new(Cell::new(DebounceState::default())),
        }
    }

    pub fn call(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut state = self.state.get();
        if let Some(id) = state.supersede() {
            window.clear_timeout_with_handle(id);
        }
        self.state.set(state);

        let op = self.op.clone();
        let shared = self.state.clone();
        let closure = Closure::once(move || {
            let mut state = shared.get();
            state.fired();
            shared.set(state);
            op();
        });
        if let Ok(id) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            self.delay_ms,
        ) {
            let mut state = self.state.get();
            state.scheduled(id);
            self.state.set(state);
            closure.forget();
        }
    }

    pub fn cancel(&self) {
        let mut state = self.state.get();
        if let Some(id) = state.cancel() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(id);
            }
        }
        self.state.set(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_drops_calls_inside_window() {
        let mut state = ThrottleState::default();
        assert_eq!(state.on_call(), ThrottleDecision::Run);
        assert_eq!(state.on_call(), ThrottleDecision::Drop);
        assert_eq!(state.on_call(), ThrottleDecision::Drop);
    }

    #[test]
    fn throttle_runs_again_after_window() {
        let mut state = ThrottleState::default();
        assert_eq!(state.on_call(), ThrottleDecision::Run);
        state.window_elapsed();
        assert_eq!(state.on_call(), ThrottleDecision::Run);
    }

    #[test]
    fn throttle_reset_reopens_the_gate() {
        let mut state = ThrottleState::default();
        state.on_call();
        state.reset();
        assert_eq!(state.on_call(), ThrottleDecision::Run);
    }

    #[test]
    fn debounce_burst_keeps_only_the_final_timer() {
        let mut state = DebounceState::default();
        assert_eq!(state.supersede(), None);
        state.scheduled(1);
        // each newer call cancels the previous timer
        assert_eq!(state.supersede(), Some(1));
        state.scheduled(2);
        assert_eq!(state.supersede(), Some(2));
        state.scheduled(3);
        assert!(state.is_pending());
        state.fired();
        assert!(!state.is_pending());
    }

    #[test]
    fn debounce_cancel_clears_the_pending_run() {
        let mut state = DebounceState::default();
        state.scheduled(7);
        assert_eq!(state.cancel(), Some(7));
        assert!(!state.is_pending());
        assert_eq!(state.cancel(), None);
    }
}
