//! Per-frame context handed to the loop body

use crate::input::{InputBindings, InputState};

/// One-shot request to end the loop.
///
/// The loop inspects it after the body returns; the body is never interrupted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuitSignal {
    requested: bool,
}

impl QuitSignal {
    pub fn request(&mut self) {
        self.requested = true;
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }
}

/// What the loop body sees during one tick
pub struct FrameContext<'a, O: ?Sized> {
    /// Seconds since the previous tick
    pub dt: f64,
    pub input: &'a InputState,
    pub bindings: &'a InputBindings,
    pub output: &'a mut O,
    quit: QuitSignal,
    frame: u64,
    elapsed: f64,
}

impl<'a, O: ?Sized> FrameContext<'a, O> {
    pub(crate) fn new(
        dt: f64,
        input: &'a InputState,
        bindings: &'a InputBindings,
        output: &'a mut O,
        frame: u64,
        elapsed: f64,
    ) -> Self {
        Self {
            dt,
            input,
            bindings,
            output,
            quit: QuitSignal::default(),
            frame,
            elapsed,
        }
    }

    /// End the loop once this tick's body returns
    pub fn quit(&mut self) {
        self.quit.request();
    }

    /// Whether quit has been requested this tick. Once set it stays set.
    pub fn quit_requested(&self) -> bool {
        self.quit.is_requested()
    }

    /// Zero-based index of this tick
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Seconds since the loop started, including this tick's `dt`
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn action_down(&self, action: &str) -> bool {
        self.bindings.action_down(self.input, action)
    }

    pub fn action_just_down(&self, action: &str) -> bool {
        self.bindings.action_just_down(self.input, action)
    }
}
