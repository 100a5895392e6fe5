//! The seam between the frame loop and a windowing backend

use crate::event::RawEvent;
use crate::input::PolledState;
use ember_core::{Result, VideoOutput};

/// A window (or stand-in) the frame loop drives.
pub trait Platform {
    /// Sink the loop body draws to
    type Output: VideoOutput;

    /// Append every pending event to `out`. Must not block.
    fn poll_events(&mut self, out: &mut Vec<RawEvent>);

    /// Current mouse position, window geometry and focus
    fn poll_state(&self) -> PolledState;

    fn output(&mut self) -> &mut Self::Output;

    /// Show the frame drawn since the last call
    fn present(&mut self) -> Result<()>;
}

impl<P: Platform + ?Sized> Platform for &mut P {
    type Output = P::Output;

    fn poll_events(&mut self, out: &mut Vec<RawEvent>) {
        (**self).poll_events(out)
    }

    fn poll_state(&self) -> PolledState {
        (**self).poll_state()
    }

    fn output(&mut self) -> &mut Self::Output {
        (**self).output()
    }

    fn present(&mut self) -> Result<()> {
        (**self).present()
    }
}
