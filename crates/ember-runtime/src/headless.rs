//! Windowless platform driven by a script, for tests and offline rendering

use crate::event::RawEvent;
use crate::input::PolledState;
use crate::platform::Platform;
use ember_core::{Result, VideoOutput};
use std::collections::VecDeque;

/// A [`Platform`] with no window behind it.
///
/// Each poll takes the next scripted batch of events (or nothing once the
/// script runs out) and optionally replaces the polled state. Presents are
/// only counted.
pub struct HeadlessPlatform<O> {
    output: O,
    script: VecDeque<(Vec<RawEvent>, Option<PolledState>)>,
    state: PolledState,
    presents: u64,
}

impl<O: VideoOutput> HeadlessPlatform<O> {
    /// Wrap `output`; the polled window size is taken from its output rect
    pub fn new(output: O) -> Self {
        let size = output.output_rect().size();
        let state = PolledState {
            window_size: (size.x.max(0.0) as u32, size.y.max(0.0) as u32),
            focused: true,
            ..Default::default()
        };
        Self {
            output,
            script: VecDeque::new(),
            state,
            presents: 0,
        }
    }

    /// Queue the events delivered by one future poll
    pub fn push_batch(&mut self, events: impl IntoIterator<Item = RawEvent>) {
        self.script.push_back((events.into_iter().collect(), None));
    }

    /// Queue a batch that also replaces the polled state when delivered
    pub fn push_batch_with_state(
        &mut self,
        events: impl IntoIterator<Item = RawEvent>,
        state: PolledState,
    ) {
        self.script.push_back((events.into_iter().collect(), Some(state)));
    }

    pub fn state(&self) -> &PolledState {
        &self.state
    }

    pub fn set_state(&mut self, state: PolledState) {
        self.state = state;
    }

    pub fn presents(&self) -> u64 {
        self.presents
    }

    pub fn output_ref(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }
}

impl<O: VideoOutput> Platform for HeadlessPlatform<O> {
    type Output = O;

    fn poll_events(&mut self, out: &mut Vec<RawEvent>) {
        if let Some((events, state)) = self.script.pop_front() {
            out.extend(events);
            if let Some(state) = state {
                self.state = state;
            }
        }
    }

    fn poll_state(&self) -> PolledState {
        self.state
    }

    fn output(&mut self) -> &mut O {
        &mut self.output
    }

    fn present(&mut self) -> Result<()> {
        self.presents += 1;
        Ok(())
    }
}
