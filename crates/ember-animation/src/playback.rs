//! Playback cursor that turns frame deltas into animation time

use crate::animation::Animation;

/// Per-object playback state for an [`Animation`].
///
/// The animation itself is immutable and can be shared; each sprite keeps its
/// own `Playback` and advances it with the frame delta.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    /// Elapsed playback time in seconds
    elapsed: f64,
    /// Playback speed multiplier (1.0 = normal, negative = reverse)
    pub speed: f64,
    /// Whether time advances on `advance`
    pub playing: bool,
}

impl Playback {
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            speed: 1.0,
            playing: true,
        }
    }

    pub fn with_speed(speed: f64) -> Self {
        Self {
            speed,
            ..Self::new()
        }
    }

    /// Advance by `dt` seconds (scaled by `speed`) if playing
    pub fn advance(&mut self, dt: f64) {
        if self.playing {
            self.elapsed += dt * self.speed;
        }
    }

    /// Jump back to the start
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Frame of `animation` at the current playback time
    pub fn frame<'a, F>(&self, animation: &'a Animation<F>) -> &'a F {
        animation.frame_at(self.elapsed)
    }

    /// True once a non-cyclic animation has reached its end. Cyclic
    /// animations never finish.
    pub fn finished<F>(&self, animation: &Animation<F>) -> bool {
        !animation.is_cyclic() && self.elapsed >= animation.duration()
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_walks_through_frames() {
        let anim = Animation::new(vec!['a', 'b', 'c', 'd'], 2.0).unwrap();
        let mut playback = Playback::new();

        assert_eq!(*playback.frame(&anim), 'a');
        playback.advance(0.6);
        assert_eq!(*playback.frame(&anim), 'b');
        playback.advance(1.0);
        assert_eq!(*playback.frame(&anim), 'd');
        assert!(!playback.finished(&anim));
        playback.advance(0.5);
        assert!(playback.finished(&anim));
        assert_eq!(*playback.frame(&anim), 'd');
    }

    #[test]
    fn paused_playback_holds_time() {
        let mut playback = Playback::new();
        playback.playing = false;
        playback.advance(1.0);
        assert_eq!(playback.elapsed(), 0.0);
    }

    #[test]
    fn reverse_speed_wraps_cyclic() {
        let anim = Animation::cyclic(vec![0, 1, 2], 3.0).unwrap();
        let mut playback = Playback::with_speed(-1.0);
        playback.advance(0.5);
        assert_eq!(*playback.frame(&anim), 2);
        assert!(!playback.finished(&anim));

        playback.reset();
        assert_eq!(playback.elapsed(), 0.0);
    }
}
