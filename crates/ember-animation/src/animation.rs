//! Frame-sequence animations indexed by elapsed time

use ember_core::{EmberError, Result};

/// A fixed sequence of frames played over `duration` seconds.
///
/// `F` is whatever handle the caller uses for a frame, typically an
/// `Arc<dyn Picture>` or a [`SubPicture`](ember_core::SubPicture). The
/// animation only holds those handles for lookup.
#[derive(Debug, Clone)]
pub struct Animation<F> {
    frames: Vec<F>,
    duration: f64,
    cyclic: bool,
}

impl<F> Animation<F> {
    /// Create an animation that holds on its last frame once `duration` has passed
    pub fn new(frames: Vec<F>, duration: f64) -> Result<Self> {
        Self::build(frames, duration, false)
    }

    /// Create an animation that repeats every `duration` seconds
    pub fn cyclic(frames: Vec<F>, duration: f64) -> Result<Self> {
        Self::build(frames, duration, true)
    }

    fn build(frames: Vec<F>, duration: f64, cyclic: bool) -> Result<Self> {
        if frames.is_empty() {
            return Err(EmberError::invalid("animation needs at least one frame"));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(EmberError::invalid(format!(
                "animation duration must be a positive number of seconds, got {}",
                duration
            )));
        }
        Ok(Self {
            frames,
            duration,
            cyclic,
        })
    }

    pub fn frames(&self) -> &[F] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Length of one full pass in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    /// Time each frame stays on screen
    pub fn frame_step(&self) -> f64 {
        self.duration / self.frames.len() as f64
    }

    /// Index of the frame shown `elapsed` seconds after the start.
    ///
    /// Non-cyclic animations clamp: negative time shows the first frame and
    /// anything past the end holds the last one. Cyclic animations wrap with a
    /// true modulo, so negative time counts backwards from the last frame.
    /// Non-finite `elapsed` maps to the first frame.
    pub fn frame_index_at(&self, elapsed: f64) -> usize {
        let count = self.frames.len() as i64;
        let raw = (elapsed / self.frame_step()).floor();
        if !raw.is_finite() {
            return 0;
        }
        // saturating float-to-int cast keeps absurd times in range
        let index = raw as i64;

        if self.cyclic {
            index.rem_euclid(count) as usize
        } else {
            index.clamp(0, count - 1) as usize
        }
    }

    /// The frame shown `elapsed` seconds after the start
    pub fn frame_at(&self, elapsed: f64) -> &F {
        &self.frames[self.frame_index_at(elapsed)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn clamped_animation_boundaries() {
        let anim = Animation::new(frames(4), 2.0).unwrap();
        assert!(!anim.is_cyclic());
        assert_eq!(anim.frame_index_at(-1.0), 0);
        assert_eq!(anim.frame_index_at(0.0), 0);
        assert_eq!(anim.frame_index_at(0.5), 1);
        assert_eq!(anim.frame_index_at(1.99), 3);
        assert_eq!(anim.frame_index_at(2.0), 3);
        assert_eq!(anim.frame_index_at(100.0), 3);
    }

    #[test]
    fn cyclic_animation_wraps_both_directions() {
        let anim = Animation::cyclic(frames(3), 3.0).unwrap();
        assert!((anim.frame_step() - 1.0).abs() < 1e-10);
        assert_eq!(anim.frame_index_at(3.5), 0);
        assert_eq!(anim.frame_index_at(-0.5), 2);
        assert_eq!(anim.frame_index_at(-3.0), 0);
        assert_eq!(anim.frame_index_at(-3.5), 2);
        assert_eq!(anim.frame_index_at(7.2), 1);
    }

    #[test]
    fn frame_at_returns_handle() {
        let anim = Animation::cyclic(vec!["a", "b"], 1.0).unwrap();
        assert_eq!(*anim.frame_at(0.25), "a");
        assert_eq!(*anim.frame_at(0.75), "b");
        assert_eq!(*anim.frame_at(1.25), "a");
    }

    #[test]
    fn single_frame_animation() {
        let anim = Animation::cyclic(frames(1), 0.5).unwrap();
        assert_eq!(anim.frame_index_at(-12.0), 0);
        assert_eq!(anim.frame_index_at(12.0), 0);
    }

    #[test]
    fn empty_frames_rejected() {
        let err = Animation::<usize>::new(vec![], 1.0).unwrap_err();
        assert!(matches!(err, EmberError::InvalidArgument(_)));
    }

    #[test]
    fn degenerate_durations_rejected() {
        for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Animation::cyclic(frames(2), duration).unwrap_err();
            assert!(matches!(err, EmberError::InvalidArgument(_)));
        }
    }

    #[test]
    fn non_finite_elapsed_maps_to_first_frame() {
        let anim = Animation::cyclic(frames(3), 3.0).unwrap();
        assert_eq!(anim.frame_index_at(f64::NAN), 0);
        assert_eq!(anim.frame_index_at(f64::INFINITY), 0);

        let clamped = Animation::new(frames(3), 3.0).unwrap();
        assert_eq!(clamped.frame_index_at(f64::NAN), 0);
    }
}
