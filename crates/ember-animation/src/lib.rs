//! Frame animation for the Ember runtime
//!
//! - `Animation` - maps elapsed time to one frame of a fixed sequence,
//!   clamped or cyclic
//! - `Playback` - per-sprite time cursor advanced by the frame delta
//! - `sheet` - slices a sprite sheet into frames

pub mod animation;
pub mod playback;
pub mod sheet;

pub use animation::Animation;
pub use playback::Playback;
pub use sheet::sheet;
