//! Ember Render - camera projection and software drawing
//!
//! Everything here draws through the `VideoOutput` trait from ember-core:
//! - `Camera` / `CameraOutput` - game-space to display-space projection,
//!   wrapping any other sink
//! - `Canvas` - an RGBA pixel buffer that rasterises draw calls and can be
//!   saved as PNG
//! - `Recorder` - a sink that keeps the draw calls instead of drawing them

mod camera;
mod canvas;
mod recorder;

pub use camera::{Camera, CameraOutput};
pub use canvas::Canvas;
pub use recorder::{DrawCommand, Recorder};
