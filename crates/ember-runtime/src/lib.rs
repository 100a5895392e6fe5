//! Ember Runtime - Game loop infrastructure
//!
//! Provides the core game loop building blocks:
//! - `RawEvent` - classified platform events, with winit classification
//! - `InputState` - double-buffered keyboard, mouse and window state with
//!   edge-triggered queries, plus `InputBindings` for named actions
//! - `FrameClock` - wall-clock frame deltas
//! - `LoopConfig` - TOML-backed loop settings
//! - `Platform` / `HeadlessPlatform` - what the loop drives
//! - `run` / `FrameContext` - the frame loop itself

mod clock;
mod config;
mod context;
mod event;
mod frame_loop;
mod headless;
mod input;
mod platform;

pub use clock::FrameClock;
pub use config::LoopConfig;
pub use context::{FrameContext, QuitSignal};
pub use event::{classify_window_event, MouseButton, RawEvent};
pub use frame_loop::run;
pub use headless::HeadlessPlatform;
pub use input::{Binding, InputBindings, InputState, PolledState};
pub use platform::Platform;

pub use winit::keyboard::KeyCode;
