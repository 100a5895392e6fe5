//! Ember Core - Foundational types for the Ember runtime
//!
//! This crate provides the value types every other Ember crate depends on:
//! - `Vec2`, `Rect`, `overlap` - 2D geometry
//! - `Color` - RGBA color with masking
//! - `Picture`, `SubPicture` - readable raster surfaces
//! - `VideoOutput` - the sink that all draw calls go through
//! - Error types and Result alias

mod color;
mod error;
mod geometry;
mod output;
mod picture;

pub use color::Color;
pub use error::{EmberError, Result};
pub use geometry::{overlap, Rect, Vec2};
pub use output::VideoOutput;
pub use picture::{Picture, SubPicture};
