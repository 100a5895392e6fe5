//! Slicing sprite sheets and tile sheets into frames

use ember_core::{EmberError, Picture, Result, SubPicture};
use std::sync::Arc;

/// Slice `picture` into a grid of `frame_w` x `frame_h` frames.
///
/// Frames are produced row by row from the top, left to right within a row.
/// Partial cells at the right and bottom edges are skipped.
pub fn sheet(picture: Arc<dyn Picture>, frame_w: u32, frame_h: u32) -> Result<Vec<SubPicture>> {
    if frame_w == 0 || frame_h == 0 {
        return Err(EmberError::invalid(format!(
            "sheet frame size must be non-zero, got {}x{}",
            frame_w, frame_h
        )));
    }

    let (w, h) = picture.size();
    let columns = w / frame_w;
    let rows = h / frame_h;

    let mut frames = Vec::with_capacity((columns * rows) as usize);
    for row in 0..rows {
        for column in 0..columns {
            frames.push(SubPicture::new(
                Arc::clone(&picture),
                column * frame_w,
                row * frame_h,
                frame_w,
                frame_h,
            )?);
        }
    }
    Ok(frames)
}
