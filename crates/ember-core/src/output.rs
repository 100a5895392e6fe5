//! Video output sink trait

use crate::color::Color;
use crate::geometry::{Rect, Vec2};
use crate::picture::Picture;

/// Anything that draw calls can be sent to: a window, an offscreen canvas, a
/// camera wrapping another sink.
///
/// Coordinates are in the sink's own display space. A `thickness` of `0`
/// means the shape is filled; otherwise it is outlined with that width.
pub trait VideoOutput {
    /// Fill the whole output with one color
    fn clear(&mut self, color: Color);

    fn draw_point(&mut self, point: Vec2, color: Color);

    fn draw_line(&mut self, a: Vec2, b: Vec2, thickness: f64, color: Color);

    fn draw_polygon(&mut self, points: &[Vec2], thickness: f64, color: Color);

    fn draw_rect(&mut self, rect: Rect, thickness: f64, color: Color);

    /// Draw `picture` stretched onto `rect`
    fn draw_picture(&mut self, rect: Rect, picture: &dyn Picture);

    /// The drawable area
    fn output_rect(&self) -> Rect;
}

impl<O: VideoOutput + ?Sized> VideoOutput for &mut O {
    fn clear(&mut self, color: Color) {
        (**self).clear(color)
    }

    fn draw_point(&mut self, point: Vec2, color: Color) {
        (**self).draw_point(point, color)
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, thickness: f64, color: Color) {
        (**self).draw_line(a, b, thickness, color)
    }

    fn draw_polygon(&mut self, points: &[Vec2], thickness: f64, color: Color) {
        (**self).draw_polygon(points, thickness, color)
    }

    fn draw_rect(&mut self, rect: Rect, thickness: f64, color: Color) {
        (**self).draw_rect(rect, thickness, color)
    }

    fn draw_picture(&mut self, rect: Rect, picture: &dyn Picture) {
        (**self).draw_picture(rect, picture)
    }

    fn output_rect(&self) -> Rect {
        (**self).output_rect()
    }
}

impl<O: VideoOutput + ?Sized> VideoOutput for Box<O> {
    fn clear(&mut self, color: Color) {
        (**self).clear(color)
    }

    fn draw_point(&mut self, point: Vec2, color: Color) {
        (**self).draw_point(point, color)
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, thickness: f64, color: Color) {
        (**self).draw_line(a, b, thickness, color)
    }

    fn draw_polygon(&mut self, points: &[Vec2], thickness: f64, color: Color) {
        (**self).draw_polygon(points, thickness, color)
    }

    fn draw_rect(&mut self, rect: Rect, thickness: f64, color: Color) {
        (**self).draw_rect(rect, thickness, color)
    }

    fn draw_picture(&mut self, rect: Rect, picture: &dyn Picture) {
        (**self).draw_picture(rect, picture)
    }

    fn output_rect(&self) -> Rect {
        (**self).output_rect()
    }
}
