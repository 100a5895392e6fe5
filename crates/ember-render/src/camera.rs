//! 2D camera mapping game space to display space

use ember_core::{Color, EmberError, Picture, Rect, Result, Vec2, VideoOutput};

/// Moves and zooms the game view.
///
/// Game space is whatever coordinate system the game uses internally. Display
/// space is the pixel space of the sink being drawn to, with `(0, 0)` at a
/// corner. A point maps to display space as `(p - corner) * zoom`, per axis.
/// A negative zoom component flips that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    corner: Vec2,
    zoom: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            corner: Vec2::ZERO,
            zoom: Vec2::ONE,
        }
    }
}

impl Camera {
    /// Create a camera. Both zoom components must be finite and non-zero.
    pub fn new(corner: Vec2, zoom: Vec2) -> Result<Self> {
        check_zoom(zoom)?;
        Ok(Self { corner, zoom })
    }

    /// Identity camera: game space equals display space
    pub fn identity() -> Self {
        Self::default()
    }

    /// Game-space point that lands on the display origin
    pub fn corner(&self) -> Vec2 {
        self.corner
    }

    pub fn zoom(&self) -> Vec2 {
        self.zoom
    }

    /// Change the zoom. Rejects zero or non-finite components and leaves the
    /// camera untouched in that case.
    pub fn set_zoom(&mut self, zoom: Vec2) -> Result<()> {
        check_zoom(zoom)?;
        self.zoom = zoom;
        Ok(())
    }

    /// Game space -> display space
    pub fn project(&self, v: Vec2) -> Vec2 {
        (v - self.corner).scaled(self.zoom)
    }

    /// Display space -> game space; exact inverse of [`Camera::project`]
    pub fn unproject(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x / self.zoom.x, v.y / self.zoom.y) + self.corner
    }

    /// Project a rectangle. On a flipped axis the rectangle is first anchored
    /// at its far edge, so a non-negative size stays non-negative.
    pub fn project_rect(&self, r: Rect) -> Rect {
        let r = self.flip_normalized(r);
        Rect::from_pos_size(self.project(r.pos()), r.size().scaled(self.zoom))
    }

    /// Inverse of [`Camera::project_rect`], with the same flip handling
    pub fn unproject_rect(&self, r: Rect) -> Rect {
        let r = self.flip_normalized(r);
        Rect::from_pos_size(
            self.unproject(r.pos()),
            Vec2::new(r.w / self.zoom.x, r.h / self.zoom.y),
        )
    }

    fn flip_normalized(&self, mut r: Rect) -> Rect {
        if self.zoom.x < 0.0 {
            r.x += r.w;
            r.w = -r.w;
        }
        if self.zoom.y < 0.0 {
            r.y += r.h;
            r.h = -r.h;
        }
        r
    }

    /// Wrap `sink` so draw calls given in game space land on it in display space
    pub fn output<O: VideoOutput>(&self, sink: O) -> CameraOutput<O> {
        CameraOutput { camera: *self, sink }
    }
}

fn check_zoom(zoom: Vec2) -> Result<()> {
    let valid = |z: f64| z.is_finite() && z != 0.0;
    if !valid(zoom.x) || !valid(zoom.y) {
        return Err(EmberError::invalid(format!(
            "camera zoom must be finite and non-zero, got ({}, {})",
            zoom.x, zoom.y
        )));
    }
    Ok(())
}

/// A sink seen through a camera.
///
/// Every draw call projects its geometry and forwards to the wrapped sink;
/// no rasterisation happens here. Because this is itself a [`VideoOutput`],
/// cameras can be stacked.
pub struct CameraOutput<O> {
    camera: Camera,
    sink: O,
}

impl<O: VideoOutput> CameraOutput<O> {
    pub fn sink_mut(&mut self) -> &mut O {
        &mut self.sink
    }
}

impl<O: VideoOutput> VideoOutput for CameraOutput<O> {
    fn clear(&mut self, color: Color) {
        self.sink.clear(color);
    }

    fn draw_point(&mut self, point: Vec2, color: Color) {
        self.sink.draw_point(self.camera.project(point), color);
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, thickness: f64, color: Color) {
        let (a, b) = (self.camera.project(a), self.camera.project(b));
        self.sink.draw_line(a, b, thickness, color);
    }

    fn draw_polygon(&mut self, points: &[Vec2], thickness: f64, color: Color) {
        let projected: Vec<Vec2> = points.iter().map(|p| self.camera.project(*p)).collect();
        self.sink.draw_polygon(&projected, thickness, color);
    }

    fn draw_rect(&mut self, rect: Rect, thickness: f64, color: Color) {
        self.sink
            .draw_rect(self.camera.project_rect(rect), thickness, color);
    }

    fn draw_picture(&mut self, rect: Rect, picture: &dyn Picture) {
        self.sink
            .draw_picture(self.camera.project_rect(rect), picture);
    }

    /// The sink's output rectangle in game space
    fn output_rect(&self) -> Rect {
        self.camera.unproject_rect(self.sink.output_rect())
    }
}
