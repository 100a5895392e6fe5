//! Software canvas: an offscreen picture that can be drawn on

use ember_core::{Color, EmberError, Picture, Rect, Result, Vec2, VideoOutput};
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::Path;

/// An RGBA pixel buffer implementing [`VideoOutput`].
///
/// Pixel `(i, j)` covers the display-space square `[i, i+1) x [j, j+1)`;
/// filled shapes paint every pixel whose center lies inside them. Draws are
/// alpha-blended over the existing pixels, except `clear`, which overwrites.
/// Every color is multiplied by the current mask first.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
    mask: Color,
}

impl Canvas {
    /// Create a fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_image(RgbaImage::new(width, height))
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            image,
            mask: Color::WHITE,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Tint applied to every subsequent draw call
    pub fn set_mask(&mut self, mask: Color) {
        self.mask = mask;
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image
            .save_with_format(path.as_ref(), ImageFormat::Png)
            .map_err(|e| EmberError::ImageError(format!("{}: {}", path.as_ref().display(), e)))
    }

    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }

    /// Source-over blend of an already masked color onto one pixel
    fn blend(&mut self, x: i64, y: i64, color: Color) {
        if !self.in_bounds(x, y) {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let dst = Color::from_rgba8(self.image.get_pixel(x, y).0);

        let a = color.a.clamp(0.0, 1.0);
        let out_a = a + dst.a * (1.0 - a);
        let mix = |s: f64, d: f64| {
            if out_a > 0.0 {
                (s * a + d * dst.a * (1.0 - a)) / out_a
            } else {
                0.0
            }
        };
        let out = Color::new(mix(color.r, dst.r), mix(color.g, dst.g), mix(color.b, dst.b), out_a);
        self.image.put_pixel(x, y, Rgba(out.to_rgba8()));
    }

    /// Range of pixel indices whose centers fall in `[from, to)`
    fn pixel_span(from: f64, to: f64) -> (i64, i64) {
        ((from - 0.5).ceil() as i64, (to - 0.5).ceil() as i64)
    }

    /// Clip segment `ab` to the canvas rectangle (Liang-Barsky)
    fn clip_segment(&self, a: Vec2, b: Vec2) -> Option<(Vec2, Vec2)> {
        let d = b - a;
        let (w, h) = (self.width() as f64, self.height() as f64);
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

        for (p, q) in [(-d.x, a.x), (d.x, w - a.x), (-d.y, a.y), (d.y, h - a.y)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
        Some((a + d * t0, a + d * t1))
    }

    fn thin_line(&mut self, a: Vec2, b: Vec2, color: Color) {
        let Some((a, b)) = self.clip_segment(a, b) else {
            return;
        };
        let d = b - a;
        let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as i64;
        let mut last = None;
        for i in 0..=steps {
            let p = a + d * (i as f64 / steps as f64);
            let pixel = (p.x.floor() as i64, p.y.floor() as i64);
            if last != Some(pixel) {
                self.blend(pixel.0, pixel.1, color);
                last = Some(pixel);
            }
        }
    }

    /// Paint every pixel whose center is within `thickness / 2` of segment `ab`
    fn thick_line(&mut self, a: Vec2, b: Vec2, thickness: f64, color: Color) {
        let r = thickness / 2.0;
        let (x0, x1) = Self::pixel_span(a.x.min(b.x) - r, a.x.max(b.x) + r + 1.0);
        let (y0, y1) = Self::pixel_span(a.y.min(b.y) - r, a.y.max(b.y) + r + 1.0);
        let ab = b - a;
        let len2 = ab.len2();

        for y in y0.max(0)..y1.min(self.height() as i64) {
            for x in x0.max(0)..x1.min(self.width() as i64) {
                let c = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let t = if len2 > 0.0 {
                    ((c - a).dot(&ab) / len2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                if (c - (a + ab * t)).len() <= r {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn line(&mut self, a: Vec2, b: Vec2, thickness: f64, color: Color) {
        if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
            log::warn!("skipping line with a non-finite endpoint: {:?} -> {:?}", a, b);
            return;
        }
        if thickness <= 1.0 {
            self.thin_line(a, b, color);
        } else {
            self.thick_line(a, b, thickness, color);
        }
    }

    /// Even-odd scanline fill sampled at pixel centers
    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let (y0, y1) = Self::pixel_span(min_y, max_y);

        let mut crossings = Vec::new();
        for y in y0.max(0)..y1.min(self.height() as i64) {
            let cy = y as f64 + 0.5;
            crossings.clear();
            for (i, p) in points.iter().enumerate() {
                let q = points[(i + 1) % points.len()];
                if (p.y <= cy && cy < q.y) || (q.y <= cy && cy < p.y) {
                    crossings.push(p.x + (cy - p.y) / (q.y - p.y) * (q.x - p.x));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                let (x0, x1) = Self::pixel_span(pair[0], pair[1]);
                for x in x0.max(0)..x1.min(self.width() as i64) {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

impl VideoOutput for Canvas {
    fn clear(&mut self, color: Color) {
        let pixel = Rgba((color * self.mask).to_rgba8());
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    fn draw_point(&mut self, point: Vec2, color: Color) {
        let color = color * self.mask;
        self.blend(point.x.floor() as i64, point.y.floor() as i64, color);
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, thickness: f64, color: Color) {
        let color = color * self.mask;
        self.line(a, b, thickness, color);
    }

    fn draw_polygon(&mut self, points: &[Vec2], thickness: f64, color: Color) {
        let color = color * self.mask;
        if thickness == 0.0 {
            self.fill_polygon(points, color);
            return;
        }
        for (i, p) in points.iter().enumerate() {
            let q = points[(i + 1) % points.len()];
            self.line(*p, q, thickness, color);
        }
    }

    fn draw_rect(&mut self, rect: Rect, thickness: f64, color: Color) {
        let corners = [
            Vec2::new(rect.x, rect.y),
            Vec2::new(rect.x + rect.w, rect.y),
            Vec2::new(rect.x + rect.w, rect.y + rect.h),
            Vec2::new(rect.x, rect.y + rect.h),
        ];
        self.draw_polygon(&corners, thickness, color);
    }

    /// Nearest-neighbour stretch of `picture` onto `rect`
    fn draw_picture(&mut self, rect: Rect, picture: &dyn Picture) {
        if picture.is_empty() {
            log::warn!("skipping draw of an empty picture at {:?}", rect);
            return;
        }
        if !(rect.w > 0.0 && rect.h > 0.0) {
            return;
        }

        let (pw, ph) = picture.size();
        let (x0, x1) = Self::pixel_span(rect.x, rect.x + rect.w);
        let (y0, y1) = Self::pixel_span(rect.y, rect.y + rect.h);

        for y in y0.max(0)..y1.min(self.height() as i64) {
            let v = ((y as f64 + 0.5 - rect.y) / rect.h * ph as f64).floor() as u32;
            for x in x0.max(0)..x1.min(self.width() as i64) {
                let u = ((x as f64 + 0.5 - rect.x) / rect.w * pw as f64).floor() as u32;
                let color = picture.color_at(u.min(pw - 1), v.min(ph - 1)) * self.mask;
                self.blend(x, y, color);
            }
        }
    }

    fn output_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f64, self.height() as f64)
    }
}

impl Picture for Canvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn color_at(&self, x: u32, y: u32) -> Color {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Color::from_rgba8(p.0))
            .unwrap_or(Color::TRANSPARENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(canvas: &Canvas, x: u32, y: u32) -> [u8; 4] {
        canvas.image().get_pixel(x, y).0
    }

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.output_rect(), Rect::new(0.0, 0.0, 4.0, 3.0));
        assert_eq!(px(&canvas, 3, 2), [0, 0, 0, 0]);
        assert_eq!(canvas.color_at(10, 10), Color::TRANSPARENT);
    }

    #[test]
    fn test_clear_and_mask() {
        let mut canvas = Canvas::new(2, 2);
        canvas.clear(Color::WHITE);
        assert_eq!(px(&canvas, 1, 1), WHITE);

        canvas.set_mask(Color::RED);
        canvas.clear(Color::WHITE);
        assert_eq!(px(&canvas, 0, 0), RED);
    }

    #[test]
    fn test_filled_rect_covers_pixel_centers() {
        let mut canvas = Canvas::new(10, 10);
        canvas.clear(Color::WHITE);
        canvas.draw_rect(Rect::new(2.0, 2.0, 3.0, 3.0), 0.0, Color::RED);

        assert_eq!(px(&canvas, 2, 2), RED);
        assert_eq!(px(&canvas, 4, 4), RED);
        assert_eq!(px(&canvas, 5, 5), WHITE);
        assert_eq!(px(&canvas, 1, 3), WHITE);
    }

    #[test]
    fn test_outlined_rect_leaves_interior() {
        let mut canvas = Canvas::new(8, 8);
        canvas.clear(Color::WHITE);
        canvas.draw_rect(Rect::new(1.0, 1.0, 6.0, 6.0), 1.0, Color::BLUE);

        assert_eq!(px(&canvas, 1, 1), BLUE);
        assert_eq!(px(&canvas, 4, 1), BLUE);
        assert_eq!(px(&canvas, 4, 4), WHITE);
    }

    #[test]
    fn test_filled_triangle() {
        let mut canvas = Canvas::new(8, 8);
        let triangle = [Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0), Vec2::new(0.0, 8.0)];
        canvas.draw_polygon(&triangle, 0.0, Color::RED);

        assert_eq!(px(&canvas, 1, 1), RED);
        assert_eq!(px(&canvas, 7, 7), [0, 0, 0, 0]);
    }

    #[test]
    fn test_thick_line() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(Vec2::new(0.0, 5.0), Vec2::new(9.0, 5.0), 3.0, Color::RED);

        assert_eq!(px(&canvas, 5, 5), RED);
        assert_eq!(px(&canvas, 5, 6), RED);
        assert_eq!(px(&canvas, 5, 7), [0, 0, 0, 0]);
    }

    #[test]
    fn test_long_lines_are_clipped() {
        let mut canvas = Canvas::new(4, 4);
        canvas.draw_line(Vec2::new(0.0, 0.0), Vec2::new(1e12, 0.0), 1.0, Color::RED);
        assert_eq!(px(&canvas, 3, 0), RED);
        assert_eq!(px(&canvas, 3, 1), [0, 0, 0, 0]);

        canvas.draw_line(Vec2::new(0.5, 1e12), Vec2::new(0.5, -1e12), 1.0, Color::BLUE);
        assert_eq!(px(&canvas, 0, 2), BLUE);

        canvas.draw_rect(Rect::new(-1e15, -1e15, 2e15, 2e15), 1.0, Color::BLUE);
        assert_eq!(px(&canvas, 2, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn test_non_finite_lines_skipped() {
        let mut canvas = Canvas::new(4, 4);
        canvas.draw_line(Vec2::new(0.0, 0.0), Vec2::new(f64::INFINITY, 0.0), 1.0, Color::RED);
        canvas.draw_line(Vec2::new(f64::NAN, 1.0), Vec2::new(2.0, 1.0), 3.0, Color::RED);
        assert_eq!(px(&canvas, 0, 0), [0, 0, 0, 0]);
        assert_eq!(px(&canvas, 1, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn test_line_outside_canvas_draws_nothing() {
        let mut canvas = Canvas::new(4, 4);
        canvas.draw_line(Vec2::new(-10.0, -10.0), Vec2::new(-5.0, -20.0), 1.0, Color::RED);
        canvas.draw_line(Vec2::new(10.0, 1.0), Vec2::new(1e9, 1.0), 1.0, Color::RED);
        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_point_alpha_blend() {
        let mut canvas = Canvas::new(4, 4);
        canvas.clear(Color::WHITE);
        canvas.draw_point(Vec2::new(1.2, 2.9), Color::new(0.0, 0.0, 0.0, 0.5));

        assert_eq!(px(&canvas, 1, 2), [128, 128, 128, 255]);
        assert_eq!(px(&canvas, 2, 2), WHITE);
    }

    #[test]
    fn test_draw_picture_stretches() {
        let mut source = Canvas::new(2, 1);
        source.draw_point(Vec2::new(0.0, 0.0), Color::RED);
        source.draw_point(Vec2::new(1.0, 0.0), Color::BLUE);

        let mut canvas = Canvas::new(4, 2);
        canvas.draw_picture(Rect::new(0.0, 0.0, 4.0, 2.0), &source);

        assert_eq!(px(&canvas, 0, 0), RED);
        assert_eq!(px(&canvas, 1, 1), RED);
        assert_eq!(px(&canvas, 2, 0), BLUE);
        assert_eq!(px(&canvas, 3, 1), BLUE);
    }

    #[test]
    fn test_draw_picture_masked() {
        let mut source = Canvas::new(1, 1);
        source.clear(Color::WHITE);

        let mut canvas = Canvas::new(1, 1);
        canvas.set_mask(Color::BLUE);
        canvas.draw_picture(Rect::new(0.0, 0.0, 1.0, 1.0), &source);
        assert_eq!(px(&canvas, 0, 0), BLUE);
    }

    #[test]
    fn test_draw_empty_picture_is_noop() {
        let empty = Canvas::new(0, 0);
        let mut canvas = Canvas::new(2, 2);
        canvas.draw_picture(Rect::new(0.0, 0.0, 2.0, 2.0), &empty);
        assert_eq!(px(&canvas, 0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        let mut canvas = Canvas::new(3, 2);
        canvas.clear(Color::RED);
        canvas.save_png(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(2, 1).0, RED);
    }
}
