//! A sink that records draw calls instead of rasterising them

use ember_core::{Color, Picture, Rect, Vec2, VideoOutput};

/// One recorded draw call, in the recorder's display space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Point {
        point: Vec2,
        color: Color,
    },
    Line {
        a: Vec2,
        b: Vec2,
        thickness: f64,
        color: Color,
    },
    Polygon {
        points: Vec<Vec2>,
        thickness: f64,
        color: Color,
    },
    Rect {
        rect: Rect,
        thickness: f64,
        color: Color,
    },
    /// Pictures are recorded by size only
    Picture {
        rect: Rect,
        size: (u32, u32),
    },
}

/// Records every call in order, for inspecting what a frame drew.
#[derive(Debug, Clone)]
pub struct Recorder {
    output_rect: Rect,
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new(output_rect: Rect) -> Self {
        Self {
            output_rect,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl VideoOutput for Recorder {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_point(&mut self, point: Vec2, color: Color) {
        self.commands.push(DrawCommand::Point { point, color });
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, thickness: f64, color: Color) {
        self.commands.push(DrawCommand::Line {
            a,
            b,
            thickness,
            color,
        });
    }

    fn draw_polygon(&mut self, points: &[Vec2], thickness: f64, color: Color) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            thickness,
            color,
        });
    }

    fn draw_rect(&mut self, rect: Rect, thickness: f64, color: Color) {
        self.commands.push(DrawCommand::Rect {
            rect,
            thickness,
            color,
        });
    }

    fn draw_picture(&mut self, rect: Rect, picture: &dyn Picture) {
        self.commands.push(DrawCommand::Picture {
            rect,
            size: picture.size(),
        });
    }

    fn output_rect(&self) -> Rect {
        self.output_rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut rec = Recorder::new(Rect::new(0.0, 0.0, 320.0, 240.0));
        assert!(rec.is_empty());

        rec.clear(Color::BLACK);
        rec.draw_point(Vec2::new(1.0, 2.0), Color::WHITE);
        assert_eq!(rec.len(), 2);

        assert_eq!(rec.commands()[0], DrawCommand::Clear(Color::BLACK));
        assert_eq!(rec.output_rect(), Rect::new(0.0, 0.0, 320.0, 240.0));
    }
}
