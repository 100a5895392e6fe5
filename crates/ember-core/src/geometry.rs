//! 2D vector and rectangle value types

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Components as a tuple
    pub fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Squared length
    pub fn len2(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn len(&self) -> f64 {
        self.len2().sqrt()
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Component-wise product
    pub fn scaled(&self, other: Self) -> Self {
        Self {
            x: self.x * other.x,
            y: self.y * other.y,
        }
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle: position of a corner plus size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            w: size.x,
            h: size.y,
        }
    }

    pub fn xywh(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.w, self.h)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Copy of the rectangle with its position set to `pos`
    pub fn moved_to(&self, pos: Vec2) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            ..*self
        }
    }

    /// Copy of the rectangle moved relatively by `delta`
    pub fn moved_by(&self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    /// Copy of the rectangle with a new size
    pub fn resized(&self, size: Vec2) -> Self {
        Self {
            w: size.x,
            h: size.y,
            ..*self
        }
    }

    /// Half-open containment test, assuming non-negative size
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.w
            && point.y < self.y + self.h
    }

    /// See [`overlap`]
    pub fn overlap(&self, other: &Rect) -> Vec2 {
        overlap(self, other)
    }
}

/// How far `r1` has to move so it no longer overlaps `r2`.
///
/// Returns exactly `Vec2::ZERO` when the rectangles do not overlap (touching
/// edges do not count). Otherwise each component holds the smaller of the two
/// corrections on that axis, and moving `r1` by either component alone
/// separates the rectangles. Apply one component, not both.
pub fn overlap(r1: &Rect, r2: &Rect) -> Vec2 {
    let left = (r2.x + r2.w) - r1.x;
    let right = r2.x - (r1.x + r1.w);
    let bottom = (r2.y + r2.h) - r1.y;
    let top = r2.y - (r1.y + r1.h);

    if left <= 0.0 || right >= 0.0 || bottom <= 0.0 || top >= 0.0 {
        return Vec2::ZERO;
    }

    let mut correction = Vec2::new(left, bottom);
    if right.abs() < left.abs() {
        correction.x = right;
    }
    if top.abs() < bottom.abs() {
        correction.y = top;
    }
    correction
}
