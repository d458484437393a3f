//! Axis-aligned rectangle geometry.
//!
//! Rectangles are stored as a center plus half extents ("radius"), which
//! keeps the overlap and sweep arithmetic symmetric on both axes.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A 2D vector of `f32` components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component (positive is right).
    pub x: f32,
    /// Vertical component (positive is up).
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Construct a vector from its components.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component along `axis`.
    #[inline]
    pub fn get(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Mutable component along `axis`.
    #[inline]
    pub fn get_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    /// A vector with only the `axis` component set.
    #[inline]
    pub fn along(axis: Axis, value: f32) -> Self {
        match axis {
            Axis::X => Self::new(value, 0.0),
            Axis::Y => Self::new(0.0, value),
        }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// One of the two motion axes. Sweeps resolve each axis independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

/// Axis-aligned rectangle: center position plus half extents.
///
/// Radii are conceptually non-negative. A radius below the cull
/// threshold marks a static obstacle as about to be deleted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Center of the rectangle.
    pub pos: Vec2,
    /// Half extents on each axis.
    pub radius: Vec2,
}

impl Rect {
    /// Construct from center coordinates and half extents.
    #[inline]
    pub const fn new(x: f32, y: f32, radius_x: f32, radius_y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            radius: Vec2::new(radius_x, radius_y),
        }
    }

    /// Construct from center and half-extent vectors.
    #[inline]
    pub const fn from_parts(pos: Vec2, radius: Vec2) -> Self {
        Self { pos, radius }
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius.x
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius.x
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.radius.y
    }

    /// Top edge.
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.radius.y
    }

    /// Whether `point` lies strictly inside the rectangle.
    pub fn contains(&self, point: Vec2) -> bool {
        (point.x - self.pos.x).abs() < self.radius.x
            && (point.y - self.pos.y).abs() < self.radius.y
    }

    /// The same rectangle translated by `offset`.
    #[inline]
    pub fn translated(self, offset: Vec2) -> Self {
        Self::from_parts(self.pos + offset, self.radius)
    }
}

bitflags! {
    /// Sides of a mover that touched an obstacle during a sweep.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SideFlags: u8 {
        /// Top side hit while moving up.
        const UP    = 1;
        /// Right side hit while moving right.
        const RIGHT = 2;
        /// Bottom side hit while moving down (landing).
        const DOWN  = 4;
        /// Left side hit while moving left.
        const LEFT  = 8;
    }
}

impl SideFlags {
    /// The side that leads a move along `axis` with the given sign.
    pub fn leading(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => Self::RIGHT,
            (Axis::X, false) => Self::LEFT,
            (Axis::Y, true) => Self::UP,
            (Axis::Y, false) => Self::DOWN,
        }
    }

    /// Whether a horizontal side (left or right) was touched.
    pub fn touched_side(self) -> bool {
        self.intersects(Self::LEFT | Self::RIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_follow_center_and_radius() {
        let r = Rect::new(2.0, -1.0, 0.5, 1.5);
        assert_eq!(r.left(), 1.5);
        assert_eq!(r.right(), 2.5);
        assert_eq!(r.bottom(), -2.5);
        assert_eq!(r.top(), 0.5);
    }

    #[test]
    fn contains_is_strict() {
        let r = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert!(r.contains(Vec2::new(0.5, -0.5)));
        assert!(!r.contains(Vec2::new(1.0, 0.0)));
        assert!(!r.contains(Vec2::new(0.0, 2.0)));
    }

    #[test]
    fn axis_accessors_round_trip() {
        let mut v = Vec2::new(3.0, 4.0);
        assert_eq!(v.get(Axis::X), 3.0);
        *v.get_mut(Axis::Y) += 1.0;
        assert_eq!(v, Vec2::new(3.0, 5.0));
        assert_eq!(Vec2::along(Axis::Y, 2.0), Vec2::new(0.0, 2.0));
    }

    #[test]
    fn leading_side_per_direction() {
        assert_eq!(SideFlags::leading(Axis::X, true), SideFlags::RIGHT);
        assert_eq!(SideFlags::leading(Axis::X, false), SideFlags::LEFT);
        assert_eq!(SideFlags::leading(Axis::Y, true), SideFlags::UP);
        assert_eq!(SideFlags::leading(Axis::Y, false), SideFlags::DOWN);
        assert!((SideFlags::LEFT | SideFlags::DOWN).touched_side());
        assert!(!SideFlags::DOWN.touched_side());
    }
}
