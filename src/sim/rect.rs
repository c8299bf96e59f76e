//! Axis-aligned rectangle geometry
//!
//! Screen space with y growing downward: `top` is the smaller y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap on the x axis (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.left() < right && self.right() > left
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_x(other.left(), other.right())
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Whether the vertical span [top, bottom] fits inside [lo, hi]
    pub fn within_vertical(&self, lo: f32, hi: f32) -> bool {
        self.top() >= lo && self.bottom() <= hi
    }
}
