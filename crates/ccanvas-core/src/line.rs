//! Captured line data.

use kurbo::Point;
use std::fmt;

/// Stable 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(usize);

impl LineId {
    /// Create from a 1-based number. Returns `None` for zero.
    pub fn new(number: usize) -> Option<Self> {
        (number >= 1).then_some(Self(number))
    }

    /// Create from a 0-based slot index.
    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    /// The 1-based line number.
    pub fn number(self) -> usize {
        self.0
    }

    /// The 0-based slot index.
    pub fn index(self) -> usize {
        self.0 - 1
    }

    /// Key used in the persisted document (`line_<k>`).
    pub fn key(self) -> String {
        format!("line_{}", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered sequence of captured points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    points: Vec<Point>,
}

impl Line {
    /// Create a new empty line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from existing points, kept in the given order.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build from parallel coordinate lists. Returns `None` if lengths differ.
    pub fn from_xy(x: &[f64], y: &[f64]) -> Option<Self> {
        if x.len() != y.len() {
            return None;
        }
        Some(Self {
            points: x.iter().zip(y).map(|(&x, &y)| Point::new(x, y)).collect(),
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// X coordinates in insertion order.
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// Y coordinates in insertion order.
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Append a point unless it repeats the last one.
    /// Returns false when the point was a duplicate.
    pub(crate) fn push_dedup(&mut self, point: Point) -> bool {
        if self.last() == Some(point) {
            return false;
        }
        self.points.push(point);
        true
    }

    pub(crate) fn replace(&mut self, points: Vec<Point>) {
        self.points = points;
    }
}
