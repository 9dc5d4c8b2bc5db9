use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct NodeId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Closed integer interval on one axis, `low <= high`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub low: i32,
    pub high: i32,
}

impl Span {
    pub const fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    pub fn length(self) -> i32 {
        self.high - self.low
    }

    /// Shared part of two spans, or `None` when they are disjoint.
    pub fn intersection(self, other: Self) -> Option<Self> {
        let low = self.low.max(other.low);
        let high = self.high.min(other.high);
        (low <= high).then_some(Self { low, high })
    }
}

/// Axis-aligned rectangle stored as its bottom-left and top-right corners.
///
/// The corners are never inverted: `bottom_left.x <= top_right.x` and
/// `bottom_left.y <= top_right.y`. Use [`Rect::from_corners`] whenever the
/// corners come from arithmetic that has not already proven this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    bottom_left: Point,
    top_right: Point,
}

impl Rect {
    pub fn new(bottom_left: Point, top_right: Point) -> Self {
        debug_assert!(
            bottom_left.x <= top_right.x && bottom_left.y <= top_right.y,
            "inverted rectangle {bottom_left:?} -> {top_right:?}"
        );
        Self { bottom_left, top_right }
    }

    pub fn from_corners(bottom_left: Point, top_right: Point) -> Option<Self> {
        (bottom_left.x <= top_right.x && bottom_left.y <= top_right.y)
            .then_some(Self { bottom_left, top_right })
    }

    /// Rectangle anchored at the origin.
    pub fn sized(width: i32, length: i32) -> Self {
        Self::new(Point::new(0, 0), Point::new(width, length))
    }

    pub fn bottom_left(&self) -> Point {
        self.bottom_left
    }

    pub fn top_right(&self) -> Point {
        self.top_right
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.top_right.x, self.bottom_left.y)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.bottom_left.x, self.top_right.y)
    }

    pub fn width(&self) -> i32 {
        self.top_right.x - self.bottom_left.x
    }

    pub fn length(&self) -> i32 {
        self.top_right.y - self.bottom_left.y
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width()) * i64::from(self.length())
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (f64::from(self.bottom_left.x) + f64::from(self.top_right.x)) / 2.0,
            (f64::from(self.bottom_left.y) + f64::from(self.top_right.y)) / 2.0,
        )
    }

    pub fn x_span(&self) -> Span {
        Span::new(self.bottom_left.x, self.top_right.x)
    }

    pub fn y_span(&self) -> Span {
        Span::new(self.bottom_left.y, self.top_right.y)
    }

    pub fn contains_rect(&self, other: &Self) -> bool {
        other.bottom_left.x >= self.bottom_left.x
            && other.bottom_left.y >= self.bottom_left.y
            && other.top_right.x <= self.top_right.x
            && other.top_right.y <= self.top_right.y
    }

    /// True when the two rectangles share a region of positive area.
    /// Rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.bottom_left.x < other.top_right.x
            && other.bottom_left.x < self.top_right.x
            && self.bottom_left.y < other.top_right.y
            && other.bottom_left.y < self.top_right.y
    }
}

/// Direction of a split line through a partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Cuts along a constant y, producing a lower and an upper child.
    Horizontal,
    /// Cuts along a constant x, producing a left and a right child.
    Vertical,
}

/// Where the second structure sits when seen from the first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelativePosition {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorridorAxis {
    /// Runs along y between a lower and an upper structure.
    Vertical,
    /// Runs along x between a left and a right structure.
    Horizontal,
}

impl RelativePosition {
    pub fn corridor_axis(self) -> CorridorAxis {
        match self {
            Self::Up | Self::Down => CorridorAxis::Vertical,
            Self::Left | Self::Right => CorridorAxis::Horizontal,
        }
    }
}
