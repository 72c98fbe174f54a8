//! Grid points, point sets, and coordinate parsing.
//!
//! A [`Point`] is an integer `(x, y)` pair on an unbounded grid. Points order
//! lexicographically (`x` first, then `y`), which is the order the search
//! walks neighbours in. A [`PointSet`] is the collection of points one side
//! has placed on the board (a "trace").

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::constants::NEIGHBOUR_DELTA;
use crate::error::InputError;

/// An integer grid coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// All points placed by one side. Iterates in ascending point order.
pub type PointSet = BTreeSet<Point>;

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The 8 grid neighbours of this point, in ascending point order.
    ///
    /// Neighbours that would overflow `i32` are left out.
    pub fn neighbours(self) -> impl Iterator<Item = Point> {
        NEIGHBOUR_DELTA
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// This point shifted by `(dx, dy)`, or `None` if that leaves the `i32` grid.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Point> {
        Some(Point::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// True if `other` is one of the 8 neighbours of this point.
    pub fn is_adjacent(self, other: Point) -> bool {
        self != other
            && (i64::from(self.x) - i64::from(other.x)).abs() <= 1
            && (i64::from(self.y) - i64::from(other.y)).abs() <= 1
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_point(s)
    }
}

/// Parse a coordinate string such as `"3,-4"` into a Point.
///
/// Whitespace around either coordinate is ignored.
pub fn parse_point(s: &str) -> Result<Point, InputError> {
    let s = s.trim();
    let (xs, ys) = s
        .split_once(',')
        .ok_or_else(|| InputError::MissingComma(s.to_string()))?;
    Ok(Point::new(parse_coordinate(xs)?, parse_coordinate(ys)?))
}

fn parse_coordinate(s: &str) -> Result<i32, InputError> {
    let s = s.trim();
    let wide: i64 = s
        .parse()
        .map_err(|_| InputError::InvalidCoordinate(s.to_string()))?;
    narrow(wide)
}

fn narrow(v: i64) -> Result<i32, InputError> {
    i32::try_from(v).map_err(|_| InputError::OutOfRange(v))
}

/// Parse a whitespace-separated list of points, e.g. `"0,0 1,0 1,1"`.
///
/// Duplicates collapse. The first malformed entry aborts the whole parse.
pub fn parse_trace(s: &str) -> Result<PointSet, InputError> {
    s.split_whitespace().map(parse_point).collect()
}

/// Build a trace from coordinate slices, each of which must hold exactly two values.
///
/// Values outside `i32` are rejected.
pub fn trace_from_slices<'a, I>(items: I) -> Result<PointSet, InputError>
where
    I: IntoIterator<Item = &'a [i64]>,
{
    items
        .into_iter()
        .map(|item| match *item {
            [x, y] => Ok(Point::new(narrow(x)?, narrow(y)?)),
            _ => Err(InputError::WrongArity(item.len())),
        })
        .collect()
}
