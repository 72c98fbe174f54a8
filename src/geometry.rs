//! Point-in-polygon containment for closed loops on the grid.
//!
//! The test casts a horizontal ray from the query point toward +x and counts
//! how many polygon edges it crosses. An odd count means inside.
//!
//! An edge only counts when exactly one endpoint lies strictly above the
//! query's row. Edges lying on that row are skipped, so a ray passing through
//! a shared vertex is counted once, not twice.
//!
//! The crossing x-coordinate is a fraction. [`Crossing`] selects how it is
//! compared with the query:
//! - [`Crossing::Truncated`] divides in integers, truncating toward zero. This
//!   is the default.
//! - [`Crossing::Exact`] compares the fraction without rounding.
//!
//! The two only disagree for queries sitting within one unit left of an
//! edge's crossing point.

use crate::constants::MAX_INTERIOR_CELLS;
use crate::point::{Point, PointSet};

/// Arithmetic used to compare an edge's crossing x-coordinate with the query.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Crossing {
    /// Integer division truncating toward zero.
    #[default]
    Truncated,
    /// Exact rational comparison by cross-multiplication.
    Exact,
}

/// Check whether `query` lies inside `polygon`, using truncated crossing arithmetic.
///
/// The polygon is read cyclically: its last vertex connects back to the first.
/// Degenerate polygons never panic. With fewer than 2 vertices the result is
/// always `false`.
///
/// Points on the boundary follow a fixed tie-break. For the unit square
/// `[(0,0), (1,0), (1,1), (0,1)]` the vertex `(0,0)` is inside.
pub fn contains(polygon: &[Point], query: Point) -> bool {
    contains_with(polygon, query, Crossing::Truncated)
}

/// Check whether `query` lies inside `polygon` with the given crossing arithmetic.
pub fn contains_with(polygon: &[Point], query: Point, crossing: Crossing) -> bool {
    let Some(&last) = polygon.last() else {
        return false;
    };
    let (qx, qy) = (i128::from(query.x), i128::from(query.y));

    let mut inside = false;
    let mut prev = last;
    for &cur in polygon {
        if (cur.y > query.y) != (prev.y > query.y) && crosses_right(prev, cur, qx, qy, crossing)
        {
            inside = !inside;
        }
        prev = cur;
    }
    inside
}

/// Whether edge `j -> i` meets the row `qy` strictly to the right of `qx`.
///
/// Only called for edges that straddle the row, so `i.y != j.y`. Products of
/// two coordinate differences reach 2^64, hence `i128`.
#[inline]
fn crosses_right(j: Point, i: Point, qx: i128, qy: i128, crossing: Crossing) -> bool {
    let (jx, jy) = (i128::from(j.x), i128::from(j.y));
    let (ix, iy) = (i128::from(i.x), i128::from(i.y));
    let num = (qy - jy) * (ix - jx);
    let den = iy - jy;

    match crossing {
        Crossing::Truncated => jx + num / den > qx,
        // jx + num/den > qx  <=>  num/den > qx - jx
        Crossing::Exact => {
            let rhs = (qx - jx) * den;
            if den > 0 { num > rhs } else { num < rhs }
        }
    }
}

/// True if any point of `targets` lies inside `polygon`.
///
/// Stops at the first enclosed target.
pub fn encloses_any(polygon: &[Point], targets: &PointSet, crossing: Crossing) -> bool {
    targets
        .iter()
        .any(|&t| contains_with(polygon, t, crossing))
}

/// Smallest axis-aligned box `(min, max)` covering every vertex, or `None` if empty.
pub fn bounding_box(polygon: &[Point]) -> Option<(Point, Point)> {
    let first = *polygon.first()?;
    Some(polygon.iter().fold((first, first), |(lo, hi), p| {
        (
            Point::new(lo.x.min(p.x), lo.y.min(p.y)),
            Point::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    }))
}

/// Number of grid cells in the bounding box of `polygon`, or `None` if it exceeds `u64`.
pub fn bounding_area(polygon: &[Point]) -> Option<u64> {
    let Some((lo, hi)) = bounding_box(polygon) else {
        return Some(0);
    };
    let width = u64::try_from(i64::from(hi.x) - i64::from(lo.x) + 1).ok()?;
    let height = u64::try_from(i64::from(hi.y) - i64::from(lo.y) + 1).ok()?;
    width.checked_mul(height)
}

/// Every grid point inside `polygon` that is not one of its vertices.
///
/// Scans the bounding box and returns points in ascending order. This is the
/// area a loop would capture. The scan costs one containment test per cell,
/// so boxes larger than [`MAX_INTERIOR_CELLS`] are refused with `None`.
pub fn interior_points(polygon: &[Point]) -> Option<Vec<Point>> {
    if bounding_area(polygon)? > MAX_INTERIOR_CELLS {
        return None;
    }
    let Some((lo, hi)) = bounding_box(polygon) else {
        return Some(Vec::new());
    };
    let vertices: PointSet = polygon.iter().copied().collect();

    let mut out = Vec::new();
    for x in lo.x..=hi.x {
        for y in lo.y..=hi.y {
            let p = Point::new(x, y);
            if !vertices.contains(&p) && contains(polygon, p) {
                out.push(p);
            }
        }
    }
    Some(out)
}
