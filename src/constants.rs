//! Constants for grid adjacency, search limits, and CLI defaults.
//!
//! The neighbour table is listed in ascending point order (`x` first, then
//! `y`), so walking it front to back yields neighbours already sorted. The
//! search relies on that for its deterministic enumeration order.

// =============================================================================
// Grid Adjacency
// =============================================================================

/// Offsets `(dx, dy)` to the 8 neighbours of a point, in ascending point order.
/// Order: SW, W, NW, S, N, SE, E, NE (with `y` growing north).
pub const NEIGHBOUR_DELTA: [(i32, i32); 8] = [
    (-1, -1), // SW (diagonal)
    (-1, 0),  // W
    (-1, 1),  // NW (diagonal)
    (0, -1),  // S
    (0, 1),   // N
    (1, -1),  // SE (diagonal)
    (1, 0),   // E
    (1, 1),   // NE (diagonal)
];

/// Fewest vertices a closed loop needs to enclose any area.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Largest bounding box, in cells, that `interior_points` will scan.
pub const MAX_INTERIOR_CELLS: u64 = 1 << 24;

// =============================================================================
// Random Board Defaults
// =============================================================================

/// Default side length for the `random` command (a standard 24x24 board).
pub const DEFAULT_BOARD_SIZE: i32 = 24;

/// Default probability that a cell receives a mover point.
pub const DEFAULT_DENSITY: f64 = 0.3;

/// Default seed for reproducible random boards.
pub const DEFAULT_SEED: u64 = 1;

/// Default node-expansion budget per start point for the `random` command.
///
/// Dense random boards blow up the exhaustive search, so the command always
/// runs with a budget.
pub const DEFAULT_RANDOM_BUDGET: u64 = 200_000;
