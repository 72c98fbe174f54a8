//! Dots-Path: capture-loop search for the dots game.
//!
//! In dots, a player captures opponent points by surrounding them with a
//! closed chain of their own points. Chain steps may be orthogonal or
//! diagonal. Given both players' points and the point just placed, this
//! crate finds every closed chain through that point that encloses at least
//! one opponent point.
//!
//! ## Modules
//!
//! - [`point`] - Grid points, traces, and coordinate parsing
//! - [`geometry`] - Ray-casting point-in-polygon test and capture area
//! - [`search`] - Exhaustive depth-first loop search
//! - [`constants`] - Neighbour offsets and defaults
//! - [`error`] - Input and search errors
//!
//! ## Example
//!
//! ```
//! use dots_path::point::{parse_trace, Point};
//! use dots_path::search::find_paths;
//!
//! let mover = parse_trace("0,0 1,0 2,0 2,1 2,2 1,2 0,2 0,1").unwrap();
//! let opponent = parse_trace("1,1").unwrap();
//!
//! let loops = find_paths(&mover, &opponent, Point::new(0, 0));
//! assert!(!loops.is_empty());
//! assert!(loops.iter().all(|l| l[0] == Point::new(0, 0)));
//! ```

pub mod constants;
pub mod error;
pub mod geometry;
pub mod point;
pub mod search;

#[cfg(feature = "python")]
mod python;

pub use error::{InputError, SearchError};
pub use geometry::{contains, contains_with, Crossing};
pub use point::{Point, PointSet};
pub use search::{find_paths, PathFinder, SearchConfig, VisitPolicy};
