//! Capture-loop search.
//!
//! Starting from one point, the search walks every simple path through the
//! mover's points. A step may go to any of the 8 grid neighbours that the
//! mover also owns. Whenever a path steps back onto its start point it forms
//! a closed loop. The loop is kept if it encloses at least one opponent point.
//!
//! The walk is a depth-first search with an explicit frame stack instead of
//! native recursion, so deep paths cannot overflow the call stack. The current
//! path is one shared buffer with append/undo: a point is pushed when its
//! frame opens and popped when the frame is exhausted. Every sibling branch
//! therefore sees the same prefix.
//!
//! Neighbours are visited in ascending point order, which makes the order of
//! the returned loops deterministic. Each loop is reported once per direction
//! it can be walked. Loops are not deduplicated.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::constants::{MIN_POLYGON_VERTICES, NEIGHBOUR_DELTA};
use crate::error::SearchError;
use crate::geometry::{encloses_any, Crossing};
use crate::point::{Point, PointSet};

/// Which points a branch may not step onto.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum VisitPolicy {
    /// Only points on the current path are blocked. Exhaustive over all simple loops.
    #[default]
    PerPath,
    /// A point entered anywhere in the search is never entered again.
    ///
    /// Runs in linear time but misses loops that reuse a point an earlier
    /// branch already explored.
    Global,
}

/// Tunables for a single search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of node expansions before giving up. `None` is unbounded.
    pub budget: Option<u64>,
    /// Arithmetic for the containment test.
    pub crossing: Crossing,
    /// Revisit rule for points.
    pub visit: VisitPolicy,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(mut self, budget: u64) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_crossing(mut self, crossing: Crossing) -> Self {
        self.crossing = crossing;
        self
    }

    pub fn with_visit_policy(mut self, visit: VisitPolicy) -> Self {
        self.visit = visit;
        self
    }

    /// Build a config from the switches the command line and Python bindings expose.
    pub fn from_flags(budget: Option<u64>, exact: bool, global_visits: bool) -> Self {
        Self {
            budget,
            crossing: if exact { Crossing::Exact } else { Crossing::Truncated },
            visit: if global_visits {
                VisitPolicy::Global
            } else {
                VisitPolicy::PerPath
            },
        }
    }
}

/// Counters collected during one search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Points entered (pushed onto the path).
    pub expanded: u64,
    /// Times a path stepped back onto its start.
    pub closures: u64,
    /// Closures that enclosed an opponent point.
    pub accepted: u64,
}

/// Loops found by a search, with the work it took.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub paths: Vec<Vec<Point>>,
    pub stats: SearchStats,
}

/// Searches capture loops over a fixed pair of traces.
///
/// Holds the traces by reference. Each call to [`find`](Self::find) owns its
/// own path state, so one finder can serve many searches, also concurrently.
#[derive(Copy, Clone, Debug)]
pub struct PathFinder<'a> {
    mover: &'a PointSet,
    opponent: &'a PointSet,
    config: SearchConfig,
}

impl<'a> PathFinder<'a> {
    /// Create a finder with the default (unbounded, exhaustive) configuration.
    pub fn new(mover: &'a PointSet, opponent: &'a PointSet) -> Self {
        Self::with_config(mover, opponent, SearchConfig::default())
    }

    pub fn with_config(mover: &'a PointSet, opponent: &'a PointSet, config: SearchConfig) -> Self {
        Self {
            mover,
            opponent,
            config,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// All loops through `start` that enclose an opponent point, in discovery order.
    ///
    /// `start` does not have to belong to the mover's trace. If it does not,
    /// no neighbour can equal it, and the result is empty.
    ///
    /// # Errors
    /// - [`SearchError::BudgetExhausted`] if the configured budget runs out.
    ///   No partial result is returned.
    pub fn find(&self, start: Point) -> Result<Vec<Vec<Point>>, SearchError> {
        self.find_with_stats(start).map(|outcome| outcome.paths)
    }

    /// Like [`find`](Self::find), also returning search counters.
    pub fn find_with_stats(&self, start: Point) -> Result<SearchOutcome, SearchError> {
        let outcome = Walk::new(self, start).run()?;
        tracing::debug!(
            "search from {}: expanded={} closures={} accepted={}",
            start,
            outcome.stats.expanded,
            outcome.stats.closures,
            outcome.stats.accepted
        );
        Ok(outcome)
    }
}

/// All loops through `start` over `mover` that enclose a point of `opponent`.
///
/// Unbounded and exhaustive. Returns an empty list when no such loop exists.
pub fn find_paths(mover: &PointSet, opponent: &PointSet, start: Point) -> Vec<Vec<Point>> {
    match PathFinder::new(mover, opponent).find(start) {
        Ok(paths) => paths,
        // Budget exhaustion is the only error, and the default config has no budget.
        Err(e) => unreachable!("unbounded search failed: {e}"),
    }
}

/// Run one search per start point, returning results in the order of `starts`.
///
/// With the `parallel` feature the searches run on the rayon pool.
#[cfg(feature = "parallel")]
pub fn find_paths_batch(
    mover: &PointSet,
    opponent: &PointSet,
    starts: &[Point],
    config: SearchConfig,
) -> Vec<Result<Vec<Vec<Point>>, SearchError>> {
    use rayon::prelude::*;

    let finder = PathFinder::with_config(mover, opponent, config);
    starts.par_iter().map(|&start| finder.find(start)).collect()
}

/// Run one search per start point, returning results in the order of `starts`.
#[cfg(not(feature = "parallel"))]
pub fn find_paths_batch(
    mover: &PointSet,
    opponent: &PointSet,
    starts: &[Point],
    config: SearchConfig,
) -> Vec<Result<Vec<Vec<Point>>, SearchError>> {
    let finder = PathFinder::with_config(mover, opponent, config);
    starts.iter().map(|&start| finder.find(start)).collect()
}

/// One open point on the path and how far its neighbour scan has got.
struct Frame {
    at: Point,
    cursor: usize,
}

impl Frame {
    fn new(at: Point) -> Self {
        Self { at, cursor: 0 }
    }

    /// Next neighbour of `at` that belongs to `trace`, in ascending order.
    fn next_neighbour(&mut self, trace: &PointSet) -> Option<Point> {
        while let Some(&(dx, dy)) = NEIGHBOUR_DELTA.get(self.cursor) {
            self.cursor += 1;
            if let Some(n) = self.at.offset(dx, dy) {
                if trace.contains(&n) {
                    return Some(n);
                }
            }
        }
        None
    }
}

/// Mutable state of one search.
struct Walk<'f, 'a> {
    finder: &'f PathFinder<'a>,
    start: Point,
    path: Vec<Point>,
    // Mirrors `path` exactly under `VisitPolicy::PerPath`.
    on_path: FxHashSet<Point>,
    frames: Vec<Frame>,
    paths: Vec<Vec<Point>>,
    stats: SearchStats,
}

impl<'f, 'a> Walk<'f, 'a> {
    fn new(finder: &'f PathFinder<'a>, start: Point) -> Self {
        Self {
            finder,
            start,
            path: Vec::new(),
            on_path: FxHashSet::default(),
            frames: Vec::new(),
            paths: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    fn run(mut self) -> Result<SearchOutcome, SearchError> {
        self.enter(self.start)?;

        while let Some(frame) = self.frames.last_mut() {
            match frame.next_neighbour(self.finder.mover) {
                Some(n) if n == self.start => self.close(),
                Some(n) => {
                    if !self.on_path.contains(&n) {
                        self.enter(n)?;
                    }
                }
                None => self.leave(),
            }
        }

        Ok(SearchOutcome {
            paths: self.paths,
            stats: self.stats,
        })
    }

    fn enter(&mut self, v: Point) -> Result<(), SearchError> {
        if let Some(budget) = self.finder.config.budget {
            if self.stats.expanded >= budget {
                tracing::warn!("search from {} hit its budget of {}", self.start, budget);
                return Err(SearchError::BudgetExhausted { budget });
            }
        }
        self.stats.expanded += 1;
        self.path.push(v);
        self.on_path.insert(v);
        self.frames.push(Frame::new(v));
        Ok(())
    }

    fn leave(&mut self) {
        self.frames.pop();
        if let Some(v) = self.path.pop() {
            if self.finder.config.visit == VisitPolicy::PerPath {
                self.on_path.remove(&v);
            }
        }
    }

    /// The current path has stepped back onto the start.
    fn close(&mut self) {
        self.stats.closures += 1;
        tracing::trace!("closed loop of {} points", self.path.len());

        // A two-point closure just steps back and forth and encloses nothing.
        if self.path.len() < MIN_POLYGON_VERTICES {
            return;
        }
        if encloses_any(&self.path, self.finder.opponent, self.finder.config.crossing) {
            self.stats.accepted += 1;
            tracing::trace!("accepted loop: {:?}", self.path);
            self.paths.push(self.path.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(pts: &[(i32, i32)]) -> PointSet {
        pts.iter().map(|&p| p.into()).collect()
    }

    fn path(pts: &[(i32, i32)]) -> Vec<Point> {
        pts.iter().map(|&p| p.into()).collect()
    }

    /// Eight points around (1, 1).
    fn ring() -> PointSet {
        trace(&[
            (0, 0),
            (1, 0),
            (2, 0),
            (2, 1),
            (2, 2),
            (1, 2),
            (0, 2),
            (0, 1),
        ])
    }

    #[test]
    fn test_ring_encloses_centre() {
        let outcome = PathFinder::new(&ring(), &trace(&[(1, 1)]))
            .find_with_stats(Point::new(0, 0))
            .unwrap();

        assert_eq!(outcome.paths.len(), 16);
        assert_eq!(
            outcome.paths[0],
            path(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 1), (1, 0)])
        );
        // The full perimeter is among them, in both directions
        let perimeter = path(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0), (1, 0)]);
        assert_eq!(outcome.paths[3], perimeter);
        let mut reversed = perimeter.clone();
        reversed[1..].reverse();
        assert!(outcome.paths.contains(&reversed));

        assert_eq!(
            outcome.stats,
            SearchStats {
                expanded: 93,
                closures: 20,
                accepted: 16
            }
        );
    }

    #[test]
    fn test_paths_start_at_start_and_stay_adjacent() {
        let mover = ring();
        let start = Point::new(0, 0);
        for p in find_paths(&mover, &trace(&[(1, 1)]), start) {
            assert_eq!(p[0], start);
            assert!(p.len() >= 3);
            assert!(p.windows(2).all(|w| w[0].is_adjacent(w[1])));
            assert!(p[p.len() - 1].is_adjacent(start));
            let unique: PointSet = p.iter().copied().collect();
            assert_eq!(unique.len(), p.len(), "loop revisits a point: {p:?}");
        }
    }

    #[test]
    fn test_global_visit_policy_finds_single_loop() {
        let config = SearchConfig::new().with_visit_policy(VisitPolicy::Global);
        let outcome = PathFinder::with_config(&ring(), &trace(&[(1, 1)]), config)
            .find_with_stats(Point::new(0, 0))
            .unwrap();
        assert_eq!(
            outcome.paths,
            vec![path(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 1), (1, 0)])]
        );
        assert_eq!(outcome.stats.expanded, 8);
        assert_eq!(outcome.stats.closures, 2);
    }

    #[test]
    fn test_budget() {
        let mover = ring();
        let opponent = trace(&[(1, 1)]);
        let start = Point::new(0, 0);

        let enough = SearchConfig::new().with_budget(93);
        assert_eq!(
            PathFinder::with_config(&mover, &opponent, enough)
                .find(start)
                .unwrap()
                .len(),
            16
        );

        let short = SearchConfig::new().with_budget(92);
        assert_eq!(
            PathFinder::with_config(&mover, &opponent, short).find(start),
            Err(SearchError::BudgetExhausted { budget: 92 })
        );

        let none = SearchConfig::new().with_budget(0);
        assert!(PathFinder::with_config(&mover, &opponent, none)
            .find(start)
            .is_err());
    }

    #[test]
    fn test_exact_crossing_agrees_on_unit_steps() {
        // Loop edges are single grid steps, so every crossing division is exact
        let mover = ring();
        let opponent = trace(&[(1, 1)]);
        let exact = SearchConfig::new().with_crossing(Crossing::Exact);
        let outcome = PathFinder::with_config(&mover, &opponent, exact)
            .find_with_stats(Point::new(0, 0))
            .unwrap();
        assert_eq!(outcome.paths.len(), 16);
        assert_eq!(outcome.paths, find_paths(&mover, &opponent, Point::new(0, 0)));
        assert_eq!(outcome.stats.accepted, 16);

        // Same on a scattered board, from every start
        let mut rng = fastrand::Rng::with_seed(3);
        let mut mover = PointSet::new();
        let mut opponent = PointSet::new();
        for x in 0..5 {
            for y in 0..5 {
                match rng.u8(0..10) {
                    0..=5 => mover.insert(Point::new(x, y)),
                    6..=7 => opponent.insert(Point::new(x, y)),
                    _ => false,
                };
            }
        }
        let budget = 50_000;
        let truncated = SearchConfig::new().with_budget(budget);
        let exact = truncated.with_crossing(Crossing::Exact);
        for &start in &mover {
            let a = PathFinder::with_config(&mover, &opponent, truncated).find(start);
            let b = PathFinder::with_config(&mover, &opponent, exact).find(start);
            assert_eq!(a, b, "crossing modes disagree from {start}");
        }
    }

    #[test]
    fn test_config_from_flags() {
        assert_eq!(SearchConfig::from_flags(None, false, false), SearchConfig::default());
        assert_eq!(
            SearchConfig::from_flags(Some(7), true, true),
            SearchConfig::new()
                .with_budget(7)
                .with_crossing(Crossing::Exact)
                .with_visit_policy(VisitPolicy::Global)
        );
    }

    #[test]
    fn test_find_paths_matches_unbounded_finder() {
        let mover = ring();
        let opponent = trace(&[(1, 1)]);
        let start = Point::new(0, 0);
        assert_eq!(
            find_paths(&mover, &opponent, start),
            PathFinder::new(&mover, &opponent).find(start).unwrap()
        );
    }

    #[test]
    fn test_opponent_outside() {
        assert!(find_paths(&ring(), &trace(&[(5, 5)]), Point::new(0, 0)).is_empty());
        assert!(find_paths(&ring(), &PointSet::new(), Point::new(0, 0)).is_empty());
    }

    #[test]
    fn test_empty_mover() {
        let outcome = PathFinder::new(&PointSet::new(), &trace(&[(1, 1)]))
            .find_with_stats(Point::new(3, 3))
            .unwrap();
        assert!(outcome.paths.is_empty());
        assert_eq!(outcome.stats.expanded, 1);
    }

    #[test]
    fn test_start_outside_mover() {
        let mut mover = ring();
        mover.remove(&Point::new(0, 0));
        assert!(find_paths(&mover, &trace(&[(1, 1)]), Point::new(0, 0)).is_empty());
    }

    #[test]
    fn test_frame_scans_in_order() {
        let mover = trace(&[(1, 1), (0, 0), (2, 1), (0, 2)]);
        let mut frame = Frame::new(Point::new(1, 1));
        let mut seen = Vec::new();
        while let Some(n) = frame.next_neighbour(&mover) {
            seen.push(n);
        }
        assert_eq!(seen, path(&[(0, 0), (0, 2), (2, 1)]));
    }

    #[test]
    fn test_batch_matches_single() {
        let mover = ring();
        let opponent = trace(&[(1, 1)]);
        let starts = path(&[(0, 0), (2, 2), (7, 7)]);
        let batch = find_paths_batch(&mover, &opponent, &starts, SearchConfig::default());
        assert_eq!(batch.len(), 3);
        for (start, result) in starts.iter().zip(batch) {
            assert_eq!(result.unwrap(), find_paths(&mover, &opponent, *start));
        }
    }
}
