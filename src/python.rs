//! Python extension module (`python` feature).
//!
//! Exposes `dots_path.find_paths(trace_mover, trace_opponent, x, y, budget=None,
//! visit_global=False, exact=False)`. The keyword arguments map onto
//! [`SearchConfig`]: `budget` caps node expansions, `visit_global` selects
//! [`VisitPolicy::Global`](crate::search::VisitPolicy::Global) and `exact`
//! selects [`Crossing::Exact`](crate::geometry::Crossing::Exact).
//!
//! Each trace may be any iterable of 2-element sequences of integers. Every
//! item is validated before the search starts:
//! - a wrong item length raises `ValueError`;
//! - a non-integer coordinate raises `TypeError`;
//! - a coordinate outside the 32-bit range raises `ValueError`.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::{InputError, SearchError};
use crate::point::{trace_from_slices, Point, PointSet};
use crate::search::{PathFinder, SearchConfig};

impl From<InputError> for PyErr {
    fn from(err: InputError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<SearchError> for PyErr {
    fn from(err: SearchError) -> PyErr {
        pyo3::exceptions::PyRuntimeError::new_err(err.to_string())
    }
}

/// Read one trace out of an arbitrary Python iterable.
fn extract_trace(trace: &Bound<'_, PyAny>) -> PyResult<PointSet> {
    let items = trace
        .iter()?
        .map(|item| item?.extract::<Vec<i64>>())
        .collect::<PyResult<Vec<_>>>()?;
    Ok(trace_from_slices(items.iter().map(Vec::as_slice))?)
}

/// Find every loop through `(x, y)` over `trace_mover` that encloses a point of
/// `trace_opponent`. Returns a list of loops, each a list of `(x, y)` tuples.
#[pyfunction]
#[pyo3(signature = (trace_mover, trace_opponent, x, y, budget=None, visit_global=false, exact=false))]
fn find_paths(
    py: Python<'_>,
    trace_mover: &Bound<'_, PyAny>,
    trace_opponent: &Bound<'_, PyAny>,
    x: i32,
    y: i32,
    budget: Option<u64>,
    visit_global: bool,
    exact: bool,
) -> PyResult<Vec<Vec<(i32, i32)>>> {
    let mover = extract_trace(trace_mover)?;
    let opponent = extract_trace(trace_opponent)?;
    let config = SearchConfig::from_flags(budget, exact, visit_global);

    let paths = py.allow_threads(|| {
        PathFinder::with_config(&mover, &opponent, config).find(Point::new(x, y))
    })?;

    Ok(paths
        .into_iter()
        .map(|p| p.into_iter().map(<(i32, i32)>::from).collect())
        .collect())
}

#[pymodule]
fn dots_path(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(find_paths, m)?)?;
    Ok(())
}
