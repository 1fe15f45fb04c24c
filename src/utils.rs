//! Convenience methods for constructing regular grids and sample fields,
//! echoing (but not exactly matching) the helpers common in scripting
//! languages.

use itertools::Itertools;
use num_traits::Float;

/// Generates `n` evenly spaced values from `start` to `stop`, including the
/// endpoint.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    let dx: T = (stop - start) / T::from(n - 1).unwrap();
    (0..n).map(|i| start + T::from(i).unwrap() * dx).collect()
}

/// Generates the coordinate tuples of the grid spanned by `axes`, in C
/// ordering (the last axis varies fastest), one tuple per grid point.
pub fn meshgrid<T>(axes: &[Vec<T>]) -> Vec<Vec<T>>
where
    T: Float,
{
    axes.iter()
        .map(|ax| ax.iter().copied())
        .multi_cartesian_product()
        .collect()
}
