//! N-dimensional grid refinement by separable natural-cubic-spline
//! interpolation.
//!
//! The field is refined one axis at a time: every 1D line along the current
//! axis is fitted with a natural cubic spline and re-emitted with `factor`
//! extra points per segment, then the next axis is processed on the denser
//! intermediate grid. Because each line's fit depends only on samples that
//! share its other indices, the axes are mathematically independent and the
//! final grid does not depend on the order in which they are processed.
//!
//! Output is staged through two same-capacity buffers allocated up front at
//! the final refined size; each axis pass reads the current buffer and
//! writes the scratch one, then the roles swap. The retired buffer is
//! zeroed before reuse so that no stale samples survive into the unused
//! tail of the next pass.
//!
//! ```rust
//! use refinen::refinen;
//!
//! // A 3 x 3 field sampled with unit spacing
//! let vals = [
//!     0.0, 1.0, 0.0, //
//!     1.0, 2.0, 1.0, //
//!     0.0, 1.0, 0.0,
//! ];
//!
//! // Insert one spline point between every pair of neighbours on each axis
//! let (shape, refined) = refinen(&vals, &[3, 3], 1.0, 1).unwrap();
//!
//! assert_eq!(shape, vec![5, 5]);
//! assert_eq!(refined.len(), 25);
//! // The original samples reappear on the coarse sublattice
//! assert_eq!(refined[0], 0.0);
//! assert_eq!(refined[12], 2.0);
//! ```

use num_traits::Float;
use tracing::debug;

use crate::axis::AxisInterpolator;
use crate::error::{RefineError, RefineResult};
use crate::layout::{refined_len, GridShape};

/// The two staging buffers for the axis passes.
///
/// Both are allocated once at the final refined capacity, which bounds
/// every intermediate extent. Ownership of the data moves between them by
/// swap only; nothing is copied and nothing aliases.
struct PingPong<T> {
    front: Vec<T>,
    back: Vec<T>,
}

impl<T: Float> PingPong<T> {
    fn new(capacity: usize, seed: &[T]) -> RefineResult<Self> {
        let mut front = Vec::new();
        front
            .try_reserve_exact(capacity)
            .map_err(|source| RefineError::Allocation {
                points: capacity,
                source,
            })?;
        front.extend_from_slice(seed);
        front.resize(capacity, T::zero());

        let mut back = Vec::new();
        back.try_reserve_exact(capacity)
            .map_err(|source| RefineError::Allocation {
                points: capacity,
                source,
            })?;
        back.resize(capacity, T::zero());

        Ok(Self { front, back })
    }

    /// Current data and the scratch destination for one axis pass.
    fn split(&mut self) -> (&[T], &mut [T]) {
        (&self.front, &mut self.back)
    }

    /// Promote the scratch buffer to current and zero the retired one.
    fn flip(&mut self) {
        core::mem::swap(&mut self.front, &mut self.back);
        self.back.fill(T::zero());
    }

    fn into_front(self) -> Vec<T> {
        self.front
    }
}

/// A validated refinement of a regularly gridded scalar field.
///
/// The grid is a flattened sequence in C ordering (last axis
/// fastest-varying) with the same spacing on every axis; `factor` points
/// are inserted between each pair of neighbouring samples along every
/// axis, so an axis of `n` points grows to `(n - 1) * (factor + 1) + 1`.
///
/// The spacing is a single scalar by design: fields sampled with genuinely
/// different spacings per axis are outside this type's contract, and no
/// attempt is made to detect or repair that case.
#[derive(Debug)]
pub struct NaturalSplineRefiner<T: Float> {
    shape: Vec<usize>,
    step: T,
    factor: usize,
}

impl<T: Float> NaturalSplineRefiner<T> {
    /// Validate a refinement of a grid with the given per-axis point
    /// counts, uniform spacing, and per-segment insertion count.
    ///
    /// # Errors
    /// * If the shape is empty
    /// * If any axis has fewer than 2 points
    /// * If the spacing is zero, negative, or not finite
    /// * If the refined grid would overflow the addressable range
    pub fn new(shape: &[usize], step: T, factor: usize) -> RefineResult<Self> {
        if shape.is_empty() {
            return Err(RefineError::NoAxes);
        }
        for (axis, &len) in shape.iter().enumerate() {
            if len < 2 {
                return Err(RefineError::AxisTooShort { axis, len });
            }
        }
        if !(step.is_finite() && step > T::zero()) {
            return Err(RefineError::InvalidSpacing);
        }

        // The refined extent must be addressable before any buffer is
        // sized from it.
        let per = factor.checked_add(1).ok_or(RefineError::SizeOverflow)?;
        let mut capacity: usize = 1;
        for &len in shape {
            let grown = (len - 1)
                .checked_mul(per)
                .and_then(|g| g.checked_add(1))
                .ok_or(RefineError::SizeOverflow)?;
            capacity = capacity
                .checked_mul(grown)
                .ok_or(RefineError::SizeOverflow)?;
        }

        Ok(Self {
            shape: shape.to_vec(),
            step,
            factor,
        })
    }

    /// Per-axis point counts of the input grid.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of points inserted inside each original segment.
    pub fn factor(&self) -> usize {
        self.factor
    }

    /// Per-axis point counts of the refined grid.
    pub fn refined_shape(&self) -> Vec<usize> {
        self.shape
            .iter()
            .map(|&len| refined_len(len, self.factor))
            .collect()
    }

    /// Total number of points in the refined grid.
    pub fn refined_len(&self) -> usize {
        self.refined_shape().iter().product()
    }

    /// Refine the flattened field and return the denser flattened field.
    ///
    /// Original samples reappear bit-exactly at their grid-aligned
    /// positions in the output; with `factor == 0` the output equals the
    /// input. Interpolated values may overshoot between samples, as
    /// natural cubic splines do.
    ///
    /// # Errors
    /// * If `samples.len()` does not match the declared shape
    /// * If either staging buffer cannot be allocated
    pub fn refine(&self, samples: &[T]) -> RefineResult<Vec<T>> {
        let mut shape = GridShape::new(&self.shape);
        let expected = shape.len();
        if samples.len() != expected {
            return Err(RefineError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }

        let capacity = self.refined_len();
        let max_len = self.shape.iter().copied().max().unwrap_or(0);
        let mut line = AxisInterpolator::new(max_len, self.step, self.factor)?;
        let mut buffers = PingPong::new(capacity, samples)?;

        debug!(
            axes = shape.ndims(),
            points = expected,
            refined = capacity,
            factor = self.factor,
            "refining grid"
        );

        for axis in 0..shape.ndims() {
            let pass = shape.pass(axis, self.factor);
            let (src, dst) = buffers.split();
            for outer in 0..pass.outer {
                for inner in 0..pass.jump {
                    line.refine_line(src, dst, &pass, outer, inner);
                }
            }
            buffers.flip();
            shape.grow(axis, self.factor);
            debug!(axis, from = pass.len, to = pass.new_len, "axis refined");
        }

        Ok(buffers.into_front())
    }
}

/// Refine a flattened field in one call.
///
/// Returns the refined per-axis point counts and the refined samples.
/// Convenience wrapper over [`NaturalSplineRefiner`]; see its
/// documentation for the grid conventions and error conditions.
pub fn refinen<T: Float>(
    samples: &[T],
    shape: &[usize],
    step: T,
    factor: usize,
) -> RefineResult<(Vec<usize>, Vec<T>)> {
    let refiner = NaturalSplineRefiner::new(shape, step, factor)?;
    let refined = refiner.refine(samples)?;
    Ok((refiner.refined_shape(), refined))
}
