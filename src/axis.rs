//! Natural-cubic-spline refinement of one strided 1D line.
//!
//! Each line of `n` samples is fitted with a piecewise cubic
//!
//! ```text
//!     f(t) = a_i + b_i t + c_i t^2 + d_i t^3,     t in [0, h]
//! ```
//!
//! per segment, where `a_i` is the sample at the segment start and the
//! curvatures `c_i` come from the tridiagonal continuity system (see
//! [`crate::thomas`]). The natural boundary pins `c_0 = c_{n-1} = 0`; the
//! remaining coefficients follow from the curvatures:
//!
//! ```text
//!     d_i = (c_{i+1} - c_i) / (3 h)
//!     b_i = (a_{i+1} - a_i) / h - h/3 (2 c_i + c_{i+1})
//! ```
//!
//! The refined line carries `factor` extra points inside every segment,
//! evaluated at offsets j·h/(factor+1). Evaluating at offset zero returns
//! `a_i` untouched, so every original sample reappears bit-exactly in the
//! refined line; the final original sample is stored directly rather than
//! evaluated.
//!
//! Lines are read and written through the strided index maps of an
//! [`AxisPass`](crate::layout::AxisPass) rather than gathered into a
//! contiguous copy, and all intermediate storage lives in the interpolator,
//! so refining a line allocates nothing.

use num_traits::{Float, NumCast};

use crate::error::{RefineError, RefineResult};
use crate::layout::AxisPass;
use crate::thomas::ThomasSolver;

/// Spline evaluation state for the lines of one grid, reused across every
/// line of every axis pass.
pub(crate) struct AxisInterpolator<T> {
    solver: ThomasSolver<T>,
    /// Interior right-hand sides, length n - 2 for the current line.
    rhs: Vec<T>,
    /// Knot curvatures including the pinned zero endpoints, length n.
    curv: Vec<T>,
    /// Within-segment evaluation offsets j·h/(factor+1) for j in [0, factor].
    offsets: Vec<T>,
    /// Number of output points per segment, factor + 1.
    per_segment: usize,
    /// Grid spacing h.
    step: T,
    /// Right-hand-side scale 3 / h^2.
    rhs_scale: T,
    /// Coefficient divisor 3 h.
    three_h: T,
    /// Slope correction divisor h / 3.
    third_h: T,
}

impl<T: Float> AxisInterpolator<T> {
    /// Set up scratch for lines of up to `max_len` samples with the given
    /// spacing and refinement factor.
    ///
    /// # Errors
    /// * If `factor + 1` is not representable in `T`
    pub fn new(max_len: usize, step: T, factor: usize) -> RefineResult<Self> {
        let one = T::one();
        let three = one + one + one;
        let substeps =
            <T as NumCast>::from(factor + 1).ok_or(RefineError::Unrepresentable(factor + 1))?;
        let substep = step / substeps;

        let mut offsets = Vec::with_capacity(factor + 1);
        for j in 0..=factor {
            let jf = <T as NumCast>::from(j).ok_or(RefineError::Unrepresentable(j))?;
            offsets.push(substep * jf);
        }

        Ok(Self {
            solver: ThomasSolver::new(max_len.saturating_sub(2)),
            rhs: vec![T::zero(); max_len.saturating_sub(2)],
            curv: vec![T::zero(); max_len],
            offsets,
            per_segment: factor + 1,
            step,
            rhs_scale: three / (step * step),
            three_h: three * step,
            third_h: step / three,
        })
    }

    /// Refine the line `(outer, inner)` of the pass, reading samples from
    /// `src` and writing `pass.new_len` samples into `dst` at the pass's
    /// destination indices.
    pub fn refine_line(
        &mut self,
        src: &[T],
        dst: &mut [T],
        pass: &AxisPass,
        outer: usize,
        inner: usize,
    ) {
        let n = pass.len;
        let m = n - 2;

        // Curvatures at the interior knots; a two-point line has none and
        // degenerates to a straight segment.
        self.curv[0] = T::zero();
        self.curv[n - 1] = T::zero();
        if n > 2 {
            let two = T::one() + T::one();
            for k in 0..m {
                let a0 = src[pass.src_index(outer, inner, k)];
                let a1 = src[pass.src_index(outer, inner, k + 1)];
                let a2 = src[pass.src_index(outer, inner, k + 2)];
                self.rhs[k] = self.rhs_scale * (a0 - two * a1 + a2);
            }
            self.solver.solve(&self.rhs[..m], &mut self.curv[1..n - 1]);
        }

        for i in 0..n - 1 {
            let a0 = src[pass.src_index(outer, inner, i)];
            let a1 = src[pass.src_index(outer, inner, i + 1)];
            let c0 = self.curv[i];
            let c1 = self.curv[i + 1];
            let b = (a1 - a0) / self.step - self.third_h * (c0 + c0 + c1);
            let d = (c1 - c0) / self.three_h;

            let base = i * self.per_segment;
            for (j, &t) in self.offsets.iter().enumerate() {
                let t2 = t * t;
                dst[pass.dst_index(outer, inner, base + j)] =
                    a0 + (b * t) + (c0 * t2) + (d * t2 * t);
            }
        }

        // The last original sample is emitted exactly once, unevaluated.
        dst[pass.dst_index(outer, inner, (n - 1) * self.per_segment)] =
            src[pass.src_index(outer, inner, n - 1)];
    }
}
