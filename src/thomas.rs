//! Tridiagonal solve for the natural-cubic-spline continuity system.
//!
//! On an equispaced grid the spline continuity constraints collapse to a
//! tridiagonal system with constant coefficients: sub-diagonal 1, diagonal
//! 4, super-diagonal 1. The spacing cancels out of the matrix entirely and
//! only scales the right-hand side, so the generic Thomas recurrence
//! reduces to a closed form with a single reciprocal per row:
//!
//! ```text
//!     | 4  1          | | x_0   |   | d_0   |
//!     | 1  4  1       | | x_1   |   | d_1   |
//!     |    .  .  .    | |  .    | = |  .    |
//!     |       1  4  1 | |  .    |   |  .    |
//!     |          1  4 | | x_m-1 |   | d_m-1 |
//! ```
//!
//! The unknowns are the curvatures at the m interior knots of a line; the
//! endpoint curvatures are pinned to zero by the natural boundary condition
//! and never enter the system. Those constants encode the derivation — a
//! variable-coefficient solver would be a different algorithm, not a
//! generalization of this one.

use num_traits::Float;

/// Solver scratch for the fixed-coefficient system, reused across lines so
/// that solving allocates nothing.
pub(crate) struct ThomasSolver<T> {
    /// Modified super-diagonal from the forward sweep.
    cprime: Vec<T>,
    /// Modified right-hand side from the forward sweep.
    dprime: Vec<T>,
}

impl<T: Float> ThomasSolver<T> {
    /// Build a solver able to handle systems of up to `max_unknowns` rows.
    pub fn new(max_unknowns: usize) -> Self {
        Self {
            cprime: vec![T::zero(); max_unknowns],
            dprime: vec![T::zero(); max_unknowns],
        }
    }

    /// Solve for the interior curvatures given the interior right-hand
    /// sides `d`, writing the solution into `x`.
    ///
    /// Diagonal dominance keeps every pivot `4 - c'` strictly positive, so
    /// no division here can blow up. Callers guarantee `d` is non-empty;
    /// lines too short to have an interior knot are handled before the
    /// solver is ever involved.
    pub fn solve(&mut self, d: &[T], x: &mut [T]) {
        let m = d.len();
        debug_assert!(m >= 1);
        debug_assert!(x.len() == m);
        debug_assert!(m <= self.cprime.len());

        let one = T::one();
        let four = one + one + one + one;

        if m == 1 {
            x[0] = d[0] / four;
            return;
        }

        let cp = &mut self.cprime[..m];
        let dp = &mut self.dprime[..m];

        // Forward sweep
        cp[0] = one / four;
        dp[0] = d[0] / four;
        for i in 1..m - 1 {
            cp[i] = one / (four - cp[i - 1]);
            dp[i] = (d[i] - dp[i - 1]) * cp[i];
        }

        // Back substitution; the last row has no super-diagonal term.
        x[m - 1] = (d[m - 1] - dp[m - 2]) / (four - cp[m - 2]);
        for i in (0..m - 1).rev() {
            x[i] = dp[i] - cp[i] * x[i + 1];
        }
    }
}
