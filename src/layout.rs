//! Shape and stride bookkeeping for the flattened grid.
//!
//! The grid is a single flattened buffer in C ordering (last axis
//! fastest-varying). Refinement walks the axes in order, and for each axis
//! breaks the buffer down into 1D lines. A line along axis `k` is addressed
//! by an `(outer, inner)` pair: `outer` enumerates the index combinations of
//! the axes before `k` (already refined), `inner` enumerates the index
//! combinations of the axes after `k` (still at their original counts).
//!
//! All strides are derived from the current shape at the start of each axis
//! pass; nothing is carried over from the previous pass, so the arithmetic
//! stays valid as axes grow.

/// Number of points an axis of `len` points holds after inserting `factor`
/// points into each of its segments.
pub(crate) fn refined_len(len: usize, factor: usize) -> usize {
    (len - 1) * (factor + 1) + 1
}

/// Per-axis point counts of the grid in its current refinement state.
#[derive(Clone, Debug)]
pub(crate) struct GridShape {
    dims: Vec<usize>,
}

impl GridShape {
    pub fn new(dims: &[usize]) -> Self {
        Self {
            dims: dims.to_vec(),
        }
    }

    /// Total number of points in the flattened buffer.
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn ndims(&self) -> usize {
        self.dims.len()
    }

    /// Record that `axis` has been refined.
    pub fn grow(&mut self, axis: usize, factor: usize) {
        self.dims[axis] = refined_len(self.dims[axis], factor);
    }

    /// Derive the addressing for one pass over `axis` from the current
    /// shape.
    pub fn pass(&self, axis: usize, factor: usize) -> AxisPass {
        let len = self.dims[axis];
        let new_len = refined_len(len, factor);
        // Stride between neighbours along the axis: the product of the
        // (still unrefined) axis lengths after it. Identical for the source
        // and destination buffers, since refining an axis changes its own
        // count but not the counts it strides over.
        let jump: usize = self.dims[axis + 1..].iter().product();
        let outer: usize = self.dims[..axis].iter().product();
        AxisPass {
            len,
            new_len,
            jump,
            outer,
            src_block: len * jump,
            dst_block: new_len * jump,
        }
    }
}

/// Flat-index maps for a single axis pass.
///
/// A source line element `i` of line `(outer, inner)` lives at
/// `outer * src_block + i * jump + inner`; the refined point `p` of the
/// same line is written to `outer * dst_block + p * jump + inner`. The
/// destination block stride accounts for the axis's grown point count,
/// which keeps the maps correct for any number of trailing axes.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AxisPass {
    /// Points along the axis before refinement.
    pub len: usize,
    /// Points along the axis after refinement.
    pub new_len: usize,
    /// Stride between neighbours along the axis, shared by both buffers.
    pub jump: usize,
    /// Number of outer repetitions (index combinations of prior axes).
    pub outer: usize,
    /// Source stride between outer repetitions.
    pub src_block: usize,
    /// Destination stride between outer repetitions.
    pub dst_block: usize,
}

impl AxisPass {
    #[inline(always)]
    pub fn src_index(&self, outer: usize, inner: usize, i: usize) -> usize {
        outer * self.src_block + i * self.jump + inner
    }

    #[inline(always)]
    pub fn dst_index(&self, outer: usize, inner: usize, p: usize) -> usize {
        outer * self.dst_block + p * self.jump + inner
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_refined_len() {
        assert_eq!(refined_len(4, 1), 7);
        assert_eq!(refined_len(3, 2), 7);
        assert_eq!(refined_len(5, 0), 5);
        assert_eq!(refined_len(2, 3), 5);
    }

    /// Every source line of every axis pass must cover each flat index of a
    /// 3x2x4 grid exactly once, mirroring the worked example that the index
    /// arithmetic was derived from.
    #[test]
    fn test_lines_partition_the_grid() {
        let shape = GridShape::new(&[3, 2, 4]);
        for axis in 0..3 {
            let pass = shape.pass(axis, 1);
            let mut seen = vec![0_usize; shape.len()];
            for outer in 0..pass.outer {
                for inner in 0..pass.jump {
                    for i in 0..pass.len {
                        seen[pass.src_index(outer, inner, i)] += 1;
                    }
                }
            }
            assert!(seen.iter().all(|&c| c == 1), "axis {axis} double-covers");
        }
    }

    /// Destination indices of one pass must partition the refined extent.
    #[test]
    fn test_refined_lines_partition_the_output() {
        let mut shape = GridShape::new(&[3, 3, 3]);
        // Refine axis 0 first so the pass over axis 1 sees a mixed shape,
        // the case where the destination block stride differs from the
        // source one.
        shape.grow(0, 1);
        let pass = shape.pass(1, 1);
        let refined_total = pass.outer * pass.new_len * pass.jump;
        let mut seen = vec![0_usize; refined_total];
        for outer in 0..pass.outer {
            for inner in 0..pass.jump {
                for p in 0..pass.new_len {
                    seen[pass.dst_index(outer, inner, p)] += 1;
                }
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_single_axis_passes_are_contiguous() {
        let shape = GridShape::new(&[6]);
        let pass = shape.pass(0, 2);
        assert_eq!(pass.jump, 1);
        assert_eq!(pass.outer, 1);
        assert_eq!(pass.src_index(0, 0, 3), 3);
        assert_eq!(pass.dst_index(0, 0, 9), 9);
    }
}
