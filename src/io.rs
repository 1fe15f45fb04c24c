//! Line-oriented text input and output for gridded fields.
//!
//! The format is the one produced and consumed by the command-line tool:
//! `#` and `%` begin comments (leading or trailing), blank lines are
//! ignored, a line starting with `N` (or `n`) declares the per-axis point
//! counts, and every other line is a data row carrying one coordinate per
//! axis followed by the sample value, whitespace-delimited:
//!
//! ```text
//! N   3   3
//! # q0    q1      value
//!   0.0   0.0     1.25
//!   0.0   0.5     1.5
//!   ...
//! ```
//!
//! Rows are expected in C ordering, the last declared axis varying
//! fastest. The loader keeps only what refinement needs: the declared
//! shape, the first coordinate of each axis, the spacing (taken from the
//! last axis's first two rows, which are one step apart), and the flat
//! sample sequence. Whether the declared shape matches the number of rows
//! is the refiner's check, not the loader's.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading a gridded text file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The input file could not be opened.
    #[error("cannot open {}", path.display())]
    Open {
        path: PathBuf,
        source: io::Error,
    },

    /// Reading from the input failed mid-stream.
    #[error("failed while reading input")]
    Read(#[from] io::Error),

    /// A grid needs at least one axis.
    #[error("dimension count must be at least 1")]
    ZeroDimension,

    /// The shape line declares fewer axis lengths than the grid has axes.
    #[error("line {line}: shape line declares fewer than {expected} axis lengths")]
    ShortShapeLine { line: usize, expected: usize },

    /// A data row is missing coordinate or value columns.
    #[error("line {line}: expected {expected} columns, found {found}")]
    ShortRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A column could not be parsed as a number.
    #[error("line {line}: cannot parse {token:?} as a number")]
    BadNumber { line: usize, token: String },

    /// No `N` shape line was found anywhere in the input.
    #[error("input declares no grid shape (missing the N line)")]
    MissingShape,

    /// Fewer than two data rows; the grid spacing cannot be derived.
    #[error("input holds fewer than two samples; grid spacing is undefined")]
    TooFewRows,
}

/// A gridded field loaded from text, with the geometry needed to refine
/// and reprint it.
#[derive(Debug, Clone, PartialEq)]
pub struct GridData {
    /// Declared per-axis point counts.
    pub shape: Vec<usize>,
    /// First coordinate of each axis.
    pub origins: Vec<f64>,
    /// Uniform grid spacing, derived from the last (fastest-varying) axis.
    pub step: f64,
    /// Flattened samples in C ordering.
    pub values: Vec<f64>,
}

/// Load a gridded field with `dimension` axes from a text file.
pub fn load_grid(path: &Path, dimension: usize) -> Result<GridData, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_grid(BufReader::new(file), dimension)
}

/// Read a gridded field with `dimension` axes from any buffered reader.
pub fn read_grid<R: BufRead>(reader: R, dimension: usize) -> Result<GridData, LoadError> {
    if dimension == 0 {
        return Err(LoadError::ZeroDimension);
    }

    let mut shape: Option<Vec<usize>> = None;
    let mut origins: Vec<f64> = Vec::new();
    let mut second_row_last: Option<f64> = None;
    let mut values: Vec<f64> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = i + 1;
        let text = line.split(['#', '%']).next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        if text.starts_with(['N', 'n']) {
            let tokens: Vec<&str> = text[1..].split_whitespace().collect();
            if tokens.len() < dimension {
                return Err(LoadError::ShortShapeLine {
                    line: lineno,
                    expected: dimension,
                });
            }
            let mut dims = Vec::with_capacity(dimension);
            for tok in &tokens[..dimension] {
                dims.push(tok.parse::<usize>().map_err(|_| LoadError::BadNumber {
                    line: lineno,
                    token: (*tok).to_string(),
                })?);
            }
            shape = Some(dims);
            continue;
        }

        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() < dimension + 1 {
            return Err(LoadError::ShortRow {
                line: lineno,
                expected: dimension + 1,
                found: tokens.len(),
            });
        }
        let mut fields = Vec::with_capacity(dimension + 1);
        for tok in &tokens[..dimension + 1] {
            fields.push(tok.parse::<f64>().map_err(|_| LoadError::BadNumber {
                line: lineno,
                token: (*tok).to_string(),
            })?);
        }

        if values.is_empty() {
            origins = fields[..dimension].to_vec();
        } else if values.len() == 1 {
            second_row_last = Some(fields[dimension - 1]);
        }
        values.push(fields[dimension]);
    }

    let shape = shape.ok_or(LoadError::MissingShape)?;
    let step = second_row_last.ok_or(LoadError::TooFewRows)? - origins[dimension - 1];

    debug!(rows = values.len(), ?shape, step, "grid loaded");

    Ok(GridData {
        shape,
        origins,
        step,
        values,
    })
}

/// Write a gridded field in the text layout the loader reads: an `N`
/// header, then one tab-separated coordinate+value row per grid point in C
/// ordering, with blank separator lines at every trailing-axes block
/// boundary (which keeps the output plottable per line/plane).
pub fn write_grid<W: Write>(
    w: &mut W,
    shape: &[usize],
    origins: &[f64],
    step: f64,
    values: &[f64],
) -> io::Result<()> {
    writeln!(w, "N\t{}", shape.iter().join("\t"))?;

    let rows = shape.iter().map(|&n| 0..n).multi_cartesian_product();
    for (i, idx) in rows.enumerate() {
        let mut block = 1;
        for &n in shape.iter().rev() {
            block *= n;
            if i % block == 0 {
                writeln!(w)?;
            }
        }
        for (axis, &k) in idx.iter().enumerate() {
            write!(w, "\t{:.6}", origins[axis] + k as f64 * step)?;
        }
        writeln!(w, "\t{:.6}", values[i])?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    const SAMPLE_2D: &str = "\
# a 3 x 2 field
% alternate comment marker
N 3 2

0.0  0.0  1.0
0.0  0.5  2.0   # trailing comment
1.0  0.0  3.0
1.0  0.5  4.0
2.0  0.0  5.0
2.0  0.5  6.0
";

    #[test]
    fn test_read_2d() {
        let grid = read_grid(Cursor::new(SAMPLE_2D), 2).unwrap();
        assert_eq!(grid.shape, vec![3, 2]);
        assert_eq!(grid.origins, vec![0.0, 0.0]);
        assert!((grid.step - 0.5).abs() < 1e-14);
        assert_eq!(grid.values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_shape_line_may_follow_data() {
        let text = "0.0 1.0\n1.0 2.0\nn 2\n";
        let grid = read_grid(Cursor::new(text), 1).unwrap();
        assert_eq!(grid.shape, vec![2]);
        assert_eq!(grid.values, vec![1.0, 2.0]);
        assert!((grid.step - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let text = "N 2\n0.0 1.0 junk\n1.0 2.0\n";
        let grid = read_grid(Cursor::new(text), 1).unwrap();
        assert_eq!(grid.values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_missing_shape_line() {
        let text = "0.0 1.0\n1.0 2.0\n";
        assert!(matches!(
            read_grid(Cursor::new(text), 1).unwrap_err(),
            LoadError::MissingShape
        ));
    }

    #[test]
    fn test_short_shape_line() {
        let text = "N 4\n0.0 0.0 1.0\n";
        assert!(matches!(
            read_grid(Cursor::new(text), 2).unwrap_err(),
            LoadError::ShortShapeLine { line: 1, expected: 2 }
        ));
    }

    #[test]
    fn test_short_row() {
        let text = "N 2 2\n0.0 1.0\n";
        assert!(matches!(
            read_grid(Cursor::new(text), 2).unwrap_err(),
            LoadError::ShortRow {
                line: 2,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_bad_number() {
        let text = "N 2\n0.0 one\n";
        match read_grid(Cursor::new(text), 1).unwrap_err() {
            LoadError::BadNumber { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "one");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_single_row_has_no_spacing() {
        let text = "N 1\n0.0 1.0\n";
        assert!(matches!(
            read_grid(Cursor::new(text), 1).unwrap_err(),
            LoadError::TooFewRows
        ));
    }

    #[test]
    fn test_zero_dimension() {
        assert!(matches!(
            read_grid(Cursor::new("N 2\n"), 0).unwrap_err(),
            LoadError::ZeroDimension
        ));
    }

    #[test]
    fn test_write_1d_layout() {
        let mut out = Vec::new();
        write_grid(&mut out, &[2], &[0.0], 0.5, &[1.0, 2.0]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "N\t2\n\n\t0.000000\t1.000000\n\t0.500000\t2.000000\n");
    }

    #[test]
    fn test_write_2d_groups_blocks() {
        let mut out = Vec::new();
        write_grid(&mut out, &[2, 2], &[0.0, 0.0], 1.0, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let text = String::from_utf8(out).unwrap();
        // A blank line separates the two rows of the outer axis.
        let after_header = text.split_once('\n').unwrap().1;
        assert!(after_header.contains("\t2.000000\n\n\t1.000000\t0.000000\t3.000000\n"));
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let mut out = Vec::new();
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        write_grid(&mut out, &[3, 2], &[-1.0, 2.0], 0.25, &values).unwrap();

        let grid = read_grid(Cursor::new(out), 2).unwrap();
        assert_eq!(grid.shape, vec![3, 2]);
        assert_eq!(grid.origins, vec![-1.0, 2.0]);
        assert!((grid.step - 0.25).abs() < 1e-12);
        assert_eq!(grid.values, values.to_vec());
    }
}
