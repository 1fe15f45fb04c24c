//! Command-line driver: load a gridded field from a text file, refine it
//! with natural cubic splines, and print the denser field to stdout.

use std::env;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use refinen::io::{load_grid, write_grid};
use refinen::NaturalSplineRefiner;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(path) = args.first() else {
        bail!("usage: refinen <input-file> [dimension] [factor]");
    };
    let dimension = match args.get(1) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("dimension {raw:?} is not an integer"))?,
        None => 2,
    };
    let factor = match args.get(2) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("refinement factor {raw:?} is not an integer"))?,
        None => 1,
    };

    let grid = load_grid(Path::new(path), dimension)?;
    let refiner = NaturalSplineRefiner::new(&grid.shape, grid.step, factor)
        .with_context(|| format!("grid in {path} cannot be refined"))?;
    let refined = refiner.refine(&grid.values)?;

    // The printed grid is denser, so its spacing shrinks accordingly.
    let step = grid.step / (factor as f64 + 1.0);
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_grid(
        &mut out,
        &refiner.refined_shape(),
        &grid.origins,
        step,
        &refined,
    )?;
    out.flush()?;
    Ok(())
}
