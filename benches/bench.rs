use criterion::*;
use refinen::refinen;
use refinen::utils::linspace;

/// Build a smooth synthetic field over a cubic grid of `size` points per
/// axis.
fn gen_field(ndims: usize, size: usize) -> (Vec<usize>, Vec<f64>) {
    let shape = vec![size; ndims];
    let n: usize = shape.iter().product();
    let vals: Vec<f64> = linspace(0.0, 8.0, n).iter().map(|x| (x * 1.7).sin()).collect();
    (shape, vals)
}

fn bench_refine(c: &mut Criterion) {
    for (ndims, size) in [(1_usize, 4096_usize), (2, 64), (3, 16)] {
        let mut group = c.benchmark_group(format!("Refine_{ndims}D_{size}-grid"));
        let (shape, vals) = gen_field(ndims, size);
        let n: usize = shape.iter().product();

        for factor in [1_usize, 3, 7] {
            group.throughput(Throughput::Elements(n as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{size}x{ndims}D"), factor),
                &factor,
                |b, &factor| {
                    b.iter(|| black_box(refinen(&vals, &shape, 1.0, factor).unwrap()));
                },
            );
        }
        group.finish();
    }
}

criterion_group!(benches, bench_refine);
criterion_main!(benches);
