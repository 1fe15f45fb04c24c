use itertools::Itertools;
use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

/// Fixed random seed to support repeatable testing
const SEED: [u8; 32] = [
    17, 3, 28, 5, 91, 7, 46, 11, 2, 13, 60, 17, 8, 19, 74, 23, 1, 29, 33, 31, 9, 37, 85, 41, 4,
    43, 52, 47, 6, 53, 20, 59,
];

/// Get a random number generator with a const seed for repeatable testing
pub fn rng_fixed_seed() -> StdRng {
    StdRng::from_seed(SEED)
}

/// Generate `n` random numbers using provided generator
pub fn randn<T>(rng: &mut StdRng, n: usize) -> Vec<T>
where
    Standard: Distribution<T>,
{
    (0..n).map(|_| rng.gen::<T>()).collect()
}

/// Reorder a flattened C-ordered field so that its axes appear in the order
/// given by `perm`; `perm[j]` names the source axis that becomes output
/// axis `j`. Used to exercise axis-order invariance.
pub fn permute_axes<T: Copy>(values: &[T], shape: &[usize], perm: &[usize]) -> Vec<T> {
    let ndims = shape.len();
    assert_eq!(perm.len(), ndims);
    assert_eq!(values.len(), shape.iter().product::<usize>());

    let mut strides = vec![1_usize; ndims];
    for i in (0..ndims - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }

    perm.iter()
        .map(|&p| 0..shape[p])
        .multi_cartesian_product()
        .map(|idx| {
            let flat: usize = idx.iter().zip(perm).map(|(&i, &p)| i * strides[p]).sum();
            values[flat]
        })
        .collect()
}
