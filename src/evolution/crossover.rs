use super::mutation::Mutator;
use crate::error::NetworkError;
use crate::neural::NetworkState;
use rand::Rng;

/// Single-point crossover over the flat parameter buffer.
///
/// The daughter takes the mother's parameters before `pivot` and the father's from
/// `pivot` on; the son takes the complementary split. Every copied value goes through
/// the mutator.
pub fn crossover_at<R: Rng + ?Sized>(
    mother: &NetworkState,
    father: &NetworkState,
    pivot: usize,
    mutator: &Mutator,
    rng: &mut R,
) -> Result<(NetworkState, NetworkState), NetworkError> {
    if !mother.same_shape(father) {
        return Err(NetworkError::DimensionMismatch {
            expected: mother.dimension(),
            actual: father.dimension(),
        });
    }

    let pivot = pivot.min(mother.dimension());
    let mut daughter = mother.clone();
    let mut son = father.clone();

    let parents = mother.as_slice().iter().zip(father.as_slice()).enumerate();
    for ((i, (&m, &f)), (d, s)) in parents.zip(
        daughter
            .as_mut_slice()
            .iter_mut()
            .zip(son.as_mut_slice().iter_mut()),
    ) {
        let (from_first, from_second) = if i < pivot { (m, f) } else { (f, m) };
        *d = mutator.mutate(from_first, rng);
        *s = mutator.mutate(from_second, rng);
    }

    Ok((daughter, son))
}

/// Crossover at a pivot drawn uniformly from `[0, dimension)`.
pub fn crossover<R: Rng + ?Sized>(
    mother: &NetworkState,
    father: &NetworkState,
    mutator: &Mutator,
    rng: &mut R,
) -> Result<(NetworkState, NetworkState), NetworkError> {
    let pivot = if mother.dimension() == 0 {
        0
    } else {
        rng.gen_range(0..mother.dimension())
    };
    crossover_at(mother, father, pivot, mutator, rng)
}
