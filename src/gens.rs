//! Generating sets for the classical permutation groups over a domain.

use crate::domain::Domain;
use crate::error::Error;
use crate::loops::PermLoop;
use crate::perm::Permutation;

fn require_points<D: Domain>(min: usize) -> Result<(), Error> {
    if D::SIZE < min {
        return Err(Error::DomainTooSmall { size: D::SIZE, min });
    }
    Ok(())
}

/// Generators of the cyclic group: the single full cycle
/// `(start start+1 … fin)`.
pub fn cyclic<D: Domain>() -> Result<Vec<Permutation<D>>, Error> {
    require_points::<D>(2)?;
    let cycle = PermLoop::new(D::points().collect())?;
    Ok(vec![Permutation::from_loops([cycle])])
}

/// Generators of the symmetric group: the transpositions
/// `(start start+i)` for `1 <= i <= n-1`.
pub fn symmetric<D: Domain>() -> Result<Vec<Permutation<D>>, Error> {
    require_points::<D>(2)?;
    (1..D::SIZE)
        .map(|i| {
            let swap = PermLoop::new(vec![D::start(), D::from_index(i)])?;
            Ok(Permutation::from_loops([swap]))
        })
        .collect()
}

/// Minimal generators of the symmetric group: the full cycle together with
/// the transposition `(start start+1)`.
pub fn min_symmetric<D: Domain>() -> Result<Vec<Permutation<D>>, Error> {
    let mut gens = cyclic::<D>()?;
    let swap = PermLoop::new(vec![D::start(), D::from_index(1)])?;
    gens.push(Permutation::from_loops([swap]));
    Ok(gens)
}

/// Generators of the alternating group: the 3-cycles
/// `(start start+1 start+i)` for `2 <= i <= n-1`.
pub fn alternating<D: Domain>() -> Result<Vec<Permutation<D>>, Error> {
    require_points::<D>(3)?;
    (2..D::SIZE)
        .map(|i| {
            let rotation = PermLoop::new(vec![D::start(), D::from_index(1), D::from_index(i)])?;
            Ok(Permutation::from_loops([rotation]))
        })
        .collect()
}
