//! Random group elements by product replacement.
//!
//! The generator keeps a tuple of group elements seeded from the generating
//! set and repeatedly replaces a random entry by its product with another
//! random entry (or its inverse), on a random side. An accumulator multiplied
//! along produces the returned elements. After a short burn-in the walk mixes
//! well enough for practical use.
//!
//! The random source is injected so tests can run deterministically; a
//! convenience constructor uses the thread-local RNG.

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::domain::Domain;
use crate::error::Error;
use crate::perm::Permutation;

/// Number of burn-in updates performed before the first element is handed
/// out.
pub const DEFAULT_BURNIN: usize = 10;

/// Smallest allowed state tuple.
const MIN_STATE: usize = 10;

/// Stateful random element generator for the group generated by a set of
/// permutations.
///
/// Holds mutable state, so a shared instance needs external synchronization.
pub struct RandomGen<D: Domain, R: Rng> {
    state: Vec<Permutation<D>>,
    accum: Permutation<D>,
    rng: R,
}

impl<D: Domain> RandomGen<D, ThreadRng> {
    /// Default configuration with the thread-local RNG.
    pub fn from_gens(gens: &[Permutation<D>]) -> Result<Self, Error> {
        Self::new(gens, rand::thread_rng())
    }
}

impl<D: Domain, R: Rng> RandomGen<D, R> {
    /// Default state size and burn-in with the given random source.
    pub fn new(gens: &[Permutation<D>], rng: R) -> Result<Self, Error> {
        Self::with_options(gens, MIN_STATE, DEFAULT_BURNIN, rng)
    }

    /// Custom state size and burn-in count.
    ///
    /// The state tuple holds `max(r, 10, |gens|)` entries, filled by cycling
    /// through the generators.
    pub fn with_options(
        gens: &[Permutation<D>],
        r: usize,
        burnin: usize,
        rng: R,
    ) -> Result<Self, Error> {
        if gens.is_empty() {
            return Err(Error::TrivialGenerators);
        }
        let size = r.max(MIN_STATE).max(gens.len());
        let state = gens.iter().cycle().take(size).cloned().collect();
        let mut this = RandomGen {
            state,
            accum: Permutation::identity(),
            rng,
        };
        for _ in 0..burnin {
            this.advance();
        }
        Ok(this)
    }

    /// One product replacement step.
    fn advance(&mut self) {
        let r = self.state.len();
        let s = self.rng.gen_range(0..r);
        // Draw t uniformly among the indices other than s.
        let mut t = self.rng.gen_range(0..r - 1);
        if t >= s {
            t += 1;
        }
        let exp: i64 = if self.rng.gen() { 1 } else { -1 };
        let factor = self.state[t].pow(exp);

        if self.rng.gen() {
            // x[s] := x[s] · x[t]^e, accumulated on the right.
            self.state[s].rmul(&factor);
            let replaced = self.state[s].clone();
            self.accum.rmul(&replaced);
        } else {
            // x[s] := x[t]^e · x[s], accumulated on the left.
            self.state[s].lmul(&factor);
            let replaced = self.state[s].clone();
            self.accum.lmul(&replaced);
        }
    }

    /// Advance the walk and return the next pseudo-random group element.
    pub fn next_element(&mut self) -> Permutation<D> {
        self.advance();
        self.accum.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UPoint;
    use crate::gens;
    use crate::group::all_elements;
    use crate::loops::PermLoop;

    use rand_pcg::Pcg64Mcg;

    type U5 = UPoint<1, 5>;

    fn perm(loops: &[&[u32]]) -> Permutation<U5> {
        Permutation::from_loops(loops.iter().map(|elems| {
            PermLoop::new(elems.iter().map(|&e| UPoint::new(e)).collect()).unwrap()
        }))
    }

    #[test]
    fn elements_stay_in_the_group() {
        let xgens = vec![perm(&[&[1, 2, 4, 3]]), perm(&[&[1, 2, 5, 4]])];
        let members = all_elements(&xgens);
        assert_eq!(members.len(), 20);

        let mut random = RandomGen::new(&xgens, Pcg64Mcg::new(42)).unwrap();
        for _ in 0..50 {
            let elt = random.next_element();
            assert!(members.contains(&elt), "{} is not a group element", elt);
        }
    }

    #[test]
    fn deterministic_under_a_fixed_seed() {
        let cgens = gens::min_symmetric::<U5>().unwrap();
        let mut a = RandomGen::new(&cgens, Pcg64Mcg::new(7)).unwrap();
        let mut b = RandomGen::new(&cgens, Pcg64Mcg::new(7)).unwrap();
        for _ in 0..20 {
            assert_eq!(a.next_element(), b.next_element());
        }
    }

    #[test]
    fn walk_leaves_the_identity() {
        let cgens = gens::cyclic::<U5>().unwrap();
        let mut random = RandomGen::new(&cgens, Pcg64Mcg::new(3)).unwrap();
        let some_moved = (0..20).any(|_| !random.next_element().is_identity());
        assert!(some_moved);
    }

    #[test]
    fn state_size_is_clamped() {
        let sgens = gens::symmetric::<UPoint<1, 20>>().unwrap();
        assert_eq!(sgens.len(), 19);
        let random = RandomGen::with_options(&sgens, 3, 0, Pcg64Mcg::new(1)).unwrap();
        assert_eq!(random.state.len(), 19);

        let cgens = gens::cyclic::<U5>().unwrap();
        let random = RandomGen::with_options(&cgens, 3, 0, Pcg64Mcg::new(1)).unwrap();
        assert_eq!(random.state.len(), 10);
    }

    #[test]
    fn empty_generators_rejected() {
        assert!(matches!(
            RandomGen::<U5, _>::new(&[], Pcg64Mcg::new(1)),
            Err(Error::TrivialGenerators)
        ));
    }
}
