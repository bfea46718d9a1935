//! Orbits of a point under a generating set.
//!
//! The orbit of `beta` over a group `G` is the set of all distinct
//! `beta^g`. An orbit engine computes it once from `(beta, gens)` and then
//! answers:
//!
//! 1. ascending iteration over the orbit points,
//! 2. `contains`: membership of a point,
//! 3. `len`: orbit size,
//! 4. `ubeta`: for an orbit point `x`, some group element `u` with
//!    `beta · u = x` (the identity for `beta` itself),
//! 5. `extend_orbit`: enlarging the orbit after a generator is added,
//! 6. pretty-printing as `[ x: u_x ... ]`.
//!
//! Two engines implement this contract with different cost models.
//! [`DirectOrbit`] stores a full coset representative per point, paying
//! memory for constant-time `ubeta`. [`SchreierOrbit`] stores one small
//! integer per domain point (a Schreier vector) and rebuilds representatives
//! on demand by unwinding the vector. They are observationally equivalent;
//! which one an algorithm uses is a policy choice.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::domain::Domain;
use crate::error::Error;
use crate::perm::Permutation;

/// Capability contract shared by the orbit engines.
pub trait Orbit<D: Domain>: fmt::Display + Sized {
    /// Compute the full orbit of `beta` under the generators.
    fn new(beta: D, gens: &[Permutation<D>]) -> Self;

    /// The point whose orbit this is.
    fn beta(&self) -> D;

    /// Whether `x` lies in the orbit.
    fn contains(&self, x: D) -> bool;

    /// Number of points in the orbit.
    fn len(&self) -> usize;

    /// Iterate the orbit points in ascending order.
    fn points(&self) -> impl Iterator<Item = D> + '_;

    /// A representative `u` with `beta · u = x`.
    ///
    /// Fails when `x` is outside the orbit.
    fn ubeta(&self, x: D) -> Result<Permutation<D>, Error>;

    /// Grow the orbit after adding a generator. Re-runs the search only when
    /// the generator is new.
    fn extend_orbit(&mut self, newgen: &Permutation<D>);
}

/// Orbit engine storing a coset representative for every orbit point.
pub struct DirectOrbit<D: Domain> {
    beta: D,
    orb: BTreeMap<D, Permutation<D>>,
    gens: BTreeSet<Permutation<D>>,
}

impl<D: Domain> DirectOrbit<D> {
    /// Breadth-first expansion from the current orbit.
    fn expand(&mut self) {
        let mut frontier = self.orb.clone();
        while !frontier.is_empty() {
            let mut discovered: BTreeMap<D, Permutation<D>> = BTreeMap::new();
            for gen in &self.gens {
                for (&elem, rep) in &frontier {
                    let newelem = gen.apply(elem);
                    if !self.orb.contains_key(&newelem) {
                        discovered
                            .entry(newelem)
                            .or_insert_with(|| Permutation::product(rep, gen));
                    }
                }
            }
            for (elem, rep) in &discovered {
                self.orb.insert(*elem, rep.clone());
            }
            frontier = discovered;
        }
    }
}

impl<D: Domain> Orbit<D> for DirectOrbit<D> {
    fn new(beta: D, gens: &[Permutation<D>]) -> Self {
        let mut orbit = DirectOrbit {
            beta,
            orb: BTreeMap::from([(beta, Permutation::identity())]),
            gens: gens.iter().cloned().collect(),
        };
        orbit.expand();
        orbit
    }

    fn beta(&self) -> D {
        self.beta
    }

    fn contains(&self, x: D) -> bool {
        self.orb.contains_key(&x)
    }

    fn len(&self) -> usize {
        self.orb.len()
    }

    fn points(&self) -> impl Iterator<Item = D> + '_ {
        self.orb.keys().copied()
    }

    fn ubeta(&self, x: D) -> Result<Permutation<D>, Error> {
        self.orb.get(&x).cloned().ok_or(Error::PointOutsideOrbit)
    }

    fn extend_orbit(&mut self, newgen: &Permutation<D>) {
        if self.gens.insert(newgen.clone()) {
            self.expand();
        }
    }
}

impl<D: Domain> fmt::Display for DirectOrbit<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("[ ")?;
        for (elem, rep) in &self.orb {
            write!(f, "{}: {} ", elem, rep)?;
        }
        f.write_str("]")
    }
}

/// Orbit engine storing a Schreier vector instead of representatives.
///
/// The vector has one entry per domain point:
///
/// * `-1` for `beta` itself,
/// * `0` for points outside the orbit,
/// * `k + 1` for a point first reached by generator `k` during the search.
///
/// A representative is rebuilt by walking the vector back to `beta` through
/// the inverse generators, which are precomputed since the walk is the hot
/// path.
pub struct SchreierOrbit<D: Domain> {
    beta: D,
    orb: BTreeSet<D>,
    vector: Vec<i32>,
    gens: Vec<Permutation<D>>,
    invgens: Vec<Permutation<D>>,
}

impl<D: Domain> SchreierOrbit<D> {
    /// The raw Schreier vector, indexed by point index.
    pub fn schreier_vector(&self) -> &[i32] {
        &self.vector
    }

    fn expand(&mut self) {
        let mut frontier = self.orb.clone();
        while !frontier.is_empty() {
            let mut discovered = BTreeSet::new();
            for &elem in &frontier {
                for (genidx, gen) in self.gens.iter().enumerate() {
                    let newelem = gen.apply(elem);
                    if !self.orb.contains(&newelem) {
                        discovered.insert(newelem);
                        self.vector[newelem.index()] = genidx as i32 + 1;
                    }
                }
            }
            self.orb.extend(discovered.iter().copied());
            frontier = discovered;
        }
    }
}

impl<D: Domain> Orbit<D> for SchreierOrbit<D> {
    fn new(beta: D, gens: &[Permutation<D>]) -> Self {
        let mut vector = vec![0; D::SIZE];
        vector[beta.index()] = -1;
        let invgens = gens.iter().map(Permutation::inverse).collect();
        let mut orbit = SchreierOrbit {
            beta,
            orb: BTreeSet::from([beta]),
            vector,
            gens: gens.to_vec(),
            invgens,
        };
        orbit.expand();
        orbit
    }

    fn beta(&self) -> D {
        self.beta
    }

    fn contains(&self, x: D) -> bool {
        self.orb.contains(&x)
    }

    fn len(&self) -> usize {
        self.orb.len()
    }

    fn points(&self) -> impl Iterator<Item = D> + '_ {
        self.orb.iter().copied()
    }

    fn ubeta(&self, x: D) -> Result<Permutation<D>, Error> {
        let mut k = self.vector[x.index()];
        if k == 0 {
            return Err(Error::PointOutsideOrbit);
        }
        let mut res = Permutation::identity();
        let mut cur = x;
        while k != -1 {
            // Walking back through the search tree cannot leave the orbit.
            debug_assert!(k != 0);
            let gen = &self.gens[(k - 1) as usize];
            res.lmul(gen);
            let prev = self.invgens[(k - 1) as usize].apply(cur);
            debug_assert!(prev != cur);
            cur = prev;
            k = self.vector[cur.index()];
        }
        Ok(res)
    }

    fn extend_orbit(&mut self, newgen: &Permutation<D>) {
        if !self.gens.contains(newgen) {
            self.gens.push(newgen.clone());
            self.invgens.push(newgen.inverse());
            self.expand();
        }
    }
}

impl<D: Domain> fmt::Display for SchreierOrbit<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("[ ")?;
        for &elem in &self.orb {
            let rep = self.ubeta(elem).map_err(|_| fmt::Error)?;
            write!(f, "{}: {} ", elem, rep)?;
        }
        f.write_str("]")
    }
}

/// The orbit of `beta` as a plain point set.
pub fn orbit<D: Domain>(beta: D, gens: &[Permutation<D>]) -> BTreeSet<D> {
    let mut seen = BTreeSet::from([beta]);
    let mut worklist = vec![beta];
    while let Some(elem) = worklist.pop() {
        for gen in gens {
            let newelem = gen.apply(elem);
            if seen.insert(newelem) {
                worklist.push(newelem);
            }
        }
    }
    seen
}

/// Orbit of `beta` together with stabilizer generators.
///
/// Returns the transversal (point to representative, with `beta` mapping to
/// the identity) and the Schreier generators collected whenever the search
/// rediscovers a known point: for a rediscovery `beta·u·g = beta·v` the
/// element `u·g·v^{-1}` fixes `beta`. Identity generators are dropped and
/// duplicates collapsed.
pub fn orbit_stab<D: Domain>(
    beta: D,
    gens: &[Permutation<D>],
) -> (BTreeMap<D, Permutation<D>>, Vec<Permutation<D>>) {
    let mut reps = BTreeMap::from([(beta, Permutation::identity())]);
    let mut stab = BTreeSet::new();
    let mut queue = vec![beta];
    let mut at = 0;
    while let Some(&elem) = queue.get(at) {
        let rep = reps[&elem].clone();
        for gen in gens {
            let newelem = gen.apply(elem);
            let newrep = Permutation::product(&rep, gen);
            match reps.get(&newelem) {
                Some(known) => {
                    let fixer = Permutation::product(&newrep, &known.inverse());
                    if !fixer.is_identity() {
                        stab.insert(fixer);
                    }
                }
                None => {
                    reps.insert(newelem, newrep);
                    queue.push(newelem);
                }
            }
        }
        at += 1;
    }
    (reps, stab.into_iter().collect())
}

/// Orbit of `beta` as a point set plus the raw Schreier vector.
pub fn orbit_schreier<D: Domain>(
    beta: D,
    gens: &[Permutation<D>],
) -> (BTreeSet<D>, Vec<i32>) {
    let SchreierOrbit { orb, vector, .. } = SchreierOrbit::new(beta, gens);
    (orb, vector)
}
