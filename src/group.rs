//! Group algorithms on top of the orbit engines: sifting, base and strong
//! generating set construction, and small-group enumeration.
//!
//! A base and strong generating set (BSGS) for the group generated by `S` is
//! a triple `(B, S*, Delta*)` where
//!
//! * `B = [b1 .. bk]` is the base: no element of the group fixes all of it,
//! * `S* = [S1 .. Sk]` stratifies the strong generating set: `<Si>` is the
//!   stabilizer of `b1 .. b(i-1)` inside the group,
//! * `Delta*[i]` is the orbit of `bi` under `<Si>`.
//!
//! The group order is the product of the orbit sizes, and membership of any
//! permutation is decided in `k` sifting steps by [`strip`].

use std::collections::BTreeSet;

use crate::domain::Domain;
use crate::error::Error;
use crate::orbit::Orbit;
use crate::perm::Permutation;

/// A base and strong generating set with its per-level orbits.
///
/// Built once by [`schreier_sims`] and read-only afterwards.
pub struct Bsgs<D: Domain, O: Orbit<D>> {
    base: Vec<D>,
    gens: Vec<Vec<Permutation<D>>>,
    orbits: Vec<O>,
}

impl<D: Domain, O: Orbit<D>> Bsgs<D, O> {
    /// The base points, in chain order.
    pub fn base(&self) -> &[D] {
        &self.base
    }

    /// The strong generating set, stratified by level.
    ///
    /// Levels may repeat generators; what the construction maintains is the
    /// subgroup chain, not set-minimality.
    pub fn strong_gens(&self) -> &[Vec<Permutation<D>>] {
        &self.gens
    }

    /// The per-level orbits of the base points.
    pub fn orbits(&self) -> &[O] {
        &self.orbits
    }

    /// Number of levels in the chain.
    pub fn levels(&self) -> usize {
        self.base.len()
    }

    /// Order of the generated group: the product of the orbit sizes.
    pub fn order(&self) -> u128 {
        self.orbits.iter().map(|orbit| orbit.len() as u128).product()
    }

    /// Whether `g` lies in the generated group.
    pub fn member(&self, g: &Permutation<D>) -> Result<bool, Error> {
        let (residual, level) = strip(g, &self.base, &self.orbits)?;
        Ok(residual.is_identity() && level == self.base.len())
    }
}

/// Sift `g` through a stabilizer chain.
///
/// Returns `(h, i)` where `i` is the first level at which the residual
/// escapes (the image of the level's base point falls outside the level's
/// orbit) and `h` is the residual at that point. A full pass returns
/// `i = base.len()`, and then `g` is a group member exactly when `h` is the
/// identity: `g` factors as a product of coset representatives, one per
/// level.
pub fn strip<D: Domain, O: Orbit<D>>(
    g: &Permutation<D>,
    base: &[D],
    orbits: &[O],
) -> Result<(Permutation<D>, usize), Error> {
    if base.len() != orbits.len() {
        return Err(Error::MismatchedChain {
            base: base.len(),
            orbits: orbits.len(),
        });
    }
    let mut h = g.clone();
    for (level, (&beta, orbit)) in base.iter().zip(orbits).enumerate() {
        let gamma = h.apply(beta);
        if !orbit.contains(gamma) {
            return Ok((h, level));
        }
        let u = orbit.ubeta(gamma)?;
        // beta goes to gamma under both h and u, so h·u^{-1} fixes beta.
        h.rmul(&u.inverse());
    }
    Ok((h, base.len()))
}

/// All elements of the generated group, by breadth-first closure.
///
/// Feasible for small groups only; the result has one entry per group
/// element.
pub fn all_elements<D: Domain>(gens: &[Permutation<D>]) -> BTreeSet<Permutation<D>> {
    let mut total = BTreeSet::new();
    let mut next = BTreeSet::from([Permutation::identity()]);
    while !next.is_empty() {
        total.extend(next.iter().cloned());
        let mut discovered = BTreeSet::new();
        for elem in &next {
            for gen in gens {
                let product = Permutation::product(elem, gen);
                if !total.contains(&product) {
                    discovered.insert(product);
                }
            }
        }
        next = discovered;
    }
    total
}

/// A strong generator candidate produced by one scan pass, together with the
/// level it belongs to and, when the whole chain failed to absorb it, the
/// point extending the base.
struct NewGenerator<D: Domain> {
    residual: Permutation<D>,
    level: usize,
    extension: Option<D>,
}

/// Scan one level for a Schreier generator the current chain cannot absorb.
///
/// For every orbit point `delta` with representative `u` and every level
/// generator `x`, the element `(u·x)·(u_{delta·x})^{-1}` fixes the level's
/// base point, so it belongs further down the chain; sifting it decides how
/// far down. The first one that does not sift to the identity is returned.
fn find_new_generator<D: Domain, O: Orbit<D>>(
    at: usize,
    base: &[D],
    gens: &[Vec<Permutation<D>>],
    orbits: &[O],
) -> Result<Option<NewGenerator<D>>, Error> {
    let levels = base.len();
    let points: Vec<D> = orbits[at].points().collect();
    for delta in points {
        let u = orbits[at].ubeta(delta)?;
        for x in &gens[at] {
            let ux = Permutation::product(&u, x);
            let ubx = orbits[at].ubeta(x.apply(delta))?;
            if ux == ubx {
                continue;
            }
            let schreier_gen = Permutation::product(&ux, &ubx.inverse());
            let (residual, level) = strip(&schreier_gen, base, orbits)?;
            if level < levels {
                return Ok(Some(NewGenerator {
                    residual,
                    level,
                    extension: None,
                }));
            }
            // The residual fixes the whole base. If it is not the identity,
            // the base must grow by a point it moves: the smallest element
            // of its least non-trivial loop.
            let moved = residual
                .loops()
                .iter()
                .rev()
                .find(|l| !l.is_primitive())
                .map(|l| l.smallest());
            let Some(gamma) = moved else {
                continue;
            };
            if base.contains(&gamma) {
                return Err(Error::DuplicateBasePoint);
            }
            return Ok(Some(NewGenerator {
                residual,
                level: levels,
                extension: Some(gamma),
            }));
        }
    }
    Ok(None)
}

/// Construct a base and strong generating set from a generating set.
///
/// The orbit engine is a policy parameter: any [`Orbit`] implementation
/// works, and the result is the same group.
///
/// The first base point is the first domain point moved by some generator;
/// if there is none the generators are all trivial and no base exists. The
/// main loop repeatedly scans the deepest unfinished level: each Schreier
/// generator that fails to sift is pushed into every level between the scan
/// point and its sift depth (extending the base when it sifted through the
/// whole chain), and scanning resumes at that depth. A level whose scan
/// finds nothing is finished, and work moves up one level until the top
/// level is finished too.
pub fn schreier_sims<D: Domain, O: Orbit<D>>(
    generators: &[Permutation<D>],
) -> Result<Bsgs<D, O>, Error> {
    let first = D::points()
        .find(|&p| generators.iter().any(|g| g.apply(p) != p))
        .ok_or(Error::TrivialGenerators)?;

    let mut base = vec![first];
    let mut gens = vec![generators.to_vec()];
    let mut orbits = vec![O::new(first, &gens[0])];

    let mut level = 0i64;
    while level >= 0 {
        let at = level as usize;
        let Some(found) = find_new_generator(at, &base, &gens, &orbits)? else {
            level -= 1;
            continue;
        };
        let NewGenerator {
            residual,
            level: newidx,
            extension,
        } = found;

        let levels = base.len();
        if (extension.is_none() && newidx == levels) || newidx > levels {
            return Err(Error::ChainOverflow);
        }

        for l in at..=newidx {
            if l == newidx {
                if let Some(gamma) = extension {
                    base.push(gamma);
                    gens.push(vec![residual.clone()]);
                    orbits.push(O::new(gamma, std::slice::from_ref(&residual)));
                    continue;
                }
            }
            gens[l].push(residual.clone());
            orbits[l].extend_orbit(&residual);
        }

        level = newidx as i64;
    }

    Ok(Bsgs { base, gens, orbits })
}
