//! A permutation group library.
//!
//! This crate provides data structures and algorithms for working with
//! permutations and permutation groups over a finite typed domain:
//!
//! * [`PermLoop`] and [`Permutation`]: canonical disjoint-cycle arithmetic,
//! * [`gens`]: generating sets for the classical groups,
//! * [`orbit`](crate::orbit): orbit engines behind a common capability trait,
//!   either with explicit coset representatives ([`DirectOrbit`]) or with a
//!   Schreier vector ([`SchreierOrbit`]),
//! * [`blocks`]: primitive block systems of a transitive action,
//! * [`group`]: sifting ([`strip`]), the Schreier–Sims construction of a base
//!   and strong generating set ([`schreier_sims`]), and small-group
//!   enumeration ([`all_elements`]),
//! * [`random`]: product-replacement random group elements.
//!
//! Composition is a right action throughout: `x · (g · h) = (x · g) · h`, and
//! `Permutation::product(a, b)` applies `a` first.

pub mod blocks;
pub mod domain;
pub mod error;
pub mod gens;
pub mod group;
pub mod loops;
pub mod orbit;
pub mod perm;
pub mod random;

pub use crate::blocks::primitive_blocks;
pub use crate::domain::{CharPoint, Domain, UPoint};
pub use crate::error::Error;
pub use crate::group::{all_elements, schreier_sims, strip, Bsgs};
pub use crate::loops::PermLoop;
pub use crate::orbit::{DirectOrbit, Orbit, SchreierOrbit};
pub use crate::perm::Permutation;
pub use crate::random::RandomGen;
