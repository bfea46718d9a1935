//! Errors reported by the public API.

use thiserror::Error;

/// Unified error type for permutation and group operations.
///
/// Nothing in this crate recovers from an error internally; every failure is
/// surfaced to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A cycle was constructed from an empty element sequence.
    #[error("a permutation loop must contain at least one element")]
    EmptyLoop,
    /// A cycle was constructed from a sequence with repeated elements.
    #[error("permutation loop elements must be unique")]
    DuplicateLoopElement,
    /// A generator factory was called on a domain with too few points.
    #[error("domain of size {size} is too small, need at least {min} points")]
    DomainTooSmall { size: usize, min: usize },
    /// Every supplied generator fixes every point of the domain, so no base
    /// point can be chosen.
    #[error("generators fix the whole domain, cannot pick a base point")]
    TrivialGenerators,
    /// The residual of a full strip moved a point that is already a base
    /// point. The stabilizer chain is inconsistent.
    #[error("candidate base point is already in the base")]
    DuplicateBasePoint,
    /// A new strong generator escaped past the last chain level without
    /// requesting a base extension. Signals a defect in strip or the orbit
    /// engine.
    #[error("strong generator escaped beyond the stabilizer chain")]
    ChainOverflow,
    /// A coset representative was requested for a point outside the orbit.
    #[error("point is not in the orbit")]
    PointOutsideOrbit,
    /// Strip was given a base and an orbit list of different lengths.
    #[error("base has {base} points but {orbits} orbits were supplied")]
    MismatchedChain { base: usize, orbits: usize },
    /// Block decomposition needs two distinct seed points.
    #[error("block decomposition seed points must be distinct")]
    IdenticalSeedPoints,
}
