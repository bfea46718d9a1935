//! Primitive block systems of a transitive action.

use std::collections::VecDeque;

use itertools::Itertools;

use crate::domain::Domain;
use crate::error::Error;
use crate::perm::Permutation;

/// The finest block system of the action putting `alpha` and `beta` in the
/// same block.
///
/// The generators must act transitively on the domain. Each returned block is
/// sorted ascending and the blocks are ordered by their smallest element.
///
/// Classes start out as singletons except for `{alpha, beta}`, and the rule
/// "points in one block stay in one block under every generator" is
/// propagated by merging classes: whenever a point and its class
/// representative map into different classes under some generator, those two
/// classes collapse into the lower-numbered one and the losing representative
/// is queued for another propagation pass.
pub fn primitive_blocks<D: Domain>(
    alpha: D,
    beta: D,
    gens: &[Permutation<D>],
) -> Result<Vec<Vec<D>>, Error> {
    if alpha == beta {
        return Err(Error::IdenticalSeedPoints);
    }

    let mut class_of = vec![0usize; D::SIZE];
    let mut rep: Vec<D> = vec![alpha];
    let mut queue = VecDeque::from([beta]);

    class_of[alpha.index()] = 0;
    class_of[beta.index()] = 0;
    for point in D::points() {
        if point == alpha || point == beta {
            continue;
        }
        class_of[point.index()] = rep.len();
        rep.push(point);
    }

    while let Some(gamma) = queue.pop_front() {
        for gen in gens {
            let delta = rep[class_of[gamma.index()]];
            let mut c1 = class_of[gen.apply(gamma).index()];
            let mut c2 = class_of[gen.apply(delta).index()];
            let mut kappa = rep[c1];
            let mut lambda = rep[c2];
            if kappa != lambda {
                if c1 > c2 {
                    std::mem::swap(&mut c1, &mut c2);
                    std::mem::swap(&mut kappa, &mut lambda);
                }
                for class in class_of.iter_mut() {
                    if *class == c2 {
                        *class = c1;
                    }
                }
                rep[c1] = kappa;
                queue.push_back(lambda);
            }
        }
    }

    let mut blocks: Vec<Vec<D>> = D::points()
        .map(|point| (class_of[point.index()], point))
        .into_group_map()
        .into_values()
        .collect();
    blocks.sort_by_key(|block| block[0]);
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UPoint;
    use crate::loops::PermLoop;

    type U6 = UPoint<1, 6>;

    fn perm(loops: &[&[u32]]) -> Permutation<U6> {
        Permutation::from_loops(loops.iter().map(|elems| {
            PermLoop::new(elems.iter().map(|&e| UPoint::new(e)).collect()).unwrap()
        }))
    }

    fn rotation_gens() -> Vec<Permutation<U6>> {
        vec![perm(&[&[1, 2, 3, 4, 5, 6]]), perm(&[&[2, 6], &[3, 5]])]
    }

    fn raw(blocks: &[Vec<U6>]) -> Vec<Vec<u32>> {
        blocks
            .iter()
            .map(|block| block.iter().map(|p| p.raw()).collect())
            .collect()
    }

    #[test]
    fn alternating_seed_pair() {
        let gens = rotation_gens();
        let blocks = primitive_blocks(UPoint::new(1), UPoint::new(3), &gens).unwrap();
        assert_eq!(raw(&blocks), vec![vec![1, 3, 5], vec![2, 4, 6]]);
    }

    #[test]
    fn antipodal_seed_pair() {
        let gens = rotation_gens();
        let blocks = primitive_blocks(UPoint::new(1), UPoint::new(4), &gens).unwrap();
        assert_eq!(raw(&blocks), vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
    }

    #[test]
    fn blocks_partition_the_domain() {
        let gens = rotation_gens();
        for second in 2..=6 {
            let blocks =
                primitive_blocks(UPoint::new(1), UPoint::new(second), &gens).unwrap();
            let mut seen = vec![false; 6];
            for block in &blocks {
                for p in block {
                    assert!(!seen[p.index()]);
                    seen[p.index()] = true;
                }
            }
            assert!(seen.iter().all(|&s| s));

            // The seeds share a block.
            let seeded: Vec<_> = blocks
                .iter()
                .filter(|b| b.contains(&UPoint::new(1)) || b.contains(&UPoint::new(second)))
                .collect();
            assert_eq!(seeded.len(), 1);
        }
    }

    #[test]
    fn generators_permute_the_blocks() {
        let gens = rotation_gens();
        for second in [3, 4] {
            let blocks =
                primitive_blocks(UPoint::new(1), UPoint::new(second), &gens).unwrap();
            for gen in &gens {
                for block in &blocks {
                    let mut image: Vec<U6> = block.iter().map(|&p| gen.apply(p)).collect();
                    image.sort();
                    assert!(
                        blocks.contains(&image),
                        "image of a block is not a block: {:?}",
                        image
                    );
                }
            }
        }
    }

    #[test]
    fn identical_seeds_rejected() {
        let gens = rotation_gens();
        assert_eq!(
            primitive_blocks(UPoint::new(1), UPoint::new(1), &gens),
            Err(Error::IdenticalSeedPoints)
        );
    }
}
