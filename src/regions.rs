//! Seeded region growing.
//!
//! Partitions the nodes of an adjacency graph into a requested number of
//! contiguous regions by greedy frontier expansion, an online model of
//! territorial growth. Region sizes track randomized targets approximately;
//! the irregularity is wanted, only the ≥ 1 floor and full coverage are
//! exact.

use crate::error::GenError;
use crate::rng::Xorshift32;

const UNCLAIMED: u32 = u32::MAX;

/// Assign every node to exactly one of `region_count` regions.
///
/// Seeds one node per region, then repeatedly picks a region (preferring
/// those still under their target size), a random node of its frontier, and
/// claims a random unclaimed neighbor. Frontier entries keep serving until
/// they run out of unclaimed neighbors. Fails if every frontier empties
/// while nodes remain, which cannot happen on a connected graph.
pub fn grow_regions(
    total_nodes: usize,
    region_count: usize,
    rng: &mut Xorshift32,
    adjacency: &[Vec<u32>],
) -> Result<Vec<u32>, GenError> {
    if region_count == 0 || region_count > total_nodes {
        return Err(GenError::InvalidParameter(format!(
            "region count {} must be in 1..={}",
            region_count, total_nodes
        )));
    }
    if adjacency.len() != total_nodes {
        return Err(GenError::InvalidParameter(format!(
            "adjacency covers {} nodes, expected {}",
            adjacency.len(),
            total_nodes
        )));
    }

    let desired = desired_sizes(total_nodes, region_count, rng);

    let mut owner = vec![UNCLAIMED; total_nodes];
    let mut sizes = vec![0usize; region_count];
    let mut frontiers: Vec<Vec<u32>> = vec![Vec::new(); region_count];
    let mut claimed = 0usize;

    // One distinct seed node per region, by rejection sampling.
    for region in 0..region_count {
        loop {
            let node = rng.next_index(total_nodes);
            if owner[node] == UNCLAIMED {
                owner[node] = region as u32;
                sizes[region] = 1;
                frontiers[region].push(node as u32);
                claimed += 1;
                break;
            }
        }
    }

    let mut candidates: Vec<usize> = Vec::with_capacity(region_count);
    let mut open: Vec<u32> = Vec::new();

    while claimed < total_nodes {
        candidates.clear();
        for region in 0..region_count {
            if !frontiers[region].is_empty() && sizes[region] < desired[region] {
                candidates.push(region);
            }
        }
        if candidates.is_empty() {
            for region in 0..region_count {
                if !frontiers[region].is_empty() {
                    candidates.push(region);
                }
            }
        }
        if candidates.is_empty() {
            return Err(GenError::RegionGrowthStalled {
                claimed,
                total: total_nodes,
            });
        }

        let region = candidates[rng.next_index(candidates.len())];
        let slot = rng.next_index(frontiers[region].len());
        let node = frontiers[region][slot] as usize;

        open.clear();
        for &neighbor in &adjacency[node] {
            if owner[neighbor as usize] == UNCLAIMED {
                open.push(neighbor);
            }
        }

        if open.is_empty() {
            // Exhausted frontier entry; drop it and pick again.
            frontiers[region].swap_remove(slot);
            continue;
        }

        let next = open[rng.next_index(open.len())];
        owner[next as usize] = region as u32;
        sizes[region] += 1;
        frontiers[region].push(next);
        claimed += 1;
    }

    tracing::debug!(
        target: "realm_generator::regions",
        regions = region_count,
        nodes = total_nodes,
        smallest = sizes.iter().min().copied().unwrap_or(0),
        largest = sizes.iter().max().copied().unwrap_or(0),
        "regions.grown"
    );

    Ok(owner)
}

/// Randomized target sizes summing exactly to `total_nodes`.
///
/// Each region starts near the even share with up to ±35% jitter, floored
/// at 1, then single increments are redistributed until the sum is exact.
fn desired_sizes(total_nodes: usize, region_count: usize, rng: &mut Xorshift32) -> Vec<usize> {
    let base = total_nodes / region_count;
    let variance = ((base as f64 * 0.35) as usize).max(1);

    let mut sizes: Vec<usize> = (0..region_count)
        .map(|_| {
            let jitter = rng.next_index(2 * variance + 1) as isize - variance as isize;
            (base as isize + jitter).max(1) as usize
        })
        .collect();

    let mut sum: usize = sizes.iter().sum();
    while sum != total_nodes {
        let bucket = rng.next_index(region_count);
        if sum < total_nodes {
            sizes[bucket] += 1;
            sum += 1;
        } else if sizes[bucket] > 1 {
            sizes[bucket] -= 1;
            sum -= 1;
        }
    }
    sizes
}
