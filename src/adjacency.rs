//! Lifting adjacency from one rank of the hierarchy to the next.
//!
//! Region growing at each rank needs a neighbor graph over the entities of
//! the rank below. The tile grid gives the base case; every higher graph is
//! projected from the one beneath it.

/// Project adjacency one level up through an assignment.
///
/// For every source edge whose endpoints belong to different targets, the
/// two targets become neighbors. Output lists are deduplicated and sorted
/// ascending so the result is independent of edge visit order.
pub fn project_adjacency(
    source_adjacency: &[Vec<u32>],
    source_to_target: &[u32],
    target_count: usize,
) -> Vec<Vec<u32>> {
    let mut projected: Vec<Vec<u32>> = vec![Vec::new(); target_count];
    for (source, neighbors) in source_adjacency.iter().enumerate() {
        let a = source_to_target[source];
        for &neighbor in neighbors {
            let b = source_to_target[neighbor as usize];
            if a != b {
                projected[a as usize].push(b);
            }
        }
    }
    for list in &mut projected {
        list.sort_unstable();
        list.dedup();
    }
    projected
}

/// Build county adjacency straight from the tile grid.
///
/// Scans east and south edges only; grid adjacency is symmetric so each
/// undirected edge is seen once and recorded in both directions.
pub fn county_adjacency(
    width: u32,
    height: u32,
    tile_to_county: &[u32],
    county_count: usize,
) -> Vec<Vec<u32>> {
    let w = width as usize;
    let h = height as usize;
    let mut adjacency: Vec<Vec<u32>> = vec![Vec::new(); county_count];
    for y in 0..h {
        for x in 0..w {
            let tile = y * w + x;
            let county = tile_to_county[tile];
            if x + 1 < w {
                let east = tile_to_county[tile + 1];
                if east != county {
                    adjacency[county as usize].push(east);
                    adjacency[east as usize].push(county);
                }
            }
            if y + 1 < h {
                let south = tile_to_county[tile + w];
                if south != county {
                    adjacency[county as usize].push(south);
                    adjacency[south as usize].push(county);
                }
            }
        }
    }
    for list in &mut adjacency {
        list.sort_unstable();
        list.dedup();
    }
    adjacency
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_county_adjacency_from_quadrants() {
        // 4x4 grid split into four 2x2 counties
        let tile_to_county = vec![
            0, 0, 1, 1, //
            0, 0, 1, 1, //
            2, 2, 3, 3, //
            2, 2, 3, 3,
        ];
        let adj = county_adjacency(4, 4, &tile_to_county, 4);
        assert_eq!(adj[0], vec![1, 2]);
        assert_eq!(adj[1], vec![0, 3]);
        assert_eq!(adj[2], vec![0, 3]);
        assert_eq!(adj[3], vec![1, 2]);
    }

    #[test]
    fn test_projection_merges_parallel_edges() {
        // path graph 0-1-2-3, ends mapped together
        let source = vec![vec![1], vec![0, 2], vec![1, 3], vec![2]];
        let mapping = vec![0, 1, 1, 0];
        let adj = project_adjacency(&source, &mapping, 2);
        assert_eq!(adj[0], vec![1]);
        assert_eq!(adj[1], vec![0]);
    }

    #[test]
    fn test_projection_drops_internal_edges() {
        let source = vec![vec![1], vec![0]];
        let mapping = vec![0, 0];
        let adj = project_adjacency(&source, &mapping, 1);
        assert!(adj[0].is_empty());
    }

    #[test]
    fn test_projection_output_is_sorted() {
        // star: center 0 touches 1..4, all mapped to distinct targets
        let source = vec![vec![4, 3, 2, 1], vec![0], vec![0], vec![0], vec![0]];
        let mapping = vec![0, 1, 2, 3, 4];
        let adj = project_adjacency(&source, &mapping, 5);
        assert_eq!(adj[0], vec![1, 2, 3, 4]);
    }
}
