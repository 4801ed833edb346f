//! Read-only projections over a generated map.
//!
//! The rendering and UI layers consume the map exclusively through these
//! lookups; nothing here mutates the payload.

use crate::hierarchy::{Hierarchy, Mode, Rank};
use crate::worldmap::WorldMapData;

/// Resolve the entity governing `tile_id` at `rank` under `mode`.
///
/// Walks tile to county to duchy to kingdom. `None` for out-of-range
/// tiles.
pub fn resolve_entity_id(
    data: &WorldMapData,
    mode: Mode,
    rank: Rank,
    tile_id: u32,
) -> Option<u32> {
    let hierarchy = data.modes.view(mode);
    let county = hierarchy.tile_to_county.get(tile_id as usize).copied()?;
    match rank {
        Rank::County => Some(county),
        Rank::Duchy => hierarchy.county_to_duchy.get(county as usize).copied(),
        Rank::Kingdom => {
            let duchy = hierarchy.county_to_duchy.get(county as usize).copied()?;
            hierarchy.duchy_to_kingdom.get(duchy as usize).copied()
        }
    }
}

/// Materialize the per-tile entity id array at `rank` under `mode`, for
/// painting a whole layer at once.
pub fn active_entity_by_tile(data: &WorldMapData, mode: Mode, rank: Rank) -> Vec<u32> {
    let hierarchy = data.modes.view(mode);
    hierarchy
        .tile_to_county
        .iter()
        .map(|&county| match rank {
            Rank::County => county,
            Rank::Duchy => hierarchy.county_to_duchy[county as usize],
            Rank::Kingdom => {
                let duchy = hierarchy.county_to_duchy[county as usize];
                hierarchy.duchy_to_kingdom[duchy as usize]
            }
        })
        .collect()
}

/// Display name of an entity, `None` when out of range.
pub fn entity_name(hierarchy: &Hierarchy, rank: Rank, entity_id: u32) -> Option<&str> {
    hierarchy
        .names(rank)
        .get(entity_id as usize)
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::hierarchy::GovernanceModes;

    fn tiny_map() -> WorldMapData {
        let de_jure = Hierarchy {
            tile_to_county: vec![0, 0, 1, 1],
            county_to_duchy: vec![0, 1],
            duchy_to_kingdom: vec![0, 0],
            county_names: vec!["Ashford".into(), "Thornbury".into()],
            duchy_names: vec!["Westmark".into(), "Eastmark".into()],
            kingdom_names: vec!["Velloria".into()],
        };
        let mut de_facto = de_jure.clone();
        de_facto.county_to_duchy = vec![1, 0];
        WorldMapData {
            version: 1,
            grid: Grid {
                width: 2,
                height: 2,
                tile_size_px: 32,
                chunk_size: 16,
                seed: 0,
            },
            modes: GovernanceModes { de_jure, de_facto },
            titles: Vec::new(),
            characters: Vec::new(),
        }
    }

    #[test]
    fn test_resolution_walks_the_chain() {
        let map = tiny_map();
        assert_eq!(resolve_entity_id(&map, Mode::DeJure, Rank::County, 3), Some(1));
        assert_eq!(resolve_entity_id(&map, Mode::DeJure, Rank::Duchy, 3), Some(1));
        assert_eq!(resolve_entity_id(&map, Mode::DeJure, Rank::Kingdom, 3), Some(0));
    }

    #[test]
    fn test_resolution_respects_the_mode() {
        let map = tiny_map();
        assert_eq!(resolve_entity_id(&map, Mode::DeJure, Rank::Duchy, 0), Some(0));
        assert_eq!(resolve_entity_id(&map, Mode::DeFacto, Rank::Duchy, 0), Some(1));
    }

    #[test]
    fn test_out_of_range_tile_resolves_to_none() {
        let map = tiny_map();
        assert_eq!(resolve_entity_id(&map, Mode::DeJure, Rank::County, 4), None);
    }

    #[test]
    fn test_painted_layer_matches_pointwise_resolution() {
        let map = tiny_map();
        for mode in [Mode::DeJure, Mode::DeFacto] {
            for rank in [Rank::County, Rank::Duchy, Rank::Kingdom] {
                let layer = active_entity_by_tile(&map, mode, rank);
                assert_eq!(layer.len(), 4);
                for (tile, &entity) in layer.iter().enumerate() {
                    assert_eq!(
                        resolve_entity_id(&map, mode, rank, tile as u32),
                        Some(entity)
                    );
                }
            }
        }
    }

    #[test]
    fn test_entity_names() {
        let map = tiny_map();
        assert_eq!(
            entity_name(&map.modes.de_jure, Rank::Kingdom, 0),
            Some("Velloria")
        );
        assert_eq!(entity_name(&map.modes.de_jure, Rank::Duchy, 2), None);
    }
}
