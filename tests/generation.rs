use realm_generator::hierarchy::{Mode, Rank};
use realm_generator::query::{active_entity_by_tile, resolve_entity_id};
use realm_generator::worldmap::{generate, WorldMapData};

fn default_map() -> WorldMapData {
    generate(9527).expect("generation succeeds with default parameters")
}

#[test]
fn every_tile_resolves_at_every_rank_in_both_views() {
    let data = default_map();
    let tile_count = data.grid.tile_count() as u32;

    for mode in [Mode::DeJure, Mode::DeFacto] {
        let hierarchy = data.modes.view(mode);
        for rank in [Rank::County, Rank::Duchy, Rank::Kingdom] {
            let limit = hierarchy.entity_count(rank) as u32;
            for tile in 0..tile_count {
                let entity = resolve_entity_id(&data, mode, rank, tile)
                    .expect("in-range tiles always resolve");
                assert!(entity < limit);
            }
        }
    }

    assert_eq!(
        resolve_entity_id(&data, Mode::DeJure, Rank::County, tile_count),
        None
    );
}

#[test]
fn no_rank_has_an_empty_region() {
    let data = default_map();
    for mode in [Mode::DeJure, Mode::DeFacto] {
        let hierarchy = data.modes.view(mode);
        let checks: [(&[u32], usize); 3] = [
            (&hierarchy.tile_to_county, hierarchy.county_count()),
            (&hierarchy.county_to_duchy, hierarchy.duchy_count()),
            (&hierarchy.duchy_to_kingdom, hierarchy.kingdom_count()),
        ];
        for (mapping, count) in checks {
            let mut seen = vec![false; count];
            for &entity in mapping {
                seen[entity as usize] = true;
            }
            assert!(seen.iter().all(|&s| s));
        }
    }
}

#[test]
fn county_base_is_identical_across_views() {
    let data = default_map();
    assert_eq!(
        data.modes.de_jure.tile_to_county,
        data.modes.de_facto.tile_to_county
    );
    assert_eq!(
        data.modes.de_jure.county_names,
        data.modes.de_facto.county_names
    );
}

#[test]
fn governance_drift_stays_in_the_expected_band() {
    let data = default_map();
    let de_jure = &data.modes.de_jure.county_to_duchy;
    let de_facto = &data.modes.de_facto.county_to_duchy;
    assert_ne!(de_jure, de_facto);

    let differing = de_jure.iter().zip(de_facto).filter(|(a, b)| a != b).count();
    let fraction = differing as f64 / de_jure.len() as f64;
    assert!(
        (0.08..=0.12).contains(&fraction),
        "drift fraction {} outside [0.08, 0.12]",
        fraction
    );

    assert_ne!(
        data.modes.de_jure.duchy_to_kingdom,
        data.modes.de_facto.duchy_to_kingdom
    );
}

#[test]
fn holder_graph_is_bidirectionally_consistent() {
    let data = default_map();

    for title in &data.titles {
        let holder = &data.characters[title.holder_character_id.0 as usize];
        assert!(
            holder.held_title_ids.contains(&title.id),
            "holder of {} does not list it",
            title.id
        );
    }

    for character in &data.characters {
        for &held in &character.held_title_ids {
            let title = data.titles.iter().find(|t| t.id == held).unwrap();
            assert_eq!(title.holder_character_id, character.id);
        }
    }
}

#[test]
fn primary_titles_are_held_and_maximal() {
    let data = default_map();
    for character in &data.characters {
        assert!(character
            .held_title_ids
            .contains(&character.primary_title_id));
        let top = character
            .held_title_ids
            .iter()
            .map(|id| id.rank.weight())
            .max()
            .unwrap();
        assert_eq!(character.primary_title_id.rank.weight(), top);
    }
}

#[test]
fn painted_layers_agree_with_pointwise_resolution() {
    let data = default_map();
    for mode in [Mode::DeJure, Mode::DeFacto] {
        for rank in [Rank::County, Rank::Duchy, Rank::Kingdom] {
            let layer = active_entity_by_tile(&data, mode, rank);
            assert_eq!(layer.len(), data.grid.tile_count());
            for (tile, &entity) in layer.iter().enumerate() {
                assert_eq!(
                    resolve_entity_id(&data, mode, rank, tile as u32),
                    Some(entity)
                );
            }
        }
    }
}

#[test]
fn title_parents_mirror_the_hierarchy_mappings() {
    let data = default_map();
    for title in &data.titles {
        let de_jure = data.modes.de_jure.parent_entity(title.rank, title.entity_id);
        let de_facto = data
            .modes
            .de_facto
            .parent_entity(title.rank, title.entity_id);
        assert_eq!(title.de_jure_parent_title_id.map(|p| p.entity), de_jure);
        assert_eq!(title.de_facto_parent_title_id.map(|p| p.entity), de_facto);
        if let (Some(parent), Some(expected_rank)) =
            (title.de_jure_parent_title_id, title.rank.parent())
        {
            assert_eq!(parent.rank, expected_rank);
        }
    }
}
