//! Holder assignment: who rules what.
//!
//! Every county seats one ruling character. Duchy and kingdom holders are
//! elected from the characters already ruling below them in the de facto
//! view, so actual control, not legal structure, decides who climbs.

use crate::error::GenError;
use crate::hierarchy::{Hierarchy, Rank};
use crate::rng::Xorshift32;
use crate::titles::{mint_map_color, Character, CharacterId, Title, TitleId};

/// The full ownership graph minted for one map.
pub struct TitleAssignment {
    pub titles: Vec<Title>,
    pub characters: Vec<Character>,
}

/// Assign one holder to every title and derive each character's primary
/// title.
///
/// `ruler_names` must hold one name per county; character count equals
/// county count.
pub fn assign_titles(
    seed: u64,
    ruler_names: Vec<String>,
    de_jure: &Hierarchy,
    de_facto: &Hierarchy,
) -> Result<TitleAssignment, GenError> {
    let county_count = de_facto.county_count();
    let duchy_count = de_facto.duchy_count();
    let kingdom_count = de_facto.kingdom_count();

    if ruler_names.len() != county_count {
        return Err(GenError::InvalidParameter(format!(
            "{} ruler names for {} counties",
            ruler_names.len(),
            county_count
        )));
    }

    let mut rng = Xorshift32::new(seed);

    // Random character/county pairing: character i rules counties[i].
    let mut counties: Vec<u32> = (0..county_count as u32).collect();
    fisher_yates(&mut counties, &mut rng);

    let mut holder_of_county = vec![0u32; county_count];
    let mut held: Vec<Vec<TitleId>> = vec![Vec::new(); county_count];
    for (character, &county) in counties.iter().enumerate() {
        holder_of_county[county as usize] = character as u32;
        held[character].push(TitleId::new(Rank::County, county));
    }

    // Duchies go to one of the county rulers inside them, de facto.
    let mut holder_of_duchy = vec![0u32; duchy_count];
    let mut electors: Vec<u32> = Vec::new();
    for duchy in 0..duchy_count as u32 {
        electors.clear();
        for county in 0..county_count {
            if de_facto.county_to_duchy[county] == duchy {
                electors.push(holder_of_county[county]);
            }
        }
        if electors.is_empty() {
            return Err(GenError::InvalidParameter(format!(
                "duchy {} has no counties",
                duchy
            )));
        }
        let winner = electors[rng.next_index(electors.len())];
        holder_of_duchy[duchy as usize] = winner;
        held[winner as usize].push(TitleId::new(Rank::Duchy, duchy));
    }

    // Kingdoms go to one of their de facto duchy rulers. A character can
    // rule several duchies; elect among distinct rulers.
    let mut holder_of_kingdom = vec![0u32; kingdom_count];
    for kingdom in 0..kingdom_count as u32 {
        electors.clear();
        for duchy in 0..duchy_count {
            if de_facto.duchy_to_kingdom[duchy] == kingdom {
                let ruler = holder_of_duchy[duchy];
                if !electors.contains(&ruler) {
                    electors.push(ruler);
                }
            }
        }
        if electors.is_empty() {
            return Err(GenError::InvalidParameter(format!(
                "kingdom {} has no duchies",
                kingdom
            )));
        }
        let winner = electors[rng.next_index(electors.len())];
        holder_of_kingdom[kingdom as usize] = winner;
        held[winner as usize].push(TitleId::new(Rank::Kingdom, kingdom));
    }

    let mut characters = Vec::with_capacity(county_count);
    for (index, name) in ruler_names.into_iter().enumerate() {
        let primary = primary_title(&held[index])
            .ok_or(GenError::HolderWithoutTitles(index as u32))?;
        characters.push(Character {
            id: CharacterId(index as u32),
            name,
            primary_title_id: primary,
            held_title_ids: held[index].clone(),
        });
    }

    let mut titles =
        Vec::with_capacity(county_count + duchy_count + kingdom_count);
    for county in 0..county_count as u32 {
        let duchy = de_jure.county_to_duchy[county as usize];
        let facto_duchy = de_facto.county_to_duchy[county as usize];
        titles.push(mint_title(
            Rank::County,
            county,
            de_jure.county_names[county as usize].clone(),
            CharacterId(holder_of_county[county as usize]),
            Some(TitleId::new(Rank::Duchy, duchy)),
            Some(TitleId::new(Rank::Duchy, facto_duchy)),
            &mut rng,
        ));
    }
    for duchy in 0..duchy_count as u32 {
        let kingdom = de_jure.duchy_to_kingdom[duchy as usize];
        let facto_kingdom = de_facto.duchy_to_kingdom[duchy as usize];
        titles.push(mint_title(
            Rank::Duchy,
            duchy,
            de_jure.duchy_names[duchy as usize].clone(),
            CharacterId(holder_of_duchy[duchy as usize]),
            Some(TitleId::new(Rank::Kingdom, kingdom)),
            Some(TitleId::new(Rank::Kingdom, facto_kingdom)),
            &mut rng,
        ));
    }
    for kingdom in 0..kingdom_count as u32 {
        titles.push(mint_title(
            Rank::Kingdom,
            kingdom,
            de_jure.kingdom_names[kingdom as usize].clone(),
            CharacterId(holder_of_kingdom[kingdom as usize]),
            None,
            None,
            &mut rng,
        ));
    }

    tracing::debug!(
        target: "realm_generator::assign",
        titles = titles.len(),
        characters = characters.len(),
        "assign.completed"
    );

    Ok(TitleAssignment { titles, characters })
}

fn fisher_yates(values: &mut [u32], rng: &mut Xorshift32) {
    for i in (1..values.len()).rev() {
        let j = rng.next_index(i + 1);
        values.swap(i, j);
    }
}

/// Highest rank weight wins; ties break toward the lowest entity id.
fn primary_title(held: &[TitleId]) -> Option<TitleId> {
    let mut best: Option<TitleId> = None;
    for &id in held {
        best = Some(match best {
            None => id,
            Some(current) => {
                let higher = id.rank.weight() > current.rank.weight();
                let tied_lower =
                    id.rank.weight() == current.rank.weight() && id.entity < current.entity;
                if higher || tied_lower {
                    id
                } else {
                    current
                }
            }
        });
    }
    best
}

#[allow(clippy::too_many_arguments)]
fn mint_title(
    rank: Rank,
    entity: u32,
    name: String,
    holder: CharacterId,
    de_jure_parent: Option<TitleId>,
    de_facto_parent: Option<TitleId>,
    rng: &mut Xorshift32,
) -> Title {
    Title {
        id: TitleId::new(rank, entity),
        rank,
        entity_id: entity,
        name,
        map_color: mint_map_color(rng),
        coat_of_arms_seed: rng.next_u32(),
        holder_character_id: holder,
        de_jure_parent_title_id: de_jure_parent,
        de_facto_parent_title_id: de_facto_parent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_hierarchies() -> (Hierarchy, Hierarchy) {
        // four counties, two duchies, one kingdom; de facto shifts county 2
        let de_jure = Hierarchy {
            tile_to_county: vec![0, 1, 2, 3],
            county_to_duchy: vec![0, 0, 1, 1],
            duchy_to_kingdom: vec![0, 0],
            county_names: names(&["Ashford", "Thornbury", "Fennmoor", "Oakvale"]),
            duchy_names: names(&["Westmark", "Eastmark"]),
            kingdom_names: names(&["Velloria"]),
        };
        let mut de_facto = de_jure.clone();
        de_facto.county_to_duchy = vec![0, 0, 0, 1];
        (de_jure, de_facto)
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn fixture_assignment(seed: u64) -> TitleAssignment {
        let (de_jure, de_facto) = fixture_hierarchies();
        let rulers = names(&["Aldric", "Berwin", "Cedany", "Doran"]);
        assign_titles(seed, rulers, &de_jure, &de_facto).unwrap()
    }

    #[test]
    fn test_every_title_has_exactly_one_holder() {
        let out = fixture_assignment(9);
        assert_eq!(out.titles.len(), 7);
        for title in &out.titles {
            let holder = &out.characters[title.holder_character_id.0 as usize];
            assert!(holder.held_title_ids.contains(&title.id));
            let listed = out
                .characters
                .iter()
                .filter(|c| c.held_title_ids.contains(&title.id))
                .count();
            assert_eq!(listed, 1);
        }
    }

    #[test]
    fn test_held_lists_are_consistent() {
        let out = fixture_assignment(3);
        for character in &out.characters {
            assert!(!character.held_title_ids.is_empty());
            assert!(character.held_title_ids.contains(&character.primary_title_id));
            for &id in &character.held_title_ids {
                let title = out.titles.iter().find(|t| t.id == id).unwrap();
                assert_eq!(title.holder_character_id, character.id);
            }
        }
    }

    #[test]
    fn test_duchy_holders_rule_a_member_county() {
        let (_, de_facto) = fixture_hierarchies();
        let out = fixture_assignment(17);
        for title in out.titles.iter().filter(|t| t.rank == Rank::Duchy) {
            let holder = &out.characters[title.holder_character_id.0 as usize];
            let rules_member = holder.held_title_ids.iter().any(|id| {
                id.rank == Rank::County
                    && de_facto.county_to_duchy[id.entity as usize] == title.entity_id
            });
            assert!(rules_member);
        }
    }

    #[test]
    fn test_primary_prefers_rank_then_low_entity() {
        let held = vec![
            TitleId::new(Rank::County, 3),
            TitleId::new(Rank::Duchy, 5),
            TitleId::new(Rank::Duchy, 1),
        ];
        assert_eq!(primary_title(&held), Some(TitleId::new(Rank::Duchy, 1)));
        assert_eq!(primary_title(&[]), None);
    }

    #[test]
    fn test_parent_pointers_mirror_the_mappings() {
        let (de_jure, de_facto) = fixture_hierarchies();
        let out = fixture_assignment(21);
        for title in &out.titles {
            match title.rank {
                Rank::County => {
                    assert_eq!(
                        title.de_jure_parent_title_id,
                        Some(TitleId::new(
                            Rank::Duchy,
                            de_jure.county_to_duchy[title.entity_id as usize]
                        ))
                    );
                    assert_eq!(
                        title.de_facto_parent_title_id,
                        Some(TitleId::new(
                            Rank::Duchy,
                            de_facto.county_to_duchy[title.entity_id as usize]
                        ))
                    );
                }
                Rank::Duchy => {
                    assert_eq!(
                        title.de_jure_parent_title_id,
                        Some(TitleId::new(
                            Rank::Kingdom,
                            de_jure.duchy_to_kingdom[title.entity_id as usize]
                        ))
                    );
                }
                Rank::Kingdom => {
                    assert_eq!(title.de_jure_parent_title_id, None);
                    assert_eq!(title.de_facto_parent_title_id, None);
                }
            }
        }
    }

    #[test]
    fn test_assignment_is_deterministic() {
        let a = fixture_assignment(1234);
        let b = fixture_assignment(1234);
        assert_eq!(a.titles, b.titles);
        assert_eq!(a.characters, b.characters);
    }

    #[test]
    fn test_ruler_name_count_must_match() {
        let (de_jure, de_facto) = fixture_hierarchies();
        let result = assign_titles(1, names(&["Aldric"]), &de_jure, &de_facto);
        assert!(matches!(result, Err(GenError::InvalidParameter(_))));
    }
}
