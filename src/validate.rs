//! Validation of untrusted map payloads.
//!
//! The loading layer hands over raw JSON; this module walks it field by
//! field and either returns a typed [`WorldMapData`] or fails with an
//! error naming the offending field and index. Nothing is repaired and
//! nothing is partially accepted: re-validating generator output is an
//! identity transformation.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::grid::Grid;
use crate::hierarchy::{GovernanceModes, Hierarchy, Rank};
use crate::titles::{Character, CharacterId, Title, TitleId};
use crate::worldmap::WorldMapData;

/// A payload rejected by [`validate`].
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("{path}: missing field")]
    MissingField { path: String },

    #[error("{path}: expected {expected}")]
    WrongType { path: String, expected: &'static str },

    #[error("{path}: expected length {expected}, found {actual}")]
    WrongLength {
        path: String,
        expected: usize,
        actual: usize,
    },

    #[error("{path}[{index}]: {value} is outside 0..{limit}")]
    OutOfRange {
        path: String,
        index: usize,
        value: u64,
        limit: usize,
    },

    #[error("{path}: {reason}")]
    Invalid { path: String, reason: String },

    #[error("unsupported map version {0}")]
    UnsupportedVersion(u64),

    #[error("modes.{mode}: {rank} {entity} has no members")]
    EmptyRegion {
        mode: &'static str,
        rank: &'static str,
        entity: u32,
    },

    #[error("governance views disagree on {what}")]
    SharedBaseViolation { what: &'static str },

    #[error("countyToDuchy is identical in both views; actual control must diverge from the legal view")]
    ViewsNotDiverged,

    #[error("titles[{index}]: duplicate id {id}")]
    DuplicateTitleId { index: usize, id: String },

    #[error("title {title}: holder {holder} does not list it among held titles")]
    HolderMismatch { title: String, holder: String },

    #[error("character {character} lists {title} but its holder is {holder}")]
    HeldTitleNotOwned {
        character: String,
        title: String,
        holder: String,
    },
}

/// Validate a raw payload against every invariant the generator
/// establishes.
pub fn validate(payload: &Value) -> Result<WorldMapData, ValidateError> {
    let root = as_object(payload, "payload")?;

    let version = as_uint(get(root, "", "version")?, "version")?;
    if version != 1 && version != 2 {
        return Err(ValidateError::UnsupportedVersion(version));
    }

    let grid = parse_grid(get(root, "", "grid")?)?;
    let tile_count = grid.tile_count();

    let modes_obj = as_object(get(root, "", "modes")?, "modes")?;
    let de_jure = parse_hierarchy(
        get(modes_obj, "modes", "deJure")?,
        "modes.deJure",
        tile_count,
    )?;
    let de_facto = parse_hierarchy(
        get(modes_obj, "modes", "deFacto")?,
        "modes.deFacto",
        tile_count,
    )?;

    check_coverage(&de_jure, "deJure")?;
    check_coverage(&de_facto, "deFacto")?;
    check_cross_mode(&de_jure, &de_facto)?;

    let titles_value = as_array(get(root, "", "titles")?, "titles")?;
    let characters_value = as_array(get(root, "", "characters")?, "characters")?;

    let (titles, characters) = if version == 1 {
        if !titles_value.is_empty() {
            return Err(ValidateError::WrongLength {
                path: "titles".into(),
                expected: 0,
                actual: titles_value.len(),
            });
        }
        if !characters_value.is_empty() {
            return Err(ValidateError::WrongLength {
                path: "characters".into(),
                expected: 0,
                actual: characters_value.len(),
            });
        }
        (Vec::new(), Vec::new())
    } else {
        let titles = parse_titles(titles_value, &de_jure, &de_facto, characters_value.len())?;
        let characters = parse_characters(characters_value, &titles)?;
        check_holder_graph(&titles, &characters)?;
        (titles, characters)
    };

    Ok(WorldMapData {
        version: version as u32,
        grid,
        modes: GovernanceModes { de_jure, de_facto },
        titles,
        characters,
    })
}

fn parse_grid(value: &Value) -> Result<Grid, ValidateError> {
    let obj = as_object(value, "grid")?;
    let width = positive_u32(get(obj, "grid", "width")?, "grid.width")?;
    let height = positive_u32(get(obj, "grid", "height")?, "grid.height")?;
    let tile_size_px = positive_u32(get(obj, "grid", "tileSizePx")?, "grid.tileSizePx")?;
    let chunk_size = positive_u32(get(obj, "grid", "chunkSize")?, "grid.chunkSize")?;
    let seed = as_int(get(obj, "grid", "seed")?, "grid.seed")?;
    Ok(Grid {
        width,
        height,
        tile_size_px,
        chunk_size,
        seed,
    })
}

fn parse_hierarchy(
    value: &Value,
    path: &str,
    tile_count: usize,
) -> Result<Hierarchy, ValidateError> {
    let obj = as_object(value, path)?;

    let county_names = name_list(get(obj, path, "countyNames")?, &format!("{path}.countyNames"))?;
    let duchy_names = name_list(get(obj, path, "duchyNames")?, &format!("{path}.duchyNames"))?;
    let kingdom_names = name_list(
        get(obj, path, "kingdomNames")?,
        &format!("{path}.kingdomNames"),
    )?;

    let tile_to_county = index_list(
        get(obj, path, "tileToCounty")?,
        &format!("{path}.tileToCounty"),
        tile_count,
        county_names.len(),
    )?;
    let county_to_duchy = index_list(
        get(obj, path, "countyToDuchy")?,
        &format!("{path}.countyToDuchy"),
        county_names.len(),
        duchy_names.len(),
    )?;
    let duchy_to_kingdom = index_list(
        get(obj, path, "duchyToKingdom")?,
        &format!("{path}.duchyToKingdom"),
        duchy_names.len(),
        kingdom_names.len(),
    )?;

    Ok(Hierarchy {
        tile_to_county,
        county_to_duchy,
        duchy_to_kingdom,
        county_names,
        duchy_names,
        kingdom_names,
    })
}

/// Every entity index at every rank must be the image of at least one
/// lower-level element.
fn check_coverage(hierarchy: &Hierarchy, mode: &'static str) -> Result<(), ValidateError> {
    let checks: [(&[u32], usize, &'static str); 3] = [
        (&hierarchy.tile_to_county, hierarchy.county_count(), "county"),
        (&hierarchy.county_to_duchy, hierarchy.duchy_count(), "duchy"),
        (
            &hierarchy.duchy_to_kingdom,
            hierarchy.kingdom_count(),
            "kingdom",
        ),
    ];
    for (mapping, count, rank) in checks {
        let mut seen = vec![false; count];
        for &target in mapping {
            seen[target as usize] = true;
        }
        if let Some(entity) = seen.iter().position(|&s| !s) {
            return Err(ValidateError::EmptyRegion {
                mode,
                rank,
                entity: entity as u32,
            });
        }
    }
    Ok(())
}

fn check_cross_mode(de_jure: &Hierarchy, de_facto: &Hierarchy) -> Result<(), ValidateError> {
    if de_jure.tile_to_county != de_facto.tile_to_county {
        return Err(ValidateError::SharedBaseViolation {
            what: "tileToCounty",
        });
    }
    if de_jure.county_names != de_facto.county_names {
        return Err(ValidateError::SharedBaseViolation {
            what: "countyNames",
        });
    }
    if de_jure.duchy_count() != de_facto.duchy_count() {
        return Err(ValidateError::SharedBaseViolation {
            what: "the number of duchies",
        });
    }
    if de_jure.kingdom_count() != de_facto.kingdom_count() {
        return Err(ValidateError::SharedBaseViolation {
            what: "the number of kingdoms",
        });
    }
    if de_jure.county_to_duchy == de_facto.county_to_duchy {
        return Err(ValidateError::ViewsNotDiverged);
    }
    Ok(())
}

fn parse_titles(
    values: &[Value],
    de_jure: &Hierarchy,
    de_facto: &Hierarchy,
    character_count: usize,
) -> Result<Vec<Title>, ValidateError> {
    let expected =
        de_jure.county_count() + de_jure.duchy_count() + de_jure.kingdom_count();
    if values.len() != expected {
        return Err(ValidateError::WrongLength {
            path: "titles".into(),
            expected,
            actual: values.len(),
        });
    }

    let mut seen: HashSet<TitleId> = HashSet::with_capacity(expected);
    let mut titles = Vec::with_capacity(expected);

    for (index, value) in values.iter().enumerate() {
        let path = format!("titles[{index}]");
        let obj = as_object(value, &path)?;

        let id_str = as_str(get(obj, &path, "id")?, &format!("{path}.id"))?;
        let id: TitleId = id_str.parse().map_err(|_| ValidateError::Invalid {
            path: format!("{path}.id"),
            reason: format!("unrecognized title id {id_str:?}"),
        })?;

        let rank_str = as_str(get(obj, &path, "rank")?, &format!("{path}.rank"))?;
        let rank = Rank::from_label(rank_str).ok_or_else(|| ValidateError::Invalid {
            path: format!("{path}.rank"),
            reason: format!("unrecognized rank {rank_str:?}"),
        })?;

        let entity = as_uint(get(obj, &path, "entityId")?, &format!("{path}.entityId"))?;
        let limit = de_jure.entity_count(rank);
        if entity >= limit as u64 {
            return Err(ValidateError::Invalid {
                path: format!("{path}.entityId"),
                reason: format!("entity {entity} out of range for {limit} {rank} entities"),
            });
        }
        let entity = entity as u32;

        if id.rank != rank || id.entity != entity {
            return Err(ValidateError::Invalid {
                path: format!("{path}.id"),
                reason: format!(
                    "id {id} does not match rank {rank} and entityId {entity}"
                ),
            });
        }
        if !seen.insert(id) {
            return Err(ValidateError::DuplicateTitleId {
                index,
                id: id.to_string(),
            });
        }

        let name = as_str(get(obj, &path, "name")?, &format!("{path}.name"))?;
        if name.is_empty() {
            return Err(ValidateError::Invalid {
                path: format!("{path}.name"),
                reason: "name must not be empty".into(),
            });
        }

        let map_color = as_str(get(obj, &path, "mapColor")?, &format!("{path}.mapColor"))?;
        let hex_ok = map_color.len() == 7
            && map_color.starts_with('#')
            && map_color[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !hex_ok {
            return Err(ValidateError::Invalid {
                path: format!("{path}.mapColor"),
                reason: format!("{map_color:?} is not a #rrggbb color"),
            });
        }

        let coat = as_uint(
            get(obj, &path, "coatOfArmsSeed")?,
            &format!("{path}.coatOfArmsSeed"),
        )?;
        if coat > u32::MAX as u64 {
            return Err(ValidateError::Invalid {
                path: format!("{path}.coatOfArmsSeed"),
                reason: "exceeds 32 bits".into(),
            });
        }

        let holder_str = as_str(
            get(obj, &path, "holderCharacterId")?,
            &format!("{path}.holderCharacterId"),
        )?;
        let holder: CharacterId = holder_str.parse().map_err(|_| ValidateError::Invalid {
            path: format!("{path}.holderCharacterId"),
            reason: format!("unrecognized character id {holder_str:?}"),
        })?;
        if holder.0 as usize >= character_count {
            return Err(ValidateError::Invalid {
                path: format!("{path}.holderCharacterId"),
                reason: format!(
                    "{holder} does not exist among {character_count} characters"
                ),
            });
        }

        let de_jure_parent = parse_parent(
            get(obj, &path, "deJureParentTitleId")?,
            &format!("{path}.deJureParentTitleId"),
            rank,
            entity,
            de_jure,
        )?;
        let de_facto_parent = parse_parent(
            get(obj, &path, "deFactoParentTitleId")?,
            &format!("{path}.deFactoParentTitleId"),
            rank,
            entity,
            de_facto,
        )?;

        titles.push(Title {
            id,
            rank,
            entity_id: entity,
            name: name.to_string(),
            map_color: map_color.to_string(),
            coat_of_arms_seed: coat as u32,
            holder_character_id: holder,
            de_jure_parent_title_id: de_jure_parent,
            de_facto_parent_title_id: de_facto_parent,
        });
    }

    Ok(titles)
}

/// Parent pointers are a denormalized mirror of the hierarchy mapping and
/// must agree with it exactly.
fn parse_parent(
    value: &Value,
    path: &str,
    rank: Rank,
    entity: u32,
    hierarchy: &Hierarchy,
) -> Result<Option<TitleId>, ValidateError> {
    let parent_rank = rank.parent();

    if value.is_null() {
        return match parent_rank {
            None => Ok(None),
            Some(expected) => Err(ValidateError::Invalid {
                path: path.into(),
                reason: format!("a {rank} title must reference a {expected} parent"),
            }),
        };
    }

    let parent_str = as_str(value, path)?;
    let parent: TitleId = parent_str.parse().map_err(|_| ValidateError::Invalid {
        path: path.into(),
        reason: format!("unrecognized title id {parent_str:?}"),
    })?;

    let expected_rank = parent_rank.ok_or_else(|| ValidateError::Invalid {
        path: path.into(),
        reason: "kingdom titles have no parent".into(),
    })?;
    if parent.rank != expected_rank {
        return Err(ValidateError::Invalid {
            path: path.into(),
            reason: format!(
                "parent of a {rank} must be a {expected_rank}, found {}",
                parent.rank
            ),
        });
    }

    // parent_entity is Some for every non-kingdom rank with entity in range
    let expected_entity = hierarchy.parent_entity(rank, entity);
    if expected_entity != Some(parent.entity) {
        return Err(ValidateError::Invalid {
            path: path.into(),
            reason: format!(
                "disagrees with the hierarchy mapping: expected {expected_rank}:{}",
                expected_entity.unwrap_or(0)
            ),
        });
    }

    Ok(Some(parent))
}

fn parse_characters(
    values: &[Value],
    titles: &[Title],
) -> Result<Vec<Character>, ValidateError> {
    let known: HashSet<TitleId> = titles.iter().map(|t| t.id).collect();
    let mut characters = Vec::with_capacity(values.len());

    for (index, value) in values.iter().enumerate() {
        let path = format!("characters[{index}]");
        let obj = as_object(value, &path)?;

        let id_str = as_str(get(obj, &path, "id")?, &format!("{path}.id"))?;
        let id: CharacterId = id_str.parse().map_err(|_| ValidateError::Invalid {
            path: format!("{path}.id"),
            reason: format!("unrecognized character id {id_str:?}"),
        })?;
        if id.0 as usize != index {
            return Err(ValidateError::Invalid {
                path: format!("{path}.id"),
                reason: format!("character ids must be dense, expected character:{index}"),
            });
        }

        let name = as_str(get(obj, &path, "name")?, &format!("{path}.name"))?;
        if name.is_empty() {
            return Err(ValidateError::Invalid {
                path: format!("{path}.name"),
                reason: "name must not be empty".into(),
            });
        }

        let primary_str = as_str(
            get(obj, &path, "primaryTitleId")?,
            &format!("{path}.primaryTitleId"),
        )?;
        let primary: TitleId = primary_str.parse().map_err(|_| ValidateError::Invalid {
            path: format!("{path}.primaryTitleId"),
            reason: format!("unrecognized title id {primary_str:?}"),
        })?;

        let held_values = as_array(
            get(obj, &path, "heldTitleIds")?,
            &format!("{path}.heldTitleIds"),
        )?;
        if held_values.is_empty() {
            return Err(ValidateError::Invalid {
                path: format!("{path}.heldTitleIds"),
                reason: "must not be empty".into(),
            });
        }

        let mut held = Vec::with_capacity(held_values.len());
        let mut held_set = HashSet::with_capacity(held_values.len());
        for (slot, held_value) in held_values.iter().enumerate() {
            let slot_path = format!("{path}.heldTitleIds[{slot}]");
            let held_str = as_str(held_value, &slot_path)?;
            let held_id: TitleId = held_str.parse().map_err(|_| ValidateError::Invalid {
                path: slot_path.clone(),
                reason: format!("unrecognized title id {held_str:?}"),
            })?;
            if !known.contains(&held_id) {
                return Err(ValidateError::Invalid {
                    path: slot_path,
                    reason: format!("references unknown title {held_id}"),
                });
            }
            if !held_set.insert(held_id) {
                return Err(ValidateError::Invalid {
                    path: slot_path,
                    reason: format!("duplicate held title {held_id}"),
                });
            }
            held.push(held_id);
        }

        if !held_set.contains(&primary) {
            return Err(ValidateError::Invalid {
                path: format!("{path}.primaryTitleId"),
                reason: format!("{primary} is not among the held titles"),
            });
        }

        characters.push(Character {
            id,
            name: name.to_string(),
            primary_title_id: primary,
            held_title_ids: held,
        });
    }

    Ok(characters)
}

/// Full bidirectional title/character consistency: each title is held by
/// exactly the character it names, in both directions.
fn check_holder_graph(
    titles: &[Title],
    characters: &[Character],
) -> Result<(), ValidateError> {
    let holder_of: HashMap<TitleId, CharacterId> = titles
        .iter()
        .map(|t| (t.id, t.holder_character_id))
        .collect();

    for character in characters {
        for &held in &character.held_title_ids {
            // existence was checked while parsing characters
            let holder = holder_of[&held];
            if holder != character.id {
                return Err(ValidateError::HeldTitleNotOwned {
                    character: character.id.to_string(),
                    title: held.to_string(),
                    holder: holder.to_string(),
                });
            }
        }
    }

    for title in titles {
        let holder = &characters[title.holder_character_id.0 as usize];
        if !holder.held_title_ids.contains(&title.id) {
            return Err(ValidateError::HolderMismatch {
                title: title.id.to_string(),
                holder: title.holder_character_id.to_string(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Value-walking helpers
// ---------------------------------------------------------------------------

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidateError> {
    value.as_object().ok_or_else(|| ValidateError::WrongType {
        path: path.into(),
        expected: "an object",
    })
}

fn get<'a>(
    obj: &'a Map<String, Value>,
    parent: &str,
    key: &str,
) -> Result<&'a Value, ValidateError> {
    obj.get(key).ok_or_else(|| ValidateError::MissingField {
        path: if parent.is_empty() {
            key.to_string()
        } else {
            format!("{parent}.{key}")
        },
    })
}

fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, ValidateError> {
    value.as_array().ok_or_else(|| ValidateError::WrongType {
        path: path.into(),
        expected: "an array",
    })
}

fn as_str<'a>(value: &'a Value, path: &str) -> Result<&'a str, ValidateError> {
    value.as_str().ok_or_else(|| ValidateError::WrongType {
        path: path.into(),
        expected: "a string",
    })
}

fn as_uint(value: &Value, path: &str) -> Result<u64, ValidateError> {
    value.as_u64().ok_or_else(|| ValidateError::WrongType {
        path: path.into(),
        expected: "a non-negative integer",
    })
}

fn as_int(value: &Value, path: &str) -> Result<i64, ValidateError> {
    value.as_i64().ok_or_else(|| ValidateError::WrongType {
        path: path.into(),
        expected: "an integer",
    })
}

fn positive_u32(value: &Value, path: &str) -> Result<u32, ValidateError> {
    let raw = as_uint(value, path)?;
    if raw == 0 || raw > u32::MAX as u64 {
        return Err(ValidateError::Invalid {
            path: path.into(),
            reason: format!("{raw} is not a positive 32-bit integer"),
        });
    }
    Ok(raw as u32)
}

/// An array of entity indices with an exact length and an exclusive upper
/// bound on every element.
fn index_list(
    value: &Value,
    path: &str,
    expected_len: usize,
    limit: usize,
) -> Result<Vec<u32>, ValidateError> {
    let values = as_array(value, path)?;
    if values.len() != expected_len {
        return Err(ValidateError::WrongLength {
            path: path.into(),
            expected: expected_len,
            actual: values.len(),
        });
    }
    let mut out = Vec::with_capacity(values.len());
    for (index, entry) in values.iter().enumerate() {
        let raw = entry.as_u64().ok_or_else(|| ValidateError::WrongType {
            path: format!("{path}[{index}]"),
            expected: "a non-negative integer",
        })?;
        if raw >= limit as u64 {
            return Err(ValidateError::OutOfRange {
                path: path.into(),
                index,
                value: raw,
                limit,
            });
        }
        out.push(raw as u32);
    }
    Ok(out)
}

/// A non-empty list of non-empty name strings.
fn name_list(value: &Value, path: &str) -> Result<Vec<String>, ValidateError> {
    let values = as_array(value, path)?;
    if values.is_empty() {
        return Err(ValidateError::Invalid {
            path: path.into(),
            reason: "must not be empty".into(),
        });
    }
    let mut out = Vec::with_capacity(values.len());
    for (index, entry) in values.iter().enumerate() {
        let name = as_str(entry, &format!("{path}[{index}]"))?;
        if name.is_empty() {
            return Err(ValidateError::Invalid {
                path: format!("{path}[{index}]"),
                reason: "name must not be empty".into(),
            });
        }
        out.push(name.to_string());
    }
    Ok(out)
}
