//! Map generation pipeline and the aggregate it produces.
//!
//! `generate` wires the stages together: partition tiles into counties,
//! group counties into duchies and duchies into kingdoms for the legal
//! view, drift each grouping for the actual-control view, then name
//! everything and mint the ownership graph. The result is built once and
//! treated as an immutable value afterwards.

use serde::{Deserialize, Serialize};

use crate::adjacency::{county_adjacency, project_adjacency};
use crate::assign::assign_titles;
use crate::drift::drift_assignments;
use crate::error::GenError;
use crate::grid::{tile_adjacency, Grid};
use crate::hierarchy::{GovernanceModes, Hierarchy};
use crate::naming::NameForge;
use crate::regions::grow_regions;
use crate::rng::Xorshift32;
use crate::seeds::RealmSeeds;
use crate::titles::{Character, Title};

/// Fraction of assignments drifted between the governance views.
const DRIFT_RATIO: f64 = 0.10;

/// What the payload carries beyond the spatial hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapVariant {
    /// Hierarchy only; `titles` and `characters` stay empty.
    Minimal,
    /// Hierarchy plus the full title/character ownership graph.
    WithTitles,
}

impl MapVariant {
    pub fn version(self) -> u32 {
        match self {
            MapVariant::Minimal => 1,
            MapVariant::WithTitles => 2,
        }
    }
}

/// Generation parameters. `Default` gives a mid-sized map with the full
/// ownership graph.
#[derive(Clone, Debug)]
pub struct GenerateParams {
    pub width: u32,
    pub height: u32,
    pub tile_size_px: u32,
    pub chunk_size: u32,
    pub county_count: u32,
    pub duchy_count: u32,
    pub kingdom_count: u32,
    pub variant: MapVariant,
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            width: 128,
            height: 96,
            tile_size_px: 32,
            chunk_size: 16,
            county_count: 96,
            duchy_count: 24,
            kingdom_count: 6,
            variant: MapVariant::WithTitles,
        }
    }
}

/// The complete generated map: grid metadata, both governance views, and
/// the ownership graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldMapData {
    pub version: u32,
    pub grid: Grid,
    pub modes: GovernanceModes,
    pub titles: Vec<Title>,
    pub characters: Vec<Character>,
}

/// Generate a world map with default parameters.
pub fn generate(seed: i64) -> Result<WorldMapData, GenError> {
    generate_with(seed, &GenerateParams::default())
}

/// Generate a world map.
///
/// Deterministic: the same seed and parameters always produce the same
/// payload. Parameter preconditions are checked before any work starts.
pub fn generate_with(seed: i64, params: &GenerateParams) -> Result<WorldMapData, GenError> {
    check_params(params)?;

    let tile_count = params.width as usize * params.height as usize;
    let county_count = params.county_count as usize;
    let duchy_count = params.duchy_count as usize;
    let kingdom_count = params.kingdom_count as usize;

    let seeds = RealmSeeds::from_master(seed);

    let tiles = tile_adjacency(params.width, params.height);
    let mut county_rng = Xorshift32::new(seeds.counties);
    let tile_to_county = grow_regions(tile_count, county_count, &mut county_rng, &tiles)?;
    let county_adj = county_adjacency(params.width, params.height, &tile_to_county, county_count);

    let mut duchy_rng = Xorshift32::new(seeds.duchies);
    let county_to_duchy = grow_regions(county_count, duchy_count, &mut duchy_rng, &county_adj)?;

    let mut duchy_drift_rng = Xorshift32::new(seeds.duchy_drift);
    let county_to_duchy_facto = drift_assignments(
        &county_to_duchy,
        &county_adj,
        duchy_count,
        drift_target(county_count),
        &mut duchy_drift_rng,
    )?;

    let duchy_adj = project_adjacency(&county_adj, &county_to_duchy, duchy_count);
    let mut kingdom_rng = Xorshift32::new(seeds.kingdoms);
    let duchy_to_kingdom = grow_regions(duchy_count, kingdom_count, &mut kingdom_rng, &duchy_adj)?;

    let duchy_adj_facto = project_adjacency(&county_adj, &county_to_duchy_facto, duchy_count);
    let mut kingdom_drift_rng = Xorshift32::new(seeds.kingdom_drift);
    let duchy_to_kingdom_facto = drift_assignments(
        &duchy_to_kingdom,
        &duchy_adj_facto,
        kingdom_count,
        drift_target(duchy_count),
        &mut kingdom_drift_rng,
    )?;

    let mut forge = NameForge::new(seeds.names);
    let county_names = forge.county_names(county_count);
    let duchy_names = forge.duchy_names(duchy_count);
    let kingdom_names = forge.kingdom_names(kingdom_count);

    let de_jure = Hierarchy {
        tile_to_county: tile_to_county.clone(),
        county_to_duchy,
        duchy_to_kingdom,
        county_names: county_names.clone(),
        duchy_names: duchy_names.clone(),
        kingdom_names: kingdom_names.clone(),
    };
    let de_facto = Hierarchy {
        tile_to_county,
        county_to_duchy: county_to_duchy_facto,
        duchy_to_kingdom: duchy_to_kingdom_facto,
        county_names,
        duchy_names,
        kingdom_names,
    };

    let (titles, characters) = match params.variant {
        MapVariant::Minimal => (Vec::new(), Vec::new()),
        MapVariant::WithTitles => {
            let rulers = forge.ruler_names(county_count);
            let assignment = assign_titles(seeds.titles, rulers, &de_jure, &de_facto)?;
            (assignment.titles, assignment.characters)
        }
    };

    tracing::info!(
        target: "realm_generator::worldmap",
        seed,
        tiles = tile_count,
        counties = county_count,
        duchies = duchy_count,
        kingdoms = kingdom_count,
        titles = titles.len(),
        "worldmap.generated"
    );

    Ok(WorldMapData {
        version: params.variant.version(),
        grid: Grid {
            width: params.width,
            height: params.height,
            tile_size_px: params.tile_size_px,
            chunk_size: params.chunk_size,
            seed,
        },
        modes: GovernanceModes { de_jure, de_facto },
        titles,
        characters,
    })
}

fn drift_target(count: usize) -> usize {
    ((count as f64 * DRIFT_RATIO).round() as usize).max(1)
}

fn check_params(params: &GenerateParams) -> Result<(), GenError> {
    let tile_count = params.width as usize * params.height as usize;
    if tile_count == 0 {
        return Err(GenError::InvalidParameter(
            "grid must have at least one tile".into(),
        ));
    }
    if params.county_count == 0 || params.duchy_count == 0 || params.kingdom_count == 0 {
        return Err(GenError::InvalidParameter(
            "county, duchy and kingdom counts must be positive".into(),
        ));
    }
    if params.duchy_count > params.county_count {
        return Err(GenError::InvalidParameter(format!(
            "duchy count {} exceeds county count {}",
            params.duchy_count, params.county_count
        )));
    }
    if params.kingdom_count > params.duchy_count {
        return Err(GenError::InvalidParameter(format!(
            "kingdom count {} exceeds duchy count {}",
            params.kingdom_count, params.duchy_count
        )));
    }
    if params.county_count as usize > tile_count {
        return Err(GenError::InvalidParameter(format!(
            "county count {} exceeds tile count {}",
            params.county_count, tile_count
        )));
    }
    Ok(())
}
