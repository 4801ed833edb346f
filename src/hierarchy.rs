//! The three-rank territorial hierarchy and its governance views.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A rank of territorial authority. Tiles group into counties, counties
/// into duchies, duchies into kingdoms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    County,
    Duchy,
    Kingdom,
}

impl Rank {
    /// Precedence weight used when choosing a ruler's primary title.
    pub fn weight(self) -> u8 {
        match self {
            Rank::County => 1,
            Rank::Duchy => 2,
            Rank::Kingdom => 3,
        }
    }

    /// The rank one level up, if any. Kingdoms are apex.
    pub fn parent(self) -> Option<Rank> {
        match self {
            Rank::County => Some(Rank::Duchy),
            Rank::Duchy => Some(Rank::Kingdom),
            Rank::Kingdom => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::County => "county",
            Rank::Duchy => "duchy",
            Rank::Kingdom => "kingdom",
        }
    }

    pub fn from_label(label: &str) -> Option<Rank> {
        match label {
            "county" => Some(Rank::County),
            "duchy" => Some(Rank::Duchy),
            "kingdom" => Some(Rank::Kingdom),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which governance view of the hierarchy to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// The legal, nominal hierarchy.
    DeJure,
    /// Actual control, a bounded drift of the legal view.
    DeFacto,
}

/// One governance view: the full chain of assignments from tiles up to
/// kingdoms, with the display names for every rank.
///
/// Every index in `[0, count)` at every rank is the image of at least one
/// lower-level entity; name lists are length-matched to entity counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hierarchy {
    pub tile_to_county: Vec<u32>,
    pub county_to_duchy: Vec<u32>,
    pub duchy_to_kingdom: Vec<u32>,
    pub county_names: Vec<String>,
    pub duchy_names: Vec<String>,
    pub kingdom_names: Vec<String>,
}

impl Hierarchy {
    pub fn county_count(&self) -> usize {
        self.county_names.len()
    }

    pub fn duchy_count(&self) -> usize {
        self.duchy_names.len()
    }

    pub fn kingdom_count(&self) -> usize {
        self.kingdom_names.len()
    }

    pub fn entity_count(&self, rank: Rank) -> usize {
        match rank {
            Rank::County => self.county_count(),
            Rank::Duchy => self.duchy_count(),
            Rank::Kingdom => self.kingdom_count(),
        }
    }

    pub fn names(&self, rank: Rank) -> &[String] {
        match rank {
            Rank::County => &self.county_names,
            Rank::Duchy => &self.duchy_names,
            Rank::Kingdom => &self.kingdom_names,
        }
    }

    /// The parent entity of `entity` at `rank`, `None` for kingdoms and
    /// out-of-range entities.
    pub fn parent_entity(&self, rank: Rank, entity: u32) -> Option<u32> {
        match rank {
            Rank::County => self.county_to_duchy.get(entity as usize).copied(),
            Rank::Duchy => self.duchy_to_kingdom.get(entity as usize).copied(),
            Rank::Kingdom => None,
        }
    }
}

/// The two governance views carried by every map payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceModes {
    pub de_jure: Hierarchy,
    pub de_facto: Hierarchy,
}

impl GovernanceModes {
    pub fn view(&self, mode: Mode) -> &Hierarchy {
        match mode {
            Mode::DeJure => &self.de_jure,
            Mode::DeFacto => &self.de_facto,
        }
    }
}
