//! Titles, characters and their string-encoded identifiers.
//!
//! The wire format carries composite ids as strings (`"duchy:4"`,
//! `"character:17"`). They are parsed once at the boundary and kept as
//! typed values everywhere else; serialization re-encodes them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hierarchy::Rank;
use crate::rng::Xorshift32;

/// A malformed composite identifier string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identifier {0:?}")]
pub struct ParseIdError(pub String);

/// Identity of one title: its rank and the entity it governs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TitleId {
    pub rank: Rank,
    pub entity: u32,
}

impl TitleId {
    pub fn new(rank: Rank, entity: u32) -> Self {
        Self { rank, entity }
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.rank.label(), self.entity)
    }
}

impl FromStr for TitleId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, entity) = s.split_once(':').ok_or_else(|| ParseIdError(s.into()))?;
        let rank = Rank::from_label(label).ok_or_else(|| ParseIdError(s.into()))?;
        let entity = entity.parse().map_err(|_| ParseIdError(s.into()))?;
        Ok(Self { rank, entity })
    }
}

impl TryFrom<String> for TitleId {
    type Error = ParseIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TitleId> for String {
    fn from(id: TitleId) -> String {
        id.to_string()
    }
}

/// Dense character index, encoded on the wire as `"character:N"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "character:{}", self.0)
    }
}

impl FromStr for CharacterId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index = s
            .strip_prefix("character:")
            .ok_or_else(|| ParseIdError(s.into()))?;
        let index = index.parse().map_err(|_| ParseIdError(s.into()))?;
        Ok(Self(index))
    }
}

impl TryFrom<String> for CharacterId {
    type Error = ParseIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CharacterId> for String {
    fn from(id: CharacterId) -> String {
        id.to_string()
    }
}

/// A named, ranked unit of territorial authority with one holder.
///
/// The parent pointers mirror the hierarchy mappings of the two governance
/// views; they are denormalized convenience data, not a second source of
/// truth, and must agree with the mappings exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub id: TitleId,
    pub rank: Rank,
    pub entity_id: u32,
    pub name: String,
    pub map_color: String,
    pub coat_of_arms_seed: u32,
    pub holder_character_id: CharacterId,
    pub de_jure_parent_title_id: Option<TitleId>,
    pub de_facto_parent_title_id: Option<TitleId>,
}

/// A ruling character holding one or more titles.
///
/// `held_title_ids` is non-empty, duplicate-free and contains the primary
/// title; every held title names this character as its holder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub primary_title_id: TitleId,
    pub held_title_ids: Vec<TitleId>,
}

/// Mint a `#rrggbb` map color from the title stream.
///
/// Hue spans the full wheel while saturation and value stay in a band that
/// keeps neighboring territories distinguishable on the painted map.
pub fn mint_map_color(rng: &mut Xorshift32) -> String {
    let hue = rng.next_f64() * 360.0;
    let saturation = 0.45 + rng.next_f64() * 0.30;
    let value = 0.65 + rng.next_f64() * 0.25;
    let (r, g, b) = hsv_to_rgb(hue, saturation, value);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> (u8, u8, u8) {
    let c = value * saturation;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = value - c;
    let (r, g, b) = match hue as u32 / 60 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}
