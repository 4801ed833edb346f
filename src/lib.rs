//! Hierarchical territory map generation for strategy-game worlds.
//!
//! A seeded pipeline partitions a tile grid into counties, duchies and
//! kingdoms under two governance views (legal and actual control), then
//! mints a consistent title/character ownership graph on top. A validator
//! re-checks every invariant on untrusted payloads; read-only queries serve
//! rendering and UI.

pub mod adjacency;
pub mod assign;
pub mod drift;
pub mod error;
pub mod grid;
pub mod hierarchy;
pub mod naming;
pub mod query;
pub mod regions;
pub mod rng;
pub mod seeds;
pub mod titles;
pub mod validate;
pub mod worldmap;

pub use error::GenError;
pub use grid::Grid;
pub use hierarchy::{GovernanceModes, Hierarchy, Mode, Rank};
pub use query::{active_entity_by_tile, entity_name, resolve_entity_id};
pub use titles::{Character, CharacterId, Title, TitleId};
pub use validate::{validate, ValidateError};
pub use worldmap::{generate, generate_with, GenerateParams, MapVariant, WorldMapData};
