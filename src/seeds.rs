//! Seed management for map generation.
//!
//! Each pipeline stage gets its own seed, derived from a master seed, so
//! the stages draw from independent streams and the whole map is
//! reproducible from one integer.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for every randomized stage of the map pipeline.
#[derive(Clone, Debug)]
pub struct RealmSeeds {
    /// Master seed (used for display/reference and stored in the payload)
    pub master: i64,
    /// County partitioning of the tile grid
    pub counties: u64,
    /// De jure grouping of counties into duchies
    pub duchies: u64,
    /// De facto drift of the county-to-duchy assignment
    pub duchy_drift: u64,
    /// De jure grouping of duchies into kingdoms
    pub kingdoms: u64,
    /// De facto drift of the duchy-to-kingdom assignment
    pub kingdom_drift: u64,
    /// Name generation for counties, duchies, kingdoms and rulers
    pub names: u64,
    /// Title minting and holder election
    pub titles: u64,
}

impl RealmSeeds {
    /// Derive all stage seeds deterministically from a master seed.
    pub fn from_master(master: i64) -> Self {
        Self {
            master,
            counties: derive_seed(master, "counties"),
            duchies: derive_seed(master, "duchies"),
            duchy_drift: derive_seed(master, "duchy-drift"),
            kingdoms: derive_seed(master, "kingdoms"),
            kingdom_drift: derive_seed(master, "kingdom-drift"),
            names: derive_seed(master, "names"),
            titles: derive_seed(master, "titles"),
        }
    }
}

/// Derive a stage seed from the master seed and a fixed stage name.
/// Hashing keeps the stages distinct but deterministic.
fn derive_seed(master: i64, stage: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    stage.hash(&mut hasher);
    hasher.finish()
}
