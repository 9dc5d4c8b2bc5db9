//! Binary space partitioning dungeon generation split into its stages.

pub mod corridor;
pub mod leaves;
pub mod model;
pub mod overlap;
pub mod partition;
pub mod rooms;
pub mod seed;
pub mod tree;

mod generator;

pub use generator::{DungeonGenerator, DungeonLayout};
pub use model::{Dungeon, Feature, FeatureKind};
pub use seed::{DungeonRng, RandomSource, derive_level_seed};
pub use tree::{CorridorLink, NodeKind, PartitionTree, TreeNode};

use crate::config::{ConfigError, DungeonConfig};

pub fn generate_dungeon(seed: u64, config: &DungeonConfig) -> Result<Dungeon, ConfigError> {
    Ok(DungeonGenerator::new(seed, config.clone())?.generate())
}
