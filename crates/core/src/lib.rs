pub mod config;
pub mod dungeon;
pub mod types;

pub use config::{ConfigError, ConfigLoadError, DungeonConfig};
pub use dungeon::{Dungeon, DungeonGenerator, Feature, FeatureKind, generate_dungeon};
pub use types::*;
