//! Runs partitioning, room inscription and corridor synthesis in sequence.

use crate::config::{ConfigError, DungeonConfig};
use crate::types::NodeId;

use super::corridor::synthesize_corridors;
use super::leaves::extract_leaves;
use super::model::{Dungeon, Feature, FeatureKind};
use super::partition::{PartitionLimits, build_partition_tree};
use super::rooms::{RoomShape, inscribe_rooms};
use super::seed::{DungeonRng, RandomSource, derive_level_seed};
use super::tree::{NodeKind, PartitionTree};

/// Full result of one generation: the tree plus the room and corridor nodes
/// in output order.
pub struct DungeonLayout {
    pub tree: PartitionTree,
    pub rooms: Vec<NodeId>,
    pub corridors: Vec<NodeId>,
}

impl DungeonLayout {
    /// Flatten into the rectangle list handed to consumers.
    pub fn to_dungeon(&self) -> Dungeon {
        let bounds = self.tree.node(self.tree.root()).area;
        let rooms = self
            .rooms
            .iter()
            .map(|&id| Feature { kind: FeatureKind::Room, rect: self.tree.footprint(id) });
        let corridors = self.corridors.iter().filter_map(|&id| {
            let node = self.tree.node(id);
            match node.kind {
                NodeKind::Corridor(link) => Some(Feature {
                    kind: FeatureKind::Corridor { axis: link.axis, ends: link.ends },
                    rect: node.area,
                }),
                NodeKind::Partition | NodeKind::Room(_) => None,
            }
        });
        Dungeon {
            width: bounds.width(),
            length: bounds.length(),
            features: rooms.chain(corridors).collect(),
        }
    }
}

pub struct DungeonGenerator {
    seed: u64,
    config: DungeonConfig,
}

impl DungeonGenerator {
    pub fn new(seed: u64, config: DungeonConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { seed, config })
    }

    pub fn generate(&self) -> Dungeon {
        self.generate_layout().to_dungeon()
    }

    /// Dungeon for level `level` of the run, seeded independently of every
    /// other level.
    pub fn generate_level(&self, level: u32) -> Dungeon {
        let mut rng = DungeonRng::from_seed(derive_level_seed(self.seed, level));
        self.generate_layout_with(&mut rng).to_dungeon()
    }

    pub fn generate_layout(&self) -> DungeonLayout {
        let mut rng = DungeonRng::from_seed(self.seed);
        self.generate_layout_with(&mut rng)
    }

    /// Same as [`Self::generate_layout`] but drawing from `rng` instead of the
    /// generator's own seed.
    pub fn generate_layout_with(&self, rng: &mut impl RandomSource) -> DungeonLayout {
        let config = &self.config;
        let limits = PartitionLimits {
            room_width_min: config.room_width_min,
            room_length_min: config.room_length_min,
        };
        let mut tree = build_partition_tree(
            rng,
            config.dungeon_width,
            config.dungeon_length,
            config.max_iterations,
            limits,
        );

        let rooms = extract_leaves(&tree, tree.root());
        let shape = RoomShape {
            bottom_corner_modifier: config.room_bottom_corner_modifier,
            top_corner_modifier: config.room_top_corner_modifier,
            offset: config.room_offset,
        };
        inscribe_rooms(&mut tree, &rooms, rng, shape);

        let corridors = synthesize_corridors(&mut tree, rng, config.corridor_width);
        log::debug!(
            "generated {} rooms and {} corridors from {} nodes",
            rooms.len(),
            corridors.len(),
            tree.len()
        );
        DungeonLayout { tree, rooms, corridors }
    }
}
