//! Inscribes one room inside every leaf partition.

use crate::types::{NodeId, Point, Rect};

use super::seed::RandomSource;
use super::tree::PartitionTree;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoomShape {
    /// Fraction of the inset extent the bottom-left corner may wander into, `[0, 0.3]`.
    pub bottom_corner_modifier: f32,
    /// Fraction of the inset extent where the top-right corner may start, `[0.7, 1]`.
    pub top_corner_modifier: f32,
    /// Fixed inset from every side of the leaf.
    pub offset: i32,
}

/// Turn every leaf in `leaves` into a room node, in order.
pub fn inscribe_rooms(
    tree: &mut PartitionTree,
    leaves: &[NodeId],
    rng: &mut impl RandomSource,
    shape: RoomShape,
) {
    for &leaf in leaves {
        let area = tree.node(leaf).area;
        let room = inscribe_room(rng, &area, shape);
        log::debug!("room {room:?} inside {area:?}");
        tree.inscribe_room(leaf, room);
    }
}

/// Random room inside `area`. The result always lies within `area` shrunk by
/// `shape.offset`, provided the area is wider and longer than twice the offset.
pub fn inscribe_room(rng: &mut impl RandomSource, area: &Rect, shape: RoomShape) -> Rect {
    let (left, right) = corner_pair(rng, area.bottom_left().x, area.top_right().x, shape);
    let (bottom, top) = corner_pair(rng, area.bottom_left().y, area.top_right().y, shape);
    Rect::new(Point::new(left, bottom), Point::new(right, top))
}

/// Low and high room edges along one axis of the leaf `[low, high]`.
fn corner_pair(rng: &mut impl RandomSource, low: i32, high: i32, shape: RoomShape) -> (i32, i32) {
    let inset_low = low + shape.offset;
    let inset_high = high - shape.offset;
    debug_assert!(inset_low < inset_high, "offset {} swallows [{low}, {high}]", shape.offset);

    let extent = inset_high - inset_low;
    let lower_limit = inset_low + fraction_of(extent, shape.bottom_corner_modifier);
    let upper_start = inset_low + fraction_of(extent, shape.top_corner_modifier);

    let room_low = rng.range_inclusive(inset_low, lower_limit);
    let room_high = rng.range_inclusive(upper_start, inset_high);
    (room_low, room_high)
}

fn fraction_of(extent: i32, modifier: f32) -> i32 {
    (f64::from(extent) * f64::from(modifier)).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::leaves::extract_leaves;
    use crate::dungeon::partition::{PartitionLimits, build_partition_tree};
    use crate::dungeon::seed::DungeonRng;
    use crate::dungeon::seed::scripted::ScriptedRandom;
    use crate::dungeon::tree::NodeKind;

    const SHAPE: RoomShape =
        RoomShape { bottom_corner_modifier: 0.2, top_corner_modifier: 0.8, offset: 1 };

    #[test]
    fn scripted_draws_land_on_expected_corners() {
        // Leaf [0, 12] on both axes: inset [1, 11], extent 10,
        // low corner in [1, 3], high corner in [9, 11].
        let mut rng = ScriptedRandom::new(&[0, 2, 2, 0]);
        let room = inscribe_room(&mut rng, &Rect::sized(12, 12), SHAPE);
        assert_eq!(room, Rect::new(Point::new(1, 3), Point::new(11, 9)));
    }

    #[test]
    fn extreme_modifiers_still_fit_the_inset() {
        let shape = RoomShape { bottom_corner_modifier: 0.0, top_corner_modifier: 1.0, offset: 2 };
        let mut rng = DungeonRng::from_seed(5);
        let area = Rect::new(Point::new(10, 20), Point::new(15, 30));
        let room = inscribe_room(&mut rng, &area, shape);
        assert_eq!(room, Rect::new(Point::new(12, 22), Point::new(13, 28)));
    }

    #[test]
    fn narrow_leaves_never_produce_inverted_rooms() {
        let shape = RoomShape { bottom_corner_modifier: 0.3, top_corner_modifier: 0.7, offset: 1 };
        let mut rng = DungeonRng::from_seed(31);
        for width in 3..12 {
            for _ in 0..20 {
                let area = Rect::sized(width, 3);
                let room = inscribe_room(&mut rng, &area, shape);
                assert!(room.width() >= 0 && room.length() >= 0);
                assert!(area.contains_rect(&room));
            }
        }
    }

    #[test]
    fn every_leaf_becomes_a_room_inside_its_partition() {
        let limits = PartitionLimits { room_width_min: 6, room_length_min: 6 };
        let mut rng = DungeonRng::from_seed(77);
        let mut tree = build_partition_tree(&mut rng, 50, 50, 12, limits);
        let leaves = extract_leaves(&tree, tree.root());
        inscribe_rooms(&mut tree, &leaves, &mut rng, SHAPE);

        for leaf in leaves {
            let node = tree.node(leaf);
            let NodeKind::Room(room) = node.kind else {
                panic!("leaf {leaf:?} was not inscribed");
            };
            let inset = Rect::new(
                Point::new(node.area.bottom_left().x + 1, node.area.bottom_left().y + 1),
                Point::new(node.area.top_right().x - 1, node.area.top_right().y - 1),
            );
            assert!(inset.contains_rect(&room), "{room:?} escapes {inset:?}");
        }
    }
}
