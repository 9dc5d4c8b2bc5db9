//! Queue-driven binary space partitioning of the dungeon rectangle.

use std::collections::VecDeque;

use crate::types::{NodeId, Orientation, Point, Rect};

use super::seed::RandomSource;
use super::tree::PartitionTree;

/// Minimum partition extents; a node may only be cut where both halves keep them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartitionLimits {
    pub room_width_min: i32,
    pub room_length_min: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitLine {
    pub orientation: Orientation,
    /// y for horizontal lines, x for vertical ones.
    pub coordinate: i32,
}

impl PartitionLimits {
    fn can_split_width(self, area: &Rect) -> bool {
        i64::from(area.width()) >= 2 * i64::from(self.room_width_min)
    }

    fn can_split_length(self, area: &Rect) -> bool {
        i64::from(area.length()) >= 2 * i64::from(self.room_length_min)
    }

    pub fn can_split(self, area: &Rect) -> bool {
        self.can_split_width(area) || self.can_split_length(area)
    }
}

/// Grow a tree over `width` x `length`.
///
/// Nodes are taken from a FIFO queue seeded with the root. Each dequeue counts
/// against `max_iterations`, whether or not the node was large enough to split,
/// so the loop always terminates. Nodes left in the queue when the budget runs
/// out simply stay leaves.
pub fn build_partition_tree(
    rng: &mut impl RandomSource,
    width: i32,
    length: i32,
    max_iterations: u32,
    limits: PartitionLimits,
) -> PartitionTree {
    let mut tree = PartitionTree::new(Rect::sized(width, length));
    let mut queue = VecDeque::from([tree.root()]);
    let mut iterations = 0_u32;

    while iterations < max_iterations {
        let Some(current) = queue.pop_front() else {
            break;
        };
        iterations += 1;

        let area = tree.node(current).area;
        if !limits.can_split(&area) {
            continue;
        }
        let line = choose_split_line(rng, &area, limits);
        let children = split_node(&mut tree, current, line);
        log::debug!(
            "split {area:?} {:?} at {} (iteration {iterations})",
            line.orientation,
            line.coordinate
        );
        queue.extend(children);
    }

    tree
}

/// Pick orientation and coordinate for a node that passes [`PartitionLimits::can_split`].
/// The chosen axis is at least twice its minimum, so both margins stay inside `area`.
pub fn choose_split_line(
    rng: &mut impl RandomSource,
    area: &Rect,
    limits: PartitionLimits,
) -> SplitLine {
    let width_ok = limits.can_split_width(area);
    let length_ok = limits.can_split_length(area);
    let orientation = match (width_ok, length_ok) {
        (true, true) => {
            if rng.coin_flip() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            }
        }
        (true, false) => Orientation::Vertical,
        _ => Orientation::Horizontal,
    };

    let coordinate = match orientation {
        Orientation::Horizontal => rng.range_inclusive(
            area.bottom_left().y + limits.room_length_min,
            area.top_right().y - limits.room_length_min,
        ),
        Orientation::Vertical => rng.range_inclusive(
            area.bottom_left().x + limits.room_width_min,
            area.top_right().x - limits.room_width_min,
        ),
    };

    SplitLine { orientation, coordinate }
}

fn split_node(tree: &mut PartitionTree, node: NodeId, line: SplitLine) -> [NodeId; 2] {
    let area = tree.node(node).area;
    let bottom_left = area.bottom_left();
    let top_right = area.top_right();
    let (first, second) = match line.orientation {
        Orientation::Horizontal => (
            Rect::new(bottom_left, Point::new(top_right.x, line.coordinate)),
            Rect::new(Point::new(bottom_left.x, line.coordinate), top_right),
        ),
        Orientation::Vertical => (
            Rect::new(bottom_left, Point::new(line.coordinate, top_right.y)),
            Rect::new(Point::new(line.coordinate, bottom_left.y), top_right),
        ),
    };
    tree.split(node, first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::seed::DungeonRng;
    use crate::dungeon::seed::scripted::ScriptedRandom;

    const LIMITS: PartitionLimits = PartitionLimits { room_width_min: 5, room_length_min: 5 };

    #[test]
    fn zero_iterations_leave_only_the_root() {
        let mut rng = ScriptedRandom::new(&[]);
        let tree = build_partition_tree(&mut rng, 40, 40, 0, LIMITS);
        assert_eq!(tree.len(), 1);
        assert!(tree.node(tree.root()).is_leaf());
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn minimums_beyond_half_of_i32_never_split() {
        let huge = PartitionLimits { room_width_min: 1 << 30, room_length_min: i32::MAX };
        let mut rng = ScriptedRandom::new(&[]);
        let tree = build_partition_tree(&mut rng, 10, 10, 8, huge);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root()).area, Rect::sized(10, 10));
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn orientation_is_forced_when_only_one_axis_qualifies() {
        let mut rng = ScriptedRandom::new(&[0]);
        let wide = Rect::sized(20, 6);
        let line = choose_split_line(&mut rng, &wide, LIMITS);
        assert_eq!(line, SplitLine { orientation: Orientation::Vertical, coordinate: 5 });

        let mut rng = ScriptedRandom::new(&[3]);
        let tall = Rect::sized(6, 20);
        let line = choose_split_line(&mut rng, &tall, LIMITS);
        assert_eq!(line, SplitLine { orientation: Orientation::Horizontal, coordinate: 8 });
    }

    #[test]
    fn coin_flip_picks_orientation_when_both_axes_qualify() {
        // Even raw value -> heads -> horizontal; the second value picks y.
        let mut rng = ScriptedRandom::new(&[2, 0]);
        let line = choose_split_line(&mut rng, &Rect::sized(20, 20), LIMITS);
        assert_eq!(line, SplitLine { orientation: Orientation::Horizontal, coordinate: 5 });

        let mut rng = ScriptedRandom::new(&[1, 10]);
        let line = choose_split_line(&mut rng, &Rect::sized(20, 20), LIMITS);
        assert_eq!(line, SplitLine { orientation: Orientation::Vertical, coordinate: 15 });
    }

    #[test]
    fn skipped_dequeues_still_spend_the_budget() {
        // 12 x 6: only the width qualifies, split at x = 6 gives two 6 x 6
        // children that can no longer be split.
        let mut rng = ScriptedRandom::new(&[1]);
        let tree = build_partition_tree(&mut rng, 12, 6, 2, LIMITS);
        assert_eq!(tree.len(), 3);
        assert_eq!(rng.draws, 1);

        let children = tree.children(tree.root()).expect("root was split");
        assert_eq!(tree.node(children[0]).area, Rect::sized(6, 6));
        assert_eq!(tree.node(children[1]).area, Rect::new(Point::new(6, 0), Point::new(12, 6)));
    }

    #[test]
    fn iteration_budget_caps_work_regardless_of_room_size() {
        let tiny = PartitionLimits { room_width_min: 1, room_length_min: 1 };
        let mut rng = DungeonRng::from_seed(7);
        let tree = build_partition_tree(&mut rng, 1_000, 1_000, 10, tiny);
        // Every dequeue here splits, so ten iterations add twenty nodes.
        assert_eq!(tree.len(), 21);
    }

    #[test]
    fn children_partition_their_parent_and_respect_minimums() {
        let mut rng = DungeonRng::from_seed(2024);
        let tree = build_partition_tree(&mut rng, 60, 45, 40, LIMITS);
        for (_, node) in tree.nodes_in_creation_order() {
            let Some([first, second]) = node.children else {
                continue;
            };
            let first = tree.node(first).area;
            let second = tree.node(second).area;
            assert!(node.area.contains_rect(&first));
            assert!(node.area.contains_rect(&second));
            assert!(!first.overlaps(&second));
            assert_eq!(first.area() + second.area(), node.area.area());
            for child in [first, second] {
                assert!(child.width() >= LIMITS.room_width_min.min(node.area.width()));
                assert!(child.length() >= LIMITS.room_length_min.min(node.area.length()));
            }
        }
    }
}
