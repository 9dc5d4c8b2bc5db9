//! Corridor synthesis: one corridor per junction of the partition tree,
//! joining a representative room of each child subtree.

use std::cmp::Reverse;

use crate::types::{CorridorAxis, NodeId, Point, Rect, RelativePosition, Span};

use super::leaves::extract_leaves;
use super::overlap::corridor_offset;
use super::seed::RandomSource;
use super::tree::{CorridorLink, PartitionTree};

/// Gap kept between a corridor edge and the wall of the rooms it touches.
pub const WALL_CLEARANCE: i32 = 1;
/// Rooms whose facing edge is within this distance of the best one are all
/// eligible as the corridor's starting room.
pub const CANDIDATE_BAND: i32 = 10;

/// Build corridors for every junction, deepest first, and attach them to the
/// tree. Junctions where no placement works get no corridor.
pub fn synthesize_corridors(
    tree: &mut PartitionTree,
    rng: &mut impl RandomSource,
    corridor_width: i32,
) -> Vec<NodeId> {
    let mut corridors = Vec::new();
    for junction in tree.junctions_deepest_first() {
        let Some([first, second]) = tree.children(junction) else {
            continue;
        };
        match connect_structures(tree, rng, first, second, corridor_width) {
            Some((rect, link)) => corridors.push(tree.attach_corridor(junction, rect, link)),
            None => log::debug!(
                "no corridor fits between {:?} and {:?}",
                tree.node(first).area,
                tree.node(second).area
            ),
        }
    }
    corridors
}

/// Where `to` lies as seen from `from`, by the angle between their centres.
///
/// `[-45°, 45°)` is right, `[45°, 135°)` up, `[-135°, -45°)` down and the
/// rest left.
pub fn relative_position(from: &Rect, to: &Rect) -> RelativePosition {
    let (from_x, from_y) = from.center();
    let (to_x, to_y) = to.center();
    let angle = (to_y - from_y).atan2(to_x - from_x).to_degrees();
    if (-45.0..45.0).contains(&angle) {
        RelativePosition::Right
    } else if (45.0..135.0).contains(&angle) {
        RelativePosition::Up
    } else if (-135.0..-45.0).contains(&angle) {
        RelativePosition::Down
    } else {
        RelativePosition::Left
    }
}

/// Corridor between two sibling structures, or `None` when every candidate
/// room fails to line up with the target.
///
/// Direction is judged from the partition areas, which always sit side by
/// side or one above the other; rooms inside them may be offset arbitrarily.
pub fn connect_structures(
    tree: &PartitionTree,
    rng: &mut impl RandomSource,
    first: NodeId,
    second: NodeId,
    corridor_width: i32,
) -> Option<(Rect, CorridorLink)> {
    let position = relative_position(&tree.node(first).area, &tree.node(second).area);
    let (near, far) = match position {
        RelativePosition::Up | RelativePosition::Right => (first, second),
        RelativePosition::Down | RelativePosition::Left => (second, first),
    };
    let axis = position.corridor_axis();

    let candidates = anchor_candidates(tree, rng, near, axis);
    let target = choose_target(tree, far, candidates[0], axis, corridor_width);

    for (attempt, anchor) in candidates.iter().enumerate() {
        let Some(offset) = offset_between(axis, anchor, &target, corridor_width) else {
            log::trace!("anchor {anchor:?} misses target {target:?} (attempt {attempt})");
            continue;
        };
        let Some(rect) = corridor_rect(axis, anchor, &target, offset, corridor_width) else {
            log::warn!("corridor from {anchor:?} to {target:?} would be inverted, skipping anchor");
            continue;
        };
        let link = CorridorLink { axis, structures: [first, second], ends: [*anchor, target] };
        return Some((rect, link));
    }
    None
}

/// Rooms of the near structure ordered for trying: the randomly chosen room
/// first, then the rest of the band by how far their facing edge reaches.
fn anchor_candidates(
    tree: &PartitionTree,
    rng: &mut impl RandomSource,
    near: NodeId,
    axis: CorridorAxis,
) -> Vec<Rect> {
    let mut rooms: Vec<Rect> =
        extract_leaves(tree, near).into_iter().map(|leaf| tree.footprint(leaf)).collect();
    rooms.sort_by_key(|room| Reverse(near_face(axis, room)));
    if rooms.len() == 1 {
        return rooms;
    }

    let best = near_face(axis, &rooms[0]);
    rooms.retain(|room| best - near_face(axis, room) < CANDIDATE_BAND);
    let pick = rng.index(rooms.len());
    let chosen = rooms.remove(pick);
    rooms.insert(0, chosen);
    log::trace!("anchor candidates {rooms:?}");
    rooms
}

/// Closest room of the far structure that the anchor can reach, or the whole
/// far structure when none lines up.
fn choose_target(
    tree: &PartitionTree,
    far: NodeId,
    anchor: Rect,
    axis: CorridorAxis,
    corridor_width: i32,
) -> Rect {
    extract_leaves(tree, far)
        .into_iter()
        .map(|leaf| tree.footprint(leaf))
        .filter(|room| offset_between(axis, &anchor, room, corridor_width).is_some())
        .min_by_key(|room| far_face(axis, room))
        .unwrap_or_else(|| tree.footprint(far))
}

fn offset_between(
    axis: CorridorAxis,
    anchor: &Rect,
    target: &Rect,
    corridor_width: i32,
) -> Option<i32> {
    let (anchor, target) = (cross_span(axis, anchor), cross_span(axis, target));
    corridor_offset(anchor, target, WALL_CLEARANCE, corridor_width)
}

fn corridor_rect(
    axis: CorridorAxis,
    anchor: &Rect,
    target: &Rect,
    offset: i32,
    corridor_width: i32,
) -> Option<Rect> {
    match axis {
        CorridorAxis::Vertical => Rect::from_corners(
            Point::new(offset, anchor.top_right().y),
            Point::new(offset + corridor_width, target.bottom_left().y),
        ),
        CorridorAxis::Horizontal => Rect::from_corners(
            Point::new(anchor.top_right().x, offset),
            Point::new(target.bottom_left().x, offset + corridor_width),
        ),
    }
}

/// Edge of a near-side room that faces the far structure.
fn near_face(axis: CorridorAxis, room: &Rect) -> i32 {
    match axis {
        CorridorAxis::Vertical => room.top_right().y,
        CorridorAxis::Horizontal => room.top_right().x,
    }
}

/// Edge of a far-side room that faces the near structure.
fn far_face(axis: CorridorAxis, room: &Rect) -> i32 {
    match axis {
        CorridorAxis::Vertical => room.bottom_left().y,
        CorridorAxis::Horizontal => room.bottom_left().x,
    }
}

/// Extent across the corridor's direction of travel.
fn cross_span(axis: CorridorAxis, room: &Rect) -> Span {
    match axis {
        CorridorAxis::Vertical => room.x_span(),
        CorridorAxis::Horizontal => room.y_span(),
    }
}
