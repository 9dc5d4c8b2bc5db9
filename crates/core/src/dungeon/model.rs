use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{CorridorAxis, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureKind {
    Room,
    /// `ends` are the rectangles the corridor was measured against: lower
    /// then upper for vertical corridors, left then right for horizontal ones.
    Corridor { axis: CorridorAxis, ends: [Rect; 2] },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Feature {
    #[serde(flatten)]
    pub kind: FeatureKind,
    pub rect: Rect,
}

impl Feature {
    pub fn is_room(&self) -> bool {
        matches!(self.kind, FeatureKind::Room)
    }

    pub fn is_corridor(&self) -> bool {
        matches!(self.kind, FeatureKind::Corridor { .. })
    }
}

/// Finished layout: rooms in leaf order, followed by corridors in the order
/// they were built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dungeon {
    pub width: i32,
    pub length: i32,
    pub features: Vec<Feature>,
}

impl Dungeon {
    pub fn rooms(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.features.iter().filter(|feature| feature.is_room()).map(|feature| &feature.rect)
    }

    pub fn corridors(&self) -> impl Iterator<Item = &Feature> + '_ {
        self.features.iter().filter(|feature| feature.is_corridor())
    }

    pub fn room_count(&self) -> usize {
        self.rooms().count()
    }

    pub fn corridor_count(&self) -> usize {
        self.corridors().count()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.width.to_le_bytes());
        bytes.extend(self.length.to_le_bytes());
        bytes.extend((self.features.len() as u32).to_le_bytes());
        for feature in &self.features {
            match feature.kind {
                FeatureKind::Room => bytes.push(0),
                FeatureKind::Corridor { axis, ends } => {
                    bytes.push(1);
                    bytes.push(match axis {
                        CorridorAxis::Vertical => 0,
                        CorridorAxis::Horizontal => 1,
                    });
                    for end in &ends {
                        push_rect(&mut bytes, end);
                    }
                }
            }
            push_rect(&mut bytes, &feature.rect);
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_rect(bytes: &mut Vec<u8>, rect: &Rect) {
    let bottom_left = rect.bottom_left();
    let top_right = rect.top_right();
    for value in [bottom_left.x, bottom_left.y, top_right.x, top_right.y] {
        bytes.extend(value.to_le_bytes());
    }
}
