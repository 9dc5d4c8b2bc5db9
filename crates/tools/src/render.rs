use dungeon_core::{Dungeon, FeatureKind, Rect};

const EMPTY: char = ' ';
const ROOM: char = '.';
const CORRIDOR: char = '+';

fn corners(rect: &Rect) -> String {
    let bottom_left = rect.bottom_left();
    let top_right = rect.top_right();
    format!("({}, {})-({}, {})", bottom_left.x, bottom_left.y, top_right.x, top_right.y)
}

pub fn summary(dungeons: &[Dungeon]) -> String {
    let mut lines = Vec::new();
    for (level, dungeon) in dungeons.iter().enumerate() {
        lines.push(format!(
            "level {level}: {}x{}, {} rooms, {} corridors, fingerprint {:016x}",
            dungeon.width,
            dungeon.length,
            dungeon.room_count(),
            dungeon.corridor_count(),
            dungeon.fingerprint()
        ));
        for feature in &dungeon.features {
            lines.push(match feature.kind {
                FeatureKind::Room => format!("  room      {}", corners(&feature.rect)),
                FeatureKind::Corridor { axis, .. } => {
                    format!("  corridor  {} {axis:?}", corners(&feature.rect))
                }
            });
        }
    }
    lines.push(String::new());
    lines.join("\n")
}

/// A single dungeon as an object, several as an array.
pub fn json(dungeons: &[Dungeon]) -> serde_json::Result<String> {
    let mut out = match dungeons {
        [single] => serde_json::to_string_pretty(single)?,
        many => serde_json::to_string_pretty(many)?,
    };
    out.push('\n');
    Ok(out)
}

/// One character per unit cell, top row first. Corridors are painted over rooms.
pub fn ascii(dungeons: &[Dungeon]) -> String {
    let mut out = String::new();
    for (level, dungeon) in dungeons.iter().enumerate() {
        if dungeons.len() > 1 {
            out.push_str(&format!("level {level}\n"));
        }
        let width = dungeon.width.max(0) as usize;
        let length = dungeon.length.max(0) as usize;
        let mut cells = vec![EMPTY; width * length];

        let rooms = dungeon.features.iter().filter(|feature| feature.is_room());
        let corridors = dungeon.features.iter().filter(|feature| feature.is_corridor());
        for feature in rooms.chain(corridors) {
            let glyph = if feature.is_room() { ROOM } else { CORRIDOR };
            let bottom_left = feature.rect.bottom_left();
            let top_right = feature.rect.top_right();
            for y in bottom_left.y.max(0)..top_right.y.min(dungeon.length) {
                for x in bottom_left.x.max(0)..top_right.x.min(dungeon.width) {
                    cells[y as usize * width + x as usize] = glyph;
                }
            }
        }

        for row in cells.chunks(width.max(1)).rev() {
            out.extend(row);
            out.push('\n');
        }
    }
    out
}
