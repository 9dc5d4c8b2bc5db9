use dungeon_core::dungeon::{DungeonGenerator, derive_level_seed};
use dungeon_core::{DungeonConfig, generate_dungeon};

fn config() -> DungeonConfig {
    DungeonConfig {
        dungeon_width: 120,
        dungeon_length: 80,
        max_iterations: 40,
        room_width_min: 7,
        room_length_min: 6,
        room_bottom_corner_modifier: 0.25,
        room_top_corner_modifier: 0.75,
        room_offset: 2,
        corridor_width: 2,
    }
}

#[test]
fn test_determinism_identical_seeds_produce_identical_bytes() {
    let first = generate_dungeon(12345, &config()).expect("valid config");
    let second = generate_dungeon(12345, &config()).expect("valid config");

    assert_eq!(
        first.canonical_bytes(),
        second.canonical_bytes(),
        "Identical runs must produce identical output"
    );
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn test_determinism_different_seeds_produce_different_layouts() {
    let first = generate_dungeon(123, &config()).expect("valid config");
    let second = generate_dungeon(456, &config()).expect("valid config");

    assert_ne!(
        first.fingerprint(),
        second.fingerprint(),
        "Different seeds should produce different layouts"
    );
}

#[test]
fn test_determinism_layout_and_flat_output_agree() {
    let generator = DungeonGenerator::new(2_718, config()).expect("valid config");
    let layout = generator.generate_layout();
    let dungeon = generator.generate();

    assert_eq!(layout.to_dungeon(), dungeon);
    assert_eq!(dungeon.room_count(), layout.rooms.len());
    assert_eq!(dungeon.corridor_count(), layout.corridors.len());
}

#[test]
fn test_determinism_levels_use_their_derived_seed() {
    let generator = DungeonGenerator::new(99, config()).expect("valid config");
    for level in 0..3 {
        let direct = generate_dungeon(derive_level_seed(99, level), &config()).expect("valid config");
        assert_eq!(generator.generate_level(level), direct, "level {level}");
    }
}
