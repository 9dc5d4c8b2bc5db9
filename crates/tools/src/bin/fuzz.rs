use anyhow::{Result, bail, ensure};
use clap::Parser;
use dungeon_core::dungeon::{DungeonLayout, NodeKind, derive_level_seed};
use dungeon_core::{CorridorAxis, DungeonConfig, DungeonGenerator, Rect, Span};
use env_logger::{Builder, Env};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    runs: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_config(rng: &mut ChaCha8Rng) -> DungeonConfig {
    DungeonConfig {
        dungeon_width: choose(rng, &[1, 12, 40, 64, 157, 400]),
        dungeon_length: choose(rng, &[1, 12, 40, 64, 157, 400]),
        max_iterations: choose(rng, &[0, 1, 5, 20, 80, 300]),
        room_width_min: choose(rng, &[3, 5, 8, 13]),
        room_length_min: choose(rng, &[3, 5, 8, 13]),
        room_bottom_corner_modifier: choose(rng, &[0.0, 0.1, 0.3]),
        room_top_corner_modifier: choose(rng, &[0.7, 0.9, 1.0]),
        room_offset: choose(rng, &[0, 1, 2]),
        corridor_width: choose(rng, &[1, 2, 3]),
    }
}

fn within(inner: Span, outer: Span) -> bool {
    outer.low <= inner.low && inner.high <= outer.high
}

fn check_layout(config: &DungeonConfig, layout: &DungeonLayout) -> Result<()> {
    let tree = &layout.tree;

    let childless = tree
        .nodes_in_creation_order()
        .filter(|(_, node)| node.is_leaf() && !matches!(node.kind, NodeKind::Corridor(_)))
        .count();
    ensure!(childless == layout.rooms.len(), "{} rooms for {childless} leaves", layout.rooms.len());

    let mut rooms: Vec<Rect> = Vec::with_capacity(layout.rooms.len());
    for &id in &layout.rooms {
        let node = tree.node(id);
        let NodeKind::Room(room) = node.kind else {
            bail!("leaf {id:?} was never inscribed");
        };
        ensure!(node.area.contains_rect(&room), "room {room:?} escapes leaf {:?}", node.area);
        for other in &rooms {
            ensure!(!room.overlaps(other), "room {room:?} overlaps {other:?}");
        }
        rooms.push(room);
    }

    if config.max_iterations == 0 {
        ensure!(rooms.len() == 1, "zero iterations gave {} rooms", rooms.len());
        ensure!(layout.corridors.is_empty(), "zero iterations gave corridors");
    }

    for &id in &layout.corridors {
        let node = tree.node(id);
        let NodeKind::Corridor(link) = node.kind else {
            bail!("corridor {id:?} has kind {:?}", node.kind);
        };
        let corridor = node.area;
        let [start, end] = link.ends;
        let (along_start, along_end, across, start_span, end_span) = match link.axis {
            CorridorAxis::Vertical => (
                (corridor.bottom_left().y, start.top_right().y),
                (corridor.top_right().y, end.bottom_left().y),
                corridor.x_span(),
                start.x_span(),
                end.x_span(),
            ),
            CorridorAxis::Horizontal => (
                (corridor.bottom_left().x, start.top_right().x),
                (corridor.top_right().x, end.bottom_left().x),
                corridor.y_span(),
                start.y_span(),
                end.y_span(),
            ),
        };
        ensure!(along_start.0 == along_start.1, "corridor {corridor:?} detached from {start:?}");
        ensure!(along_end.0 == along_end.1, "corridor {corridor:?} detached from {end:?}");
        ensure!(across.length() == config.corridor_width, "corridor {corridor:?} has the wrong width");
        ensure!(
            within(across, start_span) && within(across, end_span),
            "corridor {corridor:?} hangs off {start:?} or {end:?}"
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    println!("Starting dungeon fuzz on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut skipped = 0;

    for run in 0..args.runs {
        let config = random_config(&mut rng);
        let run_seed = derive_level_seed(args.seed, run);
        let generator = match DungeonGenerator::new(run_seed, config.clone()) {
            Ok(generator) => generator,
            Err(err) => {
                log::debug!("run {run}: skipping {config:?}: {err}");
                skipped += 1;
                continue;
            }
        };

        let layout = generator.generate_layout();
        check_layout(&config, &layout)
            .map_err(|err| err.context(format!("run {run} (seed {run_seed}) with {config:?}")))?;

        let dungeon = layout.to_dungeon();
        ensure!(
            generator.generate().fingerprint() == dungeon.fingerprint(),
            "run {run} (seed {run_seed}) is not reproducible"
        );
    }

    println!("Fuzzing completed successfully ({skipped} invalid configs skipped).");
    Ok(())
}
