use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dungeon_core::{Dungeon, DungeonConfig, DungeonGenerator};
use env_logger::{Builder, Env};

mod render;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Summary,
    Json,
    Ascii,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML or JSON file holding every generation parameter
    #[arg(
        short,
        long,
        conflicts_with_all = [
            "width",
            "length",
            "max_iterations",
            "room_width_min",
            "room_length_min",
            "bottom_corner_modifier",
            "top_corner_modifier",
            "room_offset",
            "corridor_width",
        ]
    )]
    config: Option<PathBuf>,
    #[arg(long, required_unless_present = "config")]
    width: Option<i32>,
    #[arg(long, required_unless_present = "config")]
    length: Option<i32>,
    #[arg(long, required_unless_present = "config")]
    max_iterations: Option<u32>,
    #[arg(long, required_unless_present = "config")]
    room_width_min: Option<i32>,
    #[arg(long, required_unless_present = "config")]
    room_length_min: Option<i32>,
    #[arg(long, required_unless_present = "config")]
    bottom_corner_modifier: Option<f32>,
    #[arg(long, required_unless_present = "config")]
    top_corner_modifier: Option<f32>,
    #[arg(long, required_unless_present = "config")]
    room_offset: Option<i32>,
    #[arg(long, required_unless_present = "config")]
    corridor_width: Option<i32>,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Generate this many consecutive levels, each from its own derived seed
    #[arg(long)]
    levels: Option<u32>,
    #[arg(short, long, value_enum, default_value_t = Format::Summary)]
    format: Format,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn dungeon_config(&self) -> Result<DungeonConfig> {
        if let Some(path) = &self.config {
            return DungeonConfig::load(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()));
        }
        Ok(DungeonConfig {
            dungeon_width: self.width.context("--width is required without --config")?,
            dungeon_length: self.length.context("--length is required without --config")?,
            max_iterations: self
                .max_iterations
                .context("--max-iterations is required without --config")?,
            room_width_min: self
                .room_width_min
                .context("--room-width-min is required without --config")?,
            room_length_min: self
                .room_length_min
                .context("--room-length-min is required without --config")?,
            room_bottom_corner_modifier: self
                .bottom_corner_modifier
                .context("--bottom-corner-modifier is required without --config")?,
            room_top_corner_modifier: self
                .top_corner_modifier
                .context("--top-corner-modifier is required without --config")?,
            room_offset: self.room_offset.context("--room-offset is required without --config")?,
            corridor_width: self
                .corridor_width
                .context("--corridor-width is required without --config")?,
        })
    }
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = args.dungeon_config()?;
    let generator =
        DungeonGenerator::new(args.seed, config).context("Invalid generation parameters")?;

    let dungeons: Vec<Dungeon> = match args.levels {
        None => vec![generator.generate()],
        Some(levels) => (0..levels).map(|level| generator.generate_level(level)).collect(),
    };

    let rendered = match args.format {
        Format::Summary => render::summary(&dungeons),
        Format::Json => render::json(&dungeons).context("Failed to serialize dungeon")?,
        Format::Ascii => render::ascii(&dungeons),
    };

    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?,
        None => print!("{rendered}"),
    }

    Ok(())
}
