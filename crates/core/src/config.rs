//! Generation parameters, their validation, and loading them from TOML or JSON files.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const BOTTOM_CORNER_MODIFIER_RANGE: (f32, f32) = (0.0, 0.3);
pub const TOP_CORNER_MODIFIER_RANGE: (f32, f32) = (0.7, 1.0);

/// Everything a generation request needs. No field has a default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DungeonConfig {
    pub dungeon_width: i32,
    pub dungeon_length: i32,
    /// Hard cap on queue dequeues while partitioning, not a depth limit.
    pub max_iterations: u32,
    pub room_width_min: i32,
    pub room_length_min: i32,
    pub room_bottom_corner_modifier: f32,
    pub room_top_corner_modifier: f32,
    pub room_offset: i32,
    pub corridor_width: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositive { field: &'static str, value: i32 },
    NegativeOffset { value: i32 },
    ModifierOutOfRange { field: &'static str, value: f32, min: f32, max: f32 },
    /// Twice the offset consumes the whole extent named by `field`.
    OffsetTooLarge { offset: i32, field: &'static str, value: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be greater than zero, got {value}")
            }
            Self::NegativeOffset { value } => {
                write!(f, "room_offset must not be negative, got {value}")
            }
            Self::ModifierOutOfRange { field, value, min, max } => {
                write!(f, "{field} must lie in [{min}, {max}], got {value}")
            }
            Self::OffsetTooLarge { offset, field, value } => write!(
                f,
                "room_offset {offset} leaves no interior: twice the offset must be smaller than {field} ({value})"
            ),
        }
    }
}

impl Error for ConfigError {}

impl DungeonConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("dungeon_width", self.dungeon_width),
            ("dungeon_length", self.dungeon_length),
            ("room_width_min", self.room_width_min),
            ("room_length_min", self.room_length_min),
            ("corridor_width", self.corridor_width),
        ] {
            if value <= 0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        check_modifier(
            "room_bottom_corner_modifier",
            self.room_bottom_corner_modifier,
            BOTTOM_CORNER_MODIFIER_RANGE,
        )?;
        check_modifier(
            "room_top_corner_modifier",
            self.room_top_corner_modifier,
            TOP_CORNER_MODIFIER_RANGE,
        )?;

        if self.room_offset < 0 {
            return Err(ConfigError::NegativeOffset { value: self.room_offset });
        }
        // Leaves are never narrower than min(room minimum, dungeon extent), so
        // both bounds keep every inscribed room non-inverted.
        for (field, value) in [
            ("room_width_min", self.room_width_min),
            ("room_length_min", self.room_length_min),
            ("dungeon_width", self.dungeon_width),
            ("dungeon_length", self.dungeon_length),
        ] {
            if i64::from(self.room_offset) * 2 >= i64::from(value) {
                return Err(ConfigError::OffsetTooLarge { offset: self.room_offset, field, value });
            }
        }

        Ok(())
    }

    /// Read a config file. `.toml` files are parsed as TOML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path).map_err(ConfigLoadError::Io)?;
        let is_toml = path.extension().is_some_and(|extension| extension == "toml");
        let config: Self = if is_toml {
            toml::from_str(&content).map_err(|e| ConfigLoadError::Parse(e.to_string()))?
        } else {
            serde_json::from_str(&content).map_err(|e| ConfigLoadError::Parse(e.to_string()))?
        };
        config.validate().map_err(ConfigLoadError::Invalid)?;
        Ok(config)
    }
}

fn check_modifier(
    field: &'static str,
    value: f32,
    (min, max): (f32, f32),
) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ModifierOutOfRange { field, value, min, max })
    }
}

#[derive(Debug)]
pub enum ConfigLoadError {
    Io(io::Error),
    Parse(String),
    Invalid(ConfigError),
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Parse(message) => write!(f, "config could not be parsed: {message}"),
            Self::Invalid(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(_) => None,
            Self::Invalid(e) => Some(e),
        }
    }
}
