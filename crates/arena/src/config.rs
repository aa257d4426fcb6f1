//! Gameplay configuration
//!
//! Every tuning constant the simulation consumes lives here, loadable
//! from a TOML file. Missing files and missing keys fall back to the
//! built-in defaults, so a config file only needs to name the values
//! it overrides.

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Could not read the file
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// File contents were not valid TOML for [`GameConfig`]
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level gameplay configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player tuning
    pub player: PlayerConfig,

    /// Enemy tuning
    pub enemy: EnemyConfig,

    /// Bullet tuning
    pub bullet: BulletConfig,

    /// Arena dimensions and layout
    pub arena: ArenaConfig,
}

/// Player movement and combat tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Top speed in units per second
    pub max_speed: f32,

    /// Acceleration in units per second squared
    pub acceleration: f32,

    /// Deceleration applied when no movement input is held
    pub deceleration: f32,

    /// Starting and maximum health
    pub max_health: f32,

    /// Collision circle radius
    pub radius: f32,

    /// Minimum seconds between shots
    pub fire_cooldown: f32,

    /// Spawn position X
    pub spawn_x: f32,

    /// Spawn position Y
    pub spawn_y: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_speed: 300.0,
            acceleration: 400.0,
            deceleration: 800.0,
            max_health: 100.0,
            radius: 30.0,
            fire_cooldown: 0.25,
            spawn_x: 960.0,
            spawn_y: 300.0,
        }
    }
}

/// Enemy movement, perception, and combat tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Top speed in units per second
    pub max_speed: f32,

    /// Acceleration in units per second squared
    pub acceleration: f32,

    /// Deceleration applied when holding position or idling
    pub deceleration: f32,

    /// Starting and maximum health
    pub max_health: f32,

    /// Collision circle radius
    pub radius: f32,

    /// Maximum distance at which the player can be noticed
    pub detection_range: f32,

    /// Maximum distance at which the enemy will shoot
    pub shoot_range: f32,

    /// Seconds between shots
    pub shoot_cooldown: f32,

    /// Standoff distance the enemy tries to hold from the player
    pub preferred_distance: f32,

    /// Dead band around the preferred distance where the enemy holds
    /// still instead of oscillating
    pub distance_margin: f32,

    /// Distance at which a search destination counts as reached
    pub arrival_threshold: f32,

    /// Seconds the enemy stays engaged after losing sight
    pub alert_duration: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_speed: 200.0,
            acceleration: 300.0,
            deceleration: 600.0,
            max_health: 100.0,
            radius: 30.0,
            detection_range: 600.0,
            shoot_range: 500.0,
            shoot_cooldown: 2.0,
            preferred_distance: 400.0,
            distance_margin: 50.0,
            arrival_threshold: 30.0,
            alert_duration: 3.0,
        }
    }
}

/// Bullet tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    /// Muzzle speed in units per second
    pub speed: f32,

    /// Seconds before an unobstructed bullet expires
    pub lifetime: f32,

    /// Health removed from a struck entity
    pub damage: f32,

    /// Collision circle radius
    pub radius: f32,

    /// Maximum bullets alive at once; further shots are dropped
    pub max_live: usize,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: 1500.0,
            lifetime: 2.0,
            damage: 10.0,
            radius: 8.0,
            max_live: 100,
        }
    }
}

/// Arena dimensions and wall layout parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Arena width in tiles
    pub width_tiles: u32,

    /// Arena height in tiles
    pub height_tiles: u32,

    /// Tile edge length in world units
    pub tile_size: f32,

    /// Border wall thickness in world units
    pub border: f32,
}

impl ArenaConfig {
    /// Arena width in world units
    pub fn width(&self) -> f32 {
        self.width_tiles as f32 * self.tile_size
    }

    /// Arena height in world units
    pub fn height(&self) -> f32 {
        self.height_tiles as f32 * self.tile_size
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width_tiles: 30,
            height_tiles: 30,
            tile_size: 64.0,
            border: 64.0,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file
    ///
    /// Keys absent from the file keep their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is
    /// missing or malformed
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                warn!("Using default config ({err})");
                Self::default()
            }
        }
    }
}
