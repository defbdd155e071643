use serde::{Deserialize, Serialize};

/// Simulation tick rate (Hz).
pub const TICK_RATE_HZ: f32 = 60.0;

/// Terrain tiles are 64-unit sprites drawn at 2x.
pub const TILE_SIZE: f32 = 128.0;
/// Center y of the platform row; wall stacks grow upward from here.
pub const PLATFORM_Y: f32 = 450.0;
pub const PLATFORM_STEP: f32 = 128.0;
/// Chance that a platform slot is left empty.
pub const GAP_CHANCE: f32 = 0.2;
/// Distance into a chunk before the first wall anchor.
pub const WALL_OFFSET: f32 = 600.0;
pub const WALL_STEP: f32 = 256.0;
pub const WALL_CHANCE: f32 = 0.99;
pub const WALL_MIN_HEIGHT: u32 = 2;
pub const WALL_MAX_HEIGHT: u32 = 3;

pub const INITIAL_LEVEL_WIDTH: f32 = 1000.0;
pub const CHUNK_WIDTH: f32 = 1000.0;
/// Terrain is extended once the camera's right edge is this close to the end.
pub const FRONTIER_MARGIN: f32 = 1000.0;
pub const WORLD_HEIGHT: f32 = 600.0;

/// Downward acceleration (units/s^2, +y is down).
pub const GRAVITY: f32 = 600.0;
pub const BOUNCE: f32 = 0.1;
pub const PLAYER_WIDTH: f32 = 28.0;
pub const PLAYER_HEIGHT: f32 = 64.0;

pub const SPAWN_X: f32 = 200.0;
pub const SPAWN_Y: f32 = 350.0;
pub const RUN_SPEED: f32 = 400.0;
/// Upward jump speed, applied as a negative vy.
pub const JUMP_SPEED: f32 = 330.0;
/// Horizontal push away from the wall on a wall jump.
pub const WALL_PUSH: f32 = 150.0;
pub const WALL_JUMP_COOLDOWN_MS: f64 = 250.0;

/// Camera scroll per tick.
pub const CAMERA_SPEED: f32 = 1.0;
pub const VIEWPORT_WIDTH: f32 = 800.0;
pub const VIEWPORT_HEIGHT: f32 = 600.0;
/// How far behind the camera's left edge the player may fall before the run ends.
pub const LEAVE_BEHIND_MARGIN: f32 = 50.0;

/// Configuration validation failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    Invalid { field: &'static str, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(m) => write!(f, "failed to parse runner config: {m}"),
            Self::Invalid { field, reason } => write!(f, "invalid {field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Procedural terrain parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub tile_size: f32,
    pub platform_y: f32,
    pub platform_step: f32,
    pub gap_chance: f32,
    pub wall_offset: f32,
    pub wall_step: f32,
    pub wall_chance: f32,
    pub wall_min_height: u32,
    pub wall_max_height: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            platform_y: PLATFORM_Y,
            platform_step: PLATFORM_STEP,
            gap_chance: GAP_CHANCE,
            wall_offset: WALL_OFFSET,
            wall_step: WALL_STEP,
            wall_chance: WALL_CHANCE,
            wall_min_height: WALL_MIN_HEIGHT,
            wall_max_height: WALL_MAX_HEIGHT,
        }
    }
}

/// World growth parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub initial_width: f32,
    pub chunk_width: f32,
    pub frontier_margin: f32,
    pub height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            initial_width: INITIAL_LEVEL_WIDTH,
            chunk_width: CHUNK_WIDTH,
            frontier_margin: FRONTIER_MARGIN,
            height: WORLD_HEIGHT,
        }
    }
}

/// Arcade physics parameters for the player body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub bounce: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub collide_world_bounds: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            bounce: BOUNCE,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            collide_world_bounds: false,
        }
    }
}

/// Player controller parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub run_speed: f32,
    pub jump_speed: f32,
    pub wall_push: f32,
    pub wall_jump_cooldown_ms: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            spawn_x: SPAWN_X,
            spawn_y: SPAWN_Y,
            run_speed: RUN_SPEED,
            jump_speed: JUMP_SPEED,
            wall_push: WALL_PUSH,
            wall_jump_cooldown_ms: WALL_JUMP_COOLDOWN_MS,
        }
    }
}

/// Camera scroller parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub speed: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub leave_behind_margin: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            speed: CAMERA_SPEED,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            leave_behind_margin: LEAVE_BEHIND_MARGIN,
        }
    }
}

/// Top-level runner configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Terrain seed. `None` draws a fresh seed per session.
    pub seed: Option<u64>,
    pub tick_rate_hz: f32,
    pub terrain: TerrainConfig,
    pub world: WorldConfig,
    pub physics: PhysicsConfig,
    pub movement: MovementConfig,
    pub camera: CameraConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_rate_hz: TICK_RATE_HZ,
            terrain: TerrainConfig::default(),
            world: WorldConfig::default(),
            physics: PhysicsConfig::default(),
            movement: MovementConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Load config from `$ARCADE_RUNNER_CONFIG` or `config/runner.toml`.
    /// Falls back to defaults if the file is missing, unparseable, or invalid.
    pub fn load() -> Self {
        let path = std::env::var("ARCADE_RUNNER_CONFIG")
            .unwrap_or_else(|_| "config/runner.toml".to_string());
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match Self::from_toml_str(&content) {
            Ok(cfg) => {
                tracing::info!(%path, "Loaded runner configuration");
                cfg
            },
            Err(e) => {
                tracing::warn!("{path}: {e}, using defaults");
                Self::default()
            },
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be > 0, got {v}"),
                })
            }
        }
        fn probability(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be within [0, 1], got {v}"),
                })
            }
        }

        positive("tick_rate_hz", self.tick_rate_hz)?;

        let t = &self.terrain;
        positive("terrain.tile_size", t.tile_size)?;
        positive("terrain.platform_step", t.platform_step)?;
        positive("terrain.wall_step", t.wall_step)?;
        probability("terrain.gap_chance", t.gap_chance)?;
        probability("terrain.wall_chance", t.wall_chance)?;
        if t.wall_offset < 0.0 {
            return Err(ConfigError::Invalid {
                field: "terrain.wall_offset",
                reason: format!("must be >= 0, got {}", t.wall_offset),
            });
        }
        if t.wall_min_height == 0 || t.wall_min_height > t.wall_max_height {
            return Err(ConfigError::Invalid {
                field: "terrain.wall_min_height",
                reason: format!(
                    "need 1 <= min <= max, got {}..={}",
                    t.wall_min_height, t.wall_max_height
                ),
            });
        }

        positive("world.initial_width", self.world.initial_width)?;
        positive("world.chunk_width", self.world.chunk_width)?;
        positive("world.height", self.world.height)?;

        positive("physics.player_width", self.physics.player_width)?;
        positive("physics.player_height", self.physics.player_height)?;
        probability("physics.bounce", self.physics.bounce)?;

        let cooldown = self.movement.wall_jump_cooldown_ms;
        if cooldown.is_nan() || cooldown < 0.0 {
            return Err(ConfigError::Invalid {
                field: "movement.wall_jump_cooldown_ms",
                reason: format!("must be >= 0, got {cooldown}"),
            });
        }

        positive("camera.viewport_width", self.camera.viewport_width)?;
        positive("camera.viewport_height", self.camera.viewport_height)?;
        if self.camera.speed.is_nan() || self.camera.speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "camera.speed",
                reason: format!("must be >= 0, got {}", self.camera.speed),
            });
        }
        Ok(())
    }
}
