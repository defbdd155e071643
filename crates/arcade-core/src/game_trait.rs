use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::input::InputState;

/// Core trait that every arcade game must implement.
///
/// The host container owns the tick clock and input polling; the game only
/// handles its own simulation and exposes a snapshot for rendering.
pub trait ArcadeGame: Send {
    /// Game metadata for the host panel.
    fn metadata(&self) -> GameMetadata;

    /// Called once when the host mounts the game.
    fn init(&mut self, config: &GameConfig);

    /// Called once per fixed tick. Returns a list of game events.
    fn update(&mut self, dt: f32, input: &InputState) -> Vec<GameEvent>;

    /// Serialize the render-facing state snapshot.
    fn serialize_state(&self) -> Vec<u8>;

    /// Queue an encoded [`InputState`] for the next tick.
    fn apply_input(&mut self, input: &[u8]);

    /// Simulation tick rate in Hz.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    /// Called when the host hides the panel.
    fn pause(&mut self);

    /// Called when the host shows the panel again.
    fn resume(&mut self);

    fn is_paused(&self) -> bool;

    /// Number of scheduled events still waiting to fire.
    fn pending_timers(&self) -> usize;

    /// Called on unmount. Must cancel every pending scheduled event.
    fn teardown(&mut self);
}

/// Logical viewport the game is laid out against. The caller scales it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Game metadata for the host panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    pub viewport: Viewport,
    pub estimated_round_duration: Duration,
}

/// Configuration for a mounted game instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    pub viewport: Viewport,
    pub custom: HashMap<String, serde_json::Value>,
}

impl GameConfig {
    /// Read an unsigned integer override from `custom`.
    pub fn custom_u64(&self, key: &str) -> Option<u64> {
        self.custom.get(key).and_then(|v| v.as_u64())
    }
}

/// Events emitted by a game during update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The start overlay was dismissed and play began.
    Started,
    /// The run ended; `score` is game-specific (distance for the runner).
    GameOver { score: i64 },
    /// A fresh run began straight after a game over.
    Restarted,
}

/// Generates the pause bookkeeping and snapshot serialization shared by all
/// games: `serialize_state`, `pause`, `resume`, `is_paused`.
///
/// Requires the implementing struct to have a `paused: bool` field and a
/// `snapshot(&self)` method returning a serializable value.
#[macro_export]
macro_rules! arcade_game_boilerplate {
    () => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.snapshot()).expect("game snapshot serialization must succeed")
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_paused(&self) -> bool {
            self.paused
        }
    };
}
