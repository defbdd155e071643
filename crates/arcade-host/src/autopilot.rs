use arcade_core::input::InputState;
use arcade_runner::physics::Rect;
use arcade_runner::player::MovementState;
use arcade_runner::terrain::TileKind;
use arcade_runner::{GamePhase, SpeedRunner};

use crate::config::AutopilotConfig;

/// Scripted player: always runs right, jumps at walls and gaps.
#[derive(Debug, Clone)]
pub struct Autopilot {
    config: AutopilotConfig,
}

impl Autopilot {
    pub fn new(config: AutopilotConfig) -> Self {
        Self { config }
    }

    /// Held keys for the next frame.
    pub fn decide(&self, game: &SpeedRunner) -> InputState {
        if !self.config.enabled || game.phase() != GamePhase::Running {
            return InputState::default();
        }
        let player = &game.context().player;
        let up = match player.movement_state() {
            MovementState::WallContact(_) => true,
            MovementState::Grounded => self.gap_ahead(game),
            MovementState::Airborne => false,
        };
        InputState {
            right: true,
            up,
            ..Default::default()
        }
    }

    /// True if no platform lies under the probe point ahead of the player.
    fn gap_ahead(&self, game: &SpeedRunner) -> bool {
        let ctx = game.context();
        let probe = ctx.player.x() + self.config.gap_lookahead;
        let reach = game.config().terrain.tile_size;
        !ctx.world
            .tiles_between(probe - reach, probe + reach)
            .filter(|t| t.kind == TileKind::Platform)
            .map(|t| t.rect())
            .any(|r: Rect| r.left <= probe && probe < r.right)
    }
}
