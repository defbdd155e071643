//! Host container: mounts a game against the fixed logical viewport and turns
//! wall-clock frame time into fixed simulation ticks.

use std::time::Duration;

use crate::game_trait::{ArcadeGame, GameConfig, GameEvent};
use crate::input::InputState;

/// Maximum ticks run for a single frame, so a long stall cannot spiral.
pub const MAX_SUBSTEPS: u32 = 8;

/// Owns a mounted game instance and its fixed-step accumulator.
pub struct GameHost<G: ArcadeGame> {
    game: Option<G>,
    tick_dt: f32,
    max_substeps: u32,
    accumulator: f32,
    /// Pointer press waiting for the next tick that actually runs.
    pending_press: bool,
    ticks: u64,
}

impl<G: ArcadeGame> GameHost<G> {
    /// Mount `game`: initialize it against `config` and start the tick clock.
    pub fn mount(mut game: G, config: &GameConfig) -> Self {
        game.init(config);
        let meta = game.metadata();
        let tick_rate = game.tick_rate().max(1.0);
        tracing::info!(
            game = %meta.name,
            width = config.viewport.width,
            height = config.viewport.height,
            tick_rate,
            "Mounted game"
        );
        Self {
            game: Some(game),
            tick_dt: 1.0 / tick_rate,
            max_substeps: MAX_SUBSTEPS,
            accumulator: 0.0,
            pending_press: false,
            ticks: 0,
        }
    }

    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps.max(1);
        self
    }

    pub fn is_mounted(&self) -> bool {
        self.game.is_some()
    }

    pub fn game(&self) -> Option<&G> {
        self.game.as_ref()
    }

    /// Total ticks run since mount.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run exactly one tick with `input`.
    pub fn step(&mut self, input: &InputState) -> Vec<GameEvent> {
        let mut input = *input;
        if std::mem::take(&mut self.pending_press) {
            input.pointer_pressed = true;
        }
        let Some(game) = self.game.as_mut() else {
            return Vec::new();
        };
        self.ticks += 1;
        game.update(self.tick_dt, &input)
    }

    /// Advance by a frame's worth of wall-clock time, running as many fixed
    /// ticks as fit. A pointer press is delivered to the first tick only.
    pub fn frame(&mut self, elapsed: Duration, input: &InputState) -> Vec<GameEvent> {
        if self.game.is_none() {
            return Vec::new();
        }
        if input.pointer_pressed {
            self.pending_press = true;
        }
        let held = InputState {
            pointer_pressed: false,
            ..*input
        };

        self.accumulator += elapsed.as_secs_f32();
        let mut events = Vec::new();
        let mut steps = 0;
        while self.accumulator >= self.tick_dt && steps < self.max_substeps {
            events.extend(self.step(&held));
            self.accumulator -= self.tick_dt;
            steps += 1;
        }
        if steps == self.max_substeps && self.accumulator >= self.tick_dt {
            tracing::debug!(
                backlog_secs = self.accumulator,
                "Frame exceeded max substeps, dropping backlog"
            );
            self.accumulator = 0.0;
        }
        events
    }

    /// Tear the game down and hand it back. Pending timers are cancelled.
    pub fn unmount(&mut self) -> Option<G> {
        let mut game = self.game.take()?;
        game.teardown();
        tracing::info!(ticks = self.ticks, "Unmounted game");
        Some(game)
    }
}

impl<G: ArcadeGame> Drop for GameHost<G> {
    fn drop(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::CountingGame;

    #[test]
    fn mount_initializes_game() {
        let host = GameHost::mount(CountingGame::default(), &GameConfig::default());
        assert!(host.is_mounted());
        assert!(host.game().is_some_and(|g| g.initialized));
    }

    #[test]
    fn frame_runs_whole_ticks_and_carries_remainder() {
        let mut host = GameHost::mount(CountingGame::default(), &GameConfig::default());
        // 10 Hz test game: 0.25s is two ticks with 0.05s left over.
        host.frame(Duration::from_millis(250), &InputState::default());
        assert_eq!(host.game().map(|g| g.updates), Some(2));
        host.frame(Duration::from_millis(100), &InputState::default());
        assert_eq!(host.game().map(|g| g.updates), Some(3));
        assert_eq!(host.ticks(), 3);
    }

    #[test]
    fn frame_caps_substeps() {
        let mut host = GameHost::mount(CountingGame::default(), &GameConfig::default())
            .with_max_substeps(4);
        host.frame(Duration::from_secs(10), &InputState::default());
        assert_eq!(host.game().map(|g| g.updates), Some(4));
        // Backlog was dropped rather than replayed.
        host.frame(Duration::from_millis(0), &InputState::default());
        assert_eq!(host.game().map(|g| g.updates), Some(4));
        assert_eq!(host.ticks(), 4);
    }

    #[test]
    fn pointer_press_reaches_exactly_one_tick() {
        let mut host = GameHost::mount(CountingGame::default(), &GameConfig::default());
        let press = InputState {
            pointer_pressed: true,
            ..Default::default()
        };
        // Too short for a tick: the press waits.
        host.frame(Duration::from_millis(10), &press);
        assert_eq!(host.game().map(|g| g.presses), Some(0));
        host.frame(Duration::from_millis(300), &InputState::default());
        assert_eq!(host.game().map(|g| g.presses), Some(1));
    }

    #[test]
    fn unmount_tears_down() {
        let mut host = GameHost::mount(CountingGame::default(), &GameConfig::default());
        let game = host.unmount();
        assert!(game.is_some_and(|g| g.torn_down));
        assert!(!host.is_mounted());
        assert!(host.step(&InputState::default()).is_empty());
    }
}
