pub mod game_trait;
pub mod host;
pub mod input;
pub mod scheduler;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::time::Duration;

    use crate::game_trait::{ArcadeGame, GameConfig, GameEvent, GameMetadata, Viewport};
    use crate::input::InputState;

    /// Input with only a pointer press set.
    pub fn pointer_press() -> InputState {
        InputState {
            pointer_pressed: true,
            ..Default::default()
        }
    }

    /// Input holding the given direction keys.
    pub fn held(left: bool, right: bool, up: bool) -> InputState {
        InputState {
            left,
            right,
            up,
            ..Default::default()
        }
    }

    /// Run N game ticks with the same input, returning all accumulated events.
    pub fn run_game_ticks(
        game: &mut dyn ArcadeGame,
        n: usize,
        dt: f32,
        input: &InputState,
    ) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(dt, input));
        }
        all_events
    }

    /// Minimal game used to exercise the host container.
    #[derive(Debug, Default)]
    pub struct CountingGame {
        pub initialized: bool,
        pub updates: u32,
        pub presses: u32,
        pub torn_down: bool,
        pub paused: bool,
    }

    impl ArcadeGame for CountingGame {
        fn metadata(&self) -> GameMetadata {
            GameMetadata {
                name: "Counter".to_string(),
                description: "Counts ticks".to_string(),
                viewport: Viewport::default(),
                estimated_round_duration: Duration::from_secs(1),
            }
        }

        fn init(&mut self, _config: &GameConfig) {
            self.initialized = true;
        }

        fn update(&mut self, _dt: f32, input: &InputState) -> Vec<GameEvent> {
            self.updates += 1;
            if input.pointer_pressed {
                self.presses += 1;
            }
            Vec::new()
        }

        fn serialize_state(&self) -> Vec<u8> {
            self.updates.to_le_bytes().to_vec()
        }

        fn apply_input(&mut self, _input: &[u8]) {}

        fn tick_rate(&self) -> f32 {
            10.0
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

        fn pending_timers(&self) -> usize {
            0
        }

        fn teardown(&mut self) {
            self.torn_down = true;
        }
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // Generic checks every ArcadeGame implementation must pass. Game crates
    // call them from their own #[cfg(test)] modules.

    /// After init(), serialize_state() must return non-empty bytes.
    pub fn contract_init_creates_state(game: &mut dyn ArcadeGame) {
        game.init(&GameConfig::default());
        let state = game.serialize_state();
        assert!(
            !state.is_empty(),
            "serialize_state() must return non-empty bytes after init"
        );
    }

    /// pause() must freeze state, resume() must unfreeze it.
    pub fn contract_pause_stops_updates(game: &mut dyn ArcadeGame, active_input: &InputState) {
        game.pause();
        assert!(game.is_paused());
        let before = game.serialize_state();
        game.update(0.1, active_input);
        let during_pause = game.serialize_state();
        assert_eq!(before, during_pause, "State must not change while paused");

        game.resume();
        game.update(0.1, active_input);
        let after_resume = game.serialize_state();
        assert_ne!(during_pause, after_resume, "State must change after resume");
    }

    /// teardown() must leave no scheduled events behind.
    pub fn contract_teardown_cancels_timers(game: &mut dyn ArcadeGame) {
        game.teardown();
        assert_eq!(
            game.pending_timers(),
            0,
            "teardown() must cancel every pending timer"
        );
    }
}
