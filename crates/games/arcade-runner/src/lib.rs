pub mod assets;
pub mod camera;
pub mod config;
pub mod physics;
pub mod player;
pub mod rng;
pub mod terrain;
pub mod world;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use arcade_core::arcade_game_boilerplate;
use arcade_core::game_trait::{ArcadeGame, GameConfig, GameEvent, GameMetadata, Viewport};
use arcade_core::input::InputState;
use arcade_core::scheduler::Scheduler;

use camera::Camera;
use config::RunnerConfig;
use physics::{ArcadePhysics, PhysicsWorld};
use player::{JumpKind, Player, PlayerController, RunnerTimer};
use terrain::Tile;
use world::World;

/// Top-level phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    WaitingToStart,
    Running,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayKind {
    Start,
    GameOver,
}

/// Centered text drawn over the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub kind: OverlayKind,
    pub text: String,
    /// World-space center.
    pub x: f32,
    pub y: f32,
    pub font_px: u32,
    pub color: u32,
}

impl Overlay {
    fn start() -> Self {
        Self {
            kind: OverlayKind::Start,
            text: "Click to Start".to_string(),
            x: 400.0,
            y: 300.0,
            font_px: 28,
            color: 0xffffff,
        }
    }

    fn game_over(scroll_x: f32) -> Self {
        Self {
            kind: OverlayKind::GameOver,
            text: "Game Over\nClick to Restart".to_string(),
            x: scroll_x + 400.0,
            y: 200.0,
            font_px: 32,
            color: 0xff0000,
        }
    }
}

/// Everything that belongs to one playthrough. Replaced wholesale on restart,
/// so nothing from a finished run can leak into the next.
#[derive(Debug)]
pub struct RunContext {
    pub player: Player,
    pub world: World,
    pub camera: Camera,
    pub physics: ArcadePhysics,
    pub timers: Scheduler<RunnerTimer>,
    pub rng: StdRng,
    pub seed: u64,
    pub ticks: u64,
}

impl RunContext {
    pub fn new(config: &RunnerConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut world = World::new(config.world.clone(), config.terrain.clone());
        let mut physics = ArcadePhysics::new(&config.physics, world.bounds());
        world.populate(&mut physics, &mut rng);
        Self {
            player: Player::spawn(&config.movement, &config.physics),
            camera: Camera::new(&config.camera, world.bounds()),
            world,
            physics,
            timers: Scheduler::new(),
            rng,
            seed,
            ticks: 0,
        }
    }
}

/// Render-facing snapshot of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerSnapshot {
    pub phase: GamePhase,
    pub seed: u64,
    pub ticks: u64,
    pub player: Player,
    pub scroll_x: f32,
    pub level_width: f32,
    pub overlay: Option<Overlay>,
    pub background: u32,
    /// Tiles centered within half a tile of the viewport.
    pub tiles: Vec<Tile>,
}

/// The Speed Runner game: outrun the camera across endless terrain.
pub struct SpeedRunner {
    config: RunnerConfig,
    controller: PlayerController,
    phase: GamePhase,
    context: RunContext,
    overlay: Option<Overlay>,
    /// Seeds each run; itself seeded once per session.
    seeder: StdRng,
    session_seed: u64,
    runs: u64,
    /// Inputs received through `apply_input` since the last tick.
    queued_input: Option<InputState>,
    paused: bool,
}

impl SpeedRunner {
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        let session_seed = config.seed.unwrap_or_else(rand::random);
        let mut seeder = StdRng::seed_from_u64(session_seed);
        let context = RunContext::new(&config, seeder.random());
        Self {
            controller: PlayerController::new(config.movement.clone()),
            config,
            phase: GamePhase::WaitingToStart,
            context,
            overlay: Some(Overlay::start()),
            seeder,
            session_seed,
            runs: 1,
            queued_input: None,
            paused: false,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != GamePhase::WaitingToStart
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn session_seed(&self) -> u64 {
        self.session_seed
    }

    /// Playthroughs begun this session, including the current one.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn snapshot(&self) -> RunnerSnapshot {
        let ctx = &self.context;
        let half_tile = self.config.terrain.tile_size / 2.0;
        let left = ctx.camera.scroll_x - half_tile;
        let right = ctx.camera.right_edge() + half_tile;
        RunnerSnapshot {
            phase: self.phase,
            seed: ctx.seed,
            ticks: ctx.ticks,
            player: ctx.player.clone(),
            scroll_x: ctx.camera.scroll_x,
            level_width: ctx.world.level_width(),
            overlay: self.overlay.clone(),
            background: assets::BACKGROUND_COLOR,
            tiles: ctx.world.tiles_between(left, right).copied().collect(),
        }
    }

    fn start(&mut self) -> GameEvent {
        self.phase = GamePhase::Running;
        self.overlay = None;
        tracing::info!(seed = self.context.seed, "Run started");
        GameEvent::Started
    }

    fn restart(&mut self) -> GameEvent {
        self.context.timers.clear();
        self.runs += 1;
        self.context = RunContext::new(&self.config, self.seeder.random());
        self.phase = GamePhase::Running;
        self.overlay = None;
        tracing::info!(seed = self.context.seed, run = self.runs, "Run restarted");
        GameEvent::Restarted
    }

    /// Enter GameOver. Returns `None` if already there.
    fn trigger_game_over(&mut self) -> Option<GameEvent> {
        if self.phase == GamePhase::GameOver {
            return None;
        }
        self.phase = GamePhase::GameOver;
        let ctx = &mut self.context;
        ctx.physics.pause();
        ctx.player.tint = Some(assets::GAME_OVER_TINT);
        self.overlay = Some(Overlay::game_over(ctx.camera.scroll_x));

        let score = ctx.camera.scroll_x.floor() as i64;
        tracing::info!(
            score,
            ticks = ctx.ticks,
            level_width = ctx.world.level_width(),
            "Game over"
        );
        Some(GameEvent::GameOver { score })
    }

    /// One Running tick: timers, physics, frontier, controller, camera, then
    /// the left-behind check.
    fn tick_running(&mut self, dt: f32, input: &InputState) -> Vec<GameEvent> {
        let ctx = &mut self.context;
        ctx.ticks += 1;

        for timer in ctx.timers.advance(f64::from(dt) * 1000.0) {
            ctx.player.on_timer(timer);
        }

        ctx.physics.step(&mut ctx.player.body, dt);
        ctx.world
            .extend_if_needed(&mut ctx.camera, &mut ctx.physics, &mut ctx.rng);

        let jump = self
            .controller
            .update(&mut ctx.player, input, &mut ctx.timers);
        if jump != JumpKind::None {
            tracing::debug!(?jump, x = ctx.player.x(), y = ctx.player.y(), "Jump");
        }

        ctx.camera.advance();

        let left_behind = ctx
            .camera
            .left_behind(ctx.player.x(), self.config.camera.leave_behind_margin);
        if left_behind {
            return self.trigger_game_over().into_iter().collect();
        }
        Vec::new()
    }
}

impl Default for SpeedRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcadeGame for SpeedRunner {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Speed Runner".to_string(),
            description: "Keep ahead of the camera. Jump the gaps, wall-jump the stacks.".to_string(),
            viewport: Viewport {
                width: self.config.camera.viewport_width,
                height: self.config.camera.viewport_height,
            },
            estimated_round_duration: Duration::from_secs(60),
        }
    }

    fn tick_rate(&self) -> f32 {
        self.config.tick_rate_hz
    }

    fn init(&mut self, config: &GameConfig) {
        let session_seed = config
            .custom_u64("seed")
            .or(self.config.seed)
            .unwrap_or_else(rand::random);
        if config.viewport.width != self.config.camera.viewport_width
            || config.viewport.height != self.config.camera.viewport_height
        {
            tracing::debug!(
                width = config.viewport.width,
                height = config.viewport.height,
                "Host viewport differs from the logical viewport; host scales"
            );
        }

        self.context.timers.clear();
        self.session_seed = session_seed;
        self.seeder = StdRng::seed_from_u64(session_seed);
        self.runs = 1;
        self.context = RunContext::new(&self.config, self.seeder.random());
        self.phase = GamePhase::WaitingToStart;
        self.overlay = Some(Overlay::start());
        self.queued_input = None;
        self.paused = false;
        tracing::info!(session_seed, "Speed Runner initialized");
    }

    fn update(&mut self, dt: f32, input: &InputState) -> Vec<GameEvent> {
        if self.paused {
            return Vec::new();
        }

        let mut input = *input;
        if let Some(queued) = self.queued_input.take() {
            input.merge(&queued);
        }
        let pressed = input.take_pointer_press();

        match self.phase {
            GamePhase::WaitingToStart if pressed => vec![self.start()],
            GamePhase::WaitingToStart => Vec::new(),
            GamePhase::Running => self.tick_running(dt, &input),
            GamePhase::GameOver if pressed => vec![self.restart()],
            GamePhase::GameOver => Vec::new(),
        }
    }

    fn apply_input(&mut self, input: &[u8]) {
        if let Some(decoded) = InputState::decode(input) {
            self.queued_input
                .get_or_insert_with(InputState::default)
                .merge(&decoded);
        }
    }

    fn pending_timers(&self) -> usize {
        self.context.timers.pending()
    }

    fn teardown(&mut self) {
        self.context.timers.clear();
        self.context.physics.pause();
        self.queued_input = None;
        tracing::debug!(runs = self.runs, "Speed Runner torn down");
    }

    arcade_game_boilerplate!();
}
