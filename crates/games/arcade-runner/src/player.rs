use serde::{Deserialize, Serialize};

use arcade_core::input::InputState;
use arcade_core::scheduler::Scheduler;

use crate::config::{MovementConfig, PhysicsConfig};
use crate::physics::{Body, Contacts};

/// Which way the sprite faces. The renderer flips on `Left`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    Left,
    Right,
}

/// Movement state derived from the last physics step's contact flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementState {
    Grounded,
    Airborne,
    WallContact(WallSide),
}

impl MovementState {
    /// Ground contact wins over wall contact; left wins over right.
    pub fn from_contacts(contacts: Contacts) -> Self {
        if contacts.down {
            Self::Grounded
        } else if contacts.left {
            Self::WallContact(WallSide::Left)
        } else if contacts.right {
            Self::WallContact(WallSide::Right)
        } else {
            Self::Airborne
        }
    }
}

/// What, if anything, the controller launched this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpKind {
    None,
    Ground,
    Wall(WallSide),
}

/// Deferred events owned by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunnerTimer {
    /// The wall-jump cooldown has elapsed.
    WallJumpReady,
}

/// The player-controlled character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    pub wall_jump_allowed: bool,
    /// Color multiplier applied by the renderer, `None` for untinted.
    pub tint: Option<u32>,
}

impl Player {
    pub fn spawn(movement: &MovementConfig, physics: &PhysicsConfig) -> Self {
        let mut body = Body::new(
            movement.spawn_x,
            movement.spawn_y,
            physics.player_width,
            physics.player_height,
        );
        body.collide_world_bounds = physics.collide_world_bounds;
        Self {
            body,
            facing: Facing::Right,
            wall_jump_allowed: true,
            tint: None,
        }
    }

    pub fn x(&self) -> f32 {
        self.body.x
    }

    pub fn y(&self) -> f32 {
        self.body.y
    }

    pub fn movement_state(&self) -> MovementState {
        MovementState::from_contacts(self.body.contacts)
    }

    pub fn on_timer(&mut self, timer: RunnerTimer) {
        match timer {
            RunnerTimer::WallJumpReady => self.wall_jump_allowed = true,
        }
    }
}

/// Translates held keys into velocity changes once per tick.
#[derive(Debug, Clone)]
pub struct PlayerController {
    config: MovementConfig,
}

impl PlayerController {
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    /// Apply one tick of input. Contacts are read as left by the physics step
    /// that ran just before.
    pub fn update(
        &self,
        player: &mut Player,
        input: &InputState,
        timers: &mut Scheduler<RunnerTimer>,
    ) -> JumpKind {
        let c = &self.config;

        if input.right {
            player.body.set_velocity_x(c.run_speed);
            player.facing = Facing::Right;
        } else if input.left {
            player.body.set_velocity_x(-c.run_speed);
            player.facing = Facing::Left;
        } else {
            player.body.set_velocity_x(0.0);
        }

        if !input.up {
            return JumpKind::None;
        }

        match player.movement_state() {
            MovementState::Grounded => {
                player.body.set_velocity_y(-c.jump_speed);
                JumpKind::Ground
            },
            MovementState::WallContact(side) if player.wall_jump_allowed => {
                player.body.set_velocity_y(-c.jump_speed);
                let push = match side {
                    WallSide::Left => c.wall_push,
                    WallSide::Right => -c.wall_push,
                };
                player.body.set_velocity_x(push);
                player.wall_jump_allowed = false;
                timers.schedule_once(c.wall_jump_cooldown_ms, RunnerTimer::WallJumpReady);
                JumpKind::Wall(side)
            },
            _ => JumpKind::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (PlayerController, Player, Scheduler<RunnerTimer>) {
        (
            PlayerController::new(MovementConfig::default()),
            Player::spawn(&MovementConfig::default(), &PhysicsConfig::default()),
            Scheduler::new(),
        )
    }

    fn keys(left: bool, right: bool, up: bool) -> InputState {
        InputState {
            left,
            right,
            up,
            ..Default::default()
        }
    }

    #[test]
    fn spawns_at_configured_point() {
        let (_, player, _) = setup();
        assert_eq!((player.x(), player.y()), (200.0, 350.0));
        assert_eq!((player.body.width, player.body.height), (28.0, 64.0));
        assert!(player.wall_jump_allowed);
        assert_eq!(player.facing, Facing::Right);
        assert_eq!(player.tint, None);
        assert_eq!(player.movement_state(), MovementState::Airborne);
    }

    #[test]
    fn horizontal_keys_set_velocity_and_facing() {
        let (ctl, mut player, mut timers) = setup();

        ctl.update(&mut player, &keys(true, false, false), &mut timers);
        assert_eq!(player.body.vx, -400.0);
        assert_eq!(player.facing, Facing::Left);

        ctl.update(&mut player, &keys(false, false, false), &mut timers);
        assert_eq!(player.body.vx, 0.0);
        assert_eq!(player.facing, Facing::Left, "facing persists when idle");

        ctl.update(&mut player, &keys(true, true, false), &mut timers);
        assert_eq!(player.body.vx, 400.0, "right wins when both held");
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn grounded_jump() {
        let (ctl, mut player, mut timers) = setup();
        player.body.contacts.down = true;

        let jump = ctl.update(&mut player, &keys(false, false, true), &mut timers);
        assert_eq!(jump, JumpKind::Ground);
        assert_eq!(player.body.vy, -330.0);
        assert!(player.wall_jump_allowed);
        assert!(timers.is_empty());
    }

    #[test]
    fn airborne_up_does_nothing() {
        let (ctl, mut player, mut timers) = setup();
        player.body.vy = 50.0;
        let jump = ctl.update(&mut player, &keys(false, true, true), &mut timers);
        assert_eq!(jump, JumpKind::None);
        assert_eq!(player.body.vy, 50.0);
    }

    #[test]
    fn wall_jump_off_left_wall_pushes_right_and_cools_down() {
        let (ctl, mut player, mut timers) = setup();
        player.body.contacts.left = true;

        let jump = ctl.update(&mut player, &keys(true, false, true), &mut timers);
        assert_eq!(jump, JumpKind::Wall(WallSide::Left));
        assert_eq!(player.body.vy, -330.0);
        assert_eq!(player.body.vx, 150.0);
        assert!(!player.wall_jump_allowed);
        assert_eq!(timers.pending(), 1);

        // Still on the wall but cooling down.
        let jump = ctl.update(&mut player, &keys(true, false, true), &mut timers);
        assert_eq!(jump, JumpKind::None);
        assert_eq!(player.body.vx, -400.0);

        for timer in timers.advance(249.0) {
            player.on_timer(timer);
        }
        assert!(!player.wall_jump_allowed);
        for timer in timers.advance(1.0) {
            player.on_timer(timer);
        }
        assert!(player.wall_jump_allowed);
        assert!(timers.is_empty());
    }

    #[test]
    fn wall_jump_off_right_wall_pushes_left() {
        let (ctl, mut player, mut timers) = setup();
        player.body.contacts.right = true;

        let jump = ctl.update(&mut player, &keys(false, true, true), &mut timers);
        assert_eq!(jump, JumpKind::Wall(WallSide::Right));
        assert_eq!(player.body.vx, -150.0);
        assert_eq!(player.body.vy, -330.0);
    }

    #[test]
    fn wall_jump_push_overrides_idle_horizontal() {
        let (ctl, mut player, mut timers) = setup();
        player.body.contacts.right = true;

        let jump = ctl.update(&mut player, &keys(false, false, true), &mut timers);
        assert_eq!(jump, JumpKind::Wall(WallSide::Right));
        assert_eq!(player.body.vx, -150.0);
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn cooldown_blocks_jump_off_the_other_wall() {
        let (ctl, mut player, mut timers) = setup();
        player.body.contacts.left = true;
        ctl.update(&mut player, &keys(false, false, true), &mut timers);

        player.body.contacts = Contacts {
            right: true,
            ..Contacts::default()
        };
        player.body.vy = 0.0;
        let jump = ctl.update(&mut player, &keys(false, true, true), &mut timers);
        assert_eq!(jump, JumpKind::None);
        assert_eq!(player.body.vy, 0.0);
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn ground_takes_priority_over_wall() {
        let (ctl, mut player, mut timers) = setup();
        player.body.contacts.down = true;
        player.body.contacts.left = true;

        let jump = ctl.update(&mut player, &keys(true, false, true), &mut timers);
        assert_eq!(jump, JumpKind::Ground);
        assert_eq!(player.body.vx, -400.0);
        assert!(player.wall_jump_allowed);
    }

    #[test]
    fn movement_state_from_contacts() {
        let c = |down, left, right| Contacts {
            down,
            left,
            right,
            up: false,
        };
        assert_eq!(
            MovementState::from_contacts(c(false, false, false)),
            MovementState::Airborne
        );
        assert_eq!(
            MovementState::from_contacts(c(true, true, false)),
            MovementState::Grounded
        );
        assert_eq!(
            MovementState::from_contacts(c(false, true, true)),
            MovementState::WallContact(WallSide::Left)
        );
        assert_eq!(
            MovementState::from_contacts(c(false, false, true)),
            MovementState::WallContact(WallSide::Right)
        );
    }
}
