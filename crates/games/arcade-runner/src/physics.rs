use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;

/// Overlaps thinner than this are treated as touching, not penetrating.
const CONTACT_EPSILON: f32 = 0.01;
/// Rebounds slower than this come to rest instead of bouncing.
const MIN_BOUNCE_SPEED: f32 = 20.0;
/// Width of the broad-phase columns static bodies are bucketed into.
const COLUMN_WIDTH: f32 = 128.0;

/// Axis-aligned rectangle in world units. +y is down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Rectangle from its top-left corner and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    /// True if the rectangles penetrate; shared edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right - other.left > CONTACT_EPSILON
            && other.right - self.left > CONTACT_EPSILON
            && self.bottom - other.top > CONTACT_EPSILON
            && other.bottom - self.top > CONTACT_EPSILON
    }
}

/// Per-side blocked flags from the last physics step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contacts {
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

/// The single dynamic body (the player). Position is the body center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub contacts: Contacts,
    pub collide_world_bounds: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width,
            height,
            contacts: Contacts::default(),
            collide_world_bounds: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.x, self.y, self.width, self.height)
    }

    pub fn set_velocity_x(&mut self, vx: f32) {
        self.vx = vx;
    }

    pub fn set_velocity_y(&mut self, vy: f32) {
        self.vy = vy;
    }
}

/// The collision engine the runner drives.
///
/// Static bodies are immovable terrain tiles; the dynamic body is passed in
/// on each step so the player owns its own position and velocity.
pub trait PhysicsWorld {
    fn add_static(&mut self, rect: Rect);

    fn set_bounds(&mut self, bounds: Rect);

    fn bounds(&self) -> Rect;

    /// Integrate `body` over `dt` seconds and refresh its contact flags.
    /// Does nothing while paused.
    fn step(&mut self, body: &mut Body, dt: f32);

    fn pause(&mut self);

    fn resume(&mut self);

    fn is_paused(&self) -> bool;

    fn static_count(&self) -> usize;
}

/// Gravity, axis-separated AABB resolution, and blocked flags.
#[derive(Debug, Clone)]
pub struct ArcadePhysics {
    gravity: f32,
    bounce: f32,
    bounds: Rect,
    statics: Vec<Rect>,
    columns: HashMap<i64, Vec<usize>>,
    paused: bool,
}

impl ArcadePhysics {
    pub fn new(config: &PhysicsConfig, bounds: Rect) -> Self {
        Self {
            gravity: config.gravity,
            bounce: config.bounce,
            bounds,
            statics: Vec::new(),
            columns: HashMap::new(),
            paused: false,
        }
    }

    fn column(x: f32) -> i64 {
        (x / COLUMN_WIDTH).floor() as i64
    }

    /// Indices of static bodies that might touch `rect`, without duplicates.
    fn candidates(&self, rect: &Rect) -> Vec<usize> {
        let mut out = Vec::new();
        for col in Self::column(rect.left)..=Self::column(rect.right) {
            if let Some(ids) = self.columns.get(&col) {
                out.extend_from_slice(ids);
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }

    fn rebound(&self, v: f32) -> f32 {
        let r = -v * self.bounce;
        if r.abs() < MIN_BOUNCE_SPEED { 0.0 } else { r }
    }

    fn resolve_x(&self, body: &mut Body, candidates: &[usize]) {
        let half_w = body.width / 2.0;
        for &idx in candidates {
            let tile = self.statics[idx];
            let r = body.rect();
            if !r.overlaps(&tile) {
                continue;
            }
            // Without horizontal motion, push out along the shallower side.
            let moving_right = if body.vx != 0.0 {
                body.vx > 0.0
            } else {
                r.right - tile.left < tile.right - r.left
            };
            if moving_right {
                body.x = tile.left - half_w;
                body.contacts.right = true;
            } else {
                body.x = tile.right + half_w;
                body.contacts.left = true;
            }
            body.vx = self.rebound(body.vx);
        }
    }

    fn resolve_y(&self, body: &mut Body, candidates: &[usize]) {
        let half_h = body.height / 2.0;
        for &idx in candidates {
            let tile = self.statics[idx];
            let r = body.rect();
            if !r.overlaps(&tile) {
                continue;
            }
            let falling = if body.vy != 0.0 {
                body.vy > 0.0
            } else {
                r.bottom - tile.top < tile.bottom - r.top
            };
            if falling {
                body.y = tile.top - half_h;
                body.contacts.down = true;
            } else {
                body.y = tile.bottom + half_h;
                body.contacts.up = true;
            }
            body.vy = self.rebound(body.vy);
        }
    }

    fn resolve_world_bounds(&self, body: &mut Body) {
        let half_w = body.width / 2.0;
        let half_h = body.height / 2.0;
        let b = self.bounds;
        if body.x - half_w < b.left {
            body.x = b.left + half_w;
            body.vx = self.rebound(body.vx);
            body.contacts.left = true;
        } else if body.x + half_w > b.right {
            body.x = b.right - half_w;
            body.vx = self.rebound(body.vx);
            body.contacts.right = true;
        }
        if body.y - half_h < b.top {
            body.y = b.top + half_h;
            body.vy = self.rebound(body.vy);
            body.contacts.up = true;
        } else if body.y + half_h > b.bottom {
            body.y = b.bottom - half_h;
            body.vy = self.rebound(body.vy);
            body.contacts.down = true;
        }
    }
}

impl PhysicsWorld for ArcadePhysics {
    fn add_static(&mut self, rect: Rect) {
        let idx = self.statics.len();
        self.statics.push(rect);
        for col in Self::column(rect.left)..=Self::column(rect.right) {
            self.columns.entry(col).or_default().push(idx);
        }
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn step(&mut self, body: &mut Body, dt: f32) {
        if self.paused || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        body.contacts = Contacts::default();
        body.vy += self.gravity * dt;

        // Horizontal pass: sweep the full step's x-range so fast bodies
        // still see tiles in the columns they cross.
        let start = body.rect();
        body.x += body.vx * dt;
        let swept = Rect {
            left: start.left.min(body.x - body.width / 2.0),
            right: start.right.max(body.x + body.width / 2.0),
            ..start
        };
        let candidates = self.candidates(&swept);
        self.resolve_x(body, &candidates);

        body.y += body.vy * dt;
        let candidates = self.candidates(&body.rect());
        self.resolve_y(body, &candidates);

        if body.collide_world_bounds {
            self.resolve_world_bounds(body);
        }
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

    fn static_count(&self) -> usize {
        self.statics.len()
    }
}
