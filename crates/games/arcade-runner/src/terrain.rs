use serde::{Deserialize, Serialize};

use crate::config::TerrainConfig;
use crate::physics::Rect;
use crate::rng::RandomSource;

/// What a terrain tile is part of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Platform,
    Wall,
}

/// A square terrain tile, positioned by its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl Tile {
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.x, self.y, self.size, self.size)
    }
}

/// A vertical column of wall tiles growing upward from the platform row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallStack {
    pub x: f32,
    pub height: u32,
    /// Bottom tile first.
    pub tiles: Vec<Tile>,
}

/// Geometry produced by one generator call for `[start_x, end_x)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainChunk {
    pub start_x: f32,
    pub end_x: f32,
    pub platforms: Vec<Tile>,
    pub walls: Vec<WallStack>,
}

impl TerrainChunk {
    pub fn empty(start_x: f32, end_x: f32) -> Self {
        Self {
            start_x,
            end_x,
            platforms: Vec::new(),
            walls: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty() && self.walls.is_empty()
    }

    /// Every tile in the chunk: platforms, then walls bottom-up.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.platforms
            .iter()
            .chain(self.walls.iter().flat_map(|w| w.tiles.iter()))
    }

    pub fn tile_count(&self) -> usize {
        self.platforms.len() + self.walls.iter().map(|w| w.tiles.len()).sum::<usize>()
    }
}

/// Places platforms and wall stacks for a horizontal span.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    config: TerrainConfig,
}

impl TerrainGenerator {
    pub fn new(config: TerrainConfig) -> Self {
        Self { config }
    }

    /// Generate terrain for `[start_x, end_x)`.
    ///
    /// All platform draws are taken before any wall draws; each wall takes a
    /// presence draw followed by a height draw. An empty or inverted span
    /// yields an empty chunk.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        start_x: f32,
        end_x: f32,
        rng: &mut R,
    ) -> TerrainChunk {
        let mut chunk = TerrainChunk::empty(start_x, end_x);
        if start_x.partial_cmp(&end_x) != Some(std::cmp::Ordering::Less) {
            return chunk;
        }
        let c = &self.config;

        for x in stepped(start_x, end_x, c.platform_step) {
            if rng.next_unit() < c.gap_chance {
                continue;
            }
            chunk.platforms.push(Tile {
                kind: TileKind::Platform,
                x,
                y: c.platform_y,
                size: c.tile_size,
            });
        }

        for x in stepped(start_x + c.wall_offset, end_x, c.wall_step) {
            if rng.next_unit() >= c.wall_chance {
                continue;
            }
            let height = rng.range_inclusive(c.wall_min_height, c.wall_max_height);
            let tiles = (0..height)
                .map(|j| Tile {
                    kind: TileKind::Wall,
                    x,
                    y: c.platform_y - j as f32 * c.tile_size,
                    size: c.tile_size,
                })
                .collect();
            chunk.walls.push(WallStack { x, height, tiles });
        }

        chunk
    }
}

/// `from, from + step, from + 2*step, ...` while below `to`.
fn stepped(from: f32, to: f32, step: f32) -> impl Iterator<Item = f32> {
    (0u32..)
        .map(move |i| from + i as f32 * step)
        .take_while(move |&x| step > 0.0 && x < to)
}
