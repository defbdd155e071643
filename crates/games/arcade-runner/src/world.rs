use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::config::{TerrainConfig, WorldConfig};
use crate::physics::{PhysicsWorld, Rect};
use crate::rng::RandomSource;
use crate::terrain::{TerrainChunk, TerrainGenerator, Tile};

/// A span of terrain appended to the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub start_x: f32,
    pub end_x: f32,
    pub tiles: usize,
}

/// The playable world: its width and every chunk generated so far.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    generator: TerrainGenerator,
    level_width: f32,
    chunks: Vec<TerrainChunk>,
}

impl World {
    /// An empty world at the initial width. Call [`World::populate`] to
    /// generate the first span.
    pub fn new(config: WorldConfig, terrain: TerrainConfig) -> Self {
        Self {
            level_width: config.initial_width,
            config,
            generator: TerrainGenerator::new(terrain),
            chunks: Vec::new(),
        }
    }

    pub fn level_width(&self) -> f32 {
        self.level_width
    }

    /// World and camera bounds: `(0, 0, level_width, height)`.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.level_width, self.config.height)
    }

    pub fn chunks(&self) -> &[TerrainChunk] {
        &self.chunks
    }

    /// Rightmost x generated so far.
    pub fn frontier(&self) -> f32 {
        self.chunks.last().map_or(0.0, |c| c.end_x)
    }

    pub fn tile_count(&self) -> usize {
        self.chunks.iter().map(TerrainChunk::tile_count).sum()
    }

    /// Tiles whose centers fall in `[left, right)`.
    pub fn tiles_between(&self, left: f32, right: f32) -> impl Iterator<Item = &Tile> {
        self.chunks
            .iter()
            .filter(move |c| c.end_x > left && c.start_x < right)
            .flat_map(TerrainChunk::tiles)
            .filter(move |t| t.x >= left && t.x < right)
    }

    /// Generate the initial span `[0, level_width)`.
    pub fn populate(
        &mut self,
        physics: &mut dyn PhysicsWorld,
        rng: &mut dyn RandomSource,
    ) -> Extension {
        let ext = self.generate_span(self.frontier(), self.level_width, physics, rng);
        physics.set_bounds(self.bounds());
        ext
    }

    /// Grow the world by one chunk if the camera's right edge is within the
    /// frontier margin of the end. At most one chunk per call.
    pub fn extend_if_needed(
        &mut self,
        camera: &mut Camera,
        physics: &mut dyn PhysicsWorld,
        rng: &mut dyn RandomSource,
    ) -> Option<Extension> {
        if camera.right_edge() <= self.level_width - self.config.frontier_margin {
            return None;
        }
        let old_width = self.level_width;
        self.level_width += self.config.chunk_width;
        let ext = self.generate_span(old_width, self.level_width, physics, rng);

        let bounds = self.bounds();
        physics.set_bounds(bounds);
        camera.set_bounds(bounds);
        tracing::debug!(
            start_x = ext.start_x,
            end_x = ext.end_x,
            tiles = ext.tiles,
            "Extended terrain"
        );
        Some(ext)
    }

    fn generate_span(
        &mut self,
        start_x: f32,
        end_x: f32,
        physics: &mut dyn PhysicsWorld,
        rng: &mut dyn RandomSource,
    ) -> Extension {
        debug_assert!(
            start_x >= self.frontier(),
            "terrain must be generated ahead of the frontier"
        );
        let chunk = self.generator.generate(start_x, end_x, rng);
        for tile in chunk.tiles() {
            physics.add_static(tile.rect());
        }
        let ext = Extension {
            start_x,
            end_x,
            tiles: chunk.tile_count(),
        };
        self.chunks.push(chunk);
        ext
    }
}
