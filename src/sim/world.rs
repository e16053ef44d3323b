//! Static tile world
//!
//! Generated once from a `SceneConfig` and never mutated afterwards. Tiles are
//! stored row-major (row, then column) so every pass over them, including
//! collision resolution, sees the same order.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::SceneConfig;

/// Tile material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockType {
    /// Top row of a ground column (grass)
    Surface,
    /// Everything under the surface (dirt)
    Fill,
    /// Floating platform
    Platform,
}

/// One grid cell of terrain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub column: i32,
    pub row: i32,
    /// Edge length in pixels
    pub dimensions: f32,
    pub block: BlockType,
}

impl Tile {
    pub fn x(&self) -> f32 {
        self.column as f32 * self.dimensions
    }

    pub fn y(&self) -> f32 {
        self.row as f32 * self.dimensions
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x(), self.y(), self.dimensions, self.dimensions)
    }
}

/// Row of the ground surface for a column
pub fn ground_level(column: i32, base_height: f32, wave_a: f32, wave_b: f32) -> i32 {
    let c = column as f32;
    (base_height + (c * 0.3).sin() * wave_a + (c * 0.15).cos() * wave_b).floor() as i32
}

/// The collidable terrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldGrid {
    tiles: Vec<Tile>,
    tile_size: f32,
    columns: i32,
    bottom_row: i32,
}

impl WorldGrid {
    /// Generate ground columns and floating platforms
    pub fn generate(config: &SceneConfig) -> Self {
        let size = config.tile_size;
        let mut tiles = Vec::new();

        for column in 0..config.columns {
            let ground = ground_level(column, config.base_height, config.wave_a, config.wave_b);
            for row in ground..config.bottom_row {
                tiles.push(Tile {
                    column,
                    row,
                    dimensions: size,
                    block: if row == ground {
                        BlockType::Surface
                    } else {
                        BlockType::Fill
                    },
                });
            }
        }

        for platform in &config.platforms {
            for i in 0..platform.length {
                tiles.push(Tile {
                    column: platform.start_column + i,
                    row: platform.row,
                    dimensions: size,
                    block: BlockType::Platform,
                });
            }
        }

        // Stable sort keeps generation order for the (unexpected) case of
        // a platform sharing a cell with ground
        tiles.sort_by_key(|t| (t.row, t.column));

        Self {
            tiles,
            tile_size: size,
            columns: config.columns,
            bottom_row: config.bottom_row,
        }
    }

    /// Build a grid from explicit tiles (sorted row-major)
    pub fn from_tiles(mut tiles: Vec<Tile>, columns: i32, bottom_row: i32) -> Self {
        let tile_size = tiles.first().map(|t| t.dimensions).unwrap_or(32.0);
        tiles.sort_by_key(|t| (t.row, t.column));
        Self {
            tiles,
            tile_size,
            columns,
            bottom_row,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    pub fn height(&self) -> f32 {
        self.bottom_row as f32 * self.tile_size
    }

    /// Tiles whose boxes intersect `view` (linear scan)
    pub fn visible<'a>(&'a self, view: &'a Rect) -> impl Iterator<Item = &'a Tile> + 'a {
        self.tiles.iter().filter(move |t| t.rect().overlaps(view))
    }

    /// True if the point lies strictly inside any tile
    pub fn solid_at(&self, point: glam::Vec2) -> bool {
        self.tiles.iter().any(|t| t.rect().contains_point(point))
    }
}
