/// Grid: fixed-size tile matrix with a wall border.
///
/// The border is written once by `new` and never again. Dynamic entities are
/// kept off it by the motion rules, so every `set` from the step function
/// lands in the interior. `set` still checks its bounds and reports
/// `OutOfBounds` rather than indexing past the end.

use crate::error::{GameError, GameResult};

use super::entity::Position;
use super::tile::Tile;

pub const MIN_SIDE: usize = 3;

#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Vec<Tile>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> GameResult<Self> {
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(GameError::InvalidDimensions { width, height });
        }
        let mut tiles = vec![vec![Tile::Empty; width]; height];
        for (y, row) in tiles.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if y == 0 || x == 0 || y == height - 1 || x == width - 1 {
                    *cell = Tile::Wall;
                }
            }
        }
        Ok(Grid { width, height, tiles })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at `pos`. Out of bounds reads as wall.
    #[inline]
    pub fn get(&self, pos: Position) -> Tile {
        if self.contains(pos) {
            self.tiles[pos.y][pos.x]
        } else {
            Tile::Wall
        }
    }

    pub fn set(&mut self, pos: Position, tile: Tile) -> GameResult<()> {
        if !self.contains(pos) {
            return Err(GameError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            });
        }
        self.tiles[pos.y][pos.x] = tile;
        Ok(())
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Strictly inside the border: 1..=width-2 × 1..=height-2.
    #[inline]
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.x >= 1 && pos.y >= 1 && pos.x <= self.width - 2 && pos.y <= self.height - 2
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.iter().map(|r| r.as_slice())
    }
}
