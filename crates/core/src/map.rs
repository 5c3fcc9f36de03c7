//! Grid map adapter: terrain plus the per-cell visibility flags the core consumes.
//! Occupancy queries live on `World`, which owns the entities placed on this map.

use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tile {
    Wall,
    Floor,
}

impl Tile {
    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor)
    }

    pub fn is_transparent(self) -> bool {
        matches!(self, Tile::Floor)
    }
}

#[derive(Clone, Debug)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
    pub visible: Vec<bool>,
    pub explored: Vec<bool>,
}

impl Map {
    /// A floor area enclosed by a one-cell wall border. A zero dimension gives an empty map.
    pub fn new(width: usize, height: usize) -> Self {
        let mut tiles = vec![Tile::Floor; width * height];
        if width > 0 && height > 0 {
            for x in 0..width {
                tiles[x] = Tile::Wall;
                tiles[(height - 1) * width + x] = Tile::Wall;
            }
            for y in 0..height {
                tiles[y * width] = Tile::Wall;
                tiles[y * width + (width - 1)] = Tile::Wall;
            }
        }
        Self {
            width,
            height,
            tiles,
            visible: vec![false; width * height],
            explored: vec![false; width * height],
        }
    }

    /// Builds terrain from rows where `#` is wall and anything else is floor.
    /// Rows shorter than the widest one are padded with wall.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut tiles = vec![Tile::Wall; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch != '#' {
                    tiles[y * width + x] = Tile::Floor;
                }
            }
        }
        Self {
            width,
            height,
            tiles,
            visible: vec![false; width * height],
            explored: vec![false; width * height],
        }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Out-of-bounds cells read as wall.
    pub fn tile_at(&self, pos: Pos) -> Tile {
        if !self.in_bounds(pos) {
            return Tile::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn set_tile(&mut self, pos: Pos, tile: Tile) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos).is_walkable()
    }

    pub fn is_transparent(&self, pos: Pos) -> bool {
        self.tile_at(pos).is_transparent()
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.visible[self.index(pos)]
    }

    pub fn set_visible(&mut self, pos: Pos, visible: bool) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.visible[idx] = visible;
        if visible {
            self.explored[idx] = true;
        }
    }

    pub fn clear_visible(&mut self) {
        self.visible.fill(false);
    }

    pub fn is_explored(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.explored[self.index(pos)]
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}
