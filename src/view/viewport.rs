//! Scrolling viewport over the campaign grid
//!
//! Handles window positioning and clamping. Input handling lives with the
//! front end; this only answers which tiles are on screen.

use serde::{Deserialize, Serialize};

use crate::campaign::map::{Grid, Tile};
use crate::core::types::Coord;

/// Square window of `size` tiles whose top-left corner is (`x`, `y`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub size: i32,
}

impl Viewport {
    /// Centre the window on `focus`, clamped to the map
    pub fn centered_on(focus: Coord, size: i32, map_size: i32) -> Self {
        let mut view = Self {
            x: focus.x.saturating_sub(size / 2),
            y: focus.y.saturating_sub(size / 2),
            size: size.min(map_size).max(0),
        };
        view.clamp(map_size);
        view
    }

    /// Keep the window inside `[0, map_size - size]`
    pub fn clamp(&mut self, map_size: i32) {
        let max = map_size.saturating_sub(self.size).max(0);
        self.x = self.x.clamp(0, max);
        self.y = self.y.clamp(0, max);
    }

    /// Scroll by a tile delta
    pub fn pan(&mut self, dx: i32, dy: i32, map_size: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
        self.clamp(map_size);
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= self.x
            && coord.y >= self.y
            && coord.x < self.x.saturating_add(self.size)
            && coord.y < self.y.saturating_add(self.size)
    }

    /// Tiles inside the window in row-major order
    ///
    /// Coordinates outside the grid are skipped.
    pub fn visible_tiles<'a>(&self, grid: &'a Grid) -> impl Iterator<Item = (Coord, &'a Tile)> + 'a {
        let Viewport { x, y, size } = *self;
        (y..y.saturating_add(size)).flat_map(move |row| {
            (x..x.saturating_add(size)).filter_map(move |col| {
                let coord = Coord::new(col, row);
                grid.get(coord).map(|tile| (coord, tile))
            })
        })
    }

    /// Convert a window-relative cell to a map coordinate
    pub fn to_map(&self, cell_x: i32, cell_y: i32) -> Coord {
        Coord::new(self.x.saturating_add(cell_x), self.y.saturating_add(cell_y))
    }
}
