//! Campaign map - square tile grid
//!
//! Provides the strategic grid where cities sit and armies march.

use serde::{Deserialize, Serialize};

use crate::core::error::{ConquestError, Result};
use crate::core::types::{Coord, Owner};

/// Display classification of a tile, derived from its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Neutral,
    PlayerCity,
    PlayerCapital,
    NeutralCity,
    AiCity,
}

impl TileKind {
    pub fn is_city(&self) -> bool {
        !matches!(self, TileKind::Neutral)
    }
}

/// A stationary, ownable settlement occupying one tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub owner: Owner,
    pub capital: bool,
    pub gold: u32,
    /// Units stationed in the city
    pub armies: u32,
    pub barracks: bool,
    /// Units that join `armies` at the next end of turn
    pub training_queue: u32,
}

impl City {
    pub fn new(name: impl Into<String>, owner: Owner) -> Self {
        Self {
            name: name.into(),
            owner,
            capital: false,
            gold: 0,
            armies: 0,
            barracks: false,
            training_queue: 0,
        }
    }

    pub fn with_gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }

    pub fn with_armies(mut self, armies: u32) -> Self {
        self.armies = armies;
        self
    }

    pub fn with_barracks(mut self) -> Self {
        self.barracks = true;
        self
    }

    pub fn as_capital(mut self) -> Self {
        self.capital = true;
        self
    }

    pub fn kind(&self) -> TileKind {
        match (self.owner, self.capital) {
            (Owner::Player, true) => TileKind::PlayerCapital,
            (Owner::Player, false) => TileKind::PlayerCity,
            (Owner::Ai, _) => TileKind::AiCity,
            (Owner::Neutral, _) => TileKind::NeutralCity,
        }
    }
}

/// One cell of the grid: bare land or a city
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    City(City),
}

impl Tile {
    pub fn kind(&self) -> TileKind {
        match self {
            Tile::Empty => TileKind::Neutral,
            Tile::City(city) => city.kind(),
        }
    }

    pub fn city(&self) -> Option<&City> {
        match self {
            Tile::City(city) => Some(city),
            Tile::Empty => None,
        }
    }

    pub fn city_mut(&mut self) -> Option<&mut City> {
        match self {
            Tile::City(city) => Some(city),
            Tile::Empty => None,
        }
    }
}

impl From<City> for Tile {
    fn from(city: City) -> Self {
        Tile::City(city)
    }
}

/// Hands out "City N" names for newly founded settlements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CityNamer {
    next: u32,
}

impl CityNamer {
    /// Start numbering after `used` existing names
    pub fn starting_after(used: u32) -> Self {
        Self { next: used }
    }

    pub fn next_name(&mut self) -> String {
        self.next += 1;
        format!("City {}", self.next)
    }
}

/// The campaign grid, stored in row-major order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    size: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Create a square grid of bare tiles
    pub fn new(size: i32) -> Self {
        let size = size.max(0);
        let count = (size as usize) * (size as usize);
        Self {
            size,
            tiles: vec![Tile::Empty; count],
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.size && coord.y < self.size
    }

    fn index_of(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(coord.y as usize * self.size as usize + coord.x as usize)
        } else {
            None
        }
    }

    fn coord_of(&self, idx: usize) -> Coord {
        let size = self.size as usize;
        Coord::new((idx % size) as i32, (idx / size) as i32)
    }

    /// Get a tile, failing with `OutOfBounds` for invalid coordinates
    pub fn tile_at(&self, coord: Coord) -> Result<&Tile> {
        self.get(coord).ok_or(ConquestError::OutOfBounds(coord))
    }

    pub fn tile_at_mut(&mut self, coord: Coord) -> Result<&mut Tile> {
        self.get_mut(coord).ok_or(ConquestError::OutOfBounds(coord))
    }

    /// Replace the tile at `coord`
    pub fn set_tile(&mut self, coord: Coord, tile: Tile) -> Result<()> {
        *self.tile_at_mut(coord)? = tile;
        Ok(())
    }

    /// Get a tile, `None` when out of bounds
    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        self.index_of(coord).map(|idx| &self.tiles[idx])
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        self.index_of(coord).map(|idx| &mut self.tiles[idx])
    }

    pub fn city_at(&self, coord: Coord) -> Option<&City> {
        self.get(coord).and_then(Tile::city)
    }

    pub fn city_at_mut(&mut self, coord: Coord) -> Option<&mut City> {
        self.get_mut(coord).and_then(Tile::city_mut)
    }

    /// Default transit walkability: bare land and Player cities
    pub fn is_walkable(&self, coord: Coord) -> bool {
        matches!(
            self.get(coord).map(Tile::kind),
            Some(TileKind::Neutral | TileKind::PlayerCity | TileKind::PlayerCapital)
        )
    }

    /// Iterate over all coordinates and tiles in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Tile)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(idx, tile)| (self.coord_of(idx), tile))
    }

    /// Iterate over every city in row-major order
    pub fn cities(&self) -> impl Iterator<Item = (Coord, &City)> {
        self.iter()
            .filter_map(|(coord, tile)| tile.city().map(|city| (coord, city)))
    }

    pub fn cities_mut(&mut self) -> impl Iterator<Item = (Coord, &mut City)> {
        let size = self.size as usize;
        self.tiles.iter_mut().enumerate().filter_map(move |(idx, tile)| {
            let coord = Coord::new((idx % size) as i32, (idx / size) as i32);
            tile.city_mut().map(|city| (coord, city))
        })
    }

    pub fn cities_owned_by(&self, owner: Owner) -> impl Iterator<Item = (Coord, &City)> {
        self.cities().filter(move |(_, city)| city.owner == owner)
    }

    /// Coordinates of every city held by `owner`, in row-major order
    pub fn coords_of(&self, owner: Owner) -> Vec<Coord> {
        self.cities_owned_by(owner).map(|(coord, _)| coord).collect()
    }

    pub fn count_cities(&self, owner: Owner) -> usize {
        self.cities_owned_by(owner).count()
    }
}
