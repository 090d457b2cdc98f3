//! Static tile grid and the deterministic classic level layout.

use platformer_core::{Tile, TileCoord};

/// Dense grid of tiles. Read-only once the level has been generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    tile_size: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Creates an empty grid. A non-positive tile size is raised to one pixel.
    pub(crate) fn new(columns: u32, rows: u32, tile_size: i32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            tile_size: tile_size.max(1),
            tiles: vec![Tile::Empty; capacity],
        }
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a square tile in pixels.
    #[must_use]
    pub const fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Tile stored at the provided coordinate, or [`Tile::Empty`] outside the grid.
    #[must_use]
    pub fn tile_at(&self, column: i32, row: i32) -> Tile {
        self.index(column, row)
            .and_then(|index| self.tiles.get(index).copied())
            .unwrap_or(Tile::Empty)
    }

    /// Reports whether the tile at the coordinate blocks movement.
    #[must_use]
    pub fn is_solid(&self, column: i32, row: i32) -> bool {
        self.tile_at(column, row).is_solid()
    }

    /// Reports whether the tile at the coordinate is a hazard.
    #[must_use]
    pub fn is_hazard(&self, column: i32, row: i32) -> bool {
        self.tile_at(column, row).is_hazard()
    }

    /// Iterates over every tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (TileCoord, Tile)> + '_ {
        let columns = self.columns.max(1) as usize;
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let column = (index % columns) as i32;
            let row = (index / columns) as i32;
            (TileCoord::new(column, row), *tile)
        })
    }

    /// Column containing the pixel x coordinate. Floors towards negative infinity.
    pub(crate) fn column_at(&self, x: i32) -> i32 {
        x.div_euclid(self.tile_size)
    }

    /// Row containing the pixel y coordinate. Floors towards negative infinity.
    pub(crate) fn row_at(&self, y: i32) -> i32 {
        y.div_euclid(self.tile_size)
    }

    /// Writes a tile; coordinates outside the grid are ignored.
    pub(crate) fn set(&mut self, column: i32, row: i32, tile: Tile) {
        if let Some(slot) = self
            .index(column, row)
            .and_then(|index| self.tiles.get_mut(index))
        {
            *slot = tile;
        }
    }

    fn index(&self, column: i32, row: i32) -> Option<usize> {
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        if column < self.columns && row < self.rows {
            let width = usize::try_from(self.columns).ok()?;
            Some(usize::try_from(row).ok()? * width + usize::try_from(column).ok()?)
        } else {
            None
        }
    }
}

/// Horizontal run of stone tiles. `rise` counts rows up from the bottom edge of the grid.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Platform {
    column: i32,
    rise: i32,
    length: i32,
}

/// Vertical stone column growing upward from `base_rise`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Pillar {
    column: i32,
    base_rise: i32,
    height: i32,
}

/// Spawn parameters of a patrolling enemy.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EnemySpawn {
    pub(crate) column: i32,
    pub(crate) rise: i32,
    pub(crate) range_tiles: i32,
    pub(crate) speed: f32,
}

/// Tile an actor or coin is placed on.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SpawnPoint {
    pub(crate) column: i32,
    pub(crate) rise: i32,
}

/// Every placement constant of a level. Rows are expressed as `rise` above the
/// bottom edge so the layout adapts to the grid height.
#[derive(Debug)]
pub(crate) struct LevelLayout {
    pits: &'static [i32],
    pit_width: i32,
    platforms: &'static [Platform],
    pillars: &'static [Pillar],
    lava_margin_right: i32,
    lava_max_start: i32,
    lava_width: i32,
    pub(crate) player_spawn: SpawnPoint,
    pub(crate) enemies: &'static [EnemySpawn],
    pub(crate) coins: &'static [SpawnPoint],
}

const fn platform(column: i32, rise: i32, length: i32) -> Platform {
    Platform {
        column,
        rise,
        length,
    }
}

const fn pillar(column: i32, base_rise: i32, height: i32) -> Pillar {
    Pillar {
        column,
        base_rise,
        height,
    }
}

const fn enemy(column: i32, rise: i32, range_tiles: i32, speed: f32) -> EnemySpawn {
    EnemySpawn {
        column,
        rise,
        range_tiles,
        speed,
    }
}

const fn coin(column: i32, rise: i32) -> SpawnPoint {
    SpawnPoint { column, rise }
}

/// The one level shipped with the game.
pub(crate) const CLASSIC_LAYOUT: LevelLayout = LevelLayout {
    pits: &[30, 90, 140],
    pit_width: 4,
    platforms: &[
        platform(6, 6, 6),
        platform(18, 8, 8),
        platform(36, 5, 5),
        platform(60, 9, 7),
        platform(85, 6, 6),
        platform(110, 7, 5),
        platform(130, 5, 8),
        platform(150, 8, 6),
    ],
    pillars: &[pillar(28, 3, 3), pillar(52, 3, 4), pillar(95, 3, 3)],
    lava_margin_right: 30,
    lava_max_start: 145,
    lava_width: 6,
    player_spawn: SpawnPoint { column: 2, rise: 2 },
    enemies: &[
        enemy(6, 6, 5, 70.0),
        enemy(20, 8, 6, 55.0),
        enemy(36, 5, 4, 65.0),
        enemy(130, 5, 7, 60.0),
    ],
    coins: &[
        coin(8, 7),
        coin(22, 9),
        coin(38, 6),
        coin(62, 10),
        coin(87, 7),
        coin(112, 8),
        coin(132, 6),
    ],
};

impl LevelLayout {
    /// Generates the tile grid. Placements that fall outside the grid are clipped.
    pub(crate) fn build(&self, columns: u32, rows: u32, tile_size: i32) -> TileGrid {
        let mut grid = TileGrid::new(columns, rows, tile_size);
        let width = i32::try_from(columns).unwrap_or(i32::MAX);
        let height = i32::try_from(rows).unwrap_or(i32::MAX);
        let grass_row = height - 2;
        let dirt_row = height - 1;

        for column in 0..width {
            grid.set(column, grass_row, Tile::Grass);
            grid.set(column, dirt_row, Tile::Dirt);
        }

        for &start in self.pits {
            for column in start..start.saturating_add(self.pit_width) {
                grid.set(column, grass_row, Tile::Empty);
                grid.set(column, dirt_row, Tile::Empty);
            }
        }

        for platform in self.platforms {
            let row = height - platform.rise;
            for column in platform.column..platform.column.saturating_add(platform.length) {
                grid.set(column, row, Tile::Stone);
            }
        }

        for pillar in self.pillars {
            let base_row = height - pillar.base_rise;
            for offset in 0..pillar.height {
                grid.set(pillar.column, base_row - offset, Tile::Stone);
            }
        }

        let lava_start = (width - self.lava_margin_right).min(self.lava_max_start);
        for column in lava_start..lava_start.saturating_add(self.lava_width) {
            grid.set(column, grass_row, Tile::Lava);
            grid.set(column, dirt_row, Tile::Lava);
        }

        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const COLUMNS: u32 = 66;
    const ROWS: u32 = 33;

    fn classic() -> TileGrid {
        CLASSIC_LAYOUT.build(COLUMNS, ROWS, 18)
    }

    #[test]
    fn ground_strip_is_grass_over_dirt() {
        let grid = classic();
        assert_eq!(grid.tile_at(0, 31), Tile::Grass);
        assert_eq!(grid.tile_at(0, 32), Tile::Dirt);
        assert_eq!(grid.tile_at(65, 31), Tile::Grass);
        assert_eq!(grid.tile_at(0, 30), Tile::Empty);
    }

    #[test]
    fn pits_cut_through_both_ground_rows() {
        let grid = classic();
        for column in 30..34 {
            assert_eq!(grid.tile_at(column, 31), Tile::Empty);
            assert_eq!(grid.tile_at(column, 32), Tile::Empty);
        }
        assert_eq!(grid.tile_at(29, 31), Tile::Grass);
        assert_eq!(grid.tile_at(34, 31), Tile::Grass);
    }

    #[test]
    fn platforms_and_pillars_are_stone() {
        let grid = classic();
        for column in 6..12 {
            assert_eq!(grid.tile_at(column, 27), Tile::Stone);
        }
        assert_eq!(grid.tile_at(12, 27), Tile::Empty);

        for row in 28..=30 {
            assert_eq!(grid.tile_at(28, row), Tile::Stone);
        }
        assert_eq!(grid.tile_at(28, 27), Tile::Empty);
        for row in 27..=30 {
            assert_eq!(grid.tile_at(52, row), Tile::Stone);
        }
    }

    #[test]
    fn lava_strip_starts_thirty_columns_from_the_right_edge() {
        let grid = classic();
        for column in 36..42 {
            assert_eq!(grid.tile_at(column, 31), Tile::Lava);
            assert_eq!(grid.tile_at(column, 32), Tile::Lava);
        }
        assert_eq!(grid.tile_at(35, 31), Tile::Grass);
        assert_eq!(grid.tile_at(42, 31), Tile::Grass);
    }

    #[test]
    fn placements_beyond_the_grid_are_clipped() {
        let grid = classic();
        let tiles = grid.tiles().count();
        assert_eq!(tiles, (COLUMNS * ROWS) as usize);
        assert_eq!(grid.tile_at(90, 31), Tile::Empty);
        assert_eq!(grid.tile_at(130, 28), Tile::Empty);
    }

    #[test]
    fn degenerate_grids_generate_without_panicking() {
        let empty = CLASSIC_LAYOUT.build(0, 0, 18);
        assert_eq!(empty.tiles().count(), 0);
        assert_eq!(empty.tile_at(0, 0), Tile::Empty);

        let tiny = CLASSIC_LAYOUT.build(3, 1, 0);
        assert_eq!(tiny.tile_size(), 1);
        assert_eq!(tiny.tile_at(0, 0), Tile::Dirt);
    }

    #[test]
    fn pixel_coordinates_floor_into_tiles() {
        let grid = classic();
        assert_eq!(grid.column_at(0), 0);
        assert_eq!(grid.column_at(17), 0);
        assert_eq!(grid.column_at(18), 1);
        assert_eq!(grid.column_at(-1), -1);
        assert_eq!(grid.row_at(-18), -1);
        assert_eq!(grid.row_at(-19), -2);
    }

    proptest! {
        #[test]
        fn coordinates_outside_the_grid_read_as_empty(
            column in -1_000i32..1_000,
            row in -1_000i32..1_000,
        ) {
            let grid = classic();
            let inside = (0..COLUMNS as i32).contains(&column) && (0..ROWS as i32).contains(&row);
            prop_assume!(!inside);

            prop_assert_eq!(grid.tile_at(column, row), Tile::Empty);
            prop_assert!(!grid.is_solid(column, row));
            prop_assert!(!grid.is_hazard(column, row));
        }
    }
}
