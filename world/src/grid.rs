use std::time::Duration;

use reflected_path_core::{GridCoord, GridLayout, ScreenPoint, TileState};

use crate::tile::Tile;

/// Fixed rectangular grid holding exactly one tile per coordinate.
#[derive(Clone, Debug)]
pub struct Grid {
    layout: GridLayout,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Builds an empty grid from the layout, storing tiles in row-major order.
    #[must_use]
    pub fn new(layout: GridLayout, transition: Duration) -> Self {
        let tiles = (0..layout.rows())
            .flat_map(|row| (0..layout.columns()).map(move |column| GridCoord::new(row, column)))
            .map(|coord| Tile::new(coord, layout.tile_rect(coord), transition))
            .collect();

        Self { layout, tiles }
    }

    /// Geometry the grid was built from.
    #[must_use]
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Tile at `coord`, or `None` when the coordinate is out of bounds.
    #[must_use]
    pub fn tile(&self, coord: GridCoord) -> Option<&Tile> {
        self.index(coord).and_then(|index| self.tiles.get(index))
    }

    /// Mutable tile at `coord`, or `None` when the coordinate is out of bounds.
    pub fn tile_mut(&mut self, coord: GridCoord) -> Option<&mut Tile> {
        self.index(coord).and_then(|index| self.tiles.get_mut(index))
    }

    /// All tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Coordinate of the tile under `point`, if any.
    #[must_use]
    pub fn hit_test(&self, point: ScreenPoint) -> Option<GridCoord> {
        self.tiles
            .iter()
            .find(|tile| tile.is_clicked(point))
            .map(Tile::coord)
    }

    /// Reports whether `coord` lies on the player half of the grid.
    #[must_use]
    pub const fn is_player_side(&self, coord: GridCoord) -> bool {
        self.layout.is_player_side(coord)
    }

    /// Clears every tile to [`TileState::Empty`] without animation.
    pub fn reset_all(&mut self) {
        for tile in &mut self.tiles {
            tile.set_state(TileState::Empty, Duration::ZERO, true);
        }
    }

    /// Advances every running color transition to `now`.
    pub fn update_animations(&mut self, now: Duration) {
        for tile in &mut self.tiles {
            tile.update_animation(now);
        }
    }

    fn index(&self, coord: GridCoord) -> Option<usize> {
        if !self.layout.contains(coord) {
            return None;
        }
        let row = usize::try_from(coord.row()).ok()?;
        let column = usize::try_from(coord.column()).ok()?;
        let columns = usize::try_from(self.layout.columns()).ok()?;
        Some(row * columns + column)
    }
}
