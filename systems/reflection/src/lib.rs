#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure mirror mapping across the vertical symmetry line.
//!
//! The mirror line sits on the boundary between the last source column and
//! the first player column, so column `symmetry_index - 1 - d` maps to
//! `symmetry_index + d`. This is discrete tile-index mirroring, not a
//! reflection through a column centre.

use reflected_path_core::{GridCoord, GridLayout};

/// Mirror mapping for a grid with a fixed symmetry index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reflection {
    symmetry_index: u32,
    columns: u32,
    rows: u32,
}

impl Reflection {
    /// Creates a mapping for a grid of `columns × rows` tiles mirrored at `symmetry_index`.
    #[must_use]
    pub const fn new(symmetry_index: u32, columns: u32, rows: u32) -> Self {
        Self {
            symmetry_index,
            columns,
            rows,
        }
    }

    /// Creates the mapping that matches the provided layout.
    #[must_use]
    pub const fn for_layout(layout: &GridLayout) -> Self {
        Self::new(layout.symmetry_index(), layout.columns(), layout.rows())
    }

    /// First column of the player side.
    #[must_use]
    pub const fn symmetry_index(&self) -> u32 {
        self.symmetry_index
    }

    /// Maps a source-side coordinate to its player-side mirror image.
    ///
    /// Returns `None` when the input is not on the source side or when the
    /// mirrored column falls off the grid.
    #[must_use]
    pub fn reflect(&self, coord: GridCoord) -> Option<GridCoord> {
        if coord.row() >= self.rows || coord.column() >= self.symmetry_index {
            return None;
        }

        let distance = self.symmetry_index - coord.column() - 1;
        let reflected = self.symmetry_index.checked_add(distance)?;
        (reflected < self.columns).then(|| GridCoord::new(coord.row(), reflected))
    }

    /// Maps a player-side coordinate back to the source coordinate it mirrors.
    #[must_use]
    pub fn mirror(&self, coord: GridCoord) -> Option<GridCoord> {
        if coord.row() >= self.rows
            || coord.column() < self.symmetry_index
            || coord.column() >= self.columns
        {
            return None;
        }

        let distance = coord.column() - self.symmetry_index;
        let source = self.symmetry_index.checked_sub(distance + 1)?;
        Some(GridCoord::new(coord.row(), source))
    }
}
