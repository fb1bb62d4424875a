//! Board model: coordinates, cell states and the grid itself.

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// A board coordinate. `x` is the column, `y` the row, both zero-based
/// from the top-left corner, matching the wire `{x, y}` objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Offset by a signed delta, `None` when the result leaves `[0, size)`.
    pub fn offset(self, dx: i16, dy: i16, size: u8) -> Option<Coord> {
        let x = self.x as i16 + dx;
        let y = self.y as i16 + dy;
        if x < 0 || y < 0 || x >= size as i16 || y >= size as i16 {
            return None;
        }
        Some(Coord::new(x as u8, y as u8))
    }
}

impl core::fmt::Display for Coord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Identifies a placed ship within a [`crate::Fleet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShipId(u16);

impl ShipId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u16)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// State of a single board cell. Transitions only move forward: `Empty`
/// becomes `Ship` during setup; `Empty`/`Ship`/scan marks become `Hit` or
/// `Miss` during play; `Hit` and `Miss` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Ship(ShipId),
    Hit,
    Miss,
    ScanShip,
    ScanEmpty,
}

impl Cell {
    /// True for `Hit` and `Miss`: the only states that block another shot.
    pub fn fired(self) -> bool {
        matches!(self, Cell::Hit | Cell::Miss)
    }
}

/// A square grid of cells, sized once at match start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(size: u8) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size as usize * size as usize],
        }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.size && coord.y < self.size
    }

    fn index(&self, coord: Coord) -> Result<usize, GridError> {
        if !self.in_bounds(coord) {
            return Err(GridError::OutOfBounds {
                x: coord.x,
                y: coord.y,
                size: self.size,
            });
        }
        Ok(coord.y as usize * self.size as usize + coord.x as usize)
    }

    pub fn cell(&self, coord: Coord) -> Result<Cell, GridError> {
        Ok(self.cells[self.index(coord)?])
    }

    /// True when `Hit`/`Miss` already occupies the cell.
    pub fn fired(&self, coord: Coord) -> bool {
        matches!(self.cell(coord), Ok(c) if c.fired())
    }

    /// Setup-phase writer: record one cell of a placed ship.
    pub(crate) fn put_ship(&mut self, coord: Coord, id: ShipId) -> Result<(), GridError> {
        let idx = self.index(coord)?;
        self.cells[idx] = Cell::Ship(id);
        Ok(())
    }

    /// Play-phase writer: record a resolved shot. Overwrites ship, empty and
    /// scan marks; callers reject re-fires at `Hit`/`Miss` before this point.
    pub(crate) fn apply_shot(&mut self, coord: Coord, hit: bool) -> Result<(), GridError> {
        let idx = self.index(coord)?;
        self.cells[idx] = if hit { Cell::Hit } else { Cell::Miss };
        Ok(())
    }

    /// Play-phase writer: record scan knowledge. Never downgrades a resolved
    /// `Hit`/`Miss` back to a scan mark.
    pub(crate) fn mark_scan(&mut self, coord: Coord, has_ship: bool) -> Result<(), GridError> {
        let idx = self.index(coord)?;
        if self.cells[idx].fired() {
            return Ok(());
        }
        self.cells[idx] = if has_ship { Cell::ScanShip } else { Cell::ScanEmpty };
        Ok(())
    }
}
