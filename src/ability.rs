//! Special abilities: kinds, charge bank, area expansion and the
//! multi-shot line derivation.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, SelectionError};
use crate::grid::Coord;
use crate::ship::ShipClass;

/// The three special abilities. Wire names are `scan`, `multiShot`, `bomb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    #[serde(rename = "scan")]
    Scan,
    #[serde(rename = "multiShot")]
    MultiShot,
    #[serde(rename = "bomb")]
    Bomb,
}

impl core::fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            AbilityKind::Scan => "scan",
            AbilityKind::MultiShot => "multiShot",
            AbilityKind::Bomb => "bomb",
        })
    }
}

/// Remaining uses per ability for one side. Wire form of the `abilities`
/// payload: `{"scan":1,"multiShot":1,"bomb":1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeBank {
    pub scan: u8,
    #[serde(rename = "multiShot")]
    pub multi_shot: u8,
    pub bomb: u8,
}

impl Default for ChargeBank {
    fn default() -> Self {
        Self {
            scan: 1,
            multi_shot: 1,
            bomb: 1,
        }
    }
}

impl ChargeBank {
    pub fn remaining(&self, kind: AbilityKind) -> u8 {
        match kind {
            AbilityKind::Scan => self.scan,
            AbilityKind::MultiShot => self.multi_shot,
            AbilityKind::Bomb => self.bomb,
        }
    }

    /// Consume one charge; rejected at zero.
    pub(crate) fn take(&mut self, kind: AbilityKind) -> Result<(), GameError> {
        let slot = match kind {
            AbilityKind::Scan => &mut self.scan,
            AbilityKind::MultiShot => &mut self.multi_shot,
            AbilityKind::Bomb => &mut self.bomb,
        };
        if *slot == 0 {
            return Err(GameError::NoCharges(kind));
        }
        *slot -= 1;
        Ok(())
    }
}

/// A requested ability use, in its wire shape: the `use_special.ability`
/// payload. Multi-shot carries all three positions, third already derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AbilityRequest {
    #[serde(rename = "scan")]
    Scan { position: Coord },
    #[serde(rename = "multiShot")]
    MultiShot { positions: Vec<Coord> },
    #[serde(rename = "bomb")]
    Bomb { position: Coord },
}

impl AbilityRequest {
    pub fn kind(&self) -> AbilityKind {
        match self {
            AbilityRequest::Scan { .. } => AbilityKind::Scan,
            AbilityRequest::MultiShot { .. } => AbilityKind::MultiShot,
            AbilityRequest::Bomb { .. } => AbilityKind::Bomb,
        }
    }

    /// Build a multi-shot request from the two caller-chosen points; the
    /// third is derived, never requested.
    pub fn multi_shot(p0: Coord, p1: Coord, board_size: u8) -> Result<Self, SelectionError> {
        let line = derive_line(p0, p1, board_size)?;
        Ok(AbilityRequest::MultiShot {
            positions: line.to_vec(),
        })
    }
}

/// Result for one cell touched by an ability. Scan cells carry `hasShip`;
/// attack cells carry `hit` and `shipType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityCellResult {
    pub position: Coord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit: Option<bool>,
    #[serde(
        default,
        rename = "hasShip",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_ship: Option<bool>,
    #[serde(
        default,
        rename = "shipType",
        skip_serializing_if = "Option::is_none"
    )]
    pub ship_class: Option<ShipClass>,
}

impl AbilityCellResult {
    pub fn scanned(position: Coord, has_ship: bool) -> Self {
        Self {
            position,
            hit: None,
            has_ship: Some(has_ship),
            ship_class: None,
        }
    }

    pub fn fired(position: Coord, hit: bool, ship_class: Option<ShipClass>) -> Self {
        Self {
            position,
            hit: Some(hit),
            has_ship: None,
            ship_class,
        }
    }
}

/// The 3x3 neighborhood around `center`, clipped to the board.
pub fn scan_area(center: Coord, board_size: u8) -> Vec<Coord> {
    let mut cells = Vec::with_capacity(9);
    for dx in -1i16..=1 {
        for dy in -1i16..=1 {
            if let Some(c) = center.offset(dx, dy, board_size) {
                cells.push(c);
            }
        }
    }
    cells
}

/// The 2x2 block with `anchor` as its top-left corner, clipped to the board.
pub fn bomb_area(anchor: Coord, board_size: u8) -> Vec<Coord> {
    let mut cells = Vec::with_capacity(4);
    for dx in 0i16..=1 {
        for dy in 0i16..=1 {
            if let Some(c) = anchor.offset(dx, dy, board_size) {
                cells.push(c);
            }
        }
    }
    cells
}

/// Derive the full multi-shot line from its first two points.
///
/// The points must share a row or column with unit spacing; the third is
/// the reflection of the first through the second and must stay on the
/// board.
pub fn derive_line(p0: Coord, p1: Coord, board_size: u8) -> Result<[Coord; 3], SelectionError> {
    let dx = p1.x as i16 - p0.x as i16;
    let dy = p1.y as i16 - p0.y as i16;
    if !((dx == 0 && dy.abs() == 1) || (dy == 0 && dx.abs() == 1)) {
        return Err(SelectionError::InvalidLine);
    }
    let p2 = p1
        .offset(dx, dy, board_size)
        .ok_or(SelectionError::OutOfBounds)?;
    Ok([p0, p1, p2])
}
