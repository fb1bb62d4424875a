//! Fleet model: ship classes, placed ships and whole-fleet sunk checks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::grid::{Board, Cell, Coord, ShipId};

/// Fleet class of a ship. Serialized in lowercase, matching the wire
/// `shipType` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipClass {
    Carrier,
    Battleship,
    Cruiser,
    Destroyer,
    Submarine,
}

impl ShipClass {
    pub fn label(self) -> &'static str {
        match self {
            ShipClass::Carrier => "carrier",
            ShipClass::Battleship => "battleship",
            ShipClass::Cruiser => "cruiser",
            ShipClass::Destroyer => "destroyer",
            ShipClass::Submarine => "submarine",
        }
    }
}

impl core::fmt::Display for ShipClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A placed ship: its class and the ordered, contiguous cells it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    class: ShipClass,
    positions: Vec<Coord>,
}

impl Ship {
    pub(crate) fn new(class: ShipClass, positions: Vec<Coord>) -> Self {
        Self { class, positions }
    }

    pub fn class(&self) -> ShipClass {
        self.class
    }

    pub fn positions(&self) -> &[Coord] {
        &self.positions
    }

    /// Sunk iff every position reads `Hit` on the owning board. `pending`
    /// is the shot being resolved right now, counted as already applied so
    /// the check and the board write are logically one step.
    pub fn is_sunk(&self, board: &Board, pending: Option<Coord>) -> bool {
        self.positions
            .iter()
            .all(|&p| Some(p) == pending || matches!(board.cell(p), Ok(Cell::Hit)))
    }
}

/// All placed ships of one side, addressed by [`ShipId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.index())
    }

    /// Number of placed ships of the given class.
    pub fn placed_count(&self, class: ShipClass) -> usize {
        self.ships.iter().filter(|s| s.class == class).count()
    }

    pub(crate) fn add(&mut self, ship: Ship) -> ShipId {
        let id = ShipId::new(self.ships.len());
        self.ships.push(ship);
        id
    }

    /// True when every ship of every class is sunk. Vacuously false for an
    /// empty fleet so an unplaced side can never end the match.
    pub fn all_sunk(&self, board: &Board, pending: Option<Coord>) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(|s| s.is_sunk(board, pending))
    }
}

/// Wire form of a fleet: class mapped to its placed ships, each a bare list
/// of positions. Payload of `place_ships` and `game_over.opponentShips`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipPlacements(pub BTreeMap<ShipClass, Vec<PlacedShip>>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedShip {
    pub positions: Vec<Coord>,
}

impl From<&Fleet> for ShipPlacements {
    fn from(fleet: &Fleet) -> Self {
        let mut map: BTreeMap<ShipClass, Vec<PlacedShip>> = BTreeMap::new();
        for ship in fleet.ships() {
            map.entry(ship.class()).or_default().push(PlacedShip {
                positions: ship.positions().to_vec(),
            });
        }
        ShipPlacements(map)
    }
}

impl ShipPlacements {
    /// Rebuild a fleet and its board occupancy from the wire form.
    pub fn into_fleet(self, board: &mut Board) -> Result<Fleet, GridError> {
        let mut fleet = Fleet::new();
        for (class, ships) in self.0 {
            for placed in ships {
                let id = fleet.add(Ship::new(class, placed.positions.clone()));
                for pos in placed.positions {
                    board.put_ship(pos, id)?;
                }
            }
        }
        Ok(fleet)
    }
}
