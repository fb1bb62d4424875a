//! Shot resolution: hit/miss detection, per-ship sunk checks and the
//! all-ships-sunk match-over signal.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GridError, TurnError};
use crate::grid::{Board, Cell, Coord};
use crate::ship::{Fleet, ShipClass};

/// One entry of a side's append-only shot history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shot {
    pub x: u8,
    pub y: u8,
    pub hit: bool,
    #[serde(rename = "shipType")]
    pub ship_class: Option<ShipClass>,
    pub sunk: bool,
}

impl Shot {
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

/// Wire-shaped result of a single resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotOutcome {
    pub position: Coord,
    pub hit: bool,
    #[serde(rename = "shipType")]
    pub ship_class: Option<ShipClass>,
    pub sunk: bool,
}

impl ShotOutcome {
    pub fn as_shot(&self) -> Shot {
        Shot {
            x: self.position.x,
            y: self.position.y,
            hit: self.hit,
            ship_class: self.ship_class,
            sunk: self.sunk,
        }
    }
}

/// Resolve one shot against the defender's board and fleet.
///
/// Rejects `Hit`/`Miss` targets with `AlreadyFired` before touching
/// anything. The sunk and match-over checks treat the target as already
/// applied, so they hold regardless of write ordering.
pub(crate) fn resolve(
    board: &mut Board,
    fleet: &Fleet,
    target: Coord,
) -> Result<(ShotOutcome, bool), GameError> {
    let cell = board.cell(target)?;
    if cell.fired() {
        return Err(TurnError::AlreadyFired.into());
    }

    let (hit, ship_class, sunk) = match cell {
        Cell::Ship(id) => {
            let ship = fleet.ship(id).ok_or(GridError::UnknownShip)?;
            (true, Some(ship.class()), ship.is_sunk(board, Some(target)))
        }
        _ => (false, None, false),
    };

    board.apply_shot(target, hit)?;
    let fleet_sunk = hit && fleet.all_sunk(board, Some(target));

    Ok((
        ShotOutcome {
            position: target,
            hit,
            ship_class,
            sunk,
        },
        fleet_sunk,
    ))
}
