//! Placement validation: fleet composition, bounds and overlap rules.

use rand::Rng;

use crate::config::FleetConfig;
use crate::error::PlacementError;
use crate::grid::{Board, Coord};
use crate::ship::{Fleet, Orientation, Ship, ShipClass};

/// Attempts per ship before random placement gives up.
const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

/// Validate a candidate placement and compute its occupied cells.
///
/// Checks run in order: class quota, bounds, overlap. The returned positions
/// are not committed; the caller writes them through the match state.
pub fn plan(
    config: &FleetConfig,
    fleet: &Fleet,
    class: ShipClass,
    anchor: Coord,
    orientation: Orientation,
    board_size: u8,
) -> Result<Vec<Coord>, PlacementError> {
    let spec = config
        .spec(class)
        .ok_or(PlacementError::FleetExhausted(class))?;
    if fleet.placed_count(class) >= spec.count as usize {
        return Err(PlacementError::FleetExhausted(class));
    }

    let mut positions = Vec::with_capacity(spec.size as usize);
    for i in 0..spec.size as u16 {
        let (x, y) = match orientation {
            Orientation::Horizontal => (anchor.x as u16 + i, anchor.y as u16),
            Orientation::Vertical => (anchor.x as u16, anchor.y as u16 + i),
        };
        if x >= board_size as u16 || y >= board_size as u16 {
            return Err(PlacementError::OutOfBounds);
        }
        positions.push(Coord::new(x as u8, y as u8));
    }

    for ship in fleet.ships() {
        for pos in ship.positions() {
            if positions.contains(pos) {
                return Err(PlacementError::Overlap);
            }
        }
    }

    Ok(positions)
}

/// Setup may only be confirmed with the fleet complete: for every configured
/// class the placed count equals the configured count.
pub fn confirm(config: &FleetConfig, fleet: &Fleet) -> Result<(), PlacementError> {
    for (class, spec) in config.iter() {
        if fleet.placed_count(class) != spec.count as usize {
            return Err(PlacementError::IncompleteFleet(class));
        }
    }
    Ok(())
}

/// Place a full fleet at random, rejection-sampling anchors the way the AI
/// opponent sets up. Writes both the fleet and the board occupancy.
pub fn random_fleet<R: Rng + ?Sized>(
    rng: &mut R,
    config: &FleetConfig,
    board_size: u8,
) -> Result<(Board, Fleet), PlacementError> {
    let mut board = Board::new(board_size);
    let mut fleet = Fleet::new();

    for (class, spec) in config.iter() {
        if spec.size == 0 || spec.size > board_size {
            return Err(PlacementError::OutOfBounds);
        }
        for _ in 0..spec.count {
            let mut attempts = 0;
            loop {
                attempts += 1;
                if attempts > MAX_PLACEMENT_ATTEMPTS {
                    return Err(PlacementError::NoSpace(class));
                }
                let orientation = if rng.random() {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                // Sample anchors that keep the whole ship on the board.
                let max_x = if orientation == Orientation::Horizontal {
                    board_size - spec.size
                } else {
                    board_size - 1
                };
                let max_y = if orientation == Orientation::Vertical {
                    board_size - spec.size
                } else {
                    board_size - 1
                };
                let anchor = Coord::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
                match plan(config, &fleet, class, anchor, orientation, board_size) {
                    Ok(positions) => {
                        let id = fleet.add(Ship::new(class, positions.clone()));
                        for pos in positions {
                            if board.put_ship(pos, id).is_err() {
                                return Err(PlacementError::OutOfBounds);
                            }
                        }
                        break;
                    }
                    Err(PlacementError::Overlap) => continue,
                    Err(err) => return Err(err),
                }
            }
        }
    }

    Ok((board, fleet))
}
