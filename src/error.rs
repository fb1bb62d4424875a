//! Error taxonomy. Every variant is recoverable: a rejected action leaves
//! the match state untouched and is surfaced to the caller as a message.

use thiserror::Error;

use crate::ability::AbilityKind;
use crate::ship::ShipClass;
use crate::state::Phase;

/// Coordinate access outside the fixed board dimensions.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("coordinate ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfBounds { x: u8, y: u8, size: u8 },
    #[error("board references a ship unknown to the fleet")]
    UnknownShip,
}

/// Match configuration rejected before a match is created.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board size {0} is outside the supported 5-10 range")]
    BoardSize(u8),
    #[error("{0} (size {1}) does not fit on a board of size {2}")]
    ShipTooLong(ShipClass, u8, u8),
}

/// Placement rule violations during setup.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("already deployed all {0} vessels")]
    FleetExhausted(ShipClass),
    #[error("vessel does not fit on the grid in this position")]
    OutOfBounds,
    #[error("vessels cannot overlap")]
    Overlap,
    #[error("all vessels must be deployed (missing: {0})")]
    IncompleteFleet(ShipClass),
    #[error("no space left to place a {0}")]
    NoSpace(ShipClass),
}

/// Turn-order violations during play.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TurnError {
    #[error("awaiting enemy action")]
    NotYourTurn,
    #[error("already fired at this location")]
    AlreadyFired,
}

/// Multi-shot point collection rejections. Either clears the in-progress
/// selection on the caller's side.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("positions must be adjacent and in line")]
    InvalidLine,
    #[error("third position outside grid bounds")]
    OutOfBounds,
}

/// Inbound peer message that cannot be acted on. Logged and discarded; the
/// match continues from its last valid state.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unexpected message type `{0}`")]
    Unexpected(String),
}

/// Umbrella error for match-state transitions.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Turn(#[from] TurnError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("action not available in the {0} phase")]
    Phase(Phase),
    #[error("no {0} ability charges remaining")]
    NoCharges(AbilityKind),
}
