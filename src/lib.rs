//! Turn-based naval combat engine.
//!
//! The core is a single [`MatchState`] aggregate driven by its transition
//! methods: placement validation, shot and special-ability resolution and
//! win detection. Around it sit a local AI opponent and a remote-peer
//! adapter speaking the JSON message contract, unified behind the
//! [`Opponent`] trait so callers never branch on the opponent kind.

mod ability;
mod ai;
mod config;
mod error;
mod grid;
mod logging;
mod opponent;
mod opponent_ai;
mod opponent_peer;
mod placement;
pub mod protocol;
mod ship;
mod shot;
mod state;
pub mod transport;

pub use ability::*;
pub use ai::*;
pub use config::*;
pub use error::*;
pub use grid::*;
pub use logging::init_logging;
pub use opponent::*;
pub use opponent_ai::*;
pub use opponent_peer::*;
pub use placement::{confirm, plan, random_fleet};
pub use ship::*;
pub use shot::*;
pub use state::*;
pub use transport::Transport;
