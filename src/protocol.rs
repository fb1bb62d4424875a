//! The JSON message contract between the game core and a remote peer's
//! server. Messages are tagged by `type`; payload fields are camelCase.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ability::{AbilityCellResult, AbilityKind, AbilityRequest, ChargeBank};
use crate::config::{AbilityInfo, FleetConfig};
use crate::error::ProtocolError;
use crate::grid::Coord;
use crate::ship::ShipPlacements;
use crate::shot::ShotOutcome;

/// A joinable room as listed by the lobby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    pub room_id: String,
    pub room_name: String,
    #[serde(default)]
    pub players: u8,
}

/// Every message the adapter consumes or produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    // -- lobby ------------------------------------------------------------
    #[serde(rename_all = "camelCase")]
    Connected { player_id: String },
    GetRooms,
    RoomsList { rooms: Vec<RoomInfo> },
    #[serde(rename_all = "camelCase")]
    CreateRoom { room_name: String },
    #[serde(rename_all = "camelCase")]
    RoomCreated { room_id: String, room_name: String },
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String },
    #[serde(rename_all = "camelCase")]
    RoomJoined { room_id: String, room_name: String },
    LeaveRoom,
    Error { message: String },

    // -- setup ------------------------------------------------------------
    #[serde(rename_all = "camelCase")]
    SetupPhase {
        board_size: u8,
        ships_to_place: FleetConfig,
    },
    PlaceShips { ships: ShipPlacements },
    ShipsPlaced { message: String },
    #[serde(rename_all = "camelCase")]
    GameStarted {
        your_turn: bool,
        opponent_id: String,
        abilities: ChargeBank,
        special_abilities: BTreeMap<AbilityKind, AbilityInfo>,
    },

    // -- play -------------------------------------------------------------
    FireShot { position: Coord },
    #[serde(rename_all = "camelCase")]
    ShotResult {
        result: ShotOutcome,
        your_turn: bool,
        game_over: bool,
    },
    #[serde(rename_all = "camelCase")]
    OpponentShot {
        result: ShotOutcome,
        your_turn: bool,
        game_over: bool,
    },
    UseSpecial { ability: AbilityRequest },
    #[serde(rename_all = "camelCase")]
    AbilityResult {
        results: Vec<AbilityCellResult>,
        ability_type: AbilityKind,
        your_turn: bool,
        game_over: bool,
    },
    #[serde(rename_all = "camelCase")]
    OpponentAbility {
        results: Vec<AbilityCellResult>,
        ability_type: AbilityKind,
        your_turn: bool,
        game_over: bool,
    },

    // -- teardown ---------------------------------------------------------
    #[serde(rename_all = "camelCase")]
    GameOver {
        opponent_ships: ShipPlacements,
        winner: bool,
    },
    PlayAgain,
    OpponentLeft,
    RoomExpired { message: String },
}

impl Message {
    /// The wire `type` tag, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Connected { .. } => "connected",
            Message::GetRooms => "get_rooms",
            Message::RoomsList { .. } => "rooms_list",
            Message::CreateRoom { .. } => "create_room",
            Message::RoomCreated { .. } => "room_created",
            Message::JoinRoom { .. } => "join_room",
            Message::RoomJoined { .. } => "room_joined",
            Message::LeaveRoom => "leave_room",
            Message::Error { .. } => "error",
            Message::SetupPhase { .. } => "setup_phase",
            Message::PlaceShips { .. } => "place_ships",
            Message::ShipsPlaced { .. } => "ships_placed",
            Message::GameStarted { .. } => "game_started",
            Message::FireShot { .. } => "fire_shot",
            Message::ShotResult { .. } => "shot_result",
            Message::OpponentShot { .. } => "opponent_shot",
            Message::UseSpecial { .. } => "use_special",
            Message::AbilityResult { .. } => "ability_result",
            Message::OpponentAbility { .. } => "opponent_ability",
            Message::GameOver { .. } => "game_over",
            Message::PlayAgain => "play_again",
            Message::OpponentLeft => "opponent_left",
            Message::RoomExpired { .. } => "room_expired",
        }
    }
}

/// Serialize a message to its wire form.
pub fn encode(msg: &Message) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(msg)?)
}

/// Parse one wire message. Malformed input is a [`ProtocolError`] the
/// caller logs and discards without touching match state.
pub fn decode(raw: &str) -> Result<Message, ProtocolError> {
    Ok(serde_json::from_str(raw)?)
}
