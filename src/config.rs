//! Match configuration: board size, fleet composition and ability charges.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ability::{AbilityKind, ChargeBank};
use crate::error::ConfigError;
use crate::ship::ShipClass;

pub const MIN_BOARD_SIZE: u8 = 5;
pub const MAX_BOARD_SIZE: u8 = 10;
pub const DEFAULT_BOARD_SIZE: u8 = 10;

/// Size and permitted count for one ship class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipSpec {
    pub size: u8,
    pub count: u8,
}

/// The ships a side must place, keyed by class. Wire form of the
/// `setup_phase.shipsToPlace` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FleetConfig(pub BTreeMap<ShipClass, ShipSpec>);

impl FleetConfig {
    pub fn spec(&self, class: ShipClass) -> Option<ShipSpec> {
        self.0.get(&class).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShipClass, ShipSpec)> + '_ {
        self.0.iter().map(|(&c, &s)| (c, s))
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        FleetConfig(BTreeMap::from([
            (ShipClass::Battleship, ShipSpec { size: 4, count: 1 }),
            (ShipClass::Cruiser, ShipSpec { size: 3, count: 2 }),
            (ShipClass::Destroyer, ShipSpec { size: 2, count: 3 }),
            (ShipClass::Submarine, ShipSpec { size: 1, count: 4 }),
        ]))
    }
}

/// Everything a match is parameterized on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    pub board_size: u8,
    pub ships: FleetConfig,
    pub charges: ChargeBank,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            ships: FleetConfig::default(),
            charges: ChargeBank::default(),
        }
    }
}

impl MatchConfig {
    /// Default fleet and charges on a custom board size.
    pub fn with_board_size(board_size: u8) -> Result<Self, ConfigError> {
        let config = Self {
            board_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        for (class, spec) in self.ships.iter() {
            if spec.size == 0 || spec.size > self.board_size {
                return Err(ConfigError::ShipTooLong(class, spec.size, self.board_size));
            }
        }
        Ok(())
    }
}

/// Display metadata for one ability, carried in `game_started`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityInfo {
    pub name: String,
    pub description: String,
}

/// The stock ability descriptions.
pub fn ability_catalog() -> BTreeMap<AbilityKind, AbilityInfo> {
    BTreeMap::from([
        (
            AbilityKind::Scan,
            AbilityInfo {
                name: "Radar Scan".into(),
                description: "Reveals a 3x3 area on the opponent's board".into(),
            },
        ),
        (
            AbilityKind::MultiShot,
            AbilityInfo {
                name: "Triple Shot".into(),
                description: "Fire 3 shots in a row".into(),
            },
        ),
        (
            AbilityKind::Bomb,
            AbilityInfo {
                name: "Bomb Strike".into(),
                description: "Attack a 2x2 area".into(),
            },
        ),
    ])
}
