//! Target selection for the computer opponent.

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::Coord;
use crate::shot::Shot;

/// Fixed for the duration of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

/// Choose the next target given the chooser's own shot history.
///
/// Base rule: uniform over cells not yet fired upon. `Hard` hunts first:
/// if the history holds a hit that has not produced a sunk ship, the
/// candidate set narrows to that hit's in-bounds, unfired orthogonal
/// neighbors, falling back to the base rule when none remain. `None` only
/// when the whole board has been fired at.
pub fn choose_target<R: Rng + ?Sized>(
    rng: &mut R,
    difficulty: Difficulty,
    shots: &[Shot],
    board_size: u8,
) -> Option<Coord> {
    let fired = |c: Coord| shots.iter().any(|s| s.x == c.x && s.y == c.y);

    if difficulty == Difficulty::Hard {
        if let Some(last_hit) = shots.iter().rev().find(|s| s.hit && !s.sunk) {
            let around = [(1, 0), (-1, 0), (0, 1), (0, -1)];
            let candidates: Vec<Coord> = around
                .iter()
                .filter_map(|&(dx, dy)| last_hit.coord().offset(dx, dy, board_size))
                .filter(|&c| !fired(c))
                .collect();
            if !candidates.is_empty() {
                return Some(candidates[rng.random_range(0..candidates.len())]);
            }
        }
    }

    let mut open = Vec::new();
    for y in 0..board_size {
        for x in 0..board_size {
            let c = Coord::new(x, y);
            if !fired(c) {
                open.push(c);
            }
        }
    }
    if open.is_empty() {
        return None;
    }
    Some(open[rng.random_range(0..open.len())])
}
