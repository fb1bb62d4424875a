use armada::{
    choose_target, init_logging, AbilityKind, AbilityRequest, Coord, Difficulty, MatchConfig,
    MatchState, Phase, Side,
};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

/// Seeded AI-vs-AI matches over the full engine, reported as JSON.
#[derive(Parser)]
struct Args {
    #[arg(long, default_value_t = 10)]
    board_size: u8,
    #[arg(long, default_value_t = 1)]
    games: u32,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, value_enum, default_value = "normal")]
    difficulty: Difficulty,
}

/// Spend a charge now and then so abilities get exercised end to end.
fn maybe_ability(rng: &mut SmallRng, state: &MatchState, side: Side) -> Option<AbilityRequest> {
    if !rng.random_bool(0.2) {
        return None;
    }
    let size = state.config().board_size;
    let charges = state.side(side).charges();
    for kind in [AbilityKind::Scan, AbilityKind::Bomb, AbilityKind::MultiShot] {
        if charges.remaining(kind) == 0 {
            continue;
        }
        let anchor = Coord::new(rng.random_range(0..size), rng.random_range(0..size));
        return match kind {
            AbilityKind::Scan => Some(AbilityRequest::Scan { position: anchor }),
            AbilityKind::Bomb => Some(AbilityRequest::Bomb { position: anchor }),
            AbilityKind::MultiShot => {
                let p0 = Coord::new(rng.random_range(0..size - 2), rng.random_range(0..size));
                let p1 = Coord::new(p0.x + 1, p0.y);
                AbilityRequest::multi_shot(p0, p1, size).ok()
            }
        };
    }
    None
}

fn play_one(seed: u64, board_size: u8, difficulty: Difficulty) -> anyhow::Result<(Side, u32)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let config = MatchConfig::with_board_size(board_size)?;
    let mut state = MatchState::new(config)?;

    state.start_local()?;
    state.place_random_fleet(Side::Player, &mut rng)?;
    state.place_random_fleet(Side::Opponent, &mut rng)?;
    state.confirm_fleet(Side::Opponent)?;
    state.confirm_fleet(Side::Player)?;

    let mut turns = 0u32;
    while state.phase() == Phase::Playing {
        turns += 1;
        let side = state.turn();
        if let Some(request) = maybe_ability(&mut rng, &state, side) {
            state.use_ability(side, request)?;
            continue;
        }
        let target = choose_target(
            &mut rng,
            difficulty,
            state.side(side).shots(),
            state.config().board_size,
        )
        .ok_or_else(|| anyhow::anyhow!("no targets left with the match still live"))?;
        state.fire(side, target)?;
    }

    let winner = state
        .winner()
        .ok_or_else(|| anyhow::anyhow!("match ended without a winner"))?;
    log::info!("game finished in {turns} turns, winner {winner:?}");
    Ok((winner, turns))
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let mut player_wins = 0u32;
    let mut opponent_wins = 0u32;
    let mut total_turns = 0u64;

    for game in 0..args.games {
        let (winner, turns) = play_one(
            args.seed.wrapping_add(game as u64),
            args.board_size,
            args.difficulty,
        )?;
        match winner {
            Side::Player => player_wins += 1,
            Side::Opponent => opponent_wins += 1,
        }
        total_turns += turns as u64;
    }

    let result = json!({
        "games": args.games,
        "boardSize": args.board_size,
        "playerWins": player_wins,
        "opponentWins": opponent_wins,
        "avgTurns": total_turns as f64 / args.games.max(1) as f64,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
