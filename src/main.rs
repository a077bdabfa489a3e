use cthulhu_rs::game::card::CardKind;
use cthulhu_rs::game::player::Player;
use cthulhu_rs::game::{Game, GameOptions, Phase};
use cthulhu_rs::stats::StatsLedger;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Upper bound on actions taken before the simulation gives up on a game.
const MAX_ACTIONS: usize = 1000;

fn main() {
    dotenv::dotenv().ok();
    env_logger::try_init().ok();

    let num_players = match std::env::var("CTHULHU_PLAYERS") {
        Err(_) => 5,
        Ok(s) => match s.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                log::error!("CTHULHU_PLAYERS is not a number: {:?}", s);
                return;
            }
        },
    };
    let seed = match std::env::var("CTHULHU_SEED") {
        Err(_) => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default(),
        Ok(s) => match s.parse::<u64>() {
            Ok(seed) => seed,
            Err(_) => {
                log::error!("CTHULHU_SEED is not a number: {:?}", s);
                return;
            }
        },
    };
    log::info!("Simulating a {} player game with seed {}", num_players, seed);

    let mut game = Game::new(GameOptions::default(), seed);
    for i in 0..num_players {
        let player = Player::new(format!("bot{}", i + 1), Some(format!("Bot {}", i + 1)));
        if let Err(err) = game.add_player(player, true) {
            log::error!("Could not seat player: {}", err);
            return;
        }
    }
    if let Err(err) = game.start_game() {
        log::error!("Could not start the game: {}", err);
        return;
    }

    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    for _ in 0..MAX_ACTIONS {
        if game.game_over() {
            break;
        }
        let Some(seat) = game.current_player() else {
            log::error!("Nobody is able to act");
            break;
        };
        let result = match game.phase() {
            Some(Phase::Claims) => {
                // Bots claim honestly
                let hand = game.players()[seat].hand_summary();
                let count = |kind: CardKind| hand.iter().find(|(k, _)| *k == kind).map(|(_, n)| *n).unwrap_or(0);
                game.set_claim(
                    seat,
                    count(CardKind::Blank),
                    count(CardKind::ElderSign),
                    count(CardKind::Cthulhu),
                )
            }
            Some(Phase::Investigation) => {
                let targets = (0..game.players().len())
                    .filter(|&i| i != seat && game.players()[i].is_playing())
                    .filter(|&i| game.players()[i].hand().iter().any(|c| !c.is_face_up()))
                    .collect::<Vec<_>>();
                let Some(&target) = targets.choose(&mut rng) else {
                    log::error!("No player can be investigated");
                    break;
                };
                game.investigate(seat, target, None).map(|_| ())
            }
            None => break,
        };
        if let Err(err) = result {
            log::error!("Bot move was rejected: {}", err);
            break;
        }
    }

    log::debug!("Final board: {}", game.get_board_json());
    let result = match game.end_game() {
        Ok(result) => result,
        Err(err) => {
            log::error!("Could not end the game: {}", err);
            return;
        }
    };
    let mut ledger = StatsLedger::new();
    ledger.record(&result);
    for player in &result.players {
        log::info!("{}: {:?}", player.name, ledger.get(&player.id));
    }
    println!("{}", result.get_result_json());
}
