//! Ending the game and the read-only views of it

use super::super::card::CardKind;
use super::super::player::Role;
use super::super::GameStatus;
use super::test_utils::*;
use crate::error::GameError;
use crate::game::WinCondition;

#[test]
fn cannot_end_an_unstarted_game() {
    let mut game = create_unstarted_game(5, 0);
    assert_eq!(game.end_game().map(|_| ()), Err(GameError::GameNotInProgress));
    assert_eq!(game.status(), GameStatus::Unstarted);
}

#[test]
fn ending_a_won_game_reports_the_roster() {
    let mut game = create_standard_5_player_game();
    set_all_blank(&mut game);
    claim_all(&mut game);
    let holder = flashlight_holder(&game);
    let target = game.next_player(holder);
    game.players[target].hand_mut()[4] = card(CardKind::Cthulhu);
    game.investigate(holder, target, Some(4)).unwrap();

    let result = game.end_game().unwrap();

    assert_eq!(game.status(), GameStatus::Ended);
    assert_eq!(game.phase(), None);
    assert_eq!(result.outcome, Some(WinCondition::CthulhuRevealed));
    assert_eq!(result.winner, Some(Role::Cultist));
    assert_eq!(result.rounds, 1);
    assert_eq!(result.players.len(), 5);
    for (player, entry) in game.active_players().zip(&result.players) {
        assert_eq!(player.id(), entry.id);
        assert_eq!(player.role(), Some(entry.role));
        assert_eq!(result.player_has_won(&entry.id), entry.role == Role::Cultist);
    }
}

#[test]
fn nothing_happens_after_the_game_ends() {
    let mut game = create_standard_5_player_game();
    let holder = flashlight_holder(&game);
    game.end_game().unwrap();

    assert_eq!(game.set_claim(holder, 0, 0, 0), Err(GameError::GameNotInProgress));
    assert_eq!(game.investigate(holder, 0, None), Err(GameError::GameNotInProgress));
    assert_eq!(game.end_game().map(|_| ()), Err(GameError::GameNotInProgress));
    assert_eq!(game.start_game(), Err(GameError::AlreadyStarted));
}

#[test]
fn abandoned_game_has_no_winner() {
    let mut game = create_standard_5_player_game();
    let result = game.end_game().unwrap();

    assert_eq!(result.winner, None);
    assert!(!result.player_has_won("Player0"));
}

#[test]
fn board_json_hides_face_down_cards() {
    let mut game = create_standard_5_player_game();
    set_all_blank(&mut game);
    game.players[0].hand_mut()[1].flip_up();

    let board = game.get_board_json();
    let hand = &board["players"][0]["hand"];

    assert_eq!(board["round"], 1);
    assert_eq!(board["state"]["type"], "claims");
    assert_eq!(hand[0]["faceUp"], false);
    assert!(hand[0].get("kind").is_none());
    assert_eq!(hand[1]["kind"], "Blank");
    assert_eq!(board["outcome"]["finished"], false);
}

#[test]
fn player_json_shows_own_hand_and_role() {
    let game = create_standard_5_player_game();
    let view = game.get_player_json(2);

    assert_eq!(view["id"], "Player2");
    assert_eq!(view["role"], game.players()[2].role().unwrap().to_string());
    assert!(view["hand"][0].get("kind").is_some());
    assert!(view["players"][2]["hand"][0].get("kind").is_some());
    assert!(view["players"][3]["hand"][0].get("kind").is_none());
}

#[test]
fn result_json_names_the_winner() {
    let mut game = create_standard_5_player_game();
    set_all_blank(&mut game);
    for seat in 0..5 {
        game.players[seat].hand_mut()[0].flip_up();
        game.players[seat].hand_mut()[1] = face_up(CardKind::ElderSign);
    }
    game.new_turn().unwrap();
    let json = game.end_game().unwrap().get_result_json();

    assert_eq!(json["winner"], "Investigator");
    assert_eq!(json["outcome"], "ElderSignsFound");
    assert_eq!(json["players"].as_array().map(|p| p.len()), Some(5));
}
