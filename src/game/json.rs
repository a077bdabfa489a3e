use super::card::Card;
use super::player::Player;
use super::{Game, GameResult, Phase};
use serde_json::{json, Value};

impl Game {
    /// The public view of the table: what everyone at the table can see.
    pub fn get_board_json(&self) -> Value {
        json!({
            "status": self.status(),
            "state": self.get_board_state_json(),
            "round": self.round,
            "turn": self.turn,
            "players": self.get_players_json(None),
            "spectators": self.spectators().map(|p| p.display_name()).collect::<Vec<_>>(),
            "drawPile": self.deck.count(),
            "discardPile": self.deck.discard().iter().map(|c| self.get_card_json(c, true)).collect::<Vec<_>>(),
            "outcome": self.get_outcome_json()
        })
    }

    /// The view of the table for one participant, which includes their own role and hand.
    pub fn get_player_json(&self, player: usize) -> Value {
        let idx = player;
        let Some(player) = self.players.get(idx) else {
            return Value::Null;
        };

        json!({
            "id": player.id(),
            "name": player.display_name(),
            "role": player.role().map(|r| r.to_string()),
            "hand": player.hand().iter().map(|c| self.get_card_json(c, true)).collect::<Vec<_>>(),
            "canClaim": player.can_claim(),
            "isCurrent": self.current_player() == Some(idx),
            "players": self.get_players_json(Some(idx))
        })
    }

    pub fn get_outcome_json(&self) -> Value {
        let Some(outcome) = self.outcome else {
            return json!({ "finished": false });
        };
        json!({
            "finished": true,
            "outcome": outcome.to_string(),
            "winner": outcome.winner().to_string()
        })
    }

    fn get_board_state_json(&self) -> Value {
        match self.phase() {
            None => json!({ "type": self.status() }),
            Some(Phase::Claims) => json!({
                "type": "claims",
                "claimant": self.current_player()
            }),
            Some(Phase::Investigation) => json!({
                "type": "investigation",
                "investigator": self.current_player()
            }),
        }
    }

    fn get_players_json(&self, viewer: Option<usize>) -> Value {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, player)| player.is_playing())
            .map(|(index, player)| {
                let own_hand = viewer == Some(index);
                json!({
                    "seat": index,
                    "id": player.id(),
                    "name": player.display_name(),
                    "hasFlashlight": player.has_flashlight(),
                    "hand": player.hand().iter().map(|c| self.get_card_json(c, own_hand)).collect::<Vec<_>>(),
                    "claim": self.get_claim_json(player)
                })
            })
            .collect()
    }

    fn get_claim_json(&self, player: &Player) -> Value {
        let Some(claim) = player.claim() else {
            return Value::Null;
        };
        json!({
            "blank": claim.blank,
            "elderSign": claim.elder_sign,
            "cthulhu": claim.cthulhu
        })
    }

    /// Face-down cards only show their kind to someone allowed to see it.
    fn get_card_json(&self, card: &Card, omniscient: bool) -> Value {
        if !card.is_face_up() && !omniscient {
            return json!({ "faceUp": false });
        }
        let info = self.catalog.card_info(card.kind()).ok();
        json!({
            "faceUp": card.is_face_up(),
            "kind": card.kind().to_string(),
            "symbol": info.map(|i| i.symbol)
        })
    }
}

impl GameResult {
    pub fn get_result_json(&self) -> Value {
        json!({
            "players": self.players,
            "outcome": self.outcome.map(|o| o.to_string()),
            "winner": self.winner.map(|r| r.to_string()),
            "rounds": self.rounds,
            "endedAt": self.ended_at.format("%+").to_string()
        })
    }
}
