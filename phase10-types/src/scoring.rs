use crate::{GameId, PlayerId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A player's score for the round being entered, not yet committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PendingScore {
    pub player_id: PlayerId,
    pub score: u32,
    pub phase_completed: bool,
}

/// Round-scoring session. Lives between `start_scoring` and
/// `finish_round`/`cancel_scoring` and is bound to the game it was opened on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringSession {
    pub game_id: GameId,
    pub current_player_index: usize,
    pub scores: Vec<PendingScore>,
}

impl ScoringSession {
    pub fn pending(&self, player_id: &str) -> Option<&PendingScore> {
        self.scores.iter().find(|s| s.player_id == player_id)
    }
}
