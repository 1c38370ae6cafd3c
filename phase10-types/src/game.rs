use crate::{GameId, PlayerId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One player's result for a single committed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundScore {
    pub round: u32,
    pub score: u32,
    pub phase_completed: bool,
    /// Phase the player was on when the round was played. Never recomputed.
    pub phase_attempted: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub current_phase: u32, // 1-10, 11 once all ten phases are done
    pub total_score: u32,
    pub rounds: Vec<RoundScore>,
}

impl Player {
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            current_phase: 1,
            total_score: 0,
            rounds: Vec::new(),
        }
    }

    pub fn completed_phases(&self) -> u32 {
        self.rounds.iter().filter(|r| r.phase_completed).count() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameStatus {
    Active,    // In play or paused in the saved list
    Completed, // Won, ended early, or ended from the saved list
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Game {
    pub id: GameId,
    pub created_at: String, // ISO 8601 string
    pub updated_at: String, // ISO 8601 string
    pub status: GameStatus,
    pub current_round: u32,
    /// Scoring and turn order.
    pub players: Vec<Player>,
    /// Only set when the game ended because a player finished phase 10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub winner: Option<PlayerId>,
}

impl Game {
    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    pub fn player_names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    pub fn winning_player(&self) -> Option<&Player> {
        self.winner.as_deref().and_then(|id| self.player(id))
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }
}
