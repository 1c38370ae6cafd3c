use crate::{Game, ScoringSession};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Everything the store owns. Doubles as the persisted snapshot document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoreState {
    pub current_game: Option<Game>,
    pub saved_games: Vec<Game>,
    /// Completed games, newest first.
    pub game_history: Vec<Game>,
    pub scoring: Option<ScoringSession>,
    pub last_player_names: Vec<String>,
    pub pending_player_names: Option<Vec<String>>,
}
