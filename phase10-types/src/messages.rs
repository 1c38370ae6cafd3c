use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameId, PhaseInfo, Player, PlayerId, StoreState};

/// Requests the presentation layer sends to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Action {
    // Game lifecycle
    StartNewGame { player_names: Vec<String> },
    EndGame,
    SaveGameForLater,
    LoadSavedGame { game_id: GameId },
    DeleteSavedGame { game_id: GameId },
    EndSavedGame { game_id: GameId },
    ClearHistory,

    // Play-again carry-over
    SetPendingPlayers { player_names: Vec<String> },
    ClearPendingPlayers,
    PlayAgain { game_id: GameId },

    // Round scoring
    StartScoring,
    SetPlayerScore { player_id: PlayerId, score: u32, phase_completed: bool },
    NextPlayer,
    PreviousPlayer,
    FinishRound,
    CancelScoring,

    // Corrections and ordering
    UpdateRoundScore { player_id: PlayerId, round: u32, score: u32, phase_completed: bool },
    ReorderPlayers { from_index: usize, to_index: usize },

    // Queries
    GetState,
    Standings,
    CanContinue,
    SuggestedPlayerNames,
    Phases,
}

/// Replies sent back to the presentation layer, one per action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum StoreResponse {
    StateUpdate { state: StoreState, applied: bool },
    Advanced { advanced: bool, state: StoreState },
    Standings { players: Vec<Player> },
    CanContinue { can_continue: bool },
    SuggestedPlayerNames { names: Vec<String> },
    Phases { phases: Vec<PhaseInfo>, quick_scores: Vec<u32> },
    Error { message: String },
}
