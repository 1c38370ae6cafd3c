use phase10_types::{
    Game, GameStatus, MAX_PLAYERS, MIN_PLAYERS, Player, ScoringSession, StoreState,
};
use tracing::{debug, info, warn};

use crate::{
    RankingEngine, StoreEvent, StoreEventBus, StoreEventHandler, generate_id, timestamp_now,
};

/// Owner of every game plus the round-scoring session.
///
/// Actions never fail. One that cannot apply (no current game, unknown id,
/// out-of-range index) leaves the state untouched and returns `false`;
/// callers read the state to see what happened.
pub struct GameStore {
    pub(crate) state: StoreState,
    pub(crate) event_bus: StoreEventBus,
}

impl GameStore {
    pub fn new() -> Self {
        Self::from_state(StoreState::default())
    }

    /// Rehydrates a store from a previously taken snapshot.
    pub fn from_state(state: StoreState) -> Self {
        Self {
            state,
            event_bus: StoreEventBus::new(),
        }
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn StoreEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn snapshot(&self) -> StoreState {
        self.state.clone()
    }

    pub fn current_game(&self) -> Option<&Game> {
        self.state.current_game.as_ref()
    }

    pub fn saved_games(&self) -> &[Game] {
        &self.state.saved_games
    }

    pub fn game_history(&self) -> &[Game] {
        &self.state.game_history
    }

    pub fn scoring(&self) -> Option<&ScoringSession> {
        self.state.scoring.as_ref()
    }

    pub fn last_player_names(&self) -> &[String] {
        &self.state.last_player_names
    }

    pub fn pending_player_names(&self) -> Option<&[String]> {
        self.state.pending_player_names.as_deref()
    }

    pub fn can_continue(&self) -> bool {
        self.current_game().is_some_and(Game::is_active)
    }

    /// Current game's players in ranked order; empty without a game.
    pub fn standings(&self) -> Vec<Player> {
        self.current_game()
            .map(|game| RankingEngine::rank_players(&game.players))
            .unwrap_or_default()
    }

    /// Names to pre-fill the setup form with.
    pub fn suggested_player_names(&self) -> Vec<String> {
        if let Some(pending) = self.pending_player_names() {
            if pending.len() >= MIN_PLAYERS {
                return pending.to_vec();
            }
        }
        if self.state.last_player_names.len() >= MIN_PLAYERS {
            return self.state.last_player_names.clone();
        }
        vec![String::new(); MIN_PLAYERS]
    }

    pub fn start_new_game(&mut self, player_names: Vec<String>) -> bool {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_names.len()) {
            warn!(
                "Declining new game with {} players (allowed {}..={})",
                player_names.len(),
                MIN_PLAYERS,
                MAX_PLAYERS
            );
            return false;
        }

        let now = timestamp_now();
        let players = player_names
            .iter()
            .map(|name| Player::new(generate_id(), name.clone()))
            .collect();

        let game = Game {
            id: generate_id(),
            created_at: now.clone(),
            updated_at: now,
            status: GameStatus::Active,
            current_round: 1,
            players,
            winner: None,
        };

        if let Some(previous) = &self.state.current_game {
            debug!("Replacing current game {} without saving it", previous.id);
        }

        info!("Starting game {} with {} players", game.id, player_names.len());
        self.event_bus.publish(StoreEvent::GameStarted {
            game_id: game.id.clone(),
            player_names: player_names.clone(),
        });

        self.state.current_game = Some(game);
        self.state.scoring = None;
        self.state.last_player_names = player_names;
        true
    }

    pub fn end_game(&mut self) -> bool {
        let Some(mut game) = self.state.current_game.take() else {
            debug!("end_game without a current game");
            return false;
        };

        game.status = GameStatus::Completed;
        game.updated_at = timestamp_now();

        info!(
            "Ending game {} after {} rounds",
            game.id,
            game.current_round.saturating_sub(1)
        );
        self.event_bus.publish(StoreEvent::GameEnded {
            game_id: game.id.clone(),
        });

        self.state.game_history.insert(0, game);
        self.state.scoring = None;
        true
    }

    pub fn save_game_for_later(&mut self) -> bool {
        let Some(mut game) = self.state.current_game.take() else {
            debug!("save_game_for_later without a current game");
            return false;
        };

        game.updated_at = timestamp_now();

        info!("Saving game {} for later", game.id);
        self.event_bus.publish(StoreEvent::GameSaved {
            game_id: game.id.clone(),
        });

        self.state.saved_games.retain(|g| g.id != game.id);
        self.state.saved_games.insert(0, game);
        self.state.scoring = None;
        true
    }

    /// Resumes a saved game. A game already in play is parked in the saved
    /// list first.
    pub fn load_saved_game(&mut self, game_id: &str) -> bool {
        let Some(position) = self.state.saved_games.iter().position(|g| g.id == game_id) else {
            debug!("No saved game {}", game_id);
            return false;
        };

        let game = self.state.saved_games.remove(position);
        let displaced = self.state.current_game.take().map(|mut current| {
            current.updated_at = timestamp_now();
            let id = current.id.clone();
            self.state.saved_games.insert(0, current);
            id
        });

        info!("Resuming saved game {}", game.id);
        self.event_bus.publish(StoreEvent::GameResumed {
            game_id: game.id.clone(),
            displaced,
        });

        self.state.current_game = Some(game);
        self.state.scoring = None;
        true
    }

    pub fn delete_saved_game(&mut self, game_id: &str) -> bool {
        let before = self.state.saved_games.len();
        self.state.saved_games.retain(|g| g.id != game_id);
        if self.state.saved_games.len() == before {
            debug!("No saved game {} to delete", game_id);
            return false;
        }

        info!("Deleted saved game {}", game_id);
        self.event_bus.publish(StoreEvent::SavedGameDeleted {
            game_id: game_id.to_string(),
        });
        true
    }

    /// Moves a saved game straight into history. No winner is recorded since
    /// nobody finished phase 10.
    pub fn end_saved_game(&mut self, game_id: &str) -> bool {
        let Some(position) = self.state.saved_games.iter().position(|g| g.id == game_id) else {
            debug!("No saved game {} to end", game_id);
            return false;
        };

        let mut game = self.state.saved_games.remove(position);
        game.status = GameStatus::Completed;
        game.updated_at = timestamp_now();

        info!("Ended saved game {}", game.id);
        self.event_bus.publish(StoreEvent::SavedGameEnded {
            game_id: game.id.clone(),
        });

        self.state.game_history.insert(0, game);
        true
    }

    pub fn clear_history(&mut self) -> bool {
        let removed = self.state.game_history.len();
        if removed == 0 {
            return false;
        }

        self.state.game_history.clear();
        self.event_bus.publish(StoreEvent::HistoryCleared { removed });
        true
    }

    pub fn set_pending_player_names(&mut self, player_names: Vec<String>) -> bool {
        self.state.pending_player_names = Some(player_names);
        true
    }

    pub fn clear_pending_player_names(&mut self) -> bool {
        self.state.pending_player_names.take().is_some()
    }

    /// Carries the players of a finished game over to the next setup.
    pub fn play_again(&mut self, game_id: &str) -> bool {
        let Some(game) = self.state.game_history.iter().find(|g| g.id == game_id) else {
            debug!("No finished game {} to play again", game_id);
            return false;
        };

        let names = game.player_names();
        self.set_pending_player_names(names)
    }

    /// Corrects a committed round, then rebuilds the player's total and
    /// phase from the full round list. `phase_attempted` stays as recorded.
    pub fn update_round_score(
        &mut self,
        player_id: &str,
        round: u32,
        score: u32,
        phase_completed: bool,
    ) -> bool {
        let Some(game) = self.state.current_game.as_mut() else {
            debug!("update_round_score without a current game");
            return false;
        };
        let Some(player) = game.player_mut(player_id) else {
            debug!("No player {} in the current game", player_id);
            return false;
        };
        let Some(entry) = player.rounds.iter_mut().find(|r| r.round == round) else {
            debug!("Player {} has no round {}", player_id, round);
            return false;
        };

        entry.score = score;
        entry.phase_completed = phase_completed;
        recompute_player(player);
        game.updated_at = timestamp_now();

        let game_id = game.id.clone();
        self.event_bus.publish(StoreEvent::RoundEdited {
            game_id,
            player_id: player_id.to_string(),
            round,
        });
        true
    }

    /// Swaps two seats in the scoring order.
    pub fn reorder_players(&mut self, from_index: usize, to_index: usize) -> bool {
        let Some(game) = self.state.current_game.as_mut() else {
            return false;
        };
        let count = game.players.len();
        if from_index >= count || to_index >= count || from_index == to_index {
            debug!(
                "Ignoring reorder {} -> {} for {} players",
                from_index, to_index, count
            );
            return false;
        }

        game.players.swap(from_index, to_index);
        game.updated_at = timestamp_now();

        let game_id = game.id.clone();
        self.event_bus.publish(StoreEvent::PlayersReordered {
            game_id,
            from_index,
            to_index,
        });
        true
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Total is the sum of all rounds, phase is one past the number of
/// completed rounds.
pub(crate) fn recompute_player(player: &mut Player) {
    player.total_score = player
        .rounds
        .iter()
        .fold(0u32, |sum, r| sum.saturating_add(r.score));
    player.current_phase = 1 + player.completed_phases();
}

/// Trims setup names, filling blanks with "Player N".
pub fn normalize_player_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                format!("Player {}", index + 1)
            } else {
                trimmed.to_string()
            }
        })
        .collect()
}
