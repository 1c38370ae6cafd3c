use phase10_core::{GameStore, StoreEventHandler, normalize_player_names};
use phase10_persistence::{SnapshotError, SnapshotStorage, load_state, save_state};
use phase10_types::{Action, QUICK_SCORES, StoreResponse, phases};
use tracing::{debug, error, warn};

/// Runs actions against the store and writes a snapshot after each one
/// that may have changed it.
pub struct ScoreKeeper<S: SnapshotStorage> {
    store: GameStore,
    storage: S,
    storage_key: String,
}

impl<S: SnapshotStorage> ScoreKeeper<S> {
    pub fn new(store: GameStore, storage: S, storage_key: impl Into<String>) -> Self {
        Self {
            store,
            storage,
            storage_key: storage_key.into(),
        }
    }

    /// Rehydrates from storage. A snapshot that no longer decodes is either
    /// dropped in favour of an empty store or reported, per `discard_corrupt`.
    pub async fn restore(
        storage: S,
        storage_key: impl Into<String>,
        discard_corrupt: bool,
    ) -> Result<Self, SnapshotError> {
        let storage_key = storage_key.into();
        let state = match load_state(&storage, &storage_key).await {
            Ok(state) => state,
            Err(err @ SnapshotError::Corrupt { .. }) if discard_corrupt => {
                warn!("Discarding unreadable snapshot: {}", err);
                Default::default()
            }
            Err(err) => return Err(err),
        };

        debug!(
            "Restored {} saved and {} finished games",
            state.saved_games.len(),
            state.game_history.len()
        );
        Ok(Self::new(GameStore::from_state(state), storage, storage_key))
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn StoreEventHandler>) {
        self.store.add_event_handler(handler);
    }

    /// Decodes one JSON action and dispatches it.
    pub async fn handle_line(&mut self, line: &str) -> StoreResponse {
        match serde_json::from_str::<Action>(line) {
            Ok(action) => self.dispatch(action).await,
            Err(e) => {
                warn!("Rejecting malformed action: {}", e);
                StoreResponse::Error {
                    message: format!("Invalid action: {}", e),
                }
            }
        }
    }

    /// Applies one action. The snapshot is only rewritten when the action
    /// changed state; queries and declined actions never touch storage.
    pub async fn dispatch(&mut self, action: Action) -> StoreResponse {
        let (response, changed) = self.apply(action);
        if changed {
            self.persist().await;
        }
        response
    }

    fn apply(&mut self, action: Action) -> (StoreResponse, bool) {
        let store = &mut self.store;
        let applied = match action {
            Action::StartNewGame { player_names } => {
                let player_names = normalize_player_names(&player_names);
                let started = store.start_new_game(player_names);
                if started {
                    store.clear_pending_player_names();
                }
                started
            }
            Action::EndGame => store.end_game(),
            Action::SaveGameForLater => store.save_game_for_later(),
            Action::LoadSavedGame { game_id } => store.load_saved_game(&game_id),
            Action::DeleteSavedGame { game_id } => store.delete_saved_game(&game_id),
            Action::EndSavedGame { game_id } => store.end_saved_game(&game_id),
            Action::ClearHistory => store.clear_history(),
            Action::SetPendingPlayers { player_names } => {
                store.set_pending_player_names(player_names)
            }
            Action::ClearPendingPlayers => store.clear_pending_player_names(),
            Action::PlayAgain { game_id } => store.play_again(&game_id),
            Action::StartScoring => store.start_scoring(),
            Action::SetPlayerScore {
                player_id,
                score,
                phase_completed,
            } => store.set_player_score(&player_id, score, phase_completed),
            Action::NextPlayer => {
                let advanced = store.next_player();
                let response = StoreResponse::Advanced {
                    advanced,
                    state: store.snapshot(),
                };
                return (response, advanced);
            }
            Action::PreviousPlayer => store.previous_player(),
            Action::FinishRound => {
                // A declined finish still drops a stale session
                let had_session = store.scoring().is_some();
                let committed = store.finish_round();
                let changed = committed || (had_session && store.scoring().is_none());
                let response = StoreResponse::StateUpdate {
                    state: store.snapshot(),
                    applied: committed,
                };
                return (response, changed);
            }
            Action::CancelScoring => store.cancel_scoring(),
            Action::UpdateRoundScore {
                player_id,
                round,
                score,
                phase_completed,
            } => store.update_round_score(&player_id, round, score, phase_completed),
            Action::ReorderPlayers {
                from_index,
                to_index,
            } => store.reorder_players(from_index, to_index),
            Action::GetState => {
                let response = StoreResponse::StateUpdate {
                    state: store.snapshot(),
                    applied: true,
                };
                return (response, false);
            }
            Action::Standings => {
                return (
                    StoreResponse::Standings {
                        players: store.standings(),
                    },
                    false,
                );
            }
            Action::CanContinue => {
                return (
                    StoreResponse::CanContinue {
                        can_continue: store.can_continue(),
                    },
                    false,
                );
            }
            Action::SuggestedPlayerNames => {
                return (
                    StoreResponse::SuggestedPlayerNames {
                        names: store.suggested_player_names(),
                    },
                    false,
                );
            }
            Action::Phases => {
                return (
                    StoreResponse::Phases {
                        phases: phases(),
                        quick_scores: QUICK_SCORES.to_vec(),
                    },
                    false,
                );
            }
        };

        let response = StoreResponse::StateUpdate {
            state: store.snapshot(),
            applied,
        };
        (response, applied)
    }

    /// Fire-and-forget from the caller's side: a failed write is logged and
    /// the in-memory state stays authoritative.
    async fn persist(&self) {
        if let Err(e) = save_state(&self.storage, &self.storage_key, self.store.state()).await {
            error!("Failed to write snapshot '{}': {}", self.storage_key, e);
        }
    }
}
