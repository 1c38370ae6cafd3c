use phase10_types::{Game, GameStatus, PendingScore, RoundScore, ScoringSession};
use tracing::{debug, info, warn};

use crate::{GameStore, RankingEngine, StoreEvent, timestamp_now};

impl GameStore {
    /// Opens a scoring session for the current game with a zero entry per
    /// player. An existing session is replaced.
    pub fn start_scoring(&mut self) -> bool {
        let Some(game) = self.state.current_game.as_ref() else {
            debug!("start_scoring without a current game");
            return false;
        };

        let scores = game
            .players
            .iter()
            .map(|player| PendingScore {
                player_id: player.id.clone(),
                score: 0,
                phase_completed: false,
            })
            .collect();

        let game_id = game.id.clone();
        self.state.scoring = Some(ScoringSession {
            game_id: game_id.clone(),
            current_player_index: 0,
            scores,
        });
        self.event_bus.publish(StoreEvent::ScoringStarted { game_id });
        true
    }

    /// Overwrites one player's pending entry. Does not move the cursor.
    pub fn set_player_score(&mut self, player_id: &str, score: u32, phase_completed: bool) -> bool {
        let Some(session) = self.state.scoring.as_mut() else {
            debug!("set_player_score without a scoring session");
            return false;
        };
        let Some(entry) = session.scores.iter_mut().find(|s| s.player_id == player_id) else {
            debug!("No pending entry for player {}", player_id);
            return false;
        };

        entry.score = score;
        entry.phase_completed = phase_completed;
        true
    }

    /// Moves to the next player. Returns `false` on the last player, where
    /// the caller should finish the round instead.
    pub fn next_player(&mut self) -> bool {
        let (Some(session), Some(game)) = (
            self.state.scoring.as_mut(),
            self.state.current_game.as_ref(),
        ) else {
            return false;
        };

        let next = session.current_player_index + 1;
        if next >= game.players.len() {
            return false;
        }
        session.current_player_index = next;
        true
    }

    pub fn previous_player(&mut self) -> bool {
        let Some(session) = self.state.scoring.as_mut() else {
            return false;
        };
        if session.current_player_index == 0 {
            return false;
        }
        session.current_player_index -= 1;
        true
    }

    /// Commits the pending entries as one round for every player, then
    /// either keeps the game in play or retires it to history with a winner.
    /// The session is gone afterwards in every case.
    pub fn finish_round(&mut self) -> bool {
        let Some(session) = self.state.scoring.take() else {
            debug!("finish_round without a scoring session");
            return false;
        };
        let Some(game) = self.state.current_game.take() else {
            debug!("finish_round without a current game");
            return false;
        };

        if session.game_id != game.id {
            warn!(
                "Discarding scoring session for game {} while game {} is current",
                session.game_id, game.id
            );
            self.state.current_game = Some(game);
            return false;
        }

        let mut game = commit_round(game, &session);
        let round = game.current_round - 1;

        let winner = RankingEngine::check_winner(&game.players).map(|p| p.id.clone());
        match winner {
            Some(winner) => {
                info!("Player {} won game {} in round {}", winner, game.id, round);
                game.status = GameStatus::Completed;
                game.winner = Some(winner.clone());

                self.event_bus.publish(StoreEvent::RoundCommitted {
                    game_id: game.id.clone(),
                    round,
                });
                self.event_bus.publish(StoreEvent::GameWon {
                    game_id: game.id.clone(),
                    winner,
                    rounds_played: round,
                });
                self.state.game_history.insert(0, game);
            }
            None => {
                self.event_bus.publish(StoreEvent::RoundCommitted {
                    game_id: game.id.clone(),
                    round,
                });
                self.state.current_game = Some(game);
            }
        }
        true
    }

    pub fn cancel_scoring(&mut self) -> bool {
        let Some(session) = self.state.scoring.take() else {
            return false;
        };
        self.event_bus.publish(StoreEvent::ScoringCancelled {
            game_id: session.game_id,
        });
        true
    }
}

/// Applies a session's entries to the game as its current round and advances
/// the round counter. Players without an entry are left as they were.
pub fn commit_round(mut game: Game, session: &ScoringSession) -> Game {
    let round = game.current_round;

    for player in &mut game.players {
        let Some(entry) = session.pending(&player.id) else {
            continue;
        };

        let phase_attempted = player.current_phase;
        player.total_score = player.total_score.saturating_add(entry.score);
        if entry.phase_completed {
            player.current_phase += 1;
        }
        player.rounds.push(RoundScore {
            round,
            score: entry.score,
            phase_completed: entry.phase_completed,
            phase_attempted,
        });
    }

    game.current_round += 1;
    game.updated_at = timestamp_now();
    game
}
