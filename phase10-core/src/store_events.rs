use phase10_types::{GameId, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    GameStarted {
        game_id: GameId,
        player_names: Vec<String>,
    },
    GameSaved {
        game_id: GameId,
    },
    GameResumed {
        game_id: GameId,
        displaced: Option<GameId>,
    },
    GameEnded {
        game_id: GameId,
    },
    GameWon {
        game_id: GameId,
        winner: PlayerId,
        rounds_played: u32,
    },
    SavedGameDeleted {
        game_id: GameId,
    },
    SavedGameEnded {
        game_id: GameId,
    },
    ScoringStarted {
        game_id: GameId,
    },
    ScoringCancelled {
        game_id: GameId,
    },
    RoundCommitted {
        game_id: GameId,
        round: u32,
    },
    RoundEdited {
        game_id: GameId,
        player_id: PlayerId,
        round: u32,
    },
    PlayersReordered {
        game_id: GameId,
        from_index: usize,
        to_index: usize,
    },
    HistoryCleared {
        removed: usize,
    },
}

impl StoreEvent {
    pub fn game_id(&self) -> Option<&GameId> {
        match self {
            StoreEvent::GameStarted { game_id, .. }
            | StoreEvent::GameSaved { game_id }
            | StoreEvent::GameResumed { game_id, .. }
            | StoreEvent::GameEnded { game_id }
            | StoreEvent::GameWon { game_id, .. }
            | StoreEvent::SavedGameDeleted { game_id }
            | StoreEvent::SavedGameEnded { game_id }
            | StoreEvent::ScoringStarted { game_id }
            | StoreEvent::ScoringCancelled { game_id }
            | StoreEvent::RoundCommitted { game_id, .. }
            | StoreEvent::RoundEdited { game_id, .. }
            | StoreEvent::PlayersReordered { game_id, .. } => Some(game_id),
            StoreEvent::HistoryCleared { .. } => None,
        }
    }
}

/// Event handler trait for observing store transitions
pub trait StoreEventHandler: Send {
    fn handle_event(&mut self, event: StoreEvent);
}

/// Simple event bus for distributing store events
pub struct StoreEventBus {
    handlers: Vec<Box<dyn StoreEventHandler>>,
}

impl StoreEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn StoreEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: StoreEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for StoreEventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Logs every store event through `tracing`.
pub struct TracingEventHandler;

impl StoreEventHandler for TracingEventHandler {
    fn handle_event(&mut self, event: StoreEvent) {
        match &event {
            StoreEvent::GameWon {
                game_id,
                winner,
                rounds_played,
            } => {
                tracing::info!(%game_id, %winner, rounds_played, "Game won");
            }
            StoreEvent::HistoryCleared { removed } => {
                tracing::info!(removed, "History cleared");
            }
            other => {
                tracing::debug!(game_id = ?other.game_id(), event = ?other, "Store event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct TestHandler {
        events: Arc<Mutex<Vec<StoreEvent>>>,
    }

    impl StoreEventHandler for TestHandler {
        fn handle_event(&mut self, event: StoreEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_event_bus_fans_out() {
        let mut bus = StoreEventBus::new();
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));

        bus.add_handler(Box::new(TestHandler {
            events: first.clone(),
        }));
        bus.add_handler(Box::new(TestHandler {
            events: second.clone(),
        }));

        let event = StoreEvent::GameSaved {
            game_id: "g1".to_string(),
        };
        bus.publish(event.clone());

        assert_eq!(first.lock().unwrap().as_slice(), &[event.clone()]);
        assert_eq!(second.lock().unwrap().as_slice(), &[event]);
    }

    #[test]
    fn test_event_game_id() {
        let event = StoreEvent::RoundCommitted {
            game_id: "g1".to_string(),
            round: 3,
        };
        assert_eq!(event.game_id().map(String::as_str), Some("g1"));
        assert_eq!(StoreEvent::HistoryCleared { removed: 2 }.game_id(), None);
    }

    #[test]
    fn test_tracing_handler_logs_every_event() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut bus = StoreEventBus::new();
            bus.add_handler(Box::new(TracingEventHandler));
            bus.publish(StoreEvent::ScoringStarted {
                game_id: "g1".to_string(),
            });
            bus.publish(StoreEvent::HistoryCleared { removed: 0 });
        });
    }
}
