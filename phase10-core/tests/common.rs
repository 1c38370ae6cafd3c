#![allow(dead_code)]

use phase10_core::{GameStore, StoreEvent, StoreEventHandler};
use phase10_types::{Game, Player};
use std::sync::{Arc, Mutex};

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|n| n.to_string()).collect()
}

/// Creates a store with a fresh game for the given players
pub fn create_store_with_game(players: &[&str]) -> GameStore {
    let mut store = GameStore::new();
    assert!(store.start_new_game(names(players)));
    store
}

/// Creates a store with a standard two player game
pub fn create_standard_store() -> GameStore {
    create_store_with_game(&["Alice", "Bob"])
}

pub fn current_game(store: &GameStore) -> &Game {
    store.current_game().expect("expected a current game")
}

/// Helper to get a player id by name from the current game
pub fn player_id(store: &GameStore, name: &str) -> String {
    current_game(store)
        .players
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.id.clone())
        .expect("no such player")
}

/// Helper to get player by name
pub fn get_player_by_name<'a>(game: &'a Game, name: &str) -> Option<&'a Player> {
    game.players.iter().find(|p| p.name == name)
}

/// Scores one whole round in seating order. `results` is (score, phase_completed)
/// per seat.
pub fn play_round(store: &mut GameStore, results: &[(u32, bool)]) {
    assert!(store.start_scoring());
    let ids: Vec<String> = current_game(store).players.iter().map(|p| p.id.clone()).collect();
    for (index, (id, (score, completed))) in ids.iter().zip(results).enumerate() {
        assert!(store.set_player_score(id, *score, *completed));
        if index + 1 < ids.len() {
            assert!(store.next_player());
        }
    }
    assert!(!store.next_player());
    assert!(store.finish_round());
}

/// Asserts the per-player invariants that hold after every mutation
pub fn assert_player_invariants(player: &Player) {
    let sum: u32 = player.rounds.iter().map(|r| r.score).sum();
    assert_eq!(
        player.total_score, sum,
        "total score of {} does not match its rounds",
        player.name
    );
    let completed = player.rounds.iter().filter(|r| r.phase_completed).count() as u32;
    assert_eq!(
        player.current_phase,
        1 + completed,
        "phase of {} does not match completed rounds",
        player.name
    );
}

pub fn assert_game_invariants(game: &Game) {
    for player in &game.players {
        assert_player_invariants(player);
        assert_eq!(player.rounds.len() as u32 + 1, game.current_round);
    }
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<StoreEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<StoreEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last_event(&self) -> Option<StoreEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&StoreEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl StoreEventHandler for EventCollector {
    fn handle_event(&mut self, event: StoreEvent) {
        self.events.lock().unwrap().push(event);
    }
}
