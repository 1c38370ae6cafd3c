
use migration::{Migrator, MigratorTrait};
use phase10_app::ScoreKeeper;
use phase10_core::GameStore;
use phase10_persistence::connection::connect_to_memory_database;
use phase10_persistence::{SnapshotError, SnapshotRepository, decode_state, encode_state};
use phase10_types::{Action, GameStatus, ScoringSession, StoreResponse, StoreState};
use test_helpers::*;

#[tokio::test]
async fn test_round_flow_through_actions() {
    let mut keeper = create_test_keeper();
    let ids = start_game(&mut keeper, &["A", "B"]).await;

    keeper.dispatch(Action::StartScoring).await;
    keeper
        .dispatch(Action::SetPlayerScore {
            player_id: ids[0].clone(),
            score: 45,
            phase_completed: true,
        })
        .await;

    let response = keeper.dispatch(Action::NextPlayer).await;
    assert!(expect_applied(&response));
    let response = keeper.dispatch(Action::NextPlayer).await;
    assert!(!expect_applied(&response));

    keeper
        .dispatch(Action::SetPlayerScore {
            player_id: ids[1].clone(),
            score: 60,
            phase_completed: false,
        })
        .await;
    let response = keeper.dispatch(Action::FinishRound).await;

    let state = expect_state(&response);
    let game = state.current_game.as_ref().unwrap();
    assert_eq!(game.current_round, 2);
    assert_eq!(game.players[0].current_phase, 2);
    assert_eq!(game.players[0].total_score, 45);
    assert_eq!(game.players[1].current_phase, 1);
    assert_eq!(game.players[1].total_score, 60);
    assert!(state.scoring.is_none());
}

#[tokio::test]
async fn test_every_mutation_is_persisted() {
    let mut keeper = create_test_keeper();
    start_game(&mut keeper, &["Alice", "Bob"]).await;
    assert_eq!(keeper.storage().save_count(), 1);

    score_round(&mut keeper, &[(10, true), (20, false)]).await;

    let document = keeper.storage().document(TEST_KEY).unwrap();
    let persisted = decode_state(TEST_KEY, &document).unwrap();
    assert_eq!(&persisted, keeper.store().state());
    assert_eq!(persisted.current_game.unwrap().current_round, 2);
}

#[tokio::test]
async fn test_queries_do_not_write() {
    let mut keeper = create_test_keeper();
    start_game(&mut keeper, &["Alice", "Bob"]).await;
    let saves = keeper.storage().save_count();

    keeper.dispatch(Action::GetState).await;
    keeper.dispatch(Action::Standings).await;
    keeper.dispatch(Action::CanContinue).await;
    keeper.dispatch(Action::SuggestedPlayerNames).await;
    keeper.dispatch(Action::Phases).await;

    assert_eq!(keeper.storage().save_count(), saves);
}

#[tokio::test]
async fn test_declined_action_reports_not_applied() {
    let mut keeper = create_test_keeper();

    let response = keeper.dispatch(Action::EndGame).await;
    assert!(!expect_applied(&response));
    assert!(expect_state(&response).current_game.is_none());

    let response = keeper
        .dispatch(Action::StartNewGame {
            player_names: names(&["Solo"]),
        })
        .await;
    assert!(!expect_applied(&response));

    let response = keeper.dispatch(Action::FinishRound).await;
    assert!(!expect_applied(&response));
    let response = keeper
        .dispatch(Action::ReorderPlayers {
            from_index: 0,
            to_index: 0,
        })
        .await;
    assert!(!expect_applied(&response));
    let response = keeper.dispatch(Action::ClearHistory).await;
    assert!(!expect_applied(&response));

    assert_eq!(keeper.storage().save_count(), 0);
    assert!(keeper.storage().document(TEST_KEY).is_none());
}

#[tokio::test]
async fn test_declined_start_keeps_pending_names() {
    let mut keeper = create_test_keeper();
    keeper
        .dispatch(Action::SetPendingPlayers {
            player_names: names(&["X", "Y"]),
        })
        .await;
    let saves = keeper.storage().save_count();

    keeper
        .dispatch(Action::StartNewGame {
            player_names: names(&["Solo"]),
        })
        .await;

    assert_eq!(
        keeper.store().pending_player_names(),
        Some(names(&["X", "Y"]).as_slice())
    );
    assert_eq!(keeper.storage().save_count(), saves);
}

#[tokio::test]
async fn test_last_player_next_does_not_write() {
    let mut keeper = create_test_keeper();
    start_game(&mut keeper, &["Alice", "Bob"]).await;
    keeper.dispatch(Action::StartScoring).await;
    keeper.dispatch(Action::NextPlayer).await;
    let saves = keeper.storage().save_count();

    let response = keeper.dispatch(Action::NextPlayer).await;
    assert!(!expect_applied(&response));
    assert_eq!(keeper.storage().save_count(), saves);
}

#[tokio::test]
async fn test_dropped_stale_session_is_persisted() {
    let stale = StoreState {
        scoring: Some(ScoringSession {
            game_id: "gone".to_string(),
            current_player_index: 0,
            scores: Vec::new(),
        }),
        ..StoreState::default()
    };
    let document = encode_state(&stale).unwrap();
    let storage = MemoryStorage::with_document(TEST_KEY, &document);
    let mut keeper = ScoreKeeper::restore(storage, TEST_KEY, false).await.unwrap();

    let response = keeper.dispatch(Action::FinishRound).await;
    assert!(!expect_applied(&response));
    assert!(keeper.store().scoring().is_none());

    assert_eq!(keeper.storage().save_count(), 1);
    let persisted = decode_state(TEST_KEY, &keeper.storage().document(TEST_KEY).unwrap()).unwrap();
    assert!(persisted.scoring.is_none());
}

#[tokio::test]
async fn test_start_new_game_normalizes_names_and_clears_pending() {
    let mut keeper = create_test_keeper();
    keeper
        .dispatch(Action::SetPendingPlayers {
            player_names: names(&["X", "Y"]),
        })
        .await;

    let response = keeper
        .dispatch(Action::StartNewGame {
            player_names: names(&[" Alice ", ""]),
        })
        .await;

    let state = expect_state(&response);
    let players: Vec<&str> = state
        .current_game
        .as_ref()
        .unwrap()
        .players
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(players, vec!["Alice", "Player 2"]);
    assert!(state.pending_player_names.is_none());
    assert_eq!(state.last_player_names, names(&["Alice", "Player 2"]));
}

#[tokio::test]
async fn test_play_again_flow() {
    let mut keeper = create_test_keeper();
    start_game(&mut keeper, &["Alice", "Bob", "Carol"]).await;
    keeper.dispatch(Action::EndGame).await;
    let game_id = keeper.store().game_history()[0].id.clone();

    keeper.dispatch(Action::PlayAgain { game_id }).await;

    let response = keeper.dispatch(Action::SuggestedPlayerNames).await;
    assert_eq!(
        response,
        StoreResponse::SuggestedPlayerNames {
            names: names(&["Alice", "Bob", "Carol"]),
        }
    );
}

#[tokio::test]
async fn test_standings_and_phases_queries() {
    let mut keeper = create_test_keeper();
    start_game(&mut keeper, &["Alice", "Bob"]).await;
    score_round(&mut keeper, &[(60, false), (5, true)]).await;

    match keeper.dispatch(Action::Standings).await {
        StoreResponse::Standings { players } => {
            assert_eq!(players[0].name, "Bob");
            assert_eq!(players[1].name, "Alice");
        }
        other => panic!("unexpected response {:?}", other),
    }

    match keeper.dispatch(Action::Phases).await {
        StoreResponse::Phases {
            phases,
            quick_scores,
        } => {
            assert_eq!(phases.len(), 10);
            assert_eq!(quick_scores, vec![5, 10, 15, 20, 25, 50, 75, 100]);
        }
        other => panic!("unexpected response {:?}", other),
    }

    let response = keeper.dispatch(Action::CanContinue).await;
    assert_eq!(response, StoreResponse::CanContinue { can_continue: true });
}

#[tokio::test]
async fn test_malformed_line_is_rejected() {
    let mut keeper = create_test_keeper();

    let response = keeper.handle_line("{\"Nope\":{}}").await;
    assert!(matches!(response, StoreResponse::Error { .. }));

    let response = keeper.handle_line("\"GetState\"").await;
    assert!(matches!(response, StoreResponse::StateUpdate { .. }));
    assert_eq!(keeper.storage().save_count(), 0);
}

#[tokio::test]
async fn test_failed_write_keeps_memory_state() {
    let mut keeper = ScoreKeeper::new(GameStore::new(), MemoryStorage::failing(), TEST_KEY);

    let response = keeper
        .dispatch(Action::StartNewGame {
            player_names: names(&["Alice", "Bob"]),
        })
        .await;

    assert!(expect_applied(&response));
    assert!(keeper.store().current_game().is_some());
    assert!(keeper.storage().document(TEST_KEY).is_none());
}

#[tokio::test]
async fn test_restore_from_previous_session() {
    let mut first = create_test_keeper();
    start_game(&mut first, &["Alice", "Bob"]).await;
    score_round(&mut first, &[(10, true), (20, false)]).await;
    first.dispatch(Action::SaveGameForLater).await;

    let document = first.storage().document(TEST_KEY).unwrap();
    let storage = MemoryStorage::with_document(TEST_KEY, &document);
    let mut second = ScoreKeeper::restore(storage, TEST_KEY, false).await.unwrap();

    assert_eq!(second.store().state(), first.store().state());

    let game_id = second.store().saved_games()[0].id.clone();
    let response = second.dispatch(Action::LoadSavedGame { game_id }).await;
    let game = expect_state(&response).current_game.as_ref().unwrap();
    assert_eq!(game.current_round, 2);
    assert_eq!(game.status, GameStatus::Active);
}

#[tokio::test]
async fn test_corrupt_snapshot_handling() {
    let storage = MemoryStorage::with_document(TEST_KEY, "{broken");
    let result = ScoreKeeper::restore(storage, TEST_KEY, false).await;
    assert!(matches!(result, Err(SnapshotError::Corrupt { .. })));

    let storage = MemoryStorage::with_document(TEST_KEY, "{broken");
    let keeper = ScoreKeeper::restore(storage, TEST_KEY, true).await.unwrap();
    assert!(keeper.store().current_game().is_none());
    assert!(keeper.store().game_history().is_empty());
}

#[tokio::test]
async fn test_sqlite_backed_restart() {
    let db = connect_to_memory_database().await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let mut keeper = ScoreKeeper::restore(SnapshotRepository::new(db), TEST_KEY, false)
        .await
        .unwrap();
    start_game(&mut keeper, &["Alice", "Bob"]).await;
    for _ in 0..10 {
        score_round(&mut keeper, &[(0, true), (30, false)]).await;
    }

    // The tenth completed phase ends the game
    assert!(keeper.store().current_game().is_none());
    let winner = keeper.store().game_history()[0].winning_player().unwrap().name.clone();
    assert_eq!(winner, "Alice");

    let expected = keeper.store().snapshot();
    let restarted = ScoreKeeper::restore(keeper.into_storage(), TEST_KEY, false)
        .await
        .unwrap();
    assert_eq!(restarted.store().state(), &expected);
}
