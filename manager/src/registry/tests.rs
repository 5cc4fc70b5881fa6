use super::*;
use minigames_core::games::handcricket::{BatOrBowl, Parity, Phase};
use minigames_core::games::rps::Choice;
use minigames_core::games::Participant;
use shared::{CreationError, GameType, GameView, MatchSummary, PlayerAction, SessionConfig, UpdateOutcome};
use std::sync::Arc;
use std::time::Duration;

fn human(id: &str) -> Participant {
    Participant::human(id)
}

fn expect_success(outcome: UpdateOutcome) -> GameView {
    match outcome {
        UpdateOutcome::Success(view) => view,
        other => panic!("expected Success, got {other:?}"),
    }
}

fn expect_game_over(outcome: UpdateOutcome) -> MatchSummary {
    match outcome {
        UpdateOutcome::GameOver(summary) => summary,
        other => panic!("expected GameOver, got {other:?}"),
    }
}

// Moves the paused clock and lets any timers that fired run to completion.
// Yields first so freshly armed timers register before the clock moves.
async fn advance(duration: Duration) {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
    tokio::time::advance(duration).await;
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn rps_round_runs_to_game_over() {
    let registry = Arc::new(Registry::new());
    let key = registry
        .create_session(
            GameType::Rps,
            human("a"),
            human("b"),
            SessionConfig::with_key("msg-1"),
        )
        .expect("valid pairing");
    assert_eq!(key, "msg-1");
    assert!(registry.is_active(&key));

    let view = expect_success(
        registry
            .apply_action(&key, "a", PlayerAction::Choose(Choice::Rock))
            .await,
    );
    match view {
        GameView::Rps(rps) => {
            assert_eq!(rps.chosen, [true, false]);
            assert!(rps.revealed.is_none());
        }
        other => panic!("wrong view: {other:?}"),
    }

    let summary = expect_game_over(
        registry
            .apply_action(&key, "b", PlayerAction::Choose(Choice::Scissors))
            .await,
    );
    assert_eq!(summary.winner.as_deref(), Some("a"));

    // Terminal cleanup: the session is gone, later actions see NotFound.
    assert!(!registry.is_active(&key));
    assert!(matches!(
        registry
            .apply_action(&key, "a", PlayerAction::Choose(Choice::Rock))
            .await,
        UpdateOutcome::NotFound
    ));
    assert!(registry.peek(&key).await.is_none());
}

#[tokio::test]
async fn rps_rejections_leave_state_alone() {
    let registry = Arc::new(Registry::new());
    let key = registry
        .create_session(GameType::Rps, human("a"), human("b"), SessionConfig::default())
        .expect("valid pairing");

    registry
        .apply_action(&key, "a", PlayerAction::Choose(Choice::Rock))
        .await;
    assert!(matches!(
        registry
            .apply_action(&key, "a", PlayerAction::Choose(Choice::Paper))
            .await,
        UpdateOutcome::AlreadyChosen
    ));
    assert!(matches!(
        registry
            .apply_action(&key, "intruder", PlayerAction::Choose(Choice::Rock))
            .await,
        UpdateOutcome::NotPlayerInGame
    ));
    // An action for the wrong game type is a protocol violation.
    assert!(matches!(
        registry
            .apply_action(&key, "b", PlayerAction::Place { row: 0, col: 0 })
            .await,
        UpdateOutcome::InvalidMove
    ));
    assert!(registry.is_active(&key));
}

#[tokio::test]
async fn pairing_rules_are_enforced() {
    let registry = Arc::new(Registry::new());
    assert_eq!(
        registry.create_session(
            GameType::Rps,
            human("a"),
            human("a"),
            SessionConfig::default()
        ),
        Err(CreationError::SamePlayer)
    );
    assert_eq!(
        registry.create_session(
            GameType::TicTacToe,
            Participant::bot("cpu1"),
            Participant::bot("cpu2"),
            SessionConfig::default()
        ),
        Err(CreationError::BotPairNotAllowed)
    );
    assert_eq!(
        registry.create_session(
            GameType::HandCricket,
            human("a"),
            Participant::bot("cpu"),
            SessionConfig::default()
        ),
        Err(CreationError::HumansRequired)
    );
    assert_eq!(registry.active_count(), 0);
}

#[tokio::test]
async fn occupied_key_is_a_conflict() {
    let registry = Arc::new(Registry::new());
    registry
        .create_session(
            GameType::Rps,
            human("a"),
            human("b"),
            SessionConfig::with_key("msg-9"),
        )
        .expect("first insert");
    assert_eq!(
        registry.create_session(
            GameType::Rps,
            human("c"),
            human("d"),
            SessionConfig::with_key("msg-9"),
        ),
        Err(CreationError::Conflict)
    );
    // The original session survives the collision.
    assert!(registry.is_active("msg-9"));
    assert_eq!(registry.active_count(), 1);
}

#[tokio::test]
async fn tictactoe_human_round_trip() {
    let registry = Arc::new(Registry::new());
    let key = registry
        .create_session(
            GameType::TicTacToe,
            human("a"),
            human("b"),
            SessionConfig::default(),
        )
        .expect("valid pairing");

    let (x, o) = match registry.peek(&key).await.expect("live session") {
        GameView::TicTacToe(view) => (view.players[0].clone(), view.players[1].clone()),
        other => panic!("wrong view: {other:?}"),
    };

    registry
        .apply_action(&key, &x, PlayerAction::Place { row: 0, col: 0 })
        .await;
    registry
        .apply_action(&key, &o, PlayerAction::Place { row: 1, col: 0 })
        .await;
    registry
        .apply_action(&key, &x, PlayerAction::Place { row: 0, col: 1 })
        .await;
    registry
        .apply_action(&key, &o, PlayerAction::Place { row: 1, col: 1 })
        .await;
    let summary = expect_game_over(
        registry
            .apply_action(&key, &x, PlayerAction::Place { row: 0, col: 2 })
            .await,
    );
    assert_eq!(summary.winner.as_deref(), Some(x.as_str()));
    assert!(!registry.is_active(&key));
}

#[tokio::test]
async fn tictactoe_bot_answers_each_human_move() {
    let registry = Arc::new(Registry::new());
    let key = registry
        .create_session(
            GameType::TicTacToe,
            human("h"),
            Participant::bot("cpu"),
            SessionConfig::default(),
        )
        .expect("valid pairing");

    // If the bot drew the X seat it opens on its own; give that task room.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let view = match registry.peek(&key).await.expect("live session") {
        GameView::TicTacToe(view) => view,
        other => panic!("wrong view: {other:?}"),
    };
    let human_is_x = view.players[0] == "h";
    let marks = view.grid.iter().flatten().filter(|c| c.is_some()).count();
    assert_eq!(marks, usize::from(!human_is_x));

    // Any open cell; the bot must come straight back with its reply.
    let (row, col) = (0..3)
        .flat_map(|r| (0..3).map(move |c| (r, c)))
        .find(|&(r, c)| view.grid[r][c].is_none())
        .expect("open cell");
    let after = expect_success(
        registry
            .apply_action(&key, "h", PlayerAction::Place { row, col })
            .await,
    );
    match after {
        GameView::TicTacToe(view) => {
            let human_mark = if human_is_x {
                minigames_core::games::tictactoe::Mark::X
            } else {
                minigames_core::games::tictactoe::Mark::O
            };
            assert_eq!(view.turn, human_mark, "bot replied and handed back the move");
        }
        other => panic!("wrong view: {other:?}"),
    }
}

#[tokio::test]
async fn bot_against_bot_rps_settles_after_creation() {
    let registry = Arc::new(Registry::new());
    let key = registry
        .create_session(
            GameType::Rps,
            Participant::bot("cpu1"),
            Participant::bot("cpu2"),
            SessionConfig::default(),
        )
        .expect("bots may play each other at this game");

    // Decided already, but still observable until the cleanup task runs.
    assert!(registry.is_active(&key));
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!registry.is_active(&key));
}

#[tokio::test]
async fn hand_cricket_end_to_end() {
    let registry = Arc::new(Registry::new());
    let key = registry
        .create_session(
            GameType::HandCricket,
            human("a"),
            human("b"),
            SessionConfig::default(),
        )
        .expect("valid pairing");

    registry
        .apply_action(&key, "a", PlayerAction::CallParity(Parity::Odd))
        .await;
    registry
        .apply_action(&key, "a", PlayerAction::TossNumber(2))
        .await;
    let view = expect_success(
        registry
            .apply_action(&key, "b", PlayerAction::TossNumber(5))
            .await,
    );
    match view {
        GameView::HandCricket(cricket) => {
            // 2 + 5 = 7 is odd and "a" called odd.
            assert_eq!(cricket.toss_winner.as_deref(), Some("a"));
            assert_eq!(cricket.phase, Phase::RoleChoice);
        }
        other => panic!("wrong view: {other:?}"),
    }

    registry
        .apply_action(&key, "a", PlayerAction::PickRole(BatOrBowl::Bat))
        .await;

    // Equal numbers end the first innings with the score untouched.
    registry
        .apply_action(&key, "a", PlayerAction::PlayNumber(4))
        .await;
    let view = expect_success(
        registry
            .apply_action(&key, "b", PlayerAction::PlayNumber(4))
            .await,
    );
    match view {
        GameView::HandCricket(cricket) => {
            assert_eq!(cricket.phase, Phase::SecondInnings);
            assert_eq!(cricket.scores, [0, 0]);
            assert_eq!(cricket.batter.as_deref(), Some("b"));
            assert_eq!(cricket.target, Some(1));
        }
        other => panic!("wrong view: {other:?}"),
    }

    // Any scoring turn now wins the chase outright.
    registry
        .apply_action(&key, "b", PlayerAction::PlayNumber(3))
        .await;
    let summary = expect_game_over(
        registry
            .apply_action(&key, "a", PlayerAction::PlayNumber(5))
            .await,
    );
    assert_eq!(summary.winner.as_deref(), Some("b"));
    assert!(!registry.is_active(&key));
}

#[tokio::test]
async fn resignation_hands_the_match_to_the_opponent() {
    let registry = Arc::new(Registry::new());
    let key = registry
        .create_session(
            GameType::TicTacToe,
            human("a"),
            human("b"),
            SessionConfig::default(),
        )
        .expect("valid pairing");

    assert!(matches!(
        registry.resign(&key, "stranger").await,
        UpdateOutcome::NotPlayerInGame
    ));
    let summary = expect_game_over(registry.resign(&key, "a").await);
    assert_eq!(summary.winner.as_deref(), Some("b"));
    assert_eq!(summary.reason, "Resignation");
    assert!(matches!(
        registry.resign(&key, "a").await,
        UpdateOutcome::NotFound
    ));
}

#[tokio::test]
async fn remove_is_idempotent() {
    let registry = Arc::new(Registry::new());
    let key = registry
        .create_session(GameType::Rps, human("a"), human("b"), SessionConfig::default())
        .expect("valid pairing");
    assert!(registry.remove(&key));
    assert!(!registry.remove(&key));
    assert!(matches!(
        registry
            .apply_action(&key, "a", PlayerAction::Choose(Choice::Rock))
            .await,
        UpdateOutcome::NotFound
    ));
}

#[tokio::test]
async fn sessions_on_different_keys_progress_together() {
    let registry = Arc::new(Registry::new());
    let k1 = registry
        .create_session(GameType::Rps, human("a"), human("b"), SessionConfig::default())
        .expect("valid pairing");
    let k2 = registry
        .create_session(GameType::Rps, human("c"), human("d"), SessionConfig::default())
        .expect("valid pairing");

    let (one, two) = tokio::join!(
        registry.apply_action(&k1, "a", PlayerAction::Choose(Choice::Rock)),
        registry.apply_action(&k2, "c", PlayerAction::Choose(Choice::Paper)),
    );
    expect_success(one);
    expect_success(two);
    assert_eq!(registry.active_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn idle_sessions_evict_on_their_own_clocks() {
    let registry = Arc::new(Registry::new());
    let rps = registry
        .create_session(GameType::Rps, human("a"), human("b"), SessionConfig::default())
        .expect("valid pairing");
    let cricket = registry
        .create_session(
            GameType::HandCricket,
            human("c"),
            human("d"),
            SessionConfig::default(),
        )
        .expect("valid pairing");

    advance(Duration::from_secs(4 * 60)).await;
    assert!(registry.is_active(&rps));
    assert!(registry.is_active(&cricket));

    advance(Duration::from_secs(2 * 60)).await;
    assert!(!registry.is_active(&rps), "5 minute idle limit passed");
    assert!(registry.is_active(&cricket));

    advance(Duration::from_secs(10 * 60)).await;
    assert!(!registry.is_active(&cricket), "15 minute idle limit passed");
    assert_eq!(registry.active_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn hand_cricket_turns_push_eviction_back() {
    let registry = Arc::new(Registry::new());
    let key = registry
        .create_session(
            GameType::HandCricket,
            human("a"),
            human("b"),
            SessionConfig::default(),
        )
        .expect("valid pairing");

    advance(Duration::from_secs(10 * 60)).await;
    assert!(registry.is_active(&key));

    // A successful action re-arms the 15 minute timer.
    expect_success(
        registry
            .apply_action(&key, "a", PlayerAction::CallParity(Parity::Odd))
            .await,
    );

    advance(Duration::from_secs(10 * 60)).await;
    assert!(registry.is_active(&key), "20 minutes old but only 10 idle");

    advance(Duration::from_secs(6 * 60)).await;
    assert!(!registry.is_active(&key), "16 minutes idle");
}

#[tokio::test(start_paused = true)]
async fn other_games_do_not_refresh_on_activity() {
    let registry = Arc::new(Registry::new());
    let key = registry
        .create_session(GameType::Rps, human("a"), human("b"), SessionConfig::default())
        .expect("valid pairing");

    advance(Duration::from_secs(4 * 60)).await;
    expect_success(
        registry
            .apply_action(&key, "a", PlayerAction::Choose(Choice::Rock))
            .await,
    );

    // The timer still counts from creation.
    advance(Duration::from_secs(90)).await;
    assert!(!registry.is_active(&key));
}
