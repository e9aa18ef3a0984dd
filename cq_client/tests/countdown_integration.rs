//! Integration tests for the tokio countdown driving a quiz controller.
//!
//! Time is paused, so these run instantly while still going through the
//! real interval task and channel.

use country_quiz::{
    Catalog, Feedback, QuizConfig, QuizController, UiEvent,
    render::{MapFill, MapRenderer},
    scores::MemoryStore,
    session::SessionPhase,
    timer::{Countdown, ManualCountdown},
};
use cq_client::{
    countdown::{TICK_PERIOD, TokioCountdown},
    map::CanvasMap,
};
use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc::UnboundedReceiver;

fn quiz(
    total_secs: u32,
) -> (
    QuizController<TokioCountdown, MemoryStore>,
    UnboundedReceiver<()>,
) {
    let config = QuizConfig {
        total_secs,
        ..Default::default()
    };
    let (countdown, ticks) = TokioCountdown::new(TICK_PERIOD);
    let quiz = QuizController::new(
        Arc::new(Catalog::builtin().unwrap()),
        &config,
        countdown,
        MemoryStore::new(),
    );
    (quiz, ticks)
}

// ============================================================================
// Full Session Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_countdown_runs_session_to_the_end() {
    let (mut quiz, mut ticks) = quiz(5);
    quiz.handle(UiEvent::Submit("Canadá".to_string()));
    assert!(quiz.countdown().is_active());

    let mut last = Feedback::None;
    while ticks.recv().await.is_some() {
        last = quiz.handle(UiEvent::Tick);
        if quiz.session().is_over() {
            break;
        }
    }

    assert_eq!(
        last,
        Feedback::GameOver {
            score: 1,
            rank: Some(0)
        }
    );
    assert!(!quiz.countdown().is_active());
    assert_eq!(quiz.leaderboard().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_pause_stops_the_task() {
    let (mut quiz, mut ticks) = quiz(60);
    quiz.handle(UiEvent::Focus);

    ticks.recv().await.unwrap();
    quiz.handle(UiEvent::Tick);
    quiz.handle(UiEvent::Pause);
    assert!(matches!(quiz.phase(), SessionPhase::Paused(_)));
    assert!(!quiz.countdown().is_active());

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(ticks.try_recv().is_err());
    assert_eq!(quiz.session().remaining_secs(), 59);

    quiz.handle(UiEvent::Resume);
    ticks.recv().await.unwrap();
    quiz.handle(UiEvent::Tick);
    assert_eq!(quiz.session().remaining_secs(), 58);
}

#[tokio::test(start_paused = true)]
async fn test_restart_stops_the_task() {
    let (mut quiz, mut ticks) = quiz(60);
    quiz.handle(UiEvent::Focus);
    quiz.handle(UiEvent::Restart);
    assert!(!quiz.countdown().is_active());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(ticks.try_recv().is_err());
}

// ============================================================================
// Renderer Tests
// ============================================================================

#[test]
fn test_map_follows_discoveries() {
    let config = QuizConfig::default();
    let mut quiz = QuizController::new(
        Arc::new(Catalog::builtin().unwrap()),
        &config,
        ManualCountdown::new(),
        MemoryStore::new(),
    );
    let mut map = CanvasMap::new();

    quiz.handle(UiEvent::Submit("Japão".to_string()));
    map.render(quiz.catalog(), quiz.session().discovered());
    let lit: Vec<&str> = map
        .anchors()
        .iter()
        .filter(|anchor| anchor.fill == MapFill::Discovered)
        .map(|anchor| anchor.id.as_str())
        .collect();
    assert_eq!(lit, ["392"]);

    quiz.handle(UiEvent::Restart);
    map.render(quiz.catalog(), quiz.session().discovered());
    assert!(
        map.anchors()
            .iter()
            .all(|anchor| anchor.fill == MapFill::Undiscovered)
    );
}
