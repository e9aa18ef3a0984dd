/// Integration tests for leaderboard persistence on disk
///
/// Each test uses its own scratch directory under the system temp dir.
use std::{fs, path::PathBuf, sync::Arc};

use chrono::Utc;
use country_quiz::{
    Catalog, QuizConfig, QuizController, UiEvent,
    scores::{FileStore, KeyValueStore, MAX_SCORES, SCORES_KEY, ScoreBoard, ScoreRecord},
    timer::ManualCountdown,
};

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("country_quiz_it_{}", uuid::Uuid::new_v4()))
}

#[test]
fn test_scores_survive_reload() {
    let dir = scratch_dir();

    {
        let mut board = ScoreBoard::load(FileStore::new(&dir), MAX_SCORES);
        board.record(ScoreRecord::new(12, Utc::now())).unwrap();
        board.record(ScoreRecord::new(30, Utc::now())).unwrap();
    }

    let board = ScoreBoard::load(FileStore::new(&dir), MAX_SCORES);
    let scores: Vec<usize> = board.history().records().iter().map(|r| r.score).collect();
    assert_eq!(scores, [30, 12]);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_corrupt_file_is_recovered_as_empty() {
    let dir = scratch_dir();
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{SCORES_KEY}.json")), "[{\"score\": oops").unwrap();

    let mut board = ScoreBoard::load(FileStore::new(&dir), MAX_SCORES);
    assert!(board.history().is_empty());

    // The next save replaces the corrupt blob.
    board.record(ScoreRecord::new(3, Utc::now())).unwrap();
    let blob = FileStore::new(&dir).get(SCORES_KEY).unwrap().unwrap();
    assert!(blob.starts_with("[{\"score\":3"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_smaller_capacity_trims_loaded_history() {
    let dir = scratch_dir();
    {
        let mut board = ScoreBoard::load(FileStore::new(&dir), MAX_SCORES);
        for score in 0..8 {
            board.record(ScoreRecord::new(score, Utc::now())).unwrap();
        }
    }

    let board = ScoreBoard::load(FileStore::new(&dir), 3);
    let scores: Vec<usize> = board.history().records().iter().map(|r| r.score).collect();
    assert_eq!(scores, [7, 6, 5]);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_controller_game_over_writes_file() {
    let dir = scratch_dir();
    let config = QuizConfig {
        total_secs: 1,
        data_dir: dir.clone(),
        ..Default::default()
    };

    let mut quiz = QuizController::new(
        Arc::new(Catalog::builtin().unwrap()),
        &config,
        ManualCountdown::new(),
        FileStore::new(&config.data_dir),
    );
    quiz.handle(UiEvent::Submit("Islândia".to_string()));
    quiz.handle(UiEvent::Tick);
    drop(quiz);

    let board = ScoreBoard::load(FileStore::new(&dir), MAX_SCORES);
    assert_eq!(board.history().best().unwrap().score, 1);

    let _ = fs::remove_dir_all(dir);
}
