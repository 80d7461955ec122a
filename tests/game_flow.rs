//! End-to-end flows through the public API: play a full day, record it,
//! and render the share block.

use chrono::{NaiveDate, Utc};
use tempfile::TempDir;

use xclues::session::{GameSession, SubmitOutcome};
use xclues::share::{self, ShareInput};
use xclues::storage::stats::{GameResult, LocalStatsStore, StatsStore};
use xclues::types::{Difficulty, GameStatus, Group, GroupColor, Item, ItemId, Puzzle};

fn item(id: ItemId) -> Item {
    Item {
        id,
        title: format!("Item {}", id),
        year: None,
        artist: None,
    }
}

fn group(
    id: &str,
    ids: std::ops::RangeInclusive<ItemId>,
    difficulty: Difficulty,
    color: GroupColor,
) -> Group {
    Group {
        id: id.to_string(),
        items: ids.map(item).collect(),
        connection: format!("Connection {}", id),
        difficulty,
        color,
    }
}

fn fixture_puzzle() -> Puzzle {
    Puzzle {
        id: "2025-12-04-films".to_string(),
        items: (1..=16).map(item).collect(),
        groups: vec![
            group("g1", 1..=4, Difficulty::Easy, GroupColor::Yellow),
            group("g2", 5..=8, Difficulty::Medium, GroupColor::Green),
            group("g3", 9..=12, Difficulty::Hard, GroupColor::Blue),
            group("g4", 13..=16, Difficulty::Hardest, GroupColor::Purple),
        ],
        created_at: Utc::now(),
    }
}

fn puzzle_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 4).unwrap()
}

fn submit(session: &mut GameSession, ids: [ItemId; 4]) -> SubmitOutcome {
    session.deselect_all();
    for id in ids {
        session.select_item(id);
    }
    session.submit_guess()
}

fn play_group(session: &mut GameSession, ids: [ItemId; 4]) {
    match submit(session, ids) {
        SubmitOutcome::Matched(plan) => {
            for cue in &plan.cues {
                session.mark_item_jumping(plan.generation, cue.item_id);
            }
            session.finalize_reveal(plan.generation);
        }
        other => panic!("expected a match for {:?}, got {:?}", ids, other),
    }
}

#[test]
fn test_winning_day_is_recorded_and_shareable() {
    let puzzle = fixture_puzzle();
    puzzle
        .validate()
        .expect("fixture must satisfy the board invariant");

    let mut session = GameSession::new();
    session.initialize(&puzzle.items, &puzzle.groups, puzzle_date());

    // One near miss, then all four groups.
    assert_eq!(
        submit(&mut session, [5, 6, 7, 9]),
        SubmitOutcome::Mismatch {
            one_away: true,
            lost: false
        }
    );
    play_group(&mut session, [1, 2, 3, 4]);
    play_group(&mut session, [5, 6, 7, 8]);
    play_group(&mut session, [13, 14, 15, 16]);
    play_group(&mut session, [9, 10, 11, 12]);

    assert_eq!(session.status(), GameStatus::Won);
    assert_eq!(session.mistakes(), 1);

    let history = share::guesses_to_color_history(session.previous_guesses(), session.groups());
    assert_eq!(history.len(), 5);
    assert_eq!(
        history[0],
        vec![
            GroupColor::Green,
            GroupColor::Green,
            GroupColor::Green,
            GroupColor::Blue
        ]
    );

    let dir = TempDir::new().unwrap();
    let store = LocalStatsStore::with_path(dir.path().join("filmclues-stats.json"));
    let result = GameResult {
        date: puzzle_date(),
        won: true,
        mistakes: session.mistakes(),
        completed_at: Utc::now(),
        guess_history: Some(history.clone()),
    };
    let stats = store.record_completion(result.clone()).unwrap();
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.games_won, 1);
    assert_eq!(stats.current_streak, 1);

    // Recording the same day again does not double-count.
    let again = store.record_completion(result).unwrap();
    assert_eq!(again.games_played, 1);
    assert_eq!(again.game_history.len(), 1);

    let text = share::generate_share_text(&ShareInput {
        site_name: "Filmclues",
        puzzle_date: puzzle_date(),
        guess_history: &history,
        domain: "filmclues.space",
    });
    assert!(text.starts_with("Filmclues - December 4, 2025\n"));
    assert!(text.ends_with("Play: https://filmclues.space"));
    assert_eq!(text.lines().count(), 2 + history.len());
}

#[test]
fn test_losing_day_reveals_the_solution() {
    let puzzle = fixture_puzzle();
    let mut session = GameSession::new();
    session.initialize(&puzzle.items, &puzzle.groups, puzzle_date());

    for guess in [
        [1, 2, 5, 6],
        [3, 4, 7, 8],
        [9, 10, 13, 14],
        [11, 12, 15, 16],
    ] {
        submit(&mut session, guess);
    }

    assert_eq!(session.status(), GameStatus::Lost);
    assert_eq!(session.found_groups().len(), 4);
    assert!(session.items().is_empty());

    let dir = TempDir::new().unwrap();
    let store = LocalStatsStore::with_path(dir.path().join("filmclues-stats.json"));
    let stats = store
        .record_completion(GameResult {
            date: puzzle_date(),
            won: false,
            mistakes: session.mistakes(),
            completed_at: Utc::now(),
            guess_history: Some(share::guesses_to_color_history(
                session.previous_guesses(),
                session.groups(),
            )),
        })
        .unwrap();

    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.games_won, 0);
    assert_eq!(stats.win_rate, 0);
    assert_eq!(stats.current_streak, 0);
}

#[test]
fn test_restored_day_uses_the_persisted_history() {
    let puzzle = fixture_puzzle();
    let dir = TempDir::new().unwrap();
    let store = LocalStatsStore::with_path(dir.path().join("filmclues-stats.json"));

    let history = vec![vec![GroupColor::Yellow; 4], vec![GroupColor::Green; 4]];
    store
        .record_completion(GameResult {
            date: puzzle_date(),
            won: true,
            mistakes: 2,
            completed_at: Utc::now(),
            guess_history: Some(history.clone()),
        })
        .unwrap();

    // Next launch on the same day: the session is rebuilt for display only.
    let stats = store.get_stats().unwrap();
    let recorded = stats.result_for(puzzle_date()).expect("recorded today");

    let mut session = GameSession::new();
    session.restore_completed(&puzzle.groups, recorded.won, recorded.mistakes);

    assert_eq!(session.status(), GameStatus::Won);
    assert_eq!(session.found_groups().len(), 4);
    assert!(session.previous_guesses().is_empty());

    // The share grid comes from the persisted result, never the session.
    let persisted = recorded.guess_history.as_ref().expect("history kept");
    assert_eq!(persisted, &history);
    let text = share::generate_share_text(&ShareInput {
        site_name: "Filmclues",
        puzzle_date: puzzle_date(),
        guess_history: persisted,
        domain: "filmclues.space",
    });
    assert_eq!(text.lines().count(), 4);
}
