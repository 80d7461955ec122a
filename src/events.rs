//! Domain events emitted by the game session.
//!
//! The session appends an event on every transition; the composing layer
//! drains them with [`crate::session::GameSession::drain_events`] and
//! forwards them to whatever telemetry sink the deployment wires up. Game
//! logic never talks to a tracking service directly.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::Difficulty;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A four-item guess was evaluated, correct or not.
    GuessSubmitted {
        puzzle_date: Option<NaiveDate>,
        correct: bool,
        mistake_count: u32,
        was_one_away: bool,
    },
    /// A group was committed to the found list.
    GroupFound {
        puzzle_date: Option<NaiveDate>,
        /// 1-based discovery position.
        group_index: usize,
        difficulty: Difficulty,
        mistakes_so_far: u32,
    },
    GameWon {
        puzzle_date: Option<NaiveDate>,
        mistakes: u32,
        groups_found: usize,
    },
    GameLost {
        puzzle_date: Option<NaiveDate>,
        mistakes: u32,
        /// Groups the player had actually solved before the loss reveal.
        groups_found: usize,
    },
    ItemsShuffled {
        puzzle_date: Option<NaiveDate>,
    },
}
