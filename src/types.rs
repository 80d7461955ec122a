//! Core data model for the daily puzzle.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Items on a fresh board.
pub const PUZZLE_SIZE: usize = 16;
/// Hidden groups per puzzle.
pub const GROUP_COUNT: usize = 4;
/// Items in each group.
pub const GROUP_SIZE: usize = 4;

pub type ItemId = i64;

/// An entry to classify: a film, song, athlete or book depending on the
/// deployment genre. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

/// Ordinal difficulty of a group within its puzzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Hardest,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Hardest => "hardest",
        };
        write!(f, "{}", s)
    }
}

/// Display color of a group. Bijective with difficulty across the four
/// groups of a puzzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    Yellow,
    Green,
    Blue,
    Purple,
}

impl std::fmt::Display for GroupColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GroupColor::Yellow => "yellow",
            GroupColor::Green => "green",
            GroupColor::Blue => "blue",
            GroupColor::Purple => "purple",
        };
        write!(f, "{}", s)
    }
}

/// A hidden category of four items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub items: Vec<Item>,
    /// Human-readable rationale, e.g. "Directed by Tarantino".
    pub connection: String,
    pub difficulty: Difficulty,
    pub color: GroupColor,
}

impl Group {
    /// Item ids of this group, sorted ascending for tuple comparison.
    pub fn sorted_item_ids(&self) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = self.items.iter().map(|item| item.id).collect();
        ids.sort_unstable();
        ids
    }

    pub fn contains_item(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }
}

/// A day's puzzle as delivered by the puzzle gateway. Immutable for the
/// session; keyed externally by date and genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: String,
    pub items: Vec<Item>,
    pub groups: Vec<Group>,
    pub created_at: DateTime<Utc>,
}

impl Puzzle {
    /// Check the authoring invariant: four groups of four whose items are
    /// exactly the sixteen board items, pairwise disjoint. Fixtures and
    /// authoring tools call this; the game loop trusts its inputs.
    pub fn validate(&self) -> Result<()> {
        if self.groups.len() != GROUP_COUNT {
            return Err(Error::InvalidPuzzle(format!(
                "expected {} groups, got {}",
                GROUP_COUNT,
                self.groups.len()
            )));
        }
        if self.items.len() != PUZZLE_SIZE {
            return Err(Error::InvalidPuzzle(format!(
                "expected {} items, got {}",
                PUZZLE_SIZE,
                self.items.len()
            )));
        }

        let mut grouped: HashSet<ItemId> = HashSet::new();
        for group in &self.groups {
            if group.items.len() != GROUP_SIZE {
                return Err(Error::InvalidPuzzle(format!(
                    "group {} has {} items",
                    group.id,
                    group.items.len()
                )));
            }
            for item in &group.items {
                if !grouped.insert(item.id) {
                    return Err(Error::InvalidPuzzle(format!(
                        "item {} appears in more than one group",
                        item.id
                    )));
                }
            }
        }

        let board: HashSet<ItemId> = self.items.iter().map(|item| item.id).collect();
        if board.len() != PUZZLE_SIZE {
            return Err(Error::InvalidPuzzle("duplicate item ids on the board".into()));
        }
        if board != grouped {
            return Err(Error::InvalidPuzzle(
                "group items do not cover the board exactly".into(),
            ));
        }
        Ok(())
    }
}

/// Session lifecycle. Transitions only run forward: playing ends in won or
/// lost, and a terminal session never resumes.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}
