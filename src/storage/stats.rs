//! Local user statistics: win history and streaks.
//!
//! One JSON record per device holds the whole [`UserStats`] shape. Missing
//! or corrupt records degrade to zeroed defaults instead of erroring, so a
//! damaged file costs the player their history but never the game.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::streak;
use crate::types::GroupColor;

/// Outcome of one completed daily puzzle. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub date: NaiveDate,
    pub won: bool,
    pub mistakes: u32,
    pub completed_at: DateTime<Utc>,
    /// Encoded color grid of the session's guesses, kept for redisplay and
    /// sharing after the session itself is gone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guess_history: Option<Vec<Vec<GroupColor>>>,
}

/// Aggregate stats for the local player.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub games_played: u32,
    pub games_won: u32,
    /// Rounded percentage, 0-100.
    pub win_rate: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    pub last_played_date: Option<NaiveDate>,
    pub game_history: Vec<GameResult>,
}

impl UserStats {
    /// The result recorded for `date`, if the player already finished that
    /// day's puzzle.
    pub fn result_for(&self, date: NaiveDate) -> Option<&GameResult> {
        self.game_history.iter().find(|game| game.date == date)
    }
}

/// Stats gateway contract.
pub trait StatsStore {
    fn get_stats(&self) -> Result<UserStats>;

    /// Record a completed game. Idempotent per calendar day: a second call
    /// for an already-recorded date logs a warning and returns the current
    /// stats unchanged.
    fn record_completion(&self, result: GameResult) -> Result<UserStats>;

    fn reset_stats(&self) -> Result<()>;
}

/// File-backed store keeping the stats record at
/// `{data_dir}/{prefix}-stats.json`.
#[derive(Debug, Clone)]
pub struct LocalStatsStore {
    path: PathBuf,
}

impl LocalStatsStore {
    /// Store for a site's storage prefix, e.g. "filmclues".
    pub fn new(storage_prefix: &str) -> Result<Self> {
        let mut path = super::data_dir()?;
        path.push(format!("{}-stats.json", storage_prefix));
        Ok(Self { path })
    }

    /// Store at an explicit path, for tests and non-standard layouts.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn save(&self, stats: &UserStats) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(stats)?)?;
        Ok(())
    }
}

impl StatsStore for LocalStatsStore {
    fn get_stats(&self) -> Result<UserStats> {
        if !self.path.exists() {
            return Ok(UserStats::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&contents) {
            Ok(stats) => Ok(stats),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "stats record unreadable, starting from defaults"
                );
                Ok(UserStats::default())
            }
        }
    }

    fn record_completion(&self, result: GameResult) -> Result<UserStats> {
        let stats = self.get_stats()?;

        if stats.result_for(result.date).is_some() {
            tracing::warn!(date = %result.date, "game already recorded for this day");
            return Ok(stats);
        }

        let games_played = stats.games_played + 1;
        let games_won = stats.games_won + u32::from(result.won);
        let win_rate = ((games_won as f64 / games_played as f64) * 100.0).round() as u32;

        let current_streak = streak::streak_on(
            result.date,
            stats.last_played_date,
            stats.current_streak,
            result.won,
        );
        let max_streak = stats.max_streak.max(current_streak);

        let last_played_date = Some(result.date);
        let mut game_history = stats.game_history;
        game_history.push(result);

        let updated = UserStats {
            games_played,
            games_won,
            win_rate,
            current_streak,
            max_streak,
            last_played_date,
            game_history,
        };
        self.save(&updated)?;
        Ok(updated)
    }

    fn reset_stats(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
