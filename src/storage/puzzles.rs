//! Daily puzzle gateway: pre-authored puzzles fetched by date and genre.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config::Genre;
use crate::error::Result;
use crate::types::Puzzle;

/// Puzzle gateway contract. `Ok(None)` means no puzzle is published for
/// that date and genre; the caller degrades to a non-playable state.
pub trait PuzzleStore {
    fn get_daily_puzzle(&self, date: NaiveDate, genre: Genre) -> Result<Option<Puzzle>>;
}

/// Directory-backed store reading `{root}/{genre}/{date}.json`.
#[derive(Debug, Clone)]
pub struct FilePuzzleStore {
    root: PathBuf,
}

impl FilePuzzleStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn puzzle_path(&self, date: NaiveDate, genre: Genre) -> PathBuf {
        self.root.join(genre.as_str()).join(format!("{}.json", date))
    }
}

impl PuzzleStore for FilePuzzleStore {
    fn get_daily_puzzle(&self, date: NaiveDate, genre: Genre) -> Result<Option<Puzzle>> {
        let path = self.puzzle_path(date, genre);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let puzzle = serde_json::from_str(&contents)?;
        Ok(Some(puzzle))
    }
}

/// HTTP store fetching `{base_url}/{genre}/{date}.json` from the puzzle
/// service. A 404 means the date has no published puzzle; other failures
/// surface as errors for the caller to render.
#[derive(Debug, Clone)]
pub struct HttpPuzzleStore {
    base_url: String,
    client: Client,
}

impl HttpPuzzleStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }
}

impl PuzzleStore for HttpPuzzleStore {
    fn get_daily_puzzle(&self, date: NaiveDate, genre: Genre) -> Result<Option<Puzzle>> {
        let url = format!("{}/{}/{}.json", self.base_url, genre, date);
        tracing::debug!(%url, "fetching daily puzzle");

        let response = self.client.get(&url).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let puzzle = response.error_for_status()?.json()?;
        Ok(Some(puzzle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Difficulty, Group, GroupColor, Item, ItemId};
    use chrono::Utc;
    use tempfile::TempDir;

    fn item(id: ItemId) -> Item {
        Item {
            id,
            title: format!("Item {}", id),
            year: None,
            artist: None,
        }
    }

    fn group(id: &str, ids: std::ops::RangeInclusive<ItemId>, difficulty: Difficulty, color: GroupColor) -> Group {
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
            id: "2025-11-24-films".to_string(),
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

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 24).unwrap()
    }

    #[test]
    fn test_file_store_round_trips_a_puzzle() {
        let dir = TempDir::new().unwrap();
        let store = FilePuzzleStore::new(dir.path());

        let puzzle = fixture_puzzle();
        puzzle.validate().expect("fixture must satisfy the board invariant");

        let genre_dir = dir.path().join("films");
        fs::create_dir_all(&genre_dir).unwrap();
        fs::write(
            genre_dir.join("2025-11-24.json"),
            serde_json::to_string(&puzzle).unwrap(),
        )
        .unwrap();

        let loaded = store.get_daily_puzzle(date(), Genre::Films).unwrap();
        assert_eq!(loaded, Some(puzzle));
    }

    #[test]
    fn test_unpublished_date_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FilePuzzleStore::new(dir.path());
        assert_eq!(store.get_daily_puzzle(date(), Genre::Films).unwrap(), None);
    }

    #[test]
    fn test_genres_do_not_share_puzzles() {
        let dir = TempDir::new().unwrap();
        let store = FilePuzzleStore::new(dir.path());

        let genre_dir = dir.path().join("films");
        fs::create_dir_all(&genre_dir).unwrap();
        fs::write(
            genre_dir.join("2025-11-24.json"),
            serde_json::to_string(&fixture_puzzle()).unwrap(),
        )
        .unwrap();

        assert!(store.get_daily_puzzle(date(), Genre::Music).unwrap().is_none());
        assert!(store.get_daily_puzzle(date(), Genre::Films).unwrap().is_some());
    }

    #[test]
    fn test_malformed_puzzle_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = FilePuzzleStore::new(dir.path());

        let genre_dir = dir.path().join("films");
        fs::create_dir_all(&genre_dir).unwrap();
        fs::write(genre_dir.join("2025-11-24.json"), "{ not a puzzle").unwrap();

        assert!(store.get_daily_puzzle(date(), Genre::Films).is_err());
    }
}
