//! xclues: core engine for a daily connections-style puzzle game.
//!
//! Players group sixteen items (films, songs, athletes or books depending
//! on the deployment genre) into four hidden categories of four, with a
//! limited mistake budget. This crate owns the game session state machine,
//! the guess-history and share-text encoders, streak bookkeeping and the
//! puzzle/stats storage gateways. Rendering and timer scheduling belong to
//! the consuming surface.

pub mod config;
pub mod dates;
pub mod error;
pub mod events;
pub mod session;
pub mod share;
pub mod storage;
pub mod streak;
pub mod types;

pub use error::{Error, Result};
pub use session::{GameSession, SubmitOutcome, MAX_MISTAKES, MAX_SELECTIONS};
pub use types::{GameStatus, Group, Item, ItemId, Puzzle, GROUP_COUNT, GROUP_SIZE, PUZZLE_SIZE};
