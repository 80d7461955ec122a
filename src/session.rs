//! Game session state machine.
//!
//! Owns puzzle progress for a single day: selection, guess evaluation,
//! mistake tracking and the win/loss transitions. Animation timing is data
//! here, never scheduling: a correct guess returns a [`RevealPlan`] and the
//! presentation layer plays it back through
//! [`GameSession::mark_item_jumping`] and [`GameSession::finalize_reveal`].

use std::time::Duration;

use chrono::NaiveDate;
use rand::seq::SliceRandom;

use crate::events::GameEvent;
use crate::types::{GameStatus, Group, Item, ItemId, GROUP_COUNT};

/// Wrong guesses allowed before the game is lost.
pub const MAX_MISTAKES: u32 = 4;
/// Selection cap; a guess is always exactly this size.
pub const MAX_SELECTIONS: usize = 4;

/// How long a transient notification stays on screen before the caller
/// should invoke [`GameSession::clear_notification`].
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(2000);
/// How long the wrong-guess shake runs before [`GameSession::clear_shake`].
pub const SHAKE_DURATION: Duration = Duration::from_millis(500);
/// Delay between consecutive tile jumps in a reveal.
pub const JUMP_STAGGER: Duration = Duration::from_millis(100);
/// Settle time after the last jump before the group is committed.
pub const REVEAL_SETTLE: Duration = Duration::from_millis(400);

/// Transient advisory surfaced next to the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Notification {
    OneAway,
    AlreadyTried,
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Notification::OneAway => "One away!",
            Notification::AlreadyTried => "Already tried!",
        };
        write!(f, "{}", s)
    }
}

/// A single timed cue within a reveal animation.
#[derive(Debug, Clone, PartialEq)]
pub struct JumpCue {
    pub item_id: ItemId,
    /// Offset from the moment the guess was accepted.
    pub at: Duration,
}

/// Animation schedule for a correct guess.
///
/// The caller plays the cues in order, marking each tile as jumping, then
/// calls [`GameSession::finalize_reveal`] once `finalize_after` has
/// elapsed. `generation` stamps the session the plan was issued for; cues
/// that outlive a reinitialize are silently ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealPlan {
    pub group_id: String,
    pub cues: Vec<JumpCue>,
    pub finalize_after: Duration,
    pub generation: u64,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Fewer than four items selected, or the game is already over.
    Ignored,
    /// This exact tuple was tried before; nothing changed.
    Duplicate,
    /// Correct guess. Play the plan, then finalize.
    Matched(RevealPlan),
    /// Wrong guess. `lost` is set when this was the final mistake.
    Mismatch { one_away: bool, lost: bool },
}

/// State for one day's puzzle, owned by the composing application layer.
#[derive(Debug, Default)]
pub struct GameSession {
    items: Vec<Item>,
    groups: Vec<Group>,
    selected_item_ids: Vec<ItemId>,
    found_groups: Vec<Group>,
    previous_guesses: Vec<[ItemId; MAX_SELECTIONS]>,
    mistakes: u32,
    status: GameStatus,
    notification: Option<Notification>,
    shaking: bool,
    jumping_item_ids: Vec<ItemId>,
    pending_reveal: Option<String>,
    puzzle_date: Option<NaiveDate>,
    generation: u64,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh session for `puzzle_date`. The board is dealt as a new
    /// uniform permutation; the caller's slices are left untouched.
    pub fn initialize(&mut self, items: &[Item], groups: &[Group], puzzle_date: NaiveDate) {
        let generation = self.generation + 1;
        *self = Self {
            items: shuffled(items),
            groups: groups.to_vec(),
            puzzle_date: Some(puzzle_date),
            generation,
            ..Self::default()
        };
        tracing::info!(%puzzle_date, "game initialized");
    }

    /// Reconstruct the terminal state for a player who already finished
    /// today's puzzle. Display only, no replay: the per-guess log is not
    /// recoverable from a summary, so `previous_guesses` stays empty and
    /// the persisted result's encoded history is the source of truth for
    /// redisplay.
    pub fn restore_completed(&mut self, groups: &[Group], won: bool, mistakes: u32) {
        let generation = self.generation + 1;
        *self = Self {
            groups: groups.to_vec(),
            found_groups: groups.to_vec(),
            mistakes,
            status: if won { GameStatus::Won } else { GameStatus::Lost },
            generation,
            ..Self::default()
        };
    }

    /// Toggle selection of `item_id`. Ignored once the game is over, for
    /// ids no longer on the board, and for a would-be fifth selection.
    pub fn select_item(&mut self, item_id: ItemId) {
        if self.status.is_terminal() {
            return;
        }
        if let Some(pos) = self.selected_item_ids.iter().position(|&id| id == item_id) {
            self.selected_item_ids.remove(pos);
            return;
        }
        if self.selected_item_ids.len() >= MAX_SELECTIONS {
            return;
        }
        if !self.items.iter().any(|item| item.id == item_id) {
            return;
        }
        self.selected_item_ids.push(item_id);
    }

    pub fn deselect_all(&mut self) {
        self.selected_item_ids.clear();
    }

    /// Evaluate the current four-item selection.
    pub fn submit_guess(&mut self) -> SubmitOutcome {
        if self.status != GameStatus::Playing || self.selected_item_ids.len() != MAX_SELECTIONS {
            return SubmitOutcome::Ignored;
        }

        let mut candidate = [0 as ItemId; MAX_SELECTIONS];
        candidate.copy_from_slice(&self.selected_item_ids);
        candidate.sort_unstable();

        if self.previous_guesses.contains(&candidate) {
            self.notification = Some(Notification::AlreadyTried);
            return SubmitOutcome::Duplicate;
        }

        let matched = self
            .groups
            .iter()
            .find(|group| group.sorted_item_ids() == candidate)
            .cloned();
        let one_away = matched.is_none()
            && self.groups.iter().any(|group| {
                candidate.iter().filter(|&&id| group.contains_item(id)).count() == 3
            });

        // The tuple goes on record before any reveal is scheduled, so a
        // rapid second submission of the same ids lands in the duplicate
        // branch.
        self.previous_guesses.push(candidate);

        match matched {
            Some(group) => self.accept_match(group),
            None => self.reject_mismatch(one_away),
        }
    }

    fn accept_match(&mut self, group: Group) -> SubmitOutcome {
        self.selected_item_ids.clear();
        self.events.push(GameEvent::GuessSubmitted {
            puzzle_date: self.puzzle_date,
            correct: true,
            mistake_count: self.mistakes,
            was_one_away: false,
        });

        // Tiles jump in id order, one stagger apart.
        let ids = group.sorted_item_ids();
        let cues: Vec<JumpCue> = ids
            .iter()
            .enumerate()
            .map(|(i, &item_id)| JumpCue {
                item_id,
                at: JUMP_STAGGER * i as u32,
            })
            .collect();
        let finalize_after = JUMP_STAGGER * ids.len() as u32 + REVEAL_SETTLE;

        self.pending_reveal = Some(group.id.clone());
        SubmitOutcome::Matched(RevealPlan {
            group_id: group.id,
            cues,
            finalize_after,
            generation: self.generation,
        })
    }

    fn reject_mismatch(&mut self, one_away: bool) -> SubmitOutcome {
        self.mistakes += 1;
        self.shaking = true;
        if one_away {
            self.notification = Some(Notification::OneAway);
        }

        self.events.push(GameEvent::GuessSubmitted {
            puzzle_date: self.puzzle_date,
            correct: false,
            mistake_count: self.mistakes,
            was_one_away: one_away,
        });

        let lost = self.mistakes >= MAX_MISTAKES;
        if lost {
            let groups_found = self.found_groups.len();
            self.status = GameStatus::Lost;
            // Reveal everything; nothing is left to guess.
            self.found_groups = self.groups.clone();
            self.items.clear();
            self.pending_reveal = None;
            self.jumping_item_ids.clear();
            tracing::info!(mistakes = self.mistakes, "game lost");
            self.events.push(GameEvent::GameLost {
                puzzle_date: self.puzzle_date,
                mistakes: self.mistakes,
                groups_found,
            });
        }

        SubmitOutcome::Mismatch { one_away, lost }
    }

    /// Mark a tile as jumping, per a cue from a [`RevealPlan`]. Cues from a
    /// superseded session are ignored.
    pub fn mark_item_jumping(&mut self, generation: u64, item_id: ItemId) {
        if generation != self.generation {
            return;
        }
        if !self.jumping_item_ids.contains(&item_id) {
            self.jumping_item_ids.push(item_id);
        }
    }

    /// Commit the group a [`RevealPlan`] was issued for: move it to the
    /// found list, pull its items off the board, clear the jump markers and
    /// settle the win check. A no-op for stale generations or when no
    /// reveal is pending.
    pub fn finalize_reveal(&mut self, generation: u64) {
        if generation != self.generation {
            return;
        }
        let Some(group_id) = self.pending_reveal.take() else {
            return;
        };
        let Some(group) = self.groups.iter().find(|g| g.id == group_id).cloned() else {
            return;
        };

        self.found_groups.push(group.clone());
        self.items.retain(|item| !group.contains_item(item.id));
        self.jumping_item_ids.clear();

        let won = self.found_groups.len() == GROUP_COUNT;
        if won {
            self.status = GameStatus::Won;
        }

        self.events.push(GameEvent::GroupFound {
            puzzle_date: self.puzzle_date,
            group_index: self.found_groups.len(),
            difficulty: group.difficulty,
            mistakes_so_far: self.mistakes,
        });
        if won {
            tracing::info!(mistakes = self.mistakes, "game won");
            self.events.push(GameEvent::GameWon {
                puzzle_date: self.puzzle_date,
                mistakes: self.mistakes,
                groups_found: GROUP_COUNT,
            });
        }
    }

    /// Re-permute the remaining board. Found groups, selection and guess
    /// history are untouched.
    pub fn shuffle_items(&mut self) {
        self.items.shuffle(&mut rand::thread_rng());
        self.events.push(GameEvent::ItemsShuffled {
            puzzle_date: self.puzzle_date,
        });
    }

    /// Timer callback: drop the transient notification.
    pub fn clear_notification(&mut self) {
        self.notification = None;
    }

    /// Timer callback: stop the wrong-guess shake.
    pub fn clear_shake(&mut self) {
        self.shaking = false;
    }

    /// Drain the accumulated domain events for the telemetry sink.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn selected_item_ids(&self) -> &[ItemId] {
        &self.selected_item_ids
    }

    pub fn is_selected(&self, item_id: ItemId) -> bool {
        self.selected_item_ids.contains(&item_id)
    }

    pub fn found_groups(&self) -> &[Group] {
        &self.found_groups
    }

    pub fn previous_guesses(&self) -> &[[ItemId; MAX_SELECTIONS]] {
        &self.previous_guesses
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notification
    }

    pub fn is_shaking(&self) -> bool {
        self.shaking
    }

    pub fn jumping_item_ids(&self) -> &[ItemId] {
        &self.jumping_item_ids
    }

    pub fn puzzle_date(&self) -> Option<NaiveDate> {
        self.puzzle_date
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Fisher-Yates deal of a fresh board; the input is never mutated.
fn shuffled(items: &[Item]) -> Vec<Item> {
    let mut dealt = items.to_vec();
    dealt.shuffle(&mut rand::thread_rng());
    dealt
}
