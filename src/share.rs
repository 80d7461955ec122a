//! Guess history encoding and share-text rendering.
//!
//! Pure transforms from a session's guess log to the color grid players
//! see and the emoji block they paste into chat.

use chrono::NaiveDate;

use crate::dates;
use crate::session::MAX_SELECTIONS;
use crate::types::{Group, GroupColor, ItemId};

fn color_emoji(color: GroupColor) -> &'static str {
    match color {
        GroupColor::Yellow => "\u{1F7E8}",
        GroupColor::Green => "\u{1F7E9}",
        GroupColor::Blue => "\u{1F7E6}",
        GroupColor::Purple => "\u{1F7EA}",
    }
}

/// Map each guessed id to the color of the group holding it. An id outside
/// every group falls back to yellow rather than failing the whole grid.
pub fn guess_to_colors(item_ids: &[ItemId], groups: &[Group]) -> Vec<GroupColor> {
    item_ids
        .iter()
        .map(|&id| {
            groups
                .iter()
                .find(|group| group.contains_item(id))
                .map(|group| group.color)
                .unwrap_or(GroupColor::Yellow)
        })
        .collect()
}

/// Encode an ordered guess log as rows of group colors, one row per guess.
pub fn guesses_to_color_history(
    guesses: &[[ItemId; MAX_SELECTIONS]],
    groups: &[Group],
) -> Vec<Vec<GroupColor>> {
    guesses
        .iter()
        .map(|guess| guess_to_colors(guess, groups))
        .collect()
}

/// Inputs for [`generate_share_text`].
#[derive(Debug, Clone)]
pub struct ShareInput<'a> {
    pub site_name: &'a str,
    pub puzzle_date: NaiveDate,
    pub guess_history: &'a [Vec<GroupColor>],
    pub domain: &'a str,
}

/// Render the copyable share block: a title line with the long-form date,
/// one emoji row per guess, and the play link. Identical inputs always
/// produce byte-identical output.
pub fn generate_share_text(input: &ShareInput<'_>) -> String {
    let grid = input
        .guess_history
        .iter()
        .map(|row| row.iter().map(|&color| color_emoji(color)).collect::<String>())
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        "{} - {}\n{}\nPlay: https://{}",
        input.site_name,
        dates::format_date(input.puzzle_date),
        grid,
        input.domain,
    )
}
