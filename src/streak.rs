//! Streak bookkeeping: consecutive UTC calendar days with a win.

use chrono::{Duration, NaiveDate};

use crate::dates;

/// Next streak value for a game completed on `today`.
///
/// Losses always break the streak. A win extends it only when the previous
/// completion was yesterday; a same-day repeat leaves it unchanged, and any
/// longer gap starts over at 1.
pub fn streak_on(
    today: NaiveDate,
    last_played: Option<NaiveDate>,
    current_streak: u32,
    won: bool,
) -> u32 {
    if !won {
        return 0;
    }
    match last_played {
        None => 1,
        Some(last) if last == today => current_streak,
        Some(last) if last == today - Duration::days(1) => current_streak + 1,
        Some(_) => 1,
    }
}

/// [`streak_on`] anchored to the current UTC day.
pub fn calculate_streak(last_played: Option<NaiveDate>, current_streak: u32, won: bool) -> u32 {
    streak_on(dates::today(), last_played, current_streak, won)
}
