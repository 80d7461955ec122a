use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use xclues::config::{Genre, SiteConfig};
use xclues::dates;
use xclues::session::{GameSession, SubmitOutcome, SHAKE_DURATION};
use xclues::share::{self, ShareInput};
use xclues::storage::puzzles::{FilePuzzleStore, HttpPuzzleStore, PuzzleStore};
use xclues::storage::stats::{GameResult, LocalStatsStore, StatsStore, UserStats};
use xclues::types::{GameStatus, Puzzle};
use xclues::MAX_MISTAKES;

#[derive(Parser)]
#[command(name = "xclues", about = "Daily connections-style puzzle in the terminal")]
struct Args {
    /// Puzzle date (YYYY-MM-DD), defaults to today in UTC
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Content genre for this deployment
    #[arg(long, default_value = "films")]
    genre: Genre,

    /// Load puzzles from a local directory instead of the puzzle service
    #[arg(long)]
    puzzle_dir: Option<PathBuf>,

    /// Base URL of the puzzle service
    #[arg(long, default_value = "https://puzzles.xclues.space")]
    puzzle_url: String,

    /// Print stats and exit
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = SiteConfig::for_genre(args.genre);
    let date = args.date.unwrap_or_else(dates::today);

    let stats_store =
        LocalStatsStore::new(&config.storage_prefix).context("failed to open stats store")?;

    if args.stats {
        print_stats(&stats_store.get_stats()?);
        return Ok(());
    }

    let Some(puzzle) = load_puzzle(&args, date).context("failed to load the daily puzzle")? else {
        println!(
            "No {} puzzle is published for {} yet. Come back tomorrow!",
            config.item_name,
            dates::format_date(date)
        );
        return Ok(());
    };

    let user_stats = stats_store.get_stats()?;
    let mut session = GameSession::new();

    if let Some(result) = user_stats.result_for(date) {
        show_completed(&mut session, &puzzle, result, &config, date);
        return Ok(());
    }

    session.initialize(&puzzle.items, &puzzle.groups, date);
    tracing::info!(puzzle_id = %puzzle.id, %date, genre = %config.genre, "game started");

    game_loop(&mut session, &config, date)?;

    if session.status().is_terminal() {
        finish(&mut session, &stats_store, &config, date)?;
    }

    Ok(())
}

fn load_puzzle(args: &Args, date: NaiveDate) -> Result<Option<Puzzle>> {
    let puzzle = match &args.puzzle_dir {
        Some(dir) => FilePuzzleStore::new(dir).get_daily_puzzle(date, args.genre)?,
        None => HttpPuzzleStore::new(args.puzzle_url.clone()).get_daily_puzzle(date, args.genre)?,
    };
    Ok(puzzle)
}

/// Redisplay path for a player who already finished today's puzzle. The
/// persisted result, not the session, is the source of the share grid.
fn show_completed(
    session: &mut GameSession,
    puzzle: &Puzzle,
    result: &GameResult,
    config: &SiteConfig,
    date: NaiveDate,
) {
    session.restore_completed(&puzzle.groups, result.won, result.mistakes);

    println!("{}", dates::format_puzzle_header(date, &config.site_name));
    println!(
        "You already finished this puzzle: {} with {}/{} mistakes.",
        if result.won { "won" } else { "lost" },
        result.mistakes,
        MAX_MISTAKES
    );
    print_found_groups(session);

    if let Some(history) = &result.guess_history {
        println!();
        println!(
            "{}",
            share::generate_share_text(&ShareInput {
                site_name: &config.site_name,
                puzzle_date: date,
                guess_history: history,
                domain: &config.domain,
            })
        );
    }
}

fn game_loop(session: &mut GameSession, config: &SiteConfig, date: NaiveDate) -> Result<()> {
    let stdin = io::stdin();

    println!("{}", dates::format_puzzle_header(date, &config.site_name));
    println!(
        "Group the 16 {}s into 4 hidden categories. {} mistakes allowed.",
        config.item_name, MAX_MISTAKES
    );
    println!("Commands: numbers toggle selection, submit, shuffle, clear, quit.");

    while session.status() == GameStatus::Playing {
        print_board(session);
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        for token in line.split_whitespace() {
            if session.status() != GameStatus::Playing {
                break;
            }
            match token {
                "quit" | "q" => return Ok(()),
                "clear" | "c" => session.deselect_all(),
                "shuffle" | "x" => session.shuffle_items(),
                "submit" | "s" => handle_submit(session),
                other => match other.parse::<usize>() {
                    Ok(n) if n >= 1 && n <= session.items().len() => {
                        let id = session.items()[n - 1].id;
                        session.select_item(id);
                    }
                    _ => println!("unrecognized command: {}", other),
                },
            }
        }
    }

    Ok(())
}

fn handle_submit(session: &mut GameSession) {
    match session.submit_guess() {
        SubmitOutcome::Ignored => println!("Select exactly 4 first."),
        SubmitOutcome::Duplicate => {
            if let Some(notification) = session.notification() {
                println!("{}", notification);
            }
            session.clear_notification();
        }
        SubmitOutcome::Matched(plan) => {
            // Play the reveal schedule the session handed us: one jump per
            // stagger, then the commit.
            let mut elapsed = Duration::ZERO;
            for cue in &plan.cues {
                thread::sleep(cue.at.saturating_sub(elapsed));
                elapsed = cue.at;
                session.mark_item_jumping(plan.generation, cue.item_id);
                if let Some(item) = session.items().iter().find(|item| item.id == cue.item_id) {
                    println!("  * {}", item.title);
                }
            }
            thread::sleep(plan.finalize_after.saturating_sub(elapsed));
            session.finalize_reveal(plan.generation);

            if let Some(group) = session.found_groups().last() {
                println!("Found: {} ({})", group.connection, group.color);
            }
        }
        SubmitOutcome::Mismatch { lost, .. } => {
            println!(
                "Not a group. Mistakes: {}/{}",
                session.mistakes(),
                MAX_MISTAKES
            );
            if let Some(notification) = session.notification() {
                println!("{}", notification);
            }
            thread::sleep(SHAKE_DURATION);
            session.clear_shake();
            session.clear_notification();
            if lost {
                println!("Out of mistakes!");
            }
        }
    }
}

fn finish(
    session: &mut GameSession,
    stats_store: &LocalStatsStore,
    config: &SiteConfig,
    date: NaiveDate,
) -> Result<()> {
    let won = session.status() == GameStatus::Won;
    print_found_groups(session);
    println!();
    println!("{}", if won { "You won!" } else { "Better luck tomorrow." });

    let guess_history = share::guesses_to_color_history(session.previous_guesses(), session.groups());
    let result = GameResult {
        date,
        won,
        mistakes: session.mistakes(),
        completed_at: chrono::Utc::now(),
        guess_history: Some(guess_history.clone()),
    };
    let stats = stats_store
        .record_completion(result)
        .context("failed to record the game")?;
    print_stats(&stats);

    println!();
    println!(
        "{}",
        share::generate_share_text(&ShareInput {
            site_name: &config.site_name,
            puzzle_date: date,
            guess_history: &guess_history,
            domain: &config.domain,
        })
    );

    // Telemetry sink: forward every transition the session recorded.
    for event in session.drain_events() {
        match serde_json::to_string(&event) {
            Ok(payload) => tracing::info!(target: "analytics", %payload),
            Err(err) => tracing::warn!(%err, "failed to encode analytics event"),
        }
    }

    Ok(())
}

fn print_board(session: &GameSession) {
    println!();
    print_found_groups(session);
    for (i, item) in session.items().iter().enumerate() {
        let marker = if session.is_selected(item.id) { '*' } else { ' ' };
        print!("{}{:>2}. {:<24}", marker, i + 1, item.title);
        if i % 4 == 3 {
            println!();
        }
    }
    println!(
        "Mistakes: {}/{}  Selected: {}/4",
        session.mistakes(),
        MAX_MISTAKES,
        session.selected_item_ids().len()
    );
}

fn print_found_groups(session: &GameSession) {
    for group in session.found_groups() {
        let titles: Vec<&str> = group.items.iter().map(|item| item.title.as_str()).collect();
        println!("[{}] {}: {}", group.color, group.connection, titles.join(", "));
    }
}

fn print_stats(stats: &UserStats) {
    println!();
    println!(
        "Played: {}  Won: {}  Win rate: {}%",
        stats.games_played, stats.games_won, stats.win_rate
    );
    println!(
        "Current streak: {}  Max streak: {}",
        stats.current_streak, stats.max_streak
    );
}
