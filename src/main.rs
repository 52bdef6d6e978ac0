use clap::Parser;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

use rows_and_cols::data::{load_or_new_game, save_game};
use rows_and_cols::engine::{GameSummary, TurnEngine};
use rows_and_cols::game::player::PlayerSetting;
use rows_and_cols::highscores::{load_or_default, CsvHighscoreStore};
use rows_and_cols::logging::setup_logging;
use rows_and_cols::search::{background, SearchConfig};

#[derive(Parser, Debug)]
#[command(name = "rows_and_cols", version, about)]
struct Config {
    /// What to do
    #[arg(long, value_enum, default_value = "simulate")]
    mode: RunMode,

    /// Number of games to play in simulate mode
    #[arg(short = 'g', long, default_value_t = 1)]
    num_games: usize,

    /// Number of computer players seated in a new game
    #[arg(short = 'p', long, default_value_t = 3)]
    players: usize,

    /// Seed for the bag and the search tie-breaks (random when absent)
    #[arg(long)]
    seed: Option<u64>,

    /// Saved game file
    #[arg(long, default_value = ".save")]
    save_path: PathBuf,

    /// High-score file
    #[arg(long, default_value = ".scores")]
    scores_path: PathBuf,

    /// Save and stop after this many turns instead of finishing the game
    #[arg(long)]
    stop_after_turns: Option<usize>,

    /// Per-move search budget before a computer player falls back to a swap
    #[arg(long, default_value_t = 2000)]
    search_timeout_ms: u64,

    /// Run the search on a single thread
    #[arg(long, default_value_t = false)]
    sequential_search: bool,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write rotating log files here instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Print the end-of-game summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum RunMode {
    /// Play complete computer-only games
    Simulate,
    /// Continue the saved game, or start one if none can be restored
    Resume,
    /// Print the high-score table
    Scores,
}

fn seats(count: usize) -> Vec<PlayerSetting> {
    (1..=count)
        .map(|i| PlayerSetting::new(format!("Player {}", i), true))
        .collect()
}

/// Plays computer turns until the game ends or `stop_after` turns were played.
async fn play(
    engine: &mut TurnEngine,
    scores: &mut CsvHighscoreStore,
    stop_after: Option<usize>,
) -> rows_and_cols::Result<()> {
    let mut played = 0;
    while !engine.state().is_over() {
        if stop_after.is_some_and(|limit| played >= limit) {
            break;
        }
        if !engine.controls().can_ai_step {
            log::warn!(
                "⚠️  {} is not computer-controlled, stopping here",
                engine.state().current().name()
            );
            break;
        }

        let request = engine.search_request()?;
        let outcome = background::decide(request, engine.search_config().clone()).await;
        if outcome.timed_out {
            log::warn!("⏱️ {} ran out of time", engine.state().current().name());
        }
        engine.apply_move(&outcome.mv)?;
        engine.end_turn(scores)?;
        played += 1;
    }
    Ok(())
}

fn report(engine: &TurnEngine, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let summary = GameSummary::from_state(engine.state());
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    for player in &summary.players {
        println!("{:<20} {:>5}", player.name, player.score);
    }
    match &summary.announcement {
        Some(text) => println!("{}", text),
        None => println!("Game paused after {} turns.", summary.turns_played),
    }
    Ok(())
}

fn print_scores(path: &Path) {
    let table = load_or_default(path);
    for (rank, entry) in table.entries().iter().enumerate() {
        println!(
            "{:>2}. {:<20} {:>5} pts  {} players",
            rank + 1,
            entry.name,
            entry.points,
            entry.player_count
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    let _logger = setup_logging(&config.log_level, config.log_dir.as_deref())?;

    let search_config = SearchConfig {
        parallel: !config.sequential_search,
        timeout_ms: Some(config.search_timeout_ms),
    };
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::rng().random()),
    };

    match config.mode {
        RunMode::Scores => print_scores(&config.scores_path),
        RunMode::Simulate => {
            let mut scores = CsvHighscoreStore::open(&config.scores_path);
            for game in 0..config.num_games {
                log::info!("🎮 Game {}/{}", game + 1, config.num_games);
                let game_rng = StdRng::seed_from_u64(rng.random());
                let mut engine = TurnEngine::new(&seats(config.players), game_rng)?
                    .with_search_config(search_config.clone());
                play(&mut engine, &mut scores, config.stop_after_turns).await?;
                if !engine.state().is_over() {
                    save_game(&config.save_path, engine.state())?;
                }
                report(&engine, config.json)?;
            }
        }
        RunMode::Resume => {
            let state = load_or_new_game(&config.save_path, &seats(config.players), &mut rng)?;
            let mut engine = TurnEngine::from_state(state, rng).with_search_config(search_config);
            let mut scores = CsvHighscoreStore::open(&config.scores_path);
            play(&mut engine, &mut scores, config.stop_after_turns).await?;
            if !engine.state().is_over() {
                save_game(&config.save_path, engine.state())?;
            }
            report(&engine, config.json)?;
        }
    }
    Ok(())
}
