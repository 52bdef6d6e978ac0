//! Computer-only games from deal to game over.

use rows_and_cols::data::{load_game, save_game};
use rows_and_cols::game::board::Axis;
use rows_and_cols::game::player::PlayerSetting;
use rows_and_cols::game::tile::{Shared, COPIES_PER_KIND, MAX_LINE_LENGTH, TOTAL_TILES};
use rows_and_cols::highscores::{load_highscores, CsvHighscoreStore, HighscoreTable};
use rows_and_cols::search::{background, SearchConfig};
use rows_and_cols::{Board, GameState, TurnEngine};
use tempfile::tempdir;

const TURN_LIMIT: usize = 400;

fn bots(n: usize) -> Vec<PlayerSetting> {
    (1..=n).map(|i| PlayerSetting::new(format!("Bot {}", i), true)).collect()
}

fn assert_conserved(state: &GameState) {
    let census = state.tile_census();
    assert_eq!(census.values().sum::<usize>(), TOTAL_TILES);
    assert!(census.values().all(|&c| c == COPIES_PER_KIND));
}

/// Every line on the board shares one attribute throughout and never
/// repeats the other.
fn assert_lines_are_sound(board: &Board) {
    for (at, _) in board.iter() {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let run = board.run_through(at, axis);
            assert!(run.len() <= MAX_LINE_LENGTH, "run too long through {}", at);
            let tiles: Vec<_> = run.iter().filter_map(|c| board.get(*c)).collect();
            if tiles.len() < 2 {
                continue;
            }
            let shared = Shared::between(tiles[0], tiles[1]).expect("neighbors share exactly one attribute");
            for (i, a) in tiles.iter().enumerate() {
                for b in &tiles[i + 1..] {
                    assert!(shared.holds(*a, *b), "{} and {} clash in the line through {}", a, b, at);
                }
            }
        }
    }
}

fn play_out(engine: &mut TurnEngine, scores: &mut HighscoreTable) -> usize {
    let mut turns = 0;
    while !engine.state().is_over() && turns < TURN_LIMIT {
        engine.ai_step().unwrap();
        engine.end_turn(scores).unwrap();
        assert_conserved(engine.state());
        turns += 1;
    }
    turns
}

#[test]
fn computer_game_terminates_with_sound_board() {
    let mut engine = TurnEngine::with_seed(&bots(3), 2024).unwrap();
    let mut scores = HighscoreTable::default();
    let turns = play_out(&mut engine, &mut scores);

    assert!(engine.state().is_over(), "no result after {} turns", turns);
    assert_lines_are_sound(engine.board());

    let result = engine.state().result().unwrap();
    let top = engine.state().players.iter().map(|p| p.score()).max().unwrap();
    assert_eq!(result.winning_score, top);
    assert!(result
        .winners
        .iter()
        .all(|&i| engine.state().players[i].score() == top));
    assert_eq!(scores.highlighted().is_some(), result.sole_winner().is_some());
}

#[test]
fn same_seed_same_game() {
    let mut a = TurnEngine::with_seed(&bots(2), 77).unwrap();
    let mut b = TurnEngine::with_seed(&bots(2), 77).unwrap();
    for _ in 0..10 {
        let sa = a.ai_step().unwrap();
        let sb = b.ai_step().unwrap();
        assert_eq!(sa.mv, sb.mv);
        a.end_turn(&mut HighscoreTable::default()).unwrap();
        b.end_turn(&mut HighscoreTable::default()).unwrap();
    }
    assert_eq!(a.state().board, b.state().board);
}

#[test]
fn interrupted_game_resumes_from_file() {
    let dir = tempdir().unwrap();
    let save_path = dir.path().join(".save");
    let scores_path = dir.path().join(".scores");

    let mut engine = TurnEngine::with_seed(&bots(2), 5).unwrap();
    let mut scores = HighscoreTable::default();
    for _ in 0..6 {
        engine.ai_step().unwrap();
        engine.end_turn(&mut scores).unwrap();
    }
    assert!(save_game(&save_path, engine.state()).unwrap());

    let state = load_game(&save_path).unwrap();
    assert_eq!(state.board, engine.state().board);
    assert_conserved(&state);

    let mut resumed = TurnEngine::from_state(state, rand::SeedableRng::seed_from_u64(6));
    let mut store = CsvHighscoreStore::open(&scores_path);
    let mut turns = 0;
    while !resumed.state().is_over() && turns < TURN_LIMIT {
        resumed.ai_step().unwrap();
        resumed.end_turn(&mut store).unwrap();
        turns += 1;
    }
    assert!(resumed.state().is_over());
    if resumed.state().result().unwrap().sole_winner().is_some() {
        let table = load_highscores(&scores_path).unwrap();
        assert_eq!(table.entries()[0].player_count, 2);
    }
}

#[tokio::test]
async fn background_search_drives_a_game() {
    let config = SearchConfig {
        parallel: true,
        timeout_ms: Some(30_000),
    };
    let mut engine = TurnEngine::with_seed(&bots(2), 31)
        .unwrap()
        .with_search_config(config.clone());
    let mut scores = HighscoreTable::default();
    for _ in 0..8 {
        let request = engine.search_request().unwrap();
        let outcome = background::decide(request, config.clone()).await;
        engine.apply_move(&outcome.mv).unwrap();
        engine.end_turn(&mut scores).unwrap();
    }
    assert_conserved(engine.state());
    assert_eq!(engine.state().turns_played, 8);
}
