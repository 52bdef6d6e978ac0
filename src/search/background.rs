//! Runs the search on tokio's blocking pool so an async caller stays
//! responsive while a computer player thinks.

use crate::search::config::SearchConfig;
use crate::search::move_search::{find_best_move, SearchOutcome, SearchRequest};
use crate::search::swap_policy::choose_swap;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Searches an owned snapshot off the async runtime. When the configured
/// timeout runs out first, the decision is the swap fallback and the outcome
/// is flagged `timed_out`; the abandoned search finishes in the background
/// and its result is dropped.
pub async fn decide(request: SearchRequest, config: SearchConfig) -> SearchOutcome {
    let snapshot = request.clone();
    let timeout = config.timeout();
    let handle = tokio::task::spawn_blocking(move || find_best_move(&snapshot, &config));

    let joined = match timeout {
        Some(limit) => match tokio::time::timeout(limit, handle).await {
            Ok(joined) => joined,
            Err(_) => {
                log::warn!("⏱️ Search gave up after {:?}, swapping instead", limit);
                return fallback(&request, true);
            }
        },
        None => handle.await,
    };

    joined.unwrap_or_else(|e| {
        log::error!("❌ Search task failed: {}", e);
        fallback(&request, false)
    })
}

fn fallback(request: &SearchRequest, timed_out: bool) -> SearchOutcome {
    let mut rng = StdRng::seed_from_u64(request.seed);
    SearchOutcome {
        mv: choose_swap(&request.board, &request.hand, request.bag_len, &mut rng),
        score: 0,
        candidates_examined: 0,
        timed_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::moves::Move;
    use crate::game::board::Board;
    use crate::game::hand::Hand;
    use crate::game::tile::{Coord, Tile};

    fn request() -> SearchRequest {
        let mut hand = Hand::default();
        for tile in [Tile::new(0, 1), Tile::new(0, 2), Tile::new(3, 3)] {
            let _ = hand.put_in_first_empty(tile);
        }
        SearchRequest {
            board: [(Coord::ORIGIN, Tile::new(0, 0))].into_iter().collect::<Board>(),
            hand,
            bag_len: 30,
            seed: 9,
        }
    }

    #[tokio::test]
    async fn test_background_matches_direct_search() {
        let config = SearchConfig {
            parallel: false,
            timeout_ms: Some(60_000),
        };
        let direct = find_best_move(&request(), &config);
        let background = decide(request(), config).await;
        assert_eq!(background, direct);
        assert!(!background.timed_out);
    }

    #[test]
    fn test_fallback_swaps_and_flags_the_timeout() {
        let outcome = fallback(&request(), true);
        assert!(outcome.timed_out);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.candidates_examined, 0);
        assert!(matches!(outcome.mv, Move::Swap(ref slots) if slots.len() == 1));
        assert_eq!(outcome, fallback(&request(), true), "seeded by the request");

        let empty_bag = SearchRequest {
            bag_len: 0,
            ..request()
        };
        let outcome = fallback(&empty_bag, false);
        assert!(!outcome.timed_out);
        assert!(outcome.mv.is_pass());
    }
}
