//! Property tests over seeded random games.
//!
//! Games are kept short enough that the total orb count stays below the
//! number of grid edges, which guarantees every chain reaction settles.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use chain_reaction::board::{Board, Geometry, Player, Position};
use chain_reaction::eval::{EvalConfig, Feature};
use chain_reaction::protocol::{encode_board, parse_game_state, AI_MOVE_HEADER};
use chain_reaction::search::{alpha_beta, minimax, search, SearchConfig};
use chain_reaction::simulate::{apply_move, evaluate_outcome, PlacementHistory};

/// A position reached by random play, with the side to move.
struct Sample {
    board: Board,
    history: PlacementHistory,
    to_move: Player,
}

/// Plays up to `plies` random legal moves, stopping early if the game ends.
fn random_game(geometry: Geometry, plies: usize, rng: &mut SmallRng) -> Sample {
    let mut board = Board::new(geometry);
    let mut history = PlacementHistory::new();
    let mut to_move = Player::Red;
    for _ in 0..plies {
        let moves = board.valid_moves(to_move);
        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        assert!(apply_move(&mut board, mv, to_move));
        to_move = to_move.opponent();
        if evaluate_outcome(&board, &mut history).is_decided {
            break;
        }
    }
    Sample {
        board,
        history,
        to_move,
    }
}

fn corpus(geometry: Geometry, max_plies: usize, count: u64) -> Vec<Sample> {
    (0..count)
        .map(|seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let plies = (seed as usize) % (max_plies + 1);
            random_game(geometry, plies, &mut rng)
        })
        .collect()
}

fn assert_settled(board: &Board) {
    for p in board.geometry().positions() {
        assert!(
            board.cell(p).orbs < board.critical_mass(p),
            "cell {p} left at or above critical mass"
        );
    }
    assert!(board.is_consistent());
}

#[test]
fn alpha_beta_agrees_with_minimax() {
    let configs = [
        EvalConfig::default(),
        EvalConfig::single(Feature::OrbDifferential),
        EvalConfig::territorial(),
    ];
    for (geometry, max_plies) in [(Geometry::new(4, 4), 12), (Geometry::new(3, 4), 8)] {
        for (i, sample) in corpus(geometry, max_plies, 24).iter().enumerate() {
            for eval in &configs {
                for depth in 1..=3 {
                    let full = minimax(
                        &sample.board,
                        sample.history,
                        depth,
                        true,
                        sample.to_move,
                        eval,
                    );
                    let pruned = alpha_beta(
                        &sample.board,
                        sample.history,
                        depth,
                        f64::NEG_INFINITY,
                        f64::INFINITY,
                        true,
                        sample.to_move,
                        eval,
                    );
                    assert_eq!(full.score, pruned.score, "sample {i} depth {depth}");
                    assert_eq!(full.best_move, pruned.best_move, "sample {i} depth {depth}");
                    assert!(pruned.nodes <= full.nodes);
                }
            }
        }
    }
}

#[test]
fn parallel_search_agrees_with_sequential() {
    for (i, sample) in corpus(Geometry::new(4, 4), 12, 16).iter().enumerate() {
        let seq = SearchConfig::default().with_depth(3);
        let par = SearchConfig {
            parallel: true,
            ..seq
        };
        let a = search(&sample.board, sample.history, sample.to_move, &seq);
        let b = search(&sample.board, sample.history, sample.to_move, &par);
        assert_eq!(a.score, b.score, "sample {i}");
        assert_eq!(a.best_move, b.best_move, "sample {i}");
    }
}

#[test]
fn symmetric_positions_break_ties_in_row_major_order() {
    // Every opening move on an empty board scores the same under the flat
    // orb count, so the first cell wins.
    let board = Board::new(Geometry::new(3, 3));
    let eval = EvalConfig::single(Feature::OrbDifferential);
    for depth in 1..=2 {
        let result = search(
            &board,
            PlacementHistory::new(),
            Player::Red,
            &SearchConfig {
                depth,
                eval,
                parallel: false,
            },
        );
        assert_eq!(result.best_move, Some(Position::new(0, 0)), "depth {depth}");
    }
}

#[test]
fn every_move_adds_exactly_one_orb_and_settles() {
    for seed in 0..64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(Geometry::new(4, 5));
        let mut to_move = Player::Red;
        // 4x5 has 31 edges; stay below that.
        for ply in 0..30u32 {
            let moves = board.valid_moves(to_move);
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            assert!(apply_move(&mut board, mv, to_move));
            assert_eq!(board.orb_count(), ply + 1, "seed {seed} ply {ply}");
            assert_settled(&board);
            to_move = to_move.opponent();
        }
    }
}

#[test]
fn illegal_moves_leave_board_untouched() {
    let mut rng = SmallRng::seed_from_u64(99);
    let sample = random_game(Geometry::new(4, 4), 10, &mut rng);
    let mut board = sample.board.clone();
    for p in board.geometry().positions().collect::<Vec<_>>() {
        if !board.is_legal(p, sample.to_move) {
            assert!(!apply_move(&mut board, p, sample.to_move));
            assert_eq!(board, sample.board);
        }
    }
    assert!(!apply_move(&mut board, Position::new(4, 0), sample.to_move));
    assert_eq!(board, sample.board);
}

#[test]
fn text_format_roundtrips_random_boards() {
    for (i, sample) in corpus(Geometry::new(4, 4), 20, 32).iter().enumerate() {
        let text = encode_board(AI_MOVE_HEADER, &sample.board);
        let state = parse_game_state(&text).unwrap();
        assert_eq!(state.header, AI_MOVE_HEADER, "sample {i}");
        assert_eq!(state.board, sample.board, "sample {i}");
    }
}

#[test]
fn corner_explosion_on_standard_board() {
    let mut board = Board::standard();
    assert!(apply_move(&mut board, Position::new(0, 0), Player::Red));
    assert_eq!(board.cell(Position::new(0, 0)).orbs, 1);
    assert!(apply_move(&mut board, Position::new(0, 0), Player::Red));

    let origin = board.cell(Position::new(0, 0));
    assert_eq!(origin.orbs, 0);
    assert_eq!(origin.owner, None);
    for p in [Position::new(0, 1), Position::new(1, 0)] {
        assert_eq!(board.cell(p).orbs, 1);
        assert_eq!(board.cell(p).owner, Some(Player::Red));
    }
    assert_eq!(board.orb_count(), 2);
}

#[test]
fn win_requires_opponent_to_have_placed() {
    let mut board = Board::standard();
    let mut history = PlacementHistory::new();
    assert!(apply_move(&mut board, Position::new(0, 0), Player::Red));
    assert!(!evaluate_outcome(&board, &mut history).is_decided);

    assert!(apply_move(&mut board, Position::new(0, 2), Player::Blue));
    assert!(!evaluate_outcome(&board, &mut history).is_decided);

    // Red explodes (0,0) into (0,1) and (1,0); then (0,1) explodes into
    // Blue's cell at (0,2), capturing it.
    assert!(apply_move(&mut board, Position::new(0, 0), Player::Red));
    assert!(!evaluate_outcome(&board, &mut history).is_decided);
    assert!(apply_move(&mut board, Position::new(0, 1), Player::Red));
    assert!(apply_move(&mut board, Position::new(0, 1), Player::Red));

    let outcome = evaluate_outcome(&board, &mut history);
    assert_eq!(board.total_orbs(Player::Blue), 0);
    assert!(outcome.is_decided);
    assert_eq!(outcome.winner, Some(Player::Red));
}
