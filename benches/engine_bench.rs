use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

use chain_reaction::board::{Board, Cell, Player, Position, UndoLog};
use chain_reaction::eval::{evaluate, EvalConfig};
use chain_reaction::protocol::{encode_board, parse_game_state, HUMAN_MOVE_HEADER};
use chain_reaction::search::{search, SearchConfig};
use chain_reaction::simulate::{apply_move, try_apply_move_with, PlacementHistory};

/// A few opening moves on the standard board, Blue to move.
fn midgame() -> Board {
    let mut board = Board::standard();
    let moves = [
        (Player::Red, 0, 0),
        (Player::Blue, 8, 5),
        (Player::Red, 4, 3),
        (Player::Blue, 3, 3),
        (Player::Red, 0, 0),
        (Player::Blue, 8, 5),
        (Player::Red, 4, 2),
    ];
    for (p, r, c) in moves {
        apply_move(&mut board, Position::new(r, c), p);
    }
    board
}

/// Top three rows loaded to one below critical mass, so a corner placement
/// cascades through all of them.
fn primed() -> Board {
    let mut board = Board::standard();
    let positions: Vec<Position> = board
        .geometry()
        .positions()
        .filter(|p| p.row < 3)
        .collect();
    for p in positions {
        let orbs = board.critical_mass(p) - 1;
        board.set_cell(p, Cell::owned(orbs, Player::Red));
    }
    board
}

fn bench_apply_move(c: &mut Criterion) {
    let board = Board::standard();
    c.bench_function("apply_move_quiet", |b| {
        b.iter_batched(
            || board.clone(),
            |mut board| apply_move(&mut board, black_box(Position::new(4, 3)), Player::Red),
            BatchSize::SmallInput,
        )
    });

    let board = primed();
    c.bench_function("apply_move_chain_3_rows", |b| {
        b.iter_batched(
            || board.clone(),
            |mut board| apply_move(&mut board, black_box(Position::new(0, 0)), Player::Red),
            BatchSize::SmallInput,
        )
    });
}

fn bench_clone_vs_undo(c: &mut Criterion) {
    let board = primed();
    let mv = Position::new(0, 0);

    c.bench_function("clone_then_apply", |b| {
        b.iter(|| {
            let mut scratch = board.clone();
            apply_move(&mut scratch, black_box(mv), Player::Red);
            scratch
        })
    });

    c.bench_function("apply_then_rollback", |b| {
        let mut scratch = board.clone();
        let mut log = UndoLog::with_capacity(256);
        b.iter(|| {
            let mark = log.mark();
            let report = try_apply_move_with(&mut scratch, black_box(mv), Player::Red, &mut log);
            log.rollback(&mut scratch, mark);
            report
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let board = midgame();
    let weighted = EvalConfig::default();
    c.bench_function("evaluate_weighted", |b| {
        b.iter(|| evaluate(black_box(&board), black_box(Player::Blue), &weighted))
    });

    let territorial = EvalConfig::territorial();
    c.bench_function("evaluate_territorial", |b| {
        b.iter(|| evaluate(black_box(&board), black_box(Player::Blue), &territorial))
    });
}

fn bench_text_format(c: &mut Criterion) {
    let text = encode_board(HUMAN_MOVE_HEADER, &midgame());
    c.bench_function("parse_game_state", |b| {
        b.iter(|| parse_game_state(black_box(&text)))
    });
}

fn bench_search(c: &mut Criterion) {
    let board = midgame();
    let history = PlacementHistory::from_board(&board);

    let mut group = c.benchmark_group("search");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));
    for depth in [2, 3] {
        let config = SearchConfig::default().with_depth(depth);
        group.bench_function(format!("midgame_depth_{depth}"), |b| {
            b.iter(|| search(black_box(&board), history, Player::Blue, &config))
        });
    }
    let parallel = SearchConfig {
        parallel: true,
        ..SearchConfig::default()
    };
    group.bench_function("midgame_depth_3_parallel", |b| {
        b.iter(|| search(black_box(&board), history, Player::Blue, &parallel))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_apply_move,
    bench_clone_vs_undo,
    bench_evaluate,
    bench_text_format,
    bench_search,
);
criterion_main!(benches);
