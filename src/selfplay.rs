//! Self-play game generation.
//!
//! Plays full AI-vs-AI games, each side choosing moves with the alpha-beta
//! search at its own depth. The first few plies can be random to diversify
//! openings. Every ply is recorded with its score, search effort, and the
//! resulting text state, and games are written out as JSONL.

use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::board::{Geometry, Player, Position};
use crate::eval::EvalConfig;
use crate::game::{GameSession, PlayError};
use crate::search::{SearchConfig, DEFAULT_DEPTH};

/// Errors that stop a self-play run.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("self-play worker thread panicked")]
    WorkerPanicked,

    #[error("invalid self-play config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Search depth for Red.
    pub red_depth: u32,
    /// Search depth for Blue.
    pub blue_depth: u32,
    /// Evaluator used by both sides.
    pub eval: EvalConfig,
    /// Number of opening plies chosen uniformly at random.
    pub random_plies: u32,
    /// Plies after which an undecided game is abandoned.
    pub max_plies: u32,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Board dimensions.
    pub geometry: Geometry,
    /// Suppress per-game progress logging.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            red_depth: DEFAULT_DEPTH,
            blue_depth: DEFAULT_DEPTH,
            eval: EvalConfig::default(),
            random_plies: 2,
            max_plies: 400,
            threads: 4,
            seed: 0,
            geometry: Geometry::STANDARD,
            quiet: false,
        }
    }
}

impl SelfPlayConfig {
    /// Parses a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SelfPlayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Search settings for `player`.
    pub fn search_config(&self, player: Player) -> SearchConfig {
        let depth = match player {
            Player::Red => self.red_depth,
            Player::Blue => self.blue_depth,
        };
        SearchConfig {
            depth,
            eval: self.eval,
            parallel: false,
        }
    }

    fn rng_for(&self, game_id: usize) -> SmallRng {
        if self.seed != 0 {
            SmallRng::seed_from_u64(self.seed.wrapping_add(game_id as u64))
        } else {
            SmallRng::from_entropy()
        }
    }
}

/// One ply of a self-play game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub ply: u32,
    pub player: Player,
    pub position: Position,
    /// True for random opening moves.
    pub random: bool,
    /// Search score from the mover's perspective; absent for random moves.
    pub score: Option<f64>,
    pub nodes: u64,
    pub explosions: u32,
    /// Text state after the move.
    pub state: String,
}

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// One side was eliminated.
    Win,
    /// The ply limit was reached.
    PlyLimit,
    /// The side to move had no legal move.
    NoMoves,
    /// A move exceeded the explosion limit or a cell's orb capacity.
    ChainOverflow,
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub winner: Option<Player>,
    pub termination: Termination,
    pub plies: u32,
    pub moves: Vec<MoveRecord>,
    pub final_state: String,
}

/// Plays one game to completion.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut session = GameSession::new(config.geometry);
    let mut moves = Vec::new();

    let termination = loop {
        if session.is_over() {
            break Termination::Win;
        }
        if session.plies() >= config.max_plies {
            break Termination::PlyLimit;
        }

        let player = session.to_move();
        let (position, score, nodes, random) = if session.plies() < config.random_plies {
            let legal = session.board().valid_moves(player);
            if legal.is_empty() {
                break Termination::NoMoves;
            }
            (legal[rng.gen_range(0..legal.len())], None, 0, true)
        } else {
            match session.try_best_move(&config.search_config(player)) {
                Ok(result) => match result.best_move {
                    Some(p) => (p, Some(result.score), result.nodes, false),
                    None => break Termination::NoMoves,
                },
                Err(e) => {
                    warn!(game_id, %e, "search aborted, ending game");
                    break Termination::ChainOverflow;
                }
            }
        };

        let ply = session.plies();
        match session.play(position) {
            Ok(played) => moves.push(MoveRecord {
                ply,
                player,
                position,
                random,
                score,
                nodes,
                explosions: played.explosions,
                state: session.to_text(),
            }),
            Err(PlayError::Move(e)) if !e.is_illegal_move() => {
                warn!(game_id, %e, "game aborted");
                break Termination::ChainOverflow;
            }
            Err(e) => {
                warn!(game_id, %e, "search produced an unplayable move");
                break Termination::NoMoves;
            }
        }
    };

    GameRecord {
        game_id,
        winner: session.outcome().winner,
        termination,
        plies: session.plies(),
        moves,
        final_state: session.to_text(),
    }
}

/// Plays all configured games and returns them ordered by game id.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    })?;
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Plays all configured games, handing each to `on_game` as it finishes.
pub fn run_self_play_with_callback<F>(
    config: &SelfPlayConfig,
    on_game: F,
) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game)
    } else {
        run_self_play_sequential(config, on_game);
        Ok(())
    }
}

fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let mut rng = config.rng_for(i);
        let game_start = Instant::now();
        let game = play_game(config, i, &mut rng);
        log_game(config, &game, i + 1, game_start);
        on_game(game);
    }
}

fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel::<GameRecord>();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        let completed = AtomicUsize::new(0);
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let mut rng = config_clone.rng_for(i);
                    let game_start = Instant::now();
                    let game = play_game(&config_clone, i, &mut rng);
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    log_game(&config_clone, &game, n, game_start);
                    let _ = tx.send(game);
                });
        });
    });

    for game in rx {
        on_game(game);
    }

    handle.join().map_err(|_| SelfPlayError::WorkerPanicked)
}

fn log_game(config: &SelfPlayConfig, game: &GameRecord, finished: usize, start: Instant) {
    if config.quiet {
        return;
    }
    let winner = game.winner.map(Player::name).unwrap_or("none");
    info!(
        game = game.game_id,
        finished,
        total = config.num_games,
        winner,
        termination = ?game.termination,
        plies = game.plies,
        elapsed_s = start.elapsed().as_secs_f64(),
        "game finished"
    );
}

/// Writes one JSON object per game, one per line.
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> Result<(), SelfPlayError> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Aggregate results of a batch of games.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub games: usize,
    pub red_wins: usize,
    pub blue_wins: usize,
    pub unfinished: usize,
    pub overflows: usize,
    pub avg_plies: f64,
}

impl Summary {
    pub fn from_games(games: &[GameRecord]) -> Self {
        let mut summary = Summary {
            games: games.len(),
            ..Summary::default()
        };
        let mut total_plies = 0u64;
        for game in games {
            total_plies += game.plies as u64;
            match game.winner {
                Some(Player::Red) => summary.red_wins += 1,
                Some(Player::Blue) => summary.blue_wins += 1,
                None => summary.unfinished += 1,
            }
            if game.termination == Termination::ChainOverflow {
                summary.overflows += 1;
            }
        }
        summary.avg_plies = total_plies as f64 / games.len().max(1) as f64;
        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Self-Play Summary ===")?;
        writeln!(f, "Games: {}", self.games)?;
        writeln!(f, "Avg plies/game: {:.1}", self.avg_plies)?;
        writeln!(f, "Red wins: {}", self.red_wins)?;
        writeln!(f, "Blue wins: {}", self.blue_wins)?;
        writeln!(f, "Unfinished: {}", self.unfinished)?;
        write!(f, "Explosion-limit aborts: {}", self.overflows)
    }
}
