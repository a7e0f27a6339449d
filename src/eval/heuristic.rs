//! Heuristic position evaluation.
//!
//! Scores a board from one player's perspective using six handcrafted
//! features:
//! - orb differential (own orbs minus opponent orbs)
//! - mobility differential (own legal moves minus opponent legal moves)
//! - critical proximity (own cells one or two orbs short of exploding)
//! - positional stability (corners over edges over interior)
//! - vulnerability (opponent neighbors about to explode into own cells)
//! - chain potential (primed own cells touching opponent cells)
//!
//! Features are computed in a single pass over the grid with no allocation.

use crate::board::{Board, Player};

use super::territorial;
use super::weights::{EvalConfig, EvalKind, Feature};

/// Raw feature values for one player.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Features {
    pub orb_differential: f64,
    pub mobility: f64,
    pub critical_proximity: f64,
    pub stability: f64,
    /// Always zero or negative.
    pub vulnerability: f64,
    pub chain_potential: f64,
}

impl Features {
    /// Computes all six features for `player`.
    pub fn compute(board: &Board, player: Player) -> Features {
        let geometry = board.geometry();
        let opp = player.opponent();

        let mut own_orbs: i32 = 0;
        let mut opp_orbs: i32 = 0;
        let mut own_moves: i32 = 0;
        let mut opp_moves: i32 = 0;
        let mut critical: i32 = 0;
        let mut stability: i32 = 0;
        let mut vulnerability: i32 = 0;
        let mut chain: i32 = 0;

        for (i, cell) in board.cells().iter().enumerate() {
            if cell.accepts(player) {
                own_moves += 1;
            }
            if cell.accepts(opp) {
                opp_moves += 1;
            }

            match cell.owner {
                Some(p) if p == player => {}
                Some(_) => {
                    opp_orbs += cell.orbs as i32;
                    continue;
                }
                None => continue,
            }

            own_orbs += cell.orbs as i32;
            let pos = geometry.position(i);
            let cm = geometry.critical_mass(pos) as i32;
            let orbs = cell.orbs as i32;

            if orbs == cm - 1 {
                critical += 5;
            } else if orbs == cm - 2 {
                critical += 2;
            }

            stability += if geometry.is_corner(pos) {
                4
            } else if geometry.is_edge(pos) {
                2
            } else {
                1
            };

            let primed = orbs == cm - 1;
            for n in geometry.neighbors(pos) {
                let neighbor = board.cell(n);
                if !neighbor.is_owned_by(opp) {
                    continue;
                }
                if neighbor.orbs as i32 >= geometry.critical_mass(n) as i32 - 1 {
                    vulnerability -= 3;
                }
                if primed {
                    chain += 5;
                }
            }
        }

        Features {
            orb_differential: (own_orbs - opp_orbs) as f64,
            mobility: (own_moves - opp_moves) as f64,
            critical_proximity: critical as f64,
            stability: stability as f64,
            vulnerability: vulnerability as f64,
            chain_potential: chain as f64,
        }
    }

    /// Value of a single feature.
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::OrbDifferential => self.orb_differential,
            Feature::Mobility => self.mobility,
            Feature::CriticalProximity => self.critical_proximity,
            Feature::Stability => self.stability,
            Feature::Vulnerability => self.vulnerability,
            Feature::ChainPotential => self.chain_potential,
        }
    }
}

/// Scores `board` for `player` under `config`. Higher is better for `player`.
pub fn evaluate(board: &Board, player: Player, config: &EvalConfig) -> f64 {
    let own = score(board, player, config.kind);
    if config.symmetric {
        own - score(board, player.opponent(), config.kind)
    } else {
        own
    }
}

/// Scores `board` for `player` with the default phased weights.
pub fn evaluate_default(board: &Board, player: Player) -> f64 {
    evaluate(board, player, &EvalConfig::default())
}

fn score(board: &Board, player: Player, kind: EvalKind) -> f64 {
    match kind {
        EvalKind::Weighted(weighting) => {
            let features = Features::compute(board, player);
            weighting.weights_for(board).combine(&features)
        }
        EvalKind::Single(feature) => Features::compute(board, player).get(feature),
        EvalKind::Territorial => territorial::score(board, player),
    }
}
