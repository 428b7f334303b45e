//! Random log selection, biased toward interesting sessions.
//!
//! Scores are an inverse proxy for effort: very high scores are one-move
//! solves and 0 means the attempt failed. Selection tries a series of score
//! bands from narrowest to widest and draws uniformly from the first band
//! that has any logs.

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::index::Index;

/// A score filter, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 85000 ≤ score ≤ 93000.
    Ideal,
    /// 85000 ≤ score < 98000.
    Wider,
    /// 0 < score < 98000.
    Safe,
    /// Any score.
    All,
}

impl ScoreBand {
    pub const ORDER: [Self; 4] = [Self::Ideal, Self::Wider, Self::Safe, Self::All];

    pub fn contains(self, score: i64) -> bool {
        match self {
            Self::Ideal => (85_000..=93_000).contains(&score),
            Self::Wider => (85_000..98_000).contains(&score),
            Self::Safe => score > 0 && score < 98_000,
            Self::All => true,
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ideal => "ideal",
            Self::Wider => "wider",
            Self::Safe => "safe",
            Self::All => "all",
        })
    }
}

/// The chosen log, by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub task_id: String,
    pub log_id: u64,
    pub score: i64,
    pub band: ScoreBand,
}

/// The logs of the first non-empty band, with that band.
///
/// `None` only when the index has no logs at all.
pub fn candidates(index: &Index) -> Option<(ScoreBand, Vec<(&str, u64, i64)>)> {
    ScoreBand::ORDER.into_iter().find_map(|band| {
        let pool: Vec<_> = index
            .logs()
            .filter(|(_, log)| band.contains(log.score))
            .map(|(task_id, log)| (task_id, log.log_id, log.score))
            .collect();
        (!pool.is_empty()).then_some((band, pool))
    })
}

/// Picks one log uniformly from the first non-empty band.
pub fn select<R: Rng>(index: &Index, rng: &mut R) -> Option<Selection> {
    let (band, pool) = candidates(index)?;
    let (task_id, log_id, score) = pool[rng.random_range(0..pool.len())];
    Some(Selection {
        task_id: task_id.to_string(),
        log_id,
        score,
        band,
    })
}

/// The selection RNG: seeded when `seed` is given, otherwise from entropy.
pub fn rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}

/// How many logs fall in each band. Bands overlap.
pub fn band_sizes(index: &Index) -> Vec<(ScoreBand, usize)> {
    ScoreBand::ORDER
        .into_iter()
        .map(|band| {
            let n = index.logs().filter(|(_, l)| band.contains(l.score)).count();
            (band, n)
        })
        .collect()
}
