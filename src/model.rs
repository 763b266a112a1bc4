//! Core game data types.

use anyhow::{Context, Result};
use rand::prelude::*;
use rand_distr::Bernoulli;

/// Outcome of a single coin toss.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Coin {
    Heads,
    Tails,
}

impl Coin {
    /// Signed payoff of the toss: +1 for heads, -1 for tails.
    pub fn payoff(self) -> i64 {
        match self {
            Coin::Heads => 1,
            Coin::Tails => -1,
        }
    }
}

/// Source of coin tosses, uniformly distributed and independent across calls.
pub trait CoinSource {
    fn toss(&mut self) -> Coin;
}

/// Fair coin drawn from an injected random number generator.
pub struct FairCoin<R: Rng> {
    rng: R,
    dist: Bernoulli,
}

impl<R: Rng> FairCoin<R> {
    pub fn new(rng: R) -> Result<Self> {
        let dist = Bernoulli::new(0.5).context("failed to construct coin distribution")?;
        Ok(Self { rng, dist })
    }
}

impl<R: Rng> CoinSource for FairCoin<R> {
    fn toss(&mut self) -> Coin {
        if self.dist.sample(&mut self.rng) {
            Coin::Heads
        } else {
            Coin::Tails
        }
    }
}

/// Result of one player's full game.
///
/// Created fresh per simulated player, fully computed within a single
/// [`crate::engine::Engine::play_player`] call, then immutable.
#[derive(Debug, PartialEq, Clone)]
pub struct PlayerResult {
    /// Cumulative earnings after the last day.
    pub final_earnings: f64,
    /// Cumulative earnings through each day, one entry per day played.
    pub daily_running_total: Vec<f64>,
}

/// Final earnings of every player in one batch run.
#[derive(Debug, PartialEq, Clone)]
pub struct PopulationResult {
    pub final_earnings: Vec<f64>,
}

#[cfg(test)]
pub mod testing {
    use super::{Coin, CoinSource};

    /// Coin source replaying a fixed script of tosses.
    pub struct ScriptedCoin {
        script: Vec<Coin>,
        next: usize,
    }

    impl ScriptedCoin {
        pub fn new(script: Vec<Coin>) -> Self {
            Self { script, next: 0 }
        }

        /// Number of tosses drawn so far.
        pub fn tosses_made(&self) -> usize {
            self.next
        }
    }

    impl CoinSource for ScriptedCoin {
        fn toss(&mut self) -> Coin {
            let coin = self.script[self.next];
            self.next += 1;
            coin
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn payoffs_are_signed_units() {
        assert_eq!(Coin::Heads.payoff(), 1);
        assert_eq!(Coin::Tails.payoff(), -1);
    }

    #[test]
    fn fair_coin_draws_both_sides() {
        let rng = ChaCha12Rng::seed_from_u64(0);
        let mut coin = FairCoin::new(rng).unwrap();

        let mut heads = 0usize;
        let n = 10_000;
        for _ in 0..n {
            if coin.toss() == Coin::Heads {
                heads += 1;
            }
        }

        // Loose bound: a fair coin stays well inside this over 10k draws.
        assert!(heads > n * 4 / 10 && heads < n * 6 / 10, "heads = {heads}");
    }
}
