use crate::config::{Config, StoppingRule};
use crate::model::{CoinSource, FairCoin, PlayerResult, PopulationResult};
use anyhow::Result;
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;

/// Simulation engine.
///
/// Holds the configuration and the coin source, and plays the game
/// day by day for one player or a whole population.
pub struct Engine<C: CoinSource> {
    cfg: Config,
    coin: C,
}

impl Engine<FairCoin<ChaCha12Rng>> {
    /// Create a new `Engine` with a coin generator seeded from OS entropy.
    pub fn from_entropy(cfg: Config) -> Result<Self> {
        let rng = ChaCha12Rng::try_from_os_rng()?;
        Ok(Self::with_coin(cfg, FairCoin::new(rng)?))
    }

    /// Create a new `Engine` with a fixed generator seed.
    ///
    /// Two engines built from the same configuration and seed produce
    /// identical results.
    pub fn from_seed(cfg: Config, seed: u64) -> Result<Self> {
        let rng = ChaCha12Rng::seed_from_u64(seed);
        Ok(Self::with_coin(cfg, FairCoin::new(rng)?))
    }
}

impl<C: CoinSource> Engine<C> {
    /// Create a new `Engine` drawing tosses from the given coin source.
    pub fn with_coin(cfg: Config, coin: C) -> Self {
        Self { cfg, coin }
    }

    /// Play the full game for `people_playing` independent players and
    /// collect their final earnings.
    pub fn run_population(&mut self) -> PopulationResult {
        let people = self.cfg.population.people_playing;

        let mut final_earnings = Vec::with_capacity(people);
        for _ in 0..people {
            final_earnings.push(self.play_player().final_earnings);
        }

        PopulationResult { final_earnings }
    }

    /// Play `days_to_play` daily sessions for one player, starting from
    /// zero earnings, recording the running total after each day.
    pub fn play_player(&mut self) -> PlayerResult {
        let days = self.cfg.game.days_to_play;

        let mut daily_running_total = Vec::with_capacity(days);
        let mut cumulative_earnings = 0.0;
        for _ in 0..days {
            cumulative_earnings = self.play_day(cumulative_earnings);
            daily_running_total.push(cumulative_earnings);
        }

        PlayerResult {
            final_earnings: cumulative_earnings,
            daily_running_total,
        }
    }

    /// Play one day's tosses under the configured stopping rule, returning
    /// the updated cumulative earnings.
    fn play_day(&mut self, mut cumulative_earnings: f64) -> f64 {
        let max_tosses = self.cfg.game.max_tosses_per_day;

        // FixedTosses never stops early: its only effect is the loop bound.
        let tosses_today = match self.cfg.game.stopping_rule {
            StoppingRule::FixedTosses { count } => count.min(max_tosses),
            StoppingRule::DailyGain { .. } => max_tosses,
        };

        let mut daily_total: i64 = 0;
        for _ in 0..tosses_today {
            let payoff = self.coin.toss().payoff();
            daily_total += payoff;
            cumulative_earnings += payoff as f64;

            if let StoppingRule::DailyGain { threshold } = self.cfg.game.stopping_rule {
                if daily_total >= threshold {
                    break;
                }
            }
        }

        cumulative_earnings
    }
}
