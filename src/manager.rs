use crate::chart;
use crate::config::{ChartKind, Config};
use crate::engine::Engine;
use crate::model::{CoinSource, FairCoin, PopulationResult};
use crate::stats::{self, Accumulator};
use anyhow::{Context, Result};
use rand_chacha::ChaCha12Rng;
use std::path::Path;

pub struct Manager {
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(config_file: P) -> Result<Self> {
        let cfg = Config::from_file(config_file).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { cfg })
    }

    pub fn run(&self) -> Result<()> {
        let mut engine = self.build_engine().context("failed to construct engine")?;

        let image_file = &self.cfg.output.image_file;
        match self.cfg.output.chart {
            ChartKind::Scatter => {
                let population = self.simulate_population(&mut engine);
                chart::render_population_scatter(image_file, &population.final_earnings)
                    .context("failed to render scatter chart")?;
            }
            ChartKind::Bars => {
                let population = self.simulate_population(&mut engine);
                chart::render_population_bars(image_file, &population.final_earnings)
                    .context("failed to render bar chart")?;
            }
            ChartKind::Trajectory => {
                let player = engine.play_player();
                log::info!(
                    "final earnings after {} days: {}",
                    self.cfg.game.days_to_play,
                    player.final_earnings
                );
                chart::render_trajectory(image_file, &player.daily_running_total)
                    .context("failed to render trajectory chart")?;
            }
        }
        log::info!("wrote chart to {image_file:?}");

        Ok(())
    }

    fn build_engine(&self) -> Result<Engine<FairCoin<ChaCha12Rng>>> {
        match self.cfg.seed {
            Some(seed) => Engine::from_seed(self.cfg.clone(), seed),
            None => Engine::from_entropy(self.cfg.clone()),
        }
    }

    fn simulate_population<C: CoinSource>(&self, engine: &mut Engine<C>) -> PopulationResult {
        let population = engine.run_population();

        let class = stats::classify(&population.final_earnings);
        log::info!(
            "winners: {}; losers: {}; broke even: {}",
            class.n_winners,
            class.n_losers,
            class.n_even
        );

        let mut acc = Accumulator::new();
        for &earnings in &population.final_earnings {
            acc.add(earnings);
        }
        let report = acc.report();
        log::info!(
            "mean earnings: {:.2} (std dev: {:.2})",
            report.mean,
            report.std_dev
        );

        population
    }
}
