use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Debug,
    fs,
    ops::RangeBounds,
    path::{Path, PathBuf},
};

/// Simulation configuration parameters.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fixed seed for the coin generator; drawn from OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Rules of the game every player plays.
    pub game: GameConfig,
    /// Size of the simulated population.
    pub population: PopulationConfig,
    /// Chart written after the run.
    pub output: OutputConfig,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Hard cap on coin tosses in a single day.
    pub max_tosses_per_day: usize,
    /// Number of days each player plays.
    pub days_to_play: usize,
    /// Policy deciding when a day ends before the cap is reached.
    pub stopping_rule: StoppingRule,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of independent players in one batch run.
    pub people_playing: usize,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Kind of chart to render.
    pub chart: ChartKind,
    /// Path of the PNG image, overwritten if it exists.
    pub image_file: PathBuf,
}

/// Policy deciding when a daily session ends before the toss cap is reached.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum StoppingRule {
    /// Stop tossing for the day once the daily total reaches `threshold`.
    DailyGain { threshold: i64 },
    /// Toss exactly `count` times (or until the daily cap), no early stop.
    FixedTosses { count: usize },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Final earnings of every player, one dot per player.
    Scatter,
    /// Final earnings of every player, sorted bars against a zero baseline.
    Bars,
    /// A single player's cumulative earnings against the day index.
    Trajectory,
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML-encoded and contain a serialized [`Config`].
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        check_num(self.game.max_tosses_per_day, 1..1_000_000)
            .context("invalid maximum number of tosses per day")?;
        check_num(self.game.days_to_play, 1..1_000_000).context("invalid number of days to play")?;

        match self.game.stopping_rule {
            StoppingRule::DailyGain { threshold } => {
                check_num(threshold, 1..).context("invalid daily gain threshold")?;
            }
            StoppingRule::FixedTosses { count } => {
                check_num(count, 1..).context("invalid fixed toss count")?;
            }
        }

        check_num(self.population.people_playing, 1..10_000_000)
            .context("invalid number of people playing")?;

        // Comparative charts need at least two players to compare.
        if matches!(self.output.chart, ChartKind::Scatter | ChartKind::Bars) {
            check_num(self.population.people_playing, 2..)
                .context("invalid number of people playing for a comparative chart")?;
        }

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_toml() -> &'static str {
        r#"
seed = 42

[game]
max_tosses_per_day = 400
days_to_play = 768

[game.stopping_rule]
rule = "daily_gain"
threshold = 10

[population]
people_playing = 1000

[output]
chart = "scatter"
image_file = "/tmp/chart.png"
"#
    }

    #[test]
    fn sample_config_parses_and_validates() {
        let cfg: Config = toml::from_str(sample_toml()).unwrap();
        cfg.validate().unwrap();

        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.game.max_tosses_per_day, 400);
        assert_eq!(
            cfg.game.stopping_rule,
            StoppingRule::DailyGain { threshold: 10 }
        );
        assert_eq!(cfg.output.chart, ChartKind::Scatter);
    }

    #[test]
    fn fixed_tosses_rule_parses() {
        let toml_str = sample_toml().replace(
            "rule = \"daily_gain\"\nthreshold = 10",
            "rule = \"fixed_tosses\"\ncount = 400",
        );
        let cfg: Config = toml::from_str(&toml_str).unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.game.stopping_rule, StoppingRule::FixedTosses { count: 400 });
    }

    #[test]
    fn seed_is_optional() {
        let toml_str = sample_toml().replace("seed = 42\n", "");
        let cfg: Config = toml::from_str(&toml_str).unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn non_positive_bounds_are_rejected() {
        let zero_days = sample_toml().replace("days_to_play = 768", "days_to_play = 0");
        let cfg: Config = toml::from_str(&zero_days).unwrap();
        assert!(cfg.validate().is_err());

        let zero_cap = sample_toml().replace("max_tosses_per_day = 400", "max_tosses_per_day = 0");
        let cfg: Config = toml::from_str(&zero_cap).unwrap();
        assert!(cfg.validate().is_err());

        let zero_threshold = sample_toml().replace("threshold = 10", "threshold = 0");
        let cfg: Config = toml::from_str(&zero_threshold).unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn comparative_charts_need_two_players() {
        let lone_player = sample_toml().replace("people_playing = 1000", "people_playing = 1");
        let cfg: Config = toml::from_str(&lone_player).unwrap();
        assert!(cfg.validate().is_err());

        // A lone player is fine when charting a trajectory.
        let trajectory = lone_player.replace("chart = \"scatter\"", "chart = \"trajectory\"");
        let cfg: Config = toml::from_str(&trajectory).unwrap();
        cfg.validate().unwrap();
    }
}
