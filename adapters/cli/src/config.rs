use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use mole_rush_core::PointTable;
use mole_rush_system_wave_director::Config as WaveConfig;
use serde::Deserialize;

/// On-disk demo configuration overriding wave cadence and point values.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DemoConfig {
    /// Wave cadence overrides.
    pub wave: WaveSection,
    /// Point value overrides.
    pub points: PointsSection,
}

/// Wave cadence expressed in seconds, mirroring the director defaults.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WaveSection {
    /// Seconds a surfaced mole stays above ground.
    pub time_above_ground: f32,
    /// Half-width of the random spread applied to the ground time.
    pub ground_time_variance: f32,
    /// Seconds between consecutive wave attempts.
    pub time_between_waves: f32,
    /// Half-width of the random spread applied to the wave gap.
    pub wave_time_variance: f32,
    /// Fresh slots rolled after the first pick turns out occupied.
    pub retry_limit: u32,
}

impl Default for WaveSection {
    fn default() -> Self {
        Self {
            time_above_ground: 4.0,
            ground_time_variance: 0.0,
            time_between_waves: 1.0,
            wave_time_variance: 0.5,
            retry_limit: 1,
        }
    }
}

/// Points awarded per struck mole kind.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PointsSection {
    /// Points for a base mole.
    pub base: u32,
    /// Points for a gold mole.
    pub gold: u32,
    /// Points for a bomb.
    pub bomb: u32,
}

impl Default for PointsSection {
    fn default() -> Self {
        let table = PointTable::default();
        Self {
            base: table.base,
            gold: table.gold,
            bomb: table.bomb,
        }
    }
}

impl DemoConfig {
    /// Loads and parses the configuration from the provided TOML file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config at {}", path.display()))
    }

    /// Builds the wave director configuration for the provided seed.
    pub(crate) fn wave_config(&self, seed: u64) -> WaveConfig {
        WaveConfig::new(
            seconds(self.wave.time_above_ground),
            seconds(self.wave.ground_time_variance),
            seconds(self.wave.time_between_waves),
            seconds(self.wave.wave_time_variance),
            self.wave.retry_limit,
            seed,
        )
    }

    /// Builds the point table used by the scoring system.
    pub(crate) fn point_table(&self) -> PointTable {
        PointTable {
            base: self.points.base,
            gold: self.points.gold,
            bomb: self.points.bomb,
        }
    }
}

fn seconds(value: f32) -> Duration {
    Duration::from_secs_f32(value.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_the_director_and_point_table() {
        let config = DemoConfig::default();
        assert_eq!(config.point_table(), PointTable::default());
        assert_eq!(seconds(config.wave.time_above_ground), Duration::from_secs(4));
    }

    #[test]
    fn partial_files_fall_back_to_defaults() {
        let config: DemoConfig = toml::from_str("[points]\ngold = 500\n").unwrap();
        assert_eq!(config.points.gold, 500);
        assert_eq!(config.points.base, PointTable::default().base);
        assert_eq!(config.wave.retry_limit, 1);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed: Result<DemoConfig, _> = toml::from_str("[wave]\ncadence = 2.0\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn negative_durations_clamp_to_zero() {
        assert_eq!(seconds(-1.5), Duration::ZERO);
    }
}
