#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave director that decides when and where moles surface.

use std::time::Duration;

use mole_rush_core::{Command, Event, GamePhase, MoleKind, SlotView};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the wave director.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    time_above_ground: Duration,
    ground_time_variance: Duration,
    time_between_waves: Duration,
    wave_time_variance: Duration,
    retry_limit: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided cadence and seed.
    ///
    /// `retry_limit` bounds how many fresh slots are rolled after the first
    /// pick turns out to be occupied; the classic behaviour is a single
    /// retry.
    #[must_use]
    pub const fn new(
        time_above_ground: Duration,
        ground_time_variance: Duration,
        time_between_waves: Duration,
        wave_time_variance: Duration,
        retry_limit: u32,
        rng_seed: u64,
    ) -> Self {
        Self {
            time_above_ground,
            ground_time_variance,
            time_between_waves,
            wave_time_variance,
            retry_limit,
            rng_seed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_above_ground: Duration::from_secs(4),
            ground_time_variance: Duration::ZERO,
            time_between_waves: Duration::from_secs(1),
            wave_time_variance: Duration::from_millis(500),
            retry_limit: 1,
            rng_seed: 0,
        }
    }
}

/// Pure system that paces mole waves and selects which slot surfaces next.
#[derive(Debug)]
pub struct WaveDirector {
    config: Config,
    time_to_next_wave: Duration,
    rng: ChaCha8Rng,
}

impl WaveDirector {
    /// Creates a new wave director using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        let time_to_next_wave = sample_around(
            &mut rng,
            config.time_between_waves,
            config.wave_time_variance,
        );
        Self {
            config,
            time_to_next_wave,
            rng,
        }
    }

    /// Consumes events and the slot view to emit spawn commands.
    ///
    /// The countdown is re-randomised after every spawn attempt, whether or
    /// not the attempt found a free slot.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: GamePhase,
        slots: &SlotView,
        out: &mut Vec<Command>,
    ) {
        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }

        if accumulated.is_zero() {
            return;
        }

        self.time_to_next_wave = self.time_to_next_wave.saturating_sub(accumulated);
        if !self.time_to_next_wave.is_zero() {
            return;
        }

        self.attempt_spawn(phase, slots, out);
        self.time_to_next_wave = sample_around(
            &mut self.rng,
            self.config.time_between_waves,
            self.config.wave_time_variance,
        );
    }

    /// Best-effort spawn: one initial roll plus up to `retry_limit` fresh
    /// rolls, after which the wave is silently dropped.
    fn attempt_spawn(&mut self, phase: GamePhase, slots: &SlotView, out: &mut Vec<Command>) {
        if slots.is_empty() {
            return;
        }

        let life_span = sample_around(
            &mut self.rng,
            self.config.time_above_ground,
            self.config.ground_time_variance,
        );
        let kind = if phase == GamePhase::InProgress {
            MoleKind::ALL[self.rng.gen_range(0..MoleKind::ALL.len())]
        } else {
            MoleKind::Base
        };
        let flip_x = self.rng.gen_bool(0.5);

        for _ in 0..=self.config.retry_limit {
            let index = self.rng.gen_range(0..slots.len());
            let Some(snapshot) = slots.get(index) else {
                return;
            };
            if !snapshot.is_spawned {
                out.push(Command::SpawnMole {
                    slot: snapshot.id,
                    kind,
                    life_span,
                    flip_x,
                });
                return;
            }
        }
    }
}

fn sample_around(rng: &mut ChaCha8Rng, base: Duration, variance: Duration) -> Duration {
    let variance_secs = variance.as_secs_f32();
    if variance_secs <= 0.0 {
        return base;
    }
    let offset = rng.gen_range(-variance_secs..variance_secs);
    let sampled = (base.as_secs_f32() + offset).max(0.0);
    Duration::from_secs_f32(sampled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_stays_within_the_configured_window() {
        let config = Config::new(
            Duration::from_secs(4),
            Duration::ZERO,
            Duration::from_secs(2),
            Duration::from_millis(500),
            1,
            0x5eed,
        );
        let mut director = WaveDirector::new(config);
        let slots = SlotView::default();

        for _ in 0..32 {
            let mut out = Vec::new();
            director.handle(
                &[Event::TimeAdvanced {
                    dt: Duration::from_secs(10),
                }],
                GamePhase::InProgress,
                &slots,
                &mut out,
            );
            assert!(director.time_to_next_wave >= Duration::from_millis(1_500));
            assert!(director.time_to_next_wave <= Duration::from_millis(2_500));
        }
    }

    #[test]
    fn zero_variance_keeps_the_base_cadence() {
        let config = Config::new(
            Duration::from_secs(4),
            Duration::ZERO,
            Duration::from_secs(1),
            Duration::ZERO,
            1,
            7,
        );
        let director = WaveDirector::new(config);
        assert_eq!(director.time_to_next_wave, Duration::from_secs(1));
    }
}
