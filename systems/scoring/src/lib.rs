#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that converts successful hits into score deltas.

use mole_rush_core::{Command, Event, PointTable};

/// Scoring system that maps struck mole kinds to configured point values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scoring {
    table: PointTable,
}

impl Scoring {
    /// Creates a new scoring system using the provided point table.
    #[must_use]
    pub const fn new(table: PointTable) -> Self {
        Self { table }
    }

    /// Emits one `Command::AddPoints` per hit reported by the world.
    pub fn handle(&self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::MoleHit { kind, .. } = event {
                out.push(Command::AddPoints {
                    points: self.table.value_for(*kind),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mole_rush_core::{MoleKind, SlotId};

    #[test]
    fn each_hit_yields_its_configured_value() {
        let scoring = Scoring::new(PointTable {
            base: 100,
            gold: 300,
            bomb: 10,
        });
        let events = vec![
            Event::MoleHit {
                slot: SlotId::new(0),
                kind: MoleKind::Gold,
            },
            Event::MoleRetreating {
                slot: SlotId::new(1),
            },
            Event::MoleHit {
                slot: SlotId::new(2),
                kind: MoleKind::Bomb,
            },
        ];

        let mut out = Vec::new();
        scoring.handle(&events, &mut out);

        assert_eq!(
            out,
            vec![
                Command::AddPoints { points: 300 },
                Command::AddPoints { points: 10 },
            ],
        );
    }
}
