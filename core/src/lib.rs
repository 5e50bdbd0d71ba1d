#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Mole Rush game crates.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Mole Rush.";

/// Describes whether a round is currently being played.
///
/// Outside of an active round the field keeps idling with harmless moles so
/// the attract screen stays lively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Attract mode between rounds; only [`MoleKind::Base`] moles surface.
    Idle,
    /// An active round where every mole kind may surface.
    InProgress,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a mole surface from the provided slot.
    SpawnMole {
        /// Slot that should raise a mole.
        slot: SlotId,
        /// Kind of mole that should surface.
        kind: MoleKind,
        /// Duration the mole stays above ground before retreating.
        life_span: Duration,
        /// Whether the sprite should be mirrored horizontally.
        flip_x: bool,
    },
    /// Reports player contact with the mole occupying the slot.
    HitMole {
        /// Slot the player struck.
        slot: SlotId,
    },
    /// Forces every slot back underground, used on game reset.
    DespawnAll,
    /// Requests that the world transition to the provided game phase.
    SetGamePhase {
        /// Phase the world should activate.
        phase: GamePhase,
    },
    /// Adds the provided points to the running score.
    AddPoints {
        /// Score delta earned by the player.
        points: u32,
    },
    /// Clears the running score back to zero.
    ResetScore,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a mole surfaced from a slot.
    MoleSpawned {
        /// Slot that raised the mole.
        slot: SlotId,
        /// Kind of mole that surfaced.
        kind: MoleKind,
        /// Whether the sprite mirrors horizontally.
        flip_x: bool,
    },
    /// Confirms that a vulnerable mole was struck.
    MoleHit {
        /// Slot whose mole was struck.
        slot: SlotId,
        /// Kind of the struck mole, used for scoring.
        kind: MoleKind,
    },
    /// Announces that a bomb mole detonated.
    MoleExploded {
        /// Slot whose bomb detonated.
        slot: SlotId,
    },
    /// Announces that a mole outlived its lifespan and started retreating.
    MoleRetreating {
        /// Slot whose mole is heading back underground.
        slot: SlotId,
    },
    /// Confirms that a slot finished its cycle and is free again.
    MoleSettled {
        /// Slot that returned to its resting state.
        slot: SlotId,
    },
    /// Announces that the simulation entered a new game phase.
    GamePhaseChanged {
        /// Phase that became active after processing commands.
        phase: GamePhase,
    },
    /// Reports the running score after a points change.
    ScoreChanged {
        /// Total score accumulated this round.
        total: u32,
    },
}

/// Unique identifier assigned to a mole slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(u32);

impl SlotId {
    /// Creates a new slot identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Kinds of moles that can surface from a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoleKind {
    /// Standard mole worth the baseline point value.
    Base,
    /// Rare mole worth a premium point value.
    Gold,
    /// Hazard mole that detonates when struck or when it expires.
    Bomb,
}

impl MoleKind {
    /// Every kind a director may choose from during an active round.
    pub const ALL: [MoleKind; 3] = [MoleKind::Base, MoleKind::Gold, MoleKind::Bomb];
}

/// Animation tracks a slot can play; exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationTrack {
    /// Resting underground loop.
    DownIdle,
    /// Rising out of the ground.
    GoUp,
    /// Above-ground idle loop while vulnerable.
    UpIdle,
    /// Retreating underground after the lifespan expired.
    GoDown,
    /// Reacting to a strike (or a bomb detonation) before settling.
    Hit,
}

/// Movement directions reported by the virtual D-pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Upward on screen.
    Up,
    /// Downward on screen.
    Down,
    /// Toward the left screen edge.
    Left,
    /// Toward the right screen edge.
    Right,
}

/// UI scenes managed by the scene flow system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scene {
    /// Title screen shown on boot.
    Start,
    /// How-to-play screen.
    Instructions,
    /// The playable game screen.
    InGame,
    /// Post-round results screen.
    End,
    /// Ranked score list screen.
    Leaderboard,
    /// Contact-capture screen shown after a round.
    LeadGen,
}

/// Stadium seat that identifies a player on the leaderboard.
///
/// The components arrive as opaque query-string values and are never
/// interpreted beyond equality checks.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatIdentity {
    /// Stadium section the player sits in.
    pub section: String,
    /// Row within the section.
    pub row: String,
    /// Seat within the row.
    pub seat: String,
}

impl SeatIdentity {
    /// Creates a seat identity from its three opaque components.
    #[must_use]
    pub fn new(
        section: impl Into<String>,
        row: impl Into<String>,
        seat: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            row: row.into(),
            seat: seat.into(),
        }
    }
}

/// One ranked row of the leaderboard, ordered server-side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Seat the score belongs to.
    pub seat: SeatIdentity,
    /// Best score recorded for the seat.
    pub high_score: u32,
}

/// Point values awarded per struck mole kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointTable {
    /// Points for striking a [`MoleKind::Base`] mole.
    pub base: u32,
    /// Points for striking a [`MoleKind::Gold`] mole.
    pub gold: u32,
    /// Points for striking a [`MoleKind::Bomb`] mole.
    pub bomb: u32,
}

impl PointTable {
    /// Looks up the point value awarded for striking the provided kind.
    #[must_use]
    pub const fn value_for(&self, kind: MoleKind) -> u32 {
        match kind {
            MoleKind::Base => self.base,
            MoleKind::Gold => self.gold,
            MoleKind::Bomb => self.bomb,
        }
    }
}

impl Default for PointTable {
    fn default() -> Self {
        Self {
            base: 120,
            gold: 350,
            bomb: 20,
        }
    }
}

/// Immutable representation of a single slot's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotSnapshot {
    /// Unique identifier assigned to the slot.
    pub id: SlotId,
    /// Kind of mole currently assigned to the slot.
    pub kind: MoleKind,
    /// Animation track the slot is playing.
    pub track: AnimationTrack,
    /// Indicates whether a mole currently occupies the slot.
    pub is_spawned: bool,
    /// Indicates whether the mole can be struck right now.
    pub is_vulnerable: bool,
    /// Indicates whether the mole was already struck this cycle.
    pub has_been_hit: bool,
    /// Remaining time the mole stays above ground.
    pub life_span_remaining: Duration,
}

/// Read-only snapshot describing every slot in the field.
#[derive(Clone, Debug, Default)]
pub struct SlotView {
    snapshots: Vec<SlotSnapshot>,
}

impl SlotView {
    /// Creates a new slot view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<SlotSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured slot snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &SlotSnapshot> {
        self.snapshots.iter()
    }

    /// Number of slots captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Returns the snapshot stored at the provided index, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SlotSnapshot> {
        self.snapshots.get(index)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<SlotSnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AnimationTrack, LeaderboardEntry, MoleKind, PointTable, SeatIdentity, SlotId, SlotSnapshot,
        SlotView,
    };
    use serde::{de::DeserializeOwned, Serialize};
    use std::time::Duration;

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn slot_id_round_trips_through_bincode() {
        assert_round_trip(&SlotId::new(7));
    }

    #[test]
    fn mole_kind_round_trips_through_bincode() {
        assert_round_trip(&MoleKind::Gold);
    }

    #[test]
    fn leaderboard_entry_round_trips_through_bincode() {
        let entry = LeaderboardEntry {
            seat: SeatIdentity::new("104", "C", "12"),
            high_score: 1_240,
        };
        assert_round_trip(&entry);
    }

    #[test]
    fn point_table_maps_every_kind() {
        let table = PointTable::default();
        assert_eq!(table.value_for(MoleKind::Base), 120);
        assert_eq!(table.value_for(MoleKind::Gold), 350);
        assert_eq!(table.value_for(MoleKind::Bomb), 20);
    }

    #[test]
    fn slot_view_orders_snapshots_by_id() {
        let snapshot = |id: u32| SlotSnapshot {
            id: SlotId::new(id),
            kind: MoleKind::Base,
            track: AnimationTrack::DownIdle,
            is_spawned: false,
            is_vulnerable: false,
            has_been_hit: false,
            life_span_remaining: Duration::ZERO,
        };
        let view = SlotView::from_snapshots(vec![snapshot(4), snapshot(0), snapshot(2)]);
        let ids: Vec<u32> = view.iter().map(|snapshot| snapshot.id.get()).collect();
        assert_eq!(ids, vec![0, 2, 4]);
    }
}
