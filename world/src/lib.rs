#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative mole field state management for Mole Rush.

use std::time::Duration;

use mole_rush_core::{
    AnimationTrack, Command, Event, GamePhase, MoleKind, SlotId, SlotSnapshot, SlotView,
};

const DEFAULT_SLOT_COUNT: u32 = 9;

/// Playback rate shared by every slot animation clip, in frames per second.
const ANIMATION_FRAME_RATE: f32 = 10.0;

/// Frame index at which the rise and retreat clips hand over to the next track.
const RISE_COMPLETE_FRAME: u32 = 9;
/// Frame index at which the hit clip and the shorter bomb retreat complete.
const HIT_COMPLETE_FRAME: u32 = 6;

/// Represents the authoritative Mole Rush world state.
#[derive(Debug)]
pub struct World {
    slots: Vec<Slot>,
    phase: GamePhase,
    score: u32,
}

impl World {
    /// Creates a new world with the default number of mole slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_slot_count(DEFAULT_SLOT_COUNT)
    }

    /// Creates a new world with the provided number of mole slots.
    #[must_use]
    pub fn with_slot_count(slot_count: u32) -> Self {
        let slots = (0..slot_count).map(|id| Slot::new(SlotId::new(id))).collect();
        Self {
            slots,
            phase: GamePhase::Idle,
            score: 0,
        }
    }

    fn slot_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|slot| slot.id == id)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            for slot in world.slots.iter_mut() {
                slot.tick(dt, out_events);
            }
        }
        Command::SpawnMole {
            slot,
            kind,
            life_span,
            flip_x,
        } => {
            if let Some(slot) = world.slot_mut(slot) {
                slot.spawn(kind, life_span, flip_x, out_events);
            }
        }
        Command::HitMole { slot } => {
            if let Some(slot) = world.slot_mut(slot) {
                slot.receive_hit(out_events);
            }
        }
        Command::DespawnAll => {
            for slot in world.slots.iter_mut() {
                slot.force_despawn(out_events);
            }
        }
        Command::SetGamePhase { phase } => {
            if world.phase != phase {
                world.phase = phase;
                out_events.push(Event::GamePhaseChanged { phase });
            }
        }
        Command::AddPoints { points } => {
            world.score = world.score.saturating_add(points);
            out_events.push(Event::ScoreChanged { total: world.score });
        }
        Command::ResetScore => {
            world.score = 0;
            out_events.push(Event::ScoreChanged { total: 0 });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use mole_rush_core::{GamePhase, SlotSnapshot, SlotView};

    /// Captures a read-only view of every slot in the field.
    #[must_use]
    pub fn slot_view(world: &World) -> SlotView {
        let snapshots: Vec<SlotSnapshot> =
            world.slots.iter().map(|slot| slot.snapshot()).collect();
        SlotView::from_snapshots(snapshots)
    }

    /// Reports the phase the world is currently simulating.
    #[must_use]
    pub fn game_phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Reports the running score accumulated this round.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }
}

#[derive(Clone, Debug)]
struct Slot {
    id: SlotId,
    kind: MoleKind,
    track: AnimationTrack,
    track_clock: Duration,
    life_span_remaining: Duration,
    is_spawned: bool,
    is_vulnerable: bool,
    has_been_hit: bool,
}

impl Slot {
    fn new(id: SlotId) -> Self {
        Self {
            id,
            kind: MoleKind::Base,
            track: AnimationTrack::DownIdle,
            track_clock: Duration::ZERO,
            life_span_remaining: Duration::ZERO,
            is_spawned: false,
            is_vulnerable: false,
            has_been_hit: false,
        }
    }

    fn snapshot(&self) -> SlotSnapshot {
        SlotSnapshot {
            id: self.id,
            kind: self.kind,
            track: self.track,
            is_spawned: self.is_spawned,
            is_vulnerable: self.is_vulnerable,
            has_been_hit: self.has_been_hit,
            life_span_remaining: self.life_span_remaining,
        }
    }

    fn spawn(
        &mut self,
        kind: MoleKind,
        life_span: Duration,
        flip_x: bool,
        out_events: &mut Vec<Event>,
    ) {
        // A slot cannot be double-booked while its current cycle is running.
        if self.is_spawned {
            return;
        }

        self.kind = kind;
        self.life_span_remaining = life_span;
        self.is_spawned = true;
        self.is_vulnerable = true;
        self.has_been_hit = false;
        self.play(AnimationTrack::GoUp);
        out_events.push(Event::MoleSpawned {
            slot: self.id,
            kind,
            flip_x,
        });
    }

    fn receive_hit(&mut self, out_events: &mut Vec<Event>) {
        // Late or duplicate contacts are dropped, not errors.
        if !self.is_vulnerable || self.has_been_hit {
            return;
        }

        self.life_span_remaining = Duration::ZERO;
        self.has_been_hit = true;
        self.play(AnimationTrack::Hit);
        out_events.push(Event::MoleHit {
            slot: self.id,
            kind: self.kind,
        });
        if self.kind == MoleKind::Bomb {
            out_events.push(Event::MoleExploded { slot: self.id });
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.is_up() {
            self.life_span_remaining = self.life_span_remaining.saturating_sub(dt);
            if self.life_span_remaining.is_zero() {
                self.retreat(out_events);
            }
        }

        self.track_clock = self.track_clock.saturating_add(dt);
        let frame = self.current_frame();

        match self.track {
            AnimationTrack::GoUp => {
                if frame >= RISE_COMPLETE_FRAME {
                    self.play(AnimationTrack::UpIdle);
                }
            }
            AnimationTrack::GoDown => {
                let complete = if self.kind == MoleKind::Bomb {
                    HIT_COMPLETE_FRAME
                } else {
                    RISE_COMPLETE_FRAME
                };
                if frame >= complete {
                    self.settle(out_events);
                }
            }
            AnimationTrack::Hit => {
                if frame >= HIT_COMPLETE_FRAME {
                    self.settle(out_events);
                }
            }
            AnimationTrack::DownIdle | AnimationTrack::UpIdle => {}
        }
    }

    /// Natural end of the mole's time above ground.
    fn retreat(&mut self, out_events: &mut Vec<Event>) {
        if self.kind == MoleKind::Bomb {
            // An expired bomb still detonates, exactly once, and reuses the
            // hit track for its blast animation.
            self.has_been_hit = true;
            self.play(AnimationTrack::Hit);
            out_events.push(Event::MoleExploded { slot: self.id });
        } else {
            self.play(AnimationTrack::GoDown);
            out_events.push(Event::MoleRetreating { slot: self.id });
        }
    }

    fn force_despawn(&mut self, out_events: &mut Vec<Event>) {
        let was_spawned = self.is_spawned;
        self.settle_state();
        if was_spawned {
            out_events.push(Event::MoleSettled { slot: self.id });
        }
    }

    fn settle(&mut self, out_events: &mut Vec<Event>) {
        self.settle_state();
        out_events.push(Event::MoleSettled { slot: self.id });
    }

    /// Returns the slot to its resting state; it may be spawned again.
    fn settle_state(&mut self) {
        self.is_vulnerable = false;
        self.has_been_hit = false;
        self.is_spawned = false;
        self.life_span_remaining = Duration::ZERO;
        self.play(AnimationTrack::DownIdle);
    }

    fn play(&mut self, track: AnimationTrack) {
        self.track = track;
        self.track_clock = Duration::ZERO;
    }

    fn is_up(&self) -> bool {
        self.is_spawned
            && matches!(self.track, AnimationTrack::GoUp | AnimationTrack::UpIdle)
    }

    fn current_frame(&self) -> u32 {
        (self.track_clock.as_secs_f32() * ANIMATION_FRAME_RATE) as u32
    }
}
