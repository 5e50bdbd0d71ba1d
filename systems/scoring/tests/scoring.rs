use std::time::Duration;

use mole_rush_core::{Command, MoleKind, PointTable, SlotId};
use mole_rush_system_scoring::Scoring;
use mole_rush_world::{self as world, query, World};

#[test]
fn hits_flow_through_to_the_world_score() {
    let mut world = World::with_slot_count(2);
    let scoring = Scoring::new(PointTable::default());

    let mut events = Vec::new();
    for (slot, kind) in [(0, MoleKind::Base), (1, MoleKind::Gold)] {
        world::apply(
            &mut world,
            Command::SpawnMole {
                slot: SlotId::new(slot),
                kind,
                life_span: Duration::from_secs(4),
                flip_x: false,
            },
            &mut events,
        );
        world::apply(
            &mut world,
            Command::HitMole {
                slot: SlotId::new(slot),
            },
            &mut events,
        );
    }

    let mut commands = Vec::new();
    scoring.handle(&events, &mut commands);
    for command in commands {
        world::apply(&mut world, command, &mut Vec::new());
    }

    assert_eq!(query::score(&world), 120 + 350);
}

#[test]
fn duplicate_contacts_never_double_score() {
    let mut world = World::with_slot_count(1);
    let scoring = Scoring::new(PointTable::default());

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnMole {
            slot: SlotId::new(0),
            kind: MoleKind::Base,
            life_span: Duration::from_secs(4),
            flip_x: false,
        },
        &mut events,
    );
    for _ in 0..3 {
        world::apply(
            &mut world,
            Command::HitMole {
                slot: SlotId::new(0),
            },
            &mut events,
        );
    }

    let mut commands = Vec::new();
    scoring.handle(&events, &mut commands);
    for command in commands {
        world::apply(&mut world, command, &mut Vec::new());
    }

    assert_eq!(query::score(&world), 120);
}
