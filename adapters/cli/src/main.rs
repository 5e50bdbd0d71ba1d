#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Mole Rush round.
//!
//! The binary boots the scene flow, plays one seeded round with a simulated
//! player swinging at surfaced moles, then walks the leaderboard protocol
//! against a scripted server so the whole loop can be observed offline.

mod config;

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;
use mole_rush_core::{
    Command, Event, GamePhase, LeaderboardEntry, Scene, SeatIdentity, SlotId, WELCOME_BANNER,
};
use mole_rush_system_leaderboard::{
    LeaderboardClient, ServerMessage, SessionIdentity, SubmissionDecision, DEFAULT_UPDATE_INTERVAL,
};
use mole_rush_system_scene_flow::SceneFlow;
use mole_rush_system_scoring::Scoring;
use mole_rush_system_wave_director::WaveDirector;
use mole_rush_world::{self as world, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::DemoConfig;

/// Fixed simulation step; ten ticks per simulated second.
const TICK: Duration = Duration::from_millis(100);

/// Command-line arguments accepted by the demo binary.
#[derive(Debug, Parser)]
#[command(name = "mole-rush", about = "Runs a headless Mole Rush demo round")]
struct Args {
    /// Path to a TOML file overriding wave cadence and point values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of simulation ticks the round lasts.
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Seed shared by the wave director and the simulated player.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of mole slots in the field.
    #[arg(long, default_value_t = 9)]
    slots: u32,
}

/// Entry point for the Mole Rush command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);

    println!("{WELCOME_BANNER}");
    println!("seed {seed}, {} slots, {} ticks", args.slots, args.ticks);

    let mut flow = SceneFlow::new(Duration::from_millis(400));
    for intent in flow.initial_intents() {
        println!("scene: {intent:?}");
    }
    let mut intents = Vec::new();
    flow.change_scene(Scene::InGame, &mut intents);
    report_intents(&mut intents);

    let score = play_round(&args, &config, seed);

    flow.change_scene(Scene::End, &mut intents);
    report_intents(&mut intents);
    flow.change_scene(Scene::Leaderboard, &mut intents);
    report_intents(&mut intents);

    leaderboard_session(score);
    Ok(())
}

/// Runs one seeded round and returns the final score.
fn play_round(args: &Args, config: &DemoConfig, seed: u64) -> u32 {
    let mut world = World::with_slot_count(args.slots);
    let mut director = WaveDirector::new(config.wave_config(seed));
    let scoring = Scoring::new(config.point_table());
    let mut player = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));

    let mut events = Vec::new();
    let mut commands = Vec::new();
    world::apply(
        &mut world,
        Command::SetGamePhase {
            phase: GamePhase::InProgress,
        },
        &mut events,
    );

    let mut pending_swings: Vec<(u32, SlotId)> = Vec::new();
    let mut surfaced = 0_u32;
    let mut struck = 0_u32;
    let mut detonated = 0_u32;

    for tick in 0..args.ticks {
        events.clear();
        world::apply(&mut world, Command::Tick { dt: TICK }, &mut events);

        let view = world::query::slot_view(&world);
        let phase = world::query::game_phase(&world);
        director.handle(&events, phase, &view, &mut commands);
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }

        // The simulated player swings at most freshly surfaced moles after a
        // short human-like reaction delay.
        let spawned: Vec<SlotId> = events
            .iter()
            .filter_map(|event| match event {
                Event::MoleSpawned { slot, .. } => Some(*slot),
                _ => None,
            })
            .collect();
        for slot in spawned {
            if player.gen_bool(0.75) {
                let delay = player.gen_range(3..=10);
                pending_swings.push((tick + delay, slot));
            }
        }

        let mut due = Vec::new();
        pending_swings.retain(|(at, slot)| {
            if *at <= tick {
                due.push(*slot);
                false
            } else {
                true
            }
        });
        for slot in due {
            world::apply(&mut world, Command::HitMole { slot }, &mut events);
        }

        scoring.handle(&events, &mut commands);
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }

        for event in &events {
            match event {
                Event::MoleSpawned { slot, kind, .. } => {
                    surfaced += 1;
                    println!("tick {tick:3}: {kind:?} mole up at slot {}", slot.get());
                }
                Event::MoleHit { slot, kind } => {
                    struck += 1;
                    println!("tick {tick:3}: {kind:?} mole struck at slot {}", slot.get());
                }
                Event::MoleExploded { slot } => {
                    detonated += 1;
                    println!("tick {tick:3}: bomb went off at slot {}", slot.get());
                }
                _ => {}
            }
        }
    }

    events.clear();
    world::apply(
        &mut world,
        Command::SetGamePhase {
            phase: GamePhase::Idle,
        },
        &mut events,
    );
    world::apply(&mut world, Command::DespawnAll, &mut events);

    let score = world::query::score(&world);
    println!(
        "round over: {surfaced} moles surfaced, {struck} struck, \
         {detonated} bombs detonated, final score {score}"
    );
    score
}

/// Walks the leaderboard protocol against a scripted server.
fn leaderboard_session(score: u32) {
    let identity = SessionIdentity::from_query("?section=104&row=C&seat=12&event=demo");
    let mut client = LeaderboardClient::new(identity, DEFAULT_UPDATE_INTERVAL);
    let mut messages = Vec::new();
    let mut notices = Vec::new();

    client.handle_server(ServerMessage::Connected, &mut messages, &mut notices);
    client.handle_server(ServerMessage::UpdateUpperLimit(10), &mut messages, &mut notices);
    client.handle_server(
        ServerMessage::ScoreUpdate(Some(vec![
            LeaderboardEntry {
                seat: SeatIdentity::new("101", "A", "4"),
                high_score: 1430,
            },
            LeaderboardEntry {
                seat: SeatIdentity::new("118", "F", "22"),
                high_score: 240,
            },
        ])),
        &mut messages,
        &mut notices,
    );
    for notice in notices.drain(..) {
        println!("leaderboard: {notice:?}");
    }

    let decision = client.submit_score(f64::from(score), f64::from(score), &mut messages);
    match decision {
        SubmissionDecision::Submit => {
            client.handle_server(ServerMessage::SubmissionSuccessful, &mut messages, &mut notices);
            println!("leaderboard: submitted {score} for seat 104/C/12");
        }
        SubmissionDecision::Skip(reason) => {
            println!("leaderboard: kept score local ({reason:?})");
        }
    }
    for notice in notices.drain(..) {
        println!("leaderboard: {notice:?}");
    }
    println!("leaderboard: {} outbound messages queued", messages.len());
}

fn report_intents(intents: &mut Vec<mole_rush_system_scene_flow::SceneIntent>) {
    for intent in intents.drain(..) {
        println!("scene: {intent:?}");
    }
}
