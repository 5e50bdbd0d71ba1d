#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Non-physics flick-to-launch kinematics for the football minigame.
//!
//! A touch flick on screen is converted into a horizontal displacement the
//! host shell tweens the ball along. A full physics engine would add more
//! weight than benefit here, so flight is a straight tween plus a vertical
//! arc owned by the host.

use std::time::Duration;

use glam::Vec2;

/// Duration of the horizontal flight tween.
pub const FLIGHT_DURATION: Duration = Duration::from_secs(2);

const DEFAULT_MAX_FRAMES: f32 = 45.0;
const DEFAULT_MAX_POWER: f32 = 40.0;
const DEFAULT_ROTATIONAL_SPEED: f32 = 10.0;

/// Horizontal flight plan produced by an accepted flick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchPlan {
    /// Displacement on the ground plane: `x` is sideways, `y` is forward
    /// depth (the host subtracts it from the entity's z coordinate).
    pub displacement: Vec2,
    /// How long the horizontal tween should run.
    pub duration: Duration,
}

/// Pure launcher state machine driven by flick gestures.
#[derive(Debug)]
pub struct Launcher {
    max_frames: f32,
    max_power: f32,
    rotational_speed: f32,
    in_flight: bool,
}

impl Launcher {
    /// Creates a launcher with the default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_frames: DEFAULT_MAX_FRAMES,
            max_power: DEFAULT_MAX_POWER,
            rotational_speed: DEFAULT_ROTATIONAL_SPEED,
            in_flight: false,
        }
    }

    /// Reports whether a ball is currently mid-flight.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Updates the launch power ceiling at runtime.
    pub fn set_max_power(&mut self, max_power: f32) {
        self.max_power = max_power;
    }

    /// Attempts a launch from a flick gesture.
    ///
    /// `flick` holds the screen-space distances covered by the gesture and
    /// `frame_count` how many frames it took; quicker flicks launch harder.
    /// The flick angle is mapped so that straight left is 0 degrees, forward
    /// 90 and straight right 180; only flicks strictly inside (45, 135) are
    /// accepted so the ball cannot be thrown sideways. Returns the flight
    /// plan when accepted, or `None` while a ball is already in the air or
    /// the angle is out of range.
    pub fn launch_attempt(&mut self, flick: Vec2, frame_count: f32) -> Option<LaunchPlan> {
        if self.in_flight {
            return None;
        }

        let mut angle = (flick.y / flick.x).atan().to_degrees();
        if angle < 0.0 {
            angle += 180.0;
        }

        // Stated positively so a NaN angle (a zero-length tap) falls through
        // to rejection instead of slipping past both comparisons.
        if !(angle > 45.0 && angle < 135.0) {
            return None;
        }

        let force = self.max_power * (1.0 - frame_count / self.max_frames);
        let radians = angle.to_radians();
        let displacement = Vec2::new(force * radians.cos(), force * radians.sin());

        self.in_flight = true;
        Some(LaunchPlan {
            displacement,
            duration: FLIGHT_DURATION,
        })
    }

    /// Spin applied this frame, in degrees around the ball's travel axis.
    #[must_use]
    pub fn tick(&self, dt: Duration) -> f32 {
        if self.in_flight {
            self.rotational_speed * dt.as_secs_f32()
        } else {
            0.0
        }
    }

    /// A mid-air collision stops forward momentum and reverses the spin.
    pub fn on_collision(&mut self) {
        self.rotational_speed = -self.rotational_speed;
    }

    /// Re-arms the launcher once the ball has come to rest.
    pub fn reset(&mut self) {
        self.rotational_speed = self.rotational_speed.abs();
        self.in_flight = false;
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}
