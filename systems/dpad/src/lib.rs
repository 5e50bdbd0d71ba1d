#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Virtual D-pad that buckets analog touch input into four directions.
//!
//! The thumb position relative to the pad centre is mapped onto a full
//! circle and clamped into four 90 degree buckets. Dropping the clamp and
//! emitting the raw angle instead would turn this into a 360 degree
//! joystick. Angle layout (screen coordinates, y grows downward):
//!
//! ```text
//!      225-315
//!   135-225 | 315-45
//!       45-135
//! ```

use glam::Vec2;
use mole_rush_core::Direction;

/// Input intents produced by the pad for the host shell to act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DpadIntent {
    /// A direction became held.
    Press(Direction),
    /// A previously held direction was let go.
    Release(Direction),
    /// The pad returned to its neutral sprite.
    SetNeutral,
}

/// Tuning for the pad's touch geometry, in canvas pixels.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Radius around the centre inside which touches are ignored.
    pub dead_zone: f32,
    /// Radius beyond which the thumb has left the pad entirely.
    pub max_distance: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dead_zone: 20.0,
            max_distance: 300.0,
        }
    }
}

/// Reads touch gestures and reports directional presses and releases.
#[derive(Debug)]
pub struct Dpad {
    config: Config,
    origin: Vec2,
    touch: Vec2,
    pressed: bool,
    held: Option<Direction>,
}

impl Dpad {
    /// Creates a pad with the provided geometry.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            origin: Vec2::ZERO,
            touch: Vec2::ZERO,
            pressed: false,
            held: None,
        }
    }

    /// Direction currently held, if any.
    #[must_use]
    pub fn held(&self) -> Option<Direction> {
        self.held
    }

    /// Begins a gesture; `origin` is the pad centre in canvas space.
    pub fn touch_start(&mut self, origin: Vec2, touch: Vec2, out: &mut Vec<DpadIntent>) {
        self.origin = origin;
        self.touch = touch;
        self.pressed = true;
        self.handle_direction_press(out);
    }

    /// Continues a gesture with a fresh touch position.
    pub fn touch_move(&mut self, touch: Vec2, out: &mut Vec<DpadIntent>) {
        self.touch = touch;
        if self.has_left_pad() {
            self.release_held(out);
            self.clear(out);
            self.pressed = false;
        }
        if self.pressed {
            self.handle_direction_press(out);
        }
    }

    /// Ends the gesture, letting go of whatever was held.
    pub fn touch_end(&mut self, out: &mut Vec<DpadIntent>) {
        self.release_held(out);
        self.clear(out);
        self.pressed = false;
    }

    /// Cancelled gestures behave exactly like a lifted thumb.
    pub fn touch_cancel(&mut self, out: &mut Vec<DpadIntent>) {
        self.touch_end(out);
    }

    fn has_left_pad(&self) -> bool {
        self.touch.distance(self.origin) > self.config.max_distance
    }

    fn handle_direction_press(&mut self, out: &mut Vec<DpadIntent>) {
        let distance = self.touch.distance(self.origin);
        if distance > self.config.dead_zone && distance < self.config.max_distance {
            let direction = bucket(self.angle());
            if self.held != Some(direction) {
                self.release_held(out);
                self.held = Some(direction);
                out.push(DpadIntent::Press(direction));
            }
        } else {
            // Inside the dead zone the pad idles but the gesture stays live.
            self.release_held(out);
            self.clear(out);
        }
    }

    fn release_held(&mut self, out: &mut Vec<DpadIntent>) {
        if let Some(direction) = self.held.take() {
            out.push(DpadIntent::Release(direction));
        }
    }

    fn clear(&mut self, out: &mut Vec<DpadIntent>) {
        self.held = None;
        out.push(DpadIntent::SetNeutral);
    }

    /// Angle of the thumb around the pad centre, normalised into [0, 360).
    fn angle(&self) -> f32 {
        let delta = self.touch - self.origin;
        let degrees = delta.y.atan2(delta.x).to_degrees();
        if degrees < 0.0 {
            degrees + 360.0
        } else {
            degrees
        }
    }
}

impl Default for Dpad {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Clamps a full-circle angle into one of the four direction buckets.
fn bucket(angle: f32) -> Direction {
    if (45.0..135.0).contains(&angle) {
        Direction::Down
    } else if (135.0..225.0).contains(&angle) {
        Direction::Left
    } else if (225.0..315.0).contains(&angle) {
        Direction::Up
    } else {
        Direction::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Vec2 = Vec2::new(500.0, 500.0);

    fn offset(x: f32, y: f32) -> Vec2 {
        ORIGIN + Vec2::new(x, y)
    }

    #[test]
    fn buckets_cover_the_full_circle() {
        assert_eq!(bucket(0.0), Direction::Right);
        assert_eq!(bucket(44.9), Direction::Right);
        assert_eq!(bucket(45.0), Direction::Down);
        assert_eq!(bucket(134.9), Direction::Down);
        assert_eq!(bucket(135.0), Direction::Left);
        assert_eq!(bucket(224.9), Direction::Left);
        assert_eq!(bucket(225.0), Direction::Up);
        assert_eq!(bucket(314.9), Direction::Up);
        assert_eq!(bucket(315.0), Direction::Right);
        assert_eq!(bucket(359.9), Direction::Right);
    }

    #[test]
    fn pressing_right_of_centre_presses_right() {
        let mut pad = Dpad::default();
        let mut out = Vec::new();
        pad.touch_start(ORIGIN, offset(100.0, 0.0), &mut out);

        assert_eq!(out, vec![DpadIntent::Press(Direction::Right)]);
        assert_eq!(pad.held(), Some(Direction::Right));
    }

    #[test]
    fn switching_buckets_releases_the_previous_direction() {
        let mut pad = Dpad::default();
        let mut out = Vec::new();
        pad.touch_start(ORIGIN, offset(100.0, 0.0), &mut out);
        out.clear();

        pad.touch_move(offset(10.0, 100.0), &mut out);
        assert_eq!(
            out,
            vec![
                DpadIntent::Release(Direction::Right),
                DpadIntent::Press(Direction::Down),
            ],
        );
    }

    #[test]
    fn holding_the_same_bucket_emits_nothing_new() {
        let mut pad = Dpad::default();
        let mut out = Vec::new();
        pad.touch_start(ORIGIN, offset(100.0, 0.0), &mut out);
        out.clear();

        pad.touch_move(offset(120.0, 10.0), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn dead_zone_touches_idle_the_pad() {
        let mut pad = Dpad::default();
        let mut out = Vec::new();
        pad.touch_start(ORIGIN, offset(100.0, 0.0), &mut out);
        out.clear();

        pad.touch_move(offset(5.0, 5.0), &mut out);
        assert_eq!(
            out,
            vec![
                DpadIntent::Release(Direction::Right),
                DpadIntent::SetNeutral,
            ],
        );

        // The gesture is still live; sliding back out re-presses.
        out.clear();
        pad.touch_move(offset(0.0, -100.0), &mut out);
        assert_eq!(out, vec![DpadIntent::Press(Direction::Up)]);
    }

    #[test]
    fn leaving_the_pad_releases_and_ends_the_gesture() {
        let mut pad = Dpad::default();
        let mut out = Vec::new();
        pad.touch_start(ORIGIN, offset(100.0, 0.0), &mut out);
        out.clear();

        pad.touch_move(offset(400.0, 0.0), &mut out);
        assert_eq!(
            out,
            vec![
                DpadIntent::Release(Direction::Right),
                DpadIntent::SetNeutral,
            ],
        );

        // Further movement is ignored until the next touch start.
        out.clear();
        pad.touch_move(offset(0.0, 100.0), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn lifting_the_thumb_releases_the_held_direction() {
        let mut pad = Dpad::default();
        let mut out = Vec::new();
        pad.touch_start(ORIGIN, offset(0.0, 100.0), &mut out);
        out.clear();

        pad.touch_end(&mut out);
        assert_eq!(
            out,
            vec![
                DpadIntent::Release(Direction::Down),
                DpadIntent::SetNeutral,
            ],
        );
        assert_eq!(pad.held(), None);
    }

    #[test]
    fn cancelled_touches_match_lifted_touches() {
        let mut end_out = Vec::new();
        let mut cancel_out = Vec::new();

        let mut pad = Dpad::default();
        pad.touch_start(ORIGIN, offset(-100.0, 0.0), &mut end_out);
        end_out.clear();
        pad.touch_end(&mut end_out);

        let mut pad = Dpad::default();
        pad.touch_start(ORIGIN, offset(-100.0, 0.0), &mut cancel_out);
        cancel_out.clear();
        pad.touch_cancel(&mut cancel_out);

        assert_eq!(end_out, cancel_out);
    }
}
