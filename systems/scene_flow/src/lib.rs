#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! UI scene transition manager.
//!
//! "Off" means zero opacity, translated off screen, buttons disabled; "on"
//! means full opacity at the origin with buttons enabled. The manager only
//! decides *what* should fade; the host shell owns the actual tweens.

use std::time::Duration;

use mole_rush_core::Scene;

/// Scenes that participate in the boot-time blanket switch-off.
///
/// The lead-gen scene and the end backdrop are managed lazily and stay
/// untouched until a transition first involves them.
const MANAGED_SCENES: [Scene; 5] = [
    Scene::Start,
    Scene::Instructions,
    Scene::End,
    Scene::InGame,
    Scene::Leaderboard,
];

/// Presentation work requested from the host shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneIntent {
    /// Snap the scene off instantly, no tween.
    SetOff(Scene),
    /// Tween the scene's opacity to zero; its buttons disable immediately
    /// and the scene translates off screen once the tween completes.
    FadeOut(Scene),
    /// Move the scene to the origin and tween its opacity to one; buttons
    /// enable once the tween completes.
    FadeIn(Scene),
    /// Fade in the backdrop that sits behind the post-round scenes.
    ShowBackdrop,
    /// Fade the post-round backdrop back out.
    HideBackdrop,
}

/// Tracks the active UI scene and plans transitions between scenes.
#[derive(Debug)]
pub struct SceneFlow {
    current: Scene,
    transition: Duration,
}

impl SceneFlow {
    /// Creates a scene flow presenting the start scene, with the provided
    /// fade tween duration.
    #[must_use]
    pub fn new(transition: Duration) -> Self {
        Self {
            current: Scene::Start,
            transition,
        }
    }

    /// Scene currently presented to the player.
    #[must_use]
    pub fn current(&self) -> Scene {
        self.current
    }

    /// Duration every fade tween should run for.
    #[must_use]
    pub fn transition(&self) -> Duration {
        self.transition
    }

    /// Boot-time intents: every managed scene snaps off except the current
    /// one, which fades in.
    #[must_use]
    pub fn initial_intents(&self) -> Vec<SceneIntent> {
        let mut intents: Vec<SceneIntent> = MANAGED_SCENES
            .into_iter()
            .filter(|scene| *scene != self.current)
            .map(SceneIntent::SetOff)
            .collect();
        intents.push(SceneIntent::FadeIn(self.current));
        intents
    }

    /// Plans the transition to `target` and makes it the current scene.
    pub fn change_scene(&mut self, target: Scene, out: &mut Vec<SceneIntent>) {
        out.push(SceneIntent::FadeOut(self.current));

        if self.current == Scene::InGame && matches!(target, Scene::End | Scene::LeadGen) {
            out.push(SceneIntent::ShowBackdrop);
        } else if self.current == Scene::End && target == Scene::InGame {
            out.push(SceneIntent::HideBackdrop);
        }

        out.push(SceneIntent::FadeIn(target));
        self.current = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow() -> SceneFlow {
        SceneFlow::new(Duration::from_millis(400))
    }

    #[test]
    fn boots_on_the_start_scene() {
        let flow = flow();
        assert_eq!(flow.current(), Scene::Start);

        let intents = flow.initial_intents();
        assert_eq!(
            intents,
            vec![
                SceneIntent::SetOff(Scene::Instructions),
                SceneIntent::SetOff(Scene::End),
                SceneIntent::SetOff(Scene::InGame),
                SceneIntent::SetOff(Scene::Leaderboard),
                SceneIntent::FadeIn(Scene::Start),
            ],
        );
    }

    #[test]
    fn plain_transitions_cross_fade() {
        let mut flow = flow();
        let mut out = Vec::new();
        flow.change_scene(Scene::InGame, &mut out);

        assert_eq!(
            out,
            vec![
                SceneIntent::FadeOut(Scene::Start),
                SceneIntent::FadeIn(Scene::InGame),
            ],
        );
        assert_eq!(flow.current(), Scene::InGame);
    }

    #[test]
    fn leaving_the_game_raises_the_backdrop() {
        for target in [Scene::End, Scene::LeadGen] {
            let mut flow = SceneFlow::new(Duration::from_millis(400));
            flow.change_scene(Scene::InGame, &mut Vec::new());
            let mut out = Vec::new();
            flow.change_scene(target, &mut out);
            assert_eq!(
                out,
                vec![
                    SceneIntent::FadeOut(Scene::InGame),
                    SceneIntent::ShowBackdrop,
                    SceneIntent::FadeIn(target),
                ],
            );
        }
    }

    #[test]
    fn replaying_from_the_end_screen_lowers_the_backdrop() {
        let mut flow = flow();
        flow.change_scene(Scene::InGame, &mut Vec::new());
        flow.change_scene(Scene::End, &mut Vec::new());

        let mut out = Vec::new();
        flow.change_scene(Scene::InGame, &mut out);
        assert_eq!(
            out,
            vec![
                SceneIntent::FadeOut(Scene::End),
                SceneIntent::HideBackdrop,
                SceneIntent::FadeIn(Scene::InGame),
            ],
        );
    }

    #[test]
    fn leaderboard_visits_leave_the_backdrop_alone() {
        let mut flow = flow();
        flow.change_scene(Scene::InGame, &mut Vec::new());
        flow.change_scene(Scene::End, &mut Vec::new());

        let mut out = Vec::new();
        flow.change_scene(Scene::Leaderboard, &mut out);
        assert_eq!(
            out,
            vec![
                SceneIntent::FadeOut(Scene::End),
                SceneIntent::FadeIn(Scene::Leaderboard),
            ],
        );
    }
}
