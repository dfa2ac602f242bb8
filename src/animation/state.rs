use crate::animation::action_id::ActionId;
use crate::animation::mixer::{ActionKey, AnimationMixer};
use crate::animation::registry::ClipRegistry;
use crate::rig::Rig;

/// Fade-in applied whenever a new action starts.
pub const ACTION_FADE_IN: f32 = 0.5;

/// Tracks the single logical action an agent is playing.
#[derive(Debug, Default, Clone)]
pub struct ActionState {
    current: Option<ActionId>,
    /// Mixer time at which `current` was started.
    started_at: f64,
    playing: Option<ActionKey>,
}

impl ActionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<ActionId> {
        self.current
    }

    #[inline]
    #[must_use]
    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    /// Mixer handle of the playing action.
    #[inline]
    #[must_use]
    pub fn playing(&self) -> Option<ActionKey> {
        self.playing
    }

    /// Switches to `id`, returning whether a new action was started.
    ///
    /// Requesting the action already playing is a no-op, and so is an action
    /// with no registered clip: the previous action keeps running.
    pub fn set_action(
        &mut self,
        id: ActionId,
        registry: &ClipRegistry,
        mixer: &mut AnimationMixer,
        rig: &Rig,
    ) -> bool {
        if self.current == Some(id) {
            return false;
        }

        let Some(clip) = registry.get(id) else {
            log::debug!("No clip registered for action '{id}'");
            return false;
        };

        let key = mixer.clip_action(clip, rig);
        mixer.stop_all_actions();
        if let Some(action) = mixer.action_mut(key) {
            action.play();
            action.fade_in(ACTION_FADE_IN);
        }

        log::debug!("Action {} -> {id}", self.current.map_or("none", |a| a.as_str()));
        self.current = Some(id);
        self.started_at = mixer.time();
        self.playing = Some(key);
        true
    }
}
