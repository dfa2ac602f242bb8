//! The agent aggregate.
//!
//! An [`Agent`] owns its transform, path follower, action state, mixer and
//! rig instance. [`AgentType`] holds what agents of one kind share: the
//! source rig they are cloned from and the clip registry.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::{Affine3A, Quat, Vec3};

use crate::animation::{ActionId, ActionState, AnimationClip, AnimationMixer, ClipRegistry};
use crate::config::{AgentConfig, DEFAULT_NODE_RADIUS, DebugSettings};
use crate::errors::Result;
use crate::navigation::{
    Autonomy, GroupId, NavZone, PathFollower, PathRequest, PathTrace, StepOutcome, Wanderer,
};
use crate::rig::{Rig, Transform, clone_rig};

/// Where an agent type's clips come from.
#[derive(Debug)]
pub enum ClipSource {
    /// One exported timeline, cut up by the type's subclip descriptors.
    Timeline(AnimationClip),
    /// Clips already split per action.
    Clips(Vec<AnimationClip>),
    /// No animation at all.
    None,
}

/// Shared, read-only description of one kind of agent.
#[derive(Debug, Clone)]
pub struct AgentType {
    pub name: String,
    pub speed: f32,
    pub autonomous: bool,
    pub node_radius: f32,
    pub scale: f32,
    rig: Rig,
    clips: Arc<ClipRegistry>,
}

impl AgentType {
    #[must_use]
    pub fn new(name: &str, speed: f32, rig: Rig, clips: ClipRegistry) -> Self {
        Self {
            name: name.to_string(),
            speed,
            autonomous: false,
            node_radius: DEFAULT_NODE_RADIUS,
            scale: 1.0,
            rig,
            clips: Arc::new(clips),
        }
    }

    /// Builds the clip registry in cropped or pre-split mode depending on `source`.
    pub fn from_config(config: &AgentConfig, rig: Rig, source: ClipSource) -> Result<Self> {
        let clips = match source {
            ClipSource::Timeline(timeline) => {
                ClipRegistry::from_subclips(&timeline, &config.anims, config.fps)?
            }
            ClipSource::Clips(clips) => ClipRegistry::from_clips(clips),
            ClipSource::None => ClipRegistry::new(),
        };

        Ok(Self {
            name: config.name.clone(),
            speed: config.speed,
            autonomous: config.autonomous,
            node_radius: config.node_radius,
            scale: config.scale,
            rig,
            clips: Arc::new(clips),
        })
    }

    #[must_use]
    pub fn clips(&self) -> &Arc<ClipRegistry> {
        &self.clips
    }

    #[must_use]
    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    /// Creates an agent with its own rig instance, facing +Z at the origin.
    pub fn instantiate(&self) -> Result<Agent> {
        let rig = clone_rig(&self.rig)?;
        let autonomy = if self.autonomous {
            Autonomy::Wandering { alive: true }
        } else {
            Autonomy::Controlled
        };
        log::info!("Spawned '{}' ({autonomy:?})", self.name);

        let mut transform = Transform::new();
        transform.scale = Vec3::splat(self.scale);

        Ok(Agent {
            name: self.name.clone(),
            transform,
            speed: self.speed,
            autonomy,
            nav_group: None,
            follower: PathFollower::new(),
            action: ActionState::new(),
            mixer: AnimationMixer::new(),
            clips: Arc::clone(&self.clips),
            rig,
            trace: None,
            node_radius: self.node_radius,
        })
    }
}

/// Per-frame collaborators an agent needs while updating.
pub struct AgentContext<'a> {
    pub nav: Option<NavZone<'a>>,
    pub wanderer: &'a mut Wanderer,
    pub debug: &'a DebugSettings,
}

#[derive(Debug)]
pub struct Agent {
    name: String,
    transform: Transform,
    speed: f32,
    autonomy: Autonomy,
    nav_group: Option<GroupId>,
    follower: PathFollower,
    action: ActionState,
    mixer: AnimationMixer,
    clips: Arc<ClipRegistry>,
    rig: Rig,
    trace: Option<PathTrace>,
    node_radius: f32,
}

impl Agent {
    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[must_use]
    pub fn autonomy(&self) -> Autonomy {
        self.autonomy
    }

    #[must_use]
    pub fn is_autonomous(&self) -> bool {
        self.autonomy.is_autonomous()
    }

    /// Controlled agents are always alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !matches!(self.autonomy, Autonomy::Wandering { alive: false })
    }

    #[must_use]
    pub fn nav_group(&self) -> Option<GroupId> {
        self.nav_group
    }

    #[must_use]
    pub fn path(&self) -> &VecDeque<Vec3> {
        self.follower.path()
    }

    #[must_use]
    pub fn desired_orientation(&self) -> Option<Quat> {
        self.follower.desired_orientation()
    }

    /// Logical action currently playing.
    #[must_use]
    pub fn action(&self) -> Option<ActionId> {
        self.action.current()
    }

    /// Mixer time at which the current action started.
    #[must_use]
    pub fn action_started_at(&self) -> f64 {
        self.action.started_at()
    }

    #[must_use]
    pub fn action_state(&self) -> &ActionState {
        &self.action
    }

    #[must_use]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    #[must_use]
    pub fn clips(&self) -> &ClipRegistry {
        &self.clips
    }

    #[must_use]
    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    #[must_use]
    pub fn trace(&self) -> Option<&PathTrace> {
        self.trace.as_ref()
    }

    pub fn set_trace_visible(&mut self, visible: bool) {
        if let Some(trace) = &mut self.trace {
            trace.visible = visible;
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Switches the playing action; see [`ActionState::set_action`].
    pub fn set_action(&mut self, name: impl Into<ActionId>) -> bool {
        self.action
            .set_action(name.into(), &self.clips, &mut self.mixer, &self.rig)
    }

    /// Plans a path to `destination` and starts walking it.
    ///
    /// With `debug` set, controlled agents also rebuild their path trace,
    /// raised by the debug offset and shown according to `show_path`.
    pub fn request_path(
        &mut self,
        destination: Vec3,
        nav: Option<NavZone<'_>>,
        debug: Option<&DebugSettings>,
    ) -> PathRequest {
        let outcome = self
            .follower
            .request(&self.transform, destination, nav, self.nav_group);

        match outcome {
            PathRequest::Walking => {
                self.set_action(ActionId::Walk);
                if let Some(debug) = debug
                    && !self.is_autonomous()
                {
                    let mut trace = PathTrace::build(
                        self.transform.position,
                        self.follower.path(),
                        debug.offset,
                        self.node_radius,
                    );
                    trace.visible = debug.show_path;
                    self.trace = Some(trace);
                }
            }
            PathRequest::Unreachable => {
                log::warn!("'{}' cannot reach {destination}", self.name);
                self.set_action(ActionId::Idle);
                self.trace = None;
            }
            PathRequest::Direct => {}
        }
        outcome
    }

    /// Moves the agent without disturbing its path, and re-resolves its
    /// navmesh region.
    pub fn place(&mut self, position: Vec3, nav: Option<NavZone<'_>>) {
        self.transform.position = position;
        self.nav_group = nav.and_then(|n| n.group_of(position));
    }

    /// Moves the agent directly onto the walkable surface near `point`,
    /// abandoning its path.
    pub fn teleport(&mut self, point: Vec3, nav: Option<NavZone<'_>>) {
        self.place(point, nav);
        if let (Some(nav), Some(group)) = (nav, self.nav_group)
            && let Some(surface) = nav.closest_node(point, group)
        {
            self.transform.position = surface;
        }
        self.follower.clear();
        self.trace = None;
        self.set_action(ActionId::Idle);
        log::debug!("'{}' teleported to {}", self.name, self.transform.position);
    }

    /// Stops an autonomous agent from choosing new destinations.
    pub fn kill(&mut self) {
        if let Autonomy::Wandering { alive } = &mut self.autonomy {
            *alive = false;
        }
    }

    fn wander(&mut self, ctx: &mut AgentContext<'_>) {
        if !self.autonomy.wants_destination() {
            return;
        }
        if let Some(destination) = ctx.wanderer.next_destination() {
            self.request_path(destination, ctx.nav, Some(ctx.debug));
        }
    }

    /// Per-frame update: animation clock, path following, then the rig pose.
    pub fn update(&mut self, dt: f32, ctx: &mut AgentContext<'_>) {
        self.mixer.update(dt, &mut self.rig);

        if self.follower.is_empty() {
            self.wander(ctx);
        } else {
            match self.follower.step(&mut self.transform, self.speed, dt) {
                StepOutcome::Arrived(target) => {
                    if self.is_autonomous() {
                        self.wander(ctx);
                    } else {
                        self.transform.position = target;
                        self.set_action(ActionId::Idle);
                    }
                }
                StepOutcome::LegComplete => {
                    log::trace!("'{}' next waypoint {:?}", self.name, self.follower.target());
                }
                StepOutcome::Moving | StepOutcome::Idle => {}
            }
        }

        let world = Affine3A::from_scale_rotation_translation(
            self.transform.scale,
            self.transform.rotation,
            self.transform.position,
        );
        self.rig.update(&world);
    }
}
