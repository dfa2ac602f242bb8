//! Host-side container for a population of agents.
//!
//! The [`World`] owns the optional navmesh, the wander waypoints and the
//! debug toggles, and fans each frame's `dt` out to every agent.

use glam::Vec3;

use crate::agent::{Agent, AgentContext, AgentType};
use crate::animation::ActionId;
use crate::clock::FrameClock;
use crate::config::{DebugSettings, SceneConfig};
use crate::errors::{AgentError, Result};
use crate::navigation::{DEFAULT_WANDER_SEED, NavMesh, NavZone, PathRequest, Wanderer};

pub struct World {
    navmesh: Option<Box<dyn NavMesh>>,
    zone: String,
    wanderer: Wanderer,
    debug: DebugSettings,
    clock: FrameClock,
    agents: Vec<Agent>,
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("has_navmesh", &self.navmesh.is_some())
            .field("zone", &self.zone)
            .field("debug", &self.debug)
            .field("agents", &self.agents.len())
            .finish_non_exhaustive()
    }
}

impl World {
    #[must_use]
    pub fn new(zone: &str, navmesh: Option<Box<dyn NavMesh>>) -> Self {
        Self {
            navmesh,
            zone: zone.to_string(),
            wanderer: Wanderer::new(Vec::new(), DEFAULT_WANDER_SEED),
            debug: DebugSettings::default(),
            clock: FrameClock::new(),
            agents: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &SceneConfig, navmesh: Option<Box<dyn NavMesh>>) -> Self {
        let mut world = Self::new(&config.zone, navmesh);
        world.wanderer = Wanderer::new(config.waypoints.clone(), config.seed);
        world.debug = config.debug;
        log::info!(
            "World '{}': {} waypoints, seed {}",
            config.zone,
            config.waypoints.len(),
            config.seed
        );
        world
    }

    #[must_use]
    pub fn with_wanderer(mut self, wanderer: Wanderer) -> Self {
        self.wanderer = wanderer;
        self
    }

    fn nav(&self) -> Option<NavZone<'_>> {
        self.navmesh
            .as_deref()
            .map(|navmesh| NavZone::new(navmesh, &self.zone))
    }

    // ========================================================================
    // Agents
    // ========================================================================

    /// Instantiates `agent_type` at `position` and returns its index.
    pub fn spawn(&mut self, agent_type: &AgentType, position: Vec3) -> Result<usize> {
        let mut agent = agent_type.instantiate()?;
        agent.place(position, self.nav());
        agent.set_action(ActionId::Idle);

        self.agents.push(agent);
        Ok(self.agents.len() - 1)
    }

    #[must_use]
    pub fn agent(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    pub fn agent_mut(&mut self, index: usize) -> Option<&mut Agent> {
        self.agents.get_mut(index)
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Sends agent `index` toward `destination`.
    pub fn request_path(&mut self, index: usize, destination: Vec3) -> Result<PathRequest> {
        let nav = self
            .navmesh
            .as_deref()
            .map(|navmesh| NavZone::new(navmesh, &self.zone));
        let agent = self
            .agents
            .get_mut(index)
            .ok_or(AgentError::UnknownAgent(index))?;
        Ok(agent.request_path(destination, nav, Some(&self.debug)))
    }

    pub fn teleport(&mut self, index: usize, point: Vec3) -> Result<()> {
        let nav = self
            .navmesh
            .as_deref()
            .map(|navmesh| NavZone::new(navmesh, &self.zone));
        let agent = self
            .agents
            .get_mut(index)
            .ok_or(AgentError::UnknownAgent(index))?;
        agent.teleport(point, nav);
        Ok(())
    }

    pub fn set_action(&mut self, index: usize, name: impl Into<ActionId>) -> Result<bool> {
        let agent = self
            .agents
            .get_mut(index)
            .ok_or(AgentError::UnknownAgent(index))?;
        Ok(agent.set_action(name))
    }

    pub fn kill(&mut self, index: usize) -> Result<()> {
        self.agents
            .get_mut(index)
            .ok_or(AgentError::UnknownAgent(index))?
            .kill();
        Ok(())
    }

    // ========================================================================
    // Debug
    // ========================================================================

    #[must_use]
    pub fn debug(&self) -> &DebugSettings {
        &self.debug
    }

    #[must_use]
    pub fn show_path(&self) -> bool {
        self.debug.show_path
    }

    /// Shows or hides every agent's path trace.
    pub fn set_show_path(&mut self, show: bool) {
        self.debug.show_path = show;
        for agent in &mut self.agents {
            agent.set_trace_visible(show);
        }
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    #[must_use]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Advances every agent by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let nav = self
            .navmesh
            .as_deref()
            .map(|navmesh| NavZone::new(navmesh, &self.zone));
        let mut ctx = AgentContext {
            nav,
            wanderer: &mut self.wanderer,
            debug: &self.debug,
        };

        for agent in &mut self.agents {
            agent.update(dt, &mut ctx);
        }
    }

    /// Ticks the wall clock and updates with its clamped `dt`.
    pub fn tick(&mut self) -> f32 {
        let dt = self.clock.tick();
        self.update(dt);
        dt
    }
}
