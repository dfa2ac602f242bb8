//! Scene and agent-type configuration.
//!
//! Everything here is plain data deserialised with serde; turning it into
//! live agents happens in [`crate::agent::AgentType::from_config`] and
//! [`crate::world::World::from_config`].

use glam::Vec3;
use serde::Deserialize;

use crate::animation::{DEFAULT_FPS, SubclipSpec};
use crate::errors::Result;
use crate::navigation::DEFAULT_WANDER_SEED;

/// Marker radius of the debug path trace.
pub const DEFAULT_NODE_RADIUS: f32 = 0.2;
/// Height the debug path trace is drawn above the waypoints.
pub const DEFAULT_TRACE_OFFSET: f32 = 0.2;

/// One agent type: movement speed, control mode and clip layout.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    /// Units per second.
    pub speed: f32,
    #[serde(default)]
    pub autonomous: bool,
    /// Frame rate the `anims` frame numbers refer to.
    #[serde(default = "default_fps")]
    pub fps: f32,
    /// Subclips cut from the type's single source timeline. Empty when the
    /// type ships pre-split clips.
    #[serde(default)]
    pub anims: Vec<SubclipSpec>,
    #[serde(default = "default_node_radius")]
    pub node_radius: f32,
    /// Uniform scale of the character model.
    #[serde(default = "default_scale")]
    pub scale: f32,
}

impl AgentConfig {
    #[must_use]
    pub fn new(name: &str, speed: f32) -> Self {
        Self {
            name: name.to_string(),
            speed,
            autonomous: false,
            fps: DEFAULT_FPS,
            anims: Vec::new(),
            node_radius: DEFAULT_NODE_RADIUS,
            scale: 1.0,
        }
    }

    #[must_use]
    pub fn autonomous(mut self, autonomous: bool) -> Self {
        self.autonomous = autonomous;
        self
    }

    #[must_use]
    pub fn with_anims(mut self, anims: Vec<SubclipSpec>) -> Self {
        self.anims = anims;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Debug toggles exposed to the host UI.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DebugSettings {
    #[serde(default = "default_true")]
    pub show_path: bool,
    #[serde(default = "default_trace_offset")]
    pub offset: f32,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            show_path: true,
            offset: DEFAULT_TRACE_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneConfig {
    /// Navmesh zone the agents walk in.
    pub zone: String,
    /// Destinations autonomous agents choose from.
    #[serde(default)]
    pub waypoints: Vec<Vec3>,
    #[serde(default)]
    pub debug: DebugSettings,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub agents: Vec<AgentConfig>,
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn agent(&self, name: &str) -> Option<&AgentConfig> {
        self.agents.iter().find(|a| a.name == name)
    }
}

fn default_fps() -> f32 {
    DEFAULT_FPS
}

fn default_scale() -> f32 {
    1.0
}

fn default_node_radius() -> f32 {
    DEFAULT_NODE_RADIUS
}

fn default_trace_offset() -> f32 {
    DEFAULT_TRACE_OFFSET
}

fn default_true() -> bool {
    true
}

fn default_seed() -> u64 {
    DEFAULT_WANDER_SEED
}
