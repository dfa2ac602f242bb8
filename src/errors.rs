//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`AgentError`] covers construction-time failures:
//! - Configuration parsing errors
//! - Animation clip cropping errors
//! - Rig cloning errors
//!
//! Per-frame operations (`update`, `request_path`, `set_action`) never fail;
//! unreachable destinations, missing animations and degenerate motion are
//! recovered where they occur.
//!
//! # Usage
//!
//! ```rust,ignore
//! use myth_agents::errors::{AgentError, Result};
//!
//! fn load_scene(json: &str) -> Result<SceneConfig> {
//!     SceneConfig::from_json(json)
//! }
//! ```

use thiserror::Error;

/// The main error type for agent construction.
#[derive(Error, Debug)]
pub enum AgentError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// JSON configuration could not be parsed.
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// Agent index out of range for the population.
    #[error("Unknown agent: {0}")]
    UnknownAgent(usize),

    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// A subclip descriptor has an empty or inverted frame range.
    #[error("Invalid frame range for clip '{name}': [{start}, {end})")]
    InvalidFrameRange {
        /// Name of the requested subclip
        name: String,
        /// First frame (inclusive)
        start: u32,
        /// Last frame (exclusive)
        end: u32,
    },

    /// A subclip descriptor selected no keyframes from the source clip.
    #[error("Subclip '{0}' contains no keyframes")]
    EmptySubclip(String),

    // ========================================================================
    // Rig Errors
    // ========================================================================
    /// A bone referenced by the source skeleton does not exist in the clone.
    #[error("Bone '{bone}' of skinned mesh '{mesh}' missing from cloned rig")]
    MissingBone {
        /// Skinned mesh whose skeleton references the bone
        mesh: String,
        /// Name of the missing bone
        bone: String,
    },

    /// A skinned mesh of the source has no counterpart in the clone.
    #[error("Skinned mesh '{0}' missing from cloned rig")]
    MissingSkinnedMesh(String),
}

/// Alias for `Result<T, AgentError>`.
pub type Result<T> = std::result::Result<T, AgentError>;
