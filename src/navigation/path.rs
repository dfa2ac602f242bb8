//! Path following.
//!
//! Turns a list of waypoints into per-frame motion: ease the rotation
//! toward the current waypoint, advance at constant speed, and pop the
//! waypoint once the agent arrives or overshoots it.

use std::collections::VecDeque;

use glam::{Quat, Vec3};

use crate::navigation::navmesh::{GroupId, NavZone};
use crate::navigation::steering::{ARRIVAL_EPSILON_SQ, ease_rotation, facing};
use crate::rig::Transform;

/// Result of a path request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRequest {
    /// The navmesh returned a route.
    Walking,
    /// The navmesh found no route; the path is now empty.
    Unreachable,
    /// No navmesh available: heading straight for the destination.
    Direct,
}

/// Result of one frame of following.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Nothing to follow.
    Idle,
    /// Still travelling toward the current waypoint.
    Moving,
    /// A waypoint was reached and the next one is now the target.
    LegComplete,
    /// The last waypoint, at this position, was reached.
    Arrived(Vec3),
}

#[derive(Debug, Clone, Default)]
pub struct PathFollower {
    path: VecDeque<Vec3>,
    desired: Option<Quat>,
}

impl PathFollower {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining waypoints; the front is the current target.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &VecDeque<Vec3> {
        &self.path
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> Option<Vec3> {
        self.path.front().copied()
    }

    /// Rotation the agent is turning toward. Always set while the path is non-empty.
    #[inline]
    #[must_use]
    pub fn desired_orientation(&self) -> Option<Quat> {
        self.desired
    }

    pub fn clear(&mut self) {
        self.path.clear();
    }

    /// Replaces the path. Returns whether it is non-empty.
    pub fn set_path(&mut self, transform: &Transform, waypoints: Vec<Vec3>) -> bool {
        self.path = waypoints.into();
        self.retarget(transform);
        !self.path.is_empty()
    }

    /// Queries `nav` for a route to `destination`, or heads straight there
    /// without one.
    pub fn request(
        &mut self,
        transform: &Transform,
        destination: Vec3,
        nav: Option<NavZone<'_>>,
        group: Option<GroupId>,
    ) -> PathRequest {
        let Some(nav) = nav else {
            self.set_path(transform, vec![destination]);
            return PathRequest::Direct;
        };

        let waypoints = group
            .map(|g| nav.find_path(transform.position, destination, g))
            .unwrap_or_default();

        if self.set_path(transform, waypoints) {
            log::debug!("Path to {destination}: {} waypoints", self.path.len());
            PathRequest::Walking
        } else {
            log::debug!("No path to {destination}");
            PathRequest::Unreachable
        }
    }

    /// Recomputes the desired orientation for the front waypoint, on the
    /// agent's own height.
    fn retarget(&mut self, transform: &Transform) {
        if let Some(&target) = self.path.front() {
            self.desired = Some(facing(transform.position, target).unwrap_or(transform.rotation));
        }
    }

    /// Advances `transform` by one frame toward the current waypoint.
    pub fn step(&mut self, transform: &mut Transform, speed: f32, dt: f32) -> StepOutcome {
        let Some(&target) = self.path.front() else {
            return StepOutcome::Idle;
        };

        let to_target = target - transform.position;
        let mut leg_complete = to_target.length_squared() < ARRIVAL_EPSILON_SQ;

        if !leg_complete {
            let prev_dist_sq = transform.position.distance_squared(target);
            if let Some(desired) = self.desired {
                transform.rotation = ease_rotation(transform.rotation, desired);
            }
            transform.position += to_target.normalize() * (speed * dt);

            // Moving away means the waypoint was passed this frame.
            let new_dist_sq = transform.position.distance_squared(target);
            leg_complete = new_dist_sq > prev_dist_sq || new_dist_sq < ARRIVAL_EPSILON_SQ;
            log::trace!("Leg toward {target}: {new_dist_sq:.4} remaining (sq)");
        }

        if !leg_complete {
            return StepOutcome::Moving;
        }

        self.path.pop_front();
        if self.path.is_empty() {
            StepOutcome::Arrived(target)
        } else {
            self.retarget(transform);
            StepOutcome::LegComplete
        }
    }
}
