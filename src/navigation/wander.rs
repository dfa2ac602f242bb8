//! Autonomous wandering: pick a random waypoint whenever the path runs out.

use glam::Vec3;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Seed used when a scene does not configure one.
pub const DEFAULT_WANDER_SEED: u64 = 42;

/// Control mode of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Autonomy {
    /// Driven by the host (clicks, scripts).
    Controlled,
    /// Wanders between waypoints until killed.
    Wandering { alive: bool },
}

impl Autonomy {
    #[inline]
    #[must_use]
    pub fn is_autonomous(self) -> bool {
        matches!(self, Autonomy::Wandering { .. })
    }

    /// Whether the agent should pick a new destination once idle.
    #[inline]
    #[must_use]
    pub fn wants_destination(self) -> bool {
        matches!(self, Autonomy::Wandering { alive: true })
    }
}

/// Fixed set of destinations plus a deterministic RNG.
#[derive(Debug, Clone)]
pub struct Wanderer {
    waypoints: Vec<Vec3>,
    rng: ChaCha8Rng,
    seed: u64,
}

impl Wanderer {
    #[must_use]
    pub fn new(waypoints: Vec<Vec3>, seed: u64) -> Self {
        Self {
            waypoints,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[inline]
    #[must_use]
    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    #[inline]
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniformly random waypoint, or `None` if the set is empty.
    pub fn next_destination(&mut self) -> Option<Vec3> {
        self.waypoints.choose(&mut self.rng).copied()
    }
}

impl Default for Wanderer {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_WANDER_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_waypoint_always_chosen() {
        let mut wanderer = Wanderer::new(vec![Vec3::X], 7);
        for _ in 0..10 {
            assert_eq!(wanderer.next_destination(), Some(Vec3::X));
        }
    }

    #[test]
    fn test_empty_set_yields_nothing() {
        assert_eq!(Wanderer::default().next_destination(), None);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let points = vec![Vec3::X, Vec3::Y, Vec3::Z, Vec3::ONE];
        let mut a = Wanderer::new(points.clone(), 3);
        let mut b = Wanderer::new(points, 3);
        for _ in 0..20 {
            assert_eq!(a.next_destination(), b.next_destination());
        }
    }

    #[test]
    fn test_dead_agents_do_not_wander() {
        assert!(Autonomy::Wandering { alive: true }.wants_destination());
        assert!(!Autonomy::Wandering { alive: false }.wants_destination());
        assert!(!Autonomy::Controlled.wants_destination());
        assert!(Autonomy::Wandering { alive: false }.is_autonomous());
    }
}
