//! Interface to the external navmesh / pathfinding service.

use glam::Vec3;

/// Connected region of a navmesh zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub usize);

/// Shortest-path queries over a precomputed walkable surface.
///
/// Implementations are synchronous, in-process computations; the agent
/// core calls them from inside its per-frame update.
pub trait NavMesh {
    /// Ordered waypoints from `from` to `to`, excluding the start point.
    /// `None` or an empty vector means the destination is unreachable.
    fn find_path(&self, from: Vec3, to: Vec3, zone: &str, group: GroupId) -> Option<Vec<Vec3>>;

    /// Region containing `point`, if it lies on the surface of `zone`.
    fn get_group(&self, zone: &str, point: Vec3) -> Option<GroupId>;

    /// Surface point closest to `point` within `group`.
    fn get_closest_node(&self, point: Vec3, zone: &str, group: GroupId) -> Option<Vec3>;
}

/// A navmesh together with the zone the agents walk in.
#[derive(Clone, Copy)]
pub struct NavZone<'a> {
    pub navmesh: &'a dyn NavMesh,
    pub zone: &'a str,
}

impl<'a> NavZone<'a> {
    #[must_use]
    pub fn new(navmesh: &'a dyn NavMesh, zone: &'a str) -> Self {
        Self { navmesh, zone }
    }

    #[must_use]
    pub fn find_path(&self, from: Vec3, to: Vec3, group: GroupId) -> Vec<Vec3> {
        self.navmesh
            .find_path(from, to, self.zone, group)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn group_of(&self, point: Vec3) -> Option<GroupId> {
        self.navmesh.get_group(self.zone, point)
    }

    #[must_use]
    pub fn closest_node(&self, point: Vec3, group: GroupId) -> Option<Vec3> {
        self.navmesh.get_closest_node(point, self.zone, group)
    }
}
