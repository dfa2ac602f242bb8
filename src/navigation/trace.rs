use glam::Vec3;

/// Debug visualisation of the remaining path: a polyline from the agent
/// through every waypoint, plus a marker sphere per point.
///
/// Pure output for a renderer; steering never reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct PathTrace {
    /// Agent position followed by each waypoint raised by the offset.
    pub line: Vec<Vec3>,
    /// Agent position and waypoints, all raised by the offset.
    pub markers: Vec<Vec3>,
    pub marker_radius: f32,
    pub visible: bool,
}

impl PathTrace {
    #[must_use]
    pub fn build<'a>(
        position: Vec3,
        waypoints: impl IntoIterator<Item = &'a Vec3>,
        offset: f32,
        marker_radius: f32,
    ) -> Self {
        let lift = Vec3::new(0.0, offset, 0.0);
        let mut line = vec![position];
        let mut markers = vec![position + lift];
        for &waypoint in waypoints {
            line.push(waypoint + lift);
            markers.push(waypoint + lift);
        }

        Self {
            line,
            markers,
            marker_radius,
            visible: true,
        }
    }
}
