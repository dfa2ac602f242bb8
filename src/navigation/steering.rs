//! Steering math shared by the path follower.

use glam::{Quat, Vec3};

/// Squared distance under which a leg counts as already complete.
pub const ARRIVAL_EPSILON_SQ: f32 = 0.01;

/// Fraction of the remaining turn applied every frame. Fixed per frame,
/// not scaled by `dt`.
pub const TURN_FRACTION: f32 = 0.1;

/// Rotation that faces `target` from `from` on the walking plane, with +Z
/// as the forward axis. `None` when the two points share an XZ position.
#[must_use]
pub fn facing(from: Vec3, target: Vec3) -> Option<Quat> {
    let flat = Vec3::new(target.x - from.x, 0.0, target.z - from.z);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(flat.x.atan2(flat.z)))
}

/// One frame of easing toward `desired`.
#[inline]
#[must_use]
pub fn ease_rotation(current: Quat, desired: Quat) -> Quat {
    current.slerp(desired, TURN_FRACTION)
}

/// Forward (+Z) direction of a rotation.
#[inline]
#[must_use]
pub fn forward(rotation: Quat) -> Vec3 {
    rotation * Vec3::Z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_along_axes() {
        let q = facing(Vec3::ZERO, Vec3::new(0.0, 5.0, 3.0)).unwrap();
        assert!(forward(q).distance(Vec3::Z) < 1e-5);

        let q = facing(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)).unwrap();
        assert!(forward(q).distance(Vec3::X) < 1e-5);
    }

    #[test]
    fn test_facing_ignores_height() {
        assert!(facing(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0)).is_none());
    }

    #[test]
    fn test_ease_rotation_moves_a_tenth() {
        let target = Quat::from_rotation_y(1.0);
        let eased = ease_rotation(Quat::IDENTITY, target);
        assert!((eased.angle_between(Quat::IDENTITY) - 0.1).abs() < 1e-4);
    }
}
