use glam::{Vec3, Vec4};

/// Skinned vertex data. Shared read-only between a rig and its clones.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    /// Up to four skeleton bone indices per vertex.
    pub joints: Vec<[u16; 4]>,
    /// Weights matching `joints`; each row sums to one.
    pub weights: Vec<Vec4>,
}

impl Geometry {
    #[must_use]
    pub fn new(positions: Vec<Vec3>, joints: Vec<[u16; 4]>, weights: Vec<Vec4>) -> Self {
        Self {
            positions,
            joints,
            weights,
        }
    }

    /// Every vertex fully weighted to a single bone.
    #[must_use]
    pub fn rigid(positions: Vec<Vec3>, bones: &[u16]) -> Self {
        let joints = bones.iter().map(|&b| [b, 0, 0, 0]).collect();
        let weights = vec![Vec4::X; bones.len()];
        Self::new(positions, joints, weights)
    }
}
