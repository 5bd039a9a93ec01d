use glam::Vec3;

use crate::palette::Color;

/// A generated point cloud: one position and one color per point.
///
/// Both vectors always have the same length; index `i` in one
/// corresponds to index `i` in the other.
#[derive(Clone, Debug, Default)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Color>,
}

impl PointCloud {
    pub fn with_capacity(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
        }
    }

    #[inline]
    pub fn push(&mut self, position: Vec3, color: Color) {
        self.positions.push(position);
        self.colors.push(color);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions as a flat `x0 y0 z0 x1 y1 z1 ...` array of length
    /// `3 * len()`, in the layout a vertex buffer expects.
    pub fn flat_positions(&self) -> Vec<f32> {
        self.positions
            .iter()
            .flat_map(|p| [p.x, p.y, p.z])
            .collect()
    }

    /// Colors as a flat `r0 g0 b0 r1 g1 b1 ...` array of length
    /// `3 * len()`.
    pub fn flat_colors(&self) -> Vec<f32> {
        self.colors.iter().flat_map(|c| [c.x, c.y, c.z]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_positions_and_colors_parallel() {
        let mut cloud = PointCloud::with_capacity(2);
        cloud.push(Vec3::new(1.0, 2.0, 3.0), Color::new(0.1, 0.2, 0.3));
        cloud.push(Vec3::ZERO, Color::ONE);

        assert_eq!(cloud.len(), 2);
        assert!(!cloud.is_empty());
        assert_eq!(cloud.positions.len(), cloud.colors.len());
    }

    #[test]
    fn flat_accessors_interleave_components() {
        let mut cloud = PointCloud::default();
        cloud.push(Vec3::new(1.0, 2.0, 3.0), Color::new(0.5, 0.25, 0.75));
        cloud.push(Vec3::new(4.0, 5.0, 6.0), Color::new(0.0, 1.0, 0.0));

        assert_eq!(cloud.flat_positions(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(cloud.flat_colors(), vec![0.5, 0.25, 0.75, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn empty_cloud_has_empty_flat_arrays() {
        let cloud = PointCloud::default();
        assert!(cloud.is_empty());
        assert!(cloud.flat_positions().is_empty());
        assert!(cloud.flat_colors().is_empty());
    }
}
