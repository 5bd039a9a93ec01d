//! Ownership of the currently displayed point-cloud object.
//!
//! Every parameter change rebuilds the cloud wholesale: the previous
//! renderable object is detached and dropped before the next one is
//! attached, so repeated edits never accumulate stale buffers. The
//! render loop only ever reads [`Scene::attached`]; the scene is the
//! single writer.

use rand::Rng;

use crate::cloud::PointCloud;
use crate::config::Config;
use crate::generate;

/// Fixed draw settings bound to one cloud object.
///
/// These mirror what the presentation layer configures on its
/// point material: additive blending, no depth writes, per-vertex
/// colors, and the point size taken from the config at generation
/// time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub point_size: f32,
    pub additive_blend: bool,
    pub depth_write: bool,
    pub vertex_colors: bool,
}

impl Material {
    pub fn for_points(point_size: f32) -> Self {
        Self {
            point_size,
            additive_blend: true,
            depth_write: false,
            vertex_colors: true,
        }
    }
}

/// Identifier of one generation's renderable object. Monotonic across
/// the lifetime of a [`Scene`].
pub type ObjectId = u64;

/// One generation's renderable: the cloud plus its material.
#[derive(Clone, Debug)]
pub struct CloudObject {
    pub id: ObjectId,
    pub cloud: PointCloud,
    pub material: Material,
}

/// Owns at most one live [`CloudObject`] at a time.
///
/// [`Scene::regenerate`] is the only way a new object appears, and it
/// always releases the previous one first. Dropping the old object
/// releases its buffers through ordinary ownership; there is no
/// separate disposal call to forget.
#[derive(Debug, Default)]
pub struct Scene {
    attached: Option<CloudObject>,
    generations: u64,
    released: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tears down the previous object and attaches a freshly generated
    /// one.
    ///
    /// The swap is atomic from the render loop's point of view: the old
    /// object stays attached until the new cloud is fully built, then
    /// the reference is replaced in one assignment.
    ///
    /// ### Parameters
    /// - `cfg` - Current parameters; also supplies the material's point size.
    /// - `rng` - Randomness source forwarded to [`generate::generate`].
    ///
    /// ### Returns
    /// The id of the newly attached object.
    pub fn regenerate(&mut self, cfg: &Config, rng: &mut impl Rng) -> ObjectId {
        let cloud = generate::generate(cfg, rng);

        if self.attached.take().is_some() {
            self.released += 1;
        }

        self.generations += 1;
        let id = self.generations;
        self.attached = Some(CloudObject {
            id,
            cloud,
            material: Material::for_points(cfg.size),
        });
        id
    }

    /// Detaches and releases the current object, if any.
    pub fn clear(&mut self) {
        if self.attached.take().is_some() {
            self.released += 1;
        }
    }

    /// The currently attached object, read by the render loop.
    pub fn attached(&self) -> Option<&CloudObject> {
        self.attached.as_ref()
    }

    /// Total number of objects ever attached.
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Total number of objects released so far.
    pub fn released(&self) -> u64 {
        self.released
    }

    /// Number of objects currently attached: always 0 or 1.
    pub fn live_count(&self) -> usize {
        usize::from(self.attached.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn regenerate_attaches_a_cloud_with_the_configured_count() {
        let cfg = Config::default();
        let mut scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(1);

        let id = scene.regenerate(&cfg, &mut rng);
        assert_eq!(id, 1);

        let object = scene.attached().unwrap();
        assert_eq!(object.cloud.len(), cfg.count as usize);
        assert_eq!(object.material, Material::for_points(cfg.size));
        assert!(object.material.additive_blend);
        assert!(!object.material.depth_write);
        assert!(object.material.vertex_colors);
    }

    #[test]
    fn repeated_regeneration_keeps_exactly_one_live_object() {
        let mut cfg = Config::default();
        cfg.count = 500;
        let mut scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(2);

        for n in 1..=10u64 {
            let id = scene.regenerate(&cfg, &mut rng);
            assert_eq!(id, n, "ids are monotonic");
            assert_eq!(scene.live_count(), 1);
            assert_eq!(scene.generations(), n);
            assert_eq!(scene.released(), n - 1);
        }
    }

    #[test]
    fn regenerate_picks_up_parameter_changes() {
        let mut cfg = Config::default();
        cfg.count = 200;
        let mut scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(3);

        scene.regenerate(&cfg, &mut rng);
        assert_eq!(scene.attached().unwrap().cloud.len(), 200);

        cfg.count = 800;
        cfg.mode = Mode::Helix;
        cfg.size = 0.05;
        scene.regenerate(&cfg, &mut rng);

        let object = scene.attached().unwrap();
        assert_eq!(object.cloud.len(), 800);
        assert_eq!(object.material.point_size, 0.05);
    }

    #[test]
    fn clear_releases_the_attached_object() {
        let cfg = Config::default();
        let mut scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(4);

        scene.regenerate(&cfg, &mut rng);
        scene.clear();

        assert!(scene.attached().is_none());
        assert_eq!(scene.live_count(), 0);
        assert_eq!(scene.released(), 1);

        // Clearing an empty scene is a no-op.
        scene.clear();
        assert_eq!(scene.released(), 1);
    }
}
