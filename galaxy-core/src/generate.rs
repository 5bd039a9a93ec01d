//! Per-point generation kernels for the galaxy point cloud.
//!
//! For each point index `i` the generator performs the same pipeline:
//! 1. Draw a radius uniformly in `[0, cfg.radius)`.
//! 2. Derive the branch angle from `i mod branches` — by index, not by
//!    draw, so branch membership is deterministic.
//! 3. Derive the spin angle as `radius * spin`.
//! 4. Draw three shaped jitter scalars (see [`Jitter`]).
//! 5. Dispatch to the kernel for the configured [`Mode`].
//! 6. Blend the point color from the inside color to the outside color
//!    by `radius / cfg.radius`.
//!
//! The `Cluster`, `BlackHole`, and `GalaxyMerge` kernels ignore the
//! shared jitter scalars and branch/spin terms and take fresh draws
//! instead. That asymmetry is part of each mode's look and is kept
//! as-is.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::cloud::PointCloud;
use crate::config::{Config, Mode};
use crate::palette;

/// Three shaped jitter scalars, one per axis.
///
/// Each scalar is `sign * u^power` with `u` uniform in `[0, 1)` and
/// the sign an independent fair coin flip. Raising `u` to
/// `randomness_power` concentrates the magnitude near zero as the
/// power grows, so points scatter tightly around the mode's ideal
/// curve instead of uniformly.
#[derive(Clone, Copy, Debug)]
struct Jitter {
    x: f32,
    y: f32,
    z: f32,
}

impl Jitter {
    fn draw(rng: &mut impl Rng, power: f32) -> Self {
        Self {
            x: shaped_scalar(rng, power),
            y: shaped_scalar(rng, power),
            z: shaped_scalar(rng, power),
        }
    }
}

fn shaped_scalar(rng: &mut impl Rng, power: f32) -> f32 {
    let magnitude = rng.random::<f32>().powf(power);
    let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    sign * magnitude
}

/// Angular offset of point `i` across the configured branch count.
///
/// Points are assigned to branches round-robin by index, so two points
/// with the same `i mod branches` always share this term regardless of
/// any random draws.
#[inline]
pub fn branch_angle(i: usize, branches: u32) -> f32 {
    let branches = branches.max(1);
    (i as u32 % branches) as f32 / branches as f32 * TAU
}

/// Generates the full point cloud for the given config.
///
/// Pure given `cfg` and the RNG stream: the same seeded generator
/// yields identical output on every call. Runs in O(count).
///
/// Degenerate inputs (`count == 0` or `radius <= 0`) return an empty
/// cloud rather than panicking, since live parameter edits can pass
/// through such values mid-drag.
///
/// ### Parameters
/// - `cfg` - Generation parameters; `size` and `auto_rotate` are ignored here.
/// - `rng` - Randomness source. Inject a seeded generator for
///   reproducible output.
///
/// ### Returns
/// A [`PointCloud`] with exactly `cfg.count` points, or an empty one
/// for degenerate inputs.
pub fn generate(cfg: &Config, rng: &mut impl Rng) -> PointCloud {
    let count = cfg.count as usize;
    if count == 0 || cfg.radius <= 0.0 {
        return PointCloud::default();
    }

    let mut cloud = PointCloud::with_capacity(count);
    for i in 0..count {
        let radius = rng.random::<f32>() * cfg.radius;
        let branch_angle = branch_angle(i, cfg.branches);
        let spin_angle = radius * cfg.spin;
        let jitter = Jitter::draw(rng, cfg.randomness_power);

        let position = match cfg.mode {
            Mode::Spiral => spiral(radius, branch_angle, spin_angle, jitter),
            Mode::Elliptical => elliptical(radius, branch_angle, jitter),
            Mode::Cluster => cluster(cfg.radius, rng),
            Mode::Explosion => explosion(radius, jitter),
            Mode::Tornado => tornado(radius, branch_angle, spin_angle, i, count, cfg.radius),
            Mode::Swirl => swirl(radius, branch_angle, spin_angle, i, jitter),
            Mode::Helix => helix(radius, branch_angle, i, count, cfg.radius, jitter),
            Mode::BlackHole => black_hole(radius, rng),
            Mode::GalaxyMerge => galaxy_merge(radius, rng),
        };

        // radius < cfg.radius by construction, so t stays in [0, 1).
        let t = radius / cfg.radius;
        let color = palette::lerp(cfg.inside_color, cfg.outside_color, t);

        cloud.push(position, color);
    }
    cloud
}

/// Flat disc with arms twisted proportionally to radius.
fn spiral(radius: f32, branch_angle: f32, spin_angle: f32, j: Jitter) -> Vec3 {
    let angle = branch_angle + spin_angle;
    Vec3::new(
        angle.cos() * radius + j.x,
        j.y,
        angle.sin() * radius + j.z,
    )
}

/// Untwisted arms stretched along x and squashed along z.
fn elliptical(radius: f32, branch_angle: f32, j: Jitter) -> Vec3 {
    Vec3::new(
        branch_angle.cos() * radius * 1.2 + j.x * 0.5,
        j.y * 0.2,
        branch_angle.sin() * radius * 0.8 + j.z * 0.5,
    )
}

/// Uniform cube spanning `[-radius, radius]` on every axis. Ignores
/// the per-point radius and the shared jitter.
fn cluster(config_radius: f32, rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        centered(rng) * config_radius * 2.0,
        centered(rng) * config_radius * 2.0,
        centered(rng) * config_radius * 2.0,
    )
}

/// A uniform draw recentered on zero, spanning `[-0.5, 0.5)`.
#[inline]
fn centered(rng: &mut impl Rng) -> f32 {
    rng.random::<f32>() - 0.5
}

/// Jitter scaled outward by the drawn radius on every axis.
fn explosion(radius: f32, j: Jitter) -> Vec3 {
    Vec3::new(radius * j.x, radius * j.y, radius * j.z)
}

/// Funnel rising with index: radius controls the ring, the index
/// ratio controls the height along the column.
fn tornado(
    radius: f32,
    branch_angle: f32,
    spin_angle: f32,
    i: usize,
    count: usize,
    config_radius: f32,
) -> Vec3 {
    let angle = branch_angle + spin_angle;
    let height = radius * 2.0;
    Vec3::new(
        angle.sin() * radius,
        height * (i as f32 / count as f32) - config_radius,
        angle.cos() * radius,
    )
}

/// Spiral with an extra index-driven wobble on the angle and a wave
/// along y.
fn swirl(radius: f32, branch_angle: f32, spin_angle: f32, i: usize, j: Jitter) -> Vec3 {
    let swirl_factor = (i as f32 / 100.0).sin() * 0.5;
    let angle = branch_angle + spin_angle + swirl_factor;
    Vec3::new(
        angle.cos() * radius + j.x * 0.5,
        (swirl_factor * 5.0).sin() * 2.0 + j.y * 0.5,
        angle.sin() * radius + j.z * 0.5,
    )
}

/// Corkscrew climbing from `-2 * config_radius` to `+2 * config_radius`
/// as the index advances.
fn helix(
    radius: f32,
    branch_angle: f32,
    i: usize,
    count: usize,
    config_radius: f32,
    j: Jitter,
) -> Vec3 {
    let angle = i as f32 * 0.02 + branch_angle;
    let helix_radius = radius * 0.6;
    Vec3::new(
        angle.cos() * helix_radius + j.x * 0.3,
        (i as f32 / count as f32) * config_radius * 4.0 - config_radius * 2.0,
        angle.sin() * helix_radius + j.z * 0.3,
    )
}

/// Thin accretion ring in the xz plane. Draws a fresh angle instead of
/// using the branch/spin terms.
fn black_hole(radius: f32, rng: &mut impl Rng) -> Vec3 {
    let angle = rng.random::<f32>() * TAU;
    Vec3::new(
        angle.cos() * radius,
        rng.random::<f32>() * 0.1,
        angle.sin() * radius,
    )
}

/// Two-galaxy debris field: a uniform cube scaled by twice the drawn
/// radius. Ignores the shared jitter.
fn galaxy_merge(radius: f32, rng: &mut impl Rng) -> Vec3 {
    let merge_radius = radius * 2.0;
    Vec3::new(
        centered(rng) * merge_radius,
        centered(rng) * merge_radius,
        centered(rng) * merge_radius,
    )
}
