//! Core procedural galaxy point-cloud generation library.
//!
//! Main components:
//! - [`config`] — generation parameters and the distribution mode enum.
//! - [`palette`] — colors, hex parsing, and the named theme table.
//! - [`cloud`] — the generated point cloud (positions + colors).
//! - [`generate`] — the per-point generation kernels.
//! - [`scene`] — ownership of the currently attached renderable cloud.

pub mod cloud;
pub mod config;
pub mod generate;
pub mod palette;
pub mod scene;
