//! Interactive galaxy point-cloud viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the generation config and
//! the scene holding the current cloud, and implements [`eframe::App`]
//! to render and control the generator through an egui UI.

use std::time::Instant;

use eframe::App;
use glam::Vec3;
use rand::rngs::ThreadRng;

use galaxy_core::config::{self, Config, Mode};
use galaxy_core::palette::{self, Theme};
use galaxy_core::scene::Scene;

use crate::debounce::Debounce;

/// Radians of auto-rotation per second.
const AUTO_ROTATE_SPEED: f32 = 0.25;

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The generation core: [`Config`], [`Scene`], and the RNG stream.
/// - Camera state (yaw/pitch orbit, zoom, pan) for the painted view.
/// - The [`Debounce`] tracker implementing the trigger policy: mode
///   and theme changes regenerate immediately, numeric and color
///   edits regenerate once the edit settles, and the auto-rotate
///   toggle never regenerates.
///
/// The typical per-frame update is:
/// 1. Build the control panels, recording which controls changed.
/// 2. Regenerate if a discrete control fired or a debounced edit settled.
/// 3. Project and paint the currently attached cloud.
pub struct Viewer {
    cfg: Config,
    scene: Scene,
    rng: ThreadRng,
    debounce: Debounce,

    /// Name of the selected theme, or `None` once a color was edited
    /// by hand.
    theme_name: Option<&'static str>,

    yaw: f32,
    pitch: f32,
    zoom: f32,
    pan: egui::Vec2,

    last_frame_time: f64,
    last_gen_secs: f64,
}

impl Viewer {
    /// Creates a viewer with default parameters and an initial cloud
    /// already attached.
    pub fn new() -> Self {
        let mut viewer = Self {
            cfg: Config::default(),
            scene: Scene::new(),
            rng: rand::rng(),
            debounce: Debounce::new(),
            theme_name: Some(palette::THEMES[0].name),
            yaw: 0.5,
            pitch: 0.5,
            zoom: 40.0,
            pan: egui::vec2(0.0, 0.0),
            last_frame_time: 0.0,
            last_gen_secs: 0.0,
        };
        viewer.regenerate();
        viewer
    }

    /// Rebuilds the point cloud from the current config.
    ///
    /// The config is clamped to its documented domains first, so a
    /// control caught mid-drag outside its range cannot reach the
    /// generator.
    fn regenerate(&mut self) {
        let clamped = self.cfg.clamped();
        if clamped != self.cfg {
            log::warn!("config outside its domain, clamping before generation");
            self.cfg = clamped;
        }

        let start = Instant::now();
        let id = self.scene.regenerate(&self.cfg, &mut self.rng);
        self.last_gen_secs = start.elapsed().as_secs_f64();

        log::info!(
            "regenerated cloud #{id}: mode={}, count={}, {:.1} ms",
            self.cfg.mode.label(),
            self.cfg.count,
            self.last_gen_secs * 1000.0,
        );
    }

    /// Overwrites the gradient endpoints from a theme and regenerates
    /// immediately.
    fn apply_theme(&mut self, theme: &'static Theme) {
        self.cfg.apply_theme(theme);
        self.theme_name = Some(theme.name);
        self.regenerate();
    }

    /// Projects a world-space point into screen-space.
    ///
    /// The point is orbited by `yaw` around the y axis and `pitch`
    /// around the x axis, then mapped orthographically: scaled by
    /// `zoom`, offset by `pan`, and centered inside `rect`. The y axis
    /// is flipped so that positive y goes up in world space.
    fn project(&self, p: Vec3, rect: egui::Rect) -> egui::Pos2 {
        let (sy, cy) = self.yaw.sin_cos();
        let x = p.x * cy + p.z * sy;
        let z = -p.x * sy + p.z * cy;

        let (sp, cp) = self.pitch.sin_cos();
        let y = p.y * cp - z * sp;

        let center = rect.center();
        egui::pos2(
            center.x + x * self.zoom + self.pan.x,
            center.y - y * self.zoom + self.pan.y,
        )
    }

    /// Helper to draw a labeled `u32` [`egui::DragValue`]. Returns
    /// whether the value changed this frame.
    fn labeled_drag_u32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut u32,
        range: std::ops::RangeInclusive<u32>,
        speed: f64,
    ) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label(label);
            changed = ui
                .add(egui::DragValue::new(value).range(range).speed(speed))
                .changed();
        });
        changed
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`]. Returns
    /// whether the value changed this frame.
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label(label);
            changed = ui
                .add(egui::DragValue::new(value).range(range).speed(speed))
                .changed();
        });
        changed
    }

    /// Helper to draw a labeled color button bound to a `Vec3` color.
    /// Returns whether the color changed this frame.
    fn labeled_color(ui: &mut egui::Ui, label: &str, color: &mut palette::Color) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label(label);
            let mut rgb = [color.x, color.y, color.z];
            if ui.color_edit_button_rgb(&mut rgb).changed() {
                *color = palette::Color::new(rgb[0], rgb[1], rgb[2]);
                changed = true;
            }
        });
        changed
    }

    /// Builds the top panel (regenerate button, auto-rotate, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Regenerate").clicked() {
                    self.regenerate();
                }

                // Presentation-only: never triggers a regeneration.
                ui.checkbox(&mut self.cfg.auto_rotate, "Auto-rotate");

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 2.0..=400.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (generation stats).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("last gen = {:.1} ms", self.last_gen_secs * 1000.0));
                ui.separator();
                if let Some(object) = self.scene.attached() {
                    ui.label(format!("points = {}", object.cloud.len()));
                    ui.label(format!("cloud #{}", object.id));
                }
                ui.label(self.cfg.mode.label());
            });
        });
    }

    /// Builds the right-hand configuration panel.
    ///
    /// Mode and theme selection regenerate immediately; everything else
    /// goes through the debounce tracker.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Galaxy");

                ui.separator();
                let mut mode_changed = false;
                egui::ComboBox::from_label("Mode")
                    .selected_text(self.cfg.mode.label())
                    .show_ui(ui, |ui| {
                        for mode in Mode::ALL {
                            if ui
                                .selectable_value(&mut self.cfg.mode, mode, mode.label())
                                .changed()
                            {
                                mode_changed = true;
                            }
                        }
                    });
                if mode_changed {
                    self.regenerate();
                }

                let mut chosen_theme: Option<&'static Theme> = None;
                egui::ComboBox::from_label("Theme")
                    .selected_text(self.theme_name.unwrap_or("Custom"))
                    .show_ui(ui, |ui| {
                        for theme in &palette::THEMES {
                            if ui
                                .selectable_label(self.theme_name == Some(theme.name), theme.name)
                                .clicked()
                            {
                                chosen_theme = Some(theme);
                            }
                        }
                    });
                if let Some(theme) = chosen_theme {
                    self.apply_theme(theme);
                }

                ui.separator();
                ui.label("Shape");
                let mut edited = false;
                edited |= Self::labeled_drag_u32(
                    ui,
                    "count:",
                    &mut self.cfg.count,
                    config::COUNT_RANGE,
                    50.0,
                );
                edited |= Self::labeled_drag_f32(
                    ui,
                    "radius:",
                    &mut self.cfg.radius,
                    config::RADIUS_RANGE,
                    0.1,
                );
                edited |= Self::labeled_drag_u32(
                    ui,
                    "branches:",
                    &mut self.cfg.branches,
                    config::BRANCH_RANGE,
                    1.0,
                );
                edited |=
                    Self::labeled_drag_f32(ui, "spin:", &mut self.cfg.spin, config::SPIN_RANGE, 0.05);
                edited |= Self::labeled_drag_f32(
                    ui,
                    "randomness power:",
                    &mut self.cfg.randomness_power,
                    config::POWER_RANGE,
                    0.05,
                );
                edited |= Self::labeled_drag_f32(
                    ui,
                    "point size:",
                    &mut self.cfg.size,
                    config::SIZE_RANGE,
                    0.001,
                );

                ui.separator();
                ui.label("Colors");
                let mut color_edited = false;
                color_edited |= Self::labeled_color(ui, "inside:", &mut self.cfg.inside_color);
                color_edited |= Self::labeled_color(ui, "outside:", &mut self.cfg.outside_color);
                if color_edited {
                    // Hand-edited colors no longer match any theme.
                    self.theme_name = None;
                    edited = true;
                }

                if edited {
                    self.debounce.mark();
                }

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                    self.theme_name = Some(palette::THEMES[0].name);
                    self.regenerate();
                }
            });
    }

    /// Builds the central panel where the cloud is painted and orbited.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Orbit with primary drag, pan with secondary drag.
            if response.dragged_by(egui::PointerButton::Secondary) {
                self.pan += response.drag_delta();
            } else if response.dragged() {
                let delta = response.drag_delta();
                self.yaw += delta.x * 0.01;
                self.pitch = (self.pitch + delta.y * 0.01).clamp(-1.5, 1.5);
            }

            // Scroll to zoom.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(2.0, 400.0);
            }

            // Advance the auto-rotation from frame time.
            let now = ctx.input(|i| i.time);
            let dt = (now - self.last_frame_time).clamp(0.0, 0.1) as f32;
            self.last_frame_time = now;
            if self.cfg.auto_rotate {
                self.yaw += dt * AUTO_ROTATE_SPEED;
                ctx.request_repaint();
            }

            // Paint the attached cloud. Points are round sprites with a
            // translucent fill, approximating additive blending where
            // they pile up.
            if let Some(object) = self.scene.attached() {
                let radius_px = (object.material.point_size * self.zoom * 2.0).clamp(0.75, 8.0);
                for (p, c) in object.cloud.positions.iter().zip(&object.cloud.colors) {
                    let pos = self.project(*p, rect);
                    if !rect.contains(pos) {
                        continue;
                    }
                    let color = egui::Color32::from_rgba_unmultiplied(
                        (c.x.clamp(0.0, 1.0) * 255.0) as u8,
                        (c.y.clamp(0.0, 1.0) * 255.0) as u8,
                        (c.z.clamp(0.0, 1.0) * 255.0) as u8,
                        160,
                    );
                    painter.circle_filled(pos, radius_px, color);
                }
            }
        });
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    ///
    /// Debounced edits are settled after the panels are built: once no
    /// pointer button is down and no widget holds focus, a single
    /// regeneration fires for the whole edit.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);

        let editing = ctx.input(|i| i.pointer.any_down())
            || ctx.memory(|m| m.focused().is_some());
        if self.debounce.settle(editing) {
            self.regenerate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_core::palette::parse_hex;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn new_viewer_attaches_exactly_one_cloud() {
        let viewer = Viewer::new();

        assert_eq!(viewer.scene.live_count(), 1);
        assert_eq!(viewer.scene.generations(), 1);

        let object = viewer.scene.attached().unwrap();
        assert_eq!(object.cloud.len(), viewer.cfg.count as usize);
    }

    #[test]
    fn repeated_regeneration_never_accumulates_objects() {
        let mut viewer = Viewer::new();
        viewer.cfg.count = 500;

        for _ in 0..5 {
            viewer.regenerate();
            assert_eq!(viewer.scene.live_count(), 1);
        }
        assert_eq!(viewer.scene.generations(), 6);
        assert_eq!(viewer.scene.released(), 5);
    }

    #[test]
    fn applying_alien_glow_sets_exact_colors_and_one_regeneration() {
        let mut viewer = Viewer::new();
        let before = viewer.scene.generations();

        let theme = Theme::lookup("Alien Glow").unwrap();
        viewer.apply_theme(theme);

        assert_eq!(viewer.cfg.inside_color, parse_hex("#00ffcc").unwrap());
        assert_eq!(viewer.cfg.outside_color, parse_hex("#330066").unwrap());
        assert_eq!(viewer.theme_name, Some("Alien Glow"));
        assert_eq!(viewer.scene.generations(), before + 1);
    }

    #[test]
    fn regenerate_clamps_an_out_of_range_config() {
        let mut viewer = Viewer::new();
        viewer.cfg.count = 999_999;
        viewer.cfg.radius = -2.0;

        viewer.regenerate();

        assert_eq!(viewer.cfg.count, 20_000);
        assert_eq!(viewer.cfg.radius, 0.5);
        assert_eq!(
            viewer.scene.attached().unwrap().cloud.len(),
            viewer.cfg.count as usize
        );
    }

    #[test]
    fn project_maps_the_origin_to_the_panned_center() {
        let mut viewer = Viewer::new();
        viewer.pan = egui::vec2(10.0, -4.0);
        let rect = test_rect();

        let pos = viewer.project(Vec3::ZERO, rect);
        let center = rect.center();
        assert_eq!(pos, egui::pos2(center.x + 10.0, center.y - 4.0));
    }

    #[test]
    fn project_sends_the_depth_axis_to_the_center_column() {
        let mut viewer = Viewer::new();
        viewer.yaw = std::f32::consts::FRAC_PI_2;
        viewer.pitch = 0.0;
        viewer.pan = egui::vec2(0.0, 0.0);
        let rect = test_rect();

        // With yaw = pi/2 the world x axis points straight into the
        // screen, so a point on it lands on the screen center.
        let pos = viewer.project(Vec3::new(1.0, 0.0, 0.0), rect);
        assert!((pos.x - rect.center().x).abs() < 1e-3);
        assert!((pos.y - rect.center().y).abs() < 1e-3);
    }
}
