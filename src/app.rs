//! Application controller — wires the controls to the animation worker
//!
//! Start replaces any existing worker with a fresh one; stop terminates
//! the worker and clears the surface. Speed and color-mode changes are
//! forwarded to the running worker without a restart, and persisted.

use egui::{Context, Key};

use crate::config::Settings;
use crate::drawer::{ColorMode, SquareDrawer, MAX_INTERVAL_MS, MIN_INTERVAL_MS};
use crate::surface::Surface;
use crate::theme::{menu_bar, Palette, Theme};
use crate::widgets::{status_bar, toolbar_separator, ControlButton};

pub struct SquaresApp {
    surface: Surface,
    drawer: Option<SquareDrawer>,
    settings: Settings,
    show_about: bool,
}

impl SquaresApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let surface = Surface::new();
        surface.attach_repaint(cc.egui_ctx.clone());
        Self {
            surface,
            drawer: None,
            settings: Settings::load(),
            show_about: false,
        }
    }

    fn is_paused(&self) -> bool {
        self.drawer.as_ref().map_or(false, |d| d.is_paused())
    }

    fn is_running(&self) -> bool {
        self.drawer.is_some() && !self.is_paused()
    }

    /// Replace any existing worker with a fresh one. The old worker is
    /// stopped first, so two loops never run concurrently.
    fn start(&mut self) {
        if let Some(mut old) = self.drawer.take() {
            old.stop();
        }
        self.drawer = Some(SquareDrawer::spawn(
            self.surface.clone(),
            self.settings.interval_ms,
            self.settings.color_mode,
        ));
    }

    fn pause(&mut self) {
        if let Some(drawer) = &self.drawer {
            drawer.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(drawer) = &self.drawer {
            drawer.resume();
        }
    }

    /// Terminate the worker and clear the surface.
    fn stop(&mut self) {
        if let Some(mut drawer) = self.drawer.take() {
            drawer.stop();
        }
        self.surface.clear();
    }

    fn set_interval(&mut self, interval_ms: u64) {
        self.settings.interval_ms = interval_ms;
        if let Some(drawer) = &self.drawer {
            drawer.set_interval(interval_ms);
        }
        self.settings.save();
    }

    fn set_color_mode(&mut self, mode: ColorMode) {
        self.settings.color_mode = mode;
        if let Some(drawer) = &self.drawer {
            drawer.set_color_mode(mode);
        }
        self.settings.save();
    }

    /// Space cycles start / pause / resume; escape stops.
    fn handle_keys(&mut self, ctx: &Context) {
        if self.show_about {
            return;
        }
        let (space, escape) =
            ctx.input(|i| (i.key_pressed(Key::Space), i.key_pressed(Key::Escape)));

        if space {
            if self.drawer.is_none() {
                self.start();
            } else if self.is_paused() {
                self.resume();
            } else {
                self.pause();
            }
        }
        if escape && self.drawer.is_some() {
            self.stop();
        }
    }

    fn draw_menu(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            menu_bar(ui, |ui| {
                ui.menu_button("file", |ui| {
                    if ui.button("start      space").clicked() {
                        self.start();
                        ui.close_menu();
                    }
                    if ui.button("pause").clicked() {
                        self.pause();
                        ui.close_menu();
                    }
                    if ui.button("resume").clicked() {
                        self.resume();
                        ui.close_menu();
                    }
                    if ui.button("stop       esc").clicked() {
                        self.stop();
                        ui.close_menu();
                    }
                });

                ui.menu_button("color", |ui| {
                    let mut new_mode = None;
                    for mode in ColorMode::ALL {
                        let selected = mode == self.settings.color_mode;
                        let label = if selected {
                            format!("* {}", mode.label())
                        } else {
                            format!("  {}", mode.label())
                        };
                        if ui.button(&label).clicked() {
                            new_mode = Some(mode);
                            ui.close_menu();
                        }
                    }
                    if let Some(mode) = new_mode {
                        self.set_color_mode(mode);
                    }
                });

                ui.menu_button("help", |ui| {
                    if ui.button("about").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn draw_controls(&mut self, ctx: &Context) {
        egui::TopBottomPanel::bottom("controls")
            .frame(Theme::control_frame())
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let has_worker = self.drawer.is_some();
                    let paused = self.is_paused();
                    let running = self.is_running();

                    if ui
                        .add_enabled(!running, ControlButton::new("start"))
                        .clicked()
                    {
                        self.start();
                    }
                    if ui
                        .add_enabled(running, ControlButton::new("pause"))
                        .clicked()
                    {
                        self.pause();
                    }
                    if ui
                        .add_enabled(paused, ControlButton::new("resume"))
                        .clicked()
                    {
                        self.resume();
                    }
                    if ui
                        .add_enabled(has_worker, ControlButton::new("stop"))
                        .clicked()
                    {
                        self.stop();
                    }

                    toolbar_separator(ui);

                    // The slider shows speed, the setting stores the tick
                    // interval, so the scale is flipped (right = faster).
                    ui.label("speed:");
                    let mut speed = MIN_INTERVAL_MS + MAX_INTERVAL_MS - self.settings.interval_ms;
                    let slider = ui.add(
                        egui::Slider::new(&mut speed, MIN_INTERVAL_MS..=MAX_INTERVAL_MS)
                            .show_value(false),
                    );
                    if slider.changed() {
                        self.set_interval(MIN_INTERVAL_MS + MAX_INTERVAL_MS - speed);
                    }

                    toolbar_separator(ui);

                    ui.label("color:");
                    let mut mode = self.settings.color_mode;
                    egui::ComboBox::from_id_source("color_mode")
                        .selected_text(mode.label())
                        .width(90.0)
                        .show_ui(ui, |ui| {
                            for m in ColorMode::ALL {
                                ui.selectable_value(&mut mode, m, m.label());
                            }
                        });
                    if mode != self.settings.color_mode {
                        self.set_color_mode(mode);
                    }
                });
            });
    }

    fn draw_status(&mut self, ctx: &Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let state = if self.is_running() {
                "running"
            } else if self.is_paused() {
                "paused"
            } else {
                "stopped"
            };
            let status = format!(
                "{}  |  {} squares  |  {} ms",
                state,
                self.surface.len(),
                self.settings.interval_ms
            );
            status_bar(ui, &status);
        });
    }

    fn draw_canvas(&mut self, ctx: &Context) {
        egui::CentralPanel::default()
            .frame(Theme::canvas_frame())
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap();
                ui.allocate_rect(rect, egui::Sense::hover());

                // Tell the worker where to wrap the cursor.
                self.surface.set_view_width(rect.width());

                self.surface.paint(ui.painter(), rect.min);

                if self.surface.is_empty() && self.drawer.is_none() {
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "press start (or space) to animate squares",
                        egui::FontId::proportional(15.0),
                        Palette::TEXT_DISABLED,
                    );
                }
            });
    }

    fn draw_about(&mut self, ctx: &Context) {
        if !self.show_about {
            return;
        }
        egui::Window::new("about squares")
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.heading("squares");
                    ui.label("version 0.1.0");
                    ui.add_space(8.0);
                    ui.label("animated colored squares");
                });
                ui.add_space(8.0);
                ui.separator();
                ui.add_space(4.0);
                ui.label("controls:");
                ui.label("  start: begin a fresh animation");
                ui.label("  pause / resume: suspend and continue");
                ui.label("  stop: end the animation and clear");
                ui.label("  space: start / pause / resume");
                ui.label("  esc: stop");
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.show_about = false;
                    }
                });
                ui.add_space(4.0);
            });
    }
}

impl eframe::App for SquaresApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);
        self.draw_menu(ctx);
        self.draw_status(ctx);
        self.draw_controls(ctx);
        self.draw_canvas(ctx);
        self.draw_about(ctx);
    }
}
