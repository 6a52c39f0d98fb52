//! User interface for the gallery wall configurator.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main GalleryApp
//! - `jobs` - Async catalog and checkout calls for native and WASM
//! - `canvas` - Wall preview, frame painting and pointer positioning
//! - `panels` - Step panels, catalog list and cart contents

mod canvas;
mod jobs;
mod panels;
mod state;

pub use state::{CatalogStatus, GalleryApp, RevealState, UiPrefs};

use crate::types::Step;
use eframe::egui;

/// eframe storage key of the shell preferences.
pub const PREFS_KEY: &str = "ui_prefs";

impl eframe::App for GalleryApp {
    /// Persist shell preferences between restarts. The selection persists itself.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, PREFS_KEY, &self.prefs);
    }

    /// Main update function called by egui for each frame.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    /// * `_frame` - The eframe frame
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.draw(ctx);
    }
}

impl GalleryApp {
    /// Draws one frame of the whole shell.
    pub fn draw(&mut self, ctx: &egui::Context) {
        let visuals = if self.prefs.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        self.handle_pending_jobs(ctx);
        self.handle_undo_redo_keys(ctx);

        let size = ctx.input(|i| i.screen_rect().size());
        self.device = crate::viewport::DeviceProfile::from_size(size.x, size.y, self.store.config().mobile_breakpoint);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        let step = self.store.selection().current_step;
        if step == Step::Checkout {
            egui::CentralPanel::default().show(ctx, |ui| {
                self.draw_step_nav(ui);
                ui.heading("Your cart");
                self.draw_cart_contents(ui);
            });
        } else {
            self.draw_step_panel(ctx, step);
            egui::CentralPanel::default().show(ctx, |ui| {
                self.draw_wall(ui);
            });
        }

        self.draw_cart_window(ctx);
        self.draw_layout_confirm(ctx);
        self.draw_reset_confirm(ctx);
    }

    /// Handles keyboard shortcuts for undo and redo.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context for checking input
    pub fn handle_undo_redo_keys(&mut self, ctx: &egui::Context) {
        // Text fields keep their own undo
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Z) && i.modifiers.command && !i.modifiers.shift) {
            self.perform_undo();
        } else if ctx.input(|i| {
            (i.key_pressed(egui::Key::Z) && i.modifiers.command && i.modifiers.shift)
                || (i.key_pressed(egui::Key::Y) && i.modifiers.command)
        }) {
            self.perform_redo();
        }
    }

    /// Undoes the last change and drops a press that no longer matches the wall.
    pub fn perform_undo(&mut self) {
        if self.store.undo() {
            self.press = None;
            self.clamp_active_slot();
        }
    }

    /// Redoes the last undone change.
    pub fn perform_redo(&mut self) {
        if self.store.redo() {
            self.press = None;
            self.clamp_active_slot();
        }
    }

    fn clamp_active_slot(&mut self) {
        let slots = self
            .store
            .selection()
            .selected_layout
            .as_ref()
            .map_or(0, |l| l.frames.len());
        if self.active_slot.is_some_and(|s| s >= slots) {
            self.active_slot = None;
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let current = self.store.selection().current_step;
            for step in Step::ALL {
                if ui.selectable_label(current == step, step.label()).clicked() {
                    self.store.go_to_step(step);
                }
            }

            ui.separator();

            ui.add_enabled_ui(self.store.can_undo(), |ui| {
                if ui.button("⟲ Undo").clicked() {
                    self.perform_undo();
                }
            });
            ui.add_enabled_ui(self.store.can_redo(), |ui| {
                if ui.button("⟳ Redo").clicked() {
                    self.perform_redo();
                }
            });
            if ui.button("Start over").clicked() {
                self.show_reset_confirm = true;
            }

            ui.separator();
            ui.toggle_value(&mut self.prefs.dark_mode, "🌙");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = format!("🛒 Cart ({})", self.store.cart_item_count());
                if ui.selectable_label(self.store.selection().show_cart, label).clicked() {
                    self.store.toggle_cart();
                }
            });
        });
    }

    /// The step panel sits right of the wall on wide screens and below it on phones.
    fn draw_step_panel(&mut self, ctx: &egui::Context, step: Step) {
        let contents = |app: &mut Self, ui: &mut egui::Ui| {
            app.draw_step_nav(ui);
            match step {
                Step::Step1 => app.draw_room_step(ui),
                Step::Step2 => app.draw_layout_step(ui),
                Step::Step3 => app.draw_artwork_step(ui),
                Step::Checkout => {}
            }
        };

        if self.device.is_mobile {
            egui::TopBottomPanel::bottom("step_panel")
                .resizable(true)
                .default_height(ctx.input(|i| i.screen_rect().height()) * 0.45)
                .show(ctx, |ui| contents(self, ui));
        } else {
            let viewport_width = ctx.input(|i| i.screen_rect().width());
            let max_width = (viewport_width * 0.6).max(220.0);
            let width = self.prefs.side_panel_width.clamp(220.0, max_width);
            egui::SidePanel::right("step_panel")
                .resizable(true)
                .default_width(width)
                .show(ctx, |ui| {
                    self.prefs.side_panel_width = ui.available_width().clamp(220.0, max_width);
                    contents(self, ui);
                });
        }
    }

    fn draw_cart_window(&mut self, ctx: &egui::Context) {
        let mut open = self.store.selection().show_cart;
        if !open {
            return;
        }
        egui::Window::new("Cart")
            .open(&mut open)
            .collapsible(false)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_cart_contents(ui));
        if !open {
            self.store.set_show_cart(false);
        }
    }

    fn draw_layout_confirm(&mut self, ctx: &egui::Context) {
        let Some(name) = self.store.pending_layout().map(|l| l.name.clone()) else {
            return;
        };
        egui::Window::new("Change layout?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(format!(
                    "Switching to {name} removes artworks and frames from slots it does not have, \
                     and moves the frames back to their starting positions."
                ));
                ui.horizontal(|ui| {
                    if ui.button("Change layout").clicked() {
                        self.store.confirm_layout_change();
                        self.clamp_active_slot();
                    }
                    if ui.button("Cancel").clicked() {
                        self.store.cancel_layout_change();
                    }
                });
            });
    }

    fn draw_reset_confirm(&mut self, ctx: &egui::Context) {
        if !self.show_reset_confirm {
            return;
        }
        egui::Window::new("Start over?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("This clears your room, layout, artworks and cart.");
                ui.horizontal(|ui| {
                    if ui.button("Start over").clicked() {
                        self.store.handle_reset();
                        self.active_slot = None;
                        self.press = None;
                        self.reset_reveal();
                        self.show_reset_confirm = false;
                    }
                    if ui.button("Cancel").clicked() {
                        self.show_reset_confirm = false;
                    }
                });
            });
    }
}

#[cfg(test)]
mod tests;
