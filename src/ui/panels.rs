//! Step panels: room and background, layout, artwork assignment, cart.

use super::canvas::hex_color;
use super::state::{CatalogStatus, GalleryApp};
use crate::data;
use crate::filter::available_values;
use crate::store::{format_price, LayoutChange};
use crate::types::*;
use eframe::egui;

impl GalleryApp {
    /// Back/next buttons shown above every step panel.
    pub(crate) fn draw_step_nav(&mut self, ui: &mut egui::Ui) {
        let step = self.store.selection().current_step;
        ui.horizontal(|ui| {
            ui.add_enabled_ui(step.previous().is_some(), |ui| {
                if ui.button("← Back").clicked() {
                    self.store.previous_step();
                }
            });
            ui.add_enabled_ui(step.next().is_some(), |ui| {
                if ui.button("Next →").clicked() {
                    self.store.next_step();
                }
            });
        });
        ui.separator();
    }

    /// Step 1: room and wall background.
    pub(crate) fn draw_room_step(&mut self, ui: &mut egui::Ui) {
        ui.heading("Choose your room");
        let selected_place = self.store.selection().selected_place.as_ref().map(|p| p.id.clone());
        for place in data::places() {
            ui.horizontal(|ui| {
                swatch(ui, &place.color);
                let selected = selected_place.as_deref() == Some(place.id.as_str());
                if ui.selectable_label(selected, place.name.as_str()).clicked() {
                    self.store.select_place(place.clone());
                }
            });
        }

        ui.add_space(12.0);
        ui.heading("Wall background");
        let selected_background = self
            .store
            .selection()
            .selected_background
            .as_ref()
            .map(|b| b.id.clone());
        for (section_index, section) in data::background_sections().into_iter().enumerate() {
            ui.label(egui::RichText::new(&section.name).strong());
            ui.horizontal_wrapped(|ui| {
                for (variant_index, background) in section.variants.into_iter().enumerate() {
                    swatch(ui, &background.color);
                    let selected = selected_background.as_deref() == Some(background.id.as_str());
                    if ui.selectable_label(selected, background.name.as_str()).clicked() {
                        self.store.select_background(section_index, variant_index, background);
                    }
                }
            });
        }
    }

    /// Step 2: layout picker.
    pub(crate) fn draw_layout_step(&mut self, ui: &mut egui::Ui) {
        ui.heading("Choose a layout");
        let current = self.store.selection().selected_layout.as_ref().map(|l| l.id.clone());
        for layout in data::layouts() {
            let selected = current.as_deref() == Some(layout.id.as_str());
            let label = format!("{} ({} frames)", layout.name, layout.frame_count);
            if ui.selectable_label(selected, label).clicked()
                && self.store.request_layout_change(layout) == LayoutChange::Applied
            {
                self.active_slot = None;
            }
        }
    }

    /// Step 3: slots, catalog, frame styles, arrangement and wall settings.
    pub(crate) fn draw_artwork_step(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().id_salt("artwork_step").show(ui, |ui| {
            self.draw_slot_picker(ui);
            ui.separator();
            self.draw_arrangement(ui);
            ui.separator();
            egui::CollapsingHeader::new("Frame style")
                .default_open(true)
                .show(ui, |ui| self.draw_frame_styles(ui));
            egui::CollapsingHeader::new("Wall settings").show(ui, |ui| self.draw_wall_settings(ui));
            ui.separator();
            ui.horizontal(|ui| {
                ui.strong(format!("Total: {}", self.store.calculate_total_price()));
                let has_artworks = !self.store.selection().selected_artworks.is_empty();
                ui.add_enabled_ui(has_artworks, |ui| {
                    if ui.button("Add to cart").clicked() {
                        self.store.handle_add_to_cart();
                    }
                });
            });
            ui.separator();
            self.draw_catalog(ui);
        });
    }

    fn draw_slot_picker(&mut self, ui: &mut egui::Ui) {
        let Some(layout) = self.store.selection().selected_layout.clone() else {
            ui.label("Pick a layout in step 2 first.");
            return;
        };
        ui.label("Frame to fill:");
        ui.horizontal_wrapped(|ui| {
            for (index, frame) in layout.frames.iter().enumerate() {
                let filled = self.store.selection().selected_artworks.contains_key(&index);
                let mark = if filled { "●" } else { "○" };
                let label = format!("{mark} {} · {}", index + 1, frame.size);
                if ui.selectable_label(self.active_slot == Some(index), label).clicked() {
                    self.active_slot = Some(index);
                }
            }
        });
        if let Some(slot) = self.active_slot {
            ui.horizontal(|ui| {
                if ui.small_button("Clear artwork").clicked() {
                    self.store.clear_artwork(slot);
                }
                if ui.small_button("Clear frame").clicked() {
                    self.store.clear_frame(slot);
                }
            });
        }
    }

    fn draw_arrangement(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut locked = self.store.selection().is_locked;
            if ui.checkbox(&mut locked, "Move frames together").changed() {
                self.store.set_locked(locked);
            }
            if ui.button("Reset positions").clicked() {
                self.store.reset_positions();
            }
        });
    }

    fn draw_frame_styles(&mut self, ui: &mut egui::Ui) {
        let Some(slot) = self.active_slot else {
            ui.label("Select a frame on the wall.");
            return;
        };
        let current = self.store.selection().selected_frames.get(&slot).map(|s| s.id.clone());
        for style in data::frame_styles() {
            ui.horizontal(|ui| {
                swatch(ui, &style.color);
                let label = format!("{} · {}", style.name, format_price(style.price_value()));
                let selected = current.as_deref() == Some(style.id.as_str());
                if ui.selectable_label(selected, label).clicked() {
                    self.store.assign_frame(slot, style.clone());
                }
            });
        }
    }

    fn draw_wall_settings(&mut self, ui: &mut egui::Ui) {
        let wall = self.store.selection().wall.clone();

        let mut orientation = wall.print_orientation;
        egui::ComboBox::from_label("Orientation")
            .selected_text(format!("{orientation:?}"))
            .show_ui(ui, |ui| {
                for option in [PrintOrientation::Portrait, PrintOrientation::Landscape, PrintOrientation::Square] {
                    ui.selectable_value(&mut orientation, option, format!("{option:?}"));
                }
            });
        if orientation != wall.print_orientation {
            self.store.set_print_orientation(orientation);
        }

        let mut unit = wall.measurement_unit;
        ui.horizontal(|ui| {
            ui.radio_value(&mut unit, MeasurementUnit::Cm, "cm");
            ui.radio_value(&mut unit, MeasurementUnit::Inch, "inch");
        });
        if unit != wall.measurement_unit {
            self.store.set_measurement_unit(unit);
        }

        let mut scale = wall.wall_scale;
        if ui
            .add(egui::Slider::new(&mut scale, crate::constants::MIN_WALL_SCALE..=crate::constants::MAX_WALL_SCALE).text("Zoom"))
            .changed()
        {
            self.store.set_wall_scale(scale);
        }

        let mut preset = wall.spacing_preset;
        egui::ComboBox::from_label("Spacing")
            .selected_text(format!("{preset:?}"))
            .show_ui(ui, |ui| {
                for option in [SpacingPreset::Tight, SpacingPreset::Normal, SpacingPreset::Wide, SpacingPreset::Custom] {
                    ui.selectable_value(&mut preset, option, format!("{option:?}"));
                }
            });
        if preset != wall.spacing_preset {
            self.store.set_spacing_preset(preset);
        }
        if preset == SpacingPreset::Custom {
            let mut value = wall.spacing_value;
            if ui.add(egui::DragValue::new(&mut value).range(0.0..=96.0).suffix(" px")).changed() {
                self.store.set_spacing_value(value);
            }
        }
    }

    /// Searchable, filterable artwork list. Clicking a card fills the active slot.
    pub(crate) fn draw_catalog(&mut self, ui: &mut egui::Ui) {
        ui.heading("Artworks");
        match &self.catalog_status {
            CatalogStatus::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading catalog…");
                });
                return;
            }
            CatalogStatus::Failed(message) => {
                ui.colored_label(egui::Color32::RED, message.as_str());
                if ui.button("Retry").clicked() {
                    self.request_catalog(Some(ui.ctx().clone()));
                }
                return;
            }
            CatalogStatus::Ready => {}
        }

        let mut query = self.store.selection().filters.search_query.clone();
        let search = ui.add(egui::TextEdit::singleline(&mut query).hint_text("Search artworks"));
        if search.changed() {
            self.store.set_search_query(query);
            self.reset_reveal();
        }
        self.draw_filter_chips(ui);

        let total = self.store.filtered_artworks().len();
        let visible = self.reveal.visible().min(total);
        let cards: Vec<Artwork> = self.store.filtered_artworks()[..visible].to_vec();
        ui.small(format!("{total} artworks"));

        for artwork in cards {
            let assigned = self
                .active_slot
                .and_then(|slot| self.store.selection().selected_artworks.get(&slot))
                .is_some_and(|a| a.id == artwork.id);
            let label = format!("{} · {}", artwork.title, format_price(artwork.price_value()));
            let response = ui.selectable_label(assigned, label);
            let response = if artwork.artists.is_empty() {
                response
            } else {
                response.on_hover_text(artwork.artists.join(", "))
            };
            if response.clicked() {
                match self.active_slot {
                    Some(slot) => self.store.assign_artwork(slot, artwork),
                    None => log::debug!("artwork picked without an active slot"),
                }
            }
        }

        if visible < total {
            let sentinel = ui.label("Loading more…");
            if ui.is_rect_visible(sentinel.rect) {
                let now = ui.input(|i| i.time);
                if !self.reveal.reveal_more(now, total) {
                    let wait = self.store.config().reveal_debounce_ms;
                    ui.ctx().request_repaint_after(std::time::Duration::from_millis(wait));
                }
            }
        }
    }

    fn draw_filter_chips(&mut self, ui: &mut egui::Ui) {
        let active = self.store.selection().filters.active_count();
        let header = if active > 0 {
            format!("Filters ({active})")
        } else {
            "Filters".to_owned()
        };
        egui::CollapsingHeader::new(header).id_salt("filters").show(ui, |ui| {
            for kind in FilterKind::ALL {
                let values = available_values(self.store.catalog(), kind);
                if values.is_empty() {
                    continue;
                }
                ui.label(egui::RichText::new(kind.label()).small());
                ui.horizontal_wrapped(|ui| {
                    for value in values {
                        let selected = self.store.selection().filters.values(kind).contains(&value);
                        if ui.selectable_label(selected, value.as_str()).clicked() {
                            self.store.toggle_filter(kind, &value);
                            self.reset_reveal();
                        }
                    }
                });
            }
            if active > 0 && ui.button("Clear filters").clicked() {
                self.store.clear_filters();
                self.reset_reveal();
            }
        });
    }

    /// Cart lines with quantities, total and checkout.
    pub(crate) fn draw_cart_contents(&mut self, ui: &mut egui::Ui) {
        let cart = self.store.selection().cart_items.clone();
        if cart.is_empty() {
            ui.label("Your cart is empty.");
        }

        for (index, artwork) in &cart.artworks {
            let size = artwork.frame_size.as_deref().unwrap_or("-");
            self.draw_cart_line(ui, CartKind::Artwork, *index, &format!("{} ({size})", artwork.title));
        }
        for (index, style) in &cart.frames {
            self.draw_cart_line(ui, CartKind::Frame, *index, &format!("{} frame", style.name));
        }

        ui.separator();
        ui.strong(format!(
            "{} items · Total {}",
            self.store.cart_item_count(),
            self.store.calculate_cart_total()
        ));

        let busy = self.store.is_checking_out();
        ui.add_enabled_ui(!busy && !cart.is_empty(), |ui| {
            if ui.button("Checkout").clicked() {
                let ctx = ui.ctx().clone();
                self.start_checkout(&ctx);
            }
        });
        if busy {
            ui.spinner();
        }
        if let Some(error) = self.store.checkout_error().map(str::to_owned) {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::RED, error);
                if ui.small_button("✕").clicked() {
                    self.store.dismiss_checkout_error();
                }
            });
        }
    }

    fn draw_cart_line(&mut self, ui: &mut egui::Ui, kind: CartKind, index: FrameIndex, label: &str) {
        ui.horizontal(|ui| {
            ui.label(format!("{}. {label}", index + 1));
            let mut quantity = self.store.selection().quantities.get(kind, index);
            if ui.add(egui::DragValue::new(&mut quantity).range(1..=99)).changed() {
                self.store.set_quantity(kind, index, quantity);
            }
            if ui.small_button("Remove").clicked() {
                self.store.remove_from_cart(kind, index);
            }
        });
    }
}

fn swatch(ui: &mut egui::Ui, color: &str) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 3.0, hex_color(color, egui::Color32::GRAY));
}
