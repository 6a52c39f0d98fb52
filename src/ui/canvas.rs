//! Wall preview and pointer positioning.
//!
//! The wall is painted into the available space. Frame rectangles come from
//! the layout anchors resolved against the wall area, shifted by the offsets
//! the store reports (committed plus any drag in flight).

use super::state::{GalleryApp, WallPress};
use crate::types::*;
use eframe::egui;

/// Fallback wall color when no background is selected.
const DEFAULT_WALL: egui::Color32 = egui::Color32::from_rgb(0xee, 0xea, 0xe2);

/// Parses a `#rrggbb` color, falling back to `fallback`.
pub(crate) fn hex_color(hex: &str, fallback: egui::Color32) -> egui::Color32 {
    egui::Color32::from_hex(hex.trim()).unwrap_or(fallback)
}

impl GalleryApp {
    /// Screen rectangle of frame `index` as drawn in the last frame.
    pub fn frame_screen_rect(&self, index: FrameIndex) -> Option<egui::Rect> {
        let wall = self.wall_rect?;
        let layout = self.store.selection().selected_layout.as_ref()?;
        let frame = layout.frames.get(index)?;
        let rect = frame
            .rect(wall.width(), wall.height())
            .translate(self.store.frame_offset(index));
        Some(egui::Rect::from_min_size(
            wall.min + egui::vec2(rect.x, rect.y),
            egui::vec2(rect.width, rect.height),
        ))
    }

    /// Topmost frame under `pos`.
    fn frame_at(&self, pos: egui::Pos2) -> Option<FrameIndex> {
        let count = self
            .store
            .selection()
            .selected_layout
            .as_ref()
            .map_or(0, |l| l.frames.len());
        (0..count)
            .rev()
            .find(|i| self.frame_screen_rect(*i).is_some_and(|r| r.contains(pos)))
    }

    /// Draws the wall with its frames and handles pressing, dragging and clicking.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    pub fn draw_wall(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let scale = self.store.selection().wall.wall_scale;
        let wall = egui::Rect::from_center_size(response.rect.center(), response.rect.size() * scale);
        self.wall_rect = Some(wall);

        let wall_color = self
            .store
            .selection()
            .selected_background
            .as_ref()
            .map_or(DEFAULT_WALL, |b| hex_color(&b.color, DEFAULT_WALL));
        painter.rect_filled(response.rect, 0.0, wall_color);

        self.handle_wall_pointer(ui, &response);
        self.paint_frames(&painter);
    }

    fn handle_wall_pointer(&mut self, ui: &egui::Ui, response: &egui::Response) {
        let primary_down = ui.input(|i| i.pointer.primary_down());
        if primary_down {
            let Some(pos) = response.interact_pointer_pos() else {
                return;
            };
            let pointer = Offset::new(pos.x, pos.y);
            match self.press {
                None => {
                    let frame = self.frame_at(pos);
                    self.press = Some(WallPress { frame });
                    if self.store.selection().is_locked {
                        self.store.begin_group_drag(pointer);
                    } else if let Some(index) = frame {
                        self.store.begin_frame_drag(index, pointer);
                    }
                }
                Some(_) => self.store.drag_to(pointer),
            }
        } else if let Some(press) = self.press.take() {
            let dragged = self.store.end_drag();
            if !dragged {
                if let Some(index) = press.frame {
                    self.active_slot = Some(index);
                }
            }
        }
    }

    fn paint_frames(&self, painter: &egui::Painter) {
        let Some(layout) = self.store.selection().selected_layout.as_ref() else {
            if let Some(wall) = self.wall_rect {
                painter.text(
                    wall.center(),
                    egui::Align2::CENTER_CENTER,
                    "Pick a layout to start arranging",
                    egui::FontId::proportional(16.0),
                    egui::Color32::DARK_GRAY,
                );
            }
            return;
        };
        let selection = self.store.selection();
        let spacing = selection.wall.spacing_value / 4.0;

        for index in 0..layout.frames.len() {
            let Some(rect) = self.frame_screen_rect(index) else {
                continue;
            };
            let style = selection.selected_frames.get(&index);
            let border = style.map_or(egui::Color32::GRAY, |s| hex_color(&s.color, egui::Color32::GRAY));
            let width = if style.is_some() { spacing.max(2.0) } else { 1.0 };
            painter.rect_filled(rect, 2.0, egui::Color32::from_gray(250));
            painter.rect_stroke(rect, 2.0, egui::Stroke::new(width, border), egui::StrokeKind::Outside);

            if self.active_slot == Some(index) {
                painter.rect_stroke(
                    rect.expand(width + 3.0),
                    4.0,
                    egui::Stroke::new(2.0, egui::Color32::from_rgb(0x3b, 0x82, 0xf6)),
                    egui::StrokeKind::Outside,
                );
            }

            let label = match selection.selected_artworks.get(&index) {
                Some(artwork) => artwork.title.clone(),
                None => format!("{} · {}", index + 1, layout.frames[index].size),
            };
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                label,
                egui::FontId::proportional(12.0),
                egui::Color32::DARK_GRAY,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_with_fallback() {
        assert_eq!(hex_color("#ff0000", DEFAULT_WALL), egui::Color32::from_rgb(255, 0, 0));
        assert_eq!(hex_color("chartreuse", DEFAULT_WALL), DEFAULT_WALL);
    }
}
