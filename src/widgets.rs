//! Custom widgets — accent-filled control buttons, status bar

use egui::{Response, Ui, Widget};

use crate::theme::Palette;

/// A control button: accent fill, white text, 1px outline.
/// Greys out when the surrounding UI is disabled.
pub struct ControlButton<'a> {
    text: &'a str,
}

impl<'a> ControlButton<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl Widget for ControlButton<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let font = egui::FontId::proportional(14.0);
        let text_width = ui.fonts(|f| {
            f.layout_no_wrap(self.text.to_owned(), font.clone(), Palette::ACCENT_TEXT)
                .size()
                .x
        });
        let padding = egui::vec2(16.0, 4.0);
        let desired_size = egui::vec2(
            text_width + padding.x * 2.0,
            ui.spacing().interact_size.y,
        );
        let (rect, response) = ui.allocate_exact_size(desired_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let enabled = ui.is_enabled();
            let (fill, text_color) = if !enabled {
                (Palette::WINDOW, Palette::TEXT_DISABLED)
            } else if response.is_pointer_button_down_on() {
                (Palette::ACCENT_PRESSED, Palette::ACCENT_TEXT)
            } else if response.hovered() {
                (Palette::ACCENT_HOVER, Palette::ACCENT_TEXT)
            } else {
                (Palette::ACCENT, Palette::ACCENT_TEXT)
            };

            let painter = ui.painter();
            painter.rect_filled(rect, 0.0, fill);
            painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, Palette::OUTLINE));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.text,
                font,
                text_color,
            );
        }

        response
    }
}

/// Toolbar separator (vertical 1px line).
pub fn toolbar_separator(ui: &mut Ui) {
    let height = ui.spacing().interact_size.y;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, height), egui::Sense::hover());

    if ui.is_rect_visible(rect) {
        ui.painter().vline(
            rect.center().x,
            rect.y_range(),
            egui::Stroke::new(1.0, Palette::OUTLINE),
        );
    }
}

/// Status bar: window fill, 1px outline.
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(Palette::WINDOW)
        .stroke(egui::Stroke::new(1.0, Palette::OUTLINE))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(text);
        });
}
