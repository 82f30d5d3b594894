//! Application theme — soft light palette, square corners, 1px outlines
//!
//! Lavender-grey window chrome, a white canvas panel and a muted blue
//! accent for the controls.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// The application palette.
pub struct Palette;

impl Palette {
    /// Window and control-bar background.
    pub const WINDOW: Color32 = Color32::from_rgb(240, 240, 245);
    /// Canvas background.
    pub const CANVAS: Color32 = Color32::from_rgb(255, 255, 255);
    /// Control accent (buttons, slider handle).
    pub const ACCENT: Color32 = Color32::from_rgb(100, 120, 200);
    pub const ACCENT_HOVER: Color32 = Color32::from_rgb(116, 136, 214);
    pub const ACCENT_PRESSED: Color32 = Color32::from_rgb(80, 98, 170);
    pub const ACCENT_TEXT: Color32 = Color32::from_rgb(255, 255, 255);
    /// 1px outlines around panels and widgets.
    pub const OUTLINE: Color32 = Color32::from_rgb(192, 192, 192);
    pub const TEXT: Color32 = Color32::from_rgb(40, 40, 48);
    pub const TEXT_DISABLED: Color32 = Color32::from_rgb(150, 150, 158);
    /// Drop shadow under each square.
    pub const SHADOW: Color32 = Color32::from_black_alpha(30);
    /// Top/left edge highlight on each square (premultiplied white).
    pub const HIGHLIGHT: Color32 = Color32::from_rgba_premultiplied(100, 100, 100, 100);
}

/// Theme configuration applied once at startup.
pub struct Theme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_heading: 20.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 6.0,
        }
    }
}

impl Theme {
    /// Apply the theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::light();

        visuals.window_fill = Palette::WINDOW;
        visuals.panel_fill = Palette::WINDOW;
        visuals.faint_bg_color = Palette::CANVAS;
        visuals.extreme_bg_color = Palette::CANVAS;

        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_stroke = Stroke::new(1.0, Palette::OUTLINE);

        let flat = |ws: &mut egui::style::WidgetVisuals, bg: Color32, fg: Color32| {
            ws.bg_fill = bg;
            ws.weak_bg_fill = bg;
            ws.bg_stroke = Stroke::new(1.0, Palette::OUTLINE);
            ws.fg_stroke = Stroke::new(1.0, fg);
            ws.rounding = Rounding::ZERO;
        };
        flat(&mut visuals.widgets.noninteractive, Palette::WINDOW, Palette::TEXT);
        flat(&mut visuals.widgets.inactive, Palette::CANVAS, Palette::TEXT);
        flat(&mut visuals.widgets.hovered, Palette::ACCENT_HOVER, Palette::ACCENT_TEXT);
        flat(&mut visuals.widgets.active, Palette::ACCENT_PRESSED, Palette::ACCENT_TEXT);
        flat(&mut visuals.widgets.open, Palette::CANVAS, Palette::TEXT);

        visuals.selection.bg_fill = Palette::ACCENT;
        visuals.selection.stroke = Stroke::new(1.0, Palette::ACCENT_TEXT);

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(10.0, 4.0);
        style.spacing.slider_width = 180.0;

        ctx.set_style(style);
    }

    /// Canvas frame: white fill, 1px light-grey outline.
    pub fn canvas_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(Palette::CANVAS)
            .stroke(Stroke::new(1.0, Palette::OUTLINE))
            .inner_margin(egui::Margin::same(1.0))
    }

    /// Control-bar frame: window fill, 1px outline, roomy padding.
    pub fn control_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(Palette::WINDOW)
            .stroke(Stroke::new(1.0, Palette::OUTLINE))
            .inner_margin(egui::Margin::symmetric(10.0, 8.0))
    }
}

/// Menu bar styling helper.
pub fn menu_bar<R>(
    ui: &mut egui::Ui,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> egui::InnerResponse<R> {
    let frame_resp = egui::Frame::none()
        .fill(Palette::WINDOW)
        .stroke(Stroke::new(1.0, Palette::OUTLINE))
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| ui.horizontal(add_contents).inner);
    egui::InnerResponse {
        inner: frame_resp.inner,
        response: frame_resp.response,
    }
}
