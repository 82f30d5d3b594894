//! squares — animated colored squares marching across a canvas
//!
//! A background worker appends one square per tick to a shared surface;
//! the window repaints on every append. Start, pause, resume and stop
//! from the control bar, with a speed slider and a color-mode selector.

mod app;
mod config;
mod drawer;
mod surface;
mod theme;
mod widgets;

use app::SquaresApp;
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 600.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title("animated squares"),
        ..Default::default()
    };

    eframe::run_native(
        "animated squares",
        options,
        Box::new(|cc| {
            theme::Theme::default().apply(&cc.egui_ctx);
            Box::new(SquaresApp::new(cc))
        }),
    )
}
