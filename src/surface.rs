//! Drawable surface — the shared, grow-only list of squares
//!
//! The animation worker appends from its own thread; the UI paints the
//! whole sequence each frame. The sequence only grows or is emptied in
//! one step, so the surface is just a vector behind a mutex plus a
//! repaint handle that is poked on every change.

use egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::theme::Palette;

/// Width the worker assumes until the first frame reports the real one.
const DEFAULT_VIEW_WIDTH: f32 = 1000.0;

/// A single rendered unit. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Color32,
}

impl Square {
    pub fn new(x: f32, y: f32, size: f32, color: Color32) -> Self {
        Self { x, y, size, color }
    }
}

struct Inner {
    squares: Vec<Square>,
    view_width: f32,
    repaint: Option<egui::Context>,
}

/// Thread-safe surface shared between the worker and the UI.
///
/// Cloning is cheap; all clones refer to the same square list.
#[derive(Clone)]
pub struct Surface {
    inner: Arc<Mutex<Inner>>,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                squares: Vec::new(),
                view_width: DEFAULT_VIEW_WIDTH,
                repaint: None,
            })),
        }
    }

    /// Attach the egui context so appends and clears wake the window.
    /// `request_repaint` is safe to call from any thread.
    pub fn attach_repaint(&self, ctx: egui::Context) {
        self.inner.lock().repaint = Some(ctx);
    }

    /// Append one square and request a repaint.
    pub fn append(&self, square: Square) {
        let ctx = {
            let mut inner = self.inner.lock();
            inner.squares.push(square);
            inner.repaint.clone()
        };
        if let Some(ctx) = ctx {
            ctx.request_repaint();
        }
    }

    /// Empty the sequence in one step and request a repaint.
    pub fn clear(&self) {
        let ctx = {
            let mut inner = self.inner.lock();
            inner.squares.clear();
            inner.repaint.clone()
        };
        if let Some(ctx) = ctx {
            ctx.request_repaint();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().squares.is_empty()
    }

    /// Copy of the current sequence, in insertion order.
    pub fn snapshot(&self) -> Vec<Square> {
        self.inner.lock().squares.clone()
    }

    /// Record the canvas width so the worker knows where to wrap.
    pub fn set_view_width(&self, width: f32) {
        self.inner.lock().view_width = width;
    }

    pub fn view_width(&self) -> f32 {
        self.inner.lock().view_width
    }

    /// Draw every square in insertion order, offset by the canvas origin.
    /// Each square gets a drop shadow and a light top/left edge highlight.
    pub fn paint(&self, painter: &Painter, origin: Pos2) {
        let inner = self.inner.lock();
        for square in &inner.squares {
            let rect = Rect::from_min_size(
                origin + Vec2::new(square.x, square.y),
                Vec2::splat(square.size),
            );
            painter.rect_filled(rect.translate(Vec2::splat(3.0)), 0.0, Palette::SHADOW);
            painter.rect_filled(rect, 0.0, square.color);
            let highlight = Stroke::new(1.0, Palette::HIGHLIGHT);
            painter.line_segment([rect.left_top(), rect.right_top()], highlight);
            painter.line_segment([rect.left_top(), rect.left_bottom()], highlight);
        }
    }
}
