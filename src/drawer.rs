//! Animation worker — produces one square per tick on a background thread
//!
//! The worker owns the drawing cursor. The UI thread steers it through a
//! shared control block: a mutex-protected record of paused/stopped flags,
//! tick interval and color mode, plus a condition variable. Pause parks
//! the thread on the condvar (no polling); resume and stop notify it.
//! The interval sleep is itself a timed wait on the same condvar, so a
//! stop request wakes a sleeping worker immediately and a speed change
//! re-times a sleep already in progress.
//!
//! State machine: RUNNING ⇄ PAUSED, both → STOPPED. Stopped is terminal;
//! a fresh start spawns a new worker.

use egui::Color32;
use parking_lot::{Condvar, Mutex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::surface::{Square, Surface};

pub const MIN_INTERVAL_MS: u64 = 100;
pub const MAX_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_INTERVAL_MS: u64 = 500;

/// Where the drawing cursor starts, and where it returns after wrapping.
pub const CURSOR_ORIGIN: f32 = 10.0;
/// Horizontal gap between consecutive squares.
const SQUARE_GAP: f32 = 10.0;
/// Square side length range, px.
const MIN_SIZE: f32 = 30.0;
const MAX_SIZE: f32 = 70.0;
/// Vertical offset range from the canvas top, px.
const MIN_Y: f32 = 50.0;
const MAX_Y: f32 = 250.0;
/// The cursor wraps once it passes `view_width - WRAP_MARGIN`.
const WRAP_MARGIN: f32 = 100.0;

/// How the next square's fill color is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Red,
    Blue,
    Green,
    Random,
}

impl ColorMode {
    pub const ALL: [ColorMode; 4] = [
        ColorMode::Red,
        ColorMode::Blue,
        ColorMode::Green,
        ColorMode::Random,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ColorMode::Red => "red",
            ColorMode::Blue => "blue",
            ColorMode::Green => "green",
            ColorMode::Random => "random",
        }
    }

    fn pick(&self, rng: &mut impl Rng) -> Color32 {
        match self {
            ColorMode::Red => Color32::RED,
            ColorMode::Blue => Color32::BLUE,
            ColorMode::Green => Color32::GREEN,
            ColorMode::Random => Color32::from_rgb(rng.gen(), rng.gen(), rng.gen()),
        }
    }
}

/// Mutable control state, written by the UI thread, read each tick.
struct Control {
    paused: bool,
    stopped: bool,
    interval: Duration,
    mode: ColorMode,
}

struct Shared {
    control: Mutex<Control>,
    signal: Condvar,
}

impl Shared {
    /// Block while paused. Returns true if the worker should exit.
    fn wait_while_paused(&self) -> bool {
        let mut control = self.control.lock();
        while control.paused && !control.stopped {
            self.signal.wait(&mut control);
        }
        control.stopped
    }

    /// Sleep one tick interval. A notify during the sleep is a benign
    /// wake: re-check the stop flag and the (possibly changed) interval,
    /// then keep waiting out the remainder. Returns true on stop.
    fn sleep_tick(&self) -> bool {
        let mut control = self.control.lock();
        let start = Instant::now();
        loop {
            if control.stopped {
                return true;
            }
            let interval = control.interval;
            let elapsed = start.elapsed();
            if elapsed >= interval {
                return false;
            }
            let _ = self.signal.wait_for(&mut control, interval - elapsed);
        }
    }
}

/// Handle to a running animation worker. Dropping the handle stops the
/// worker and joins its thread.
pub struct SquareDrawer {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl SquareDrawer {
    /// Spawn a fresh worker producing onto `surface`.
    pub fn spawn(surface: Surface, interval_ms: u64, mode: ColorMode) -> Self {
        let shared = Arc::new(Shared {
            control: Mutex::new(Control {
                paused: false,
                stopped: false,
                interval: Duration::from_millis(clamp_interval(interval_ms)),
                mode,
            }),
            signal: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        let handle = thread::spawn(move || run(worker_shared, surface));
        tracing::debug!(interval_ms, mode = mode.label(), "square drawer started");

        Self {
            shared,
            handle: Some(handle),
        }
    }

    /// Suspend production. The worker parks after its current tick.
    pub fn pause(&self) {
        self.shared.control.lock().paused = true;
    }

    /// Wake a paused worker; production continues with the cursor intact.
    pub fn resume(&self) {
        let mut control = self.shared.control.lock();
        control.paused = false;
        self.shared.signal.notify_all();
    }

    /// Terminate the worker and join its thread. Wakes the worker if it
    /// is paused or mid-sleep. Safe to call more than once.
    pub fn stop(&mut self) {
        {
            let mut control = self.shared.control.lock();
            control.stopped = true;
            control.paused = false;
            self.shared.signal.notify_all();
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("square drawer thread panicked");
            }
            tracing::debug!("square drawer stopped");
        }
    }

    /// Change the tick interval; applies to a sleep already in progress.
    pub fn set_interval(&self, interval_ms: u64) {
        let mut control = self.shared.control.lock();
        control.interval = Duration::from_millis(clamp_interval(interval_ms));
        self.shared.signal.notify_all();
    }

    /// Change the color mode; takes effect on the next tick.
    pub fn set_color_mode(&self, mode: ColorMode) {
        self.shared.control.lock().mode = mode;
    }

    pub fn is_paused(&self) -> bool {
        let control = self.shared.control.lock();
        control.paused && !control.stopped
    }

    /// Whether the worker thread has exited (or was never joined-able).
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }
}

impl Drop for SquareDrawer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn clamp_interval(interval_ms: u64) -> u64 {
    interval_ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS)
}

/// The worker loop: gate on pause, produce one square, advance and wrap
/// the cursor, sleep one interval. Exits when the stop flag is observed.
fn run(shared: Arc<Shared>, surface: Surface) {
    let mut rng = rand::thread_rng();
    let mut x = CURSOR_ORIGIN;

    loop {
        if shared.wait_while_paused() {
            break;
        }

        let size = rng.gen_range(MIN_SIZE..MAX_SIZE);
        let y = rng.gen_range(MIN_Y..MAX_Y);
        let mode = shared.control.lock().mode;
        surface.append(Square::new(x, y, size, mode.pick(&mut rng)));

        x += size + SQUARE_GAP;
        if x > surface.view_width() - WRAP_MARGIN {
            x = CURSOR_ORIGIN;
        }

        if shared.sleep_tick() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const TICK_MS: u64 = 100; // clamp floor; tests use the fastest tick

    fn wait_for_len(surface: &Surface, len: usize) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while surface.len() < len {
            assert!(Instant::now() < deadline, "timed out waiting for {} squares", len);
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_fixed_red_produces_only_red() {
        let surface = Surface::new();
        let mut drawer = SquareDrawer::spawn(surface.clone(), TICK_MS, ColorMode::Red);
        wait_for_len(&surface, 3);
        drawer.stop();

        let squares = surface.snapshot();
        assert!(!squares.is_empty());
        assert!(squares.iter().all(|s| s.color == Color32::RED));
    }

    #[test]
    fn test_random_colors_vary() {
        let surface = Surface::new();
        surface.set_view_width(100_000.0);
        let mut drawer = SquareDrawer::spawn(surface.clone(), TICK_MS, ColorMode::Random);
        wait_for_len(&surface, 10);
        drawer.stop();

        let squares = surface.snapshot();
        let first = squares[0].color;
        assert!(squares.iter().any(|s| s.color != first));
    }

    #[test]
    fn test_pause_halts_production_until_resume() {
        let surface = Surface::new();
        let mut drawer = SquareDrawer::spawn(surface.clone(), TICK_MS, ColorMode::Blue);
        wait_for_len(&surface, 2);

        drawer.pause();
        assert!(drawer.is_paused());
        // Let an in-flight tick drain before sampling the count.
        thread::sleep(Duration::from_millis(3 * TICK_MS));
        let paused_len = surface.len();
        thread::sleep(Duration::from_millis(4 * TICK_MS));
        assert_eq!(surface.len(), paused_len);

        drawer.resume();
        assert!(!drawer.is_paused());
        wait_for_len(&surface, paused_len + 1);
        drawer.stop();
    }

    #[test]
    fn test_stop_while_paused_exits() {
        let surface = Surface::new();
        let mut drawer = SquareDrawer::spawn(surface.clone(), TICK_MS, ColorMode::Green);
        wait_for_len(&surface, 1);
        drawer.pause();
        thread::sleep(Duration::from_millis(2 * TICK_MS));

        drawer.stop();
        assert!(drawer.is_finished());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let surface = Surface::new();
        let mut drawer = SquareDrawer::spawn(surface, TICK_MS, ColorMode::Red);
        drawer.stop();
        drawer.stop();
        assert!(drawer.is_finished());
        assert!(!drawer.is_paused());
    }

    #[test]
    fn test_replacing_drawer_stops_previous() {
        let surface = Surface::new();
        let mut slot = Some(SquareDrawer::spawn(surface.clone(), TICK_MS, ColorMode::Red));

        // A second start supersedes the first: stop the old worker before
        // spawning the new one, exactly as the controller does.
        if let Some(mut old) = slot.take() {
            old.stop();
            assert!(old.is_finished());
        }
        slot = Some(SquareDrawer::spawn(surface.clone(), TICK_MS, ColorMode::Blue));

        let before = surface.len();
        wait_for_len(&surface, before + 2);
        if let Some(mut drawer) = slot.take() {
            drawer.stop();
        }
    }

    #[test]
    fn test_cursor_wraps_to_origin() {
        let surface = Surface::new();
        surface.set_view_width(200.0);
        let mut drawer = SquareDrawer::spawn(surface.clone(), TICK_MS, ColorMode::Red);
        wait_for_len(&surface, 12);
        drawer.stop();

        let squares = surface.snapshot();
        assert_eq!(squares[0].x, CURSOR_ORIGIN);
        // With a 200px view the cursor wraps after at most two squares,
        // so the origin must reappear later in the sequence.
        assert!(squares[1..].iter().any(|s| s.x == CURSOR_ORIGIN));
    }

    #[test]
    fn test_speed_change_keeps_cursor() {
        let surface = Surface::new();
        surface.set_view_width(100_000.0); // never wrap
        let mut drawer = SquareDrawer::spawn(surface.clone(), TICK_MS, ColorMode::Red);
        wait_for_len(&surface, 3);

        drawer.set_interval(TICK_MS * 2);
        let before = surface.len();
        wait_for_len(&surface, before + 3);
        drawer.stop();

        // The cursor advanced monotonically across the speed change.
        let squares = surface.snapshot();
        for pair in squares.windows(2) {
            assert!(pair[1].x > pair[0].x);
        }
    }

    #[test]
    fn test_slow_interval_limits_production() {
        let surface = Surface::new();
        let mut drawer = SquareDrawer::spawn(surface.clone(), MAX_INTERVAL_MS, ColorMode::Red);
        wait_for_len(&surface, 1);
        // One square is produced immediately; the next is a full second out.
        thread::sleep(Duration::from_millis(200));
        assert!(surface.len() <= 2);
        drawer.stop();
    }

    #[test]
    fn test_interval_is_clamped() {
        let surface = Surface::new();
        let mut drawer = SquareDrawer::spawn(surface.clone(), 0, ColorMode::Red);
        {
            let control = drawer.shared.control.lock();
            assert_eq!(control.interval, Duration::from_millis(MIN_INTERVAL_MS));
        }
        drawer.set_interval(u64::MAX);
        {
            let control = drawer.shared.control.lock();
            assert_eq!(control.interval, Duration::from_millis(MAX_INTERVAL_MS));
        }
        drawer.stop();
    }

    #[test]
    fn test_color_mode_changes_mid_run() {
        let surface = Surface::new();
        surface.set_view_width(100_000.0);
        let mut drawer = SquareDrawer::spawn(surface.clone(), TICK_MS, ColorMode::Red);
        wait_for_len(&surface, 2);

        drawer.set_color_mode(ColorMode::Green);
        let before = surface.len();
        wait_for_len(&surface, before + 2);
        drawer.stop();

        let squares = surface.snapshot();
        assert_eq!(squares.last().map(|s| s.color), Some(Color32::GREEN));
        assert_eq!(squares[0].color, Color32::RED);
    }
}
