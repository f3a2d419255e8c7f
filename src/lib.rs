//! Rainbow color-cycling effects for RGB LED matrix panels.
//!
//! The interesting parts live in two modules:
//! - [`rainbow`]: the color-cycling state machine that walks the
//!   red→green→blue hue ring one step at a time
//! - [`driver`]: a background-thread wrapper that advances the state
//!   machine on a wall-clock timer and shares the latest color with
//!   any number of readers
//!
//! This file holds the collaborators around that core:
//! - The [`Color`] value type and the three pure-primary sentinels
//! - Panel geometry ([`PanelConfig`]) and matrix initialization
//! - Signal handling for clean shutdown of the demo binary

pub mod driver;
pub mod rainbow;

#[cfg(feature = "hardware")]
use rpi_led_matrix::{LedMatrix, LedMatrixOptions, LedRuntimeOptions};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

// ── Panel configuration ────────────────────────────────────────────

/// Geometry of the attached LED matrix.
///
/// `Clone, Copy` make this cheaply copyable (it's just four u32s).
/// Explicit, testable, and no hidden global state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelConfig {
    /// Rows on a single panel
    pub rows: u32,
    /// Columns on a single panel
    pub cols: u32,
    /// Number of daisy-chained panels
    pub chain_length: u32,
    /// Number of parallel chains
    pub parallel: u32,
}

impl PanelConfig {
    pub fn new(rows: u32, cols: u32, chain_length: u32, parallel: u32) -> Self {
        Self {
            rows,
            cols,
            chain_length,
            parallel,
        }
    }

    /// Total number of addressable pixels across all chained panels.
    pub fn pixel_count(&self) -> u32 {
        self.rows * self.cols * self.chain_length * self.parallel
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            rows: 32,
            cols: 64,
            chain_length: 1,
            parallel: 1,
        }
    }
}

// ── Color ──────────────────────────────────────────────────────────

/// Our own color type, decoupled from the hardware crate.
///
/// This lets us test the cycling logic on any host without needing
/// `rpi-led-matrix`. At the hardware boundary, we convert via
/// `Into<LedColor>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Pure red, the ring position entered by the blue→red ramp.
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    /// Pure green, the ring position entered by the red→green ramp.
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
    /// Pure blue, the ring position entered by the green→blue ramp.
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Convert our Color to the hardware crate's LedColor at the boundary.
#[cfg(feature = "hardware")]
impl From<Color> for rpi_led_matrix::LedColor {
    fn from(c: Color) -> Self {
        rpi_led_matrix::LedColor {
            red: c.r,
            green: c.g,
            blue: c.b,
        }
    }
}

// ── Matrix initialization ──────────────────────────────────────────

/// Create a matrix handle for the given geometry.
///
/// # Rust concept: Result and the ? operator
/// This function returns `Result` because matrix initialization can fail
/// (e.g., if not running as root, or if GPIO is unavailable).
/// The caller uses `?` to propagate errors upward.
#[cfg(feature = "hardware")]
pub fn create_matrix(
    panel: PanelConfig,
    brightness: u8,
    hardware_mapping: &str,
) -> Result<LedMatrix, Box<dyn std::error::Error>> {
    let mut options = LedMatrixOptions::new();
    options.set_rows(panel.rows);
    options.set_cols(panel.cols);
    options.set_chain_length(panel.chain_length);
    options.set_parallel(panel.parallel);
    options.set_hardware_mapping(hardware_mapping);
    options.set_brightness(brightness.min(100))?;

    let mut rt_options = LedRuntimeOptions::new();
    rt_options.set_gpio_slowdown(2);

    let matrix = LedMatrix::new(Some(options), Some(rt_options))?;

    Ok(matrix)
}

// ── Signal handling ────────────────────────────────────────────────

/// Set up a Ctrl+C handler that sets `running` to false.
///
/// # Rust concept: Arc and AtomicBool
/// We need to share the `running` flag between the main loop and the
/// signal handler. `Arc` (Atomic Reference Counting) lets multiple owners
/// share data. `AtomicBool` is a thread-safe boolean — no mutex needed
/// for a single bool.
pub fn setup_signal_handler() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    running
}

/// Check if the main loop should keep running.
pub fn is_running(running: &AtomicBool) -> bool {
    running.load(Ordering::SeqCst)
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    // ── PanelConfig tests ──────────────────────────────────────────

    #[test]
    fn panel_config_default_is_single_32x64() {
        let panel = PanelConfig::default();
        assert_eq!(panel.rows, 32);
        assert_eq!(panel.cols, 64);
        assert_eq!(panel.chain_length, 1);
        assert_eq!(panel.parallel, 1);
    }

    #[rstest]
    #[case(32, 64, 1, 1, 2048)]
    #[case(32, 64, 2, 1, 4096)]
    #[case(64, 64, 1, 2, 8192)]
    #[case(16, 32, 4, 1, 2048)]
    fn test_pixel_count(
        #[case] rows: u32,
        #[case] cols: u32,
        #[case] chain: u32,
        #[case] parallel: u32,
        #[case] expected: u32,
    ) {
        let panel = PanelConfig::new(rows, cols, chain, parallel);
        assert_eq!(panel.pixel_count(), expected);
    }

    // ── Color tests ────────────────────────────────────────────────

    #[test]
    fn color_new() {
        let c = Color::new(10, 20, 30);
        assert_eq!(c.r, 10);
        assert_eq!(c.g, 20);
        assert_eq!(c.b, 30);
    }

    #[test]
    fn primary_constants() {
        assert_eq!(Color::RED, Color::new(255, 0, 0));
        assert_eq!(Color::GREEN, Color::new(0, 255, 0));
        assert_eq!(Color::BLUE, Color::new(0, 0, 255));
    }
}
