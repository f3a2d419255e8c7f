//! Rainbow demo binary.
//!
//! Drives an RGB LED matrix with two independent rainbow drivers: the top
//! half of the panel follows a driver started on red, the bottom half one
//! started on green. Runs until Ctrl+C, then shuts both drivers down.
//!
//! ## Usage
//! ```sh
//! cargo build --release --features hardware
//! sudo ./target/release/rainbow-matrix-rs --led-rows 32 --led-cols 64
//! ```

#[cfg(not(feature = "hardware"))]
fn main() {
    eprintln!("This binary requires the 'hardware' feature (rpi-led-matrix).");
    eprintln!("Build with: cargo build --release --features hardware");
    eprintln!("Tests run without it: cargo test");
    std::process::exit(1);
}

#[cfg(feature = "hardware")]
fn main() {
    use clap::Parser;
    use rainbow_matrix_rs::driver::RainbowDriver;
    use rainbow_matrix_rs::rainbow::Phase;
    use rainbow_matrix_rs::{PanelConfig, create_matrix, is_running, setup_signal_handler};
    use std::thread;
    use std::time::Duration;

    /// Rainbow effect for RGB LED matrix panels
    #[derive(Parser)]
    #[command(name = "rainbow-matrix-rs")]
    #[command(about = "Fill an RGB LED matrix with cycling rainbow colors")]
    #[command(version)]
    struct Args {
        /// Number of rows supported
        #[arg(long = "led-rows", default_value = "32")]
        rows: u32,

        /// Number of columns supported
        #[arg(long = "led-cols", default_value = "64")]
        cols: u32,

        /// Number of daisy-chained panels
        #[arg(long = "led-chain", default_value = "1")]
        chain: u32,

        /// Number of parallel chains
        #[arg(long = "led-parallel", default_value = "1")]
        parallel: u32,

        /// Brightness (0-100)
        #[arg(long, default_value = "100")]
        brightness: u8,

        /// Name of GPIO mapping used
        #[arg(long = "led-gpio-mapping", default_value = "regular")]
        gpio_mapping: String,

        /// Tick interval for the rainbow drivers, in milliseconds
        #[arg(long, default_value = "50")]
        tick_ms: u64,
    }

    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let panel = PanelConfig::new(args.rows, args.cols, args.chain, args.parallel);

    tracing::info!("Rainbow Matrix v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Panel: {}x{} ({} pixels)", panel.cols, panel.rows, panel.pixel_count());

    let matrix = match create_matrix(panel, args.brightness, &args.gpio_mapping) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!("Failed to initialize LED matrix: {}", e);
            std::process::exit(1);
        }
    };

    let running = setup_signal_handler();
    let mut canvas = matrix.offscreen_canvas();

    // Two drivers, independent phases. Each owns its own thread.
    let interval = Duration::from_millis(args.tick_ms);
    let mut top = RainbowDriver::new(interval, Phase::Red);
    let mut bottom = RainbowDriver::new(interval, Phase::Green);

    let split = (args.rows / 2) as i32;

    while is_running(&running) {
        let top_color = top.color();
        let bottom_color = bottom.color();

        for y in 0..args.rows as i32 {
            let c = if y < split { top_color } else { bottom_color };
            for x in 0..args.cols as i32 {
                canvas.set(x, y, &c.into());
            }
        }

        canvas = matrix.swap(canvas);
        thread::sleep(Duration::from_millis(16));
    }

    top.shutdown();
    bottom.shutdown();
    tracing::info!("Shutting down cleanly.");
}
