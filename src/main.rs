//! Headless sticker board run.
//!
//! Runs the board against a simulated display and a recording context,
//! sweeping the pointer around the surface and tapping once a second.
//!
//! Usage: `kinetic-canvas [config.json] [seconds]`
//! Set `RUST_LOG=debug` (or `trace`) for per-event/per-frame logging.

use std::f32::consts::TAU;
use std::time::Duration;

use kinetic_canvas::prelude::*;
use kinetic_canvas::Result;

const SURFACE: Bounds = Bounds::new(1280.0, 720.0);
const STEP: Duration = Duration::from_millis(100);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            log::info!("loading config from {path}");
            Config::load(&path)?
        }
        None => Config::default(),
    };
    let seconds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(5);

    let mut board = StickerBoard::new(&config, SURFACE)?;
    let mut driver = AnimationDriver::new(SimulatedScheduler::new(config.refresh_hz));
    let mut ctx = RecordingContext::new();

    let steps_per_second = (Duration::from_secs(1).as_millis() / STEP.as_millis()) as u32;
    let center = Vec2::new(SURFACE.width / 2.0, SURFACE.height / 2.0);
    let radius = SURFACE.height / 3.0;

    driver.start();
    for step in 0..seconds * steps_per_second {
        let angle = step as f32 / steps_per_second as f32 * TAU / 4.0;
        let pointer = center + Vec2::new(angle.cos(), angle.sin()) * radius;
        board.input_mut().pointer_moved(pointer);
        if step % steps_per_second == 0 {
            board.input_mut().tap(pointer);
        }

        driver.run_for(STEP, &mut board, &mut ctx);

        if (step + 1) % steps_per_second == 0 {
            let stats = driver.last_stats().unwrap_or_default();
            log::info!(
                "t={}s frame={} fps={:.1} stickers={} shapes={} links={} commands={}",
                (step + 1) / steps_per_second,
                driver.clock().frame(),
                driver.clock().fps(),
                board.linked_count(),
                stats.shapes,
                stats.links,
                ctx.commands().len()
            );
        }
        ctx.clear();
    }
    driver.stop();

    Ok(())
}
