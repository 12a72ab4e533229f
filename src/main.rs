//! circle-verlet demo entry point
//!
//! Native builds run a headless session: a seeded spawner stands in for user
//! taps and a jittery clock stands in for the display's frame callback.
//! The browser build is driven from JavaScript through `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use serde::Serialize;

    use circle_verlet::consts::DEFAULT_BODY_RADIUS;
    use circle_verlet::platform::frame_dt;
    use circle_verlet::sim::{CollisionStats, SimError};
    use circle_verlet::{Color, Settings, SharedEngine};

    const SEED: u64 = 0x5eed_ba11;
    const FRAMES: u32 = 1800;
    /// Frames between simulated taps
    const SPAWN_INTERVAL: u32 = 4;
    const PEG_ROWS: u32 = 4;

    const TEAL: Color = Color::rgb(0x25, 0xf4, 0xee);
    const PINK: Color = Color::rgb(0xfe, 0x2c, 0x55);
    const PEG: Color = Color::rgb(0x80, 0x80, 0x90);

    #[derive(Debug, Serialize)]
    struct Summary {
        bodies: usize,
        capacity: usize,
        ticks: u64,
        rejected_spawns: u32,
        last_tick: CollisionStats,
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        let shared = SharedEngine::new();
        // The frame clock may fire before the engine exists
        shared.step(frame_dt(None));
        shared.init(settings.clone())?;

        spawn_pegs(&shared, &settings)?;

        let mut rng = Pcg32::seed_from_u64(SEED);
        let radius = DEFAULT_BODY_RADIUS;
        let x_max = (settings.width - radius).max(radius + 1.0);
        let y_max = (settings.height * 0.2).max(radius + 1.0);
        let mut taps = 0u32;
        let mut rejected = 0u32;

        for frame in 0..FRAMES {
            if frame % SPAWN_INTERVAL == 0 {
                let x = rng.random_range(radius..x_max);
                let y = rng.random_range(radius..y_max);
                let color = if taps % 2 == 0 { TEAL } else { PINK };
                taps += 1;
                match shared.spawn(x, y, radius, false, Some(color)) {
                    Ok(_) => {}
                    Err(SimError::CapacityExceeded { .. }) => rejected += 1,
                    Err(e) => return Err(e.into()),
                }
            }

            let elapsed_ms = rng.random_range(8.0..45.0);
            if let Some(stats) = shared.step(frame_dt(Some(elapsed_ms))) {
                if frame % 300 == 0 {
                    log::info!(
                        "Frame {}: {} bodies, {} pairs tested, {} contacts",
                        frame,
                        shared.count(),
                        stats.pairs_tested,
                        stats.contacts
                    );
                }
            }
        }

        let summary = shared
            .with(|engine| Summary {
                bodies: engine.count(),
                capacity: engine.capacity(),
                ticks: engine.tick_count(),
                rejected_spawns: rejected,
                last_tick: engine.last_stats(),
            })
            .ok_or("engine missing after run")?;
        println!("{}", serde_json::to_string_pretty(&summary)?);

        if shared.shutdown().is_none() {
            log::warn!("Engine was already shut down");
        }
        Ok(())
    }

    /// Static pegs in staggered rows across the lower half
    fn spawn_pegs(shared: &SharedEngine, settings: &Settings) -> Result<(), SimError> {
        let spacing = settings.width / 6.0;
        for row in 0..PEG_ROWS {
            let y = settings.height * 0.5 + row as f32 * spacing;
            let offset = if row % 2 == 0 { spacing * 0.5 } else { spacing };
            let mut x = offset;
            while x < settings.width {
                match shared.spawn(x, y, 8.0, true, Some(PEG)) {
                    Ok(_) => {}
                    Err(SimError::CapacityExceeded { .. }) => return Ok(()),
                    Err(e) => return Err(e),
                }
                x += spacing;
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("circle-verlet (native) starting...");

    if let Err(e) = demo::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
