//! Blob Arena entry point
//!
//! Natively this runs a headless autopilot game:
//!
//! ```text
//! blob-arena [seed] [ticks] [data-dir]
//! ```
//!
//! The result is recorded into a file-backed profile in `data-dir`
//! (default `./blob-arena-data`). Set `RUST_LOG=info` to see progress.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use blob_arena::consts::{SIM_DT, TICK_RATE};
    use blob_arena::platform::FileStore;
    use blob_arena::stats::format_minutes;
    use blob_arena::{Game, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    // Two simulated minutes by default
    let ticks: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(2 * 60 * TICK_RATE as u64);
    let dir = args.next().unwrap_or_else(|| "blob-arena-data".to_string());

    log::info!("Blob Arena (native) starting...");

    let store = match FileStore::open(&dir) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Cannot open profile directory {}: {}", dir, e);
            std::process::exit(1);
        }
    };

    let mut game = Game::new(store, Tuning::default());
    game.start(seed);
    game.set_idle_mode(true);

    for _ in 0..ticks {
        game.update(SIM_DT);
        if !game.is_running() {
            break;
        }
    }

    if let Some(hud) = game.hud() {
        log::info!(
            "Final: score {}, size {}, time {}",
            hud.score,
            hud.size,
            hud.clock
        );
    }
    if let Some(reward) = game.reset() {
        log::info!(
            "Earned {} coins ({} achievement(s))",
            reward.total_coins(),
            reward.unlocked.len()
        );
        for a in &reward.unlocked {
            log::info!("  {} - {}", a.name, a.description);
        }
    }

    let profile = game.profile();
    log::info!(
        "Profile: {} games, best {}, avg {}, {} played, {} coins",
        profile.stats.games_played,
        profile.stats.best_score,
        profile.stats.average_score,
        format_minutes(profile.stats.total_time_played),
        profile.coins
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser embeds the library directly; there is no wasm binary
}
