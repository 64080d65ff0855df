//! Headless runner and offline cache tool.
//!
//! ```text
//! ffcts run --frames 600 --seed 7
//! ffcts cache install --from ./site
//! ffcts cache fetch /ffcts/index.html --from ./site
//! ffcts cache purge
//! ffcts effects
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use ffcts::{init_tracing, run, AppConfig, AppResult, Engine, EffectKind, RunOptions, SpawnTimer};
use ffcts_cache::{AssetCache, CacheWorker, DirectoryFetcher};
use ffcts_rendering::PixelSurface;
use tracing::{error, info, warn};

#[derive(Parser)]
#[clap(name = "ffcts", version, about = "Particle effects engine")]
struct Opt {
    /// TOML config file; defaults apply when omitted.
    #[clap(long, global = true)]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Runs the engine on an off-screen surface.
    Run {
        /// Frames to run.
        #[clap(long, default_value_t = 600)]
        frames: u64,
        /// Overrides `simulation.seed`.
        #[clap(long)]
        seed: Option<u64>,
        /// Overrides `window.width`.
        #[clap(long)]
        width: Option<u32>,
        /// Overrides `window.height`.
        #[clap(long)]
        height: Option<u32>,
        /// Sleep between frames instead of running as fast as possible.
        #[clap(long)]
        realtime: bool,
    },
    /// Offline asset cache.
    Cache {
        #[clap(subcommand)]
        action: CacheAction,
    },
    /// Lists every effect with its family.
    Effects,
}

#[derive(Subcommand)]
enum CacheAction {
    /// Fetches and stores every configured asset.
    Install {
        /// Directory served as the network.
        #[clap(long)]
        from: PathBuf,
    },
    /// Serves one asset, cache first.
    Fetch {
        /// Absolute asset path, e.g. `/ffcts/index.html`.
        path: String,
        /// Directory served as the network.
        #[clap(long)]
        from: PathBuf,
    },
    /// Deletes caches of other versions.
    Purge,
}

fn main() -> ExitCode {
    init_tracing("info");
    let opt = Opt::parse();

    match execute(opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "ffcts failed");
            ExitCode::FAILURE
        }
    }
}

fn execute(opt: Opt) -> AppResult<()> {
    let mut config = AppConfig::load_or_default(opt.config.as_deref())?;

    match opt.command {
        Command::Run {
            frames,
            seed,
            width,
            height,
            realtime,
        } => {
            if let Some(seed) = seed {
                config.simulation.seed = seed;
            }
            config.window.width = width.unwrap_or(config.window.width);
            config.window.height = height.unwrap_or(config.window.height);
            config.validate()?;
            run_headless(&config, frames, realtime)
        }
        Command::Cache { action } => cache(&config, action),
        Command::Effects => {
            for kind in EffectKind::ALL {
                println!("{:<16} {:?}", kind.name(), kind.family());
            }
            Ok(())
        }
    }
}

fn run_headless(config: &AppConfig, frames: u64, realtime: bool) -> AppResult<()> {
    let surface = PixelSurface::new(config.window.width, config.window.height);
    let mut engine = Engine::new(surface, config.simulation.clone(), config.render)?;

    let mut timer = if config.spawner.enabled {
        Some(SpawnTimer::new(&config.spawner)?)
    } else {
        None
    };
    let interval: Duration = config.spawner.interval();
    let options = RunOptions {
        frames,
        realtime,
        ..RunOptions::default()
    };

    let summary = run(&mut engine, timer.as_mut().map(|t| (t, interval)), options)?;
    println!(
        "{} frames, {} effects, {} particles spawned, peak {}, final {}, {:.3} ms/frame",
        summary.frames,
        summary.effects_fired,
        summary.particles_spawned,
        summary.peak_particles,
        summary.final_particles,
        summary.avg_frame_ms,
    );
    Ok(())
}

fn cache(config: &AppConfig, action: CacheAction) -> AppResult<()> {
    if config.cache.directory.is_none() {
        warn!("cache.directory not set, the cache lives in memory for this run only");
    }
    let cache = Arc::new(AssetCache::open(config.cache.clone())?);

    match action {
        CacheAction::Install { from } => {
            let report = cache.install(&DirectoryFetcher::new(from))?;
            println!("{}: {} assets, {} bytes", cache.key(), report.stored, report.bytes);
        }
        CacheAction::Fetch { path, from } => {
            let worker = CacheWorker::spawn(Arc::clone(&cache), Arc::new(DirectoryFetcher::new(from)))?;
            let response = worker.fetch(&path)?;
            worker.shutdown();
            println!("{} {} bytes from {:?}", response.path, response.body.len(), response.source);
        }
        CacheAction::Purge => {
            let removed = cache.purge_stale()?;
            for dir in &removed {
                info!(path = %dir.display(), "removed");
            }
            println!("{}: {} stale caches removed", cache.key(), removed.len());
        }
    }
    Ok(())
}
