//! # FFCTS Window Client
//!
//! Renders the engine into a window. The host's redraw signal drives every
//! frame; the spawn timer fires on its own interval.
//!
//! Keys: `Space` spawns the selected effect, `N`/`P` select the next or
//! previous effect, `Esc` quits.
//!
//! Without a usable graphics adapter the window shows a notice in its title
//! and no frame is ever run.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use ffcts::{
    init_tracing, AppConfig, AppError, AppResult, Cadence, EffectKind, Engine, FrameScheduler,
    SpawnTimer,
};
use ffcts_rendering::{PixelSurface, SurfacePresenter};
use tracing::{error, info};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

#[derive(Parser)]
#[clap(name = "ffcts_client", version, about = "Particle effects in a window")]
struct Opt {
    /// TOML config file; defaults apply when omitted.
    #[clap(long)]
    config: Option<PathBuf>,
    /// Overrides `simulation.seed`.
    #[clap(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    init_tracing("info");
    let opt = Opt::parse();

    match launch(opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "ffcts_client failed");
            ExitCode::FAILURE
        }
    }
}

fn title(config: &AppConfig, selected: EffectKind) -> String {
    format!("{} [{}] Space: spawn, N/P: select, Esc: quit", config.window.title, selected)
}

fn launch(opt: Opt) -> AppResult<()> {
    let mut config = AppConfig::load_or_default(opt.config.as_deref())?;
    if let Some(seed) = opt.seed {
        config.simulation.seed = seed;
    }

    let event_loop = EventLoop::new().map_err(|e| AppError::Window(e.to_string()))?;
    let window = WindowBuilder::new()
        .with_title(&config.window.title)
        .with_inner_size(PhysicalSize::new(config.window.width, config.window.height))
        .build(&event_loop)
        .map_err(|e| AppError::Window(e.to_string()))?;
    let window = Arc::new(window);
    let size = window.inner_size();

    let presenter = match SurfacePresenter::new(Arc::clone(&window), size.width, size.height) {
        Ok(presenter) => presenter,
        Err(e) => {
            let e = AppError::from(e);
            if !e.is_capability_unavailable() {
                return Err(e);
            }
            error!(error = %e, "graphics unavailable, particles disabled");
            window.set_title(&format!("{} (graphics not supported)", config.window.title));
            return idle(event_loop, &window);
        }
    };

    let surface = PixelSurface::new(size.width, size.height);
    let engine = Engine::new(surface, config.simulation.clone(), config.render)?;
    let timer = SpawnTimer::new(&config.spawner)?;
    let spawn_interval = config.spawner.enabled.then(|| config.spawner.interval());
    let scheduler = FrameScheduler::new(Cadence::VSync, spawn_interval, Instant::now())?;

    animate(event_loop, window, config, Client {
        engine,
        presenter,
        scheduler,
        timer,
        selected: EffectKind::OrangeBurst,
    })
}

struct Client {
    engine: Engine<PixelSurface>,
    presenter: SurfacePresenter<'static>,
    scheduler: FrameScheduler,
    timer: SpawnTimer,
    selected: EffectKind,
}

impl Client {
    fn key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Space => {
                self.engine.spawn(self.selected);
                false
            }
            KeyCode::KeyN => {
                self.selected = self.selected.next();
                true
            }
            KeyCode::KeyP => {
                self.selected = self.selected.previous();
                true
            }
            _ => false,
        }
    }

    fn redraw(&mut self, now: Instant) -> AppResult<()> {
        let due = self.scheduler.poll(now);
        if due.spawn {
            let (kind, origin) = self.timer.fire();
            self.engine.spawn_at(kind, origin);
        }
        if due.frame {
            self.engine.frame(now);
            self.presenter.present(self.engine.surface())?;
        }
        Ok(())
    }
}

fn animate(
    event_loop: EventLoop<()>,
    window: Arc<Window>,
    config: AppConfig,
    mut client: Client,
) -> AppResult<()> {
    window.set_title(&title(&config, client.selected));
    info!("frame loop started");

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                    WindowEvent::CloseRequested => {
                        client.scheduler.stop();
                        elwt.exit();
                    }
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(key),
                                state: ElementState::Pressed,
                                repeat: false,
                                ..
                            },
                        ..
                    } => {
                        if key == KeyCode::Escape {
                            client.scheduler.stop();
                            elwt.exit();
                        } else if client.key(key) {
                            window.set_title(&title(&config, client.selected));
                        }
                    }
                    WindowEvent::Resized(size) => {
                        if size.width > 0 && size.height > 0 {
                            client.engine.resize(size.width, size.height);
                            client.presenter.resize(size.width, size.height);
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        if !client.scheduler.is_running() {
                            return;
                        }
                        if let Err(e) = client.redraw(Instant::now()) {
                            error!(error = %e, "presenting failed");
                            client.scheduler.stop();
                            elwt.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => window.request_redraw(),
                _ => {}
            }
        })
        .map_err(|e| AppError::Window(e.to_string()))
}

/// Event loop without any frame work: the window stays up with its notice
/// until closed.
fn idle(event_loop: EventLoop<()>, window: &Window) -> AppResult<()> {
    let id = window.id();
    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);
            if let Event::WindowEvent { event, window_id } = event {
                if window_id != id {
                    return;
                }
                match event {
                    WindowEvent::CloseRequested
                    | WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(KeyCode::Escape),
                                ..
                            },
                        ..
                    } => elwt.exit(),
                    _ => {}
                }
            }
        })
        .map_err(|e| AppError::Window(e.to_string()))
}
