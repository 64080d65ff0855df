//! # FFCTS
//!
//! Ties the particle field, the effect catalog, the renderer and the offline
//! cache into a runnable engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      HOST LOOP                               │
//! │          (headless runner or winit window client)            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  FrameScheduler::poll(now)                                   │
//! │     ├─ spawn due ──► SpawnTimer::fire ──► Engine::spawn_at    │
//! │     └─ frame due ──► Engine::frame                           │
//! │                         ├─ clear surface                     │
//! │                         ├─ ParticleField::step               │
//! │                         └─ Renderer::draw                    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on one thread. The two scheduled tasks never overlap;
//! the only state they share is the particle field, and the spawn origin
//! goes from the timer to the engine as a plain parameter.

#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod engine;
pub mod error;
pub mod runner;
pub mod scheduler;
pub mod spawner;
pub mod telemetry;

pub use config::{AppConfig, WindowConfig};
pub use engine::{Engine, FrameResult};
pub use error::{AppError, AppResult};
pub use runner::{run, RunOptions, RunSummary};
pub use scheduler::{Cadence, Due, FrameScheduler, TaskHandle, TARGET_FRAME_TIME};
pub use spawner::{SpawnTimer, SpawnerConfig};
pub use telemetry::init_tracing;

pub use ffcts_effects::{EffectFamily, EffectKind, SpawnOrigin};
