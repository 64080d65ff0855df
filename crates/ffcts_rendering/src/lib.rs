//! # FFCTS Rendering
//!
//! Paints the retained particles of a frame onto a drawable surface.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        ONE FRAME                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Renderer::begin_frame ── clear to background                │
//! │  Renderer::draw        ── per particle: map → color → rect   │
//! │                              │                               │
//! │                       Surface::clear_rect                    │
//! │                              │                               │
//! │  PixelSurface (RGBA8) ──► SurfacePresenter (feature "gpu")   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod renderer;
pub mod surface;

pub use config::{BlendMode, RenderConfig};
pub use error::{RenderError, RenderResult};
#[cfg(feature = "gpu")]
pub use gpu::SurfacePresenter;
pub use renderer::{display_color, pixel_rect, RenderStats, Renderer};
pub use surface::{to_rgba8, PixelRect, PixelSurface, Surface};
