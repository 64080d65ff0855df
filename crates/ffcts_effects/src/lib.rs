//! # FFCTS Effects
//!
//! Effect generators: each call appends one batch of particles that
//! follows a named visual recipe.
//!
//! ## Recipe families
//!
//! | Family            | Module          | Behaviour                                   |
//! |-------------------|-----------------|---------------------------------------------|
//! | Radial            | [`radial`]      | uniform angle, random speed, from a point   |
//! | Directional       | [`directional`] | edge or band spawn, dominant axis drift     |
//! | Orbital           | [`orbital`]     | angle and radius tracked around a center    |
//! | Field-following   | [`flow`]        | phase function over a slow base drift       |
//! | Parametric        | [`parametric`]  | velocity sampled from a closed curve        |
//! | Self-sustaining   | [`looping`]     | reset in place instead of fading out        |
//!
//! Generators never touch existing particles and never render. Horizontal
//! components are divided by the aspect ratio of the viewport passed in
//! with the [`SpawnContext`], which the caller refreshes before every call.

#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod context;
pub mod directional;
pub mod flow;
pub mod looping;
pub mod orbital;
pub mod palette;
pub mod parametric;
pub mod radial;
pub mod rules;

pub use catalog::{EffectFamily, EffectKind, ParseEffectError};
pub use context::{SpawnContext, SpawnOrigin};
