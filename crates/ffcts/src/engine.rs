//! # Engine
//!
//! Owns everything one view needs: the particle field, the surface, the
//! renderer and both RNGs. An `Engine` only exists once a surface does, so
//! no generator can run before initialization.
//!
//! ```text
//! Engine::frame(now):
//! ┌──────────────────────────────────────────────┐
//! │ 1. begin_frame   clear surface to background │
//! │ 2. step          motion → fade → prune       │
//! │ 3. draw          retained particles, in order│
//! └──────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use ffcts_core::{seeded_rng, MotionContext, ParticleField, SimRng, SimulationConfig, Viewport};
use ffcts_effects::{EffectKind, SpawnContext, SpawnOrigin};
use ffcts_rendering::{RenderConfig, RenderStats, Renderer, Surface};
use tracing::{debug, info};

use crate::error::AppResult;

/// Mixed into the seed so motion rules draw from a different stream than
/// generators.
const MOTION_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Outcome of one [`Engine::frame`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameResult {
    /// Frame number, starting at 0.
    pub frame: u64,
    /// Particles kept (and painted) this frame.
    pub retained: usize,
    /// Particles whose life ran out.
    pub pruned: usize,
    /// Particles dropped because their motion rule failed.
    pub failed: usize,
    /// Renderer statistics.
    pub painted: RenderStats,
    /// Simulation step time in milliseconds.
    pub step_time_ms: f32,
    /// Whole frame in milliseconds.
    pub total_time_ms: f32,
}

/// A particle view bound to one surface.
pub struct Engine<S: Surface> {
    field: ParticleField,
    surface: S,
    renderer: Renderer,
    simulation: SimulationConfig,
    spawn_rng: SimRng,
    motion_rng: SimRng,
    frame: u64,
    epoch: Instant,
}

impl<S: Surface> Engine<S> {
    /// Binds a new engine to `surface`.
    ///
    /// # Errors
    ///
    /// Returns the validation error of either config section.
    pub fn new(surface: S, simulation: SimulationConfig, render: RenderConfig) -> AppResult<Self> {
        simulation.validate()?;
        render.validate()?;

        let viewport = surface.viewport();
        info!(
            width = viewport.width,
            height = viewport.height,
            seed = simulation.seed,
            "engine ready"
        );

        Ok(Self {
            field: ParticleField::with_capacity(4096),
            surface,
            renderer: Renderer::new(render),
            spawn_rng: seeded_rng(simulation.seed),
            motion_rng: seeded_rng(simulation.seed ^ MOTION_STREAM),
            simulation,
            frame: 0,
            epoch: Instant::now(),
        })
    }

    /// Runs `kind` with each point-based effect picking its own random point.
    pub fn spawn(&mut self, kind: EffectKind) -> usize {
        self.spawn_at(kind, SpawnOrigin::random())
    }

    /// Runs `kind` at `origin`. The viewport is read fresh for the call.
    pub fn spawn_at(&mut self, kind: EffectKind, origin: SpawnOrigin) -> usize {
        let viewport = self.surface.viewport();
        let mut ctx = SpawnContext::new(&mut self.field, &mut self.spawn_rng, viewport, origin);
        let emitted = kind.spawn(&mut ctx);
        debug!(effect = %kind, emitted, live = self.field.len(), "effect spawned");
        emitted
    }

    /// Clears the surface, advances the simulation one step and paints the
    /// survivors.
    ///
    /// `now` drives time-based motion rules; it is measured from the
    /// engine's creation.
    pub fn frame(&mut self, now: Instant) -> FrameResult {
        let start = Instant::now();
        let time_ms = now.saturating_duration_since(self.epoch).as_secs_f64() * 1000.0;

        self.renderer.begin_frame(&mut self.surface);

        let mut ctx = MotionContext::new(time_ms, self.frame, &mut self.motion_rng);
        let report = self.field.step(&self.simulation, &mut ctx);
        let step_time_ms = start.elapsed().as_secs_f32() * 1000.0;

        let painted = self.renderer.draw(&mut self.surface, self.field.as_slice());

        let result = FrameResult {
            frame: self.frame,
            retained: report.retained,
            pruned: report.pruned,
            failed: report.failed,
            painted,
            step_time_ms,
            total_time_ms: start.elapsed().as_secs_f32() * 1000.0,
        };
        self.frame += 1;
        result
    }

    /// Resizes the surface. Particles stay where they are in normalized
    /// space; only their pixel mapping changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        let viewport = self.surface.viewport();
        info!(width = viewport.width, height = viewport.height, "surface resized");
    }

    /// Removes every particle.
    pub fn clear(&mut self) {
        self.field.clear();
    }

    /// Live particles.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.field.len()
    }

    /// Frames run so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Current surface dimensions.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    /// The particle field.
    #[must_use]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// The surface as of the last frame.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Simulation settings in use.
    #[must_use]
    pub fn simulation(&self) -> &SimulationConfig {
        &self.simulation
    }
}

macro_rules! effect_methods {
    ($($method:ident => $kind:ident),* $(,)?) => {
        impl<S: Surface> Engine<S> {
            $(
                #[doc = concat!("Spawns `", stringify!($method), "`. Returns the particles added.")]
                pub fn $method(&mut self) -> usize {
                    self.spawn(EffectKind::$kind)
                }
            )*
        }
    };
}

effect_methods! {
    orange_burst => OrangeBurst,
    red_explode => RedExplode,
    shock_ring => ShockRing,
    nova => Nova,
    plasma_burst => PlasmaBurst,
    sparkler => Sparkler,
    gold_fountain => GoldFountain,
    ripple => Ripple,
    green_trail => GreenTrail,
    blue_rain => BlueRain,
    fire => Fire,
    confetti => Confetti,
    mist => Mist,
    snow => Snow,
    bubbles => Bubbles,
    smoke => Smoke,
    meteor_shower => MeteorShower,
    energy_ball => EnergyBall,
    bee_swarm => BeeSwarm,
    micro_orbit => MicroOrbit,
    solar_flare => SolarFlare,
    galaxy => Galaxy,
    vortex => Vortex,
    magnetic_rays => MagneticRays,
    aurora_veil => AuroraVeil,
    electric_veins => ElectricVeins,
    plasma_waves => PlasmaWaves,
    tide_waves => TideWaves,
    cherry_bloom => CherryBloom,
    rose_curve => RoseCurve,
    lissajous => Lissajous,
    butterfly => Butterfly,
    star_shape => StarShape,
    falling_embers => FallingEmbers,
    fireflies => Fireflies,
    fly_burst => FlyBurst,
    starfield => Starfield,
    matrix_rain => MatrixRain,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffcts_rendering::PixelSurface;

    fn engine(width: u32, height: u32) -> Engine<PixelSurface> {
        Engine::new(
            PixelSurface::new(width, height),
            SimulationConfig::default(),
            RenderConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_named_methods_append() {
        let mut engine = engine(320, 240);
        assert_eq!(engine.orange_burst(), 80);
        assert_eq!(engine.red_explode(), 150);
        assert_eq!(engine.particle_count(), 230);
    }

    #[test]
    fn test_frame_clears_then_paints() {
        let mut engine = engine(64, 64);
        let now = Instant::now();
        let empty = engine.frame(now);
        assert_eq!(empty.frame, 0);
        assert_eq!(engine.surface().count_not([0, 0, 0, 255]), 0);

        engine.nova();
        let busy = engine.frame(now);
        assert_eq!(busy.frame, 1);
        assert_eq!(busy.retained, engine.particle_count());
        assert!(busy.painted.drawn > 0);
        assert!(engine.surface().count_not([0, 0, 0, 255]) > 0);
    }

    #[test]
    fn test_clear_empties_field() {
        let mut engine = engine(64, 64);
        engine.galaxy();
        engine.clear();
        assert_eq!(engine.particle_count(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let simulation = SimulationConfig {
            default_fade_rate: f32::NAN,
            ..SimulationConfig::default()
        };
        let result = Engine::new(PixelSurface::new(8, 8), simulation, RenderConfig::default());
        assert!(result.is_err());
    }
}
