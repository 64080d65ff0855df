//! # Effect Catalog
//!
//! One [`EffectKind`] per generator. The catalog is the single place that
//! maps names (config files, CLI flags, key bindings) to generator functions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::SpawnContext;
use crate::{directional, flow, looping, orbital, parametric, radial};

/// Recipe family an effect belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectFamily {
    /// Outward explosion from a point.
    Radial,
    /// Stream along an edge or band with a dominant axis.
    Directional,
    /// Angle tracked around a center.
    Orbital,
    /// Position driven by a phase function over a base drift.
    FieldFollowing,
    /// Velocity sampled from a closed curve.
    Parametric,
    /// Resets itself instead of fading out.
    SelfSustaining,
}

/// Unknown effect name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown effect `{0}`")]
pub struct ParseEffectError(pub String);

macro_rules! catalog {
    ($($variant:ident => $name:literal, $family:ident, $generator:path;)*) => {
        /// Every effect generator, by name.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum EffectKind {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        impl EffectKind {
            /// All effects in catalog order.
            pub const ALL: &'static [EffectKind] = &[$(EffectKind::$variant,)*];

            /// Snake-case name, as used in config files.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(EffectKind::$variant => $name,)*
                }
            }

            /// Recipe family.
            #[must_use]
            pub const fn family(self) -> EffectFamily {
                match self {
                    $(EffectKind::$variant => EffectFamily::$family,)*
                }
            }

            /// Runs the generator, returning the number of particles appended.
            pub fn spawn(self, ctx: &mut SpawnContext<'_>) -> usize {
                match self {
                    $(EffectKind::$variant => $generator(ctx),)*
                }
            }
        }
    };
}

catalog! {
    OrangeBurst => "orange_burst", Radial, radial::orange_burst;
    RedExplode => "red_explode", Radial, radial::red_explode;
    ShockRing => "shock_ring", Radial, radial::shock_ring;
    Nova => "nova", Radial, radial::nova;
    PlasmaBurst => "plasma_burst", Radial, radial::plasma_burst;
    Sparkler => "sparkler", Radial, radial::sparkler;
    GoldFountain => "gold_fountain", Radial, radial::gold_fountain;
    Ripple => "ripple", Radial, radial::ripple;

    GreenTrail => "green_trail", Directional, directional::green_trail;
    BlueRain => "blue_rain", Directional, directional::blue_rain;
    Fire => "fire", Directional, directional::fire;
    Confetti => "confetti", Directional, directional::confetti;
    Mist => "mist", Directional, directional::mist;
    Snow => "snow", Directional, directional::snow;
    Bubbles => "bubbles", Directional, directional::bubbles;
    Smoke => "smoke", Directional, directional::smoke;
    MeteorShower => "meteor_shower", Directional, directional::meteor_shower;

    EnergyBall => "energy_ball", Orbital, orbital::energy_ball;
    BeeSwarm => "bee_swarm", Orbital, orbital::bee_swarm;
    MicroOrbit => "micro_orbit", Orbital, orbital::micro_orbit;
    SolarFlare => "solar_flare", Orbital, orbital::solar_flare;
    Galaxy => "galaxy", Orbital, orbital::galaxy;
    Vortex => "vortex", Orbital, orbital::vortex;

    MagneticRays => "magnetic_rays", FieldFollowing, flow::magnetic_rays;
    AuroraVeil => "aurora_veil", FieldFollowing, flow::aurora_veil;
    ElectricVeins => "electric_veins", FieldFollowing, flow::electric_veins;
    PlasmaWaves => "plasma_waves", FieldFollowing, flow::plasma_waves;
    TideWaves => "tide_waves", FieldFollowing, flow::tide_waves;

    CherryBloom => "cherry_bloom", Parametric, parametric::cherry_bloom;
    RoseCurve => "rose_curve", Parametric, parametric::rose_curve;
    Lissajous => "lissajous", Parametric, parametric::lissajous;
    Butterfly => "butterfly", Parametric, parametric::butterfly;
    StarShape => "star_shape", Parametric, parametric::star_shape;

    FallingEmbers => "falling_embers", SelfSustaining, looping::falling_embers;
    Fireflies => "fireflies", SelfSustaining, looping::fireflies;
    FlyBurst => "fly_burst", SelfSustaining, looping::fly_burst;
    Starfield => "starfield", SelfSustaining, looping::starfield;
    MatrixRain => "matrix_rain", SelfSustaining, looping::matrix_rain;
}

impl EffectKind {
    fn position(self) -> usize {
        Self::ALL.iter().position(|&k| k == self).unwrap_or(0)
    }

    /// The next effect in catalog order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// The previous effect in catalog order, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = ParseEffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ParseEffectError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_size_and_unique_names() {
        assert_eq!(EffectKind::ALL.len(), 38);
        let names: HashSet<_> = EffectKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), 38);
    }

    #[test]
    fn test_every_family_is_represented() {
        let families: HashSet<_> = EffectKind::ALL.iter().map(|k| k.family()).collect();
        assert_eq!(families.len(), 6);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("blue_rain".parse::<EffectKind>(), Ok(EffectKind::BlueRain));
        assert_eq!("Cherry-Bloom".parse::<EffectKind>(), Ok(EffectKind::CherryBloom));
        assert_eq!(
            "warp_drive".parse::<EffectKind>(),
            Err(ParseEffectError("warp_drive".to_string()))
        );
    }

    #[test]
    fn test_next_and_previous_wrap() {
        assert_eq!(EffectKind::MatrixRain.next(), EffectKind::OrangeBurst);
        assert_eq!(EffectKind::OrangeBurst.previous(), EffectKind::MatrixRain);
        assert_eq!(EffectKind::Fire.next().previous(), EffectKind::Fire);
    }
}
