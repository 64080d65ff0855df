//! Effect palettes (RGB, `[0, 1]`).

/// Warm orange of the classic burst.
pub const ORANGE: [f32; 3] = [1.0, 0.6, 0.2];
/// Cool green of the trail.
pub const TRAIL_GREEN: [f32; 3] = [0.2, 1.0, 0.6];
/// Rain blue.
pub const RAIN_BLUE: [f32; 3] = [0.3, 0.4, 1.0];
/// Pure red.
pub const RED: [f32; 3] = [1.0, 0.0, 0.0];
/// Plain white.
pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Red, orange, yellow.
pub const FLAME: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [1.0, 0.65, 0.0], [1.0, 1.0, 0.0]];

/// Shock front: white fading to cyan.
pub const SHOCK: [[f32; 3]; 2] = [[1.0, 1.0, 1.0], [0.6, 0.95, 1.0]];

/// Nova inner core and outer shell.
pub const NOVA_CORE: [f32; 3] = [1.0, 0.97, 0.9];
/// Nova outer shell.
pub const NOVA_SHELL: [f32; 3] = [0.35, 0.55, 1.0];

/// Plasma purples and cyan.
pub const PLASMA: [[f32; 3]; 3] = [[0.7, 0.2, 1.0], [1.0, 0.3, 0.9], [0.3, 0.9, 1.0]];

/// Sparkler gold and white.
pub const SPARK: [[f32; 3]; 3] = [[1.0, 0.85, 0.4], [1.0, 1.0, 0.85], [1.0, 0.7, 0.2]];

/// Fountain gold.
pub const GOLD: [[f32; 3]; 2] = [[1.0, 0.84, 0.0], [1.0, 0.93, 0.55]];

/// Ripple aqua.
pub const AQUA: [f32; 3] = [0.3, 0.9, 0.9];

/// Confetti party colors.
pub const CONFETTI: [[f32; 3]; 6] = [
    [1.0, 0.25, 0.35],
    [1.0, 0.8, 0.15],
    [0.3, 0.85, 0.35],
    [0.25, 0.6, 1.0],
    [0.75, 0.35, 1.0],
    [1.0, 0.55, 0.15],
];

/// Mist grey-blue.
pub const MIST: [f32; 3] = [0.75, 0.8, 0.9];

/// Snow white with a blue tint.
pub const SNOW: [[f32; 3]; 2] = [[1.0, 1.0, 1.0], [0.85, 0.92, 1.0]];

/// Soap bubble blues.
pub const BUBBLE: [[f32; 3]; 2] = [[0.6, 0.85, 1.0], [0.8, 0.95, 1.0]];

/// Smoke greys.
pub const SMOKE: [[f32; 3]; 2] = [[0.55, 0.55, 0.55], [0.4, 0.4, 0.45]];

/// Meteor heads.
pub const METEOR: [[f32; 3]; 2] = [[1.0, 1.0, 0.9], [1.0, 0.6, 0.3]];

/// Energy ball cyan and white.
pub const ENERGY: [[f32; 3]; 2] = [[0.2, 0.9, 1.0], [0.9, 1.0, 1.0]];

/// Bee yellow and dark amber.
pub const BEE: [[f32; 3]; 2] = [[1.0, 0.85, 0.1], [0.45, 0.3, 0.05]];

/// Micro orbit white and violet.
pub const MICRO: [[f32; 3]; 2] = [[1.0, 1.0, 1.0], [0.7, 0.5, 1.0]];

/// Solar flare orange and yellow.
pub const SOLAR: [[f32; 3]; 3] = [[1.0, 0.45, 0.05], [1.0, 0.75, 0.1], [1.0, 0.95, 0.5]];

/// Galaxy star colors.
pub const GALAXY: [[f32; 3]; 3] = [[1.0, 1.0, 1.0], [0.7, 0.8, 1.0], [1.0, 0.7, 0.85]];

/// Vortex purple and teal.
pub const VORTEX: [[f32; 3]; 2] = [[0.55, 0.2, 0.9], [0.1, 0.8, 0.75]];

/// Magnetic ray blue-white.
pub const MAGNETIC: [[f32; 3]; 2] = [[0.5, 0.7, 1.0], [0.85, 0.9, 1.0]];

/// Aurora green, teal, violet.
pub const AURORA: [[f32; 3]; 3] = [[0.2, 1.0, 0.5], [0.1, 0.8, 0.8], [0.6, 0.3, 0.9]];

/// Electric cyan and white.
pub const ELECTRIC: [[f32; 3]; 2] = [[0.4, 0.9, 1.0], [0.95, 0.98, 1.0]];

/// Plasma wave magenta and orange.
pub const WAVE: [[f32; 3]; 2] = [[1.0, 0.2, 0.7], [1.0, 0.55, 0.1]];

/// Sea blues.
pub const TIDE: [[f32; 3]; 3] = [[0.1, 0.4, 0.9], [0.2, 0.6, 1.0], [0.6, 0.85, 1.0]];

/// Cherry blossom pinks.
pub const CHERRY: [[f32; 3]; 3] = [[1.0, 0.72, 0.8], [1.0, 0.5, 0.68], [1.0, 0.88, 0.92]];

/// Rose reds.
pub const ROSE: [[f32; 3]; 2] = [[0.9, 0.1, 0.3], [1.0, 0.35, 0.45]];

/// Lissajous lime.
pub const LIME: [[f32; 3]; 2] = [[0.6, 1.0, 0.2], [0.3, 0.9, 0.4]];

/// Butterfly wing orange and blue.
pub const BUTTERFLY: [[f32; 3]; 2] = [[1.0, 0.55, 0.1], [0.2, 0.45, 1.0]];

/// Star yellow.
pub const STAR: [[f32; 3]; 2] = [[1.0, 0.95, 0.3], [1.0, 1.0, 0.7]];

/// Ember reds and oranges.
pub const EMBER: [[f32; 3]; 3] = [[1.0, 0.35, 0.05], [1.0, 0.55, 0.1], [0.9, 0.15, 0.05]];

/// Firefly yellow-green.
pub const FIREFLY: [[f32; 3]; 2] = [[0.85, 1.0, 0.3], [1.0, 0.95, 0.45]];

/// Fly olive.
pub const FLY: [[f32; 3]; 2] = [[0.6, 0.7, 0.2], [0.45, 0.5, 0.25]];

/// Matrix greens.
pub const MATRIX: [[f32; 3]; 2] = [[0.2, 1.0, 0.35], [0.7, 1.0, 0.7]];
