//! Randomized properties for bodies launched by the slingshot

use nbody_core::BodyTraits;
use rand::Rng;

/// Neon palette new planets are drawn from
pub const PALETTE: [[f32; 4]; 5] = [
    [0.0, 0.949, 1.0, 1.0],
    [1.0, 0.0, 0.333, 1.0],
    [0.0, 1.0, 0.616, 1.0],
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 0.902, 0.0, 1.0],
];

pub const MASS_RANGE: std::ops::Range<f32> = 1.0..6.0;
pub const RADIUS_RANGE: std::ops::Range<f32> = 0.2..0.6;

/// Picks mass, radius and color for injected bodies.
///
/// Generic over the RNG so tests can use a seeded one.
pub struct Spawner<R: Rng> {
    rng: R,
}

impl<R: Rng> Spawner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn next_traits(&mut self) -> BodyTraits {
        let mass = self.rng.gen_range(MASS_RANGE);
        let radius = self.rng.gen_range(RADIUS_RANGE);
        let color = PALETTE[self.rng.gen_range(0..PALETTE.len())];

        BodyTraits::new("New Planet", mass, radius).with_color(color)
    }
}
