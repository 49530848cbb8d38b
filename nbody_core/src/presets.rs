//! Initial configurations the simulation can start from and reset to

use glam::Vec3;

use crate::body::{Body, BodyId, BodyTraits};
use crate::config::DEFAULT_G;
use crate::error::InvalidBodyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Fixed sun with three planets on preset orbits
    #[default]
    SolarSystem,
    /// Two equal stars in mutual orbit and one circumbinary planet
    BinaryStar,
    /// Nothing at all, a sandbox for slingshots
    Empty,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::SolarSystem, Preset::BinaryStar, Preset::Empty];

    pub fn name(self) -> &'static str {
        match self {
            Preset::SolarSystem => "Solar System",
            Preset::BinaryStar => "Binary Star",
            Preset::Empty => "Empty Space",
        }
    }

    /// Build the preset's bodies. Ids are assigned from 0 in list order.
    pub fn bodies(self) -> Result<Vec<Body>, InvalidBodyError> {
        match self {
            Preset::SolarSystem => solar_system(),
            Preset::BinaryStar => binary_star(),
            Preset::Empty => Ok(Vec::new()),
        }
    }
}

fn solar_system() -> Result<Vec<Body>, InvalidBodyError> {
    let sun = Body::fixed(
        BodyId::new(0),
        BodyTraits::new("Sun", 1000.0, 2.5).with_color([1.0, 0.667, 0.0, 1.0]),
        Vec3::ZERO,
    )?;

    // (name, mass, radius, distance, speed, color)
    let planet_data = [
        ("Earth", 10.0, 0.5, 15.0, 2.5, [0.0, 0.949, 1.0, 1.0]),
        ("Mars", 8.0, 0.4, 22.0, 2.1, [1.0, 0.0, 0.333, 1.0]),
        ("Jupiter", 50.0, 1.2, 35.0, 1.6, [1.0, 0.902, 0.0, 1.0]),
    ];

    let mut bodies = vec![sun];
    for (index, (name, mass, radius, distance, speed, color)) in planet_data.into_iter().enumerate() {
        bodies.push(Body::new(
            BodyId::new(index as u64 + 1),
            BodyTraits::new(name, mass, radius).with_color(color),
            Vec3::new(distance, 0.0, 0.0),
            Vec3::new(0.0, 0.0, speed),
        )?);
    }

    Ok(bodies)
}

fn binary_star() -> Result<Vec<Body>, InvalidBodyError> {
    let star_mass = 300.0;
    let separation = 10.0_f32;
    // Equal masses on a circle around their barycenter: v² = G·m / (2·d)
    let star_speed = (DEFAULT_G * star_mass / (2.0 * separation)).sqrt();

    let planet_distance = 30.0_f32;
    let planet_speed = (DEFAULT_G * 2.0 * star_mass / planet_distance).sqrt();

    Ok(vec![
        Body::new(
            BodyId::new(0),
            BodyTraits::new("Alpha", star_mass, 1.2).with_color([1.0, 0.75, 0.3, 1.0]),
            Vec3::new(-separation / 2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -star_speed),
        )?,
        Body::new(
            BodyId::new(1),
            BodyTraits::new("Beta", star_mass, 1.2).with_color([0.5, 0.7, 1.0, 1.0]),
            Vec3::new(separation / 2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, star_speed),
        )?,
        Body::new(
            BodyId::new(2),
            BodyTraits::new("Tatooine", 5.0, 0.5).with_color([0.0, 1.0, 0.616, 1.0]),
            Vec3::new(planet_distance, 0.0, 0.0),
            Vec3::new(0.0, 0.0, planet_speed),
        )?,
    ])
}
