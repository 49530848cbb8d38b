//! Bodies: the point masses the force field acts on

use std::fmt;

use glam::Vec3;

use crate::error::InvalidBodyError;

/// Opaque body identifier, unique within one simulation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u64);

impl BodyId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The non-kinematic properties of a body: everything chosen once at creation.
///
/// Only `mass` and `radius` matter to the physics. `name` and `color` are
/// carried through untouched for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyTraits {
    pub name: String,
    pub mass: f32,
    pub radius: f32,
    pub color: [f32; 4],
}

impl BodyTraits {
    pub fn new(name: &str, mass: f32, radius: f32) -> Self {
        Self {
            name: name.to_string(),
            mass,
            radius,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    fn validate(&self) -> Result<(), InvalidBodyError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(InvalidBodyError::NonPositiveMass(self.mass));
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(InvalidBodyError::InvalidRadius(self.radius));
        }
        Ok(())
    }
}

/// A sphere mass in the simulation.
///
/// Identity, name, mass, radius, color and the fixed flag are immutable once
/// the body exists. Position and velocity are the integrator's state.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    id: BodyId,
    traits: BodyTraits,
    is_fixed: bool,
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Body {
    /// Create a free body, rejecting non-positive mass and bad geometry.
    pub fn new(
        id: BodyId,
        traits: BodyTraits,
        position: Vec3,
        velocity: Vec3,
    ) -> Result<Self, InvalidBodyError> {
        traits.validate()?;
        if !position.is_finite() {
            return Err(InvalidBodyError::NonFinite("position"));
        }
        if !velocity.is_finite() {
            return Err(InvalidBodyError::NonFinite("velocity"));
        }

        Ok(Self {
            id,
            traits,
            is_fixed: false,
            position,
            velocity,
        })
    }

    /// Create an immovable attractor. It pulls on others but never moves.
    pub fn fixed(id: BodyId, traits: BodyTraits, position: Vec3) -> Result<Self, InvalidBodyError> {
        let mut body = Self::new(id, traits, position, Vec3::ZERO)?;
        body.is_fixed = true;
        Ok(body)
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.traits.name
    }

    pub fn mass(&self) -> f32 {
        self.traits.mass
    }

    pub fn radius(&self) -> f32 {
        self.traits.radius
    }

    pub fn color(&self) -> [f32; 4] {
        self.traits.color
    }

    pub fn traits(&self) -> &BodyTraits {
        &self.traits
    }

    pub fn is_fixed(&self) -> bool {
        self.is_fixed
    }

    /// Same body with new kinematic state; every other field is carried over.
    pub(crate) fn advanced(&self, position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            ..self.clone()
        }
    }
}
