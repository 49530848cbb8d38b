//! Newtonian gravity between every pair of bodies
//!
//! Pairs closer than the sum of their radii are skipped outright instead of
//! softened: the pair contributes nothing until the spheres separate again.

use glam::Vec3;

use crate::body::Body;

/// Force on `a` exerted by `b`, or `None` when the spheres touch or overlap.
///
/// The boundary is closed: `distance == a.radius + b.radius` is skipped too.
/// With zero radii this also covers coincident bodies, so the division below
/// never sees a zero distance.
pub fn pair_force(a: &Body, b: &Body, g: f32) -> Option<Vec3> {
    let direction = b.position - a.position;
    let distance = direction.length();

    if distance <= a.radius() + b.radius() {
        return None;
    }

    let magnitude = g * a.mass() * b.mass() / (distance * distance);
    Some(direction / distance * magnitude)
}

/// Net force on every body, in input order.
///
/// Pairs are visited in ascending `(i, j)` order with `i < j`, so the summation
/// order (and therefore the floating-point result) is fixed. The force on `j`
/// is always the exact negation of the force on `i`.
pub fn compute_forces(bodies: &[Body], g: f32) -> Vec<Vec3> {
    let n = bodies.len();
    let mut forces = vec![Vec3::ZERO; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(force) = pair_force(&bodies[i], &bodies[j], g) {
                forces[i] += force;
                forces[j] -= force;
            }
        }
    }

    forces
}

pub fn kinetic_energy(bodies: &[Body]) -> f32 {
    bodies
        .iter()
        .map(|body| 0.5 * body.mass() * body.velocity.length_squared())
        .sum()
}

/// Gravitational potential energy over the pairs the force law acts on.
pub fn potential_energy(bodies: &[Body], g: f32) -> f32 {
    let mut potential = 0.0;

    for (i, body_i) in bodies.iter().enumerate() {
        for body_j in bodies.iter().skip(i + 1) {
            let r = (body_j.position - body_i.position).length();
            if r <= body_i.radius() + body_j.radius() {
                continue;
            }
            potential -= g * body_i.mass() * body_j.mass() / r;
        }
    }

    potential
}

pub fn total_energy(bodies: &[Body], g: f32) -> f32 {
    kinetic_energy(bodies) + potential_energy(bodies, g)
}

pub fn center_of_mass(bodies: &[Body]) -> Vec3 {
    let mut total_mass = 0.0;
    let mut com = Vec3::ZERO;

    for body in bodies {
        com += body.position * body.mass();
        total_mass += body.mass();
    }

    if total_mass > 0.0 {
        com / total_mass
    } else {
        Vec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyId, BodyTraits};
    use approx::assert_relative_eq;

    fn body(id: u64, mass: f32, radius: f32, position: Vec3) -> Body {
        Body::new(
            BodyId::new(id),
            BodyTraits::new("Test", mass, radius),
            position,
            Vec3::ZERO,
        )
        .unwrap()
    }

    #[test]
    fn empty_and_single_yield_zero_forces() {
        assert!(compute_forces(&[], 1.0).is_empty());

        let forces = compute_forces(&[body(0, 5.0, 1.0, Vec3::ONE)], 1.0);
        assert_eq!(forces, vec![Vec3::ZERO]);
    }

    #[test]
    fn two_body_attraction() {
        let bodies = [
            body(0, 100.0, 1.0, Vec3::ZERO),
            body(1, 10.0, 1.0, Vec3::new(10.0, 0.0, 0.0)),
        ];

        let forces = compute_forces(&bodies, 1.0);

        assert_relative_eq!(forces[0].x, 10.0);
        assert_eq!(forces[0].y, 0.0);
        assert_eq!(forces[0].z, 0.0);
        assert_relative_eq!(forces[1].x, -10.0);
        assert_eq!(forces[1].y, 0.0);
        assert_eq!(forces[1].z, 0.0);
    }

    #[test]
    fn overlapping_bodies_exert_nothing() {
        // Radius sum 11, distance 10
        let bodies = [
            body(0, 100.0, 5.0, Vec3::ZERO),
            body(1, 10.0, 6.0, Vec3::new(10.0, 0.0, 0.0)),
        ];

        let forces = compute_forces(&bodies, 1.0);
        assert_eq!(forces[0].length(), 0.0);
        assert_eq!(forces[1].length(), 0.0);
    }

    #[test]
    fn touching_bodies_are_skipped() {
        let a = body(0, 100.0, 4.0, Vec3::ZERO);
        let b = body(1, 10.0, 6.0, Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(pair_force(&a, &b, 1.0), None);
        assert_eq!(compute_forces(&[a, b], 1.0), vec![Vec3::ZERO, Vec3::ZERO]);
    }

    #[test]
    fn coincident_point_masses_stay_finite() {
        let bodies = [
            body(0, 1.0, 0.0, Vec3::ONE),
            body(1, 1.0, 0.0, Vec3::ONE),
        ];

        let forces = compute_forces(&bodies, 1.0);
        assert!(forces.iter().all(|f| f.is_finite()));
        assert_eq!(forces, vec![Vec3::ZERO, Vec3::ZERO]);
    }

    #[test]
    fn force_scales_linearly_with_g() {
        let bodies = [
            body(0, 3.0, 0.1, Vec3::ZERO),
            body(1, 7.0, 0.1, Vec3::new(0.0, 0.0, 4.0)),
        ];

        let f1 = compute_forces(&bodies, 0.1)[0];
        let f2 = compute_forces(&bodies, 0.2)[0];
        assert_relative_eq!(f2.z, 2.0 * f1.z, max_relative = 1e-6);
    }

    #[test]
    fn potential_energy_of_pair() {
        let bodies = [
            body(0, 100.0, 1.0, Vec3::ZERO),
            body(1, 10.0, 1.0, Vec3::new(10.0, 0.0, 0.0)),
        ];

        assert_relative_eq!(potential_energy(&bodies, 1.0), -100.0);
        assert_eq!(kinetic_energy(&bodies), 0.0);
    }

    #[test]
    fn center_of_mass_is_mass_weighted() {
        let bodies = [
            body(0, 3.0, 0.0, Vec3::ZERO),
            body(1, 1.0, 0.0, Vec3::new(4.0, 0.0, 0.0)),
        ];

        assert_relative_eq!(center_of_mass(&bodies).x, 1.0);
        assert_eq!(center_of_mass(&[]), Vec3::ZERO);
    }
}
