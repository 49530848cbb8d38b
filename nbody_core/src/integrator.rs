//! Semi-implicit (symplectic) Euler integration
//!
//! Velocity is updated first and the *new* velocity moves the position.

use crate::body::Body;
use crate::forces::compute_forces;

/// Advance every non-fixed body by `dt`, returning a fresh snapshot.
///
/// Output has the same length and order as the input. Fixed bodies are copied
/// through unchanged. No clamping happens here: the frame loop is expected to
/// bound `dt` before calling.
pub fn step(bodies: &[Body], dt: f32, g: f32) -> Vec<Body> {
    debug_assert!(dt >= 0.0, "time step must be non-negative, got {dt}");

    let forces = compute_forces(bodies, g);

    bodies
        .iter()
        .zip(forces)
        .map(|(body, force)| {
            if body.is_fixed() {
                return body.clone();
            }

            let acceleration = force / body.mass();
            let velocity = body.velocity + acceleration * dt;
            let position = body.position + velocity * dt;
            body.advanced(position, velocity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyId, BodyTraits};
    use crate::forces::total_energy;
    use approx::assert_relative_eq;
    use glam::Vec3;

    fn free(id: u64, mass: f32, position: Vec3, velocity: Vec3) -> Body {
        Body::new(
            BodyId::new(id),
            BodyTraits::new("Free", mass, 0.1),
            position,
            velocity,
        )
        .unwrap()
    }

    #[test]
    fn single_body_moves_uniformly() {
        let body = free(0, 1.0, Vec3::ZERO, Vec3::X);

        let updated = step(&[body], 1.0, 1.0);

        assert_eq!(updated[0].position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(updated[0].velocity, Vec3::X);
    }

    #[test]
    fn empty_step_is_noop() {
        assert!(step(&[], 0.5, 1.0).is_empty());
    }

    #[test]
    fn uses_updated_velocity_for_position() {
        // a = 10 / 10 = 1 toward +x on the light body
        let bodies = [
            free(0, 100.0, Vec3::ZERO, Vec3::ZERO),
            free(1, 10.0, Vec3::new(-10.0, 0.0, 0.0), Vec3::ZERO),
        ];

        let updated = step(&bodies, 0.5, 1.0);

        assert_relative_eq!(updated[1].velocity.x, 0.5);
        // explicit Euler would leave the position at -10
        assert_relative_eq!(updated[1].position.x, -10.0 + 0.25);
    }

    #[test]
    fn preserves_identity_and_traits() {
        let bodies = [
            free(7, 2.0, Vec3::ZERO, Vec3::Y),
            free(9, 3.0, Vec3::new(5.0, 0.0, 0.0), Vec3::Z),
        ];

        let updated = step(&bodies, 0.1, 0.5);

        for (before, after) in bodies.iter().zip(&updated) {
            assert_eq!(before.id(), after.id());
            assert_eq!(before.traits(), after.traits());
            assert_eq!(before.is_fixed(), after.is_fixed());
        }
    }

    #[test]
    fn circular_orbit_energy_stays_bounded() {
        let g = 1.0;
        let star = Body::fixed(BodyId::new(0), BodyTraits::new("Star", 1000.0, 1.0), Vec3::ZERO).unwrap();
        let r = 20.0_f32;
        let speed = (g * 1000.0 / r).sqrt();
        let planet = free(1, 1.0, Vec3::new(r, 0.0, 0.0), Vec3::new(0.0, 0.0, speed));

        let mut bodies = vec![star, planet];
        let initial = total_energy(&bodies, g);

        for _ in 0..5_000 {
            bodies = step(&bodies, 0.01, g);
        }

        let drift = ((total_energy(&bodies, g) - initial) / initial).abs();
        assert!(drift < 0.01, "relative energy drift {drift}");
        assert!(bodies.iter().all(|b| b.position.is_finite() && b.velocity.is_finite()));
        assert_relative_eq!(bodies[1].position.length(), r, max_relative = 0.02);
    }
}
