use glam::Vec3;
use nbody_core::{Body, BodyTraits, Preset, SimConfig, SimEvent, Simulation};

fn new_planet(mass: f32) -> BodyTraits {
    BodyTraits::new("New Planet", mass, 0.3).with_color([0.0, 1.0, 0.616, 1.0])
}

fn solar_system() -> Simulation {
    Simulation::from_preset(Preset::SolarSystem, SimConfig::default()).unwrap()
}

#[test]
fn reset_restores_exact_initial_state() {
    let mut sim = solar_system();
    let initial: Vec<Body> = sim.bodies().to_vec();

    for frame in 0..200 {
        if frame % 25 == 0 {
            sim.push_event(SimEvent::Inject {
                position: Vec3::new(frame as f32 * 0.3, 0.0, 40.0),
                velocity: Vec3::new(-1.0, 0.0, 0.0),
                traits: new_planet(2.0),
            });
        }
        if frame == 120 {
            sim.push_event(SimEvent::SetGravity(0.9));
        }
        sim.advance(1.0 / 60.0);
    }
    assert!(sim.bodies().len() > initial.len());
    assert_ne!(sim.bodies()[1].position, initial[1].position);

    sim.push_event(SimEvent::Reset);
    let report = sim.advance(0.0);

    assert!(report.reset);
    assert_eq!(sim.generation(), 1);
    assert_eq!(sim.bodies(), &initial[..]);
}

#[test]
fn reset_copy_is_independent_of_retained_snapshot() {
    let mut sim = solar_system();
    sim.advance(0.05);
    sim.reset();

    // Retain a snapshot, keep simulating, and make sure the retained copy and
    // the initial configuration are both left alone
    let retained: Vec<Body> = sim.bodies().to_vec();
    for _ in 0..10 {
        sim.advance(0.05);
    }

    assert_eq!(retained, sim.initial_bodies());
    assert_ne!(sim.bodies()[1].position, retained[1].position);

    sim.reset();
    assert_eq!(sim.bodies(), &retained[..]);
}

#[test]
fn injection_appends_without_touching_existing_bodies() {
    let mut sim = solar_system();
    sim.advance(0.05);
    let before: Vec<Body> = sim.bodies().to_vec();

    let id = sim
        .inject(Vec3::new(-30.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.5), new_planet(4.0))
        .unwrap();

    let after = sim.bodies();
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(&after[..before.len()], &before[..]);

    let spawned = after.last().unwrap();
    assert_eq!(spawned.id(), id);
    assert_eq!(spawned.position, Vec3::new(-30.0, 0.0, 0.0));
    assert_eq!(spawned.velocity, Vec3::new(0.0, 0.0, -1.5));
    assert!(!spawned.is_fixed());
    assert!(before.iter().all(|b| b.id() != id));
}

#[test]
fn sun_stays_put_through_a_session() {
    let mut sim = solar_system();
    let sun = sim.bodies()[0].clone();

    // Fling something straight through the sun
    sim.inject(Vec3::new(-10.0, 0.0, 0.0), Vec3::new(8.0, 0.0, 0.0), new_planet(6.0))
        .unwrap();
    for _ in 0..600 {
        sim.advance(1.0 / 60.0);
    }

    assert_eq!(sim.bodies()[0], sun);
}

#[test]
fn paused_time_scale_freezes_motion() {
    let mut sim = solar_system();
    sim.push_event(SimEvent::SetTimeScale(0.0));
    sim.advance(1.0 / 60.0);
    let frozen: Vec<Body> = sim.bodies().to_vec();

    for _ in 0..30 {
        sim.advance(1.0 / 60.0);
    }

    assert_eq!(sim.bodies(), &frozen[..]);
    assert_eq!(sim.elapsed_time(), 0.0);
}

#[test]
fn earth_completes_bounded_orbit() {
    let mut sim = solar_system();

    let mut max_r: f32 = 0.0;
    let mut min_r = f32::MAX;
    for _ in 0..3_000 {
        sim.advance(1.0 / 60.0);
        let r = sim.bodies()[1].position.length();
        max_r = max_r.max(r);
        min_r = min_r.min(r);
    }

    // Not a perfect circle at the default G, but it stays bound to the sun
    assert!(min_r > 2.5, "earth fell into the sun: {min_r}");
    assert!(max_r < 60.0, "earth escaped: {max_r}");
}
