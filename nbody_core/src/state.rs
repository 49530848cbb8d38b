//! Mutable simulation state owned by the host loop
//!
//! The host holds one [`Simulation`]. UI input is turned into [`SimEvent`]s and
//! queued; [`Simulation::advance`] drains the queue and then runs exactly one
//! integration step, so an event never lands in the middle of a step.

use std::collections::{HashSet, VecDeque};

use glam::Vec3;
use log::{debug, info, warn};

use crate::body::{Body, BodyId, BodyTraits};
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::integrator;
use crate::presets::Preset;

/// Body count past which every further injection logs a slowdown warning.
/// Nothing is ever evicted.
pub const SOFT_BODY_LIMIT: usize = 256;

/// Something the user did between frames.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    SetTimeScale(f32),
    SetGravity(f32),
    /// Revert to the initial configuration
    Reset,
    /// Slingshot release: spawn a new body
    Inject {
        position: Vec3,
        velocity: Vec3,
        traits: BodyTraits,
    },
}

/// What happened during one [`Simulation::advance`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub injected: Vec<BodyId>,
    pub rejected: Vec<SimError>,
    pub reset: bool,
    pub dt: f32,
}

pub struct Simulation {
    initial: Vec<Body>,
    bodies: Vec<Body>,
    config: SimConfig,
    pending: VecDeque<SimEvent>,
    generation: u64,
    /// `None` once every id up to `u64::MAX` has been handed out
    next_id: Option<u64>,
    elapsed_time: f32,
    steps: u64,
}

impl Simulation {
    /// Start from `initial`, which is also what [`Simulation::reset`] restores.
    pub fn new(initial: Vec<Body>, config: SimConfig) -> Result<Self> {
        let mut seen = HashSet::with_capacity(initial.len());
        for body in &initial {
            if !seen.insert(body.id()) {
                return Err(SimError::DuplicateId(body.id()));
            }
        }

        let next_id = match initial.iter().map(|b| b.id().raw()).max() {
            Some(highest) => highest.checked_add(1),
            None => Some(0),
        };

        Ok(Self {
            bodies: initial.clone(),
            initial,
            config,
            pending: VecDeque::new(),
            generation: 0,
            next_id,
            elapsed_time: 0.0,
            steps: 0,
        })
    }

    pub fn from_preset(preset: Preset, config: SimConfig) -> Result<Self> {
        let sim = Self::new(preset.bodies()?, config)?;
        info!("loaded preset {} with {} bodies", preset.name(), sim.bodies.len());
        Ok(sim)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn initial_bodies(&self) -> &[Body] {
        &self.initial
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Incremented on every reset. Hosts compare it to drop stale per-body data.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Queue an event to be applied before the next step.
    pub fn push_event(&mut self, event: SimEvent) {
        debug!("queued {event:?}");
        self.pending.push_back(event);
    }

    /// Move queued speed and gravity changes onto `next`, which is about to
    /// replace this simulation. Resets and injections refer to this
    /// simulation's bodies, so they are returned instead of carried over.
    pub fn carry_pending_settings(&mut self, next: &mut Simulation) -> Vec<SimEvent> {
        let mut dropped = Vec::new();
        for event in self.pending.drain(..) {
            match event {
                SimEvent::SetTimeScale(_) | SimEvent::SetGravity(_) => {
                    next.pending.push_back(event);
                }
                SimEvent::Reset | SimEvent::Inject { .. } => dropped.push(event),
            }
        }
        dropped
    }

    /// Apply one event right away. Returns the new id for injections.
    pub fn apply(&mut self, event: SimEvent) -> Result<Option<BodyId>> {
        match event {
            SimEvent::SetTimeScale(time_scale) => {
                self.config.set_time_scale(time_scale);
                Ok(None)
            }
            SimEvent::SetGravity(gravity) => {
                self.config.set_gravity(gravity);
                Ok(None)
            }
            SimEvent::Reset => {
                self.reset();
                Ok(None)
            }
            SimEvent::Inject {
                position,
                velocity,
                traits,
            } => self.inject(position, velocity, traits).map(Some),
        }
    }

    /// Append a new free body. Existing bodies are left untouched.
    pub fn inject(
        &mut self,
        position: Vec3,
        velocity: Vec3,
        traits: BodyTraits,
    ) -> Result<BodyId> {
        let raw = self.next_id.ok_or(SimError::IdSpaceExhausted)?;
        let id = BodyId::new(raw);
        let body = Body::new(id, traits, position, velocity)?;
        self.next_id = raw.checked_add(1);

        debug!(
            "injected {} {id} at {position} with velocity {velocity}",
            body.name()
        );
        self.bodies.push(body);

        if self.bodies.len() > SOFT_BODY_LIMIT {
            warn!(
                "{} bodies in simulation; force evaluation is quadratic and frames will slow down",
                self.bodies.len()
            );
        }

        Ok(id)
    }

    /// Replace every body with a fresh copy of the initial configuration.
    ///
    /// Injected ids are not recycled: the id counter keeps counting across resets.
    pub fn reset(&mut self) {
        self.bodies = self.initial.clone();
        self.generation += 1;
        self.elapsed_time = 0.0;
        self.steps = 0;
        info!("simulation reset (generation {})", self.generation);
    }

    /// Integrate one step of `dt` simulated time with the current config.
    pub fn step(&mut self, dt: f32) {
        self.bodies = integrator::step(&self.bodies, dt, self.config.gravity());
        self.elapsed_time += dt;
        self.steps += 1;
    }

    /// One host frame: apply queued events, then step with the clamped and
    /// scaled wall-clock delta.
    pub fn advance(&mut self, wall_dt: f32) -> FrameReport {
        let mut report = FrameReport::default();

        while let Some(event) = self.pending.pop_front() {
            let is_reset = matches!(event, SimEvent::Reset);
            match self.apply(event) {
                Ok(Some(id)) => report.injected.push(id),
                Ok(None) => report.reset |= is_reset,
                Err(err) => {
                    warn!("dropping event: {err}");
                    report.rejected.push(err);
                }
            }
        }

        report.dt = self.config.frame_dt(wall_dt);
        self.step(report.dt);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidBodyError;

    fn planet() -> BodyTraits {
        BodyTraits::new("New Planet", 3.0, 0.3)
    }

    fn solar() -> Simulation {
        Simulation::from_preset(Preset::SolarSystem, SimConfig::default()).unwrap()
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut bodies = Preset::SolarSystem.bodies().unwrap();
        bodies.push(bodies[1].clone());

        let err = Simulation::new(bodies, SimConfig::default()).err();
        assert_eq!(err, Some(SimError::DuplicateId(BodyId::new(1))));
    }

    #[test]
    fn injected_ids_continue_after_initial() {
        let mut sim = solar();
        let id = sim.inject(Vec3::new(40.0, 0.0, 0.0), Vec3::Z, planet()).unwrap();
        assert_eq!(id, BodyId::new(4));
        assert_eq!(sim.bodies().len(), 5);
        assert_eq!(sim.body(id).map(|b| b.name()), Some("New Planet"));
    }

    #[test]
    fn ids_not_reused_after_reset() {
        let mut sim = solar();
        let first = sim.inject(Vec3::X * 50.0, Vec3::ZERO, planet()).unwrap();
        sim.reset();
        let second = sim.inject(Vec3::X * 50.0, Vec3::ZERO, planet()).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn highest_possible_initial_id_is_accepted() {
        let top = Body::new(BodyId::new(u64::MAX), planet(), Vec3::ZERO, Vec3::ZERO).unwrap();
        let mut sim = Simulation::new(vec![top], SimConfig::default()).unwrap();

        let before = sim.bodies().to_vec();
        let err = sim.inject(Vec3::X * 10.0, Vec3::ZERO, planet());
        assert_eq!(err, Err(SimError::IdSpaceExhausted));
        assert_eq!(sim.bodies(), &before[..]);
    }

    #[test]
    fn last_id_is_handed_out_once() {
        let near_top =
            Body::new(BodyId::new(u64::MAX - 1), planet(), Vec3::ZERO, Vec3::ZERO).unwrap();
        let mut sim = Simulation::new(vec![near_top], SimConfig::default()).unwrap();

        let last = sim.inject(Vec3::X * 10.0, Vec3::ZERO, planet()).unwrap();
        assert_eq!(last, BodyId::new(u64::MAX));

        sim.push_event(SimEvent::Inject {
            position: Vec3::X * 20.0,
            velocity: Vec3::ZERO,
            traits: planet(),
        });
        let report = sim.advance(0.0);
        assert!(report.injected.is_empty());
        assert_eq!(report.rejected, vec![SimError::IdSpaceExhausted]);
        assert_eq!(sim.bodies().len(), 2);
    }

    #[test]
    fn invalid_injection_leaves_state_alone() {
        let mut sim = solar();
        let before = sim.bodies().to_vec();

        let err = sim.inject(Vec3::ZERO, Vec3::ZERO, BodyTraits::new("Bad", 0.0, 0.1));
        assert_eq!(err, Err(SimError::InvalidBody(InvalidBodyError::NonPositiveMass(0.0))));
        assert_eq!(sim.bodies(), &before[..]);

        // the failed attempt does not burn an id
        let id = sim.inject(Vec3::ZERO, Vec3::ZERO, planet()).unwrap();
        assert_eq!(id, BodyId::new(4));
    }

    #[test]
    fn events_wait_for_advance() {
        let mut sim = solar();
        sim.push_event(SimEvent::SetGravity(0.5));
        sim.push_event(SimEvent::Inject {
            position: Vec3::new(0.0, 0.0, 60.0),
            velocity: Vec3::X,
            traits: planet(),
        });

        assert_eq!(sim.pending_events(), 2);
        assert_eq!(sim.config().gravity(), 0.1);
        assert_eq!(sim.bodies().len(), 4);

        let report = sim.advance(0.016);
        assert_eq!(sim.pending_events(), 0);
        assert_eq!(sim.config().gravity(), 0.5);
        assert_eq!(report.injected, vec![BodyId::new(4)]);
        assert!(!report.reset);
        assert_eq!(sim.steps(), 1);
    }

    #[test]
    fn advance_reports_reset_and_rejections() {
        let mut sim = solar();
        sim.push_event(SimEvent::Inject {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            traits: BodyTraits::new("Bad", -1.0, 0.1),
        });
        sim.push_event(SimEvent::Reset);

        let report = sim.advance(0.0);
        assert!(report.reset);
        assert_eq!(
            report.rejected,
            vec![SimError::InvalidBody(InvalidBodyError::NonPositiveMass(-1.0))]
        );
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn pending_settings_survive_preset_switch() {
        let mut old = solar();
        old.push_event(SimEvent::SetTimeScale(3.0));
        old.push_event(SimEvent::Reset);
        old.push_event(SimEvent::Inject {
            position: Vec3::X * 40.0,
            velocity: Vec3::ZERO,
            traits: planet(),
        });
        old.push_event(SimEvent::SetGravity(0.4));

        let mut next = Simulation::from_preset(Preset::Empty, *old.config()).unwrap();
        let dropped = old.carry_pending_settings(&mut next);

        assert_eq!(old.pending_events(), 0);
        assert_eq!(dropped.len(), 2);
        assert_eq!(dropped[0], SimEvent::Reset);
        assert!(matches!(dropped[1], SimEvent::Inject { .. }));

        let report = next.advance(0.0);
        assert!(!report.reset);
        assert!(report.injected.is_empty());
        assert_eq!(next.config().time_scale(), 3.0);
        assert_eq!(next.config().gravity(), 0.4);
        assert!(next.bodies().is_empty());
    }

    #[test]
    fn advance_uses_clamped_scaled_dt() {
        let mut sim = solar();
        sim.apply(SimEvent::SetTimeScale(2.0)).unwrap();

        let report = sim.advance(1.0);
        assert_eq!(report.dt, 0.2);
        assert_eq!(sim.elapsed_time(), 0.2);
    }

    #[test]
    fn reset_clears_clock() {
        let mut sim = solar();
        sim.advance(0.05);
        sim.advance(0.05);
        sim.reset();

        assert_eq!(sim.steps(), 0);
        assert_eq!(sim.elapsed_time(), 0.0);
        assert_eq!(sim.bodies(), sim.initial_bodies());
    }
}
