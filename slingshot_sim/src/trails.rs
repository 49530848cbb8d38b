//! Orbit trails, kept by the host so the physics snapshot stays lean

use std::collections::{HashMap, VecDeque};

use glam::Vec3;
use nbody_core::{Body, BodyId};

pub const DEFAULT_TRAIL_LENGTH: usize = 300;

/// Skip recording until a body has moved at least this far
const MIN_SEGMENT: f32 = 0.05;

pub struct Trails {
    paths: HashMap<BodyId, VecDeque<Vec3>>,
    generation: u64,
    max_length: usize,
}

impl Trails {
    pub fn new(max_length: usize) -> Self {
        Self {
            paths: HashMap::new(),
            generation: 0,
            max_length,
        }
    }

    /// Record the latest positions. A generation change means the simulation
    /// was reset, so every existing trail is stale and gets dropped.
    pub fn record(&mut self, bodies: &[Body], generation: u64) {
        if generation != self.generation {
            self.paths.clear();
            self.generation = generation;
        }

        for body in bodies.iter().filter(|b| !b.is_fixed()) {
            let path = self.paths.entry(body.id()).or_default();
            let moved = path
                .back()
                .map_or(true, |last| last.distance(body.position) >= MIN_SEGMENT);
            if moved {
                path.push_back(body.position);
            }
            while path.len() > self.max_length {
                path.pop_front();
            }
        }
    }

    pub fn path(&self, id: BodyId) -> Option<&VecDeque<Vec3>> {
        self.paths.get(&id)
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }
}
