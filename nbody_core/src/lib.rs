//! Physics core for the slingshot N-body simulator
//!
//! The core is split the same way the frame loop uses it:
//! - [`forces`] computes the net gravitational force on every body
//! - [`integrator`] advances a snapshot of bodies by one time step
//! - [`state`] owns the current snapshot, configuration and pending events
//!
//! Everything here is single-threaded and pure apart from [`state::Simulation`],
//! which is the one mutable "current state" the host replaces every frame.

pub mod body;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod presets;
pub mod state;

pub use body::{Body, BodyId, BodyTraits};
pub use config::SimConfig;
pub use error::{InvalidBodyError, SimError};
pub use forces::compute_forces;
pub use integrator::step;
pub use presets::Preset;
pub use state::{FrameReport, SimEvent, Simulation};
