//! Segmented crawler swarm: a self-contained 2D simulation of small chained
//! organisms that step, wander, flee the pointer and avoid each other.
//!
//! The host calls [`Swarm::initialize`] once (and again on resize), then
//! [`Swarm::update`] and [`Swarm::render`] every display frame.

pub mod config;
pub mod constants;
pub mod error;
pub mod locomotion;
pub mod physics;
pub mod population;
pub mod rng;
pub mod simulation;
pub mod utils;
pub mod visual;

pub use config::{LocomotionConfig, SolverConfig, SwarmConfig};
pub use error::SwarmError;
pub use population::{OrganismPlacement, Population};
pub use simulation::{FrameContext, PointerSample, Swarm};
pub use utils::{DEFAULT_PALETTE, Palette};
pub use visual::{DrawTarget, SegmentSprite};
