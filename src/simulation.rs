// --- File: simulation.rs ---
use crate::config::SwarmConfig;
use crate::error::SwarmError;
use crate::locomotion::{self, SteeringInputs};
use crate::physics;
use crate::population::{OrganismPlacement, Population};
use crate::utils::Palette;
use crate::visual::{self, DrawTarget};
use glam::Vec2;
use std::cell::Cell;

/// Latest pointer reading from the host, in arena units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    pub in_bounds: bool,
}

/// Read-only host inputs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub arena: Vec2,
    pub pointer: Option<PointerSample>,
    pub device_pixel_ratio: f32,
    pub reduced_motion: bool,
}

impl FrameContext {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            arena: Vec2::new(width, height),
            pointer: None,
            device_pixel_ratio: 1.0,
            reduced_motion: false,
        }
    }

    pub fn with_pointer(mut self, position: Vec2) -> Self {
        self.pointer = Some(PointerSample {
            position,
            in_bounds: true,
        });
        self
    }

    #[inline]
    fn pixel_scale(&self) -> f32 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        }
    }

    #[inline]
    fn active_pointer(&self) -> Option<Vec2> {
        self.pointer
            .filter(|p| p.in_bounds && p.position.is_finite())
            .map(|p| p.position)
    }
}

#[derive(Debug, Clone, Copy)]
struct InitParams {
    width: f32,
    height: f32,
    base_radius: f32,
}

/// The whole simulation: owns the population buffers and runs the frame loop.
/// Entry points are no-ops until `initialize` has succeeded.
pub struct Swarm {
    population: Option<Population>,
    pub config: SwarmConfig,
    params: Option<InitParams>,
    seed: u64,
    is_paused: bool,
    frames: u64,
    // Reported once per missing population.
    missing_state_reported: Cell<bool>,
}

impl Default for Swarm {
    fn default() -> Self {
        Self::new(SwarmConfig::new())
    }
}

impl Swarm {
    pub fn new(config: SwarmConfig) -> Self {
        Self {
            population: None,
            config,
            params: None,
            seed: 0,
            is_paused: false,
            frames: 0,
            missing_state_reported: Cell::new(false),
        }
    }

    /// (Re)allocates every buffer for a fresh population. On invalid input the
    /// previous population is dropped and the swarm stays empty.
    pub fn initialize(
        &mut self,
        width: f32,
        height: f32,
        base_radius: f32,
        seed: u64,
    ) -> Result<(), SwarmError> {
        self.population = None;
        let population = Population::new(width, height, base_radius, seed)?;
        self.install(population, width, height, base_radius, seed);
        Ok(())
    }

    /// Like `initialize`, but with hand-placed organisms.
    pub fn initialize_with(
        &mut self,
        width: f32,
        height: f32,
        base_radius: f32,
        seed: u64,
        placements: &[OrganismPlacement],
    ) -> Result<(), SwarmError> {
        self.population = None;
        let population = Population::from_placements(width, height, base_radius, seed, placements)?;
        self.install(population, width, height, base_radius, seed);
        Ok(())
    }

    fn install(&mut self, population: Population, width: f32, height: f32, base_radius: f32, seed: u64) {
        log::info!(
            "Initialized swarm: {} organisms, {} segments in {:.0}x{:.0} (seed {})",
            population.organism_count(),
            population.segment_count(),
            width,
            height,
            seed
        );
        self.population = Some(population);
        self.params = Some(InitParams {
            width,
            height,
            base_radius,
        });
        self.seed = seed;
        self.frames = 0;
        self.missing_state_reported.set(false);
    }

    fn report_missing_state(&self, entry: &str) {
        if !self.missing_state_reported.replace(true) {
            log::warn!("Skipping {}: swarm has no population", entry);
        }
    }

    /// Advances one frame. `dt` is clamped to `config.max_frame_dt`.
    pub fn update(&mut self, dt: f32, ctx: &FrameContext) {
        if self.is_paused {
            return;
        }
        if self.population.is_none() {
            self.report_missing_state("update");
            return;
        }
        let Some(pop) = self.population.as_mut() else {
            return;
        };
        if !(ctx.arena.x > 0.0 && ctx.arena.y > 0.0) || !ctx.arena.is_finite() {
            log::warn!("Skipping update: degenerate arena {:?}", ctx.arena);
            return;
        }
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.max_frame_dt)
        } else {
            0.0
        };
        let solver = &self.config.solver;

        if ctx.reduced_motion {
            physics::decay_squash(pop, solver.squash_decay);
            physics::enforce_bounds(pop, ctx.arena, solver.boundary_inset);
            self.frames += 1;
            return;
        }

        let inputs = SteeringInputs {
            arena: ctx.arena,
            pointer: ctx.active_pointer(),
            pixel_scale: ctx.pixel_scale(),
        };
        locomotion::update(pop, &self.config.locomotion, &inputs, dt);
        physics::integrate(pop, solver.velocity_damping);
        physics::decay_squash(pop, solver.squash_decay);

        for _ in 0..solver.link_passes {
            physics::solve_links(pop, solver);
            physics::enforce_bounds(pop, ctx.arena, solver.boundary_inset);
        }
        for _ in 0..solver.collision_passes {
            physics::resolve_collisions(pop);
            physics::enforce_bounds(pop, ctx.arena, solver.boundary_inset);
        }
        self.frames += 1;
    }

    /// Draws every segment. Does not touch simulation state.
    pub fn render<T: DrawTarget + ?Sized>(&self, palette: &Palette, target: &mut T) {
        let Some(pop) = self.population.as_ref() else {
            self.report_missing_state("render");
            return;
        };
        visual::draw_population(pop, palette, target);
    }

    /// Reinitializes with the last arena and radius.
    pub fn restart(&mut self, seed: u64) -> Result<(), SwarmError> {
        log::debug!("Restarting swarm with seed {}", seed);
        let Some(params) = self.params else {
            log::warn!("Restart requested before initialize; ignoring");
            return Ok(());
        };
        self.is_paused = false;
        self.initialize(params.width, params.height, params.base_radius, seed)
    }

    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
        log::debug!(
            "Swarm {}",
            if self.is_paused { "paused" } else { "resumed" }
        );
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn population(&self) -> Option<&Population> {
        self.population.as_ref()
    }

    pub fn population_mut(&mut self) -> Option<&mut Population> {
        self.population.as_mut()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// (organisms, segments), zero before initialization.
    pub fn counts(&self) -> (usize, usize) {
        self.population
            .as_ref()
            .map(|p| (p.organism_count(), p.segment_count()))
            .unwrap_or((0, 0))
    }
}

// --- End of File: simulation.rs ---
