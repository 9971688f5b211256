// --- File: config.rs ---
use crate::constants::*;

/// Tunables for the locomotion controller. Pixel-valued fields are in CSS
/// pixels and get multiplied by the device pixel ratio each frame.
#[derive(Debug, Clone)]
pub struct LocomotionConfig {
    pub step_hz: f32,
    pub pause_rate_per_sec: f32,
    pub pause_min_secs: f32,
    pub pause_max_secs: f32,
    pub wander_noise_scale: f32,
    pub wander_damping: f32,
    pub wall_margin_px: f32,
    pub wall_bias_horizontal: f32,
    pub wall_bias_vertical: f32,
    pub flee_radius_px: f32,
    pub flee_gain: f32,
    pub peer_radius_px: f32,
    pub peer_gain: f32,
    pub peer_slide_gain: f32,
    pub steer_gain: f32,
    pub max_turn_rate: f32,
    // Thrust magnitude, px/s^2. Zero disables forward motion entirely.
    pub thrust_px: f32,
    pub thrust_base: f32,
    pub thrust_pulse: f32,
    pub panic_boost: f32,
    pub crowd_boost: f32,
    pub follow_through: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            step_hz: STEP_HZ,
            pause_rate_per_sec: PAUSE_RATE_PER_SEC,
            pause_min_secs: PAUSE_MIN_SECS,
            pause_max_secs: PAUSE_MAX_SECS,
            wander_noise_scale: WANDER_NOISE_SCALE,
            wander_damping: WANDER_DAMPING,
            wall_margin_px: WALL_MARGIN_PX,
            wall_bias_horizontal: WALL_BIAS_HORIZONTAL,
            wall_bias_vertical: WALL_BIAS_VERTICAL,
            flee_radius_px: FLEE_RADIUS_PX,
            flee_gain: FLEE_GAIN,
            peer_radius_px: PEER_RADIUS_PX,
            peer_gain: PEER_GAIN,
            peer_slide_gain: PEER_SLIDE_GAIN,
            steer_gain: STEER_GAIN,
            max_turn_rate: MAX_TURN_RATE,
            thrust_px: THRUST_PX,
            thrust_base: THRUST_BASE,
            thrust_pulse: THRUST_PULSE,
            panic_boost: PANIC_BOOST,
            crowd_boost: CROWD_BOOST,
            follow_through: FOLLOW_THROUGH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub velocity_damping: f32,
    pub squash_decay: f32,
    pub link_wave_amplitude: f32,
    pub link_wave_phase_step: f32,
    pub link_weight_head: f32,
    pub link_weight_tail: f32,
    pub link_passes: usize,
    pub collision_passes: usize,
    // Distance kept clear along every arena edge, in arena units.
    pub boundary_inset: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            velocity_damping: VELOCITY_DAMPING,
            squash_decay: SQUASH_DECAY,
            link_wave_amplitude: LINK_WAVE_AMPLITUDE,
            link_wave_phase_step: LINK_WAVE_PHASE_STEP,
            link_weight_head: LINK_WEIGHT_HEAD,
            link_weight_tail: LINK_WEIGHT_TAIL,
            link_passes: LINK_PASSES,
            collision_passes: COLLISION_PASSES,
            boundary_inset: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SwarmConfig {
    pub locomotion: LocomotionConfig,
    pub solver: SolverConfig,
    pub max_frame_dt: f32,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            locomotion: LocomotionConfig::default(),
            solver: SolverConfig::default(),
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl SwarmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as `new()` but with forward thrust disabled. Steering still runs.
    pub fn without_thrust() -> Self {
        let mut config = Self::new();
        config.locomotion.thrust_px = 0.0;
        config
    }
}
// --- End of File: config.rs ---
