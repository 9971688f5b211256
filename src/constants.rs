// --- File: constants.rs ---
// --- Global Simulation Constants ---

// Window / host
pub const WINDOW_WIDTH: u32 = 1024;
pub const WINDOW_HEIGHT: u32 = 768;
pub const BACKGROUND_COLOR: [f64; 4] = [0.04, 0.05, 0.07, 1.0];
pub const FPS_UPDATE_INTERVAL_SECS: f64 = 1.0;
pub const BASE_SEGMENT_RADIUS: f32 = 7.0; // CSS pixels, multiplied by DPR by the host

// Frame timing
pub const MAX_FRAME_DT: f32 = 0.033; // ~30fps floor
pub const VISUAL_ASSUMED_FPS: f32 = 60.0;

// Population
pub const MIN_ORGANISMS: usize = 24;
pub const MAX_ORGANISMS: usize = 56;
pub const AREA_PER_ORGANISM_RADII_SQ: f32 = 900.0; // area per organism, in base_radius^2 units
pub const SINGLE_SEGMENT_PROBABILITY: f32 = 0.22;
pub const MIN_BODY_SEGMENTS: u8 = 4;
pub const MAX_BODY_SEGMENTS: u8 = 9;
pub const LINK_DISTANCE_FACTOR: f32 = 1.85;
pub const RADIUS_TAPER: f32 = 0.18; // tail radius = base * (1 - taper)
pub const SPAWN_MARGIN: f32 = 6.0;
pub const PALETTE_SIZE: usize = 8;

// Gait
pub const STEP_HZ: f32 = 3.4;
pub const PAUSE_RATE_PER_SEC: f32 = 0.35;
pub const PAUSE_MIN_SECS: f32 = 0.04;
pub const PAUSE_MAX_SECS: f32 = 0.18;
pub const STEP_PULSE_EXPONENT: f32 = 2.2;

// Steering
pub const WANDER_NOISE_SCALE: f32 = 2.0;
pub const WANDER_DAMPING: f32 = 8.5;
pub const WALL_MARGIN_PX: f32 = 120.0;
pub const WALL_BIAS_HORIZONTAL: f32 = 1.0; // left/right walls
pub const WALL_BIAS_VERTICAL: f32 = 0.75; // top/bottom walls, gentler
pub const FLEE_RADIUS_PX: f32 = 260.0;
pub const FLEE_GAIN: f32 = 2.4;
pub const PEER_RADIUS_PX: f32 = 220.0;
pub const PEER_GAIN: f32 = 1.3;
pub const PEER_SLIDE_GAIN: f32 = 0.45;
pub const STEER_GAIN: f32 = 6.5;
pub const MAX_TURN_RATE: f32 = 2.1;

// Thrust
pub const THRUST_PX: f32 = 420.0;
pub const THRUST_BASE: f32 = 0.30;
pub const THRUST_PULSE: f32 = 1.05;
pub const PANIC_BOOST: f32 = 0.85;
pub const CROWD_BOOST: f32 = 0.22;
pub const FOLLOW_THROUGH: f32 = 0.3;

// Physics
pub const VELOCITY_DAMPING: f32 = 0.88;
pub const SQUASH_DECAY: f32 = 0.86;
pub const LINK_WAVE_AMPLITUDE: f32 = 0.05;
pub const LINK_WAVE_PHASE_STEP: f32 = 0.85;
pub const LINK_WEIGHT_HEAD: f32 = 0.18;
pub const LINK_WEIGHT_TAIL: f32 = 0.40;
pub const LINK_PASSES: usize = 6;
pub const COLLISION_PASSES: usize = 2;
pub const DISTANCE_EPSILON: f32 = 1e-4;

// Visual mapping
pub const STRETCH_PER_SPEED: f32 = 0.0011;
pub const MAX_STRETCH: f32 = 0.38;
pub const SQUASH_LONG_AXIS: f32 = 0.22;
pub const SQUASH_SHORT_AXIS: f32 = 0.35;
pub const ORIENT_MIN_SPEED: f32 = 2.0;
// --- End of File: constants.rs ---
