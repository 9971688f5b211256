// --- File: utils.rs ---
use crate::constants::PALETTE_SIZE;
use glam::Vec4;
use rand::Rng;
use std::f32::consts::{PI, TAU};

// --- Helper Functions ---

pub type Palette = [[f32; 4]; PALETTE_SIZE];

pub const DEFAULT_PALETTE: Palette = [
    [0.95, 0.55, 0.45, 1.0],
    [0.98, 0.78, 0.42, 1.0],
    [0.62, 0.85, 0.52, 1.0],
    [0.42, 0.80, 0.78, 1.0],
    [0.45, 0.62, 0.95, 1.0],
    [0.70, 0.52, 0.92, 1.0],
    [0.93, 0.52, 0.78, 1.0],
    [0.85, 0.85, 0.80, 1.0],
];

/// Wraps an angle into `[-PI, PI]`.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can land exactly on TAU for tiny negative inputs
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Bursty gait envelope: triangle wave over the phase, smoothed, then sharpened.
/// Peaks at 1.0 mid-phase and is 0.0 at the phase boundaries.
#[inline]
pub fn step_pulse(phase: f32, exponent: f32) -> f32 {
    let tri = 1.0 - (2.0 * phase.rem_euclid(1.0) - 1.0).abs();
    smoothstep(tri).powf(exponent)
}

// mutate_color
pub fn mutate_color<R: Rng + ?Sized>(base_color: Vec4, rng: &mut R, max_delta: f32) -> Vec4 {
    let r_delta = rng.gen_range(-max_delta..max_delta);
    let g_delta = rng.gen_range(-max_delta..max_delta);
    let b_delta = rng.gen_range(-max_delta..max_delta);
    let new_r = (base_color.x + r_delta).clamp(0.0, 1.0);
    let new_g = (base_color.y + g_delta).clamp(0.0, 1.0);
    let new_b = (base_color.z + b_delta).clamp(0.0, 1.0);
    Vec4::new(new_r, new_g, new_b, base_color.w)
}

/// A per-session variant of the default palette, so restarts look a little different.
pub fn jittered_palette<R: Rng + ?Sized>(rng: &mut R, max_delta: f32) -> Palette {
    let mut palette = DEFAULT_PALETTE;
    for color in palette.iter_mut() {
        *color = mutate_color(Vec4::from(*color), rng, max_delta).to_array();
    }
    palette
}

// --- End of File: utils.rs ---
