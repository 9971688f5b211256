// --- File: rng.rs ---
// Per-organism linear congruential generator. Every organism owns one u32 of
// state and threads it through each draw, so organisms never share a stream.

const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;
const UNIT_SCALE: f32 = 1.0 / (1u32 << 24) as f32;

/// Advances `state` once. Returns the new state and a value in `[0, 1)`.
#[inline]
pub fn next(state: u32) -> (u32, f32) {
    let state = state
        .wrapping_mul(LCG_MULTIPLIER)
        .wrapping_add(LCG_INCREMENT);
    // Low bits of an LCG cycle with short periods; take the top 24.
    (state, (state >> 8) as f32 * UNIT_SCALE)
}

#[inline]
pub fn draw(state: &mut u32) -> f32 {
    let (advanced, value) = next(*state);
    *state = advanced;
    value
}

#[inline]
pub fn draw_range(state: &mut u32, min: f32, max: f32) -> f32 {
    min + (max - min) * draw(state)
}

/// Uniform value in `[-1, 1)`.
#[inline]
pub fn draw_signed(state: &mut u32) -> f32 {
    draw(state) * 2.0 - 1.0
}

/// Uniform integer in `[min, max]` (inclusive).
#[inline]
pub fn draw_int(state: &mut u32, min: u32, max: u32) -> u32 {
    let span = (max - min + 1) as f32;
    min + ((draw(state) * span) as u32).min(max - min)
}

/// Derives an organism's initial LCG state from the population seed and its
/// index. Depends on nothing else, so a seed replays exactly.
pub fn organism_seed(seed: u64, index: usize) -> u32 {
    // splitmix64 finalizer
    let mut z = seed
        .wrapping_add((index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    (z ^ (z >> 32)) as u32
}

// --- End of File: rng.rs ---
