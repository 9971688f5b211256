// --- File: locomotion.rs ---
// Heading and thrust for every organism. Only head segments receive force;
// the rest of each chain follows through the link solver.
use crate::config::LocomotionConfig;
use crate::constants::{DISTANCE_EPSILON, STEP_PULSE_EXPONENT};
use crate::population::Population;
use crate::rng;
use crate::utils::{step_pulse, wrap_angle};
use glam::Vec2;

/// Per-frame inputs the controller reads from the host, already in arena units.
#[derive(Debug, Clone, Copy)]
pub struct SteeringInputs {
    pub arena: Vec2,
    pub pointer: Option<Vec2>,
    pub pixel_scale: f32,
}

/// Proximity urgency for one organism this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Urgency {
    pub panic: f32,
    pub crowd: f32,
}

pub fn update(pop: &mut Population, config: &LocomotionConfig, inputs: &SteeringInputs, dt: f32) {
    for w in 0..pop.organism_count() {
        update_organism(pop, w, config, inputs, dt);
    }
}

fn update_organism(
    pop: &mut Population,
    w: usize,
    config: &LocomotionConfig,
    inputs: &SteeringInputs,
    dt: f32,
) {
    let mut state = pop.rng_state[w];

    // Gait phase
    pop.step_phase[w] = (pop.step_phase[w] + config.step_hz * dt).rem_euclid(1.0);

    // Micro-pauses stop thrust but not steering.
    if pop.pause_timer[w] > 0.0 {
        pop.pause_timer[w] = (pop.pause_timer[w] - dt).max(0.0);
    } else if rng::draw(&mut state) < config.pause_rate_per_sec * dt {
        pop.pause_timer[w] =
            rng::draw_range(&mut state, config.pause_min_secs, config.pause_max_secs);
    }

    // Correlated random walk on the turn rate.
    let noise = rng::draw_signed(&mut state) * config.wander_noise_scale;
    let blend = (config.wander_damping * dt).min(1.0);
    let mut turn_rate = pop.turn_rate[w] + (noise - pop.turn_rate[w]) * blend;

    let head = pop.head_index(w);
    let head_pos = pop.position[head];
    let mut steer = wall_steering(head_pos, inputs, config);

    let flee = pointer_steering(head_pos, inputs, config);
    steer += flee.0;
    let (peer, crowd) = peer_steering(pop, w, inputs, config);
    steer += peer;
    let urgency = Urgency {
        panic: flee.1,
        crowd,
    };

    let heading = pop.heading[w];
    if steer != Vec2::ZERO {
        let desired = Vec2::from_angle(heading) + steer;
        let desired_heading = desired.y.atan2(desired.x);
        let delta = wrap_angle(desired_heading - heading);
        turn_rate += delta * config.steer_gain * dt;
    }

    turn_rate = turn_rate.clamp(-config.max_turn_rate, config.max_turn_rate);
    let heading = wrap_angle(heading + turn_rate * dt);
    pop.turn_rate[w] = turn_rate;
    pop.heading[w] = heading;
    pop.rng_state[w] = state;

    let thrust = thrust_magnitude(
        pop.step_phase[w],
        pop.pause_timer[w] > 0.0,
        urgency,
        config,
        inputs.pixel_scale,
    );
    if thrust <= 0.0 {
        return;
    }

    let displacement = Vec2::from_angle(heading) * (thrust * dt * dt);
    pop.position[head] += displacement;

    // Second segment lags a touch behind the step.
    if pop.seg_count[w] > 1 {
        pop.prev_position[head + 1] += displacement * config.follow_through;
    }
}

/// Forward acceleration for this frame in arena units per second squared.
pub fn thrust_magnitude(
    step_phase: f32,
    paused: bool,
    urgency: Urgency,
    config: &LocomotionConfig,
    pixel_scale: f32,
) -> f32 {
    if paused {
        return 0.0;
    }
    let pulse = step_pulse(step_phase, STEP_PULSE_EXPONENT);
    let base = config.thrust_px * pixel_scale * (config.thrust_base + config.thrust_pulse * pulse);
    base * (1.0 + urgency.panic * config.panic_boost + urgency.crowd * config.crowd_boost)
}

/// Pushes heads back toward the interior once they come within the wall margin.
fn wall_steering(head: Vec2, inputs: &SteeringInputs, config: &LocomotionConfig) -> Vec2 {
    let margin = config.wall_margin_px * inputs.pixel_scale;
    if margin <= 0.0 {
        return Vec2::ZERO;
    }
    let mut steer = Vec2::ZERO;
    if head.x < margin {
        steer.x += (1.0 - head.x / margin) * config.wall_bias_horizontal;
    } else if head.x > inputs.arena.x - margin {
        steer.x -= (1.0 - (inputs.arena.x - head.x) / margin) * config.wall_bias_horizontal;
    }
    if head.y < margin {
        steer.y += (1.0 - head.y / margin) * config.wall_bias_vertical;
    } else if head.y > inputs.arena.y - margin {
        steer.y -= (1.0 - (inputs.arena.y - head.y) / margin) * config.wall_bias_vertical;
    }
    steer
}

/// Steering away from the pointer and the panic weight that goes with it.
fn pointer_steering(head: Vec2, inputs: &SteeringInputs, config: &LocomotionConfig) -> (Vec2, f32) {
    let Some(pointer) = inputs.pointer else {
        return (Vec2::ZERO, 0.0);
    };
    let radius = config.flee_radius_px * inputs.pixel_scale;
    let away = head - pointer;
    let dist = away.length();
    if dist >= radius {
        return (Vec2::ZERO, 0.0);
    }
    let weight = (1.0 - dist / radius).powi(2);
    let dir = away / (dist + DISTANCE_EPSILON);
    (dir * (weight * config.flee_gain), weight)
}

/// Repulsion from other heads plus a sideways slide so two organisms meeting
/// head-on pass each other. The slide always uses `perp` of the away
/// direction, so the two members of a pair veer to opposite sides.
/// Returns the steering vector and the crowd weight.
fn peer_steering(
    pop: &Population,
    w: usize,
    inputs: &SteeringInputs,
    config: &LocomotionConfig,
) -> (Vec2, f32) {
    let radius = config.peer_radius_px * inputs.pixel_scale;
    if radius <= 0.0 {
        return (Vec2::ZERO, 0.0);
    }
    let head = pop.position[pop.head_index(w)];
    let mut steer = Vec2::ZERO;
    let mut crowd = 0.0f32;

    for other in 0..pop.organism_count() {
        if other == w {
            continue;
        }
        let away = head - pop.position[pop.head_index(other)];
        let dist = away.length();
        if dist >= radius {
            continue;
        }
        let weight = (1.0 - dist / radius).powi(2);
        let dir = away / (dist + DISTANCE_EPSILON);
        steer += dir * (weight * config.peer_gain);
        steer += dir.perp() * (weight * config.peer_slide_gain);
        crowd = crowd.max(weight);
    }
    (steer, crowd)
}

// --- End of File: locomotion.rs ---
