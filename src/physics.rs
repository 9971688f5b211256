// --- File: physics.rs ---
// Position-based solver passes over the flat segment buffers. Each pass is a
// free function so the frame loop controls ordering and pass counts.
use crate::config::SolverConfig;
use crate::constants::DISTANCE_EPSILON;
use crate::population::Population;
use glam::Vec2;
use std::f32::consts::TAU;

/// Verlet step for every segment. Velocity is implicit in `position - prev_position`.
pub fn integrate(pop: &mut Population, damping: f32) {
    for (pos, prev) in pop.position.iter_mut().zip(pop.prev_position.iter_mut()) {
        let velocity = (*pos - *prev) * damping;
        *prev = *pos;
        *pos += velocity;
    }
}

pub fn decay_squash(pop: &mut Population, decay: f32) {
    for squash in pop.squash.iter_mut() {
        *squash *= decay;
    }
}

/// Rest length between segment `a` and `a + 1`: the base link distance riding a
/// small wave that travels down the body with the organism's gait phase.
#[inline]
pub fn rest_length(link_distance: f32, config: &SolverConfig, step_phase: f32, a: usize) -> f32 {
    let wave = (step_phase * TAU - a as f32 * config.link_wave_phase_step).sin();
    link_distance * (1.0 + config.link_wave_amplitude * wave)
}

/// Share of each link correction taken by the leading segment. Ramps from
/// `link_weight_head` at the first link to `link_weight_tail` at the last.
#[inline]
pub fn lead_weight(config: &SolverConfig, a: usize, links: usize) -> f32 {
    let t = if links > 1 {
        a as f32 / (links - 1) as f32
    } else {
        0.0
    };
    config.link_weight_head + (config.link_weight_tail - config.link_weight_head) * t
}

/// One relaxation pass over every chain link. Each link is fully closed, with
/// the leading segment moving by `lead_weight` of the gap and the trailing one
/// taking the rest.
pub fn solve_links(pop: &mut Population, config: &SolverConfig) {
    for w in 0..pop.organism_count() {
        let range = pop.segments_of(w);
        let links = range.len().saturating_sub(1);
        if links == 0 {
            continue;
        }
        let phase = pop.step_phase[w];
        for a in 0..links {
            let i = range.start + a;
            let j = i + 1;
            let delta = pop.position[j] - pop.position[i];
            let dist = delta.length();
            let rest = rest_length(pop.link_distance, config, phase, a);
            let dir = delta / (dist + DISTANCE_EPSILON);
            let gap = dist - rest;
            let lead = lead_weight(config, a, links);
            pop.position[i] += dir * (gap * lead);
            pop.position[j] -= dir * (gap * (1.0 - lead));
        }
    }
}

/// Pairwise overlap resolution across the whole population. Linked neighbours
/// in the same chain are skipped. Returns the number of overlapping pairs found.
pub fn resolve_collisions(pop: &mut Population) -> usize {
    let n = pop.segment_count();
    let mut contacts = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            if pop.owner[i] == pop.owner[j]
                && pop.index_in_owner[i].abs_diff(pop.index_in_owner[j]) <= 1
            {
                continue;
            }
            let reach = pop.radius[i] + pop.radius[j];
            let delta = pop.position[j] - pop.position[i];
            let dist_sq = delta.length_squared();
            if dist_sq >= reach * reach {
                continue;
            }
            let dist = dist_sq.sqrt();
            let overlap = reach - dist;
            let normal = if dist > DISTANCE_EPSILON {
                delta / (dist + DISTANCE_EPSILON)
            } else {
                // Coincident centres: separate along x.
                Vec2::X
            };
            let push = normal * (overlap * 0.5);
            pop.position[i] -= push;
            pop.position[j] += push;

            let impact = overlap / reach;
            pop.squash[i] = pop.squash[i].max(impact);
            pop.squash[j] = pop.squash[j].max(impact);
            contacts += 1;
        }
    }
    contacts
}

/// Clamps every segment inside the arena. A clamped coordinate also gets its
/// history overwritten, so the segment stops at the wall instead of bouncing.
pub fn enforce_bounds(pop: &mut Population, arena: Vec2, inset: f32) {
    for i in 0..pop.segment_count() {
        let r = pop.radius[i];
        let min = Vec2::splat(inset + r);
        let max = arena - Vec2::splat(inset + r);
        let pos = pop.position[i];
        let prev = &mut pop.prev_position[i];

        let x = clamp_axis(pos.x, min.x, max.x, arena.x);
        if x != pos.x {
            prev.x = x;
        }
        let y = clamp_axis(pos.y, min.y, max.y, arena.y);
        if y != pos.y {
            prev.y = y;
        }
        pop.position[i] = Vec2::new(x, y);
    }
}

#[inline]
fn clamp_axis(value: f32, min: f32, max: f32, extent: f32) -> f32 {
    if min <= max {
        value.clamp(min, max)
    } else {
        // Arena narrower than the segment: pin to the middle.
        extent * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::OrganismPlacement;

    fn single(head: Vec2) -> OrganismPlacement {
        OrganismPlacement {
            head,
            heading: 0.0,
            segments: 1,
        }
    }

    #[test]
    fn integrate_damps_implicit_velocity() {
        let mut pop =
            Population::from_placements(800.0, 600.0, 10.0, 1, &[single(Vec2::new(100.0, 100.0))])
                .unwrap();
        pop.prev_position[0] = Vec2::new(90.0, 100.0);
        integrate(&mut pop, 0.88);
        assert_eq!(pop.prev_position[0], Vec2::new(100.0, 100.0));
        assert!((pop.position[0].x - 108.8).abs() < 1e-4);
        assert_eq!(pop.position[0].y, 100.0);
    }

    #[test]
    fn integrate_is_axis_symmetric() {
        let mut pop =
            Population::from_placements(800.0, 600.0, 10.0, 1, &[single(Vec2::new(200.0, 200.0))])
                .unwrap();
        pop.prev_position[0] = Vec2::new(195.0, 195.0);
        integrate(&mut pop, 0.88);
        let moved = pop.position[0] - Vec2::new(200.0, 200.0);
        assert!((moved.x - moved.y).abs() < 1e-5);
    }

    #[test]
    fn collision_separates_overlapping_singles() {
        let mut pop = Population::from_placements(
            800.0,
            600.0,
            10.0,
            1,
            &[single(Vec2::new(400.0, 300.0)), single(Vec2::new(401.0, 300.0))],
        )
        .unwrap();
        let contacts = resolve_collisions(&mut pop);
        assert_eq!(contacts, 1);
        let d = pop.position[0].distance(pop.position[1]);
        assert!((d - 20.0).abs() < 1e-2, "distance after one pass: {d}");
        assert!((pop.squash[0] - 0.95).abs() < 1e-4);
        assert_eq!(pop.squash[0], pop.squash[1]);
    }

    #[test]
    fn collision_never_lowers_squash() {
        let mut pop = Population::from_placements(
            800.0,
            600.0,
            10.0,
            1,
            &[single(Vec2::new(400.0, 300.0)), single(Vec2::new(415.0, 300.0))],
        )
        .unwrap();
        pop.squash[0] = 0.9;
        resolve_collisions(&mut pop);
        assert_eq!(pop.squash[0], 0.9);
        assert!((pop.squash[1] - 0.25).abs() < 1e-4);
    }

    #[test]
    fn coincident_segments_do_not_produce_nan() {
        let mut pop = Population::from_placements(
            800.0,
            600.0,
            10.0,
            1,
            &[single(Vec2::new(300.0, 300.0)), single(Vec2::new(300.0, 300.0))],
        )
        .unwrap();
        resolve_collisions(&mut pop);
        assert!(pop.position.iter().all(|p| p.is_finite()));
        assert!(pop.position[0].distance(pop.position[1]) > 19.0);
    }

    #[test]
    fn linked_neighbours_are_not_collided() {
        let mut pop = Population::from_placements(
            800.0,
            600.0,
            10.0,
            1,
            &[OrganismPlacement {
                head: Vec2::new(400.0, 300.0),
                heading: 0.0,
                segments: 4,
            }],
        )
        .unwrap();
        // Link spacing (18.5) is below the radius sum of neighbours.
        let before = pop.position.clone();
        assert_eq!(resolve_collisions(&mut pop), 0);
        assert_eq!(before, pop.position);
    }

    #[test]
    fn links_move_toward_rest_length() {
        let mut pop = Population::from_placements(
            800.0,
            600.0,
            10.0,
            1,
            &[OrganismPlacement {
                head: Vec2::new(400.0, 300.0),
                heading: 0.0,
                segments: 5,
            }],
        )
        .unwrap();
        // Stretch the tail away.
        pop.position[4].x -= 12.0;
        let config = SolverConfig::default();
        let error = |pop: &Population| -> f32 {
            (0..4)
                .map(|a| {
                    let rest = rest_length(pop.link_distance, &config, pop.step_phase[0], a);
                    (pop.position[a].distance(pop.position[a + 1]) - rest).abs()
                })
                .sum()
        };
        let before = error(&pop);
        for _ in 0..config.link_passes {
            solve_links(&mut pop, &config);
        }
        assert!(error(&pop) < before * 0.1);
    }

    #[test]
    fn head_moves_less_than_tail_on_link_correction() {
        let config = SolverConfig::default();
        assert!(lead_weight(&config, 0, 4) < lead_weight(&config, 3, 4));
        assert!((lead_weight(&config, 0, 4) - 0.18).abs() < 1e-6);
        assert!((lead_weight(&config, 3, 4) - 0.40).abs() < 1e-6);
    }

    #[test]
    fn bounds_clamp_and_kill_velocity() {
        let mut pop =
            Population::from_placements(800.0, 600.0, 10.0, 1, &[single(Vec2::new(400.0, 300.0))])
                .unwrap();
        pop.position[0] = Vec2::new(-5.0, 300.0);
        pop.prev_position[0] = Vec2::new(3.0, 298.0);
        enforce_bounds(&mut pop, Vec2::new(800.0, 600.0), 0.0);
        assert_eq!(pop.position[0].x, 10.0);
        assert_eq!(pop.prev_position[0].x, 10.0);
        // untouched axis keeps its history
        assert_eq!(pop.prev_position[0].y, 298.0);
    }

    #[test]
    fn squash_decays_geometrically() {
        let mut pop =
            Population::from_placements(800.0, 600.0, 10.0, 1, &[single(Vec2::new(400.0, 300.0))])
                .unwrap();
        pop.squash[0] = 0.8;
        for _ in 0..5 {
            decay_squash(&mut pop, 0.86);
        }
        assert!((pop.squash[0] - 0.8 * 0.86f32.powi(5)).abs() < 1e-6);
    }
}
// --- End of File: physics.rs ---
