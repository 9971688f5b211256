// --- File: population.rs ---
use crate::constants::*;
use crate::error::SwarmError;
use crate::rng;
use glam::Vec2;
use std::f32::consts::PI;

/// Where to put one organism when building a population by hand.
#[derive(Debug, Clone, Copy)]
pub struct OrganismPlacement {
    pub head: Vec2,
    pub heading: f32,
    pub segments: u8,
}

/// Structure-of-arrays state for every organism and every segment.
///
/// Organism `w` owns segments `start_index[w] .. start_index[w] + seg_count[w]`;
/// the first of those is its head. Buffers are sized once at construction and
/// only mutated in place afterwards.
#[derive(Debug, Clone)]
pub struct Population {
    // Per organism
    pub seg_count: Vec<u8>,
    pub start_index: Vec<u16>,
    pub heading: Vec<f32>,
    pub turn_rate: Vec<f32>,
    pub step_phase: Vec<f32>,
    pub pause_timer: Vec<f32>,
    pub rng_state: Vec<u32>,
    pub color_index: Vec<u8>,

    // Per segment
    pub position: Vec<Vec2>,
    pub prev_position: Vec<Vec2>,
    pub radius: Vec<f32>,
    pub owner: Vec<u8>,
    pub index_in_owner: Vec<u8>,
    pub squash: Vec<f32>,

    pub base_radius: f32,
    pub link_distance: f32,
}

impl Population {
    /// Sizes and places a population for the given arena. Organism count grows
    /// with arena area but never drops below `MIN_ORGANISMS`.
    pub fn new(width: f32, height: f32, base_radius: f32, seed: u64) -> Result<Self, SwarmError> {
        validate_arena(width, height, base_radius)?;

        let count = organism_count_for(width, height, base_radius);
        let link_distance = base_radius * LINK_DISTANCE_FACTOR;
        let mut placements = Vec::with_capacity(count);
        let mut states = Vec::with_capacity(count);

        for w in 0..count {
            let mut state = rng::organism_seed(seed, w);
            let segments = if rng::draw(&mut state) < SINGLE_SEGMENT_PROBABILITY {
                1
            } else {
                rng::draw_int(&mut state, MIN_BODY_SEGMENTS as u32, MAX_BODY_SEGMENTS as u32) as u8
            };
            let heading = rng::draw_range(&mut state, -PI, PI);

            // Keep the whole chain inside the spawn margin whatever the heading.
            let reach = link_distance * (segments as f32 - 1.0) + base_radius + SPAWN_MARGIN;
            let head = Vec2::new(
                spawn_coordinate(&mut state, width, reach),
                spawn_coordinate(&mut state, height, reach),
            );

            placements.push(OrganismPlacement {
                head,
                heading,
                segments,
            });
            states.push(state);
        }

        let mut population = Self::build(width, height, base_radius, &placements, &states)?;
        for (w, state) in states.iter().enumerate() {
            let mut state = *state;
            population.color_index[w] = rng::draw_int(&mut state, 0, PALETTE_SIZE as u32 - 1) as u8;
            population.step_phase[w] = rng::draw(&mut state);
            population.rng_state[w] = state;
        }
        Ok(population)
    }

    /// Builds a population from explicit placements. Organism RNG states are
    /// still derived from `seed`.
    pub fn from_placements(
        width: f32,
        height: f32,
        base_radius: f32,
        seed: u64,
        placements: &[OrganismPlacement],
    ) -> Result<Self, SwarmError> {
        validate_arena(width, height, base_radius)?;
        let states: Vec<u32> = (0..placements.len())
            .map(|w| rng::organism_seed(seed, w))
            .collect();
        let mut population = Self::build(width, height, base_radius, placements, &states)?;
        for w in 0..population.organism_count() {
            population.color_index[w] = (w % PALETTE_SIZE) as u8;
        }
        Ok(population)
    }

    fn build(
        width: f32,
        height: f32,
        base_radius: f32,
        placements: &[OrganismPlacement],
        states: &[u32],
    ) -> Result<Self, SwarmError> {
        if placements.len() > u8::MAX as usize + 1 {
            return Err(SwarmError::TooManyOrganisms(placements.len()));
        }
        for (index, placement) in placements.iter().enumerate() {
            let valid = placement.segments == 1
                || (MIN_BODY_SEGMENTS..=MAX_BODY_SEGMENTS).contains(&placement.segments);
            if !valid {
                return Err(SwarmError::InvalidSegmentCount {
                    index,
                    segments: placement.segments,
                });
            }
        }

        let organisms = placements.len();
        let total: usize = placements.iter().map(|p| p.segments as usize).sum();
        let link_distance = base_radius * LINK_DISTANCE_FACTOR;

        let mut population = Self {
            seg_count: Vec::with_capacity(organisms),
            start_index: Vec::with_capacity(organisms),
            heading: Vec::with_capacity(organisms),
            turn_rate: vec![0.0; organisms],
            step_phase: vec![0.0; organisms],
            pause_timer: vec![0.0; organisms],
            rng_state: states.to_vec(),
            color_index: vec![0; organisms],
            position: Vec::with_capacity(total),
            prev_position: Vec::with_capacity(total),
            radius: Vec::with_capacity(total),
            owner: Vec::with_capacity(total),
            index_in_owner: Vec::with_capacity(total),
            squash: vec![0.0; total],
            base_radius,
            link_distance,
        };

        for (w, placement) in placements.iter().enumerate() {
            let start = population.position.len();
            let n = placement.segments;
            population.seg_count.push(n);
            population.start_index.push(start as u16);
            population.heading.push(placement.heading);

            // Body trails straight out behind the head.
            let back = -Vec2::from_angle(placement.heading);
            for k in 0..n {
                let r = segment_radius(base_radius, k, n);
                let margin = r + SPAWN_MARGIN;
                let raw = placement.head + back * (link_distance * k as f32);
                let p = Vec2::new(
                    clamp_or_center(raw.x, margin, width),
                    clamp_or_center(raw.y, margin, height),
                );
                population.position.push(p);
                population.prev_position.push(p);
                population.radius.push(r);
                population.owner.push(w as u8);
                population.index_in_owner.push(k);
            }
        }

        log::debug!(
            "Built population: {} organisms, {} segments, link distance {:.2}",
            organisms,
            total,
            link_distance
        );
        Ok(population)
    }

    #[inline]
    pub fn organism_count(&self) -> usize {
        self.seg_count.len()
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.position.len()
    }

    /// Segment index range owned by organism `w`.
    #[inline]
    pub fn segments_of(&self, w: usize) -> std::ops::Range<usize> {
        let start = self.start_index[w] as usize;
        start..start + self.seg_count[w] as usize
    }

    #[inline]
    pub fn head_index(&self, w: usize) -> usize {
        self.start_index[w] as usize
    }
}

pub fn organism_count_for(width: f32, height: f32, base_radius: f32) -> usize {
    let per_organism = base_radius * base_radius * AREA_PER_ORGANISM_RADII_SQ;
    let by_area = (width * height / per_organism) as usize;
    by_area.clamp(MIN_ORGANISMS, MAX_ORGANISMS)
}

/// Head segment keeps the base radius; the tail is `RADIUS_TAPER` smaller.
#[inline]
pub fn segment_radius(base_radius: f32, index: u8, segments: u8) -> f32 {
    if segments <= 1 {
        return base_radius;
    }
    let t = index as f32 / (segments - 1) as f32;
    base_radius * (1.0 - RADIUS_TAPER * t)
}

fn validate_arena(width: f32, height: f32, base_radius: f32) -> Result<(), SwarmError> {
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        return Err(SwarmError::InvalidArena { width, height });
    }
    if !(base_radius > 0.0 && base_radius.is_finite()) {
        return Err(SwarmError::InvalidRadius(base_radius));
    }
    Ok(())
}

fn spawn_coordinate(state: &mut u32, extent: f32, reach: f32) -> f32 {
    if extent > 2.0 * reach {
        rng::draw_range(state, reach, extent - reach)
    } else {
        extent * 0.5
    }
}

fn clamp_or_center(value: f32, margin: f32, extent: f32) -> f32 {
    if extent > 2.0 * margin {
        value.clamp(margin, extent - margin)
    } else {
        extent * 0.5
    }
}

// --- End of File: population.rs ---
