// --- File: visual.rs ---
use crate::constants::*;
use crate::population::Population;
use crate::utils::Palette;
use glam::Vec2;

/// One ellipse to draw: a segment's circle after squash-and-stretch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSprite {
    pub center: Vec2,
    pub radius: f32,
    /// Non-uniform scale along (local x, local y); local x follows `rotation`.
    pub scale: Vec2,
    pub rotation: f32,
    pub color: [f32; 4],
}

impl SegmentSprite {
    /// Semi-axes in arena units.
    #[inline]
    pub fn radii(&self) -> Vec2 {
        self.scale * self.radius
    }
}

/// Anything that can fill rotated, non-uniformly scaled circles.
pub trait DrawTarget {
    fn fill_ellipse(&mut self, sprite: &SegmentSprite);
}

impl DrawTarget for Vec<SegmentSprite> {
    fn fill_ellipse(&mut self, sprite: &SegmentSprite) {
        self.push(*sprite);
    }
}

/// Stretch, squash and orientation derived from a frame displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deformation {
    pub scale: Vec2,
    pub rotation: f32,
}

/// Velocity is read at a fixed assumed frame rate so the look does not depend
/// on actual frame timing.
pub fn deformation(displacement: Vec2, squash: f32) -> Deformation {
    let velocity = displacement * VISUAL_ASSUMED_FPS;
    let speed = velocity.length();
    let stretch = (speed * STRETCH_PER_SPEED).clamp(0.0, MAX_STRETCH);
    let sx = (1.0 + stretch) * (1.0 - squash * SQUASH_LONG_AXIS);
    let sy = (1.0 / (1.0 + stretch)) * (1.0 + squash * SQUASH_SHORT_AXIS);
    let rotation = if speed > ORIENT_MIN_SPEED {
        velocity.y.atan2(velocity.x)
    } else {
        0.0
    };
    Deformation {
        scale: Vec2::new(sx, sy),
        rotation,
    }
}

pub fn segment_sprite(pop: &Population, i: usize, palette: &Palette) -> SegmentSprite {
    let d = deformation(pop.position[i] - pop.prev_position[i], pop.squash[i]);
    let owner = pop.owner[i] as usize;
    let color_index = pop.color_index.get(owner).copied().unwrap_or(0) as usize;
    SegmentSprite {
        center: pop.position[i],
        radius: pop.radius[i],
        scale: d.scale,
        rotation: d.rotation,
        color: palette[color_index % palette.len()],
    }
}

/// Issues one draw per segment. Reads the population only.
pub fn draw_population<T: DrawTarget + ?Sized>(pop: &Population, palette: &Palette, target: &mut T) {
    for i in 0..pop.segment_count() {
        target.fill_ellipse(&segment_sprite(pop, i, palette));
    }
}

// --- End of File: visual.rs ---
