use crawlers::physics;
use crawlers::{
    DEFAULT_PALETTE, FrameContext, OrganismPlacement, SegmentSprite, Swarm, SwarmConfig,
};
use glam::Vec2;

const DT: f32 = 1.0 / 60.0;

fn placement(x: f32, y: f32, heading: f32, segments: u8) -> OrganismPlacement {
    OrganismPlacement {
        head: Vec2::new(x, y),
        heading,
        segments,
    }
}

fn swarm_with(config: SwarmConfig, placements: &[OrganismPlacement]) -> Swarm {
    let mut swarm = Swarm::new(config);
    swarm
        .initialize_with(800.0, 600.0, 10.0, 1, placements)
        .expect("valid placements");
    swarm
}

#[test]
fn populations_meet_size_and_contiguity_bounds() {
    let arenas = [(800.0, 600.0), (1920.0, 1080.0), (320.0, 240.0), (3840.0, 2160.0)];
    for (seed, &(w, h)) in arenas.iter().enumerate() {
        let mut swarm = Swarm::default();
        swarm.initialize(w, h, 9.0, seed as u64).unwrap();
        let pop = swarm.population().unwrap();
        assert!(pop.organism_count() >= 24);

        let mut covered = vec![false; pop.segment_count()];
        let mut total = 0usize;
        for o in 0..pop.organism_count() {
            let n = pop.seg_count[o];
            assert!(n == 1 || (4..=9).contains(&n));
            total += n as usize;
            for i in pop.segments_of(o) {
                assert!(!covered[i], "segment {i} claimed twice");
                covered[i] = true;
            }
        }
        assert_eq!(total, pop.segment_count());
        assert!(covered.iter().all(|&c| c));
    }
}

#[test]
fn segments_stay_inside_the_arena() {
    let (w, h) = (640.0, 480.0);
    let mut swarm = Swarm::default();
    swarm.initialize(w, h, 10.0, 21).unwrap();
    for frame in 0..400 {
        // Sweep the pointer around to drive organisms into walls.
        let t = frame as f32 * 0.05;
        let ctx = FrameContext::new(w, h).with_pointer(Vec2::new(
            w * 0.5 + t.cos() * w * 0.4,
            h * 0.5 + t.sin() * h * 0.4,
        ));
        swarm.update(DT, &ctx);
        let pop = swarm.population().unwrap();
        for i in 0..pop.segment_count() {
            let r = pop.radius[i];
            let p = pop.position[i];
            assert!(p.is_finite());
            assert!(p.x >= r - 1e-3 && p.x <= w - r + 1e-3, "frame {frame}: x {}", p.x);
            assert!(p.y >= r - 1e-3 && p.y <= h - r + 1e-3, "frame {frame}: y {}", p.y);
        }
    }
}

#[test]
fn links_settle_toward_rest_without_thrust() {
    let mut swarm = swarm_with(SwarmConfig::without_thrust(), &[placement(400.0, 300.0, 0.0, 6)]);
    let link = swarm.population().unwrap().link_distance;

    let rest_error = |swarm: &Swarm| -> f32 {
        let pop = swarm.population().unwrap();
        let config = &swarm.config.solver;
        (0..5)
            .map(|a| {
                let rest = physics::rest_length(link, config, pop.step_phase[0], a);
                (pop.position[a].distance(pop.position[a + 1]) - rest).abs()
            })
            .sum()
    };

    // Measure the starting layout against the rest lengths the frame will use.
    let mut probe = swarm_with(SwarmConfig::without_thrust(), &[placement(400.0, 300.0, 0.0, 6)]);
    probe.population_mut().unwrap().step_phase[0] =
        swarm.config.locomotion.step_hz * DT;
    let before = rest_error(&probe);

    swarm.update(DT, &FrameContext::new(800.0, 600.0));
    let after = rest_error(&swarm);
    assert!(after <= before, "link error grew: {before} -> {after}");

    let pop = swarm.population().unwrap();
    for a in 0..5 {
        let d = pop.position[a].distance(pop.position[a + 1]);
        assert!((d / link - 1.0).abs() <= 0.05 + 1e-3, "link {a} length {d}");
    }
}

#[test]
fn collision_passes_reduce_non_adjacent_overlap() {
    let mut swarm = swarm_with(
        SwarmConfig::without_thrust(),
        &[placement(300.0, 300.0, 0.0, 1), placement(312.0, 300.0, 0.0, 1)],
    );
    let pop = swarm.population_mut().unwrap();
    let overlap = |p: &crawlers::Population| 20.0 - p.position[0].distance(p.position[1]);
    let before = overlap(&*pop);
    assert!((before - 8.0).abs() < 1e-4);
    for _ in 0..2 {
        physics::resolve_collisions(pop);
        physics::enforce_bounds(pop, Vec2::new(800.0, 600.0), 0.0);
    }
    assert!(overlap(&*pop) < before);
}

#[test]
fn squash_decays_geometrically_without_contacts() {
    let mut swarm = swarm_with(SwarmConfig::without_thrust(), &[placement(400.0, 300.0, 0.0, 1)]);
    swarm.population_mut().unwrap().squash[0] = 0.6;
    let ctx = FrameContext::new(800.0, 600.0);
    let mut last = 0.6f32;
    for n in 1..=30 {
        swarm.update(DT, &ctx);
        let s = swarm.population().unwrap().squash[0];
        let expected = 0.6 * 0.86f32.powi(n);
        assert!((s - expected).abs() < 1e-5, "frame {n}: {s} vs {expected}");
        assert!(s < last);
        last = s;
    }
}

#[test]
fn reduced_motion_freezes_heads() {
    let mut swarm = Swarm::default();
    swarm.initialize(1024.0, 768.0, 8.0, 5).unwrap();
    // Let things move first so segments carry velocity.
    for _ in 0..30 {
        swarm.update(DT, &FrameContext::new(1024.0, 768.0));
    }
    let mut ctx = FrameContext::new(1024.0, 768.0).with_pointer(Vec2::new(512.0, 384.0));
    ctx.reduced_motion = true;

    for dt in [DT, 0.5, 10.0, 0.0] {
        let heads: Vec<Vec2> = {
            let pop = swarm.population().unwrap();
            (0..pop.organism_count())
                .map(|o| pop.position[pop.head_index(o)])
                .collect()
        };
        swarm.update(dt, &ctx);
        let pop = swarm.population().unwrap();
        for (o, head) in heads.iter().enumerate() {
            assert_eq!(*head, pop.position[pop.head_index(o)]);
        }
    }
}

#[test]
fn single_organism_wanders_and_keeps_its_shape() {
    let mut swarm = swarm_with(SwarmConfig::new(), &[placement(400.0, 300.0, 0.0, 5)]);
    let ctx = FrameContext::new(800.0, 600.0);
    let start = swarm.population().unwrap().position[0];
    for _ in 0..120 {
        swarm.update(DT, &ctx);
        let head = swarm.population().unwrap().position[0];
        assert!((10.0..=790.0).contains(&head.x) && (10.0..=590.0).contains(&head.y));
    }
    let pop = swarm.population().unwrap();
    assert!(pop.position[0].distance(start) > 1.0, "organism never moved");

    let mean = (0..4)
        .map(|a| pop.position[a].distance(pop.position[a + 1]))
        .sum::<f32>()
        / 4.0;
    assert!((mean / 18.5 - 1.0).abs() < 0.05, "mean link length {mean}");
}

#[test]
fn organism_flees_a_nearby_pointer() {
    let pointer = Vec2::new(350.0, 300.0);
    let mut swarm = swarm_with(SwarmConfig::new(), &[placement(400.0, 300.0, 0.0, 1)]);
    let ctx = FrameContext::new(800.0, 600.0).with_pointer(pointer);
    let mut last = swarm.population().unwrap().position[0].distance(pointer);
    assert!((last - 50.0).abs() < 1e-4);
    for frame in 0..10 {
        swarm.update(DT, &ctx);
        let d = swarm.population().unwrap().position[0].distance(pointer);
        assert!(d > last, "frame {frame}: distance {d} did not grow from {last}");
        last = d;
    }
    assert!(last < 260.0);
}

#[test]
fn overlapping_singles_are_pushed_apart() {
    let mut swarm = swarm_with(
        SwarmConfig::without_thrust(),
        &[placement(400.0, 300.0, 0.0, 1), placement(401.0, 300.0, 0.0, 1)],
    );
    let ctx = FrameContext::new(800.0, 600.0);
    let mut last = 1.0f32;
    for _ in 0..4 {
        swarm.update(DT, &ctx);
        let pop = swarm.population().unwrap();
        let d = pop.position[0].distance(pop.position[1]);
        assert!(d >= last);
        assert!(d >= 20.0 - 1e-2);
        last = d;
    }
    let pop = swarm.population().unwrap();
    assert!(pop.squash[0] > 0.5, "contact should leave a squash mark");
}

#[test]
fn head_on_pair_veers_apart_regardless_of_index() {
    let mut config = SwarmConfig::new();
    config.locomotion.wander_noise_scale = 0.0;
    config.locomotion.pause_rate_per_sec = 0.0;
    let mut swarm = swarm_with(
        config,
        &[
            placement(330.0, 300.0, 0.0, 1),
            placement(470.0, 300.0, std::f32::consts::PI, 1),
        ],
    );
    let ctx = FrameContext::new(800.0, 600.0);
    let mut widest = 0.0f32;
    for _ in 0..40 {
        swarm.update(DT, &ctx);
        let pop = swarm.population().unwrap();
        widest = widest.max((pop.position[0].y - pop.position[1].y).abs());
    }
    assert!(widest > 0.2, "pair stayed on one line: {widest}");
}

#[test]
fn same_seed_same_frames_replays_exactly() {
    let run = || {
        let mut swarm = Swarm::default();
        swarm.initialize(900.0, 700.0, 8.0, 1234).unwrap();
        let ctx = FrameContext::new(900.0, 700.0).with_pointer(Vec2::new(450.0, 350.0));
        for _ in 0..90 {
            swarm.update(DT, &ctx);
        }
        swarm.population().unwrap().position.clone()
    };
    assert_eq!(run(), run());
}

#[test]
fn long_frames_are_clamped() {
    let mut a = swarm_with(SwarmConfig::new(), &[placement(400.0, 300.0, 0.0, 5)]);
    let mut b = swarm_with(SwarmConfig::new(), &[placement(400.0, 300.0, 0.0, 5)]);
    let ctx = FrameContext::new(800.0, 600.0);
    a.update(5.0, &ctx);
    b.update(0.033, &ctx);
    assert_eq!(
        a.population().unwrap().position,
        b.population().unwrap().position
    );
}

#[test]
fn render_maps_every_segment_to_a_palette_colored_ellipse() {
    let mut swarm = Swarm::default();
    swarm.initialize(800.0, 600.0, 10.0, 8).unwrap();
    let ctx = FrameContext::new(800.0, 600.0);
    for _ in 0..20 {
        swarm.update(DT, &ctx);
    }
    let mut sprites: Vec<SegmentSprite> = Vec::new();
    swarm.render(&DEFAULT_PALETTE, &mut sprites);
    let pop = swarm.population().unwrap();
    assert_eq!(sprites.len(), pop.segment_count());
    for (i, sprite) in sprites.iter().enumerate() {
        assert_eq!(sprite.center, pop.position[i]);
        assert_eq!(sprite.radius, pop.radius[i]);
        assert!(DEFAULT_PALETTE.contains(&sprite.color));
        assert!(sprite.scale.x > 0.0 && sprite.scale.y > 0.0);
        assert!(sprite.scale.x <= 1.38 + 1e-5);
    }
}
