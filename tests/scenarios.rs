//! End-to-end scenarios and quantified properties (spec.md §8).

use grav_hut::{Body, Octree, OctreeConfig, SimConfig, SystemType, Vec3, World};

fn direct_config() -> SimConfig {
    SimConfig {
        g: 67.,
        c: f64::INFINITY,
        capacity: 0,
        theta: 0.,
        epsilon: 0.,
        minimum_width: 1.0,
        frame_interval_ms: 0.,
        camera_easing: 0.94,
        fps_max: 999.9,
        trail_length: 0,
    }
}

// S1: empty world, one tick, no crash.
#[test]
fn s1_empty_world() {
    let cfg = SimConfig { capacity: 10, frame_interval_ms: 0., ..SimConfig::default() };
    let world = World::new(cfg);
    world.set_active(true);
    world.tick().unwrap();
    assert_eq!(world.body_count(), 0);
    assert_eq!(world.frames(), 0);
}

// S2: single body at rest stays at rest.
#[test]
fn s2_single_body_at_rest() {
    let bodies = vec![Some(Body::new(Vec3::new_zero(), 1.))];
    let world = World::with_bodies(direct_config(), bodies);
    world.set_active(true);
    world.tick().unwrap();
    let snap = world.snapshot();
    assert_eq!(snap.len(), 1);
    assert!(snap[0].position.magnitude() < 1e-12);
}

// S3: two equal masses, mirrored about the origin, direct force (theta=0).
#[test]
fn s3_two_body_symmetry() {
    let a = Body::new(Vec3::new(100., 0., 0.), 1e6);
    let b = Body::new(Vec3::new(-100., 0., 0.), 1e6);
    let world = World::with_bodies(direct_config(), vec![Some(a), Some(b)]);
    world.set_active(true);
    world.tick().unwrap();

    let snap = world.snapshot();
    assert_eq!(snap.len(), 2);
    // Positions must remain symmetric about the origin.
    assert!((snap[0].position + snap[1].position).magnitude() < 1e-6);
}

// S4: a body already at the speed ceiling never exceeds it after one update.
#[test]
fn s4_speed_clamp() {
    let c = 1e4;
    let mut cfg = direct_config();
    cfg.c = c;
    let mut b = Body::new(Vec3::new_zero(), 1.).with_velocity(Vec3::new(c, 0., 0.));
    b.acceleration = Vec3::new(c, 0., 0.);
    let world = World::with_bodies(cfg, vec![Some(b)]);
    world.set_active(true);
    world.tick().unwrap();
    // `tick` recomputes acceleration from an empty tree (no other bodies),
    // so the clamp is exercised purely by the pre-set velocity/acceleration
    // going through `Body::update` inside the tick.
    let snap = world.snapshot();
    assert!(snap[0].position.magnitude() <= c * 1.000001);
}

// S5: DistributionTest with N=1000 forms an exact 10x10x10 lattice.
#[test]
fn s5_lattice_generator_forms_exact_cube() {
    let cfg = SimConfig { capacity: 1000, frame_interval_ms: 0., ..SimConfig::default() };
    let world = World::new(cfg);
    world.generate(SystemType::DistributionTest).unwrap();
    assert_eq!(world.body_count(), 1000);

    let snap = world.snapshot();
    let h = snap
        .iter()
        .map(|b| b.position.x.abs().max(b.position.y.abs()).max(b.position.z.abs()))
        .fold(0.0_f64, f64::max);
    let root_width = 2.1 * h;
    assert!(root_width >= 2.1 * 4e4 * 5.);
}

// S6: tighter theta never increases approximation error relative to the
// direct sum (MAC monotonicity, property 6 stated at the tree level).
#[test]
fn s6_mac_monotonicity() {
    let bodies: Vec<(Vec3, f64)> = (0..30)
        .map(|i| {
            let angle = i as f64 * 0.7;
            (Vec3::new(angle.cos() * (100. + i as f64 * 10.), angle.sin() * 50., i as f64), 1e3)
        })
        .collect();

    let direct = |target: Vec3, skip: usize| -> Vec3 {
        let mut acc = Vec3::new_zero();
        for (j, (pos, mass)) in bodies.iter().enumerate() {
            if j == skip {
                continue;
            }
            let d = *pos - target;
            let r = d.magnitude();
            acc += d * (67. * mass / (r * r * r));
        }
        acc
    };

    let mut last_error = f64::INFINITY;
    for &theta in &[1.0, 0.7, 0.4, 0.1] {
        let config = OctreeConfig { theta, epsilon: 0., minimum_width: 1e-6 };
        let tree = Octree::build(bodies.clone(), Vec3::new_zero(), 10_000., config, 67.);

        let mut total_error = 0.0_f64;
        for (i, (pos, _)) in bodies.iter().enumerate() {
            let tree_acc = tree.accelerate(*pos);
            let direct_acc = direct(*pos, i);
            total_error += (tree_acc - direct_acc).magnitude();
        }
        assert!(
            total_error <= last_error + 1e-9,
            "error should not increase as theta shrinks: theta={theta} error={total_error} last={last_error}"
        );
        last_error = total_error;
    }
}

// Property 5: a lone body imparts no force on itself.
#[test]
fn property_no_self_force() {
    let pos = Vec3::new(17., -4., 9.);
    let world = World::with_bodies(direct_config(), vec![Some(Body::new(pos, 42.))]);
    world.set_active(true);
    world.tick().unwrap();
    let snap = world.snapshot();
    assert!((snap[0].position - pos).magnitude() < 1e-9);
}

// Property 7: rotating every body commutes with accelerating them, up to
// the same rotation.
#[test]
fn property_rotational_equivariance() {
    let bodies = vec![
        Some(Body::new(Vec3::new(100., 0., 0.), 1e6)),
        Some(Body::new(Vec3::new(-50., 30., 0.), 2e6)),
        Some(Body::new(Vec3::new(0., -80., 40.), 5e5)),
    ];
    let axis = Vec3::new(0., 0., 1.);
    let angle = 0.9;
    let base = Vec3::new_zero();

    let config = OctreeConfig { theta: 0., epsilon: 0., minimum_width: 1e-6 };
    let positions: Vec<(Vec3, f64)> = bodies
        .iter()
        .flatten()
        .map(|b| (b.position, b.mass))
        .collect();

    let tree_before = Octree::build(positions.clone(), Vec3::new_zero(), 10_000., config, 67.);
    let acc_before: Vec<Vec3> = positions.iter().map(|(p, _)| tree_before.accelerate(*p)).collect();
    let rotated_acc_before: Vec<Vec3> =
        acc_before.iter().map(|a| a.rotate_direction(base, axis, angle)).collect();

    let rotated_positions: Vec<(Vec3, f64)> = positions
        .iter()
        .map(|(p, m)| (p.rotate_point(base, axis, angle), *m))
        .collect();
    let tree_after = Octree::build(rotated_positions.clone(), Vec3::new_zero(), 10_000., config, 67.);
    let acc_after: Vec<Vec3> = rotated_positions.iter().map(|(p, _)| tree_after.accelerate(*p)).collect();

    for (rotated_before, after) in rotated_acc_before.iter().zip(acc_after.iter()) {
        assert!((*rotated_before - *after).magnitude() < 1e-6 * after.magnitude().max(1.));
    }
}

// Property 8: the parallel harness invokes every index exactly once, even
// when wired through a full tick.
#[test]
fn property_harness_totality_through_a_tick() {
    let cfg = SimConfig { capacity: 256, frame_interval_ms: 0., ..SimConfig::default() };
    let world = World::with_seed(cfg, 55);
    world.generate(SystemType::DistributionTest).unwrap();
    world.set_active(true);
    for _ in 0..5 {
        world.tick().unwrap();
    }
    assert_eq!(world.body_count(), 216); // 6^3, the largest cube <= 256
}
