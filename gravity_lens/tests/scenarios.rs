use common::Bounds;
use glam::Vec2;
use gravity_lens::{
    compute_frame, distort_grid, source_position, DeflectionModel, FrameInput, InverseSquareField, LensConfig,
    LensState, RayTracer, Termination,
};

fn scenario_lens() -> LensState {
    LensState::new(Vec2::new(400.0, 300.0), 80.0, 1.5)
}

#[test]
fn test_ray_from_left_edge_terminates() {
    let lens = scenario_lens();
    let bounds = Bounds::new(800.0, 600.0);
    let tracer = RayTracer::new(5.0, 150);
    let field = InverseSquareField::default();

    for start_y in [300.0, 250.0, 120.0] {
        let ray = tracer.trace(Vec2::new(0.0, start_y), Vec2::new(5.0, 0.0), &field, &lens, &bounds);
        let end = ray.end().unwrap();

        assert!(ray.len() <= 151);
        if start_y == 300.0 {
            let escaped_right = end.x >= 800.0 && ray.termination == Termination::Escaped;
            let exhausted = ray.len() == 151 && ray.termination == Termination::Exhausted;
            assert!(escaped_right || exhausted, "end {end:?} after {} points", ray.len());
        }

        let (last, inner) = ray.path.split_last().unwrap();
        for p in inner {
            assert!(p.y >= 0.0 && p.y <= 600.0, "intermediate y out of canvas: {p:?}");
        }
        assert!(last.y >= -5.0 && last.y <= 605.0, "final y too far out: {last:?}");
    }
}

#[test]
fn test_ray_through_lens_center_stays_on_axis() {
    let lens = scenario_lens();
    let bounds = Bounds::new(800.0, 600.0);
    let ray = RayTracer::new(5.0, 150).trace(
        Vec2::new(0.0, 300.0),
        Vec2::new(5.0, 0.0),
        &InverseSquareField::default(),
        &lens,
        &bounds,
    );

    // 150 steps of 5 only reach x = 750, so the budget ends the ray
    assert_eq!(ray.termination, Termination::Exhausted);
    assert_eq!(ray.len(), 151);
    assert!(ray.path.iter().all(|p| (p.y - 300.0).abs() < 1e-4));
}

#[test]
fn test_deflection_at_lens_center_is_zero() {
    let lens = scenario_lens();
    assert_eq!(InverseSquareField::default().deflect(lens.position, &lens), Vec2::ZERO);
}

#[test]
fn test_lens_equation_at_einstein_radius() {
    let source = source_position(Vec2::new(1.0, 0.0), Vec2::ZERO, 1.0);
    assert!(source.length() < 1e-6);
}

#[test]
fn test_grid_unchanged_by_distant_lens() {
    let lens = LensState::new(Vec2::new(1.0e7, -1.0e7), 80.0, 1.5);
    let lines = distort_grid(&Bounds::new(800.0, 600.0), 40.0, 5.0, &InverseSquareField::default(), &lens);

    assert!(!lines.is_empty());
    for line in &lines {
        for (rest, warped) in line.rest_points.iter().zip(&line.points) {
            assert!((*rest - *warped).length() < 1e-3);
        }
    }
}

#[test]
fn test_ray_starting_on_horizon_stays_bounded() {
    let lens = scenario_lens();
    let field = InverseSquareField::default();
    let start = lens.position + Vec2::new(lens.mass * field.horizon_factor, 0.0);
    let bounds = Bounds::new(800.0, 600.0);
    let tracer = RayTracer::new(5.0, 150);

    for dir in [Vec2::X, Vec2::Y, -Vec2::X, Vec2::new(1.0, 1.0)] {
        let ray = tracer.trace(start, dir, &field, &lens, &bounds);
        assert!(ray.len() <= 151);
        for pair in ray.path.windows(2) {
            assert!(pair[1].is_finite());
            assert!((pair[0].distance(pair[1]) - 5.0).abs() < 1e-3);
        }
    }
}

#[test]
fn test_field_finite_and_zero_inside_horizon_on_sweep() {
    let field = InverseSquareField::default();
    for mass in [30.0f32, 80.0, 150.0] {
        for intensity in [0.5f32, 1.5, 10.0] {
            let lens = LensState::new(Vec2::new(400.0, 300.0), mass, intensity);
            for i in 0..=80 {
                for j in 0..=60 {
                    let p = Vec2::new(i as f32 * 10.0, j as f32 * 10.0);
                    let d = field.deflect(p, &lens);
                    assert!(d.is_finite());
                    if p.distance(lens.position) < mass * 0.6 {
                        assert_eq!(d, Vec2::ZERO);
                    }
                }
            }
        }
    }
}

#[test]
fn test_full_frame_with_every_layer() {
    let mut config = LensConfig::default();
    config.stars.seed = Some(11);
    config.stars.ring_fraction = 0.5;
    let bounds = config.display.canvas;
    let stars = gravity_lens::generate_source_field(&config.stars, &bounds, bounds.center());

    let input = FrameInput {
        lens: LensState::new(Vec2::new(400.0, 300.0), 150.0, 10.0),
        ray_count: 30,
        bounds,
        show_grid: true,
        show_photon_sphere: true,
        show_stars: true,
        show_einstein_ring: true,
    };
    let frame = compute_frame(&config, &input, &stars).unwrap();

    assert_eq!(frame.rays.len(), 60);
    assert_eq!(frame.stars.len(), stars.len());
    assert!(frame.rays.iter().all(|r| r.len() <= config.rays.max_steps + 1));
    assert!(frame.stars.iter().all(|s| bounds.contains(s.position)));
}
