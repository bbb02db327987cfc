//! Correlative search space construction.

mod common;

use std::f64::consts::PI;

use approx::assert_relative_eq;
use common::{circle_cloud, init_logger, room_scan};
use vastu_grid::{
    CellLimits, CorrelativeSearchConfig, LinearBounds, MapLimits, Point3, PointCloud, Pose2D,
    ProbabilityGridConfig, RangeDataInserter, RangeDataInserterOptions, SearchParameters,
    SearchSpace, WorldPoint, discretize_scans, generate_rotated_scans,
};

#[test]
fn test_single_point_window() {
    let cloud = PointCloud::from(vec![Point3::new(3.0, 0.0, 0.0)]);
    let params = SearchParameters::new(0.5, PI / 6.0, &cloud, 0.05).unwrap();

    let step = (1.0 - 1e-3) * (1.0 - 0.05f64.powi(2) / (2.0 * 3.0f64.powi(2))).acos();
    assert_relative_eq!(params.angular_perturbation_step_size, step);
    assert_eq!(params.num_angular_perturbations, ((PI / 6.0) / step).ceil() as i32);
    assert_eq!(params.num_scans, 2 * params.num_angular_perturbations + 1);
    for bounds in &params.linear_bounds {
        assert_eq!(*bounds, LinearBounds::symmetric(10));
    }
}

#[test]
fn test_scan_count_is_odd() {
    for (radius, window) in [(0.1, 0.0), (1.0, 0.2), (5.0, 0.7), (25.0, PI)] {
        let cloud = circle_cloud(radius, 12);
        let params = SearchParameters::new(0.2, window, &cloud, 0.05).unwrap();
        assert_eq!(params.num_scans % 2, 1);
        assert_eq!(params.linear_bounds.len(), params.num_scans as usize);
        assert_eq!(params.angle(params.num_angular_perturbations as usize), 0.0);
    }
}

#[test]
fn test_shrunk_bounds_keep_scans_inside() {
    init_logger();
    let limits = MapLimits::centered(0.05, CellLimits::new(120, 80));
    let cloud = circle_cloud(1.2, 48);
    let config = CorrelativeSearchConfig::new(0.6, 0.3);

    for initial_pose in [
        Pose2D::new(0.0, 0.0, 0.0),
        Pose2D::new(1.5, 0.0, 0.4),
        Pose2D::new(-1.6, 0.5, -1.0),
        Pose2D::new(0.3, -0.7, 2.5),
    ] {
        let space = SearchSpace::build(&cloud, initial_pose, &limits, &config).unwrap();
        let params = space.parameters();
        let unshrunk = LinearBounds::symmetric((0.6f64 / params.resolution).ceil() as i32);

        for (bounds, scan) in params.linear_bounds.iter().zip(space.discrete_scans()) {
            // Never wider than before shrinking
            assert!(bounds.min_x >= unshrunk.min_x && bounds.max_x <= unshrunk.max_x);
            assert!(bounds.min_y >= unshrunk.min_y && bounds.max_y <= unshrunk.max_y);
            if bounds.is_empty() {
                continue;
            }
            for corner_x in [bounds.min_x, bounds.max_x] {
                for corner_y in [bounds.min_y, bounds.max_y] {
                    for cell in scan {
                        let x = cell.x + corner_x;
                        let y = cell.y + corner_y;
                        assert!((0..120).contains(&x) && (0..80).contains(&y));
                    }
                }
            }
        }
    }
}

#[test]
fn test_shrink_is_tight() {
    let limits = MapLimits::new(0.1, WorldPoint::ZERO, CellLimits::new(50, 50));
    let cloud = PointCloud::from(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.5, 0.0)]);
    let mut params = SearchParameters::from_perturbations(30, 0, 0.01, 0.1);

    let scans = generate_rotated_scans(&cloud, &params);
    let discrete = discretize_scans(&limits, &scans, WorldPoint::new(1.05, 1.05));
    params.shrink_to_fit(&discrete, limits.cell_limits());

    // Cells (10, 10) and (20, 15): x in [-10, 29], y in [-10, 30] capped at 30
    assert_eq!(params.linear_bounds[0], LinearBounds::new(-10, 29, -10, 30));
}

#[test]
fn test_zero_rotation_discretization_matches_direct() {
    let limits = MapLimits::centered(0.05, CellLimits::new(200, 200));
    let cloud = circle_cloud(2.0, 30);
    let params = SearchParameters::from_perturbations(2, 0, 0.02, 0.05);

    let rotated = generate_rotated_scans(&cloud, &params);
    let discrete = discretize_scans(&limits, &rotated, WorldPoint::ZERO);
    let direct: Vec<_> = cloud.iter().map(|p| limits.cell_index(p.xy())).collect();

    assert_eq!(discrete, vec![direct]);
}

#[test]
fn test_best_candidate_recovers_true_pose() {
    init_logger();
    let true_pose = Pose2D::new(2.0, 1.5, 0.0);
    let scan = room_scan(4.0, 3.0, true_pose, 360);

    let mut grid = ProbabilityGridConfig::default().build().unwrap();
    let inserter = RangeDataInserter::new(RangeDataInserterOptions::default()).unwrap();
    for _ in 0..3 {
        inserter.insert(&scan.transformed(&true_pose), &mut grid);
    }

    let initial_pose = Pose2D::new(2.05, 1.45, 0.03);
    let config = CorrelativeSearchConfig::new(0.15, 0.1);
    let space = SearchSpace::build(&scan.returns, initial_pose, grid.limits(), &config).unwrap();

    let best = space
        .candidates()
        .map(|candidate| {
            let score: f32 = space
                .candidate_cells(&candidate)
                .map(|cell| grid.probability(cell))
                .sum();
            (score, candidate)
        })
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| space.candidate_pose(&candidate))
        .unwrap();

    assert!((best.x - true_pose.x).abs() < 0.1, "{:?}", best);
    assert!((best.y - true_pose.y).abs() < 0.1, "{:?}", best);
    assert!(best.theta.abs() < 0.05, "{:?}", best);
}
