//! Range data insertion into probability grids.

mod common;

use std::path::Path;

use common::{MAX_RANGE, init_logger, room_scan};
use vastu_grid::grid::BresenhamLine;
use vastu_grid::grid::probability_values::{MAX_VALUE, MIN_VALUE, UNKNOWN_PROBABILITY_VALUE};
use vastu_grid::{
    GridCoord, Point3, PointCloud, Pose2D, ProbabilityGridConfig, RangeData, RangeDataInserter,
    RangeDataInserterOptions, Settings, WorldPoint,
};

fn default_inserter() -> RangeDataInserter {
    RangeDataInserter::new(RangeDataInserterOptions::default()).unwrap()
}

#[test]
fn test_room_scan_marks_walls_and_floor() {
    init_logger();
    let pose = Pose2D::new(2.0, 1.5, 0.0);
    let scan = room_scan(4.0, 3.0, pose, 360).transformed(&pose);
    let mut grid = ProbabilityGridConfig::default().build().unwrap();

    default_inserter().insert(&scan, &mut grid);

    for point in &scan.returns {
        let cell = grid.cell_index(point.xy());
        assert!(grid.probability(cell) > 0.5, "wall cell {:?}", cell);
    }
    let robot_cell = grid.cell_index(pose.position());
    assert!(grid.probability(robot_cell) < 0.5);

    let known_box = grid.known_cells_box().unwrap();
    let size = known_box.size();
    // 4m x 3m room at 5cm, allowing one cell of slack per side
    assert!((80..=82).contains(&size.num_x_cells), "{:?}", size);
    assert!((60..=62).contains(&size.num_y_cells), "{:?}", size);
}

#[test]
fn test_repeated_scans_are_monotonic() {
    let pose = Pose2D::new(2.0, 1.5, 0.0);
    let scan = room_scan(4.0, 3.0, pose, 360).transformed(&pose);
    let mut grid = ProbabilityGridConfig::default().build().unwrap();
    let inserter = default_inserter();

    let wall = grid.cell_index(scan.returns.points()[0].xy());
    let floor = grid.cell_index(pose.position());

    inserter.insert(&scan, &mut grid);
    let mut wall_p = grid.probability(wall);
    let mut floor_p = grid.probability(floor);

    for _ in 0..5 {
        inserter.insert(&scan, &mut grid);
        let next_wall = grid.probability(wall);
        let next_floor = grid.probability(floor);
        assert!(next_wall > wall_p);
        assert!(next_floor < floor_p);
        wall_p = next_wall;
        floor_p = next_floor;
    }

    for &value in grid.values() {
        assert!(value == UNKNOWN_PROBABILITY_VALUE || (MIN_VALUE..=MAX_VALUE).contains(&value));
    }
}

#[test]
fn test_empty_insert_leaves_grid_unchanged() {
    let pose = Pose2D::new(2.0, 1.5, 0.0);
    let scan = room_scan(4.0, 3.0, pose, 90).transformed(&pose);
    let mut grid = ProbabilityGridConfig::default().build().unwrap();
    let inserter = default_inserter();

    inserter.insert(&scan, &mut grid);
    let before = grid.values().to_vec();
    inserter.insert(&RangeData::new(scan.origin, PointCloud::new()), &mut grid);

    assert_eq!(grid.values(), &before[..]);
}

#[test]
fn test_max_range_beams_clear_space() {
    // A corridor too long for the sensor: beams along it come back as misses
    let pose = Pose2D::new(1.0, 0.52, 0.0);
    let scan = room_scan(20.0, 1.0, pose, 180);
    assert!(!scan.misses.is_empty());

    let config = ProbabilityGridConfig::for_area(25.0, 5.0, 0.05);
    let mut grid = config.build().unwrap();
    default_inserter().insert(&scan.transformed(&pose), &mut grid);

    let far = grid.cell_index(pose.transform_point(WorldPoint::new(MAX_RANGE - 0.01, 0.0)));
    assert!(grid.is_known(far));
    assert!(grid.probability(far) < 0.5);
}

#[test]
fn test_grid_grows_for_distant_returns() {
    let config = ProbabilityGridConfig {
        initial_width: 40,
        initial_height: 40,
        max_width: 400,
        max_height: 400,
        ..Default::default()
    };
    let mut grid = config.build().unwrap();
    let data = RangeData::new(
        Point3::new(0.0, 0.0, 0.0),
        PointCloud::from(vec![Point3::new(4.0, 3.0, 0.0), Point3::new(-3.0, -4.0, 0.0)]),
    );

    default_inserter().insert(&data, &mut grid);

    assert!(grid.cell_limits().num_x_cells > 40);
    for point in &data.returns {
        let cell = grid.cell_index(point.xy());
        assert!(grid.contains(cell));
        assert!(grid.probability(cell) > 0.5);
    }
    let origin = grid.cell_index(data.origin.xy());
    let end = grid.cell_index(data.returns.points()[0].xy());
    for cell in BresenhamLine::new(origin, end).take(50) {
        assert!(grid.probability(cell) < 0.5, "free cell {:?}", cell);
    }
}

#[test]
fn test_settings_file_drives_insertion() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/config.yaml");
    let settings = Settings::load(&path).unwrap();

    let mut grid = settings.grid.build().unwrap();
    let inserter = RangeDataInserter::new(settings.range_data_inserter.clone()).unwrap();
    let origin = grid.cell_index(WorldPoint::new(0.0, 0.0));
    let data = RangeData::new(
        Point3::new(0.0, 0.0, 0.0),
        PointCloud::from(vec![Point3::new(1.0, 0.0, 0.0)]),
    );

    inserter.insert(&data, &mut grid);

    assert!(grid.is_known(origin));
    assert!(!grid.is_known(origin + GridCoord::new(0, 5)));
}
