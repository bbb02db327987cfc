//! Map a simulated room and localize a perturbed scan against it.
//!
//! This example demonstrates:
//! - Loading settings (YAML) or falling back to defaults
//! - Inserting simulated lidar scans along a short trajectory
//! - Building a correlative search space around a noisy pose
//! - Scoring candidates against the probability grid
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --example search_space_demo -- configs/config.yaml
//! ```

use std::f32::consts::PI;
use std::path::Path;

use vastu_grid::{Pose2D, RangeData, RangeDataInserter, SearchSpace, Settings};

const ROOM_WIDTH: f32 = 6.0;
const ROOM_HEIGHT: f32 = 4.0;

/// Simulate a 360-point scan inside the room, in the sensor frame.
fn simulate_scan(pose: Pose2D) -> RangeData {
    let num_points = 360;
    let mut ranges = Vec::with_capacity(num_points);
    let mut angles = Vec::with_capacity(num_points);

    for i in 0..num_points {
        let angle = i as f32 * 2.0 * PI / num_points as f32 - PI;
        let (sin_a, cos_a) = (pose.theta + angle).sin_cos();
        let mut range = f32::INFINITY;
        if cos_a > 0.0 {
            range = range.min((ROOM_WIDTH - pose.x) / cos_a);
        }
        if cos_a < 0.0 {
            range = range.min(-pose.x / cos_a);
        }
        if sin_a > 0.0 {
            range = range.min((ROOM_HEIGHT - pose.y) / sin_a);
        }
        if sin_a < 0.0 {
            range = range.min(-pose.y / sin_a);
        }
        ranges.push(range);
        angles.push(angle);
    }

    RangeData::from_polar(&ranges, &angles, 0.15, 8.0)
}

fn main() -> vastu_grid::Result<()> {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path))?,
        None => Settings::load_default()?,
    };
    log::info!(
        "Grid {}x{} cells at {}m",
        settings.grid.initial_width,
        settings.grid.initial_height,
        settings.grid.resolution
    );

    let mut grid = settings.grid.build()?;
    let inserter = RangeDataInserter::new(settings.range_data_inserter.clone())?;

    // Drive along the room's long axis
    let trajectory: Vec<Pose2D> = (0..10)
        .map(|i| Pose2D::new(1.5 + i as f32 * 0.3, 2.0, i as f32 * 0.05))
        .collect();
    for pose in &trajectory {
        let scan = simulate_scan(*pose);
        inserter.insert(&scan.transformed(pose), &mut grid);
    }
    if let Some(known) = grid.known_cells_box() {
        log::info!("Known area: {:?} cells", known.size());
    }

    // Relocalize the last scan from a noisy guess
    let true_pose = trajectory[trajectory.len() - 1];
    let guess = Pose2D::new(true_pose.x + 0.07, true_pose.y - 0.04, true_pose.theta + 0.05);
    let scan = simulate_scan(true_pose);
    let space = SearchSpace::build(&scan.returns, guess, grid.limits(), &settings.correlative_search)?;
    log::info!(
        "{} rotations, {} candidates",
        space.parameters().num_scans,
        space.num_candidates()
    );

    let best = space
        .candidates()
        .map(|candidate| {
            let score: f32 = space
                .candidate_cells(&candidate)
                .map(|cell| grid.probability(cell))
                .sum();
            (score / scan.returns.len().max(1) as f32, candidate)
        })
        .max_by(|a, b| a.0.total_cmp(&b.0));

    match best {
        Some((score, candidate)) => {
            let pose = space.candidate_pose(&candidate);
            println!("True pose:  {:?}", true_pose);
            println!("Guess:      {:?}", guess);
            println!("Best match: {:?} (mean probability {:.3})", pose, score);
        }
        None => log::warn!("No candidate fits inside the grid"),
    }

    Ok(())
}
