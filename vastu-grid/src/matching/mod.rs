//! Correlative scan matching search space.
//!
//! Builds the discrete set of poses a correlative matcher evaluates around an
//! initial pose estimate. Scoring candidates against a grid is left to the
//! caller.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      SEARCH SPACE PIPELINE                        │
//! │                                                                   │
//! │  PointCloud + initial Pose2D                                      │
//! │       │                                                           │
//! │       ▼                                                           │
//! │  ┌──────────────────┐   ┌─────────────────┐   ┌───────────────┐  │
//! │  │ SearchParameters │──▶│ Rotated scans   │──▶│ Discrete scans│  │
//! │  │ (step, windows)  │   │ (2n+1 copies)   │   │ (cell indices)│  │
//! │  └──────────────────┘   └─────────────────┘   └───────┬───────┘  │
//! │                                                       ▼          │
//! │                                              shrink_to_fit(grid) │
//! │                                                       │          │
//! │                                                       ▼          │
//! │                                              Candidates          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Components
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`SearchParameters`] | Angular step, rotation count, per-rotation bounds |
//! | [`generate_rotated_scans`] | One rotated copy of the scan per rotation |
//! | [`discretize_scans`] | Translate and map rotated scans to cells |
//! | [`SearchSpace`] | Full pipeline plus candidate enumeration |
//!
//! ## Example
//!
//! ```rust,ignore
//! use vastu_grid::matching::{CorrelativeSearchConfig, SearchSpace};
//!
//! let config = CorrelativeSearchConfig::default();
//! let space = SearchSpace::build(&cloud, initial_pose, grid.limits(), &config)?;
//!
//! for candidate in space.candidates() {
//!     let score: f32 = space
//!         .candidate_cells(&candidate)
//!         .map(|cell| grid.probability(cell))
//!         .sum();
//!     // keep the best
//! }
//! ```

mod config;
mod rotated_scans;
mod search_parameters;
mod search_space;

pub use config::CorrelativeSearchConfig;
pub use rotated_scans::{DiscreteScan, discretize_scans, generate_rotated_scans};
pub use search_parameters::{LinearBounds, MAX_PERTURBATIONS, SearchParameters};
pub use search_space::{Candidate, SearchSpace};
