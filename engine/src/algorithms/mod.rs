//! Pure computation over portfolio data.
//!
//! Everything in this module is a synchronous function of its inputs:
//! timeline bar geometry, axis bucket generation, programme conflict
//! detection, and portfolio-level summary statistics. No module here
//! touches the store.

pub mod analysis;
pub mod axis;
pub mod layout;
pub mod overlaps;

pub use analysis::{compute_snapshot, PortfolioSnapshot, StageCount};
pub use axis::{axis_buckets, AxisBucket};
pub use layout::{clip_to_window, marker_position, BarGeometry};
pub use overlaps::{find_portfolio_conflicts, find_programme_conflicts, ProgrammeConflict};
