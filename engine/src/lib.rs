//! Siteline engine - portfolio timeline and retention tracking for a
//! construction-management dashboard.
//!
//! The engine computes everything the dashboard renders: Gantt bar
//! geometry clipped to a visible window, axis buckets for the
//! month/quarter/week selectors, the retention kanban board with its
//! transition rules, portfolio insights, map markers, and printable
//! payment claims. State lives in an in-memory store seeded from the
//! built-in sample portfolio or a one-shot JSON import.

pub mod algorithms;
pub mod api;
pub mod config;
pub mod core;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod services;
pub mod store;
pub mod time;
pub mod transformations;

pub use crate::algorithms::layout::{clip_to_window, marker_position, BarGeometry};
pub use crate::config::EngineConfig;
pub use crate::core::domain::{
    DateRange, Granularity, Project, Retention, RetentionStage, TimelineWindow,
};
pub use crate::store::{get_store, init_store, MemoryRepository, PortfolioRepository};
