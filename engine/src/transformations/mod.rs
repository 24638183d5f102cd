//! In-memory dataset transformations.

pub mod filtering;

pub use filtering::{filter_projects, filter_retentions, ProjectFilter, RetentionFilter};
