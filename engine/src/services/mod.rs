//! View assembly services.
//!
//! One module per dashboard view, each split the same way: a pure
//! `compute_*` function over domain data, and a `get_*` wrapper that
//! pulls from a repository. The wrappers return `Result<T, String>`;
//! the rendering layer only ever shows the message.

pub mod board;
pub mod documents;
pub mod insights;
pub mod listing;
pub mod setup;
pub mod site_map;
pub mod timeline;
