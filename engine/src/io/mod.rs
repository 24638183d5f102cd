//! File loading facades.

pub mod loaders;

pub use loaders::{PortfolioLoader, ShutdownsLoader};
