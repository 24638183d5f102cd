//! Parsers for portfolio data formats.
//!
//! This module provides parsers for the dashboard's import formats:
//! the portfolio JSON export (projects, phases, and retention records)
//! and shutdown-period files.
//!
//! # Parsers
//!
//! - [`json_parser`]: Parse JSON-formatted portfolio exports
//! - [`shutdowns_parser`]: Parse shutdown-period files
//!
//! # Example
//!
//! ```no_run
//! use siteline_engine::parsing::json_parser::parse_portfolio_json;
//! use std::path::Path;
//!
//! let import = parse_portfolio_json(Path::new("portfolio.json"))
//!     .expect("Failed to parse portfolio");
//! println!("{} projects", import.projects.len());
//! ```

pub mod json_parser;
pub mod shutdowns_parser;

#[cfg(test)]
mod shutdowns_parser_tests;

pub use json_parser::PortfolioImport;
