use anyhow::{Context, Result};
use std::path::Path;

use crate::core::domain::ShutdownPeriod;
use crate::parsing::json_parser::{self, PortfolioImport};
use crate::parsing::shutdowns_parser;

/// Unified interface for loading portfolio exports
pub struct PortfolioLoader;

impl PortfolioLoader {
    /// Load a portfolio export from a file (dispatches on extension)
    pub fn load_from_file(path: &Path) -> Result<PortfolioImport> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .context("File has no extension")?;

        match extension.to_lowercase().as_str() {
            "json" => {
                json_parser::parse_portfolio_json(path).context("Failed to parse portfolio file")
            }
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        }
    }

    /// Load a portfolio export from a JSON string
    pub fn load_from_str(json_str: &str) -> Result<PortfolioImport> {
        json_parser::parse_portfolio_json_str(json_str).context("Failed to parse portfolio JSON")
    }
}

/// Unified interface for loading shutdown periods
pub struct ShutdownsLoader;

impl ShutdownsLoader {
    /// Load shutdown periods from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Vec<ShutdownPeriod>> {
        shutdowns_parser::parse_shutdowns_file(path).context("Failed to parse shutdowns file")
    }

    /// Load shutdown periods from a JSON string
    pub fn load_from_str(json_str: &str) -> Result<Vec<ShutdownPeriod>> {
        shutdowns_parser::parse_shutdowns_str(json_str).context("Failed to parse shutdowns JSON")
    }
}
