//! Load pipeline: parse -> validate -> enrich -> store.
//!
//! The pipeline is the only write path into the store besides the
//! built-in sample seed. It refuses invalid datasets, skips datasets it
//! has already imported (by checksum), and logs what it did.

use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;

use crate::config::EngineConfig;
use crate::io::loaders::PortfolioLoader;
use crate::preprocessing::enricher;
use crate::preprocessing::validator::{PortfolioValidator, ValidationResult};
use crate::store::checksum::calculate_checksum;
use crate::store::repository::PortfolioRepository;

/// What a pipeline run did.
#[derive(Debug)]
pub struct PipelineReport {
    pub checksum: String,
    /// `true` when an identical dataset was imported before and this run
    /// stored nothing.
    pub duplicate_import: bool,
    pub validation: ValidationResult,
    pub stored_projects: usize,
    pub stored_retentions: usize,
}

impl PipelineReport {
    /// `true` when the dataset made it into the store.
    pub fn stored(&self) -> bool {
        !self.duplicate_import && self.validation.is_valid
    }
}

/// Orchestrates a portfolio import.
pub struct PortfolioPipeline;

impl PortfolioPipeline {
    /// Run the pipeline on a portfolio export file.
    pub fn run_from_file(
        path: &Path,
        repo: &dyn PortfolioRepository,
        config: &EngineConfig,
    ) -> Result<PipelineReport> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read portfolio file: {}", path.display()))?;

        Self::run_from_str(&content, repo, config)
    }

    /// Run the pipeline on a portfolio export string.
    pub fn run_from_str(
        json: &str,
        repo: &dyn PortfolioRepository,
        config: &EngineConfig,
    ) -> Result<PipelineReport> {
        let import = PortfolioLoader::load_from_str(json)?;
        let mut projects = import.projects;
        let mut retentions = import.retentions;

        let validation = PortfolioValidator::validate(&projects, &retentions, &import.issues);
        for warning in &validation.warnings {
            warn!("{}", warning);
        }

        let checksum = calculate_checksum(&json)
            .map_err(|e| anyhow::Error::msg(e.to_string()))
            .context("Failed to fingerprint dataset")?;

        if !validation.is_valid {
            warn!(
                "Portfolio import rejected: {} error(s)",
                validation.errors.len()
            );
            return Ok(PipelineReport {
                checksum,
                duplicate_import: false,
                validation,
                stored_projects: 0,
                stored_retentions: 0,
            });
        }

        let is_new = repo
            .record_dataset_checksum(&checksum)
            .map_err(|e| anyhow::Error::msg(e.to_string()))?;
        if !is_new {
            info!("Portfolio import skipped: identical dataset already imported");
            return Ok(PipelineReport {
                checksum,
                duplicate_import: true,
                validation,
                stored_projects: 0,
                stored_retentions: 0,
            });
        }

        let summary = enricher::enrich(&mut projects, &mut retentions, &config.retention);
        info!(
            "Enriched import: {} moiety schedule(s) derived, {} stage(s) reconciled",
            summary.moieties_scheduled, summary.stages_reconciled
        );

        for project in &projects {
            repo.store_project(project)
                .map_err(|e| anyhow::Error::msg(e.to_string()))?;
        }
        for retention in &retentions {
            repo.store_retention(retention)
                .map_err(|e| anyhow::Error::msg(e.to_string()))?;
        }

        info!(
            "Imported {} project(s) and {} retention record(s)",
            projects.len(),
            retentions.len()
        );

        Ok(PipelineReport {
            checksum,
            duplicate_import: false,
            validation,
            stored_projects: projects.len(),
            stored_retentions: retentions.len(),
        })
    }
}
