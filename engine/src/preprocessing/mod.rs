//! Import preprocessing: validation, enrichment, and the load pipeline.

pub mod enricher;
pub mod pipeline;
pub mod validator;

pub use enricher::{enrich, EnrichmentSummary};
pub use pipeline::{PipelineReport, PortfolioPipeline};
pub use validator::{PortfolioValidator, ValidationResult, ValidationStats};
