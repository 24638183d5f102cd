use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::path::Path;

use crate::core::domain::{
    DateRange, Moiety, Phase, Project, ProjectStage, Retention, RetentionStage, SiteLocation,
};
use crate::time::calendar;

/// Custom deserializer that accepts either string or integer ids
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Int(i64),
    }

    match StringOrInt::deserialize(deserializer)? {
        StringOrInt::String(s) => Ok(s),
        StringOrInt::Int(i) => Ok(i.to_string()),
    }
}

/// Raw JSON structure for site coordinates
#[derive(Debug, Deserialize)]
struct RawSite {
    lat: f64,
    #[serde(alias = "lon")]
    lng: f64,
}

/// Raw JSON structure for a project phase
#[derive(Debug, Deserialize)]
struct RawPhase {
    name: String,
    #[serde(default)]
    trade: String,
    #[serde(rename = "startDate")]
    start_date: String,
    #[serde(rename = "endDate")]
    end_date: String,
}

/// Raw JSON structure as it comes from the portfolio export
#[derive(Debug, Deserialize)]
struct RawProject {
    #[serde(rename = "projectId", deserialize_with = "deserialize_id")]
    project_id: String,
    name: String,
    #[serde(default)]
    client: String,
    #[serde(default)]
    stage: String,
    #[serde(rename = "startDate")]
    start_date: String,
    #[serde(rename = "endDate")]
    end_date: String,
    #[serde(rename = "contractValue", default)]
    contract_value: f64,
    site: Option<RawSite>,
    #[serde(default)]
    phases: Vec<RawPhase>,
}

/// Raw JSON structure for a retention record
#[derive(Debug, Deserialize)]
struct RawRetention {
    #[serde(rename = "retentionId", deserialize_with = "deserialize_id")]
    retention_id: String,
    #[serde(rename = "projectId", deserialize_with = "deserialize_id")]
    project_id: String,
    #[serde(default)]
    contractor: String,
    #[serde(rename = "contractValue", default)]
    contract_value: f64,
    #[serde(rename = "retentionPercent", default = "default_retention_percent")]
    retention_percent: f64,
    #[serde(rename = "practicalCompletion")]
    practical_completion: Option<String>,
    #[serde(rename = "dlpMonths", default = "default_dlp_months")]
    dlp_months: u32,
    stage: Option<String>,
    #[serde(rename = "firstMoietyReleased", default)]
    first_moiety_released: bool,
    #[serde(rename = "secondMoietyReleased", default)]
    second_moiety_released: bool,
}

fn default_retention_percent() -> f64 {
    5.0
}

fn default_dlp_months() -> u32 {
    12
}

/// Container for the JSON file structure
#[derive(Debug, Deserialize)]
struct PortfolioJson {
    projects: Vec<RawProject>,
    #[serde(default)]
    retentions: Vec<RawRetention>,
}

/// Result of parsing a portfolio export.
///
/// Entries with unusable data (unparseable dates, mostly) are dropped
/// rather than failing the whole import; each drop is recorded in
/// `issues` so the validator can surface it. A missing bar beats a
/// failed import.
#[derive(Debug)]
pub struct PortfolioImport {
    pub projects: Vec<Project>,
    pub retentions: Vec<Retention>,
    pub issues: Vec<String>,
}

/// Parse a portfolio export file into domain structures
pub fn parse_portfolio_json(json_path: &Path) -> Result<PortfolioImport> {
    let json_content = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))?;

    parse_portfolio_json_str(&json_content)
}

/// Parse a portfolio export from a string
pub fn parse_portfolio_json_str(json_str: &str) -> Result<PortfolioImport> {
    // First validate that it's valid JSON at all
    let json_value: serde_json::Value = serde_json::from_str(json_str).with_context(|| {
        let preview = if json_str.len() > 500 {
            format!("{}...", &json_str[..500])
        } else {
            json_str.to_string()
        };
        format!("Invalid JSON syntax. First 500 chars: {}", preview)
    })?;

    // Check the container key before attempting a typed parse
    if !json_value.is_object() || !json_value.as_object().unwrap().contains_key("projects") {
        anyhow::bail!(
            "JSON must contain a 'projects' key. Found keys: {:?}",
            json_value.as_object().map(|o| o.keys().collect::<Vec<_>>())
        );
    }

    // Typed deserialize with a path to the offending field on mismatch
    let deserializer = json_value.clone();
    let portfolio: PortfolioJson = serde_path_to_error::deserialize(deserializer).map_err(|e| {
        anyhow::anyhow!(
            "JSON deserialization error at '{}': {}",
            e.path(),
            e.inner()
        )
    })?;

    let mut issues = Vec::new();

    let projects: Vec<Project> = portfolio
        .projects
        .into_iter()
        .filter_map(|raw| convert_project(raw, &mut issues))
        .collect();

    let retentions: Vec<Retention> = portfolio
        .retentions
        .into_iter()
        .filter_map(|raw| convert_retention(raw, &mut issues))
        .collect();

    Ok(PortfolioImport {
        projects,
        retentions,
        issues,
    })
}

/// Convert a raw project to the domain model, recording drops.
fn convert_project(raw: RawProject, issues: &mut Vec<String>) -> Option<Project> {
    let start = calendar::parse_iso_date(&raw.start_date);
    let end = calendar::parse_iso_date(&raw.end_date);

    let (start, end) = match (start, end) {
        (Some(s), Some(e)) => (s, e),
        _ => {
            issues.push(format!(
                "Project {}: unparseable programme dates ({:?} .. {:?}), dropped",
                raw.project_id, raw.start_date, raw.end_date
            ));
            return None;
        }
    };

    let stage = match ProjectStage::from_key(&raw.stage) {
        Some(stage) => stage,
        None => {
            if !raw.stage.is_empty() {
                issues.push(format!(
                    "Project {}: unknown stage \"{}\", defaulting to planning",
                    raw.project_id, raw.stage
                ));
            }
            ProjectStage::Planning
        }
    };

    let phases = raw
        .phases
        .into_iter()
        .filter_map(|p| convert_phase(&raw.project_id, p, issues))
        .collect();

    Some(Project {
        project_id: raw.project_id,
        name: raw.name,
        client: raw.client,
        stage,
        site: raw.site.map(|s| SiteLocation {
            lat: s.lat,
            lon: s.lng,
        }),
        range: DateRange::new(start, end),
        phases,
        contract_value: raw.contract_value,
    })
}

fn convert_phase(project_id: &str, raw: RawPhase, issues: &mut Vec<String>) -> Option<Phase> {
    let start = calendar::parse_iso_date(&raw.start_date);
    let end = calendar::parse_iso_date(&raw.end_date);

    match (start, end) {
        (Some(s), Some(e)) => Some(Phase {
            name: raw.name,
            trade: raw.trade,
            range: DateRange::new(s, e),
        }),
        _ => {
            issues.push(format!(
                "Project {}: phase \"{}\" has unparseable dates, dropped",
                project_id, raw.name
            ));
            None
        }
    }
}

fn convert_retention(raw: RawRetention, issues: &mut Vec<String>) -> Option<Retention> {
    let practical_completion = match raw.practical_completion {
        Some(ref s) => match calendar::parse_iso_date(s) {
            Some(date) => Some(date),
            None => {
                issues.push(format!(
                    "Retention {}: unparseable practical completion \"{}\", treated as not set",
                    raw.retention_id, s
                ));
                None
            }
        },
        None => None,
    };

    let stage = match raw.stage {
        Some(ref s) => match RetentionStage::from_key(s) {
            Some(stage) => stage,
            None => {
                issues.push(format!(
                    "Retention {}: unknown stage \"{}\", defaulting to held",
                    raw.retention_id, s
                ));
                RetentionStage::Held
            }
        },
        None => RetentionStage::Held,
    };

    // Moiety amounts and due dates are filled in by the enricher.
    Some(Retention {
        retention_id: raw.retention_id,
        project_id: raw.project_id,
        contractor: raw.contractor,
        contract_value: raw.contract_value,
        retention_percent: raw.retention_percent,
        practical_completion,
        dlp_months: raw.dlp_months,
        stage,
        first_moiety: Moiety {
            amount: 0.0,
            due: None,
            released: raw.first_moiety_released,
        },
        second_moiety: Moiety {
            amount: 0.0,
            due: None,
            released: raw.second_moiety_released,
        },
    })
}
