use serde::{Deserialize, Serialize};

use chrono::NaiveDate;

use crate::api::ProjectInfo;
use crate::config::RetentionSettings;
use crate::core::domain::{
    DateRange, Moiety, Phase, Project, ProjectStage, Retention, RetentionStage, SiteLocation,
};
use crate::preprocessing::enricher;
use crate::store::repository::PortfolioRepository;

/// A phase row in the setup wizard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftPhase {
    pub name: String,
    pub trade: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Everything the setup wizard collects across its steps.
///
/// All fields are optional or defaultable; validation is per step so the
/// wizard can gate "next" without demanding later-step data early.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub project_id: String,
    pub name: String,
    pub client: String,
    pub stage: Option<ProjectStage>,
    pub contract_value: Option<f64>,
    pub site: Option<SiteLocation>,

    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub phases: Vec<DraftPhase>,

    pub contractor: String,
    pub retention_percent: Option<f64>,
    pub dlp_months: Option<u32>,
}

/// Wizard steps in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupStep {
    Details,
    Schedule,
    Retention,
}

impl SetupStep {
    /// All steps in wizard order.
    pub const ALL: [SetupStep; 3] = [SetupStep::Details, SetupStep::Schedule, SetupStep::Retention];
}

/// A field-level validation issue for the wizard UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepIssue {
    pub field: String,
    pub message: String,
}

fn issue(field: &str, message: impl Into<String>) -> StepIssue {
    StepIssue {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validate one wizard step of a draft.
pub fn validate_step(draft: &ProjectDraft, step: SetupStep) -> Vec<StepIssue> {
    let mut issues = Vec::new();

    match step {
        SetupStep::Details => {
            if draft.project_id.trim().is_empty() {
                issues.push(issue("project_id", "Project id is required"));
            }
            if draft.name.trim().is_empty() {
                issues.push(issue("name", "Project name is required"));
            }
            if draft.client.trim().is_empty() {
                issues.push(issue("client", "Client is required"));
            }
            if draft.stage.is_none() {
                issues.push(issue("stage", "Select a delivery stage"));
            }
            match draft.contract_value {
                None => issues.push(issue("contract_value", "Contract value is required")),
                Some(v) if v <= 0.0 => {
                    issues.push(issue("contract_value", "Contract value must be positive"))
                }
                Some(_) => {}
            }
        }
        SetupStep::Schedule => {
            match (draft.start, draft.end) {
                (None, _) => issues.push(issue("start", "Start date is required")),
                (_, None) => issues.push(issue("end", "End date is required")),
                (Some(start), Some(end)) if end < start => {
                    issues.push(issue("end", "End date is before the start date"))
                }
                _ => {}
            }

            for (i, phase) in draft.phases.iter().enumerate() {
                let field = format!("phases[{}]", i);
                if phase.name.trim().is_empty() {
                    issues.push(issue(&field, "Phase name is required"));
                }
                match (phase.start, phase.end) {
                    (Some(s), Some(e)) => {
                        if e < s {
                            issues.push(issue(&field, "Phase ends before it starts"));
                        } else if let (Some(ps), Some(pe)) = (draft.start, draft.end) {
                            if s < ps || e > pe {
                                issues
                                    .push(issue(&field, "Phase falls outside the programme"));
                            }
                        }
                    }
                    _ => issues.push(issue(&field, "Phase dates are required")),
                }
            }
        }
        SetupStep::Retention => {
            if draft.contractor.trim().is_empty() {
                issues.push(issue("contractor", "Contractor is required"));
            }
            if let Some(percent) = draft.retention_percent {
                if !(0.0..=100.0).contains(&percent) {
                    issues.push(issue(
                        "retention_percent",
                        format!("Retention percentage out of range: {}", percent),
                    ));
                }
            }
        }
    }

    issues
}

/// Validate every step at once, for the wizard's review screen.
pub fn validate_all(draft: &ProjectDraft) -> Vec<StepIssue> {
    SetupStep::ALL
        .iter()
        .flat_map(|step| validate_step(draft, *step))
        .collect()
}

/// Materialize a completed draft into a project and its retention
/// record, with the moiety schedule derived from the configured terms.
pub fn finish(
    draft: &ProjectDraft,
    settings: &RetentionSettings,
) -> Result<(Project, Retention), String> {
    let issues = validate_all(draft);
    if !issues.is_empty() {
        let summary: Vec<String> = issues
            .iter()
            .map(|i| format!("{}: {}", i.field, i.message))
            .collect();
        return Err(format!("Draft is incomplete: {}", summary.join("; ")));
    }

    let range = DateRange::new(
        draft.start.expect("validated start"),
        draft.end.expect("validated end"),
    );

    let phases = draft
        .phases
        .iter()
        .map(|p| Phase {
            name: p.name.clone(),
            trade: p.trade.clone(),
            range: DateRange::new(
                p.start.expect("validated phase start"),
                p.end.expect("validated phase end"),
            ),
        })
        .collect();

    let project = Project {
        project_id: draft.project_id.clone(),
        name: draft.name.clone(),
        client: draft.client.clone(),
        stage: draft.stage.expect("validated stage"),
        site: draft.site,
        range,
        phases,
        contract_value: draft.contract_value.expect("validated value"),
    };

    let retention = Retention {
        retention_id: format!("{}-R1", draft.project_id),
        project_id: draft.project_id.clone(),
        contractor: draft.contractor.clone(),
        contract_value: project.contract_value,
        retention_percent: draft.retention_percent.unwrap_or(settings.default_percent),
        practical_completion: None,
        dlp_months: draft.dlp_months.unwrap_or(settings.default_dlp_months),
        stage: RetentionStage::Held,
        first_moiety: Moiety::unscheduled(),
        second_moiety: Moiety::unscheduled(),
    };

    let mut projects = vec![project];
    let mut retentions = vec![retention];
    enricher::enrich(&mut projects, &mut retentions, settings);

    Ok((projects.remove(0), retentions.remove(0)))
}

/// Finish a draft and store the result.
pub fn submit(
    repo: &dyn PortfolioRepository,
    draft: &ProjectDraft,
    settings: &RetentionSettings,
) -> Result<ProjectInfo, String> {
    let (project, retention) = finish(draft, settings)?;

    let info = repo.store_project(&project).map_err(|e| e.to_string())?;
    repo.store_retention(&retention).map_err(|e| e.to_string())?;

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryRepository;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn complete_draft() -> ProjectDraft {
        ProjectDraft {
            project_id: "P-9001".to_string(),
            name: "Depot Upgrade".to_string(),
            client: "Council".to_string(),
            stage: Some(ProjectStage::Civil),
            contract_value: Some(2_400_000.0),
            site: None,
            start: Some(d(2026, 2, 2)),
            end: Some(d(2026, 11, 27)),
            phases: vec![DraftPhase {
                name: "Pavement works".to_string(),
                trade: "civil".to_string(),
                start: Some(d(2026, 2, 2)),
                end: Some(d(2026, 6, 26)),
            }],
            contractor: "Civic Works".to_string(),
            retention_percent: None,
            dlp_months: None,
        }
    }

    #[test]
    fn empty_draft_fails_details_step() {
        let issues = validate_step(&ProjectDraft::default(), SetupStep::Details);
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();

        assert!(fields.contains(&"project_id"));
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"client"));
        assert!(fields.contains(&"stage"));
        assert!(fields.contains(&"contract_value"));
    }

    #[test]
    fn steps_validate_independently() {
        let mut draft = complete_draft();
        draft.contractor = String::new();

        assert!(validate_step(&draft, SetupStep::Details).is_empty());
        assert!(validate_step(&draft, SetupStep::Schedule).is_empty());
        assert_eq!(validate_step(&draft, SetupStep::Retention).len(), 1);
    }

    #[test]
    fn schedule_step_checks_phase_envelope() {
        let mut draft = complete_draft();
        draft.phases[0].end = Some(d(2026, 12, 24));

        let issues = validate_step(&draft, SetupStep::Schedule);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("outside the programme"));
    }

    #[test]
    fn finish_applies_configured_defaults() {
        let (project, retention) =
            finish(&complete_draft(), &RetentionSettings::default()).unwrap();

        assert_eq!(project.project_id, "P-9001");
        assert_eq!(retention.retention_id, "P-9001-R1");
        assert_eq!(retention.retention_percent, 5.0);
        assert_eq!(retention.dlp_months, 12);
        // Moiety amounts derive from the terms even before practical
        // completion is known.
        assert_eq!(retention.first_moiety.amount, 60_000.0);
        assert_eq!(retention.first_moiety.due, None);
    }

    #[test]
    fn finish_rejects_incomplete_drafts() {
        let mut draft = complete_draft();
        draft.end = None;

        let err = finish(&draft, &RetentionSettings::default()).unwrap_err();
        assert!(err.contains("end"));
    }

    #[test]
    fn submit_stores_project_and_retention() {
        let repo = MemoryRepository::new();
        let info = submit(&repo, &complete_draft(), &RetentionSettings::default()).unwrap();

        assert_eq!(info.project_id, "P-9001");
        assert!(repo.has_project("P-9001"));
        assert_eq!(repo.get_retention("P-9001-R1").unwrap().project_id, "P-9001");
    }
}
