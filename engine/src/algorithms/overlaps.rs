//! Programme conflict detection.
//!
//! Flags phase-level scheduling problems inside a project: inverted
//! ranges, phases that escape the project programme, and same-trade
//! phases that overlap each other. The dashboard surfaces these as
//! warnings next to the timeline.

use serde::{Deserialize, Serialize};

use crate::core::domain::Project;

/// A detected programme conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgrammeConflict {
    pub project_id: String,
    pub phase: String,
    /// Reasons joined with "; " when a phase trips more than one check.
    pub reasons: String,
}

/// Find programme conflicts within a single project.
///
/// Detects:
/// - Phases with inverted date ranges
/// - Phases extending outside the project programme
/// - Same-trade phases overlapping one another
///
/// # Arguments
/// * `project` - Project whose phases are checked
///
/// # Returns
/// List of conflicts found, one entry per offending phase
pub fn find_programme_conflicts(project: &Project) -> Vec<ProgrammeConflict> {
    let mut conflicts = Vec::new();

    for (i, phase) in project.phases.iter().enumerate() {
        let mut reasons = Vec::new();

        if !phase.range.is_valid() {
            reasons.push("Phase ends before it starts".to_string());
        } else {
            if phase.range.start < project.range.start {
                reasons.push("Phase starts before the project programme".to_string());
            }
            if phase.range.end > project.range.end {
                reasons.push("Phase runs past the project programme".to_string());
            }

            for other in project.phases.iter().skip(i + 1) {
                if other.trade == phase.trade
                    && other.range.is_valid()
                    && phase.range.overlaps(&other.range)
                {
                    reasons.push(format!("Overlaps \"{}\" ({})", other.name, other.trade));
                }
            }
        }

        if !reasons.is_empty() {
            conflicts.push(ProgrammeConflict {
                project_id: project.project_id.clone(),
                phase: phase.name.clone(),
                reasons: reasons.join("; "),
            });
        }
    }

    conflicts
}

/// Find programme conflicts across an entire portfolio.
pub fn find_portfolio_conflicts(projects: &[Project]) -> Vec<ProgrammeConflict> {
    projects.iter().flat_map(find_programme_conflicts).collect()
}
