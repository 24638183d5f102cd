//! Derived-field enrichment for imported data.
//!
//! The portfolio export carries only the contract terms; the moiety
//! schedule (amounts and due dates) is derived here, phases are put in
//! start order, and board stages are reconciled with the release flags.

use serde::{Deserialize, Serialize};

use crate::config::RetentionSettings;
use crate::core::domain::{Project, Retention, RetentionStage};
use crate::time::calendar;

/// Counts of what enrichment touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichmentSummary {
    pub moieties_scheduled: usize,
    pub stages_reconciled: usize,
    pub phases_reordered: usize,
}

/// Enrich parsed projects and retentions in place.
///
/// - Phases are sorted by start date within each project.
/// - Zero moiety amounts are filled from the contract terms (each
///   moiety is half of `contract_value * retention_percent / 100`).
/// - Missing due dates are derived: first moiety at practical
///   completion, second at practical completion plus the DLP.
/// - A record whose moieties are both released is moved to the
///   `Released` stage if the import said otherwise.
pub fn enrich(
    projects: &mut [Project],
    retentions: &mut [Retention],
    settings: &RetentionSettings,
) -> EnrichmentSummary {
    let mut summary = EnrichmentSummary::default();

    for project in projects.iter_mut() {
        let already_sorted = project
            .phases
            .windows(2)
            .all(|w| w[0].range.start <= w[1].range.start);
        if !already_sorted {
            project.phases.sort_by_key(|p| p.range.start);
            summary.phases_reordered += 1;
        }
    }

    for retention in retentions.iter_mut() {
        if retention.retention_percent == 0.0 {
            retention.retention_percent = settings.default_percent;
        }
        if retention.dlp_months == 0 {
            retention.dlp_months = settings.default_dlp_months;
        }

        let moiety_value = retention.moiety_value();
        let mut scheduled = false;

        if retention.first_moiety.amount == 0.0 && moiety_value > 0.0 {
            retention.first_moiety.amount = moiety_value;
            scheduled = true;
        }
        if retention.second_moiety.amount == 0.0 && moiety_value > 0.0 {
            retention.second_moiety.amount = moiety_value;
            scheduled = true;
        }

        if let Some(pc) = retention.practical_completion {
            if retention.first_moiety.due.is_none() {
                retention.first_moiety.due = Some(pc);
                scheduled = true;
            }
            if retention.second_moiety.due.is_none() {
                retention.second_moiety.due =
                    Some(calendar::add_months(pc, retention.dlp_months));
                scheduled = true;
            }
        }

        if scheduled {
            summary.moieties_scheduled += 1;
        }

        if retention.is_closed() && retention.stage != RetentionStage::Released {
            retention.stage = RetentionStage::Released;
            summary.stages_reconciled += 1;
        }
    }

    summary
}
