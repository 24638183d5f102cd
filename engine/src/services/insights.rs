use chrono::{Duration, NaiveDate};

use crate::algorithms::analysis;
use crate::algorithms::overlaps;
use crate::api::{InsightsData, MoietyDue};
use crate::config::EngineConfig;
use crate::core::domain::{Moiety, Project, Retention};
use crate::store::repository::PortfolioRepository;

fn due_entry(retention: &Retention, moiety: &Moiety, index: u8) -> Option<MoietyDue> {
    if moiety.released {
        return None;
    }

    moiety.due.map(|due| MoietyDue {
        retention_id: retention.retention_id.clone(),
        project_id: retention.project_id.clone(),
        contractor: retention.contractor.clone(),
        amount: moiety.amount,
        due,
        moiety: index,
    })
}

/// Compute the insights view model.
///
/// Overdue entries are unreleased moieties already past their due date;
/// upcoming entries fall within the configured horizon. Both lists are
/// sorted by due date.
pub fn compute_insights(
    projects: &[Project],
    retentions: &[Retention],
    as_of: NaiveDate,
    horizon_days: i64,
) -> InsightsData {
    let horizon_end = as_of + Duration::days(horizon_days);

    let mut overdue = Vec::new();
    let mut upcoming = Vec::new();

    for retention in retentions {
        for entry in [
            due_entry(retention, &retention.first_moiety, 1),
            due_entry(retention, &retention.second_moiety, 2),
        ]
        .into_iter()
        .flatten()
        {
            if entry.due < as_of {
                overdue.push(entry);
            } else if entry.due <= horizon_end {
                upcoming.push(entry);
            }
        }
    }

    overdue.sort_by_key(|e| e.due);
    upcoming.sort_by_key(|e| e.due);

    InsightsData {
        snapshot: analysis::compute_snapshot(projects, retentions, as_of),
        overdue,
        upcoming,
        conflicts: overlaps::find_portfolio_conflicts(projects),
    }
}

/// Get the insights view for the current store contents.
pub fn get_insights(
    repo: &dyn PortfolioRepository,
    config: &EngineConfig,
    as_of: NaiveDate,
) -> Result<InsightsData, String> {
    let projects = repo.list_projects().map_err(|e| e.to_string())?;
    let retentions = repo.list_retentions().map_err(|e| e.to_string())?;

    Ok(compute_insights(
        &projects,
        &retentions,
        as_of,
        config.retention.upcoming_horizon_days,
    ))
}
