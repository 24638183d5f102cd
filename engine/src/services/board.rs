use chrono::NaiveDate;
use log::info;

use crate::api::{BoardCard, BoardColumn, BoardData};
use crate::core::domain::{Retention, RetentionStage};
use crate::store::repository::PortfolioRepository;

fn card_for(retention: &Retention, today: NaiveDate) -> BoardCard {
    let next_due = retention.next_due();
    BoardCard {
        retention_id: retention.retention_id.clone(),
        project_id: retention.project_id.clone(),
        contractor: retention.contractor.clone(),
        outstanding: retention.outstanding(),
        next_due,
        overdue: next_due.map(|due| due < today).unwrap_or(false),
    }
}

/// Compute the retention board view model.
///
/// Columns appear in lifecycle order even when empty. Cards are sorted
/// by next due date (unscheduled last), then by id for a stable layout.
pub fn compute_board_data(retentions: &[Retention], today: NaiveDate) -> BoardData {
    let columns: Vec<BoardColumn> = RetentionStage::ALL
        .iter()
        .map(|stage| {
            let mut cards: Vec<BoardCard> = retentions
                .iter()
                .filter(|r| r.stage == *stage)
                .map(|r| card_for(r, today))
                .collect();

            cards.sort_by(|a, b| match (a.next_due, b.next_due) {
                (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.retention_id.cmp(&b.retention_id)),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.retention_id.cmp(&b.retention_id),
            });

            let total_outstanding = cards.iter().map(|c| c.outstanding).sum();

            BoardColumn {
                stage: *stage,
                label: stage.label().to_string(),
                count: cards.len(),
                total_outstanding,
                cards,
            }
        })
        .collect();

    let total_outstanding = columns.iter().map(|c| c.total_outstanding).sum();

    BoardData {
        columns,
        total_outstanding,
    }
}

/// Get the retention board for the current store contents.
pub fn get_board_data(
    repo: &dyn PortfolioRepository,
    today: NaiveDate,
) -> Result<BoardData, String> {
    let retentions = repo.list_retentions().map_err(|e| e.to_string())?;
    Ok(compute_board_data(&retentions, today))
}

/// Apply a drag-and-drop move on the board.
///
/// Rejects anything but a single-step advance or retreat; the store is
/// only touched when the transition is legal.
pub fn move_card(
    repo: &dyn PortfolioRepository,
    retention_id: &str,
    target: RetentionStage,
    today: NaiveDate,
) -> Result<BoardCard, String> {
    let retention = repo.get_retention(retention_id).map_err(|e| e.to_string())?;

    if !retention.stage.can_move_to(target) {
        return Err(format!(
            "Cannot move {} from \"{}\" to \"{}\"",
            retention_id,
            retention.stage.label(),
            target.label()
        ));
    }

    let updated = repo
        .set_retention_stage(retention_id, target)
        .map_err(|e| e.to_string())?;

    info!(
        "Moved retention {} to \"{}\"",
        retention_id,
        target.label()
    );

    Ok(card_for(&updated, today))
}
