use chrono::NaiveDate;

use crate::algorithms::axis;
use crate::algorithms::layout;
use crate::api::{PhaseBar, ShutdownOverlay, TimelineData, TimelineLane};
use crate::core::domain::{Granularity, Project, ShutdownPeriod, TimelineWindow};
use crate::store::repository::PortfolioRepository;

/// Compute the Gantt view model from raw portfolio data.
///
/// Every project contributes a lane; lanes whose programme falls outside
/// the window keep an empty bar so the left-hand list stays stable while
/// the user pages through windows. Phases and shutdown periods are
/// clipped independently, and anything invisible is simply absent.
pub fn compute_timeline_data(
    projects: &[Project],
    shutdowns: &[ShutdownPeriod],
    window: &TimelineWindow,
    granularity: Granularity,
    today: NaiveDate,
) -> TimelineData {
    let lanes: Vec<TimelineLane> = projects
        .iter()
        .map(|project| {
            let phases = project
                .phases
                .iter()
                .filter_map(|phase| {
                    layout::clip_to_window(&phase.range, window).map(|geometry| PhaseBar {
                        name: phase.name.clone(),
                        trade: phase.trade.clone(),
                        geometry,
                    })
                })
                .collect();

            TimelineLane {
                project_id: project.project_id.clone(),
                name: project.name.clone(),
                client: project.client.clone(),
                stage: project.stage.label().to_string(),
                value_bin: project.value_bin().to_string(),
                bar: layout::clip_to_window(&project.range, window),
                phases,
            }
        })
        .collect();

    let shutdown_overlays = shutdowns
        .iter()
        .filter_map(|period| {
            layout::clip_to_window(&period.range, window).map(|geometry| ShutdownOverlay {
                name: period.name.clone(),
                geometry,
            })
        })
        .collect();

    let visible_count = lanes.iter().filter(|lane| lane.bar.is_some()).count();

    TimelineData {
        window_start: window.start,
        window_end: window.end,
        axis: axis::axis_buckets(window, granularity),
        today_pct: layout::marker_position(today, window),
        total_count: lanes.len(),
        visible_count,
        lanes,
        shutdowns: shutdown_overlays,
    }
}

/// Get the complete Gantt view model for the current store contents.
pub fn get_timeline_data(
    repo: &dyn PortfolioRepository,
    window: &TimelineWindow,
    granularity: Granularity,
    today: NaiveDate,
) -> Result<TimelineData, String> {
    let projects = repo.list_projects().map_err(|e| e.to_string())?;
    let shutdowns = repo.list_shutdowns().map_err(|e| e.to_string())?;

    Ok(compute_timeline_data(
        &projects,
        &shutdowns,
        window,
        granularity,
        today,
    ))
}
