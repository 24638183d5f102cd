//! Search and filter over the in-memory collections.
//!
//! The dashboard's search box and filter chips funnel into these
//! functions. All criteria are optional and combine with AND; a default
//! filter passes everything through.

use chrono::NaiveDate;

use crate::core::domain::{DateRange, Project, ProjectStage, Retention, RetentionStage};

/// Criteria for the project list and timeline views.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Case-insensitive substring match on name, client, or id.
    pub text: Option<String>,
    /// Keep only projects in one of these stages.
    pub stages: Option<Vec<ProjectStage>>,
    /// Keep only projects whose programme overlaps this range.
    pub active_during: Option<DateRange>,
}

/// Criteria for the retention board and list views.
#[derive(Debug, Clone, Default)]
pub struct RetentionFilter {
    /// Case-insensitive substring match on contractor, project id, or id.
    pub text: Option<String>,
    /// Keep only records in one of these board stages.
    pub stages: Option<Vec<RetentionStage>>,
    /// Keep only records with an unreleased moiety due on or before this
    /// date.
    pub due_on_or_before: Option<NaiveDate>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Apply a [`ProjectFilter`].
pub fn filter_projects<'a>(projects: &'a [Project], filter: &ProjectFilter) -> Vec<&'a Project> {
    let needle = filter.text.as_ref().map(|t| t.trim().to_lowercase());

    projects
        .iter()
        .filter(|project| {
            if let Some(ref needle) = needle {
                if !needle.is_empty()
                    && !contains_ci(&project.name, needle)
                    && !contains_ci(&project.client, needle)
                    && !contains_ci(&project.project_id, needle)
                {
                    return false;
                }
            }

            if let Some(ref stages) = filter.stages {
                if !stages.contains(&project.stage) {
                    return false;
                }
            }

            if let Some(ref window) = filter.active_during {
                if !project.range.overlaps(window) {
                    return false;
                }
            }

            true
        })
        .collect()
}

/// Apply a [`RetentionFilter`].
pub fn filter_retentions<'a>(
    retentions: &'a [Retention],
    filter: &RetentionFilter,
) -> Vec<&'a Retention> {
    let needle = filter.text.as_ref().map(|t| t.trim().to_lowercase());

    retentions
        .iter()
        .filter(|retention| {
            if let Some(ref needle) = needle {
                if !needle.is_empty()
                    && !contains_ci(&retention.contractor, needle)
                    && !contains_ci(&retention.project_id, needle)
                    && !contains_ci(&retention.retention_id, needle)
                {
                    return false;
                }
            }

            if let Some(ref stages) = filter.stages {
                if !stages.contains(&retention.stage) {
                    return false;
                }
            }

            if let Some(cutoff) = filter.due_on_or_before {
                match retention.next_due() {
                    Some(due) if due <= cutoff => {}
                    _ => return false,
                }
            }

            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::sample;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn default_filter_passes_everything() {
        let projects = sample::sample_projects();
        let kept = filter_projects(&projects, &ProjectFilter::default());
        assert_eq!(kept.len(), projects.len());
    }

    #[test]
    fn text_search_is_case_insensitive() {
        let projects = sample::sample_projects();

        let filter = ProjectFilter {
            text: Some("harbour".to_string()),
            ..Default::default()
        };
        let kept = filter_projects(&projects, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].project_id, "P-1001");

        // Client names match too.
        let filter = ProjectFilter {
            text: Some("MERIDIAN".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_projects(&projects, &filter).len(), 1);
    }

    #[test]
    fn stage_and_window_criteria_combine() {
        let projects = sample::sample_projects();

        let filter = ProjectFilter {
            stages: Some(vec![ProjectStage::Civil, ProjectStage::Structure]),
            active_during: Some(DateRange::new(d(2025, 7, 1), d(2025, 8, 1))),
            ..Default::default()
        };
        let kept = filter_projects(&projects, &filter);

        // Harbour Point (structure) and Ferry Wharf (civil) both run
        // through July 2025.
        let ids: Vec<&str> = kept.iter().map(|p| p.project_id.as_str()).collect();
        assert_eq!(ids, vec!["P-1001", "P-1006"]);
    }

    #[test]
    fn due_cutoff_keeps_only_open_records() {
        let retentions = sample::sample_retentions();

        let filter = RetentionFilter {
            due_on_or_before: Some(d(2025, 12, 31)),
            ..Default::default()
        };
        let kept = filter_retentions(&retentions, &filter);

        // R-2002 (due Oct 2025) and R-2003 (due Dec 2025). R-2004 is
        // fully released, R-2005 has no schedule yet, R-2001's open
        // moiety is due in 2026.
        let ids: Vec<&str> = kept.iter().map(|r| r.retention_id.as_str()).collect();
        assert_eq!(ids, vec!["R-2002", "R-2003"]);
    }

    #[test]
    fn board_stage_filter() {
        let retentions = sample::sample_retentions();
        let filter = RetentionFilter {
            stages: Some(vec![RetentionStage::Held]),
            ..Default::default()
        };
        assert_eq!(filter_retentions(&retentions, &filter).len(), 2);
    }
}
