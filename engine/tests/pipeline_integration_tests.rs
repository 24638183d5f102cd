//! End-to-end tests for the import pipeline and loaders.

use std::io::Write;

use chrono::NaiveDate;

use siteline_engine::config::EngineConfig;
use siteline_engine::core::domain::{Granularity, TimelineWindow};
use siteline_engine::io::loaders::ShutdownsLoader;
use siteline_engine::preprocessing::PortfolioPipeline;
use siteline_engine::services::timeline;
use siteline_engine::store::{MemoryRepository, PortfolioRepository};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

const EXPORT: &str = r#"{
    "projects": [
        {
            "projectId": "P-10",
            "name": "Quayside Stage 1",
            "client": "Quayside JV",
            "stage": "structure",
            "startDate": "2025-02-03",
            "endDate": "2026-03-27",
            "contractValue": 15600000.0,
            "site": { "lat": -33.87, "lng": 151.19 },
            "phases": [
                { "name": "Basement", "trade": "civil", "startDate": "2025-02-03", "endDate": "2025-06-27" },
                { "name": "Tower frame", "trade": "structure", "startDate": "2025-06-30", "endDate": "2026-01-30" }
            ]
        },
        {
            "projectId": "P-11",
            "name": "Quayside Stage 2",
            "client": "Quayside JV",
            "stage": "planning",
            "startDate": "2026-04-06",
            "endDate": "2027-08-27",
            "contractValue": 18100000.0
        }
    ],
    "retentions": [
        {
            "retentionId": "R-10",
            "projectId": "P-10",
            "contractor": "Quayside Builders",
            "contractValue": 15600000.0,
            "retentionPercent": 5.0,
            "practicalCompletion": "2026-03-27",
            "dlpMonths": 12
        }
    ]
}"#;

#[test]
fn import_feeds_the_timeline() {
    let repo = MemoryRepository::new();
    let config = EngineConfig::default();

    let report = PortfolioPipeline::run_from_str(EXPORT, &repo, &config).unwrap();
    assert!(report.stored());
    assert_eq!(report.stored_projects, 2);
    assert_eq!(report.stored_retentions, 1);
    assert!(report.validation.warnings.is_empty());

    // The enricher derived the full moiety schedule.
    let retention = repo.get_retention("R-10").unwrap();
    assert_eq!(retention.first_moiety.amount, 390_000.0);
    assert_eq!(retention.first_moiety.due, Some(d(2026, 3, 27)));
    assert_eq!(retention.second_moiety.due, Some(d(2027, 3, 27)));

    // And the timeline renders the imported programme.
    let window = TimelineWindow::year(2025);
    let data =
        timeline::get_timeline_data(&repo, &window, Granularity::Quarter, d(2025, 7, 1)).unwrap();
    assert_eq!(data.total_count, 2);
    assert_eq!(data.visible_count, 1);
    assert_eq!(data.axis.len(), 4);
}

#[test]
fn import_from_file_roundtrip() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    write!(file, "{}", EXPORT).unwrap();

    let repo = MemoryRepository::new();
    let report =
        PortfolioPipeline::run_from_file(file.path(), &repo, &EngineConfig::default()).unwrap();

    assert!(report.stored());
    assert_eq!(repo.project_count(), 2);
}

#[test]
fn reimporting_the_same_file_is_a_noop() {
    let repo = MemoryRepository::new();
    let config = EngineConfig::default();

    PortfolioPipeline::run_from_str(EXPORT, &repo, &config).unwrap();
    let report = PortfolioPipeline::run_from_str(EXPORT, &repo, &config).unwrap();

    assert!(report.duplicate_import);
    assert!(!report.stored());
    assert_eq!(repo.project_count(), 2);
}

#[test]
fn dirty_data_is_reported_but_tolerated() {
    let json = r#"{
        "projects": [
            {
                "projectId": "P-20",
                "name": "Messy import",
                "stage": "structure",
                "startDate": "2025-01-06",
                "endDate": "2025-12-19",
                "contractValue": 2000000.0,
                "phases": [
                    { "name": "Inverted", "trade": "civil", "startDate": "2025-06-01", "endDate": "2025-02-01" },
                    { "name": "Unparseable", "trade": "civil", "startDate": "Q3 kickoff", "endDate": "2025-09-01" }
                ]
            }
        ]
    }"#;

    let repo = MemoryRepository::new();
    let report =
        PortfolioPipeline::run_from_str(json, &repo, &EngineConfig::default()).unwrap();

    // Warnings, not errors: the project still lands.
    assert!(report.stored());
    assert!(!report.validation.warnings.is_empty());
    assert_eq!(repo.project_count(), 1);

    // The unparseable phase was dropped at the parse boundary; the
    // inverted one is stored but hidden by the layout engine.
    let project = repo.get_project("P-20").unwrap();
    assert_eq!(project.phases.len(), 1);

    let window = TimelineWindow::year(2025);
    let data = timeline::get_timeline_data(&repo, &window, Granularity::Month, d(2025, 7, 1))
        .unwrap();
    assert!(data.lanes[0].phases.is_empty());
    assert!(data.lanes[0].bar.is_some());
}

#[test]
fn shutdowns_load_into_the_store() {
    let repo = MemoryRepository::new();

    let periods = ShutdownsLoader::load_from_str(
        r#"{"shutdowns": [{"name": "Christmas shutdown", "start": "2025-12-19", "end": "2026-01-05"}]}"#,
    )
    .unwrap();
    repo.store_shutdowns(&periods).unwrap();

    let window = TimelineWindow::year(2025);
    let data = timeline::get_timeline_data(&repo, &window, Granularity::Month, d(2025, 7, 1))
        .unwrap();
    assert_eq!(data.shutdowns.len(), 1);
    // The overlay is clipped to the window tail.
    let overlay = &data.shutdowns[0].geometry;
    assert!(overlay.left_pct + overlay.width_pct <= 100.0 + 1e-9);
    assert!(overlay.left_pct > 90.0);
}
