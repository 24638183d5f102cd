//! Built-in demo portfolio.
//!
//! The dashboard ships with a static dataset so every view renders
//! without an import step. Dates cluster around the 2025-2026 programme
//! years used throughout the test suite.

use chrono::NaiveDate;

use crate::core::domain::{
    DateRange, Moiety, Phase, Project, ProjectStage, Retention, RetentionStage, ShutdownPeriod,
    SiteLocation,
};
use crate::store::repository::{PortfolioRepository, StoreResult};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid sample date")
}

fn phase(name: &str, trade: &str, start: NaiveDate, end: NaiveDate) -> Phase {
    Phase {
        name: name.to_string(),
        trade: trade.to_string(),
        range: DateRange::new(start, end),
    }
}

/// The demo projects.
pub fn sample_projects() -> Vec<Project> {
    vec![
        Project {
            project_id: "P-1001".to_string(),
            name: "Harbour Point Tower".to_string(),
            client: "Meridian Developments".to_string(),
            stage: ProjectStage::Structure,
            site: Some(SiteLocation {
                lat: -33.8612,
                lon: 151.2055,
            }),
            range: DateRange::new(date(2025, 1, 6), date(2026, 8, 28)),
            phases: vec![
                phase("Bulk excavation", "civil", date(2025, 1, 6), date(2025, 3, 21)),
                phase("Piling", "civil", date(2025, 3, 24), date(2025, 5, 16)),
                phase("Core and frame", "structure", date(2025, 5, 19), date(2026, 2, 27)),
                phase("Facade", "facade", date(2025, 11, 3), date(2026, 5, 29)),
                phase("Services rough-in", "services", date(2026, 1, 5), date(2026, 6, 26)),
                phase("Fit-out", "fitout", date(2026, 4, 6), date(2026, 8, 14)),
            ],
            contract_value: 68_000_000.0,
        },
        Project {
            project_id: "P-1002".to_string(),
            name: "Northgate Logistics Hub".to_string(),
            client: "Ardent Industrial REIT".to_string(),
            stage: ProjectStage::Fitout,
            site: Some(SiteLocation {
                lat: -33.7490,
                lon: 150.9065,
            }),
            range: DateRange::new(date(2024, 9, 2), date(2025, 10, 31)),
            phases: vec![
                phase("Earthworks", "civil", date(2024, 9, 2), date(2024, 12, 20)),
                phase("Slab and tilt panels", "structure", date(2025, 1, 13), date(2025, 5, 30)),
                phase("Roofing", "roofing", date(2025, 5, 5), date(2025, 7, 11)),
                phase("Warehouse fit-out", "fitout", date(2025, 7, 14), date(2025, 10, 17)),
            ],
            contract_value: 24_500_000.0,
        },
        Project {
            project_id: "P-1003".to_string(),
            name: "St Cloud Primary School".to_string(),
            client: "Dept. of Education".to_string(),
            stage: ProjectStage::Handover,
            site: Some(SiteLocation {
                lat: -33.9173,
                lon: 151.0406,
            }),
            range: DateRange::new(date(2024, 2, 5), date(2025, 4, 11)),
            phases: vec![
                phase("Demolition", "civil", date(2024, 2, 5), date(2024, 4, 12)),
                phase("New teaching block", "structure", date(2024, 4, 15), date(2024, 12, 13)),
                phase("Library refurbishment", "fitout", date(2024, 10, 7), date(2025, 2, 28)),
                phase("External works", "civil", date(2025, 1, 20), date(2025, 4, 4)),
            ],
            contract_value: 11_200_000.0,
        },
        Project {
            project_id: "P-1004".to_string(),
            name: "Kingsway Medical Centre".to_string(),
            client: "Lumen Health Group".to_string(),
            stage: ProjectStage::Services,
            site: Some(SiteLocation {
                lat: -33.8850,
                lon: 151.1543,
            }),
            range: DateRange::new(date(2025, 3, 3), date(2026, 5, 22)),
            phases: vec![
                phase("Substructure", "civil", date(2025, 3, 3), date(2025, 6, 6)),
                phase("Frame", "structure", date(2025, 6, 9), date(2025, 12, 19)),
                phase("Medical gas and HVAC", "services", date(2025, 11, 10), date(2026, 4, 10)),
                phase("Clinical fit-out", "fitout", date(2026, 2, 2), date(2026, 5, 15)),
            ],
            contract_value: 19_800_000.0,
        },
        Project {
            project_id: "P-1005".to_string(),
            name: "Old Mill Adaptive Reuse".to_string(),
            client: "Corio Ventures".to_string(),
            stage: ProjectStage::Planning,
            site: None,
            range: DateRange::new(date(2026, 2, 2), date(2027, 6, 25)),
            phases: vec![
                phase("Heritage stabilisation", "structure", date(2026, 2, 2), date(2026, 7, 31)),
                phase("New insertions", "structure", date(2026, 8, 3), date(2027, 2, 26)),
            ],
            contract_value: 7_400_000.0,
        },
        Project {
            project_id: "P-1006".to_string(),
            name: "Ferry Wharf Upgrade".to_string(),
            client: "Transport Authority".to_string(),
            stage: ProjectStage::Civil,
            site: Some(SiteLocation {
                lat: -33.8420,
                lon: 151.2333,
            }),
            range: DateRange::new(date(2025, 6, 2), date(2025, 12, 19)),
            phases: vec![
                phase("Marine piling", "civil", date(2025, 6, 2), date(2025, 9, 5)),
                phase("Pontoon installation", "civil", date(2025, 9, 8), date(2025, 11, 14)),
                phase("Shelter and canopy", "structure", date(2025, 10, 13), date(2025, 12, 12)),
            ],
            contract_value: 4_100_000.0,
        },
    ]
}

/// The demo retention records.
pub fn sample_retentions() -> Vec<Retention> {
    vec![
        Retention {
            retention_id: "R-2001".to_string(),
            project_id: "P-1003".to_string(),
            contractor: "Hartwell Constructions".to_string(),
            contract_value: 11_200_000.0,
            retention_percent: 5.0,
            practical_completion: Some(date(2025, 4, 11)),
            dlp_months: 12,
            stage: RetentionStage::DlpActive,
            first_moiety: Moiety {
                amount: 280_000.0,
                due: Some(date(2025, 4, 11)),
                released: true,
            },
            second_moiety: Moiety {
                amount: 280_000.0,
                due: Some(date(2026, 4, 11)),
                released: false,
            },
        },
        Retention {
            retention_id: "R-2002".to_string(),
            project_id: "P-1002".to_string(),
            contractor: "Ardent Build Co".to_string(),
            contract_value: 24_500_000.0,
            retention_percent: 5.0,
            practical_completion: Some(date(2025, 10, 31)),
            dlp_months: 12,
            stage: RetentionStage::Held,
            first_moiety: Moiety {
                amount: 612_500.0,
                due: Some(date(2025, 10, 31)),
                released: false,
            },
            second_moiety: Moiety {
                amount: 612_500.0,
                due: Some(date(2026, 10, 31)),
                released: false,
            },
        },
        Retention {
            retention_id: "R-2003".to_string(),
            project_id: "P-1006".to_string(),
            contractor: "Seawall Marine".to_string(),
            contract_value: 4_100_000.0,
            retention_percent: 10.0,
            practical_completion: Some(date(2025, 12, 19)),
            dlp_months: 6,
            stage: RetentionStage::FirstMoietyDue,
            first_moiety: Moiety {
                amount: 205_000.0,
                due: Some(date(2025, 12, 19)),
                released: false,
            },
            second_moiety: Moiety {
                amount: 205_000.0,
                due: Some(date(2026, 6, 19)),
                released: false,
            },
        },
        Retention {
            retention_id: "R-2004".to_string(),
            project_id: "P-1003".to_string(),
            contractor: "Greenline Landscaping".to_string(),
            contract_value: 640_000.0,
            retention_percent: 5.0,
            practical_completion: Some(date(2024, 10, 4)),
            dlp_months: 12,
            stage: RetentionStage::Released,
            first_moiety: Moiety {
                amount: 16_000.0,
                due: Some(date(2024, 10, 4)),
                released: true,
            },
            second_moiety: Moiety {
                amount: 16_000.0,
                due: Some(date(2025, 10, 4)),
                released: true,
            },
        },
        Retention {
            retention_id: "R-2005".to_string(),
            project_id: "P-1001".to_string(),
            contractor: "Meridian Civil Partners".to_string(),
            contract_value: 9_300_000.0,
            retention_percent: 5.0,
            practical_completion: None,
            dlp_months: 12,
            stage: RetentionStage::Held,
            first_moiety: Moiety::unscheduled(),
            second_moiety: Moiety::unscheduled(),
        },
    ]
}

/// The demo shutdown periods.
pub fn sample_shutdowns() -> Vec<ShutdownPeriod> {
    vec![
        ShutdownPeriod {
            name: "Christmas shutdown".to_string(),
            range: DateRange::new(date(2025, 12, 19), date(2026, 1, 5)),
        },
        ShutdownPeriod {
            name: "Easter break".to_string(),
            range: DateRange::new(date(2025, 4, 18), date(2025, 4, 21)),
        },
    ]
}

/// Seed a repository with the full demo dataset.
pub fn seed(repo: &dyn PortfolioRepository) -> StoreResult<()> {
    for project in sample_projects() {
        repo.store_project(&project)?;
    }
    for retention in sample_retentions() {
        repo.store_retention(&retention)?;
    }
    repo.store_shutdowns(&sample_shutdowns())?;
    Ok(())
}
