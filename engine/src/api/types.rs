use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::algorithms::analysis::PortfolioSnapshot;
use crate::algorithms::axis::AxisBucket;
use crate::algorithms::layout::BarGeometry;
use crate::algorithms::overlaps::ProgrammeConflict;
use crate::core::domain::RetentionStage;

// =========================================================
// Shared listing types
// =========================================================

/// Lightweight project metadata for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub project_id: String,
    pub name: String,
}

/// Project row for the list view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_id: String,
    pub name: String,
    pub client: String,
    pub stage: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub contract_value: f64,
    pub value_bin: String,
    pub phase_count: usize,
}

/// Retention row for the list view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionSummary {
    pub retention_id: String,
    pub project_id: String,
    pub contractor: String,
    pub stage: String,
    pub expected_total: f64,
    pub outstanding: f64,
    pub next_due: Option<NaiveDate>,
}

// =========================================================
// Timeline view
// =========================================================

/// A clipped phase bar within a lane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseBar {
    pub name: String,
    pub trade: String,
    pub geometry: BarGeometry,
}

/// One project lane on the Gantt view.
///
/// `bar` is `None` when the programme lies entirely outside the window;
/// the lane still appears in the list so the project count is stable
/// across window changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineLane {
    pub project_id: String,
    pub name: String,
    pub client: String,
    pub stage: String,
    pub value_bin: String,
    pub bar: Option<BarGeometry>,
    pub phases: Vec<PhaseBar>,
}

/// A shutdown period overlay strip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShutdownOverlay {
    pub name: String,
    pub geometry: BarGeometry,
}

/// Complete Gantt view model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineData {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub axis: Vec<AxisBucket>,
    /// Position of the today marker, omitted when outside the window.
    pub today_pct: Option<f64>,
    pub lanes: Vec<TimelineLane>,
    pub shutdowns: Vec<ShutdownOverlay>,
    pub total_count: usize,
    /// Lanes with at least a visible programme bar.
    pub visible_count: usize,
}

// =========================================================
// Retention board
// =========================================================

/// A card on the retention board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardCard {
    pub retention_id: String,
    pub project_id: String,
    pub contractor: String,
    pub outstanding: f64,
    pub next_due: Option<NaiveDate>,
    pub overdue: bool,
}

/// One board column with its rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardColumn {
    pub stage: RetentionStage,
    pub label: String,
    pub cards: Vec<BoardCard>,
    pub count: usize,
    pub total_outstanding: f64,
}

/// Complete retention board view model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardData {
    pub columns: Vec<BoardColumn>,
    pub total_outstanding: f64,
}

// =========================================================
// Insights view
// =========================================================

/// A moiety release shown on the insights view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoietyDue {
    pub retention_id: String,
    pub project_id: String,
    pub contractor: String,
    pub amount: f64,
    pub due: NaiveDate,
    /// 1 for the first half-share, 2 for the second.
    pub moiety: u8,
}

/// Complete insights view model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsData {
    pub snapshot: PortfolioSnapshot,
    pub overdue: Vec<MoietyDue>,
    pub upcoming: Vec<MoietyDue>,
    pub conflicts: Vec<ProgrammeConflict>,
}

// =========================================================
// Site map view
// =========================================================

/// A project marker on the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMarker {
    pub project_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub stage: String,
    pub value_bin: String,
}

/// Complete map view model with marker bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMapData {
    pub markers: Vec<SiteMarker>,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
    pub unlocated_count: usize,
}

// =========================================================
// Documents
// =========================================================

/// A line item on a payment claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimLine {
    pub description: String,
    pub trade: String,
    pub value: f64,
}

/// Printable payment-claim (progress claim) view model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentClaim {
    pub claim_number: u32,
    pub project_id: String,
    pub project_name: String,
    pub client: String,
    pub contractor: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub lines: Vec<ClaimLine>,
    pub subtotal: f64,
    pub retention_withheld: f64,
    pub total_payable: f64,
}

/// Result of the stubbed certificate analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateAnalysis {
    pub document_name: String,
    pub detected_completion: NaiveDate,
    pub confidence: f64,
}
