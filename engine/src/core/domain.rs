//! Domain models for construction projects and retention lifecycles.
//!
//! This module provides the core data structures behind the dashboard:
//! date-ranged projects with nested phases, the timeline window they are
//! rendered against, and contract retention records with their moiety
//! release schedule.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::time::calendar;

/// A contiguous calendar interval with inclusive start and end dates.
///
/// Valid ranges have `end >= start`. Inverted ranges are tolerated rather
/// than rejected: the layout engine hides them and the validator reports
/// them, but constructing one never fails.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use siteline_engine::core::domain::DateRange;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
/// );
/// assert_eq!(range.duration_days(), 30);
/// assert!(range.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days between start and end. Negative for inverted ranges.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// `true` when `end >= start`.
    pub fn is_valid(&self) -> bool {
        self.end >= self.start
    }

    /// `true` when `date` lies within the range (inclusive on both ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// `true` when the two ranges share at least one day.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use siteline_engine::core::domain::DateRange;
    ///
    /// let d = |y, m, dd| NaiveDate::from_ymd_opt(y, m, dd).unwrap();
    /// let a = DateRange::new(d(2025, 1, 1), d(2025, 6, 30));
    /// let b = DateRange::new(d(2025, 6, 30), d(2025, 9, 1));
    /// let c = DateRange::new(d(2025, 7, 1), d(2025, 9, 1));
    /// assert!(a.overlaps(&b));
    /// assert!(!a.overlaps(&c));
    /// ```
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Timeline view granularity selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Calendar year split into 12 month buckets.
    Month,
    /// Calendar year split into 4 quarter buckets.
    Quarter,
    /// Sliding window of N week buckets from an arbitrary anchor.
    Week,
}

impl Granularity {
    /// Parse a granularity from its configuration string.
    ///
    /// # Arguments
    /// * `s` - String representation ("month", "quarter", "week")
    pub fn from_key(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "week" => Ok(Self::Week),
            _ => Err(format!("Unknown granularity: {}", s)),
        }
    }
}

/// The currently visible span of the timeline.
///
/// Derived from a [`Granularity`] selector: a whole calendar year for the
/// month and quarter modes, or an N-week window anchored at an arbitrary
/// date. The window must be non-degenerate (`end > start`) for layout
/// math to produce geometry; a degenerate window yields "not visible" for
/// every range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimelineWindow {
    /// Creates a window spanning the given calendar year.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Datelike;
    /// use siteline_engine::core::domain::TimelineWindow;
    ///
    /// let window = TimelineWindow::year(2025);
    /// assert_eq!(window.start.month(), 1);
    /// assert_eq!(window.end.month(), 12);
    /// assert_eq!(window.end.day(), 31);
    /// ```
    pub fn year(year: i32) -> Self {
        let (start, end) = calendar::year_bounds(year);
        Self { start, end }
    }

    /// Creates an N-week window starting at `anchor`.
    ///
    /// The span covers exactly `weeks * 7` days so that each of the N
    /// axis buckets maps onto an equal share of the window.
    pub fn weeks(anchor: NaiveDate, weeks: usize) -> Self {
        Self {
            start: anchor,
            end: anchor + Duration::days(7 * weeks as i64),
        }
    }

    /// Window span in days.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Site coordinates for the map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Delivery stage tag for a project.
///
/// Used only for color selection on the timeline and map views; the stage
/// carries no scheduling semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStage {
    Planning,
    Civil,
    Structure,
    Services,
    Fitout,
    Handover,
}

impl ProjectStage {
    /// All stages in delivery order.
    pub const ALL: [ProjectStage; 6] = [
        ProjectStage::Planning,
        ProjectStage::Civil,
        ProjectStage::Structure,
        ProjectStage::Services,
        ProjectStage::Fitout,
        ProjectStage::Handover,
    ];

    /// Human-readable stage label.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStage::Planning => "Planning",
            ProjectStage::Civil => "Civil",
            ProjectStage::Structure => "Structure",
            ProjectStage::Services => "Services",
            ProjectStage::Fitout => "Fit-out",
            ProjectStage::Handover => "Handover",
        }
    }

    /// Parse a stage from its import key ("planning", "fitout", ...).
    pub fn from_key(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "planning" => Some(Self::Planning),
            "civil" => Some(Self::Civil),
            "structure" => Some(Self::Structure),
            "services" => Some(Self::Services),
            "fitout" | "fit-out" => Some(Self::Fitout),
            "handover" => Some(Self::Handover),
            _ => None,
        }
    }
}

/// A named work package within a project, clipped independently against
/// the timeline window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub trade: String,
    pub range: DateRange,
}

/// A construction project with its overall programme and nested phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: String,
    pub name: String,
    pub client: String,
    pub stage: ProjectStage,
    pub site: Option<SiteLocation>,
    pub range: DateRange,
    pub phases: Vec<Phase>,
    pub contract_value: f64,
}

impl Project {
    /// `true` if the project programme covers `date`.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.range.contains(date)
    }

    /// Number of phases in the programme.
    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// Categorizes the contract value into a human-readable bin.
    ///
    /// Maps dollar values to descriptive categories for display purposes.
    /// The bins are:
    /// - "Minor (<$1M)" for values under 1 million
    /// - "Small ($1M-$5M)" for values from 1 to <5 million
    /// - "Medium ($5M-$20M)" for values from 5 to <20 million
    /// - "Major ($20M-$50M)" for values from 20 to <50 million
    /// - "Landmark (>$50M)" for values of 50 million and up
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use siteline_engine::core::domain::{DateRange, Project, ProjectStage};
    ///
    /// let project = Project {
    ///     project_id: "P-001".to_string(),
    ///     name: "Harbour Point Tower".to_string(),
    ///     client: "Meridian Developments".to_string(),
    ///     stage: ProjectStage::Structure,
    ///     site: None,
    ///     range: DateRange::new(
    ///         NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
    ///         NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
    ///     ),
    ///     phases: vec![],
    ///     contract_value: 34_500_000.0,
    /// };
    ///
    /// assert_eq!(project.value_bin(), "Major ($20M-$50M)");
    /// ```
    pub fn value_bin(&self) -> &'static str {
        if self.contract_value < 1_000_000.0 {
            "Minor (<$1M)"
        } else if self.contract_value < 5_000_000.0 {
            "Small ($1M-$5M)"
        } else if self.contract_value < 20_000_000.0 {
            "Medium ($5M-$20M)"
        } else if self.contract_value < 50_000_000.0 {
            "Major ($20M-$50M)"
        } else {
            "Landmark (>$50M)"
        }
    }
}

/// Kanban column for a retention record.
///
/// Stages progress `Held -> FirstMoietyDue -> DlpActive ->
/// SecondMoietyDue -> Released`. A board move may advance one stage or
/// retreat one stage (undoing a mistaken drag); anything else is
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionStage {
    /// Retention withheld, practical completion not yet reached.
    Held,
    /// Practical completion reached; first half-share claimable.
    FirstMoietyDue,
    /// First moiety released; defects liability period running.
    DlpActive,
    /// DLP expired; second half-share claimable.
    SecondMoietyDue,
    /// Both moieties released.
    Released,
}

impl RetentionStage {
    /// All stages in board column order.
    pub const ALL: [RetentionStage; 5] = [
        RetentionStage::Held,
        RetentionStage::FirstMoietyDue,
        RetentionStage::DlpActive,
        RetentionStage::SecondMoietyDue,
        RetentionStage::Released,
    ];

    /// Column label shown on the board.
    pub fn label(&self) -> &'static str {
        match self {
            RetentionStage::Held => "Held",
            RetentionStage::FirstMoietyDue => "1st Moiety Due",
            RetentionStage::DlpActive => "DLP Active",
            RetentionStage::SecondMoietyDue => "2nd Moiety Due",
            RetentionStage::Released => "Released",
        }
    }

    /// Parse a stage from its import key.
    pub fn from_key(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "held" => Some(Self::Held),
            "first_moiety_due" => Some(Self::FirstMoietyDue),
            "dlp_active" => Some(Self::DlpActive),
            "second_moiety_due" => Some(Self::SecondMoietyDue),
            "released" => Some(Self::Released),
            _ => None,
        }
    }

    /// Position of this stage in the board column order.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    /// `true` when a card in this stage may be dropped on `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use siteline_engine::core::domain::RetentionStage;
    ///
    /// assert!(RetentionStage::Held.can_move_to(RetentionStage::FirstMoietyDue));
    /// assert!(RetentionStage::DlpActive.can_move_to(RetentionStage::FirstMoietyDue));
    /// assert!(!RetentionStage::Held.can_move_to(RetentionStage::Released));
    /// assert!(!RetentionStage::Held.can_move_to(RetentionStage::Held));
    /// ```
    pub fn can_move_to(&self, target: RetentionStage) -> bool {
        let from = self.index() as i64;
        let to = target.index() as i64;
        (from - to).abs() == 1
    }
}

/// One of the two equal retention-release installments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moiety {
    pub amount: f64,
    pub due: Option<NaiveDate>,
    pub released: bool,
}

impl Moiety {
    /// An empty, unscheduled moiety.
    pub fn unscheduled() -> Self {
        Self {
            amount: 0.0,
            due: None,
            released: false,
        }
    }
}

/// A contract retention record tracked on the kanban board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Retention {
    pub retention_id: String,
    pub project_id: String,
    pub contractor: String,
    pub contract_value: f64,
    pub retention_percent: f64,
    pub practical_completion: Option<NaiveDate>,
    pub dlp_months: u32,
    pub stage: RetentionStage,
    pub first_moiety: Moiety,
    pub second_moiety: Moiety,
}

impl Retention {
    /// Total retention withheld under the contract terms.
    pub fn expected_total(&self) -> f64 {
        self.contract_value * self.retention_percent / 100.0
    }

    /// Value of a single half-share installment.
    ///
    /// # Examples
    ///
    /// ```
    /// use siteline_engine::core::domain::{Moiety, Retention, RetentionStage};
    ///
    /// let retention = Retention {
    ///     retention_id: "R-001".to_string(),
    ///     project_id: "P-001".to_string(),
    ///     contractor: "Apex Civil".to_string(),
    ///     contract_value: 2_000_000.0,
    ///     retention_percent: 5.0,
    ///     practical_completion: None,
    ///     dlp_months: 12,
    ///     stage: RetentionStage::Held,
    ///     first_moiety: Moiety::unscheduled(),
    ///     second_moiety: Moiety::unscheduled(),
    /// };
    ///
    /// assert_eq!(retention.expected_total(), 100_000.0);
    /// assert_eq!(retention.moiety_value(), 50_000.0);
    /// ```
    pub fn moiety_value(&self) -> f64 {
        self.expected_total() / 2.0
    }

    /// Amount still withheld (sum of unreleased moieties).
    pub fn outstanding(&self) -> f64 {
        let mut held = 0.0;
        if !self.first_moiety.released {
            held += self.first_moiety.amount;
        }
        if !self.second_moiety.released {
            held += self.second_moiety.amount;
        }
        held
    }

    /// End of the defects liability period, when known.
    pub fn dlp_end(&self) -> Option<NaiveDate> {
        self.practical_completion
            .map(|pc| calendar::add_months(pc, self.dlp_months))
    }

    /// Due date of the next unreleased moiety, if any.
    pub fn next_due(&self) -> Option<NaiveDate> {
        if !self.first_moiety.released {
            self.first_moiety.due
        } else if !self.second_moiety.released {
            self.second_moiety.due
        } else {
            None
        }
    }

    /// `true` once both moieties have been released.
    pub fn is_closed(&self) -> bool {
        self.first_moiety.released && self.second_moiety.released
    }
}

/// A named non-working period (site shutdown) overlaid on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShutdownPeriod {
    pub name: String,
    pub range: DateRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn date_range_helpers() {
        let range = DateRange::new(d(2025, 2, 1), d(2025, 2, 28));
        assert_eq!(range.duration_days(), 27);
        assert!(range.is_valid());
        assert!(range.contains(d(2025, 2, 14)));
        assert!(!range.contains(d(2025, 3, 1)));

        let inverted = DateRange::new(d(2025, 3, 1), d(2025, 2, 1));
        assert!(!inverted.is_valid());
        assert_eq!(inverted.duration_days(), -28);
    }

    #[test]
    fn window_constructors() {
        let year = TimelineWindow::year(2025);
        assert_eq!(year.start, d(2025, 1, 1));
        assert_eq!(year.end, d(2025, 12, 31));
        assert_eq!(year.span_days(), 364);

        let leap = TimelineWindow::year(2024);
        assert_eq!(leap.span_days(), 365);

        let weeks = TimelineWindow::weeks(d(2025, 6, 2), 12);
        assert_eq!(weeks.span_days(), 84);
    }

    #[test]
    fn stage_transitions_are_adjacent_only() {
        use RetentionStage::*;

        assert!(Held.can_move_to(FirstMoietyDue));
        assert!(FirstMoietyDue.can_move_to(Held));
        assert!(SecondMoietyDue.can_move_to(Released));
        assert!(!Held.can_move_to(DlpActive));
        assert!(!Released.can_move_to(Held));
        assert!(!DlpActive.can_move_to(DlpActive));
    }

    #[test]
    fn retention_derived_values() {
        let retention = Retention {
            retention_id: "r-1".to_string(),
            project_id: "p-1".to_string(),
            contractor: "Apex Civil".to_string(),
            contract_value: 4_000_000.0,
            retention_percent: 5.0,
            practical_completion: Some(d(2025, 6, 30)),
            dlp_months: 12,
            stage: RetentionStage::DlpActive,
            first_moiety: Moiety {
                amount: 100_000.0,
                due: Some(d(2025, 6, 30)),
                released: true,
            },
            second_moiety: Moiety {
                amount: 100_000.0,
                due: Some(d(2026, 6, 30)),
                released: false,
            },
        };

        assert_eq!(retention.expected_total(), 200_000.0);
        assert_eq!(retention.moiety_value(), 100_000.0);
        assert_eq!(retention.outstanding(), 100_000.0);
        assert_eq!(retention.dlp_end(), Some(d(2026, 6, 30)));
        assert_eq!(retention.next_due(), Some(d(2026, 6, 30)));
        assert!(!retention.is_closed());
    }

    #[test]
    fn value_bins_cover_boundaries() {
        let thresholds = vec![
            (500_000.0, "Minor (<$1M)"),
            (1_000_000.0, "Small ($1M-$5M)"),
            (5_000_000.0, "Medium ($5M-$20M)"),
            (20_000_000.0, "Major ($20M-$50M)"),
            (50_000_000.0, "Landmark (>$50M)"),
        ];

        for (value, expected_bin) in thresholds {
            let project = Project {
                project_id: "bin-test".to_string(),
                name: "Bin Test".to_string(),
                client: "Client".to_string(),
                stage: ProjectStage::Planning,
                site: None,
                range: DateRange::new(d(2025, 1, 1), d(2025, 12, 31)),
                phases: vec![],
                contract_value: value,
            };

            assert_eq!(project.value_bin(), expected_bin);
        }
    }
}
