use chrono::NaiveDate;

use crate::api::{CertificateAnalysis, ClaimLine, PaymentClaim};
use crate::core::domain::{DateRange, Project, Retention};
use crate::store::repository::PortfolioRepository;

/// Days of overlap between two ranges, zero when disjoint.
fn overlap_days(a: &DateRange, b: &DateRange) -> i64 {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);
    (end - start).num_days().max(0)
}

/// Build the printable payment-claim view model for one claim period.
///
/// The claimed amount is apportioned over the phases worked during the
/// period, pro rata by days: each phase's share of the contract value is
/// its share of the total programmed phase time. A project with no
/// usable phases claims against the overall programme instead.
pub fn build_payment_claim(
    project: &Project,
    retention: &Retention,
    claim_number: u32,
    period: DateRange,
) -> PaymentClaim {
    let total_phase_days: i64 = project
        .phases
        .iter()
        .filter(|p| p.range.is_valid())
        .map(|p| p.range.duration_days())
        .sum();

    let mut lines: Vec<ClaimLine> = Vec::new();

    if total_phase_days > 0 {
        for phase in project.phases.iter().filter(|p| p.range.is_valid()) {
            let worked = overlap_days(&phase.range, &period);
            if worked <= 0 {
                continue;
            }

            lines.push(ClaimLine {
                description: phase.name.clone(),
                trade: phase.trade.clone(),
                value: project.contract_value * worked as f64 / total_phase_days as f64,
            });
        }
    } else if project.range.is_valid() && project.range.duration_days() > 0 {
        let worked = overlap_days(&project.range, &period);
        if worked > 0 {
            lines.push(ClaimLine {
                description: "Works completed".to_string(),
                trade: String::new(),
                value: project.contract_value * worked as f64
                    / project.range.duration_days() as f64,
            });
        }
    }

    let subtotal: f64 = lines.iter().map(|l| l.value).sum();
    let retention_withheld = subtotal * retention.retention_percent / 100.0;

    PaymentClaim {
        claim_number,
        project_id: project.project_id.clone(),
        project_name: project.name.clone(),
        client: project.client.clone(),
        contractor: retention.contractor.clone(),
        period_start: period.start,
        period_end: period.end,
        lines,
        subtotal,
        retention_withheld,
        total_payable: subtotal - retention_withheld,
    }
}

/// Get a payment claim for a stored project and retention record.
pub fn get_payment_claim(
    repo: &dyn PortfolioRepository,
    project_id: &str,
    retention_id: &str,
    claim_number: u32,
    period: DateRange,
) -> Result<PaymentClaim, String> {
    let project = repo.get_project(project_id).map_err(|e| e.to_string())?;
    let retention = repo.get_retention(retention_id).map_err(|e| e.to_string())?;

    if retention.project_id != project.project_id {
        return Err(format!(
            "Retention {} belongs to project {}, not {}",
            retention_id, retention.project_id, project_id
        ));
    }

    Ok(build_payment_claim(
        &project,
        &retention,
        claim_number,
        period,
    ))
}

/// Fixed completion date reported by the stubbed analysis.
const STUB_COMPLETION: (i32, u32, u32) = (2026, 3, 27);
const STUB_CONFIDENCE: f64 = 0.87;

/// Stubbed certificate analysis.
///
/// Always reports the same extracted completion date; the dashboard
/// presents the result as a suggestion for the user to confirm, never as
/// a fact. There is no real document processing behind this.
pub fn analyze_certificate(document_name: &str) -> CertificateAnalysis {
    let (y, m, d) = STUB_COMPLETION;
    CertificateAnalysis {
        document_name: document_name.to_string(),
        detected_completion: NaiveDate::from_ymd_opt(y, m, d).expect("valid stub date"),
        confidence: STUB_CONFIDENCE,
    }
}
