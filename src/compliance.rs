// Monthly plan-compliance classification for the planned maintenance types
// (PREVENTIVO, BASADO EN CONDICIÓN, MEJORA).
//
// Each planned order for the target year falls into exactly one bucket:
//   culminada    — status CULMINADO
//   en proceso   — status EN PROCESO
//   atrasada     — PENDIENTE and both start and end already behind `today`
//   proyectada   — PENDIENTE and not atrasada
// Orders whose status text could not be classified are counted separately
// and kept out of the total, so the four buckets stay exhaustive.
use crate::types::{MonthlyComplianceRow, OrderStatus, WorkOrder};
use chrono::{Datelike, Days, NaiveDate};

/// Which candidate set to classify. The sheet history carries both
/// behaviors, so the choice is the caller's, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompliancePolicy {
    /// Every planned order of the year.
    AllOrders,
    /// Only orders whose start AND end dates lie on or before `today - 1`
    /// day; the plan-to-date view.
    ClosedBeforeToday,
}

fn in_policy(order: &WorkOrder, today: NaiveDate, policy: CompliancePolicy) -> bool {
    match policy {
        CompliancePolicy::AllOrders => true,
        CompliancePolicy::ClosedBeforeToday => {
            let cutoff = match today.checked_sub_days(Days::new(1)) {
                Some(d) => d,
                None => return false,
            };
            match (order.start_date, order.end_date) {
                (Some(start), Some(end)) => start <= cutoff && end <= cutoff,
                _ => false,
            }
        }
    }
}

fn is_delayed(order: &WorkOrder, today: NaiveDate) -> bool {
    match (order.start_date, order.end_date) {
        (Some(start), Some(end)) => start < today && end < today,
        // A pending order without both dates behind it cannot be late yet.
        _ => false,
    }
}

/// Classify the planned orders of `year` into per-month compliance rows.
/// Months are bucketed by start date; all twelve months of the year are
/// emitted so the plan chart has a stable x-axis.
pub fn monthly_compliance(
    orders: &[WorkOrder],
    year: i32,
    today: NaiveDate,
    policy: CompliancePolicy,
) -> Vec<MonthlyComplianceRow> {
    #[derive(Default, Clone)]
    struct Acc {
        completed: usize,
        in_progress: usize,
        delayed: usize,
        projected: usize,
        unclassified: usize,
    }

    let mut months = vec![Acc::default(); 12];
    for o in orders {
        if !o.kind.is_planned() {
            continue;
        }
        let Some(start) = o.start_date else { continue };
        if start.year() != year {
            continue;
        }
        if !in_policy(o, today, policy) {
            continue;
        }
        let acc = &mut months[start.month0() as usize];
        match &o.status {
            OrderStatus::Culminado => acc.completed += 1,
            OrderStatus::EnProceso => acc.in_progress += 1,
            OrderStatus::Pendiente => {
                if is_delayed(o, today) {
                    acc.delayed += 1;
                } else {
                    acc.projected += 1;
                }
            }
            OrderStatus::SinClasificar(_) => acc.unclassified += 1,
        }
    }

    months
        .into_iter()
        .enumerate()
        .map(|(i, a)| {
            let total = a.completed + a.in_progress + a.delayed + a.projected;
            let compliance = if total > 0 {
                100.0 * a.completed as f64 / total as f64
            } else {
                0.0
            };
            MonthlyComplianceRow {
                month: format!("{}-{:02}", year, i + 1),
                total,
                completed: a.completed,
                in_progress: a.in_progress,
                delayed: a.delayed,
                projected: a.projected,
                unclassified: a.unclassified,
                compliance_pct: compliance,
            }
        })
        .collect()
}
