// Scalar KPI aggregation: the plant indicators tab and the reliability tab.
//
// Formula conventions (all times in minutes):
//   TD  = sum of available time over every order in scope
//   TFS/TR/TFC = sums over production-affecting orders only
//   TO  = max(TD - TFS, 0)
//   disponibilidad = 100 * TO / TD, indisponibilidad = 100 * TFS / TD
//   MTBF = TD / fallas, MTTF = TO / fallas, MTTR = TR / fallas
//   mantenibilidad = 1 - exp(-landa * TD), landa = fallas / TD
// Every division is guarded; empty input produces an all-zero summary.
use crate::types::{KindBreakdown, MaintenanceKind, PlantKpis, ReliabilityKpis, WorkOrder};

struct Sums {
    td: f64,
    tfs: f64,
    tr: f64,
    tfc: f64,
    overtime: f64,
    with_stoppage: usize,
}

fn sum_orders<'a, I>(orders: I) -> Sums
where
    I: Iterator<Item = &'a WorkOrder>,
{
    let mut s = Sums {
        td: 0.0,
        tfs: 0.0,
        tr: 0.0,
        tfc: 0.0,
        overtime: 0.0,
        with_stoppage: 0,
    };
    for o in orders {
        s.td += o.available_min;
        s.overtime += o.overtime_min;
        if o.production_affected {
            s.tfs += o.tfs_min;
            s.tr += o.tr_min;
            s.tfc += o.tfc_min;
            s.with_stoppage += 1;
        }
    }
    s
}

fn ratio_pct(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        100.0 * num / den
    } else {
        0.0
    }
}

fn per_failure(total: f64, failures: usize) -> f64 {
    if failures > 0 {
        total / failures as f64
    } else {
        0.0
    }
}

// The source's published formula, kept as-is: landa cancels against TD, so
// this is effectively 1 - exp(-fallas). Do not "correct" it.
fn maintainability(failures: usize, td: f64) -> f64 {
    if td <= 0.0 {
        return 0.0;
    }
    let landa = failures as f64 / td;
    if landa > 0.0 {
        1.0 - (-landa * td).exp()
    } else {
        0.0
    }
}

/// Repair-time share per maintenance type, over every order in scope
/// (deliberately NOT restricted to production-affecting ones).
pub fn kind_breakdown(orders: &[WorkOrder]) -> KindBreakdown {
    let mut prev = 0.0;
    let mut cond = 0.0;
    let mut plan = 0.0;
    let mut emer = 0.0;
    let mut mejora = 0.0;
    let mut otros = 0.0;
    for o in orders {
        match &o.kind {
            MaintenanceKind::Preventivo => prev += o.tr_min,
            MaintenanceKind::BasadoEnCondicion => cond += o.tr_min,
            MaintenanceKind::CorrectivoPlanificado => plan += o.tr_min,
            MaintenanceKind::CorrectivoEmergencia => emer += o.tr_min,
            MaintenanceKind::Mejora => mejora += o.tr_min,
            MaintenanceKind::Otro(_) => otros += o.tr_min,
        }
    }
    let total = prev + cond + plan + emer + mejora + otros;
    KindBreakdown {
        preventivo_pct: ratio_pct(prev, total),
        basado_en_condicion_pct: ratio_pct(cond, total),
        correctivo_planificado_pct: ratio_pct(plan, total),
        correctivo_emergencia_pct: ratio_pct(emer, total),
        mejora_pct: ratio_pct(mejora, total),
        otros_pct: ratio_pct(otros, total),
    }
}

/// Plant-level summary. A failure here is any order that affected
/// production, regardless of maintenance type.
pub fn plant_kpis(orders: &[WorkOrder]) -> PlantKpis {
    let s = sum_orders(orders.iter());
    let failures = s.with_stoppage;
    let to = (s.td - s.tfs).max(0.0);
    PlantKpis {
        td_min: s.td,
        to_min: to,
        tfs_min: s.tfs,
        tr_min: s.tr,
        tfc_min: s.tfc,
        availability_pct: ratio_pct(to, s.td),
        unavailability_pct: ratio_pct(s.tfs, s.td),
        failure_count: failures,
        mtbf_min: per_failure(s.td, failures),
        mttf_min: per_failure(to, failures),
        mttr_min: per_failure(s.tr, failures),
        maintainability: maintainability(failures, s.td),
        kind_breakdown: kind_breakdown(orders),
        overtime_min: s.overtime,
    }
}

/// Reliability summary over emergency-corrective orders only. Every
/// emergency order counts as a failure whether or not production stopped;
/// the with-stoppage subset is reported alongside.
pub fn reliability_kpis(orders: &[WorkOrder]) -> ReliabilityKpis {
    let emergencies: Vec<&WorkOrder> = orders
        .iter()
        .filter(|o| o.kind == MaintenanceKind::CorrectivoEmergencia)
        .collect();
    let s = sum_orders(emergencies.iter().copied());
    let failures = emergencies.len();
    let to = (s.td - s.tfs).max(0.0);
    ReliabilityKpis {
        td_min: s.td,
        to_min: to,
        tfs_min: s.tfs,
        tr_min: s.tr,
        availability_pct: ratio_pct(to, s.td),
        unavailability_pct: ratio_pct(s.tfs, s.td),
        failure_count: failures,
        failures_with_stoppage: s.with_stoppage,
        mtbf_min: per_failure(s.td, failures),
        mttf_min: per_failure(to, failures),
        mttr_min: per_failure(s.tr, failures),
        maintainability: maintainability(failures, s.td),
        overtime_min: s.overtime,
    }
}
