// Time-bucketed aggregation for the trend charts: ISO-week series plus the
// per-equipment / per-component downtime tables.
use crate::types::{
    DowntimeRow, MaintenanceKind, WeeklyAvailabilityRow, WeeklyEmergencyRow, WeeklyTechnicianRow,
    WorkOrder,
};
use crate::util::normalize_name;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// ISO-week bucket key. Sorting goes through [`WeekKey::sort_key`], a plain
/// `year*100 + week` number, so 2025-S52 lands before 2026-S01 and S09
/// before S10 — a lexicographic sort of the labels would not survive the
/// year boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekKey {
    pub iso_year: i32,
    pub iso_week: u32,
}

impl WeekKey {
    pub fn from_date(date: NaiveDate) -> WeekKey {
        let iso = date.iso_week();
        WeekKey {
            iso_year: iso.year(),
            iso_week: iso.week(),
        }
    }

    pub fn label(&self) -> String {
        format!("{}-S{:02}", self.iso_year, self.iso_week)
    }

    pub fn sort_key(&self) -> i64 {
        self.iso_year as i64 * 100 + self.iso_week as i64
    }
}

/// Availability per week, over production-affecting orders. Orders without a
/// parseable start date cannot be bucketed and are skipped.
pub fn weekly_availability(orders: &[WorkOrder]) -> Vec<WeeklyAvailabilityRow> {
    #[derive(Default)]
    struct Acc {
        available: f64,
        tfs: f64,
        tr: f64,
        tfc: f64,
        failures: usize,
    }

    let mut map: HashMap<WeekKey, Acc> = HashMap::new();
    for o in orders {
        if !o.production_affected {
            continue;
        }
        let Some(date) = o.start_date else { continue };
        let e = map.entry(WeekKey::from_date(date)).or_default();
        e.available += o.available_min;
        e.tfs += o.tfs_min;
        e.tr += o.tr_min;
        e.tfc += o.tfc_min;
        e.failures += 1;
    }

    let mut keyed: Vec<(WeekKey, Acc)> = map.into_iter().collect();
    keyed.sort_by_key(|(k, _)| k.sort_key());
    keyed
        .into_iter()
        .map(|(k, a)| {
            let availability = if a.available > 0.0 {
                100.0 * (a.available - a.tfs) / a.available
            } else {
                0.0
            };
            let mtbf = if a.failures > 0 {
                a.available / a.failures as f64
            } else {
                0.0
            };
            WeeklyAvailabilityRow {
                week: k.label(),
                available_min: a.available,
                tfs_min: a.tfs,
                tr_min: a.tr,
                tfc_min: a.tfc,
                failures: a.failures,
                availability_pct: availability,
                mtbf_min: mtbf,
            }
        })
        .collect()
}

/// Emergency-corrective orders per week — every emergency order counts here,
/// with or without a production stoppage.
pub fn weekly_emergency(orders: &[WorkOrder]) -> Vec<WeeklyEmergencyRow> {
    #[derive(Default)]
    struct Acc {
        orders: usize,
        with_stoppage: usize,
        tr: f64,
    }

    let mut map: HashMap<WeekKey, Acc> = HashMap::new();
    for o in orders {
        if o.kind != MaintenanceKind::CorrectivoEmergencia {
            continue;
        }
        let Some(date) = o.start_date else { continue };
        let e = map.entry(WeekKey::from_date(date)).or_default();
        e.orders += 1;
        if o.production_affected {
            e.with_stoppage += 1;
        }
        e.tr += o.tr_min;
    }

    let mut keyed: Vec<(WeekKey, Acc)> = map.into_iter().collect();
    keyed.sort_by_key(|(k, _)| k.sort_key());
    keyed
        .into_iter()
        .map(|(k, a)| WeeklyEmergencyRow {
            week: k.label(),
            orders: a.orders,
            with_stoppage: a.with_stoppage,
            tr_min: a.tr,
            mttr_min: if a.orders > 0 { a.tr / a.orders as f64 } else { 0.0 },
        })
        .collect()
}

/// Hours worked per (week, technician) over technician-expanded orders.
/// Names are normalized so casing variants of the same technician merge.
pub fn weekly_technician_hours(expanded: &[WorkOrder]) -> Vec<WeeklyTechnicianRow> {
    #[derive(Default)]
    struct Acc {
        tr_min: f64,
        overtime_min: f64,
    }

    let mut map: HashMap<(WeekKey, String), Acc> = HashMap::new();
    for o in expanded {
        if o.responsible.trim().is_empty() {
            continue;
        }
        let Some(date) = o.start_date else { continue };
        let key = (WeekKey::from_date(date), normalize_name(&o.responsible));
        let e = map.entry(key).or_default();
        e.tr_min += o.tr_min;
        e.overtime_min += o.overtime_min;
    }

    let mut keyed: Vec<((WeekKey, String), Acc)> = map.into_iter().collect();
    keyed.sort_by(|a, b| {
        a.0 .0
            .sort_key()
            .cmp(&b.0 .0.sort_key())
            .then_with(|| a.0 .1.cmp(&b.0 .1))
    });
    keyed
        .into_iter()
        .map(|((k, tech), a)| WeeklyTechnicianRow {
            week: k.label(),
            technician: tech,
            tr_hours: a.tr_min / 60.0,
            overtime_hours: a.overtime_min / 60.0,
        })
        .collect()
}

fn downtime_by<F>(orders: &[WorkOrder], group: F) -> Vec<DowntimeRow>
where
    F: Fn(&WorkOrder) -> &str,
{
    #[derive(Default)]
    struct Acc {
        tfs: f64,
        tr: f64,
        tfc: f64,
    }

    let mut map: HashMap<String, Acc> = HashMap::new();
    for o in orders {
        if !o.production_affected {
            continue;
        }
        let name = group(o).trim();
        if name.is_empty() {
            continue;
        }
        let e = map.entry(name.to_string()).or_default();
        e.tfs += o.tfs_min;
        e.tr += o.tr_min;
        e.tfc += o.tfc_min;
    }

    let mut rows: Vec<DowntimeRow> = map
        .into_iter()
        .map(|(name, a)| DowntimeRow {
            name,
            tfs_min: a.tfs,
            tr_min: a.tr,
            tfc_min: a.tfc,
        })
        .collect();
    // Descending TFS, name as the deterministic tie-breaker.
    rows.sort_by(|a, b| {
        b.tfs_min
            .partial_cmp(&a.tfs_min)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    rows
}

/// Out-of-service time totals per equipment (production-affecting orders).
pub fn downtime_by_equipment(orders: &[WorkOrder]) -> Vec<DowntimeRow> {
    downtime_by(orders, |o| &o.equipment)
}

/// Out-of-service time totals per component (production-affecting orders).
pub fn downtime_by_component(orders: &[WorkOrder]) -> Vec<DowntimeRow> {
    downtime_by(orders, |o| &o.component)
}
