// Overtime cost allocation: join technician-expanded orders against the
// personnel rate table and price each overtime hour at the 50% or 100%
// premium tier.
//
// Nothing is dropped silently: unmatched technicians are priced at 0 and
// reported in the diagnostics, as are rows whose hour-type text gave no
// usable tier.
use crate::types::{PersonnelRecord, TechnicianCostRow, WeeklyCostRow, WorkOrder};
use crate::util::normalize_name;
use crate::weekly::WeekKey;
use std::collections::{BTreeSet, HashMap};

/// Overtime premium tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateTier {
    Pct50,
    Pct100,
}

/// Pick the tier from the free-text hour-type cell. Returns the tier plus
/// whether the 50% default had to be applied (token absent or ambiguous).
pub fn rate_tier(hour_type: &str) -> (RateTier, bool) {
    let has_50 = hour_type.contains("50");
    let has_100 = hour_type.contains("100");
    match (has_50, has_100) {
        (false, true) => (RateTier::Pct100, false),
        (true, false) => (RateTier::Pct50, false),
        _ => (RateTier::Pct50, true),
    }
}

fn tier_rate(record: &PersonnelRecord, tier: RateTier) -> f64 {
    match tier {
        RateTier::Pct50 => record.rate_50,
        RateTier::Pct100 => record.rate_100,
    }
}

// Exact lookup on the normalized name, then substring containment in either
// direction ("J. PEREZ" in the roster vs "JUAN PEREZ" on the order).
fn find_rate<'a>(
    roster: &'a HashMap<String, &'a PersonnelRecord>,
    name_norm: &str,
) -> Option<&'a PersonnelRecord> {
    if let Some(r) = roster.get(name_norm) {
        return Some(r);
    }
    roster
        .iter()
        .find(|(k, _)| k.contains(name_norm) || name_norm.contains(k.as_str()))
        .map(|(_, r)| *r)
}

/// Data-quality summary of one allocation pass.
#[derive(Debug, Clone, Default)]
pub struct CostDiagnostics {
    pub unmatched: Vec<String>,
    pub unmatched_rows: usize,
    pub defaulted_tier_rows: usize,
    pub no_personnel_data: bool,
}

impl CostDiagnostics {
    /// Human-readable warnings for the console.
    pub fn messages(&self) -> Vec<String> {
        let mut msgs = Vec::new();
        if self.no_personnel_data {
            msgs.push(
                "no personnel data: all costs are 0, ranking by hours instead".to_string(),
            );
        }
        if !self.unmatched.is_empty() {
            msgs.push(format!(
                "{} technician(s) without a rate match (cost 0): {}",
                self.unmatched.len(),
                self.unmatched.join(", ")
            ));
        }
        if self.defaulted_tier_rows > 0 {
            msgs.push(format!(
                "{} row(s) without a usable hour-type, defaulted to the 50% tier",
                self.defaulted_tier_rows
            ));
        }
        msgs
    }
}

#[derive(Debug, Clone, Default)]
pub struct OvertimeAllocation {
    pub weekly: Vec<WeeklyCostRow>,
    pub accumulated: Vec<TechnicianCostRow>,
    pub diagnostics: CostDiagnostics,
}

/// Allocate overtime cost per technician over technician-expanded orders.
///
/// Only rows with overtime minutes and a named technician participate.
/// Weekly rows additionally need a start date for the bucket; the
/// accumulated table counts every participating row.
pub fn allocate_overtime(
    expanded: &[WorkOrder],
    personnel: &[PersonnelRecord],
) -> OvertimeAllocation {
    let roster: HashMap<String, &PersonnelRecord> = personnel
        .iter()
        .map(|p| (normalize_name(&p.name), p))
        .collect();

    #[derive(Default)]
    struct Acc {
        hours: f64,
        cost: f64,
    }

    let mut weekly_map: HashMap<(WeekKey, String), Acc> = HashMap::new();
    let mut total_map: HashMap<String, Acc> = HashMap::new();
    let mut unmatched: BTreeSet<String> = BTreeSet::new();
    let mut unmatched_rows = 0usize;
    let mut defaulted_tier_rows = 0usize;

    for o in expanded {
        if o.overtime_min <= 0.0 {
            continue;
        }
        let name = normalize_name(&o.responsible);
        if name.is_empty() {
            continue;
        }
        let hours = o.overtime_min / 60.0;
        let (tier, defaulted) = rate_tier(&o.hour_type);
        if defaulted {
            defaulted_tier_rows += 1;
        }
        let cost = match find_rate(&roster, &name) {
            Some(record) => hours * tier_rate(record, tier),
            None => {
                unmatched.insert(name.clone());
                unmatched_rows += 1;
                0.0
            }
        };

        let total = total_map.entry(name.clone()).or_default();
        total.hours += hours;
        total.cost += cost;

        if let Some(date) = o.start_date {
            let e = weekly_map
                .entry((WeekKey::from_date(date), name))
                .or_default();
            e.hours += hours;
            e.cost += cost;
        }
    }

    let mut weekly_keyed: Vec<((WeekKey, String), Acc)> = weekly_map.into_iter().collect();
    weekly_keyed.sort_by(|a, b| {
        a.0 .0
            .sort_key()
            .cmp(&b.0 .0.sort_key())
            .then_with(|| a.0 .1.cmp(&b.0 .1))
    });
    let weekly = weekly_keyed
        .into_iter()
        .map(|((k, tech), a)| WeeklyCostRow {
            week: k.label(),
            technician: tech,
            overtime_hours: a.hours,
            cost: a.cost,
        })
        .collect();

    let no_personnel_data = personnel.is_empty();
    let mut accumulated: Vec<TechnicianCostRow> = total_map
        .into_iter()
        .map(|(tech, a)| TechnicianCostRow {
            technician: tech,
            overtime_hours: a.hours,
            cost: a.cost,
        })
        .collect();
    // With no roster every cost is 0, so rank by hours instead.
    accumulated.sort_by(|a, b| {
        let primary = if no_personnel_data {
            b.overtime_hours.partial_cmp(&a.overtime_hours)
        } else {
            b.cost.partial_cmp(&a.cost)
        };
        primary
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.technician.cmp(&b.technician))
    });

    OvertimeAllocation {
        weekly,
        accumulated,
        diagnostics: CostDiagnostics {
            unmatched: unmatched.into_iter().collect(),
            unmatched_rows,
            defaulted_tier_rows,
            no_personnel_data,
        },
    }
}
