use chrono::NaiveDate;
use mtto_report::weekly::{
    downtime_by_equipment, weekly_availability, weekly_emergency, weekly_technician_hours,
    WeekKey,
};
use mtto_report::{expand_by_technician, MaintenanceKind, WorkOrder};

fn on(date: &str) -> WorkOrder {
    WorkOrder {
        start_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
        production_affected: true,
        available_min: 480.0,
        ..Default::default()
    }
}

#[test]
fn week_key_orders_numerically_across_year_boundary() {
    let w52 = WeekKey::from_date(NaiveDate::from_ymd_opt(2025, 12, 24).unwrap());
    let w01 = WeekKey::from_date(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
    assert_eq!(w52.label(), "2025-S52");
    assert_eq!(w01.label(), "2026-S01");
    assert!(w52.sort_key() < w01.sort_key());

    // and the single-digit week case that breaks naive string keys
    let w09 = WeekKey {
        iso_year: 2025,
        iso_week: 9,
    };
    let w10 = WeekKey {
        iso_year: 2025,
        iso_week: 10,
    };
    assert_eq!(w09.label(), "2025-S09");
    assert!(w09.sort_key() < w10.sort_key());
}

#[test]
fn weekly_availability_series_is_sorted_and_computed_per_bucket() {
    let mut a = on("2025-12-24"); // 2025-S52
    a.tfs_min = 48.0;
    let mut b = on("2026-01-01"); // 2026-S01
    b.tfs_min = 120.0;
    let mut c = on("2026-01-02"); // 2026-S01 again
    c.tfs_min = 120.0;

    let rows = weekly_availability(&[b, c, a]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].week, "2025-S52");
    assert_eq!(rows[1].week, "2026-S01");
    assert!((rows[0].availability_pct - 90.0).abs() < 1e-9);
    // S01: available 960, tfs 240 -> 75%
    assert!((rows[1].availability_pct - 75.0).abs() < 1e-9);
    assert_eq!(rows[1].failures, 2);
    assert_eq!(rows[1].mtbf_min, 480.0);
}

#[test]
fn weekly_availability_skips_non_affecting_and_undated_orders() {
    let mut quiet = on("2026-01-07");
    quiet.production_affected = false;
    let undated = WorkOrder {
        production_affected: true,
        tfs_min: 60.0,
        ..Default::default()
    };
    let rows = weekly_availability(&[quiet, undated]);
    assert!(rows.is_empty());
}

#[test]
fn weekly_emergency_includes_orders_without_stoppage() {
    let mut e1 = on("2026-02-04");
    e1.kind = MaintenanceKind::CorrectivoEmergencia;
    e1.tr_min = 90.0;
    let mut e2 = on("2026-02-05");
    e2.kind = MaintenanceKind::CorrectivoEmergencia;
    e2.tr_min = 30.0;
    e2.production_affected = false;
    let mut prev = on("2026-02-04");
    prev.kind = MaintenanceKind::Preventivo;

    let rows = weekly_emergency(&[e1, e2, prev]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].orders, 2);
    assert_eq!(rows[0].with_stoppage, 1);
    assert_eq!(rows[0].tr_min, 120.0);
    assert_eq!(rows[0].mttr_min, 60.0);
}

#[test]
fn technician_hours_accumulate_after_expansion() {
    let mut shared = on("2026-03-04");
    shared.responsible = "Juan, Pedro".to_string();
    shared.tr_min = 120.0;
    shared.overtime_min = 60.0;
    let mut solo = on("2026-03-05");
    solo.responsible = "juan".to_string(); // casing variant merges with JUAN
    solo.tr_min = 30.0;

    let expanded = expand_by_technician(&[shared, solo]);
    let rows = weekly_technician_hours(&expanded);
    assert_eq!(rows.len(), 2);
    let juan = rows.iter().find(|r| r.technician == "JUAN").unwrap();
    assert!((juan.tr_hours - 2.5).abs() < 1e-9);
    assert!((juan.overtime_hours - 1.0).abs() < 1e-9);
    let pedro = rows.iter().find(|r| r.technician == "PEDRO").unwrap();
    assert!((pedro.tr_hours - 2.0).abs() < 1e-9);
}

#[test]
fn equipment_downtime_sorts_by_descending_tfs() {
    let mut a = on("2026-01-05");
    a.equipment = "Bomba 1".into();
    a.tfs_min = 30.0;
    let mut b = on("2026-01-06");
    b.equipment = "Molino".into();
    b.tfs_min = 200.0;
    let mut c = on("2026-01-07");
    c.equipment = "Bomba 1".into();
    c.tfs_min = 50.0;

    let rows = downtime_by_equipment(&[a, b, c]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Molino");
    assert_eq!(rows[1].name, "Bomba 1");
    assert_eq!(rows[1].tfs_min, 80.0);
}
