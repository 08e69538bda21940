// End-to-end run over a small synthetic sheet: raw rows through
// normalization, status filter, expansion, KPIs and cost allocation.
use mtto_report::types::RawOrderRow;
use mtto_report::{
    allocate_overtime, clean_orders, completed_only, expand_by_technician, plant_kpis,
    weekly_availability, PersonnelRecord,
};

fn row(
    kind: &str,
    status: &str,
    date: &str,
    available: &str,
    tfs: &str,
    affected: &str,
    responsible: &str,
    overtime: &str,
) -> RawOrderRow {
    RawOrderRow {
        kind: Some(kind.into()),
        status: Some(status.into()),
        start_date: Some(date.into()),
        available_min: Some(available.into()),
        tfs_min: Some(tfs.into()),
        production_affected: Some(affected.into()),
        responsible: Some(responsible.into()),
        overtime_min: Some(overtime.into()),
        ..Default::default()
    }
}

#[test]
fn raw_sheet_to_reports() {
    let raw = vec![
        row(
            "PREVENTIVO",
            "CULMINADO",
            "2026-01-05",
            "480",
            "0",
            "NO",
            "María",
            "0",
        ),
        row(
            "CORRECTIVO DE EMERGENCIA",
            "CULMINADO",
            "2026-01-06",
            "480",
            "60",
            "SI",
            "Juan, Pedro",
            "120",
        ),
        row(
            "PREVENTIVO",
            "PENDIENTE",
            "2026-02-02",
            "480",
            "0",
            "NO",
            "María",
            "0",
        ),
    ];

    let (orders, report) = clean_orders(&raw);
    assert_eq!(orders.len(), 3);
    assert!(report.status_column_present);

    let completed = completed_only(&orders);
    assert_eq!(completed.len(), 2);

    let m = plant_kpis(&completed);
    assert_eq!(m.td_min, 960.0);
    assert_eq!(m.tfs_min, 60.0);
    assert_eq!(m.failure_count, 1);
    assert!((m.availability_pct - 93.75).abs() < 1e-9);

    let series = weekly_availability(&completed);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].week, "2026-S02");

    // expansion doubles the shared emergency row; overtime stays whole
    let expanded = expand_by_technician(&completed);
    assert_eq!(expanded.len(), 3);
    let expanded_overtime: f64 = expanded.iter().map(|o| o.overtime_min).sum();
    assert_eq!(expanded_overtime, 240.0);

    let personnel = vec![
        PersonnelRecord {
            name: "Juan".into(),
            rate_50: 2.0,
            rate_100: 3.0,
        },
        PersonnelRecord {
            name: "Pedro".into(),
            rate_50: 4.0,
            rate_100: 5.0,
        },
    ];
    let alloc = allocate_overtime(&expanded, &personnel);
    assert_eq!(alloc.accumulated.len(), 2);
    // both defaulted to the 50% tier: Pedro 2h x 4.0 = 8, Juan 2h x 2.0 = 4
    assert_eq!(alloc.accumulated[0].technician, "PEDRO");
    assert!((alloc.accumulated[0].cost - 8.0).abs() < 1e-9);
    assert!((alloc.accumulated[1].cost - 4.0).abs() < 1e-9);
    assert!(alloc.diagnostics.unmatched.is_empty());
}
