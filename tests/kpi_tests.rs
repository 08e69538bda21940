use mtto_report::kpi::{plant_kpis, reliability_kpis};
use mtto_report::{MaintenanceKind, WorkOrder};

fn affecting(available: f64, tfs: f64, tr: f64) -> WorkOrder {
    WorkOrder {
        available_min: available,
        tfs_min: tfs,
        tr_min: tr,
        production_affected: true,
        ..Default::default()
    }
}

#[test]
fn single_order_availability_scenario() {
    // available 480, TFS 60, affecting production:
    // TO = 420, disponibilidad 87.5%, indisponibilidad 12.5%.
    let m = plant_kpis(&[affecting(480.0, 60.0, 30.0)]);
    assert_eq!(m.td_min, 480.0);
    assert_eq!(m.to_min, 420.0);
    assert!((m.availability_pct - 87.5).abs() < 1e-9);
    assert!((m.unavailability_pct - 12.5).abs() < 1e-9);
    assert_eq!(m.failure_count, 1);
    assert_eq!(m.mtbf_min, 480.0);
    assert_eq!(m.mttf_min, 420.0);
    assert_eq!(m.mttr_min, 30.0);
}

#[test]
fn availability_is_bounded_and_complementary() {
    let cases = vec![
        vec![affecting(480.0, 60.0, 30.0)],
        vec![affecting(100.0, 100.0, 50.0)],
        // TFS exceeding TD: TO clamps at 0, availability at 0
        vec![affecting(100.0, 250.0, 10.0)],
        vec![affecting(480.0, 0.0, 0.0), affecting(240.0, 120.0, 60.0)],
    ];
    for orders in cases {
        let m = plant_kpis(&orders);
        assert!((0.0..=100.0).contains(&m.availability_pct));
        if m.td_min > 0.0 && m.tfs_min <= m.td_min {
            assert!((m.availability_pct + m.unavailability_pct - 100.0).abs() < 1e-9);
        }
    }
}

#[test]
fn empty_input_yields_all_zeros() {
    let m = plant_kpis(&[]);
    assert_eq!(m.td_min, 0.0);
    assert_eq!(m.availability_pct, 0.0);
    assert_eq!(m.mtbf_min, 0.0);
    assert_eq!(m.mttr_min, 0.0);
    assert_eq!(m.maintainability, 0.0);
    assert!(m.availability_pct.is_finite());
}

#[test]
fn non_affecting_orders_count_toward_td_only() {
    let mut quiet = affecting(480.0, 999.0, 999.0);
    quiet.production_affected = false;
    let m = plant_kpis(&[quiet, affecting(480.0, 60.0, 30.0)]);
    assert_eq!(m.td_min, 960.0);
    assert_eq!(m.tfs_min, 60.0);
    assert_eq!(m.tr_min, 30.0);
    assert_eq!(m.failure_count, 1);
}

#[test]
fn maintainability_matches_published_formula() {
    // landa*TD cancels to the failure count; the published formula is kept
    // exactly as the plant reports it.
    let m = plant_kpis(&[affecting(480.0, 60.0, 30.0), affecting(480.0, 30.0, 15.0)]);
    let expected = 1.0 - (-2.0f64).exp();
    assert!((m.maintainability - expected).abs() < 1e-12);
}

#[test]
fn kind_breakdown_shares_repair_time() {
    let mut prev = affecting(480.0, 0.0, 75.0);
    prev.kind = MaintenanceKind::Preventivo;
    let mut emer = affecting(480.0, 60.0, 25.0);
    emer.kind = MaintenanceKind::CorrectivoEmergencia;
    // not production-affecting, still part of the breakdown
    let mut cond = WorkOrder {
        kind: MaintenanceKind::BasadoEnCondicion,
        tr_min: 100.0,
        ..Default::default()
    };
    cond.production_affected = false;

    let m = plant_kpis(&[prev, emer, cond]);
    let b = &m.kind_breakdown;
    assert!((b.preventivo_pct - 37.5).abs() < 1e-9);
    assert!((b.correctivo_emergencia_pct - 12.5).abs() < 1e-9);
    assert!((b.basado_en_condicion_pct - 50.0).abs() < 1e-9);
    let sum = b.preventivo_pct
        + b.basado_en_condicion_pct
        + b.correctivo_planificado_pct
        + b.correctivo_emergencia_pct
        + b.mejora_pct
        + b.otros_pct;
    assert!((sum - 100.0).abs() < 1e-9);
}

#[test]
fn reliability_variant_counts_every_emergency() {
    let mut with_stop = affecting(480.0, 60.0, 40.0);
    with_stop.kind = MaintenanceKind::CorrectivoEmergencia;
    let mut without_stop = WorkOrder {
        kind: MaintenanceKind::CorrectivoEmergencia,
        available_min: 480.0,
        tr_min: 20.0,
        ..Default::default()
    };
    without_stop.production_affected = false;
    let mut preventive = affecting(480.0, 30.0, 10.0);
    preventive.kind = MaintenanceKind::Preventivo;

    let r = reliability_kpis(&[with_stop, without_stop, preventive]);
    // two emergencies, one with a production stoppage; the preventive order
    // is outside the reliability scope entirely
    assert_eq!(r.failure_count, 2);
    assert_eq!(r.failures_with_stoppage, 1);
    assert_eq!(r.td_min, 960.0);
    assert_eq!(r.tfs_min, 60.0);
    assert_eq!(r.tr_min, 40.0);
    assert_eq!(r.mtbf_min, 480.0);
    assert_eq!(r.mttr_min, 20.0);
}

#[test]
fn accumulated_overtime_ignores_production_flag() {
    let mut a = affecting(480.0, 0.0, 0.0);
    a.overtime_min = 90.0;
    let mut b = WorkOrder {
        overtime_min: 30.0,
        ..Default::default()
    };
    b.production_affected = false;
    let m = plant_kpis(&[a, b]);
    assert_eq!(m.overtime_min, 120.0);
}
