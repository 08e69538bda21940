use mtto_report::normalize::clean_orders;
use mtto_report::types::RawOrderRow;
use mtto_report::{MaintenanceKind, OrderStatus};

fn canonical_row() -> RawOrderRow {
    RawOrderRow {
        order_number: Some("1042".into()),
        kind: Some("PREVENTIVO".into()),
        status: Some("CULMINADO".into()),
        equipment: Some("EQ-001".into()),
        component: Some("RODAMIENTO".into()),
        technical_location: Some("PLANTA-A".into()),
        start_date: Some("2026-03-02".into()),
        end_date: Some("2026-03-02".into()),
        start_time: Some("08:00".into()),
        end_time: Some("09:00".into()),
        available_min: Some("480".into()),
        tr_min: Some("55".into()),
        tfc_min: Some("10".into()),
        tfs_min: Some("20".into()),
        overtime_min: Some("30".into()),
        production_affected: Some("SI".into()),
        responsible: Some("Juan Pérez".into()),
        hour_type: Some("50%".into()),
        ..Default::default()
    }
}

// Re-serialize a cleaned order back into the canonical raw shape.
fn to_raw(order: &mtto_report::WorkOrder) -> RawOrderRow {
    RawOrderRow {
        order_number: order.order_number.map(|n| n.to_string()),
        kind: Some(order.kind.label().to_string()),
        status: Some(
            match &order.status {
                OrderStatus::Culminado => "CULMINADO",
                OrderStatus::EnProceso => "EN PROCESO",
                OrderStatus::Pendiente => "PENDIENTE",
                OrderStatus::SinClasificar(s) => s.as_str(),
            }
            .to_string(),
        ),
        equipment: Some(order.equipment.clone()),
        component: Some(order.component.clone()),
        technical_location: Some(order.technical_location.clone()),
        start_date: order.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
        end_date: order.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
        start_time: order.start_time.map(|t| t.format("%H:%M").to_string()),
        end_time: order.end_time.map(|t| t.format("%H:%M").to_string()),
        available_min: Some(order.available_min.to_string()),
        tr_min: Some(order.tr_min.to_string()),
        tfc_min: Some(order.tfc_min.to_string()),
        tfs_min: Some(order.tfs_min.to_string()),
        overtime_min: Some(order.overtime_min.to_string()),
        production_affected: Some(if order.production_affected { "SI" } else { "NO" }.into()),
        responsible: Some(order.responsible.clone()),
        hour_type: Some(order.hour_type.clone()),
        ..Default::default()
    }
}

#[test]
fn normalization_is_idempotent_on_canonical_input() {
    let raw = vec![canonical_row()];
    let (once, _) = clean_orders(&raw);
    let (twice, report) = clean_orders(&[to_raw(&once[0])]);

    assert_eq!(report.coerced_numbers, 0);
    assert_eq!(once[0].kind, twice[0].kind);
    assert_eq!(once[0].status, twice[0].status);
    assert_eq!(once[0].start_date, twice[0].start_date);
    assert_eq!(once[0].end_date, twice[0].end_date);
    assert_eq!(once[0].available_min, twice[0].available_min);
    assert_eq!(once[0].tr_min, twice[0].tr_min);
    assert_eq!(once[0].tfs_min, twice[0].tfs_min);
    assert_eq!(once[0].overtime_min, twice[0].overtime_min);
    assert_eq!(once[0].production_affected, twice[0].production_affected);
    assert_eq!(once[0].responsible, twice[0].responsible);
}

#[test]
fn cleaning_never_filters_rows() {
    // Earlier dashboard revisions filtered to CULMINADO inside the cleaner;
    // that filter is now an explicit separate step.
    let mut pending = canonical_row();
    pending.status = Some("PENDIENTE".into());
    let mut unknown = canonical_row();
    unknown.status = Some("ANULADO".into());
    let raw = vec![canonical_row(), pending, unknown];

    let (orders, report) = clean_orders(&raw);
    assert_eq!(orders.len(), 3);
    assert_eq!(report.unclassified_status, 1);
    assert_eq!(orders[0].status, OrderStatus::Culminado);
    assert_eq!(orders[1].status, OrderStatus::Pendiente);
    assert!(matches!(orders[2].status, OrderStatus::SinClasificar(_)));

    let completed = mtto_report::completed_only(&orders);
    assert_eq!(completed.len(), 1);
}

#[test]
fn bad_dates_produce_nulls_not_failures() {
    let mut row = canonical_row();
    row.start_date = Some("mañana".into());
    let (orders, report) = clean_orders(&[row]);
    assert_eq!(orders.len(), 1);
    assert!(orders[0].start_date.is_none());
    assert_eq!(report.bad_dates, 1);
}

#[test]
fn empty_input_is_fine() {
    let (orders, report) = clean_orders(&[]);
    assert!(orders.is_empty());
    assert_eq!(report.rows, 0);
    assert!(!report.status_column_present);
}

#[test]
fn kind_classification_survives_cleaning() {
    let mut row = canonical_row();
    row.kind = Some("Correctivo de Emergencia".into());
    let (orders, _) = clean_orders(&[row]);
    assert_eq!(orders[0].kind, MaintenanceKind::CorrectivoEmergencia);
}
