// Record normalizer: header-variant resolution and row cleaning.
//
// The source sheets were filled in by hand over several years, so header
// spellings drift (accents, alternate phrasings, unit suffixes) and cell
// values mix text into numeric columns. Everything here coerces instead of
// failing: a bad cell costs that value, never the row or the batch.
use crate::types::{MaintenanceKind, OrderStatus, RawOrderRow, WorkOrder};
use crate::util::{
    fold_header, minutes_between, parse_date_safe, parse_f64_safe, parse_i64_safe,
    parse_time_safe,
};

/// Canonical order fields a sheet column can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    OrderNumber,
    Kind,
    Status,
    Equipment,
    EquipmentName,
    Component,
    ComponentName,
    TechnicalLocation,
    TechnicalLocationName,
    StartDate,
    EndDate,
    StartTime,
    EndTime,
    DowntimeStart,
    RestartTime,
    ScheduledMin,
    AvailableMin,
    TrMin,
    TfcMin,
    TfsMin,
    NormalMin,
    OvertimeMin,
    ProductionAffected,
    Responsible,
    HourType,
}

/// Map a raw header to its canonical field, tolerating the spellings seen
/// across sheet revisions. Unknown headers return `None` and are ignored.
pub fn canonical_field(header: &str) -> Option<OrderField> {
    use OrderField::*;
    let h = fold_header(header);
    let field = match h.as_str() {
        "ORDEN" | "N ORDEN" | "NRO ORDEN" | "NUMERO DE ORDEN" | "ORDEN DE TRABAJO" | "OT" => {
            OrderNumber
        }
        "TIPO DE MTTO" | "TIPO MTTO" | "TIPO DE MANTENIMIENTO" => Kind,
        "STATUS" | "ESTADO" | "ESTATUS" => Status,
        "EQUIPO" => Equipment,
        "NOMBRE EQUIPO" | "NOMBRE DE EQUIPO" | "DENOMINACION EQUIPO" => EquipmentName,
        "COMPONENTE" | "CONJUNTO" => Component,
        "NOMBRE COMPONENTE" | "NOMBRE DE COMPONENTE" | "DENOMINACION COMPONENTE"
        | "NOMBRE CONJUNTO" => ComponentName,
        "UBICACION TECNICA" => TechnicalLocation,
        "NOMBRE UBICACION TECNICA" | "DENOMINACION UBICACION TECNICA" => TechnicalLocationName,
        "FECHA EJECUCION" | "FECHA DE EJECUCION" | "FECHA INICIO" | "FECHA DE INICIO" => StartDate,
        "FECHA FIN" | "FECHA FINAL" | "FECHA CULMINACION" | "FECHA DE CULMINACION" => EndDate,
        "HORA INICIO" | "HORA DE INICIO" => StartTime,
        "HORA FIN" | "HORA FINAL" | "HORA DE FIN" => EndTime,
        "HORA PARADA" | "HORA DE PARADA" => DowntimeStart,
        "HORA ARRANQUE" | "HORA DE ARRANQUE" => RestartTime,
        "TIEMPO PROG (MIN)" | "TIEMPO PROGRAMADO (MIN)" | "TIEMPO PROG" => ScheduledMin,
        "TIEMPO ESTIMADO DIARIO (MIN)" | "TIEMPO DISPONIBLE (MIN)" | "TDISPONIBLE" => AvailableMin,
        "TR (MIN)" | "TR" => TrMin,
        "TFC (MIN)" | "TFC" => TfcMin,
        "TFS (MIN)" | "TFS" => TfsMin,
        "H NORMAL (MIN)" | "HORA NORMAL (MIN)" | "HORAS NORMALES (MIN)" => NormalMin,
        "H EXTRA (MIN)" | "HORA EXTRA (MIN)" | "HORAS EXTRAS (MIN)" => OvertimeMin,
        "PRODUCCION AFECTADA (SI-NO)" | "PRODUCCION AFECTADA" => ProductionAffected,
        "RESPONSABLE" | "TECNICO RESPONSABLE" | "TECNICO" | "EJECUTADO POR" => Responsible,
        "TIPO DE HORA" | "TIPO HORA" => HourType,
        _ => return None,
    };
    Some(field)
}

/// Store a cell value into its canonical slot. Empty cells stay `None`.
pub fn set_field(row: &mut RawOrderRow, field: OrderField, value: &str) {
    let v = value.trim();
    if v.is_empty() {
        return;
    }
    let slot = match field {
        OrderField::OrderNumber => &mut row.order_number,
        OrderField::Kind => &mut row.kind,
        OrderField::Status => &mut row.status,
        OrderField::Equipment => &mut row.equipment,
        OrderField::EquipmentName => &mut row.equipment_name,
        OrderField::Component => &mut row.component,
        OrderField::ComponentName => &mut row.component_name,
        OrderField::TechnicalLocation => &mut row.technical_location,
        OrderField::TechnicalLocationName => &mut row.technical_location_name,
        OrderField::StartDate => &mut row.start_date,
        OrderField::EndDate => &mut row.end_date,
        OrderField::StartTime => &mut row.start_time,
        OrderField::EndTime => &mut row.end_time,
        OrderField::DowntimeStart => &mut row.downtime_start,
        OrderField::RestartTime => &mut row.restart_time,
        OrderField::ScheduledMin => &mut row.scheduled_min,
        OrderField::AvailableMin => &mut row.available_min,
        OrderField::TrMin => &mut row.tr_min,
        OrderField::TfcMin => &mut row.tfc_min,
        OrderField::TfsMin => &mut row.tfs_min,
        OrderField::NormalMin => &mut row.normal_min,
        OrderField::OvertimeMin => &mut row.overtime_min,
        OrderField::ProductionAffected => &mut row.production_affected,
        OrderField::Responsible => &mut row.responsible,
        OrderField::HourType => &mut row.hour_type,
    };
    *slot = Some(v.to_string());
}

/// Classify the `TIPO DE MTTO` text into a closed enum. Substring rules so
/// minor spelling drift ("CORRECTIVO EMERGENCIA", "MTTO PREVENTIVO") still
/// lands in the right bucket; anything else is kept verbatim as `Otro`.
pub fn classify_kind(raw: &str) -> MaintenanceKind {
    let s = fold_header(raw);
    if s.contains("PREVENTIVO") {
        MaintenanceKind::Preventivo
    } else if s.contains("CONDICION") {
        MaintenanceKind::BasadoEnCondicion
    } else if s.contains("EMERGENCIA") {
        MaintenanceKind::CorrectivoEmergencia
    } else if s.contains("CORRECTIVO") {
        MaintenanceKind::CorrectivoPlanificado
    } else if s.contains("MEJORA") {
        MaintenanceKind::Mejora
    } else {
        MaintenanceKind::Otro(raw.trim().to_uppercase())
    }
}

/// Classify a raw status cell. The substring checks run in a fixed order:
/// in-progress markers first ("PENDIENTE DE EJECUCION" is in progress, not
/// pending), then completed, then pending. Unmatched non-empty text becomes
/// `SinClasificar` rather than defaulting.
pub fn classify_status(raw: &str) -> OrderStatus {
    let s = fold_header(raw);
    if s.contains("PROCESO") || s.contains("PROGRESO") || s.contains("EJECUCI") {
        OrderStatus::EnProceso
    } else if s.contains("CULMINAD") || s.contains("COMPLETAD") {
        OrderStatus::Culminado
    } else if s.contains("PENDIENTE") {
        OrderStatus::Pendiente
    } else {
        OrderStatus::SinClasificar(s)
    }
}

/// Cleaning diagnostics, reported back to the caller alongside the records.
#[derive(Debug, Clone, Default)]
pub struct CleanReport {
    pub rows: usize,
    pub bad_dates: usize,
    pub coerced_numbers: usize,
    pub unclassified_status: usize,
    pub fallback_durations: usize,
    pub status_column_present: bool,
}

// Parse one numeric cell; counts a coercion when the cell held something
// that did not survive the parse or was negative.
fn clean_minutes(raw: Option<&str>, report: &mut CleanReport) -> f64 {
    match raw {
        None => 0.0,
        Some(s) => match parse_f64_safe(Some(s)) {
            Some(v) if v >= 0.0 => v,
            _ => {
                report.coerced_numbers += 1;
                0.0
            }
        },
    }
}

fn clean_date(raw: Option<&str>, report: &mut CleanReport) -> Option<chrono::NaiveDate> {
    match raw {
        None => None,
        Some(s) => {
            let d = parse_date_safe(Some(s));
            if d.is_none() {
                report.bad_dates += 1;
            }
            d
        }
    }
}

/// Normalize a raw orders table into `WorkOrder` records.
///
/// Deliberately does NOT filter by status: callers that want the classic
/// "completed only" view apply [`completed_only`] as a separate step.
pub fn clean_orders(rows: &[RawOrderRow]) -> (Vec<WorkOrder>, CleanReport) {
    let mut report = CleanReport::default();
    report.rows = rows.len();
    // When no row carries a status at all the sheet predates the STATUS
    // column; historically everything on it was finished work.
    report.status_column_present = rows
        .iter()
        .any(|r| r.status.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false));

    let mut out = Vec::with_capacity(rows.len());
    for raw in rows {
        let status = if !report.status_column_present {
            OrderStatus::Culminado
        } else {
            let status = classify_status(raw.status.as_deref().unwrap_or(""));
            if matches!(status, OrderStatus::SinClasificar(_)) {
                report.unclassified_status += 1;
            }
            status
        };

        let start_date = clean_date(raw.start_date.as_deref(), &mut report);
        let end_date = clean_date(raw.end_date.as_deref(), &mut report);
        let start_time = parse_time_safe(raw.start_time.as_deref());
        let end_time = parse_time_safe(raw.end_time.as_deref());

        let mut tr_min = clean_minutes(raw.tr_min.as_deref(), &mut report);
        if tr_min == 0.0 {
            // Direct TR missing or zero: fall back to the wall-clock span of
            // the job. Any unparseable part leaves it at 0.
            if let Some(mins) = minutes_between(start_date, start_time, end_date, end_time) {
                if mins > 0.0 {
                    tr_min = mins;
                    report.fallback_durations += 1;
                }
            }
        }

        // A resolved name column wins over the raw code for display/grouping.
        let pick = |name: &Option<String>, code: &Option<String>| -> String {
            name.as_deref()
                .or(code.as_deref())
                .unwrap_or("")
                .trim()
                .to_string()
        };

        let production_affected = raw
            .production_affected
            .as_deref()
            .map(|s| fold_header(s) == "SI")
            .unwrap_or(false);

        out.push(WorkOrder {
            order_number: parse_i64_safe(raw.order_number.as_deref()),
            kind: classify_kind(raw.kind.as_deref().unwrap_or("")),
            status,
            equipment: pick(&raw.equipment_name, &raw.equipment),
            component: pick(&raw.component_name, &raw.component),
            technical_location: pick(&raw.technical_location_name, &raw.technical_location),
            start_date,
            end_date,
            start_time,
            end_time,
            downtime_start: parse_time_safe(raw.downtime_start.as_deref()),
            restart_time: parse_time_safe(raw.restart_time.as_deref()),
            scheduled_min: clean_minutes(raw.scheduled_min.as_deref(), &mut report),
            available_min: clean_minutes(raw.available_min.as_deref(), &mut report),
            tr_min,
            tfc_min: clean_minutes(raw.tfc_min.as_deref(), &mut report),
            tfs_min: clean_minutes(raw.tfs_min.as_deref(), &mut report),
            normal_min: clean_minutes(raw.normal_min.as_deref(), &mut report),
            overtime_min: clean_minutes(raw.overtime_min.as_deref(), &mut report),
            production_affected,
            responsible: raw.responsible.as_deref().unwrap_or("").trim().to_string(),
            hour_type: raw.hour_type.as_deref().unwrap_or("").trim().to_string(),
        });
    }
    (out, report)
}

/// The explicit status filter the dashboard applies before computing the
/// plant indicators.
pub fn completed_only(orders: &[WorkOrder]) -> Vec<WorkOrder> {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Culminado)
        .cloned()
        .collect()
}
