use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tabled::Tabled;

/// One raw spreadsheet row, after header-variant mapping but before any
/// cleaning. Every field is optional text: the source sheets are messy and
/// columns come and go between revisions.
#[derive(Debug, Default, Clone)]
pub struct RawOrderRow {
    pub order_number: Option<String>,
    pub kind: Option<String>,
    pub status: Option<String>,
    pub equipment: Option<String>,
    pub equipment_name: Option<String>,
    pub component: Option<String>,
    pub component_name: Option<String>,
    pub technical_location: Option<String>,
    pub technical_location_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub downtime_start: Option<String>,
    pub restart_time: Option<String>,
    pub scheduled_min: Option<String>,
    pub available_min: Option<String>,
    pub tr_min: Option<String>,
    pub tfc_min: Option<String>,
    pub tfs_min: Option<String>,
    pub normal_min: Option<String>,
    pub overtime_min: Option<String>,
    pub production_affected: Option<String>,
    pub responsible: Option<String>,
    pub hour_type: Option<String>,
}

/// Maintenance type, normalized from the free-text `TIPO DE MTTO` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MaintenanceKind {
    Preventivo,
    BasadoEnCondicion,
    CorrectivoPlanificado,
    CorrectivoEmergencia,
    Mejora,
    Otro(String),
}

impl MaintenanceKind {
    pub fn label(&self) -> &str {
        match self {
            MaintenanceKind::Preventivo => "PREVENTIVO",
            MaintenanceKind::BasadoEnCondicion => "BASADO EN CONDICIÓN",
            MaintenanceKind::CorrectivoPlanificado => "CORRECTIVO PLANIFICADO Y PROGRAMADO",
            MaintenanceKind::CorrectivoEmergencia => "CORRECTIVO DE EMERGENCIA",
            MaintenanceKind::Mejora => "MEJORA",
            MaintenanceKind::Otro(s) => s,
        }
    }

    /// The three types counted against the maintenance plan.
    pub fn is_planned(&self) -> bool {
        matches!(
            self,
            MaintenanceKind::Preventivo
                | MaintenanceKind::BasadoEnCondicion
                | MaintenanceKind::Mejora
        )
    }
}

/// Order status, normalized from free text. `SinClasificar` keeps the raw
/// (uppercased) value so data-quality problems stay visible instead of being
/// silently folded into one of the known states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Culminado,
    EnProceso,
    Pendiente,
    SinClasificar(String),
}

/// One normalized maintenance work order. All durations are minutes and never
/// negative; missing numerics are 0, unparseable dates are `None`.
#[derive(Debug, Clone)]
pub struct WorkOrder {
    pub order_number: Option<i64>,
    pub kind: MaintenanceKind,
    pub status: OrderStatus,
    pub equipment: String,
    pub component: String,
    pub technical_location: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub downtime_start: Option<NaiveTime>,
    pub restart_time: Option<NaiveTime>,
    pub scheduled_min: f64,
    pub available_min: f64,
    pub tr_min: f64,
    pub tfc_min: f64,
    pub tfs_min: f64,
    pub normal_min: f64,
    pub overtime_min: f64,
    pub production_affected: bool,
    pub responsible: String,
    pub hour_type: String,
}

impl Default for WorkOrder {
    fn default() -> Self {
        WorkOrder {
            order_number: None,
            kind: MaintenanceKind::Otro(String::new()),
            status: OrderStatus::Culminado,
            equipment: String::new(),
            component: String::new(),
            technical_location: String::new(),
            start_date: None,
            end_date: None,
            start_time: None,
            end_time: None,
            downtime_start: None,
            restart_time: None,
            scheduled_min: 0.0,
            available_min: 0.0,
            tr_min: 0.0,
            tfc_min: 0.0,
            tfs_min: 0.0,
            normal_min: 0.0,
            overtime_min: 0.0,
            production_affected: false,
            responsible: String::new(),
            hour_type: String::new(),
        }
    }
}

/// One technician's overtime pay rates (currency per hour).
#[derive(Debug, Clone)]
pub struct PersonnelRecord {
    pub name: String,
    pub rate_50: f64,
    pub rate_100: f64,
}

/// Share of total repair time per maintenance type, in percent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KindBreakdown {
    pub preventivo_pct: f64,
    pub basado_en_condicion_pct: f64,
    pub correctivo_planificado_pct: f64,
    pub correctivo_emergencia_pct: f64,
    pub mejora_pct: f64,
    pub otros_pct: f64,
}

/// Plant-level scalar KPIs over a (typically status-filtered) record set.
/// TFS/TR/TFC only count orders that affected production; the type breakdown
/// and accumulated overtime count every order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlantKpis {
    pub td_min: f64,
    pub to_min: f64,
    pub tfs_min: f64,
    pub tr_min: f64,
    pub tfc_min: f64,
    pub availability_pct: f64,
    pub unavailability_pct: f64,
    pub failure_count: usize,
    pub mtbf_min: f64,
    pub mttf_min: f64,
    pub mttr_min: f64,
    pub maintainability: f64,
    pub kind_breakdown: KindBreakdown,
    pub overtime_min: f64,
}

/// Reliability KPIs restricted to emergency-corrective orders. Here every
/// emergency order counts as a failure; the with-stoppage subset is reported
/// separately.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReliabilityKpis {
    pub td_min: f64,
    pub to_min: f64,
    pub tfs_min: f64,
    pub tr_min: f64,
    pub availability_pct: f64,
    pub unavailability_pct: f64,
    pub failure_count: usize,
    pub failures_with_stoppage: usize,
    pub mtbf_min: f64,
    pub mttf_min: f64,
    pub mttr_min: f64,
    pub maintainability: f64,
    pub overtime_min: f64,
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct WeeklyAvailabilityRow {
    #[serde(rename = "Semana")]
    #[tabled(rename = "Semana")]
    pub week: String,
    #[serde(rename = "TDisponibleMin")]
    #[tabled(rename = "TDisponibleMin")]
    pub available_min: f64,
    #[serde(rename = "TfsMin")]
    #[tabled(rename = "TfsMin")]
    pub tfs_min: f64,
    #[serde(rename = "TrMin")]
    #[tabled(rename = "TrMin")]
    pub tr_min: f64,
    #[serde(rename = "TfcMin")]
    #[tabled(rename = "TfcMin")]
    pub tfc_min: f64,
    #[serde(rename = "Fallas")]
    #[tabled(rename = "Fallas")]
    pub failures: usize,
    #[serde(rename = "DisponibilidadPct")]
    #[tabled(rename = "DisponibilidadPct")]
    pub availability_pct: f64,
    #[serde(rename = "MtbfMin")]
    #[tabled(rename = "MtbfMin")]
    pub mtbf_min: f64,
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct WeeklyEmergencyRow {
    #[serde(rename = "Semana")]
    #[tabled(rename = "Semana")]
    pub week: String,
    #[serde(rename = "Ordenes")]
    #[tabled(rename = "Ordenes")]
    pub orders: usize,
    #[serde(rename = "ConParada")]
    #[tabled(rename = "ConParada")]
    pub with_stoppage: usize,
    #[serde(rename = "TrMin")]
    #[tabled(rename = "TrMin")]
    pub tr_min: f64,
    #[serde(rename = "MttrMin")]
    #[tabled(rename = "MttrMin")]
    pub mttr_min: f64,
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct WeeklyTechnicianRow {
    #[serde(rename = "Semana")]
    #[tabled(rename = "Semana")]
    pub week: String,
    #[serde(rename = "Tecnico")]
    #[tabled(rename = "Tecnico")]
    pub technician: String,
    #[serde(rename = "HorasTr")]
    #[tabled(rename = "HorasTr")]
    pub tr_hours: f64,
    #[serde(rename = "HorasExtras")]
    #[tabled(rename = "HorasExtras")]
    pub overtime_hours: f64,
}

/// Downtime totals for one equipment or component, production-affecting
/// orders only.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct DowntimeRow {
    #[serde(rename = "Nombre")]
    #[tabled(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "TfsMin")]
    #[tabled(rename = "TfsMin")]
    pub tfs_min: f64,
    #[serde(rename = "TrMin")]
    #[tabled(rename = "TrMin")]
    pub tr_min: f64,
    #[serde(rename = "TfcMin")]
    #[tabled(rename = "TfcMin")]
    pub tfc_min: f64,
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct MonthlyComplianceRow {
    #[serde(rename = "Mes")]
    #[tabled(rename = "Mes")]
    pub month: String,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total")]
    pub total: usize,
    #[serde(rename = "Culminadas")]
    #[tabled(rename = "Culminadas")]
    pub completed: usize,
    #[serde(rename = "EnProceso")]
    #[tabled(rename = "EnProceso")]
    pub in_progress: usize,
    #[serde(rename = "Atrasadas")]
    #[tabled(rename = "Atrasadas")]
    pub delayed: usize,
    #[serde(rename = "Proyectadas")]
    #[tabled(rename = "Proyectadas")]
    pub projected: usize,
    #[serde(rename = "SinClasificar")]
    #[tabled(rename = "SinClasificar")]
    pub unclassified: usize,
    #[serde(rename = "CumplimientoPct")]
    #[tabled(rename = "CumplimientoPct")]
    pub compliance_pct: f64,
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct WeeklyCostRow {
    #[serde(rename = "Semana")]
    #[tabled(rename = "Semana")]
    pub week: String,
    #[serde(rename = "Tecnico")]
    #[tabled(rename = "Tecnico")]
    pub technician: String,
    #[serde(rename = "HorasExtras")]
    #[tabled(rename = "HorasExtras")]
    pub overtime_hours: f64,
    #[serde(rename = "Costo")]
    #[tabled(rename = "Costo")]
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct TechnicianCostRow {
    #[serde(rename = "Tecnico")]
    #[tabled(rename = "Tecnico")]
    pub technician: String,
    #[serde(rename = "HorasExtras")]
    #[tabled(rename = "HorasExtras")]
    pub overtime_hours: f64,
    #[serde(rename = "Costo")]
    #[tabled(rename = "Costo")]
    pub cost: f64,
}
