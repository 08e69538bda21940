//! Maintenance KPI pipeline: normalize a work-order sheet, expand shared
//! jobs per technician, and aggregate the plant's reliability/availability
//! indicators, weekly trend series, monthly plan compliance and overtime
//! costs.
//!
//! The pipeline stages are pure functions over in-memory tables; fetching
//! the sheet, caching and rendering belong to the caller.

pub mod compliance;
pub mod costs;
pub mod expand;
pub mod kpi;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod types;
pub mod util;
pub mod weekly;

pub use compliance::{monthly_compliance, CompliancePolicy};
pub use costs::{allocate_overtime, CostDiagnostics, OvertimeAllocation, RateTier};
pub use expand::{expand_by_technician, split_technicians};
pub use kpi::{kind_breakdown, plant_kpis, reliability_kpis};
pub use normalize::{
    canonical_field, classify_kind, classify_status, clean_orders, completed_only, CleanReport,
};
pub use types::{
    MaintenanceKind, OrderStatus, PersonnelRecord, PlantKpis, RawOrderRow, ReliabilityKpis,
    WorkOrder,
};
pub use weekly::{
    downtime_by_component, downtime_by_equipment, weekly_availability, weekly_emergency,
    weekly_technician_hours, WeekKey,
};
