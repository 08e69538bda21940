// Entry point and high-level CLI flow.
//
// - Option [1] loads and cleans the orders CSV (plus the personnel rate
//   table when present), printing diagnostics.
// - Option [2] generates every KPI report: scalar summaries as JSON, the
//   weekly/monthly aggregates and cost tables as CSV, each with a markdown
//   preview on the console.
// - After generating reports, the user can go back to the menu or exit.
use mtto_report::{compliance, costs, expand, kpi, loader, normalize, output, util, weekly};
use mtto_report::{CompliancePolicy, PersonnelRecord, WorkOrder};

use chrono::{Datelike, Local};
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;

const ORDERS_FILE: &str = "ordenes_mantenimiento.csv";
const PERSONNEL_FILE: &str = "personal_tarifas.csv";

// In-memory session state: load and clean the sheets once, generate reports
// as many times as asked within a single run.
static APP_STATE: Lazy<Mutex<Session>> = Lazy::new(|| {
    Mutex::new(Session {
        orders: None,
        personnel: Vec::new(),
    })
});

struct Session {
    orders: Option<Vec<WorkOrder>>,
    personnel: Vec<PersonnelRecord>,
}

/// Read a single line of input after printing the common "Enter choice:"
/// prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask whether to go back to the menu after generating reports. Returns
/// `true` for `Y`, `false` for `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to menu (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load both CSVs and normalize the orders.
fn handle_load() {
    let raw = match loader::load_orders(ORDERS_FILE) {
        Ok((rows, read_errors)) => {
            if read_errors > 0 {
                println!(
                    "Note: {} row(s) rejected by the CSV reader.",
                    util::format_int(read_errors as i64)
                );
            }
            rows
        }
        Err(e) => {
            eprintln!("Failed to load {}: {}\n", ORDERS_FILE, e);
            return;
        }
    };

    let (orders, report) = normalize::clean_orders(&raw);
    println!(
        "Processing orders... ({} rows normalized)",
        util::format_int(report.rows as i64)
    );
    if report.bad_dates > 0 {
        println!(
            "Note: {} unparseable date cell(s) left empty.",
            util::format_int(report.bad_dates as i64)
        );
    }
    if report.coerced_numbers > 0 {
        println!(
            "Note: {} non-numeric duration cell(s) coerced to 0.",
            util::format_int(report.coerced_numbers as i64)
        );
    }
    if report.unclassified_status > 0 {
        println!(
            "Warning: {} order(s) with unrecognized status text.",
            util::format_int(report.unclassified_status as i64)
        );
    }
    if !report.status_column_present {
        println!("Note: no STATUS column found; all orders treated as CULMINADO.");
    }

    // The rate table is optional; without it costs come out as 0 with an
    // explicit diagnostic at report time.
    let personnel = match loader::load_personnel(PERSONNEL_FILE) {
        Ok(p) => {
            println!(
                "Personnel rates loaded: {} technician(s).",
                util::format_int(p.len() as i64)
            );
            p
        }
        Err(e) => {
            println!("Note: no personnel table ({}): {}", PERSONNEL_FILE, e);
            Vec::new()
        }
    };
    println!();

    let mut state = APP_STATE.lock().unwrap();
    state.orders = Some(orders);
    state.personnel = personnel;
}

/// Handle option [2]: compute every aggregate and export it.
fn handle_generate_reports() {
    let (orders, personnel) = {
        let state = APP_STATE.lock().unwrap();
        (state.orders.clone(), state.personnel.clone())
    };
    let Some(orders) = orders else {
        println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
        return;
    };

    println!("Generating reports...\n");
    let today = Local::now().date_naive();

    // Plant and reliability indicators run over finished work only; the
    // compliance plan sees every order of the year.
    let completed = normalize::completed_only(&orders);
    let expanded = expand::expand_by_technician(&completed);

    let plant = kpi::plant_kpis(&completed);
    if let Err(e) = output::write_json("kpi_planta.json", &plant) {
        eprintln!("Write error: {}", e);
    }
    println!("Plant KPIs (kpi_planta.json):");
    println!(
        "  TD {} min | TO {} min | disponibilidad {}% | MTBF {} min | MTTR {} min",
        util::format_number(plant.td_min, 0),
        util::format_number(plant.to_min, 0),
        util::format_number(plant.availability_pct, 1),
        util::format_number(plant.mtbf_min, 1),
        util::format_number(plant.mttr_min, 1)
    );

    let reliability = kpi::reliability_kpis(&completed);
    if let Err(e) = output::write_json("kpi_confiabilidad.json", &reliability) {
        eprintln!("Write error: {}", e);
    }
    println!(
        "  Emergencias: {} falla(s), {} con parada de producción\n",
        util::format_int(reliability.failure_count as i64),
        util::format_int(reliability.failures_with_stoppage as i64)
    );

    let avail = weekly::weekly_availability(&completed);
    export_table("Disponibilidad semanal", "disponibilidad_semanal.csv", &avail);

    let emerg = weekly::weekly_emergency(&completed);
    export_table("Correctivos de emergencia por semana", "emergencias_semanal.csv", &emerg);

    let tech_hours = weekly::weekly_technician_hours(&expanded);
    export_table("Horas por técnico y semana", "horas_tecnico_semanal.csv", &tech_hours);

    let by_equipment = weekly::downtime_by_equipment(&completed);
    export_table("TFS por equipo", "tfs_por_equipo.csv", &by_equipment);

    let by_component = weekly::downtime_by_component(&completed);
    export_table("TFS por componente", "tfs_por_componente.csv", &by_component);

    let plan = compliance::monthly_compliance(
        &orders,
        today.year(),
        today,
        CompliancePolicy::AllOrders,
    );
    export_table("Cumplimiento del plan (año completo)", "cumplimiento_plan.csv", &plan);

    let plan_cut = compliance::monthly_compliance(
        &orders,
        today.year(),
        today,
        CompliancePolicy::ClosedBeforeToday,
    );
    export_table(
        "Cumplimiento del plan (corte a la fecha)",
        "cumplimiento_plan_corte.csv",
        &plan_cut,
    );

    let allocation = costs::allocate_overtime(&expanded, &personnel);
    export_table(
        "Costo de horas extras por semana",
        "costo_extras_semanal.csv",
        &allocation.weekly,
    );
    export_table(
        "Costo de horas extras acumulado",
        "costo_extras_acumulado.csv",
        &allocation.accumulated,
    );
    for msg in allocation.diagnostics.messages() {
        println!("Warning: {}", msg);
    }
    println!();
}

fn export_table<T>(title: &str, path: &str, rows: &[T])
where
    T: serde::Serialize + tabled::Tabled + Clone,
{
    if let Err(e) = output::write_csv(path, rows) {
        eprintln!("Write error: {}", e);
    }
    output::preview(title, rows, 3, path);
}

fn main() {
    loop {
        println!("Indicadores de Mantenimiento");
        println!("[1] Load the data files");
        println!("[2] Generate Reports\n");
        match read_choice().as_str() {
            "1" => {
                handle_load();
            }
            "2" => {
                println!();
                handle_generate_reports();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}
