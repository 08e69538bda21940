// Technician expansion: one row per responsible technician.
//
// The RESPONSABLE cell is free text and often names several technicians in
// one order ("Juan Pérez, Pedro Gómez", "Luis y María"). Reporting needs one
// row per technician, and the business rule is that a shared job credits the
// FULL duration and overtime to every technician on it — nothing is divided.
use crate::types::WorkOrder;

const DELIMITERS: [char; 5] = [',', ';', '|', '/', '&'];

// Placeholder cells that mean "nobody recorded".
fn is_placeholder(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || t.eq_ignore_ascii_case("nan") || t == "-"
}

/// Split a responsible-party cell into individual technician names.
///
/// Strategy order is fixed and deliberate:
/// 1. hard delimiters (`,` `;` `|` `/` `&`),
/// 2. the whole words "Y"/"AND" between names ("Luis y María").
///
/// A cell that matches neither comes back as a single name. Placeholders
/// ("", "nan", "-") yield an empty list. Best-effort by nature; keep it
/// isolated here so the heuristic can be swapped out.
pub fn split_technicians(raw: &str) -> Vec<String> {
    if is_placeholder(raw) {
        return Vec::new();
    }

    if raw.contains(&DELIMITERS[..]) {
        let names: Vec<String> = raw
            .split(&DELIMITERS[..])
            .map(str::trim)
            .filter(|p| !is_placeholder(p))
            .map(str::to_string)
            .collect();
        if !names.is_empty() {
            return names;
        }
    }

    // Word-level pass: a standalone "y"/"and" separates two names.
    let words: Vec<&str> = raw.split_whitespace().collect();
    let mut names: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for w in &words {
        if w.eq_ignore_ascii_case("y") || w.eq_ignore_ascii_case("and") {
            if !current.is_empty() {
                names.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(w);
        }
    }
    if !current.is_empty() {
        names.push(current.join(" "));
    }
    if names.len() >= 2 {
        return names;
    }

    vec![raw.trim().to_string()]
}

/// Expand orders so each row carries exactly one technician. Duration and
/// overtime fields are copied verbatim to every emitted row (the
/// non-division rule); single-name and unattributed rows pass through
/// unchanged. Output length is always >= input length.
pub fn expand_by_technician(orders: &[WorkOrder]) -> Vec<WorkOrder> {
    let mut out = Vec::with_capacity(orders.len());
    for order in orders {
        let names = split_technicians(&order.responsible);
        if names.len() <= 1 {
            out.push(order.clone());
        } else {
            for name in names {
                let mut row = order.clone();
                row.responsible = name;
                out.push(row);
            }
        }
    }
    out
}
