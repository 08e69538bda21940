// Utility helpers for parsing, text folding and number formatting.
//
// This module centralizes all the "dirty" spreadsheet value handling so the
// rest of the pipeline can assume clean, typed values.
use chrono::{NaiveDate, NaiveTime};
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in spreadsheet exports (thousands
/// separators, stray spaces, leftover formula text).
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Rejects values containing alphabetic characters (formula remnants).
/// - Strips `","` thousands separators before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok()
}

pub fn parse_i64_safe(s: Option<&str>) -> Option<i64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i64>().ok()
}

/// Parse a date in the formats seen across sheet revisions: ISO first, then
/// the day-first forms the plant actually types in.
pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    // Excel exports sometimes carry a time suffix; the date part is enough.
    let s = s.split_whitespace().next().unwrap_or(s);
    for fmt in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Parse a time-of-day value (`HH:MM` or `HH:MM:SS`).
pub fn parse_time_safe(s: Option<&str>) -> Option<NaiveTime> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in ["%H:%M:%S", "%H:%M"] {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return Some(t);
        }
    }
    None
}

/// Minutes from (start date + start time) to (end date + end time), clamped
/// to zero when the end precedes the start. `None` if any part is missing.
pub fn minutes_between(
    start_date: Option<NaiveDate>,
    start_time: Option<NaiveTime>,
    end_date: Option<NaiveDate>,
    end_time: Option<NaiveTime>,
) -> Option<f64> {
    let start = start_date?.and_time(start_time?);
    let end = end_date?.and_time(end_time?);
    let mins = (end - start).num_minutes();
    Some(mins.max(0) as f64)
}

/// Canonical form of a technician name for matching: collapsed whitespace,
/// uppercased.
pub fn normalize_name(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Canonical form of a column header for variant matching: uppercased,
/// accents stripped, whitespace collapsed. `°` and `.` are dropped so
/// "N° ORDEN" and "N. ORDEN" fold to the same key.
pub fn fold_header(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        let mapped = match c {
            'Á' | 'á' | 'À' | 'à' => 'A',
            'É' | 'é' | 'È' | 'è' => 'E',
            'Í' | 'í' | 'Ì' | 'ì' => 'I',
            'Ó' | 'ó' | 'Ò' | 'ò' => 'O',
            'Ú' | 'ú' | 'Ù' | 'ù' | 'Ü' | 'ü' => 'U',
            'Ñ' | 'ñ' => 'N',
            '°' | '.' => continue,
            other => other,
        };
        out.push(mapped.to_ascii_uppercase());
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimal places plus locale-aware thousands separators
    // (e.g. `1,234,567.89`) for console output.
    let neg = n.is_sign_negative();
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    } else if decimals > 0 {
        res.push('.');
        res.push_str(&"0".repeat(decimals));
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for counts in console messages
    // (e.g. `9,855 rows loaded`).
    n.to_formatted_string(&Locale::en)
}
