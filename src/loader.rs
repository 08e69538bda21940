// CSV ingestion: maps sheet columns onto the canonical raw-row schema.
//
// The pipeline itself never touches files; this is the glue a consumer uses
// to feed it. Rows that fail to read at the CSV level are skipped and
// counted, never fatal for the batch.
use crate::normalize::{canonical_field, set_field, OrderField};
use crate::types::{PersonnelRecord, RawOrderRow};
use crate::util::{fold_header, parse_f64_safe};
use csv::ReaderBuilder;
use std::error::Error;

/// Load the orders sheet. Returns the raw rows plus the number of records
/// the CSV reader rejected outright.
pub fn load_orders(path: &str) -> Result<(Vec<RawOrderRow>, usize), Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;

    // Resolve each column position once, up front.
    let columns: Vec<Option<OrderField>> = rdr
        .headers()?
        .iter()
        .map(canonical_field)
        .collect();

    let mut rows = Vec::new();
    let mut read_errors = 0usize;
    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(_) => {
                read_errors += 1;
                continue;
            }
        };
        let mut row = RawOrderRow::default();
        for (idx, field) in columns.iter().enumerate() {
            if let (Some(field), Some(value)) = (field, record.get(idx)) {
                set_field(&mut row, *field, value);
            }
        }
        rows.push(row);
    }
    Ok((rows, read_errors))
}

// Personnel sheet columns: a name column plus the two premium-rate columns,
// recognized by their "50"/"100" markers.
fn personnel_column(header: &str) -> Option<PersonnelField> {
    let h = fold_header(header);
    if h.contains("100") {
        Some(PersonnelField::Rate100)
    } else if h.contains("50") {
        Some(PersonnelField::Rate50)
    } else if h.contains("NOMBRE") || h.contains("TECNICO") || h.contains("PERSONAL") {
        Some(PersonnelField::Name)
    } else {
        None
    }
}

#[derive(Clone, Copy)]
enum PersonnelField {
    Name,
    Rate50,
    Rate100,
}

/// Load the personnel rate table. Rows without a name are skipped; missing
/// or unparseable rates become 0.
pub fn load_personnel(path: &str) -> Result<Vec<PersonnelRecord>, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let columns: Vec<Option<PersonnelField>> = rdr
        .headers()?
        .iter()
        .map(personnel_column)
        .collect();

    let mut out = Vec::new();
    for result in rdr.records() {
        let Ok(record) = result else { continue };
        let mut name = String::new();
        let mut rate_50 = 0.0;
        let mut rate_100 = 0.0;
        for (idx, field) in columns.iter().enumerate() {
            let Some(value) = record.get(idx) else { continue };
            match field {
                Some(PersonnelField::Name) => name = value.trim().to_string(),
                Some(PersonnelField::Rate50) => {
                    rate_50 = parse_f64_safe(Some(value)).unwrap_or(0.0)
                }
                Some(PersonnelField::Rate100) => {
                    rate_100 = parse_f64_safe(Some(value)).unwrap_or(0.0)
                }
                None => {}
            }
        }
        if name.is_empty() {
            continue;
        }
        out.push(PersonnelRecord {
            name,
            rate_50,
            rate_100,
        });
    }
    Ok(out)
}
