//! Read leads from a workbook's first sheet

use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

use super::{LeadColumns, LeadLoadError};
use crate::api::Lead;

/// Convert an Excel cell to the text sent to the CRM
///
/// Whole-number floats (how Excel stores phone numbers typed as numbers)
/// lose their fractional part: `5551234567.0` becomes `"5551234567"`.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

pub fn read_leads_workbook(path: &Path) -> Result<Vec<Lead>, LeadLoadError> {
    let open_error = |message: String| LeadLoadError::Open {
        path: path.display().to_string(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| open_error(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LeadLoadError::EmptySheet(path.display().to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| open_error(format!("sheet '{}': {}", sheet_name, e)))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>());

    let headers = rows
        .next()
        .ok_or_else(|| LeadLoadError::EmptySheet(path.display().to_string()))?;
    let columns = LeadColumns::from_headers(&headers)?;

    Ok(rows.filter_map(|row| columns.lead_from_row(&row)).collect())
}
