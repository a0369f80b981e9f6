//! Read leads from a CSV file with a header row

use std::path::Path;

use super::{LeadColumns, LeadLoadError};
use crate::api::Lead;

pub fn read_leads_csv(path: &Path) -> Result<Vec<Lead>, LeadLoadError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(LeadLoadError::EmptySheet(path.display().to_string()));
    }
    let columns = LeadColumns::from_headers(&headers)?;

    let mut leads = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<&str> = record.iter().collect();
        if let Some(lead) = columns.lead_from_row(&row) {
            leads.push(lead);
        }
    }

    Ok(leads)
}
