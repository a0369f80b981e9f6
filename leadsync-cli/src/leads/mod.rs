//! Lead sources
//!
//! Reads leads from spreadsheets (`.xlsx`, `.xls`, `.xlsm`, `.ods`) or CSV
//! files. The header row must name every column in [`REQUIRED_COLUMNS`];
//! the check runs before any lead is returned, so a bad file never reaches
//! the CRM.

pub mod csv;
pub mod excel;

use std::path::Path;
use thiserror::Error;

use crate::api::Lead;

pub const FIRST_NAME: &str = "First Name";
pub const LAST_NAME: &str = "Last Name";
pub const EMAIL: &str = "Email";
pub const COMPANY: &str = "Company";
pub const PHONE: &str = "Phone";

pub const REQUIRED_COLUMNS: [&str; 5] = [FIRST_NAME, LAST_NAME, EMAIL, COMPANY, PHONE];

#[derive(Debug, Error)]
pub enum LeadLoadError {
    #[error("Failed to open {path}: {message}")]
    Open { path: String, message: String },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("{0} has no header row")]
    EmptySheet(String),

    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Unsupported file type: {0} (expected .xlsx, .xls, .xlsm, .ods or .csv)")]
    UnsupportedFormat(String),
}

/// Load every lead in `path`, choosing the reader by extension
pub fn load_leads<P: AsRef<Path>>(path: P) -> Result<Vec<Lead>, LeadLoadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let leads = match extension.as_str() {
        "xlsx" | "xls" | "xlsm" | "ods" => excel::read_leads_workbook(path)?,
        "csv" => csv::read_leads_csv(path)?,
        _ => return Err(LeadLoadError::UnsupportedFormat(path.display().to_string())),
    };

    log::info!("Loaded {} leads from {}", leads.len(), path.display());
    Ok(leads)
}

/// Positions of the required columns within a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadColumns {
    first_name: usize,
    last_name: usize,
    email: usize,
    company: usize,
    phone: usize,
}

impl LeadColumns {
    /// Locate every required column; reports all missing ones in canonical order
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self, LeadLoadError> {
        let find = |name: &str| headers.iter().position(|h| h.as_ref().trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| find(col).is_none())
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LeadLoadError::MissingColumns(missing));
        }

        // Every column was found above
        let index = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            first_name: index(FIRST_NAME),
            last_name: index(LAST_NAME),
            email: index(EMAIL),
            company: index(COMPANY),
            phone: index(PHONE),
        })
    }

    /// Build a lead from one row of cell text. Blank rows yield `None`;
    /// short rows read missing cells as empty strings.
    pub fn lead_from_row<S: AsRef<str>>(&self, row: &[S]) -> Option<Lead> {
        if row.iter().all(|cell| cell.as_ref().trim().is_empty()) {
            return None;
        }

        let cell = |idx: usize| {
            row.get(idx)
                .map(|c| c.as_ref().trim().to_string())
                .unwrap_or_default()
        };

        Some(Lead {
            first_name: cell(self.first_name),
            last_name: cell(self.last_name),
            email: cell(self.email),
            company: cell(self.company),
            phone: cell(self.phone),
        })
    }
}
