//! Spreadsheet import command

use anyhow::{Context, Result};
use colored::*;
use std::io::Write;

use super::build_client;
use crate::api::{HubSpotClient, Lead};
use crate::cli::ImportArgs;
use crate::config::SyncConfig;
use crate::frontend::{Action, Outcome, submit};
use crate::leads::load_leads;

/// Counts reported at the end of an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub synced: usize,
    pub failed: usize,
    pub enrolled: usize,
    pub not_enrolled: usize,
}

pub async fn handle_import_command(config: &SyncConfig, args: ImportArgs) -> Result<()> {
    // Column validation happens here, before a client exists
    let leads = load_leads(&args.file)
        .with_context(|| format!("Failed to load leads from {}", args.file.display()))?;
    println!(
        "Loaded {} leads from {}",
        leads.len(),
        args.file.display().to_string().cyan()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.dry_run {
        for lead in &leads {
            writeln!(
                out,
                "  {} {} <{}> {} {}",
                lead.first_name, lead.last_name, lead.email, lead.company, lead.phone
            )?;
        }
        return Ok(());
    }

    let client = build_client(config)?;
    let summary = import_leads(&client, &leads, args.workflow.as_deref(), &mut out).await?;

    writeln!(
        out,
        "\nSynced: {}  Failed: {}",
        summary.synced.to_string().green(),
        summary.failed.to_string().red()
    )?;
    if args.workflow.is_some() {
        writeln!(
            out,
            "Enrolled: {}  Not enrolled: {}",
            summary.enrolled, summary.not_enrolled
        )?;
    }

    Ok(())
}

/// Create or update each lead in order, optionally enrolling the resulting
/// contact. A failing lead is reported and the import moves on.
pub async fn import_leads<W: Write>(
    client: &HubSpotClient,
    leads: &[Lead],
    workflow_id: Option<&str>,
    out: &mut W,
) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for lead in leads {
        let upsert = Action::UpsertContact { lead: lead.clone() };
        let contact = match submit(client, upsert).await {
            Ok(Outcome::Upserted(contact)) => contact,
            Ok(other) => {
                summary.failed += 1;
                writeln!(out, "{} {}: unexpected result {}", "Error:".red(), lead.email, other)?;
                continue;
            }
            Err(e) => {
                summary.failed += 1;
                writeln!(out, "{} {}: {}", "Error:".red(), lead.email, e)?;
                continue;
            }
        };
        summary.synced += 1;
        writeln!(out, "Synced {} (contact {})", lead.email, contact.id)?;

        let Some(workflow_id) = workflow_id else {
            continue;
        };
        let enroll = Action::Enroll {
            contact_id: contact.id.clone(),
            workflow_id: workflow_id.to_string(),
        };
        match submit(client, enroll).await {
            Ok(Outcome::Enrolled(true)) => summary.enrolled += 1,
            Ok(_) => {
                summary.not_enrolled += 1;
                writeln!(out, "Failed to enroll contact {}", contact.id)?;
            }
            Err(e) => {
                summary.not_enrolled += 1;
                writeln!(out, "{} enrolling {}: {}", "Error:".red(), contact.id, e)?;
            }
        }
    }

    Ok(summary)
}
