//! One-shot operation commands

use anyhow::{Context, Result, bail};
use colored::*;
use std::collections::BTreeMap;

use super::build_client;
use crate::api::Lead;
use crate::cli::{DealArgs, EnrollArgs, FindArgs, UpsertArgs};
use crate::config::SyncConfig;
use crate::frontend::{Action, Outcome, parse_property, submit};

pub async fn handle_find_command(config: &SyncConfig, args: FindArgs) -> Result<()> {
    let action = Action::FindContact { email: args.email };
    execute(config, action, args.json).await
}

pub async fn handle_upsert_command(config: &SyncConfig, args: UpsertArgs) -> Result<()> {
    let lead = Lead {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        company: args.company,
        phone: args.phone,
    };
    execute(config, Action::UpsertContact { lead }, args.json).await
}

pub async fn handle_enroll_command(config: &SyncConfig, args: EnrollArgs) -> Result<()> {
    let action = Action::Enroll {
        contact_id: args.contact_id,
        workflow_id: args.workflow_id,
    };
    execute(config, action, args.json).await
}

pub async fn handle_deal_command(mut config: SyncConfig, args: DealArgs) -> Result<()> {
    if args.enforce_rules {
        config.enforce_deal_rules = true;
    }
    let properties = parse_property_args(&args.properties)?;
    let action = Action::CreateDeal {
        contact_id: args.contact_id,
        properties,
    };
    execute(&config, action, args.json).await
}

/// `--prop key=value` arguments; a value without `=` is rejected
fn parse_property_args(args: &[String]) -> Result<BTreeMap<String, String>> {
    let mut properties = BTreeMap::new();
    for arg in args {
        let Some((key, value)) = parse_property(arg) else {
            bail!("Invalid property '{}': expected key=value", arg);
        };
        if key.is_empty() {
            bail!("Invalid property '{}': empty key", arg);
        }
        properties.insert(key, value);
    }
    Ok(properties)
}

async fn execute(config: &SyncConfig, action: Action, json: bool) -> Result<()> {
    let client = build_client(config)?;
    let outcome = submit(&client, action).await?;
    println!("{}", format_output(&outcome, json)?);

    if !outcome.is_positive() {
        bail!("HubSpot did not confirm the enrollment");
    }
    Ok(())
}

/// Pretty JSON with `--json`, otherwise the colored message
fn format_output(outcome: &Outcome, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(outcome).context("Failed to format JSON output");
    }
    Ok(match outcome {
        Outcome::Enrolled(false) => outcome.to_string().yellow().to_string(),
        _ if outcome.is_positive() => outcome.to_string().green().to_string(),
        _ => outcome.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property_args() {
        let props =
            parse_property_args(&["amount=10".to_string(), "dealname = A=B ".to_string()]).unwrap();
        assert_eq!(props.get("amount").map(String::as_str), Some("10"));
        assert_eq!(props.get("dealname").map(String::as_str), Some("A=B"));
    }

    #[test]
    fn test_parse_property_args_rejects_malformed() {
        assert!(parse_property_args(&["amount".to_string()]).is_err());
        assert!(parse_property_args(&["=5".to_string()]).is_err());
    }

    #[test]
    fn test_json_output_is_tagged() {
        let json = format_output(&Outcome::Enrolled(true), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["outcome"], "enrolled");
        assert_eq!(value["data"], true);
    }

    #[test]
    fn test_text_output_contains_message() {
        let text = format_output(&Outcome::Contact(None), false).unwrap();
        assert!(text.contains("No contact found."));
    }
}
