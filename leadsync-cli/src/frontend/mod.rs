//! Front ends for the HubSpot client
//!
//! The console menu, the web form and the one-shot CLI commands all build
//! an [`Action`], pass it to [`submit`], and display the [`Outcome`] or the
//! error. Nothing else in the front ends talks to the client.

pub mod console;
pub mod web;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::api::{Contact, CrmError, Deal, HubSpotClient, Lead};

/// One request from a user
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FindContact {
        email: String,
    },
    UpsertContact {
        lead: Lead,
    },
    Enroll {
        contact_id: String,
        workflow_id: String,
    },
    CreateDeal {
        contact_id: String,
        properties: BTreeMap<String, String>,
    },
}

/// What a successful [`Action`] produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum Outcome {
    Contact(Option<Contact>),
    Upserted(Contact),
    Enrolled(bool),
    DealCreated(Deal),
}

impl Outcome {
    /// Whether the front end should present this as a success
    pub fn is_positive(&self) -> bool {
        !matches!(self, Outcome::Enrolled(false))
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Contact(None) => write!(f, "No contact found."),
            Outcome::Contact(Some(contact)) => write!(f, "{}", to_json(contact)),
            Outcome::Upserted(contact) => {
                write!(f, "Contact created/updated: {}", to_json(contact))
            }
            Outcome::Enrolled(true) => write!(f, "Enrolled in workflow."),
            Outcome::Enrolled(false) => write!(f, "Failed to enroll."),
            Outcome::DealCreated(deal) => write!(f, "Deal created: {}", to_json(deal)),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unprintable>".to_string())
}

/// Run one action against the client
pub async fn submit(client: &HubSpotClient, action: Action) -> Result<Outcome, CrmError> {
    match action {
        Action::FindContact { email } => client
            .find_contact_by_email(&email)
            .await
            .map(Outcome::Contact),
        Action::UpsertContact { lead } => client
            .create_or_update_contact(&lead)
            .await
            .map(Outcome::Upserted),
        Action::Enroll {
            contact_id,
            workflow_id,
        } => client
            .enroll_in_workflow(&contact_id, &workflow_id)
            .await
            .map(Outcome::Enrolled),
        Action::CreateDeal {
            contact_id,
            properties,
        } => client
            .create_deal_for_contact(&contact_id, properties)
            .await
            .map(Outcome::DealCreated),
    }
}

/// Parse one `key=value` pair, splitting at the first `=` and trimming both sides
pub fn parse_property(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once('=')?;
    Some((key.trim().to_string(), value.trim().to_string()))
}

/// Parse `key=value` lines; lines without `=` are ignored
pub fn parse_properties(text: &str) -> BTreeMap<String, String> {
    text.lines().filter_map(parse_property).collect()
}
