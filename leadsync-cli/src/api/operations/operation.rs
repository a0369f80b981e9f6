//! Core Operation types for HubSpot CRM requests

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::api::constants::paths;
use crate::api::models::{Lead, ObjectInput, SearchRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request against the HubSpot API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Operation {
    /// Search contacts whose email equals `email`
    SearchContactByEmail { email: String },
    /// Create a contact from a lead
    CreateContact { lead: Lead },
    /// Partially update an existing contact with a lead's fields
    UpdateContact {
        /// Contact ID assigned by HubSpot
        id: String,
        lead: Lead,
    },
    /// Enroll a contact in a workflow (empty body)
    EnrollInWorkflow {
        contact_id: String,
        workflow_id: String,
    },
    /// Create a deal associated with one contact
    CreateDeal {
        contact_id: String,
        properties: BTreeMap<String, String>,
    },
}

impl Operation {
    pub fn search_contact(email: impl Into<String>) -> Self {
        Self::SearchContactByEmail {
            email: email.into(),
        }
    }

    pub fn create_contact(lead: Lead) -> Self {
        Self::CreateContact { lead }
    }

    pub fn update_contact(id: impl Into<String>, lead: Lead) -> Self {
        Self::UpdateContact {
            id: id.into(),
            lead,
        }
    }

    pub fn enroll(contact_id: impl Into<String>, workflow_id: impl Into<String>) -> Self {
        Self::EnrollInWorkflow {
            contact_id: contact_id.into(),
            workflow_id: workflow_id.into(),
        }
    }

    pub fn create_deal(contact_id: impl Into<String>, properties: BTreeMap<String, String>) -> Self {
        Self::CreateDeal {
            contact_id: contact_id.into(),
            properties,
        }
    }

    /// Get the HTTP method for this operation
    pub fn http_method(&self) -> HttpMethod {
        match self {
            Self::SearchContactByEmail { .. } => HttpMethod::Post,
            Self::CreateContact { .. } => HttpMethod::Post,
            Self::UpdateContact { .. } => HttpMethod::Patch,
            Self::EnrollInWorkflow { .. } => HttpMethod::Post,
            Self::CreateDeal { .. } => HttpMethod::Post,
        }
    }

    /// Request path relative to the API base URL
    pub fn path(&self) -> String {
        match self {
            Self::SearchContactByEmail { .. } => paths::CONTACTS_SEARCH.to_string(),
            Self::CreateContact { .. } => paths::CONTACTS.to_string(),
            Self::UpdateContact { id, .. } => paths::contact(id),
            Self::EnrollInWorkflow {
                contact_id,
                workflow_id,
            } => paths::workflow_enrollment(workflow_id, contact_id),
            Self::CreateDeal { .. } => paths::DEALS.to_string(),
        }
    }

    /// JSON body, or `None` for body-less requests
    pub fn body(&self) -> Result<Option<Value>, serde_json::Error> {
        let body = match self {
            Self::SearchContactByEmail { email } => {
                serde_json::to_value(SearchRequest::contact_by_email(email))?
            }
            Self::CreateContact { lead } | Self::UpdateContact { lead, .. } => {
                serde_json::to_value(ObjectInput::contact(lead))?
            }
            Self::EnrollInWorkflow { .. } => return Ok(None),
            Self::CreateDeal {
                contact_id,
                properties,
            } => serde_json::to_value(ObjectInput::deal_for_contact(
                contact_id,
                properties.clone(),
            ))?,
        };
        Ok(Some(body))
    }

    /// Get the operation type as a string
    pub fn operation_type(&self) -> &'static str {
        match self {
            Self::SearchContactByEmail { .. } => "search_contact",
            Self::CreateContact { .. } => "create_contact",
            Self::UpdateContact { .. } => "update_contact",
            Self::EnrollInWorkflow { .. } => "enroll_in_workflow",
            Self::CreateDeal { .. } => "create_deal",
        }
    }

    /// Whether this operation changes data on the CRM
    #[cfg(test)]
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::SearchContactByEmail { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_methods_and_paths() {
        let lead = Lead::new("A", "B", "a@x.com", "C", "555");

        let search = Operation::search_contact("a@x.com");
        assert_eq!(search.http_method(), HttpMethod::Post);
        assert_eq!(search.path(), "/crm/v3/objects/contacts/search");
        assert!(!search.is_mutation());

        let create = Operation::create_contact(lead.clone());
        assert_eq!(create.http_method(), HttpMethod::Post);
        assert_eq!(create.path(), "/crm/v3/objects/contacts");

        let update = Operation::update_contact("42", lead);
        assert_eq!(update.http_method(), HttpMethod::Patch);
        assert_eq!(update.path(), "/crm/v3/objects/contacts/42");

        let enroll = Operation::enroll("42", "7");
        assert_eq!(enroll.path(), "/automation/v3/workflows/7/enrollments/contacts/42");

        let deal = Operation::create_deal("42", BTreeMap::new());
        assert_eq!(deal.path(), "/crm/v3/objects/deals");
        assert!(deal.is_mutation());
    }

    #[test]
    fn test_enroll_has_no_body() {
        assert_eq!(Operation::enroll("1", "2").body().unwrap(), None);
    }

    #[test]
    fn test_deal_body_has_single_association_for_empty_properties() {
        let body = Operation::create_deal("42", BTreeMap::new())
            .body()
            .unwrap()
            .unwrap();
        assert_eq!(
            body,
            json!({
                "properties": {},
                "associations": [{
                    "to": {"id": "42"},
                    "types": [{"associationCategory": "HUBSPOT_DEFINED", "associationTypeId": 3}]
                }]
            })
        );
    }
}
