//! HubSpot API client
//!
//! Four operations: find a contact by email, create-or-update a contact,
//! enroll a contact in a workflow, and create a deal for a contact. Each one
//! issues its requests sequentially and either fully succeeds or returns the
//! first failure. Nothing is retried or cached.

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::error::CrmError;
use super::models::{Contact, Deal, Lead, SearchResponse};
use super::operations::Operation;
use super::rules::DealRules;
use super::transport::{ApiResponse, HttpTransport, ReqwestTransport};
use crate::config::SyncConfig;

const NO_CONTENT: u16 = 204;

#[derive(Clone)]
pub struct HubSpotClient {
    transport: Arc<dyn HttpTransport>,
    deal_rules: Option<DealRules>,
}

impl HubSpotClient {
    /// Client talking to the real API described by `config`
    pub fn new(config: &SyncConfig) -> Result<Self, CrmError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Client over an arbitrary transport (used by tests)
    pub fn with_transport(transport: Arc<dyn HttpTransport>, config: &SyncConfig) -> Self {
        Self {
            transport,
            deal_rules: config.enforce_deal_rules.then(DealRules::default),
        }
    }

    /// Send an operation and turn any non-2xx status into [`CrmError::Http`]
    async fn execute(&self, operation: &Operation) -> Result<ApiResponse, CrmError> {
        log::debug!("{} {}", operation.http_method(), operation.path());

        let response = self.transport.send(operation).await?;
        if !response.is_success() {
            log::warn!(
                "{} failed with status {}: {}",
                operation.operation_type(),
                response.status,
                response.body
            );
            return Err(CrmError::Http {
                status: response.status,
                message: response.body,
            });
        }

        Ok(response)
    }

    async fn execute_json<T: DeserializeOwned>(&self, operation: &Operation) -> Result<T, CrmError> {
        let response = self.execute(operation).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// First contact whose email equals `email`, if any
    pub async fn find_contact_by_email(&self, email: &str) -> Result<Option<Contact>, CrmError> {
        let search: SearchResponse = self.execute_json(&Operation::search_contact(email)).await?;
        Ok(search.into_first())
    }

    /// Look the lead up by email, then update the match or create a new contact
    pub async fn create_or_update_contact(&self, lead: &Lead) -> Result<Contact, CrmError> {
        let existing = self.find_contact_by_email(&lead.email).await?;

        let operation = match existing {
            Some(contact) => {
                log::info!("Updating contact {} for {}", contact.id, lead.email);
                Operation::update_contact(contact.id, lead.clone())
            }
            None => {
                log::info!("Creating contact for {}", lead.email);
                Operation::create_contact(lead.clone())
            }
        };

        self.execute_json(&operation).await
    }

    /// `true` only when the API answers 204 No Content
    pub async fn enroll_in_workflow(
        &self,
        contact_id: &str,
        workflow_id: &str,
    ) -> Result<bool, CrmError> {
        let response = self
            .execute(&Operation::enroll(contact_id, workflow_id))
            .await?;

        let enrolled = response.status == NO_CONTENT;
        log::info!(
            "Enrollment of contact {} in workflow {}: status {} ({})",
            contact_id,
            workflow_id,
            response.status,
            if enrolled { "enrolled" } else { "not enrolled" }
        );
        Ok(enrolled)
    }

    /// Create a deal associated with `contact_id` as its primary contact
    pub async fn create_deal_for_contact(
        &self,
        contact_id: &str,
        properties: BTreeMap<String, String>,
    ) -> Result<Deal, CrmError> {
        if let Some(rules) = &self.deal_rules {
            rules.validate(&properties).map_err(CrmError::Validation)?;
        }

        self.execute_json(&Operation::create_deal(contact_id, properties))
            .await
    }
}

impl std::fmt::Debug for HubSpotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubSpotClient")
            .field("deal_rules", &self.deal_rules)
            .finish_non_exhaustive()
    }
}
