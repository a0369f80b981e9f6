//! HubSpot object and payload models

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::constants::{associations, properties};

/// A person to synchronize, as read from a spreadsheet row or a form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Lead {
    pub first_name: String,
    pub last_name: String,
    /// Unique key used to find an existing contact
    pub email: String,
    pub company: String,
    pub phone: String,
}

impl Lead {
    #[cfg(test)]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        company: impl Into<String>,
        phone: impl ToString,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            company: company.into(),
            phone: phone.to_string(),
        }
    }

    /// Contact properties written on create and update
    pub fn to_properties(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (properties::EMAIL.to_string(), self.email.clone()),
            (properties::FIRST_NAME.to_string(), self.first_name.clone()),
            (properties::LAST_NAME.to_string(), self.last_name.clone()),
            (properties::COMPANY.to_string(), self.company.clone()),
            (properties::PHONE.to_string(), self.phone.clone()),
        ])
    }
}

/// A CRM record (contact or deal) as returned by the v3 objects API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmObject {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_properties")]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

pub type Contact = CrmObject;
pub type Deal = CrmObject;

/// HubSpot sends `null` for unset properties; those are dropped, and any
/// non-string scalar is kept in its JSON text form.
fn deserialize_properties<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

/// Body of `POST /crm/v3/objects/contacts/search`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub filter_groups: Vec<FilterGroup>,
    pub properties: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterGroup {
    pub filters: Vec<SearchFilter>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    pub property_name: String,
    pub operator: String,
    pub value: String,
}

impl SearchRequest {
    /// Single `email EQ <email>` filter requesting the contact property set
    pub fn contact_by_email(email: &str) -> Self {
        Self {
            filter_groups: vec![FilterGroup {
                filters: vec![SearchFilter {
                    property_name: properties::EMAIL.to_string(),
                    operator: "EQ".to_string(),
                    value: email.to_string(),
                }],
            }],
            properties: properties::CONTACT_SEARCH
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

/// Search results; a missing or `null` list means no match
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<CrmObject>>,
}

impl SearchResponse {
    pub fn into_first(self) -> Option<CrmObject> {
        self.results.unwrap_or_default().into_iter().next()
    }
}

/// Body of contact create and update requests
#[derive(Debug, Clone, Serialize)]
pub struct ObjectInput {
    pub properties: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub associations: Vec<Association>,
}

impl ObjectInput {
    pub fn contact(lead: &Lead) -> Self {
        Self {
            properties: lead.to_properties(),
            associations: Vec::new(),
        }
    }

    /// Deal carrying `properties` with one association to `contact_id`
    pub fn deal_for_contact(contact_id: &str, properties: BTreeMap<String, String>) -> Self {
        Self {
            properties,
            associations: vec![Association::primary_contact(contact_id)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Association {
    pub to: AssociationTarget,
    pub types: Vec<AssociationType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationTarget {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationType {
    pub association_category: String,
    pub association_type_id: u32,
}

impl Association {
    pub fn primary_contact(contact_id: &str) -> Self {
        Self {
            to: AssociationTarget {
                id: contact_id.to_string(),
            },
            types: vec![AssociationType {
                association_category: associations::CATEGORY_HUBSPOT_DEFINED.to_string(),
                association_type_id: associations::DEAL_TO_CONTACT_TYPE_ID,
            }],
        }
    }
}
