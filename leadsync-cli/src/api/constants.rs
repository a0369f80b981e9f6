//! HubSpot API constants

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

pub mod paths {
    pub const CONTACTS: &str = "/crm/v3/objects/contacts";
    pub const CONTACTS_SEARCH: &str = "/crm/v3/objects/contacts/search";
    pub const DEALS: &str = "/crm/v3/objects/deals";

    /// `/automation/v3/workflows/{workflow_id}/enrollments/contacts/{contact_id}`
    pub fn workflow_enrollment(workflow_id: &str, contact_id: &str) -> String {
        format!(
            "/automation/v3/workflows/{}/enrollments/contacts/{}",
            workflow_id, contact_id
        )
    }

    pub fn contact(contact_id: &str) -> String {
        format!("{}/{}", CONTACTS, contact_id)
    }
}

/// Contact property names written and read by this tool
pub mod properties {
    pub const EMAIL: &str = "email";
    pub const FIRST_NAME: &str = "firstname";
    pub const LAST_NAME: &str = "lastname";
    pub const COMPANY: &str = "company";
    pub const PHONE: &str = "phone";

    /// Property set requested from the contact search endpoint
    pub const CONTACT_SEARCH: [&str; 5] = [EMAIL, FIRST_NAME, LAST_NAME, COMPANY, PHONE];

    pub const DEAL_AMOUNT: &str = "amount";
    pub const DEAL_STAGE: &str = "dealstage";
}

/// Deal-to-contact association
pub mod associations {
    pub const CATEGORY_HUBSPOT_DEFINED: &str = "HUBSPOT_DEFINED";
    /// HubSpot-defined type id for "deal to primary contact"
    pub const DEAL_TO_CONTACT_TYPE_ID: u32 = 3;
}

/// Value HubSpot sample `.env` files ship with; treated as "no token"
pub const PLACEHOLDER_TOKEN: &str = "YOUR_HUBSPOT_ACCESS_TOKEN";
