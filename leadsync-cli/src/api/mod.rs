//! HubSpot CRM API Module
//!
//! A thin client over the HubSpot v3 objects and v3 automation endpoints:
//! contact search, contact create/update, workflow enrollment and deal
//! creation. Requests are described as [`operations::Operation`]s and sent
//! through a [`transport::HttpTransport`], so the client can run against the real API or a test
//! double.

pub mod client;
pub mod constants;
pub mod error;
pub mod models;
pub mod operations;
pub mod rules;
pub mod transport;

#[cfg(test)]
pub mod testing;

pub use client::HubSpotClient;
pub use error::CrmError;
pub use models::{Contact, Deal, Lead};
