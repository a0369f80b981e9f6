//! HubSpot Operations Module
//!
//! Every request the client can issue is described by an [`Operation`], so
//! transports and test doubles see the same value the client built.

pub mod operation;

pub use operation::{HttpMethod, Operation};
