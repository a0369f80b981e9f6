//! Test double for [`HttpTransport`]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::error::CrmError;
use super::operations::Operation;
use super::transport::{ApiResponse, HttpTransport};

/// Replays queued responses in order and records every operation sent.
/// An empty queue answers with a transport error.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<Operation>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(ApiResponse::new(status, body));
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push(status, body.to_string());
    }

    pub fn requests(&self) -> Vec<Operation> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Operation) -> bool) -> usize {
        self.requests.lock().unwrap().iter().filter(|op| predicate(op)).count()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, operation: &Operation) -> Result<ApiResponse, CrmError> {
        self.requests.lock().unwrap().push(operation.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| CrmError::Transport("no response queued".to_string()))
    }
}
