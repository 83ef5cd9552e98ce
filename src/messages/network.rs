//! Network messages - communication between App and Network layers

use crate::models::Request;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute an HTTP request
    Execute {
        id: u64,
        request: Request,
    },
    /// Cancel a pending request
    Cancel(u64),
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResponse {
    /// HTTP response received (any status code)
    Success {
        id: u64,
        /// Status line, e.g. "200 OK"
        status: String,
        /// One `Key: v1, v2` line per header
        headers: String,
        body: String,
        /// Body was a JSON object or array and has been pretty-printed
        is_json: bool,
        time_ms: u64,
    },
    /// Request could not be completed
    Error {
        id: u64,
        message: String,
        time_ms: u64,
    },
    /// Request was cancelled
    Cancelled {
        id: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Success { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
            NetworkResponse::Cancelled { id } => *id,
        }
    }
}
