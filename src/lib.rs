//! # apitty
//!
//! A terminal HTTP client with cURL import.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, PATCH, DELETE
//! - Request body editor and custom headers
//! - cURL import/export
//! - JSON pretty-printing and syntax highlighting
//! - Response body/headers views with scrolling and fullscreen
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod curl;
pub mod json;
pub mod messages;
pub mod models;
pub mod network;
pub mod text;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::{Config, Theme};
pub use curl::{parse_curl_command, to_curl, ParsedCommand};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{HeaderPair, HttpMethod, Request, Response};
pub use network::NetworkActor;
