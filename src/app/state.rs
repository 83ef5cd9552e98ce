//! App state - pure data structure with no I/O logic

use crate::app::input::TextInput;
use crate::config::Config;
use crate::constants::{
    BODY_CHAR_LIMIT, CURL_CHAR_LIMIT, HEADER_KEY_CHAR_LIMIT, HEADER_VALUE_CHAR_LIMIT,
    URL_CHAR_LIMIT,
};
use crate::messages::ui_events::{Focus, HeaderField, HeaderFormMode};
use crate::messages::RenderState;
use crate::models::{HeaderPair, HttpMethod, Response, ResponseView};

/// Terminal size assumed until the first resize event arrives
const DEFAULT_TERMINAL_SIZE: (u16, u16) = (100, 40);

/// Main application state - pure data, no I/O
pub struct AppState {
    // Injected configuration
    pub methods: Vec<HttpMethod>,

    // Request being composed
    pub method_index: usize,
    pub url: TextInput,
    pub body: TextInput,
    pub headers: Vec<HeaderPair>,

    // UI state
    pub focus: Focus,
    pub terminal_size: (u16, u16),

    // Response
    pub response: Response,
    pub response_view: ResponseView,
    pub response_content: String,
    pub response_scroll: u16,
    pub fullscreen: bool,
    pub is_loading: bool,
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    // Help popup
    pub show_help: bool,
    pub help_scroll: u16,

    // Headers form
    pub show_headers_form: bool,
    pub header_form_mode: HeaderFormMode,
    pub selected_header: usize,
    pub header_key: TextInput,
    pub header_value: TextInput,
    pub header_field: HeaderField,
    pub header_is_editing: bool,

    // cURL import popup
    pub show_curl_import: bool,
    pub curl_input: TextInput,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let methods = if config.methods.is_empty() {
            HttpMethod::ALL.to_vec()
        } else {
            config.methods.clone()
        };

        AppState {
            methods,
            method_index: 0,
            url: TextInput::new(URL_CHAR_LIMIT),
            body: TextInput::new(BODY_CHAR_LIMIT),
            headers: Vec::new(),
            focus: Focus::Method,
            terminal_size: DEFAULT_TERMINAL_SIZE,
            response: Response::default(),
            response_view: ResponseView::Body,
            response_content: String::new(),
            response_scroll: 0,
            fullscreen: false,
            is_loading: false,
            next_request_id: 1,
            pending_request_id: None,
            show_help: false,
            help_scroll: 0,
            show_headers_form: false,
            header_form_mode: HeaderFormMode::List,
            selected_header: 0,
            header_key: TextInput::new(HEADER_KEY_CHAR_LIMIT),
            header_value: TextInput::new(HEADER_VALUE_CHAR_LIMIT),
            header_field: HeaderField::Key,
            header_is_editing: false,
            show_curl_import: false,
            curl_input: TextInput::new(CURL_CHAR_LIMIT),
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Currently selected method
    pub fn method(&self) -> HttpMethod {
        self.methods
            .get(self.method_index)
            .copied()
            .unwrap_or(HttpMethod::GET)
    }

    /// Width the response content is wrapped to (inside border and padding)
    pub fn viewport_width(&self) -> usize {
        self.terminal_size.0.saturating_sub(4).max(1) as usize
    }

    /// Visible response lines; fullscreen leaves more room
    pub fn viewport_height(&self) -> u16 {
        let reserved = if self.fullscreen { 4 } else { 14 };
        self.terminal_size.1.saturating_sub(reserved).max(1)
    }

    /// Visible help lines
    pub fn help_viewport_height(&self) -> u16 {
        self.terminal_size.1.saturating_sub(8).max(1)
    }

    /// The text input that receives editing events, if any
    pub fn active_input_mut(&mut self) -> Option<&mut TextInput> {
        if self.show_help {
            return None;
        }
        if self.show_curl_import {
            return Some(&mut self.curl_input);
        }
        if self.show_headers_form {
            return match (self.header_form_mode, self.header_field) {
                (HeaderFormMode::List, _) => None,
                (HeaderFormMode::Edit, HeaderField::Key) => Some(&mut self.header_key),
                (HeaderFormMode::Edit, HeaderField::Value) => Some(&mut self.header_value),
            };
        }
        match self.focus {
            Focus::Url => Some(&mut self.url),
            Focus::Body => Some(&mut self.body),
            Focus::Method | Focus::Response => None,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            methods: self.methods.clone(),
            method_index: self.method_index,
            url: self.url.clone(),
            body: self.body.clone(),
            headers: self.headers.clone(),
            focus: self.focus,
            response: self.response.clone(),
            response_view: self.response_view,
            response_content: self.response_content.clone(),
            response_scroll: self.response_scroll,
            fullscreen: self.fullscreen,
            is_loading: self.is_loading,
            show_help: self.show_help,
            help_scroll: self.help_scroll,
            show_headers_form: self.show_headers_form,
            header_form_mode: self.header_form_mode,
            selected_header: self.selected_header,
            header_key: self.header_key.clone(),
            header_value: self.header_value.clone(),
            header_field: self.header_field,
            header_is_editing: self.header_is_editing,
            show_curl_import: self.show_curl_import,
            curl_input: self.curl_input.clone(),
        }
    }
}
