//! Render state - data structure sent from App layer to UI for rendering

use crate::app::input::TextInput;
use crate::app::AppState;
use crate::config::Config;
use crate::messages::ui_events::{Focus, HeaderField, HeaderFormMode, KeyContext};
use crate::models::{HeaderPair, HttpMethod, Response, ResponseView};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Request
    pub methods: Vec<HttpMethod>,
    pub method_index: usize,
    pub url: TextInput,
    pub body: TextInput,
    pub headers: Vec<HeaderPair>,

    // UI state
    pub focus: Focus,

    // Response
    pub response: Response,
    pub response_view: ResponseView,
    /// Response content already wrapped to the viewport width
    pub response_content: String,
    pub response_scroll: u16,
    pub fullscreen: bool,
    pub is_loading: bool,

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

impl RenderState {
    pub fn method(&self) -> HttpMethod {
        self.methods
            .get(self.method_index)
            .copied()
            .unwrap_or(HttpMethod::GET)
    }

    pub fn has_popup(&self) -> bool {
        self.show_help || self.show_headers_form || self.show_curl_import
    }

    /// The subset of state the key mapper needs
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            focus: self.focus,
            is_loading: self.is_loading,
            has_response: !self.response.is_empty(),
            show_help: self.show_help,
            show_headers_form: self.show_headers_form,
            header_form_mode: self.header_form_mode,
            show_curl_import: self.show_curl_import,
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        AppState::new(&Config::default()).to_render_state()
    }
}
