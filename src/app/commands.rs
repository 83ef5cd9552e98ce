//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::constants::HELP_TEXT;
use crate::curl;
use crate::messages::ui_events::{Focus, HeaderField, HeaderFormMode};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{HeaderPair, Request, Response, ResponseView};
use crate::text::wrap_text;

impl AppState {
    // ========================
    // Focus
    // ========================

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn click_request_bar(&mut self) {
        self.focus = if self.focus == Focus::Url {
            Focus::Method
        } else {
            Focus::Url
        };
    }

    pub fn click_response(&mut self) {
        self.focus = Focus::Response;
    }

    // ========================
    // HTTP Method
    // ========================

    pub fn next_method(&mut self) {
        self.method_index = (self.method_index + 1) % self.methods.len();
    }

    pub fn prev_method(&mut self) {
        self.method_index = self
            .method_index
            .checked_sub(1)
            .unwrap_or(self.methods.len() - 1);
    }

    // ========================
    // Input editing
    // ========================

    pub fn enter_char(&mut self, c: char) {
        if let Some(input) = self.active_input_mut() {
            input.insert(c);
        }
    }

    /// Insert pasted text. Single-line inputs get line breaks turned into spaces,
    /// shell line continuations included.
    pub fn paste(&mut self, text: &str) {
        let multiline = !self.show_curl_import && !self.show_headers_form && self.focus == Focus::Body;
        let text = if multiline {
            text.replace("\r\n", "\n")
        } else {
            text.replace("\\\r\n", " ")
                .replace("\\\n", " ")
                .replace(['\r', '\n'], " ")
        };
        if let Some(input) = self.active_input_mut() {
            input.insert_str(&text);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.backspace();
        }
    }

    pub fn delete_char_forward(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.delete();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.move_left();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.move_right();
        }
    }

    pub fn move_cursor_home(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.home();
        }
    }

    pub fn move_cursor_end(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.end();
        }
    }

    pub fn move_cursor_up(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.move_up();
        }
    }

    pub fn move_cursor_down(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.move_down();
        }
    }

    // ========================
    // Response viewer
    // ========================

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        self.response_scroll = self.response_scroll.min(self.max_response_scroll());
    }

    pub fn toggle_response_view(&mut self) {
        self.response_view = self.response_view.toggle();
        self.refresh_response_content();
    }

    /// Re-wrap the visible response content and reset scrolling
    pub fn refresh_response_content(&mut self) {
        let content = self.response.content(self.response_view);
        self.response_content = wrap_text(content, self.viewport_width());
        self.response_scroll = 0;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        let scroll = self.response_scroll;
        self.refresh_response_content();
        self.response_scroll = scroll.min(self.max_response_scroll());
        self.help_scroll = self.help_scroll.min(self.max_help_scroll());
    }

    fn max_response_scroll(&self) -> u16 {
        let lines = self.response_content.lines().count();
        let lines = u16::try_from(lines).unwrap_or(u16::MAX);
        lines.saturating_sub(self.viewport_height())
    }

    fn max_help_scroll(&self) -> u16 {
        let lines = u16::try_from(HELP_TEXT.lines().count()).unwrap_or(u16::MAX);
        lines.saturating_sub(self.help_viewport_height())
    }

    /// Scroll offset, its maximum and the page height of whatever is scrollable now
    fn scroll_target(&mut self) -> (u16, u16, &mut u16) {
        if self.show_help {
            let (max, page) = (self.max_help_scroll(), self.help_viewport_height());
            (max, page, &mut self.help_scroll)
        } else {
            let (max, page) = (self.max_response_scroll(), self.viewport_height());
            (max, page, &mut self.response_scroll)
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        let (_, _, offset) = self.scroll_target();
        *offset = offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let (max, _, offset) = self.scroll_target();
        *offset = offset.saturating_add(lines).min(max);
    }

    pub fn half_page_up(&mut self) {
        let (_, page, offset) = self.scroll_target();
        *offset = offset.saturating_sub((page / 2).max(1));
    }

    pub fn half_page_down(&mut self) {
        let (max, page, offset) = self.scroll_target();
        *offset = offset.saturating_add((page / 2).max(1)).min(max);
    }

    pub fn scroll_top(&mut self) {
        let (_, _, offset) = self.scroll_target();
        *offset = 0;
    }

    pub fn scroll_bottom(&mut self) {
        let (max, _, offset) = self.scroll_target();
        *offset = max;
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Headers form
    // ========================

    pub fn open_header_form(&mut self) {
        self.show_headers_form = true;
        self.header_form_mode = HeaderFormMode::List;
        self.selected_header = 0;
        self.header_field = HeaderField::Key;
        self.header_key.clear();
        self.header_value.clear();
    }

    pub fn close_header_form(&mut self) {
        self.show_headers_form = false;
        self.header_form_mode = HeaderFormMode::List;
        self.header_is_editing = false;
    }

    pub fn new_header(&mut self) {
        self.header_form_mode = HeaderFormMode::Edit;
        self.header_field = HeaderField::Key;
        self.header_is_editing = false;
        self.header_key.clear();
        self.header_value.clear();
    }

    pub fn next_header(&mut self) {
        if !self.headers.is_empty() {
            self.selected_header = (self.selected_header + 1) % self.headers.len();
        }
    }

    pub fn prev_header(&mut self) {
        if !self.headers.is_empty() {
            self.selected_header = self
                .selected_header
                .checked_sub(1)
                .unwrap_or(self.headers.len() - 1);
        }
    }

    pub fn delete_header(&mut self) {
        if self.selected_header < self.headers.len() {
            self.headers.remove(self.selected_header);
            if self.selected_header >= self.headers.len() {
                self.selected_header = self.headers.len().saturating_sub(1);
            }
        }
    }

    pub fn edit_header(&mut self) {
        if let Some(header) = self.headers.get(self.selected_header) {
            let (key, value) = (header.key.clone(), header.value.clone());
            self.header_form_mode = HeaderFormMode::Edit;
            self.header_field = HeaderField::Key;
            self.header_is_editing = true;
            self.header_key.set_value(&key);
            self.header_value.set_value(&value);
        }
    }

    pub fn switch_header_field(&mut self) {
        self.header_field = match self.header_field {
            HeaderField::Key => HeaderField::Value,
            HeaderField::Value => HeaderField::Key,
        };
    }

    pub fn save_header(&mut self) {
        let key = self.header_key.value().trim();
        let value = self.header_value.value().trim();

        if !key.is_empty() {
            let header = HeaderPair::new(key, value);
            match self.headers.get_mut(self.selected_header) {
                Some(existing) if self.header_is_editing => *existing = header,
                _ => self.headers.push(header),
            }
        }

        self.cancel_header_edit();
    }

    pub fn cancel_header_edit(&mut self) {
        self.header_form_mode = HeaderFormMode::List;
        self.header_is_editing = false;
        self.header_field = HeaderField::Key;
        self.header_key.clear();
        self.header_value.clear();
    }

    // ========================
    // cURL import/export
    // ========================

    pub fn show_curl_import(&mut self) {
        self.show_curl_import = true;
        self.curl_input.clear();
    }

    pub fn import_curl(&mut self) {
        if !self.curl_input.is_empty() {
            let parsed = curl::parse_curl_command(self.curl_input.value());
            tracing::info!(
                method = %parsed.method,
                url = %parsed.url,
                headers = parsed.headers.len(),
                "Imported cURL command"
            );

            if !parsed.url.is_empty() {
                self.url.set_value(&parsed.url);
            }

            match self.methods.iter().position(|m| m.as_str() == parsed.method) {
                Some(index) => self.method_index = index,
                None => tracing::debug!(method = %parsed.method, "Imported method not selectable"),
            }

            self.headers = parsed.headers;
            self.selected_header = 0;
        }

        self.cancel_curl_import();
    }

    pub fn cancel_curl_import(&mut self) {
        self.show_curl_import = false;
        self.curl_input.clear();
    }

    pub fn export_curl(&mut self) {
        self.response = Response {
            body: curl::to_curl(&self.current_request()),
            ..Response::default()
        };
        self.response_view = ResponseView::Body;
        self.refresh_response_content();
    }

    // ========================
    // Request sending
    // ========================

    /// The request as currently composed
    pub fn current_request(&self) -> Request {
        let method = self.method();
        Request {
            method,
            url: self.url.value().to_string(),
            headers: self.headers.clone(),
            body: if method.has_body() {
                self.body.value().to_string()
            } else {
                String::new()
            },
        }
    }

    pub fn prepare_request(&mut self) -> Option<NetworkCommand> {
        if self.is_loading || self.url.is_empty() {
            return None;
        }

        self.is_loading = true;
        self.response = Response {
            status: String::from("Sending..."),
            ..Response::default()
        };
        self.refresh_response_content();

        let id = self.next_id();
        self.pending_request_id = Some(id);

        Some(NetworkCommand::Execute {
            id,
            request: self.current_request(),
        })
    }

    /// Cancel the current pending request
    pub fn cancel_request(&mut self) -> Option<NetworkCommand> {
        self.pending_request_id.map(NetworkCommand::Cancel)
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        if self.pending_request_id != Some(response.id()) {
            tracing::debug!(id = response.id(), "Ignoring stale response");
            return;
        }

        self.response = match response {
            NetworkResponse::Success {
                status,
                headers,
                body,
                is_json,
                time_ms,
                ..
            } => Response {
                status,
                headers,
                body,
                is_json,
                time_ms,
            },
            NetworkResponse::Error { message, time_ms, .. } => Response {
                status: String::from("Error"),
                body: format!("Error: {}", message),
                time_ms,
                ..Response::default()
            },
            NetworkResponse::Cancelled { .. } => Response {
                status: String::from("Cancelled"),
                body: String::from("Request cancelled"),
                ..Response::default()
            },
        };

        self.is_loading = false;
        self.pending_request_id = None;
        self.refresh_response_content();
    }
}
