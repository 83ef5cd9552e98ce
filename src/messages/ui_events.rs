//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::constants::{TOP_AREA_ROWS, WHEEL_SCROLL_LINES};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Focus navigation
    NextFocus,
    PrevFocus,
    ClickRequestBar,
    ClickResponse,

    // Method selector
    NextMethod,
    PrevMethod,

    // Input editing (applies to whichever input is active)
    CharInput(char),
    Paste(String),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    CursorUp,
    CursorDown,

    // Request actions
    SendRequest,
    CancelRequest,
    ExportCurl,

    // Response viewer (or help popup when open)
    ToggleFullscreen,
    ToggleResponseView,
    ScrollUp(u16),
    ScrollDown(u16),
    HalfPageUp,
    HalfPageDown,
    ScrollTop,
    ScrollBottom,

    // Headers form
    OpenHeaderForm,
    CloseHeaderForm,
    NewHeader,
    NextHeader,
    PrevHeader,
    DeleteHeader,
    EditHeader,
    SwitchHeaderField,
    SaveHeader,
    CancelHeaderEdit,

    // cURL
    ShowCurlImport,
    ImportCurl,
    CancelCurlImport,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Resize(u16, u16),
    Quit,
}

/// Focused area of the main screen
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Focus {
    #[default]
    Method,
    Url,
    Body,
    Response,
}

impl Focus {
    pub fn next(&self) -> Focus {
        match self {
            Focus::Method => Focus::Url,
            Focus::Url => Focus::Body,
            Focus::Body => Focus::Response,
            Focus::Response => Focus::Method,
        }
    }

    pub fn prev(&self) -> Focus {
        match self {
            Focus::Method => Focus::Response,
            Focus::Url => Focus::Method,
            Focus::Body => Focus::Url,
            Focus::Response => Focus::Body,
        }
    }

    pub fn is_text_input(&self) -> bool {
        matches!(self, Focus::Url | Focus::Body)
    }
}

/// Headers form mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum HeaderFormMode {
    #[default]
    List,
    Edit,
}

/// Field being edited in the headers form
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum HeaderField {
    #[default]
    Key,
    Value,
}

/// The parts of the UI state that decide how a key is interpreted
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyContext {
    pub focus: Focus,
    pub is_loading: bool,
    pub has_response: bool,
    pub show_help: bool,
    pub show_headers_form: bool,
    pub header_form_mode: HeaderFormMode,
    pub show_curl_import: bool,
}

impl KeyContext {
    fn has_popup(&self) -> bool {
        self.show_help || self.show_headers_form || self.show_curl_import
    }
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, ctx: &KeyContext) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Only quitting and cancelling work while a request is in flight
    if ctx.is_loading {
        return match key.code {
            KeyCode::Char('c') if ctrl => Some(UiEvent::Quit),
            KeyCode::Char('x') if ctrl => Some(UiEvent::CancelRequest),
            _ => None,
        };
    }

    if ctx.show_help {
        return handle_help_keys(key);
    }

    if ctx.show_headers_form {
        return match ctx.header_form_mode {
            HeaderFormMode::List => handle_header_list_keys(key, ctrl),
            HeaderFormMode::Edit => handle_header_edit_keys(key, ctrl),
        };
    }

    if ctx.show_curl_import {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::CancelCurlImport),
            KeyCode::Char('c') if ctrl => Some(UiEvent::CancelCurlImport),
            KeyCode::Enter => Some(UiEvent::ImportCurl),
            _ => edit_event(key),
        };
    }

    if ctrl {
        return match key.code {
            KeyCode::Char('c') => Some(UiEvent::Quit),
            KeyCode::Char('s') => Some(UiEvent::SendRequest),
            KeyCode::Char('x') => Some(UiEvent::CancelRequest),
            _ => None,
        };
    }

    match ctx.focus {
        Focus::Url => match key.code {
            KeyCode::Tab | KeyCode::BackTab => handle_global_keys(key, ctx.focus),
            KeyCode::Enter => Some(UiEvent::SendRequest),
            _ => edit_event(key),
        },
        Focus::Body => match key.code {
            KeyCode::Tab | KeyCode::BackTab => handle_global_keys(key, ctx.focus),
            KeyCode::Enter => Some(UiEvent::CharInput('\n')),
            _ => edit_event(key),
        },
        Focus::Response if ctx.has_response => {
            handle_response_keys(key).or_else(|| handle_global_keys(key, ctx.focus))
        }
        Focus::Method => handle_method_keys(key).or_else(|| handle_global_keys(key, ctx.focus)),
        Focus::Response => handle_global_keys(key, ctx.focus),
    }
}

/// Convert a mouse event to a UiEvent; popups swallow the mouse
pub fn mouse_to_ui_event(mouse: MouseEvent, ctx: &KeyContext) -> Option<UiEvent> {
    if ctx.has_popup() {
        return None;
    }

    let scrollable = ctx.focus == Focus::Response && ctx.has_response;
    match mouse.kind {
        MouseEventKind::ScrollUp if scrollable => Some(UiEvent::ScrollUp(WHEEL_SCROLL_LINES)),
        MouseEventKind::ScrollDown if scrollable => Some(UiEvent::ScrollDown(WHEEL_SCROLL_LINES)),
        MouseEventKind::Down(MouseButton::Left) => {
            if mouse.row < TOP_AREA_ROWS {
                Some(UiEvent::ClickRequestBar)
            } else {
                Some(UiEvent::ClickResponse)
            }
        }
        _ => None,
    }
}

/// Keys that edit the active text input
fn edit_event(key: KeyEvent) -> Option<UiEvent> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Delete => Some(UiEvent::Delete),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Home => Some(UiEvent::CursorHome),
        KeyCode::End => Some(UiEvent::CursorEnd),
        KeyCode::Up => Some(UiEvent::CursorUp),
        KeyCode::Down => Some(UiEvent::CursorDown),
        _ => None,
    }
}

/// Scrolling keys shared by the help popup and the response viewer
fn scroll_event(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(UiEvent::ScrollDown(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(UiEvent::ScrollUp(1)),
        KeyCode::Char('d') | KeyCode::PageDown => Some(UiEvent::HalfPageDown),
        KeyCode::Char('u') | KeyCode::PageUp => Some(UiEvent::HalfPageUp),
        KeyCode::Char('g') => Some(UiEvent::ScrollTop),
        KeyCode::Char('G') => Some(UiEvent::ScrollBottom),
        _ => None,
    }
}

fn handle_help_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::CloseHelp),
        _ => scroll_event(key),
    }
}

fn handle_header_list_keys(key: KeyEvent, ctrl: bool) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('c') if ctrl => Some(UiEvent::CloseHeaderForm),
        _ if ctrl => None,
        KeyCode::Esc | KeyCode::Char('q') => Some(UiEvent::CloseHeaderForm),
        KeyCode::Char('a') | KeyCode::Char('n') => Some(UiEvent::NewHeader),
        KeyCode::Char('j') | KeyCode::Down => Some(UiEvent::NextHeader),
        KeyCode::Char('k') | KeyCode::Up => Some(UiEvent::PrevHeader),
        KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Backspace | KeyCode::Delete => {
            Some(UiEvent::DeleteHeader)
        }
        KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::EditHeader),
        _ => None,
    }
}

fn handle_header_edit_keys(key: KeyEvent, ctrl: bool) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('c') if ctrl => Some(UiEvent::CloseHeaderForm),
        KeyCode::Esc => Some(UiEvent::CancelHeaderEdit),
        KeyCode::Tab | KeyCode::BackTab => Some(UiEvent::SwitchHeaderField),
        KeyCode::Enter => Some(UiEvent::SaveHeader),
        _ => edit_event(key),
    }
}

fn handle_response_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('f') => Some(UiEvent::ToggleFullscreen),
        KeyCode::Char('t') => Some(UiEvent::ToggleResponseView),
        _ => scroll_event(key),
    }
}

fn handle_method_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(UiEvent::NextMethod),
        KeyCode::Char('k') | KeyCode::Up => Some(UiEvent::PrevMethod),
        _ => None,
    }
}

fn handle_global_keys(key: KeyEvent, focus: Focus) -> Option<UiEvent> {
    match key.code {
        KeyCode::Tab => Some(UiEvent::NextFocus),
        KeyCode::BackTab => Some(UiEvent::PrevFocus),
        _ if focus.is_text_input() => None,
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('i') => Some(UiEvent::ShowCurlImport),
        KeyCode::Char('h') => Some(UiEvent::OpenHeaderForm),
        KeyCode::Char('c') => Some(UiEvent::ExportCurl),
        _ => None,
    }
}
