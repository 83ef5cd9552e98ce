//! apitty - Actor-based terminal HTTP client
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use unicode_width::UnicodeWidthChar;

use apitty::app::{AppActor, TextInput};
use apitty::config::{Config, Theme};
use apitty::constants::{APP_NAME, HELP_TEXT, LOG_FILE_NAME};
use apitty::messages::ui_events::{key_to_ui_event, mouse_to_ui_event, Focus, HeaderField, HeaderFormMode};
use apitty::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use apitty::network::NetworkActor;
use apitty::ui::{centered_rect, focus_block, method_color, render_header_list, render_methods, response_lines, status_line_color};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to a file, the terminal belongs to the UI
    let log_dir = Config::dir();
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::load();
    let theme = Theme::from(&config.theme);
    tracing::info!(methods = config.methods.len(), timeout_secs = config.http.timeout_secs, "Starting {}", APP_NAME);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    let network_actor = NetworkActor::new(&config.http, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    let app_actor = AppActor::new(&config, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    let size = terminal.size()?;
    let _ = ui_tx.send(UiEvent::Resize(size.width, size.height));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx, &theme).await?;

    tracing::info!("Exiting");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
    theme: &Theme,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state, theme))?;

        if event::poll(Duration::from_millis(50))? {
            let ctx = current_state.key_context();
            let ui_event = match event::read()? {
                Event::Key(key) => key_to_ui_event(key, &ctx),
                Event::Mouse(mouse) => mouse_to_ui_event(mouse, &ctx),
                Event::Paste(text) if !ctx.is_loading => Some(UiEvent::Paste(text)),
                Event::Resize(width, height) => Some(UiEvent::Resize(width, height)),
                _ => None,
            };

            if let Some(ui_event) = ui_event {
                let quit = ui_event == UiEvent::Quit;
                let _ = ui_tx.send(ui_event);
                if quit {
                    break;
                }
            }
        }

        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState, theme: &Theme) {
    let area = f.area();

    if state.fullscreen {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(3),    // Response
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        draw_title(f, state, chunks[0], theme);
        draw_response(f, state, chunks[1], theme);
        draw_status_bar(f, state, chunks[2], theme);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Method selector
                Constraint::Length(3), // URL
                Constraint::Length(5), // Body
                Constraint::Min(3),    // Response
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        draw_methods(f, state, chunks[0], theme);
        draw_url_bar(f, state, chunks[1], theme);
        draw_body(f, state, chunks[2], theme);
        draw_response(f, state, chunks[3], theme);
        draw_status_bar(f, state, chunks[4], theme);
    }

    // Popups
    if state.show_help {
        draw_help_popup(f, state, area, theme);
    } else if state.show_headers_form {
        draw_headers_popup(f, state, area, theme);
    } else if state.show_curl_import {
        draw_curl_import_popup(f, state, area, theme);
    }
}

fn draw_title(f: &mut Frame, state: &RenderState, area: Rect, theme: &Theme) {
    let method = state.method();
    let title = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::White).bg(theme.accent).bold()),
        Span::raw(" "),
        Span::styled(method.as_str(), Style::default().fg(method_color(method.as_str())).bold()),
        Span::raw(" "),
        Span::styled(state.url.value(), Style::default().fg(theme.muted)),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_methods(f: &mut Frame, state: &RenderState, area: Rect, theme: &Theme) {
    let is_focused = state.focus == Focus::Method;
    let names: Vec<&str> = state.methods.iter().map(|m| m.as_str()).collect();

    let title = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(theme.accent).bold()),
        Span::raw("- Method "),
    ]);

    let tabs = render_methods(&names, state.method_index, theme).block(focus_block(title, is_focused, theme));
    f.render_widget(tabs, area);
}

fn draw_url_bar(f: &mut Frame, state: &RenderState, area: Rect, theme: &Theme) {
    let is_focused = state.focus == Focus::Url;
    let method = state.method();
    let loading = if state.is_loading { " [...]" } else { "" };

    let title = Line::from(vec![
        Span::raw(" URL "),
        Span::styled(method.as_str(), Style::default().fg(method_color(method.as_str())).bold()),
        Span::raw(format!("{} ", loading)),
    ]);
    let block = focus_block(title, is_focused, theme);

    let inner = block.inner(area);
    let (_, col) = state.url.cursor_position();
    let offset = col.saturating_sub(inner.width.saturating_sub(1) as usize);

    let input = if state.url.is_empty() && !is_focused {
        Paragraph::new(Span::styled("https://example.com", Style::default().fg(theme.muted)))
    } else {
        Paragraph::new(state.url.value()).scroll((0, clamp_u16(offset)))
    };
    f.render_widget(input.block(block), area);

    if is_focused && !state.has_popup() {
        place_cursor(f, inner, 0, col - offset);
    }
}

fn draw_body(f: &mut Frame, state: &RenderState, area: Rect, theme: &Theme) {
    let is_focused = state.focus == Focus::Body;
    let method = state.method();
    let title = if method.has_body() {
        String::from(" Body ")
    } else {
        format!(" Body (not sent with {}) ", method.as_str())
    };
    let block = focus_block(title, is_focused, theme);

    let inner = block.inner(area);
    let (line, col) = state.body.cursor_position();
    let line_offset = line.saturating_sub(inner.height.saturating_sub(1) as usize);
    let col_offset = col.saturating_sub(inner.width.saturating_sub(1) as usize);

    let style = if method.has_body() {
        Style::default()
    } else {
        Style::default().fg(theme.muted)
    };
    let body = Paragraph::new(state.body.value())
        .style(style)
        .block(block)
        .scroll((clamp_u16(line_offset), clamp_u16(col_offset)));
    f.render_widget(body, area);

    if is_focused && !state.has_popup() {
        place_cursor(f, inner, line - line_offset, col - col_offset);
    }
}

fn draw_response(f: &mut Frame, state: &RenderState, area: Rect, theme: &Theme) {
    let is_focused = state.focus == Focus::Response;

    let status_text = if state.response.status.is_empty() {
        Span::raw(" Response ")
    } else {
        let color = status_line_color(&state.response.status);
        Span::styled(format!(" {} ", state.response.status), Style::default().fg(color).bold())
    };

    let title = Line::from(vec![
        status_text,
        Span::styled(format!("[{}] ", state.response_view.as_str()), Style::default().fg(theme.muted)),
    ]);

    let total_lines = state.response_content.lines().count();
    let mut footer = Vec::new();
    if state.response.time_ms > 0 {
        footer.push(format!("{}ms", state.response.time_ms));
    }
    if total_lines > 0 {
        let percent = (state.response_scroll as usize + 1) * 100 / total_lines;
        footer.push(format!("{}%", percent.min(100)));
    }
    let footer = if footer.is_empty() {
        String::new()
    } else {
        format!(" {} ", footer.join(" | "))
    };

    let block = focus_block(title, is_focused, theme)
        .title_bottom(Line::from(footer).right_aligned())
        .padding(Padding::horizontal(1));

    let lines: Vec<Line> = if state.response.is_empty() && state.response.status.is_empty() {
        vec![Line::from(Span::styled(
            "Enter a URL and press Ctrl+S to send",
            Style::default().fg(theme.muted),
        ))]
    } else {
        let is_json = state.response.is_json_content(state.response_view);
        response_lines(&state.response_content, is_json, theme)
    };

    let response = Paragraph::new(lines)
        .block(block)
        .scroll((state.response_scroll, 0));
    f.render_widget(response, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect, theme: &Theme) {
    let status = if state.is_loading {
        " Sending... | Ctrl+X:cancel | Ctrl+C:quit "
    } else if state.show_help {
        " j/k:scroll | d/u:half page | g/G:top/bottom | Esc:close "
    } else if state.show_headers_form {
        match state.header_form_mode {
            HeaderFormMode::List => " a:add | e:edit | d:delete | j/k:select | Esc:close ",
            HeaderFormMode::Edit => " Tab:switch field | Enter:save | Esc:back ",
        }
    } else if state.show_curl_import {
        " Enter:import | Esc:cancel "
    } else {
        match state.focus {
            Focus::Method => " j/k:method | Tab:next | Ctrl+S:send | h:headers | i:import | c:export | ?:help | q:quit ",
            Focus::Url => " Enter:send | Tab:next | Ctrl+S:send ",
            Focus::Body => " Enter:newline | Tab:next | Ctrl+S:send ",
            Focus::Response => " f:fullscreen | t:body/headers | j/k:scroll | g/G:top/bottom | ?:help | q:quit ",
        }
    };

    let header_count = if state.headers.is_empty() {
        String::new()
    } else {
        format!("{} header(s) ", state.headers.len())
    };

    let bar = Line::from(vec![
        Span::styled(status, Style::default().fg(theme.muted)),
        Span::styled(header_count, Style::default().fg(theme.accent)),
    ]);
    f.render_widget(Paragraph::new(bar), area);
}

fn draw_help_popup(f: &mut Frame, state: &RenderState, area: Rect, theme: &Theme) {
    let width = (area.width * 7 / 10).max(area.width.min(40));
    let popup_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height.min(3),
        width,
        height: area.height.saturating_sub(6),
    };

    let block = focus_block(" Help ", true, theme).style(Style::default().bg(Color::Black));
    let help = Paragraph::new(HELP_TEXT)
        .block(block)
        .scroll((state.help_scroll, 0));

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_headers_popup(f: &mut Frame, state: &RenderState, area: Rect, theme: &Theme) {
    let popup_area = centered_rect(60, 60, area);
    f.render_widget(Clear, popup_area);

    let block = focus_block(" Headers ", true, theme).style(Style::default().bg(Color::Black));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // List
            Constraint::Length(3), // Key
            Constraint::Length(3), // Value
        ])
        .split(inner);

    if state.headers.is_empty() {
        let empty = Paragraph::new(Span::styled("No headers. Press a to add one.", Style::default().fg(theme.muted)));
        f.render_widget(empty, chunks[0]);
    } else {
        let selected = (state.header_form_mode == HeaderFormMode::List || state.header_is_editing)
            .then_some(state.selected_header);
        f.render_widget(render_header_list(&state.headers, selected, theme), chunks[0]);
    }

    if state.header_form_mode == HeaderFormMode::Edit {
        let title = if state.header_is_editing { " Key (editing) " } else { " Key (new) " };
        draw_single_line_input(f, &state.header_key, title, state.header_field == HeaderField::Key, chunks[1], theme);
        draw_single_line_input(f, &state.header_value, " Value ", state.header_field == HeaderField::Value, chunks[2], theme);
    }
}

fn draw_single_line_input(
    f: &mut Frame,
    input: &TextInput,
    title: &'static str,
    is_focused: bool,
    area: Rect,
    theme: &Theme,
) {
    let block = focus_block(title, is_focused, theme);
    let inner = block.inner(area);
    let (_, col) = input.cursor_position();
    let offset = col.saturating_sub(inner.width.saturating_sub(1) as usize);

    let paragraph = Paragraph::new(input.value())
        .block(block)
        .scroll((0, clamp_u16(offset)));
    f.render_widget(paragraph, area);

    if is_focused {
        place_cursor(f, inner, 0, col - offset);
    }
}

fn draw_curl_import_popup(f: &mut Frame, state: &RenderState, area: Rect, theme: &Theme) {
    let popup_area = centered_rect(80, 40, area);
    f.render_widget(Clear, popup_area);

    let block = focus_block(" Import cURL (Enter to import, Esc to cancel) ", true, theme)
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let width = inner.width.max(1) as usize;
    let (rows, cursor) = hard_wrap(state.curl_input.value(), state.curl_input.cursor_position().1, width);

    let mut lines: Vec<Line> = rows.into_iter().map(Line::from).collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Example: curl -X POST https://api.example.com/items -H 'Content-Type: application/json'",
        Style::default().fg(theme.muted),
    )));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    place_cursor(f, inner, cursor.0, cursor.1);
}

/// Break `text` into rows of at most `width` columns, returning the rows and
/// the (row, column) of display column `cursor_col`
fn hard_wrap(text: &str, cursor_col: usize, width: usize) -> (Vec<String>, (usize, usize)) {
    let mut rows = vec![String::new()];
    let mut row_width = 0;
    let mut col = 0;
    let mut cursor = None;

    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if row_width + w > width {
            rows.push(String::new());
            row_width = 0;
        }
        if cursor.is_none() && col >= cursor_col {
            cursor = Some((rows.len() - 1, row_width));
        }
        if let Some(row) = rows.last_mut() {
            row.push(c);
        }
        row_width += w;
        col += w;
    }

    let cursor = cursor.unwrap_or_else(|| {
        if row_width >= width {
            (rows.len(), 0)
        } else {
            (rows.len() - 1, row_width)
        }
    });
    (rows, cursor)
}

fn place_cursor(f: &mut Frame, inner: Rect, row: usize, col: usize) {
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let x = inner.x + clamp_u16(col).min(inner.width - 1);
    let y = inner.y + clamp_u16(row).min(inner.height - 1);
    f.set_cursor_position(Position::new(x, y));
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
