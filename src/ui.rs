use ratatui::{prelude::*, widgets::*};

use crate::config::Theme;
use crate::models::HeaderPair;

/// Bordered block whose border colour reflects focus
pub fn focus_block<'a>(title: impl Into<Line<'a>>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.focus)
    } else {
        Style::default().fg(theme.border)
    };

    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(title)
}

/// Renders the request header list, highlighting the selected entry
pub fn render_header_list<'a>(
    headers: &'a [HeaderPair],
    selected: Option<usize>,
    theme: &Theme,
) -> List<'a> {
    let items: Vec<ListItem> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let (prefix, style) = if Some(i) == selected {
                ("➤ ", Style::default().fg(theme.focus).bold())
            } else {
                ("  ", Style::default())
            };
            ListItem::new(format!("{}{}. {}: {}", prefix, i + 1, h.key, h.value)).style(style)
        })
        .collect();

    List::new(items)
}

/// Renders the method selector as tabs
pub fn render_methods<'a>(methods: &[&'a str], selected: usize, theme: &Theme) -> Tabs<'a> {
    let titles: Vec<Line> = methods.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme.muted))
        .highlight_style(Style::default().fg(Color::White).bg(theme.accent).bold())
        .divider(" ")
}

/// Lines for the response viewport; only JSON content is coloured
pub fn response_lines(content: &str, is_json: bool, theme: &Theme) -> Vec<Line<'static>> {
    if is_json {
        highlight_json(content, theme)
    } else {
        content.lines().map(|l| Line::from(l.to_string())).collect()
    }
}

/// JSON syntax highlighting.
///
/// String state is carried across line breaks, so text that was wrapped in the
/// middle of a string keeps its colour on the continuation line.
pub fn highlight_json(text: &str, theme: &Theme) -> Vec<Line<'static>> {
    let chars: Vec<char> = text.chars().collect();
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut plain = String::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut in_escape = false;
    let mut string_style = Style::default();

    let flush_plain = |plain: &mut String, spans: &mut Vec<Span<'static>>| {
        if !plain.is_empty() {
            spans.push(Span::raw(std::mem::take(plain)));
        }
    };

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            if in_string && !current.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut current), string_style));
            }
            flush_plain(&mut plain, &mut spans);
            lines.push(Line::from(std::mem::take(&mut spans)));
            i += 1;
            continue;
        }

        if in_string {
            current.push(c);
            if in_escape {
                in_escape = false;
            } else if c == '\\' {
                in_escape = true;
            } else if c == '"' {
                spans.push(Span::styled(std::mem::take(&mut current), string_style));
                in_string = false;
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                flush_plain(&mut plain, &mut spans);
                let color = if is_object_key(&chars, i) {
                    theme.json_key
                } else {
                    theme.json_string
                };
                string_style = Style::default().fg(color);
                current.push(c);
                in_string = true;
            }
            '{' | '}' | '[' | ']' => {
                flush_plain(&mut plain, &mut spans);
                spans.push(Span::styled(
                    c.to_string(),
                    Style::default().fg(theme.json_bracket),
                ));
            }
            't' | 'f' | 'n' => {
                let literal = ["true", "false", "null"]
                    .into_iter()
                    .find(|lit| starts_with_at(&chars, i, lit));
                match literal {
                    Some(lit) => {
                        flush_plain(&mut plain, &mut spans);
                        spans.push(Span::styled(lit, Style::default().fg(theme.json_literal)));
                        i += lit.len();
                        continue;
                    }
                    None => plain.push(c),
                }
            }
            '-' | '0'..='9' => {
                flush_plain(&mut plain, &mut spans);
                let start = i;
                i += 1;
                while i < chars.len() && is_number_char(chars[i]) {
                    i += 1;
                }
                let number: String = chars[start..i].iter().collect();
                spans.push(Span::styled(number, Style::default().fg(theme.json_number)));
                continue;
            }
            _ => plain.push(c),
        }
        i += 1;
    }

    if in_string && !current.is_empty() {
        spans.push(Span::styled(current, string_style));
    }
    flush_plain(&mut plain, &mut spans);
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }

    lines
}

/// A string starting at `start` is a key when its closing quote is followed by `:`
fn is_object_key(chars: &[char], start: usize) -> bool {
    let mut j = start + 1;
    while j < chars.len() && chars[j] != '"' {
        if chars[j] == '\\' {
            j += 1;
        }
        j += 1;
    }
    if j >= chars.len() {
        return false;
    }

    chars[j + 1..]
        .iter()
        .find(|c| !c.is_whitespace())
        .is_some_and(|c| *c == ':')
}

fn starts_with_at(chars: &[char], at: usize, word: &str) -> bool {
    word.chars()
        .enumerate()
        .all(|(k, w)| chars.get(at + k) == Some(&w))
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Color for a status line such as "404 Not Found", "Sending..." or "Error"
pub fn status_line_color(status: &str) -> Color {
    let code = status
        .split_whitespace()
        .next()
        .and_then(|c| c.parse::<u16>().ok());
    match code {
        Some(code) => status_color(code),
        None if status == "Error" => Color::Red,
        None => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Yellow,
        "PUT" => Color::Blue,
        "PATCH" => Color::Cyan,
        "DELETE" => Color::Red,
        _ => Color::White,
    }
}

/// Rectangle of the given percentage size centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(line: &Line, content: &str) -> Option<Color> {
        line.spans
            .iter()
            .find(|s| s.content == content)
            .and_then(|s| s.style.fg)
    }

    #[test]
    fn test_non_json_response_is_not_coloured() {
        let theme = Theme::default();
        let error = "Error: Connection failed: tcp connect error 127.0.0.1:8080 nullable untrue\n";
        let export = "curl -X POST \\\n  -H 'X-Count: 3' \\\n  'https://example.com/items?limit=-1'\n";

        for text in [error, export] {
            let lines = response_lines(text, false, &theme);
            assert_eq!(lines.len(), text.lines().count());
            assert!(lines
                .iter()
                .flat_map(|l| l.spans.iter())
                .all(|s| s.style == Style::default()));
        }
    }

    #[test]
    fn test_json_response_is_coloured() {
        let theme = Theme::default();
        let lines = response_lines("{\n  \"n\": 1\n}\n", true, &theme);
        assert_eq!(styled(&lines[1], "1"), Some(theme.json_number));
    }

    #[test]
    fn test_keys_and_values_get_different_colors() {
        let theme = Theme::default();
        let lines = highlight_json("{\n  \"name\": \"apitty\",\n  \"n\": -1.5e3\n}", &theme);

        assert_eq!(lines.len(), 4);
        assert_eq!(styled(&lines[0], "{"), Some(theme.json_bracket));
        assert_eq!(styled(&lines[1], "\"name\""), Some(theme.json_key));
        assert_eq!(styled(&lines[1], "\"apitty\""), Some(theme.json_string));
        assert_eq!(styled(&lines[2], "-1.5e3"), Some(theme.json_number));
    }

    #[test]
    fn test_literals_and_escaped_quotes() {
        let theme = Theme::default();
        let lines = highlight_json(r#"[true, "a\"b", null]"#, &theme);

        assert_eq!(lines.len(), 1);
        assert_eq!(styled(&lines[0], "true"), Some(theme.json_literal));
        assert_eq!(styled(&lines[0], r#""a\"b""#), Some(theme.json_string));
        assert_eq!(styled(&lines[0], "null"), Some(theme.json_literal));
    }

    #[test]
    fn test_string_split_by_wrapping_keeps_color() {
        let theme = Theme::default();
        let lines = highlight_json("\"long\n value\"", &theme);

        assert_eq!(lines.len(), 2);
        assert_eq!(styled(&lines[0], "\"long"), Some(theme.json_string));
        assert_eq!(styled(&lines[1], " value\""), Some(theme.json_string));
    }

    #[test]
    fn test_plain_text_is_unstyled() {
        let lines = highlight_json("not found", &Theme::default());
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "not found");
    }

    #[test]
    fn test_status_line_color() {
        assert_eq!(status_line_color("200 OK"), Color::Green);
        assert_eq!(status_line_color("404 Not Found"), Color::Red);
        assert_eq!(status_line_color("Error"), Color::Red);
        assert_eq!(status_line_color("Sending..."), Color::Yellow);
    }
}
