//! Text wrapping for the response viewport
//!
//! Widths are display columns, ANSI colour sequences (`ESC ... m`) count as zero.

use unicode_width::UnicodeWidthChar;

/// Characters at which a long line prefers to break
const BREAK_CHARS: [char; 3] = [' ', ',', ':'];

/// How far back (in characters) to look for a break character
const BREAK_LOOKBACK: usize = 15;

/// Display width of `s`, ignoring ANSI escape sequences
pub fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut in_ansi = false;

    for c in s.chars() {
        if c == '\x1b' {
            in_ansi = true;
            continue;
        }
        if in_ansi {
            if c == 'm' {
                in_ansi = false;
            }
            continue;
        }
        width += c.width().unwrap_or(0);
    }

    width
}

/// Wrap every line of `text` to at most `width` columns.
///
/// Each output line is terminated by `\n`. A `width` of 0 leaves the text as is.
pub fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len() + text.len() / width);

    for line in text.split('\n') {
        if visible_width(line) <= width {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut pos = 0;
        while pos < line.len() {
            let mut chunk_end = chunk_end(line, pos, width);
            if chunk_end <= pos {
                break;
            }

            let mut chunk = &line[pos..chunk_end];
            if chunk_end < line.len() {
                let break_at = chunk
                    .char_indices()
                    .rev()
                    .take(BREAK_LOOKBACK)
                    .find(|(_, c)| BREAK_CHARS.contains(c));
                if let Some((i, c)) = break_at {
                    chunk = &chunk[..i + c.len_utf8()];
                    chunk_end = pos + chunk.len();
                }
            }

            result.push_str(chunk);
            result.push('\n');

            pos = chunk_end;
            while line[pos..].starts_with(' ') {
                pos += 1;
            }
        }
    }

    result
}

/// Byte index where a chunk starting at `start` reaches `width` visible columns
fn chunk_end(s: &str, start: usize, width: usize) -> usize {
    let mut visible = 0;
    let mut in_ansi = false;

    for (i, c) in s[start..].char_indices() {
        if c == '\x1b' {
            in_ansi = true;
            continue;
        }
        if in_ansi {
            if c == 'm' {
                in_ansi = false;
            }
            continue;
        }

        let w = c.width().unwrap_or(0);
        if visible + w > width && visible > 0 {
            return start + i;
        }
        visible += w;
    }

    s.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_width_skips_ansi() {
        assert_eq!(visible_width("\x1b[31mred\x1b[0m"), 3);
        assert_eq!(visible_width("日本"), 4);
        assert_eq!(visible_width(""), 0);
    }

    #[test]
    fn test_short_lines_are_kept() {
        assert_eq!(wrap_text("a\nbc", 5), "a\nbc\n");
    }

    #[test]
    fn test_zero_width_is_identity() {
        assert_eq!(wrap_text("anything goes", 0), "anything goes");
    }

    #[test]
    fn test_breaks_at_space() {
        assert_eq!(wrap_text("hello world foo", 11), "hello \nworld foo\n");
    }

    #[test]
    fn test_hard_break_without_break_chars() {
        assert_eq!(wrap_text("abcdefghij", 4), "abcd\nefgh\nij\n");
    }

    #[test]
    fn test_next_chunk_skips_leading_spaces() {
        assert_eq!(wrap_text("\"a\": 1,   \"b\": 2", 9), "\"a\": 1,  \n\"b\": 2\n");
    }

    #[test]
    fn test_ansi_sequences_do_not_count() {
        let wrapped = wrap_text("\x1b[31mabcdef\x1b[0m", 6);
        assert_eq!(wrapped, "\x1b[31mabcdef\x1b[0m\n");
    }
}
