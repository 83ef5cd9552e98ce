//! cURL import/export
//!
//! Import is deliberately forgiving: a pasted command is never rejected,
//! whatever can be recognised is extracted and the rest falls back to
//! defaults (`GET`, empty URL, no headers).

use crate::models::{HeaderPair, HttpMethod, Request};

/// Method, URL and headers extracted from a cURL command
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Uppercased verb, `GET` unless `-X`/`--request` was given
    pub method: String,
    /// Empty when no URL was found
    pub url: String,
    /// Unique by key, in the order each key first appeared
    pub headers: Vec<HeaderPair>,
}

impl ParsedCommand {
    pub fn into_parts(self) -> (String, String, Vec<HeaderPair>) {
        (self.method, self.url, self.headers)
    }
}

/// Parse a cURL command into method, URL and headers
pub fn parse_curl_command(input: &str) -> ParsedCommand {
    let args = tokenize(input);

    let mut method = String::from("GET");
    let mut url = String::new();
    let mut headers: Vec<HeaderPair> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();

        match arg {
            "-X" | "--request" => {
                if let Some(value) = args.get(i + 1) {
                    method = value.to_uppercase();
                    i += 1;
                }
            }
            "-H" | "--header" => {
                if let Some(value) = args.get(i + 1) {
                    if let Some((key, val)) = value.split_once(':') {
                        upsert_header(&mut headers, key.trim(), val.trim());
                    }
                    i += 1;
                }
            }
            _ if arg.starts_with("http://") || arg.starts_with("https://") => {
                url = arg.to_string();
            }
            _ if arg.starts_with('-') => {
                // Unknown flag: its value must not be mistaken for the URL
                if args.get(i + 1).is_some_and(|next| !next.starts_with('-')) {
                    i += 1;
                }
            }
            _ => {
                if url.is_empty() {
                    url = arg.to_string();
                }
            }
        }
        i += 1;
    }

    ParsedCommand {
        method,
        url,
        headers,
    }
}

fn upsert_header(headers: &mut Vec<HeaderPair>, key: &str, value: &str) {
    match headers.iter_mut().find(|h| h.key == key) {
        Some(existing) => existing.value = value.to_string(),
        None => headers.push(HeaderPair::new(key, value)),
    }
}

/// Split a command line into arguments, honouring quotes and backslash escapes
pub fn tokenize(input: &str) -> Vec<String> {
    let mut input = input.trim();
    if let Some(rest) = input.strip_prefix("curl ") {
        input = rest.trim();
    }

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_double_quote = false;
    let mut in_single_quote = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_single_quote => in_double_quote = !in_double_quote,
            '\'' if !in_double_quote => in_single_quote = !in_single_quote,
            ' ' if !in_double_quote && !in_single_quote => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            '\\' if chars.peek().is_some() => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Format request as cURL command
pub fn to_curl(request: &Request) -> String {
    let mut parts = vec!["curl".to_string()];

    if request.method != HttpMethod::GET {
        parts.push(format!("-X {}", request.method.as_str()));
    }

    parts.push(shell_quote(&request.url));

    for header in &request.headers {
        if !header.key.is_empty() {
            parts.push(format!(
                "-H {}",
                shell_quote(&format!("{}: {}", header.key, header.value))
            ));
        }
    }

    if request.method.has_body() && !request.body.is_empty() {
        parts.push(format!("-d {}", shell_quote(&request.body)));
    }

    parts.join(" \\\n  ")
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(parsed: &'a ParsedCommand, key: &str) -> Option<&'a str> {
        parsed
            .headers
            .iter()
            .find(|h| h.key == key)
            .map(|h| h.value.as_str())
    }

    #[test]
    fn test_parse_simple_get() {
        let parsed = parse_curl_command("curl https://api.example.com");
        assert_eq!(parsed.method, "GET");
        assert_eq!(parsed.url, "https://api.example.com");
        assert!(parsed.headers.is_empty());
    }

    #[test]
    fn test_parse_post_with_headers() {
        let parsed = parse_curl_command(
            r#"curl -X POST https://api.example.com -H "Content-Type: application/json" -H "Authorization: Bearer token""#,
        );
        assert_eq!(parsed.method, "POST");
        assert_eq!(parsed.url, "https://api.example.com");
        assert_eq!(parsed.headers.len(), 2);
        assert_eq!(header(&parsed, "Authorization"), Some("Bearer token"));
    }

    #[test]
    fn test_flag_before_url() {
        let parsed =
            parse_curl_command(r#"curl -H "Authorization: Bearer token123" https://api.example.com"#);
        assert_eq!(parsed.url, "https://api.example.com");
        assert_eq!(header(&parsed, "Authorization"), Some("Bearer token123"));
    }

    #[test]
    fn test_method_is_uppercased_and_last_wins() {
        let parsed = parse_curl_command("curl --request put -X patch https://example.com");
        assert_eq!(parsed.method, "PATCH");

        let parsed = parse_curl_command("curl -X delete https://example.com");
        assert_eq!(parsed.method, "DELETE");
    }

    #[test]
    fn test_quoted_spaces_are_preserved() {
        let parsed =
            parse_curl_command(r#"curl https://example.com -H "Authorization: Bearer abc def""#);
        assert_eq!(parsed.headers, vec![HeaderPair::new("Authorization", "Bearer abc def")]);
    }

    #[test]
    fn test_header_value_keeps_extra_colons() {
        let parsed = parse_curl_command(
            "curl https://example.com -H 'Authorization: Bearer token:with:colons'",
        );
        assert_eq!(header(&parsed, "Authorization"), Some("Bearer token:with:colons"));
    }

    #[test]
    fn test_header_without_colon_is_dropped() {
        let parsed =
            parse_curl_command(r#"curl https://example.com -H "Authorization Bearer token""#);
        assert!(parsed.headers.is_empty());
        assert_eq!(parsed.url, "https://example.com");
    }

    #[test]
    fn test_header_with_empty_value() {
        let parsed = parse_curl_command(r#"curl https://example.com -H "Authorization: ""#);
        assert_eq!(parsed.headers, vec![HeaderPair::new("Authorization", "")]);
    }

    #[test]
    fn test_repeated_header_last_wins_in_first_position() {
        let parsed = parse_curl_command(
            r#"curl https://example.com -H "X: 1" -H "Accept: */*" -H " X : 2""#,
        );
        assert_eq!(
            parsed.headers,
            vec![HeaderPair::new("X", "2"), HeaderPair::new("Accept", "*/*")]
        );
    }

    #[test]
    fn test_unknown_flag_value_is_not_the_url() {
        let parsed = parse_curl_command("curl --data-raw foo https://example.com");
        assert_eq!(parsed.url, "https://example.com");

        let parsed = parse_curl_command("curl --data-raw foo example.com");
        assert_eq!(parsed.url, "example.com");
    }

    #[test]
    fn test_unknown_flag_followed_by_flag_does_not_skip() {
        let parsed = parse_curl_command("curl -k -X POST localhost:8080/items");
        assert_eq!(parsed.method, "POST");
        assert_eq!(parsed.url, "localhost:8080/items");
    }

    #[test]
    fn test_later_http_url_overrides_bare_token() {
        let parsed = parse_curl_command("curl example.com other https://real.example.com");
        assert_eq!(parsed.url, "https://real.example.com");
    }

    #[test]
    fn test_flag_without_value_at_end() {
        let parsed = parse_curl_command("curl https://example.com -X");
        assert_eq!(parsed.method, "GET");
        let parsed = parse_curl_command("curl https://example.com -H");
        assert!(parsed.headers.is_empty());
    }

    #[test]
    fn test_empty_and_prefix_only_input() {
        assert!(tokenize("").is_empty());
        assert_eq!(tokenize("   curl    "), vec!["curl"]);
        let parsed = parse_curl_command("");
        assert_eq!(parsed.into_parts(), (String::from("GET"), String::new(), Vec::new()));
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        assert_eq!(tokenize("CURL https://x.io"), vec!["CURL", "https://x.io"]);
        assert_eq!(tokenize("  curl   https://x.io  "), vec!["https://x.io"]);
    }

    #[test]
    fn test_tokenize_collapses_spaces() {
        assert_eq!(tokenize("a    b  c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_tokenize_mixed_quotes() {
        assert_eq!(tokenize(r#"'say "hi"' "it's""#), vec![r#"say "hi""#, "it's"]);
    }

    #[test]
    fn test_tokenize_escapes() {
        assert_eq!(tokenize(r#"a\ b \"c\" 'd\'"#), vec!["a b", "\"c\"", "d'"]);
        assert_eq!(tokenize(r"trailing\"), vec![r"trailing\"]);
    }

    #[test]
    fn test_tokenize_unterminated_quote() {
        assert_eq!(tokenize(r#"-H "Accept: text"#), vec!["-H", "Accept: text"]);
    }

    #[test]
    fn test_tokenize_keeps_multibyte_chars() {
        assert_eq!(tokenize("-H 'X-Name: café ☕'"), vec!["-H", "X-Name: café ☕"]);
    }

    #[test]
    fn test_to_curl_round_trip() {
        let request = Request {
            method: HttpMethod::POST,
            url: String::from("https://api.example.com/users"),
            headers: vec![
                HeaderPair::new("Content-Type", "application/json"),
                HeaderPair::new("X-Quote", "it's"),
                HeaderPair::new("", "ignored"),
            ],
            body: String::from(r#"{"name":"test"}"#),
        };

        let exported = to_curl(&request);
        assert!(exported.contains("-d '{\"name\":\"test\"}'"));

        let parsed = parse_curl_command(&exported.replace(" \\\n  ", " "));
        assert_eq!(parsed.method, "POST");
        assert_eq!(parsed.url, request.url);
        assert_eq!(parsed.headers, request.headers[..2].to_vec());
    }

    #[test]
    fn test_to_curl_get_omits_method_and_body() {
        let request = Request {
            url: String::from("https://example.com"),
            body: String::from("ignored"),
            ..Request::default()
        };
        assert_eq!(to_curl(&request), "curl \\\n  'https://example.com'");
    }
}
