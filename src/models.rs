use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::PATCH,
        HttpMethod::DELETE,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }

    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::POST | HttpMethod::PUT | HttpMethod::PATCH)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::GET),
            "POST" => Ok(HttpMethod::POST),
            "PUT" => Ok(HttpMethod::PUT),
            "PATCH" => Ok(HttpMethod::PATCH),
            "DELETE" => Ok(HttpMethod::DELETE),
            _ => Err(anyhow::anyhow!("Unknown HTTP method: {}", s)),
        }
    }
}

/// A single HTTP header key-value pair
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderPair {
    pub key: String,
    pub value: String,
}

impl HeaderPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        HeaderPair {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The request being composed
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<HeaderPair>,
    pub body: String,
}

impl Default for Request {
    fn default() -> Self {
        Request {
            method: HttpMethod::GET,
            url: String::new(),
            headers: Vec::new(),
            body: String::new(),
        }
    }
}

/// Which part of the response is shown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResponseView {
    #[default]
    Body,
    Headers,
}

impl ResponseView {
    pub fn toggle(self) -> ResponseView {
        match self {
            ResponseView::Body => ResponseView::Headers,
            ResponseView::Headers => ResponseView::Body,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseView::Body => "Body",
            ResponseView::Headers => "Headers",
        }
    }
}

/// Response from HTTP request
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    /// Status line ("200 OK"), "Sending..." while in flight or "Error"
    pub status: String,
    /// One `Key: v1, v2` line per header
    pub headers: String,
    pub body: String,
    /// Body is pretty-printed JSON and gets syntax colouring
    pub is_json: bool,
    pub time_ms: u64,
}

impl Response {
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn content(&self, view: ResponseView) -> &str {
        match view {
            ResponseView::Headers if !self.headers.is_empty() => &self.headers,
            _ => &self.body,
        }
    }

    /// Whether `content(view)` is the JSON body
    pub fn is_json_content(&self, view: ResponseView) -> bool {
        self.is_json && (view == ResponseView::Body || self.headers.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_str_is_case_insensitive() {
        assert_eq!("patch".parse::<HttpMethod>().unwrap(), HttpMethod::PATCH);
        assert!("OPTIONS".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_headers_view_falls_back_to_body() {
        let response = Response {
            body: String::from("{}"),
            ..Response::default()
        };
        assert_eq!(response.content(ResponseView::Headers), "{}");
    }

    #[test]
    fn test_json_colouring_follows_shown_content() {
        let mut response = Response {
            headers: String::from("content-type: application/json"),
            body: String::from("{}"),
            is_json: true,
            ..Response::default()
        };
        assert!(response.is_json_content(ResponseView::Body));
        assert!(!response.is_json_content(ResponseView::Headers));

        response.headers.clear();
        assert!(response.is_json_content(ResponseView::Headers));

        response.is_json = false;
        assert!(!response.is_json_content(ResponseView::Body));
    }
}
