//! HTTP client wrapper - executes requests and formats responses

use std::time::{Duration, Instant};

use crate::config::HttpConfig;
use crate::json::{pretty_json, try_pretty_json};
use crate::messages::NetworkResponse;
use crate::models::{HttpMethod, Request};

/// Create an HTTP client from the configured timeout (0 disables it)
pub fn create_client(config: &HttpConfig) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if config.timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(config.timeout_secs));
    }

    builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to default HTTP client");
        reqwest::Client::new()
    })
}

/// Build a request from the composed request
pub fn build_request(client: &reqwest::Client, request: &Request) -> reqwest::RequestBuilder {
    let url = request.url.as_str();
    let mut req_builder = match request.method {
        HttpMethod::GET => client.get(url),
        HttpMethod::POST => client.post(url),
        HttpMethod::PUT => client.put(url),
        HttpMethod::PATCH => client.patch(url),
        HttpMethod::DELETE => client.delete(url),
    };

    for header in request.headers.iter().filter(|h| !h.key.is_empty()) {
        req_builder = req_builder.header(header.key.as_str(), header.value.as_str());
    }

    if request.method.has_body() && !request.body.is_empty() {
        req_builder = req_builder.body(request.body.clone());
    }

    req_builder
}

/// Execute an HTTP request and return the buffered response
pub async fn execute_request(
    client: &reqwest::Client,
    request: Request,
    request_id: u64,
) -> NetworkResponse {
    let start = Instant::now();
    let result = build_request(client, &request).send().await;

    let resp = match result {
        Ok(resp) => resp,
        Err(e) => {
            return NetworkResponse::Error {
                id: request_id,
                message: describe_error(&e),
                time_ms: elapsed_ms(start),
            }
        }
    };

    let status = format_status(resp.status());
    let headers = format_headers(resp.headers());

    match resp.bytes().await {
        Ok(bytes) => {
            let (body, is_json) = match pretty_json(&bytes) {
                Some(pretty) => (pretty, true),
                None => (try_pretty_json(&bytes), false),
            };
            NetworkResponse::Success {
                id: request_id,
                status,
                headers,
                body,
                is_json,
                time_ms: elapsed_ms(start),
            }
        }
        Err(e) => NetworkResponse::Error {
            id: request_id,
            message: format!("Error reading body: {}", e),
            time_ms: elapsed_ms(start),
        },
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        String::from("Request timed out")
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_builder() {
        format!("Invalid URL or header: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// "200 OK"; just the code when the reason is unknown
pub fn format_status(status: reqwest::StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// One `Key: v1, v2` line per header name, in the order names first appear
pub fn format_headers(headers: &reqwest::header::HeaderMap) -> String {
    headers
        .keys()
        .map(|key| {
            let values: Vec<String> = headers
                .get_all(key)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect();
            format!("{}: {}", key, values.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HeaderPair;
    use reqwest::header::{HeaderMap, HeaderValue};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn request(method: HttpMethod, url: &str) -> Request {
        Request {
            method,
            url: url.to_string(),
            ..Request::default()
        }
    }

    #[test]
    fn test_build_request_sets_headers_and_body() {
        let client = reqwest::Client::new();
        let mut req = request(HttpMethod::POST, "https://example.com/items");
        req.headers = vec![HeaderPair::new("X-Token", "abc"), HeaderPair::new("", "skipped")];
        req.body = String::from("{\"a\":1}");

        let built = build_request(&client, &req).build().unwrap();
        assert_eq!(built.method(), reqwest::Method::POST);
        assert_eq!(built.headers().get("x-token").unwrap(), "abc");
        assert_eq!(built.headers().len(), 1);
        assert_eq!(built.body().and_then(|b| b.as_bytes()), Some(&b"{\"a\":1}"[..]));
    }

    #[test]
    fn test_body_is_dropped_for_get() {
        let client = reqwest::Client::new();
        let mut req = request(HttpMethod::GET, "https://example.com");
        req.body = String::from("ignored");

        let built = build_request(&client, &req).build().unwrap();
        assert!(built.body().is_none());
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(reqwest::StatusCode::NOT_FOUND), "404 Not Found");
        assert_eq!(format_status(reqwest::StatusCode::from_u16(599).unwrap()), "599");
    }

    #[test]
    fn test_format_headers_joins_repeated_values() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.append("set-cookie", HeaderValue::from_static("a=1"));
        headers.append("set-cookie", HeaderValue::from_static("b=2"));

        assert_eq!(
            format_headers(&headers),
            "content-type: application/json\nset-cookie: a=1, b=2"
        );
    }

    /// Answer a single request with `body`
    async fn serve_once(content_type: &'static str, body: &'static str) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await.unwrap();
            let reply = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                content_type,
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
        });

        addr
    }

    #[tokio::test]
    async fn test_execute_against_local_server() {
        let addr = serve_once("application/json", "{\"ok\":true}").await;

        let client = create_client(&HttpConfig::default());
        let req = request(HttpMethod::GET, &format!("http://{}/status", addr));

        match execute_request(&client, req, 7).await {
            NetworkResponse::Success { id, status, headers, body, is_json, .. } => {
                assert_eq!(id, 7);
                assert!(is_json);
                assert_eq!(status, "200 OK");
                assert!(headers.contains("content-type: application/json"));
                assert_eq!(body, "{\n  \"ok\": true\n}");
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_plain_text_body_is_not_json() {
        let addr = serve_once("text/plain", "status: 200 ok, 3 items").await;

        let client = create_client(&HttpConfig::default());
        let req = request(HttpMethod::GET, &format!("http://{}/", addr));

        match execute_request(&client, req, 4).await {
            NetworkResponse::Success { body, is_json, .. } => {
                assert!(!is_json);
                assert_eq!(body, "status: 200 ok, 3 items");
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = create_client(&HttpConfig::default());
        let req = request(HttpMethod::GET, &format!("http://{}/", addr));

        match execute_request(&client, req, 1).await {
            NetworkResponse::Error { message, .. } => {
                assert!(message.starts_with("Connection failed"), "{}", message)
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_url_is_an_error() {
        let client = create_client(&HttpConfig::default());
        let req = request(HttpMethod::GET, "not a url");

        match execute_request(&client, req, 2).await {
            NetworkResponse::Error { message, .. } => {
                assert!(message.starts_with("Invalid URL"), "{}", message)
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
