//! JSON pretty-printing for response bodies

/// Pretty-print `data` if it is a JSON object or array, otherwise return it as text
pub fn try_pretty_json(data: &[u8]) -> String {
    if data.trim_ascii().is_empty() {
        return String::new();
    }

    pretty_json(data).unwrap_or_else(|| String::from_utf8_lossy(data).into_owned())
}

/// Pretty form of `data`, only when it parses as a JSON object or array
pub fn pretty_json(data: &[u8]) -> Option<String> {
    let trimmed = data.trim_ascii();
    if !matches!(trimmed.first(), Some(b'{' | b'[')) {
        return None;
    }

    let value = serde_json::from_slice::<serde_json::Value>(trimmed).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_prints_objects_with_sorted_keys() {
        let pretty = try_pretty_json(br#"  {"b":1,"a":[true,null]}  "#);
        assert_eq!(pretty, "{\n  \"a\": [\n    true,\n    null\n  ],\n  \"b\": 1\n}");
    }

    #[test]
    fn test_pretty_prints_arrays() {
        assert_eq!(try_pretty_json(b"[1,2]"), "[\n  1,\n  2\n]");
    }

    #[test]
    fn test_non_json_is_returned_untouched() {
        assert_eq!(try_pretty_json(b"<html>hi</html>\n"), "<html>hi</html>\n");
        assert_eq!(try_pretty_json(b"{broken"), "{broken");
        assert_eq!(try_pretty_json(b"42"), "42");
    }

    #[test]
    fn test_pretty_json_only_for_objects_and_arrays() {
        assert!(pretty_json(b" {\"a\":1} ").is_some());
        assert!(pretty_json(b"[]").is_some());
        assert!(pretty_json(b"42").is_none());
        assert!(pretty_json(b"null").is_none());
        assert!(pretty_json(b"{broken").is_none());
        assert!(pretty_json(b"").is_none());
    }

    #[test]
    fn test_blank_body_is_empty() {
        assert_eq!(try_pretty_json(b" \n\t"), "");
    }
}
