//! HTTP request type.

use std::collections::HashMap;

use ferroform_core::RawSubmission;

/// HTTP request methods handled by the form endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method
    Get,
    /// POST method
    Post,
}

impl Method {
    /// Returns the method as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An HTTP request as seen by the form endpoints.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// Query string parameters.
    pub query: HashMap<String, String>,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Vec<u8>,
}

impl Request {
    /// Creates a new request.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: HashMap::new(),
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a form-urlencoded body from key/value pairs.
    #[must_use]
    pub fn form_body<'a, I>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let encoded: Vec<String> = pairs
            .into_iter()
            .map(|(k, v)| format!("{}={}", urlencode(k), urlencode(v)))
            .collect();
        self.header("Content-Type", "application/x-www-form-urlencoded; charset=UTF-8")
            .body(encoded.join("&"))
    }

    /// Sets a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Gets a query parameter.
    pub fn get_query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Returns the posted body as decoded form pairs, preserving
    /// repeated keys.
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        let Ok(body) = std::str::from_utf8(&self.body) else {
            return Vec::new();
        };
        parse_pairs(body)
    }

    /// Returns the posted body as a raw submission, with repeated keys
    /// and `name[]` notation folded into repeated values.
    pub fn form_submission(&self) -> RawSubmission {
        RawSubmission::from_pairs(self.form_pairs())
    }

    /// Looks up a posted form value by name, falling back to the query
    /// string.
    pub fn form_or_query(&self, key: &str) -> Option<String> {
        self.form_pairs()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .or_else(|| self.get_query(key).map(str::to_string))
    }

    /// Parses query parameters from a query string.
    pub fn parse_query_string(query: &str) -> HashMap<String, String> {
        parse_pairs(query).into_iter().collect()
    }
}

/// Parses an urlencoded pair list (`a=1&b=two`), decoding both sides.
pub fn parse_pairs(encoded: &str) -> Vec<(String, String)> {
    encoded
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let value = parts.next().unwrap_or("");
            Some((urldecode(key), urldecode(value)))
        })
        .collect()
}

/// Simple URL decoding. Percent escapes are collected as raw bytes and
/// decoded as UTF-8 at the end, so multi-byte sequences survive intact.
fn urldecode(s: &str) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    let mut input = s.bytes();

    while let Some(b) = input.next() {
        if b == b'%' {
            let hex: Vec<u8> = input.by_ref().take(2).collect();
            if hex.len() == 2 {
                if let Ok(hex_str) = std::str::from_utf8(&hex) {
                    if let Ok(byte) = u8::from_str_radix(hex_str, 16) {
                        bytes.push(byte);
                        continue;
                    }
                }
            }
            bytes.push(b'%');
            bytes.extend_from_slice(&hex);
        } else if b == b'+' {
            bytes.push(b' ');
        } else {
            bytes.push(b);
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Minimal URL encoding for building form bodies.
fn urlencode(s: &str) -> String {
    let mut result = String::new();
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char);
            }
            b' ' => result.push('+'),
            _ => result.push_str(&format!("%{byte:02X}")),
        }
    }
    result
}
