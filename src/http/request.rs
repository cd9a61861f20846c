use bytes::Bytes;
use std::collections::HashMap;
use url::form_urlencoded;

/// HTTP request methods.
///
/// Only GET and POST are routable. Anything else is answered with
/// 405 Method Not Allowed before either route table is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string matches a supported method, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use microserve::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("PUT"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

/// Represents a parsed HTTP request from a client.
///
/// Built once per connection and never mutated afterwards. Header names are
/// stored lower-cased; query parameters come only from the part of the
/// target after `?`.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method
    pub method: Method,
    /// The path component of the request target, still percent-encoded
    pub path: String,
    /// Raw query string (without the leading `?`)
    pub query: Option<String>,
    /// Decoded query parameters
    pub query_params: HashMap<String, String>,
    /// Request headers keyed by lower-cased name
    pub headers: HashMap<String, String>,
    /// Request body, empty when none was sent
    pub body: Bytes,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Method,
    target: String,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl RequestBuilder {
    /// Starts a request for `target`, which may carry a `?query` suffix.
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Adds a header. The name is lower-cased; a repeated name replaces the
    /// earlier value.
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.as_ref().trim().to_ascii_lowercase(), value.into());
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        for (key, value) in headers {
            self = self.header(key, value);
        }
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Request {
        let (path, query) = split_target(&self.target);
        let query_params = query.map(parse_query).unwrap_or_default();

        Request {
            method: self.method,
            path: path.to_string(),
            query: query.map(str::to_string),
            query_params,
            headers: self.headers,
            body: self.body,
        }
    }
}

/// Splits a request target into its path and optional query component.
///
/// ```
/// # use microserve::http::request::split_target;
/// assert_eq!(split_target("/a?x=1"), ("/a", Some("x=1")));
/// assert_eq!(split_target("/a"), ("/a", None));
/// ```
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

impl Request {
    /// Retrieves a header value by name, case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Looks up a query parameter. A parameter given without `=` or without a
    /// value yields `Some("")`; an absent one yields `None`.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|v| v.as_str())
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// True when the Content-Type header is exactly `application/json`,
    /// ignoring case.
    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .map(|v| v.trim().eq_ignore_ascii_case("application/json"))
            .unwrap_or(false)
    }

    /// The body decoded as UTF-8, with invalid sequences replaced.
    pub fn body_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Extracts a top-level field from a JSON object body.
    ///
    /// Strings are returned verbatim; other scalar values in their JSON
    /// text form. Returns `None` if the body is not a JSON object or the
    /// field is missing or null.
    pub fn json_value(&self, name: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        match value.as_object()?.get(name)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
