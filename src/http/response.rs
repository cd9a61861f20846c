use bytes::Bytes;

/// Content type used when a handler does not set one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// HTTP status codes supported by the server.
///
/// Common HTTP status codes used in responses:
/// - `Ok` (200): Request successful
/// - `Created` (201): Resource created successfully
/// - `NoContent` (204): Successful request with no content
/// - `BadRequest` (400): Malformed request
/// - `NotFound` (404): Resource not found
/// - `MethodNotAllowed` (405): HTTP method not supported
/// - `ServerError` (500): Server error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusCode {
    /// 200 OK
    #[default]
    Ok,
    /// 201 Created
    Created,
    /// 204 No Content
    NoContent,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Server Error
    ServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use microserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NoContent => 204,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::ServerError => 500,
        }
    }

    /// Maps a numeric code back to a supported status.
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            200 => Some(StatusCode::Ok),
            201 => Some(StatusCode::Created),
            204 => Some(StatusCode::NoContent),
            400 => Some(StatusCode::BadRequest),
            404 => Some(StatusCode::NotFound),
            405 => Some(StatusCode::MethodNotAllowed),
            500 => Some(StatusCode::ServerError),
            _ => None,
        }
    }

    /// Returns the reason phrase written on the status line.
    ///
    /// # Example
    ///
    /// ```
    /// # use microserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::ServerError.reason_phrase(), "Server Error");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NoContent => "No Content",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::ServerError => "Server Error",
        }
    }
}

/// A complete HTTP response ready to be sent to a client.
///
/// Only three things go on the wire: the status, the content type and the
/// body. `Content-Length` is always derived from the body, so two responses
/// with equal fields serialize to identical bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Value of the Content-Type header
    pub content_type: String,
    /// Response body as bytes
    pub body: Bytes,
}

impl Default for Response {
    fn default() -> Self {
        ResponseBuilder::new().build()
    }
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use microserve::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new()
///     .status(StatusCode::Created)
///     .content_type("text/plain")
///     .body("done")
///     .build();
/// assert_eq!(response.body.as_ref(), b"done");
/// ```
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: String,
    body: Bytes,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBuilder {
    /// Creates a builder for a 200 `application/json` response with an empty body.
    pub fn new() -> Self {
        Self {
            status: StatusCode::Ok,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            body: Bytes::new(),
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Sets a text body, UTF-8 encoded.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Bytes::from(body.into());
        self
    }

    /// Sets a raw byte body.
    pub fn body_bytes(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            content_type: self.content_type,
            body: self.body,
        }
    }
}

impl Response {
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::new()
    }

    /// Creates a 200 OK response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        ResponseBuilder::new().body(body).build()
    }

    /// Creates an `application/json` response from a serializable value.
    pub fn json(status: StatusCode, value: &serde_json::Value) -> Self {
        ResponseBuilder::new()
            .status(status)
            .content_type(DEFAULT_CONTENT_TYPE)
            .body(value.to_string())
            .build()
    }

    /// Creates a JSON response of the form `{"error": message}`.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::json(status, &serde_json::json!({ "error": message }))
    }

    /// Byte length of the body, as sent in `Content-Length`.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    /// Serializes the response into its wire form.
    pub fn to_bytes(&self) -> Vec<u8> {
        crate::http::writer::serialize_response(self)
    }
}
