use bytes::Bytes;
use std::collections::HashMap;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::error::HttpError;
use crate::http::request::{Method, Request, RequestBuilder};

/// Upper bound on the buffer reserved up front for a body; larger bodies
/// still arrive, the vector just grows as they do.
const BODY_PREALLOC_LIMIT: usize = 64 * 1024;

/// The three parts of `<METHOD> <TARGET> <VERSION>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    /// Origin-form target: path plus optional `?query`
    pub target: String,
    /// May be empty when the client omitted it
    pub version: String,
}

/// Parses a request line, splitting on single spaces.
///
/// The target is validated before the method so that a garbled line is
/// always a 400, never a 405.
pub fn parse_request_line(line: &str) -> Result<RequestLine, HttpError> {
    let tokens: Vec<&str> = line.split(' ').collect();
    if tokens.len() < 2 {
        return Err(HttpError::MalformedRequestLine);
    }

    let target = origin_form(tokens[1]);
    if !is_valid_target(target) {
        return Err(HttpError::MalformedRequestLine);
    }

    let method = Method::from_str(tokens[0])
        .ok_or_else(|| HttpError::UnsupportedMethod(tokens[0].to_string()))?;

    Ok(RequestLine {
        method,
        target: target.to_string(),
        version: tokens.get(2).copied().unwrap_or_default().to_string(),
    })
}

/// Strips scheme and authority from an absolute-form target.
fn origin_form(target: &str) -> &str {
    let Some(rest) = target
        .strip_prefix("http://")
        .or_else(|| target.strip_prefix("https://"))
    else {
        return target;
    };

    match rest.find(['/', '?']) {
        Some(idx) => &rest[idx..],
        None => "/",
    }
}

/// URI syntax check: no whitespace, controls or characters RFC 3986 never
/// allows unescaped, and every `%` starts a two-digit hex escape.
fn is_valid_target(target: &str) -> bool {
    if target.is_empty() {
        return false;
    }

    let bytes = target.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let escape = bytes.get(i + 1..i + 3);
                if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                    return false;
                }
                i += 3;
                continue;
            }
            b'"' | b'<' | b'>' | b'\\' | b'^' | b'`' | b'{' | b'|' | b'}' => return false,
            b if b.is_ascii_control() || b == b' ' => return false,
            _ => {}
        }
        i += 1;
    }
    true
}

/// Reads one line, without its `\r\n` or `\n` terminator.
///
/// Returns `None` at end of input.
pub async fn read_line<R>(reader: &mut R) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf).await?;
    if n == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Skips blank lines and returns the first non-empty one, if any arrives.
pub async fn read_first_line<R>(reader: &mut R) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    while let Some(line) = read_line(reader).await? {
        if !line.is_empty() {
            return Ok(Some(line));
        }
    }
    Ok(None)
}

/// Reads header lines up to the blank separator line (or end of input).
///
/// Names are trimmed and lower-cased, values trimmed; a repeated name keeps
/// its last value. Lines without a colon are ignored.
pub async fn read_headers<R>(reader: &mut R) -> std::io::Result<HashMap<String, String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut headers = HashMap::new();

    while let Some(line) = read_line(reader).await? {
        if line.is_empty() {
            break;
        }

        if let Some((key, value)) = line.split_once(':') {
            headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    Ok(headers)
}

/// Body length declared by the `content-length` header; 0 when absent.
pub fn content_length(headers: &HashMap<String, String>) -> Result<usize, HttpError> {
    headers
        .get("content-length")
        .map(|v| {
            v.parse::<usize>()
                .map_err(|_| HttpError::InvalidContentLength(v.clone()))
        })
        .transpose()
        .map(|len| len.unwrap_or(0))
}

/// Reads up to `len` body bytes. A peer that closes early yields whatever
/// arrived before the close.
pub async fn read_body<R>(reader: &mut R, len: usize) -> std::io::Result<Bytes>
where
    R: AsyncBufRead + Unpin,
{
    if len == 0 {
        return Ok(Bytes::new());
    }

    let mut body = Vec::with_capacity(len.min(BODY_PREALLOC_LIMIT));
    (&mut *reader).take(len as u64).read_to_end(&mut body).await?;
    Ok(Bytes::from(body))
}

/// Reads the header block and fixed-length body that follow a POST request
/// line and assembles the full request.
pub async fn read_post_request<R>(reader: &mut R, target: &str) -> Result<Request, HttpError>
where
    R: AsyncBufRead + Unpin,
{
    let headers = read_headers(reader).await?;
    let len = content_length(&headers)?;
    let body = read_body(reader, len).await?;

    Ok(RequestBuilder::new(Method::POST, target)
        .headers(headers)
        .body(body)
        .build())
}
