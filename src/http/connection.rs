use std::future::poll_fn;
use std::pin::Pin;
use std::sync::Arc;
use std::task::Poll;

use tokio::io::{AsyncBufRead, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::error::HttpError;
use crate::http::parser::{self, RequestLine};
use crate::http::request::{Method, RequestBuilder};
use crate::http::response::Response;
use crate::http::writer::{BAD_REQUEST_FALLBACK, ResponseWriter};
use crate::server::state::ServerState;

/// Most bytes discarded after the request before the reply goes out.
const DRAIN_LIMIT: usize = 1024 * 1024;

/// Serves exactly one request over `stream`, then closes it.
pub struct Connection<S> {
    stream: BufReader<S>,
    server: Arc<ServerState>,
    state: ConnectionState,
}

pub enum ConnectionState {
    AwaitingFirstLine,
    Dispatching(RequestLine),
    Responding(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, server: Arc<ServerState>) -> Self {
        Self {
            stream: BufReader::new(stream),
            server,
            state: ConnectionState::AwaitingFirstLine,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::AwaitingFirstLine => {
                    self.state = self.read_request_line().await;
                }

                ConnectionState::Dispatching(line) => {
                    let response = match line.method {
                        Method::GET => self.handle_get(&line.target).await,
                        Method::POST => self.handle_post(&line.target).await,
                    };

                    info!(
                        method = line.method.as_str(),
                        uri = %line.target,
                        status = response.status.as_u16(),
                        bytes = response.content_length(),
                        "Request served"
                    );
                    self.state = ConnectionState::Responding(ResponseWriter::new(&response));
                }

                ConnectionState::Responding(mut writer) => {
                    self.drain_ready().await;
                    writer.write_to_stream(self.stream.get_mut()).await?;
                    if let Err(e) = self.stream.get_mut().shutdown().await {
                        debug!(error = %e, "Shutdown after response failed");
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request_line(&mut self) -> ConnectionState {
        let line = match parser::read_first_line(&mut self.stream).await {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("Peer sent no request line");
                return ConnectionState::Responding(ResponseWriter::from_bytes(BAD_REQUEST_FALLBACK));
            }
            Err(e) => {
                warn!(error = %e, "Failed to read request line");
                return ConnectionState::Responding(ResponseWriter::from_bytes(BAD_REQUEST_FALLBACK));
            }
        };

        debug!(line = %line, "Request line received");

        match parser::parse_request_line(&line) {
            Ok(request_line) => ConnectionState::Dispatching(request_line),
            Err(e) => {
                warn!(line = %line, error = %e, "Rejected request line");
                ConnectionState::Responding(e.to_writer())
            }
        }
    }

    /// Registered GET route, else static asset, else 404.
    async fn handle_get(&mut self, target: &str) -> Response {
        let request = RequestBuilder::new(Method::GET, target).build();

        if let Some(handler) = self.server.router.resolve(Method::GET, &request.path) {
            debug!(path = %request.path, "Dispatching to GET route");
            return handler(&request, Response::default());
        }

        match self.server.static_files.resolve(&request.path).await {
            Ok(Some(asset)) => {
                debug!(path = %request.path, asset = %asset.key, "Serving static asset");
                Response::builder()
                    .content_type(asset.content_type)
                    .body_bytes(asset.body)
                    .build()
            }
            Ok(None) => HttpError::AssetNotFound.to_response(),
            Err(e) => {
                error!(path = %request.path, error = %e, "Failed to read static asset");
                HttpError::Io(e).to_response()
            }
        }
    }

    /// Reads headers and body, then runs the registered POST route or 404s.
    async fn handle_post(&mut self, target: &str) -> Response {
        let request = match parser::read_post_request(&mut self.stream, target).await {
            Ok(request) => request,
            Err(e) => {
                warn!(uri = %target, error = %e, "Failed to read POST request");
                return e.to_response();
            }
        };

        match self.server.router.resolve(Method::POST, &request.path) {
            Some(handler) => {
                debug!(path = %request.path, body = request.body.len(), "Dispatching to POST route");
                handler(&request, Response::default())
            }
            None => HttpError::RouteNotFound.to_response(),
        }
    }

    /// Discards input that is already available without waiting for more.
    async fn drain_ready(&mut self) {
        let mut drained = 0;

        while drained < DRAIN_LIMIT {
            let available = poll_fn(|cx| match Pin::new(&mut self.stream).poll_fill_buf(cx) {
                Poll::Ready(Ok(buf)) => Poll::Ready(buf.len()),
                Poll::Ready(Err(_)) | Poll::Pending => Poll::Ready(0),
            })
            .await;

            if available == 0 {
                break;
            }
            Pin::new(&mut self.stream).consume(available);
            drained += available;
        }

        if drained > 0 {
            debug!(bytes = drained, "Drained unread request input");
        }
    }
}
