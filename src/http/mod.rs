//! HTTP protocol implementation.
//!
//! One request per connection: no keep-alive, pipelining or chunked bodies.
//!
//! # Architecture
//!
//! - **`connection`**: per-connection state machine
//! - **`parser`**: request line, header block and fixed-length body
//! - **`request`**: parsed request with query and header accessors
//! - **`response`**: response value and builder
//! - **`writer`**: wire serialization and writing
//! - **`mime`**: Content-Type from file extension
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────────────┐
//!        │  AwaitingFirstLine  │ ← Skip blank lines, read request line
//!        └──────────┬──────────┘
//!                   │ GET / POST          other method → 405
//!                   ▼                     bad line / EOF → 400
//!        ┌─────────────────────┐                │
//!        │     Dispatching     │ ← Route, static│asset or 404
//!        └──────────┬──────────┘                │
//!                   ▼                           │
//!        ┌─────────────────────┐                │
//!        │     Responding      │ ◄──────────────┘
//!        └──────────┬──────────┘   drain ready input, write once
//!                   ▼
//!        ┌─────────────────────┐
//!        │       Closed        │
//!        └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use microserve::http::connection::Connection;
//! use microserve::server::ServerState;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let state = Arc::new(ServerState::default());
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let mut conn = Connection::new(socket, Arc::clone(&state));
//!         if let Err(e) = conn.run().await {
//!             eprintln!("Connection error: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
