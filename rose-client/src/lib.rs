//! REST client for the Rose entity server.
//!
//! Entities travel as [`FlatRecord`](rose_dto::FlatRecord)s, serialized to
//! JSON and percent-encoded. [`RoseClient`] builds the request paths, sends
//! them through a [`Transport`] and validates every record it gets back, so a
//! malformed response fails exactly like a malformed form submission would.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use rose_client::{ClientConfig, RoseClient};
//! use rose_model::{EntityDescriptor, TypeRegistry};
//! use rose_types::EntityId;
//!
//! # async fn run() -> Result<(), rose_client::ClientError> {
//! let registry = TypeRegistry::new().with(EntityDescriptor::new("Book").text("title").build());
//! let client = RoseClient::connect(ClientConfig::default(), Arc::new(registry))?;
//!
//! let record = client.get_record("book", EntityId::new(7)).await?;
//! println!("{}", record.field(0).unwrap_or_default());
//! # Ok(())
//! # }
//! ```

mod client;
mod codec;
mod config;
mod error;
mod transport;

pub use client::RoseClient;
pub use codec::JsonCodec;
pub use config::{BASE_URL_VAR, ClientConfig, TIMEOUT_VAR};
pub use error::{ClientError, ClientResult, TransportError, TransportResult};
pub use transport::{HttpTransport, Method, Transport};
