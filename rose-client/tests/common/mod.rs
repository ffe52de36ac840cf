#![allow(dead_code)]

use std::sync::Arc;

use rose_client::{ClientConfig, HttpTransport, JsonCodec, RoseClient};
use rose_model::{EntityDescriptor, EntityType, TypeRegistry};
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn book_type() -> EntityType {
    EntityDescriptor::new("Book")
        .text("title")
        .integer("pages")
        .to_one("author", "Author")
        .to_many("tags", "Tag")
        .build()
}

pub fn author_type() -> EntityType {
    EntityDescriptor::new("Author").text("name").build()
}

pub fn registry() -> Arc<TypeRegistry> {
    Arc::new(TypeRegistry::new().with(book_type()).with(author_type()))
}

/// A client talking HTTP to the mock server.
pub fn client_for(server: &MockServer) -> RoseClient {
    init_tracing();
    let config = ClientConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..Default::default()
    };
    let transport = HttpTransport::new(config).unwrap();
    RoseClient::new(Arc::new(transport), registry())
}

/// Percent-encodes a JSON body the way the server sends it.
pub fn wire(json: &str) -> String {
    JsonCodec::new().encode_body(json)
}
