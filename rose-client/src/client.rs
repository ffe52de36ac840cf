//! REST protocol client for the entity server.
//!
//! Paths are fixed:
//!
//! | operation | request |
//! |---|---|
//! | one record | `GET /entity/{type}/{id}` |
//! | several records | `GET /entity/{type}/{id1,id2,...}` |
//! | all ids | `GET /entity/{type}/id` |
//! | count | `GET /entity/{type}/count` |
//! | create | `POST /entity/{type}` |
//! | update | `PUT /entity/{type}/{id}` |
//! | delete | `DELETE /entity/{type}/{id}` |
//! | server status | `GET /server/status` |
//!
//! Bodies in both directions are percent-encoded JSON.

use std::collections::BTreeMap;
use std::sync::Arc;

use rose_dto::{DtoError, FlatRecord};
use rose_model::EntityDirectory;
use rose_types::EntityId;
use tracing::{debug, warn};

use crate::codec::JsonCodec;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::transport::{HttpTransport, Method, Transport};

const ENTITY_ROOT: &str = "/entity";
const STATUS_PATH: &str = "/server/status";

/// Stateless request/response client for the entity protocol.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct RoseClient {
    transport: Arc<dyn Transport>,
    codec: JsonCodec,
    directory: Arc<dyn EntityDirectory>,
}

impl RoseClient {
    /// Creates a client over an existing transport with a default codec.
    pub fn new(transport: Arc<dyn Transport>, directory: Arc<dyn EntityDirectory>) -> Self {
        Self {
            transport,
            codec: JsonCodec::new(),
            directory,
        }
    }

    /// Creates a client over HTTP.
    pub fn connect(config: ClientConfig, directory: Arc<dyn EntityDirectory>) -> ClientResult<Self> {
        let transport = HttpTransport::new(config).map_err(ClientError::Config)?;
        Ok(Self::new(Arc::new(transport), directory))
    }

    /// Replaces the codec.
    pub fn with_codec(mut self, codec: JsonCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn directory(&self) -> &Arc<dyn EntityDirectory> {
        &self.directory
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Fetches exactly one record.
    pub async fn get_record(&self, type_name: &str, id: EntityId) -> ClientResult<FlatRecord> {
        let path = format!("{ENTITY_ROOT}/{type_name}/{id}");
        let mut records = self.fetch_records(&path).await?;
        if records.len() != 1 {
            return Err(ClientError::Shape {
                method: Method::Get,
                path,
                expected: 1,
                found: records.len(),
            });
        }
        Ok(records.remove(0))
    }

    /// Fetches several records in one request. No ids, no request.
    pub async fn get_records(
        &self,
        type_name: &str,
        ids: &[EntityId],
    ) -> ClientResult<Vec<FlatRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let joined = self.codec.encode_ids(ids);
        self.fetch_records(&format!("{ENTITY_ROOT}/{type_name}/{joined}"))
            .await
    }

    /// Fetches the ids of every stored entity of a type.
    pub async fn get_ids(&self, type_name: &str) -> ClientResult<Vec<EntityId>> {
        let path = format!("{ENTITY_ROOT}/{type_name}/id");
        let body = self.request(Method::Get, &path, None).await?;
        self.codec
            .decode_ids(&body)
            .map_err(|source| record_error(Method::Get, &path, source))
    }

    pub async fn get_count(&self, type_name: &str) -> ClientResult<u64> {
        let path = format!("{ENTITY_ROOT}/{type_name}/count");
        let body = self.request(Method::Get, &path, None).await?;
        self.codec
            .decode_count(&body)
            .map_err(|source| record_error(Method::Get, &path, source))
    }

    pub async fn server_status(&self) -> ClientResult<BTreeMap<String, String>> {
        let body = self.request(Method::Get, STATUS_PATH, None).await?;
        self.codec
            .decode_status(&body)
            .map_err(|source| record_error(Method::Get, STATUS_PATH, source))
    }

    // ── Writes ───────────────────────────────────────────────────

    /// Creates a record and returns the server's copy, which carries the new id.
    pub async fn post_record(&self, record: &FlatRecord) -> ClientResult<FlatRecord> {
        let path = self.path_for_type(Method::Post, record)?;
        let body = self.encode_request(Method::Post, &path, record)?;
        let response = self.request(Method::Post, &path, Some(body)).await?;
        self.codec
            .decode_record(&response, self.directory.as_ref())
            .map_err(|source| record_error(Method::Post, &path, source))
    }

    /// Replaces a stored record. The record must carry a non-negative id.
    pub async fn put_record(&self, record: &FlatRecord) -> ClientResult<()> {
        let path = self.path_for(Method::Put, record)?;
        let body = self.encode_request(Method::Put, &path, record)?;
        self.request(Method::Put, &path, Some(body)).await?;
        Ok(())
    }

    pub async fn delete_by_id(&self, type_name: &str, id: EntityId) -> ClientResult<()> {
        let path = format!("{ENTITY_ROOT}/{type_name}/{id}");
        self.request(Method::Delete, &path, None).await?;
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────

    async fn fetch_records(&self, path: &str) -> ClientResult<Vec<FlatRecord>> {
        let body = self.request(Method::Get, path, None).await?;
        self.codec
            .decode_records(&body, self.directory.as_ref())
            .map_err(|source| {
                warn!("rejected response from GET {}: {}", path, source);
                record_error(Method::Get, path, source)
            })
    }

    /// Sends one request and returns the percent-decoded body.
    async fn request(&self, method: Method, path: &str, body: Option<String>) -> ClientResult<String> {
        debug!("{} {}", method, path);
        let encoded = self
            .transport
            .send(method, path, body)
            .await
            .map_err(|source| ClientError::Transport {
                method,
                path: path.to_string(),
                source,
            })?;
        self.codec
            .decode_body(&encoded)
            .map_err(|source| ClientError::Body {
                method,
                path: path.to_string(),
                source,
            })
    }

    fn encode_request(&self, method: Method, path: &str, record: &FlatRecord) -> ClientResult<String> {
        let json = self
            .codec
            .encode_record(record)
            .map_err(|source| record_error(method, path, source))?;
        Ok(self.codec.encode_body(&json))
    }

    fn path_for_type(&self, method: Method, record: &FlatRecord) -> ClientResult<String> {
        let entity_type = record
            .resolve_type(self.directory.as_ref())
            .ok_or_else(|| ClientError::InvalidRequest {
                method,
                path: ENTITY_ROOT.to_string(),
                reason: format!("missing or unknown type in {record}"),
            })?;
        Ok(format!("{ENTITY_ROOT}/{}", entity_type.path_segment()))
    }

    fn path_for(&self, method: Method, record: &FlatRecord) -> ClientResult<String> {
        let type_path = self.path_for_type(method, record)?;
        let invalid = |reason: String| ClientError::InvalidRequest {
            method,
            path: type_path.clone(),
            reason,
        };
        let id = record.id().map_err(|e| invalid(format!("{e} in {record}")))?;
        if id < 0 {
            return Err(invalid(format!("invalid id {id}")));
        }
        Ok(format!("{type_path}/{id}"))
    }
}

fn record_error(method: Method, path: &str, source: DtoError) -> ClientError {
    ClientError::Record {
        method,
        path: path.to_string(),
        source,
    }
}
