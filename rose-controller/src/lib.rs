//! Typed entity access over the Rose REST client.
//!
//! Applications talk to a [`ModelController`]. The base implementation,
//! [`RemoteController`], turns each call into protocol requests; layers
//! implementing [`ControllerLayer`] add behavior around it and are stacked
//! once at startup:
//!
//! ```no_run
//! use std::sync::Arc;
//! use rose_client::{ClientConfig, RoseClient};
//! use rose_controller::{
//!     AuditLayer, CachingLayer, ControllerPipeline, RemoteController, ValidatingLayer,
//! };
//! use rose_model::{EntityDescriptor, RequiredFields, TypeRegistry};
//!
//! # fn build() -> Result<(), rose_client::ClientError> {
//! let registry = TypeRegistry::new()
//!     .with(EntityDescriptor::new("Note").text("title").text("body").build());
//! let client = RoseClient::connect(ClientConfig::from_env().unwrap_or_default(), Arc::new(registry))?;
//!
//! let controller = ControllerPipeline::new(RemoteController::new(client))
//!     .layer(CachingLayer::new())
//!     .layer(ValidatingLayer::new(RequiredFields::new("Note", [1])))
//!     .layer(AuditLayer::new())
//!     .build();
//! # let _ = controller;
//! # Ok(())
//! # }
//! ```

mod audit;
mod caching;
mod controller;
mod error;
mod layer;
mod validating;

pub use audit::{AuditAction, AuditEntry, AuditLayer};
pub use caching::CachingLayer;
pub use controller::{ModelController, RemoteController};
pub use error::{ControllerError, ControllerResult};
pub use layer::{ControllerLayer, ControllerPipeline, Layered};
pub use validating::ValidatingLayer;
