//! Service registry for backman
//!
//! This crate decides which bound service instances backman manages and with
//! which parameters:
//!
//! - **Classification**: only labels in the closed [`ServiceType`] set are kept
//! - **Catalog**: bound instances as reported by the platform (`VCAP_SERVICES`)
//! - **Derivation**: timeout, cron schedule and retention per instance, from
//!   the resolved configuration with built-in defaults as fallback
//! - **Queries**: read-only lookups for schedulers and API handlers
//!
//! # Architecture
//!
//! ```text
//!   Catalog ──┐
//!             ├──> ServiceRegistry ──> scheduler / REST handlers
//!   ResolvedConfig (backman-config)
//! ```

pub mod catalog;
pub mod error;
pub mod registry;
pub mod schedule;
pub mod service_type;

pub use catalog::{Catalog, CatalogEntry, VCAP_SERVICES};
pub use error::{Error, Result};
pub use registry::{
    DEFAULT_RETENTION_DAYS, DEFAULT_RETENTION_FILES, DEFAULT_TIMEOUT, EffectiveService, Retention,
    ServiceRegistry,
};
pub use schedule::ScheduleGenerator;
pub use service_type::{ServiceType, is_valid_service_type};
