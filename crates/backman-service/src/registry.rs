//! Effective service descriptors
//!
//! The [`ServiceRegistry`] combines the platform catalog with per-service
//! configuration and built-in defaults. It is derived once and then only read.

use std::time::Duration;

use backman_config::duration::human;
use backman_config::{ResolvedConfig, ServiceConfig};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogEntry};
use crate::schedule::ScheduleGenerator;
use crate::service_type::{ServiceType, is_valid_service_type};

/// Backup timeout when none longer than one second is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Days of backups to keep when not configured.
pub const DEFAULT_RETENTION_DAYS: u32 = 31;

/// Backup files to keep when not configured.
pub const DEFAULT_RETENTION_FILES: u32 = 100;

/// Retention policy for a service's backups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retention {
    pub days: u32,
    pub files: u32,
}

/// Ready-to-use operational parameters for one bound service instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveService {
    pub name: String,
    pub label: String,
    pub plan: String,
    pub tags: Vec<String>,
    #[serde(with = "human")]
    pub timeout: Duration,
    /// Six-field cron expression
    pub schedule: String,
    pub retention: Retention,
    pub direct_s3: bool,
    pub disable_column_statistics: bool,
    pub log_stderr: bool,
    pub force_import: bool,
    pub local_backup_path: String,
    pub backup_options: Vec<String>,
    pub restore_options: Vec<String>,
}

impl EffectiveService {
    /// Combine a catalog entry with its configuration override, if any.
    fn derive(
        entry: &CatalogEntry,
        config: Option<&ServiceConfig>,
        schedules: &mut ScheduleGenerator,
    ) -> Self {
        let config = config.cloned().unwrap_or_default();

        let timeout = if config.timeout.is_present() {
            config.timeout.as_duration()
        } else {
            DEFAULT_TIMEOUT
        };
        let schedule = if config.schedule.is_empty() {
            schedules.daily()
        } else {
            config.schedule
        };
        let retention = Retention {
            days: positive_or(config.retention.days, DEFAULT_RETENTION_DAYS),
            files: positive_or(config.retention.files, DEFAULT_RETENTION_FILES),
        };

        Self {
            name: entry.name.clone(),
            label: entry.label.clone(),
            plan: entry.plan.clone(),
            tags: entry.tags.clone(),
            timeout,
            schedule,
            retention,
            direct_s3: config.direct_s3,
            disable_column_statistics: config.disable_column_statistics,
            log_stderr: config.log_stderr,
            force_import: config.force_import,
            local_backup_path: config.local_backup_path,
            backup_options: config.backup_options,
            restore_options: config.restore_options,
        }
    }

    /// The classified service type.
    ///
    /// Always `Some` for descriptors produced by a [`ServiceRegistry`].
    pub fn service_type(&self) -> Option<ServiceType> {
        ServiceType::from_label(&self.label)
    }
}

fn positive_or(value: u32, fallback: u32) -> u32 {
    if value > 0 { value } else { fallback }
}

/// Effective descriptors for every supported bound service.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use backman_config::ConfigResolver;
/// use backman_service::{Catalog, CatalogEntry, ServiceRegistry};
///
/// let env: HashMap<String, String> = HashMap::new();
/// let config = ConfigResolver::with_env(".", env).resolve().unwrap();
/// let catalog = Catalog::new(vec![
///     CatalogEntry::new("db", "postgres"),
///     CatalogEntry::new("blob", "dynstrg"),
/// ]);
///
/// let registry = ServiceRegistry::derive(&catalog, &config);
/// assert_eq!(registry.len(), 1);
/// assert!(registry.service("postgres", "db").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRegistry {
    services: Vec<EffectiveService>,
}

impl ServiceRegistry {
    /// Derive descriptors with a time-seeded schedule generator.
    pub fn derive(catalog: &Catalog, config: &ResolvedConfig) -> Self {
        Self::derive_with(catalog, config, &mut ScheduleGenerator::from_time())
    }

    /// Derive descriptors, drawing fallback schedules from `schedules`.
    ///
    /// Entries whose label is not a supported service type are dropped.
    /// Catalog order is preserved.
    pub fn derive_with(
        catalog: &Catalog,
        config: &ResolvedConfig,
        schedules: &mut ScheduleGenerator,
    ) -> Self {
        let mut services = Vec::with_capacity(catalog.len());
        for entry in catalog.entries() {
            if !is_valid_service_type(&entry.label) {
                tracing::debug!(name = %entry.name, label = %entry.label, "Skipping unsupported service");
                continue;
            }
            services.push(EffectiveService::derive(
                entry,
                config.service(&entry.name),
                schedules,
            ));
        }

        tracing::info!(count = services.len(), "Services loaded");
        tracing::debug!(?services, "Effective services");
        Self { services }
    }

    /// All services, in catalog order.
    pub fn all(&self) -> &[EffectiveService] {
        &self.services
    }

    /// Services carrying exactly `label`, in catalog order.
    pub fn by_type(&self, label: &str) -> Vec<&EffectiveService> {
        self.services.iter().filter(|s| s.label == label).collect()
    }

    /// The service named `name`, as a list of at most one entry.
    pub fn by_name(&self, name: &str) -> Vec<&EffectiveService> {
        self.services.iter().filter(|s| s.name == name).take(1).collect()
    }

    /// The service matching both `label` and `name`.
    pub fn service(&self, label: &str, name: &str) -> Option<&EffectiveService> {
        self.services
            .iter()
            .find(|s| s.label == label && s.name == name)
    }

    /// Listing filter used by the API: a non-empty name wins, then a
    /// non-empty type, otherwise everything.
    pub fn services(&self, service_type: &str, service_name: &str) -> Vec<&EffectiveService> {
        if !service_name.is_empty() {
            self.by_name(service_name)
        } else if !service_type.is_empty() {
            self.by_type(service_type)
        } else {
            self.services.iter().collect()
        }
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
