//! Configuration document parsing and merging
//!
//! A [`ConfigDocument`] is the parsed form of one configuration source: the
//! `config.json` file or the `BACKMAN_CONFIG` environment document. Both use
//! the same schema. Documents are combined with [`ConfigDocument::merged`],
//! which builds a fresh document instead of mutating either input.
//!
//! # Merge rule
//!
//! A field from the overlay wins only when it is *present*:
//!
//! - strings: non-empty
//! - booleans: `true` (a `false` overlay never clears a `true` base)
//! - counts: greater than zero
//! - timeouts: longer than one second
//! - lists: non-empty, and then the overlay list replaces the base list whole
//!
//! The `services` map merges key by key with the same rule applied to every
//! field of each entry. Keys present in only one side are kept.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::duration::TimeoutDuration;
use crate::{Error, Result};

/// Object-store service label used when none is configured.
pub const DEFAULT_S3_SERVICE_LABEL: &str = "dynstrg";

/// Log level used when none is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// One configuration source, or the merge of several.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDocument {
    pub log_level: String,
    pub logging_timestamp: bool,
    pub username: String,
    pub password: String,
    pub disable_web: bool,
    pub disable_metrics: bool,
    pub unprotected_metrics: bool,
    pub notifications: NotificationConfig,
    pub s3: S3Config,
    /// Per-instance overrides keyed by service instance name
    pub services: BTreeMap<String, ServiceConfig>,
}

/// Object-store settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct S3Config {
    pub disable_ssl: bool,
    pub skip_ssl_verification: bool,
    pub service_label: String,
    pub service_name: String,
    pub bucket_name: String,
    pub encryption_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub teams: TeamsNotificationConfig,
}

/// Teams webhook delivery settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamsNotificationConfig {
    pub webhook: String,
    /// Event names that trigger a notification
    pub events: Vec<String>,
}

/// Configuration fragment for a single bound service instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Six-field cron expression
    pub schedule: String,
    pub timeout: TimeoutDuration,
    pub retention: RetentionConfig,
    pub direct_s3: bool,
    pub disable_column_statistics: bool,
    pub log_stderr: bool,
    pub force_import: bool,
    pub local_backup_path: String,
    pub backup_options: Vec<String>,
    pub restore_options: Vec<String>,
}

/// Retention limits; zero means "not configured".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    #[serde(deserialize_with = "clamped_count")]
    pub days: u32,
    #[serde(deserialize_with = "clamped_count")]
    pub files: u32,
}

/// Read a count, clamping negatives to zero ("not configured").
fn clamped_count<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    let count = i64::deserialize(deserializer)?;
    Ok(u32::try_from(count.max(0)).unwrap_or(u32::MAX))
}

impl ConfigDocument {
    /// Parse a document from JSON.
    ///
    /// `origin` names the source in error messages, e.g. the file path.
    ///
    /// # Example
    ///
    /// ```
    /// use backman_config::ConfigDocument;
    ///
    /// let doc = ConfigDocument::parse(r#"{"username": "admin"}"#, "inline").unwrap();
    /// assert_eq!(doc.username, "admin");
    /// ```
    pub fn parse(content: &str, origin: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::malformed(origin, e))
    }

    /// Merge `overlay` over this document, returning a new document.
    pub fn merged(&self, overlay: &ConfigDocument) -> ConfigDocument {
        let mut services = self.services.clone();
        for (name, overlay_service) in &overlay.services {
            let merged = match services.get(name) {
                Some(base) => base.merged(overlay_service),
                None => ServiceConfig::default().merged(overlay_service),
            };
            services.insert(name.clone(), merged);
        }

        ConfigDocument {
            log_level: pick_str(&self.log_level, &overlay.log_level),
            logging_timestamp: self.logging_timestamp || overlay.logging_timestamp,
            username: pick_str(&self.username, &overlay.username),
            password: pick_str(&self.password, &overlay.password),
            disable_web: self.disable_web || overlay.disable_web,
            disable_metrics: self.disable_metrics || overlay.disable_metrics,
            unprotected_metrics: self.unprotected_metrics || overlay.unprotected_metrics,
            notifications: NotificationConfig {
                teams: TeamsNotificationConfig {
                    webhook: pick_str(
                        &self.notifications.teams.webhook,
                        &overlay.notifications.teams.webhook,
                    ),
                    events: pick_list(
                        &self.notifications.teams.events,
                        &overlay.notifications.teams.events,
                    ),
                },
            },
            s3: self.s3.merged(&overlay.s3),
            services,
        }
    }

    /// Fill fields that are still unset with built-in defaults.
    pub fn with_defaults(mut self) -> Self {
        if self.log_level.is_empty() {
            self.log_level = DEFAULT_LOG_LEVEL.to_string();
        }
        if self.s3.service_label.is_empty() {
            self.s3.service_label = DEFAULT_S3_SERVICE_LABEL.to_string();
        }
        self
    }
}

impl S3Config {
    fn merged(&self, overlay: &S3Config) -> S3Config {
        S3Config {
            disable_ssl: self.disable_ssl || overlay.disable_ssl,
            skip_ssl_verification: self.skip_ssl_verification || overlay.skip_ssl_verification,
            service_label: pick_str(&self.service_label, &overlay.service_label),
            service_name: pick_str(&self.service_name, &overlay.service_name),
            bucket_name: pick_str(&self.bucket_name, &overlay.bucket_name),
            encryption_key: pick_str(&self.encryption_key, &overlay.encryption_key),
        }
    }
}

impl ServiceConfig {
    /// Merge `overlay` over this entry field by field.
    pub fn merged(&self, overlay: &ServiceConfig) -> ServiceConfig {
        ServiceConfig {
            schedule: pick_str(&self.schedule, &overlay.schedule),
            timeout: if overlay.timeout.is_present() {
                overlay.timeout
            } else {
                self.timeout
            },
            retention: RetentionConfig {
                days: pick_count(self.retention.days, overlay.retention.days),
                files: pick_count(self.retention.files, overlay.retention.files),
            },
            direct_s3: self.direct_s3 || overlay.direct_s3,
            disable_column_statistics: self.disable_column_statistics
                || overlay.disable_column_statistics,
            log_stderr: self.log_stderr || overlay.log_stderr,
            force_import: self.force_import || overlay.force_import,
            local_backup_path: pick_str(&self.local_backup_path, &overlay.local_backup_path),
            backup_options: pick_list(&self.backup_options, &overlay.backup_options),
            restore_options: pick_list(&self.restore_options, &overlay.restore_options),
        }
    }
}

fn pick_str(base: &str, overlay: &str) -> String {
    let picked = if overlay.is_empty() { base } else { overlay };
    picked.to_string()
}

fn pick_count(base: u32, overlay: u32) -> u32 {
    if overlay > 0 { overlay } else { base }
}

fn pick_list(base: &[String], overlay: &[String]) -> Vec<String> {
    let picked = if overlay.is_empty() { base } else { overlay };
    picked.to_vec()
}
