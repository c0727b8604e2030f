//! Platform service catalog
//!
//! The catalog lists the service instances bound to the running application.
//! On Cloud Foundry it comes from `VCAP_SERVICES`, a JSON object mapping each
//! label to the instances carrying it.

use std::collections::BTreeMap;

use backman_config::EnvSource;
use backman_config::env::must_get;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Variable holding the Cloud Foundry service catalog.
pub const VCAP_SERVICES: &str = "VCAP_SERVICES";

/// A bound service instance as reported by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Instance name, unique within the catalog
    pub name: String,
    /// Service-type identifier
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = plan.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Ordered list of bound service instances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse a `VCAP_SERVICES` document.
    ///
    /// Entries are ordered by label, then by their position under that label.
    /// An instance without its own `label` key inherits the label it is
    /// listed under. Credentials and other keys are ignored.
    pub fn from_vcap_services(document: &str) -> Result<Self> {
        let by_label: BTreeMap<String, Vec<CatalogEntry>> = serde_json::from_str(document)
            .map_err(|e| Error::MalformedCatalog {
                message: e.to_string(),
            })?;

        let entries = by_label
            .into_iter()
            .flat_map(|(label, instances)| {
                instances.into_iter().map(move |mut entry| {
                    if entry.label.is_empty() {
                        entry.label = label.clone();
                    }
                    entry
                })
            })
            .collect();

        Ok(Self { entries })
    }

    /// Read the catalog from `VCAP_SERVICES`, which must be set.
    pub fn from_env(env: &impl EnvSource) -> Result<Self> {
        let document = must_get(env, VCAP_SERVICES)?;
        let catalog = Self::from_vcap_services(&document)?;
        tracing::debug!(entries = catalog.len(), "Loaded service catalog from {}", VCAP_SERVICES);
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
