//! Supported service types
//!
//! Platform labels vary between providers (`pg`, `elephantsql`, ...), so each
//! [`ServiceType`] accepts a fixed set of labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Backend kinds backman knows how to back up and restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Elasticsearch,
    Mysql,
    Postgres,
    Mongodb,
    Redis,
}

impl ServiceType {
    /// Every supported type.
    pub const ALL: [ServiceType; 5] = [
        ServiceType::Elasticsearch,
        ServiceType::Mysql,
        ServiceType::Postgres,
        ServiceType::Mongodb,
        ServiceType::Redis,
    ];

    /// Platform labels that identify this type.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            ServiceType::Elasticsearch => &["elasticsearch", "elastic", "es"],
            ServiceType::Mysql => &["mysql", "mariadb", "mariadbent", "pxc", "mysql-database"],
            ServiceType::Postgres => &["postgres", "postgresql", "pg", "elephantsql", "citusdb"],
            ServiceType::Mongodb => &[
                "mongodb",
                "mongo",
                "mongodb-2",
                "mongodbent",
                "mongodb-enterprise",
            ],
            ServiceType::Redis => &["redis", "redis-2", "redisent", "redis-enterprise", "redis-ha"],
        }
    }

    /// Canonical name, e.g. `"postgres"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::Elasticsearch => "elasticsearch",
            ServiceType::Mysql => "mysql",
            ServiceType::Postgres => "postgres",
            ServiceType::Mongodb => "mongodb",
            ServiceType::Redis => "redis",
        }
    }

    /// Classify a platform label, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<ServiceType> {
        let label = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.labels().contains(&label.as_str()))
    }
}

/// Check whether a platform label belongs to a supported service type.
pub fn is_valid_service_type(label: &str) -> bool {
    ServiceType::from_label(label).is_some()
}

impl FromStr for ServiceType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ServiceType::from_label(s).ok_or_else(|| Error::UnknownServiceType {
            label: s.to_string(),
        })
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
