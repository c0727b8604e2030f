//! End-to-end scenarios: configuration sources -> resolved config -> registry
//!
//! Each test builds its own environment map and temporary working directory,
//! so scenarios never share state.

use backman_config::env::{BACKMAN_CONFIG, BACKMAN_TEAMS_EVENTS};
use backman_config::{CONFIG_FILE, ConfigResolver, ResolvedConfig};
use backman_service::{Catalog, CatalogEntry, ScheduleGenerator, ServiceRegistry};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

struct Scenario {
    dir: TempDir,
    env: HashMap<String, String>,
}

impl Scenario {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            env: HashMap::new(),
        }
    }

    fn file(self, content: &str) -> Self {
        fs::write(self.dir.path().join(CONFIG_FILE), content).unwrap();
        self
    }

    fn var(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    fn resolve(&self) -> ResolvedConfig {
        ConfigResolver::with_env(self.dir.path(), &self.env)
            .resolve()
            .unwrap()
    }
}

#[test]
fn scenario_a_env_document_only() {
    let config = Scenario::new()
        .var(BACKMAN_CONFIG, r#"{"username":"admin"}"#)
        .resolve();

    assert_eq!(config.username, "admin");
    assert_eq!(config.log_level, "info");
}

#[test]
fn scenario_b_file_env_and_defaults_combine() {
    let config = Scenario::new()
        .file(r#"{"services": {"db1": {"retention": {"days": 10}}}}"#)
        .var(
            BACKMAN_CONFIG,
            r#"{"services": {"db1": {"schedule": "0 0 3 * * *"}}}"#,
        )
        .resolve();
    let catalog = Catalog::new(vec![
        CatalogEntry::new("db1", "postgres")
            .with_plan("small")
            .with_tags(["sql"]),
    ]);

    let registry = ServiceRegistry::derive(&catalog, &config);
    let db1 = registry.service("postgres", "db1").unwrap();

    assert_eq!(db1.retention.days, 10);
    assert_eq!(db1.retention.files, 100);
    assert_eq!(db1.schedule, "0 0 3 * * *");
    assert_eq!(db1.timeout, Duration::from_secs(3600));
    assert_eq!(db1.plan, "small");
    assert_eq!(db1.tags, vec!["sql"]);
}

#[test]
fn scenario_c_unsupported_label_is_invisible() {
    let config = Scenario::new().resolve();
    let catalog = Catalog::new(vec![
        CatalogEntry::new("x", "unsupported-type"),
        CatalogEntry::new("cache", "redis"),
    ]);

    let registry =
        ServiceRegistry::derive_with(&catalog, &config, &mut ScheduleGenerator::seeded(3));

    assert_eq!(registry.all().len(), 1);
    assert!(registry.all().iter().all(|s| s.label != "unsupported-type"));
    assert!(registry.by_type("unsupported-type").is_empty());
    assert!(registry.by_name("x").is_empty());
    assert!(registry.service("unsupported-type", "x").is_none());
}

#[test]
fn scenario_d_empty_events_variable_clears_events() {
    let config = Scenario::new()
        .file(r#"{"notifications": {"teams": {"webhook": "https://hook", "events": ["backup-started"]}}}"#)
        .var(
            BACKMAN_CONFIG,
            r#"{"notifications": {"teams": {"events": ["backup-failed"]}}}"#,
        )
        .var(BACKMAN_TEAMS_EVENTS, "")
        .resolve();

    assert!(config.notifications.teams.events.is_empty());
    assert_eq!(config.notifications.teams.webhook, "https://hook");
}

#[test]
fn catalog_from_vcap_feeds_the_registry() {
    let config = Scenario::new()
        .var(
            BACKMAN_CONFIG,
            r#"{"services": {"orders": {"timeout": "45m", "direct_s3": true}}}"#,
        )
        .resolve();
    let catalog = Catalog::from_vcap_services(
        r#"{
            "mariadb": [{"name": "orders", "plan": "m1", "tags": ["mysql"]}],
            "dynstrg": [{"name": "backups", "plan": "usage"}]
        }"#,
    )
    .unwrap();

    let registry = ServiceRegistry::derive(&catalog, &config);

    assert_eq!(registry.len(), 1);
    let orders = registry.by_type("mariadb")[0];
    assert_eq!(orders.timeout, Duration::from_secs(45 * 60));
    assert!(orders.direct_s3);
    assert_eq!(
        serde_json::to_value(orders).unwrap()["timeout"],
        serde_json::json!("45m")
    );
}

#[test]
fn independent_resolvers_do_not_interfere() {
    let first = Scenario::new().var(BACKMAN_CONFIG, r#"{"log_level": "debug"}"#);
    let second = Scenario::new();

    assert_eq!(first.resolve().log_level, "debug");
    assert_eq!(second.resolve().log_level, "info");
    assert_eq!(first.resolve(), first.resolve());
}

#[test]
fn negative_overrides_fall_back_to_defaults() {
    let config = Scenario::new()
        .file(r#"{"services": {"db1": {"timeout": -5, "retention": {"days": -1}}}}"#)
        .var(
            BACKMAN_CONFIG,
            r#"{"services": {"db2": {"timeout": "-1h", "retention": {"files": -3}}}}"#,
        )
        .resolve();
    let catalog = Catalog::new(vec![
        CatalogEntry::new("db1", "postgres"),
        CatalogEntry::new("db2", "mysql"),
    ]);

    let registry =
        ServiceRegistry::derive_with(&catalog, &config, &mut ScheduleGenerator::seeded(11));

    assert_eq!(registry.len(), 2);
    for service in registry.all() {
        assert_eq!(service.timeout, Duration::from_secs(3600), "{}", service.name);
        assert_eq!(service.retention.days, 31, "{}", service.name);
        assert_eq!(service.retention.files, 100, "{}", service.name);
    }
}
