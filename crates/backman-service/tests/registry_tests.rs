//! Tests for service derivation against generated catalogs

use backman_config::{ConfigResolver, ResolvedConfig};
use backman_service::{
    Catalog, CatalogEntry, ScheduleGenerator, ServiceRegistry, is_valid_service_type,
};
use proptest::prelude::*;
use std::collections::HashMap;
use tempfile::TempDir;

fn default_config() -> ResolvedConfig {
    let temp = TempDir::new().unwrap();
    let env: HashMap<String, String> = HashMap::new();
    ConfigResolver::with_env(temp.path(), env).resolve().unwrap()
}

fn arb_label() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("postgres".to_string()),
        Just("mariadb".to_string()),
        Just("redis".to_string()),
        Just("unsupported-type".to_string()),
        Just("dynstrg".to_string()),
        "[a-z]{1,10}",
    ]
}

fn arb_catalog() -> impl Strategy<Value = Catalog> {
    proptest::collection::vec(arb_label(), 0..12).prop_map(|labels| {
        labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| CatalogEntry::new(format!("svc-{i}"), label))
            .collect()
    })
}

proptest! {
    #[test]
    fn registry_only_holds_supported_labels(catalog in arb_catalog(), seed in any::<u64>()) {
        let config = default_config();
        let registry = ServiceRegistry::derive_with(&catalog, &config, &mut ScheduleGenerator::seeded(seed));

        for service in registry.all() {
            prop_assert!(is_valid_service_type(&service.label));
            prop_assert!(service.timeout.as_secs() > 1);
            prop_assert!(service.retention.days > 0);
            prop_assert!(service.retention.files > 0);
            prop_assert_eq!(service.schedule.split(' ').count(), 6);
        }
        for entry in catalog.entries() {
            let listed = !registry.by_name(&entry.name).is_empty();
            prop_assert_eq!(listed, is_valid_service_type(&entry.label));
        }
        let expected = catalog
            .entries()
            .iter()
            .filter(|e| is_valid_service_type(&e.label))
            .count();
        prop_assert_eq!(registry.len(), expected);
    }
}

#[test]
fn unsupported_instance_is_absent_from_every_query() {
    let catalog = Catalog::new(vec![
        CatalogEntry::new("odd", "unsupported-type"),
        CatalogEntry::new("db", "postgres"),
    ]);
    let registry = ServiceRegistry::derive(&catalog, &default_config());

    assert!(registry.all().iter().all(|s| s.name != "odd"));
    assert!(registry.by_type("unsupported-type").is_empty());
    assert!(registry.by_name("odd").is_empty());
    assert!(registry.service("unsupported-type", "odd").is_none());
    assert!(registry.services("", "odd").is_empty());
    assert_eq!(registry.services("", "").len(), 1);
}

#[test]
fn fallback_schedules_differ_per_instance() {
    let catalog: Catalog = (0..20)
        .map(|i| CatalogEntry::new(format!("db{i}"), "postgres"))
        .collect();
    let registry =
        ServiceRegistry::derive_with(&catalog, &default_config(), &mut ScheduleGenerator::seeded(7));

    let first = &registry.all()[0].schedule;
    assert!(
        registry.all().iter().any(|s| &s.schedule != first),
        "20 random daily schedules should not all coincide"
    );
}
