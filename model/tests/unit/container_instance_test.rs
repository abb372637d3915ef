//! ContainerInstanceのUnit Test
//!
//! - コンテナIDと正規名の導出
//! - 名前・親・タグの変更拒否
//! - ヘルスチェックの検証と重複排除

use std::sync::Arc;

use archmodel::element::CONTAINER_INSTANCE_TAG;
use archmodel::{Container, ContainerInstance, Element, SoftwareSystem};

fn container(name: &str) -> Arc<Container> {
    let system = SoftwareSystem::new("Internet Banking System", "");
    Arc::new(Container::new(&system, name, "", "Rust"))
}

#[test]
fn test_container_id_follows_container() {
    let api = container("API Application");
    let mut instance = ContainerInstance::new(api.clone(), 1);

    assert_eq!(instance.container_id(), Some(api.id()));
    instance.set_container_id("stale-id");
    assert_eq!(instance.container_id(), Some(api.id()));
}

#[test]
fn test_canonical_name_appends_instance_id() {
    let api = container("API Application");
    let instance = ContainerInstance::new(api, 7);

    assert_eq!(
        instance.canonical_name().as_deref(),
        Some("Container://Internet Banking System.API Application[7]")
    );
}

#[test]
fn test_parent_is_containers_parent() {
    let api = container("API Application");
    let instance = ContainerInstance::new(api.clone(), 1);

    assert_eq!(instance.parent_id(), api.parent_id());
    assert_ne!(instance.parent_id(), Some(api.id()));
}

#[test]
fn test_instance_tags_are_snapshot_of_container() {
    let system = SoftwareSystem::new("System", "");
    let mut db = Container::new(&system, "Database", "", "PostgreSQL");
    db.add_tags(&["Database"]);
    let db = Arc::new(db);

    let mut instance = ContainerInstance::new(db.clone(), 1);
    instance.add_tags(&["Primary"]);

    for tag in ["Element", "Container", "Database", CONTAINER_INSTANCE_TAG, "Primary"] {
        assert!(!instance.remove_tag(tag));
        assert!(instance.has_tag(tag), "tag {tag} should remain");
    }
    // コンテナ側のタグは変化しない
    assert!(!db.has_tag("Primary"));
    assert!(!db.has_tag(CONTAINER_INSTANCE_TAG));
}

#[test]
fn test_health_check_with_defaults() {
    let mut instance = ContainerInstance::new(container("Web"), 1);
    instance.add_health_check("h", "http://x.com").unwrap();

    let checks = instance.health_checks();
    assert_eq!(checks.len(), 1);
    let check = checks.iter().next().unwrap();
    assert_eq!(check.name(), "h");
    assert_eq!(check.url(), "http://x.com");
    assert_eq!(check.interval_seconds(), 60);
    assert_eq!(check.timeout_milliseconds(), 0);
}

#[test]
fn test_health_check_invalid_inputs() {
    let mut instance = ContainerInstance::new(container("Web"), 1);

    let test_cases = [
        ("", "http://x.com", 10, 10, "The name must not be null or empty."),
        ("h", "  ", 10, 10, "The URL must not be null or empty."),
        ("h", "not a url", 10, 10, "not a url is not a valid URL."),
        (
            "h",
            "http://x.com",
            -1,
            10,
            "The polling interval must be zero or a positive integer.",
        ),
        (
            "h",
            "http://x.com",
            10,
            -1,
            "The timeout must be zero or a positive integer.",
        ),
    ];

    for (name, url, interval, timeout, message) in test_cases {
        let err = instance
            .add_health_check_with(name, url, interval, timeout)
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().ends_with(message), "unexpected: {err}");
    }
    assert!(instance.health_checks().is_empty());
}

#[test]
fn test_distinct_health_checks_are_kept() {
    let mut instance = ContainerInstance::new(container("Web"), 1);

    instance.add_health_check_with("h", "http://x.com", 10, 100).unwrap();
    instance.add_health_check_with("h", "http://x.com", 10, 100).unwrap();
    instance.add_health_check_with("h", "http://x.com", 20, 100).unwrap();
    instance.add_health_check_with("h", "http://y.com", 10, 100).unwrap();

    assert_eq!(instance.health_checks().len(), 3);
}

#[test]
fn test_serialized_shape() {
    let api = container("API Application");
    let mut instance = ContainerInstance::new(api.clone(), 2).with_environment("Live");
    instance
        .add_health_check_with("API", "https://api.example.com/health", 30, 500)
        .unwrap();

    let json = serde_json::to_value(&instance).unwrap();

    assert_eq!(json["containerId"], api.id());
    assert_eq!(json["instanceId"], 2);
    assert_eq!(json["environment"], "Live");
    assert_eq!(
        json["tags"],
        "Element,Container,Container Instance"
    );
    assert_eq!(
        json["healthChecks"],
        serde_json::json!([{
            "name": "API",
            "url": "https://api.example.com/health",
            "interval": 30,
            "timeout": 500
        }])
    );
}

#[test]
fn test_deserialize_minimal_document() {
    let json = r#"{"id":"42"}"#;
    let instance: ContainerInstance = serde_json::from_str(json).unwrap();

    assert_eq!(instance.id(), "42");
    assert_eq!(instance.container_id(), None);
    assert_eq!(instance.instance_id(), 0);
    assert_eq!(instance.environment(), "Default");
    assert!(instance.health_checks().is_empty());
    assert_eq!(instance.canonical_name(), None);
    assert_eq!(instance.parent_id(), None);
}

#[test]
fn test_public_mutators_never_shrink_tags() {
    let system = SoftwareSystem::new("System", "");
    let web = container("Web");
    let other = Arc::new(Container::new(&system, "Other", "", "Rust"));
    let mut instance = ContainerInstance::new(web.clone(), 1);
    let before: Vec<String> = instance.tags().iter().map(str::to_string).collect();

    instance.add_tags(&["Blue,Green"]);
    for tag in before.iter().map(String::as_str).chain(["Blue", "Green", "Blue,Green"]) {
        instance.remove_tag(tag);
    }
    instance.set_name("Renamed");
    instance.set_parent_id(None);
    instance.set_container_id(other.id());
    let _ = instance.resolve_container(other);

    for tag in before.iter().map(String::as_str).chain(["Blue", "Green"]) {
        assert!(instance.has_tag(tag), "tag {tag} should remain");
    }
    assert_eq!(instance.container_id(), Some(web.id()));
}

#[test]
fn test_comma_tags_survive_serialization() {
    let mut instance = ContainerInstance::new(container("Web"), 1);
    instance.add_tags(&["Blue,Green"]);

    let json = serde_json::to_string(&instance).unwrap();
    let restored: ContainerInstance = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.tags(), instance.tags());
    assert!(restored.has_tag("Blue"));
    assert!(restored.has_tag("Green"));
}

#[test]
fn test_missing_or_empty_container_id_is_omitted() {
    let test_cases = [
        r#"{"id":"1","instanceId":1}"#,
        r#"{"id":"1","instanceId":1,"containerId":""}"#,
    ];

    for json in test_cases {
        let instance: ContainerInstance = serde_json::from_str(json).unwrap();
        assert_eq!(instance.container_id(), None, "input: {json}");

        let value = serde_json::to_value(&instance).unwrap();
        assert!(value.get("containerId").is_none(), "input: {json}");
        assert_eq!(value["instanceId"], 1);
    }
}

#[test]
fn test_stored_container_id_is_serialized_when_unresolved() {
    let json = r#"{"id":"1","containerId":"c-42"}"#;
    let instance: ContainerInstance = serde_json::from_str(json).unwrap();

    let value = serde_json::to_value(&instance).unwrap();
    assert_eq!(value["containerId"], "c-42");
}
