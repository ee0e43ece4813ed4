//! Unit tests for session configuration metadata

use shellcache_domain::value_objects::{
    ClassMapping, RecordBlueprint, RecordProperty, SessionConfiguration,
};

fn content_configuration() -> SessionConfiguration {
    let records = [
        RecordBlueprint::new("Orchard.ContentManagement.Records.ContentItemRecord", "ContentItems")
            .with_property(RecordProperty::basic("Id"))
            .with_property(RecordProperty::reference("ContentTypeRecord"))
            .with_property(RecordProperty::reference("Versions")),
        RecordBlueprint::new("Orchard.ContentManagement.Records.ContentItemVersionRecord", "Versions")
            .with_property(RecordProperty::reference("ContentItemRecord"))
            .with_property(RecordProperty::basic("LatestRecord")),
        RecordBlueprint::new("Blogs.Records.BlogPartRecord", "Blogs")
            .with_property(RecordProperty::reference("ContentItemRecord")),
    ];

    SessionConfiguration {
        provider: "memory".to_string(),
        class_mappings: records.iter().map(ClassMapping::from).collect(),
        ..SessionConfiguration::default()
    }
}

#[test]
fn test_class_mapping_from_blueprint_is_selectable() {
    let record = RecordBlueprint::new("Blogs.Records.BlogPartRecord", "Blogs")
        .with_property(RecordProperty::basic("Name"));
    let mapping = ClassMapping::from(&record);

    assert_eq!(mapping.entity_name, "Blogs.Records.BlogPartRecord");
    assert_eq!(mapping.table_name, "Blogs");
    let name = mapping.property("Name").expect("mapped property");
    assert!(name.selectable);
    assert!(name.basic_accessor);
}

#[test]
fn test_disable_proxy_record_selection_targets_content_record_references() {
    let mut configuration = content_configuration();

    let disabled = configuration.disable_proxy_record_selection();
    assert_eq!(disabled, 2);

    let item = configuration
        .class_mapping("Orchard.ContentManagement.Records.ContentItemRecord")
        .expect("content item mapping");
    assert!(item.property("Id").unwrap().selectable);
    assert!(!item.property("ContentTypeRecord").unwrap().selectable);
    // Not a record reference by name
    assert!(item.property("Versions").unwrap().selectable);

    let version = configuration
        .class_mapping("Orchard.ContentManagement.Records.ContentItemVersionRecord")
        .expect("version mapping");
    assert!(!version.property("ContentItemRecord").unwrap().selectable);
    // Basic accessors are never touched
    assert!(version.property("LatestRecord").unwrap().selectable);

    // Outside the content records namespace
    let blog = configuration
        .class_mapping("Blogs.Records.BlogPartRecord")
        .expect("blog mapping");
    assert!(blog.property("ContentItemRecord").unwrap().selectable);
}

#[test]
fn test_namespace_must_match_from_its_root() {
    let record = RecordBlueprint::new("ContentManagement.Records.ContentItemRecord", "Items")
        .with_property(RecordProperty::reference("ContentTypeRecord"));
    let mut configuration = SessionConfiguration {
        class_mappings: vec![ClassMapping::from(&record)],
        ..SessionConfiguration::default()
    };

    assert_eq!(configuration.disable_proxy_record_selection(), 0);
    let item = configuration
        .class_mapping("ContentManagement.Records.ContentItemRecord")
        .expect("item mapping");
    assert!(item.property("ContentTypeRecord").unwrap().selectable);
}

#[test]
fn test_disable_proxy_record_selection_is_idempotent() {
    let mut configuration = content_configuration();
    configuration.disable_proxy_record_selection();
    let once = configuration.clone();

    assert_eq!(configuration.disable_proxy_record_selection(), 0);
    assert_eq!(configuration, once);
}

#[test]
fn test_session_configuration_serializes_camel_case() {
    let configuration = content_configuration();
    let json = serde_json::to_value(&configuration).unwrap();

    assert!(json.get("classMappings").is_some());
    let first = &json["classMappings"][0];
    assert_eq!(first["tableName"], "ContentItems");
    assert_eq!(first["properties"][0]["basicAccessor"], true);

    let back: SessionConfiguration = serde_json::from_value(json).unwrap();
    assert_eq!(back, configuration);
}
