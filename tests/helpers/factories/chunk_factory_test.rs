use crate::engine::nbt::Tag;
use crate::test_helpers::factories::{LEGACY_DATA_VERSION, MODERN_DATA_VERSION};
use crate::test_helpers::factory::Factory;
use crate::test_helpers::names_at;

#[test]
fn test_legacy_chunk_factory() {
    let tree = Factory::chunk()
        .with_starts(&["village", "mineshaft"])
        .with_reference("village")
        .create();

    assert_eq!(tree.get("DataVersion"), Some(&Tag::Int(LEGACY_DATA_VERSION)));
    assert_eq!(
        names_at(&tree, &["Level", "Structures", "Starts"]),
        vec!["village", "mineshaft"]
    );
    assert_eq!(
        names_at(&tree, &["Level", "Structures", "References"]),
        vec!["village"]
    );
}

#[test]
fn test_modern_chunk_factory() {
    let chunk = Factory::chunk()
        .modern()
        .with_start("minecraft:fortress")
        .with_timestamp(42)
        .create_chunk();

    assert_eq!(chunk.timestamp, 42);
    assert_eq!(chunk.tree.get("DataVersion"), Some(&Tag::Int(MODERN_DATA_VERSION)));
    assert_eq!(
        names_at(&chunk.tree, &["structures", "starts"]),
        vec!["minecraft:fortress"]
    );
    assert!(chunk.tree.get("Level").is_none());
}

#[test]
fn test_chunk_factory_without_version() {
    let tree = Factory::chunk().without_data_version().create();
    assert!(tree.get("DataVersion").is_none());
}
