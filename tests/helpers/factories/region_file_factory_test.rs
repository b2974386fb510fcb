use tempfile::tempdir;

use crate::engine::region::{AnvilStore, RegionStore};
use crate::test_helpers::factory::Factory;

#[test]
fn test_region_file_factory() {
    let dir = tempdir().unwrap();
    let path = Factory::region_file()
        .with_coords(-2, 7)
        .with_chunk(3, 4, Factory::chunk().with_start("village").create_chunk())
        .write_to(dir.path());

    assert_eq!(path.file_name().unwrap(), "r.-2.7.mca");

    let region = AnvilStore.load(&path).unwrap();
    assert_eq!(region.present_count(), 1);
    assert!(region.is_present(3, 4));
}
