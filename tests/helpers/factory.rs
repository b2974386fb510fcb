pub use super::factories::{ChunkFactory, RegionFileFactory};

pub struct Factory;

impl Factory {
    pub fn chunk() -> ChunkFactory {
        ChunkFactory::new()
    }

    pub fn region_file() -> RegionFileFactory {
        RegionFileFactory::new()
    }
}
