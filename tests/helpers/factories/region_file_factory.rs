use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::region::{AnvilStore, Chunk, Region, RegionStore, SectorName};

/// Builds regions in memory and writes them as real `.mca` files.
pub struct RegionFileFactory {
    name: SectorName,
    chunks: Vec<(usize, usize, Chunk)>,
}

impl RegionFileFactory {
    pub fn new() -> Self {
        Self {
            name: SectorName::new(0, 0),
            chunks: Vec::new(),
        }
    }

    pub fn with_coords(mut self, x: i32, z: i32) -> Self {
        self.name = SectorName::new(x, z);
        self
    }

    pub fn with_chunk(mut self, x: usize, z: usize, chunk: Chunk) -> Self {
        self.chunks.push((x, z, chunk));
        self
    }

    pub fn create(&self) -> Region {
        let mut region = Region::empty(self.name);
        for (x, z, chunk) in &self.chunks {
            region.set_chunk(*x, *z, chunk.clone());
        }
        region
    }

    /// Writes the region into `dir` under its canonical name.
    pub fn write_to(&self, dir: &Path) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(self.name.file_name());
        AnvilStore.save(&self.create(), &path).unwrap();
        path
    }
}
