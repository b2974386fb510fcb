pub mod chunk_factory;
pub mod region_file_factory;

pub use chunk_factory::{ChunkFactory, LEGACY_DATA_VERSION, MODERN_DATA_VERSION};
pub use region_file_factory::RegionFileFactory;

#[cfg(test)]
mod chunk_factory_test;
#[cfg(test)]
mod region_file_factory_test;
