pub mod anvil_reader;
pub mod anvil_writer;
pub mod compression;
#[allow(clippy::module_inception)]
pub mod region;
pub mod region_store;
pub mod sector_name;

pub use region::{Chunk, REGION_WIDTH, Region};
pub use region_store::{AnvilStore, RegionStore};
pub use sector_name::SectorName;
