pub mod region_processor;
pub mod removal_result;

pub use region_processor::RegionProcessor;
pub use removal_result::{RemovalResult, UnknownVersionPolicy};
