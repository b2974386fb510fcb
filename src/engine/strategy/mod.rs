pub mod removal_strategy;
pub mod vanilla;

pub use removal_strategy::RemovalStrategy;
pub use vanilla::VanillaRegistry;
