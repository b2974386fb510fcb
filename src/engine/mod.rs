pub mod dispatcher;
pub mod errors;
pub mod nbt;
pub mod processor;
pub mod region;
pub mod strategy;
pub mod version;

pub use errors::*;
