pub mod version_adapter;

pub use version_adapter::{Collection, StructureLayout, VersionAdapter};
