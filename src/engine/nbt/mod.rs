pub mod errors;
pub mod mutf8;
pub mod reader;
pub mod tag;
pub mod writer;

pub use errors::NbtError;
pub use reader::read_root;
pub use tag::{Compound, Tag, TagList};
pub use writer::write_root;
