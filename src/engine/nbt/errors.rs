use thiserror::Error;

#[derive(Debug, Error)]
pub enum NbtError {
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEof(usize),

    #[error("unknown tag id {id} at offset {offset}")]
    UnknownTag { id: u8, offset: usize },

    #[error("root tag must be a compound, found id {0}")]
    RootNotCompound(u8),

    #[error("negative length {len} at offset {offset}")]
    NegativeLength { len: i32, offset: usize },

    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),

    #[error("invalid string: {0}")]
    InvalidString(String),

    #[error("value too large to encode: {0}")]
    TooLarge(String),

    #[error("list declares element id {declared} but holds id {found}")]
    MixedList { declared: u8, found: u8 },
}
