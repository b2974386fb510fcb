use crate::engine::nbt::errors::NbtError;
use crate::engine::nbt::mutf8;
use crate::engine::nbt::tag::*;

pub const MAX_DEPTH: usize = 512;

/// Decoder for a big-endian tag tree with a named compound root.
pub struct NbtReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> NbtReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Reads the root tag, returning its name and children.
    pub fn read_root(mut self) -> Result<(String, Compound), NbtError> {
        let id = self.u8()?;
        if id != TAG_COMPOUND {
            return Err(NbtError::RootNotCompound(id));
        }
        let name = self.string()?;
        let root = self.compound(0)?;
        Ok((name, root))
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], NbtError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.buf.len())
            .ok_or(NbtError::UnexpectedEof(self.pos))?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], NbtError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, NbtError> {
        Ok(self.array::<1>()?[0])
    }

    fn i8(&mut self) -> Result<i8, NbtError> {
        Ok(i8::from_be_bytes(self.array()?))
    }

    fn i16(&mut self) -> Result<i16, NbtError> {
        Ok(i16::from_be_bytes(self.array()?))
    }

    fn i32(&mut self) -> Result<i32, NbtError> {
        Ok(i32::from_be_bytes(self.array()?))
    }

    fn i64(&mut self) -> Result<i64, NbtError> {
        Ok(i64::from_be_bytes(self.array()?))
    }

    fn len(&mut self) -> Result<usize, NbtError> {
        let offset = self.pos;
        let len = self.i32()?;
        if len < 0 {
            return Err(NbtError::NegativeLength { len, offset });
        }
        Ok(len as usize)
    }

    fn string(&mut self) -> Result<String, NbtError> {
        let len = u16::from_be_bytes(self.array()?) as usize;
        mutf8::decode(self.take(len)?)
    }

    fn compound(&mut self, depth: usize) -> Result<Compound, NbtError> {
        if depth >= MAX_DEPTH {
            return Err(NbtError::TooDeep(MAX_DEPTH));
        }
        let mut out = Compound::new();
        loop {
            let id = self.u8()?;
            if id == TAG_END {
                return Ok(out);
            }
            let name = self.string()?;
            let tag = self.payload(id, depth + 1)?;
            out.insert(name, tag);
        }
    }

    fn payload(&mut self, id: u8, depth: usize) -> Result<Tag, NbtError> {
        let tag = match id {
            TAG_BYTE => Tag::Byte(self.i8()?),
            TAG_SHORT => Tag::Short(self.i16()?),
            TAG_INT => Tag::Int(self.i32()?),
            TAG_LONG => Tag::Long(self.i64()?),
            TAG_FLOAT => Tag::Float(f32::from_be_bytes(self.array()?)),
            TAG_DOUBLE => Tag::Double(f64::from_be_bytes(self.array()?)),
            TAG_BYTE_ARRAY => {
                let len = self.len()?;
                Tag::ByteArray(self.take(len)?.iter().map(|b| *b as i8).collect())
            }
            TAG_STRING => Tag::String(self.string()?),
            TAG_LIST => {
                if depth >= MAX_DEPTH {
                    return Err(NbtError::TooDeep(MAX_DEPTH));
                }
                let element_id = self.u8()?;
                let len = self.len()?;
                if len > 0 && element_id == TAG_END {
                    return Err(NbtError::UnknownTag {
                        id: element_id,
                        offset: self.pos,
                    });
                }
                // Every element is at least one byte, which bounds the
                // allocation by the remaining input.
                let mut items = Vec::with_capacity(len.min(self.buf.len() - self.pos));
                for _ in 0..len {
                    items.push(self.payload(element_id, depth + 1)?);
                }
                Tag::List(TagList { element_id, items })
            }
            TAG_COMPOUND => Tag::Compound(self.compound(depth)?),
            TAG_INT_ARRAY => {
                let len = self.len()?;
                let bytes = self.take(len.checked_mul(4).ok_or(NbtError::UnexpectedEof(self.pos))?)?;
                Tag::IntArray(
                    bytes
                        .chunks_exact(4)
                        .map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]]))
                        .collect(),
                )
            }
            TAG_LONG_ARRAY => {
                let len = self.len()?;
                let bytes = self.take(len.checked_mul(8).ok_or(NbtError::UnexpectedEof(self.pos))?)?;
                Tag::LongArray(
                    bytes
                        .chunks_exact(8)
                        .map(|c| i64::from_be_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
                        .collect(),
                )
            }
            other => {
                return Err(NbtError::UnknownTag {
                    id: other,
                    offset: self.pos.saturating_sub(1),
                });
            }
        };
        Ok(tag)
    }
}

pub fn read_root(buf: &[u8]) -> Result<(String, Compound), NbtError> {
    NbtReader::new(buf).read_root()
}
