use crate::engine::nbt::errors::NbtError;
use crate::engine::nbt::mutf8;
use crate::engine::nbt::tag::*;

/// Encoder producing the same big-endian layout `NbtReader` consumes.
pub struct NbtWriter {
    out: Vec<u8>,
}

impl NbtWriter {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    pub fn write_root(mut self, name: &str, root: &Compound) -> Result<Vec<u8>, NbtError> {
        self.out.push(TAG_COMPOUND);
        self.string(name)?;
        self.compound(root)?;
        Ok(self.out)
    }

    fn string(&mut self, s: &str) -> Result<(), NbtError> {
        let bytes = mutf8::encode(s);
        let len = u16::try_from(bytes.len())
            .map_err(|_| NbtError::TooLarge(format!("string of {} bytes", bytes.len())))?;
        self.out.extend_from_slice(&len.to_be_bytes());
        self.out.extend_from_slice(&bytes);
        Ok(())
    }

    fn len(&mut self, len: usize) -> Result<(), NbtError> {
        let len = i32::try_from(len)
            .map_err(|_| NbtError::TooLarge(format!("array of {} elements", len)))?;
        self.out.extend_from_slice(&len.to_be_bytes());
        Ok(())
    }

    fn compound(&mut self, compound: &Compound) -> Result<(), NbtError> {
        for (name, tag) in compound {
            self.out.push(tag.id());
            self.string(name)?;
            self.payload(tag)?;
        }
        self.out.push(TAG_END);
        Ok(())
    }

    fn payload(&mut self, tag: &Tag) -> Result<(), NbtError> {
        match tag {
            Tag::Byte(v) => self.out.extend_from_slice(&v.to_be_bytes()),
            Tag::Short(v) => self.out.extend_from_slice(&v.to_be_bytes()),
            Tag::Int(v) => self.out.extend_from_slice(&v.to_be_bytes()),
            Tag::Long(v) => self.out.extend_from_slice(&v.to_be_bytes()),
            Tag::Float(v) => self.out.extend_from_slice(&v.to_be_bytes()),
            Tag::Double(v) => self.out.extend_from_slice(&v.to_be_bytes()),
            Tag::ByteArray(values) => {
                self.len(values.len())?;
                self.out.extend(values.iter().map(|b| *b as u8));
            }
            Tag::String(s) => self.string(s)?,
            Tag::List(list) => {
                let element_id = match list.items.first() {
                    Some(first) => first.id(),
                    None => list.element_id,
                };
                self.out.push(element_id);
                self.len(list.items.len())?;
                for item in &list.items {
                    if item.id() != element_id {
                        return Err(NbtError::MixedList {
                            declared: element_id,
                            found: item.id(),
                        });
                    }
                    self.payload(item)?;
                }
            }
            Tag::Compound(c) => self.compound(c)?,
            Tag::IntArray(values) => {
                self.len(values.len())?;
                for v in values {
                    self.out.extend_from_slice(&v.to_be_bytes());
                }
            }
            Tag::LongArray(values) => {
                self.len(values.len())?;
                for v in values {
                    self.out.extend_from_slice(&v.to_be_bytes());
                }
            }
        }
        Ok(())
    }
}

impl Default for NbtWriter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn write_root(name: &str, root: &Compound) -> Result<Vec<u8>, NbtError> {
    NbtWriter::new().write_root(name, root)
}
