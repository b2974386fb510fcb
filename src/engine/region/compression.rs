use flate2::Compression as Level;
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use std::io::{Read, Write};

/// Flag on the compression byte marking a chunk stored in a sibling `.mcc` file.
pub const EXTERNAL_FLAG: u8 = 0x80;

/// Per-chunk compression scheme, identified by the byte after the length prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    #[default]
    Zlib,
    Uncompressed,
}

impl Compression {
    pub fn from_id(id: u8) -> Option<Self> {
        match id & !EXTERNAL_FLAG {
            1 => Some(Compression::Gzip),
            2 => Some(Compression::Zlib),
            3 => Some(Compression::Uncompressed),
            _ => None,
        }
    }

    pub fn id(&self) -> u8 {
        match self {
            Compression::Gzip => 1,
            Compression::Zlib => 2,
            Compression::Uncompressed => 3,
        }
    }

    pub fn decompress(&self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(data.len() * 4);
        match self {
            Compression::Gzip => {
                GzDecoder::new(data).read_to_end(&mut out)?;
            }
            Compression::Zlib => {
                ZlibDecoder::new(data).read_to_end(&mut out)?;
            }
            Compression::Uncompressed => out.extend_from_slice(data),
        }
        Ok(out)
    }

    pub fn compress(&self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        match self {
            Compression::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Level::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
            Compression::Zlib => {
                let mut encoder = ZlibEncoder::new(Vec::new(), Level::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
            Compression::Uncompressed => Ok(data.to_vec()),
        }
    }
}
