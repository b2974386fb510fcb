use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::engine::errors::CleanerError;
use crate::engine::nbt;
use crate::engine::region::compression::{Compression, EXTERNAL_FLAG};
use crate::engine::region::region::{CHUNKS_PER_REGION, Chunk, REGION_WIDTH, Region};
use crate::engine::region::sector_name::SectorName;

pub const SECTOR_BYTES: usize = 4096;
pub const HEADER_BYTES: usize = 2 * SECTOR_BYTES;

/// Reader for anvil `.mca` region files.
/// Format:
///   [1024 x u32 location: offset in sectors (24 bits) | sector count (8 bits)]
///   [1024 x u32 last-modified timestamp]
///   per chunk, at its sector offset: u32 length, u8 compression, payload
/// All integers big-endian. Slot `i` holds chunk `(i % 32, i / 32)`.
pub struct AnvilReader<'a> {
    path: &'a Path,
}

impl<'a> AnvilReader<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    pub fn read(&self) -> Result<Region, CleanerError> {
        let name = SectorName::parse(self.path)?;
        let bytes = fs::read(self.path).map_err(|source| CleanerError::SourceRead {
            path: self.path.to_path_buf(),
            source,
        })?;

        info!(target: "anvil_reader::read", path = %self.path.display(), size = bytes.len(), "Reading region file");

        if bytes.len() < HEADER_BYTES {
            return Err(self.corrupt(format!(
                "{} bytes is shorter than the {} byte header",
                bytes.len(),
                HEADER_BYTES
            )));
        }

        let mut region = Region::empty(name);
        for index in 0..CHUNKS_PER_REGION {
            let location = be_u32(&bytes, index * 4);
            if location == 0 {
                continue;
            }
            let timestamp = be_u32(&bytes, SECTOR_BYTES + index * 4);
            let (x, z) = (index % REGION_WIDTH, index / REGION_WIDTH);

            let chunk = self.read_chunk(&bytes, name, x, z, location, timestamp)?;
            region.set_chunk(x, z, chunk);
        }

        debug!(target: "anvil_reader::read", path = %self.path.display(), chunks = region.present_count(), "Decoded region");
        Ok(region)
    }

    fn read_chunk(
        &self,
        bytes: &[u8],
        name: SectorName,
        x: usize,
        z: usize,
        location: u32,
        timestamp: u32,
    ) -> Result<Chunk, CleanerError> {
        let offset = (location >> 8) as usize;
        let sectors = (location & 0xFF) as usize;
        if offset < 2 || sectors == 0 {
            return Err(self.corrupt(format!(
                "chunk ({}, {}) has invalid location {}+{}",
                x, z, offset, sectors
            )));
        }

        let start = offset * SECTOR_BYTES;
        if start + 5 > bytes.len() {
            return Err(self.corrupt(format!(
                "chunk ({}, {}) starts at {} past end of file",
                x, z, start
            )));
        }
        let length = be_u32(bytes, start) as usize;
        if length == 0 || start + 4 + length > bytes.len() {
            return Err(self.corrupt(format!(
                "chunk ({}, {}) declares {} bytes, file has {}",
                x,
                z,
                length,
                bytes.len().saturating_sub(start + 4)
            )));
        }

        let compression_id = bytes[start + 4];
        let compression = Compression::from_id(compression_id).ok_or_else(|| {
            self.corrupt(format!(
                "chunk ({}, {}) uses unknown compression {}",
                x, z, compression_id
            ))
        })?;

        let external;
        let payload = if compression_id & EXTERNAL_FLAG != 0 {
            let path = self.external_path(name, x, z);
            debug!(target: "anvil_reader::read_chunk", x, z, path = %path.display(), "Chunk stored externally");
            external = fs::read(&path).map_err(|source| CleanerError::SourceRead { path, source })?;
            &external[..]
        } else {
            &bytes[start + 5..start + 4 + length]
        };

        let raw = compression
            .decompress(payload)
            .map_err(|e| self.corrupt(format!("chunk ({}, {}) failed to decompress: {}", x, z, e)))?;
        let (root_name, tree) = nbt::read_root(&raw)
            .map_err(|e| self.corrupt(format!("chunk ({}, {}) has a bad tag tree: {}", x, z, e)))?;

        Ok(Chunk {
            root_name,
            tree,
            timestamp,
            compression,
        })
    }

    fn external_path(&self, name: SectorName, x: usize, z: usize) -> PathBuf {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        dir.join(external_file_name(name, x, z))
    }

    fn corrupt(&self, reason: String) -> CleanerError {
        CleanerError::CorruptRegion {
            path: self.path.to_path_buf(),
            reason,
        }
    }
}

/// `c.<chunkX>.<chunkZ>.mcc`, in absolute chunk coordinates.
pub fn external_file_name(name: SectorName, x: usize, z: usize) -> String {
    let chunk_x = name.x as i64 * REGION_WIDTH as i64 + x as i64;
    let chunk_z = name.z as i64 * REGION_WIDTH as i64 + z as i64;
    format!("c.{}.{}.mcc", chunk_x, chunk_z)
}

fn be_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}
