use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::engine::errors::CleanerError;
use crate::engine::nbt;
use crate::engine::region::anvil_reader::{HEADER_BYTES, SECTOR_BYTES, external_file_name};
use crate::engine::region::compression::EXTERNAL_FLAG;
use crate::engine::region::region::{Region, slot_index};

/// Largest chunk that fits in the one-byte sector count.
const MAX_INLINE_SECTORS: usize = 255;

/// Writer for anvil `.mca` region files. Mirrors the layout documented in
/// `AnvilReader`. Chunks are packed in slot order starting right after the
/// header.
pub struct AnvilWriter<'a> {
    path: &'a Path,
}

/// Encoded region plus any oversized chunks that spill into `.mcc` files.
pub struct EncodedRegion {
    pub bytes: Vec<u8>,
    pub external: Vec<(String, Vec<u8>)>,
}

impl<'a> AnvilWriter<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    pub fn write(&self, region: &Region) -> Result<(), CleanerError> {
        let encoded = encode(region).map_err(|source| self.write_error(self.path, source))?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        for (file_name, payload) in &encoded.external {
            let path = dir.join(file_name);
            debug!(target: "anvil_writer::write", path = %path.display(), bytes = payload.len(), "Writing external chunk");
            self.persist(&path, payload)?;
        }

        self.persist(self.path, &encoded.bytes)?;

        info!(target: "anvil_writer::write", path = %self.path.display(), chunks = region.present_count(), size = encoded.bytes.len(), "Wrote region file");
        Ok(())
    }

    /// Writes through a temp file in the same directory so a failure never
    /// leaves a truncated file at `path`.
    fn persist(&self, path: &Path, bytes: &[u8]) -> Result<(), CleanerError> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.write_error(path, e))?;
        tmp.write_all(bytes).map_err(|e| self.write_error(path, e))?;
        tmp.as_file().sync_all().map_err(|e| self.write_error(path, e))?;
        tmp.persist(path).map_err(|e| self.write_error(path, e.error))?;
        Ok(())
    }

    fn write_error(&self, path: &Path, source: io::Error) -> CleanerError {
        CleanerError::DestinationWrite {
            path: PathBuf::from(path),
            source,
        }
    }
}

pub fn encode(region: &Region) -> io::Result<EncodedRegion> {
    let mut bytes = vec![0u8; HEADER_BYTES];
    let mut external = Vec::new();

    for (x, z, chunk) in region.present() {
        let raw = nbt::write_root(&chunk.root_name, &chunk.tree)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let payload = chunk.compression.compress(&raw)?;

        let mut compression_id = chunk.compression.id();
        let mut inline: &[u8] = &payload;
        if sectors_for(payload.len()) > MAX_INLINE_SECTORS {
            compression_id |= EXTERNAL_FLAG;
            inline = &[];
            external.push((external_file_name(region.name, x, z), payload.clone()));
        }

        let offset = bytes.len() / SECTOR_BYTES;
        let sectors = sectors_for(inline.len());
        let length = u32::try_from(inline.len() + 1)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "chunk too large"))?;

        bytes.extend_from_slice(&length.to_be_bytes());
        bytes.push(compression_id);
        bytes.extend_from_slice(inline);
        bytes.resize((offset + sectors) * SECTOR_BYTES, 0);

        let index = slot_index(x, z);
        let location = ((offset as u32) << 8) | sectors as u32;
        bytes[index * 4..index * 4 + 4].copy_from_slice(&location.to_be_bytes());
        let ts_at = SECTOR_BYTES + index * 4;
        bytes[ts_at..ts_at + 4].copy_from_slice(&chunk.timestamp.to_be_bytes());
    }

    debug_assert_eq!(bytes.len() % SECTOR_BYTES, 0);
    debug!(target: "anvil_writer::encode", region = %region.name, chunks = region.present_count(), external = external.len(), "Encoded region");
    Ok(EncodedRegion { bytes, external })
}

/// Sectors needed for a payload plus its 5-byte chunk header.
fn sectors_for(payload_len: usize) -> usize {
    (payload_len + 5).div_ceil(SECTOR_BYTES)
}
