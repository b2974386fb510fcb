use std::path::Path;

use crate::engine::errors::CleanerError;
use crate::engine::region::anvil_reader::AnvilReader;
use crate::engine::region::anvil_writer::AnvilWriter;
use crate::engine::region::region::Region;

/// Decodes region files into addressable chunk grids and encodes them back.
///
/// `load` fails `CorruptRegion` on malformed content and `SourceRead` on I/O
/// errors; `save` fails `DestinationWrite`.
pub trait RegionStore: Send + Sync {
    fn load(&self, path: &Path) -> Result<Region, CleanerError>;
    fn save(&self, region: &Region, path: &Path) -> Result<(), CleanerError>;
}

/// Store for the anvil `.mca` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnvilStore;

impl RegionStore for AnvilStore {
    fn load(&self, path: &Path) -> Result<Region, CleanerError> {
        AnvilReader::new(path).read()
    }

    fn save(&self, region: &Region, path: &Path) -> Result<(), CleanerError> {
        AnvilWriter::new(path).write(region)
    }
}
