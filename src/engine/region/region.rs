use crate::engine::nbt::Compound;
use crate::engine::region::compression::Compression;
use crate::engine::region::sector_name::SectorName;

/// Chunks per region edge.
pub const REGION_WIDTH: usize = 32;
pub const CHUNKS_PER_REGION: usize = REGION_WIDTH * REGION_WIDTH;

/// One present chunk slot: the decoded tag tree plus the metadata the
/// on-disk format keeps next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub root_name: String,
    pub tree: Compound,
    pub timestamp: u32,
    pub compression: Compression,
}

impl Chunk {
    pub fn new(tree: Compound) -> Self {
        Self {
            root_name: String::new(),
            tree,
            timestamp: 0,
            compression: Compression::default(),
        }
    }

    /// Same slot metadata, different tree.
    pub fn with_tree(&self, tree: Compound) -> Self {
        Self {
            root_name: self.root_name.clone(),
            tree,
            timestamp: self.timestamp,
            compression: self.compression,
        }
    }
}

/// In-memory sector: region coordinates and a 32x32 grid of chunk slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: SectorName,
    slots: Vec<Option<Chunk>>,
}

/// Slot index for grid position `(x, z)`, matching the on-disk table order.
pub fn slot_index(x: usize, z: usize) -> usize {
    debug_assert!(x < REGION_WIDTH && z < REGION_WIDTH);
    (x % REGION_WIDTH) + (z % REGION_WIDTH) * REGION_WIDTH
}

impl Region {
    pub fn empty(name: SectorName) -> Self {
        Self {
            name,
            slots: vec![None; CHUNKS_PER_REGION],
        }
    }

    pub fn is_present(&self, x: usize, z: usize) -> bool {
        self.chunk(x, z).is_some()
    }

    pub fn chunk(&self, x: usize, z: usize) -> Option<&Chunk> {
        self.slots[slot_index(x, z)].as_ref()
    }

    /// Read view and an independent mutable copy of the chunk at `(x, z)`.
    /// Edits to the copy never affect the view.
    pub fn read_tags(&self, x: usize, z: usize) -> Option<(&Compound, Compound)> {
        self.chunk(x, z).map(|c| (&c.tree, c.tree.clone()))
    }

    pub fn set_chunk(&mut self, x: usize, z: usize, chunk: Chunk) {
        self.slots[slot_index(x, z)] = Some(chunk);
    }

    pub fn present_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Present chunks as `(x, z, chunk)` in x-major order.
    pub fn present(&self) -> impl Iterator<Item = (usize, usize, &Chunk)> + '_ {
        (0..REGION_WIDTH).flat_map(move |x| {
            (0..REGION_WIDTH)
                .filter_map(move |z| self.chunk(x, z).map(|chunk| (x, z, chunk)))
        })
    }
}
