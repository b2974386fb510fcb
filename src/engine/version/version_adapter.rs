use tracing::debug;

use crate::engine::errors::UnsupportedVersion;
use crate::engine::nbt::tag::{Compound, Tag, compound_at, compound_at_mut};

/// Threshold for the root-level layout, taken from the 1.17.1 to 1.18 boundary.
/// Early 1.18 snapshots above it may still carry the `Level` wrapper.
pub const FLATTENED_DATA_VERSION: i64 = 2731;

/// Newest data version whose layout is known to match the table.
pub const DEFAULT_MAX_DATA_VERSION: i64 = 4440;

pub const DATA_VERSION_KEY: &str = "DataVersion";

/// The two structure collections every chunk carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Starts,
    References,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Starts, Collection::References];
}

/// Where a layout generation keeps its structure collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureLayout {
    pub name: &'static str,
    pub starts: &'static [&'static str],
    pub references: &'static [&'static str],
}

pub const LEGACY_LAYOUT: StructureLayout = StructureLayout {
    name: "legacy",
    starts: &["Level", "Structures", "Starts"],
    references: &["Level", "Structures", "References"],
};

pub const FLATTENED_LAYOUT: StructureLayout = StructureLayout {
    name: "flattened",
    starts: &["structures", "starts"],
    references: &["structures", "References"],
};

impl StructureLayout {
    /// Top-level key every path of this layout starts from.
    pub fn root(&self) -> &'static str {
        self.starts.first().copied().unwrap_or_default()
    }

    pub fn path(&self, collection: Collection) -> &'static [&'static str] {
        match collection {
            Collection::Starts => self.starts,
            Collection::References => self.references,
        }
    }

    /// A missing wrapper or collection reads as `None`, i.e. nothing to remove.
    pub fn collection<'a>(&self, tree: &'a Compound, collection: Collection) -> Option<&'a Compound> {
        compound_at(tree, self.path(collection))
    }

    pub fn collection_mut<'a>(
        &self,
        tree: &'a mut Compound,
        collection: Collection,
    ) -> Option<&'a mut Compound> {
        compound_at_mut(tree, self.path(collection))
    }
}

/// Maps a chunk's data version to its structure layout.
///
/// Entries are `(threshold, layout)` sorted by threshold; a version uses the
/// entry with the greatest threshold not above it. Versions newer than
/// `max_supported` are rejected rather than guessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionAdapter {
    table: Vec<(i64, StructureLayout)>,
    max_supported: i64,
}

impl Default for VersionAdapter {
    fn default() -> Self {
        Self {
            table: vec![(0, LEGACY_LAYOUT), (FLATTENED_DATA_VERSION, FLATTENED_LAYOUT)],
            max_supported: DEFAULT_MAX_DATA_VERSION,
        }
    }
}

impl VersionAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_supported(mut self, max_supported: i64) -> Self {
        self.max_supported = max_supported;
        self
    }

    /// Adds a layout starting at `threshold`, replacing any entry with the
    /// same threshold.
    pub fn with_layout(mut self, threshold: i64, layout: StructureLayout) -> Self {
        match self.table.binary_search_by_key(&threshold, |(t, _)| *t) {
            Ok(i) => self.table[i] = (threshold, layout),
            Err(i) => self.table.insert(i, (threshold, layout)),
        }
        self
    }

    pub fn max_supported(&self) -> i64 {
        self.max_supported
    }

    /// The chunk's embedded schema version. Chunks predating the tag read as 0.
    pub fn data_version(tree: &Compound) -> i64 {
        tree.get(DATA_VERSION_KEY)
            .and_then(Tag::as_i64)
            .unwrap_or(0)
    }

    pub fn layout_for(&self, data_version: i64) -> Result<StructureLayout, UnsupportedVersion> {
        if data_version > self.max_supported {
            return Err(UnsupportedVersion {
                data_version,
                max_supported: self.max_supported,
            });
        }

        let idx = self.table.partition_point(|(t, _)| *t <= data_version);
        // Versions below the first threshold share the oldest layout.
        let (_, layout) = self.table[idx.saturating_sub(1)];
        debug!(target: "version_adapter::layout_for", data_version, layout = layout.name, "Resolved structure layout");
        Ok(layout)
    }

    pub fn locate(&self, tree: &Compound) -> Result<StructureLayout, UnsupportedVersion> {
        let data_version = Self::data_version(tree);
        let layout = self.layout_for(data_version)?;

        if !tree.contains_key(layout.root()) {
            let other = self
                .table
                .iter()
                .map(|(_, l)| *l)
                .find(|l| l.root() != layout.root() && tree.contains_key(l.root()));
            if let Some(other) = other {
                debug!(
                    target: "version_adapter::locate",
                    data_version,
                    expected = layout.name,
                    found = other.name,
                    root = other.root(),
                    "Structure wrapper belongs to a different layout, nothing will be removed"
                );
            }
        }
        Ok(layout)
    }
}
