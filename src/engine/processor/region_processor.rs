use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::engine::errors::CleanerError;
use crate::engine::nbt::Compound;
use crate::engine::processor::removal_result::{RemovalResult, UnknownVersionPolicy};
use crate::engine::region::{AnvilStore, REGION_WIDTH, Region, RegionStore, SectorName};
use crate::engine::strategy::RemovalStrategy;
use crate::engine::version::{Collection, StructureLayout, VersionAdapter};

/// Cleans one region file at a time: validates it, strips structure tags from
/// every present chunk and writes the result under the same name in the
/// destination directory.
pub struct RegionProcessor<S = AnvilStore> {
    store: S,
    adapter: VersionAdapter,
    policy: UnknownVersionPolicy,
}

impl Default for RegionProcessor<AnvilStore> {
    fn default() -> Self {
        Self::new(AnvilStore)
    }
}

impl<S: RegionStore> RegionProcessor<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            adapter: VersionAdapter::default(),
            policy: UnknownVersionPolicy::default(),
        }
    }

    pub fn with_adapter(mut self, adapter: VersionAdapter) -> Self {
        self.adapter = adapter;
        self
    }

    pub fn with_policy(mut self, policy: UnknownVersionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn process_file(
        &self,
        strategy: &RemovalStrategy,
        source: &Path,
        dest_dir: &Path,
    ) -> Result<RemovalResult, CleanerError> {
        let start = Instant::now();
        debug!(target: "region_processor::process_file", path = %source.display(), "Checking file");

        let name = validate(source)?;
        let region = self.store.load(source)?;
        let mut output = Region::empty(name);
        let mut result = RemovalResult::default();

        for x in 0..REGION_WIDTH {
            for z in 0..REGION_WIDTH {
                if !region.is_present(x, z) {
                    continue;
                }
                let Some((view, mut copy)) = region.read_tags(x, z) else {
                    continue;
                };

                match self.adapter.locate(view) {
                    Ok(layout) => {
                        let removed = strip_structures(strategy, layout, view, &mut copy, &mut result.removed_names);
                        if removed > 0 {
                            debug!(target: "region_processor::process_file", x, z, removed, layout = layout.name, "Stripped structure tags");
                        }
                        result.count += removed;
                        result.chunks += 1;
                    }
                    Err(unsupported) => match self.policy {
                        UnknownVersionPolicy::Fail => {
                            return Err(CleanerError::UnsupportedVersion {
                                path: source.to_path_buf(),
                                x,
                                z,
                                source: unsupported,
                            });
                        }
                        UnknownVersionPolicy::Skip => {
                            warn!(target: "region_processor::process_file", path = %source.display(), x, z, data_version = unsupported.data_version, "Unknown chunk version, copying unchanged");
                            result.skipped_chunks += 1;
                        }
                    },
                }

                // The copy is untouched when the chunk was skipped.
                if let Some(chunk) = region.chunk(x, z) {
                    output.set_chunk(x, z, chunk.with_tree(copy));
                }
            }
        }

        // Validation guarantees a UTF-8 file name.
        let file_name = source.file_name().unwrap_or_default();
        self.store.save(&output, &dest_dir.join(file_name))?;
        result.elapsed = start.elapsed();

        info!(
            target: "region_processor::process_file",
            path = %source.display(),
            count = result.count,
            chunks = result.chunks,
            elapsed = format!("{:.3}s", result.elapsed.as_secs_f64()),
            "Removed structure tags"
        );
        if strategy.is_purge() && !result.removed_names.is_empty() {
            info!(target: "region_processor::process_file", path = %source.display(), names = ?result.removed_names, "Found {} non-vanilla tags", result.removed_names.len());
        }

        Ok(result)
    }
}

/// Validation order: file name shape, then size, then coordinates.
pub fn validate(source: &Path) -> Result<SectorName, CleanerError> {
    SectorName::check_extension(source)?;

    let meta = fs::metadata(source).map_err(|e| CleanerError::SourceRead {
        path: source.to_path_buf(),
        source: e,
    })?;
    if !meta.is_file() {
        return Err(CleanerError::InvalidFormat {
            path: source.to_path_buf(),
            reason: "not a regular file".to_string(),
        });
    }
    if meta.len() == 0 {
        return Err(CleanerError::EmptyFile {
            path: source.to_path_buf(),
        });
    }

    SectorName::parse(source)
}

/// Deletes from `copy` every tag in `view`'s structure collections that the
/// strategy selects. Only names seen in `view` are ever deleted. Returns the
/// number of deletions and records each name in `removed`.
pub fn strip_structures(
    strategy: &RemovalStrategy,
    layout: StructureLayout,
    view: &Compound,
    copy: &mut Compound,
    removed: &mut BTreeSet<String>,
) -> u64 {
    let mut count = 0;
    for collection in Collection::ALL {
        let Some(observed) = layout.collection(view, collection) else {
            continue;
        };
        let Some(target) = layout.collection_mut(copy, collection) else {
            continue;
        };
        for name in observed.keys().filter(|n| strategy.should_remove(n)) {
            if target.shift_remove(name).is_some() {
                count += 1;
                removed.insert(name.clone());
            }
        }
    }
    count
}
