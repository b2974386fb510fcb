use crate::engine::nbt::{Compound, Tag, TagList};
use crate::engine::region::Chunk;

pub const LEGACY_DATA_VERSION: i32 = 2230;
pub const MODERN_DATA_VERSION: i32 = 3465;

#[derive(Clone, Copy, PartialEq)]
enum Layout {
    Legacy,
    Modern,
}

/// Builds chunk tag trees in either the pre-1.18 (`Level/Structures`) or the
/// flattened (`structures`) layout.
pub struct ChunkFactory {
    layout: Layout,
    data_version: Option<i32>,
    starts: Vec<String>,
    references: Vec<String>,
    timestamp: u32,
}

impl ChunkFactory {
    pub fn new() -> Self {
        Self {
            layout: Layout::Legacy,
            data_version: Some(LEGACY_DATA_VERSION),
            starts: Vec::new(),
            references: Vec::new(),
            timestamp: 1_600_000_000,
        }
    }

    pub fn modern(mut self) -> Self {
        self.layout = Layout::Modern;
        self.data_version = Some(MODERN_DATA_VERSION);
        self
    }

    pub fn with_data_version(mut self, version: i32) -> Self {
        self.data_version = Some(version);
        self
    }

    pub fn without_data_version(mut self) -> Self {
        self.data_version = None;
        self
    }

    pub fn with_start(mut self, name: &str) -> Self {
        self.starts.push(name.to_string());
        self
    }

    pub fn with_starts(mut self, names: &[&str]) -> Self {
        self.starts.extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn with_reference(mut self, name: &str) -> Self {
        self.references.push(name.to_string());
        self
    }

    pub fn with_timestamp(mut self, timestamp: u32) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn create(&self) -> Compound {
        let mut starts = Compound::new();
        for name in &self.starts {
            let mut start = Compound::new();
            start.insert("id".to_string(), Tag::String(name.clone()));
            start.insert("ChunkX".to_string(), Tag::Int(0));
            start.insert("ChunkZ".to_string(), Tag::Int(0));
            start.insert("Children".to_string(), Tag::List(TagList::empty()));
            starts.insert(name.clone(), Tag::Compound(start));
        }

        let mut references = Compound::new();
        for name in &self.references {
            references.insert(name.clone(), Tag::LongArray(vec![0, 4294967297]));
        }

        let mut root = Compound::new();
        if let Some(version) = self.data_version {
            root.insert("DataVersion".to_string(), Tag::Int(version));
        }

        match self.layout {
            Layout::Legacy => {
                let mut structures = Compound::new();
                structures.insert("References".to_string(), Tag::Compound(references));
                structures.insert("Starts".to_string(), Tag::Compound(starts));

                let mut level = Compound::new();
                level.insert("xPos".to_string(), Tag::Int(0));
                level.insert("zPos".to_string(), Tag::Int(0));
                level.insert("Status".to_string(), Tag::String("full".to_string()));
                level.insert("Structures".to_string(), Tag::Compound(structures));
                root.insert("Level".to_string(), Tag::Compound(level));
            }
            Layout::Modern => {
                let mut structures = Compound::new();
                structures.insert("References".to_string(), Tag::Compound(references));
                structures.insert("starts".to_string(), Tag::Compound(starts));

                root.insert("xPos".to_string(), Tag::Int(0));
                root.insert("zPos".to_string(), Tag::Int(0));
                root.insert("Status".to_string(), Tag::String("minecraft:full".to_string()));
                root.insert("structures".to_string(), Tag::Compound(structures));
            }
        }
        root
    }

    pub fn create_chunk(&self) -> Chunk {
        let mut chunk = Chunk::new(self.create());
        chunk.timestamp = self.timestamp;
        chunk
    }
}
