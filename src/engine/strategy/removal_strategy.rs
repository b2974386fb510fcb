use std::collections::BTreeSet;
use std::sync::Arc;

use crate::engine::strategy::vanilla::{RESERVED_NAMESPACE, VanillaRegistry};

/// Trailing marker turning a specifier into a prefix match.
pub const WILDCARD: char = '*';

/// Decides which structure tags get deleted. Immutable once built, so one
/// instance is shared read-only by every worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalStrategy {
    /// Removes everything that is neither vanilla nor namespaced as built-in.
    Purge { registry: Arc<VanillaRegistry> },
    /// Removes exact (case-sensitive) names and names under wildcard prefixes.
    List {
        specifiers: BTreeSet<String>,
        specific: BTreeSet<String>,
        prefixes: Vec<String>,
    },
}

impl RemovalStrategy {
    pub fn purge() -> Self {
        RemovalStrategy::Purge {
            registry: VanillaRegistry::shared(),
        }
    }

    pub fn list<I, S>(specifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let specifiers: BTreeSet<String> = specifiers.into_iter().map(Into::into).collect();
        let mut specific = BTreeSet::new();
        let mut prefixes = Vec::new();
        for specifier in &specifiers {
            match specifier.strip_suffix(WILDCARD) {
                Some(prefix) => prefixes.push(prefix.to_string()),
                None => {
                    specific.insert(specifier.clone());
                }
            }
        }
        RemovalStrategy::List {
            specifiers,
            specific,
            prefixes,
        }
    }

    /// No specifiers means purge mode; anything else is a list.
    pub fn from_specifiers<I, S>(specifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let specifiers: Vec<String> = specifiers.into_iter().map(Into::into).collect();
        if specifiers.is_empty() {
            Self::purge()
        } else {
            Self::list(specifiers)
        }
    }

    pub fn should_remove(&self, tag_name: &str) -> bool {
        match self {
            RemovalStrategy::Purge { registry } => {
                if registry.contains(tag_name) {
                    return false;
                }
                !tag_name.to_lowercase().starts_with(RESERVED_NAMESPACE)
            }
            RemovalStrategy::List {
                specific, prefixes, ..
            } => {
                specific.contains(tag_name)
                    || prefixes.iter().any(|p| tag_name.starts_with(p.as_str()))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RemovalStrategy::Purge { .. } => "purge",
            RemovalStrategy::List { .. } => "list",
        }
    }

    pub fn is_purge(&self) -> bool {
        matches!(self, RemovalStrategy::Purge { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            RemovalStrategy::Purge { .. } => "non-vanilla structures".to_string(),
            RemovalStrategy::List { specifiers, .. } => {
                let quoted: Vec<String> = specifiers.iter().map(|s| format!("{:?}", s)).collect();
                format!("tags: {}", quoted.join(", "))
            }
        }
    }
}
