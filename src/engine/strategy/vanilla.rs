use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Arc;

/// Names under this namespace belong to the base game even when the registry
/// below has not caught up with them.
pub const RESERVED_NAMESPACE: &str = "minecraft:";

/// Built-in structure identifiers, lowercase. Covers both the modern
/// snake_case ids and the older camel-case start names.
const VANILLA_STRUCTURES: &[&str] = &[
    "ancientcity",
    "ancient_city",
    "bastionremnant",
    "bastion_remnant",
    "buried_treasure",
    "buriedtreasure",
    "desert_pyramid",
    "endcity",
    "end_city",
    "fortress",
    "igloo",
    "jungle_pyramid",
    "mansion",
    "mineshaft",
    "mineshaft_mesa",
    "monument",
    "nether_fossil",
    "ocean_ruin",
    "ocean_ruin_cold",
    "ocean_ruin_warm",
    "pillager_outpost",
    "pillageroutpost",
    "ruined_portal",
    "ruined_portal_desert",
    "ruined_portal_jungle",
    "ruined_portal_mountain",
    "ruined_portal_nether",
    "ruined_portal_ocean",
    "ruined_portal_swamp",
    "ruinedportal",
    "ruins",
    "shipwreck",
    "shipwreck_beached",
    "stronghold",
    "swamp_hut",
    "temple",
    "trail_ruins",
    "village",
];

static SHARED: Lazy<Arc<VanillaRegistry>> =
    Lazy::new(|| Arc::new(VanillaRegistry::from_names(VANILLA_STRUCTURES.iter().copied())));

/// Immutable set of structure names the base game generates itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanillaRegistry {
    names: HashSet<String>,
}

impl VanillaRegistry {
    /// The built-in registry, built once and shared by every worker.
    pub fn shared() -> Arc<VanillaRegistry> {
        Arc::clone(&SHARED)
    }

    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            names: names.into_iter().map(str::to_lowercase).collect(),
        }
    }

    /// Case-insensitive membership.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
