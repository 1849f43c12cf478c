// Data loader for the embedded default database
// Bundles the linguistic data files at compile time

/// Embedded vowel pattern templates with phonological tags (JSON)
pub const VOWEL_PATTERNS_JSON: &str = include_str!("../data/vowel_patterns.json");

/// Embedded consonant inventory with exception-role flags (JSON)
pub const FOUNDATION_JSON: &str = include_str!("../data/foundation.json");

/// Embedded initial/final cluster lists (JSON)
pub const CLUSTERS_JSON: &str = include_str!("../data/clusters.json");

/// Data loader utility
pub struct DataLoader;

impl DataLoader {
    /// Get the vowel pattern template data
    pub fn vowel_patterns() -> &'static str {
        VOWEL_PATTERNS_JSON
    }

    /// Get the consonant inventory data
    pub fn foundation() -> &'static str {
        FOUNDATION_JSON
    }

    /// Get the cluster list data
    pub fn clusters() -> &'static str {
        CLUSTERS_JSON
    }

    /// Get all data info
    pub fn info() -> DataInfo {
        DataInfo {
            patterns_size: VOWEL_PATTERNS_JSON.len(),
            foundation_size: FOUNDATION_JSON.len(),
            clusters_size: CLUSTERS_JSON.len(),
            total_size: VOWEL_PATTERNS_JSON.len() + FOUNDATION_JSON.len() + CLUSTERS_JSON.len(),
        }
    }
}

/// Information about embedded data
#[derive(Debug, Clone)]
pub struct DataInfo {
    /// Size of the vowel pattern data in bytes
    pub patterns_size: usize,
    /// Size of the consonant inventory in bytes
    pub foundation_size: usize,
    /// Size of the cluster lists in bytes
    pub clusters_size: usize,
    /// Total size of all embedded data
    pub total_size: usize,
}
