//! # Thai-Readings: Thai Syllable Segmentation Engine
//!
//! Deterministic segmentation of Thai grapheme sequences into syllables,
//! enumerating every orthographically valid alternative reading instead of
//! committing to one.
//!
//! ## Model
//!
//! A syllable is a **foundation** (1-2 consonants, optional tone mark),
//! exactly one **vowel pattern** (explicit glyphs or an inferred hidden
//! vowel), and an optional **final** consonant base. Vowel patterns are
//! templates over `x` (foundation), `f` (final), and literal vowel glyphs —
//! `เx็f` matches เด็ก with ด as foundation and ก as final.
//!
//! ## Example Usage
//!
//! ```ignore
//! use thai_readings::Segmenter;
//!
//! let segmenter = Segmenter::new()?;
//!
//! // Full segmentation: every alternative reading
//! let domain = segmenter.segment("เลว");
//! assert_eq!(domain.len(), 3); // cluster, final, and glide readings
//!
//! // Vowel-only analysis
//! let vowels = segmenter.find_vowels("ยา");
//! assert_eq!(vowels[&1].best_candidate.pattern, "xา");
//! # Ok::<(), thai_readings::ConfigError>(())
//! ```
//!
//! ## Architecture
//!
//! - **Pattern Database** - consonant inventory, tagged vowel templates,
//!   initial/final cluster lists (embedded JSON, load-once, read-only)
//! - **Foundation Matcher** - builds consonant bases with tone ownership
//! - **Pattern Matcher** - enumerates template instantiations per position
//! - **Segmentation Explorer** - iterative backtracking over unused positions
//! - **Vowel Rules** - proximity-rule hidden vowels, dual-role glyphs,
//!   pluggable rule-stage pipeline
//! - **Reading Domain** - deduplicated readings in discovery order

pub mod data;
pub mod database;
pub mod explorer;
pub mod foundation;
pub mod matcher;
pub mod rules;
pub mod search;
pub mod types;

// Re-export main types and functions for convenience
pub use data::{DataInfo, DataLoader};
pub use database::{ClusterRole, PatternDatabase, PatternTemplate, TemplateToken};
pub use explorer::{Explorer, DEFAULT_STEP_LIMIT};
pub use foundation::match_foundation;
pub use matcher::PatternMatcher;
pub use rules::{RulePipeline, RuleStage, VowelValidator, PROXIMITY_THRESHOLD};
pub use search::{find_vowels, segment, Segmenter};
pub use types::{
    ConfigError, Evidence, Foundation, PositionSet, Reading, ReadingDomain, Syllable,
    VowelCandidate, VowelData, VowelType,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
