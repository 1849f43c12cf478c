// Thai-Readings Segmenter
// Main API that orchestrates all components

use crate::database::PatternDatabase;
use crate::explorer::{Explorer, DEFAULT_STEP_LIMIT};
use crate::rules::{group_by_span, RulePipeline};
use crate::types::{ConfigError, Evidence, PositionSet, ReadingDomain, VowelData};
use std::collections::BTreeMap;

/// Main segmentation engine
///
/// Owns the pattern database and wires the components together:
/// - Explicit pattern matching (templates × cluster sizes)
/// - Backtracking exploration of every non-overlapping segmentation
/// - Hidden/ambiguous vowel rules
/// - Reading aggregation with deduplication
pub struct Segmenter {
    /// Load-once linguistic database
    db: PatternDatabase,

    /// Exploration budget passed to the explorer
    step_limit: u64,
}

impl Segmenter {
    /// Create a segmenter with the embedded default database
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self::with_database(PatternDatabase::load_default()?))
    }

    /// Create a segmenter around a caller-built database
    pub fn with_database(db: PatternDatabase) -> Self {
        Self {
            db,
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }

    /// Override the exploration budget
    pub fn with_step_limit(mut self, step_limit: u64) -> Self {
        self.step_limit = step_limit;
        self
    }

    pub fn database(&self) -> &PatternDatabase {
        &self.db
    }

    /// Segment `text` into its full reading domain.
    ///
    /// Characters outside the recognized alphabet are skipped with a
    /// structured evidence record rather than aborting; coverage is then
    /// computed over the remaining positions. A text no branch can cover
    /// yields an empty domain — valid data, not an error.
    pub fn segment(&self, text: &str) -> ReadingDomain {
        segment_with_limit(text, &self.db, self.step_limit)
    }

    /// Vowel-only analysis: every vowel position with all its candidate
    /// interpretations, keyed by 1-based vowel number
    pub fn find_vowels(&self, text: &str) -> BTreeMap<usize, VowelData> {
        find_vowels(text, &self.db)
    }

    /// Get (template count, consonant count) for the loaded database
    pub fn stats(&self) -> (usize, usize) {
        (self.db.template_count(), self.db.consonant_count())
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new().expect("Failed to create default Segmenter")
    }
}

/// Segment `text` against `db`, returning the deduplicated reading domain
pub fn segment(text: &str, db: &PatternDatabase) -> ReadingDomain {
    segment_with_limit(text, db, DEFAULT_STEP_LIMIT)
}

fn segment_with_limit(text: &str, db: &PatternDatabase, step_limit: u64) -> ReadingDomain {
    let chars: Vec<char> = text.chars().collect();
    let mut domain = ReadingDomain::new(text);
    let mut used = PositionSet::new(chars.len());

    for (i, &c) in chars.iter().enumerate() {
        if !db.is_recognized(c) {
            domain.skipped.push(Evidence::SkippedChar {
                glyph: c,
                position: i,
            });
            used.mark(&[i]);
        }
    }

    Explorer::with_step_limit(db, step_limit).explore(&chars, &mut used, &mut domain);
    domain
}

/// Find every vowel position in `text` without segmenting it.
///
/// Runs the standard rule pipeline (explicit, hidden, ambiguous detection)
/// and groups overlapping candidates into numbered vowel positions.
pub fn find_vowels(text: &str, db: &PatternDatabase) -> BTreeMap<usize, VowelData> {
    let chars: Vec<char> = text.chars().collect();
    let pipeline = RulePipeline::standard();
    let candidates = pipeline.run(&chars, db);

    group_by_span(candidates)
        .into_iter()
        .map(|data| (data.vowel_number, data))
        .collect()
}
