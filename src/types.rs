// Thai-Readings Type Definitions
// Core types for foundations, vowel candidates, syllables, and readings

use rustc_hash::FxHashSet;
use serde::Serialize;
use thiserror::Error;

/// Kind of vowel a candidate represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VowelType {
    /// Visible vowel glyphs matched against a pattern template
    Explicit,
    /// No written glyph; inferred from the proximity rule
    Hidden,
    /// A dual-role glyph (ว, ย, อ) read in its vowel role
    Ambiguous,
}

impl std::fmt::Display for VowelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VowelType::Explicit => write!(f, "explicit"),
            VowelType::Hidden => write!(f, "hidden"),
            VowelType::Ambiguous => write!(f, "ambiguous"),
        }
    }
}

/// Structured diagnostic record attached to a vowel candidate or a domain.
///
/// Each variant names the rule that produced it plus the parameters the rule
/// observed, so tests can assert on fields instead of message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Evidence {
    /// An explicit vowel glyph anchored the match
    ExplicitMark { glyph: char, position: usize },
    /// No vowel-bearing glyph within `threshold` of the consonant
    ProximityViolation {
        position: usize,
        nearest_vowel_distance: Option<usize>,
        threshold: usize,
    },
    /// A dual-role glyph was read in a vowel context
    AmbiguousContext { glyph: char, position: usize },
    /// A character outside the recognized alphabet was skipped
    SkippedChar { glyph: char, position: usize },
}

/// A foundation: 1-2 consonants plus an optional tone mark.
///
/// The tone mark, when present, is owned by one specific consonant of the
/// cluster (`tone_owner` indexes into `consonants`). `positions` holds every
/// absolute text index the foundation consumed, tone mark included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Foundation {
    pub consonants: Vec<char>,
    pub tone: Option<char>,
    pub tone_owner: Option<usize>,
    pub positions: Vec<usize>,
}

impl Foundation {
    /// Render the foundation with the tone mark after its owning consonant
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, c) in self.consonants.iter().enumerate() {
            out.push(*c);
            if let (Some(tone), Some(owner)) = (self.tone, self.tone_owner) {
                if owner == i {
                    out.push(tone);
                }
            }
        }
        out
    }

    /// The 2-glyph key checked against a cluster list; `None` for singles
    pub fn cluster_key(&self) -> Option<String> {
        if self.consonants.len() == 2 {
            Some(self.consonants.iter().collect())
        } else {
            None
        }
    }

    /// First absolute text position consumed
    pub fn start(&self) -> usize {
        self.positions[0]
    }
}

/// A concrete vowel match: one pattern instantiated at one place in the text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VowelCandidate {
    /// Template string, e.g. "เx็f" (or "HIDDEN_xf" for inferred vowels)
    pub pattern: String,

    /// Compact pattern id, e.g. "e_s_c"
    pub pattern_id: String,

    /// How the vowel was detected
    pub vowel_type: VowelType,

    /// Inclusive text span of the whole match
    pub start: usize,
    pub end: usize,

    /// Every absolute position the match consumed, ascending
    pub positions: Vec<usize>,

    /// Foundation matched for the pattern's `x`, if any
    pub foundation: Option<Foundation>,

    /// Final matched for the pattern's `f`, if any
    pub final_foundation: Option<Foundation>,

    /// Literal vowel glyphs in written order
    pub vowel_text: String,

    /// Why this candidate exists
    pub evidence: Vec<Evidence>,
}

impl VowelCandidate {
    /// Absolute position of the foundation's first consonant, if matched
    pub fn foundation_pos(&self) -> Option<usize> {
        self.foundation.as_ref().map(|f| f.start())
    }

    /// Absolute position of the final's first consonant, if matched
    pub fn final_pos(&self) -> Option<usize> {
        self.final_foundation.as_ref().map(|f| f.start())
    }
}

/// One segmented syllable: foundation + exactly one vowel + optional final
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Syllable {
    pub foundation: Foundation,
    pub vowel: VowelCandidate,
    pub final_foundation: Option<Foundation>,
    pub pattern_id: String,
    pub positions: Vec<usize>,
}

impl Syllable {
    /// Build a syllable from a candidate that matched a foundation.
    ///
    /// Returns `None` for foundation-less candidates, which cannot stand as
    /// syllables on their own.
    pub fn from_candidate(candidate: &VowelCandidate) -> Option<Self> {
        let foundation = candidate.foundation.clone()?;
        Some(Self {
            foundation,
            final_foundation: candidate.final_foundation.clone(),
            pattern_id: candidate.pattern_id.clone(),
            positions: candidate.positions.clone(),
            vowel: candidate.clone(),
        })
    }

    /// Canonical rendering: foundation, vowel literals in parentheses, final.
    ///
    /// The parentheses keep structurally different matches distinct even when
    /// they cover the same glyphs (ว as final vs. ว inside the vowel).
    pub fn render(&self) -> String {
        let mut out = self.foundation.render();
        out.push('(');
        out.push_str(&self.vowel.vowel_text);
        out.push(')');
        if let Some(fin) = &self.final_foundation {
            out.push_str(&fin.render());
        }
        out
    }

    /// Spoken-order components: foundation, then vowel, then final
    pub fn reading_order(&self) -> Vec<String> {
        let mut order = vec![self.foundation.render()];
        if !self.vowel.vowel_text.is_empty() {
            order.push(self.vowel.vowel_text.clone());
        }
        if let Some(fin) = &self.final_foundation {
            order.push(fin.render());
        }
        order
    }
}

/// One complete non-overlapping segmentation of the input text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub syllables: Vec<Syllable>,

    /// Canonical form used for deduplication and display
    pub rendered: String,

    /// Union of all syllable positions, ascending
    pub positions: Vec<usize>,
}

impl Reading {
    pub fn new(syllables: Vec<Syllable>) -> Self {
        let rendered = syllables
            .iter()
            .map(Syllable::render)
            .collect::<Vec<_>>()
            .join("|");
        let mut positions: Vec<usize> = syllables
            .iter()
            .flat_map(|s| s.positions.iter().copied())
            .collect();
        positions.sort_unstable();
        Self {
            syllables,
            rendered,
            positions,
        }
    }

    /// Reconstruct the covered text from the original input
    pub fn matched_text(&self, text: &[char]) -> String {
        self.positions.iter().map(|&i| text[i]).collect()
    }
}

/// The deduplicated set of all readings discovered for one input.
///
/// Acts as the aggregator: completed readings are inserted as the explorer
/// finds them, exact duplicates (by canonical rendered form) are discarded,
/// and first-discovered order is preserved.
#[derive(Debug, Clone, Serialize)]
pub struct ReadingDomain {
    pub text: String,
    readings: Vec<Reading>,

    /// Skip records for characters outside the recognized alphabet
    pub skipped: Vec<Evidence>,

    /// Set when the exploration budget ran out before the search finished
    pub truncated: bool,

    #[serde(skip)]
    seen: FxHashSet<String>,
}

impl ReadingDomain {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            readings: Vec::new(),
            skipped: Vec::new(),
            truncated: false,
            seen: FxHashSet::default(),
        }
    }

    /// Insert a completed reading; returns false for duplicates
    pub fn insert(&mut self, reading: Reading) -> bool {
        if self.seen.contains(&reading.rendered) {
            return false;
        }
        self.seen.insert(reading.rendered.clone());
        self.readings.push(reading);
        true
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Number of distinct interpretations — the ambiguity signal
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.readings.len() > 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reading> {
        self.readings.iter()
    }
}

/// All interpretations grouped at one vowel position (vowel-only mode)
#[derive(Debug, Clone, Serialize)]
pub struct VowelData {
    /// 1-based vowel index, left to right
    pub vowel_number: usize,

    /// Every interpretation overlapping this span
    pub candidates: Vec<VowelCandidate>,

    /// First-listed interpretation; rule-evaluation order, not a ranking
    pub best_candidate: VowelCandidate,

    /// Overall inclusive span of the group
    pub text_span: (usize, usize),
}

/// Tracks which text positions the current search branch has consumed
#[derive(Debug, Clone)]
pub struct PositionSet {
    slots: Vec<bool>,
    used: usize,
}

impl PositionSet {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![false; len],
            used: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_used(&self, pos: usize) -> bool {
        pos >= self.slots.len() || self.slots[pos]
    }

    /// True once every position is consumed
    pub fn is_full(&self) -> bool {
        self.used == self.slots.len()
    }

    pub fn mark(&mut self, positions: &[usize]) {
        for &p in positions {
            debug_assert!(!self.slots[p], "position {} marked twice", p);
            self.slots[p] = true;
            self.used += 1;
        }
    }

    pub fn unmark(&mut self, positions: &[usize]) {
        for &p in positions {
            debug_assert!(self.slots[p], "position {} unmarked twice", p);
            self.slots[p] = false;
            self.used -= 1;
        }
    }

    /// Lowest position not yet consumed, if any
    pub fn lowest_unused(&self) -> Option<usize> {
        self.slots.iter().position(|used| !used)
    }

    /// True if every position in the slice is in bounds and unused
    pub fn all_free(&self, positions: &[usize]) -> bool {
        positions
            .iter()
            .all(|&p| p < self.slots.len() && !self.slots[p])
    }
}

/// Pattern database load errors. Fatal: a database that fails to load is
/// never partially usable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid pattern record '{pattern}': {reason}")]
    MalformedPattern { pattern: String, reason: String },

    #[error("pattern record '{pattern}' appears more than once")]
    DuplicateTemplate { pattern: String },

    #[error("invalid {role} cluster entry '{entry}': must be exactly two consonants")]
    MalformedCluster { entry: String, role: &'static str },

    #[error("invalid consonant inventory entry '{entry}': {reason}")]
    MalformedInventory { entry: String, reason: String },

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foundation(consonants: &[char], positions: &[usize]) -> Foundation {
        Foundation {
            consonants: consonants.to_vec(),
            tone: None,
            tone_owner: None,
            positions: positions.to_vec(),
        }
    }

    #[test]
    fn test_vowel_type_display() {
        assert_eq!(VowelType::Explicit.to_string(), "explicit");
        assert_eq!(VowelType::Hidden.to_string(), "hidden");
        assert_eq!(VowelType::Ambiguous.to_string(), "ambiguous");
    }

    #[test]
    fn test_foundation_render_with_tone() {
        let f = Foundation {
            consonants: vec!['อ', 'ย'],
            tone: Some('่'),
            tone_owner: Some(1),
            positions: vec![0, 1, 2],
        };
        assert_eq!(f.render(), "อย่");
        assert_eq!(f.cluster_key(), Some("อย".to_string()));
    }

    #[test]
    fn test_foundation_single_has_no_cluster_key() {
        let f = foundation(&['ย'], &[0]);
        assert_eq!(f.cluster_key(), None);
        assert_eq!(f.render(), "ย");
    }

    #[test]
    fn test_position_set_mark_unmark() {
        let mut set = PositionSet::new(4);
        assert_eq!(set.lowest_unused(), Some(0));

        set.mark(&[0, 1]);
        assert!(set.is_used(0));
        assert_eq!(set.lowest_unused(), Some(2));
        assert!(!set.is_full());

        set.mark(&[2, 3]);
        assert!(set.is_full());

        set.unmark(&[2, 3]);
        assert_eq!(set.lowest_unused(), Some(2));
    }

    #[test]
    fn test_position_set_all_free() {
        let mut set = PositionSet::new(3);
        set.mark(&[1]);
        assert!(set.all_free(&[0, 2]));
        assert!(!set.all_free(&[0, 1]));
        assert!(!set.all_free(&[0, 3])); // out of bounds
    }

    #[test]
    fn test_reading_dedup_by_rendered_form() {
        let f = foundation(&['ย'], &[0]);
        let candidate = VowelCandidate {
            pattern: "xา".to_string(),
            pattern_id: "a_l_o".to_string(),
            vowel_type: VowelType::Explicit,
            start: 0,
            end: 1,
            positions: vec![0, 1],
            foundation: Some(f),
            final_foundation: None,
            vowel_text: "า".to_string(),
            evidence: vec![],
        };
        let syllable = Syllable::from_candidate(&candidate).unwrap();
        let reading = Reading::new(vec![syllable]);
        assert_eq!(reading.rendered, "ย(า)");

        let mut domain = ReadingDomain::new("ยา");
        assert!(domain.insert(reading.clone()));
        assert!(!domain.insert(reading));
        assert_eq!(domain.len(), 1);
        assert!(!domain.is_ambiguous());
    }

    #[test]
    fn test_syllable_reading_order() {
        let candidate = VowelCandidate {
            pattern: "เxf".to_string(),
            pattern_id: "e_l_c".to_string(),
            vowel_type: VowelType::Explicit,
            start: 0,
            end: 2,
            positions: vec![0, 1, 2],
            foundation: Some(foundation(&['ล'], &[1])),
            final_foundation: Some(foundation(&['ว'], &[2])),
            vowel_text: "เ".to_string(),
            evidence: vec![],
        };
        let syllable = Syllable::from_candidate(&candidate).unwrap();
        assert_eq!(syllable.reading_order(), vec!["ล", "เ", "ว"]);
        assert_eq!(syllable.render(), "ล(เ)ว");
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::MalformedCluster {
            entry: "กรล".to_string(),
            role: "initial",
        };
        assert!(err.to_string().contains("กรล"));
        assert!(err.to_string().contains("initial"));
    }
}
