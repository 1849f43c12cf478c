// Thai-Readings Vowel Rules
// Proximity-based hidden vowel inference, dual-role glyph handling, and the
// pluggable rule-stage pipeline behind the vowel-only entry point

use crate::database::PatternDatabase;
use crate::foundation::{foundation_end, match_foundation};
use crate::matcher::PatternMatcher;
use crate::types::{Evidence, PositionSet, VowelCandidate, VowelData, VowelType};

/// Maximum distance (inclusive) at which a vowel-bearing glyph satisfies a
/// consonant. A consonant with no vowel glyph within this window carries a
/// hidden vowel.
pub const PROXIMITY_THRESHOLD: usize = 2;

/// Pattern id assigned to inferred vowels: the default short 'o' sound
pub const HIDDEN_PATTERN_ID: &str = "o_s_c";

/// Validates vowel coverage: infers hidden vowels from the proximity rule
/// and proposes vowel-role readings for the dual-role glyphs.
pub struct VowelValidator<'a> {
    db: &'a PatternDatabase,
}

impl<'a> VowelValidator<'a> {
    pub fn new(db: &'a PatternDatabase) -> Self {
        Self { db }
    }

    /// Distance from `pos` to the nearest vowel-bearing glyph, if any
    pub fn nearest_vowel_distance(&self, text: &[char], pos: usize) -> Option<usize> {
        text.iter()
            .enumerate()
            .filter(|(i, c)| *i != pos && self.db.is_vowel_mark(**c))
            .map(|(i, _)| pos.abs_diff(i))
            .min()
    }

    /// Proximity-rule check for the consonant at `pos`. Returns the
    /// violation record when no vowel glyph sits within the window.
    pub fn check_proximity(&self, text: &[char], pos: usize) -> Option<Evidence> {
        if !self.db.is_consonant(text[pos]) {
            return None;
        }
        let nearest = self.nearest_vowel_distance(text, pos);
        match nearest {
            Some(d) if d <= PROXIMITY_THRESHOLD => None,
            _ => Some(Evidence::ProximityViolation {
                position: pos,
                nearest_vowel_distance: nearest,
                threshold: PROXIMITY_THRESHOLD,
            }),
        }
    }

    /// Hidden-vowel alternatives for the explorer, anchored at `p`.
    ///
    /// Only produced when the proximity rule is violated at `p`. The open
    /// variant consumes just the foundation; when the next glyph is a free
    /// consonant a closed variant with that glyph as final is offered too,
    /// and the explorer branches on both.
    pub fn hidden_candidates(
        &self,
        text: &[char],
        p: usize,
        used: &PositionSet,
    ) -> Vec<VowelCandidate> {
        let Some(violation) = self.check_proximity(text, p) else {
            return Vec::new();
        };
        let Some(foundation) = match_foundation(text, p, 1, self.db) else {
            return Vec::new();
        };
        if !used.all_free(&foundation.positions) {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        let after = foundation_end(&foundation);

        candidates.push(VowelCandidate {
            pattern: "HIDDEN_x".to_string(),
            pattern_id: HIDDEN_PATTERN_ID.to_string(),
            vowel_type: VowelType::Hidden,
            start: p,
            end: after - 1,
            positions: foundation.positions.clone(),
            foundation: Some(foundation.clone()),
            final_foundation: None,
            vowel_text: String::new(),
            evidence: vec![violation.clone()],
        });

        if after < text.len() && self.db.is_consonant(text[after]) {
            if let Some(fin) = match_foundation(text, after, 1, self.db) {
                let mut positions = foundation.positions.clone();
                positions.extend_from_slice(&fin.positions);
                if used.all_free(&positions) {
                    candidates.push(VowelCandidate {
                        pattern: "HIDDEN_xf".to_string(),
                        pattern_id: HIDDEN_PATTERN_ID.to_string(),
                        vowel_type: VowelType::Hidden,
                        start: p,
                        end: positions[positions.len() - 1],
                        positions,
                        foundation: Some(foundation),
                        final_foundation: Some(fin),
                        vowel_text: String::new(),
                        evidence: vec![violation],
                    });
                }
            }
        }

        candidates
    }

    /// Dual-role glyph alternatives for the explorer, anchored at `p`.
    ///
    /// The attested synthesized role is the ว glide: a consonant at `p`
    /// followed by ว reads as foundation + glide vowel. The consonant,
    /// final, and vowel-literal roles of ว/ย/อ are already enumerated by
    /// the explicit templates.
    pub fn ambiguous_candidates(
        &self,
        text: &[char],
        p: usize,
        used: &PositionSet,
    ) -> Vec<VowelCandidate> {
        let mut candidates = Vec::new();

        if !self.db.is_consonant(text[p]) {
            return candidates;
        }
        let Some(foundation) = match_foundation(text, p, 1, self.db) else {
            return candidates;
        };
        let glide_pos = foundation_end(&foundation);
        if glide_pos >= text.len() || text[glide_pos] != 'ว' {
            return candidates;
        }

        let mut positions = foundation.positions.clone();
        positions.push(glide_pos);
        if !used.all_free(&positions) {
            return candidates;
        }

        candidates.push(VowelCandidate {
            pattern: "xว".to_string(),
            pattern_id: "ua_s_o_wg".to_string(),
            vowel_type: VowelType::Ambiguous,
            start: p,
            end: glide_pos,
            positions,
            foundation: Some(foundation),
            final_foundation: None,
            vowel_text: "ว".to_string(),
            evidence: vec![Evidence::AmbiguousContext {
                glyph: 'ว',
                position: glide_pos,
            }],
        });

        candidates
    }

    /// Standalone hidden-vowel observation at `pos` (vowel-only mode).
    ///
    /// Reports the violation itself: the candidate sits on the consonant and
    /// consumes nothing else, its pattern naming whether a final consonant
    /// follows.
    pub fn hidden_observation(&self, text: &[char], pos: usize) -> Option<VowelCandidate> {
        let violation = self.check_proximity(text, pos)?;
        let closed = pos + 1 < text.len() && self.db.is_consonant(text[pos + 1]);
        Some(VowelCandidate {
            pattern: if closed { "HIDDEN_xf" } else { "HIDDEN_x" }.to_string(),
            pattern_id: HIDDEN_PATTERN_ID.to_string(),
            vowel_type: VowelType::Hidden,
            start: pos,
            end: pos,
            positions: vec![pos],
            foundation: match_foundation(text, pos, 1, self.db),
            final_foundation: None,
            vowel_text: String::new(),
            evidence: vec![violation],
        })
    }
}

/// One stage of the vowel-detection pipeline. Detection stages append to the
/// incoming candidate list; post stages filter or reorder it.
pub trait RuleStage {
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        text: &[char],
        db: &PatternDatabase,
        candidates: Vec<VowelCandidate>,
    ) -> Vec<VowelCandidate>;
}

/// Detect explicit vowel patterns at every anchor position
pub struct ExplicitVowelRule;

impl RuleStage for ExplicitVowelRule {
    fn name(&self) -> &'static str {
        "explicit_vowel_detection"
    }

    fn apply(
        &self,
        text: &[char],
        db: &PatternDatabase,
        mut candidates: Vec<VowelCandidate>,
    ) -> Vec<VowelCandidate> {
        let matcher = PatternMatcher::new(db);
        let empty = PositionSet::new(text.len());
        for anchor in 0..text.len() {
            candidates.extend(matcher.find_all_matches(text, anchor, &empty));
        }
        candidates
    }
}

/// Detect hidden vowels via the proximity rule
pub struct HiddenVowelRule;

impl RuleStage for HiddenVowelRule {
    fn name(&self) -> &'static str {
        "hidden_vowel_proximity"
    }

    fn apply(
        &self,
        text: &[char],
        db: &PatternDatabase,
        mut candidates: Vec<VowelCandidate>,
    ) -> Vec<VowelCandidate> {
        let validator = VowelValidator::new(db);
        for pos in 0..text.len() {
            if let Some(candidate) = validator.hidden_observation(text, pos) {
                candidates.push(candidate);
            }
        }
        candidates
    }
}

/// Detect vowel-role readings of the dual-role glyphs
pub struct AmbiguousGlyphRule;

impl RuleStage for AmbiguousGlyphRule {
    fn name(&self) -> &'static str {
        "ambiguous_character_resolution"
    }

    fn apply(
        &self,
        text: &[char],
        db: &PatternDatabase,
        mut candidates: Vec<VowelCandidate>,
    ) -> Vec<VowelCandidate> {
        let validator = VowelValidator::new(db);
        let empty = PositionSet::new(text.len());
        for pos in 0..text.len() {
            candidates.extend(validator.ambiguous_candidates(text, pos, &empty));
        }
        candidates
    }
}

/// Order candidates by start position (post stage)
pub struct SortCandidatesRule;

impl RuleStage for SortCandidatesRule {
    fn name(&self) -> &'static str {
        "sort_by_start"
    }

    fn apply(
        &self,
        _text: &[char],
        _db: &PatternDatabase,
        mut candidates: Vec<VowelCandidate>,
    ) -> Vec<VowelCandidate> {
        candidates.sort_by_key(|c| (c.start, c.end));
        candidates
    }
}

/// Ordered pipeline of rule stages. The stage sequence is configuration:
/// `standard()` registers the default rules, and callers may append their
/// own stages to any group.
pub struct RulePipeline {
    pre: Vec<Box<dyn RuleStage>>,
    detect: Vec<Box<dyn RuleStage>>,
    post: Vec<Box<dyn RuleStage>>,
}

impl RulePipeline {
    pub fn empty() -> Self {
        Self {
            pre: Vec::new(),
            detect: Vec::new(),
            post: Vec::new(),
        }
    }

    /// The default rule registration: explicit, hidden, ambiguous detection,
    /// then ordering
    pub fn standard() -> Self {
        let mut pipeline = Self::empty();
        pipeline.add_detect_rule(Box::new(ExplicitVowelRule));
        pipeline.add_detect_rule(Box::new(HiddenVowelRule));
        pipeline.add_detect_rule(Box::new(AmbiguousGlyphRule));
        pipeline.add_post_rule(Box::new(SortCandidatesRule));
        pipeline
    }

    pub fn add_pre_rule(&mut self, rule: Box<dyn RuleStage>) {
        self.pre.push(rule);
    }

    pub fn add_detect_rule(&mut self, rule: Box<dyn RuleStage>) {
        self.detect.push(rule);
    }

    pub fn add_post_rule(&mut self, rule: Box<dyn RuleStage>) {
        self.post.push(rule);
    }

    /// Run every stage in group order and return the surviving candidates
    pub fn run(&self, text: &[char], db: &PatternDatabase) -> Vec<VowelCandidate> {
        let mut candidates = Vec::new();
        for stage in self.pre.iter().chain(&self.detect).chain(&self.post) {
            candidates = stage.apply(text, db, candidates);
        }
        candidates
    }
}

/// Group span-overlapping candidates into numbered vowel positions.
///
/// Candidates must already be sorted by start. Within a group the first
/// candidate stands as `best_candidate` — rule-evaluation order, not a
/// linguistic preference.
pub fn group_by_span(candidates: Vec<VowelCandidate>) -> Vec<VowelData> {
    let mut groups: Vec<VowelData> = Vec::new();

    for candidate in candidates {
        let span = (candidate.start, candidate.end);

        let joins_last = groups
            .last()
            .map_or(false, |g| spans_overlap(g.text_span, span));
        if joins_last {
            if let Some(group) = groups.last_mut() {
                group.text_span = (
                    group.text_span.0.min(span.0),
                    group.text_span.1.max(span.1),
                );
                group.candidates.push(candidate);
            }
        } else {
            groups.push(VowelData {
                vowel_number: groups.len() + 1,
                best_candidate: candidate.clone(),
                candidates: vec![candidate],
                text_span: span,
            });
        }
    }

    groups
}

fn spans_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    !(a.1 < b.0 || b.1 < a.0)
}
