// Thai-Readings Explicit Pattern Matcher
// Enumerates every instantiation of a vowel template at a text position

use crate::database::{ClusterRole, PatternDatabase, PatternTemplate, TemplateToken};
use crate::foundation::{foundation_end, match_foundation};
use crate::types::{Evidence, Foundation, PositionSet, VowelCandidate, VowelType};

/// Matches vowel templates against text, trying every foundation and final
/// cluster width and validating clusters against the role-specific lists.
pub struct PatternMatcher<'a> {
    db: &'a PatternDatabase,
}

impl<'a> PatternMatcher<'a> {
    pub fn new(db: &'a PatternDatabase) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &PatternDatabase {
        self.db
    }

    /// Find all instantiations of `template` whose first written glyph sits
    /// at `start`.
    ///
    /// For templates opening with pre-positioned vowels (เ, แ, โ, ใ, ไ) the
    /// foundation lands after those literals; this is how glyphs written
    /// before the foundation but spoken after it are covered.
    ///
    /// Tries foundation cluster sizes 1-2 and, when the template has a final
    /// placeholder, final cluster sizes 1-2. A combination fails outright on
    /// any literal mismatch, out-of-bounds access, or collision with an
    /// already-consumed position; there is no partial credit.
    pub fn find_matches(
        &self,
        text: &[char],
        start: usize,
        template: &PatternTemplate,
        used: &PositionSet,
    ) -> Vec<VowelCandidate> {
        let mut matches = Vec::new();

        for foundation_size in 1..=2 {
            if template.has_final {
                for final_size in 1..=2 {
                    if let Some(candidate) = self.try_combination(
                        text,
                        start,
                        template,
                        used,
                        foundation_size,
                        Some(final_size),
                    ) {
                        matches.push(candidate);
                    }
                }
            } else if let Some(candidate) =
                self.try_combination(text, start, template, used, foundation_size, None)
            {
                matches.push(candidate);
            }
        }

        matches
    }

    /// Find matches of every template in the database anchored at `start`
    pub fn find_all_matches(
        &self,
        text: &[char],
        start: usize,
        used: &PositionSet,
    ) -> Vec<VowelCandidate> {
        let mut matches = Vec::new();
        for template in self.db.templates() {
            matches.extend(self.find_matches(text, start, template, used));
        }
        matches
    }

    /// Try one specific (foundation size, final size) combination
    fn try_combination(
        &self,
        text: &[char],
        start: usize,
        template: &PatternTemplate,
        used: &PositionSet,
        foundation_size: usize,
        final_size: Option<usize>,
    ) -> Option<VowelCandidate> {
        let mut idx = start;
        let mut positions: Vec<usize> = Vec::new();
        let mut foundation: Option<Foundation> = None;
        let mut final_foundation: Option<Foundation> = None;
        let mut vowel_text = String::new();
        let mut evidence: Vec<Evidence> = Vec::new();

        for token in &template.tokens {
            match token {
                TemplateToken::Foundation => {
                    let f = match_foundation(text, idx, foundation_size, self.db)?;
                    idx = foundation_end(&f);
                    positions.extend_from_slice(&f.positions);
                    foundation = Some(f);
                }
                TemplateToken::Final => {
                    let f = match_foundation(text, idx, final_size?, self.db)?;
                    idx = foundation_end(&f);
                    positions.extend_from_slice(&f.positions);
                    final_foundation = Some(f);
                }
                TemplateToken::Literal(glyph) => {
                    if *text.get(idx)? != *glyph {
                        return None;
                    }
                    if evidence.is_empty() {
                        evidence.push(Evidence::ExplicitMark {
                            glyph: *glyph,
                            position: idx,
                        });
                    }
                    vowel_text.push(*glyph);
                    positions.push(idx);
                    idx += 1;
                }
            }
        }

        if !used.all_free(&positions) {
            return None;
        }

        // Two-consonant bases must appear in the list for their role
        let foundation = foundation?;
        if let Some(key) = foundation.cluster_key() {
            if !self.db.is_valid_cluster(&key, ClusterRole::Initial) {
                return None;
            }
        }
        if let Some(fin) = &final_foundation {
            if let Some(key) = fin.cluster_key() {
                if !self.db.is_valid_cluster(&key, ClusterRole::Final) {
                    return None;
                }
            }
        }

        Some(VowelCandidate {
            pattern: template.pattern.clone(),
            pattern_id: template.abbrev_id.clone(),
            vowel_type: VowelType::Explicit,
            start,
            end: idx - 1,
            positions,
            foundation: Some(foundation),
            final_foundation,
            vowel_text,
            evidence,
        })
    }
}
