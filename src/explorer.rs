// Thai-Readings Segmentation Explorer
// Depth-first backtracking over unused text positions, driven by an explicit
// frame stack rather than native recursion

use crate::database::PatternDatabase;
use crate::matcher::PatternMatcher;
use crate::rules::VowelValidator;
use crate::types::{PositionSet, Reading, ReadingDomain, Syllable};

/// Default exploration budget. Generous for real words; a ceiling against
/// combinatorial blow-up on long, highly ambiguous input.
pub const DEFAULT_STEP_LIMIT: u64 = 500_000;

/// One level of the depth-first search: the alternatives generated at the
/// lowest unused position when the level was entered, and a cursor over them
struct Frame {
    candidates: Vec<Syllable>,
    next: usize,
}

/// Backtracking explorer producing every non-overlapping segmentation.
///
/// At each level the lowest unused position anchors all alternatives: any
/// match covering that position but starting earlier would collide with an
/// already-consumed glyph, so anchoring the written start there is
/// exhaustive. Branches are, in order: explicit template matches, hidden
/// vowels from the proximity rule, and vowel-role readings of the dual-role
/// glyphs.
pub struct Explorer<'a> {
    matcher: PatternMatcher<'a>,
    validator: VowelValidator<'a>,
    step_limit: u64,
}

impl<'a> Explorer<'a> {
    pub fn new(db: &'a PatternDatabase) -> Self {
        Self::with_step_limit(db, DEFAULT_STEP_LIMIT)
    }

    pub fn with_step_limit(db: &'a PatternDatabase, step_limit: u64) -> Self {
        Self {
            matcher: PatternMatcher::new(db),
            validator: VowelValidator::new(db),
            step_limit,
        }
    }

    /// Explore every segmentation of `text`, submitting complete readings to
    /// `domain`. Positions pre-marked in `used` (skipped characters) are
    /// excluded from coverage. `used` is restored before returning.
    pub fn explore(&self, text: &[char], used: &mut PositionSet, domain: &mut ReadingDomain) {
        if used.is_full() {
            return;
        }

        let mut steps: u64 = 0;
        let mut current: Vec<Syllable> = Vec::new();
        let mut frames = vec![Frame {
            candidates: self.candidates_at(text, used),
            next: 0,
        }];

        while !frames.is_empty() {
            steps += 1;
            if steps > self.step_limit {
                domain.truncated = true;
                break;
            }

            let choice = {
                let frame = frames.last_mut().expect("frame stack non-empty");
                if frame.next < frame.candidates.len() {
                    let syllable = frame.candidates[frame.next].clone();
                    frame.next += 1;
                    Some(syllable)
                } else {
                    None
                }
            };

            match choice {
                Some(syllable) => {
                    used.mark(&syllable.positions);
                    current.push(syllable);

                    if used.is_full() {
                        domain.insert(Reading::new(current.clone()));
                        let done = current.pop().expect("reading stack in sync");
                        used.unmark(&done.positions);
                    } else {
                        frames.push(Frame {
                            candidates: self.candidates_at(text, used),
                            next: 0,
                        });
                    }
                }
                None => {
                    // Level exhausted: undo the choice that opened it
                    frames.pop();
                    if !frames.is_empty() {
                        let done = current.pop().expect("reading stack in sync");
                        used.unmark(&done.positions);
                    }
                }
            }
        }

        // Only a budget break leaves marks behind
        while let Some(done) = current.pop() {
            used.unmark(&done.positions);
        }
    }

    /// All syllable alternatives anchored at the lowest unused position.
    ///
    /// An empty result dead-ends the branch; that is a normal outcome, not
    /// an error.
    fn candidates_at(&self, text: &[char], used: &PositionSet) -> Vec<Syllable> {
        let p = match used.lowest_unused() {
            Some(p) => p,
            None => return Vec::new(),
        };

        let mut candidates = self.matcher.find_all_matches(text, p, used);
        candidates.extend(self.validator.hidden_candidates(text, p, used));
        candidates.extend(self.validator.ambiguous_candidates(text, p, used));

        candidates
            .iter()
            .filter_map(Syllable::from_candidate)
            .collect()
    }
}
