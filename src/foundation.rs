// Thai-Readings Foundation Matcher
// Builds foundation containers (consonants + optional tone mark) from text

use crate::database::PatternDatabase;
use crate::types::Foundation;

/// Match a foundation of exactly `cluster_size` consonants starting at
/// `start`, absorbing a tone mark written immediately after any of them.
///
/// `cluster_size` must be 1 or 2 — Thai has no 3-consonant clusters, and the
/// bound is a structural contract of the caller, not a property of the data.
///
/// The tone mark is recorded together with the index of the consonant it is
/// written after (its phonetic owner). Writing order allows the mark on a
/// non-terminal consonant of the cluster, so ownership is per-consonant
/// rather than fixed to the last one.
///
/// Returns `None` when any required slot is not a consonant or the text ends
/// early. Pure: no side effects, no allocation beyond the returned value.
/// Cluster-list validation is role-dependent and left to the caller.
pub fn match_foundation(
    text: &[char],
    start: usize,
    cluster_size: usize,
    db: &PatternDatabase,
) -> Option<Foundation> {
    assert!(
        (1..=2).contains(&cluster_size),
        "foundation cluster size must be 1 or 2, got {}",
        cluster_size
    );

    let mut foundation = Foundation {
        consonants: Vec::with_capacity(cluster_size),
        tone: None,
        tone_owner: None,
        positions: Vec::with_capacity(cluster_size + 1),
    };

    let mut idx = start;
    for slot in 0..cluster_size {
        let c = *text.get(idx)?;
        if !db.is_consonant(c) {
            return None;
        }
        foundation.consonants.push(c);
        foundation.positions.push(idx);
        idx += 1;

        // A tone mark directly after this consonant belongs to it
        if let Some(&next) = text.get(idx) {
            if db.is_tone_mark(next) {
                foundation.tone = Some(next);
                foundation.tone_owner = Some(slot);
                foundation.positions.push(idx);
                idx += 1;
            }
        }
    }

    Some(foundation)
}

/// Text position just past the foundation's last consumed glyph
pub fn foundation_end(foundation: &Foundation) -> usize {
    foundation.positions[foundation.positions.len() - 1] + 1
}
