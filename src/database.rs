// Thai-Readings Pattern Database
// Loads and indexes the consonant inventory, vowel templates, and cluster lists

use crate::data::DataLoader;
use crate::types::ConfigError;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;

/// The four Thai tone marks (mai ek, mai tho, mai tri, mai chattawa)
pub const TONE_MARKS: [char; 4] = ['\u{0E48}', '\u{0E49}', '\u{0E4A}', '\u{0E4B}'];

/// Vowel-bearing glyphs recognized by the matcher and the proximity rule
pub const VOWEL_MARKS: [char; 16] = [
    'ะ', 'ั', 'า', 'ำ', 'ิ', 'ี', 'ึ', 'ื', 'ุ', 'ู', 'เ', 'แ', 'โ', 'ใ', 'ไ', '็',
];

/// Other marks in the recognized alphabet (thanthakhat). No template consumes
/// them, so text carrying one simply yields no full-coverage reading.
pub const SIGN_MARKS: [char; 1] = ['\u{0E4C}'];

/// Structural role a consonant pair plays in a syllable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterRole {
    Initial,
    Final,
}

impl ClusterRole {
    pub fn name(&self) -> &'static str {
        match self {
            ClusterRole::Initial => "initial",
            ClusterRole::Final => "final",
        }
    }
}

/// One element of a tokenized pattern template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateToken {
    /// `x` — the foundation position (variable cluster width)
    Foundation,
    /// `f` — the final-consonant position (variable cluster width)
    Final,
    /// A literal vowel glyph that must match exactly
    Literal(char),
}

/// An immutable vowel pattern template with its generated identifiers
#[derive(Debug, Clone)]
pub struct PatternTemplate {
    /// Raw template string, e.g. "เx็f"
    pub pattern: String,

    /// Tokenized form, written order
    pub tokens: Vec<TemplateToken>,

    /// Phonological tags (sound_*, length_*, vowel_*, glide_*)
    pub tags: Vec<String>,

    /// Compact id generated from the tags, e.g. "e_s_c"
    pub abbrev_id: String,

    /// Descriptive id generated from the tags, e.g. "e_short_closed"
    pub long_id: String,

    /// Provenance of the record
    pub source: String,

    /// Whether the template carries a final-consonant placeholder
    pub has_final: bool,

    /// Number of literal glyphs written before the foundation (เ, แ, โ, ใ, ไ)
    pub pre_literal_count: usize,
}

#[derive(Debug, Deserialize)]
struct PatternRecord {
    pattern: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    source: String,
}

#[derive(Debug, Deserialize)]
struct PatternFile {
    patterns: Vec<PatternRecord>,
}

#[derive(Debug, Deserialize)]
struct FoundationFile {
    foundation: Vec<String>,
    #[serde(default)]
    exceptions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ClusterFile {
    initial: Vec<String>,
    #[serde(rename = "final")]
    final_: Vec<String>,
}

/// Read-only linguistic database: consonant inventory, tagged vowel
/// templates, and the valid initial/final cluster lists.
///
/// Loaded once, never mutated; all queries take `&self`, so a single
/// instance can serve unsynchronized concurrent analyses.
#[derive(Debug, Clone)]
pub struct PatternDatabase {
    consonants: FxHashSet<char>,
    exceptions: FxHashSet<char>,
    vowel_marks: FxHashSet<char>,
    tone_marks: FxHashSet<char>,
    sign_marks: FxHashSet<char>,
    templates: Vec<PatternTemplate>,
    by_vowel_glyph: FxHashMap<char, Vec<usize>>,
    initial_clusters: FxHashSet<String>,
    final_clusters: FxHashSet<String>,
}

impl PatternDatabase {
    /// Load the embedded default database
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_json(
            DataLoader::vowel_patterns(),
            DataLoader::foundation(),
            DataLoader::clusters(),
        )
    }

    /// Load a database from caller-supplied JSON documents
    pub fn from_json(
        patterns_json: &str,
        foundation_json: &str,
        clusters_json: &str,
    ) -> Result<Self, ConfigError> {
        let foundation: FoundationFile =
            serde_json::from_str(foundation_json).map_err(|e| ConfigError::Parse {
                what: "consonant inventory",
                source: e,
            })?;
        let clusters: ClusterFile =
            serde_json::from_str(clusters_json).map_err(|e| ConfigError::Parse {
                what: "cluster lists",
                source: e,
            })?;
        let patterns: PatternFile =
            serde_json::from_str(patterns_json).map_err(|e| ConfigError::Parse {
                what: "vowel patterns",
                source: e,
            })?;

        let mut db = Self {
            consonants: FxHashSet::default(),
            exceptions: FxHashSet::default(),
            vowel_marks: VOWEL_MARKS.iter().copied().collect(),
            tone_marks: TONE_MARKS.iter().copied().collect(),
            sign_marks: SIGN_MARKS.iter().copied().collect(),
            templates: Vec::new(),
            by_vowel_glyph: FxHashMap::default(),
            initial_clusters: FxHashSet::default(),
            final_clusters: FxHashSet::default(),
        };

        db.load_inventory(foundation)?;
        db.load_clusters(clusters)?;
        db.load_templates(patterns)?;

        Ok(db)
    }

    fn load_inventory(&mut self, file: FoundationFile) -> Result<(), ConfigError> {
        for entry in &file.foundation {
            let mut chars = entry.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    self.consonants.insert(c);
                }
                _ => {
                    return Err(ConfigError::MalformedInventory {
                        entry: entry.clone(),
                        reason: "must be a single glyph".to_string(),
                    })
                }
            }
        }
        for entry in &file.exceptions {
            let mut chars = entry.chars();
            let glyph = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(ConfigError::MalformedInventory {
                        entry: entry.clone(),
                        reason: "must be a single glyph".to_string(),
                    })
                }
            };
            if !self.consonants.contains(&glyph) {
                return Err(ConfigError::MalformedInventory {
                    entry: entry.clone(),
                    reason: "exception glyph not in the consonant inventory".to_string(),
                });
            }
            self.exceptions.insert(glyph);
        }
        Ok(())
    }

    fn load_clusters(&mut self, file: ClusterFile) -> Result<(), ConfigError> {
        for (entries, role) in [
            (&file.initial, ClusterRole::Initial),
            (&file.final_, ClusterRole::Final),
        ] {
            for entry in entries {
                let chars: Vec<char> = entry.chars().collect();
                if chars.len() != 2 || !chars.iter().all(|c| self.consonants.contains(c)) {
                    return Err(ConfigError::MalformedCluster {
                        entry: entry.clone(),
                        role: role.name(),
                    });
                }
                match role {
                    ClusterRole::Initial => self.initial_clusters.insert(entry.clone()),
                    ClusterRole::Final => self.final_clusters.insert(entry.clone()),
                };
            }
        }
        Ok(())
    }

    fn load_templates(&mut self, file: PatternFile) -> Result<(), ConfigError> {
        let mut seen_patterns: FxHashSet<String> = FxHashSet::default();
        let mut abbrev_counts: FxHashMap<String, usize> = FxHashMap::default();
        let mut long_counts: FxHashMap<String, usize> = FxHashMap::default();

        for record in file.patterns {
            if !seen_patterns.insert(record.pattern.clone()) {
                return Err(ConfigError::DuplicateTemplate {
                    pattern: record.pattern,
                });
            }

            let tokens = self.tokenize(&record.pattern)?;
            let has_final = tokens.iter().any(|t| matches!(t, TemplateToken::Final));
            let pre_literal_count = tokens
                .iter()
                .take_while(|t| matches!(t, TemplateToken::Literal(_)))
                .count();

            let (abbrev_base, long_base) = generate_ids(&record.pattern, &record.tags);
            let abbrev_id = numbered(&mut abbrev_counts, abbrev_base);
            let long_id = numbered(&mut long_counts, long_base);

            let index = self.templates.len();
            for token in &tokens {
                if let TemplateToken::Literal(glyph) = token {
                    self.by_vowel_glyph.entry(*glyph).or_default().push(index);
                }
            }

            self.templates.push(PatternTemplate {
                pattern: record.pattern,
                tokens,
                tags: record.tags,
                abbrev_id,
                long_id,
                source: record.source,
                has_final,
                pre_literal_count,
            });
        }
        Ok(())
    }

    /// Tokenize and validate one template string.
    ///
    /// A well-formed template has exactly one foundation placeholder, at most
    /// one final placeholder (after the foundation), and literals drawn from
    /// the vowel marks or the exception glyphs.
    fn tokenize(&self, pattern: &str) -> Result<Vec<TemplateToken>, ConfigError> {
        let malformed = |reason: &str| ConfigError::MalformedPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if pattern.is_empty() {
            return Err(malformed("empty template"));
        }

        let mut tokens = Vec::new();
        let mut foundation_seen = false;
        let mut final_seen = false;

        for c in pattern.chars() {
            match c {
                'x' => {
                    if foundation_seen {
                        return Err(malformed("more than one foundation placeholder"));
                    }
                    foundation_seen = true;
                    tokens.push(TemplateToken::Foundation);
                }
                'f' => {
                    if final_seen {
                        return Err(malformed("more than one final placeholder"));
                    }
                    if !foundation_seen {
                        return Err(malformed("final placeholder before the foundation"));
                    }
                    final_seen = true;
                    tokens.push(TemplateToken::Final);
                }
                glyph => {
                    if !self.vowel_marks.contains(&glyph) && !self.exceptions.contains(&glyph) {
                        return Err(malformed("literal outside the vowel alphabet"));
                    }
                    tokens.push(TemplateToken::Literal(glyph));
                }
            }
        }

        if !foundation_seen {
            return Err(malformed("missing foundation placeholder"));
        }
        Ok(tokens)
    }

    // === Membership tests ===

    pub fn is_consonant(&self, c: char) -> bool {
        self.consonants.contains(&c)
    }

    /// Dual-role glyphs that may also act as vowel components (ว, ย, อ)
    pub fn is_exception(&self, c: char) -> bool {
        self.exceptions.contains(&c)
    }

    pub fn is_vowel_mark(&self, c: char) -> bool {
        self.vowel_marks.contains(&c)
    }

    pub fn is_tone_mark(&self, c: char) -> bool {
        self.tone_marks.contains(&c)
    }

    /// Whether a character belongs to the recognized input alphabet
    pub fn is_recognized(&self, c: char) -> bool {
        self.is_consonant(c)
            || self.is_vowel_mark(c)
            || self.is_tone_mark(c)
            || self.sign_marks.contains(&c)
    }

    /// Exact 2-glyph membership test against the list for the given role
    pub fn is_valid_cluster(&self, key: &str, role: ClusterRole) -> bool {
        match role {
            ClusterRole::Initial => self.initial_clusters.contains(key),
            ClusterRole::Final => self.final_clusters.contains(key),
        }
    }

    // === Template access ===

    pub fn templates(&self) -> &[PatternTemplate] {
        &self.templates
    }

    /// Templates containing a given vowel glyph as a literal
    pub fn templates_with_glyph(&self, glyph: char) -> impl Iterator<Item = &PatternTemplate> {
        self.by_vowel_glyph
            .get(&glyph)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&i| &self.templates[i])
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    pub fn consonant_count(&self) -> usize {
        self.consonants.len()
    }

    pub fn cluster_counts(&self) -> (usize, usize) {
        (self.initial_clusters.len(), self.final_clusters.len())
    }
}

/// Generate the (compact, descriptive) identifier pair from a template's
/// tags. Glides are taken from explicit tags or the trailing glyph.
fn generate_ids(pattern: &str, tags: &[String]) -> (String, String) {
    let component = |prefix: &str| {
        tags.iter()
            .find(|t| t.starts_with(prefix))
            .map(|t| t[prefix.len()..].to_string())
            .unwrap_or_else(|| "X".to_string())
    };

    let sound = component("sound_");
    let length = component("length_");
    let openness = component("vowel_");

    let has_jglide = tags.iter().any(|t| t == "glide_j") || pattern.ends_with('ย');
    let has_wglide = tags.iter().any(|t| t == "glide_w") || pattern.ends_with('ว');

    let initial = |s: &str| {
        if s == "X" {
            "X".to_string()
        } else {
            s.chars().take(1).collect()
        }
    };

    let mut abbrev_parts = vec![sound.clone(), initial(&length), initial(&openness)];
    let mut long_parts = vec![sound, length, openness];

    if has_jglide {
        abbrev_parts.push("jg".to_string());
        long_parts.push("jglide".to_string());
    } else if has_wglide {
        abbrev_parts.push("wg".to_string());
        long_parts.push("wglide".to_string());
    }

    (abbrev_parts.join("_"), long_parts.join("_"))
}

/// Apply deterministic `_2`, `_3`… numbering to tag-identical base ids
fn numbered(counts: &mut FxHashMap<String, usize>, base: String) -> String {
    let count = counts.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count > 1 {
        format!("{}_{}", base, count)
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_db() -> PatternDatabase {
        PatternDatabase::load_default().unwrap()
    }

    #[test]
    fn test_default_database_loads() {
        let db = default_db();
        assert_eq!(db.consonant_count(), 44);
        assert!(db.template_count() > 40);
    }

    #[test]
    fn test_consonant_membership() {
        let db = default_db();
        assert!(db.is_consonant('ก'));
        assert!(db.is_consonant('ฮ'));
        assert!(!db.is_consonant('า'));
        assert!(!db.is_consonant('a'));
    }

    #[test]
    fn test_exception_glyphs() {
        let db = default_db();
        for glyph in ['ว', 'ย', 'อ'] {
            assert!(db.is_exception(glyph), "{} should be dual-role", glyph);
            assert!(db.is_consonant(glyph));
        }
        assert!(!db.is_exception('ก'));
    }

    #[test]
    fn test_cluster_validity_by_role() {
        let db = default_db();
        assert!(db.is_valid_cluster("กร", ClusterRole::Initial));
        assert!(db.is_valid_cluster("อย", ClusterRole::Initial));
        assert!(!db.is_valid_cluster("กร", ClusterRole::Final));
        assert!(db.is_valid_cluster("รณ", ClusterRole::Final));
        assert!(!db.is_valid_cluster("กก", ClusterRole::Initial));
    }

    #[test]
    fn test_id_generation_simple() {
        let tags = vec![
            "sound_a".to_string(),
            "length_long".to_string(),
            "vowel_open".to_string(),
        ];
        let (abbrev, long) = generate_ids("xา", &tags);
        assert_eq!(abbrev, "a_l_o");
        assert_eq!(long, "a_long_open");
    }

    #[test]
    fn test_id_generation_glide_from_trailing_glyph() {
        let tags = vec![
            "sound_a".to_string(),
            "length_long".to_string(),
            "vowel_closed".to_string(),
        ];
        let (abbrev, long) = generate_ids("xาย", &tags);
        assert_eq!(abbrev, "a_l_c_jg");
        assert_eq!(long, "a_long_closed_jglide");

        let (abbrev, _) = generate_ids("xาว", &tags);
        assert_eq!(abbrev, "a_l_c_wg");
    }

    #[test]
    fn test_id_generation_missing_tags() {
        let (abbrev, long) = generate_ids("xา", &[]);
        assert_eq!(abbrev, "X_X_X");
        assert_eq!(long, "X_X_X");
    }

    #[test]
    fn test_duplicate_tag_ids_get_numbered() {
        let db = default_db();
        let ids: Vec<&str> = db
            .templates()
            .iter()
            .filter(|t| t.abbrev_id.starts_with("ai_s_o"))
            .map(|t| t.abbrev_id.as_str())
            .collect();
        // ไx and ใx share identical tags; the second gets the _2 suffix
        assert_eq!(ids, vec!["ai_s_o", "ai_s_o_2"]);
    }

    #[test]
    fn test_all_abbrev_ids_unique() {
        let db = default_db();
        let mut seen = FxHashSet::default();
        for t in db.templates() {
            assert!(seen.insert(t.abbrev_id.clone()), "dup id {}", t.abbrev_id);
        }
    }

    #[test]
    fn test_template_tokenization() {
        let db = default_db();
        let t = db
            .templates()
            .iter()
            .find(|t| t.pattern == "เx็f")
            .unwrap();
        assert_eq!(
            t.tokens,
            vec![
                TemplateToken::Literal('เ'),
                TemplateToken::Foundation,
                TemplateToken::Literal('็'),
                TemplateToken::Final,
            ]
        );
        assert!(t.has_final);
        assert_eq!(t.pre_literal_count, 1);
    }

    #[test]
    fn test_templates_with_glyph_index() {
        let db = default_db();
        let with_sara_e: Vec<&str> = db
            .templates_with_glyph('เ')
            .map(|t| t.pattern.as_str())
            .collect();
        assert!(with_sara_e.contains(&"เx"));
        assert!(with_sara_e.contains(&"เxf"));
        assert!(with_sara_e.contains(&"เxว"));
    }

    #[test]
    fn test_duplicate_template_rejected() {
        let patterns = r#"{"patterns": [
            {"pattern": "xา", "tags": ["sound_a", "length_long", "vowel_open"]},
            {"pattern": "xา", "tags": ["sound_a", "length_long", "vowel_open"]}
        ]}"#;
        let result = PatternDatabase::from_json(
            patterns,
            DataLoader::foundation(),
            DataLoader::clusters(),
        );
        assert!(matches!(result, Err(ConfigError::DuplicateTemplate { .. })));
    }

    #[test]
    fn test_malformed_template_rejected() {
        for bad in ["", "า", "xxา", "fxา", "xk"] {
            let patterns = format!(r#"{{"patterns": [{{"pattern": "{}"}}]}}"#, bad);
            let result = PatternDatabase::from_json(
                &patterns,
                DataLoader::foundation(),
                DataLoader::clusters(),
            );
            assert!(
                matches!(result, Err(ConfigError::MalformedPattern { .. })),
                "template '{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_malformed_cluster_rejected() {
        let clusters = r#"{"initial": ["กรล"], "final": []}"#;
        let result = PatternDatabase::from_json(
            DataLoader::vowel_patterns(),
            DataLoader::foundation(),
            clusters,
        );
        assert!(matches!(result, Err(ConfigError::MalformedCluster { .. })));
    }

    #[test]
    fn test_recognized_alphabet() {
        let db = default_db();
        assert!(db.is_recognized('ก'));
        assert!(db.is_recognized('เ'));
        assert!(db.is_recognized('\u{0E48}'));
        assert!(db.is_recognized('\u{0E4C}'));
        assert!(!db.is_recognized('a'));
        assert!(!db.is_recognized(' '));
    }
}
