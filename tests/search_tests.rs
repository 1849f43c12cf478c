// Integration tests for the Segmenter facade

use thai_readings::{find_vowels, segment, PatternDatabase, Segmenter, VowelType};

#[test]
fn test_segmenter_creation() {
    let _segmenter = Segmenter::new().unwrap();
}

#[test]
fn test_default_impl() {
    let segmenter = Segmenter::default();
    let (templates, consonants) = segmenter.stats();
    assert!(templates > 0);
    assert_eq!(consonants, 44);
}

#[test]
fn test_segment_returns_rendered_strings() {
    let segmenter = Segmenter::new().unwrap();
    let domain = segmenter.segment("ยา");

    assert_eq!(domain.len(), 1);
    assert_eq!(domain.readings()[0].rendered, "ย(า)");
    assert_eq!(domain.text, "ยา");
}

#[test]
fn test_ambiguity_signal() {
    let segmenter = Segmenter::new().unwrap();

    assert!(!segmenter.segment("ยา").is_ambiguous());
    assert!(segmenter.segment("เลว").is_ambiguous());
    assert_eq!(segmenter.segment("เลว").len(), 3);
}

#[test]
fn test_first_discovered_order_is_stable() {
    let segmenter = Segmenter::new().unwrap();
    let a: Vec<String> = segmenter
        .segment("เลว")
        .iter()
        .map(|r| r.rendered.clone())
        .collect();
    let b: Vec<String> = segmenter
        .segment("เลว")
        .iter()
        .map(|r| r.rendered.clone())
        .collect();
    assert_eq!(a, b);
}

#[test]
fn test_vowel_only_entry_point() {
    let db = PatternDatabase::load_default().unwrap();
    let vowels = find_vowels("เด็ก", &db);

    assert!(!vowels.is_empty());
    let first = &vowels[&1];
    assert_eq!(first.vowel_number, 1);
    assert!(first
        .candidates
        .iter()
        .any(|c| c.pattern == "เx็f" && c.vowel_type == VowelType::Explicit));
}

#[test]
fn test_vowel_only_mode_without_segmentation() {
    // คน has no full segmentation requirement here: the vowel pass still
    // reports the hidden vowels directly over raw text
    let db = PatternDatabase::load_default().unwrap();
    let vowels = find_vowels("คน", &db);

    let hidden: Vec<_> = vowels
        .values()
        .flat_map(|v| v.candidates.iter())
        .filter(|c| c.vowel_type == VowelType::Hidden)
        .collect();
    assert_eq!(hidden.len(), 2);
    assert!(hidden.iter().all(|c| c.pattern_id == "o_s_c"));
}

#[test]
fn test_free_function_matches_facade() {
    let db = PatternDatabase::load_default().unwrap();
    let segmenter = Segmenter::new().unwrap();

    let a: Vec<String> = segment("เลว", &db)
        .iter()
        .map(|r| r.rendered.clone())
        .collect();
    let b: Vec<String> = segmenter
        .segment("เลว")
        .iter()
        .map(|r| r.rendered.clone())
        .collect();
    assert_eq!(a, b);
}

#[test]
fn test_skip_policy_keeps_analyzing() {
    let segmenter = Segmenter::new().unwrap();
    let domain = segmenter.segment("ยา abc");

    // The space and latin letters are skipped, ยา still segments
    assert_eq!(domain.skipped.len(), 4);
    assert_eq!(domain.len(), 1);
}

#[test]
fn test_step_limit_safety_valve() {
    let segmenter = Segmenter::new().unwrap().with_step_limit(2);
    let domain = segmenter.segment("คนสตรี");

    assert!(domain.truncated);
}

#[test]
fn test_domain_serializes_to_json() {
    let segmenter = Segmenter::new().unwrap();
    let domain = segmenter.segment("เลว");

    let json = serde_json::to_string(&domain).unwrap();
    assert!(json.contains("\"readings\""));
    assert!(json.contains("เxว"));

    let vowels = segmenter.find_vowels("ยา");
    let json = serde_json::to_string(&vowels).unwrap();
    assert!(json.contains("\"best_candidate\""));
}

#[test]
fn test_shared_database_across_analyses() {
    // One database serves many texts; nothing in it mutates
    let db = PatternDatabase::load_default().unwrap();

    let before = db.template_count();
    for text in ["ยา", "เลว", "คน", "อย่า"] {
        let _ = segment(text, &db);
        let _ = find_vowels(text, &db);
    }
    assert_eq!(db.template_count(), before);
}
