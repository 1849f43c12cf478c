// Performance benchmarks for thai-readings segmentation

use std::time::Instant;
use thai_readings::Segmenter;

fn main() {
    println!("Thai-Readings Performance Benchmarks\n");

    let segmenter = Segmenter::new().expect("Failed to load segmentation engine");

    // Warmup
    let _ = segmenter.segment("ยา");

    bench_unambiguous(&segmenter);
    bench_ambiguous(&segmenter);
    bench_vowel_only(&segmenter);
    bench_batch(&segmenter);

    println!("\nBenchmarks completed");
}

fn bench_unambiguous(segmenter: &Segmenter) {
    println!("UNAMBIGUOUS WORDS (single reading)");
    println!("----------------------------------");

    for text in ["ยา", "เด็ก", "ตรี", "เกรียน"] {
        let start = Instant::now();
        let domain = segmenter.segment(text);
        let duration = start.elapsed();

        println!(
            "  {:<10} -> {} reading(s) in {:.3}ms",
            text,
            domain.len(),
            duration.as_secs_f64() * 1000.0
        );
    }
    println!();
}

fn bench_ambiguous(segmenter: &Segmenter) {
    println!("AMBIGUOUS WORDS (multiple readings)");
    println!("-----------------------------------");

    for text in ["เลว", "คน", "อย่า", "คนสตรี"] {
        let start = Instant::now();
        let domain = segmenter.segment(text);
        let duration = start.elapsed();

        println!(
            "  {:<10} -> {} reading(s) in {:.3}ms",
            text,
            domain.len(),
            duration.as_secs_f64() * 1000.0
        );
    }
    println!();
}

fn bench_vowel_only(segmenter: &Segmenter) {
    println!("VOWEL-ONLY MODE");
    println!("---------------");

    for text in ["ยา", "เด็ก", "คนสตรี"] {
        let start = Instant::now();
        let vowels = segmenter.find_vowels(text);
        let duration = start.elapsed();

        println!(
            "  {:<10} -> {} vowel position(s) in {:.3}ms",
            text,
            vowels.len(),
            duration.as_secs_f64() * 1000.0
        );
    }
    println!();
}

fn bench_batch(segmenter: &Segmenter) {
    println!("BATCH");
    println!("-----");

    let texts = ["ยา", "เลว", "คน", "อย่า", "เด็ก", "ตรี", "คนสตรี"];

    let start = Instant::now();
    for text in texts {
        let _ = segmenter.segment(text);
    }
    let total = start.elapsed();

    println!(
        "  {} segmentations in {:.3}ms ({:.3}ms avg)",
        texts.len(),
        total.as_secs_f64() * 1000.0,
        (total.as_secs_f64() / texts.len() as f64) * 1000.0
    );

    let (templates, consonants) = segmenter.stats();
    println!("\nDatabase statistics");
    println!("-------------------");
    println!("  Vowel templates: {}", templates);
    println!("  Consonants: {}", consonants);
}
