// Thai-Readings Segmentation CLI Tool
// Command-line interface for Thai syllable analysis

use clap::Parser;
use thai_readings::Segmenter;

/// Thai Segmentation Tool - enumerate every reading of a Thai text
#[derive(Parser, Debug)]
#[command(name = "thai-segment")]
#[command(about = "Segment Thai text into syllables, listing all alternative readings", long_about = None)]
#[command(version)]
struct Args {
    /// Thai text to analyze
    #[arg(value_name = "TEXT")]
    text: String,

    /// Report vowel positions only, without full segmentation
    #[arg(short = 'w', long)]
    vowels: bool,

    /// Maximum number of readings to display
    #[arg(short, long, default_value = "10")]
    limit: usize,

    /// Emit machine-readable JSON instead of the table
    #[arg(short, long)]
    json: bool,

    /// Show detailed information
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.verbose {
        println!("Loading segmentation engine...");
    }

    let segmenter = Segmenter::new()?;

    if args.verbose {
        let (templates, consonants) = segmenter.stats();
        println!(
            "Database loaded: {} vowel templates, {} consonants\n",
            templates, consonants
        );
    }

    if args.vowels {
        return run_vowel_mode(&segmenter, &args);
    }

    let domain = segmenter.segment(&args.text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&domain)?);
        return Ok(());
    }

    println!("Text: {}", args.text);
    for record in &domain.skipped {
        println!("  skipped: {:?}", record);
    }

    if domain.is_empty() {
        println!("No readings found.");
        return Ok(());
    }

    let shown = domain.len().min(args.limit);
    println!(
        "{} reading{} ({}ambiguous):\n",
        domain.len(),
        if domain.len() == 1 { "" } else { "s" },
        if domain.is_ambiguous() { "" } else { "un" }
    );

    for (idx, reading) in domain.iter().take(args.limit).enumerate() {
        println!("{}. {}", idx + 1, reading.rendered);

        if args.verbose {
            for syllable in &reading.syllables {
                println!(
                    "      {:<10} pattern {:<10} ({})  order: {}",
                    syllable.render(),
                    syllable.vowel.pattern,
                    syllable.pattern_id,
                    syllable.reading_order().join(" "),
                );
            }
        }
    }

    if shown < domain.len() {
        println!("\n... and {} more", domain.len() - shown);
    }
    if domain.truncated {
        println!("\n(search budget exhausted; reading list may be incomplete)");
    }

    Ok(())
}

fn run_vowel_mode(segmenter: &Segmenter, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let vowels = segmenter.find_vowels(&args.text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&vowels)?);
        return Ok(());
    }

    println!("Text: {}", args.text);
    println!("Found {} vowel position(s)\n", vowels.len());

    for data in vowels.values() {
        println!(
            "Vowel {}: span {}-{}  best {} ({}, {})",
            data.vowel_number,
            data.text_span.0,
            data.text_span.1,
            data.best_candidate.pattern,
            data.best_candidate.pattern_id,
            data.best_candidate.vowel_type,
        );

        if args.verbose && data.candidates.len() > 1 {
            for (i, candidate) in data.candidates.iter().enumerate().skip(1) {
                println!(
                    "    alt {}: {} ({}, {})",
                    i, candidate.pattern, candidate.pattern_id, candidate.vowel_type
                );
            }
        }
    }

    Ok(())
}
