//! Train command implementation.

use clap::Parser;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Path to the training data file
    #[arg(short, long)]
    pub input: String,

    /// Output path for the trained model
    #[arg(short, long)]
    pub output: String,

    /// Target vocabulary size
    #[arg(short, long, default_value_t = 10_000)]
    pub vocab_size: usize,

    /// Disable parallel pre-tokenization
    #[arg(long, default_value_t = false)]
    pub sequential: bool,
}

use anyhow::Result as AnyhowResult;
use bytepair_tokenizer::Tokenizer;
use indicatif::ProgressBar;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    println!("Training tokenizer...");
    println!("  Input: {}", cmd.input);
    println!("  Output: {}", cmd.output);
    println!("  Vocab size: {}", cmd.vocab_size);
    println!();

    let start = Instant::now();
    let data = fs::read_to_string(&cmd.input)?;
    println!(
        "Read {} bytes in {:.2}s",
        data.len(),
        start.elapsed().as_secs_f64()
    );

    let mut tokenizer = Tokenizer::builder()
        .vocab_size(cmd.vocab_size)
        .parallel(!cmd.sequential)
        .build()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!(
        "learning {} merges",
        cmd.vocab_size.saturating_sub(256)
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let start = Instant::now();
    let report = tokenizer.train(&data)?;
    spinner.finish_and_clear();

    println!("Training completed in {:.2}s", start.elapsed().as_secs_f64());
    println!("  Learned merges: {}", report.learned);
    if report.placeholders > 0 {
        println!("  Placeholder merges: {}", report.placeholders);
    }
    println!(
        "  Corpus tokens: {} -> {} (compression {:.2}x)",
        report.input_tokens,
        report.output_tokens,
        report.compression_ratio()
    );

    let output_path = Path::new(&cmd.output);
    tokenizer.save(output_path)?;
    println!("Model saved to {}", cmd.output);

    Ok(())
}
