//! Benchmark command implementation.

use clap::Parser;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    /// Path to the trained model
    #[arg(short, long)]
    pub tokenizer: String,

    /// Path to input text file for benchmarking
    #[arg(short, long)]
    pub input: String,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,
}

use anyhow::Result as AnyhowResult;
use bytepair_tokenizer::Tokenizer;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::time::Instant;

pub fn run(cmd: BenchmarkCommand) -> AnyhowResult<()> {
    let tokenizer = Tokenizer::load(Path::new(&cmd.tokenizer))?;
    let text = fs::read_to_string(&cmd.input)?;

    println!("Benchmarking encoding...");
    println!("  Text length: {} bytes", text.len());
    println!("  Iterations: {}", cmd.iterations);
    println!();

    // Warmup
    let tokens = tokenizer.encode(&text)?;

    let bar = ProgressBar::new(cmd.iterations as u64);
    bar.set_style(ProgressStyle::with_template(
        "{bar:40.cyan/blue} {pos}/{len} ({eta})",
    )?);

    let start = Instant::now();
    for _ in 0..cmd.iterations {
        let _ = tokenizer.encode(&text)?;
        bar.inc(1);
    }
    let elapsed = start.elapsed();
    bar.finish_and_clear();

    let avg_secs = elapsed.as_secs_f64() / cmd.iterations as f64;
    let bytes_per_sec = text.len() as f64 / avg_secs;
    let tokens_per_sec = tokens.len() as f64 / avg_secs;

    println!("Results:");
    println!("  Total time: {:.2}s", elapsed.as_secs_f64());
    println!("  Average time: {:.3}ms", avg_secs * 1000.0);
    println!("  Throughput: {:.2} MB/s", bytes_per_sec / 1_000_000.0);
    println!("  Tokens: {} ({:.0} tokens/s)", tokens.len(), tokens_per_sec);

    Ok(())
}
