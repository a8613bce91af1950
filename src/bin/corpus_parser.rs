use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser as ClapParser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use rustdp::ParserEngine;

#[derive(ClapParser, Debug)]
#[command(name = "corpus_parser")]
#[command(about = "Parse a corpus file (one text per line) into JSON lines")]
#[command(version)]
struct Args {
    /// Input text file, one sentence or short span per line
    #[arg(short, long)]
    input: PathBuf,

    /// Output file for JSON lines (one parse result per input line)
    #[arg(short, long, default_value = "./parses.jsonl")]
    output: PathBuf,

    /// Engine configuration file; the built-in model is used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output (disables the progress bar)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let engine = match &args.config {
        Some(path) => ParserEngine::from_config(path)?,
        None => ParserEngine::builtin()?,
    };

    let content = fs::read_to_string(&args.input)
        .map_err(|e| anyhow!("Failed to read input file {}: {}", args.input.display(), e))?;
    let lines: Vec<String> = content
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    info!("Parsing {} line(s) from {}", lines.len(), args.input.display());

    let progress_bar = if args.verbose {
        None
    } else {
        let pb = ProgressBar::new(lines.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap()
            .progress_chars("#>-");
        pb.set_style(style);
        pb.set_message("Parsing corpus...");
        Some(pb)
    };

    // Lines are independent units of work; order is restored by collect
    let results: Vec<(usize, Result<String, String>)> = lines
        .par_iter()
        .enumerate()
        .map(|(i, line)| {
            let outcome = engine
                .parse_result(line)
                .map(|r| r.to_json())
                .map_err(|e| e.to_string());
            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }
            (i, outcome)
        })
        .collect();

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("done");
    }

    let mut parsed = 0usize;
    let mut failed = 0usize;
    let mut out = fs::File::create(&args.output)
        .map_err(|e| anyhow!("Failed to create output file {}: {}", args.output.display(), e))?;
    for (i, outcome) in results {
        match outcome {
            Ok(json) => {
                writeln!(out, "{}", json)?;
                parsed += 1;
            }
            Err(e) => {
                // A failed line never blocks the rest of the corpus
                log::error!("Line {} failed: {}", i + 1, e);
                failed += 1;
            }
        }
    }

    info!(
        "Finished: {} parsed, {} failed, output written to {}",
        parsed,
        failed,
        args.output.display()
    );
    println!("Parsed {}/{} lines -> {}", parsed, lines.len(), args.output.display());

    Ok(())
}
