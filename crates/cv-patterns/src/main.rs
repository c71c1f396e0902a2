use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use cv_core::{cv_to_code, note_to_cv};
use cv_patterns::{parse_pattern, HeaderEmitter, Pattern, Report, VoltageTable};

#[derive(Parser, Debug)]
#[command(name = "cv-patterns")]
#[command(about = "Compile note patterns to CV tables for a fixed-point sequencer", long_about = None)]
struct Args {
    /// Patterns file, one pattern per line (blank lines ignored)
    patterns: PathBuf,

    /// Output header path
    #[arg(short, long, default_value = "patterns.h")]
    output: PathBuf,

    /// Print the artifact to stdout instead of a file
    #[arg(long)]
    stdout: bool,

    /// Dump the parsed patterns as JSON instead of emitting the header
    #[arg(long)]
    json: bool,

    /// Suppress informational messages (only errors)
    #[arg(short, long)]
    quiet: bool,

    /// Duration resolution: units per whole note (use a power of two)
    #[arg(short, long, default_value = "16")]
    resolution: u32,

    /// DAC reference voltage
    #[arg(long, default_value = "4.096")]
    vref: f64,

    /// DAC bit resolution
    #[arg(long, default_value = "12")]
    bits: u32,

    /// Tuning note emitted as TUNING_CV
    #[arg(long, default_value = "C2")]
    tuning: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let text = fs::read_to_string(&args.patterns)
        .with_context(|| format!("Failed to read {}", args.patterns.display()))?;
    let sources: Vec<String> = text
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    if sources.is_empty() {
        anyhow::bail!("No patterns found in {}", args.patterns.display());
    }

    // One bad pattern aborts the run: the emitted tables assume every line
    // compiled.
    let entries: Vec<(String, Pattern)> = sources
        .into_iter()
        .map(|source| {
            parse_pattern(&source, args.resolution)
                .with_context(|| format!("Failed to parse pattern '{}'", source))
                .map(|pattern| (source, pattern))
        })
        .collect::<Result<_>>()?;
    let patterns: Vec<Pattern> = entries.iter().map(|(_, p)| p.clone()).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&patterns)?);
        return Ok(());
    }

    let table = VoltageTable::build(&patterns, args.vref, args.bits)
        .context("Failed to build the voltage table")?;

    let tuning_cv = note_to_cv(&args.tuning)
        .and_then(|cv| cv_to_code(cv, args.vref, args.bits))
        .with_context(|| format!("Invalid tuning note '{}'", args.tuning))?;

    let emitter = HeaderEmitter {
        resolution: args.resolution,
        vref: args.vref,
        bits: args.bits,
        tuning_cv,
    };
    let header = emitter
        .emit(&entries, &table)
        .context("Failed to emit the header")?;

    if args.stdout {
        println!("{}", header);
    } else {
        fs::write(&args.output, format!("{}\n", header))
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
        if !args.quiet {
            eprintln!(
                "Done: {} patterns saved in {}",
                patterns.len(),
                args.output.display()
            );
        }
    }

    if !args.quiet {
        eprintln!();
        eprintln!("{}", Report::build(&patterns, &table, args.resolution));
    }

    Ok(())
}
