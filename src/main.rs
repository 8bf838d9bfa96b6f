use std::fs;

use anyhow::{Context, Result};
use clap::Parser;

use rxtree::{match_at, parse, render};

/// Sample from the original demonstration: match one markdown table row.
const SAMPLE_PATTERN: &str = "\\|(>1!\\|)\\|(#!\n)\n";
const SAMPLE_INPUT: &str = "| A | B |\n";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pattern to compile (defaults to a sample table-row pattern)
    #[arg(value_name = "PATTERN")]
    pattern: Option<String>,

    /// Input text to match (defaults to a sample table row)
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Read the input text from a file instead
    #[arg(short, long, value_name = "FILE", conflicts_with = "input")]
    file: Option<String>,

    /// Start position of the scan, in bytes
    #[arg(short, long, default_value_t = 0)]
    start: usize,

    /// Print the compiled pattern tree
    #[arg(short, long)]
    tree: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let pattern = args.pattern.unwrap_or_else(|| SAMPLE_PATTERN.to_string());
    let input = match (args.input, args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => {
            fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?
        }
        (None, None) => SAMPLE_INPUT.to_string(),
    };

    let node =
        parse(&pattern).with_context(|| format!("Failed to parse pattern {pattern:?}"))?;
    if args.tree {
        print!("{}", render(&node));
    }

    println!("<{}> ({})", input.escape_default(), input.len());
    let result = match_at(&node, &input, args.start);
    let last = result
        .end
        .checked_sub(1)
        .and_then(|i| input.as_bytes().get(i));
    match last {
        Some(byte) => println!(
            "Res: {}, at {} ({})",
            result.matched,
            byte.escape_ascii(),
            result.end
        ),
        None => println!("Res: {} ({})", result.matched, result.end),
    }
    Ok(())
}
