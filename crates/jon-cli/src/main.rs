//! `jon` CLI — check, format, convert, and validate JON documents.
//!
//! ## Usage
//!
//! ```sh
//! # Syntax-check a document (stdin → exit code, diagnostics on stderr)
//! echo "port: 8080" | jon check
//!
//! # Pretty-print a document in canonical form
//! jon fmt -i config.jon
//!
//! # Convert JON to pretty-printed JSON
//! jon json -i config.jon -o config.json
//!
//! # Validate a document against a schema, human-readable report
//! jon validate -i config.jon --schema config.schema.jon
//!
//! # Same, but emit the violation list as JSON
//! jon validate -i config.jon --schema config.schema.jon --json
//! ```
//!
//! All commands read stdin when `-i` is omitted and write stdout when `-o`
//! is omitted. Parse failures print a caret snippet to stderr and exit
//! non-zero; validation failures list violations and exit non-zero.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::process;

#[derive(Parser)]
#[command(name = "jon", version, about = "JON configuration language CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and report whether it is well-formed
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Pretty-print a document in canonical JON form
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Convert a JON document to pretty-printed JSON
    Json {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Validate a document against a JON schema
    Validate {
        /// Schema file
        #[arg(short, long)]
        schema: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Emit the violation list as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { input } => {
            let source = read_input(input.as_deref())?;
            let value = parse_or_exit(&source, "document");
            println!("ok: {}", value.kind());
        }
        Commands::Fmt { input, output } => {
            let source = read_input(input.as_deref())?;
            let value = parse_or_exit(&source, "document");
            let mut pretty = jon_core::stringify_pretty(&value, "  ");
            pretty.push('\n');
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Json { input, output } => {
            let source = read_input(input.as_deref())?;
            let value = parse_or_exit(&source, "document");
            let json = serde_json::to_string_pretty(&jon_core::to_json(&value))?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Validate {
            schema,
            input,
            json,
        } => {
            let schema_source = std::fs::read_to_string(&schema)
                .with_context(|| format!("Failed to read schema file: {schema}"))?;
            let schema_value = parse_or_exit(&schema_source, "schema");

            let source = read_input(input.as_deref())?;
            let value = parse_or_exit(&source, "document");

            let result = jon_core::validate(&value, &schema_value);
            if json {
                println!("{}", serde_json::to_string_pretty(result.violations())?);
            } else if result.is_valid() {
                println!("ok");
            } else {
                print!("{result}");
            }
            if !result.is_valid() {
                process::exit(1);
            }
        }
    }

    Ok(())
}

/// Parse `source`, or print a caret diagnostic to stderr and exit non-zero.
fn parse_or_exit(source: &str, label: &str) -> jon_core::Value {
    match jon_core::parse(source) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("error in {label}:\n{}", e.snippet(source));
            process::exit(1);
        }
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {path}"))?;
        }
        None => {
            print!("{content}");
        }
    }
    Ok(())
}
