use clap::Parser;
use lipi_core::config::Settings;
use lipi_core::logging::init_tracing;
use lipi_core::TransliterationEngine;
use serde::Serialize;
use std::io::Read;

/// Transliterate between Latin romanization and Devanagari.
#[derive(Parser, Debug)]
#[command(name = "lipi", version)]
struct Args {
    /// Text to convert. Read from stdin when omitted.
    text: Vec<String>,

    /// roman_to_devanagari, devanagari_to_roman, or auto.
    #[arg(short, long)]
    direction: Option<String>,

    /// Detect the script of every word separately.
    #[arg(short, long, conflicts_with = "direction")]
    mixed: bool,

    /// Print a JSON object instead of plain text.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    input: &'a str,
    script: lipi_core::Script,
    output: String,
}

fn main() -> lipi_core::Result<()> {
    let args = Args::parse();
    let settings = Settings::from_env()?;
    init_tracing(&settings.log_filter);
    let engine = TransliterationEngine::from_settings(&settings)?;

    let input = if args.text.is_empty() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf.trim_end_matches(['\r', '\n']).to_string()
    } else {
        args.text.join(" ")
    };

    let output = if args.mixed {
        engine.transliterate_mixed(&input)
    } else {
        engine.transliterate(&input, args.direction.as_deref())?
    };

    if args.json {
        let report = Report { input: &input, script: engine.detect(&input), output };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", output);
    }
    Ok(())
}
