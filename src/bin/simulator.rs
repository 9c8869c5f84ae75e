use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use lipi_core::config::Settings;
use lipi_core::core::detector::ScriptCounts;
use lipi_core::logging::init_tracing;
use lipi_core::{Direction, TransliterationEngine};
use std::io::{stdin, stdout, Stdout, Write};

fn main() -> lipi_core::Result<()> {
    let settings = Settings::from_env()?;
    init_tracing(&settings.log_filter);
    let engine = TransliterationEngine::from_settings(&settings)?;

    let mut buffer = String::new();
    let mut direction: Option<Direction> = None;
    let mut notice = String::new();
    let mut out = stdout();

    loop {
        print_ui(&mut out, &engine, &buffer, direction, &notice)?;
        notice.clear();

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim_end_matches(['\r', '\n']);

        match cmd {
            "exit" => break,
            ":clear" => buffer.clear(),
            s if s.starts_with(":dir") => {
                match Direction::parse_optional(Some(s[4..].trim())) {
                    Ok(parsed) => direction = parsed,
                    Err(e) => notice = e.to_string(),
                }
            }
            "" => buffer.push(' '),
            s => buffer.push_str(s),
        }
    }

    execute!(out, Print("\n"))?;
    Ok(())
}

fn heading(out: &mut Stdout, text: &str) -> std::io::Result<()> {
    queue!(out, SetForegroundColor(Color::Cyan), Print(text), ResetColor)
}

fn print_ui(
    out: &mut Stdout,
    engine: &TransliterationEngine,
    buffer: &str,
    direction: Option<Direction>,
    notice: &str,
) -> std::io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    heading(out, "Lipi Transliteration Simulator\n")?;
    queue!(
        out,
        Print("---------------------------------------------------------------\n"),
        Print("Type text and press [Enter] to append, empty line adds a space.\n"),
        Print("':dir to-latin|to-devanagari|auto' sets direction, ':clear' resets, 'exit' quits.\n\n"),
    )?;

    let counts = ScriptCounts::of(buffer);
    queue!(
        out,
        Print(format!("Buffer: [{}]\n", buffer)),
        Print(format!(
            "Detected: {} (devanagari {}, latin {})\n",
            counts.dominant(),
            counts.devanagari,
            counts.latin
        )),
        Print(format!(
            "Direction: {}\n\n",
            direction.map_or("auto".to_string(), |d| format!("{:?}", d))
        )),
    )?;

    heading(out, "Output\n")?;
    queue!(out, Print(format!("  {}\n", engine.transliterate_as(buffer, direction))))?;
    heading(out, "Per word\n")?;
    queue!(out, Print(format!("  {}\n", engine.transliterate_mixed(buffer))))?;
    heading(out, "Tokens\n")?;
    let tokens = match direction.unwrap_or_else(|| Direction::out_of(counts.dominant())) {
        Direction::ToDevanagari => format!("{:?}", engine.encoder().tokenize(buffer)),
        Direction::ToLatin => format!("{:?}", engine.decoder().tokenize(buffer)),
    };
    queue!(out, Print(format!("  {}\n", tokens)))?;

    if !notice.is_empty() {
        queue!(out, SetForegroundColor(Color::Red), Print(format!("\n{}\n", notice)), ResetColor)?;
    }
    queue!(out, Print("\n> "))?;
    out.flush()
}
