use lipi_core::codemix::CodeMixClassifier;
use lipi_core::config::Settings;
use lipi_core::logging::init_tracing;
use lipi_core::persistence::load_classifier;
use lipi_core::TransliterationEngine;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

// Line protocol spoken with the desktop UI over stdin/stdout:
//
//   TRANSLITERATE <direction|auto> <text>  ->  RESULT <text> | ERROR <message>
//   DETECT <text>                          ->  SCRIPT <devanagari|latin>
//   CLASSIFY <text>                        ->  LANG <word> <language> ... END
//   EXIT
fn main() -> io::Result<()> {
    let (settings, settings_error) = Settings::load_or_default(&Settings::env_path());
    init_tracing(&settings.log_filter);
    if let Some(e) = settings_error {
        warn!(error = %e, "bad settings file, using defaults");
    }
    info!("lipi engine starting");

    let engine = TransliterationEngine::from_settings(&settings).unwrap_or_else(|e| {
        warn!(error = %e, "custom table unusable, falling back to built-in tables");
        TransliterationEngine::new()
    });
    // Built on the first successful CLASSIFY; a failed load is retried next time.
    let mut classifier: Option<CodeMixClassifier> = None;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let input = line?;
        debug!(input = %input, "<-");
        let (command, rest) = input.split_once(' ').unwrap_or((input.as_str(), ""));

        match command {
            "TRANSLITERATE" => {
                let (direction, text) = rest.split_once(' ').unwrap_or((rest, ""));
                let direction = (!direction.is_empty()).then_some(direction);
                match engine.transliterate(text, direction) {
                    Ok(output) => reply(&mut stdout, &format!("RESULT {}", output))?,
                    Err(e) => reply(&mut stdout, &format!("ERROR {}", e))?,
                }
            }
            "DETECT" => {
                reply(&mut stdout, &format!("SCRIPT {}", engine.detect(rest)))?;
            }
            "CLASSIFY" => {
                if classifier.is_none() {
                    match load_classifier(&settings) {
                        Ok(loaded) => classifier = Some(loaded),
                        Err(e) => warn!(error = %e, "code-mix models unavailable"),
                    }
                }
                match classifier.as_ref().ok_or("code-mix models unavailable") {
                    Ok(classifier) => {
                        for label in classifier.classify(rest) {
                            reply(&mut stdout, &format!("LANG {} {}", label.word, label.language))?;
                        }
                        reply(&mut stdout, "END")?;
                    }
                    Err(e) => reply(&mut stdout, &format!("ERROR {}", e))?,
                }
            }
            "EXIT" => {
                info!("received EXIT");
                break;
            }
            "" => {}
            other => {
                warn!(command = other, "unknown command");
                reply(&mut stdout, &format!("ERROR unknown command '{}'", other))?;
            }
        }
    }

    info!("lipi engine shutting down");
    Ok(())
}

fn reply(stdout: &mut io::Stdout, message: &str) -> io::Result<()> {
    debug!(reply = message, "->");
    writeln!(stdout, "{}", message)?;
    stdout.flush()
}
