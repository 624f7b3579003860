//! Platform layer: settings, logging, effect execution and the terminal UI.

mod app;
mod config;
mod effects;
mod headless;
mod logging;
mod ui;

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use lexvis_core::Msg;
use lexvis_engine::load_grammar_artifact;
use lexvis_logging::lexvis_warn;

use crate::cli::Cli;
use logging::LogDestination;

pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let settings = config::resolve(cli)?;

    if cli.print {
        logging::initialize(LogDestination::Terminal, settings.log_level);
        settings.log_summary();
        let initial = initial_messages(cli)?;
        return headless::run(&settings, initial);
    }

    logging::initialize(
        LogDestination::File(settings.log_file.clone()),
        settings.log_level,
    );
    settings.log_summary();
    let initial = initial_messages(cli)?;
    app::run_app(&settings, initial)?;
    Ok(ExitCode::SUCCESS)
}

/// Messages that replay the grammar and input given on the command line.
fn initial_messages(cli: &Cli) -> anyhow::Result<Vec<Msg>> {
    let mut messages = Vec::new();

    if let Some(path) = cli.grammar.as_deref() {
        messages.push(match load_grammar_artifact(path) {
            Ok(artifact) => Msg::ArtifactSelected(artifact),
            Err(err) => {
                lexvis_warn!("Could not stage grammar: {}", err);
                Msg::ArtifactUnreadable {
                    path: path.display().to_string(),
                    reason: err.to_string(),
                }
            }
        });
    }

    let text = match (cli.text.as_ref(), cli.input_file.as_deref()) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read input file {}", path.display()))?,
        ),
        (None, None) => None,
    };
    if let Some(text) = text {
        messages.push(Msg::InputEdited(text));
    }

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_messages_stage_grammar_and_text() {
        let dir = tempfile::tempdir().unwrap();
        let grammar = dir.path().join("Hello.g4");
        fs::write(&grammar, "lexer grammar Hello;").unwrap();
        let input = dir.path().join("in.txt");
        fs::write(&input, "hello world\n").unwrap();

        let cli = Cli {
            grammar: Some(grammar),
            input_file: Some(input),
            ..Cli::default()
        };
        let messages = initial_messages(&cli).unwrap();

        assert_eq!(messages.len(), 2);
        assert!(matches!(&messages[0], Msg::ArtifactSelected(a) if a.name() == "Hello.g4"));
        assert_eq!(messages[1], Msg::InputEdited("hello world\n".to_string()));
    }

    #[test]
    fn unreadable_grammar_becomes_a_message() {
        let cli = Cli {
            grammar: Some("/definitely/not/here.g4".into()),
            ..Cli::default()
        };
        let messages = initial_messages(&cli).unwrap();
        assert!(matches!(&messages[..], [Msg::ArtifactUnreadable { .. }]));
    }

    #[test]
    fn unreadable_input_file_is_a_startup_error() {
        let cli = Cli {
            input_file: Some("/definitely/not/here.txt".into()),
            ..Cli::default()
        };
        assert!(initial_messages(&cli).is_err());
    }
}
