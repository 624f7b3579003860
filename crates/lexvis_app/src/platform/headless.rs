//! `--print` mode: one submission through the reducer, results on stdout.

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context};
use lexvis_core::{update, AppState, Effect, Msg, NoticeLevel, ResultTab};
use lexvis_logging::lexvis_info;

use super::config::Settings;
use super::effects::{engine_event_to_msg, spawn_engine};
use super::ui::chips::plain_lines;

const PRINT_WIDTH: usize = 100;

pub fn run(settings: &Settings, initial: Vec<Msg>) -> anyhow::Result<ExitCode> {
    let mut state = AppState::new();
    for msg in initial {
        state = update(state, msg).0;
        if let Some(notice) = state.view().notice {
            if notice.level == NoticeLevel::Error {
                eprintln!("{}", notice.text);
            }
        }
    }

    let (next, effects) = update(state, Msg::SubmitRequested);
    state = next;
    if effects.is_empty() {
        if let Some(err) = state.last_error() {
            eprintln!("{}", err.user_message());
        }
        return Ok(ExitCode::from(2));
    }

    let (engine, events) = spawn_engine(settings.client.clone())?;
    for effect in effects {
        if let Effect::SubmitTokenize {
            request_id,
            grammar,
            input_text,
        } = effect
        {
            lexvis_info!("Submitting request {} to {}", request_id, settings.client.base_url);
            engine.tokenize(request_id, grammar, input_text);
        }
    }

    // The client enforces its own timeouts; this only guards a stuck engine.
    let wait = settings.client.connect_timeout + settings.client.request_timeout + Duration::from_secs(1);
    while state.in_flight() {
        let Some(event) = events.recv_timeout(wait) else {
            bail!("no answer from the engine within {wait:?}");
        };
        state = update(state, engine_event_to_msg(event)).0;
    }

    if let Some(err) = state.last_error() {
        eprintln!("{}", err.user_message());
        eprintln!("{err}");
        return Ok(ExitCode::FAILURE);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_results(&mut out, &state).context("failed to write results")?;
    Ok(ExitCode::SUCCESS)
}

pub(crate) fn print_results(out: &mut impl Write, state: &AppState) -> io::Result<()> {
    let view = state.view();
    writeln!(out, "{} ({} tokens)", ResultTab::Visual.label(), view.token_count)?;
    for line in plain_lines(&view.chips, PRINT_WIDTH) {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    writeln!(out, "{}", ResultTab::RawData.label())?;
    let raw = serde_json::to_string_pretty(state.tokens()).map_err(io::Error::other)?;
    writeln!(out, "{raw}")?;
    Ok(())
}
