use crate::{AppState, Effect, Msg, Notice, RawView, ResultTab, SubmitError};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::AppStarted => vec![Effect::ProbeService],
        Msg::ArtifactSelected(artifact) => {
            // Staging never uploads; the request only goes out on SubmitRequested.
            let text = format!(
                "Grammar staged: {} ({} bytes)",
                artifact.name(),
                artifact.size()
            );
            state.stage_artifact(artifact);
            state.set_notice(Notice::info(text));
            Vec::new()
        }
        Msg::ArtifactUnreadable { path, reason } => {
            state.set_notice(Notice::error(format!("Cannot read {path}: {reason}")));
            Vec::new()
        }
        Msg::ArtifactCleared => {
            state.clear_artifact();
            Vec::new()
        }
        Msg::InputEdited(text) => {
            state.set_input_text(text);
            Vec::new()
        }
        Msg::SubmitRequested => submit(&mut state),
        Msg::SubmitSucceeded { request_id, tokens } => {
            if state.finish_request(request_id) {
                state.replace_tokens(tokens);
                state.set_active_tab(ResultTab::Visual);
                state.set_notice(Notice::success("Text tokenized successfully!"));
            }
            Vec::new()
        }
        Msg::SubmitFailed { request_id, error } => {
            if state.finish_request(request_id) {
                state.record_error(error);
            }
            Vec::new()
        }
        Msg::TabChanged(tab) => {
            state.set_active_tab(tab);
            if tab == ResultTab::RawData && state.raw_view() == RawView::NotLoaded {
                vec![Effect::LoadRawView]
            } else {
                Vec::new()
            }
        }
        Msg::RawViewLoaded => {
            state.mark_raw_view_loaded();
            Vec::new()
        }
        Msg::ServiceProbed(status) => {
            state.set_service(status);
            Vec::new()
        }
        Msg::Tick => {
            state.age_notice();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    let Some(grammar) = state.artifact().cloned() else {
        state.record_error(SubmitError::MissingGrammar);
        return Vec::new();
    };
    if state.input_text().trim().is_empty() {
        state.record_error(SubmitError::EmptyInput);
        return Vec::new();
    }
    // One request at a time; a second submit while pending is dropped.
    if state.in_flight() {
        state.set_notice(Notice::warning("A tokenization request is already running"));
        return Vec::new();
    }

    let input_text = state.input_text().to_string();
    let request_id = state.begin_request();
    vec![Effect::SubmitTokenize {
        request_id,
        grammar,
        input_text,
    }]
}
