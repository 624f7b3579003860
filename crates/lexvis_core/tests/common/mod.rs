#![allow(dead_code)]

use std::sync::Once;

use lexvis_core::{update, AppState, Effect, GrammarArtifact, Msg, RequestId, Token};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(lexvis_logging::initialize_for_tests);
}

pub fn grammar(name: &str) -> GrammarArtifact {
    GrammarArtifact::new(name, "text/plain", b"lexer grammar Hello;\nID : [a-z]+ ;\n".to_vec())
}

pub fn token(text: &str, token_type: &str, index: i64, start: i64) -> Token {
    Token {
        text: text.to_string(),
        token_type: token_type.to_string(),
        line: 1,
        column: start,
        channel: 0,
        token_index: index,
        start,
        stop: start + text.len() as i64 - 1,
    }
}

pub fn hello_world_tokens() -> Vec<Token> {
    vec![token("hello", "ID", 0, 0), token("world", "ID", 1, 6)]
}

/// Stages `grammar.g4`, types `input` and submits.
pub fn staged_and_submitted(input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(AppState::new(), Msg::ArtifactSelected(grammar("grammar.g4")));
    let (state, _) = update(state, Msg::InputEdited(input.to_string()));
    update(state, Msg::SubmitRequested)
}

pub fn request_id_of(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SubmitTokenize { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("submit effect")
}
