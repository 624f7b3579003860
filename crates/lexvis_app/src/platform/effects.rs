use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use lexvis_core::{Effect, Msg, RawTreeRenderer, ServiceStatus};
use lexvis_engine::{ClientSettings, EngineEvent, EngineEvents, EngineHandle, ReqwestTokenizeClient};
use lexvis_logging::{lexvis_debug, lexvis_error, lexvis_info, lexvis_warn};

/// Executes effects from `update` and feeds engine results back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, msg_tx: mpsc::Sender<Msg>) -> anyhow::Result<Self> {
        let (engine, events) = spawn_engine(settings)?;
        let runner = Self { engine, msg_tx };
        runner.spawn_event_loop(events);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ProbeService => {
                    lexvis_debug!("Probing tokenization service");
                    self.engine.probe();
                }
                Effect::SubmitTokenize {
                    request_id,
                    grammar,
                    input_text,
                } => {
                    lexvis_info!(
                        "SubmitTokenize request_id={} grammar={} grammar_bytes={} input_len={}",
                        request_id,
                        grammar.name(),
                        grammar.size(),
                        input_text.len()
                    );
                    self.engine.tokenize(request_id, grammar, input_text);
                }
                Effect::LoadRawView => {
                    let renderer = RawTreeRenderer::acquire();
                    lexvis_debug!(
                        "Raw tree renderer ready (collapse depth {})",
                        renderer.collapse_depth()
                    );
                    let _ = self.msg_tx.send(Msg::RawViewLoaded);
                }
            }
        }
    }

    fn spawn_event_loop(&self, events: EngineEvents) {
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || {
            while let Some(event) = events.recv() {
                if msg_tx.send(engine_event_to_msg(event)).is_err() {
                    break;
                }
            }
        });
    }
}

pub(crate) fn spawn_engine(settings: ClientSettings) -> anyhow::Result<(EngineHandle, EngineEvents)> {
    let client = ReqwestTokenizeClient::new(settings).context("failed to build HTTP client")?;
    EngineHandle::spawn(Arc::new(client)).context("failed to start engine")
}

/// Maps an engine completion to the reducer message, logging failure detail.
pub(crate) fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::TokenizeCompleted { request_id, result } => match result {
            Ok(output) => Msg::SubmitSucceeded {
                request_id,
                tokens: output.tokens,
            },
            Err(err) => {
                lexvis_error!("Tokenize request {} failed: {}", request_id, err);
                Msg::SubmitFailed {
                    request_id,
                    error: err.to_submit_error(),
                }
            }
        },
        EngineEvent::ProbeCompleted { result } => match result {
            Ok(output) => Msg::ServiceProbed(ServiceStatus::Online {
                message: output.message,
            }),
            Err(err) => {
                lexvis_warn!("Tokenization service probe failed: {}", err);
                Msg::ServiceProbed(ServiceStatus::Offline {
                    reason: err.to_string(),
                })
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use lexvis_core::{SubmitError, Token};
    use lexvis_engine::{FailureKind, ProbeOutput, TokenizeError, TokenizeOutput};

    use super::*;

    fn error(kind: FailureKind, message: &str) -> TokenizeError {
        TokenizeError {
            kind,
            message: message.to_string(),
        }
    }

    #[test]
    fn success_becomes_submit_succeeded() {
        let token = Token {
            text: "a".to_string(),
            token_type: "WORD".to_string(),
            line: 1,
            column: 0,
            channel: 0,
            token_index: 0,
            start: 0,
            stop: 0,
        };
        let msg = engine_event_to_msg(EngineEvent::TokenizeCompleted {
            request_id: 3,
            result: Ok(TokenizeOutput {
                tokens: vec![token.clone()],
                echoed_input: Some("a".to_string()),
                elapsed: Duration::from_millis(5),
            }),
        });
        assert_eq!(
            msg,
            Msg::SubmitSucceeded {
                request_id: 3,
                tokens: vec![token]
            }
        );
    }

    #[test]
    fn malformed_body_becomes_malformed_response() {
        let msg = engine_event_to_msg(EngineEvent::TokenizeCompleted {
            request_id: 4,
            result: Err(error(FailureKind::MalformedResponse, "missing field `tokens`")),
        });
        assert_eq!(
            msg,
            Msg::SubmitFailed {
                request_id: 4,
                error: SubmitError::MalformedResponse {
                    reason: "missing field `tokens`".to_string()
                }
            }
        );
    }

    #[test]
    fn probe_results_map_to_service_status() {
        let online = engine_event_to_msg(EngineEvent::ProbeCompleted {
            result: Ok(ProbeOutput {
                message: Some("up".to_string()),
            }),
        });
        assert_eq!(
            online,
            Msg::ServiceProbed(ServiceStatus::Online {
                message: Some("up".to_string())
            })
        );

        let offline = engine_event_to_msg(EngineEvent::ProbeCompleted {
            result: Err(error(FailureKind::Network, "connection refused")),
        });
        assert_eq!(
            offline,
            Msg::ServiceProbed(ServiceStatus::Offline {
                reason: "network error: connection refused".to_string()
            })
        );
    }
}
