use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use lexvis_core::{GrammarArtifact, RequestId};
use lexvis_logging::{lexvis_debug, lexvis_info};

use crate::{EngineEvent, TokenizeClient};

enum EngineCommand {
    Tokenize {
        request_id: RequestId,
        grammar: GrammarArtifact,
        input_text: String,
    },
    Probe,
}

/// Command side of the engine. Requests run on a background tokio runtime.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Event side of the engine; completions arrive in resolution order.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn spawn(client: Arc<dyn TokenizeClient>) -> io::Result<(Self, EngineEvents)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("lexvis-engine")
            .build()?;

        thread::Builder::new()
            .name("lexvis-engine-commands".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let client = client.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(client.as_ref(), command, event_tx).await;
                    });
                }
                lexvis_debug!("Engine command channel closed; shutting down runtime");
                runtime.shutdown_timeout(Duration::from_secs(1));
            })?;

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn tokenize(&self, request_id: RequestId, grammar: GrammarArtifact, input_text: String) {
        let _ = self.cmd_tx.send(EngineCommand::Tokenize {
            request_id,
            grammar,
            input_text,
        });
    }

    pub fn probe(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Probe);
    }
}

impl EngineEvents {
    /// Blocks until the next event; `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    client: &dyn TokenizeClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Tokenize {
            request_id,
            grammar,
            input_text,
        } => {
            let result = client.tokenize(&grammar, &input_text).await;
            if let Ok(output) = &result {
                lexvis_info!(
                    "Request {} returned {} tokens in {:?}",
                    request_id,
                    output.tokens.len(),
                    output.elapsed
                );
            }
            let _ = event_tx.send(EngineEvent::TokenizeCompleted { request_id, result });
        }
        EngineCommand::Probe => {
            let result = client.probe().await;
            let _ = event_tx.send(EngineEvent::ProbeCompleted { result });
        }
    }
}
