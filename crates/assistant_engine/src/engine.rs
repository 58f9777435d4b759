use std::collections::HashMap;
use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use assistant_core::{AnalysisRequest, AnalysisResult, RequestId};
use assistant_logging::{assistant_debug, assistant_error, assistant_info};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::client::{Analyzer, GENERIC_FAILURE};
use crate::{AnalyzeError, EngineEvent, FailureKind};

enum EngineCommand {
    Analyze {
        request_id: RequestId,
        request: AnalysisRequest,
    },
    Abort {
        request_id: RequestId,
    },
}

/// Runs analysis requests on a background tokio runtime.
///
/// Every `analyze` call is answered by exactly one
/// [`EngineEvent::AnalysisCompleted`], including aborted requests, which
/// complete with [`FailureKind::Cancelled`]. Dropping the handle cancels
/// everything still in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    shutdown: CancellationToken,
}

/// Receiving side of the engine's event stream.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn spawn(analyzer: Arc<dyn Analyzer>) -> io::Result<(Self, EngineEvents)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let shutdown = CancellationToken::new();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("assistant-engine-rt")
            .enable_all()
            .build()?;

        let root = shutdown.clone();
        thread::Builder::new()
            .name("assistant-engine".to_string())
            .spawn(move || {
                let mut in_flight: HashMap<RequestId, (CancellationToken, JoinHandle<()>)> =
                    HashMap::new();
                while let Ok(command) = cmd_rx.recv() {
                    in_flight.retain(|_, (_, task)| !task.is_finished());
                    match command {
                        EngineCommand::Analyze {
                            request_id,
                            request,
                        } => {
                            let token = root.child_token();
                            let task = runtime.spawn(run_analysis(
                                analyzer.clone(),
                                request_id,
                                request,
                                token.clone(),
                                event_tx.clone(),
                            ));
                            in_flight.insert(request_id, (token, task));
                        }
                        EngineCommand::Abort { request_id } => {
                            if let Some((token, _)) = in_flight.remove(&request_id) {
                                assistant_debug!("aborting request {}", request_id);
                                token.cancel();
                            }
                        }
                    }
                }
                for (token, _) in in_flight.values() {
                    token.cancel();
                }
                // Cancelled requests still report before the runtime goes away.
                runtime.block_on(async {
                    for (_, (_, task)) in in_flight {
                        let _ = task.await;
                    }
                });
                runtime.shutdown_timeout(Duration::from_millis(200));
            })?;

        Ok((Self { cmd_tx, shutdown }, EngineEvents { event_rx }))
    }

    pub fn analyze(&self, request_id: RequestId, request: AnalysisRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Analyze {
            request_id,
            request,
        });
    }

    pub fn abort(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Abort { request_id });
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl EngineEvents {
    /// Blocks for the next event; `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    /// Waits up to `timeout`; `None` on timeout or when the engine is gone.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

/// Runs the request in its own task so a panicking analyzer still completes.
async fn run_analysis(
    analyzer: Arc<dyn Analyzer>,
    request_id: RequestId,
    request: AnalysisRequest,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let task = tokio::spawn(analyze_or_cancel(analyzer, request_id, request, token));
    let result = match task.await {
        Ok(result) => result,
        Err(err) => {
            assistant_error!("request {} aborted unexpectedly: {}", request_id, err);
            Err(AnalyzeError::new(FailureKind::Network, GENERIC_FAILURE))
        }
    };
    let _ = event_tx.send(EngineEvent::AnalysisCompleted { request_id, result });
}

async fn analyze_or_cancel(
    analyzer: Arc<dyn Analyzer>,
    request_id: RequestId,
    request: AnalysisRequest,
    token: CancellationToken,
) -> Result<AnalysisResult, AnalyzeError> {
    tokio::select! {
        _ = token.cancelled() => {
            assistant_info!("request {} cancelled", request_id);
            Err(AnalyzeError::new(FailureKind::Cancelled, "request cancelled"))
        }
        result = analyzer.analyze(&request) => result,
    }
}
