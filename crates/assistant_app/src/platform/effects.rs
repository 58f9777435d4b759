use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use assistant_core::{ticket_target, Effect, Msg};
use assistant_engine::{Analyzer, EngineEvent, EngineEvents, EngineHandle, FailureKind};
use assistant_logging::{assistant_info, assistant_warn};
use url::Url;

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
    ticket_base: Url,
    app_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(
        analyzer: Arc<dyn Analyzer>,
        ticket_base: Url,
        app_tx: mpsc::Sender<AppEvent>,
    ) -> io::Result<Self> {
        let (engine, events) = EngineHandle::spawn(analyzer)?;
        spawn_event_loop(events, app_tx.clone())?;
        Ok(Self {
            engine,
            ticket_base,
            app_tx,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartAnalysis {
                    request_id,
                    request,
                } => {
                    assistant_info!(
                        "StartAnalysis request_id={} student={} text_chars={}",
                        request_id,
                        request.subject_id,
                        request.text.chars().count()
                    );
                    self.engine.analyze(request_id, request);
                }
                Effect::AbortAnalysis { request_id } => {
                    assistant_info!("AbortAnalysis request_id={}", request_id);
                    self.engine.abort(request_id);
                }
                Effect::OpenTicket(request) => {
                    let target = ticket_target(&self.ticket_base, &request);
                    assistant_info!(
                        "OpenTicket kind={} student={} prefill={} record={:?}",
                        request.kind,
                        request.subject_id,
                        request.prefill.is_some(),
                        request.record_id.as_ref().map(ToString::to_string)
                    );
                    let _ = self.app_tx.send(AppEvent::Navigate(target));
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, app_tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("assistant-events".to_string())
        .spawn(move || {
            while let Some(event) = events.recv() {
                if app_tx.send(AppEvent::Msg(map_event(event))).is_err() {
                    break;
                }
            }
        })?;
    Ok(())
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AnalysisCompleted { request_id, result } => match result {
            Ok(result) => Msg::AnalysisSucceeded { request_id, result },
            Err(err) => {
                if err.kind != FailureKind::Cancelled {
                    assistant_warn!("Request {} failed ({}): {}", request_id, err.kind, err);
                }
                Msg::AnalysisFailed {
                    request_id,
                    message: err.message,
                }
            }
        },
    }
}
