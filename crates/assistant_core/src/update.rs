use crate::{Effect, Guidance, Lifecycle, Msg, PanelState, TicketKind, TicketRequest};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PanelState, msg: Msg) -> (PanelState, Vec<Effect>) {
    let effects = match msg {
        Msg::TextChanged(text) => {
            state.set_text(text);
            Vec::new()
        }
        Msg::SubjectIdChanged(subject_id) => {
            state.set_subject_id(subject_id);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Disabled while a request is in flight or the text is too short.
            if !state.can_submit() {
                return (state, Vec::new());
            }
            let (request_id, request) = state.begin_request();
            vec![Effect::StartAnalysis {
                request_id,
                request,
            }]
        }
        Msg::AnalysisSucceeded { request_id, result } => {
            state.settle(request_id, Lifecycle::Succeeded(result));
            Vec::new()
        }
        Msg::AnalysisFailed {
            request_id,
            message,
        } => {
            state.settle(request_id, Lifecycle::Failed(message));
            Vec::new()
        }
        Msg::CancelClicked => {
            let non_technical = state
                .result()
                .is_some_and(|result| result.guidance == Guidance::NonTechnical);
            if non_technical {
                state.reset();
            }
            Vec::new()
        }
        Msg::EscalateClicked(kind) => match escalation(&state, kind) {
            Some(request) => vec![Effect::OpenTicket(request)],
            None => Vec::new(),
        },
        Msg::ErrorDismissed => {
            if state.error().is_some() {
                state.reset();
            }
            Vec::new()
        }
        Msg::PanelClosed => match state.in_flight() {
            Some(request_id) => {
                state.reset();
                vec![Effect::AbortAnalysis { request_id }]
            }
            None => Vec::new(),
        },
    };

    (state, effects)
}

/// Each display mode offers exactly one kind of ticket.
fn escalation(state: &PanelState, kind: TicketKind) -> Option<TicketRequest> {
    let result = state.result()?;
    let offered = if result.guidance.is_technical() {
        TicketKind::Technical
    } else {
        TicketKind::NonTechnical
    };
    if kind != offered {
        return None;
    }
    Some(TicketRequest {
        kind,
        subject_id: state.subject_id().to_string(),
        text: state.text().to_string(),
        prefill: result.ticket_prefill.clone(),
        record_id: result.record_id.clone(),
    })
}
