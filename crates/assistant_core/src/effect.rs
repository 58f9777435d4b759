use crate::{AnalysisRequest, RequestId, TicketRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one analysis request; the answer comes back tagged with `request_id`.
    StartAnalysis {
        request_id: RequestId,
        request: AnalysisRequest,
    },
    /// Drop interest in an in-flight request and cancel it.
    AbortAnalysis { request_id: RequestId },
    /// Hand off to the external ticket-creation page.
    OpenTicket(TicketRequest),
}
