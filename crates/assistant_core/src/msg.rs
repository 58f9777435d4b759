#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the issue description.
    TextChanged(String),
    /// User edited the subject (student) identifier.
    SubjectIdChanged(String),
    /// User pressed "Get Recommendation".
    SubmitClicked,
    /// Engine delivered a parsed analysis.
    AnalysisSucceeded {
        request_id: crate::RequestId,
        result: crate::AnalysisResult,
    },
    /// Engine failed; `message` is already human-readable.
    AnalysisFailed {
        request_id: crate::RequestId,
        message: String,
    },
    /// User dismissed the ticket prompt.
    CancelClicked,
    /// User asked for a support ticket.
    EscalateClicked(crate::TicketKind),
    /// User dismissed the inline error.
    ErrorDismissed,
    /// Panel is being torn down.
    PanelClosed,
}
