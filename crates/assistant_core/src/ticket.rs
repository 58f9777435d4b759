use std::fmt;

use url::Url;

use crate::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketKind {
    Technical,
    NonTechnical,
}

impl TicketKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TicketKind::Technical => "technical",
            TicketKind::NonTechnical => "non-technical",
        }
    }
}

impl fmt::Display for TicketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the ticket page needs to pre-populate a new ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRequest {
    pub kind: TicketKind,
    pub subject_id: String,
    pub text: String,
    pub prefill: Option<String>,
    pub record_id: Option<RecordId>,
}

/// Builds the ticket page URL. Any query already on `base` is replaced.
///
/// Parameters, in order: `type`, `student`, `text`, then `prefill` and `ai`
/// when present. An empty prefill and a zero or empty record id are omitted.
pub fn ticket_target(base: &Url, request: &TicketRequest) -> Url {
    let mut target = base.clone();
    target.set_query(None);
    {
        let mut query = target.query_pairs_mut();
        query
            .append_pair("type", request.kind.as_str())
            .append_pair("student", &request.subject_id)
            .append_pair("text", &request.text);
        if let Some(prefill) = request.prefill.as_deref().filter(|p| !p.is_empty()) {
            query.append_pair("prefill", prefill);
        }
        if let Some(record_id) = request.record_id.as_ref().filter(|id| !id.is_blank()) {
            query.append_pair("ai", &record_id.to_string());
        }
    }
    target
}
