use crate::view_model::PanelViewModel;
use crate::{AnalysisRequest, AnalysisResult};

pub type RequestId = u64;

/// Minimum number of characters, after trimming, before a submit is allowed.
pub const MIN_TEXT_CHARS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Idle,
    Loading {
        request_id: RequestId,
    },
    Succeeded(AnalysisResult),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelState {
    text: String,
    subject_id: String,
    lifecycle: Lifecycle,
    last_request_id: RequestId,
    dirty: bool,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject_id(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Loading { .. })
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        match self.lifecycle {
            Lifecycle::Loading { request_id } => Some(request_id),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.lifecycle {
            Lifecycle::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.lifecycle {
            Lifecycle::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn has_valid_text(&self) -> bool {
        self.text.trim().chars().count() >= MIN_TEXT_CHARS
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading() && self.has_valid_text()
    }

    pub fn view(&self) -> PanelViewModel {
        PanelViewModel::from_state(self)
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_text(&mut self, text: String) {
        if self.text != text {
            self.text = text;
            self.dirty = true;
        }
    }

    pub(crate) fn set_subject_id(&mut self, subject_id: String) {
        if self.subject_id != subject_id {
            self.subject_id = subject_id;
            self.dirty = true;
        }
    }

    /// Enters Loading with a fresh id. Any previous result or error is dropped.
    pub(crate) fn begin_request(&mut self) -> (RequestId, AnalysisRequest) {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.lifecycle = Lifecycle::Loading { request_id };
        self.dirty = true;
        let request = AnalysisRequest {
            subject_id: self.subject_id.clone(),
            text: self.text.clone(),
        };
        (request_id, request)
    }

    /// Settles the in-flight request. Returns false for stale ids.
    pub(crate) fn settle(&mut self, request_id: RequestId, outcome: Lifecycle) -> bool {
        if self.in_flight() != Some(request_id) {
            return false;
        }
        self.lifecycle = outcome;
        self.dirty = true;
        true
    }

    pub(crate) fn reset(&mut self) {
        self.lifecycle = Lifecycle::Idle;
        self.dirty = true;
    }
}
