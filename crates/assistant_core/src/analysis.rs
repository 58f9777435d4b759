use std::fmt;

/// Wire sentinel marking a step whose remainder is a verbatim command block.
pub const CODE_STEP_PREFIX: &str = "Run the following commands/code:\n";

/// What the panel sends for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub subject_id: String,
    pub text: String,
}

/// Identifier of the analysis record stored by the service, if it reported one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Zero and the empty string carry no record.
    pub fn is_blank(&self) -> bool {
        match self {
            RecordId::Number(id) => *id == 0,
            RecordId::Text(id) => id.is_empty(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(id) => write!(f, "{id}"),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

/// Generated code kept for support/debugging. Never rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DebugCode {
    pub language: Option<String>,
    pub code: Option<String>,
}

/// One ordered remediation instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Prose; backtick-delimited spans are inline code.
    Prose(String),
    /// Commands to run, shown verbatim.
    Code(String),
}

impl Step {
    /// Classifies a wire step string by its prefix.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(CODE_STEP_PREFIX) {
            Some(code) => Step::Code(code.to_string()),
            None => Step::Prose(raw.to_string()),
        }
    }
}

/// The two mutually exclusive display modes of a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guidance {
    /// Service classified the issue as non-technical; only a ticket is offered.
    NonTechnical,
    /// Technical guidance. `declared` is false when the service omitted the flag.
    Technical {
        declared: bool,
        steps: Vec<Step>,
        verify: Vec<String>,
    },
}

impl Guidance {
    /// Selects the mode from the service flag. Only an explicit `false` is
    /// non-technical; steps and verify are discarded in that case.
    pub fn from_flag(is_technical: Option<bool>, steps: &[String], verify: Vec<String>) -> Self {
        match is_technical {
            Some(false) => Guidance::NonTechnical,
            declared => Guidance::Technical {
                declared: declared.is_some(),
                steps: steps.iter().map(|raw| Step::parse(raw)).collect(),
                verify,
            },
        }
    }

    pub fn is_technical(&self) -> bool {
        matches!(self, Guidance::Technical { .. })
    }

    /// The flag as the service reported it.
    pub fn flag(&self) -> Option<bool> {
        match self {
            Guidance::NonTechnical => Some(false),
            Guidance::Technical { declared: true, .. } => Some(true),
            Guidance::Technical { declared: false, .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub status: Option<String>,
    pub category: Option<String>,
    pub summary: Option<String>,
    pub ticket_prefill: Option<String>,
    pub record_id: Option<RecordId>,
    /// Follow-up questions suggested by the service. Retained, not rendered.
    pub ask_more: Vec<String>,
    pub debug: DebugCode,
    pub guidance: Guidance,
}

impl AnalysisResult {
    /// A result with only the display mode set.
    pub fn new(guidance: Guidance) -> Self {
        Self {
            status: None,
            category: None,
            summary: None,
            ticket_prefill: None,
            record_id: None,
            ask_more: Vec::new(),
            debug: DebugCode::default(),
            guidance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSegment {
    Plain(String),
    Code(String),
}

impl InlineSegment {
    pub fn text(&self) -> &str {
        match self {
            InlineSegment::Plain(text) | InlineSegment::Code(text) => text,
        }
    }
}

/// Splits prose on backticks. Segments alternate plain/code starting with
/// plain; empty segments are kept so the split is exact.
pub fn inline_segments(text: &str) -> Vec<InlineSegment> {
    text.split('`')
        .enumerate()
        .map(|(index, part)| {
            if index % 2 == 1 {
                InlineSegment::Code(part.to_string())
            } else {
                InlineSegment::Plain(part.to_string())
            }
        })
        .collect()
}
