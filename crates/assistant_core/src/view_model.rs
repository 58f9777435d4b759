use crate::{inline_segments, AnalysisResult, Guidance, InlineSegment, PanelState, Step};

pub const NO_STEPS_PLACEHOLDER: &str = "No specific steps provided.";
pub const SUBMIT_LABEL: &str = "Get Recommendation";
pub const SUBMIT_LABEL_LOADING: &str = "Thinking…";
pub const TICKET_PROMPT: [&str; 2] = [
    "This appears to be a non-technical complaint.",
    "Would you like to open a support ticket?",
];
pub const COMMANDS_INTRO: &str = "Run the following commands/code:";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelViewModel {
    pub text: String,
    pub subject_id: String,
    pub can_submit: bool,
    pub loading: bool,
    pub submit_label: &'static str,
    pub error: Option<String>,
    pub result: Option<ResultView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub header: ResultHeader,
    pub body: ResultBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultHeader {
    pub category: String,
    pub technical: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultBody {
    /// Non-technical: fixed prompt, actions are "open ticket" and "cancel".
    TicketPrompt { lines: [&'static str; 2] },
    /// Technical: the single action is "escalate".
    Guidance {
        summary: Option<String>,
        steps: StepsView,
        verify: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepsView {
    Placeholder(&'static str),
    Numbered(Vec<StepView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepView {
    Prose {
        number: usize,
        segments: Vec<InlineSegment>,
    },
    Commands {
        number: usize,
        intro: &'static str,
        code: String,
    },
}

impl PanelViewModel {
    pub(crate) fn from_state(state: &PanelState) -> Self {
        let loading = state.is_loading();
        Self {
            text: state.text().to_string(),
            subject_id: state.subject_id().to_string(),
            can_submit: state.can_submit(),
            loading,
            submit_label: if loading {
                SUBMIT_LABEL_LOADING
            } else {
                SUBMIT_LABEL
            },
            error: state.error().map(ToOwned::to_owned),
            result: state.result().map(ResultView::from_result),
        }
    }
}

impl ResultView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let category = result
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("—")
            .to_string();
        let technical = match result.guidance.flag() {
            Some(true) => "true",
            Some(false) => "false",
            None => "unspecified",
        };
        let body = match &result.guidance {
            Guidance::NonTechnical => ResultBody::TicketPrompt {
                lines: TICKET_PROMPT,
            },
            Guidance::Technical { steps, verify, .. } => ResultBody::Guidance {
                summary: result.summary.clone().filter(|s| !s.is_empty()),
                steps: steps_view(steps),
                verify: verify.clone(),
            },
        };
        Self {
            header: ResultHeader {
                category,
                technical,
            },
            body,
        }
    }
}

fn steps_view(steps: &[Step]) -> StepsView {
    if steps.is_empty() {
        return StepsView::Placeholder(NO_STEPS_PLACEHOLDER);
    }
    let rows = steps
        .iter()
        .enumerate()
        .map(|(index, step)| match step {
            Step::Code(code) => StepView::Commands {
                number: index + 1,
                intro: COMMANDS_INTRO,
                code: code.clone(),
            },
            Step::Prose(text) => StepView::Prose {
                number: index + 1,
                segments: inline_segments(text),
            },
        })
        .collect();
    StepsView::Numbered(rows)
}
