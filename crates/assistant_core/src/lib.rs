//! Assistant core: pure panel state machine, analysis model and view-model helpers.
mod analysis;
mod effect;
mod msg;
mod state;
mod ticket;
mod update;
mod view_model;

pub use analysis::{
    inline_segments, AnalysisRequest, AnalysisResult, DebugCode, Guidance, InlineSegment,
    RecordId, Step, CODE_STEP_PREFIX,
};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{Lifecycle, PanelState, RequestId, MIN_TEXT_CHARS};
pub use ticket::{ticket_target, TicketKind, TicketRequest};
pub use update::update;
pub use view_model::{
    PanelViewModel, ResultBody, ResultHeader, ResultView, StepView, StepsView, COMMANDS_INTRO,
    NO_STEPS_PLACEHOLDER, SUBMIT_LABEL, SUBMIT_LABEL_LOADING, TICKET_PROMPT,
};
