pub const TITLE: &str = "AI Recommendation";
pub const RULE: &str = "----------------------------------------";
pub const STEPS_HEADING: &str = "Steps to apply";
pub const VERIFY_HEADING: &str = "Verify";
pub const ACTION_OPEN_TICKET: &str = "/ticket  Open Ticket (Non-Technical)";
pub const ACTION_CANCEL: &str = "/cancel  Cancel";
pub const ACTION_ESCALATE: &str = "/ticket  Escalate to Support Team";
pub const ACTION_DISMISS: &str = "/dismiss";
pub const CODE_INDENT: &str = "     ";

pub const HELP: &[&str] = &[
    "Type your issue; each line is appended to the description.",
    "  /id <value>   set the student ID",
    "  /submit       get a recommendation (needs at least 5 characters)",
    "  /ticket       open a support ticket for the shown result",
    "  /cancel       dismiss a non-technical result",
    "  /dismiss      clear the error message",
    "  /clear        clear the description",
    "  /show         redraw the panel",
    "  /quit         exit",
];
