use assistant_core::{Msg, PanelState, TicketKind};

/// One line typed by the user, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AppendText(String),
    SetSubject(String),
    ClearText,
    Submit,
    Cancel,
    Ticket,
    Dismiss,
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix('/') else {
        return Command::AppendText(line.to_string());
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match name {
        "id" => Command::SetSubject(arg.to_string()),
        "clear" => Command::ClearText,
        "submit" | "go" => Command::Submit,
        "cancel" => Command::Cancel,
        "ticket" | "escalate" => Command::Ticket,
        "dismiss" => Command::Dismiss,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        // "//text" escapes a literal leading slash.
        _ if rest.starts_with('/') => Command::AppendText(rest.to_string()),
        _ => Command::Unknown(name.to_string()),
    }
}

/// Translates a command into panel messages. Commands that only affect the
/// terminal (show, help, quit) produce none.
pub fn to_msgs(command: &Command, state: &PanelState) -> Vec<Msg> {
    match command {
        Command::AppendText(line) => {
            let text = if state.text().is_empty() {
                line.clone()
            } else {
                format!("{}\n{}", state.text(), line)
            };
            vec![Msg::TextChanged(text)]
        }
        Command::SetSubject(subject_id) => vec![Msg::SubjectIdChanged(subject_id.clone())],
        Command::ClearText => vec![Msg::TextChanged(String::new())],
        Command::Submit => vec![Msg::SubmitClicked],
        Command::Cancel => vec![Msg::CancelClicked],
        Command::Ticket => match state.result() {
            Some(result) if result.guidance.is_technical() => {
                vec![Msg::EscalateClicked(TicketKind::Technical)]
            }
            Some(_) => vec![Msg::EscalateClicked(TicketKind::NonTechnical)],
            None => Vec::new(),
        },
        Command::Dismiss => vec![Msg::ErrorDismissed],
        Command::Show | Command::Help | Command::Quit | Command::Unknown(_) => Vec::new(),
    }
}
