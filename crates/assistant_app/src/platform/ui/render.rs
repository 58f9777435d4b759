use assistant_core::{
    InlineSegment, PanelViewModel, ResultBody, ResultView, StepView, StepsView, MIN_TEXT_CHARS,
};

use super::constants::*;

pub fn render(view: &PanelViewModel) -> Vec<String> {
    let mut lines = vec![format!("== {TITLE} =="), format!("Student ID: {}", view.subject_id)];

    if view.text.is_empty() {
        lines.push("Issue: (empty)".to_string());
    } else {
        lines.push("Issue:".to_string());
        lines.extend(view.text.lines().map(|line| format!("  | {line}")));
    }

    let submit_state = if view.loading {
        "busy"
    } else if view.can_submit {
        "/submit"
    } else {
        "disabled"
    };
    lines.push(format!("[{}] ({submit_state})", view.submit_label));
    if !view.loading && !view.can_submit {
        lines.push(format!("  Describe the issue in at least {MIN_TEXT_CHARS} characters."));
    }

    if let Some(error) = &view.error {
        lines.push(format!("Error: {error}  ({ACTION_DISMISS})"));
    }

    if let Some(result) = &view.result {
        lines.push(RULE.to_string());
        render_result(result, &mut lines);
    }

    lines
}

fn render_result(result: &ResultView, lines: &mut Vec<String>) {
    lines.push(format!(
        "Category: {} | Technical: {}",
        result.header.category, result.header.technical
    ));

    match &result.body {
        ResultBody::TicketPrompt { lines: prompt } => {
            lines.extend(prompt.iter().map(|line| line.to_string()));
            lines.push(format!("Actions: {ACTION_OPEN_TICKET}   {ACTION_CANCEL}"));
        }
        ResultBody::Guidance {
            summary,
            steps,
            verify,
        } => {
            if let Some(summary) = summary {
                lines.extend(summary.lines().map(ToOwned::to_owned));
            }

            lines.push(STEPS_HEADING.to_string());
            match steps {
                StepsView::Placeholder(text) => lines.push(format!("  {text}")),
                StepsView::Numbered(rows) => {
                    for row in rows {
                        render_step(row, lines);
                    }
                }
            }

            if !verify.is_empty() {
                lines.push(VERIFY_HEADING.to_string());
                lines.extend(verify.iter().map(|item| format!("  - {item}")));
            }

            lines.push(format!("Actions: {ACTION_ESCALATE}"));
        }
    }
}

fn render_step(step: &StepView, lines: &mut Vec<String>) {
    match step {
        StepView::Prose { number, segments } => {
            lines.push(format!("  {number}. {}", format_segments(segments)));
        }
        StepView::Commands {
            number,
            intro,
            code,
        } => {
            lines.push(format!("  {number}. {intro}"));
            // Preformatted: every line kept as-is, blank ones included.
            lines.extend(code.split('\n').map(|line| format!("{CODE_INDENT}{line}")));
        }
    }
}

fn format_segments(segments: &[InlineSegment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            InlineSegment::Plain(text) => text.clone(),
            InlineSegment::Code(text) => format!("`{text}`"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assistant_core::{update, AnalysisResult, Guidance, Msg, PanelState};

    use super::render;

    fn with_result(result: AnalysisResult) -> PanelState {
        let (state, _) = update(
            PanelState::with_subject_id("u123"),
            Msg::TextChanged("apt cannot find foo".to_string()),
        );
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::AnalysisSucceeded {
                request_id: 1,
                result,
            },
        );
        state
    }

    fn technical(steps: &[&str], verify: &[&str]) -> AnalysisResult {
        let steps: Vec<String> = steps.iter().map(|s| s.to_string()).collect();
        AnalysisResult::new(Guidance::from_flag(
            Some(true),
            &steps,
            verify.iter().map(|s| s.to_string()).collect(),
        ))
    }

    #[test]
    fn empty_form_shows_disabled_submit() {
        let lines = render(&PanelState::with_subject_id("u123").view());
        assert!(lines.contains(&"Issue: (empty)".to_string()));
        assert!(lines.contains(&"[Get Recommendation] (disabled)".to_string()));
        assert!(!lines.iter().any(|line| line.starts_with("Category:")));
    }

    #[test]
    fn loading_shows_thinking_label() {
        let (state, _) = update(PanelState::new(), Msg::TextChanged("router on fire".into()));
        let (state, _) = update(state, Msg::SubmitClicked);
        let lines = render(&state.view());
        assert!(lines.contains(&"[Thinking…] (busy)".to_string()));
    }

    #[test]
    fn ticket_prompt_has_no_steps() {
        let result = AnalysisResult {
            category: Some("billing".to_string()),
            ..AnalysisResult::new(Guidance::NonTechnical)
        };
        let lines = render(&with_result(result).view());
        assert!(lines.contains(&"Category: billing | Technical: false".to_string()));
        assert!(lines.contains(&"This appears to be a non-technical complaint.".to_string()));
        assert!(!lines.contains(&"Steps to apply".to_string()));
        assert!(!lines.contains(&"Verify".to_string()));
    }

    #[test]
    fn code_block_and_verify_are_rendered() {
        let lines = render(
            &with_result(technical(
                &["Run the following commands/code:\napt install foo\n\napt list foo"],
                &["check foo -v"],
            ))
            .view(),
        );
        let start = lines
            .iter()
            .position(|line| line == "  1. Run the following commands/code:")
            .expect("code step");
        assert_eq!(lines[start + 1], "     apt install foo");
        assert_eq!(lines[start + 2], "     ");
        assert_eq!(lines[start + 3], "     apt list foo");
        assert_eq!(lines[start + 4], "Verify");
        assert_eq!(lines[start + 5], "  - check foo -v");
    }

    #[test]
    fn prose_keeps_inline_code_marked() {
        let lines = render(&with_result(technical(&["Open `settings.yaml` and edit"], &[])).view());
        assert!(lines.contains(&"  1. Open `settings.yaml` and edit".to_string()));
        assert!(!lines.contains(&"Verify".to_string()));
    }

    #[test]
    fn empty_steps_render_placeholder() {
        let lines = render(&with_result(technical(&[], &[])).view());
        assert!(lines.contains(&"  No specific steps provided.".to_string()));
        assert!(lines.contains(&"Actions: /ticket  Escalate to Support Team".to_string()));
    }

    #[test]
    fn error_is_shown_inline() {
        let (state, _) = update(PanelState::new(), Msg::TextChanged("router on fire".into()));
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::AnalysisFailed {
                request_id: 1,
                message: "rate limited".to_string(),
            },
        );
        let lines = render(&state.view());
        assert!(lines.contains(&"Error: rate limited  (/dismiss)".to_string()));
    }
}
