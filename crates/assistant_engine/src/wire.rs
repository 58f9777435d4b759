use assistant_core::{AnalysisRequest, AnalysisResult, DebugCode, Guidance, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeBody<'a> {
    student_id: &'a str,
    text: &'a str,
}

impl<'a> From<&'a AnalysisRequest> for AnalyzeBody<'a> {
    fn from(request: &'a AnalysisRequest) -> Self {
        Self {
            student_id: &request.subject_id,
            text: &request.text,
        }
    }
}

/// Success body. The service also sends `raw` and `latency_ms`; both are ignored.
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    ui: WireResult,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireResult {
    status: Option<String>,
    is_technical: Option<bool>,
    category: Option<String>,
    summary: Option<String>,
    code_language: Option<String>,
    code: Option<String>,
    steps: Option<Vec<String>>,
    verify: Option<Vec<String>>,
    ask_more: Option<Vec<String>>,
    ticket_prefill: Option<String>,
    /// Not declared by the service schema; any JSON shape is tolerated.
    ai_record_id: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    pub(crate) detail: Option<serde_json::Value>,
}

/// Parses a success body into the panel's result model.
pub fn parse_analysis(body: &[u8]) -> Result<AnalysisResult, serde_json::Error> {
    let response: AnalyzeResponse = serde_json::from_slice(body)?;
    Ok(response.ui.into_result())
}

impl WireResult {
    fn into_result(self) -> AnalysisResult {
        let steps = self.steps.unwrap_or_default();
        let guidance = Guidance::from_flag(
            self.is_technical,
            &steps,
            self.verify.unwrap_or_default(),
        );
        AnalysisResult {
            status: self.status,
            category: self.category,
            summary: self.summary,
            ticket_prefill: self.ticket_prefill,
            record_id: self.ai_record_id.and_then(record_id),
            ask_more: self.ask_more.unwrap_or_default(),
            debug: DebugCode {
                language: self.code_language,
                code: self.code,
            },
            guidance,
        }
    }
}

/// Integral numbers (`3` or `3.0`) stay numeric, strings are taken as-is,
/// anything else is forwarded as its JSON text. `null` means absent.
fn record_id(value: serde_json::Value) -> Option<RecordId> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(RecordId::Text(text)),
        serde_json::Value::Number(number) => Some(
            number
                .as_i64()
                .or_else(|| {
                    number
                        .as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                        .map(|f| f as i64)
                })
                .map(RecordId::Number)
                .unwrap_or_else(|| RecordId::Text(number.to_string())),
        ),
        other => Some(RecordId::Text(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use assistant_core::{Guidance, RecordId, Step};

    use super::*;

    #[test]
    fn parses_technical_payload() {
        let body = br#"{
            "raw": {"anything": true},
            "latency_ms": 812,
            "ui": {
                "status": "ok",
                "is_technical": true,
                "category": "network",
                "summary": "VPN client misconfigured",
                "code_language": "bash",
                "code": "nmcli con up vpn",
                "steps": ["Open `vpn.conf`", "Run the following commands/code:\nnmcli con up vpn"],
                "verify": ["ping intranet"],
                "ask_more": ["Which OS?"],
                "ticket_prefill": "VPN issue",
                "ai_record_id": 12
            }
        }"#;
        let result = parse_analysis(body).unwrap();

        assert_eq!(result.category.as_deref(), Some("network"));
        assert_eq!(result.record_id, Some(RecordId::Number(12)));
        assert_eq!(result.debug.code.as_deref(), Some("nmcli con up vpn"));
        assert_eq!(result.ask_more, vec!["Which OS?".to_string()]);
        assert_eq!(
            result.guidance,
            Guidance::Technical {
                declared: true,
                steps: vec![
                    Step::Prose("Open `vpn.conf`".to_string()),
                    Step::Code("nmcli con up vpn".to_string()),
                ],
                verify: vec!["ping intranet".to_string()],
            }
        );
    }

    #[test]
    fn nulls_and_missing_fields_are_tolerated() {
        let body = br#"{"ui": {"category": null, "summary": null, "steps": null}}"#;
        let result = parse_analysis(body).unwrap();
        assert_eq!(result.category, None);
        assert_eq!(
            result.guidance,
            Guidance::Technical {
                declared: false,
                steps: Vec::new(),
                verify: Vec::new(),
            }
        );
    }

    #[test]
    fn string_record_id_is_accepted() {
        let body = br#"{"ui": {"is_technical": false, "ai_record_id": "rec-9"}}"#;
        let result = parse_analysis(body).unwrap();
        assert_eq!(result.guidance, Guidance::NonTechnical);
        assert_eq!(result.record_id, Some(RecordId::Text("rec-9".to_string())));
    }

    #[test]
    fn odd_record_id_shapes_do_not_fail_the_body() {
        let body = br#"{"ui": {"is_technical": false, "ai_record_id": 3.0}}"#;
        let result = parse_analysis(body).unwrap();
        assert_eq!(result.guidance, Guidance::NonTechnical);
        assert_eq!(result.record_id, Some(RecordId::Number(3)));

        let body = br#"{"ui": {"ai_record_id": 2.5}}"#;
        assert_eq!(
            parse_analysis(body).unwrap().record_id,
            Some(RecordId::Text("2.5".to_string()))
        );

        let body = br#"{"ui": {"ai_record_id": {"id": 3}}}"#;
        assert_eq!(
            parse_analysis(body).unwrap().record_id,
            Some(RecordId::Text(r#"{"id":3}"#.to_string()))
        );

        let body = br#"{"ui": {"ai_record_id": null}}"#;
        assert_eq!(parse_analysis(body).unwrap().record_id, None);
    }

    #[test]
    fn missing_ui_is_an_error() {
        assert!(parse_analysis(br#"{"raw": {}}"#).is_err());
        assert!(parse_analysis(b"not json").is_err());
    }

    #[test]
    fn request_body_uses_wire_names() {
        let request = AnalysisRequest {
            subject_id: "u123".to_string(),
            text: "printer jammed".to_string(),
        };
        let json = serde_json::to_value(AnalyzeBody::from(&request)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"student_id": "u123", "text": "printer jammed"})
        );
    }
}
