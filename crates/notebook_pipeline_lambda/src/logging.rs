use serde_json::json;

pub fn log_handler_info(event: &str, details: serde_json::Value) {
    eprintln!("{}", handler_log_line(event, None, details));
}

pub fn log_handler_error(event: &str, details: serde_json::Value) {
    eprintln!("{}", handler_log_line(event, Some("error"), details));
}

fn handler_log_line(event: &str, level: Option<&str>, details: serde_json::Value) -> String {
    let mut line = json!({
        "component": "pipeline_handler",
        "event": event,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "details": details,
    });
    if let Some(level) = level {
        line["level"] = json!(level);
    }
    line.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_lines_carry_level() {
        let line = handler_log_line("invocation_failed", Some("error"), json!({"message": "boom"}));
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("log line is JSON");

        assert_eq!(parsed["component"], "pipeline_handler");
        assert_eq!(parsed["level"], "error");
        assert_eq!(parsed["details"]["message"], "boom");
        assert!(parsed["timestamp"].as_str().is_some());
    }

    #[test]
    fn info_lines_omit_level() {
        let line = handler_log_line("invocation_started", None, json!({}));
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("log line is JSON");
        assert!(parsed.get("level").is_none());
    }
}
