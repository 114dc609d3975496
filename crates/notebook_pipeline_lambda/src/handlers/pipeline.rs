use notebook_pipeline_core::{
    assemble_script, extract_code_cells, wrap_in_entry_point, NotebookDocument, PipelineError,
    EXCLUSION_TAG,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adapters::notebook_source::NotebookSource;
use crate::adapters::program_runner::{ProgramRunner, ProgramUnit};
use crate::config::HandlerConfig;
use crate::logging::{log_handler_error, log_handler_info};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

/// Every failure collapses into `Failed` with the error's display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded,
    Failed(String),
}

impl From<Result<(), PipelineError>> for RunOutcome {
    fn from(result: Result<(), PipelineError>) -> Self {
        match result {
            Ok(()) => RunOutcome::Succeeded,
            Err(error) => RunOutcome::Failed(error.to_string()),
        }
    }
}

impl RunOutcome {
    pub fn into_response(self) -> HandlerResponse {
        match self {
            RunOutcome::Succeeded => HandlerResponse {
                status_code: 200,
                body: Value::Null.to_string(),
            },
            RunOutcome::Failed(message) => HandlerResponse {
                status_code: 500,
                body: Value::String(message).to_string(),
            },
        }
    }
}

/// Extract, assemble and wrap a document's code cells into a loadable unit.
pub fn build_program_unit(document: &NotebookDocument, config: &HandlerConfig) -> ProgramUnit {
    let script = assemble_script(extract_code_cells(document, EXCLUSION_TAG));
    ProgramUnit {
        module_name: config.module_name.clone(),
        entry_point: config.entry_point.clone(),
        source: wrap_in_entry_point(&script, &config.entry_point),
    }
}

pub fn run_pipeline(
    config: &HandlerConfig,
    source: &dyn NotebookSource,
    runner: &dyn ProgramRunner,
) -> Result<(), PipelineError> {
    let document = source.fetch_document()?;
    log_handler_info(
        "document_fetched",
        json!({
            "nbformat": document.nbformat,
            "cells": document.cells.len(),
        }),
    );

    let unit = build_program_unit(&document, config);
    log_handler_info(
        "program_assembled",
        json!({
            "module": unit.module_name,
            "entry_point": unit.entry_point,
            "source_bytes": unit.source.len(),
        }),
    );

    runner.run_program(&unit)
}

pub fn handle_invocation(
    config: &HandlerConfig,
    source: &dyn NotebookSource,
    runner: &dyn ProgramRunner,
) -> HandlerResponse {
    log_handler_info(
        "invocation_started",
        json!({ "notebook_url": config.notebook_url }),
    );

    let outcome = RunOutcome::from(run_pipeline(config, source, runner));
    match &outcome {
        RunOutcome::Succeeded => log_handler_info("invocation_succeeded", json!({})),
        RunOutcome::Failed(message) => {
            log_handler_error("invocation_failed", json!({ "message": message }))
        }
    }
    outcome.into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use notebook_pipeline_core::Cell;

    use super::*;
    use crate::adapters::notebook_source::StaticNotebookSource;

    struct CapturingRunner {
        units: Mutex<Vec<ProgramUnit>>,
    }

    impl CapturingRunner {
        fn new() -> Self {
            Self {
                units: Mutex::new(Vec::new()),
            }
        }

        fn units(&self) -> Vec<ProgramUnit> {
            self.units.lock().expect("poisoned mutex").clone()
        }
    }

    impl ProgramRunner for CapturingRunner {
        fn run_program(&self, unit: &ProgramUnit) -> Result<(), PipelineError> {
            self.units.lock().expect("poisoned mutex").push(unit.clone());
            Ok(())
        }
    }

    struct FailingRunner;

    impl ProgramRunner for FailingRunner {
        fn run_program(&self, _unit: &ProgramUnit) -> Result<(), PipelineError> {
            Err(PipelineError::Execution(
                "name 'undefined_frame' is not defined".to_string(),
            ))
        }
    }

    struct UnreachableSource;

    impl NotebookSource for UnreachableSource {
        fn fetch_document(&self) -> Result<NotebookDocument, PipelineError> {
            Err(PipelineError::Fetch("connection refused".to_string()))
        }
    }

    fn notebook(cells: Vec<(&str, Vec<&str>)>) -> NotebookDocument {
        NotebookDocument {
            nbformat: 4,
            cells: cells
                .into_iter()
                .map(|(cell_type, lines)| Cell {
                    cell_type: cell_type.to_string(),
                    lines: lines.iter().map(|line| line.to_string()).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn success_returns_null_body() {
        let source = StaticNotebookSource::new(notebook(vec![("code", vec!["x = 1\n"])]));
        let runner = CapturingRunner::new();

        let response = handle_invocation(&HandlerConfig::default(), &source, &runner);

        assert_eq!(
            response,
            HandlerResponse {
                status_code: 200,
                body: "null".to_string(),
            }
        );
        assert_eq!(runner.units().len(), 1);
    }

    #[test]
    fn runner_receives_wrapped_program_under_fixed_names() {
        let source = StaticNotebookSource::new(notebook(vec![
            ("markdown", vec!["# heading\n"]),
            ("code", vec!["x = 1\n", "y = 2  #noprod\n", "z = 3\n"]),
        ]));
        let runner = CapturingRunner::new();

        handle_invocation(&HandlerConfig::default(), &source, &runner);

        let units = runner.units();
        assert_eq!(units[0].module_name, "pipeline");
        assert_eq!(units[0].entry_point, "run");
        assert_eq!(
            units[0].source,
            "def run():\n    #cell 1\n    x = 1\n    z = 3\n    \n    pass\n"
        );
    }

    #[test]
    fn empty_notebook_runs_a_no_op_routine() {
        let source = StaticNotebookSource::new(notebook(Vec::new()));
        let runner = CapturingRunner::new();

        let response = handle_invocation(&HandlerConfig::default(), &source, &runner);

        assert_eq!(response.status_code, 200);
        assert_eq!(runner.units()[0].source, "def run():\n    pass\n");
    }

    #[test]
    fn fetch_failure_returns_json_encoded_message() {
        let runner = CapturingRunner::new();

        let response = handle_invocation(&HandlerConfig::default(), &UnreachableSource, &runner);

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body,
            "\"failed to fetch notebook: connection refused\""
        );
        assert!(runner.units().is_empty());
    }

    #[test]
    fn runtime_failure_returns_exception_text() {
        let source = StaticNotebookSource::new(notebook(vec![(
            "code",
            vec!["print(undefined_frame)\n"],
        )]));

        let response = handle_invocation(&HandlerConfig::default(), &source, &FailingRunner);

        assert_eq!(response.status_code, 500);
        let message: String = serde_json::from_str(&response.body).expect("body is a JSON string");
        assert_eq!(message, "name 'undefined_frame' is not defined");
    }

    #[test]
    fn response_serializes_with_status_code_field() {
        let value = serde_json::to_value(RunOutcome::Succeeded.into_response()).expect("serialize");
        assert_eq!(value, json!({"statusCode": 200, "body": "null"}));
    }

    #[test]
    fn message_with_quotes_is_escaped_in_body() {
        let response = RunOutcome::Failed("bad \"quote\"".to_string()).into_response();
        assert_eq!(response.body, "\"bad \\\"quote\\\"\"");
    }
}
