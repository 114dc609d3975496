use std::fs;
use std::process::{Command, Stdio};

use notebook_pipeline_core::PipelineError;

/// Prefix of the stderr line on which the loader reports a raised exception.
pub const ERROR_MARKER: &str = "__pipeline_error__:";

/// Imports the program file as a fresh module under a fixed name, calls its
/// entry routine, and reports `str(exception)` as one JSON string line.
const LOADER: &str = r#"import importlib.util
import json
import sys

path, name, entry = sys.argv[1], sys.argv[2], sys.argv[3]
try:
    spec = importlib.util.spec_from_file_location(name, path)
    module = importlib.util.module_from_spec(spec)
    spec.loader.exec_module(module)
    getattr(module, entry)()
except Exception as error:
    sys.stderr.write("\n__pipeline_error__:" + json.dumps(str(error)) + "\n")
    sys.exit(1)
"#;

/// Assembled program text plus the names it is loaded and invoked under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramUnit {
    pub module_name: String,
    pub entry_point: String,
    pub source: String,
}

pub trait ProgramRunner {
    fn run_program(&self, unit: &ProgramUnit) -> Result<(), PipelineError>;
}

/// Runs each program in a new interpreter process from a new temporary
/// directory; nothing is shared between runs.
#[derive(Debug, Clone)]
pub struct PythonProcessRunner {
    interpreter: String,
}

impl PythonProcessRunner {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }
}

impl ProgramRunner for PythonProcessRunner {
    fn run_program(&self, unit: &ProgramUnit) -> Result<(), PipelineError> {
        let workdir = tempfile::Builder::new()
            .prefix("notebook-pipeline-")
            .tempdir()
            .map_err(|error| PipelineError::io(std::env::temp_dir(), error))?;
        let module_path = workdir.path().join(format!("{}.py", unit.module_name));
        fs::write(&module_path, &unit.source)
            .map_err(|error| PipelineError::io(&module_path, error))?;

        let output = Command::new(&self.interpreter)
            .arg("-c")
            .arg(LOADER)
            .arg(&module_path)
            .arg(&unit.module_name)
            .arg(&unit.entry_point)
            .current_dir(workdir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .map_err(|error| {
                PipelineError::Execution(format!(
                    "failed to start interpreter '{}': {error}",
                    self.interpreter
                ))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        forward_program_stderr(&stderr);

        if output.status.success() {
            Ok(())
        } else {
            Err(PipelineError::Execution(failure_message(
                &stderr,
                &output.status.to_string(),
            )))
        }
    }
}

fn forward_program_stderr(stderr: &str) {
    for line in stderr.lines() {
        if !line.is_empty() && !line.starts_with(ERROR_MARKER) {
            eprintln!("{line}");
        }
    }
}

fn failure_message(stderr: &str, status: &str) -> String {
    let reported = stderr
        .lines()
        .rev()
        .find_map(|line| line.strip_prefix(ERROR_MARKER))
        .and_then(|encoded| serde_json::from_str::<String>(encoded).ok());
    if let Some(message) = reported {
        return message;
    }

    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        format!("interpreter exited with {status}")
    } else {
        trimmed.to_string()
    }
}
