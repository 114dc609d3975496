use std::fs;
use std::path::Path;

use crate::assemble::assemble_script;
use crate::document::NotebookDocument;
use crate::error::PipelineError;
use crate::extract::{extract_code_cells, EXCLUSION_TAG};

/// Render notebook JSON text as a plain script.
pub fn render_script(notebook_json: &str) -> Result<String, PipelineError> {
    let document = NotebookDocument::from_json_str(notebook_json)?;
    Ok(assemble_script(extract_code_cells(&document, EXCLUSION_TAG)))
}

/// Convert the notebook at `input` into a script at `output`.
///
/// The output file is created or truncated; there is no atomic replace.
pub fn convert_notebook_file(input: &Path, output: &Path) -> Result<(), PipelineError> {
    let notebook_json =
        fs::read_to_string(input).map_err(|error| PipelineError::io(input, error))?;
    let script = render_script(&notebook_json)?;
    fs::write(output, script).map_err(|error| PipelineError::io(output, error))
}
