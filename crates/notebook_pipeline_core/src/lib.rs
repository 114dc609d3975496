//! Shared notebook extraction primitives.
//!
//! This crate owns the notebook document model, code cell extraction and
//! program assembly. It intentionally excludes HTTP, interpreter and Lambda
//! runtime concerns, which live in `notebook_pipeline_lambda`.

pub mod assemble;
pub mod convert;
pub mod document;
pub mod error;
pub mod extract;

pub use assemble::{assemble_script, wrap_in_entry_point};
pub use convert::{convert_notebook_file, render_script};
pub use document::{Cell, NotebookDocument};
pub use error::PipelineError;
pub use extract::{extract_code_cells, ExtractedCell, EXCLUSION_TAG};
