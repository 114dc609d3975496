use std::path::PathBuf;

/// Failure anywhere along the fetch, parse, assemble and run pipeline.
///
/// The variants only group failures by stage; callers that report errors
/// outward use the `Display` text as the sole diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to fetch notebook: {0}")]
    Fetch(String),
    #[error("malformed notebook JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported notebook layout: {0}")]
    Layout(String),
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Execution(String),
}

impl PipelineError {
    pub fn layout(message: impl Into<String>) -> Self {
        PipelineError::Layout(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}
