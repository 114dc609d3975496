use notebook_pipeline_core::{NotebookDocument, PipelineError};
use reqwest::blocking::Client;

pub trait NotebookSource {
    fn fetch_document(&self) -> Result<NotebookDocument, PipelineError>;
}

/// Single unauthenticated GET per fetch: redirects followed, no retry and no
/// request timeout.
#[derive(Debug, Clone)]
pub struct HttpNotebookSource {
    client: Client,
    url: String,
}

impl HttpNotebookSource {
    pub fn new(url: impl Into<String>) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(None)
            .build()
            .map_err(|error| PipelineError::Fetch(format!("failed to build HTTP client: {error}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl NotebookSource for HttpNotebookSource {
    fn fetch_document(&self) -> Result<NotebookDocument, PipelineError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|error| PipelineError::Fetch(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Fetch(format!(
                "GET {} returned {status}",
                self.url
            )));
        }

        let body = response
            .bytes()
            .map_err(|error| PipelineError::Fetch(format!("failed to read body: {error}")))?;
        NotebookDocument::from_json_slice(&body)
    }
}

/// Fixed in-memory document, for tests and local runs.
#[derive(Debug, Clone)]
pub struct StaticNotebookSource {
    document: NotebookDocument,
}

impl StaticNotebookSource {
    pub fn new(document: NotebookDocument) -> Self {
        Self { document }
    }
}

impl NotebookSource for StaticNotebookSource {
    fn fetch_document(&self) -> Result<NotebookDocument, PipelineError> {
        Ok(self.document.clone())
    }
}
