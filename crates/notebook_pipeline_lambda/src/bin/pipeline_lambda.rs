use lambda_runtime::{service_fn, Error, LambdaEvent};
use notebook_pipeline_core::PipelineError;
use notebook_pipeline_lambda::adapters::notebook_source::HttpNotebookSource;
use notebook_pipeline_lambda::adapters::program_runner::PythonProcessRunner;
use notebook_pipeline_lambda::config::HandlerConfig;
use notebook_pipeline_lambda::handlers::pipeline::{handle_invocation, HandlerResponse, RunOutcome};

fn handle_blocking(config: HandlerConfig) -> HandlerResponse {
    let source = match HttpNotebookSource::new(config.notebook_url.clone()) {
        Ok(value) => value,
        Err(error) => return RunOutcome::from(Err::<(), PipelineError>(error)).into_response(),
    };
    let runner = PythonProcessRunner::new(config.interpreter.clone());
    handle_invocation(&config, &source, &runner)
}

async fn handle_request(_event: LambdaEvent<serde_json::Value>) -> Result<HandlerResponse, Error> {
    let config = HandlerConfig::from_env();
    tokio::task::spawn_blocking(move || handle_blocking(config))
        .await
        .map_err(|error| Error::from(format!("pipeline task failed: {error}")))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
