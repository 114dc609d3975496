use notebook_pipeline_core::assemble::ENTRY_POINT_NAME;

pub const DEFAULT_NOTEBOOK_URL: &str =
    "https://raw.githubusercontent.com/mikevostrikov/2020-ontario-covid19-severe/master/etl/pipeline.ipynb";
pub const DEFAULT_INTERPRETER: &str = "python3";
pub const PIPELINE_MODULE_NAME: &str = "pipeline";

pub const NOTEBOOK_URL_ENV: &str = "PIPELINE_NOTEBOOK_URL";
pub const INTERPRETER_ENV: &str = "PIPELINE_PYTHON";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub notebook_url: String,
    pub interpreter: String,
    pub module_name: String,
    pub entry_point: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            notebook_url: DEFAULT_NOTEBOOK_URL.to_string(),
            interpreter: DEFAULT_INTERPRETER.to_string(),
            module_name: PIPELINE_MODULE_NAME.to_string(),
            entry_point: ENTRY_POINT_NAME.to_string(),
        }
    }
}

impl HandlerConfig {
    /// Defaults overridden by `PIPELINE_NOTEBOOK_URL` and `PIPELINE_PYTHON`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            notebook_url: non_blank(NOTEBOOK_URL_ENV).unwrap_or(defaults.notebook_url),
            interpreter: non_blank(INTERPRETER_ENV).unwrap_or(defaults.interpreter),
            ..defaults
        }
    }
}
