pub mod notebook_source;
pub mod program_runner;
