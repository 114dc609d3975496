//! Lambda-oriented adapters and handler for the notebook pipeline.
//!
//! This crate owns runtime integration details (the Lambda handler, the HTTP
//! notebook source and the interpreter process runner) on top of the
//! extraction primitives in `notebook_pipeline_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
