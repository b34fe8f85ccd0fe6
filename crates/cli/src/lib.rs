//! ERP assistant command line
//!
//! Terminal views over the application services: one-shot questions, an
//! interactive chat, context inspection and the report generators.

pub mod app;
pub mod commands;
pub mod progress;
pub mod render;

pub use app::{AppContext, DATASET_ENV};
