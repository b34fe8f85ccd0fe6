//! # Application Layer
//!
//! - Assistant service: one chat submission through the retrieval pipeline
//! - Report services: invoice, HR request and forecast documents
//! - DTOs handed to the views
//! - Transcript and document export
//!
//! ## Dependency Direction
//!
//! ```text
//! cli → application → retrieval, llm → domain
//! ```

pub mod dtos;
pub mod errors;
pub mod export;
pub mod services;

pub use dtos::*;
pub use errors::{ApplicationError, ApplicationResult};
pub use export::{document_file_name, export_transcript, render_transcript, save_document};
pub use services::{
    forecast_months, reference_number, AssistantService, ReportService, FORECAST_MONTHS,
    SAMPLE_QUERIES,
};
