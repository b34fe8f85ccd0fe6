//! Application Services
//!
//! Coordinate the retrieval pipeline, the completion gateway and the domain
//! rules for each view.

pub mod assistant_service;
pub mod report_service;

pub use assistant_service::*;
pub use report_service::*;
