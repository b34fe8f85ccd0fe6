//! Ambient stack shared by every crate: logging setup and operation timing

pub mod structured_logging;

pub use structured_logging::{
    init_structured_logging, ExecutionContext, JsonFormatter, LoggingConfig, OperationTimer,
    PerformanceMetrics, StructuredLogEntry,
};
