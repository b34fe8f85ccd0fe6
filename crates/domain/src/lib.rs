//! Domain Layer - ERP fixture data and business rules
//!
//! Contains ONLY pure logic without dependencies on:
//! - Network (the completion gateway lives in `llm`)
//! - Frameworks (CLI, terminal rendering)
//! - Logging setup
//!
//! - Dataset: the read-only fixture (company, sales, purchase, finance, HR)
//! - Sections: the fixture blocks queries are scoped to
//! - Conversation: turns and per-session chat state
//! - Analytics / Finance / Invoice / HR: aggregates and form rules used by the views

pub mod analytics;
pub mod conversation;
pub mod dataset;
pub mod errors;
pub mod finance;
pub mod hr;
pub mod invoice;
pub mod section;

pub use conversation::{
    ChatSession, ContextSummary, ConversationTurn, Sender, TurnContent, VisualizationHint,
    GATEWAY_ERROR_MESSAGE,
};
pub use dataset::{
    CompanyDetails, Customer, Employee, ErpDataset, FinanceAccounting, FinanceTransaction,
    GstRates, HrPayroll, PayrollTransaction, Product, PurchaseOrders, PurchaseTransaction,
    SalesInventory, SalesTransaction, Supplier, UNKNOWN_PRODUCT,
};
pub use errors::{DomainError, DomainResult};
pub use section::{Section, SectionScope};
