//! Retrieval pipeline: pick the fixture slice for a query, wrap it into a
//! prompt, and pull a JSON answer back out of the completion text.
//!
//! Nothing here performs I/O; the completion call itself lives in `llm`.

pub mod guard;
pub mod intent;
pub mod keywords;
pub mod prompt;
pub mod response;
pub mod sections;
pub mod selector;

pub use guard::{greeting_reply, is_company_related, off_topic_reply};
pub use intent::detect_visualization;
pub use keywords::{extract_keywords, STOP_WORDS};
pub use prompt::{
    finance_insights_prompt, forecast_prompt, hr_request_prompt, invoice_prompt, PromptBuilder,
};
pub use response::{parse_response, AnswerData, AssistantAnswer, ParsedResponse, Visualization};
pub use sections::{DataKey, SectionRule, SECTION_TABLE, SECTION_TABLE_VERSION};
pub use selector::{
    CompanySnapshot, ContextData, ContextSelector, DatasetSummary, RetrievalContext,
    HISTORY_WINDOW, SUMMARY_SECTION,
};
