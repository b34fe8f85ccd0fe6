//! Conversation turns and per-session chat state
//!
//! A `ChatSession` is a plain value: handlers take it by value and hand back
//! the updated session, so no state is shared between views.

use crate::section::SectionScope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const WELCOME_MESSAGE: &str = "Hello! I'm your ERP AI Assistant. I can answer questions about your company data, including sales, inventory, finance, and HR information. How can I help you today?";
pub const CLEARED_MESSAGE: &str = "Conversation cleared! How can I help you today?";
pub const GATEWAY_ERROR_MESSAGE: &str =
    "I encountered an error while processing your request. Please try again.";

/// Number of past user queries retained per session
pub const MAX_QUERY_HISTORY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// Chart family suggested for structured answer data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationHint {
    Comparison,
    Pie,
    Trend,
    Table,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnContent {
    Welcome {
        content: String,
    },
    Text {
        content: String,
        #[serde(default)]
        has_context: bool,
    },
    Visualization {
        content: serde_json::Value,
        visualization_type: VisualizationHint,
    },
    Error {
        content: String,
    },
}

impl TurnContent {
    /// Plain-text rendering used by transcripts
    pub fn as_text(&self) -> String {
        match self {
            TurnContent::Welcome { content }
            | TurnContent::Text { content, .. }
            | TurnContent::Error { content } => content.clone(),
            TurnContent::Visualization { content, .. } => {
                serde_json::to_string_pretty(content).unwrap_or_else(|_| content.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub sender: Sender,
    pub content: TurnContent,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn user(text: &str) -> Self {
        Self {
            sender: Sender::User,
            content: TurnContent::Text {
                content: text.to_string(),
                has_context: false,
            },
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: TurnContent) -> Self {
        Self {
            sender: Sender::Assistant,
            content,
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self::assistant(TurnContent::Error {
            content: message.to_string(),
        })
    }

    pub fn is_welcome(&self) -> bool {
        matches!(self.content, TurnContent::Welcome { .. })
    }
}

/// What the selector picked for the most recent query (shown on demand)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSummary {
    pub sections: Vec<String>,
    pub relevance_score: u32,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    turns: Vec<ConversationTurn>,
    query_history: VecDeque<String>,
    scope: SectionScope,
    last_context: Option<ContextSummary>,
}

impl ChatSession {
    pub fn new(scope: SectionScope) -> Self {
        Self {
            turns: vec![ConversationTurn::assistant(TurnContent::Welcome {
                content: WELCOME_MESSAGE.to_string(),
            })],
            query_history: VecDeque::with_capacity(MAX_QUERY_HISTORY),
            scope,
            last_context: None,
        }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn scope(&self) -> SectionScope {
        self.scope
    }

    pub fn last_context(&self) -> Option<&ContextSummary> {
        self.last_context.as_ref()
    }

    /// Up to `n` prior queries, most recent first
    pub fn recent_queries(&self, n: usize) -> Vec<String> {
        self.query_history.iter().rev().take(n).cloned().collect()
    }

    pub fn with_scope(mut self, scope: SectionScope) -> Self {
        self.scope = scope;
        self
    }

    /// Append the user's turn and remember the query for later context matching
    pub fn record_user_query(mut self, query: &str) -> Self {
        self.turns.push(ConversationTurn::user(query));
        if self.query_history.len() == MAX_QUERY_HISTORY {
            self.query_history.pop_front();
        }
        self.query_history.push_back(query.to_string());
        self
    }

    pub fn push_turn(mut self, turn: ConversationTurn) -> Self {
        self.turns.push(turn);
        self
    }

    pub fn with_context(mut self, summary: ContextSummary) -> Self {
        self.last_context = Some(summary);
        self
    }

    /// Drop turns, history and the last context; the scope survives
    pub fn cleared(self) -> Self {
        Self {
            turns: vec![ConversationTurn::assistant(TurnContent::Welcome {
                content: CLEARED_MESSAGE.to_string(),
            })],
            query_history: VecDeque::with_capacity(MAX_QUERY_HISTORY),
            scope: self.scope,
            last_context: None,
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(SectionScope::All)
    }
}
