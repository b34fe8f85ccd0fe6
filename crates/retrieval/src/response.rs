//! Answer extraction from raw completion text
//!
//! The model is asked for JSON but may wrap it in prose or code fences. The
//! text between the first `{` and the last `}` is decoded; anything else
//! degrades to a plain-text answer. Unrelated braces in the prose will
//! defeat this, which is accepted.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    Structured(Value),
    PlainText(String),
}

impl ParsedResponse {
    /// The decoded object, or `{"text": raw}` for plain text
    pub fn into_value(self) -> Value {
        match self {
            ParsedResponse::Structured(value) => value,
            ParsedResponse::PlainText(text) => json!({ "text": text }),
        }
    }

    pub fn into_answer(self) -> AssistantAnswer {
        AssistantAnswer::from_value(self.into_value())
    }
}

pub fn parse_response(raw: &str) -> ParsedResponse {
    let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) else {
        return ParsedResponse::PlainText(raw.to_string());
    };
    if end <= start {
        return ParsedResponse::PlainText(raw.to_string());
    }

    match serde_json::from_str::<Value>(&raw[start..=end]) {
        Ok(value) => ParsedResponse::Structured(value),
        Err(e) => {
            tracing::debug!(error = %e, "Embedded JSON did not decode, using plain text");
            ParsedResponse::PlainText(raw.to_string())
        }
    }
}

/// Chart payload the prompt asks for in the `data` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Visualization {
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    Pie {
        labels: Vec<String>,
        values: Vec<f64>,
    },
    Bar {
        labels: Vec<String>,
        values: Vec<f64>,
    },
    Line {
        labels: Vec<String>,
        series: Vec<Value>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerData {
    Chart(Visualization),
    /// `data` that is not one of the known chart shapes
    Raw(Value),
}

impl AnswerData {
    pub fn to_value(&self) -> Value {
        match self {
            AnswerData::Chart(chart) => serde_json::to_value(chart).unwrap_or(Value::Null),
            AnswerData::Raw(value) => value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantAnswer {
    pub text: String,
    pub data: Option<AnswerData>,
}

impl AssistantAnswer {
    pub fn from_value(value: Value) -> Self {
        let text = match value.get("text") {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => value.to_string(),
        };

        let data = match value.get("data") {
            None | Some(Value::Null) => None,
            Some(data) => Some(
                serde_json::from_value::<Visualization>(data.clone())
                    .map(AnswerData::Chart)
                    .unwrap_or_else(|_| AnswerData::Raw(data.clone())),
            ),
        };

        Self { text, data }
    }
}
