//! Markdown transcripts and saved report documents

use crate::errors::{ApplicationError, ApplicationResult};
use chrono::{DateTime, Local, Utc};
use domain::{ChatSession, ConversationTurn, Sender, TurnContent};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

pub const TRANSCRIPT_TITLE: &str = "ERP Assistant Conversation";

/// One section per turn; the welcome turn is skipped
pub fn render_transcript(session: &ChatSession, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {TRANSCRIPT_TITLE}\n");
    let _ = writeln!(
        out,
        "Generated on: {}\n",
        generated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    );

    for turn in session.turns().iter().filter(|t| !t.is_welcome()) {
        render_turn(&mut out, turn);
    }
    out
}

fn render_turn(out: &mut String, turn: &ConversationTurn) {
    let speaker = match turn.sender {
        Sender::User => "You",
        Sender::Assistant => "Assistant",
    };
    let time = turn.timestamp.with_timezone(&Local).format("%H:%M");
    let _ = writeln!(out, "## {speaker} ({time})\n");

    match &turn.content {
        TurnContent::Visualization {
            visualization_type, ..
        } => {
            let label = serde_json::to_value(visualization_type)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            let _ = writeln!(out, "_Visualization ({label})_\n");
            let _ = writeln!(out, "```json\n{}\n```\n", turn.content.as_text());
        }
        TurnContent::Error { content } => {
            let _ = writeln!(out, "> **Error:** {content}\n");
        }
        other => {
            let _ = writeln!(out, "{}\n", other.as_text());
        }
    }
}

pub fn export_transcript(session: &ChatSession, path: &Path) -> ApplicationResult<()> {
    write_file(path, &render_transcript(session, Utc::now()))?;
    info!(path = %path.display(), turns = session.turns().len(), "Transcript exported");
    Ok(())
}

/// Pretty-printed JSON for a generated report
pub fn save_document<T: Serialize>(document: &T, path: &Path) -> ApplicationResult<()> {
    let json = serde_json::to_string_pretty(document)?;
    write_file(path, &json)?;
    info!(path = %path.display(), "Document saved");
    Ok(())
}

/// File name for a saved document: whitespace and path separators become `_`
pub fn document_file_name(parts: &[&str]) -> String {
    let stem = parts
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| {
            p.trim()
                .chars()
                .map(|c| {
                    if c.is_whitespace() || matches!(c, '/' | '\\' | ':') {
                        '_'
                    } else {
                        c
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("_");
    format!("{stem}.json")
}

fn write_file(path: &Path, contents: &str) -> ApplicationResult<()> {
    std::fs::write(path, contents).map_err(|source| ApplicationError::Export {
        path: path.display().to_string(),
        source,
    })
}
