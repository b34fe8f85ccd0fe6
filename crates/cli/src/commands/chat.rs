use crate::app::AppContext;
use crate::progress::ProgressBuilder;
use crate::render;
use anyhow::Result;
use application::{export_transcript, AssistantService, SAMPLE_QUERIES};
use clap::Args;
use console::style;
use domain::{ChatSession, SectionScope};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Interactive session with the assistant
#[derive(Debug, Args)]
pub struct ChatCommand {
    #[arg(short, long, default_value = "all")]
    pub section: SectionScope,
}

/// One line of REPL input
#[derive(Debug, Clone, PartialEq)]
pub enum ChatInput {
    Query(String),
    Section(SectionScope),
    Context,
    Clear,
    Export(PathBuf),
    Samples,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

impl ChatInput {
    /// Slash commands, sample numbers (`1`..`8`) and free text
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ChatInput::Empty;
        }

        if let Ok(n) = line.parse::<usize>() {
            if let Some(sample) = n.checked_sub(1).and_then(|i| SAMPLE_QUERIES.get(i)) {
                return ChatInput::Query(sample.to_string());
            }
        }

        let Some(command) = line.strip_prefix('/') else {
            return ChatInput::Query(line.to_string());
        };
        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map(|(n, a)| (n, a.trim()))
            .unwrap_or((command, ""));

        match (name, arg) {
            ("quit" | "exit" | "q", _) => ChatInput::Quit,
            ("clear", _) => ChatInput::Clear,
            ("context", _) => ChatInput::Context,
            ("samples", _) => ChatInput::Samples,
            ("help" | "?", _) => ChatInput::Help,
            ("section", "") => ChatInput::Invalid("usage: /section <all|company|sales|purchase|finance|hr>".into()),
            ("section", s) => match s.parse() {
                Ok(scope) => ChatInput::Section(scope),
                Err(e) => ChatInput::Invalid(e),
            },
            ("export", "") => ChatInput::Invalid("usage: /export <path.md>".into()),
            ("export", path) => ChatInput::Export(PathBuf::from(path)),
            (other, _) => ChatInput::Invalid(format!("unknown command '/{other}', try /help")),
        }
    }
}

const HELP: &str = "\
  /section <s>   restrict context (all, company, sales, purchase, finance, hr)
  /context       show the context used for the last answer
  /clear         start over
  /export <path> save the conversation as Markdown
  /samples       list sample questions (type a number to ask one)
  /quit          leave";

impl ChatCommand {
    pub async fn execute(self, app: &AppContext) -> Result<()> {
        let provider = app.provider()?;
        let service = AssistantService::new(&app.dataset, provider, app.today());
        let mut session = ChatSession::new(self.section);

        for turn in session.turns() {
            println!("{}", render::turn(turn));
        }
        print_samples();
        println!(
            "{}",
            style(format!(
                "Context: {} | provider: {} | /help for commands",
                session.scope().label(),
                service.provider_name()
            ))
            .dim()
        );

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("{} ", style(">").green().bold());
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                break;
            };

            match ChatInput::parse(&line?) {
                ChatInput::Empty => {}
                ChatInput::Quit => break,
                ChatInput::Help => println!("{HELP}"),
                ChatInput::Samples => print_samples(),
                ChatInput::Invalid(message) => println!("{}", style(message).yellow()),
                ChatInput::Clear => {
                    session = session.cleared();
                    for turn in session.turns() {
                        println!("{}", render::turn(turn));
                    }
                }
                ChatInput::Section(scope) => {
                    session = session.with_scope(scope);
                    println!("{}", style(format!("Context: {}", scope.label())).dim());
                }
                ChatInput::Context => match session.last_context() {
                    Some(summary) => println!("{}", serde_json::to_string_pretty(summary)?),
                    None => println!("{}", style("No question asked yet").dim()),
                },
                ChatInput::Export(path) => match export_transcript(&session, &path) {
                    Ok(()) => println!("{} {}", style("Saved").green(), path.display()),
                    Err(e) => println!("{}", style(e).red()),
                },
                ChatInput::Query(query) => {
                    let before = session.turns().len();
                    let spinner = ProgressBuilder::gateway("Thinking...");
                    session = service.handle_query(session, &query).await;
                    spinner.finish_and_clear();

                    // skip the echoed user turn
                    for turn in session.turns().iter().skip(before + 1) {
                        println!("{}", render::turn(turn));
                    }
                }
            }
        }
        Ok(())
    }
}

fn print_samples() {
    println!("{}", style("Try asking:").bold());
    for (i, q) in SAMPLE_QUERIES.iter().enumerate() {
        println!("  {}. {}", i + 1, q);
    }
}
