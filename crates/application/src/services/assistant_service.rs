use crate::errors::ApplicationResult;
use chrono::NaiveDate;
use common::OperationTimer;
use domain::{
    ChatSession, ConversationTurn, ErpDataset, SectionScope, TurnContent, GATEWAY_ERROR_MESSAGE,
};
use llm::CompletionProvider;
use retrieval::{
    detect_visualization, greeting_reply, is_company_related, off_topic_reply, parse_response,
    ContextSelector, PromptBuilder, RetrievalContext, HISTORY_WINDOW,
};
use tracing::{debug, warn};

/// Offered on the chat welcome screen
pub const SAMPLE_QUERIES: [&str; 8] = [
    "What's our total revenue this month?",
    "Who are our top 3 customers by sales value?",
    "List all products with stock below reorder level",
    "Show employee details for the Finance department",
    "What's the status of recent purchase orders?",
    "Summarize our financial transactions",
    "Calculate our total expenses",
    "Who's our highest paid employee?",
];

/// Assistant Service
///
/// Runs one chat submission through selector, prompt builder, gateway and
/// parser. The session goes in by value and comes back updated; a failed
/// completion becomes an error turn instead of an `Err`. Greetings and
/// questions unrelated to the company are answered locally.
pub struct AssistantService<'a, P> {
    selector: ContextSelector<'a>,
    prompts: PromptBuilder,
    provider: P,
    company_name: String,
}

impl<'a, P: CompletionProvider> AssistantService<'a, P> {
    pub fn new(data: &'a ErpDataset, provider: P, today: NaiveDate) -> Self {
        Self {
            selector: ContextSelector::new(data),
            prompts: PromptBuilder::new(data.company_name.clone(), today),
            provider,
            company_name: data.company_name.clone(),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Context the next submission would use, without recording anything
    pub fn preview_context(
        &self,
        query: &str,
        scope: SectionScope,
        history: &[String],
    ) -> RetrievalContext<'a> {
        self.selector.select(query, scope, history)
    }

    pub async fn handle_query(&self, session: ChatSession, query: &str) -> ChatSession {
        let query = query.trim();
        if query.is_empty() {
            return session;
        }

        let mut timer = OperationTimer::new("assistant.handle_query");

        // history excludes the query being submitted
        let history = session.recent_queries(HISTORY_WINDOW);
        let session = session.record_user_query(query);

        let context = self.selector.select(query, session.scope(), &history);
        timer.add_field("sections", &context.sections);
        timer.add_field("relevance_score", context.relevance_score);
        let session = session.with_context(context.summary());

        if let Some(reply) = self.local_reply(query, &context) {
            debug!("Answered without the gateway");
            timer.add_field("local_reply", true);
            timer.finish();
            return session.push_turn(ConversationTurn::assistant(TurnContent::Text {
                content: reply,
                has_context: false,
            }));
        }

        let outcome = self.answer(query, &context).await;
        timer.finish_with_result(&outcome);

        match outcome {
            Ok(turns) => turns.into_iter().fold(session, ChatSession::push_turn),
            Err(e) => {
                warn!(provider = %self.provider.name(), "Assistant request failed: {}", e);
                session.push_turn(ConversationTurn::error(GATEWAY_ERROR_MESSAGE))
            }
        }
    }

    /// Greetings, and queries that matched no section and name nothing about
    /// the business. Follow-ups that matched through history still go out.
    fn local_reply(&self, query: &str, context: &RetrievalContext<'_>) -> Option<String> {
        if is_company_related(query) {
            return None;
        }
        if let Some(greeting) = greeting_reply(query) {
            return Some(greeting.to_string());
        }
        context
            .is_summary_fallback()
            .then(|| off_topic_reply(&self.company_name))
    }

    async fn answer(
        &self,
        query: &str,
        context: &RetrievalContext<'_>,
    ) -> ApplicationResult<Vec<ConversationTurn>> {
        let prompt = self.prompts.build(query, context)?;
        debug!(prompt_chars = prompt.len(), "Prompt built");

        let raw = self.provider.complete(&prompt).await?;
        let answer = parse_response(&raw).into_answer();

        let mut turns = vec![ConversationTurn::assistant(TurnContent::Text {
            content: answer.text,
            has_context: true,
        })];
        if let Some(data) = answer.data {
            turns.push(ConversationTurn::assistant(TurnContent::Visualization {
                content: data.to_value(),
                visualization_type: detect_visualization(query),
            }));
        }
        Ok(turns)
    }
}
