//! Replies that never reach the gateway: greetings and off-topic questions

const GREETINGS: [(&str, &str); 9] = [
    ("hi", "Hi there! How can I help you today?"),
    ("hello", "Hello! How may I assist you?"),
    ("hey", "Hey! How can I help?"),
    ("morning", "Good morning! How can I assist you today?"),
    ("afternoon", "Good afternoon! How may I help you?"),
    ("evening", "Good evening! How can I help you?"),
    ("bye", "Goodbye! Have a great day!"),
    ("thanks", "You're welcome! Need anything else?"),
    ("thank", "You're welcome! What else can I help you with?"),
];

/// Substrings that tie a query to the business
const COMPANY_TERMS: [&str; 36] = [
    // products
    "product", "item", "stock", "inventory", "sell", "price", "cost",
    // sales
    "sale", "transaction", "order", "customer", "revenue",
    // finance
    "financ", "payment", "amount", "gst", "tax", "invoice", "expense", "profit",
    // hr
    "employ", "salary", "staff", "payroll", "department",
    // company
    "compan", "business", "office", "contact", "address", "detail",
    // purchasing
    "suppl", "vendor", "purchase", "delivery", "leave",
];

/// Canned answer when a greeting word stands alone; matched on whole words
pub fn greeting_reply(query: &str) -> Option<&'static str> {
    let query = query.to_lowercase();
    let words: Vec<&str> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    GREETINGS
        .iter()
        .find(|(word, _)| words.contains(word))
        .map(|(_, reply)| *reply)
}

pub fn is_company_related(query: &str) -> bool {
    let query = query.to_lowercase();
    COMPANY_TERMS.iter().any(|term| query.contains(term))
}

pub fn off_topic_reply(company_name: &str) -> String {
    format!(
        "I apologize, but I can only assist with questions related to {company_name}. \
         For example, you can ask me about our products, sales, employees, or company \
         information. How can I help you with that?"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hi", Some("Hi there! How can I help you today?"))]
    #[case("Hello!", Some("Hello! How may I assist you?"))]
    #[case("thanks a lot", Some("You're welcome! Need anything else?"))]
    #[case("Thank you", Some("You're welcome! What else can I help you with?"))]
    #[case("Which supplier ships fastest?", None)]
    #[case("this month", None)]
    fn test_greeting_reply(#[case] query: &str, #[case] expected: Option<&str>) {
        assert_eq!(greeting_reply(query), expected);
    }

    #[rstest]
    #[case("What's our total revenue?", true)]
    #[case("Who supplies the laptops?", true)]
    #[case("Show me the GST collected", true)]
    #[case("What's the weather in Mumbai?", false)]
    #[case("Tell me a joke", false)]
    fn test_is_company_related(#[case] query: &str, #[case] expected: bool) {
        assert_eq!(is_company_related(query), expected);
    }

    #[test]
    fn test_off_topic_reply_names_company() {
        let reply = off_topic_reply("Info Electronics Pvt Ltd");
        assert!(reply.contains("questions related to Info Electronics Pvt Ltd."));
    }
}
