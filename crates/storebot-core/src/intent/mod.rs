//! Intent classifier and responder — keyword-based, first match wins.
//!
//! A message is lowercased and checked against an ordered table of
//! [`IntentRule`]s. The first rule with a keyword contained in the message
//! builds the response; if none matches, the fallback bundle echoes the
//! message back as a search. Priority is the order of [`RULES`], nothing
//! else: there is no scoring and no tie-breaking.
//!
//! The responder is pure. It holds no state, performs no I/O and returns the
//! same bundle for the same message and cart.

pub mod category;
pub mod templates;

use crate::error::ChatError;
use category::extract_category;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// The classified purpose of a customer message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    ProductSearch,
    Cart,
    OrderTracking,
    Pricing,
    Support,
    Recommendation,
    Thanks,
    Fallback,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::ProductSearch => "product_search",
            Self::Cart => "cart",
            Self::OrderTracking => "order_tracking",
            Self::Pricing => "pricing",
            Self::Support => "support",
            Self::Recommendation => "recommendation",
            Self::Thanks => "thanks",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directive for the storefront UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Open a page on the storefront.
    Navigate { url: String },
    /// Run a product search.
    Search { query: String },
}

impl Action {
    pub fn navigate(url: impl Into<String>) -> Self {
        Self::Navigate { url: url.into() }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self::Search { query: query.into() }
    }
}

/// Everything the responder produces for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBundle {
    pub intent: Intent,
    pub response: String,
    pub action: Option<Action>,
    pub suggestions: Vec<String>,
}

impl ResponseBundle {
    pub fn new(intent: Intent, response: impl Into<String>) -> Self {
        Self {
            intent,
            response: response.into(),
            action: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }
}

/// Optional per-request context sent by the storefront.
///
/// Only the length of `cart` is read. The rest of the object is carried
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatContext(pub Map<String, Value>);

impl ChatContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context whose cart holds `items`.
    pub fn with_cart<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let cart: Vec<Value> = items.into_iter().map(Into::into).collect();
        let mut map = Map::new();
        map.insert("cart".into(), Value::Array(cart));
        Self(map)
    }

    /// Number of items in the cart. A missing or `null` cart is empty.
    pub fn cart_len(&self) -> Result<usize, ChatError> {
        match self.0.get("cart") {
            // A null cart is read as empty rather than rejected.
            None | Some(Value::Null) => Ok(0),
            Some(Value::Array(items)) => Ok(items.len()),
            Some(other) => Err(ChatError::MalformedContext(format!(
                "cart must be a list, got {}",
                json_kind(other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// The message being answered, as seen by a rule's builder.
pub struct Turn<'a> {
    /// Message exactly as the customer typed it.
    pub message: &'a str,
    /// Lowercased copy used for matching.
    pub lowered: &'a str,
    pub context: Option<&'a ChatContext>,
}

impl Turn<'_> {
    fn cart_len(&self) -> Result<usize, ChatError> {
        self.context.map_or(Ok(0), ChatContext::cart_len)
    }
}

type BuildFn = fn(&Turn<'_>) -> Result<ResponseBundle, ChatError>;

/// One row of the rule table: trigger keywords and the bundle they produce.
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
    build: BuildFn,
}

impl IntentRule {
    /// Whether any keyword occurs in the (already lowercased) text.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|kw| lowered.contains(kw))
    }

    /// Build this rule's response for `turn`.
    pub fn build(&self, turn: &Turn<'_>) -> Result<ResponseBundle, ChatError> {
        (self.build)(turn)
    }
}

impl fmt::Debug for IntentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntentRule")
            .field("intent", &self.intent)
            .field("keywords", &self.keywords)
            .finish()
    }
}

const GREETING_KEYWORDS: &[&str] = &["hello", "hi", "hey", "greetings"];

const PRODUCT_SEARCH_KEYWORDS: &[&str] = &["product", "show", "find", "search", "looking for"];

const CART_KEYWORDS: &[&str] = &["cart", "basket", "checkout"];

const ORDER_KEYWORDS: &[&str] = &["order", "delivery", "track", "shipping"];

const PRICING_KEYWORDS: &[&str] = &["price", "cost", "how much", "discount", "deal", "offer"];

const SUPPORT_KEYWORDS: &[&str] = &["help", "support", "contact", "problem", "issue"];

const RECOMMENDATION_KEYWORDS: &[&str] = &["recommend", "suggestion", "popular", "trending", "best"];

const THANKS_KEYWORDS: &[&str] = &["thank", "thanks", "appreciate"];

fn build_greeting(_: &Turn<'_>) -> Result<ResponseBundle, ChatError> {
    Ok(templates::greeting())
}

fn build_product_search(turn: &Turn<'_>) -> Result<ResponseBundle, ChatError> {
    Ok(match extract_category(turn.lowered) {
        Some(category) => templates::category_search(category),
        None => templates::category_prompt(),
    })
}

fn build_cart(turn: &Turn<'_>) -> Result<ResponseBundle, ChatError> {
    let item_count = turn.cart_len()?;
    Ok(if item_count > 0 {
        templates::cart_summary(item_count)
    } else {
        templates::empty_cart()
    })
}

fn build_order_tracking(_: &Turn<'_>) -> Result<ResponseBundle, ChatError> {
    Ok(templates::order_tracking())
}

fn build_pricing(_: &Turn<'_>) -> Result<ResponseBundle, ChatError> {
    Ok(templates::deals())
}

fn build_support(_: &Turn<'_>) -> Result<ResponseBundle, ChatError> {
    Ok(templates::support())
}

fn build_recommendation(_: &Turn<'_>) -> Result<ResponseBundle, ChatError> {
    Ok(templates::recommendations())
}

fn build_thanks(_: &Turn<'_>) -> Result<ResponseBundle, ChatError> {
    Ok(templates::thanks())
}

/// The rule table, highest priority first.
pub const RULES: &[IntentRule] = &[
    IntentRule { intent: Intent::Greeting,       keywords: GREETING_KEYWORDS,       build: build_greeting },
    IntentRule { intent: Intent::ProductSearch,  keywords: PRODUCT_SEARCH_KEYWORDS, build: build_product_search },
    IntentRule { intent: Intent::Cart,           keywords: CART_KEYWORDS,           build: build_cart },
    IntentRule { intent: Intent::OrderTracking,  keywords: ORDER_KEYWORDS,          build: build_order_tracking },
    IntentRule { intent: Intent::Pricing,        keywords: PRICING_KEYWORDS,        build: build_pricing },
    IntentRule { intent: Intent::Support,        keywords: SUPPORT_KEYWORDS,        build: build_support },
    IntentRule { intent: Intent::Recommendation, keywords: RECOMMENDATION_KEYWORDS, build: build_recommendation },
    IntentRule { intent: Intent::Thanks,         keywords: THANKS_KEYWORDS,         build: build_thanks },
];

/// Stateless classify-and-template entry point.
pub struct Responder;

impl Responder {
    /// The ordered rule table.
    pub fn rules() -> &'static [IntentRule] {
        RULES
    }

    /// Classify a message without building a response.
    pub fn classify(message: &str) -> Intent {
        let lowered = message.to_lowercase();
        Self::first_match(&lowered).map_or(Intent::Fallback, |rule| rule.intent)
    }

    /// Classify `message` and build its response bundle.
    ///
    /// Fails only when the cart rule is reached with a malformed context.
    pub fn respond(
        message: &str,
        context: Option<&ChatContext>,
    ) -> Result<ResponseBundle, ChatError> {
        let lowered = message.to_lowercase();
        let turn = Turn {
            message,
            lowered: &lowered,
            context,
        };

        let bundle = match Self::first_match(&lowered) {
            Some(rule) => rule.build(&turn)?,
            None => templates::fallback(message),
        };

        debug!(
            intent = bundle.intent.as_str(),
            has_action = bundle.action.is_some(),
            "Responder classified message"
        );

        Ok(bundle)
    }

    fn first_match(lowered: &str) -> Option<&'static IntentRule> {
        RULES.iter().find(|rule| rule.matches(lowered))
    }
}

#[cfg(test)]
mod tests {
    use super::category::Category;
    use super::*;
    use serde_json::json;

    fn respond(message: &str) -> ResponseBundle {
        Responder::respond(message, None).unwrap()
    }

    #[test]
    fn test_rule_order() {
        let order: Vec<Intent> = Responder::rules().iter().map(|r| r.intent).collect();
        assert_eq!(
            order,
            vec![
                Intent::Greeting,
                Intent::ProductSearch,
                Intent::Cart,
                Intent::OrderTracking,
                Intent::Pricing,
                Intent::Support,
                Intent::Recommendation,
                Intent::Thanks,
            ]
        );
    }

    #[test]
    fn test_every_rule_matches_its_own_keywords() {
        for rule in Responder::rules() {
            for kw in rule.keywords {
                assert!(rule.matches(kw), "{} should match '{}'", rule.intent, kw);
            }
        }
    }

    #[test]
    fn test_greeting() {
        let bundle = respond("Hello there");
        assert_eq!(bundle.intent, Intent::Greeting);
        assert_eq!(bundle, templates::greeting());
        assert_eq!(bundle.suggestions.len(), 4);
        assert!(bundle.action.is_none());
    }

    #[test]
    fn test_greeting_beats_later_rules() {
        let bundle = respond("hey, where is my order? also show me shoes");
        assert_eq!(bundle, templates::greeting());
    }

    #[test]
    fn test_product_search_with_category() {
        let bundle = respond("find me a new laptop");
        assert_eq!(bundle.intent, Intent::ProductSearch);
        assert_eq!(
            bundle.response,
            "I'll help you find electronics products. Let me search our inventory..."
        );
        assert_eq!(
            bundle.action,
            Some(Action::navigate("/products.html?category=electronics"))
        );
        assert_eq!(
            bundle.suggestions,
            vec![
                "Show top-rated electronics",
                "Discounted electronics",
                "New arrivals in electronics",
            ]
        );
    }

    #[test]
    fn test_product_search_without_category() {
        let bundle = respond("search products");
        assert_eq!(bundle, templates::category_prompt());
        assert!(bundle.response.contains("Home & Living"));
        assert!(bundle.action.is_none());
        assert_eq!(bundle.suggestions.len(), 3);
    }

    #[test]
    fn test_product_search_precedes_cart() {
        let bundle = respond("show cart products");
        assert_eq!(bundle.intent, Intent::ProductSearch);
        assert_eq!(bundle, templates::category_prompt());

        // "show" also wins over the cart keyword when a cart is present.
        let ctx = ChatContext::with_cart(vec![json!("a"), json!("b"), json!("c")]);
        let bundle = Responder::respond("show my cart", Some(&ctx)).unwrap();
        assert_eq!(bundle.intent, Intent::ProductSearch);
    }

    #[test]
    fn test_cart_with_items() {
        let ctx = ChatContext::with_cart(vec![json!("a"), json!("b"), json!("c")]);
        let bundle = Responder::respond("what's in my cart", Some(&ctx)).unwrap();
        assert_eq!(bundle.intent, Intent::Cart);
        assert!(bundle.response.contains('3'));
        assert_eq!(bundle.action, Some(Action::navigate("/cart.html")));
        assert_eq!(bundle.suggestions.len(), 3);
    }

    #[test]
    fn test_cart_empty_or_missing() {
        let empty = Responder::respond("what's in my cart", Some(&ChatContext::new())).unwrap();
        let missing = Responder::respond("what's in my cart", None).unwrap();
        let null_cart: ChatContext = serde_json::from_value(json!({"cart": null})).unwrap();
        let null = Responder::respond("what's in my cart", Some(&null_cart)).unwrap();

        assert_eq!(empty, templates::empty_cart());
        assert_eq!(missing, templates::empty_cart());
        assert_eq!(null, templates::empty_cart());
        assert!(missing.action.is_none());
    }

    #[test]
    fn test_malformed_cart_is_an_error() {
        let ctx: ChatContext = serde_json::from_value(json!({"cart": 3})).unwrap();
        let err = Responder::respond("go to checkout", Some(&ctx)).unwrap_err();
        assert_eq!(
            err,
            ChatError::MalformedContext("cart must be a list, got a number".into())
        );
    }

    #[test]
    fn test_malformed_cart_ignored_outside_cart_rule() {
        let ctx: ChatContext = serde_json::from_value(json!({"cart": "oops"})).unwrap();
        let bundle = Responder::respond("thanks a lot", Some(&ctx)).unwrap();
        assert_eq!(bundle.intent, Intent::Thanks);
    }

    #[test]
    fn test_order_tracking() {
        let bundle = respond("where is my delivery");
        assert_eq!(bundle.intent, Intent::OrderTracking);
        assert_eq!(bundle.action, Some(Action::navigate("/profile.html?tab=orders")));
    }

    #[test]
    fn test_pricing() {
        let bundle = respond("any discount today?");
        assert_eq!(bundle.intent, Intent::Pricing);
        assert_eq!(
            bundle.action,
            Some(Action::navigate("/products.html?filter=discounted"))
        );
    }

    #[test]
    fn test_support() {
        let bundle = respond("I need help with a problem");
        assert_eq!(bundle, templates::support());
    }

    #[test]
    fn test_recommendation() {
        let bundle = respond("what is popular right now");
        assert_eq!(bundle.intent, Intent::Recommendation);
        assert_eq!(
            bundle.action,
            Some(Action::navigate("/products.html?filter=top-rated"))
        );
        assert_eq!(bundle.suggestions.len(), 4);
    }

    #[test]
    fn test_thanks() {
        let bundle = respond("Thanks a lot");
        assert_eq!(bundle, templates::thanks());
        assert!(bundle.action.is_none());
    }

    #[test]
    fn test_fallback_echoes_message() {
        let bundle = respond("xyzzy random words");
        assert_eq!(bundle.intent, Intent::Fallback);
        assert!(bundle.response.contains("xyzzy random words"));
        assert_eq!(bundle.action, Some(Action::search("xyzzy random words")));
        assert_eq!(bundle.suggestions.len(), 4);
    }

    #[test]
    fn test_empty_message_falls_back() {
        let bundle = respond("");
        assert_eq!(bundle.intent, Intent::Fallback);
        assert_eq!(bundle.action, Some(Action::search("")));
    }

    #[test]
    fn test_matching_is_case_insensitive_and_substring() {
        assert_eq!(Responder::classify("HELLO"), Intent::Greeting);
        // "shipping" contains "hi", so the greeting rule claims it.
        assert_eq!(Responder::classify("shipping"), Intent::Greeting);
        assert_eq!(Responder::classify("Tracking number?"), Intent::OrderTracking);
    }

    #[test]
    fn test_respond_is_idempotent() {
        let ctx = ChatContext::with_cart(vec![json!({"id": 1})]);
        let first = Responder::respond("checkout please", Some(&ctx)).unwrap();
        let second = Responder::respond("checkout please", Some(&ctx)).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_classify_agrees_with_respond() {
        for message in ["hi", "find shoes", "basket", "track it", "how much", "contact", "best", "thank you", "zzz"] {
            assert_eq!(Responder::classify(message), respond(message).intent, "{}", message);
        }
    }

    #[test]
    fn test_action_wire_shape() {
        let nav = serde_json::to_value(Action::navigate("/cart.html")).unwrap();
        assert_eq!(nav, json!({"type": "navigate", "url": "/cart.html"}));
        let search = serde_json::to_value(Action::search("socks")).unwrap();
        assert_eq!(search, json!({"type": "search", "query": "socks"}));
    }

    #[test]
    fn test_category_suggestions_follow_extractor() {
        let bundle = respond("looking for makeup");
        assert_eq!(bundle, templates::category_search(Category::Beauty));
    }
}
