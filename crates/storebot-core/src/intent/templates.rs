//! Response templates.
//!
//! One pure function per response shape. Substituted values (category,
//! item count, original message) come in as arguments; nothing here looks
//! at the message to decide anything.

use super::category::Category;
use super::{Action, Intent, ResponseBundle};

pub const SUPPORT_PHONE: &str = "+880 1234-567890";
pub const SUPPORT_EMAIL: &str = "info@polashtoli.com";

pub const CART_URL: &str = "/cart.html";
pub const ORDERS_URL: &str = "/profile.html?tab=orders";
pub const DISCOUNTED_URL: &str = "/products.html?filter=discounted";
pub const TOP_RATED_URL: &str = "/products.html?filter=top-rated";

/// Listing path filtered to one category.
pub fn category_url(category: Category) -> String {
    format!("/products.html?category={}", category)
}

fn suggestions(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn greeting() -> ResponseBundle {
    ResponseBundle::new(
        Intent::Greeting,
        "Hello! Welcome to Polashtoli Store. I'm your AI shopping assistant. How can I help you today?",
    )
    .with_suggestions(suggestions(&[
        "Show me featured products",
        "I'm looking for electronics",
        "What are today's deals?",
        "Check my order status",
    ]))
}

pub fn category_search(category: Category) -> ResponseBundle {
    ResponseBundle::new(
        Intent::ProductSearch,
        format!(
            "I'll help you find {} products. Let me search our inventory...",
            category
        ),
    )
    .with_action(Action::navigate(category_url(category)))
    .with_suggestions(vec![
        format!("Show top-rated {}", category),
        format!("Discounted {}", category),
        format!("New arrivals in {}", category),
    ])
}

pub fn category_prompt() -> ResponseBundle {
    ResponseBundle::new(
        Intent::ProductSearch,
        "I can help you find products! What category are you interested in? We have Electronics, Fashion, Home & Living, Beauty, and Sports.",
    )
    .with_suggestions(suggestions(&[
        "Show me electronics",
        "I want fashion items",
        "Home & Living products",
    ]))
}

pub fn cart_summary(item_count: usize) -> ResponseBundle {
    ResponseBundle::new(
        Intent::Cart,
        format!(
            "You have {} item(s) in your cart. Would you like to proceed to checkout or continue shopping?",
            item_count
        ),
    )
    .with_action(Action::navigate(CART_URL))
    .with_suggestions(suggestions(&[
        "View cart",
        "Proceed to checkout",
        "Continue shopping",
    ]))
}

pub fn empty_cart() -> ResponseBundle {
    ResponseBundle::new(
        Intent::Cart,
        "Your cart is currently empty. Let me help you find some great products!",
    )
    .with_suggestions(suggestions(&[
        "Show featured products",
        "Today's deals",
        "Browse categories",
    ]))
}

pub fn order_tracking() -> ResponseBundle {
    ResponseBundle::new(
        Intent::OrderTracking,
        "I can help you track your order. Please provide your order number, or you can check your order history in your profile.",
    )
    .with_action(Action::navigate(ORDERS_URL))
    .with_suggestions(suggestions(&[
        "View order history",
        "Track my latest order",
        "Shipping information",
    ]))
}

pub fn deals() -> ResponseBundle {
    ResponseBundle::new(
        Intent::Pricing,
        "I can help you find the best deals! We have ongoing discounts on many products. Would you like to see our discounted products or search for something specific?",
    )
    .with_action(Action::navigate(DISCOUNTED_URL))
    .with_suggestions(suggestions(&[
        "Show discounted products",
        "Today's best deals",
        "Free shipping products",
    ]))
}

pub fn support() -> ResponseBundle {
    ResponseBundle::new(
        Intent::Support,
        format!(
            "I'm here to help! You can reach our customer support team at {} or email us at {}. What specific issue can I assist you with?",
            SUPPORT_PHONE, SUPPORT_EMAIL
        ),
    )
    .with_suggestions(suggestions(&[
        "Return policy",
        "Payment methods",
        "Shipping information",
        "Contact support",
    ]))
}

pub fn recommendations() -> ResponseBundle {
    ResponseBundle::new(
        Intent::Recommendation,
        "I'd love to recommend some products! Based on our top sellers and customer reviews, here are some popular items. Would you like to see recommendations for a specific category?",
    )
    .with_action(Action::navigate(TOP_RATED_URL))
    .with_suggestions(suggestions(&[
        "Top-rated products",
        "Best sellers",
        "New arrivals",
        "Customer favorites",
    ]))
}

pub fn thanks() -> ResponseBundle {
    ResponseBundle::new(
        Intent::Thanks,
        "You're welcome! Is there anything else I can help you with today?",
    )
    .with_suggestions(suggestions(&[
        "Continue shopping",
        "View cart",
        "Contact support",
    ]))
}

/// Default bundle. Echoes `message` as given, without lowercasing.
pub fn fallback(message: &str) -> ResponseBundle {
    ResponseBundle::new(
        Intent::Fallback,
        format!(
            "I understand you're asking about '{}'. Let me search our products for you, or I can help you with specific information about our store, shipping, returns, or any other questions you might have!",
            message
        ),
    )
    .with_action(Action::search(message))
    .with_suggestions(suggestions(&[
        "Search products",
        "Browse categories",
        "View featured items",
        "Customer support",
    ]))
}
