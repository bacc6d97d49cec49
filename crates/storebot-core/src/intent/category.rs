//! Product category extraction.
//!
//! Used by the product-search rule to pick one of the storefront's five
//! fixed categories out of a message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed storefront product grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Fashion,
    Home,
    Beauty,
    Sports,
}

const ELECTRONICS_KEYWORDS: &[&str] = &[
    "electronic", "electronics", "phone", "laptop", "computer", "gadget", "tech",
];

const FASHION_KEYWORDS: &[&str] = &[
    "fashion", "clothes", "clothing", "dress", "shirt", "pants", "shoes", "wear",
];

const HOME_KEYWORDS: &[&str] = &[
    "home", "furniture", "living", "kitchen", "bedroom", "decor",
];

const BEAUTY_KEYWORDS: &[&str] = &[
    "beauty", "makeup", "cosmetic", "skincare", "perfume",
];

const SPORTS_KEYWORDS: &[&str] = &[
    "sports", "fitness", "gym", "exercise", "yoga", "athletic",
];

impl Category {
    /// Every category, in the order they are checked.
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Fashion,
        Category::Home,
        Category::Beauty,
        Category::Sports,
    ];

    /// Label used in URLs and response text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Fashion => "fashion",
            Self::Home => "home",
            Self::Beauty => "beauty",
            Self::Sports => "sports",
        }
    }

    /// Keywords that select this category.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Electronics => ELECTRONICS_KEYWORDS,
            Self::Fashion => FASHION_KEYWORDS,
            Self::Home => HOME_KEYWORDS,
            Self::Beauty => BEAUTY_KEYWORDS,
            Self::Sports => SPORTS_KEYWORDS,
        }
    }

    fn matches(&self, text: &str) -> bool {
        self.keywords().iter().any(|kw| text.contains(kw))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return the first category whose keywords appear in `message`.
///
/// `message` is expected to be lowercased already; matching is plain
/// substring containment.
pub fn extract_category(message: &str) -> Option<Category> {
    Category::ALL.into_iter().find(|category| category.matches(message))
}
