//! Keyword-based category suggestions
//!
//! A bag-of-keywords classifier: each category's confidence is the fraction of
//! its keywords found as substrings of the lowercased description.

use super::types::{CategorizationResult, CategorySuggestion};

/// Catch-all category, always present in the suggestions
pub const OTHER_CATEGORY: &str = "Other";

/// Entries returned in `all_categories`
const MAX_SUGGESTIONS: usize = 5;

/// Category keyword table, in ranking tie-break order
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Food & Dining",
        &[
            "restaurant",
            "cafe",
            "coffee",
            "pizza",
            "burger",
            "groceries",
            "supermarket",
            "market",
            "lunch",
            "dinner",
            "breakfast",
            "fast food",
            "diner",
            "bakery",
            "bistro",
            "food delivery",
            "uber eats",
            "doordash",
        ],
    ),
    (
        "Transportation",
        &[
            "gas",
            "fuel",
            "car",
            "uber",
            "lyft",
            "taxi",
            "bus",
            "metro",
            "parking",
            "toll",
            "public transport",
            "train",
            "flight",
            "airline",
            "transit",
            "bicycle",
            "motorcycle",
        ],
    ),
    (
        "Entertainment",
        &[
            "movie",
            "cinema",
            "concert",
            "music",
            "game",
            "xbox",
            "playstation",
            "spotify",
            "netflix",
            "disney",
            "hulu",
            "tickets",
            "show",
            "theater",
            "streaming",
            "entertainment",
        ],
    ),
    (
        "Shopping",
        &[
            "mall",
            "store",
            "shop",
            "amazon",
            "ebay",
            "retail",
            "clothing",
            "apparel",
            "fashion",
            "department store",
            "boutique",
            "outlet",
        ],
    ),
    (
        "Utilities",
        &[
            "electricity",
            "water",
            "gas bill",
            "internet",
            "phone",
            "mobile",
            "utility",
            "bill",
            "power",
            "broadband",
            "wifi",
        ],
    ),
    (
        "Healthcare",
        &[
            "pharmacy",
            "doctor",
            "hospital",
            "medical",
            "clinic",
            "dental",
            "dentist",
            "medicine",
            "drug",
            "health",
            "therapy",
            "healthcare",
        ],
    ),
    (
        "Education",
        &[
            "school",
            "university",
            "college",
            "tuition",
            "course",
            "books",
            "education",
            "training",
            "class",
            "lesson",
            "student",
        ],
    ),
    (
        "Fitness",
        &[
            "gym",
            "fitness",
            "yoga",
            "trainer",
            "sports",
            "athletic",
            "workout",
            "exercise",
            "health club",
        ],
    ),
    (OTHER_CATEGORY, &[]),
];

/// Suggests a category for a free-text transaction description
#[derive(Debug, Clone, Default)]
pub struct TransactionCategorizer;

impl TransactionCategorizer {
    pub fn new() -> Self {
        Self
    }

    /// Names of all known categories, in declaration order
    pub fn categories(&self) -> impl Iterator<Item = &'static str> {
        CATEGORY_KEYWORDS.iter().map(|(name, _)| *name)
    }

    pub fn categorize(&self, description: &str) -> CategorizationResult {
        let text = description.to_lowercase();

        let mut scored: Vec<CategorySuggestion> = CATEGORY_KEYWORDS
            .iter()
            .map(|(name, keywords)| score(name, keywords, &text))
            .collect();

        // Stable: ties keep declaration order
        scored.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let suggested_category = scored[0].name.clone();
        let confidence = scored[0].confidence;

        CategorizationResult {
            suggested_category,
            confidence,
            all_categories: shortlist(scored),
        }
    }
}

fn score(name: &str, keywords: &[&str], text: &str) -> CategorySuggestion {
    let keywords_matched: Vec<String> = keywords
        .iter()
        .filter(|kw| text.contains(*kw))
        .map(|kw| kw.to_string())
        .collect();

    let confidence = if keywords.is_empty() {
        0.0
    } else {
        keywords_matched.len() as f64 / keywords.len() as f64
    };

    CategorySuggestion {
        name: name.to_string(),
        confidence,
        keywords_matched,
    }
}

/// Matched categories plus "Other", capped so "Other" is never cut off
fn shortlist(ranked: Vec<CategorySuggestion>) -> Vec<CategorySuggestion> {
    let (mut matched, rest): (Vec<_>, Vec<_>) = ranked
        .into_iter()
        .filter(|s| s.confidence > 0.0 || s.name == OTHER_CATEGORY)
        .partition(|s| s.name != OTHER_CATEGORY);

    matched.truncate(MAX_SUGGESTIONS - rest.len());
    matched.extend(rest);
    matched
}
