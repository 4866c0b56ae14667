//! Free-text title filter.

use crate::catalog::Product;

/// Case-insensitive substring match on product titles.
///
/// A blank query (empty or only whitespace) matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TitleFilter {
    needle: Option<String>,
}

impl TitleFilter {
    /// Build a filter from what the user typed.
    pub fn new(query: &str) -> Self {
        let needle = if query.trim().is_empty() {
            None
        } else {
            Some(query.to_lowercase())
        };
        Self { needle }
    }

    /// Whether the filter lets everything through.
    pub fn is_blank(&self) -> bool {
        self.needle.is_none()
    }

    /// Check a single product.
    pub fn matches(&self, product: &Product) -> bool {
        match &self.needle {
            Some(needle) => product.title.to_lowercase().contains(needle.as_str()),
            None => true,
        }
    }

    /// Keep the matching products, in their original order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Products whose title contains `query`, ignoring case.
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    TitleFilter::new(query).apply(products)
}
