//! Filter predicate engine.
//!
//! Filtering is a pure function of the collection and the active
//! [`FilterSpec`]: input order is preserved, nothing is sorted, and an empty
//! result is just an empty collection.

use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

use crate::product::Product;

/// Subscription availability criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionMode {
    /// No filtering on subscription availability.
    #[default]
    Any,
    /// Only products that can be bought as a subscription.
    Required,
    /// Only one-time purchase products.
    Excluded,
}

impl SubscriptionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionMode::Any => "any",
            SubscriptionMode::Required => "required",
            SubscriptionMode::Excluded => "excluded",
        }
    }

    /// Parse a form/select value. Unknown values yield `None`.
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "any" | "all" => Some(SubscriptionMode::Any),
            "required" | "yes" => Some(SubscriptionMode::Required),
            "excluded" | "no" => Some(SubscriptionMode::Excluded),
            _ => None,
        }
    }

    pub fn matches(self, subscription: bool) -> bool {
        match self {
            SubscriptionMode::Any => true,
            SubscriptionMode::Required => subscription,
            SubscriptionMode::Excluded => !subscription,
        }
    }
}

/// The active set of user-chosen narrowing criteria.
///
/// Price bounds are inclusive and independent: `price_min > price_max` is legal
/// and simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Matched against tags (case-insensitive substring). Empty disables it.
    pub search: String,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub subscription: SubscriptionMode,
}

impl ValueObject for FilterSpec {}

impl FilterSpec {
    pub fn is_default(&self) -> bool {
        *self == FilterSpec::default()
    }

    /// Merge a partial update; fields absent from the patch are kept.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(min) = patch.price_min {
            self.price_min = min;
        }
        if let Some(max) = patch.price_max {
            self.price_max = max;
        }
        if let Some(mode) = patch.subscription {
            self.subscription = mode;
        }
    }

    /// Whether a single product passes every criterion.
    pub fn matches(&self, product: &Product) -> bool {
        Predicate::new(self).matches(product)
    }

    /// Summary of the criteria that currently narrow the collection.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut active = Vec::new();
        if !self.search.is_empty() {
            active.push(ActiveFilter::Search(self.search.clone()));
        }
        if self.price_min.is_some() || self.price_max.is_some() {
            active.push(ActiveFilter::Price {
                min: self.price_min,
                max: self.price_max,
            });
        }
        if self.subscription != SubscriptionMode::Any {
            active.push(ActiveFilter::Subscription(self.subscription));
        }
        active
    }
}

/// One non-default criterion, for an "active filters" panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ActiveFilter {
    Search(String),
    Price { min: Option<f64>, max: Option<f64> },
    Subscription(SubscriptionMode),
}

impl core::fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ActiveFilter::Search(term) => write!(f, "Search: \"{term}\""),
            ActiveFilter::Price { min, max } => {
                write!(f, "Price: {} - ", min.unwrap_or(0.0))?;
                match max {
                    Some(max) => write!(f, "{max}"),
                    None => f.write_str("∞"),
                }
            }
            ActiveFilter::Subscription(SubscriptionMode::Excluded) => {
                f.write_str("Subscription: Not Available")
            }
            ActiveFilter::Subscription(_) => f.write_str("Subscription: Available"),
        }
    }
}

/// Partial filter update.
///
/// Price bounds are doubly optional: `None` leaves the bound alone,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub search: Option<String>,
    pub price_min: Option<Option<f64>>,
    pub price_max: Option<Option<f64>>,
    pub subscription: Option<SubscriptionMode>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == FilterPatch::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Set or clear the lower bound. Negative or non-finite bounds are ignored.
    pub fn price_min(mut self, bound: Option<f64>) -> Self {
        if let Some(bound) = normalize_bound(bound) {
            self.price_min = Some(bound);
        }
        self
    }

    /// Set or clear the upper bound. Negative or non-finite bounds are ignored.
    pub fn price_max(mut self, bound: Option<f64>) -> Self {
        if let Some(bound) = normalize_bound(bound) {
            self.price_max = Some(bound);
        }
        self
    }

    pub fn subscription(mut self, mode: SubscriptionMode) -> Self {
        self.subscription = Some(mode);
        self
    }

    /// Lower bound from raw form text: blank clears, garbage is ignored.
    pub fn price_min_input(self, input: &str) -> Self {
        match parse_bound(input) {
            Some(bound) => self.price_min(bound),
            None => self,
        }
    }

    /// Upper bound from raw form text: blank clears, garbage is ignored.
    pub fn price_max_input(self, input: &str) -> Self {
        match parse_bound(input) {
            Some(bound) => self.price_max(bound),
            None => self,
        }
    }

    /// Subscription mode from a select value; unknown values are ignored.
    pub fn subscription_input(self, input: &str) -> Self {
        match SubscriptionMode::from_input(input) {
            Some(mode) => self.subscription(mode),
            None => self,
        }
    }
}

/// `Some(None)` = clear, `Some(Some(x))` = set, `None` = reject.
fn normalize_bound(bound: Option<f64>) -> Option<Option<f64>> {
    match bound {
        None => Some(None),
        Some(value) if value.is_finite() && value >= 0.0 => Some(Some(value)),
        Some(_) => None,
    }
}

fn parse_bound(input: &str) -> Option<Option<f64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(None);
    }
    trimmed.parse::<f64>().ok().map(Some)
}

/// FilterSpec with the search term lowercased once per pass.
struct Predicate<'a> {
    needle: Option<String>,
    spec: &'a FilterSpec,
}

impl<'a> Predicate<'a> {
    fn new(spec: &'a FilterSpec) -> Self {
        let needle = (!spec.search.is_empty()).then(|| spec.search.to_lowercase());
        Self { needle, spec }
    }

    fn matches(&self, product: &Product) -> bool {
        if let Some(needle) = &self.needle {
            if !product.has_tag_containing(needle) {
                return false;
            }
        }
        if let Some(min) = self.spec.price_min {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.spec.price_max {
            if product.price > max {
                return false;
            }
        }
        self.spec.subscription.matches(product.subscription)
    }
}

/// Apply every criterion of `spec` (conjunctively) to `products`.
pub fn apply_filters(products: &[Product], spec: &FilterSpec) -> Vec<Product> {
    let predicate = Predicate::new(spec);
    products
        .iter()
        .filter(|product| predicate.matches(product))
        .cloned()
        .collect()
}
