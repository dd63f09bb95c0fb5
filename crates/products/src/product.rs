use serde::{Deserialize, Deserializer, Serialize};

use storefront_core::{Entity, ProductId};

/// Catalog product (matches the fetch collaborator's wire shape).
///
/// Products are never edited in place: a reload replaces the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image_src: String,
    #[serde(default)]
    pub option_value: String,
    #[serde(default)]
    pub sku: String,
    #[serde(deserialize_with = "non_negative_price")]
    pub price: f64,
    /// Subscription discount in percent (0–100).
    #[serde(default, deserialize_with = "discount_percent")]
    pub subscription_discount: Option<u8>,
    #[serde(default)]
    pub subscription: bool,
}

impl Product {
    /// Build a published product with empty display fields.
    ///
    /// Negative or non-finite prices are normalized to `0.0`.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            slug: String::new(),
            title: title.into(),
            vendor: String::new(),
            tags: Vec::new(),
            published: true,
            url: String::new(),
            image_src: String::new(),
            option_value: String::new(),
            sku: String::new(),
            price: normalize_price(price),
            subscription_discount: None,
            subscription: false,
        }
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_subscription(mut self, available: bool) -> Self {
        self.subscription = available;
        self
    }

    /// Set the subscription discount; values above 100 clear it.
    pub fn with_discount(mut self, percent: u8) -> Self {
        self.subscription_discount = (percent <= 100).then_some(percent);
        self
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    /// Price paid with a subscription.
    ///
    /// Equals `price` unless the product is subscribable and carries a
    /// non-zero discount.
    pub fn subscription_price(&self) -> f64 {
        match self.subscription_discount {
            Some(percent) if self.subscription && percent > 0 => {
                self.price * (1.0 - f64::from(percent) / 100.0)
            }
            _ => self.price,
        }
    }

    pub fn subscription_savings(&self) -> f64 {
        self.price - self.subscription_price()
    }

    /// Case-insensitive substring match against any tag.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn has_tag_containing(&self, needle: &str) -> bool {
        self.tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

fn normalize_price(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 { price } else { 0.0 }
}

fn non_negative_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(normalize_price)
}

/// The discount arrives either as a number or as numeric text (`10`, `"10"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDiscount {
    Number(f64),
    Text(String),
}

fn discount_percent<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawDiscount>::deserialize(deserializer)?;
    let value = match raw {
        None => return Ok(None),
        Some(RawDiscount::Number(n)) => n,
        Some(RawDiscount::Text(text)) => match text.trim().parse::<f64>() {
            Ok(n) => n,
            Err(_) => return Ok(None),
        },
    };

    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(Some(value.round() as u8))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Product {
        serde_json::from_str(json).unwrap()
    }

    const BASE: &str = r#""id": 3, "title": "Chew Toy", "vendor": "Acme", "tags": ["Dog", "Chews"],
        "published": true, "price": 20.0, "subscription": true"#;

    #[test]
    fn decodes_discount_from_number_or_text() {
        let numeric = decode(&format!("{{{BASE}, \"subscription_discount\": 10}}"));
        let text = decode(&format!("{{{BASE}, \"subscription_discount\": \"10\"}}"));

        assert_eq!(numeric.subscription_discount, Some(10));
        assert_eq!(text.subscription_discount, Some(10));
    }

    #[test]
    fn blank_or_out_of_range_discount_decodes_to_none() {
        for raw in [r#""""#, r#""abc""#, "150", "-5", "null"] {
            let product = decode(&format!("{{{BASE}, \"subscription_discount\": {raw}}}"));
            assert_eq!(product.subscription_discount, None, "raw discount {raw}");
        }
        let missing = decode(&format!("{{{BASE}}}"));
        assert_eq!(missing.subscription_discount, None);
    }

    #[test]
    fn negative_price_is_normalized_to_zero() {
        let product = decode(r#"{"id": 1, "title": "Odd", "price": -4.5}"#);
        assert_eq!(product.price, 0.0);
        assert!(!product.published);
        assert_eq!(Product::new(2u64, "NaN", f64::NAN).price, 0.0);
    }

    #[test]
    fn subscription_price_applies_discount_only_when_subscribable() {
        let subscribable = Product::new(1u64, "Food", 40.0)
            .with_subscription(true)
            .with_discount(25);
        assert_eq!(subscribable.subscription_price(), 30.0);
        assert_eq!(subscribable.subscription_savings(), 10.0);

        let one_time = subscribable.clone().with_subscription(false);
        assert_eq!(one_time.subscription_price(), 40.0);
        assert_eq!(one_time.subscription_savings(), 0.0);
    }

    #[test]
    fn tag_match_is_case_insensitive_substring() {
        let product = Product::new(1u64, "Bully Stick", 9.0).with_tags(["Dog Chews", "Natural"]);
        assert!(product.has_tag_containing("chew"));
        assert!(product.has_tag_containing("natu"));
        assert!(!product.has_tag_containing("cat"));
    }
}
