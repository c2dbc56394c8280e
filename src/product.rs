//! Product models for catalog parsing and internal representation.

use crate::error::CatalogLoadError;
use crate::money::Money;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw product record as read from the catalog file.
///
/// Discount arguments are kept as an untyped bag here; they are only
/// checked against the named rule when a discount is actually computed.
#[derive(Debug, Deserialize)]
pub struct ProductRecord {
    pub code: String,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub discount_type: Option<String>,
    #[serde(default)]
    pub discount_arguments: Option<Map<String, Value>>,
}

impl ProductRecord {
    /// Validates the record into an immutable `Product`.
    ///
    /// `index` is the record's position in the catalog, used for error reporting.
    pub fn parse(self, index: usize) -> Result<Product, CatalogLoadError> {
        let code = self.code.trim().to_uppercase();
        if code.is_empty() {
            return Err(invalid(index, "code must not be empty"));
        }

        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(invalid(index, "name must not be empty"));
        }

        if self.price.is_negative() {
            return Err(invalid(index, format!("price {} is negative", self.price)));
        }

        // Even an empty rule name is kept; it fails as unknown when used.
        let discount = self.discount_type.map(|rule| DiscountConfig {
            rule: rule.trim().to_string(),
            arguments: self.discount_arguments.unwrap_or_default(),
        });

        Ok(Product {
            code,
            name,
            price: self.price,
            discount,
        })
    }
}

fn invalid(index: usize, message: impl Into<String>) -> CatalogLoadError {
    CatalogLoadError::InvalidRecord {
        index,
        message: message.into(),
    }
}

/// A discount rule name plus its parameter bag, as configured on a product.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountConfig {
    /// Rule name, e.g. `buy_one_get_one_free`
    pub rule: String,

    /// Rule-specific named parameters
    pub arguments: Map<String, Value>,
}

/// A purchasable product. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    code: String,
    name: String,
    price: Money,
    discount: Option<DiscountConfig>,
}

impl Product {
    /// Creates a product without a discount. The code is used as given.
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Product {
            code: code.into(),
            name: name.into(),
            price,
            discount: None,
        }
    }

    /// Attaches a discount rule reference and its arguments.
    pub fn with_discount(mut self, rule: impl Into<String>, arguments: Map<String, Value>) -> Self {
        self.discount = Some(DiscountConfig {
            rule: rule.into(),
            arguments,
        });
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// The configured discount, if any. Not validated until used.
    pub fn discount(&self) -> Option<&DiscountConfig> {
        self.discount.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn record(value: Value) -> ProductRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_product_without_discount() {
        let product = record(json!({"code": "pr1", "name": "Product 1", "price": 1.1}))
            .parse(0)
            .unwrap();

        assert_eq!(product.code(), "PR1");
        assert_eq!(product.name(), "Product 1");
        assert_eq!(product.price(), Money::from_str("1.1").unwrap());
        assert!(product.discount().is_none());
    }

    #[test]
    fn test_parse_product_with_discount() {
        let product = record(json!({
            "code": "PR2",
            "name": "Product 2",
            "price": 22.2,
            "discount_type": "percentage",
            "discount_arguments": {"percentage": 20}
        }))
        .parse(0)
        .unwrap();

        let discount = product.discount().unwrap();
        assert_eq!(discount.rule, "percentage");
        assert_eq!(discount.arguments.get("percentage"), Some(&json!(20)));
    }

    #[test]
    fn test_discount_type_without_arguments_gets_empty_bag() {
        let product = record(json!({
            "code": "B",
            "name": "Product B",
            "price": 2.2,
            "discount_type": "buy_one_get_one_free"
        }))
        .parse(0)
        .unwrap();

        assert!(product.discount().unwrap().arguments.is_empty());
    }

    #[test]
    fn test_empty_discount_type_is_kept() {
        let product = record(json!({
            "code": "E",
            "name": "Empty Rule",
            "price": 1,
            "discount_type": ""
        }))
        .parse(0)
        .unwrap();

        assert_eq!(product.discount().unwrap().rule, "");
    }

    #[test]
    fn test_parse_rejects_empty_code() {
        let err = record(json!({"code": "  ", "name": "Nameless", "price": 1}))
            .parse(3)
            .unwrap_err();

        assert!(matches!(err, CatalogLoadError::InvalidRecord { index: 3, .. }));
    }

    #[test]
    fn test_parse_rejects_negative_price() {
        let err = record(json!({"code": "X", "name": "Refund", "price": -1.0}))
            .parse(0)
            .unwrap_err();

        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_record_requires_price() {
        let result = serde_json::from_value::<ProductRecord>(json!({"code": "X", "name": "X"}));
        assert!(result.is_err());
    }
}
