//! Discount rule library.
//!
//! Each product may name one rule in the catalog. The name and its argument
//! bag are resolved into a typed `DiscountRule` only when the discount is
//! needed, so a misconfigured product that is never scanned does no harm.

use crate::error::{ConfigurationError, RatioError};
use crate::money::Money;
use crate::product::{DiscountConfig, Product};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The closed set of known discount rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountKind {
    /// Every second unit is free.
    BuyOneGetOneFree,

    /// All units drop to a lower unit price once a quantity threshold is met.
    BulkPurchase,

    /// All units are charged a fraction of the price once a quantity threshold is met.
    VolumeRatio,
}

impl DiscountKind {
    pub const ALL: [DiscountKind; 3] = [
        DiscountKind::BuyOneGetOneFree,
        DiscountKind::BulkPurchase,
        DiscountKind::VolumeRatio,
    ];

    /// Name used in the catalog's `discount_type` field.
    pub fn name(&self) -> &'static str {
        match self {
            DiscountKind::BuyOneGetOneFree => "buy_one_get_one_free",
            DiscountKind::BulkPurchase => "bulk_purchase_discount",
            DiscountKind::VolumeRatio => "volume_ratio_discount",
        }
    }

    /// Human-readable label printed on receipts.
    pub fn label(&self) -> &'static str {
        match self {
            DiscountKind::BuyOneGetOneFree => "Buy one get one free",
            DiscountKind::BulkPurchase => "Bulk purchase discount",
            DiscountKind::VolumeRatio => "Volume ratio discount",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A "pay `numerator`/`denominator` of the price" fraction, written as `"2/3"`.
///
/// Always satisfies `0 < denominator` and `numerator <= denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    numerator: u32,
    denominator: u32,
}

impl Ratio {
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, RatioError> {
        if denominator == 0 {
            return Err(RatioError::ZeroDenominator);
        }
        if numerator > denominator {
            return Err(RatioError::AboveWhole {
                numerator,
                denominator,
            });
        }
        Ok(Ratio {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }
}

impl FromStr for Ratio {
    type Err = RatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (num, den) = s
            .split_once('/')
            .ok_or_else(|| RatioError::Malformed(s.to_string()))?;
        Ratio::new(parse_part(num)?, parse_part(den)?)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

fn parse_part(part: &str) -> Result<u32, RatioError> {
    let part = part.trim();
    part.parse::<u32>().map_err(|source| RatioError::InvalidPart {
        part: part.to_string(),
        source,
    })
}

#[derive(Debug, Deserialize)]
struct BulkPurchaseArgs {
    discount_limit: u32,
    discounted_price: Money,
}

#[derive(Debug, Deserialize)]
struct VolumeRatioArgs {
    discount_limit: u32,
    discounted_ratio: String,
}

/// A discount rule with its typed parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscountRule {
    /// discount = price × floor(quantity / 2)
    BuyOneGetOneFree,

    /// Once `quantity >= discount_limit`, every unit is charged `discounted_price`.
    ///
    /// This is a cliff, not a marginal tier: units below the threshold are
    /// discounted too once it is reached.
    BulkPurchase {
        discount_limit: u32,
        discounted_price: Money,
    },

    /// Once `quantity >= discount_limit`, the line is charged `discounted_ratio`
    /// of its full price, rounded to cents.
    VolumeRatio {
        discount_limit: u32,
        discounted_ratio: Ratio,
    },
}

impl DiscountRule {
    /// Resolves the rule configured on `product`, if any.
    ///
    /// Fails with `ConfigurationError` when the rule is unknown, when a
    /// required argument is missing or ill-typed, or when the arguments would
    /// yield a negative discount for this product.
    pub fn for_product(product: &Product) -> Result<Option<DiscountRule>, ConfigurationError> {
        match product.discount() {
            Some(config) => Self::from_config(product, config).map(Some),
            None => Ok(None),
        }
    }

    fn from_config(product: &Product, config: &DiscountConfig) -> Result<Self, ConfigurationError> {
        let kind =
            DiscountKind::from_name(&config.rule).ok_or_else(|| ConfigurationError::UnknownRule {
                code: product.code().to_string(),
                rule: config.rule.clone(),
            })?;
        let invalid = |message: String| ConfigurationError::InvalidArguments {
            code: product.code().to_string(),
            rule: kind.name().to_string(),
            message,
        };

        match kind {
            DiscountKind::BuyOneGetOneFree => Ok(DiscountRule::BuyOneGetOneFree),
            DiscountKind::BulkPurchase => {
                let args: BulkPurchaseArgs = arguments(config).map_err(invalid)?;
                if args.discounted_price > product.price() {
                    return Err(invalid(format!(
                        "discounted price {} exceeds price {}",
                        args.discounted_price,
                        product.price()
                    )));
                }
                if args.discounted_price.is_negative() {
                    return Err(invalid(format!(
                        "discounted price {} is negative",
                        args.discounted_price
                    )));
                }
                Ok(DiscountRule::BulkPurchase {
                    discount_limit: args.discount_limit,
                    discounted_price: args.discounted_price,
                })
            }
            DiscountKind::VolumeRatio => {
                let args: VolumeRatioArgs = arguments(config).map_err(invalid)?;
                let discounted_ratio = args
                    .discounted_ratio
                    .parse::<Ratio>()
                    .map_err(|e| invalid(e.to_string()))?;
                Ok(DiscountRule::VolumeRatio {
                    discount_limit: args.discount_limit,
                    discounted_ratio,
                })
            }
        }
    }

    pub fn kind(&self) -> DiscountKind {
        match self {
            DiscountRule::BuyOneGetOneFree => DiscountKind::BuyOneGetOneFree,
            DiscountRule::BulkPurchase { .. } => DiscountKind::BulkPurchase,
            DiscountRule::VolumeRatio { .. } => DiscountKind::VolumeRatio,
        }
    }

    /// Computes the discount for `quantity` units of `product`. Never negative.
    ///
    /// Not clamped to the line's purchase amount. Returns `None` if the
    /// amount overflows.
    pub fn compute(&self, product: &Product, quantity: u32) -> Option<Money> {
        let price = product.price();
        match self {
            DiscountRule::BuyOneGetOneFree => price.checked_mul(quantity / 2),
            DiscountRule::BulkPurchase {
                discount_limit,
                discounted_price,
            } => {
                if quantity < *discount_limit {
                    return Some(Money::ZERO);
                }
                price.checked_sub(*discounted_price)?.checked_mul(quantity)
            }
            DiscountRule::VolumeRatio {
                discount_limit,
                discounted_ratio,
            } => {
                if quantity < *discount_limit {
                    return Some(Money::ZERO);
                }
                // Multiply before dividing so exact fractions like 111 × 1/3 stay exact.
                let line = price.checked_mul(quantity)?.amount();
                let saved_parts =
                    Decimal::from(discounted_ratio.denominator - discounted_ratio.numerator);
                let saved = line
                    .checked_mul(saved_parts)?
                    .checked_div(Decimal::from(discounted_ratio.denominator))?;
                Some(Money::new(saved).round_cents())
            }
        }
    }
}

fn arguments<T: DeserializeOwned>(config: &DiscountConfig) -> Result<T, String> {
    serde_json::from_value(Value::Object(config.arguments.clone())).map_err(|e| e.to_string())
}
