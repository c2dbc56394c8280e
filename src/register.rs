//! Cash register: the cart plus the money figures derived from it.
//!
//! Every figure is recomputed from the cart and catalog on demand, so
//! repeated queries without a scan in between return identical results.

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::discount::DiscountRule;
use crate::error::{RegisterError, Result};
use crate::money::Money;
use crate::product::Product;
use crate::receipt::{DiscountItem, LineItem, Receipt};
use log::{debug, warn};

/// One session's register.
///
/// Borrows the shared, immutable catalog and owns its cart. Each session
/// (each simulated till) gets its own `CashRegister`.
///
/// # States
///
/// The cart starts empty and becomes non-empty on the first successful scan.
/// There is no way back to empty; `receipt` returns `None` while the
/// purchase total is zero.
pub struct CashRegister<'c> {
    catalog: &'c Catalog,
    cart: Cart,
}

impl<'c> CashRegister<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        CashRegister {
            catalog,
            cart: Cart::new(),
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Looks up a product by exact code.
    pub fn catalog_lookup(&self, code: &str) -> Result<&'c Product> {
        self.catalog.lookup(code)
    }

    /// Adds one unit of `code` to the cart.
    ///
    /// The code must already be normalized (upper-cased). An unknown code
    /// returns `ProductNotFound` and leaves the cart untouched.
    /// Returns the product and its new quantity.
    pub fn scan(&mut self, code: &str) -> Result<(&'c Product, u32)> {
        let product = match self.catalog.get(code) {
            Some(product) => product,
            None => {
                warn!("Scan of unknown product code {:?}", code);
                return Err(RegisterError::ProductNotFound {
                    code: code.to_string(),
                });
            }
        };

        let quantity = self.cart.add(product.code());
        debug!("Scanned {}, quantity now {}", product.code(), quantity);
        Ok((product, quantity))
    }

    /// Sum of price × quantity over the cart. Zero for an empty cart.
    pub fn purchases(&self) -> Result<Money> {
        let mut total = Money::ZERO;
        for line in self.lines() {
            let (product, quantity) = line?;
            total = add(total, line_total(product, quantity)?, "purchases")?;
        }
        Ok(total)
    }

    /// Sum of every line's discount; lines without a rule contribute zero.
    ///
    /// Fails with `ConfigurationError` if a scanned product's rule is unusable.
    pub fn discounts(&self) -> Result<Money> {
        let mut total = Money::ZERO;
        for line in self.lines() {
            let (product, quantity) = line?;
            if let Some((_, amount)) = line_discount(product, quantity)? {
                total = add(total, amount, "discounts")?;
            }
        }
        Ok(total)
    }

    /// Purchases minus discounts. Not clamped at zero.
    pub fn total(&self) -> Result<Money> {
        self.purchases()?
            .checked_sub(self.discounts()?)
            .ok_or_else(|| overflow("total"))
    }

    /// Builds the receipt summary, or `None` when there is nothing to charge.
    pub fn receipt(&self) -> Result<Option<Receipt<'c>>> {
        let purchases_total = self.purchases()?;
        if !purchases_total.is_positive() {
            return Ok(None);
        }

        let mut line_items = Vec::with_capacity(self.cart.len());
        let mut discount_items = Vec::new();
        let mut discounts = Money::ZERO;

        for line in self.lines() {
            let (product, quantity) = line?;
            line_items.push(LineItem {
                product,
                quantity,
                line_total: line_total(product, quantity)?,
            });

            if let Some((rule, amount)) = line_discount(product, quantity)? {
                if amount.is_positive() {
                    discount_items.push(DiscountItem {
                        product,
                        kind: rule.kind(),
                        amount,
                    });
                }
                discounts = add(discounts, amount, "discounts")?;
            }
        }

        Ok(Some(Receipt {
            line_items,
            discount_items,
            purchases_total,
            discounts_total: discounts.is_positive().then_some(discounts),
            grand_total: purchases_total
                .checked_sub(discounts)
                .ok_or_else(|| overflow("total"))?,
        }))
    }

    /// Cart entries resolved against the catalog, in first-scan order.
    fn lines(&self) -> impl Iterator<Item = Result<(&'c Product, u32)>> + '_ {
        let catalog = self.catalog;
        self.cart
            .iter()
            .map(move |(code, quantity)| catalog.lookup(code).map(|product| (product, quantity)))
    }
}

fn overflow(context: impl Into<String>) -> RegisterError {
    let context = context.into();
    warn!("Amount overflow computing {}", context);
    RegisterError::AmountOverflow { context }
}

fn add(total: Money, amount: Money, context: &str) -> Result<Money> {
    total.checked_add(amount).ok_or_else(|| overflow(context))
}

fn line_total(product: &Product, quantity: u32) -> Result<Money> {
    product
        .price()
        .checked_mul(quantity)
        .ok_or_else(|| overflow(format!("line total for {}", product.code())))
}

fn line_discount(product: &Product, quantity: u32) -> Result<Option<(DiscountRule, Money)>> {
    let rule = match DiscountRule::for_product(product) {
        Ok(Some(rule)) => rule,
        Ok(None) => return Ok(None),
        Err(e) => {
            warn!("{}", e);
            return Err(e.into());
        }
    };
    let amount = rule.compute(product, quantity).ok_or_else(|| {
        overflow(format!("{} for {}", rule.kind().name(), product.code()))
    })?;
    debug!(
        "{} x{}: {} discount {}",
        product.code(),
        quantity,
        rule.kind().name(),
        amount
    );
    Ok(Some((rule, amount)))
}
