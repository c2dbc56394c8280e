//! Receipt summary and its text layout.
//!
//! `CashRegister::receipt` builds the structured summary; `Receipt::write_to`
//! is the presentation side and the only place amounts are laid out as text.

use crate::discount::DiscountKind;
use crate::money::Money;
use crate::product::Product;
use std::io::{self, Write};

/// Display currency suffix.
pub const CURRENCY: &str = "€";

/// Width of the `=` banners.
const BANNER_WIDTH: usize = 47;

/// One purchased product line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'c> {
    pub product: &'c Product,
    pub quantity: u32,
    /// price × quantity, before discounts
    pub line_total: Money,
}

/// One product line that earned a discount.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountItem<'c> {
    pub product: &'c Product,
    pub kind: DiscountKind,
    pub amount: Money,
}

/// Structured summary of a non-empty cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt<'c> {
    /// Cart entries in first-scan order
    pub line_items: Vec<LineItem<'c>>,

    /// Only lines whose discount is positive
    pub discount_items: Vec<DiscountItem<'c>>,

    pub purchases_total: Money,

    /// `None` unless total discounts are positive
    pub discounts_total: Option<Money>,

    /// purchases minus discounts; not clamped at zero
    pub grand_total: Money,
}

impl Receipt<'_> {
    /// Writes the formatted receipt.
    ///
    /// The discount and totals sections are only shown when a discount applies.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", banner(" Purchases "))?;
        for item in &self.line_items {
            writeln!(
                out,
                "{:<25} {:>3} x {:>6} {:>7} {}",
                item.product.name(),
                item.quantity,
                item.product.price(),
                item.line_total,
                CURRENCY
            )?;
        }

        if let Some(discounts_total) = self.discounts_total {
            writeln!(out, "{}", banner(" Discounts "))?;
            for item in &self.discount_items {
                writeln!(
                    out,
                    "{:<4} {:<29}- {:>8} {}",
                    item.product.code(),
                    format!("({})", item.kind.label()),
                    item.amount,
                    CURRENCY
                )?;
            }

            writeln!(out, "{}", banner("   Total   "))?;
            writeln!(
                out,
                "{:<36}{:>8} {}",
                "Purchases:", self.purchases_total, CURRENCY
            )?;
            writeln!(
                out,
                "{:<34}- {:>8} {}",
                "Discounts:", discounts_total, CURRENCY
            )?;
        }

        writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;
        writeln!(
            out,
            "{:<36}{:>8} {}",
            "Total amount due:", self.grand_total, CURRENCY
        )?;
        Ok(())
    }
}

/// Centers `title` in a line of `=`, with any odd `=` on the left.
pub fn banner(title: &str) -> String {
    let padding = BANNER_WIDTH.saturating_sub(title.chars().count());
    let right = padding / 2;
    format!("{}{}{}", "=".repeat(padding - right), title, "=".repeat(right))
}
