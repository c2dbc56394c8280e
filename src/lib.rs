//! # Till Register
//!
//! An interactive point-of-sale simulator: scan product codes into a cart,
//! then print a receipt with purchases, discounts, and the amount due.
//!
//! ## Design Principles
//!
//! - **Exact money**: prices are `rust_decimal` values; only the volume ratio
//!   rule rounds, to cents, per line
//! - **Closed rule set**: discounts are a `DiscountRule` enum with typed parameters
//! - **Immutable catalog**: loaded once, then borrowed by each register
//! - **Lazy rule validation**: a bad discount configuration fails when that
//!   product's discount is computed, not at load time
//!
//! ## Example
//!
//! ```
//! use till_register::{CashRegister, Catalog};
//! use std::io::Cursor;
//!
//! let json = r#"[
//!     {"code": "A", "name": "Product A", "price": 1.1},
//!     {"code": "B", "name": "Product B", "price": 2.2, "discount_type": "buy_one_get_one_free"}
//! ]"#;
//! let catalog = Catalog::from_reader(Cursor::new(json)).unwrap();
//!
//! let mut register = CashRegister::new(&catalog);
//! register.scan("A").unwrap();
//! register.scan("B").unwrap();
//! register.scan("B").unwrap();
//!
//! assert_eq!(register.total().unwrap().to_string(), "3.30");
//! ```

pub mod cart;
pub mod catalog;
pub mod discount;
pub mod error;
pub mod money;
pub mod product;
pub mod receipt;
pub mod register;
pub mod session;

pub use cart::Cart;
pub use catalog::Catalog;
pub use discount::{DiscountKind, DiscountRule, Ratio};
pub use error::{CatalogLoadError, ConfigurationError, RatioError, RegisterError, Result};
pub use money::Money;
pub use product::{DiscountConfig, Product, ProductRecord};
pub use receipt::{DiscountItem, LineItem, Receipt};
pub use register::CashRegister;
pub use session::{Command, Session};
