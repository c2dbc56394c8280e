//! Error types for the till register.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for register operations
pub type Result<T> = std::result::Result<T, RegisterError>;

/// Errors that can occur while using the register.
#[derive(Error, Debug)]
pub enum RegisterError {
    /// The product catalog could not be loaded; fatal at startup
    #[error(transparent)]
    CatalogLoad(#[from] CatalogLoadError),

    /// A product's discount rule is misconfigured
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Scan or lookup of a code that is not in the catalog
    #[error("Product not found: {code}")]
    ProductNotFound { code: String },

    /// A money calculation left the representable range
    #[error("Amount overflow computing {context}")]
    AmountOverflow { context: String },

    /// Failed to read input or write output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed or unreadable catalog source.
#[derive(Error, Debug)]
pub enum CatalogLoadError {
    /// Failed to open or read the catalog file
    #[error("Cannot read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog is not a valid JSON list of product records
    #[error("Catalog parsing error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record is present but unusable
    #[error("Invalid product record at index {index}: {message}")]
    InvalidRecord { index: usize, message: String },

    /// Two records normalize to the same product code
    #[error("Duplicate product code {code} at index {index}")]
    DuplicateCode { code: String, index: usize },
}

/// A product references a discount rule with missing or malformed parameters.
///
/// Raised when that product's discount is computed, not at load time.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The discount type names no known rule
    #[error("Product {code} references unknown discount rule '{rule}'")]
    UnknownRule { code: String, rule: String },

    /// The rule exists but its arguments are unusable
    #[error("Product {code} has invalid arguments for '{rule}': {message}")]
    InvalidArguments {
        code: String,
        rule: String,
        message: String,
    },
}

/// A `num/den` discount ratio that cannot be used.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RatioError {
    /// No `/` separator
    #[error("ratio '{0}' is not of the form num/den")]
    Malformed(String),

    /// One side is not a non-negative integer
    #[error("ratio part '{part}' is not a whole number: {source}")]
    InvalidPart {
        part: String,
        #[source]
        source: ParseIntError,
    },

    #[error("ratio denominator must not be zero")]
    ZeroDenominator,

    /// Would charge more than the full price
    #[error("ratio {numerator}/{denominator} exceeds the full price")]
    AboveWhole { numerator: u32, denominator: u32 },
}
