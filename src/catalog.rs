//! Immutable product catalog.
//!
//! Loaded once at startup from a JSON list of product records and then
//! shared read-only. Loading fails fast: one bad record rejects the whole file.

use crate::error::{CatalogLoadError, RegisterError, Result};
use crate::product::{Product, ProductRecord};
use log::{debug, info};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Products indexed by upper-cased code, kept in file order for display.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from already-validated products.
    pub fn from_products<I>(products: I) -> std::result::Result<Self, CatalogLoadError>
    where
        I: IntoIterator<Item = Product>,
    {
        let mut catalog = Catalog::default();
        for (index, product) in products.into_iter().enumerate() {
            catalog.insert(product, index)?;
        }
        Ok(catalog)
    }

    /// Parses a JSON array of product records.
    pub fn from_reader<R: Read>(reader: R) -> std::result::Result<Self, CatalogLoadError> {
        let records: Vec<ProductRecord> = serde_json::from_reader(reader)?;

        let mut catalog = Catalog::default();
        for (index, record) in records.into_iter().enumerate() {
            let product = record.parse(index)?;
            debug!("Catalog record {}: loaded {}", index, product.code());
            catalog.insert(product, index)?;
        }

        info!("Loaded {} products into catalog", catalog.len());
        Ok(catalog)
    }

    /// Opens and parses the catalog file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::result::Result<Self, CatalogLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    fn insert(&mut self, product: Product, index: usize) -> std::result::Result<(), CatalogLoadError> {
        if self.index.contains_key(product.code()) {
            return Err(CatalogLoadError::DuplicateCode {
                code: product.code().to_string(),
                index,
            });
        }
        self.index
            .insert(product.code().to_string(), self.products.len());
        self.products.push(product);
        Ok(())
    }

    /// Exact-match lookup; callers normalize the code first.
    pub fn get(&self, code: &str) -> Option<&Product> {
        self.index.get(code).map(|&i| &self.products[i])
    }

    /// Like `get`, but reports an unknown code as `ProductNotFound`.
    pub fn lookup(&self, code: &str) -> Result<&Product> {
        self.get(code).ok_or_else(|| RegisterError::ProductNotFound {
            code: code.to_string(),
        })
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Products in catalog file order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
