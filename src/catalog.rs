//! Catalog
//!
//! Products a shopper can add to their cart from outside the cart view.

use std::num::NonZeroU32;

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartError},
    items::LineItem,
};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Errors related to catalog construction and lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No product is registered under the key.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A product key or product name is already registered.
    #[error("Product already in catalog: {0}")]
    DuplicateProduct(String),

    /// A product's currency differs from the catalog currency (product name, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// Adding the product to a cart failed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product name, used as the cart line name
    pub name: String,

    /// Product image reference
    pub image: String,

    /// Product price
    pub price: Money<'a, Currency>,
}

impl<'a> Product<'a> {
    /// A single-unit cart line for this product.
    pub fn line_item(&self) -> LineItem<'a> {
        LineItem::new(self.name.clone(), self.image.clone(), self.price)
    }
}

/// Catalog of products in a single currency, keyed by a short string key.
#[derive(Debug)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    keys: FxHashMap<String, ProductKey>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            products: SlotMap::with_key(),
            keys: FxHashMap::default(),
            currency,
        }
    }

    /// Register a product under `key`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateProduct`]: the key or the product name is already taken.
    /// - [`CatalogError::CurrencyMismatch`]: the product is priced in another currency.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        product: Product<'a>,
    ) -> Result<ProductKey, CatalogError> {
        let key = key.into();

        if self.keys.contains_key(&key) {
            return Err(CatalogError::DuplicateProduct(key));
        }

        if self.products.values().any(|p| p.name == product.name) {
            return Err(CatalogError::DuplicateProduct(product.name));
        }

        if product.price.currency() != self.currency {
            let product_currency = product.price.currency().iso_alpha_code;

            return Err(CatalogError::CurrencyMismatch(
                product.name,
                product_currency,
                self.currency.iso_alpha_code,
            ));
        }

        let product_key = self.products.insert(product);

        self.keys.insert(key, product_key);

        Ok(product_key)
    }

    /// Look up a product by its slot key.
    pub fn get(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Look up a product key by its string key.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if the key is not registered.
    pub fn product_key(&self, key: &str) -> Result<ProductKey, CatalogError> {
        self.keys
            .get(key)
            .copied()
            .ok_or_else(|| CatalogError::ProductNotFound(key.to_string()))
    }

    /// Look up a product by its string key.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if the key is not registered.
    pub fn product(&self, key: &str) -> Result<&Product<'a>, CatalogError> {
        let product_key = self.product_key(key)?;

        self.products
            .get(product_key)
            .ok_or_else(|| CatalogError::ProductNotFound(key.to_string()))
    }

    /// Iterate over products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency every product is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Add one unit of the product registered under `key` to `cart`.
    ///
    /// Returns the resulting quantity of the cart line.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::ProductNotFound`]: the key is not registered.
    /// - [`CatalogError::Cart`]: the cart rejected the item.
    pub fn add_to_cart(&self, cart: &mut Cart<'a>, key: &str) -> Result<NonZeroU32, CatalogError> {
        let product = self.product(key)?;
        let quantity = cart.add_item(product.line_item())?;

        debug!(key, name = %product.name, %quantity, "added product to cart");

        Ok(quantity)
    }
}
