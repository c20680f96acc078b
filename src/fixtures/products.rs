//! Product Fixtures

use rusty_money::{Findable, iso::Currency};
use serde::Deserialize;

use crate::{catalog::Product, fixtures::FixtureError, pricing::parse_cost};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// ISO 4217 code every product is priced in (e.g., "USD")
    pub currency: String,

    /// Products, in listing order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Key other fixtures use to refer to this product
    pub key: String,

    /// Product name
    pub name: String,

    /// Product image reference
    #[serde(default)]
    pub image: String,

    /// Display-formatted cost (e.g., "$15.00")
    pub cost: String,
}

impl ProductFixture {
    /// Convert into a catalog product priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::InvalidPrice`] if the cost cannot be parsed.
    pub fn try_into_product(
        self,
        currency: &'static Currency,
    ) -> Result<Product<'static>, FixtureError> {
        let price = parse_cost(&self.cost, currency)?;

        Ok(Product {
            name: self.name,
            image: self.image,
            price,
        })
    }
}

/// Resolve an ISO 4217 code into a currency.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] if the code is not recognised.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    Currency::find(code.trim()).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))
}
