//! Fixtures
//!
//! YAML fixture sets describing a product catalog and the initial contents of a cart.
//! A set named `plants` lives in `products/plants.yml` and `carts/plants.yml` under the
//! fixture base path.

use std::{fs, num::NonZeroU32, path::PathBuf};

use thiserror::Error;
use tracing::info;

use crate::{
    cart::{Cart, CartError},
    catalog::{Catalog, CatalogError},
    fixtures::{carts::CartFixture, products::ProductsFixture},
    items::LineItem,
    pricing::ParsePriceError,
};

pub mod carts;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid cost format
    #[error(transparent)]
    InvalidPrice(#[from] ParsePriceError),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A cart line asks for zero units
    #[error("Cart line for product {0} has zero quantity")]
    ZeroQuantity(String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCatalog,

    /// Catalog construction error
    #[error(transparent)]
    Catalog(CatalogError),

    /// Cart construction error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),
}

impl From<CatalogError> for FixtureError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::ProductNotFound(key) => FixtureError::ProductNotFound(key),
            CatalogError::Cart(error) => FixtureError::Cart(error),
            other => FixtureError::Catalog(other),
        }
    }
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog built from the products fixture
    catalog: Option<Catalog<'a>>,

    /// Cart built from the carts fixture
    cart: Option<Cart<'a>>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            cart: None,
        }
    }

    /// Load products from a YAML fixture file, replacing any loaded catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if the currency is unknown,
    /// if a cost is malformed, or if two products share a key or name.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        let currency = products::parse_currency(&fixture.currency)?;
        let mut catalog = Catalog::new(currency);

        for product_fixture in fixture.products {
            let key = product_fixture.key.clone();
            let product = product_fixture.try_into_product(currency)?;

            catalog.insert(key, product)?;
        }

        info!(
            path = %file_path.display(),
            products = catalog.len(),
            currency = currency.iso_alpha_code,
            "loaded product fixture"
        );

        self.catalog = Some(catalog);

        Ok(self)
    }

    /// Load the initial cart from a YAML fixture file, replacing any loaded cart
    ///
    /// Lines referring to the same product are merged.
    ///
    /// # Errors
    ///
    /// Returns an error if no products are loaded, if the file cannot be read or parsed,
    /// if a line refers to an unknown product, or if a line has zero quantity.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let catalog = self.catalog.as_ref().ok_or(FixtureError::NoCatalog)?;

        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        let mut cart = Cart::new(catalog.currency());

        for line in fixture.items {
            let product = catalog.product(&line.product)?;

            let quantity = NonZeroU32::new(line.quantity)
                .ok_or_else(|| FixtureError::ZeroQuantity(line.product.clone()))?;

            cart.add_item(LineItem::with_quantity(
                product.name.clone(),
                product.image.clone(),
                product.price,
                quantity,
            ))?;
        }

        info!(
            path = %file_path.display(),
            lines = cart.len(),
            units = cart.item_count(),
            "loaded cart fixture"
        );

        self.cart = Some(cart);

        Ok(self)
    }

    /// Load a complete fixture set (products and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?.load_cart(name)?;

        Ok(fixture)
    }

    /// Get the loaded catalog
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn catalog(&self) -> Result<&Catalog<'a>, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCatalog)
    }

    /// Create a cart holding the loaded cart lines
    ///
    /// Without a cart fixture the cart starts empty, in the catalog currency.
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn cart(&self) -> Result<Cart<'a>, FixtureError> {
        if let Some(cart) = &self.cart {
            return Ok(cart.clone());
        }

        Ok(Cart::new(self.catalog()?.currency()))
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io, path::Path};

    use rusty_money::{Money, iso::USD};
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> io::Result<()> {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)
    }

    const PRODUCTS: &str = "\
currency: USD
products:
  - key: fern
    name: Fern
    image: fern.jpg
    cost: \"$5.00\"
  - key: aloe
    name: Aloe
    cost: \"$3.50\"
";

    fn fixture_dir(cart: &str) -> Result<TempDir, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;

        write_fixture(dir.path(), "products", "test", PRODUCTS)?;
        write_fixture(dir.path(), "carts", "test", cart)?;

        Ok(dir)
    }

    #[test]
    fn fixture_loads_products_and_cart() -> TestResult {
        let dir = fixture_dir(
            "items:\n  - product: fern\n    quantity: 2\n  - product: aloe\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("test")?.load_cart("test")?;

        let catalog = fixture.catalog()?;

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.currency(), USD);
        assert_eq!(catalog.product("aloe")?.image, "");

        let cart = fixture.cart()?;

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total()?, Money::from_minor(1350, USD));

        Ok(())
    }

    #[test]
    fn fixture_merges_repeated_cart_lines() -> TestResult {
        let dir = fixture_dir(
            "items:\n  - product: fern\n  - product: aloe\n  - product: fern\n    quantity: 3\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("test")?.load_cart("test")?;

        let cart = fixture.cart()?;
        let names: Vec<&str> = cart.iter().map(LineItem::name).collect();

        assert_eq!(names, ["Fern", "Aloe"]);
        assert_eq!(cart.get("Fern").map(|item| item.quantity().get()), Some(4));

        Ok(())
    }

    #[test]
    fn fixture_cart_without_cart_file_is_empty() -> TestResult {
        let dir = fixture_dir("items: []\n")?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("test")?;

        let cart = fixture.cart()?;

        assert!(cart.is_empty());
        assert_eq!(cart.currency(), USD);

        Ok(())
    }

    #[test]
    fn fixture_unknown_product_returns_error() -> TestResult {
        let dir = fixture_dir("items:\n  - product: orchid\n")?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("test")?;

        let result = fixture.load_cart("test");

        assert!(matches!(result, Err(FixtureError::ProductNotFound(key)) if key == "orchid"));

        Ok(())
    }

    #[test]
    fn fixture_zero_quantity_returns_error() -> TestResult {
        let dir = fixture_dir("items:\n  - product: fern\n    quantity: 0\n")?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("test")?;

        let result = fixture.load_cart("test");

        assert!(matches!(result, Err(FixtureError::ZeroQuantity(key)) if key == "fern"));

        Ok(())
    }

    #[test]
    fn fixture_invalid_cost_returns_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "products",
            "broken",
            "currency: USD\nproducts:\n  - key: fern\n    name: Fern\n    cost: \"$abc\"\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        let result = fixture.load_products("broken");

        assert!(matches!(
            result,
            Err(FixtureError::InvalidPrice(ParsePriceError::InvalidAmount(_)))
        ));

        Ok(())
    }

    #[test]
    fn fixture_unknown_currency_returns_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(dir.path(), "products", "odd", "currency: ABC\nproducts: []\n")?;

        let mut fixture = Fixture::with_base_path(dir.path());

        let result = fixture.load_products("odd");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(_))));

        Ok(())
    }

    #[test]
    fn fixture_duplicate_product_returns_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "products",
            "dupes",
            "currency: USD\nproducts:\n  - key: fern\n    name: Fern\n    cost: \"$1\"\n  - key: fern\n    name: Fern Two\n    cost: \"$2\"\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        let result = fixture.load_products("dupes");

        assert!(matches!(
            result,
            Err(FixtureError::Catalog(CatalogError::DuplicateProduct(_)))
        ));

        Ok(())
    }

    #[test]
    fn fixture_cart_before_products_returns_error() {
        let mut fixture = Fixture::new();

        assert!(matches!(
            fixture.load_cart("plants"),
            Err(FixtureError::NoCatalog)
        ));
        assert!(matches!(fixture.cart(), Err(FixtureError::NoCatalog)));
    }

    #[test]
    fn fixture_missing_file_returns_io_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        let mut fixture = Fixture::with_base_path(dir.path());

        assert!(matches!(
            fixture.load_products("missing"),
            Err(FixtureError::Io(_))
        ));

        Ok(())
    }
}
