//! Cart Fixtures

use serde::Deserialize;

/// Wrapper for cart lines in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart lines, in cart order
    pub items: Vec<CartLineFixture>,
}

/// Cart Line Fixture
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Product key reference
    pub product: String,

    /// Units of the product
    #[serde(default = "one")]
    pub quantity: u32,
}

const fn one() -> u32 {
    1
}
