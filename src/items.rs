//! Items

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};

/// One distinct product in a cart.
///
/// The name identifies the line within its cart; the image is a display-only reference.
/// A line item always holds at least one unit.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem<'a> {
    name: String,
    image: String,
    price: Money<'a, Currency>,
    quantity: NonZeroU32,
}

impl<'a> LineItem<'a> {
    /// Creates a new line item holding a single unit.
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        Self::with_quantity(name, image, price, NonZeroU32::MIN)
    }

    /// Creates a new line item with the given quantity.
    pub fn with_quantity(
        name: impl Into<String>,
        image: impl Into<String>,
        price: Money<'a, Currency>,
        quantity: NonZeroU32,
    ) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            price,
            quantity,
        }
    }

    /// Returns the name of the item
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the image reference of the item
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns the unit price of the item
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Returns the number of units on this line
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }
}
