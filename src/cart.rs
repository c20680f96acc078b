//! Cart

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    items::LineItem,
    pricing::{TotalPriceError, total},
};

/// Errors related to cart construction or mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (item name, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// Two lines share a name.
    #[error("Item {0} appears more than once")]
    DuplicateItem(String),

    /// Increasing a line's quantity would overflow.
    #[error("Quantity of item {0} overflowed")]
    QuantityOverflow(String),
}

/// Ordered collection of line items for one shopping session, keyed by name.
///
/// The cart is the single source of truth for its lines. Totals are never cached here;
/// they are derived from the current lines on every read.
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    items: Vec<LineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a new cart pre-populated with the given items, in order.
    ///
    /// # Errors
    ///
    /// - [`CartError::CurrencyMismatch`]: an item is priced in another currency.
    /// - [`CartError::DuplicateItem`]: two items share a name.
    pub fn with_items(
        items: impl Into<Vec<LineItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let items = items.into();

        for (i, item) in items.iter().enumerate() {
            ensure_currency(item, currency)?;

            if items
                .iter()
                .take(i)
                .any(|earlier| earlier.name() == item.name())
            {
                return Err(CartError::DuplicateItem(item.name().to_string()));
            }
        }

        Ok(Cart { items, currency })
    }

    /// Add an item to the cart.
    ///
    /// A new name is appended after the existing lines. A name already in the cart keeps
    /// its position and has its quantity increased by the incoming quantity. Returns the
    /// resulting quantity of the line.
    ///
    /// # Errors
    ///
    /// - [`CartError::CurrencyMismatch`]: the item is priced in another currency.
    /// - [`CartError::QuantityOverflow`]: the merged quantity does not fit in a `u32`.
    pub fn add_item(&mut self, item: LineItem<'a>) -> Result<NonZeroU32, CartError> {
        ensure_currency(&item, self.currency)?;

        if let Some(existing) = self.find_mut(item.name()) {
            let quantity = existing
                .quantity()
                .checked_add(item.quantity().get())
                .ok_or_else(|| CartError::QuantityOverflow(item.name().to_string()))?;

            existing.set_quantity(quantity);

            debug!(name = item.name(), %quantity, "merged item into existing cart line");

            return Ok(quantity);
        }

        let quantity = item.quantity();

        debug!(name = item.name(), %quantity, "added item to cart");

        self.items.push(item);

        Ok(quantity)
    }

    /// Remove the line with the given name, returning it.
    ///
    /// Removing a name that is not in the cart is a no-op and returns `None`.
    pub fn remove_item(&mut self, name: &str) -> Option<LineItem<'a>> {
        let position = self.items.iter().position(|item| item.name() == name)?;

        debug!(name, "removed item from cart");

        Some(self.items.remove(position))
    }

    /// Set the quantity of the line with the given name, returning the previous quantity.
    ///
    /// The quantity is non-zero by construction: callers that want to drop a line below one
    /// unit must call [`Cart::remove_item`] instead. Updating a name that is not in the cart
    /// is a no-op and returns `None`.
    pub fn update_quantity(&mut self, name: &str, quantity: NonZeroU32) -> Option<NonZeroU32> {
        let item = self.find_mut(name)?;
        let previous = item.quantity();

        item.set_quantity(quantity);

        debug!(name, %previous, %quantity, "updated cart line quantity");

        Some(previous)
    }

    /// Get the line with the given name.
    pub fn get(&self, name: &str) -> Option<&LineItem<'a>> {
        self.items.iter().find(|item| item.name() == name)
    }

    /// Check whether a line with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Current lines, in cart order.
    pub fn items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// Owned copy of the current lines, detached from the cart.
    pub fn snapshot(&self) -> Vec<LineItem<'a>> {
        self.items.clone()
    }

    /// Iterate over the current lines, in cart order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem<'a>> {
        self.items.iter()
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity().get()))
            .sum()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Calculate the total of the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a line subtotal overflows.
    pub fn total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        total(&self.items, self.currency)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut LineItem<'a>> {
        self.items.iter_mut().find(|item| item.name() == name)
    }
}

impl<'c, 'a> IntoIterator for &'c Cart<'a> {
    type Item = &'c LineItem<'a>;
    type IntoIter = std::slice::Iter<'c, LineItem<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn ensure_currency(item: &LineItem<'_>, currency: &'static Currency) -> Result<(), CartError> {
    let item_currency = item.price().currency();

    if item_currency == currency {
        Ok(())
    } else {
        warn!(
            name = item.name(),
            item_currency = item_currency.iso_alpha_code,
            cart_currency = currency.iso_alpha_code,
            "rejected item priced in another currency"
        );

        Err(CartError::CurrencyMismatch(
            item.name().to_string(),
            item_currency.iso_alpha_code,
            currency.iso_alpha_code,
        ))
    }
}
