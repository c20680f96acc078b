//! Cart View
//!
//! Translates discrete cart gestures (the `+`, `-` and remove buttons, continue shopping,
//! checkout) into cart mutations, and derives the values a display layer shows for each line.

use std::{fmt, num::NonZeroU32, str::FromStr};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::{Cart, CartError},
    items::LineItem,
    pricing::{TotalPriceError, subtotal},
};

/// Navigation out of the cart view, supplied by whoever hosts the view.
pub trait ContinueShopping {
    /// Leave the cart and return to the product listing.
    fn continue_shopping(&mut self);
}

impl<F: FnMut()> ContinueShopping for F {
    fn continue_shopping(&mut self) {
        self();
    }
}

/// Navigator that does nothing when the shopper continues shopping.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl ContinueShopping for NoopNavigator {
    fn continue_shopping(&mut self) {}
}

/// A single user gesture on the cart view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// Add one unit to the named line.
    Increment(String),

    /// Take one unit from the named line, removing it at the last unit.
    Decrement(String),

    /// Remove the named line.
    Remove(String),

    /// Leave the cart view.
    ContinueShopping,

    /// Start checkout.
    Checkout,
}

/// Errors parsing a textual gesture.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GestureParseError {
    /// The gesture verb is not recognised.
    #[error("Unknown gesture: {0}")]
    Unknown(String),

    /// A line gesture was given without an item name.
    #[error("Gesture {0} needs an item name, e.g. {0}:Fern")]
    MissingName(String),
}

impl FromStr for Gesture {
    type Err = GestureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, name) = match s.split_once(':') {
            Some((verb, name)) => (verb.trim(), Some(name.trim())),
            None => (s.trim(), None),
        };

        let named = |gesture: fn(String) -> Gesture| match name {
            Some(name) if !name.is_empty() => Ok(gesture(name.to_string())),
            _ => Err(GestureParseError::MissingName(verb.to_string())),
        };

        match verb {
            "increment" | "+" => named(Gesture::Increment),
            "decrement" | "-" => named(Gesture::Decrement),
            "remove" => named(Gesture::Remove),
            "continue" if name.is_none() => Ok(Gesture::ContinueShopping),
            "checkout" if name.is_none() => Ok(Gesture::Checkout),
            _ => Err(GestureParseError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gesture::Increment(name) => write!(f, "increment:{name}"),
            Gesture::Decrement(name) => write!(f, "decrement:{name}"),
            Gesture::Remove(name) => write!(f, "remove:{name}"),
            Gesture::ContinueShopping => f.write_str("continue"),
            Gesture::Checkout => f.write_str("checkout"),
        }
    }
}

/// Result of handling a gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A line's quantity changed.
    Updated {
        /// Line name.
        name: String,
        /// New quantity.
        quantity: NonZeroU32,
    },

    /// A line left the cart.
    Removed {
        /// Line name.
        name: String,
    },

    /// The gesture named a line that is not in the cart.
    Unchanged,

    /// The shopper left the cart view.
    Navigated,

    /// The requested feature does not exist yet.
    NotImplemented,
}

/// Display values for one cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    /// Line name.
    pub name: String,

    /// Image reference.
    pub image: String,

    /// Unit price.
    pub price: Money<'a, Currency>,

    /// Units on the line.
    pub quantity: NonZeroU32,

    /// Unit price multiplied by quantity.
    pub subtotal: Money<'a, Currency>,
}

impl<'a> CartLine<'a> {
    fn from_item(item: &LineItem<'a>) -> Result<Self, TotalPriceError> {
        Ok(Self {
            name: item.name().to_string(),
            image: item.image().to_string(),
            price: *item.price(),
            quantity: item.quantity(),
            subtotal: subtotal(item)?,
        })
    }
}

/// Everything a display layer needs to draw the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary<'a> {
    /// Lines in cart order.
    pub lines: Vec<CartLine<'a>>,

    /// Sum of the line subtotals.
    pub total: Money<'a, Currency>,

    /// Units across all lines.
    pub item_count: u64,
}

impl<'a> CartSummary<'a> {
    /// Derive the summary of a cart's current lines.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a line subtotal overflows.
    pub fn from_cart(cart: &Cart<'a>) -> Result<Self, TotalPriceError> {
        Ok(Self {
            lines: cart
                .iter()
                .map(CartLine::from_item)
                .collect::<Result<_, _>>()?,
            total: cart.total()?,
            item_count: cart.item_count(),
        })
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart view bound to a cart for the duration of a session.
#[derive(Debug)]
pub struct CartView<'c, 'a, N: ContinueShopping = NoopNavigator> {
    cart: &'c mut Cart<'a>,
    navigator: N,
}

impl<'c, 'a> CartView<'c, 'a> {
    /// Create a view over the cart whose continue-shopping gesture does nothing.
    pub fn new(cart: &'c mut Cart<'a>) -> Self {
        Self::with_navigator(cart, NoopNavigator)
    }
}

impl<'c, 'a, N: ContinueShopping> CartView<'c, 'a, N> {
    /// Create a view over the cart that hands continue-shopping gestures to `navigator`.
    pub fn with_navigator(cart: &'c mut Cart<'a>, navigator: N) -> Self {
        Self { cart, navigator }
    }

    /// The cart this view reads and mutates.
    pub fn cart(&self) -> &Cart<'a> {
        &*self.cart
    }

    /// Handle a gesture.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if an increment would overflow the line quantity.
    pub fn dispatch(&mut self, gesture: &Gesture) -> Result<Outcome, CartError> {
        debug!(%gesture, "dispatching cart gesture");

        match gesture {
            Gesture::Increment(name) => self.on_increment(name),
            Gesture::Decrement(name) => Ok(self.on_decrement(name)),
            Gesture::Remove(name) => Ok(self.on_remove(name)),
            Gesture::ContinueShopping => Ok(self.on_continue_shopping()),
            Gesture::Checkout => Ok(self.on_checkout()),
        }
    }

    /// Add one unit to the named line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if the line already holds `u32::MAX` units.
    pub fn on_increment(&mut self, name: &str) -> Result<Outcome, CartError> {
        let Some(current) = self.quantity_of(name) else {
            return Ok(Outcome::Unchanged);
        };

        let quantity = current
            .checked_add(1)
            .ok_or_else(|| CartError::QuantityOverflow(name.to_string()))?;

        Ok(self.update(name, quantity))
    }

    /// Take one unit from the named line.
    ///
    /// A line holding a single unit is removed rather than set to zero.
    pub fn on_decrement(&mut self, name: &str) -> Outcome {
        let Some(current) = self.quantity_of(name) else {
            return Outcome::Unchanged;
        };

        match current.get().checked_sub(1).and_then(NonZeroU32::new) {
            Some(quantity) => self.update(name, quantity),
            None => self.on_remove(name),
        }
    }

    /// Remove the named line.
    pub fn on_remove(&mut self, name: &str) -> Outcome {
        match self.cart.remove_item(name) {
            Some(item) => Outcome::Removed {
                name: item.name().to_string(),
            },
            None => Outcome::Unchanged,
        }
    }

    /// Leave the cart view through the navigator. The cart is not touched.
    pub fn on_continue_shopping(&mut self) -> Outcome {
        self.navigator.continue_shopping();

        Outcome::Navigated
    }

    /// Checkout is not available yet; reports [`Outcome::NotImplemented`].
    pub fn on_checkout(&self) -> Outcome {
        info!(
            item_count = self.cart.item_count(),
            "checkout requested but not implemented"
        );

        Outcome::NotImplemented
    }

    /// Display values for every line, in cart order.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a line subtotal overflows.
    pub fn lines(&self) -> Result<Vec<CartLine<'a>>, TotalPriceError> {
        self.cart.iter().map(CartLine::from_item).collect()
    }

    /// Total of the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a line subtotal overflows.
    pub fn total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        self.cart.total()
    }

    /// Lines, total and unit count in one read.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a line subtotal overflows.
    pub fn summary(&self) -> Result<CartSummary<'a>, TotalPriceError> {
        CartSummary::from_cart(self.cart)
    }

    fn quantity_of(&self, name: &str) -> Option<NonZeroU32> {
        self.cart.get(name).map(LineItem::quantity)
    }

    fn update(&mut self, name: &str, quantity: NonZeroU32) -> Outcome {
        match self.cart.update_quantity(name, quantity) {
            Some(_) => Outcome::Updated {
                name: name.to_string(),
                quantity,
            },
            None => Outcome::Unchanged,
        }
    }
}
